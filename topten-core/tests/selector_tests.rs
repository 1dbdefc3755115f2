mod common;

use std::collections::HashSet;

use topten_core::Catalog;

#[test]
fn same_date_always_selects_same_category() {
    let catalog = Catalog::builtin();
    let first = catalog.select_for_date(common::date("2024-03-15"));
    let second = catalog.select_for_date(common::date("2024-03-15"));
    assert_eq!(first.id, second.id);
}

#[test]
fn selection_index_is_the_character_sum_mod_length() {
    let catalog = common::three_catalog();

    // "2024-01-01" character codes sum to 484, and 484 % 3 == 1.
    assert_eq!(catalog.select_for_date(common::date("2024-01-01")).id, "c1");
    // "2024-01-02" sums to 485.
    assert_eq!(catalog.select_for_date(common::date("2024-01-02")).id, "c2");
    // "2024-01-03" sums to 486.
    assert_eq!(catalog.select_for_date(common::date("2024-01-03")).id, "c0");
}

#[test]
fn dates_with_equal_character_sums_collide() {
    let catalog = Catalog::builtin();
    // Same digits in a different order sum identically.
    let a = catalog.select_for_date(common::date("2024-01-01"));
    let b = catalog.select_for_date(common::date("2024-01-10"));
    assert_eq!(a.id, b.id);
}

#[test]
fn every_category_is_reachable_over_a_quarter() {
    let catalog = common::three_catalog();
    let mut seen = HashSet::new();
    let mut day = common::date("2024-01-01");
    for _ in 0..90 {
        seen.insert(catalog.select_for_date(day).id.clone());
        day = day.succ_opt().unwrap();
    }
    assert_eq!(seen.len(), catalog.len());
}
