mod common;

use collection_literals::btree;
use common::{alice_smith, jane, person};
use fieldkit::{deep_search, diff, patch, reflective_equals, Value};

#[test]
fn diff_and_patch_of_people() {
    let old = person("Alice", 30, true);
    let new = person("Alice", 31, false);
    assert_eq!(
        diff(&old, &new),
        btree! {
            "age".to_string() => Value::from(31i64),
            "active".to_string() => Value::from(false),
        }
    );
    assert_eq!(
        patch(&old, &new),
        vec![
            ("age".to_string(), Value::from(31i64)),
            ("active".to_string(), Value::from(false)),
        ]
    );
}

#[test]
fn identical_values_have_no_changes() {
    let p = person("Same", 1, true);
    assert!(diff(&p, &p.clone()).is_empty());
    assert!(patch(&p, &p.clone()).is_empty());
    assert!(reflective_equals(&p, &p));
    assert!(reflective_equals(&jane(), &jane()));
}

#[test]
fn nested_changes_report_the_top_level_field() {
    let mut moved = jane();
    moved.address.city = "Lyon".into();
    let changes = diff(&jane(), &moved);
    assert_eq!(changes.len(), 1);
    assert!(changes.contains_key("address"));
}

#[test]
fn deep_search_scenarios() {
    let dog = alice_smith();
    assert!(deep_search(&dog, "swift"));
    assert!(deep_search(&dog, "SMITH"));
    assert!(!deep_search(&dog, "35"));
}

#[test]
fn textual_comparison_distinguishes_int_and_float() {
    assert!(!reflective_equals(&(1,), &(1.0,)));
}
