#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn load_is_none_in_non_hydrate_tests() {
    assert!(load("erxes_import_data").is_none());
}

#[test]
fn save_and_remove_are_noops_but_callable() {
    save("erxes_import_data", "job-1");
    assert!(load("erxes_import_data").is_none());
    remove("erxes_import_data");
}
