// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::identifier::{is_valid, Identifier};
use proptest::prelude::*;

#[test]
fn test_valid_identifiers() {
    for name in ["code", "Code", "_a", "a_", "a1", "ModuleStore", "__", "x"] {
        assert!(is_valid(name), "{} should be valid", name);
        assert_eq!(Identifier::new(name).unwrap().as_str(), name);
    }
}

#[test]
fn test_invalid_identifiers() {
    for name in ["", "_", "1a", "a-b", "a b", "a::b", "é", "<SELF>"] {
        assert!(!is_valid(name), "{:?} should be invalid", name);
        assert!(Identifier::new(name).is_err());
    }
}

#[test]
fn test_deserialize_rejects_invalid() {
    let bytes = bcs_ext::serialize_str("1abc").unwrap();
    assert!(bcs_ext::from_bytes::<Identifier>(&bytes).is_err());
    let bytes = bcs_ext::serialize_str("abc").unwrap();
    assert_eq!(
        bcs_ext::from_bytes::<Identifier>(&bytes).unwrap(),
        Identifier::new("abc").unwrap()
    );
}

proptest! {
    #[test]
    fn test_identifier_round_trip(name in "[a-zA-Z][a-zA-Z0-9_]{0,31}") {
        let identifier = Identifier::new(name.as_str()).unwrap();
        let bytes = bcs_ext::to_bytes(&identifier).unwrap();
        // same encoding as a plain string
        prop_assert_eq!(&bytes, &bcs_ext::serialize_str(&name).unwrap());
        prop_assert_eq!(bcs_ext::from_bytes::<Identifier>(&bytes).unwrap(), identifier);
    }
}
