//! Property-based tests for licence documents.

mod common;

use chrono::{DateTime, Utc};
use common::{client_codec, issuer_codec};
use licencekit_licence::ProductLicence;
use proptest::prelude::*;

fn licence_strategy() -> impl Strategy<Value = ProductLicence> {
    (
        ".{0,40}",
        -62_135_596_800_000i64..253_402_300_799_000i64,
        prop::collection::vec(".{0,12}", 0..6),
    )
        .prop_map(|(owner, millis, features)| {
            let expire_at: DateTime<Utc> = DateTime::from_timestamp_millis(millis).unwrap();
            ProductLicence::new(owner, expire_at, features)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever the issuer signs, a client with the public key reads back unchanged.
    #[test]
    fn issued_licences_verify(licence in licence_strategy()) {
        let document = issuer_codec().encode(&licence).unwrap();
        prop_assert_eq!(client_codec().decode(&document).unwrap(), Some(licence));
    }
}
