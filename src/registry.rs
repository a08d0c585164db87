//! Registered object identifier names (X.660 / Annex to X.680).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// `ccitt`, `iso`, `joint-iso-ccitt` and their children, numbered per the
/// X.680 registration tree.
pub static REGISTERED_OID_NAMES: Lazy<BTreeMap<&'static str, i64>> = Lazy::new(|| {
    let mut names = BTreeMap::new();
    names.insert("ccitt", 0);
    names.insert("iso", 1);
    names.insert("joint-iso-ccitt", 2);
    // ccitt
    names.insert("recommendation", 0);
    names.insert("question", 1);
    names.insert("administration", 2);
    names.insert("network-operator", 3);
    // iso
    names.insert("standard", 0);
    names.insert("registration-authority", 1);
    names.insert("member-body", 2);
    names.insert("identified-organization", 3);
    // joint-iso-ccitt
    names.insert("country", 16);
    names.insert("registration-procedures", 17);
    names
});

/// Look up a registered OID component name, if any.
pub fn registered_oid_number(name: &str) -> Option<i64> {
    REGISTERED_OID_NAMES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_names() {
        assert_eq!(registered_oid_number("iso"), Some(1));
        assert_eq!(registered_oid_number("country"), Some(16));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(registered_oid_number("not-a-real-arc"), None);
    }

    #[test]
    fn table_has_all_thirteen_entries() {
        assert_eq!(REGISTERED_OID_NAMES.len(), 13);
    }
}
