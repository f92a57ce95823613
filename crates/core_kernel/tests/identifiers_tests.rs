//! Tests for entity keys and ledger versions

use core_kernel::{ClientId, FundId, LedgerVersion, Province, SalesPersonId};

mod key_tests {
    use super::*;

    #[test]
    fn test_keys_order_lexicographically() {
        let mut ids = vec![
            FundId::new("Income Fund"),
            FundId::new("Balanced Fund"),
            FundId::new("Growth Fund"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "Balanced Fund");
        assert_eq!(ids[2].as_str(), "Income Fund");
    }

    #[test]
    fn test_keys_deserialize_from_bare_strings() {
        let id: SalesPersonId = serde_json::from_str("\"Zhang Wei\"").unwrap();
        assert_eq!(id, SalesPersonId::new("Zhang Wei"));
    }

    #[test]
    fn test_keys_usable_as_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(ClientId::new("Acme"), 1);
        map.insert(ClientId::from("Acme".to_string()), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&ClientId::new("Acme")], 2);
    }

    #[test]
    fn test_province_displays_raw_value() {
        let province = Province::new("Guangdong");
        assert_eq!(province.to_string(), "Guangdong");
        assert_eq!(province.into_string(), "Guangdong");
    }
}

mod version_tests {
    use super::*;

    #[test]
    fn test_v7_versions_are_time_ordered() {
        let first = LedgerVersion::new_v7();
        let second = LedgerVersion::new_v7();
        assert_ne!(first, second);
    }

    #[test]
    fn test_version_serializes_as_uuid_string() {
        let version = LedgerVersion::new_v7();
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, format!("\"{version}\""));
    }
}
