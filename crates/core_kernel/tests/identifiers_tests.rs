//! Comprehensive unit tests for the Identifiers module
//!
//! Tests cover all identifier types, their creation, parsing,
//! conversion, and display formatting.

use core_kernel::{ClientId, InvoiceId, LedgerEntryId, ProjectId, TeamMemberId, UserId};
use uuid::Uuid;

mod project_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ProjectId::new();
        let id2 = ProjectId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ProjectId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ProjectId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ProjectId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ProjectId::prefix(), "PRJ");
    }

    #[test]
    fn test_display_format() {
        let id = ProjectId::new();
        let display = id.to_string();
        assert!(display.starts_with("PRJ-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ProjectId::new();
        let string = original.to_string();
        let parsed: ProjectId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_accepts_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: ProjectId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let id: ProjectId = uuid.into();
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        // The wire format is the bare UUID, without the display prefix
        let id = ProjectId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let deserialized: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod client_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClientId::prefix(), "CLI");
    }

    #[test]
    fn test_display_format() {
        let id = ClientId::new();
        let display = id.to_string();
        assert!(display.starts_with("CLI-"));
    }

    #[test]
    fn test_roundtrip() {
        let original = ClientId::new();
        let string = original.to_string();
        let parsed: ClientId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }
}

mod invoice_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = InvoiceId::new();
        let id2 = InvoiceId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(InvoiceId::prefix(), "INV");
    }

    #[test]
    fn test_display_format() {
        let id = InvoiceId::new();
        let display = id.to_string();
        assert!(display.starts_with("INV-"));
    }

    #[test]
    fn test_roundtrip() {
        let original = InvoiceId::new();
        let string = original.to_string();
        let parsed: InvoiceId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }
}

mod cross_type_tests {
    use super::*;

    #[test]
    fn test_different_id_types_are_distinct() {
        // Same UUID should create different identifier instances
        // that are type-safe (can't mix ClientId with ProjectId)
        let uuid = Uuid::new_v4();
        let client_id = ClientId::from_uuid(uuid);
        let project_id = ProjectId::from_uuid(uuid);

        // They contain the same UUID but are different types
        assert_eq!(*client_id.as_uuid(), *project_id.as_uuid());
    }

    #[test]
    fn test_id_prefixes_are_unique() {
        let prefixes = vec![
            ClientId::prefix(),
            ProjectId::prefix(),
            TeamMemberId::prefix(),
            UserId::prefix(),
            InvoiceId::prefix(),
            LedgerEntryId::prefix(),
        ];

        // Check all prefixes are unique
        let mut unique_prefixes: Vec<&str> = prefixes.clone();
        unique_prefixes.sort();
        unique_prefixes.dedup();

        assert_eq!(
            prefixes.len(),
            unique_prefixes.len(),
            "All identifier prefixes should be unique"
        );
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn test_nil_uuid() {
        let nil_uuid = Uuid::nil();
        let id = ProjectId::from_uuid(nil_uuid);
        assert!(id.as_uuid().is_nil());
    }

    #[test]
    fn test_max_uuid() {
        let max_uuid = Uuid::max();
        let id = ProjectId::from_uuid(max_uuid);
        assert_eq!(*id.as_uuid(), max_uuid);
    }
}
