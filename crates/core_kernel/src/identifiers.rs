//! Strongly-typed identifiers for domain entities
//!
//! Each entity gets its own UUID newtype so a `ClientId` can never stand in
//! for a `ProjectId`. Display renders a short prefix before the UUID for
//! log readability; the serialized form stays a bare UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// A time-ordered identifier (UUIDv7), friendlier to btree indexes
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The short prefix Display puts before the UUID
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accepts both the prefixed display form and a bare UUID
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Client domain identifiers
define_id!(ClientId, "CLI");

// Project domain identifiers
define_id!(ProjectId, "PRJ");
define_id!(TeamMemberId, "TMM");
define_id!(UserId, "USR");

// Billing domain identifiers
define_id!(InvoiceId, "INV");
define_id!(LedgerEntryId, "LGR");
