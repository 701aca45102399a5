use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of resource an invitation can grant access to.
///
/// Stored as a type column next to the resource id, so new kinds only
/// need a variant here plus a lookup arm in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitableKind {
    Organization,
}

impl InvitableKind {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            InvitableKind::Organization => "organization",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "organization" => Some(InvitableKind::Organization),
            _ => None,
        }
    }
}

/// The resource an invitation grants access to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitable {
    pub kind: InvitableKind,
    pub id: Uuid,
    pub name: String,
}

impl Invitable {
    pub fn new(kind: InvitableKind, id: Uuid, name: String) -> Self {
        Self { kind, id, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_db_round_trip() {
        let kind = InvitableKind::Organization;
        assert_eq!(InvitableKind::from_db_str(kind.as_db_str()), Some(kind));
        assert_eq!(InvitableKind::from_db_str("spaceship"), None);
    }
}
