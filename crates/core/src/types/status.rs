//! Status enums for stored entities.

use serde::{Deserialize, Serialize};

/// Pre-order lifecycle status.
///
/// Records are created as `Pending`. No transitions are implemented yet;
/// fulfilment happens outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreorderStatus {
    #[default]
    Pending,
}

impl PreorderStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for PreorderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_wire_format() {
        assert_eq!(
            serde_json::to_string(&PreorderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<PreorderStatus>("\"pending\"").unwrap(),
            PreorderStatus::Pending
        );
        assert!(serde_json::from_str::<PreorderStatus>("\"shipped\"").is_err());
        assert_eq!(PreorderStatus::Pending.to_string(), "pending");
    }
}
