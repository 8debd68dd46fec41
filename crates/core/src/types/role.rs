//! Session roles.

use serde::{Deserialize, Serialize};

/// Role carried in a session claim.
///
/// The portfolio has a single administrative identity today; the enum exists
/// so new roles can be added without changing the token format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full read/write access to all collections.
    Admin,
}

impl Role {
    /// String form used in tokens and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
