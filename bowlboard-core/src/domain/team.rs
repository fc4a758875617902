//! Team — competition participant identity.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// A competing team. Identity and name are immutable once the tournament
/// starts; mutation is owned by the host's administration subsystem, this
/// engine only reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(id),
            name: name.into(),
        }
    }
}
