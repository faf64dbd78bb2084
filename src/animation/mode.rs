use serde::{Deserialize, Serialize};

/// Which shape the tree is heading toward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMode {
    /// Scattered point cloud
    #[default]
    Chaos,
    /// Assembled tree
    Formed,
}

impl TreeMode {
    pub fn from_formed(formed: bool) -> Self {
        if formed {
            TreeMode::Formed
        } else {
            TreeMode::Chaos
        }
    }

    pub fn is_formed(self) -> bool {
        self == TreeMode::Formed
    }

    pub fn toggled(self) -> Self {
        match self {
            TreeMode::Chaos => TreeMode::Formed,
            TreeMode::Formed => TreeMode::Chaos,
        }
    }

    /// Progress value this mode converges to
    pub fn goal(self) -> f32 {
        match self {
            TreeMode::Chaos => 0.0,
            TreeMode::Formed => 1.0,
        }
    }

    /// Pick the value belonging to this mode
    pub fn select<T>(self, chaos: T, formed: T) -> T {
        match self {
            TreeMode::Chaos => chaos,
            TreeMode::Formed => formed,
        }
    }
}
