//! Strongly typed, zero-cost identifier wrappers.
//!
//! Real cyclists are numbered by admission order (`AgentId`); the static
//! obstacles that model a bottleneck get their own namespace (`ObstacleId`).
//! [`AgentTag`] joins the two so every agent in the store has one stable,
//! hashable identity and the static/mobile distinction is an explicit
//! variant rather than something inferred from the identifier's shape.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Admission number of a cyclist: 0 for the first bicycle to enter the
    /// path, 1 for the second, and so on.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a static bottleneck obstacle.
    pub struct ObstacleId(u16);
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "virtual_bn_{}", self.0)
    }
}

// ── AgentKind ─────────────────────────────────────────────────────────────────

/// Whether an agent takes part in the decide/commit cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    /// A cyclist: decides and moves every step.
    Mobile,
    /// A fixed obstacle: occupies space, never decides, never moves.
    Static,
}

// ── AgentTag ──────────────────────────────────────────────────────────────────

/// Identity of any agent on the path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentTag {
    Cyclist(AgentId),
    Obstacle(ObstacleId),
}

impl AgentTag {
    #[inline]
    pub fn kind(self) -> AgentKind {
        match self {
            AgentTag::Cyclist(_)  => AgentKind::Mobile,
            AgentTag::Obstacle(_) => AgentKind::Static,
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self.kind() == AgentKind::Static
    }

    /// The cyclist id, or `None` for obstacles.
    #[inline]
    pub fn cyclist(self) -> Option<AgentId> {
        match self {
            AgentTag::Cyclist(id) => Some(id),
            AgentTag::Obstacle(_) => None,
        }
    }
}

impl From<AgentId> for AgentTag {
    fn from(id: AgentId) -> Self {
        AgentTag::Cyclist(id)
    }
}

impl From<ObstacleId> for AgentTag {
    fn from(id: ObstacleId) -> Self {
        AgentTag::Obstacle(id)
    }
}

impl fmt::Display for AgentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentTag::Cyclist(id)  => id.fmt(f),
            AgentTag::Obstacle(id) => id.fmt(f),
        }
    }
}
