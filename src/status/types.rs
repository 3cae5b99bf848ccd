use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Bleed,
    Weaken,
    Stun,
    Curse,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Poison => "Poison",
            StatusKind::Bleed => "Bleed",
            StatusKind::Weaken => "Weaken",
            StatusKind::Stun => "Stun",
            StatusKind::Curse => "Curse",
        }
    }

    /// Three-letter code shown next to a combatant's name.
    pub fn code(&self) -> &'static str {
        match self {
            StatusKind::Poison => "PSN",
            StatusKind::Bleed => "BLD",
            StatusKind::Weaken => "WKN",
            StatusKind::Stun => "STN",
            StatusKind::Curse => "CRS",
        }
    }
}

/// An active status on one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    /// Rounds left before the status wears off
    pub duration: u32,
    /// Damage per tick for damage-over-time kinds
    pub power: u32,
}

impl Status {
    pub fn new(kind: StatusKind, duration: u32, power: u32) -> Self {
        Self {
            kind,
            duration,
            power,
        }
    }
}
