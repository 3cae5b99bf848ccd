//! Narrow interfaces the battle engine uses to talk to the rest of the game.
//!
//! Inventory bookkeeping, the persistent party store, the on-screen log and
//! the spawn reference level all live outside the engine. Each is reached
//! through one of the traits below; simple in-memory versions are provided
//! for the simulator and tests.

use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Shared item counts and gold.
pub trait Inventory {
    /// Quantity owned (0 when absent).
    fn has_item(&self, id: &str) -> u32;

    /// Removes `qty` units. Fails without change if fewer are owned.
    fn consume_item(&mut self, id: &str, qty: u32) -> bool;

    fn add_item(&mut self, id: &str, qty: u32);

    fn add_gold(&mut self, amount: u32);
}

/// Receives human-readable battle events.
pub trait MessageSink {
    fn emit(&mut self, text: String);
}

impl MessageSink for Vec<String> {
    fn emit(&mut self, text: String) {
        self.push(text);
    }
}

/// The level used to gate and scale enemy spawns.
pub trait ReferenceLevel {
    fn reference_level(&self) -> u32;
}

impl ReferenceLevel for u32 {
    fn reference_level(&self) -> u32 {
        *self
    }
}

impl ReferenceLevel for Combatant {
    fn reference_level(&self) -> u32 {
        self.level
    }
}

/// Persistent per-member values exchanged with the party store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    /// Attack including the equipped weapon's bonus
    pub attack: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

impl MemberRecord {
    pub fn from_combatant(member: &Combatant) -> Self {
        Self {
            name: member.name.clone(),
            attack: member.attack,
            level: member.level,
            xp: member.xp,
            xp_to_next: member.xp_to_next,
            hp: member.hp,
            max_hp: member.max_hp,
            mp: member.mp,
            max_mp: member.max_mp,
        }
    }
}

/// Authoritative party values kept between battles, indexed by party slot.
pub trait PartyStore {
    fn member(&self, index: usize) -> Option<&MemberRecord>;

    fn publish(&mut self, index: usize, record: MemberRecord);
}

/// In-memory party store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRoster {
    pub members: Vec<MemberRecord>,
}

impl PartyRoster {
    pub fn from_party(party: &[Combatant]) -> Self {
        Self {
            members: party.iter().map(MemberRecord::from_combatant).collect(),
        }
    }
}

impl PartyStore for PartyRoster {
    fn member(&self, index: usize) -> Option<&MemberRecord> {
        self.members.get(index)
    }

    fn publish(&mut self, index: usize, record: MemberRecord) {
        if let Some(slot) = self.members.get_mut(index) {
            *slot = record;
        } else if index == self.members.len() {
            self.members.push(record);
        } else {
            tracing::warn!(index, "party roster has no slot for published member");
        }
    }
}

/// Bounded battle log: keeps the most recent lines for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
    total_emitted: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            total_emitted: 0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines emitted since the last clear, including those scrolled away.
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.total_emitted = 0;
    }
}

impl MessageSink for MessageLog {
    fn emit(&mut self, text: String) {
        tracing::debug!(target: "skirmish::battle_log", "{}", text);
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(text);
        self.total_emitted += 1;
    }
}
