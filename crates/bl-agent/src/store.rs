//! Agent storage: `AgentStore` (SoA arrays plus a tag → slot table).
//!
//! # Slots
//!
//! Every `Vec` field has exactly `len()` elements and the *slot* (index into
//! them) identifies an agent for the duration of one tick.  Slots are
//! assigned in admission order and removals preserve the order of the
//! survivors, so iterating slots `0..len()` always visits agents in the
//! order they entered the path.  Slots shift when agents are removed; use
//! the [`AgentTag`] for anything that must outlive a tick.
//!
//! ```ignore
//! let speed = store.kinematics[slot].speed;  // O(1), cache-friendly
//! ```

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use bl_core::{AgentKind, AgentTag, BlError, BlResult, Position};

use crate::{CyclistParams, Kinematics};

/// Structure-of-Arrays storage for every agent on the path.
///
/// The three arrays are `pub` for direct indexed access on hot paths; use
/// [`push`](Self::push) and [`remove`](Self::remove) to change the set of
/// agents so the lookup table stays consistent.
#[derive(Default)]
pub struct AgentStore {
    /// Identity of each agent.
    pub tags: Vec<AgentTag>,

    /// Fixed attributes.  Never written after `push`.
    pub params: Vec<CyclistParams>,

    /// Mutable kinematic state.  Written only in the commit phase.
    pub kinematics: Vec<Kinematics>,

    slots: HashMap<AgentTag, usize>,
}

/// Borrowed view of one agent.
#[derive(Copy, Clone, Debug)]
pub struct AgentRef<'a> {
    pub slot:       usize,
    pub tag:        AgentTag,
    pub params:     &'a CyclistParams,
    pub kinematics: &'a Kinematics,
}

impl AgentRef<'_> {
    #[inline]
    pub fn pos(&self) -> Position {
        self.kinematics.pos
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.kinematics.speed
    }

    #[inline]
    pub fn kind(&self) -> AgentKind {
        self.tag.kind()
    }
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append an agent and return its slot.
    pub fn push(
        &mut self,
        tag:        AgentTag,
        params:     CyclistParams,
        kinematics: Kinematics,
    ) -> BlResult<usize> {
        if self.slots.contains_key(&tag) {
            return Err(BlError::DuplicateAgent(tag));
        }
        let slot = self.tags.len();
        self.tags.push(tag);
        self.params.push(params);
        self.kinematics.push(kinematics);
        self.slots.insert(tag, slot);
        Ok(slot)
    }

    /// Remove every agent in `tags`, keeping the survivors in order.
    ///
    /// Returns the number of agents removed.  Unknown tags are ignored.
    pub fn remove(&mut self, tags: &[AgentTag]) -> usize {
        if tags.is_empty() {
            return 0;
        }
        let mut keep: Vec<bool> = vec![true; self.len()];
        let mut removed = 0;
        for tag in tags {
            if let Some(&slot) = self.slots.get(tag) {
                if keep[slot] {
                    keep[slot] = false;
                    removed += 1;
                }
            }
        }
        if removed == 0 {
            return 0;
        }

        let mut k = keep.iter();
        self.tags.retain(|_| *k.next().unwrap_or(&true));
        let mut k = keep.iter();
        self.params.retain(|_| *k.next().unwrap_or(&true));
        let mut k = keep.iter();
        self.kinematics.retain(|_| *k.next().unwrap_or(&true));

        self.slots.clear();
        for (slot, &tag) in self.tags.iter().enumerate() {
            self.slots.insert(tag, slot);
        }
        removed
    }

    /// Current slot of `tag`, if present.
    #[inline]
    pub fn slot_of(&self, tag: AgentTag) -> Option<usize> {
        self.slots.get(&tag).copied()
    }

    #[inline]
    pub fn contains(&self, tag: AgentTag) -> bool {
        self.slots.contains_key(&tag)
    }

    /// View of the agent at `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= len()`.
    #[inline]
    pub fn get(&self, slot: usize) -> AgentRef<'_> {
        AgentRef {
            slot,
            tag:        self.tags[slot],
            params:     &self.params[slot],
            kinematics: &self.kinematics[slot],
        }
    }

    /// View of the agent tagged `tag`.
    pub fn by_tag(&self, tag: AgentTag) -> BlResult<AgentRef<'_>> {
        self.slot_of(tag)
            .map(|slot| self.get(slot))
            .ok_or(BlError::AgentNotFound(tag))
    }

    /// Iterator over all agents in slot order.
    pub fn iter(&self) -> impl Iterator<Item = AgentRef<'_>> + '_ {
        (0..self.len()).map(move |slot| self.get(slot))
    }

    /// Number of mobile (non-obstacle) agents.
    pub fn mobile_count(&self) -> usize {
        self.tags.iter().filter(|t| t.kind() == AgentKind::Mobile).count()
    }
}
