//! Two-layer comparison mode.
//!
//! A side mode that hides everything except two user-chosen layers, each
//! with its own opacity slider. Entering captures a snapshot of every
//! layer's (visible, opacity); exiting restores it verbatim, exactly once.

use std::collections::BTreeMap;

use catalog::LayerId;

/// Which of the two comparison slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareSlot {
    One,
    Two,
}

impl CompareSlot {
    fn index(self) -> usize {
        match self {
            CompareSlot::One => 0,
            CompareSlot::Two => 1,
        }
    }
}

/// Pre-entry state, restored on exit and then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSnapshot {
    pub saved: BTreeMap<LayerId, (bool, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
struct Active {
    snapshot: ComparisonSnapshot,
    slots: [Option<LayerId>; 2],
    opacity_pct: [u8; 2],
}

/// The comparison state machine: `Inactive` or `Active`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    active: Option<Active>,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Transition to Active, capturing `snapshot`. Returns false (and keeps
    /// the existing snapshot) if already active.
    pub fn enter(&mut self, snapshot: ComparisonSnapshot) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(Active {
            snapshot,
            slots: [None, None],
            opacity_pct: [100, 100],
        });
        true
    }

    /// Transition to Inactive, yielding the snapshot to restore. The
    /// snapshot is handed out once; a second exit returns None.
    pub fn exit(&mut self) -> Option<ComparisonSnapshot> {
        self.active.take().map(|a| a.snapshot)
    }

    pub fn set_slot(&mut self, slot: CompareSlot, layer: Option<LayerId>) -> bool {
        match &mut self.active {
            Some(a) => {
                a.slots[slot.index()] = layer;
                true
            }
            None => false,
        }
    }

    /// Slider position, 0–100. Values above 100 are clamped.
    pub fn set_opacity_pct(&mut self, slot: CompareSlot, pct: u8) -> bool {
        match &mut self.active {
            Some(a) => {
                a.opacity_pct[slot.index()] = pct.min(100);
                true
            }
            None => false,
        }
    }

    /// The slots in application order: slot 1 first, slot 2 second, so on a
    /// duplicate selection slot 2's opacity wins.
    pub fn slots(&self) -> [(Option<&LayerId>, f64); 2] {
        match &self.active {
            Some(a) => [
                (a.slots[0].as_ref(), percent_to_opacity(a.opacity_pct[0])),
                (a.slots[1].as_ref(), percent_to_opacity(a.opacity_pct[1])),
            ],
            None => [(None, 1.0), (None, 1.0)],
        }
    }
}

/// Maps a 0–100 slider position to a 0.0–1.0 opacity.
pub fn percent_to_opacity(pct: u8) -> f64 {
    f64::from(pct.min(100)) / 100.0
}
