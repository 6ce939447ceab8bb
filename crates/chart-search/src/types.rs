//! Core value types shared by the pools, the frontier and the merge engine.

use serde::{Deserialize, Serialize};

// ── Scores ──────────────────────────────────────────────────────────────

/// Log-domain score of a derivation. Higher is better.
pub type Score = f32;

/// Bound reported by a generator that has no candidates left.
///
/// Lower than any real score; a generator reporting it never re-enters the
/// frontier.
pub const EXHAUSTED: Score = f32::NEG_INFINITY;

/// Whether `bound` is the exhausted sentinel.
#[inline]
pub fn is_exhausted(bound: Score) -> bool {
    bound == EXHAUSTED
}

/// Number of sub-derivation slots a hypothesis references.
pub type Arity = usize;

// ── Identifier Types ────────────────────────────────────────────────────

/// Opaque annotation attached to a candidate group at admission.
///
/// Carried unchanged alongside every hypothesis the group produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Note(pub u64);

impl Note {
    /// Note referring to an index in some caller-owned table.
    pub const fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Raw value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Note {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "note:{}", self.0)
    }
}

/// Chart vertex referenced by a child slot of a partial edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vertex:{}", self.0)
    }
}

/// Index of a generator in its owning engine's generator pool.
///
/// Ids are handed out in admission order, which the frontier uses to break
/// ties between equal bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeneratorId(pub(crate) u32);

impl GeneratorId {
    /// Position in the pool.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_is_below_any_real_score() {
        assert!(EXHAUSTED < f32::MIN);
        assert!(is_exhausted(EXHAUSTED));
        assert!(!is_exhausted(f32::MIN));
        assert!(!is_exhausted(0.0));
    }

    #[test]
    fn note_display_and_conversion() {
        let note = Note::from(42);
        assert_eq!(note.value(), 42);
        assert_eq!(note.to_string(), "note:42");
        assert_eq!(Note::from_index(7), Note(7));
    }

    #[test]
    fn identifier_display_formats() {
        assert_eq!(VertexId(3).to_string(), "vertex:3");
        assert_eq!(GeneratorId(5).to_string(), "gen:5");
        assert_eq!(GeneratorId(5).index(), 5);
    }

    #[test]
    fn generator_ids_order_by_admission() {
        assert!(GeneratorId(0) < GeneratorId(1));
    }

    #[test]
    fn note_serde_roundtrip() {
        let json = serde_json::to_string(&Note(9)).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Note(9));
    }
}
