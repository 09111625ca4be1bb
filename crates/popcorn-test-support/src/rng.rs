//! Scripted index sources for tests.

use popcorn_core::rng::DeterministicRng;

/// Always picks the first candidate.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}

/// Replays a fixed list of candidate positions, one per pick.
///
/// A scripted position past the end of the candidate list is clamped to the
/// last candidate, so `usize::MAX` always means "pick the last one". Empty
/// candidate lists yield `None` without consuming a position. Panics once
/// the script runs out.
#[derive(Debug)]
pub struct SequenceRng {
    picks: Vec<usize>,
    cursor: usize,
}

impl SequenceRng {
    /// Scripts the positions returned by successive picks.
    #[must_use]
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_index(&mut self, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let pick = self.picks[self.cursor];
        self.cursor += 1;
        Some(pick.min(last))
    }
}
