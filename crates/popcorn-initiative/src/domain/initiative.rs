//! The popcorn turn rotation for a single channel.

use popcorn_core::ids::ActorId;
use popcorn_core::rng::DeterministicRng;

/// A turn rotation scoped to one channel.
///
/// The rotation is active while an actor holds the turn. The actor holding
/// the turn is never in `participants`, and every actor appears in
/// `history` at most once, in the order they first took the turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initiative {
    current_actor: Option<ActorId>,
    participants: Vec<ActorId>,
    history: Vec<ActorId>,
}

impl Initiative {
    /// Creates an inactive rotation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while an actor holds the turn.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_actor.is_some()
    }

    /// Returns true if anyone is still waiting for a turn.
    #[must_use]
    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }

    /// The actor whose turn it is, if the rotation is active.
    #[must_use]
    pub fn current_actor(&self) -> Option<ActorId> {
        self.current_actor
    }

    /// Actors still waiting for a turn, in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[ActorId] {
        &self.participants
    }

    /// Actors that have held the turn during this rotation.
    #[must_use]
    pub fn history(&self) -> &[ActorId] {
        &self.history
    }

    /// Appends `actor_id` to the waiting list unless it is already there.
    pub fn add_participant(&mut self, actor_id: ActorId) {
        if !self.participants.contains(&actor_id) {
            self.participants.push(actor_id);
        }
    }

    /// Removes `actor_id` from the waiting list if present.
    pub fn remove_participant(&mut self, actor_id: ActorId) {
        self.participants.retain(|id| *id != actor_id);
    }

    /// Hands the turn to `actor_id`.
    ///
    /// The actor leaves the waiting list and is recorded in the history the
    /// first time it takes the turn. Eligibility is not checked here.
    pub fn set_current_actor(&mut self, actor_id: ActorId) {
        self.current_actor = Some(actor_id);
        self.remove_participant(actor_id);
        if !self.history.contains(&actor_id) {
            self.history.push(actor_id);
        }
    }

    /// Picks a waiting participant uniformly at random without removing it.
    #[must_use]
    pub fn select_random_participant(&self, rng: &mut dyn DeterministicRng) -> Option<ActorId> {
        rng.next_index(self.participants.len())
            .and_then(|index| self.participants.get(index).copied())
    }

    /// Returns to the inactive state and forgets participants and history.
    pub fn reset(&mut self) {
        self.current_actor = None;
        self.participants.clear();
        self.history.clear();
    }

    /// Replaces the waiting list wholesale, keeping the first occurrence of
    /// each actor.
    pub(crate) fn replace_participants(&mut self, actor_ids: impl IntoIterator<Item = ActorId>) {
        self.participants.clear();
        for actor_id in actor_ids {
            self.add_participant(actor_id);
        }
    }
}
