//! The per-channel player pool.

use std::collections::HashSet;

use popcorn_core::ids::ActorId;

/// The set of actors eligible to be dealt into a rotation.
///
/// Unordered. Membership outlives individual rotations and only changes
/// through explicit adds, removals and clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPool {
    members: HashSet<ActorId>,
}

impl PlayerPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor. Returns false if it was already a member.
    pub fn insert(&mut self, actor_id: ActorId) -> bool {
        self.members.insert(actor_id)
    }

    /// Removes an actor. Returns false if it was not a member.
    pub fn remove(&mut self, actor_id: ActorId) -> bool {
        self.members.remove(&actor_id)
    }

    #[must_use]
    pub fn contains(&self, actor_id: ActorId) -> bool {
        self.members.contains(&actor_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Iterates members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.members.iter().copied()
    }

    /// Members sorted by identifier, for stable display.
    #[must_use]
    pub fn sorted(&self) -> Vec<ActorId> {
        let mut members: Vec<ActorId> = self.iter().collect();
        members.sort_unstable();
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut pool = PlayerPool::new();

        assert!(pool.insert(ActorId(5)));
        assert!(!pool.insert(ActorId(5)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_remove_missing_member_is_noop() {
        let mut pool = PlayerPool::new();
        pool.insert(ActorId(1));

        assert!(!pool.remove(ActorId(2)));
        assert!(pool.contains(ActorId(1)));
    }

    #[test]
    fn test_sorted_orders_by_identifier() {
        let mut pool = PlayerPool::new();
        for id in [30, 10, 20] {
            pool.insert(ActorId(id));
        }

        assert_eq!(pool.sorted(), vec![ActorId(10), ActorId(20), ActorId(30)]);
    }

    #[test]
    fn test_clear_empties_pool() {
        let mut pool = PlayerPool::new();
        pool.insert(ActorId(1));

        pool.clear();

        assert!(pool.is_empty());
    }
}
