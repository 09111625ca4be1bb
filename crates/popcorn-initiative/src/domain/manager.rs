//! Registry of per-channel rotations and player pools.

use std::collections::HashMap;

use popcorn_core::ids::{ActorId, ChannelKey};
use popcorn_core::rng::DeterministicRng;
use tracing::debug;

use super::initiative::Initiative;
use super::pool::PlayerPool;

/// Owns one [`Initiative`] and one [`PlayerPool`] per channel.
///
/// Entries are created on first access and only go away through
/// [`InitiativeManager::remove_initiative`]. The registry grows with the
/// number of channels ever touched; nothing is evicted.
pub struct InitiativeManager {
    initiatives: HashMap<ChannelKey, Initiative>,
    pools: HashMap<ChannelKey, PlayerPool>,
    rng: Box<dyn DeterministicRng>,
}

impl std::fmt::Debug for InitiativeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitiativeManager")
            .field("initiatives", &self.initiatives)
            .field("pools", &self.pools)
            .finish_non_exhaustive()
    }
}

impl InitiativeManager {
    /// Creates an empty registry drawing randomness from `rng`.
    #[must_use]
    pub fn new(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            initiatives: HashMap::new(),
            pools: HashMap::new(),
            rng,
        }
    }

    /// Returns the channel's rotation, creating an inactive one if needed.
    pub fn initiative(&mut self, key: ChannelKey) -> &mut Initiative {
        self.initiatives.entry(key).or_default()
    }

    /// Returns the channel's rotation without creating one.
    #[must_use]
    pub fn peek_initiative(&self, key: ChannelKey) -> Option<&Initiative> {
        self.initiatives.get(&key)
    }

    /// Resets the channel's rotation if one exists.
    pub fn clear_initiative(&mut self, key: ChannelKey) {
        if let Some(initiative) = self.initiatives.get_mut(&key) {
            initiative.reset();
            debug!(channel = %key, "initiative cleared");
        }
    }

    /// Drops the channel's rotation from the registry.
    pub fn remove_initiative(&mut self, key: ChannelKey) {
        if self.initiatives.remove(&key).is_some() {
            debug!(channel = %key, "initiative removed");
        }
    }

    /// Returns the channel's pool, creating an empty one if needed.
    pub fn player_pool(&mut self, key: ChannelKey) -> &PlayerPool {
        self.pools.entry(key).or_default()
    }

    /// Returns the channel's pool without creating one.
    #[must_use]
    pub fn peek_player_pool(&self, key: ChannelKey) -> Option<&PlayerPool> {
        self.pools.get(&key)
    }

    pub fn add_to_pool(&mut self, key: ChannelKey, actor_id: ActorId) {
        self.pools.entry(key).or_default().insert(actor_id);
    }

    pub fn remove_from_pool(&mut self, key: ChannelKey, actor_id: ActorId) {
        self.pools.entry(key).or_default().remove(actor_id);
    }

    /// Empties the channel's pool if one exists.
    pub fn clear_pool(&mut self, key: ChannelKey) {
        if let Some(pool) = self.pools.get_mut(&key) {
            pool.clear();
        }
    }

    /// Deals the whole pool into the channel's rotation and hands the turn
    /// to the first actor.
    ///
    /// `preferred` goes first when it is a pool member; otherwise the first
    /// actor is picked uniformly at random from the pool. Participant order
    /// follows the pool's enumeration order and is unspecified. History is
    /// kept, so re-dealing an exhausted rotation extends it.
    ///
    /// Returns `None` without touching the rotation when the pool is empty.
    pub fn initialize_initiative_from_pool(
        &mut self,
        key: ChannelKey,
        preferred: Option<ActorId>,
    ) -> Option<ActorId> {
        let pool = self.pools.entry(key).or_default();
        if pool.is_empty() {
            return None;
        }

        let members: Vec<ActorId> = pool.iter().collect();
        let first = match preferred {
            Some(actor_id) if pool.contains(actor_id) => actor_id,
            _ => self
                .rng
                .next_index(members.len())
                .and_then(|index| members.get(index).copied())?,
        };

        let initiative = self.initiatives.entry(key).or_default();
        initiative.replace_participants(members);
        initiative.set_current_actor(first);

        debug!(channel = %key, first = %first, "initiative dealt from pool");
        Some(first)
    }

    /// Picks a waiting participant of the channel's rotation at random.
    ///
    /// Read-only with respect to the rotation; returns `None` if the channel
    /// has no rotation or nobody is waiting.
    pub fn select_random_participant(&mut self, key: ChannelKey) -> Option<ActorId> {
        let initiative = self.initiatives.get(&key)?;
        initiative.select_random_participant(self.rng.as_mut())
    }

    /// Number of channels with a registered rotation or pool.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.initiatives.len()
            + self
                .pools
                .keys()
                .filter(|k| !self.initiatives.contains_key(k))
                .count()
    }
}
