//! Opaque identifiers for actors, communities and channels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an actor (a player who can hold the turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

/// Identifier of a community (the outer scope a channel belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(pub u64);

/// Identifier of a channel within a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite registry key: one initiative and one pool exist per key.
///
/// Only value equality matters; keys carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    /// The community scope.
    pub community: CommunityId,
    /// The channel scope.
    pub channel: ChannelId,
}

impl ChannelKey {
    /// Builds a key from raw community and channel identifiers.
    #[must_use]
    pub fn new(community: u64, channel: u64) -> Self {
        Self {
            community: CommunityId(community),
            channel: ChannelId(channel),
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.community, self.channel)
    }
}
