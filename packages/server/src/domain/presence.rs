//! In-memory presence state: room membership, per-user connections, and
//! typing flags.
//!
//! Not durable. The registry starts empty on process restart; presence is
//! a live-session concept and losing it on restart is acceptable.
//!
//! Concurrency: every map is a [`DashMap`], so mutations are serialized
//! per key (per room, per user) while reads and writes touching unrelated
//! rooms proceed without contention. Read operations return owned
//! snapshots taken at call time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use parlor_shared::time::Clock;

use super::value_object::{ConnectionId, RoomId, Timestamp, UserId};

pub struct PresenceRegistry {
    /// room -> (user -> connection). At most one connection per (room, user);
    /// a later join for the same pair supersedes the earlier mapping.
    rooms: DashMap<RoomId, HashMap<UserId, ConnectionId>>,
    /// user -> (connection -> last activity). A user may hold several
    /// connections (multi-device).
    active: DashMap<UserId, HashMap<ConnectionId, Timestamp>>,
    /// user -> rooms the user is currently marked typing in.
    typing: DashMap<UserId, HashSet<RoomId>>,
    clock: Arc<dyn Clock>,
}

impl PresenceRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: DashMap::new(),
            active: DashMap::new(),
            typing: DashMap::new(),
            clock,
        }
    }

    /// Register a user's connection in a room. Overwrites any mapping a
    /// previous connection held for the same (room, user) pair. Idempotent
    /// under repeated calls with the same triple.
    pub fn join(&self, room_id: RoomId, user_id: UserId, conn_id: ConnectionId) {
        self.rooms
            .entry(room_id)
            .or_default()
            .insert(user_id.clone(), conn_id.clone());
        self.active
            .entry(user_id)
            .or_default()
            .insert(conn_id, Timestamp::new(self.clock.now_millis()));
    }

    /// Remove a user's room mapping, but only when the stored connection id
    /// matches `conn_id` — a stale leave must not evict a newer join.
    /// Returns whether the mapping was removed.
    ///
    /// The connection itself is always dropped from the user's activity
    /// set: whichever room mapping it held, this connection said goodbye.
    pub fn leave(&self, room_id: &RoomId, user_id: &UserId, conn_id: &ConnectionId) -> bool {
        let mut removed = false;
        if let Some(mut members) = self.rooms.get_mut(room_id) {
            if members.get(user_id) == Some(conn_id) {
                members.remove(user_id);
                removed = true;
            }
        }
        if removed {
            self.rooms.remove_if(room_id, |_, members| members.is_empty());
            // the user may not have sent an explicit stop-typing first
            self.clear_typing(room_id, user_id);
        }

        if let Some(mut conns) = self.active.get_mut(user_id) {
            conns.remove(conn_id);
        }
        self.active.remove_if(user_id, |_, conns| conns.is_empty());

        removed
    }

    /// Toggle a user's typing flag for a room. Returns whether the state
    /// actually changed (already-set flags are a no-op).
    pub fn set_typing(&self, room_id: &RoomId, user_id: &UserId, is_typing: bool) -> bool {
        if is_typing {
            self.typing
                .entry(user_id.clone())
                .or_default()
                .insert(room_id.clone())
        } else {
            self.clear_typing(room_id, user_id)
        }
    }

    fn clear_typing(&self, room_id: &RoomId, user_id: &UserId) -> bool {
        let mut changed = false;
        if let Some(mut set) = self.typing.get_mut(user_id) {
            changed = set.remove(room_id);
        }
        self.typing.remove_if(user_id, |_, rooms| rooms.is_empty());
        changed
    }

    pub fn is_typing(&self, user_id: &UserId, room_id: &RoomId) -> bool {
        self.typing
            .get(user_id)
            .map(|rooms| rooms.contains(room_id))
            .unwrap_or(false)
    }

    /// Snapshot of a room's membership. Empty for unknown rooms.
    pub fn participants(&self, room_id: &RoomId) -> HashMap<UserId, ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    /// One entry per user with the most recent activity timestamp across
    /// that user's connections.
    pub fn active_users(&self) -> HashMap<UserId, Timestamp> {
        let mut users = HashMap::new();
        for entry in self.active.iter() {
            if let Some(latest) = entry.value().values().max() {
                users.insert(entry.key().clone(), *latest);
            }
        }
        users
    }

    /// Refresh the activity timestamp for a known (user, connection) pair.
    pub fn touch(&self, user_id: &UserId, conn_id: &ConnectionId) {
        if let Some(mut conns) = self.active.get_mut(user_id) {
            if let Some(seen_at) = conns.get_mut(conn_id) {
                *seen_at = Timestamp::new(self.clock.now_millis());
            }
        }
    }

    /// Number of rooms with at least one member.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of distinct users holding at least one connection.
    pub fn user_count(&self) -> usize {
        self.active.len()
    }
}
