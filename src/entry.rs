//! Expirable Entry Module
//!
//! Defines the value wrapper whose expiration instant the TTL decorator
//! interprets.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Expirable Item ==
/// A cached value paired with the instant it expires.
///
/// The expiration is fixed when the item is created; reads never extend it.
/// Only a fresh `put` with a new item resets the deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirableItem<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant
    expires_at: DateTime<Utc>,
}

impl<V> ExpirableItem<V> {
    // == Constructor ==
    /// Creates an item that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Utc::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the expiration instant has passed.
    ///
    /// The comparison is strict: at the exact expiration instant the item is
    /// still alive.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against a caller-supplied clock reading, letting a
    /// traversal judge every entry against one instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// The instant this item expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining time until expiration, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        (self.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Consumes the item, returning the stored value.
    pub fn into_value(self) -> V {
        self.value
    }
}
