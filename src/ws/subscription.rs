//! Per-connection subscription manager.
//!
//! Tracks which event topics a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::EventTopic;

/// Manages the set of topic subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed topics. If `subscribe_all` is true, this set is ignored.
    topics: HashSet<EventTopic>,
    /// Whether the client subscribes to every topic (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds topics to the subscription set, enabling the wildcard if
    /// requested.
    pub fn subscribe(&mut self, topics: &[EventTopic], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.topics.extend(topics.iter().copied());
    }

    /// Removes topics from the subscription set. Removing with the
    /// wildcard also clears the wildcard.
    pub fn unsubscribe(&mut self, topics: &[EventTopic], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for topic in topics {
            self.topics.remove(topic);
        }
    }

    /// Returns `true` if the given topic matches the subscription filter.
    #[must_use]
    pub fn matches(&self, topic: EventTopic) -> bool {
        self.subscribe_all || self.topics.contains(&topic)
    }

    /// Returns the number of explicitly subscribed topics.
    #[must_use]
    pub fn count(&self) -> usize {
        self.topics.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(EventTopic::Filter));
        assert!(!mgr.matches(EventTopic::Store));
    }

    #[test]
    fn subscribe_specific_topic() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[EventTopic::Filter], false);
        assert!(mgr.matches(EventTopic::Filter));
        assert!(!mgr.matches(EventTopic::Store));
    }

    #[test]
    fn wildcard_matches_everything_until_removed() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(EventTopic::Store));
        mgr.unsubscribe(&[], true);
        assert!(!mgr.matches(EventTopic::Store));
    }

    #[test]
    fn unsubscribe_removes_topic() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[EventTopic::Filter, EventTopic::Store], false);
        assert_eq!(mgr.count(), 2);
        mgr.unsubscribe(&[EventTopic::Filter], false);
        assert!(!mgr.matches(EventTopic::Filter));
        assert_eq!(mgr.count(), 1);
    }
}
