//! In-memory session history.
//!
//! An append-only log of completed interactions, newest last internally and
//! listed newest first. Lives only as long as its session.

use std::collections::VecDeque;

use uuid::Uuid;

use coachbot_types::history::HistoryEntry;

/// Ordered log of completed interactions for one session.
///
/// When `capacity` is non-zero the oldest entry is evicted once the log is
/// full, so a long-running session cannot grow without bound.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl SessionHistory {
    /// Create a history holding at most `capacity` entries (0 = unbounded).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Append an entry to the end of the log.
    ///
    /// Returns the evicted entry when the capacity was exceeded.
    pub fn append(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_back(entry);
        if self.capacity > 0 && self.entries.len() > self.capacity {
            return self.entries.pop_front();
        }
        None
    }

    /// Entries in reverse-chronological order (newest first).
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Look up a single entry by id.
    pub fn get(&self, id: &Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// The most recently appended entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Remove every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use coachbot_types::feature::{Feature, FeatureId};
    use coachbot_types::profile::Sport;

    fn entry(feature: Feature, minutes_ago: i64) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::now_v7(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            feature: FeatureId::Plan(feature),
            feature_name: feature.label().to_string(),
            sport: Sport::Football,
            position: "Midfielder".to_string(),
            custom_question: None,
            response_text: format!("plan for {feature}"),
        }
    }

    #[test]
    fn test_list_is_reverse_chronological() {
        let mut history = SessionHistory::default();
        history.append(entry(Feature::Workout, 3));
        history.append(entry(Feature::Recovery, 2));
        history.append(entry(Feature::Nutrition, 1));

        let listed = history.list();
        let features: Vec<_> = listed.iter().map(|e| e.feature.to_string()).collect();
        assert_eq!(features, vec!["nutrition", "recovery", "workout"]);
        assert!(listed[0].timestamp >= listed[1].timestamp);
        assert!(listed[1].timestamp >= listed[2].timestamp);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = SessionHistory::default();
        history.append(entry(Feature::Workout, 1));
        history.append(entry(Feature::Workout, 0));

        assert_eq!(history.clear(), 2);
        assert!(history.list().is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = SessionHistory::default();
        history.append(entry(Feature::Mental, 1));
        history.append(entry(Feature::Mental, 0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SessionHistory::with_capacity(2);
        assert!(history.append(entry(Feature::Workout, 3)).is_none());
        assert!(history.append(entry(Feature::Recovery, 2)).is_none());

        let evicted = history.append(entry(Feature::Tactical, 1)).unwrap();
        assert_eq!(evicted.feature, FeatureId::Plan(Feature::Workout));
        assert_eq!(history.len(), 2);

        let features: Vec<_> = history.list().iter().map(|e| e.feature).collect();
        assert_eq!(
            features,
            vec![
                FeatureId::Plan(Feature::Tactical),
                FeatureId::Plan(Feature::Recovery)
            ]
        );
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let mut history = SessionHistory::with_capacity(0);
        for _ in 0..500 {
            history.append(entry(Feature::Stamina, 0));
        }
        assert_eq!(history.len(), 500);
    }

    #[test]
    fn test_get_by_id() {
        let mut history = SessionHistory::default();
        let first = entry(Feature::Mobility, 1);
        let id = first.id;
        history.append(first);
        history.append(entry(Feature::Hydration, 0));

        assert_eq!(
            history.latest().unwrap().feature,
            FeatureId::Plan(Feature::Hydration)
        );
        let found = history.get(&id).unwrap();
        assert_eq!(found.feature, FeatureId::Plan(Feature::Mobility));
        assert!(history.get(&Uuid::now_v7()).is_none());
    }
}
