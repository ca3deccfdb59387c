//! Labeled Values - Ordered label → number mapping used for scores and shares.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;

/// Ordered mapping from a label to a numeric value.
///
/// Keeps insertion order (the matrix row or column order) so that ties are
/// broken deterministically and serialization is stable across calls.
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledValues {
    entries: Vec<(String, f64)>,
}

/// Utility score per alternative.
pub type UtilityScores = LabeledValues;

/// Predicted market share (percent) per alternative.
pub type MarketShares = LabeledValues;

/// Leader-flip frequency (percent) per criterion.
pub type CriteriaSensitivity = LabeledValues;

impl LabeledValues {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, replacing the value if the label already exists.
    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Value for `label`, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// Largest value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.values().fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    /// Label with the largest value; the earliest entry wins ties.
    pub fn argmax(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (label, value) in self.iter() {
            match best {
                Some((_, b)) if value <= b => {}
                _ => best = Some((label, value)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Entries sorted by descending value; equal values keep insertion order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }

    /// Difference between the top two values. `None` with fewer than two entries.
    pub fn top_margin(&self) -> Option<f64> {
        let ranked = self.ranked();
        match (ranked.first(), ranked.get(1)) {
            (Some(first), Some(second)) => Some(first.1 - second.1),
            _ => None,
        }
    }
}

impl FromIterator<(String, f64)> for LabeledValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut values = LabeledValues::new();
        for (label, value) in iter {
            values.insert(label, value);
        }
        values
    }
}

impl Serialize for LabeledValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabeledValues {
        vec![
            ("A".to_string(), 7.5),
            ("B".to_string(), 8.1),
            ("C".to_string(), 8.1),
            ("D".to_string(), 2.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn argmax_prefers_earliest_on_tie() {
        assert_eq!(sample().argmax(), Some("B"));
    }

    #[test]
    fn argmax_of_empty_is_none() {
        assert_eq!(LabeledValues::new().argmax(), None);
    }

    #[test]
    fn ranked_is_stable_for_equal_values() {
        let binding = sample();
        let ranked = binding.ranked();
        let labels: Vec<_> = ranked.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn top_margin_needs_two_entries() {
        let mut single = LabeledValues::new();
        single.insert("A", 3.0);
        assert_eq!(single.top_margin(), None);
        assert_eq!(sample().top_margin(), Some(0.0));
    }

    #[test]
    fn insert_replaces_existing_label() {
        let mut values = sample();
        values.insert("A", 1.0);
        assert_eq!(values.len(), 4);
        assert_eq!(values.get("A"), Some(1.0));
    }

    #[test]
    fn serializes_as_object_in_insertion_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"A":7.5,"B":8.1,"C":8.1,"D":2.0}"#);
    }
}
