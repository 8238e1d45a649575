//! Match-scoped scratch space shared by artifact hooks.
//!
//! The engine creates one `Carry` per match and drops it when the match
//! ends. It never reads or writes keys itself: artifacts own the key
//! space and use it to pass values from one hook (or compare) to the next.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Open-ended key/value store. Missing keys read as `0.0`.
///
/// ```
/// use handforge::hooks::Carry;
///
/// let mut carry = Carry::new();
/// carry.add("nextBase", 25.0);
/// carry.add("nextBase", 25.0);
/// assert_eq!(carry.take("nextBase"), 50.0);
/// assert_eq!(carry.get("nextBase"), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Carry {
    values: FxHashMap<String, f64>,
}

impl Carry {
    /// Create an empty carry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value, `0.0` when unset.
    #[must_use]
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    /// Is the key set to a non-zero value?
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key) != 0.0
    }

    /// Overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Add to a value (starting from `0.0`).
    pub fn add(&mut self, key: impl Into<String>, delta: f64) {
        *self.values.entry(key.into()).or_insert(0.0) += delta;
    }

    /// Read a value and reset it to `0.0`.
    pub fn take(&mut self, key: &str) -> f64 {
        match self.values.get_mut(key) {
            Some(value) => std::mem::replace(value, 0.0),
            None => 0.0,
        }
    }

    /// Number of keys ever written this match.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reads_zero() {
        let carry = Carry::new();
        assert_eq!(carry.get("anything"), 0.0);
        assert!(!carry.is_set("anything"));
        assert!(carry.is_empty());
    }

    #[test]
    fn test_add_and_set() {
        let mut carry = Carry::new();
        carry.add("winStreakMult", 0.15);
        carry.add("winStreakMult", 0.15);
        assert!((carry.get("winStreakMult") - 0.3).abs() < 1e-12);

        carry.set("winStreakMult", 0.0);
        assert!(!carry.is_set("winStreakMult"));
        assert_eq!(carry.len(), 1);
    }

    #[test]
    fn test_take_resets() {
        let mut carry = Carry::new();
        carry.set("nextMult", 0.5);

        assert_eq!(carry.take("nextMult"), 0.5);
        assert_eq!(carry.take("nextMult"), 0.0);
        assert_eq!(carry.take("never"), 0.0);
    }
}
