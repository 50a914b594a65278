//! Desired purchase quantity.

use std::fmt;

/// Positive purchase quantity. Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest allowed quantity.
    pub const MIN: Quantity = Quantity(1);

    /// Create a quantity, raising anything below 1 to 1.
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Parse a quantity from a query value. Missing, malformed or
    /// non-positive input yields 1.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// The value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// One more. Saturates at `u32::MAX` instead of overflowing.
    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less, but never below 1.
    pub fn decremented(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Increase in place.
    pub fn increment(&mut self) {
        *self = self.incremented();
    }

    /// Decrease in place; ignored at 1.
    pub fn decrement(&mut self) {
        *self = self.decremented();
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default().get(), 1);
    }

    #[test]
    fn test_increment_adds_one() {
        for n in [1, 2, 9, 1000] {
            let mut q = Quantity::new(n);
            q.increment();
            assert_eq!(q.get(), n + 1);
        }
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut q = Quantity::default();
        q.decrement();
        assert_eq!(q.get(), 1);

        let mut q = Quantity::new(3);
        q.decrement();
        assert_eq!(q.get(), 2);
    }

    #[test]
    fn test_invariant_holds_over_any_sequence() {
        // Deterministic pseudo-random walk of increments and decrements.
        let mut q = Quantity::default();
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (seed >> 16) % 3 == 0 {
                q.increment();
            } else {
                q.decrement();
            }
            assert!(q.get() >= 1);
        }
    }

    #[test]
    fn test_increment_saturates() {
        let mut q = Quantity::new(u32::MAX);
        q.increment();
        assert_eq!(q.get(), u32::MAX);
    }

    #[test]
    fn test_new_clamps_zero() {
        assert_eq!(Quantity::new(0), Quantity::MIN);
    }

    #[test]
    fn test_from_query() {
        assert_eq!(Quantity::from_query(Some("4")).get(), 4);
        assert_eq!(Quantity::from_query(Some(" 2 ")).get(), 2);
        assert_eq!(Quantity::from_query(Some("0")).get(), 1);
        assert_eq!(Quantity::from_query(Some("-3")).get(), 1);
        assert_eq!(Quantity::from_query(Some("lots")).get(), 1);
        assert_eq!(Quantity::from_query(None).get(), 1);
    }
}
