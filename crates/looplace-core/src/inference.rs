use crate::Direction;

/// A deferred exclusive-or deduction recorded at a junction: exactly one of
/// the two named edge directions carries the loop.
///
/// Pair equality is order-insensitive, matching how the solver looks
/// inferences up from either direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XorPair {
    first: Direction,
    second: Direction,
}

impl XorPair {
    /// Creates a pair over two distinct directions.
    ///
    /// # Panics
    ///
    /// Panics if both directions are equal.
    #[must_use]
    pub fn new(first: Direction, second: Direction) -> Self {
        assert_ne!(first, second, "xor pair needs two distinct directions");
        Self { first, second }
    }

    /// Returns the first recorded direction.
    #[must_use]
    pub const fn first(self) -> Direction {
        self.first
    }

    /// Returns the second recorded direction.
    #[must_use]
    pub const fn second(self) -> Direction {
        self.second
    }

    /// Order-insensitive equality against a direction pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplace_core::{Direction, XorPair};
    ///
    /// let pair = XorPair::new(Direction::North, Direction::West);
    /// assert!(pair.matches(Direction::West, Direction::North));
    /// assert!(!pair.matches(Direction::North, Direction::East));
    /// ```
    #[must_use]
    pub fn matches(self, d1: Direction, d2: Direction) -> bool {
        (self.first == d1 && self.second == d2) || (self.first == d2 && self.second == d1)
    }
}
