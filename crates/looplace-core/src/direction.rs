/// One of the four compass directions used to address a cell or junction edge.
///
/// The discriminant order (N, S, W, E) is stable and used as the slot index
/// into the 4-element edge tables of [`Cell`](crate::Cell) and
/// [`Junction`](crate::Junction).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Direction {
    /// Towards the top of the board (decreasing row).
    #[default]
    #[display("N")]
    North,
    /// Towards the bottom of the board (increasing row).
    #[display("S")]
    South,
    /// Towards the left of the board (decreasing column).
    #[display("W")]
    West,
    /// Towards the right of the board (increasing column).
    #[display("E")]
    East,
}

impl Direction {
    /// All four directions in slot order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// Returns the slot index (0-3) for 4-element edge tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
        }
    }

    /// Returns the opposite direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplace_core::Direction;
    ///
    /// assert_eq!(Direction::North.opposite(), Direction::South);
    /// assert_eq!(Direction::West.opposite(), Direction::East);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Returns `true` for `North` and `South`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_slot_indices_are_distinct() {
        let mut seen = [false; 4];
        for dir in Direction::ALL {
            assert!(!seen[dir.index()]);
            seen[dir.index()] = true;
        }
    }
}
