/// Per-mark policy switches for [`Puzzle`](crate::Puzzle) edge marks.
///
/// The default is the strict profile used by interactive play and the
/// solver: determined edges cannot be silently overwritten, and every rule
/// check runs. Both switches exist for editing flows (erasing a mark turns
/// override protection off) and for replaying recorded games (validation
/// off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOptions {
    prevent_override: bool,
    validate: bool,
}

impl Default for MarkOptions {
    fn default() -> Self {
        Self {
            prevent_override: true,
            validate: true,
        }
    }
}

impl MarkOptions {
    /// Sets whether marking an already-determined edge is an error.
    #[must_use]
    pub fn prevent_override(mut self, prevent_override: bool) -> Self {
        self.prevent_override = prevent_override;
        self
    }

    /// Sets whether hint, junction, and loop-closure checks run.
    #[must_use]
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Returns whether marking an already-determined edge is an error.
    #[must_use]
    pub fn prevents_override(self) -> bool {
        self.prevent_override
    }

    /// Returns whether hint, junction, and loop-closure checks run.
    #[must_use]
    pub fn validates(self) -> bool {
        self.validate
    }
}
