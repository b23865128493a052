//! Validation settings consumed as an already-built object.
//!
//! Parsing or loading configuration is out of scope; callers construct
//! [`EquivalencyOptions`] directly.

/// How the cycle detector treats re-entry of an open reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleHandling {
    /// A cyclic reference is a structural inequality, reported with its path.
    #[default]
    Forbid,
    /// A cyclic edge is vacuously satisfied; the rest of the graph is still
    /// validated on other branches.
    Tolerate,
}

impl core::fmt::Display for CycleHandling {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Forbid => write!(f, "forbid"),
            Self::Tolerate => write!(f, "tolerate"),
        }
    }
}

/// Maximum member-path depth before recursion is cut off, unless
/// [`EquivalencyOptions::allow_infinite_recursion`] is set.
pub const MAX_DEPTH: usize = 10;

/// Settings for one validator instance.
#[derive(Debug, Clone, Default)]
pub struct EquivalencyOptions {
    /// Lifts the [`MAX_DEPTH`] bound; cycle detection still terminates
    /// cyclic graphs.
    pub allow_infinite_recursion: bool,
    pub cycle_handling: CycleHandling,
    /// Free-form description rendered into the `configuration` reportable.
    pub description: String,
}

impl EquivalencyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_infinite_recursion(mut self) -> Self {
        self.allow_infinite_recursion = true;
        self
    }

    pub fn tolerating_cycles(mut self) -> Self {
        self.cycle_handling = CycleHandling::Tolerate;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl core::fmt::Display for EquivalencyOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "recursion: {}, cyclic references: {}",
            if self.allow_infinite_recursion {
                "unbounded"
            } else {
                "bounded"
            },
            self.cycle_handling
        )?;
        if !self.description.is_empty() {
            write!(f, ", {}", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_forbid_cycles_and_bound_recursion() {
        let options = EquivalencyOptions::new();
        assert!(!options.allow_infinite_recursion);
        assert_eq!(options.cycle_handling, CycleHandling::Forbid);
    }

    #[test]
    fn display_mentions_settings() {
        let options = EquivalencyOptions::new()
            .tolerating_cycles()
            .described("lenient");
        let rendered = options.to_string();
        assert!(rendered.contains("tolerate"));
        assert!(rendered.contains("lenient"));
    }
}
