//! Stage identifiers.

use std::fmt;

/// One step of the release pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Module concatenation
    Aggregate,
    /// Documentation generation
    Docs,
    /// Demo bundle installation and archiving
    Package,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 3] = [Stage::Aggregate, Stage::Docs, Stage::Package];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Docs => "docs",
            Self::Package => "package",
        }
    }

    /// Process exit code when this stage fails.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Aggregate => 3,
            Self::Docs => 4,
            Self::Package => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
