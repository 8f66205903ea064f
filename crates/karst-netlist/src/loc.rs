//! Source locations for netlist nodes
//!
//! Locations carry the usual file/line pair for diagnostics plus the
//! per-location lint and tracing state that directives can toggle. When two
//! signals become aliases of each other, their locations inherit each other's
//! state so a waiver on either one covers both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a netlist node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoc {
    /// File the node was parsed from
    pub file: String,
    /// Line number (1-indexed)
    pub line: u32,
    /// Tracing enabled at this location
    pub trace_on: bool,
    /// Warnings enabled at this location
    pub warn_on: bool,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            trace_on: true,
            warn_on: true,
        }
    }

    /// Inherit the lint/tracing state of another location.
    ///
    /// A disable on either side sticks; call it in both directions to make
    /// two locations share state.
    pub fn inherit_state(&mut self, other: &SourceLoc) {
        self.trace_on &= other.trace_on;
        self.warn_on &= other.warn_on;
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::new("<unknown>", 0)
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
