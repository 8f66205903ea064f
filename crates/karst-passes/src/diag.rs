//! Diagnostic collection for netlist passes
//!
//! Passes report user-facing problems here and keep going; the caller
//! decides what to do with the batch. Internal invariant violations are not
//! diagnostics - those panic.

use karst_netlist::SourceLoc;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// One user-facing diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: SourceLoc,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", self.loc, severity, self.message)
    }
}

/// Accumulator a pass reports into
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, loc: SourceLoc, message: impl Into<String>) {
        let diag = Diagnostic {
            severity: Severity::Error,
            loc,
            message: message.into(),
        };
        tracing::error!(%diag, "pass diagnostic");
        self.items.push(diag);
    }

    pub fn warning(&mut self, loc: SourceLoc, message: impl Into<String>) {
        let diag = Diagnostic {
            severity: Severity::Warning,
            loc,
            message: message.into(),
        };
        tracing::warn!(%diag, "pass diagnostic");
        self.items.push(diag);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
