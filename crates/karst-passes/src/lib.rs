//! Karst netlist passes
//!
//! Transformations over the [`karst_netlist`] AST that run between
//! elaboration and flattening. Currently:
//!
//! - [`inline`] - dissolves selected module instances into their parents
//! - [`pin_reconnect`] - pin connection simplification the inliner relies on
//!
//! ```no_run
//! use karst_netlist::Netlist;
//! use karst_passes::inline_all;
//!
//! let mut netlist = Netlist::new();
//! // ... build or receive the elaborated design ...
//! let report = inline_all(&mut netlist).expect("well-formed netlist");
//! println!("inlined {} cells", report.inlined_cells);
//! ```

pub mod diag;
pub mod inline;
pub mod pin_reconnect;

pub use diag::{Diagnostic, Diagnostics, Severity};
pub use inline::{
    inline_all, InlineConfig, InlineError, InlineReport, ModuleInliner, INLINE_SMALL_STMTS,
};
pub use pin_reconnect::{PinReconnect, SimplePinReconnect};
