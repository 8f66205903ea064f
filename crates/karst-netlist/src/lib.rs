//! Karst netlist - hierarchical design AST
//!
//! The data structures shared by the karst front-end passes:
//!
//! - [`Netlist`] - ordered collection of all modules in a design
//! - [`Module`] - declarations plus statements, including [`Cell`] instances
//! - [`Module::clone_with_ids`] - deep clone with original-to-clone
//!   correspondence, for passes that replicate hierarchy
//! - [`naming`] - the identifier conventions used when hierarchy is
//!   flattened

pub mod clone;
pub mod loc;
pub mod naming;
pub mod netlist;

pub use clone::CloneMap;
pub use loc::SourceLoc;
pub use netlist::{
    AlwaysBlock, AlwaysKind, Assign, AssignKind, BinaryOp, Cell, CellInline, CoverDecl, DataType,
    Direction, DisplayStmt, Expr, FTask, FTaskId, FTaskRef, IdAlloc, IfStmt, Module, ModuleId,
    ModuleKind, Netlist, Pin, Pragma, PragmaKind, ScopeName, Stmt, Text, Typedef, UnaryOp, Value,
    Var, VarAttrs, VarId, VarRef, VarXRef,
};
