//! Netlist AST - hierarchical design representation
//!
//! This represents an elaborated hardware design between elaboration and
//! flattening:
//!
//! ```text
//! parse → elaborate → [Netlist] → inline/flatten passes → codegen
//! ```
//!
//! The netlist is an ordered collection of modules; a module instantiates
//! other modules through [`Cell`] nodes whose [`Pin`]s bind the target
//! module's port variables to parent-side expressions. Cross-hierarchy
//! references ([`VarXRef`], [`FTaskRef`]) stay symbolic until the resolution
//! pass runs; transformation passes that dissolve hierarchy record what they
//! did in [`CellInline`] breadcrumbs so resolution can reconstruct dotted
//! paths afterwards.

use crate::loc::SourceLoc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Module identifier, unique within a netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// Variable identifier, unique within a netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub u32);

/// Function/task identifier, unique within a netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FTaskId(pub u32);

/// Monotonic id allocators for a netlist.
///
/// Ids are never reused, so passes that clone nodes can hand out fresh ids
/// without consulting the existing tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAlloc {
    next_module: u32,
    next_var: u32,
    next_task: u32,
}

impl IdAlloc {
    pub fn module_id(&mut self) -> ModuleId {
        let id = ModuleId(self.next_module);
        self.next_module += 1;
        id
    }

    pub fn var_id(&mut self) -> VarId {
        let id = VarId(self.next_var);
        self.next_var += 1;
        id
    }

    pub fn task_id(&mut self) -> FTaskId {
        let id = FTaskId(self.next_task);
        self.next_task += 1;
        id
    }
}

/// Top-level ordered collection of all modules in a design
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// Modules in hierarchy order: instantiating modules precede the
    /// modules they instantiate. Keyed by id for cross-reference lookup;
    /// insertion order is the netlist order passes rely on.
    pub modules: IndexMap<ModuleId, Module>,
    /// File-scope pragmas that elaboration could not attach to any module
    pub directives: Vec<Pragma>,
    /// Id allocators shared by all passes over this netlist
    pub ids: IdAlloc,
}

impl Netlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module at the end of the netlist order
    pub fn add_module(&mut self, module: Module) -> ModuleId {
        let id = module.id;
        self.modules.insert(id, module);
        id
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }
}

/// Kind of module-like definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    /// Ordinary module, instantiable through cells
    Module,
    /// Package: holds declarations, sits outside the instance hierarchy
    Package,
}

/// A unit of HDL definition: variables, assignments, processes, and cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier
    pub id: ModuleId,
    /// Current name (passes may mangle it)
    pub name: String,
    /// Name the user wrote, kept for reporting and breadcrumbs
    pub orig_name: String,
    /// Module or package
    pub kind: ModuleKind,
    /// Visible to code outside the generated model; never dissolved
    pub public: bool,
    /// Definition site
    pub loc: SourceLoc,
    /// Breadcrumbs of instances that were dissolved into this module.
    /// Ordered, and logically precede `stmts`: a reader reconstructing
    /// scopes sees every breadcrumb before any surviving cell it qualifies.
    pub inlines: Vec<CellInline>,
    /// Module-scope variables (ports included), in declaration order
    pub vars: Vec<Var>,
    /// Functions and tasks declared by this module
    pub tasks: Vec<FTask>,
    /// Type declarations
    pub typedefs: Vec<Typedef>,
    /// Statements in declaration order (cells, assignments, processes, ...)
    pub stmts: Vec<Stmt>,
}

impl Module {
    pub fn new(id: ModuleId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            orig_name: name.clone(),
            name,
            kind: ModuleKind::Module,
            public: false,
            loc: SourceLoc::default(),
            inlines: Vec::new(),
            vars: Vec::new(),
            tasks: Vec::new(),
            typedefs: Vec::new(),
            stmts: Vec::new(),
        }
    }

    /// Look up a module-scope variable. Function/task locals are reached
    /// through their owning [`FTask`].
    pub fn var(&self, id: VarId) -> Option<&Var> {
        self.vars.iter().find(|v| v.id == id)
    }

    pub fn var_mut(&mut self, id: VarId) -> Option<&mut Var> {
        self.vars.iter_mut().find(|v| v.id == id)
    }
}

/// An instance of a module within another module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Instance name
    pub name: String,
    /// Instantiated module. A reference, not ownership: the module stays
    /// owned by the netlist.
    pub module: ModuleId,
    /// Port connections
    pub pins: Vec<Pin>,
    /// Instantiation site
    pub loc: SourceLoc,
}

impl Cell {
    pub fn new(name: impl Into<String>, module: ModuleId, loc: SourceLoc) -> Self {
        Self {
            name: name.into(),
            module,
            pins: Vec::new(),
            loc,
        }
    }
}

/// One port connection of a cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// The target module's port variable this pin binds
    pub mod_var: VarId,
    /// Parent-side connection; `None` leaves the port unconnected
    pub expr: Option<Expr>,
    pub loc: SourceLoc,
}

impl Pin {
    pub fn new(mod_var: VarId, expr: Option<Expr>, loc: SourceLoc) -> Self {
        Self { mod_var, expr, loc }
    }
}

/// Breadcrumb recording a dissolved instance.
///
/// Name resolution consumes these to rebuild the dotted paths that existed
/// before the instance boundary was removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellInline {
    /// The dissolved instance's name (scope-mangled once hoisted further)
    pub name: String,
    /// Original name of the module the instance referenced
    pub orig_module: String,
    pub loc: SourceLoc,
}

/// Direction of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
    Inout,
    /// Not a port
    Local,
}

/// Attribute flags on a variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarAttrs {
    /// Externally readable and writable (testbench / host code hook).
    /// Such a signal's transitions must stay observable.
    pub public_rw: bool,
    /// Declared inside a function or task body
    pub func_local: bool,
    /// Included in waveform traces
    pub trace: bool,
}

impl VarAttrs {
    /// Adopt the externally visible attributes of another variable.
    /// Used when two signals become two names for the same value.
    pub fn propagate_from(&mut self, other: &VarAttrs) {
        self.public_rw |= other.public_rw;
        self.trace |= other.trace;
    }
}

/// A variable (net, register, or port)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Var {
    pub id: VarId,
    pub name: String,
    pub direction: Direction,
    pub ty: DataType,
    /// Initial value, if declared with one
    pub init: Option<Expr>,
    pub attrs: VarAttrs,
    pub loc: SourceLoc,
}

impl Var {
    pub fn new(
        id: VarId,
        name: impl Into<String>,
        direction: Direction,
        ty: DataType,
        loc: SourceLoc,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            direction,
            ty,
            init: None,
            attrs: VarAttrs::default(),
            loc,
        }
    }
}

/// Resolved reference to a variable in the same module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarRef {
    pub var: VarId,
    /// Identifier text, kept in sync with the referenced variable's name
    pub name: String,
    /// Lvalue (written) rather than rvalue (read) use
    pub write: bool,
}

impl VarRef {
    pub fn new(var: &Var, write: bool) -> Self {
        Self {
            var: var.id,
            name: var.name.clone(),
            write,
        }
    }
}

/// Not-yet-resolved reference to a variable elsewhere in the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarXRef {
    /// Leaf variable name
    pub name: String,
    /// Dotted path the user wrote, without the leaf
    pub dotted: String,
    /// Instance scopes dissolved around this reference, outermost first,
    /// `.`-joined. Resolution prepends this to `dotted`.
    pub inlined_dots: String,
    /// Resolved target, filled in by the resolution pass
    pub var: Option<VarId>,
}

/// Function or task declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FTask {
    pub id: FTaskId,
    pub name: String,
    /// Function (returns a value) rather than task
    pub is_function: bool,
    /// Arguments and locals; their names are scoped to the body
    pub vars: Vec<Var>,
    pub body: Vec<Stmt>,
}

/// Call site of a function or task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FTaskRef {
    pub name: String,
    /// Resolved target, if any. Cleared ahead of hierarchy changes unless
    /// the call is package-qualified; resolution re-binds it.
    pub task: Option<FTaskId>,
    /// Package the call is qualified with, if any
    pub package: Option<ModuleId>,
    /// Same bookkeeping as [`VarXRef::inlined_dots`]
    pub inlined_dots: String,
    pub args: Vec<Expr>,
}

/// Type declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typedef {
    pub name: String,
    pub ty: DataType,
}

/// Data types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Two-state bit vector
    Bit(usize),
    /// Four-state logic vector
    Logic(usize),
    /// Signed integer
    Int(usize),
    /// Clock signal
    Clock,
    /// Reference to a typedef by name. Deliberately symbolic: renaming a
    /// [`Typedef`] does not chase these, the resolution pass re-binds them.
    Named(String),
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    BitVector { width: usize, value: u64 },
}

/// `%m`-style scope marker inside a display/format statement.
///
/// `scope_attr` holds the text pieces that expand to the instance path;
/// hierarchy passes prepend to it as scopes dissolve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeName {
    pub scope_attr: Vec<Text>,
}

/// Plain text fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

/// Coverage point declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverDecl {
    /// Name of the coverage point
    pub point: String,
    /// User-visible hierarchical path, `.`-separated, grown as instance
    /// scopes dissolve around it
    pub hier: String,
}

/// Pragma kinds understood by the netlist passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PragmaKind {
    /// Request that the enclosing module be dissolved at every instance
    InlineModule,
    /// Forbid automatic dissolution of the enclosing module
    NoInlineModule,
    /// Exclude the enclosing block from coverage
    CoverageBlockOff,
}

/// A pragma statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pragma {
    pub kind: PragmaKind,
    pub loc: SourceLoc,
}

/// Assignment kinds inside processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignKind {
    /// Blocking assignment (`=`)
    Blocking,
    /// Non-blocking assignment (`<=`)
    NonBlocking,
}

/// Left- and right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub lhs: Expr,
    pub rhs: Expr,
}

/// Process kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlwaysKind {
    /// Combinational process
    Comb,
    /// Clocked process
    Sequential,
}

/// A process block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlwaysBlock {
    pub kind: AlwaysKind,
    pub body: Vec<Stmt>,
}

/// Conditional statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_stmts: Vec<Stmt>,
    pub else_stmts: Vec<Stmt>,
}

/// Formatted display statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayStmt {
    pub format: String,
    pub args: Vec<Expr>,
}

/// Statements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Module instance
    Cell(Cell),
    /// Continuous assignment (`assign lhs = rhs`)
    Continuous(Assign),
    /// Bidirectional tracing-preserving alias between two signals.
    /// Waveform viewers show both names for the same value.
    Alias(Assign),
    /// Assignment inside a process
    Procedural { kind: AssignKind, assign: Assign },
    /// Process block
    Always(AlwaysBlock),
    /// Conditional
    If(IfStmt),
    /// Formatted display
    Display(DisplayStmt),
    /// Coverage point
    Cover(CoverDecl),
    /// Pragma
    Pragma(Pragma),
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Add,
    Sub,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Value),
    Var(VarRef),
    XRef(VarXRef),
    Call(FTaskRef),
    Scope(ScopeName),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Concat(Vec<Expr>),
}
