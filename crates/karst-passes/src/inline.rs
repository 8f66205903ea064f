//! Module inlining pass
//!
//! Dissolves selected instance boundaries: each cell whose target module is
//! chosen for inlining is replaced by a rewritten copy of that module's
//! body, so later passes see one flat module instead of an instance edge.
//!
//! ```text
//! mark                transform                       sweep
//! (choose modules) →  (clone, rewrite, splice, per →  (drop modules that
//!                      cell, bottom-up)                lost all instances)
//! ```
//!
//! The mark stage is pure analysis: a module is chosen when the user asked
//! for it (`inline` pragma), when it has a single instance, when it is
//! small, or when duplicating it everywhere stays under the configured
//! budget - unless something forbids it (`public`, `no_inline` pragma).
//!
//! The transform stage visits modules bottom-up so an instantiated module is
//! fully flattened before its own instantiators are processed. At each
//! chosen cell it clones the target, binds connected pins to the cloned port
//! variables, lowers every bound port to a continuous assignment (constants,
//! and public outputs which must keep a real driver) or a tracing-preserving
//! alias (everything else), rewrites identifiers into the cell's scope with
//! [`naming::scoped_name`], and splices the result into the instantiating
//! module together with a [`CellInline`] breadcrumb for later dotted-name
//! resolution.
//!
//! Anything user-facing that goes wrong is collected as a [`Diagnostic`];
//! violated internal invariants panic.

use crate::diag::{Diagnostic, Diagnostics};
use crate::pin_reconnect::{PinReconnect, SimplePinReconnect};
use indexmap::IndexMap;
use karst_netlist::{
    naming, Assign, Cell, CellInline, Direction, Expr, IdAlloc, Module, ModuleId, ModuleKind,
    Netlist, PragmaKind, Stmt, Text, Var, VarId, VarRef,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Modules below this many statements are always inline candidates.
pub const INLINE_SMALL_STMTS: usize = 100;

/// Tunables of the inlining heuristic
#[derive(Debug, Clone, Serialize)]
pub struct InlineConfig {
    /// Auto-inline budget: a module qualifies while its instance count times
    /// its statement count stays below this. Any value below 1 disables the
    /// budget and inlines everything that is legal to inline.
    pub inline_mult: i32,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self { inline_mult: 2000 }
    }
}

/// Precondition violations detectable before the pass mutates anything
#[derive(Debug, Error)]
pub enum InlineError {
    #[error("cell `{cell}` in module `{module}` instantiates a module that is not in the netlist")]
    UnknownModule {
        module: String,
        cell: String,
        target: ModuleId,
    },
}

/// What the pass did
#[derive(Debug, Clone, Serialize)]
pub struct InlineReport {
    /// Cells replaced by their target module's body
    pub inlined_cells: usize,
    /// Modules dropped after their last instance dissolved
    pub removed_modules: usize,
    /// User-facing diagnostics gathered along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// The inlining pass. Configure with the builder methods, then run
/// [`inline_all`](ModuleInliner::inline_all) once per netlist.
pub struct ModuleInliner<P: PinReconnect = SimplePinReconnect> {
    config: InlineConfig,
    pin_reconnect: P,
}

impl ModuleInliner {
    pub fn new() -> Self {
        Self {
            config: InlineConfig::default(),
            pin_reconnect: SimplePinReconnect,
        }
    }
}

impl Default for ModuleInliner {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinReconnect> ModuleInliner<P> {
    pub fn with_config(mut self, config: InlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap in a different pin connection simplifier.
    pub fn with_pin_reconnect<Q: PinReconnect>(self, pin_reconnect: Q) -> ModuleInliner<Q> {
        ModuleInliner {
            config: self.config,
            pin_reconnect,
        }
    }

    /// Run mark, transform, and sweep over the whole netlist.
    pub fn inline_all(&mut self, netlist: &mut Netlist) -> Result<InlineReport, InlineError> {
        validate(netlist)?;
        let mut diag = Diagnostics::new();
        let marked = InlineMark::new(&self.config, &mut diag).run(netlist);
        let inlined_cells = transform(netlist, &marked, &mut self.pin_reconnect, &mut diag);
        let removed_modules = sweep(netlist, &marked);
        debug!(inlined_cells, removed_modules, "inline pass complete");
        Ok(InlineReport {
            inlined_cells,
            removed_modules,
            diagnostics: diag.into_vec(),
        })
    }
}

/// Inline with the default configuration and the stock pin simplifier.
pub fn inline_all(netlist: &mut Netlist) -> Result<InlineReport, InlineError> {
    ModuleInliner::new().inline_all(netlist)
}

fn validate(netlist: &Netlist) -> Result<(), InlineError> {
    for module in netlist.modules.values() {
        validate_stmts(netlist, module, &module.stmts)?;
        for task in &module.tasks {
            validate_stmts(netlist, module, &task.body)?;
        }
    }
    Ok(())
}

fn validate_stmts(netlist: &Netlist, module: &Module, stmts: &[Stmt]) -> Result<(), InlineError> {
    for stmt in stmts {
        match stmt {
            Stmt::Cell(cell) => {
                if !netlist.modules.contains_key(&cell.module) {
                    return Err(InlineError::UnknownModule {
                        module: module.name.clone(),
                        cell: cell.name.clone(),
                        target: cell.module,
                    });
                }
            }
            Stmt::Always(block) => validate_stmts(netlist, module, &block.body)?,
            Stmt::If(if_stmt) => {
                validate_stmts(netlist, module, &if_stmt.then_stmts)?;
                validate_stmts(netlist, module, &if_stmt.else_stmts)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// The mark decision, a pure function of its inputs.
fn should_inline(user: bool, allowed: bool, refs: u32, stmt_cnt: usize, inline_mult: i32) -> bool {
    user || (allowed
        && (refs == 1
            || stmt_cnt < INLINE_SMALL_STMTS
            || inline_mult < 1
            || (refs as i64) * (stmt_cnt as i64) < inline_mult as i64))
}

/// Mark stage: decides per module whether it gets inlined, strips the
/// `inline`/`no_inline` pragmas, and unlinks cross-hierarchy references so
/// the resolution pass can re-bind them after the tree changes shape.
struct InlineMark<'a> {
    config: &'a InlineConfig,
    diag: &'a mut Diagnostics,
    /// Modules the user explicitly asked to inline
    user_marked: HashSet<ModuleId>,
    /// Whether auto-inlining a module is still legal
    legal: HashMap<ModuleId, bool>,
    /// Instances seen per target module
    refs: HashMap<ModuleId, u32>,
    /// The result: modules to inline
    marked: HashSet<ModuleId>,
}

impl<'a> InlineMark<'a> {
    fn new(config: &'a InlineConfig, diag: &'a mut Diagnostics) -> Self {
        Self {
            config,
            diag,
            user_marked: HashSet::new(),
            legal: HashMap::new(),
            refs: HashMap::new(),
            marked: HashSet::new(),
        }
    }

    fn run(mut self, netlist: &mut Netlist) -> HashSet<ModuleId> {
        netlist.directives.retain(|pragma| match pragma.kind {
            PragmaKind::InlineModule | PragmaKind::NoInlineModule => {
                self.diag
                    .error(pragma.loc.clone(), "inline pragma is not under a module");
                false
            }
            _ => true,
        });

        for i in 0..netlist.modules.len() {
            let Some((id, module)) = netlist.modules.get_index_mut(i) else {
                continue;
            };
            let id = *id;
            let mut stmt_cnt = 0usize;
            self.legal.insert(id, true);
            if module.public {
                self.cant_inline(id, "public module");
            }

            for var in &mut module.vars {
                if let Some(init) = &mut var.init {
                    unlink_cross_refs(init);
                }
            }
            for task in &mut module.tasks {
                stmt_cnt += 1;
                for var in &mut task.vars {
                    if let Some(init) = &mut var.init {
                        unlink_cross_refs(init);
                    }
                }
                self.mark_stmts(&mut task.body, id, &mut stmt_cnt);
            }
            self.mark_stmts(&mut module.stmts, id, &mut stmt_cnt);

            // Instance counts for this module are complete here: every
            // module that instantiates it precedes it in netlist order.
            let user = self.user_marked.contains(&id);
            let allowed = self.legal.get(&id).copied().unwrap_or(true);
            let refs = self.refs.get(&id).copied().unwrap_or(0);
            let mut doit = should_inline(user, allowed, refs, stmt_cnt, self.config.inline_mult);
            // Packages sit outside the instance hierarchy.
            if module.kind == ModuleKind::Package {
                doit = false;
            }
            debug!(
                module = %module.name,
                inline = doit,
                allowed,
                user,
                refs,
                stmts = stmt_cnt,
                "inline decision"
            );
            if doit {
                self.marked.insert(id);
            }
        }
        self.marked
    }

    fn cant_inline(&mut self, module: ModuleId, reason: &str) {
        if self.legal.get(&module).copied().unwrap_or(true) {
            debug!(module = module.0, reason, "cannot auto-inline");
            self.legal.insert(module, false);
        }
    }

    fn mark_stmts(&mut self, stmts: &mut Vec<Stmt>, module: ModuleId, cnt: &mut usize) {
        stmts.retain_mut(|stmt| match stmt {
            Stmt::Pragma(pragma) => match pragma.kind {
                PragmaKind::InlineModule => {
                    self.user_marked.insert(module);
                    false
                }
                PragmaKind::NoInlineModule => {
                    self.cant_inline(module, "no_inline pragma");
                    false
                }
                PragmaKind::CoverageBlockOff => true,
            },
            // A cell counts toward the target's instances, not the host's
            // statement total.
            Stmt::Cell(cell) => {
                *self.refs.entry(cell.module).or_insert(0) += 1;
                for pin in &mut cell.pins {
                    if let Some(expr) = &mut pin.expr {
                        unlink_cross_refs(expr);
                    }
                }
                true
            }
            // Assignments flatten out later; they cost the heuristic nothing.
            Stmt::Continuous(assign) | Stmt::Alias(assign) => {
                unlink_cross_refs(&mut assign.lhs);
                unlink_cross_refs(&mut assign.rhs);
                true
            }
            Stmt::Procedural { assign, .. } => {
                unlink_cross_refs(&mut assign.lhs);
                unlink_cross_refs(&mut assign.rhs);
                true
            }
            Stmt::Always(block) => {
                self.mark_stmts(&mut block.body, module, cnt);
                *cnt += 1;
                true
            }
            Stmt::If(if_stmt) => {
                unlink_cross_refs(&mut if_stmt.cond);
                self.mark_stmts(&mut if_stmt.then_stmts, module, cnt);
                self.mark_stmts(&mut if_stmt.else_stmts, module, cnt);
                *cnt += 1;
                true
            }
            Stmt::Display(display) => {
                for arg in &mut display.args {
                    unlink_cross_refs(arg);
                }
                *cnt += 1;
                true
            }
            Stmt::Cover(_) => {
                *cnt += 1;
                true
            }
        });
    }
}

/// Null out resolved cross-hierarchy links; the resolution pass re-binds
/// them once the hierarchy has settled. Package-qualified calls stay bound,
/// packages never move.
fn unlink_cross_refs(expr: &mut Expr) {
    match expr {
        Expr::XRef(xref) => xref.var = None,
        Expr::Call(call) => {
            if call.package.is_none() {
                call.task = None;
            }
            for arg in &mut call.args {
                unlink_cross_refs(arg);
            }
        }
        Expr::Unary { operand, .. } => unlink_cross_refs(operand),
        Expr::Binary { left, right, .. } => {
            unlink_cross_refs(left);
            unlink_cross_refs(right);
        }
        Expr::Concat(exprs) => {
            for expr in exprs {
                unlink_cross_refs(expr);
            }
        }
        Expr::Literal(_) | Expr::Var(_) | Expr::Scope(_) => {}
    }
}

/// Transform stage: expand every marked cell, bottom-up.
fn transform<P: PinReconnect>(
    netlist: &mut Netlist,
    marked: &HashSet<ModuleId>,
    pin_reconnect: &mut P,
    diag: &mut Diagnostics,
) -> usize {
    let mut inlined = 0;
    // Instantiated modules come after their instantiators in netlist order,
    // so reverse iteration finalizes every module before its instances are
    // expanded elsewhere. Required.
    for i in (0..netlist.modules.len()).rev() {
        let Some((host_id, mut host)) = netlist.modules.shift_remove_index(i) else {
            continue;
        };
        let mut s = 0;
        while s < host.stmts.len() {
            let expandable =
                matches!(&host.stmts[s], Stmt::Cell(cell) if marked.contains(&cell.module));
            if !expandable {
                s += 1;
                continue;
            }
            let Stmt::Cell(cell) = host.stmts.remove(s) else {
                unreachable!("statement was just matched as a cell");
            };
            let Netlist { modules, ids, .. } = netlist;
            expand_cell(modules, ids, &mut host, cell, marked, pin_reconnect, diag);
            inlined += 1;
        }
        netlist.modules.shift_insert(i, host_id, host);
    }
    inlined
}

/// Replace one cell with the rewritten body of its target module.
fn expand_cell<P: PinReconnect>(
    modules: &IndexMap<ModuleId, Module>,
    ids: &mut IdAlloc,
    host: &mut Module,
    mut cell: Cell,
    marked: &HashSet<ModuleId>,
    pin_reconnect: &mut P,
    diag: &mut Diagnostics,
) {
    let Some(target) = modules.get(&cell.module) else {
        panic!("cell `{}` targets a module missing from the netlist", cell.name);
    };
    debug!(cell = %cell.name, module = %target.name, into = %host.name, "inlining cell");

    // Simplify pin connections before cloning; with several instantiations
    // of the same target this also does the work once per cell, not once
    // per copy.
    {
        let Cell { name, pins, .. } = &mut cell;
        for pin in pins.iter_mut() {
            if pin.expr.is_none() {
                continue;
            }
            let Some(port) = target.var(pin.mod_var) else {
                panic!(
                    "pin of cell `{}` binds a variable the target module does not declare",
                    name
                );
            };
            pin_reconnect.reconnect_simple(pin, name, port, host, ids, false);
        }
    }

    let (mut clone, map) = target.clone_with_ids(ids);

    // Breadcrumb goes in ahead of anything hoisted out of the clone, so
    // readers see the scope before any cell it qualifies.
    host.inlines.push(CellInline {
        name: cell.name.clone(),
        orig_module: target.orig_name.clone(),
        loc: cell.loc.clone(),
    });

    // Bind connected pins to the cloned port variables.
    let mut connect: HashMap<VarId, Expr> = HashMap::new();
    let mut keep_signal: HashSet<VarId> = HashSet::new();
    for pin in &cell.pins {
        let Some(expr) = &pin.expr else { continue };
        if !matches!(expr, Expr::Literal(_) | Expr::Var(_)) {
            panic!(
                "pin connection is neither a constant nor a variable reference; \
                 pin reconnect should have cleared this up"
            );
        }
        let Some(port_id) = map.vars.get(&pin.mod_var).copied() else {
            panic!(
                "pin of cell `{}` binds a variable the target module does not declare",
                cell.name
            );
        };
        let Some(port) = clone.var(port_id) else {
            panic!("clone of module `{}` lost a port variable", target.name);
        };
        if port.direction == Direction::Output && matches!(expr, Expr::Literal(_)) {
            diag.error(
                pin.loc.clone(),
                "output port is connected to a constant pin, electrical short",
            );
        }
        // A public output must keep a real driver: aliasing it would let
        // outside writes swallow the value meant to propagate up.
        if port.attrs.public_rw && port.direction == Direction::Output {
            keep_signal.insert(port_id);
        }
        let port_attrs = port.attrs.clone();
        if let Expr::Var(conn) = expr {
            // Port attributes flow across the interconnect onto the
            // parent-side signal; the cloned port already carries them.
            if let Some(host_var) = host.var_mut(conn.var) {
                host_var.attrs.propagate_from(&port_attrs);
            }
        }
        connect.insert(port_id, expr.clone());
    }

    // Hoist nested breadcrumbs, renamed into this cell's scope.
    for mut inline in clone.inlines.drain(..) {
        inline.name = naming::scoped_name(&cell.name, &inline.name);
        trace!(breadcrumb = %inline.name, "hoisting nested instance breadcrumb");
        host.inlines.push(inline);
    }

    // Lower bound ports and rename declarations into the cell's scope.
    // Directions are checked before they are cleared to Local.
    let mut names: HashMap<VarId, String> = HashMap::new();
    for var in &mut clone.vars {
        let new_name = if var.attrs.func_local {
            var.name.clone()
        } else {
            naming::scoped_name(&cell.name, &var.name)
        };
        if let Some(conn) = connect.get(&var.id) {
            lower_bound_var(host, var, &new_name, conn, &keep_signal);
        }
        if !var.attrs.func_local {
            var.name = new_name.clone();
            var.direction = Direction::Local;
        }
        names.insert(var.id, new_name);
    }
    for task in &mut clone.tasks {
        task.name = naming::scoped_name(&cell.name, &task.name);
        for var in &task.vars {
            names.insert(var.id, var.name.clone());
        }
    }
    for typedef in &mut clone.typedefs {
        typedef.name = naming::scoped_name(&cell.name, &typedef.name);
    }

    // Rewrite every reference in the clone's body.
    let walk = CloneWalk {
        cell_name: &cell.name,
        connect: &connect,
        keep_signal: &keep_signal,
        names: &names,
        marked,
    };
    for var in &mut clone.vars {
        if let Some(init) = &mut var.init {
            walk.expr(init, false);
        }
    }
    for task in &mut clone.tasks {
        for var in &mut task.vars {
            if let Some(init) = &mut var.init {
                walk.expr(init, false);
            }
        }
        walk.stmts(&mut task.body);
    }
    walk.stmts(&mut clone.stmts);

    // Splice. The emptied clone shell and the cell itself drop here; ids
    // are never reused, so nothing can dangle.
    host.vars.append(&mut clone.vars);
    host.tasks.append(&mut clone.tasks);
    host.typedefs.append(&mut clone.typedefs);
    host.stmts.append(&mut clone.stmts);
}

/// Emit the statement that connects one bound port to its pin expression.
/// The port variable itself stays declared either way.
fn lower_bound_var(
    host: &mut Module,
    var: &mut Var,
    new_name: &str,
    conn: &Expr,
    keep_signal: &HashSet<VarId>,
) {
    match conn {
        Expr::Literal(value) => {
            host.stmts.push(Stmt::Continuous(Assign {
                lhs: Expr::Var(VarRef {
                    var: var.id,
                    name: new_name.to_string(),
                    write: true,
                }),
                rhs: Expr::Literal(value.clone()),
            }));
        }
        Expr::Var(conn_ref) => {
            if keep_signal.contains(&var.id) {
                // Public output: drive the parent-side signal from the port.
                if var.direction == Direction::Input {
                    panic!("public pin lowering applies to outputs only; inputs use aliases");
                }
                host.stmts.push(Stmt::Continuous(Assign {
                    lhs: Expr::Var(VarRef {
                        var: conn_ref.var,
                        name: conn_ref.name.clone(),
                        write: true,
                    }),
                    rhs: Expr::Var(VarRef {
                        var: var.id,
                        name: new_name.to_string(),
                        write: false,
                    }),
                }));
            } else {
                host.stmts.push(Stmt::Alias(Assign {
                    lhs: Expr::Var(VarRef {
                        var: var.id,
                        name: new_name.to_string(),
                        write: true,
                    }),
                    rhs: Expr::Var(VarRef {
                        var: conn_ref.var,
                        name: conn_ref.name.clone(),
                        write: false,
                    }),
                }));
                // Aliased signals share lint/tracing state.
                if let Some(host_var) = host.var_mut(conn_ref.var) {
                    var.loc.inherit_state(&host_var.loc);
                    host_var.loc.inherit_state(&var.loc);
                }
            }
        }
        _ => panic!(
            "bound pin connection is neither a constant nor a variable reference; \
             pin reconnect should have cleared this up"
        ),
    }
}

/// Per-node rewrite of a detached clone, scoped to one cell.
struct CloneWalk<'a> {
    cell_name: &'a str,
    /// Pin expression each bound port variable is direct-connected to
    connect: &'a HashMap<VarId, Expr>,
    /// Bound ports that must stay signals of their own (no substitution)
    keep_signal: &'a HashSet<VarId>,
    /// Final identifier text of every variable owned by the clone
    names: &'a HashMap<VarId, String>,
    marked: &'a HashSet<ModuleId>,
}

impl CloneWalk<'_> {
    fn stmts(&self, stmts: &mut [Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Cell(cell) => {
                if self.marked.contains(&cell.module) {
                    panic!(
                        "cell `{}` inside a clone targets a module still marked for inlining; \
                         expansion runs bottom-up",
                        cell.name
                    );
                }
                // Nested instance: pull its name into this cell's scope.
                cell.name = naming::scoped_name(self.cell_name, &cell.name);
                for pin in &mut cell.pins {
                    if let Some(expr) = &mut pin.expr {
                        self.expr(expr, false);
                    }
                }
            }
            Stmt::Alias(assign) => {
                self.expr(&mut assign.lhs, true);
                self.expr(&mut assign.rhs, true);
            }
            Stmt::Continuous(assign) => {
                self.expr(&mut assign.lhs, false);
                self.expr(&mut assign.rhs, false);
            }
            Stmt::Procedural { assign, .. } => {
                self.expr(&mut assign.lhs, false);
                self.expr(&mut assign.rhs, false);
            }
            Stmt::Always(block) => self.stmts(&mut block.body),
            Stmt::If(if_stmt) => {
                self.expr(&mut if_stmt.cond, false);
                self.stmts(&mut if_stmt.then_stmts);
                self.stmts(&mut if_stmt.else_stmts);
            }
            Stmt::Display(display) => {
                for arg in &mut display.args {
                    self.expr(arg, false);
                }
            }
            Stmt::Cover(cover) => {
                // Coverage paths are user-visible: dotted, not mangled.
                cover.hier =
                    naming::dotted_prefix(&naming::pretty_name(self.cell_name), &cover.hier);
            }
            Stmt::Pragma(_) => {}
        }
    }

    /// `in_alias` is set for the immediate operands of an alias statement:
    /// substituting those would collapse the alias chain we just built, so
    /// they only get their identifier text refreshed.
    fn expr(&self, expr: &mut Expr, in_alias: bool) {
        match expr {
            Expr::Var(vref) => {
                let conn = if in_alias || self.keep_signal.contains(&vref.var) {
                    None
                } else {
                    self.connect.get(&vref.var)
                };
                match conn {
                    // Direct-connected constant: fold it into the use site.
                    Some(Expr::Literal(value)) => {
                        *expr = Expr::Literal(value.clone());
                    }
                    // Direct-connected signal: use the parent-side signal.
                    Some(Expr::Var(conn_ref)) => {
                        vref.var = conn_ref.var;
                        vref.name = conn_ref.name.clone();
                    }
                    Some(_) => panic!(
                        "bound pin connection is neither a constant nor a variable reference"
                    ),
                    None => {
                        if let Some(name) = self.names.get(&vref.var) {
                            vref.name = name.clone();
                        }
                    }
                }
            }
            Expr::XRef(xref) => {
                xref.inlined_dots = naming::dotted_prefix(self.cell_name, &xref.inlined_dots);
            }
            Expr::Call(call) => {
                call.inlined_dots = naming::dotted_prefix(self.cell_name, &call.inlined_dots);
                for arg in &mut call.args {
                    self.expr(arg, false);
                }
            }
            Expr::Scope(scope) => {
                // Keep visual order: the new scope piece goes in front of
                // whatever the expansion already contains.
                scope.scope_attr.insert(
                    0,
                    Text {
                        text: format!("{}{}", naming::SCOPE_SEPARATOR, self.cell_name),
                    },
                );
            }
            Expr::Unary { operand, .. } => self.expr(operand, false),
            Expr::Binary { left, right, .. } => {
                self.expr(left, false);
                self.expr(right, false);
            }
            Expr::Concat(exprs) => {
                for expr in exprs {
                    self.expr(expr, false);
                }
            }
            Expr::Literal(_) => {}
        }
    }
}

/// Sweep stage: a marked module has no surviving instances; drop it so
/// intermediate dumps stay small (dead-code removal would catch it later
/// anyway).
fn sweep(netlist: &mut Netlist, marked: &HashSet<ModuleId>) -> usize {
    let before = netlist.modules.len();
    netlist.modules.retain(|id, module| {
        let remove = marked.contains(id);
        if remove {
            trace!(module = %module.name, "dropping fully inlined module");
        }
        !remove
    });
    before - netlist.modules.len()
}
