//! Deep module cloning with clone correspondence
//!
//! Passes that replicate a module need to ask, for any node in the copy,
//! which node of the original it came from. [`Module::clone_with_ids`]
//! produces a deep copy in which every owned declaration gets a fresh id and
//! returns the original-to-clone [`CloneMap`] alongside. References inside
//! the copy are remapped through the map; references to ids the module does
//! not own (a nested cell's pins into some other module's ports) pass
//! through unchanged.

use crate::netlist::{Expr, FTaskId, IdAlloc, Module, Stmt, VarId};
use std::collections::HashMap;

/// Original-to-clone id correspondence produced by a deep clone
#[derive(Debug, Default)]
pub struct CloneMap {
    pub vars: HashMap<VarId, VarId>,
    pub tasks: HashMap<FTaskId, FTaskId>,
}

impl CloneMap {
    /// Map a variable id, identity for ids the clone does not own
    pub fn var(&self, id: VarId) -> VarId {
        self.vars.get(&id).copied().unwrap_or(id)
    }

    /// Map a task id, identity for ids the clone does not own
    pub fn task(&self, id: FTaskId) -> FTaskId {
        self.tasks.get(&id).copied().unwrap_or(id)
    }
}

impl Module {
    /// Deep-clone this module, giving every owned declaration a fresh id.
    pub fn clone_with_ids(&self, ids: &mut IdAlloc) -> (Module, CloneMap) {
        let mut clone = self.clone();
        let mut map = CloneMap::default();

        clone.id = ids.module_id();
        for var in &mut clone.vars {
            let fresh = ids.var_id();
            map.vars.insert(var.id, fresh);
            var.id = fresh;
        }
        for task in &mut clone.tasks {
            let fresh = ids.task_id();
            map.tasks.insert(task.id, fresh);
            task.id = fresh;
            for var in &mut task.vars {
                let fresh = ids.var_id();
                map.vars.insert(var.id, fresh);
                var.id = fresh;
            }
        }

        for var in &mut clone.vars {
            if let Some(init) = &mut var.init {
                remap_expr(init, &map);
            }
        }
        for task in &mut clone.tasks {
            for var in &mut task.vars {
                if let Some(init) = &mut var.init {
                    remap_expr(init, &map);
                }
            }
            remap_stmts(&mut task.body, &map);
        }
        remap_stmts(&mut clone.stmts, &map);

        (clone, map)
    }
}

fn remap_stmts(stmts: &mut [Stmt], map: &CloneMap) {
    for stmt in stmts {
        remap_stmt(stmt, map);
    }
}

fn remap_stmt(stmt: &mut Stmt, map: &CloneMap) {
    match stmt {
        Stmt::Cell(cell) => {
            for pin in &mut cell.pins {
                // mod_var points into the nested cell's target module and is
                // left alone by the identity fallback
                pin.mod_var = map.var(pin.mod_var);
                if let Some(expr) = &mut pin.expr {
                    remap_expr(expr, map);
                }
            }
        }
        Stmt::Continuous(assign) | Stmt::Alias(assign) => {
            remap_expr(&mut assign.lhs, map);
            remap_expr(&mut assign.rhs, map);
        }
        Stmt::Procedural { assign, .. } => {
            remap_expr(&mut assign.lhs, map);
            remap_expr(&mut assign.rhs, map);
        }
        Stmt::Always(block) => remap_stmts(&mut block.body, map),
        Stmt::If(if_stmt) => {
            remap_expr(&mut if_stmt.cond, map);
            remap_stmts(&mut if_stmt.then_stmts, map);
            remap_stmts(&mut if_stmt.else_stmts, map);
        }
        Stmt::Display(display) => {
            for arg in &mut display.args {
                remap_expr(arg, map);
            }
        }
        Stmt::Cover(_) | Stmt::Pragma(_) => {}
    }
}

fn remap_expr(expr: &mut Expr, map: &CloneMap) {
    match expr {
        Expr::Var(vref) => vref.var = map.var(vref.var),
        Expr::XRef(xref) => {
            if let Some(var) = xref.var {
                xref.var = Some(map.var(var));
            }
        }
        Expr::Call(call) => {
            if let Some(task) = call.task {
                call.task = Some(map.task(task));
            }
            for arg in &mut call.args {
                remap_expr(arg, map);
            }
        }
        Expr::Unary { operand, .. } => remap_expr(operand, map),
        Expr::Binary { left, right, .. } => {
            remap_expr(left, map);
            remap_expr(right, map);
        }
        Expr::Concat(exprs) => {
            for expr in exprs {
                remap_expr(expr, map);
            }
        }
        Expr::Literal(_) | Expr::Scope(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::SourceLoc;
    use crate::netlist::{Assign, Cell, DataType, Direction, Pin, Var, VarRef};

    fn loc() -> SourceLoc {
        SourceLoc::new("clone.v", 1)
    }

    #[test]
    fn clone_gets_fresh_ids_and_remapped_refs() {
        let mut ids = IdAlloc::default();
        let mid = ids.module_id();
        let mut module = Module::new(mid, "m");

        let a = Var::new(ids.var_id(), "a", Direction::Input, DataType::Bit(1), loc());
        let b = Var::new(ids.var_id(), "b", Direction::Output, DataType::Bit(1), loc());
        module.stmts.push(Stmt::Continuous(Assign {
            lhs: Expr::Var(VarRef::new(&b, true)),
            rhs: Expr::Var(VarRef::new(&a, false)),
        }));
        module.vars.push(a);
        module.vars.push(b);

        let (clone, map) = module.clone_with_ids(&mut ids);

        assert_ne!(clone.id, module.id);
        for (orig, copy) in module.vars.iter().zip(&clone.vars) {
            assert_ne!(orig.id, copy.id);
            assert_eq!(map.var(orig.id), copy.id);
        }
        match &clone.stmts[0] {
            Stmt::Continuous(assign) => {
                let (Expr::Var(lhs), Expr::Var(rhs)) = (&assign.lhs, &assign.rhs) else {
                    panic!("assignment operands should stay variable references");
                };
                assert_eq!(lhs.var, clone.vars[1].id);
                assert_eq!(rhs.var, clone.vars[0].id);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn foreign_pin_targets_pass_through() {
        let mut ids = IdAlloc::default();
        let other_port = ids.var_id();

        let mid = ids.module_id();
        let inner = ids.module_id();
        let mut module = Module::new(mid, "m");
        let x = Var::new(ids.var_id(), "x", Direction::Local, DataType::Bit(1), loc());
        let mut cell = Cell::new("u0", inner, loc());
        cell.pins.push(Pin::new(
            other_port,
            Some(Expr::Var(VarRef::new(&x, false))),
            loc(),
        ));
        module.stmts.push(Stmt::Cell(cell));
        module.vars.push(x);

        let (clone, map) = module.clone_with_ids(&mut ids);

        let Stmt::Cell(cell) = &clone.stmts[0] else {
            panic!("expected the nested cell to survive cloning");
        };
        // The pin still points at the other module's port, while its
        // connection expression follows the cloned local.
        assert_eq!(cell.pins[0].mod_var, other_port);
        let Some(Expr::Var(conn)) = &cell.pins[0].expr else {
            panic!("pin connection should stay a variable reference");
        };
        assert_eq!(conn.var, map.var(module.vars[0].id));
    }
}
