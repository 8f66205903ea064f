//! Pin connection simplification
//!
//! The inliner requires every connected pin to carry either a literal or a
//! plain variable reference before it lowers pins to assignments. Richer
//! connection expressions are reduced ahead of time by a [`PinReconnect`]
//! implementation: the stock one routes the expression through a fresh
//! intermediate variable in the instantiating module.

use karst_netlist::{
    Assign, Direction, Expr, IdAlloc, Module, Pin, Stmt, Var, VarRef,
};
use tracing::trace;

/// Reduces a pin's connection to a literal, a plain variable reference, or
/// an empty connection. Implementations may add variables and statements to
/// the instantiating module but must not remove the pin.
pub trait PinReconnect {
    /// Simplify one pin of a cell.
    ///
    /// `port` is the target module's port variable the pin binds, `host`
    /// the module containing the cell. With `elide_unused` set the
    /// implementation may drop connections it can prove drive nothing;
    /// callers that keep every connection pass `false`.
    fn reconnect_simple(
        &mut self,
        pin: &mut Pin,
        cell_name: &str,
        port: &Var,
        host: &mut Module,
        ids: &mut IdAlloc,
        elide_unused: bool,
    );
}

/// Stock simplifier: leaves simple connections alone and lowers composite
/// expressions through an intermediate variable.
#[derive(Debug, Default)]
pub struct SimplePinReconnect;

impl PinReconnect for SimplePinReconnect {
    fn reconnect_simple(
        &mut self,
        pin: &mut Pin,
        cell_name: &str,
        port: &Var,
        host: &mut Module,
        ids: &mut IdAlloc,
        _elide_unused: bool,
    ) {
        let Some(connected) = pin.expr.take() else { return };
        if matches!(connected, Expr::Literal(_) | Expr::Var(_)) {
            pin.expr = Some(connected);
            return;
        }
        // Inout ports cannot be driven through an intermediate; leave the
        // connection for the caller to reject.
        if port.direction == Direction::Inout {
            pin.expr = Some(connected);
            return;
        }

        let prefix = match port.direction {
            Direction::Output => "__Vcellout__",
            _ => "__Vcellinp__",
        };
        let temp_name = format!("{}{}__{}", prefix, cell_name, port.name);
        trace!(pin = %port.name, temp = %temp_name, "lowering composite pin connection");

        let temp = Var::new(
            ids.var_id(),
            temp_name,
            Direction::Local,
            port.ty.clone(),
            pin.loc.clone(),
        );
        pin.expr = Some(Expr::Var(VarRef::new(
            &temp,
            port.direction == Direction::Output,
        )));

        let assign = if port.direction == Direction::Output {
            // The cell drives the expression: expr = temp
            Assign {
                lhs: connected,
                rhs: Expr::Var(VarRef::new(&temp, false)),
            }
        } else {
            // The expression drives the cell: temp = expr
            Assign {
                lhs: Expr::Var(VarRef::new(&temp, true)),
                rhs: connected,
            }
        };
        host.stmts.push(Stmt::Continuous(assign));
        host.vars.push(temp);
    }
}
