//! Identifier naming for flattened hierarchy
//!
//! This module is the single source of truth for how hierarchical
//! identifiers are encoded once an instance boundary is dissolved. All
//! passes that hoist, rename, or report flattened signals must go through
//! these helpers so the encoding stays consistent.
//!
//! **Conventions:**
//! - Hoisted identifiers: `<instance>__DOT__<name>` (e.g. `a__DOT__clk`)
//! - User-visible paths: `<instance>.<name>` (e.g. `a.clk`)
//! - Unresolved cross-hierarchy paths accumulate instance names with `.`

/// Separator spliced into identifiers when an instance scope is flattened.
///
/// The literal is deliberately not a legal HDL identifier sequence users
/// would write, so flattened names cannot collide with source names.
pub const SCOPE_SEPARATOR: &str = "__DOT__";

/// Mangle a name into the scope of an instance.
///
/// # Example
/// ```
/// use karst_netlist::naming::scoped_name;
/// assert_eq!(scoped_name("a", "clk"), "a__DOT__clk");
/// ```
pub fn scoped_name(instance: &str, name: &str) -> String {
    format!("{}{}{}", instance, SCOPE_SEPARATOR, name)
}

/// Turn a mangled identifier back into a user-visible dotted path.
///
/// # Example
/// ```
/// use karst_netlist::naming::pretty_name;
/// assert_eq!(pretty_name("a__DOT__b__DOT__clk"), "a.b.clk");
/// assert_eq!(pretty_name("clk"), "clk");
/// ```
pub fn pretty_name(name: &str) -> String {
    name.replace(SCOPE_SEPARATOR, ".")
}

/// Prepend an instance name to an accumulated dotted path.
///
/// # Example
/// ```
/// use karst_netlist::naming::dotted_prefix;
/// assert_eq!(dotted_prefix("b", "c"), "b.c");
/// assert_eq!(dotted_prefix("b", ""), "b");
/// ```
pub fn dotted_prefix(instance: &str, dots: &str) -> String {
    if dots.is_empty() {
        instance.to_string()
    } else {
        format!("{}.{}", instance, dots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_name_mangles() {
        assert_eq!(scoped_name("cpu0", "alu"), "cpu0__DOT__alu");
        assert_eq!(scoped_name("a", "b__DOT__c"), "a__DOT__b__DOT__c");
    }

    #[test]
    fn pretty_name_roundtrip() {
        let mangled = scoped_name("a", &scoped_name("b", "sig"));
        assert_eq!(pretty_name(&mangled), "a.b.sig");
    }

    #[test]
    fn dotted_prefix_composes() {
        assert_eq!(dotted_prefix("outer", &dotted_prefix("inner", "")), "outer.inner");
    }

    #[test]
    fn no_collision_with_user_names() {
        // A user-written `a_clk` never equals a flattened `a__DOT__clk`.
        assert_ne!(scoped_name("a", "clk"), "a_clk");
    }
}
