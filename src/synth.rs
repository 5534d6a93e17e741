//! The synthesizer abstraction: renaming symbolic variables to solver-
//! native integer identifiers, rendering formulas to clause matrices, and
//! translating solver models back to named literals.

use crate::formula::{is_reserved_name, Formula};

/// The adapter that names, numbers, and renders literals and clauses for
/// a specific downstream solver representation.
///
/// Kept as a trait (rather than a concrete struct) so alternative
/// back-ends — a DIMACS file writer, an in-memory incremental solver —
/// can be swapped in; [`DefaultSynthesizer`] is the signed-integer clause
/// matrix implementation described by [`render_cnf`]/[`render_clause`].
///
/// Deliberately object-safe: no generic methods, no associated types, so
/// callers can hold a `&mut dyn Synthesizer`. The recursive rendering
/// that needs to walk arbitrary `Formula` shapes lives in the free
/// functions [`render_literal`]/[`render_clause`]/[`render_cnf`] instead
/// of as trait methods, for the same reason.
pub trait Synthesizer {
    /// Maps a variable name to a solver id, allocating a fresh one on
    /// first use.
    fn synth_variable(&mut self, name: &str) -> i64;

    /// Negates a solver id.
    fn synth_negation(&self, id: i64) -> i64;

    /// The solver id standing for the constant `true`.
    fn synth_true(&self) -> i64;

    /// Renders a clause (an iterator of signed solver ids) into this
    /// synthesizer's clause representation.
    fn synth_clause(&mut self, ids: Vec<i64>) -> Vec<i64>;

    /// Renders a collection of clauses into this synthesizer's CNF
    /// representation.
    fn synth_cnf(&mut self, clauses: Vec<Vec<i64>>) -> Vec<Vec<i64>>;

    /// Maps a model (a list of signed solver ids) back to named literals,
    /// skipping auxiliaries and any id below the variable offset.
    fn translate(&self, model: &[i64]) -> Vec<Formula>;

    /// Builds the assumption list for a single query: the reserved
    /// true-id first, followed by the renderings of `literals`.
    fn get_assumptions(&mut self, literals: &[Formula]) -> Vec<i64>;

    /// Every user-level variable name registered so far.
    fn get_known_variables(&self) -> Vec<String>;
}

/// Renders a single literal to its signed solver id via `s`.
///
/// Panics if `f` is not a literal (see [`crate::formula::is_literal`]);
/// callers are expected to have already reduced to CNF, at which point
/// every leaf is a literal by construction.
pub fn render_literal(s: &mut dyn Synthesizer, f: &Formula) -> i64 {
    match f {
        Formula::Constant(true) => s.synth_true(),
        Formula::Constant(false) => s.synth_negation(s.synth_true()),
        Formula::Variable(name) => s.synth_variable(name),
        Formula::EqConstTerm { var, val } => s.synth_variable(&format!("{var}=={val}")),
        Formula::LiteralNegation(inner) => {
            let id = render_literal(s, inner);
            s.synth_negation(id)
        }
        other => panic!("render_literal called on non-literal {other}"),
    }
}

/// Renders a [`Formula::Clause`] to its solver representation.
///
/// Panics if `f` is not a `Clause`.
pub fn render_clause(s: &mut dyn Synthesizer, f: &Formula) -> Vec<i64> {
    let Formula::Clause(children) = f else {
        panic!("render_clause called on non-clause {f}");
    };
    let ids: Vec<i64> = children.iter().map(|c| render_literal(s, c)).collect();
    s.synth_clause(ids)
}

/// Renders a [`Formula::CNF`] to its solver representation.
///
/// Panics if `f` is not a `CNF`.
pub fn render_cnf(s: &mut dyn Synthesizer, f: &Formula) -> Vec<Vec<i64>> {
    let Formula::CNF(clauses) = f else {
        panic!("render_cnf called on non-cnf {f}");
    };
    let rendered: Vec<Vec<i64>> = clauses.iter().map(|c| render_clause(s, c)).collect();
    s.synth_cnf(rendered)
}

/// The default [`Synthesizer`]: a bidirectional name/id map with ids
/// starting at 2 and id 1 reserved for the constant `true`.
///
/// Grounded on the original implementation's `PySATSynthesizer`: variable
/// registration memoises through a map, `translate` filters both
/// sub-offset ids and Tseytin-auxiliary names, and `get_assumptions`
/// always leads with the true-id.
#[derive(Debug)]
pub struct DefaultSynthesizer {
    name_to_id: rustc_hash::FxHashMap<String, i64>,
    id_to_name: Vec<String>,
    next_id: i64,
}

const TRUE_ID: i64 = 1;
const VARIABLE_ID_OFFSET: i64 = 2;

impl Default for DefaultSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultSynthesizer {
    /// Builds an empty synthesizer with no variables registered yet.
    pub fn new() -> Self {
        Self {
            name_to_id: rustc_hash::FxHashMap::default(),
            id_to_name: Vec::new(),
            next_id: VARIABLE_ID_OFFSET,
        }
    }

    fn name_for_id(&self, id: i64) -> Option<&str> {
        let index = (id - VARIABLE_ID_OFFSET) as usize;
        self.id_to_name.get(index).map(|s| s.as_str())
    }
}

impl Synthesizer for DefaultSynthesizer {
    fn synth_variable(&mut self, name: &str) -> i64 {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.push(name.to_string());
        log::trace!("registered variable '{name}' as id {id}");
        id
    }

    fn synth_negation(&self, id: i64) -> i64 {
        -id
    }

    fn synth_true(&self) -> i64 {
        TRUE_ID
    }

    fn synth_clause(&mut self, ids: Vec<i64>) -> Vec<i64> {
        ids
    }

    fn synth_cnf(&mut self, clauses: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
        clauses
    }

    fn translate(&self, model: &[i64]) -> Vec<Formula> {
        model
            .iter()
            .filter_map(|&signed| {
                let id = signed.abs();
                if id < VARIABLE_ID_OFFSET {
                    return None;
                }
                let name = self.name_for_id(id)?;
                if is_reserved_name(name) {
                    return None;
                }
                let literal = if let Some((var, val)) = name.split_once("==") {
                    Formula::EqConstTerm {
                        var: var.to_string(),
                        val: val.parse().expect("EqConstTerm names encode a valid i64"),
                    }
                } else {
                    Formula::Variable(name.to_string())
                };
                Some(if signed < 0 {
                    crate::formula::not(literal)
                } else {
                    literal
                })
            })
            .collect()
    }

    fn get_assumptions(&mut self, literals: &[Formula]) -> Vec<i64> {
        let mut assumptions = vec![self.synth_true()];
        assumptions.extend(literals.iter().map(|f| render_literal(self, f)));
        assumptions
    }

    fn get_known_variables(&self) -> Vec<String> {
        self.id_to_name
            .iter()
            .filter(|name| !is_reserved_name(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::not;

    #[test]
    fn ids_are_dense_starting_at_two() {
        let mut s = DefaultSynthesizer::new();
        assert_eq!(s.synth_variable("a"), 2);
        assert_eq!(s.synth_variable("b"), 3);
        assert_eq!(s.synth_variable("a"), 2);
        assert_ne!(s.synth_variable("c"), TRUE_ID);
    }

    #[test]
    fn true_id_is_never_allocated_to_a_variable() {
        let mut s = DefaultSynthesizer::new();
        for i in 0..5 {
            assert_ne!(s.synth_variable(&format!("v{i}")), TRUE_ID);
        }
    }

    #[test]
    fn render_and_translate_round_trip() {
        let mut s = DefaultSynthesizer::new();
        let a = Formula::variable("a").unwrap();
        let b = Formula::variable("b").unwrap();
        let clause = Formula::clause(vec![a.clone(), not(b.clone())]).unwrap();
        let ids = render_clause(&mut s, &clause);
        let translated = s.translate(&ids);
        assert_eq!(translated, vec![a, not(b)]);
    }

    #[test]
    fn assumptions_lead_with_true_id() {
        let mut s = DefaultSynthesizer::new();
        let a = Formula::variable("a").unwrap();
        let assumptions = s.get_assumptions(&[a]);
        assert_eq!(assumptions[0], TRUE_ID);
        assert_eq!(assumptions.len(), 2);
    }

    #[test]
    fn translate_filters_auxiliaries() {
        let mut s = DefaultSynthesizer::new();
        let aux_id = s.synth_variable("__ts_dis_0");
        let user_id = s.synth_variable("a");
        let translated = s.translate(&[aux_id, user_id]);
        assert_eq!(translated, vec![Formula::variable("a").unwrap()]);
    }

    #[test]
    fn known_variables_excludes_auxiliaries() {
        let mut s = DefaultSynthesizer::new();
        s.synth_variable("a");
        s.synth_variable("__ts_con_1");
        assert_eq!(s.get_known_variables(), vec!["a".to_string()]);
    }

    #[test]
    fn eq_const_term_round_trips_through_translate() {
        let mut s = DefaultSynthesizer::new();
        let lit = Formula::EqConstTerm {
            var: "v".to_string(),
            val: 3,
        };
        let id = render_literal(&mut s, &lit);
        let translated = s.translate(&[id]);
        assert_eq!(translated, vec![lit]);
    }
}
