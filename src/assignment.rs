//! The assignment trail: the partial assignment and its justification.
use crate::clause::ClauseRef;
use crate::lit::{Lit, Var};

/// The three-valued state of a variable under the current partial
/// assignment.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Value {
    Unassigned,
    False,
    True,
}

/// Why a variable holds its current value.
///
/// Kept as a genuine tagged variant rather than a signed-integer sentinel
/// (`-1` for unassigned, `-2` for a decision, a clause index otherwise), so
/// nothing outside this module needs to know how the "no antecedent" cases
/// are encoded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Antecedent {
    Unassigned,
    Decision,
    Implied(ClauseRef),
}

#[derive(Copy, Clone, Debug)]
struct VarState {
    value: Value,
    decision_level: Option<usize>,
    antecedent: Antecedent,
    /// Position in the assignment order, used by conflict analysis to find
    /// the most recently assigned literal among several candidates.
    assigned_position: Option<usize>,
}

impl Default for VarState {
    fn default() -> VarState {
        VarState {
            value: Value::Unassigned,
            decision_level: None,
            antecedent: Antecedent::Unassigned,
            assigned_position: None,
        }
    }
}

/// The partial assignment, indexed by variable, plus the chronological
/// trail of assigned literals used to undo assignments on backtrack.
#[derive(Clone, Debug)]
pub struct Trail {
    vars: Vec<VarState>,
    /// Literals in the order they were assigned. Because decision levels
    /// only increase as the search proceeds forward, this is also sorted
    /// by decision level, which lets backtracking pop from the back.
    order: Vec<Lit>,
    num_assigned: usize,
}

impl Trail {
    pub fn new(num_variables: usize) -> Trail {
        Trail {
            vars: vec![VarState::default(); num_variables],
            order: Vec::new(),
            num_assigned: 0,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.vars.len()
    }

    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    pub fn all_assigned(&self) -> bool {
        self.num_assigned == self.vars.len()
    }

    pub fn value(&self, var: Var) -> Value {
        self.vars[var.index()].value
    }

    pub fn decision_level(&self, var: Var) -> Option<usize> {
        self.vars[var.index()].decision_level
    }

    pub fn antecedent(&self, var: Var) -> Antecedent {
        self.vars[var.index()].antecedent
    }

    /// The position in assignment order at which `var` was assigned, or
    /// `None` if it is currently unassigned.
    pub fn assigned_position(&self, var: Var) -> Option<usize> {
        self.vars[var.index()].assigned_position
    }

    /// Whether `lit` evaluates to true under the current assignment.
    pub fn is_true(&self, lit: Lit) -> bool {
        match self.value(lit.var()) {
            Value::Unassigned => false,
            Value::True => lit.is_positive(),
            Value::False => !lit.is_positive(),
        }
    }

    /// Whether `lit` evaluates to false under the current assignment.
    pub fn is_false(&self, lit: Lit) -> bool {
        match self.value(lit.var()) {
            Value::Unassigned => false,
            Value::True => !lit.is_positive(),
            Value::False => lit.is_positive(),
        }
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.value(lit.var()) == Value::Unassigned
    }

    /// Assigns `lit` true at `level`, justified by `antecedent`.
    pub fn assign(&mut self, lit: Lit, level: usize, antecedent: Antecedent) {
        let var = lit.var();
        debug_assert_eq!(self.vars[var.index()].value, Value::Unassigned);
        self.vars[var.index()] = VarState {
            value: if lit.is_positive() {
                Value::True
            } else {
                Value::False
            },
            decision_level: Some(level),
            antecedent,
            assigned_position: Some(self.order.len()),
        };
        self.order.push(lit);
        self.num_assigned += 1;
    }

    /// Unassigns every variable assigned at a decision level strictly
    /// greater than `level`, returning the unassigned variables so callers
    /// can restore any per-variable bookkeeping they keep alongside the
    /// trail (e.g. the decision heuristic's frequency scores).
    pub fn backtrack_to(&mut self, level: usize) -> Vec<Var> {
        let mut undone = Vec::new();
        while let Some(&lit) = self.order.last() {
            let var = lit.var();
            match self.vars[var.index()].decision_level {
                Some(dl) if dl > level => {
                    self.order.pop();
                    self.vars[var.index()] = VarState::default();
                    self.num_assigned -= 1;
                    undone.push(var);
                }
                _ => break,
            }
        }
        undone
    }

    /// The final model: every variable in 1..=N with its assigned value,
    /// unassigned variables (don't-cares) reported as false.
    pub fn model(&self) -> Vec<Lit> {
        self.vars
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let var = Var::from_index(index);
                match state.value {
                    Value::True => var.positive(),
                    _ => var.negative(),
                }
            })
            .collect()
    }
}
