//! Branching heuristics.
use crate::assignment::Trail;
use crate::lit::{Lit, Var};

/// Picks the next branching literal.
///
/// Kept as a narrow trait — "pick one unassigned variable and a polarity"
/// is the entire contract propagation and conflict analysis rely on — so a
/// future heuristic (VSIDS and friends) can be swapped in without touching
/// either of those.
pub trait DecisionHeuristic {
    /// Called once per literal occurrence seen while a clause is added to
    /// the database, original or learned.
    fn on_literal_added(&mut self, lit: Lit);

    /// Called when a variable becomes assigned; it must not be returned by
    /// [`DecisionHeuristic::pick`] again until unassigned.
    fn on_assigned(&mut self, var: Var);

    /// Called when a variable becomes unassigned (backtracking).
    fn on_unassigned(&mut self, var: Var);

    /// Picks the next branching literal. Never called while every variable
    /// is assigned.
    fn pick(&mut self, trail: &Trail) -> Lit;
}

/// The baseline heuristic: static literal-occurrence frequency with
/// polarity chosen by the sign of the polarity balance.
///
/// This is deliberately weak (no decay, no activity bumps beyond what
/// clause learning adds) — see the crate's design notes for why a stronger
/// heuristic is out of scope here.
#[derive(Clone, Debug, Default)]
pub struct FrequencyHeuristic {
    /// Current occurrence count, or `None` while the variable is assigned.
    frequency: Vec<Option<u32>>,
    /// The occurrence count to restore `frequency[v]` to on unassign.
    initial_frequency: Vec<u32>,
    /// Positive occurrences minus negative occurrences.
    polarity_balance: Vec<i64>,
}

impl FrequencyHeuristic {
    pub fn new(num_variables: usize) -> FrequencyHeuristic {
        FrequencyHeuristic {
            frequency: vec![Some(0); num_variables],
            initial_frequency: vec![0; num_variables],
            polarity_balance: vec![0; num_variables],
        }
    }

    pub fn frequency(&self, var: Var) -> Option<u32> {
        self.frequency[var.index()]
    }

    pub fn polarity_balance(&self, var: Var) -> i64 {
        self.polarity_balance[var.index()]
    }
}

impl DecisionHeuristic for FrequencyHeuristic {
    fn on_literal_added(&mut self, lit: Lit) {
        let idx = lit.var().index();
        self.initial_frequency[idx] += 1;
        self.polarity_balance[idx] += lit.polarity_sign();
        if let Some(freq) = &mut self.frequency[idx] {
            *freq += 1;
        }
    }

    fn on_assigned(&mut self, var: Var) {
        self.frequency[var.index()] = None;
    }

    fn on_unassigned(&mut self, var: Var) {
        self.frequency[var.index()] = Some(self.initial_frequency[var.index()]);
    }

    fn pick(&mut self, _trail: &Trail) -> Lit {
        let (best_index, _) = self
            .frequency
            .iter()
            .enumerate()
            .filter_map(|(idx, freq)| freq.map(|f| (idx, f)))
            .max_by(|(a_idx, a_freq), (b_idx, b_freq)| {
                // Max frequency wins; ties broken by smallest index, so we
                // reject a later candidate with an equal frequency.
                a_freq.cmp(b_freq).then(b_idx.cmp(a_idx))
            })
            .expect("pick() called with no unassigned variable");

        let var = Var::from_index(best_index);
        if self.polarity_balance[best_index] < 0 {
            var.negative()
        } else {
            var.positive()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Lit;

    #[test]
    fn picks_highest_frequency_smallest_index_on_tie() {
        let mut heuristic = FrequencyHeuristic::new(3);
        for &dimacs in &[1, 2, -2, 3, -3] {
            heuristic.on_literal_added(Lit::from_dimacs(dimacs));
        }
        // var 0: freq 1, var 1: freq 2, var 2: freq 2 -> tie broken to var 1
        let trail = Trail::new(3);
        let lit = heuristic.pick(&trail);
        assert_eq!(lit.var(), Var::from_index(1));
    }

    #[test]
    fn negative_balance_yields_negative_literal() {
        let mut heuristic = FrequencyHeuristic::new(1);
        heuristic.on_literal_added(Lit::from_dimacs(-1));
        heuristic.on_literal_added(Lit::from_dimacs(-1));
        heuristic.on_literal_added(Lit::from_dimacs(1));
        let trail = Trail::new(1);
        assert!(!heuristic.pick(&trail).is_positive());
    }

    #[test]
    fn zero_balance_defaults_positive() {
        let heuristic = FrequencyHeuristic::new(1);
        assert_eq!(heuristic.polarity_balance(Var::from_index(0)), 0);
    }

    #[test]
    fn assigned_variables_are_not_picked() {
        let mut heuristic = FrequencyHeuristic::new(2);
        heuristic.on_literal_added(Lit::from_dimacs(1));
        heuristic.on_literal_added(Lit::from_dimacs(2));
        heuristic.on_literal_added(Lit::from_dimacs(2));
        heuristic.on_assigned(Var::from_index(1));
        let trail = Trail::new(2);
        assert_eq!(heuristic.pick(&trail).var(), Var::from_index(0));
    }
}
