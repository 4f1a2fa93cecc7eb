//! Conflict analysis: first-UIP clause learning by iterated resolution.
use fixedbitset::FixedBitSet;
use log::debug;

use crate::assignment::{Antecedent, Trail};
use crate::clause::{Clause, ClauseDb, ClauseRef};
use crate::heuristic::DecisionHeuristic;
use crate::lit::{Lit, Var};

/// Walks the implication graph from a conflict clause up to its first
/// unique implication point, producing an asserting learned clause and the
/// decision level to backtrack to.
///
/// The `seen_pos`/`seen_neg` scratch bitsets are reused across calls
/// (mirroring a `grow_to`-style reusable buffer) so resolution doesn't
/// allocate a fresh set on every conflict.
pub struct ConflictAnalyzer {
    seen_pos: FixedBitSet,
    seen_neg: FixedBitSet,
}

impl ConflictAnalyzer {
    pub fn new(num_variables: usize) -> ConflictAnalyzer {
        ConflictAnalyzer {
            seen_pos: FixedBitSet::with_capacity(num_variables),
            seen_neg: FixedBitSet::with_capacity(num_variables),
        }
    }

    /// Resolves `working` against the clause at `antecedent` on `pivot`,
    /// dropping both polarities of `pivot` and deduplicating by literal
    /// identity.
    fn resolve(&mut self, working: Vec<Lit>, pivot: Var, antecedent_lits: &[Lit]) -> Vec<Lit> {
        self.seen_pos.clear();
        self.seen_neg.clear();

        let mut resolvent = Vec::with_capacity(working.len() + antecedent_lits.len());
        for lit in working.into_iter().chain(antecedent_lits.iter().copied()) {
            if lit.var() == pivot {
                continue;
            }
            let seen = if lit.is_positive() {
                &mut self.seen_pos
            } else {
                &mut self.seen_neg
            };
            if !seen.put(lit.var().index()) {
                resolvent.push(lit);
            }
        }
        resolvent
    }

    /// The literal, among those in `working` at `level`, whose antecedent
    /// is a clause and which was assigned most recently. Resolving on the
    /// most recently assigned candidate is what guarantees the loop
    /// terminates at a single literal instead of cycling.
    fn pivot_at_level(&self, working: &[Lit], trail: &Trail, level: usize) -> (usize, Option<Var>) {
        let mut count_at_level = 0;
        let mut pivot: Option<(Var, usize)> = None;

        for &lit in working {
            if trail.decision_level(lit.var()) != Some(level) {
                continue;
            }
            count_at_level += 1;
            if let Antecedent::Implied(_) = trail.antecedent(lit.var()) {
                let position = trail
                    .assigned_position(lit.var())
                    .expect("assigned variable has a trail position");
                let replace = match pivot {
                    Some((_, p)) => position > p,
                    None => true,
                };
                if replace {
                    pivot = Some((lit.var(), position));
                }
            }
        }

        (count_at_level, pivot.map(|(var, _)| var))
    }

    /// Runs the analysis for a conflict found at `level`, appends the
    /// learned clause to `clauses`, updates `heuristic` with the learned
    /// clause's literals, and returns `(learned_clause, backtrack_level)`.
    pub fn analyze(
        &mut self,
        clauses: &mut ClauseDb,
        trail: &Trail,
        heuristic: &mut impl DecisionHeuristic,
        level: usize,
        conflict: ClauseRef,
    ) -> (ClauseRef, usize) {
        debug_assert!(level > 0, "level-0 conflicts are handled by the search driver");

        let mut working: Vec<Lit> = clauses[conflict].lits().to_vec();

        loop {
            let (count_at_level, pivot) = self.pivot_at_level(&working, trail, level);
            debug_assert!(count_at_level >= 1, "conflict clause must touch the current level");
            if count_at_level == 1 {
                break;
            }

            let pivot_var = pivot.expect("multiple literals at level imply an implied pivot");
            let antecedent_ref = match trail.antecedent(pivot_var) {
                Antecedent::Implied(r) => r,
                _ => unreachable!("pivot_at_level only returns implied variables"),
            };
            let antecedent_lits = clauses[antecedent_ref].lits().to_vec();
            working = self.resolve(working, pivot_var, &antecedent_lits);
        }

        let mut backtrack_level = 0;
        for &lit in &working {
            if let Some(dl) = trail.decision_level(lit.var()) {
                if dl < level && dl > backtrack_level {
                    backtrack_level = dl;
                }
            }
        }

        for &lit in &working {
            heuristic.on_literal_added(lit);
        }

        debug!(
            "learned clause of size {} backtracking from {} to {}",
            working.len(),
            level,
            backtrack_level
        );

        let learned = clauses.push(Clause::new(working));
        (learned, backtrack_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::FrequencyHeuristic;

    fn clause(dimacs: &[i64]) -> Clause {
        Clause::new(dimacs.iter().map(|&d| Lit::from_dimacs(d)).collect())
    }

    #[test]
    fn learns_unit_clause_and_backtracks_to_zero() {
        // (1 2): decide x1=false at level 1, decide x2=false at level 2,
        // propagate nothing, conflict clause (1 2) is falsified.
        let mut clauses = ClauseDb::new();
        let c0 = clauses.push(clause(&[1, 2]));
        let mut trail = Trail::new(2);
        let mut heuristic = FrequencyHeuristic::new(2);
        heuristic.on_literal_added(Lit::from_dimacs(1));
        heuristic.on_literal_added(Lit::from_dimacs(2));

        trail.assign(Lit::from_dimacs(-1), 1, Antecedent::Decision);
        trail.assign(Lit::from_dimacs(-2), 2, Antecedent::Decision);

        let mut analyzer = ConflictAnalyzer::new(2);
        let (learned, bl) = analyzer.analyze(&mut clauses, &trail, &mut heuristic, 2, c0);

        assert_eq!(bl, 0);
        assert_eq!(clauses[learned].len(), 1);
    }

    #[test]
    fn resolution_drops_both_polarities_of_pivot() {
        let mut clauses = ClauseDb::new();
        let antecedent = clauses.push(clause(&[1, -2]));
        let mut analyzer = ConflictAnalyzer::new(2);
        let working = vec![Lit::from_dimacs(2), Lit::from_dimacs(3)];
        let pivot = Var::from_index(1);
        let resolvent = analyzer.resolve(working, pivot, clauses[antecedent].lits());
        let dimacs: Vec<i64> = resolvent.iter().map(|l| l.to_dimacs()).collect();
        assert!(!dimacs.contains(&2));
        assert!(!dimacs.contains(&-2));
        assert!(dimacs.contains(&1));
        assert!(dimacs.contains(&3));
    }
}
