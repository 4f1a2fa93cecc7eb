//! Unit propagation.
use log::{debug, trace};

use crate::assignment::{Antecedent, Trail};
use crate::clause::{ClauseDb, ClauseRef};
use crate::heuristic::DecisionHeuristic;

/// The result of running propagation to quiescence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropagationResult {
    /// No clause is unit or falsified; the trail is quiescent.
    Normal,
    /// `clauses[ref]` is falsified under the current assignment.
    Conflict(ClauseRef),
}

/// Repeatedly scans `clauses` in index order, assigning forced literals at
/// `level` until a full scan finds neither a unit clause nor a conflict.
///
/// The scan order is significant: the first clause classified as unit or
/// conflicting in a pass is acted on immediately, which makes the search
/// reproducible given the same input and clause-learning history.
pub fn propagate(
    clauses: &ClauseDb,
    trail: &mut Trail,
    heuristic: &mut impl DecisionHeuristic,
    level: usize,
) -> PropagationResult {
    loop {
        let mut unit_found = false;

        for clause_ref in clauses.refs() {
            let clause = &clauses[clause_ref];

            let mut satisfied = false;
            let mut unassigned_lit = None;
            let mut unassigned_count = 0;

            for &lit in clause.lits() {
                if trail.is_true(lit) {
                    satisfied = true;
                    break;
                }
                if trail.is_unassigned(lit) {
                    unassigned_count += 1;
                    unassigned_lit = Some(lit);
                    if unassigned_count > 1 {
                        break;
                    }
                }
            }

            if satisfied || unassigned_count > 1 {
                continue;
            }

            if unassigned_count == 1 {
                let lit = unassigned_lit.unwrap();
                trace!(
                    "unit propagation: assigning {} at level {} via clause {}",
                    lit,
                    level,
                    clause_ref.index()
                );
                trail.assign(lit, level, Antecedent::Implied(clause_ref));
                heuristic.on_assigned(lit.var());
                unit_found = true;
                break;
            }

            // No unassigned literals and not satisfied: every literal is false.
            debug!("conflict in clause {}", clause_ref.index());
            return PropagationResult::Conflict(clause_ref);
        }

        if !unit_found {
            return PropagationResult::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;
    use crate::heuristic::FrequencyHeuristic;
    use crate::lit::Lit;

    fn db(clauses: Vec<Vec<i64>>) -> ClauseDb {
        let mut db = ClauseDb::new();
        for lits in clauses {
            db.push(Clause::new(lits.into_iter().map(Lit::from_dimacs).collect()));
        }
        db
    }

    #[test]
    fn unit_clause_forces_assignment() {
        let clauses = db(vec![vec![1]]);
        let mut trail = Trail::new(1);
        let mut heuristic = FrequencyHeuristic::new(1);
        let result = propagate(&clauses, &mut trail, &mut heuristic, 0);
        assert_eq!(result, PropagationResult::Normal);
        assert!(trail.is_true(Lit::from_dimacs(1)));
    }

    #[test]
    fn contradictory_units_conflict() {
        let clauses = db(vec![vec![1], vec![-1]]);
        let mut trail = Trail::new(1);
        let mut heuristic = FrequencyHeuristic::new(1);
        let result = propagate(&clauses, &mut trail, &mut heuristic, 0);
        assert!(matches!(result, PropagationResult::Conflict(_)));
    }

    #[test]
    fn chained_propagation_reaches_quiescence() {
        // (1 2 3) (-1) (-2) forces x3 true via two chained unit steps.
        let clauses = db(vec![vec![1, 2, 3], vec![-1], vec![-2]]);
        let mut trail = Trail::new(3);
        let mut heuristic = FrequencyHeuristic::new(3);
        let result = propagate(&clauses, &mut trail, &mut heuristic, 0);
        assert_eq!(result, PropagationResult::Normal);
        assert!(trail.is_true(Lit::from_dimacs(3)));
        assert!(trail.is_false(Lit::from_dimacs(1)));
        assert!(trail.is_false(Lit::from_dimacs(2)));
    }
}
