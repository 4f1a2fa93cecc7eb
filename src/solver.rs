//! The search driver: the top-level CDCL state machine.
use log::info;

use crate::analyze::ConflictAnalyzer;
use crate::assignment::{Antecedent, Trail};
use crate::clause::ClauseDb;
use crate::cnf::CnfFormula;
use crate::heuristic::{DecisionHeuristic, FrequencyHeuristic};
use crate::lit::Lit;
use crate::propagate::{propagate, PropagationResult};

/// The outcome of a solve.
#[derive(Debug)]
pub enum SolveResult {
    /// A satisfying assignment, one literal per variable in 1..=N.
    Sat(Vec<Lit>),
    Unsat,
}

/// Owns the clause database, assignment trail, and search components for a
/// single solve. A `Solver` runs exactly one query: there is no
/// incremental re-use across formulas.
pub struct Solver {
    clauses: ClauseDb,
    trail: Trail,
    heuristic: FrequencyHeuristic,
    analyzer: ConflictAnalyzer,
}

impl Solver {
    pub fn new(formula: CnfFormula) -> Solver {
        let num_vars = formula.num_variables();
        let mut heuristic = FrequencyHeuristic::new(num_vars);
        let mut clauses = ClauseDb::new();

        for clause in formula.into_clauses() {
            for &lit in clause.lits() {
                heuristic.on_literal_added(lit);
            }
            clauses.push(clause);
        }

        Solver {
            clauses,
            trail: Trail::new(num_vars),
            heuristic,
            analyzer: ConflictAnalyzer::new(num_vars),
        }
    }

    /// Runs the CDCL loop to completion: decide, propagate, and on
    /// conflict analyze and backtrack, until every variable is assigned
    /// (SAT) or a conflict survives to decision level 0 (UNSAT).
    pub fn solve(mut self) -> SolveResult {
        if self.clauses.is_empty() {
            info!("formula has no clauses, trivially satisfiable");
            return SolveResult::Sat(self.trail.model());
        }
        if self.clauses.iter().any(|(_, clause)| clause.is_empty()) {
            info!("formula contains the empty clause, trivially unsatisfiable");
            return SolveResult::Unsat;
        }

        let mut level = 0;
        if let PropagationResult::Conflict(_) =
            propagate(&self.clauses, &mut self.trail, &mut self.heuristic, level)
        {
            info!("conflict at decision level 0 during initial propagation");
            return SolveResult::Unsat;
        }

        let mut decisions = 0u64;
        let mut conflicts = 0u64;

        loop {
            if self.trail.all_assigned() {
                info!(
                    "SAT: {} decisions, {} conflicts, {} clauses learned",
                    decisions,
                    conflicts,
                    self.clauses.len()
                );
                return SolveResult::Sat(self.trail.model());
            }

            let literal = self.heuristic.pick(&self.trail);
            level += 1;
            decisions += 1;
            log::debug!("decision: {} at level {}", literal, level);
            self.trail.assign(literal, level, Antecedent::Decision);
            self.heuristic.on_assigned(literal.var());

            loop {
                match propagate(&self.clauses, &mut self.trail, &mut self.heuristic, level) {
                    PropagationResult::Normal => break,
                    PropagationResult::Conflict(conflict) => {
                        conflicts += 1;
                        if level == 0 {
                            info!(
                                "UNSAT: {} decisions, {} conflicts, {} clauses learned",
                                decisions,
                                conflicts,
                                self.clauses.len()
                            );
                            return SolveResult::Unsat;
                        }

                        let (_, backtrack_level) = self.analyzer.analyze(
                            &mut self.clauses,
                            &self.trail,
                            &mut self.heuristic,
                            level,
                            conflict,
                        );
                        log::debug!("backtrack: {} -> {}", level, backtrack_level);
                        for var in self.trail.backtrack_to(backtrack_level) {
                            self.heuristic.on_unassigned(var);
                        }
                        level = backtrack_level;
                    }
                }
            }
        }
    }
}
