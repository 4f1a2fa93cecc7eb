//! Property-based soundness checks (P1, P2) against a brute-force checker,
//! plus completeness (P3): every generated formula terminates within the
//! proptest run, which would otherwise hang the test.
use std::collections::HashSet;

use proptest::prelude::*;

use cdclsat::solver::SolveResult;
use cdclsat::{dimacs, Solver};

fn clause_strategy(num_vars: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec((1..=num_vars as i64, any::<bool>()), 1..=3).prop_map(|raw| {
        let mut seen = HashSet::new();
        raw.into_iter()
            .filter_map(|(var, positive)| {
                seen.insert(var).then_some(if positive { var } else { -var })
            })
            .collect()
    })
}

/// Generates small CNF formulas: at most 8 variables (comfortably within
/// the N <= 15 brute-force budget from the spec) and at most 12 clauses.
fn cnf_strategy() -> impl Strategy<Value = (usize, Vec<Vec<i64>>)> {
    (1usize..=8).prop_flat_map(|num_vars| {
        prop::collection::vec(clause_strategy(num_vars), 0..12)
            .prop_map(move |clauses| (num_vars, clauses))
    })
}

fn to_dimacs(num_vars: usize, clauses: &[Vec<i64>]) -> String {
    let mut text = format!("p cnf {} {}\n", num_vars, clauses.len());
    for clause in clauses {
        for lit in clause {
            text.push_str(&lit.to_string());
            text.push(' ');
        }
        text.push_str("0\n");
    }
    text
}

fn satisfies(assignment: &[bool], clauses: &[Vec<i64>]) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            let var = (lit.unsigned_abs() as usize) - 1;
            if lit > 0 {
                assignment[var]
            } else {
                !assignment[var]
            }
        })
    })
}

/// Exhaustive reference checker, only used for the small instances this
/// test generates.
fn brute_force_sat(num_vars: usize, clauses: &[Vec<i64>]) -> bool {
    (0u32..(1u32 << num_vars)).any(|bits| {
        let assignment: Vec<bool> = (0..num_vars).map(|i| (bits >> i) & 1 == 1).collect();
        satisfies(&assignment, clauses)
    })
}

proptest! {
    /// P1 (soundness, SAT) and P2 (soundness, UNSAT): the solver's verdict
    /// agrees with brute force, and when SAT, the returned model actually
    /// satisfies every clause.
    #[test]
    fn verdict_matches_brute_force_and_model_is_a_witness(
        (num_vars, clauses) in cnf_strategy()
    ) {
        let text = to_dimacs(num_vars, &clauses);
        let formula = dimacs::parse(text.as_bytes()).expect("generated input is well-formed");
        let expected_sat = brute_force_sat(num_vars, &clauses);

        match Solver::new(formula).solve() {
            SolveResult::Sat(model) => {
                prop_assert!(expected_sat, "solver reported SAT, brute force says UNSAT");
                for clause in &clauses {
                    let satisfied = clause.iter().any(|&lit| {
                        let var = (lit.unsigned_abs() as usize) - 1;
                        (lit > 0) == model[var].is_positive()
                    });
                    prop_assert!(satisfied, "model does not satisfy clause {:?}", clause);
                }
            }
            SolveResult::Unsat => {
                prop_assert!(!expected_sat, "solver reported UNSAT, brute force says SAT");
            }
        }
    }
}
