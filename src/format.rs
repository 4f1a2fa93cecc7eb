//! Rendering a solve outcome as DIMACS-style SAT/UNSAT output.
use std::io::{self, Write};

use crate::solver::SolveResult;

/// Writes `result` to `out` in the format described by the crate's output
/// interface: `SAT` followed by a signed, space-separated, `0`-terminated
/// assignment line, or a single `UNSAT` line.
pub fn write_result(out: &mut impl Write, result: &SolveResult) -> io::Result<()> {
    match result {
        SolveResult::Sat(model) => {
            writeln!(out, "SAT")?;
            for lit in model {
                write!(out, "{} ", lit.to_dimacs())?;
            }
            writeln!(out, "0")?;
        }
        SolveResult::Unsat => {
            writeln!(out, "UNSAT")?;
        }
    }
    Ok(())
}
