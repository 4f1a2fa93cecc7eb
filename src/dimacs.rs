//! DIMACS CNF parsing.
use std::io::Read;

use crate::clause::Clause;
use crate::cnf::CnfFormula;
use crate::error::{Error, Result};
use crate::lit::Lit;

/// Parses a DIMACS CNF formula from `input`.
///
/// Lines starting with `c` are comments. The first non-comment,
/// non-blank line must be a `p cnf <variables> <clauses>` header; the
/// token after `p` is read but not checked against the literal `cnf`.
/// After the header, whitespace-separated signed integers form clauses,
/// each terminated by a literal `0`. Parsing stops once `<clauses>`
/// clauses have been read; any remaining input is ignored.
pub fn parse(mut input: impl Read) -> Result<CnfFormula> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    parse_str(&text)
}

fn parse_str(text: &str) -> Result<CnfFormula> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (num_vars, num_clauses) = loop {
        let (line_no, line) = lines.next().ok_or(Error::InvalidHeader {
            line: 0,
            header: String::new(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('p') {
            break parse_header(line_no, trimmed)?;
        }
        return Err(Error::UnexpectedLine {
            line: line_no,
            found: trimmed.chars().next().unwrap(),
        });
    };

    let mut formula = CnfFormula::new(num_vars);
    let mut current: Vec<Lit> = Vec::new();
    let mut clauses_read = 0usize;

    'outer: for (line_no, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let value: i64 = token.parse().map_err(|_| Error::InvalidToken {
                line: line_no,
                token: token.to_string(),
            })?;
            if value == 0 {
                formula.add_clause(Clause::new(std::mem::take(&mut current)));
                clauses_read += 1;
                if clauses_read == num_clauses {
                    break 'outer;
                }
            } else {
                current.push(Lit::from_dimacs(value));
            }
        }
    }

    if clauses_read < num_clauses {
        if !current.is_empty() {
            return Err(Error::UnterminatedClause);
        }
        return Err(Error::ClauseCountMismatch {
            header_clause_count: num_clauses,
            clause_count: clauses_read,
        });
    }

    Ok(formula)
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize)> {
    let mut tokens = text.split_whitespace();
    let keyword = tokens.next();
    let _format = tokens.next();
    let num_vars = tokens.next();
    let num_clauses = tokens.next();

    let invalid = || Error::InvalidHeader {
        line,
        header: text.to_string(),
    };

    match (keyword, _format, num_vars, num_clauses) {
        (Some("p"), Some(_), Some(vars), Some(clauses)) => {
            let num_vars = vars.parse().map_err(|_| invalid())?;
            let num_clauses = clauses.parse().map_err(|_| invalid())?;
            Ok((num_vars, num_clauses))
        }
        _ => Err(invalid()),
    }
}
