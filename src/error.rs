//! The crate's error type.
use thiserror::Error;

/// Errors that can occur while reading and parsing a DIMACS CNF input, or
/// while performing the I/O needed to read it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: expected a 'p cnf <variables> <clauses>' header, got: {header:?}")]
    InvalidHeader { line: usize, header: String },

    #[error("line {line}: expected a 'c' comment or a 'p' header, got character '{found}'")]
    UnexpectedLine { line: usize, found: char },

    #[error("line {line}: expected an integer literal or clause terminator, got: {token:?}")]
    InvalidToken { line: usize, token: String },

    #[error("input ended with an unterminated clause (missing trailing '0')")]
    UnterminatedClause,

    #[error(
        "header declared {header_clause_count} clauses but the input contains {clause_count}"
    )]
    ClauseCountMismatch {
        header_clause_count: usize,
        clause_count: usize,
    },

    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
