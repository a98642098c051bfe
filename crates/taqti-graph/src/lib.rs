//! Meter automaton compiler and backtracking scanner.
//!
//! A meter is declared in a small pattern language (`[...]` required group,
//! `(...)` optional group, trailing `+` repeatable, `|` alternative
//! branches, bare `=`/`-` runs plain required segments). This crate
//! compiles such a declaration into a directed automaton over syllable
//! weights and scans tokenized phrases against it, enumerating every way a
//! phrase can realize the meter.
//!
//! # Architecture
//!
//! - [`graph`] -- node/edge storage and the bad-combination table
//! - [`builder`] -- segment/fork construction with optional-skip wiring
//! - [`pattern`] -- the pattern-language front-end
//! - [`scanner`] -- constrained depth-first traversal over a token stream
//! - [`count`] -- syllable-count acceptance filter
//!
//! The tokenizer and phoneme renderer are collaborators behind the
//! [`scanner::WeightMatcher`] and [`scanner::SpanRenderer`] traits; a
//! concrete Urdu implementation lives in the `taqti-urdu` crate.

pub mod builder;
pub mod count;
pub mod graph;
pub mod pattern;
pub mod scanner;

/// Error type for meter pattern compilation.
///
/// All variants are structural: the pattern is rejected as a whole and no
/// partial automaton is produced.
#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    #[error("empty meter pattern")]
    EmptyPattern,
    #[error("malformed meter pattern at character {position}")]
    Malformed { position: usize },
    #[error("empty group in meter pattern at character {position}")]
    EmptyGroup { position: usize },
    #[error("empty branch in group at character {position}")]
    EmptyBranch { position: usize },
    #[error("invalid weight symbol {symbol:?} in meter segment")]
    InvalidSymbol { symbol: char },
    #[error("meter segment has no weight symbols")]
    EmptySegment,
    #[error("fork has no branches")]
    EmptyFork,
}
