//! Shared types for taqti prosodic meter scansion.
//!
//! - [`weight`] -- syllable weight classes and weight-string helpers
//! - [`token`] -- phonetic tokens produced by a transliteration tokenizer

pub mod token;
pub mod weight;

pub use token::{Token, TokenKind};
pub use weight::WeightClass;
