//! Urdu language module for taqti prosodic meter scansion.
//!
//! Turns a romanized Urdu/Hindi phrase into transliteration tokens,
//! provides the long/short weight sub-grammars the scanner consults, and
//! renders accepted spans as IPA.
//!
//! - [`tokenizer`] -- longest-match segmentation into transliteration units
//! - [`matcher`] -- rule-based long/short weight sub-grammars
//! - [`phonemes`] -- static unit-to-IPA table
//! - [`renderer`] -- span transcription with the fixed post-rules
//! - [`combos`] -- default forbidden adjacent-production pairs
//! - [`handle`] -- the top-level [`MeterScanner`](handle::MeterScanner)

pub mod combos;
pub mod handle;
pub mod matcher;
pub mod phonemes;
pub mod renderer;
pub mod tokenizer;

pub use handle::{MeterScanner, ScanError};
