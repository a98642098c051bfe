// MeterScanner: top-level integration point for Urdu scansion.
//
// Owns the compiled automaton and the tokenizer/matcher/renderer
// collaborators, and exposes phrase-level and token-level scan entry
// points. The automaton is read-only after construction, so one
// MeterScanner may serve scans of many phrases.

use log::debug;
use taqti_core::Token;
use taqti_graph::MeterError;
use taqti_graph::count::CountTarget;
use taqti_graph::graph::MeterGraph;
use taqti_graph::pattern;
use taqti_graph::scanner::{ScanOptions, ScanResult};

use crate::combos;
use crate::matcher::UrduWeightMatcher;
use crate::renderer::{PhonemeError, UrduRenderer};
use crate::tokenizer::{self, TokenizeError};

/// Error type for scan calls.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The phrase could not be segmented.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// A consumed token had no phoneme table entry.
    #[error(transparent)]
    Phoneme(#[from] PhonemeError),
}

/// A compiled meter plus everything needed to scan phrases against it.
pub struct MeterScanner {
    graph: MeterGraph,
    matcher: UrduWeightMatcher,
    renderer: UrduRenderer,
    options: ScanOptions,
}

impl MeterScanner {
    /// Compile a meter pattern with the default bad-combination table.
    ///
    /// Structural pattern errors reject the whole meter; no partially
    /// built scanner is returned.
    pub fn new(meter: &str) -> Result<Self, MeterError> {
        let graph = pattern::compile(meter, combos::default_table())?;
        debug!("compiled meter {:?} into {} nodes", meter, graph.node_count());
        Ok(Self {
            graph,
            matcher: UrduWeightMatcher::new(),
            renderer: UrduRenderer::new(),
            options: ScanOptions::default(),
        })
    }

    /// Set (or clear) the metrical count target.
    pub fn set_count(&mut self, count: Option<CountTarget>) {
        self.options.count = count;
    }

    /// Set the exploration budget (maximum node visits per scan).
    pub fn set_max_visits(&mut self, max_visits: usize) {
        self.options.max_visits = max_visits;
    }

    /// Access the compiled automaton.
    pub fn graph(&self) -> &MeterGraph {
        &self.graph
    }

    /// Tokenize a phrase and scan it against the meter.
    ///
    /// Results come back in depth-first discovery order. A phrase that
    /// satisfies no path yields an empty vector, not an error.
    pub fn scan_phrase(&self, phrase: &str) -> Result<Vec<ScanResult>, ScanError> {
        let tokens = tokenizer::tokenize(phrase)?;
        self.scan_tokens(&tokens)
    }

    /// Scan a pre-tokenized phrase against the meter.
    pub fn scan_tokens(&self, tokens: &[Token]) -> Result<Vec<ScanResult>, ScanError> {
        let results = self
            .graph
            .scan(tokens, &self.matcher, &self.renderer, &self.options)?;
        debug!("{} completed scans for {} tokens", results.len(), tokens.len());
        Ok(results)
    }
}
