// Rule-based long/short weight sub-grammars over transliteration tokens.
//
// A span starts exactly at the queried offset and consumes whole tokens.
// Closed-syllable rules (`l_cvc`, `l_vc`, `l_cvvc`) only apply when the
// closing consonant does not begin a following syllable, i.e. the next
// token is not a vowel. Every span absorbs word-boundary tokens that
// immediately follow it, so the next span again starts on a segmental
// unit.
//
// Production labels with the `s_` prefix mark short-context realizations;
// the renderer shortens an underlyingly long vowel in such a span.

use taqti_core::{Token, TokenKind};
use taqti_graph::scanner::{SpanMatch, WeightGrammar, WeightMatcher};

/// The Urdu long/short weight grammars.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrduWeightMatcher;

impl UrduWeightMatcher {
    /// Create a matcher.
    pub fn new() -> Self {
        Self
    }
}

fn kind_at(tokens: &[Token], i: usize) -> Option<TokenKind> {
    tokens.get(i).map(|t| t.kind)
}

/// True when the token after a candidate closing consonant does not pull
/// that consonant into the next syllable.
fn closes_syllable(tokens: &[Token], next: usize) -> bool {
    match kind_at(tokens, next) {
        None => true,
        Some(kind) => !kind.is_vowel(),
    }
}

/// Number of word-boundary tokens immediately following `i`.
fn trailing_spaces(tokens: &[Token], i: usize) -> usize {
    tokens[i..]
        .iter()
        .take_while(|t| t.kind == TokenKind::Space)
        .count()
}

impl WeightMatcher for UrduWeightMatcher {
    fn match_all_at(
        &self,
        tokens: &[Token],
        offset: usize,
        grammar: WeightGrammar,
    ) -> Vec<SpanMatch> {
        use TokenKind::{Consonant, LongVowel, Nasalization, ShortVowel};

        let k0 = kind_at(tokens, offset);
        let k1 = kind_at(tokens, offset + 1);
        let k2 = kind_at(tokens, offset + 2);

        // candidate (token_count, production) pairs before space absorption
        let mut spans: Vec<(usize, &'static str)> = Vec::new();

        match grammar {
            WeightGrammar::Long => {
                if k0 == Some(Consonant) && k1 == Some(LongVowel) {
                    if k2 == Some(Nasalization) {
                        spans.push((3, "l_cvvn"));
                    }
                    if k2 == Some(Consonant) && closes_syllable(tokens, offset + 3) {
                        spans.push((3, "l_cvvc"));
                    }
                    spans.push((2, "l_cvv"));
                }
                if k0 == Some(LongVowel) {
                    if k1 == Some(Nasalization) {
                        spans.push((2, "l_vvn"));
                    }
                    spans.push((1, "l_vv"));
                }
                if k0 == Some(Consonant)
                    && k1 == Some(ShortVowel)
                    && k2 == Some(Consonant)
                    && closes_syllable(tokens, offset + 3)
                {
                    spans.push((3, "l_cvc"));
                }
                if k0 == Some(ShortVowel)
                    && k1 == Some(Consonant)
                    && closes_syllable(tokens, offset + 2)
                {
                    spans.push((2, "l_vc"));
                }
            }
            WeightGrammar::Short => {
                if k0 == Some(Consonant) && k1 == Some(ShortVowel) {
                    spans.push((2, "s_cv"));
                }
                if k0 == Some(ShortVowel) {
                    spans.push((1, "s_v"));
                }
                // an underlyingly long vowel may fill a short slot
                if k0 == Some(Consonant) && k1 == Some(LongVowel) {
                    spans.push((2, "s_cvv"));
                }
                if k0 == Some(LongVowel) {
                    spans.push((1, "s_vv"));
                }
            }
        }

        spans
            .into_iter()
            .map(|(count, production)| SpanMatch {
                token_count: count + trailing_spaces(tokens, offset + count),
                production,
            })
            .collect()
    }
}
