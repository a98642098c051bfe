// Span transcription: phoneme-table lookup plus two fixed post-rules.

use taqti_core::{Token, TokenKind};
use taqti_graph::scanner::SpanRenderer;

use crate::phonemes::{self, HALF_LENGTH_MARK, LENGTH_MARK, NASAL_MARK};

/// Error type for phonemic rendering.
///
/// The phoneme table must be exhaustive for every token the tokenizer can
/// emit; a miss means the configuration is broken and the scan aborts.
#[derive(Debug, thiserror::Error)]
pub enum PhonemeError {
    #[error("no phoneme table entry for token {token:?}")]
    MissingPhoneme { token: String },
}

/// Renders accepted spans as IPA.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrduRenderer;

impl UrduRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }
}

impl SpanRenderer for UrduRenderer {
    type Error = PhonemeError;

    /// Concatenate the table entry for every token of the span, composite
    /// pair keys first, then apply the post-rules:
    ///
    /// 1. a trailing length mark followed by the nasal tilde swaps to
    ///    tilde-then-length (nasalization is realized before length);
    /// 2. in a short-context span (`s_` production) a trailing length
    ///    mark weakens to the half-long mark.
    ///
    /// The rules see only the span's segmental material; word-boundary
    /// tokens absorbed at the span's end are appended afterwards.
    fn render(&self, tokens: &[Token], production: &'static str) -> Result<String, PhonemeError> {
        let segmental_end = tokens
            .iter()
            .rposition(|t| t.kind != TokenKind::Space)
            .map_or(0, |p| p + 1);

        let mut ipa = String::new();
        let mut i = 0;
        while i < segmental_end {
            if i + 1 < segmental_end {
                if let Some(pair) = phonemes::lookup_pair(&tokens[i].text, &tokens[i + 1].text) {
                    ipa.push_str(pair);
                    i += 2;
                    continue;
                }
            }
            let single = phonemes::lookup(&tokens[i].text).ok_or_else(|| {
                PhonemeError::MissingPhoneme { token: tokens[i].text.clone() }
            })?;
            ipa.push_str(single);
            i += 1;
        }

        let long_nasal: String = [LENGTH_MARK, NASAL_MARK].iter().collect();
        if ipa.ends_with(&long_nasal) {
            ipa.truncate(ipa.len() - long_nasal.len());
            ipa.push(NASAL_MARK);
            ipa.push(LENGTH_MARK);
        }
        if production.starts_with("s_") && ipa.ends_with(LENGTH_MARK) {
            ipa.truncate(ipa.len() - LENGTH_MARK.len_utf8());
            ipa.push(HALF_LENGTH_MARK);
        }

        for token in &tokens[segmental_end..] {
            let space = phonemes::lookup(&token.text).ok_or_else(|| {
                PhonemeError::MissingPhoneme { token: token.text.clone() }
            })?;
            ipa.push_str(space);
        }
        Ok(ipa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn render(phrase: &str, production: &'static str) -> String {
        let tokens = tokenize(phrase).unwrap();
        UrduRenderer::new().render(&tokens, production).unwrap()
    }

    #[test]
    fn plain_concatenation() {
        assert_eq!(render("dil", "l_cvc"), "d̪ɪl");
        assert_eq!(render("kaa", "l_cvv"), "kaː");
    }

    #[test]
    fn nasal_swaps_before_length_mark() {
        // m + eː + nasal tilde: tilde attaches to the vowel, length last
        assert_eq!(render("me;n", "l_cvvn"), "me\u{0303}\u{02D0}");
    }

    #[test]
    fn short_context_weakens_final_length() {
        assert_eq!(render("kaa", "s_cvv"), "kaˑ");
        // a word boundary absorbed into the span does not mask the rule
        let tokens = tokenize("kii laaj").unwrap();
        let ipa = UrduRenderer::new().render(&tokens[..3], "s_cvv").unwrap();
        assert_eq!(ipa, "kiˑ ");
        // long-context rendering is untouched
        assert_eq!(render("kaa", "l_cvv"), "kaː");
        // no trailing length mark, nothing to weaken
        assert_eq!(render("di", "s_cv"), "d̪ɪ");
    }

    #[test]
    fn composite_pair_key_wins() {
        assert_eq!(render(";xv", "l_cvc"), "kʰ");
    }

    #[test]
    fn missing_phoneme_is_fatal() {
        use taqti_core::{Token, TokenKind};
        let bogus = vec![Token::new(TokenKind::Consonant, "??", 0)];
        let err = UrduRenderer::new().render(&bogus, "l_cvv").unwrap_err();
        assert!(matches!(err, PhonemeError::MissingPhoneme { .. }));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render("ga))ii", "l_cvv");
        let b = render("ga))ii", "l_cvv");
        assert_eq!(a, b);
    }
}
