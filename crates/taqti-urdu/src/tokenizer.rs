// Longest-match segmentation of romanized Urdu into transliteration units.
//
// The transliteration scheme uses ASCII digraphs for aspirates (`kh`,
// `bh`), a `;`/`:`/`.` prefix for retroflex and loan consonants (`;t`,
// `:z`, `.s`), doubled letters for long vowels (`aa`, `ii`), and `((`/`))`
// for the glottal stop and its silent closer. Whitespace collapses into
// single word-boundary tokens.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use taqti_core::{Token, TokenKind};

/// Error type for phrase segmentation.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// The phrase contains a character no transliteration unit starts with.
    #[error("unknown transliteration symbol {symbol:?} at character {position}")]
    UnknownSymbol { symbol: char, position: usize },
}

/// Longest transliteration unit, in characters.
const MAX_UNIT_LEN: usize = 3;

/// The transliteration unit inventory with each unit's classification.
static UNITS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // long vowels
    for unit in ["aa", "ii", "uu", "e", "o", "ai", "au", "-e", "-o-"] {
        m.insert(unit, TokenKind::LongVowel);
    }
    // short vowels
    for unit in ["a", "i", "u"] {
        m.insert(unit, TokenKind::ShortVowel);
    }
    // nasalization marker
    m.insert(";n", TokenKind::Nasalization);
    // consonants
    for unit in [
        "'", "((", "))", "b", "bh", "ch", "chh", "d", "dh", "f", "g", "gh", "h", "j", "jh", "k",
        "kh", "l", "m", "n", "p", "ph", "q", "r", "s", "sh", "t", "th", "v", "y", "z", "zh", ";d",
        ";dh", ";g", ";h", ";r", ";rh", ";s", ";t", ";th", ";x", ";z", ":n", ":t", ":z", ".s",
        ".z",
    ] {
        m.insert(unit, TokenKind::Consonant);
    }
    m
});

/// Segment a romanized phrase into transliteration tokens.
///
/// Units are matched greedily, longest first, so `aa` wins over `a a` and
/// `chh` over `ch h`. Runs of whitespace become a single `Space` token;
/// leading and trailing whitespace produces no token.
pub fn tokenize(phrase: &str) -> Result<Vec<Token>, TokenizeError> {
    let chars: Vec<char> = phrase.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if !tokens.is_empty() && i < chars.len() {
                tokens.push(Token::new(TokenKind::Space, " ", start));
            }
            continue;
        }

        let mut matched = None;
        for len in (1..=MAX_UNIT_LEN.min(chars.len() - i)).rev() {
            let unit: String = chars[i..i + len].iter().collect();
            if let Some(&kind) = UNITS.get(unit.as_str()) {
                matched = Some((unit, kind, len));
                break;
            }
        }
        match matched {
            Some((unit, kind, len)) => {
                tokens.push(Token::new(kind, unit, i));
                i += len;
            }
            None => {
                return Err(TokenizeError::UnknownSymbol { symbol: chars[i], position: i });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn longest_unit_wins() {
        let toks = tokenize("chhaa").unwrap();
        assert_eq!(texts(&toks), vec!["chh", "aa"]);
        assert_eq!(toks[0].kind, TokenKind::Consonant);
        assert_eq!(toks[1].kind, TokenKind::LongVowel);
    }

    #[test]
    fn prefixed_consonants_and_nasalization() {
        let toks = tokenize("me;n").unwrap();
        assert_eq!(texts(&toks), vec!["m", "e", ";n"]);
        assert_eq!(toks[2].kind, TokenKind::Nasalization);

        let toks = tokenize(";thiik").unwrap();
        assert_eq!(texts(&toks), vec![";th", "ii", "k"]);
    }

    #[test]
    fn whitespace_collapses_to_single_space_token() {
        let toks = tokenize("dil  se").unwrap();
        assert_eq!(texts(&toks), vec!["d", "i", "l", " ", "s", "e"]);
        assert_eq!(toks[3].kind, TokenKind::Space);
    }

    #[test]
    fn edge_whitespace_produces_no_tokens() {
        let toks = tokenize("  dil ").unwrap();
        assert_eq!(texts(&toks), vec!["d", "i", "l"]);
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn character_positions_are_recorded() {
        let toks = tokenize("kaam").unwrap();
        assert_eq!(texts(&toks), vec!["k", "aa", "m"]);
        assert_eq!(toks[0].pos, 0);
        assert_eq!(toks[1].pos, 1);
        assert_eq!(toks[2].pos, 3);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = tokenize("dil7").unwrap_err();
        assert!(matches!(err, TokenizeError::UnknownSymbol { symbol: '7', position: 3 }));
    }

    #[test]
    fn glottal_stop_digraphs() {
        let toks = tokenize("ga))ii").unwrap();
        assert_eq!(texts(&toks), vec!["g", "a", "))", "ii"]);
    }
}
