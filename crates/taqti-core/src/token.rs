// Phonetic token types shared between the tokenizer and the scanner.

/// Classification of a transliteration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Consonant unit (`k`, `kh`, `;t`, ...).
    Consonant,
    /// Short vowel unit (`a`, `i`, `u`).
    ShortVowel,
    /// Long vowel unit (`aa`, `ii`, `e`, `ai`, ...).
    LongVowel,
    /// Nasalization marker (`;n`).
    Nasalization,
    /// Word boundary.
    Space,
}

impl TokenKind {
    /// True for short and long vowel units.
    pub fn is_vowel(self) -> bool {
        matches!(self, TokenKind::ShortVowel | TokenKind::LongVowel)
    }
}

/// One transliteration unit of a phrase, with its source text and the
/// character offset at which it began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The transliteration unit as written (`"kh"`, `"aa"`, `";n"`, ...).
    pub text: String,
    /// Classification of the unit.
    pub kind: TokenKind,
    /// Character offset of the unit within the source phrase.
    pub pos: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_new() {
        let tok = Token::new(TokenKind::Consonant, "kh", 3);
        assert_eq!(tok.kind, TokenKind::Consonant);
        assert_eq!(tok.text, "kh");
        assert_eq!(tok.pos, 3);
    }

    #[test]
    fn vowel_kinds() {
        assert!(TokenKind::ShortVowel.is_vowel());
        assert!(TokenKind::LongVowel.is_vowel());
        assert!(!TokenKind::Consonant.is_vowel());
        assert!(!TokenKind::Nasalization.is_vowel());
        assert!(!TokenKind::Space.is_vowel());
    }
}
