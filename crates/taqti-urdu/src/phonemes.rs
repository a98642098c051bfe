// Static transliteration-unit to IPA table.
//
// The table must be exhaustive for every unit the tokenizer can emit; a
// missing entry is a fatal configuration error surfaced by the renderer.
// A few composite (unit pair) keys exist for digraph-like phoneme
// sequences that single units cannot express; they are consulted before
// single-unit lookup.

use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// IPA long-vowel length marker.
pub const LENGTH_MARK: char = '\u{02D0}'; // ː

/// IPA half-long length marker, used for a long vowel realized in a
/// metrically short slot.
pub const HALF_LENGTH_MARK: char = '\u{02D1}'; // ˑ

/// Combining nasalization tilde.
pub const NASAL_MARK: char = '\u{0303}'; // ̃

/// Unit-to-IPA table.
static PHONEMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from_iter([
        (" ", " "),
        // vowels
        ("a", "ə"),
        ("aa", "aː"),
        ("i", "ɪ"),
        ("ii", "iː"),
        ("u", "ʊ"),
        ("uu", "uː"),
        ("e", "eː"),
        ("-e", "eː"),
        ("o", "oː"),
        ("-o-", "oː"),
        ("ai", "ɛː"),
        ("au", "ɔː"),
        (";n", "\u{0303}"),
        // labials and dentals
        ("b", "b"),
        ("bh", "bʱ"),
        ("p", "p"),
        ("ph", "pʰ"),
        ("m", "m"),
        ("t", "t̪"),
        ("th", "t̪ʰ"),
        ("d", "d̪"),
        ("dh", "d̪ʱ"),
        ("n", "n"),
        (":n", "n"),
        // retroflexes
        (";t", "ʈ"),
        (";th", "ʈʰ"),
        (";d", "ɖ"),
        (";dh", "ɖʱ"),
        (";r", "ɽ"),
        (";rh", "ɽʱ"),
        // affricates and sibilants
        ("ch", "tʃ"),
        ("chh", "tʃʰ"),
        ("j", "dʒ"),
        ("jh", "dʒʱ"),
        ("s", "s"),
        (";s", "s"),
        (".s", "s"),
        ("sh", "ʃ"),
        ("z", "z"),
        (";z", "z"),
        (".z", "z"),
        (":z", "z"),
        ("zh", "ʒ"),
        // velars, uvulars and laryngeals
        ("k", "k"),
        ("kh", "kʰ"),
        ("g", "g"),
        ("gh", "ɡʱ"),
        ("q", "q"),
        (";x", "x"),
        (";g", "ɣ"),
        ("h", "ɦ"),
        (";h", "ɦ"),
        // approximants and taps
        ("y", "j"),
        ("r", "ɾ"),
        ("l", "l"),
        ("v", "ʋ"),
        ("f", "f"),
        (":t", "t"),
        // orthographic marks with no segmental value
        ("'", ""),
        ("((", "ʔ"),
        ("))", ""),
    ])
});

/// Composite keys: adjacent unit pairs rendered as one phoneme.
static PHONEME_PAIRS: Lazy<HashMap<(&'static str, &'static str), &'static str>> =
    Lazy::new(|| HashMap::from_iter([((";x", "v"), "kʰ")]));

/// Look up the IPA string for a single transliteration unit.
pub fn lookup(unit: &str) -> Option<&'static str> {
    PHONEMES.get(unit).copied()
}

/// Look up the IPA string for an adjacent unit pair.
pub fn lookup_pair(first: &str, second: &str) -> Option<&'static str> {
    PHONEME_PAIRS.get(&(first, second)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn single_lookups() {
        assert_eq!(lookup("aa"), Some("aː"));
        assert_eq!(lookup(";t"), Some("ʈ"));
        assert_eq!(lookup("'"), Some(""));
        assert_eq!(lookup("xyz"), None);
    }

    #[test]
    fn pair_lookup_beats_nothing() {
        assert_eq!(lookup_pair(";x", "v"), Some("kʰ"));
        assert_eq!(lookup_pair("k", "h"), None);
    }

    #[test]
    fn table_covers_the_tokenizer_inventory() {
        // every token the tokenizer can emit must have a table entry
        let all_units = "a aa i ii u uu e o ai au ;n b bh p ph m t th d dh n \
                         ;t ;th ;d ;dh ;r ;rh ch chh j jh s ;s .s sh z ;z .z :z zh \
                         k kh g gh q ;x ;g h ;h y r l v f :n :t ' (( ))";
        for tok in tokenize(all_units).unwrap() {
            assert!(lookup(&tok.text).is_some(), "missing phoneme for {:?}", tok.text);
        }
    }
}
