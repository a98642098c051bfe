// Syllable weight classes and weight-string helpers.

/// Weight class of a node in the meter automaton, or of a matched span.
///
/// `Start` is reserved for the automaton's entry node; every node created
/// for a meter symbol is either `Long` (`=`) or `Short` (`-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightClass {
    /// Entry node of the automaton. Never a match target.
    Start,
    /// Long (heavy) syllable, written `=`.
    Long,
    /// Short (light) syllable, written `-`.
    Short,
}

impl WeightClass {
    /// The pattern-language symbol for this class.
    ///
    /// `Start` has no symbol; it renders as `0` for debug output only.
    pub fn symbol(self) -> char {
        match self {
            WeightClass::Start => '0',
            WeightClass::Long => '=',
            WeightClass::Short => '-',
        }
    }

    /// Parse a pattern-language weight symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '=' => Some(WeightClass::Long),
            '-' => Some(WeightClass::Short),
            _ => None,
        }
    }

    /// Metrical count value: a long syllable counts 2, a short counts 1.
    pub fn count_value(self) -> u32 {
        match self {
            WeightClass::Start => 0,
            WeightClass::Long => 2,
            WeightClass::Short => 1,
        }
    }
}

/// Sum the metrical count of a weight string such as `"==-"`.
///
/// Characters that are not weight symbols contribute nothing.
pub fn weight_sum(scan: &str) -> u32 {
    scan.chars()
        .filter_map(WeightClass::from_symbol)
        .map(WeightClass::count_value)
        .sum()
}
