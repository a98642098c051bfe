// Meter pattern-language front-end.
//
// Grammar: `[...]` required group, `(...)` optional group, trailing `+`
// after a group marks it repeatable, `|` inside a group separates
// alternative branches, bare runs of `=`/`-` are plain required segments.
// There is no escaping; a pattern the classifying pass cannot tile
// completely is rejected as malformed.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::MeterError;
use crate::builder::{Branch, GraphBuilder, Optionality, SegmentOptions};
use crate::graph::{BadComboTable, MeterGraph};

/// One classifying pass over the pattern string. Group bodies exclude
/// bracket characters, so mismatched nesting falls out as a tiling gap.
static PATTERN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:
            (?: (?P<required>\[[^\[\]()]*\]) | (?P<optional>\([^\[\]()]*\)) )
            (?P<repeat>\+)?
        )
        | (?P<plain>[=\-]+)
        ",
    )
    .expect("pattern regex is valid")
});

/// A classified piece of the pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A bracketed or parenthesized group.
    Group {
        /// Group body between the delimiters, `|`-separated.
        body: String,
        /// True for a paren group.
        optional: bool,
        /// True when the group carried a trailing `+`.
        repeats: bool,
        /// Character offset of the opening delimiter.
        position: usize,
    },
    /// A bare run of weight symbols.
    Plain {
        symbols: String,
        position: usize,
    },
}

impl Directive {
    fn is_optional_group(&self) -> bool {
        matches!(self, Directive::Group { optional: true, .. })
    }
}

/// Split a pattern string into directives, rejecting anything the
/// classifying pass cannot tile.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Directive>, MeterError> {
    if pattern.is_empty() {
        return Err(MeterError::EmptyPattern);
    }

    let mut directives = Vec::new();
    let mut covered = 0;
    for caps in PATTERN_RE.captures_iter(pattern) {
        let m = caps.get(0).expect("whole-match group always present");
        if m.start() != covered {
            return Err(MeterError::Malformed { position: covered });
        }
        covered = m.end();

        if let Some(body) = caps.name("required").or_else(|| caps.name("optional")) {
            let inner = &body.as_str()[1..body.as_str().len() - 1];
            if inner.is_empty() {
                return Err(MeterError::EmptyGroup { position: m.start() });
            }
            directives.push(Directive::Group {
                body: inner.to_string(),
                optional: caps.name("optional").is_some(),
                repeats: caps.name("repeat").is_some(),
                position: m.start(),
            });
        } else {
            let plain = caps.name("plain").expect("plain when no group matched");
            directives.push(Directive::Plain {
                symbols: plain.as_str().to_string(),
                position: m.start(),
            });
        }
    }
    if covered != pattern.len() {
        return Err(MeterError::Malformed { position: covered });
    }
    Ok(directives)
}

/// Compute the `ending` flag per directive.
///
/// Walking backward from the last directive, directives are ending until
/// the first non-optional one (inclusive) or index 0 is reached. Trailing
/// optional groups must each be valid termination points, since a phrase
/// may legally stop before consuming them.
fn compute_endings(directives: &[Directive]) -> Vec<bool> {
    let mut endings = vec![false; directives.len()];
    let mut i = directives.len() - 1;
    loop {
        endings[i] = true;
        if i == 0 {
            break;
        }
        i -= 1;
        if i == 0 || !directives[i].is_optional_group() {
            endings[i] = true;
            break;
        }
    }
    endings
}

/// Compile a meter pattern into an automaton, attaching bad-combination
/// constraints from `combos` as edges are created.
pub fn compile(pattern: &str, combos: BadComboTable) -> Result<MeterGraph, MeterError> {
    let directives = parse_pattern(pattern)?;
    let endings = compute_endings(&directives);
    debug!("compiling meter {:?}: {} directives", pattern, directives.len());

    let mut builder = GraphBuilder::new(combos);
    for (directive, &ending) in directives.iter().zip(endings.iter()) {
        match directive {
            Directive::Plain { symbols, .. } => {
                builder.add_segment(symbols, SegmentOptions { ending, ..Default::default() })?;
            }
            Directive::Group { body, optional, repeats, position } => {
                let optional = if *optional {
                    Optionality::Optional
                } else {
                    Optionality::NotOptional
                };
                let alternatives: Vec<&str> = body.split('|').collect();
                if alternatives.iter().any(|a| a.is_empty()) {
                    return Err(MeterError::EmptyBranch { position: *position });
                }
                if alternatives.len() == 1 {
                    builder.add_segment(
                        alternatives[0],
                        SegmentOptions { ending, repeats: *repeats, optional },
                    )?;
                } else {
                    let branches: Vec<Branch> = alternatives
                        .iter()
                        .enumerate()
                        .map(|(w, alt)| Branch {
                            ending,
                            ..Branch::new(*alt, w as u32)
                        })
                        .collect();
                    builder.add_fork(&branches, optional, *repeats)?;
                }
            }
        }
    }
    Ok(builder.finish())
}
