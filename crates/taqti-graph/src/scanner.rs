// Constrained depth-first traversal of the meter automaton against a
// token stream.
//
// The scanner explores every path through the automaton that consumes the
// whole token stream and terminates at an ending node, subject to two
// best-effort pruning heuristics gated on "some complete scan already
// exists": fallback-only edges (`skip_if_matched`) are dropped, and
// short-weight successors are no longer explored. Neither heuristic is
// correctness-critical; both only trim low-value backtracking.
//
// No (node, offset) memoization is used: the same pair may be revisited
// on different paths with different accumulated histories. The worst case
// is exponential, accepted because meters and phrases are short; a
// configurable visit budget caps pathological cases.

use log::debug;
use taqti_core::{Token, WeightClass};

use crate::count::CountTarget;
use crate::graph::{MeterGraph, NodeId};

/// Which sub-grammar a matcher should apply at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightGrammar {
    /// Long-weight syllable grammar.
    Long,
    /// Short-weight syllable grammar.
    Short,
}

/// One span a matcher accepts at an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanMatch {
    /// Number of tokens consumed, starting exactly at the queried offset.
    pub token_count: usize,
    /// Label of the sub-grammar rule that produced the span.
    pub production: &'static str,
}

/// Matcher collaborator: enumerates token spans satisfying a weight
/// sub-grammar at a given offset.
pub trait WeightMatcher {
    /// All spans starting exactly at `offset` that `grammar` accepts.
    fn match_all_at(&self, tokens: &[Token], offset: usize, grammar: WeightGrammar)
    -> Vec<SpanMatch>;
}

/// Renderer collaborator: turns an accepted span into its phonemic
/// transcription. Rendering must be deterministic; a failed lookup is a
/// fatal configuration error and aborts the whole scan.
pub trait SpanRenderer {
    type Error;

    /// Render the phonemic string for a span of source tokens.
    fn render(&self, tokens: &[Token], production: &'static str) -> Result<String, Self::Error>;
}

/// One accepted span along a scan path.
#[derive(Debug, Clone)]
pub struct NodeMatch {
    /// Weight class the span realized.
    pub class: WeightClass,
    /// Automaton node the span was matched at.
    pub node_id: NodeId,
    /// Source tokens consumed by the span.
    pub tokens: Vec<Token>,
    /// Rendered phonemic transcription of the span.
    pub ipa: String,
    /// Label of the sub-grammar rule that produced the span.
    pub production: &'static str,
    /// Token offset at which the span began.
    pub token_offset: usize,
}

/// Type tag of a scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MeterKind {
    /// A meter compiled from a user-supplied pattern.
    Custom,
}

/// One complete, accepted path through the automaton.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Weight string of the path (`=`/`-` per matched node).
    pub scan: String,
    /// Accepted spans in path order.
    pub matches: Vec<NodeMatch>,
    /// Type tag.
    pub kind: MeterKind,
}

/// Default exploration budget: maximum node visits per scan call.
pub const DEFAULT_SCAN_BUDGET: usize = 100_000;

/// Options for one scan call.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Optional metrical count filter applied at completion.
    pub count: Option<CountTarget>,
    /// Exploration budget; exhausting it stops the search and returns
    /// whatever was found so far.
    pub max_visits: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            count: None,
            max_visits: DEFAULT_SCAN_BUDGET,
        }
    }
}

/// Scan-local mutable state: the completed results (also read by the two
/// pruning heuristics) and the visit budget.
struct ScanContext {
    completed: Vec<ScanResult>,
    visits: usize,
    max_visits: usize,
}

impl MeterGraph {
    /// Scan a token stream against the automaton.
    ///
    /// Returns every complete accepted path in depth-first discovery
    /// order. A phrase satisfying no path yields an empty vector; only a
    /// renderer failure is an error.
    pub fn scan<M, R>(
        &self,
        tokens: &[Token],
        matcher: &M,
        renderer: &R,
        options: &ScanOptions,
    ) -> Result<Vec<ScanResult>, R::Error>
    where
        M: WeightMatcher,
        R: SpanRenderer,
    {
        let mut ctx = ScanContext {
            completed: Vec::new(),
            visits: 0,
            max_visits: options.max_visits,
        };
        self.descend(0, 0, &[], "", tokens, matcher, renderer, options, &mut ctx)?;
        Ok(ctx.completed)
    }

    #[allow(clippy::too_many_arguments)]
    fn descend<M, R>(
        &self,
        node_id: NodeId,
        token_i: usize,
        matches: &[NodeMatch],
        so_far: &str,
        tokens: &[Token],
        matcher: &M,
        renderer: &R,
        options: &ScanOptions,
        ctx: &mut ScanContext,
    ) -> Result<(), R::Error>
    where
        M: WeightMatcher,
        R: SpanRenderer,
    {
        if ctx.visits >= ctx.max_visits {
            debug!("scan budget exhausted at node {node_id}");
            return Ok(());
        }
        ctx.visits += 1;

        for edge in self.sorted_successors(node_id) {
            if edge.skip_if_matched && !ctx.completed.is_empty() {
                debug!("skipping fallback edge {} -> {}", node_id, edge.to);
                continue;
            }

            let class = self.node(edge.to).class;
            let grammar = match class {
                WeightClass::Long => WeightGrammar::Long,
                WeightClass::Short => {
                    // Once a complete scan exists, further short-weight
                    // exploration is low-value backtracking.
                    if !ctx.completed.is_empty() {
                        debug!("skipping short successor {}", edge.to);
                        continue;
                    }
                    WeightGrammar::Short
                }
                WeightClass::Start => continue,
            };
            if edge.optional {
                debug!("considering optional edge {} -> {}", node_id, edge.to);
            }

            for span in matcher.match_all_at(tokens, token_i, grammar) {
                if let Some(prev) = matches.last() {
                    if edge.bad_combos.contains(&(prev.production, span.production)) {
                        debug!("bad combo ({}, {})", prev.production, span.production);
                        continue;
                    }
                }

                let consumed = &tokens[token_i..token_i + span.token_count];
                let ipa = renderer.render(consumed, span.production)?;

                let mut so_far = so_far.to_owned();
                so_far.push(class.symbol());
                let mut path = matches.to_vec();
                path.push(NodeMatch {
                    class,
                    node_id: edge.to,
                    tokens: consumed.to_vec(),
                    ipa,
                    production: span.production,
                    token_offset: token_i,
                });

                let new_token_i = token_i + span.token_count;
                if new_token_i == tokens.len() {
                    if !self.node(edge.to).ending {
                        continue;
                    }
                    let count_okay = options
                        .count
                        .as_ref()
                        .is_none_or(|target| target.accepts_scan(&so_far));
                    if count_okay {
                        debug!("complete scan {:?} at node {}", so_far, edge.to);
                        ctx.completed.push(ScanResult {
                            scan: so_far,
                            matches: path,
                            kind: MeterKind::Custom,
                        });
                    }
                } else {
                    self.descend(
                        edge.to,
                        new_token_i,
                        &path,
                        &so_far,
                        tokens,
                        matcher,
                        renderer,
                        options,
                        ctx,
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use taqti_core::TokenKind;

    use crate::builder::{Branch, GraphBuilder, Optionality};
    use crate::graph::BadComboTable;
    use crate::pattern::compile;

    /// Matcher over synthetic tokens. The first character of a token's
    /// text selects the grammars it satisfies (`L` long, `S` short, `B`
    /// both); an optional second character (`a`/`b`) selects the
    /// production suffix. Every span is one token.
    struct StubMatcher;

    fn production(grammar: WeightGrammar, text: &str) -> &'static str {
        let variant = text.chars().nth(1);
        match (grammar, variant) {
            (WeightGrammar::Long, Some('b')) => "l_b",
            (WeightGrammar::Long, _) => "l_a",
            (WeightGrammar::Short, Some('b')) => "s_b",
            (WeightGrammar::Short, _) => "s_a",
        }
    }

    impl WeightMatcher for StubMatcher {
        fn match_all_at(
            &self,
            tokens: &[Token],
            offset: usize,
            grammar: WeightGrammar,
        ) -> Vec<SpanMatch> {
            let Some(token) = tokens.get(offset) else {
                return Vec::new();
            };
            let head = token.text.chars().next();
            let matched = match grammar {
                WeightGrammar::Long => matches!(head, Some('L') | Some('B')),
                WeightGrammar::Short => matches!(head, Some('S') | Some('B')),
            };
            if matched {
                vec![SpanMatch { token_count: 1, production: production(grammar, &token.text) }]
            } else {
                Vec::new()
            }
        }
    }

    /// Renderer that concatenates token texts.
    struct StubRenderer;

    impl SpanRenderer for StubRenderer {
        type Error = Infallible;

        fn render(&self, tokens: &[Token], _production: &'static str) -> Result<String, Infallible> {
            Ok(tokens.iter().map(|t| t.text.as_str()).collect())
        }
    }

    fn toks(spec: &str) -> Vec<Token> {
        spec.split_whitespace()
            .enumerate()
            .map(|(i, t)| Token::new(TokenKind::Consonant, t, i))
            .collect()
    }

    fn scan(graph: &MeterGraph, tokens: &[Token], options: &ScanOptions) -> Vec<ScanResult> {
        graph.scan(tokens, &StubMatcher, &StubRenderer, options).unwrap()
    }

    #[test]
    fn plain_segment_exact_match() {
        let g = compile("==-", BadComboTable::new()).unwrap();
        let results = scan(&g, &toks("L L S"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "==-");
        assert_eq!(results[0].matches.len(), 3);
        assert_eq!(results[0].matches[0].token_offset, 0);
        assert_eq!(results[0].matches[2].token_offset, 2);
        assert_eq!(results[0].kind, MeterKind::Custom);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let g = compile("==", BadComboTable::new()).unwrap();
        assert!(scan(&g, &toks("S S"), &ScanOptions::default()).is_empty());
        // leftover tokens never complete
        assert!(scan(&g, &toks("L L L"), &ScanOptions::default()).is_empty());
        // empty phrase never completes
        assert!(scan(&g, &[], &ScanOptions::default()).is_empty());
    }

    #[test]
    fn incomplete_consumption_at_non_ending_node_fails() {
        let g = compile("==", BadComboTable::new()).unwrap();
        assert!(scan(&g, &toks("L"), &ScanOptions::default()).is_empty());
    }

    #[test]
    fn optional_group_can_be_skipped_or_taken() {
        let g = compile("(-)==", BadComboTable::new()).unwrap();

        let skipped = scan(&g, &toks("L L"), &ScanOptions::default());
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].scan, "==");

        let taken = scan(&g, &toks("S L L"), &ScanOptions::default());
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].scan, "-==");
    }

    #[test]
    fn repeating_group_consumes_k_repetitions() {
        let g = compile("[=-]+", BadComboTable::new()).unwrap();
        let results = scan(&g, &toks("L S L S L S"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "=-=-=-");
    }

    #[test]
    fn fork_prefers_first_listed_branch() {
        let g = compile("[=|-]", BadComboTable::new()).unwrap();
        // a token matching both grammars completes through the long
        // branch first; the short branch is then pruned by the
        // completed-scan heuristic
        let results = scan(&g, &toks("B"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "=");
    }

    #[test]
    fn skip_if_matched_branch_is_fallback_only() {
        let mut b = GraphBuilder::new(BadComboTable::new());
        b.add_fork(
            &[
                Branch { ending: true, ..Branch::new("==", 0) },
                Branch {
                    ending: true,
                    skip_if_matched: true,
                    ..Branch::new("=-", 1)
                },
            ],
            Optionality::NotOptional,
            false,
        )
        .unwrap();
        let g = b.finish();

        // both branches could match, but the second is fallback-only
        let results = scan(&g, &toks("L B"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "==");

        // when the preferred branch cannot match, the fallback fires
        let results = scan(&g, &toks("L S"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "=-");
    }

    #[test]
    fn short_successors_pruned_once_complete() {
        // two ending alternatives of equal shape; with "B B" the all-long
        // reading completes first and short readings are pruned
        let g = compile("[==|--]", BadComboTable::new()).unwrap();
        let results = scan(&g, &toks("B B"), &ScanOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scan, "==");
    }

    #[test]
    fn bad_combo_discards_exactly_the_forbidden_pair() {
        let mut combos = BadComboTable::new();
        combos.forbid(WeightClass::Short, WeightClass::Short, &[("s_a", "s_b")]);
        let g = compile("--", combos).unwrap();

        // (s_a, s_b) adjacent is forbidden
        assert!(scan(&g, &toks("Sa Sb"), &ScanOptions::default()).is_empty());
        // a different production on either side still matches
        assert_eq!(scan(&g, &toks("Sb Sb"), &ScanOptions::default()).len(), 1);
        assert_eq!(scan(&g, &toks("Sa Sa"), &ScanOptions::default()).len(), 1);
    }

    #[test]
    fn count_filter_restricts_completions() {
        // "B B" over (=|-)(=|-) style meter: without the pruning
        // heuristics interfering, use distinct long/short tokens
        let g = compile("(-)==", BadComboTable::new()).unwrap();
        let tokens = toks("S L L");

        let unfiltered = scan(&g, &tokens, &ScanOptions::default());
        assert_eq!(unfiltered.len(), 1);
        assert_eq!(unfiltered[0].scan, "-==");

        let hit = ScanOptions { count: Some(CountTarget::Exact(5)), ..Default::default() };
        assert_eq!(scan(&g, &tokens, &hit).len(), 1);

        let miss = ScanOptions { count: Some(CountTarget::Exact(4)), ..Default::default() };
        assert!(scan(&g, &tokens, &miss).is_empty());

        let one_of =
            ScanOptions { count: Some(CountTarget::OneOf(vec![4, 5])), ..Default::default() };
        assert_eq!(scan(&g, &tokens, &one_of).len(), 1);
    }

    #[test]
    fn visit_budget_stops_exploration() {
        let g = compile("[=-]+", BadComboTable::new()).unwrap();
        let tokens = toks("L S L S");
        let starved = ScanOptions { max_visits: 1, ..Default::default() };
        assert!(scan(&g, &tokens, &starved).is_empty());
        // a generous budget finds the repetition
        assert_eq!(scan(&g, &tokens, &ScanOptions::default()).len(), 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let g = compile("=-", BadComboTable::new()).unwrap();
        let tokens = toks("L S");
        let a = scan(&g, &tokens, &ScanOptions::default());
        let b = scan(&g, &tokens, &ScanOptions::default());
        assert_eq!(a[0].matches[0].ipa, b[0].matches[0].ipa);
        assert_eq!(a[0].matches[1].ipa, b[0].matches[1].ipa);
    }
}
