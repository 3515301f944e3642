//! Turning aligned token positions into normalized span text.
//!
//! A span starts as a list of positions into one sentence. Positions that are
//! not adjacent get a gap marker (or a comma, see [`GapRule::CommaAware`])
//! between them, then positions are resolved to tokens and the result is
//! cleaned up:
//!
//! ```text
//! positions  [2, 3, 7]          tokens: ... 2:bien 3:que ... 7:pourtant
//! marked     [2, 3, Gap, 7]
//! resolved   "bien que ... pourtant"
//! ```

use crate::utils::is_punctuation;
use crate::Language;

/// Literal token marking a discontinuity inside a span.
pub const GAP_MARKER: &str = "...";

/// Separator between the parts of a discontinuous lexicon entry.
pub const GAP_SEPARATOR: &str = " ... ";

/// How the distance between two neighbouring positions becomes a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapRule {
    /// Any distance above 1 inserts a gap marker.
    Strict,
    /// A distance of exactly 2 inserts a comma when the skipped token is a
    /// comma and a gap marker otherwise; a distance above 2 inserts a gap marker.
    CommaAware,
}

/// One element of a marked span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanItem {
    Position(usize),
    Gap,
    Comma,
}

/// Insert gap and comma markers between the positions of a span.
///
/// `positions` is sorted and de-duplicated first, then every adjacent pair is
/// inspected against `rule`. `tokens` is the sentence the positions index into.
pub fn mark_discontinuities(positions: &[usize], tokens: &[String], rule: GapRule) -> Vec<SpanItem> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut items = Vec::with_capacity(sorted.len() * 2);
    for (idx, &position) in sorted.iter().enumerate() {
        if idx > 0 {
            let previous = sorted[idx - 1];
            if let Some(marker) = marker_between(previous, position, tokens, rule) {
                items.push(marker);
            }
        }
        items.push(SpanItem::Position(position));
    }
    items
}

fn marker_between(previous: usize, next: usize, tokens: &[String], rule: GapRule) -> Option<SpanItem> {
    let distance = next - previous;
    match rule {
        GapRule::Strict if distance > 1 => Some(SpanItem::Gap),
        GapRule::Strict => None,
        GapRule::CommaAware if distance == 2 => {
            if tokens.get(previous + 1).map(String::as_str) == Some(",") {
                Some(SpanItem::Comma)
            } else {
                Some(SpanItem::Gap)
            }
        }
        GapRule::CommaAware if distance > 2 => Some(SpanItem::Gap),
        GapRule::CommaAware => None,
    }
}

/// Resolve marked positions to their literal tokens.
pub fn resolve(items: &[SpanItem], tokens: &[String]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            SpanItem::Position(position) => tokens.get(*position).cloned(),
            SpanItem::Gap => Some(GAP_MARKER.to_string()),
            SpanItem::Comma => Some(",".to_string()),
        })
        .collect()
}

/// Drop a leading and a trailing punctuation token from a multi-token span.
///
/// A gap marker left at either edge afterwards is dropped as well. Single-token
/// spans are returned unchanged.
///
/// `", weil"` → `"weil"`, `", ... weil"` → `"weil"`.
pub fn strip_edge_punctuation(mut tokens: Vec<String>) -> Vec<String> {
    if tokens.len() < 2 {
        return tokens;
    }
    if is_punctuation(&tokens[0]) {
        tokens.remove(0);
    }
    if tokens.last().map_or(false, |last| is_punctuation(last)) {
        tokens.pop();
    }
    if tokens.first().map(String::as_str) == Some(GAP_MARKER) {
        tokens.remove(0);
    } else if tokens.last().map(String::as_str) == Some(GAP_MARKER) {
        tokens.pop();
    }
    tokens
}

/// Rewrite a trailing fused preposition+article to the bare preposition.
///
/// `"en raison des"` → `"en raison de"`, `"im Gegensatz zum"` → `"im Gegensatz zu"`.
pub fn uncontract_last(mut tokens: Vec<String>, language: Language) -> Vec<String> {
    if let Some(last) = tokens.last_mut() {
        if let Some(preposition) = language.uncontract(last) {
            *last = preposition.to_string();
        }
    }
    tokens
}

/// Final text of a source-side key: resolved tokens without edge punctuation.
pub fn key_text(tokens: Vec<String>) -> String {
    strip_edge_punctuation(tokens).join(" ")
}

/// Final text of a target-side span in `language`.
///
/// Strips edge punctuation, rewrites a trailing contraction, joins, and folds
/// the `", ..."` artifact of the comma rule into a plain gap marker.
pub fn target_text(tokens: Vec<String>, language: Language) -> String {
    let tokens = uncontract_last(strip_edge_punctuation(tokens), language);
    let joined = tokens.join(" ");
    if joined.contains(", ...") {
        joined.replace(", ...", "...")
    } else {
        joined
    }
}
