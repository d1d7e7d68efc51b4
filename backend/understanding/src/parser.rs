//! Reply parser: turns a model's free-text answer into a [`ProduceAnalysis`].
//!
//! Parsing never fails. Each field falls back to its default on malformed
//! input and the fallback is reported as a [`ParseWarning`].
//!
//! Lines are trimmed and blank lines skipped. Recognised prefixes:
//!
//! - `Produce:`: name after the first colon.
//! - `Freshness Score:`: whole value must be ASCII digits, else 0.
//! - `Expected Lifespan`: first run of digits after the label, else 0.
//! - `Key Indicators:`: starts the indicators section.
//! - `-`: a bullet, captured only inside the indicators section.
//!
//! The last occurrence of a labelled field wins. Once entered, the indicators
//! section stays open until the end of the reply: other lines inside it are
//! skipped, and later bullets are still captured.

use freshlens_core::{ParseWarning, ProduceAnalysis};
use once_cell::sync::Lazy;
use regex::Regex;

const PRODUCE_LABEL: &str = "Produce:";
const FRESHNESS_LABEL: &str = "Freshness Score:";
const LIFESPAN_LABEL: &str = "Expected Lifespan";
const INDICATORS_LABEL: &str = "Key Indicators:";

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Parser output: the analysis plus any field-level fallbacks taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub analysis: ProduceAnalysis,
    pub warnings: Vec<ParseWarning>,
}

/// Parse one model reply.
pub fn parse_reply(text: &str) -> ParsedReply {
    let mut analysis = ProduceAnalysis::default();
    let mut warnings = Vec::new();
    let mut saw_produce = false;
    let mut in_indicators = false;
    let mut stray_bullets = 0usize;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(PRODUCE_LABEL) {
            analysis.produce_name = after_colon(line).to_string();
            saw_produce = true;
        } else if line.starts_with(FRESHNESS_LABEL) {
            let raw = after_colon(line);
            analysis.freshness_score = parse_whole_number(raw).unwrap_or_else(|| {
                warnings.push(ParseWarning::NonNumericFreshness { raw: raw.to_string() });
                0
            });
        } else if let Some(rest) = line.strip_prefix(LIFESPAN_LABEL) {
            let raw = rest.split_once(':').map_or(rest, |(_, value)| value).trim();
            analysis.expected_lifespan_days = first_number(raw).unwrap_or_else(|| {
                warnings.push(ParseWarning::MissingLifespan { raw: raw.to_string() });
                0
            });
        } else if line.starts_with(INDICATORS_LABEL) {
            in_indicators = true;
        } else if line.starts_with('-') {
            if in_indicators {
                analysis.visual_indicators.push(strip_bullet(line).to_string());
            } else {
                stray_bullets += 1;
            }
        }
    }

    if !saw_produce {
        warnings.push(ParseWarning::MissingProduce);
    }
    if !in_indicators && stray_bullets > 0 {
        warnings.push(ParseWarning::IndicatorsWithoutMarker { count: stray_bullets });
    }

    ParsedReply { analysis, warnings }
}

/// Text after the first colon, trimmed. Callers only pass labelled lines.
fn after_colon(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value).trim()
}

/// `Some(n)` only when the whole value is ASCII digits that fit a `u32`.
pub fn parse_whole_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// The first run of ASCII digits anywhere in `raw`, if it fits a `u32`.
pub fn first_number(raw: &str) -> Option<u32> {
    DIGITS_RE.find(raw).and_then(|m| m.as_str().parse().ok())
}

/// Drop the bullet marker: every leading `-` and space.
fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', ' '])
}
