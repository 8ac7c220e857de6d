//! Keyword highlighting of product names.
//!
//! Matches are wrapped in `<strong>` tags. Keywords are literal and
//! case-insensitive, and the emphasis tags themselves are never searched, so
//! markup added by an earlier keyword is never corrupted. Any other
//! angle-bracket text is ordinary name text. Distinct keywords that overlap
//! can still nest (`<strong><strong>..`).

use regex::{Regex, RegexBuilder};

pub const EMPHASIS_OPEN: &str = "<strong>";
pub const EMPHASIS_CLOSE: &str = "</strong>";

/// Compiled highlight set.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    patterns: Vec<Regex>,
}

impl Highlighter {
    /// Compile `keywords`. Empty keywords and case-insensitive duplicates
    /// are dropped; the first spelling wins.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut patterns = Vec::new();
        for keyword in keywords.iter().map(AsRef::as_ref) {
            let folded = keyword.to_lowercase();
            if keyword.is_empty() || seen.contains(&folded) {
                continue;
            }
            match RegexBuilder::new(&regex::escape(keyword))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => tracing::warn!("Skipping highlight keyword '{keyword}': {e}"),
            }
            seen.push(folded);
        }
        Self { patterns }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Apply every keyword, in order, to `name`.
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        self.patterns
            .iter()
            .fold(name.to_string(), |text, pattern| wrap_outside_tags(&text, pattern))
    }
}

/// Wrap every case-insensitive occurrence of each keyword in `name`.
#[must_use]
pub fn highlight_matches<S: AsRef<str>>(keywords: &[S], name: &str) -> String {
    Highlighter::new(keywords).apply(name)
}

fn wrap_outside_tags(text: &str, pattern: &Regex) -> String {
    let replacement = format!("{EMPHASIS_OPEN}$0{EMPHASIS_CLOSE}");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((start, tag)) = next_emphasis_tag(rest) {
        out.push_str(&pattern.replace_all(&rest[..start], replacement.as_str()));
        out.push_str(tag);
        rest = &rest[start + tag.len()..];
    }
    out.push_str(&pattern.replace_all(rest, replacement.as_str()));
    out
}

/// Position of the first emphasis tag in `text`. Other angle-bracket text is
/// part of the name.
fn next_emphasis_tag(text: &str) -> Option<(usize, &'static str)> {
    [EMPHASIS_OPEN, EMPHASIS_CLOSE]
        .into_iter()
        .filter_map(|tag| text.find(tag).map(|start| (start, tag)))
        .min_by_key(|&(start, _)| start)
}

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// Split highlighted markup into plain and emphasized runs.
///
/// Only the emphasis tags are interpreted; nesting depth collapses to a
/// single emphasis level.
#[must_use]
pub fn emphasis_segments(highlighted: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut depth = 0usize;
    let mut rest = highlighted;

    let mut push = |text: &str, emphasized: bool| {
        if text.is_empty() {
            return;
        }
        match segments.last_mut() {
            Some(last) if last.emphasized == emphasized => last.text.push_str(text),
            _ => segments.push(Segment {
                text: text.to_string(),
                emphasized,
            }),
        }
    };

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(EMPHASIS_OPEN) {
            depth += 1;
            rest = after;
        } else if let Some(after) = rest.strip_prefix(EMPHASIS_CLOSE) {
            depth = depth.saturating_sub(1);
            rest = after;
        } else {
            let first = rest.chars().next().map_or(1, char::len_utf8);
            let next_tag = rest[first..]
                .find('<')
                .map_or(rest.len(), |offset| offset + first);
            push(&rest[..next_tag], depth > 0);
            rest = &rest[next_tag..];
        }
    }
    segments
}
