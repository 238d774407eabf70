// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges or already sanitized.

use std::fmt;

// =============================================================================
// DisplayText
// =============================================================================

/// Archive-provided text made safe for display.
///
/// Titles and explanations come from an external source and are interpolated
/// into on-screen content, so markup is neutralized on construction:
/// - tags (`<b>`, `</a>`, `<!-- -->`) are removed
/// - the common character entities are decoded to plain characters
/// - control characters are dropped
/// - whitespace runs collapse to a single space
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText(String);

impl DisplayText {
    /// Neutralizes `raw` into displayable text.
    #[must_use]
    pub fn neutralize(raw: &str) -> Self {
        let stripped = strip_tags(raw);
        let decoded = decode_entities(&stripped);

        let mut out = String::with_capacity(decoded.len());
        let mut pending_space = false;
        for ch in decoded.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
            } else if !ch.is_control() {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
            }
        }
        Self(out)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// HTML element names removed by [`strip_tags`].
///
/// Archive explanations use a small set of inline tags. Anything else between
/// angle brackets is treated as prose, as in "mass <M and radius> R".
const KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "b", "big", "blockquote", "br", "center", "cite", "code", "dd", "div", "dl",
    "dt", "em", "embed", "font", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "iframe", "img",
    "li", "link", "meta", "object", "ol", "p", "pre", "q", "s", "script", "small", "span",
    "strike", "strong", "style", "sub", "sup", "svg", "table", "td", "th", "tr", "tt", "u", "ul",
];

/// Length of the tag starting right after a `<`, including the closing `>`.
///
/// Matches comments, declarations and elements from [`KNOWN_TAGS`], opening
/// or closing. Returns `None` for anything else.
fn tag_len(after: &str) -> Option<usize> {
    if let Some(comment) = after.strip_prefix("!--") {
        return comment.find("-->").map(|end| 3 + end + 3);
    }
    if after.starts_with('!') || after.starts_with('?') {
        return after.find('>').map(|end| end + 1);
    }

    let name_start = usize::from(after.starts_with('/'));
    let rest = &after[name_start..];
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let name = rest[..name_len].to_ascii_lowercase();
    if !KNOWN_TAGS.contains(&name.as_str()) {
        return None;
    }

    let tail = &rest[name_len..];
    let boundary = tail
        .chars()
        .next()
        .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace());
    if !boundary {
        return None;
    }
    tail.find('>').map(|end| name_start + name_len + end + 1)
}

/// Removes HTML tags, leaving other `<...>` spans in place.
///
/// An unterminated tag is kept literally.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match tag_len(after) {
            Some(len) => {
                // Tags separate words; keep a boundary so "a<br>b" reads "a b".
                out.push(' ');
                rest = &after[len..];
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entities(raw: &str) -> String {
    const ENTITIES: [(&str, &str); 7] = [
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
        // Last, so "&amp;lt;" decodes to "&lt;" and not "<".
        ("&amp;", "&"),
    ];

    let mut out = raw.to_string();
    for (entity, plain) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, plain);
        }
    }
    out
}

// =============================================================================
// Preview Size Bounds
// =============================================================================

/// Bounds for the decoded preview size, in pixels along the longest edge.
pub mod preview_bounds {
    /// Minimum preview edge.
    pub const MIN: u32 = 128;
    /// Maximum preview edge.
    pub const MAX: u32 = 4096;
    /// Default edge for grid thumbnails, a little over the tile width.
    pub const DEFAULT: u32 = 384;
    /// Default edge for the image shown in the detail view.
    pub const DETAIL_DEFAULT: u32 = 1280;
}

// =============================================================================
// PreviewSize
// =============================================================================

/// Longest edge of a downscaled archive image.
///
/// Archive images are often several thousand pixels wide; they are decoded
/// once and shrunk to this size before reaching the GPU. Grid thumbnails
/// and the detail image use separate sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize(u32);

impl PreviewSize {
    /// Creates a new preview size, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(preview_bounds::MIN, preview_bounds::MAX))
    }

    /// Returns the value in pixels.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self(preview_bounds::DEFAULT)
    }
}

// =============================================================================
// Span Bounds
// =============================================================================

/// Bounds for the default range span, in days before today.
pub mod span_bounds {
    /// Minimum span (today only).
    pub const MIN: u32 = 0;
    /// Maximum span. The archive rejects very large ranges.
    pub const MAX: u32 = 100;
    /// Default span: nine days back plus today.
    pub const DEFAULT: u32 = 9;
}

/// Number of days before today covered by the range selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanDays(u32);

impl SpanDays {
    /// Creates a new span, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(span_bounds::MIN, span_bounds::MAX))
    }

    /// Returns the value in days.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for SpanDays {
    fn default() -> Self {
        Self(span_bounds::DEFAULT)
    }
}
