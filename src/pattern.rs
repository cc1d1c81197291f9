//! Route template parsing and positional URI matching.

use std::collections::HashMap;

/// Parameters extracted from a matched URI, keyed by placeholder name.
///
/// Caller-supplied parameters are merged into this map by the container,
/// with caller-supplied keys winning on collision.
pub type Params = HashMap<String, String>;

/// How literal segments are compared during matching.
///
/// Applied uniformly across every pattern in a [`NavigationMap`](crate::NavigationMap);
/// placeholder bindings always preserve the URI segment's original case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Literal segments must match byte-for-byte.
    Sensitive,
    /// Literal segments are compared with ASCII case folding.
    Insensitive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed route template: an ordered sequence of literal and `{Name}`
/// placeholder segments.
///
/// Matching is single-pass and positional. There are no wildcards, optional
/// segments, or backtracking: a URI matches iff the segment counts are equal
/// and every literal segment compares equal under the configured
/// [`CaseSensitivity`]. Placeholders always match and bind the URI segment's
/// value under their name.
///
/// Trailing slashes are stripped from both the template and the URI before
/// splitting, so `"fiction/"` and `"fiction"` are the same route. The empty
/// string parses to zero segments and serves as the index route.
///
/// # Example
///
/// ```rust
/// use crossnav::{CaseSensitivity, RoutePattern};
///
/// let pattern = RoutePattern::parse("{Category}/{Book}");
///
/// let params = pattern
///     .match_uri("fiction/0001", CaseSensitivity::Sensitive)
///     .unwrap();
/// assert_eq!(params["Category"], "fiction");
/// assert_eq!(params["Book"], "0001");
///
/// assert!(pattern.match_uri("fiction", CaseSensitivity::Sensitive).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a route template.
    ///
    /// A segment wrapped in `{}` with a non-empty name is a placeholder;
    /// anything else, including a bare `{}`, is a literal. Parsing never
    /// fails.
    pub fn parse(template: &str) -> Self {
        let segments = split_segments(template)
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) if !name.is_empty() => Segment::Placeholder(name.to_string()),
                    _ => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        RoutePattern {
            template: template.to_string(),
            segments,
        }
    }

    /// The template this pattern was parsed from, verbatim.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Number of segments in the parsed template.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Match a concrete URI against this pattern.
    ///
    /// Returns the bound placeholder parameters on a match, or `None` when
    /// the URI does not fit. Pure and deterministic: the same inputs always
    /// produce the same outcome, with no side effects.
    pub fn match_uri(&self, uri: &str, case: CaseSensitivity) -> Option<Params> {
        let parts: Vec<&str> = split_segments(uri).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Placeholder(name) => {
                    params.insert(name.clone(), part.to_string());
                }
                Segment::Literal(literal) => {
                    let equal = match case {
                        CaseSensitivity::Sensitive => literal == part,
                        CaseSensitivity::Insensitive => literal.eq_ignore_ascii_case(part),
                    };
                    if !equal {
                        return None;
                    }
                }
            }
        }

        Some(params)
    }
}

/// Normalize trailing slashes and split on `/`.
///
/// The empty string yields no segments rather than one empty segment.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_end_matches('/');
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
