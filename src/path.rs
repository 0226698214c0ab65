//! Dotted-path addressing.
//!
//! A `DottedPath` is validated once at construction; traversal code can
//! then assume well-formed segments. Rules:
//! - non-empty, at least one segment;
//! - segments separated by '.', no empty segments (so no leading,
//!   trailing or doubled dots);
//! - '*' is reserved for registry patterns and rejected in paths.
//!
//! `PathPattern` is the registry-side form: an exact path, a prefix
//! written "a.b.*", or the global "*".

use std::fmt;

use crate::errors::StoreError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DottedPath {
    raw: String,
    segs: Vec<String>,
}

impl DottedPath {
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        let invalid = |reason: &str| StoreError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty path"));
        }
        let mut segs = Vec::new();
        for seg in s.split('.') {
            if seg.is_empty() {
                return Err(invalid("empty segment"));
            }
            if seg.contains('*') {
                return Err(invalid("'*' is only valid in registry patterns"));
            }
            segs.push(seg.to_string());
        }
        Ok(Self {
            raw: s.to_string(),
            segs,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// Dotted form of the first `n` segments (used in addressing errors).
    pub fn prefix_str(&self, n: usize) -> String {
        self.segs[..n.min(self.segs.len())].join(".")
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Registry lookup pattern: most specific wins (exact, then longest
/// "prefix.*", then "*").
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPattern {
    Exact(DottedPath),
    Prefix(DottedPath),
    Global,
}

impl PathPattern {
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        if s == "*" {
            return Ok(PathPattern::Global);
        }
        if let Some(head) = s.strip_suffix(".*") {
            let p = DottedPath::parse(head).map_err(|_| StoreError::InvalidPath {
                path: s.to_string(),
                reason: "bad prefix pattern (expected \"a.b.*\")".to_string(),
            })?;
            return Ok(PathPattern::Prefix(p));
        }
        Ok(PathPattern::Exact(DottedPath::parse(s)?))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(p) => f.write_str(p.as_str()),
            PathPattern::Prefix(p) => write!(f, "{}.*", p.as_str()),
            PathPattern::Global => f.write_str("*"),
        }
    }
}
