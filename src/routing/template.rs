//! Route templates with named, optionally-defaulted segments.
//!
//! A template like `{controller=Home}/{action=Index}/{id?}` matches a path
//! segment by segment: literals compare case-insensitively, `{name}` binds
//! the segment to `name`, `{name=Value}` binds `Value` when the caller
//! omits the segment, and `{name?}` is simply absent when omitted.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::errors::AppError;

/// Template parse failures. These are registration-time programmer errors,
/// surfaced during bootstrap before the listener starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unbalanced braces in segment {0:?}")]
    UnbalancedBrace(String),

    #[error("empty parameter name in segment {0:?}")]
    EmptyName(String),

    #[error("invalid parameter name in segment {0:?}")]
    InvalidName(String),

    #[error("duplicate parameter name {0:?}")]
    DuplicateName(String),

    #[error("required segment {0:?} follows a defaulted or optional one")]
    RequiredAfterOptional(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::internal(format!("invalid route template: {}", e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param {
        name: String,
        default: Option<String>,
        optional: bool,
    },
}

impl Segment {
    /// Whether the request may omit this segment entirely.
    fn omittable(&self) -> bool {
        matches!(
            self,
            Segment::Param {
                default: Some(_),
                ..
            } | Segment::Param { optional: true, .. }
        )
    }
}

/// Values bound from a matched path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteValues(HashMap<String, String>);

impl RouteValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parse a pattern, validating it up front.
    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut names = HashSet::new();
        let mut tail_started = false;

        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = Self::parse_segment(raw)?;

            if let Segment::Param { name, .. } = &segment {
                if !names.insert(name.clone()) {
                    return Err(TemplateError::DuplicateName(name.clone()));
                }
            }

            // Once a defaulted or optional segment appears, everything
            // after it must also be omittable or the template is ambiguous.
            if tail_started && !segment.omittable() {
                return Err(TemplateError::RequiredAfterOptional(raw.to_string()));
            }
            tail_started |= segment.omittable();

            segments.push(segment);
        }

        Ok(Self { segments })
    }

    fn parse_segment(raw: &str) -> Result<Segment, TemplateError> {
        if let Some(inner) = raw.strip_prefix('{') {
            let inner = inner
                .strip_suffix('}')
                .ok_or_else(|| TemplateError::UnbalancedBrace(raw.to_string()))?;

            if inner.contains(['{', '}']) {
                return Err(TemplateError::UnbalancedBrace(raw.to_string()));
            }

            let (name, default, optional) = if let Some(name) = inner.strip_suffix('?') {
                (name, None, true)
            } else if let Some((name, default)) = inner.split_once('=') {
                (name, Some(default.to_string()), false)
            } else {
                (inner, None, false)
            };

            if name.is_empty() {
                return Err(TemplateError::EmptyName(raw.to_string()));
            }

            // A default and the optional marker are mutually exclusive;
            // whichever was handled first must not leak into the name.
            if name.contains(['=', '?']) {
                return Err(TemplateError::InvalidName(raw.to_string()));
            }

            return Ok(Segment::Param {
                name: name.to_string(),
                default,
                optional,
            });
        }

        if raw.contains(['{', '}']) {
            return Err(TemplateError::UnbalancedBrace(raw.to_string()));
        }

        Ok(Segment::Literal(raw.to_string()))
    }

    /// Match a request path, binding named segments.
    ///
    /// Returns `None` when the path does not fit this template. Omitted
    /// defaulted segments bind their default; omitted optional segments
    /// are absent from the result.
    pub fn matches(&self, path: &str) -> Option<RouteValues> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if parts.len() > self.segments.len() {
            return None;
        }

        let mut values = RouteValues::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match (parts.get(i), segment) {
                (Some(part), Segment::Literal(lit)) => {
                    if !lit.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                (Some(part), Segment::Param { name, .. }) => values.insert(name, part),
                (
                    None,
                    Segment::Param {
                        name,
                        default: Some(default),
                        ..
                    },
                ) => values.insert(name, default),
                (None, Segment::Param { optional: true, .. }) => {}
                (None, _) => return None,
            }
        }

        Some(values)
    }
}
