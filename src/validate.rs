//! Field validators for catalog input.
//!
//! Pure predicates, no I/O. The catalog calls these before constructing an
//! entity and aborts the operation with no side effects when one fails.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::LessonKind;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct InvalidField {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Turns a predicate result into a typed failure naming the field.
pub fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), InvalidField> {
    if ok {
        Ok(())
    } else {
        Err(InvalidField { field, reason })
    }
}

/// Non-empty after trimming.
pub fn title(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Non-empty after trimming.
pub fn content(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Non-empty, letters and spaces only.
pub fn name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}

/// Plausible address shape: local part, `@`, domain with a dotted TLD.
pub fn email(s: &str) -> bool {
    EMAIL.is_match(s)
}

/// One of the known lesson kinds (`lecture`, `task`).
pub fn lesson_type(s: &str) -> bool {
    LessonKind::from_str(s).is_some()
}
