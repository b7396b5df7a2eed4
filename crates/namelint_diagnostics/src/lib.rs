//! Diagnostics, violations and auto-fix edits.
//!
//! A rule reports a [`Violation`] at a [`TextRange`]; the violation is turned
//! into a [`Diagnostic`] carrying the rendered message and, optionally, a
//! [`Fix`] made of one or more [`Edit`]s against the original source text.

mod fix;

pub use fix::{Applicability, Edit, Fix, FixResult, apply_fixes};

use namelint_text_size::{Ranged, TextRange};

/// Whether a violation can carry an automatic fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixAvailability {
    Sometimes,
    Always,
    None,
}

/// A single kind of problem a rule can report.
pub trait Violation {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::None;

    /// The message shown to the user.
    fn message(&self) -> String;

    /// Short description of what the fix does, if one is offered.
    fn fix_title(&self) -> Option<String> {
        None
    }
}

/// Rendered form of a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    /// Type name of the violation, e.g. `BackingFieldOutsideAccessor`.
    pub name: String,
    /// The message body.
    pub body: String,
    /// Fix title, if any.
    pub suggestion: Option<String>,
}

impl<T: Violation> From<T> for DiagnosticKind {
    fn from(value: T) -> Self {
        let name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            body: value.message(),
            suggestion: value.fix_title(),
        }
    }
}

/// A violation located in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: TextRange,
    pub fix: Option<Fix>,
    /// Name of the rule that produced the diagnostic, set by the linter.
    pub rule: Option<&'static str>,
}

impl Diagnostic {
    pub fn new<T: Into<DiagnosticKind>>(kind: T, range: TextRange) -> Self {
        Self {
            kind: kind.into(),
            range,
            fix: None,
            rule: None,
        }
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn set_fix(&mut self, fix: Fix) {
        self.fix = Some(fix);
    }

    #[must_use]
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn message(&self) -> &str {
        &self.kind.body
    }

    /// The single replacement of the fix, when the fix is exactly one edit.
    pub fn replacement(&self) -> Option<&Edit> {
        match self.fix.as_ref()?.edits() {
            [edit] => Some(edit),
            _ => None,
        }
    }
}

impl Ranged for Diagnostic {
    fn range(&self) -> TextRange {
        self.range
    }
}
