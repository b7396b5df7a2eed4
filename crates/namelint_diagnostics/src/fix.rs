use get_size2::GetSize;
use namelint_text_size::{Ranged, TextRange, TextSize};

use crate::Diagnostic;

/// How safe it is to apply a fix without review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, GetSize, is_macro::Is)]
pub enum Applicability {
    /// Shown to the user, never applied.
    DisplayOnly,
    /// May change behaviour; applied only on request.
    Unsafe,
    /// Preserves behaviour.
    Safe,
}

/// A text edit: replace `range` with `content`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, GetSize)]
pub struct Edit {
    range: TextRange,
    content: Option<String>,
}

impl Edit {
    pub fn range_replacement(content: String, range: TextRange) -> Self {
        Self {
            range,
            content: if content.is_empty() {
                None
            } else {
                Some(content)
            },
        }
    }

    pub fn insertion(content: String, at: TextSize) -> Self {
        Self::range_replacement(content, TextRange::empty(at))
    }

    pub fn deletion(start: TextSize, end: TextSize) -> Self {
        Self {
            range: TextRange::new(start, end),
            content: None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty() && self.content.is_some()
    }
}

impl Ranged for Edit {
    fn range(&self) -> TextRange {
        self.range
    }
}

/// A set of edits that together resolve one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, GetSize)]
pub struct Fix {
    edits: Vec<Edit>,
    applicability: Applicability,
}

impl Fix {
    pub fn safe_edit(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            applicability: Applicability::Safe,
        }
    }

    pub fn unsafe_edit(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            applicability: Applicability::Unsafe,
        }
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn applicability(&self) -> Applicability {
        self.applicability
    }

    fn min_start(&self) -> TextSize {
        self.edits
            .iter()
            .map(Ranged::start)
            .min()
            .unwrap_or_default()
    }
}

/// Outcome of [`apply_fixes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixResult {
    pub output: String,
    pub applied: usize,
    /// Fixes dropped because they overlapped an already applied fix.
    pub skipped: usize,
}

/// Applies every fix with at least `min_applicability`, in source order.
///
/// A fix whose edits overlap an earlier applied edit is skipped as a whole;
/// running the linter again picks it up against the updated text.
pub fn apply_fixes(
    source: &str,
    diagnostics: &[Diagnostic],
    min_applicability: Applicability,
) -> FixResult {
    let mut fixes: Vec<&Fix> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .filter(|fix| fix.applicability() >= min_applicability)
        .collect();
    fixes.sort_by_key(|fix| fix.min_start());
    fixes.dedup();

    let mut output = String::with_capacity(source.len());
    let mut last = TextSize::default();
    let mut applied = 0;
    let mut skipped = 0;

    for fix in fixes {
        let mut edits: Vec<&Edit> = fix.edits().iter().collect();
        edits.sort_by_key(|edit| edit.start());

        if edits.first().is_some_and(|edit| edit.start() < last) {
            skipped += 1;
            continue;
        }

        for edit in edits {
            output.push_str(&source[last.to_usize()..edit.start().to_usize()]);
            if let Some(content) = edit.content() {
                output.push_str(content);
            }
            last = edit.end();
        }
        applied += 1;
    }

    output.push_str(&source[last.to_usize()..]);

    FixResult {
        output,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticKind;

    fn diagnostic_with(edit: Edit) -> Diagnostic {
        let kind = DiagnosticKind {
            name: "Test".into(),
            body: "test".into(),
            suggestion: None,
        };
        Diagnostic::new(kind, edit.range()).with_fix(Fix::safe_edit(edit))
    }

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_apply_replacement_and_insertion() {
        let source = "namespace N { const a = 1; }";
        let diagnostics = vec![
            diagnostic_with(Edit::range_replacement("A".into(), range(20, 21))),
            diagnostic_with(Edit::insertion("export ".into(), TextSize::new(14))),
        ];

        let result = apply_fixes(source, &diagnostics, Applicability::Safe);
        assert_eq!(result.output, "namespace N { export const A = 1; }");
        assert_eq!(result.applied, 2);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_overlapping_fix_is_skipped() {
        let source = "get fooBar() {}";
        let diagnostics = vec![
            diagnostic_with(Edit::range_replacement("foo_bar".into(), range(4, 10))),
            diagnostic_with(Edit::range_replacement("FooBar".into(), range(4, 10))),
        ];

        let result = apply_fixes(source, &diagnostics, Applicability::Safe);
        assert_eq!(result.output, "get foo_bar() {}");
        assert_eq!(result.applied, 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_unsafe_fix_respects_threshold() {
        let source = "abc";
        let kind = DiagnosticKind {
            name: "Test".into(),
            body: "test".into(),
            suggestion: None,
        };
        let diagnostics = vec![
            Diagnostic::new(kind, range(0, 1))
                .with_fix(Fix::unsafe_edit(Edit::range_replacement("X".into(), range(0, 1)))),
        ];

        assert_eq!(apply_fixes(source, &diagnostics, Applicability::Safe).output, "abc");
        assert_eq!(apply_fixes(source, &diagnostics, Applicability::Unsafe).output, "Xbc");
    }

    #[test]
    fn test_applicability_is_macro() {
        assert!(Applicability::Safe.is_safe());
        assert!(!Applicability::Unsafe.is_safe());
        assert!(Applicability::DisplayOnly.is_display_only());
    }
}
