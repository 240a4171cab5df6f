use std::sync::Mutex;

use serde::Serialize;

/// Sink for warnings and errors raised while auditing.
///
/// Built-in strategies report through this trait so that any build context can
/// host them.
pub trait Diagnostics {
    fn warn(&self, message: String);
    fn error(&self, message: String);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Build context for one audit run.
#[derive(Debug, Default)]
pub struct AuditContext {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl AuditContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, severity: Severity, message: String) {
        // A poisoned lock only means another strategy panicked mid-push.
        let mut diagnostics = match self.diagnostics.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        diagnostics.push(Diagnostic { severity, message });
    }

    pub fn has_errors(&self) -> bool {
        let diagnostics = match self.diagnostics.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self.diagnostics.into_inner() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Diagnostics for AuditContext {
    fn warn(&self, message: String) {
        self.push(Severity::Warning, message);
    }

    fn error(&self, message: String) {
        self.push(Severity::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let ctx = AuditContext::new();
        ctx.warn("first".to_string());
        ctx.error("second".to_string());
        assert!(ctx.has_errors());
        let diags = ctx.into_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[1].message, "second");
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let ctx = AuditContext::new();
        ctx.warn("only a warning".to_string());
        assert!(!ctx.has_errors());
    }
}
