//! Unevaluable directive argument warning data structure.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use codespan::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{SourceID, ToDiagnostic};
use crate::parser::ToSpan;

/// Warning raised when a directive argument is not an arithmetic expression we can evaluate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnevaluableExpressionError {
  /// The argument as it appeared after constant substitution.
  pub expression: String,
  /// Why it could not be evaluated.
  pub reason: &'static str,
  /// Where in `expression` parsing stopped, when known.
  pub column: Option<usize>,
  /// The machine whose directive holds the expression.
  pub machine: Option<String>,
  /// Span of the line holding the expression.
  pub span: Span,
}

impl UnevaluableExpressionError {
  /// Constructs a new `UnevaluableExpressionError` not yet tied to a line.
  pub fn new<S: Into<String>>(expression: S, reason: &'static str) -> Self {
    UnevaluableExpressionError {
      expression: expression.into(),
      reason,
      column: None,
      machine: None,
      span: Span::initial(),
    }
  }

  pub fn at_column(mut self, column: usize) -> Self {
    self.column = Some(column);
    self
  }

  /// Ties the error to the line and machine it was found in.
  pub fn located<S: ToSpan>(mut self, machine: &str, span: S) -> Self {
    self.machine = Some(machine.to_string());
    self.span = span.to_span();
    self
  }
}

impl Display for UnevaluableExpressionError {
  fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
    write!(fmt, "unevaluable expression `{}`: {}", self.expression, self.reason)?;
    if let Some(column) = self.column {
      write!(fmt, " at column {}", column)?;
    }
    if let Some(machine) = &self.machine {
      write!(fmt, " (machine {})", machine)?;
    }
    Ok(())
  }
}

impl Error for UnevaluableExpressionError {}

impl ToDiagnostic for UnevaluableExpressionError {
  fn to_diagnostic(&self, file: SourceID) -> Diagnostic<SourceID> {
    let label = Label::primary(file, self.span).with_message(self.reason);
    Diagnostic::warning()
        .with_message(format!("unevaluable expression `{}`", self.expression))
        .with_labels(vec![label])
        .with_notes(vec!["the field is left unresolved".to_string()])
  }
}
