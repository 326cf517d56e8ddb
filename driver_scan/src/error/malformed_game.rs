//! Malformed game declaration error data structure.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use codespan::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{SourceID, ToDiagnostic};
use crate::parser::ToSpan;

/// Error that occurs when a `GAME(...)` line has fewer fields than a declaration needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MalformedGameError {
  /// The argument list as captured.
  pub arguments: String,
  /// Number of comma separated fields found.
  pub found: usize,
  /// Number of fields required.
  pub expected: usize,
  /// Span of the declaration line.
  pub span: Span,
}

impl MalformedGameError {
  /// Constructs a new `MalformedGameError`.
  pub fn new<S>(arguments: &str, found: usize, expected: usize, span: S) -> Self
    where S: ToSpan,
  {
    MalformedGameError {
      arguments: arguments.to_string(),
      found,
      expected,
      span: span.to_span(),
    }
  }
}

impl Display for MalformedGameError {
  fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
    write!(
      fmt,
      "malformed game declaration: expected {} fields, found {}",
      self.expected,
      self.found
    )
  }
}

impl Error for MalformedGameError {}

impl ToDiagnostic for MalformedGameError {
  fn to_diagnostic(&self, file: SourceID) -> Diagnostic<SourceID> {
    let label = Label::primary(file, self.span)
        .with_message(format!("{} fields here", self.found));
    Diagnostic::error()
        .with_message(self.to_string())
        .with_labels(vec![label])
        .with_notes(vec![
          "expected: year, name, parent, machine, input, init, rotation, editor, title".to_string()
        ])
  }
}
