/*!
Errors and warnings raised while scanning driver files.

Each error kind lives in its own module and knows how to render itself as a
`codespan_reporting` diagnostic against the file it was found in.
*/

mod malformed_game;
mod unevaluable_expression;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use codespan_reporting::diagnostic::Diagnostic;

pub use malformed_game::MalformedGameError;
pub use unevaluable_expression::UnevaluableExpressionError;


/// Index of a file in the scan's `SourceFiles`.
pub type SourceID = usize;


pub trait ToDiagnostic {
  fn to_diagnostic(&self, file: SourceID) -> Diagnostic<SourceID>;
}


#[derive(Debug)]
pub enum Error {
  /// A path handed to the scanner is not a regular file.
  NotAFile(PathBuf),
  /// A driver file could not be read.
  Io(PathBuf, std::io::Error),
  /// The scan root is not a directory. Fatal, reported before any parsing.
  InvalidScanRoot(PathBuf),
  /// A directive argument is not arithmetic. The field is left unresolved.
  UnevaluableExpression(UnevaluableExpressionError),
  /// A game declaration with fewer than nine fields. Fails the whole file.
  MalformedGame(MalformedGameError),
}

impl Error {
  /// Whether the error fails the file it occurred in.
  pub fn is_fatal(&self) -> bool {
    !matches!(self, Error::UnevaluableExpression(_))
  }
}

impl Display for Error {
  fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
    match self {
      Error::NotAFile(path) => write!(fmt, "{} is not a file", path.display()),
      Error::Io(path, error) => write!(fmt, "could not read {}: {}", path.display(), error),
      Error::InvalidScanRoot(path) => write!(fmt, "{} is not a valid path", path.display()),
      Error::UnevaluableExpression(error) => error.fmt(fmt),
      Error::MalformedGame(error) => error.fmt(fmt),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Io(_, error) => Some(error),
      Error::UnevaluableExpression(error) => Some(error),
      Error::MalformedGame(error) => Some(error),
      Error::NotAFile(_) | Error::InvalidScanRoot(_) => None,
    }
  }
}

impl ToDiagnostic for Error {
  fn to_diagnostic(&self, file: SourceID) -> Diagnostic<SourceID> {
    match self {
      Error::UnevaluableExpression(error) => error.to_diagnostic(file),
      Error::MalformedGame(error) => error.to_diagnostic(file),
      _ => Diagnostic::error().with_message(self.to_string()),
    }
  }
}

impl From<UnevaluableExpressionError> for Error {
  fn from(error: UnevaluableExpressionError) -> Self {
    Error::UnevaluableExpression(error)
  }
}

impl From<MalformedGameError> for Error {
  fn from(error: MalformedGameError) -> Self {
    Error::MalformedGame(error)
  }
}
