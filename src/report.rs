/*!
Printing what a scan found: one result line per game on stdout, diagnostics on stderr.
*/

use std::io::{self, Write};

use codespan_reporting::{
  diagnostic::Diagnostic,
  term::{self, Config, termcolor::{ColorChoice, StandardStream}},
};
use log::{Level, info, log_enabled};

use driver_scan::{GameResolution, Resolutions, Scan, ToDiagnostic};


/// Written in place of a resolution that could not be worked out.
pub const NOT_FOUND: &str = "not found";


/// `<game><sep><driver><sep><WIDTHxHEIGHT | not found><sep><rotation>`
pub fn format_line(result: &GameResolution, separator: &str) -> String {
  let resolution = result.resolution.as_deref().unwrap_or(NOT_FOUND);
  [
    result.game.as_str(),
    result.driver.as_str(),
    resolution,
    &result.rotation.to_string(),
  ].join(separator)
}


/// Writes one line per game, in name order, then logs how many were resolved.
pub fn print_results<W: Write>(out: &mut W, resolutions: &Resolutions, separator: &str) -> io::Result<()> {
  for result in resolutions.values() {
    writeln!(out, "{}", format_line(result, separator))?;
  }

  let resolved = resolutions.values().filter(|result| result.resolution.is_some()).count();
  let vertical = resolutions.values().filter(|result| result.rotation.is_vertical()).count();
  info!(
    "{} games resolved, {} not found, {} on a vertical monitor",
    resolved,
    resolutions.len() - resolved,
    vertical
  );

  Ok(())
}


/**
Renders the failures of `scan` against their driver sources, and its warnings when the warn level
is enabled.
*/
pub fn emit_diagnostics(scan: &Scan) -> io::Result<()> {
  let writer = StandardStream::stderr(ColorChoice::Auto);
  let config = Config::default();
  let mut writer = writer.lock();

  for failure in &scan.failures {
    let diagnostic = match failure.file {
      Some(file) => failure.error.to_diagnostic(file),
      None => Diagnostic::error().with_message(failure.error.to_string()),
    };
    term::emit(&mut writer, &config, &scan.files, &diagnostic)?;
  }

  if log_enabled!(Level::Warn) {
    for (file, warning) in &scan.warnings {
      term::emit(&mut writer, &config, &scan.files, &warning.to_diagnostic(*file))?;
    }
  }

  Ok(())
}
