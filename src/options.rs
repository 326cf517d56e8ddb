use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use driver_scan::{CommentMode, ScanConfig};


#[derive(Debug, StructOpt)]
#[structopt(name = "arcres", about = "Screen resolution and rotation of every game of a MAME source tree.")]
pub struct Options {
  #[structopt(short, long, parse(from_os_str), required_unless = "test")]
  /// Directory holding the `*.c` driver files
  pub mamepath: Option<PathBuf>,

  #[structopt(short, long, default_value = "error")]
  /// Log level: critical, error, warning, info or debug
  pub log_level: String,

  #[structopt(short, long, default_value = " ")]
  /// Separator between the fields of a result line
  pub separator: String,

  #[structopt(short, long)]
  /// Run the built-in scenario instead of scanning a directory
  pub test: bool,

  #[structopt(long)]
  /// Strip block comments one line at a time, leaving unterminated `/*` in place
  pub line_local_comments: bool,
}

impl Options {
  pub fn level_filter(&self) -> LevelFilter {
    level_filter(&self.log_level)
  }

  pub fn scan_config(&self) -> ScanConfig {
    let comment_mode = if self.line_local_comments {
      CommentMode::LineLocal
    } else {
      CommentMode::Stateful
    };

    ScanConfig { comment_mode, ..ScanConfig::default() }
  }
}


/// Unknown names fall back to `error`. There is no critical level, so it maps to `error` too.
pub fn level_filter(name: &str) -> LevelFilter {
  match name.to_ascii_lowercase().as_str() {
    "debug" => LevelFilter::Debug,
    "info" => LevelFilter::Info,
    "warning" | "warn" => LevelFilter::Warn,
    "critical" | "error" => LevelFilter::Error,
    _ => LevelFilter::Error,
  }
}
