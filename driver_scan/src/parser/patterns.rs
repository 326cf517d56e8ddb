/*!
The closed grammar of driver lines. Every pattern is applied to a line that has already been
cleaned of comments.
*/

use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexSet};


const IMPORT_FROM_PATTERN: &str = r"\bMDRV_IMPORT_FROM\s*\(\s*(\w+)\s*\)";
const SCREEN_SIZE_PATTERN: &str = r"\bMDRV_SCREEN_SIZE\s*\(([^,]*),([^,]*)\)";
const VISIBLE_AREA_PATTERN: &str = r"\bMDRV_VISIBLE_AREA\s*\(([^,]*),([^,]*),([^,]*),([^,]*)\)";


lazy_static! {
  static ref MACHINE_START: Regex =
      Regex::new(r"^(?:static\s+)?MACHINE_DRIVER_START\s*\(\s*(\w+)\s*\)").unwrap();
  static ref MACHINE_END: Regex = Regex::new(r"^MACHINE_DRIVER_END\s*;?$").unwrap();
  static ref GAME: Regex = Regex::new(r"\bGAME[BX]?\s*\((.*)\)").unwrap();

  // Directive arguments are captured loosely: whatever sits between the commas is handed to the
  // expression evaluator, which decides whether it is arithmetic.
  static ref IMPORT_FROM: Regex = Regex::new(IMPORT_FROM_PATTERN).unwrap();
  static ref SCREEN_SIZE: Regex = Regex::new(SCREEN_SIZE_PATTERN).unwrap();
  static ref VISIBLE_AREA: Regex = Regex::new(VISIBLE_AREA_PATTERN).unwrap();

  // One pass tells which directive a line holds. Indices follow `DirectiveKind::ALL`.
  static ref DIRECTIVES: RegexSet =
      RegexSet::new(&[IMPORT_FROM_PATTERN, SCREEN_SIZE_PATTERN, VISIBLE_AREA_PATTERN]).unwrap();
}


/// Patterns that structure a driver file.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LinePattern {
  /// `static MACHINE_DRIVER_START( name )`, capturing the machine name.
  MachineStart,
  /// `MACHINE_DRIVER_END` alone on its line.
  MachineEnd,
  /// `GAME(...)`, `GAMEB(...)` or `GAMEX(...)`, capturing the whole argument list.
  Game,
}

impl LinePattern {
  fn regex(&self) -> &'static Regex {
    match self {
      LinePattern::MachineStart => &MACHINE_START,
      LinePattern::MachineEnd => &MACHINE_END,
      LinePattern::Game => &GAME,
    }
  }

  pub fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
    self.regex().captures(line)
  }

  pub fn is_match(&self, line: &str) -> bool {
    self.regex().is_match(line)
  }

  /// The first capture group, trimmed.
  pub fn capture<'t>(&self, line: &'t str) -> Option<&'t str> {
    self.captures(line)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim())
  }
}


/// The machine configuration directives we understand.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DirectiveKind {
  ImportFrom,
  ScreenSize,
  VisibleArea,
}

impl DirectiveKind {
  /// In the order they are tried against a line.
  pub const ALL: [DirectiveKind; 3] = [
    DirectiveKind::ImportFrom,
    DirectiveKind::ScreenSize,
    DirectiveKind::VisibleArea,
  ];

  fn regex(&self) -> &'static Regex {
    match self {
      DirectiveKind::ImportFrom => &IMPORT_FROM,
      DirectiveKind::ScreenSize => &SCREEN_SIZE,
      DirectiveKind::VisibleArea => &VISIBLE_AREA,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      DirectiveKind::ImportFrom => "MDRV_IMPORT_FROM",
      DirectiveKind::ScreenSize => "MDRV_SCREEN_SIZE",
      DirectiveKind::VisibleArea => "MDRV_VISIBLE_AREA",
    }
  }

  fn recognize(&self, line: &str) -> Option<Directive> {
    let captures = self.regex().captures(line)?;
    let argument = |n: usize| captures[n].trim().to_string();

    Some(
      match self {
        DirectiveKind::ImportFrom => Directive::ImportFrom(argument(1)),
        DirectiveKind::ScreenSize => Directive::ScreenSize([argument(1), argument(2)]),
        DirectiveKind::VisibleArea => {
          Directive::VisibleArea([argument(1), argument(2), argument(3), argument(4)])
        }
      }
    )
  }
}


/// A recognized directive and its raw, trimmed arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Directive {
  ImportFrom(String),           //< name of the imported machine
  ScreenSize([String; 2]),      //< width, height
  VisibleArea([String; 4]),     //< min x, max x, min y, max y
}

impl Directive {
  /// The directive `line` holds, if any. The first kind in `DirectiveKind::ALL` wins.
  pub fn recognize(line: &str) -> Option<Directive> {
    let index = DIRECTIVES.matches(line).into_iter().next()?;
    DirectiveKind::ALL[index].recognize(line)
  }

  pub fn kind(&self) -> DirectiveKind {
    match self {
      Directive::ImportFrom(_) => DirectiveKind::ImportFrom,
      Directive::ScreenSize(_) => DirectiveKind::ScreenSize,
      Directive::VisibleArea(_) => DirectiveKind::VisibleArea,
    }
  }
}
