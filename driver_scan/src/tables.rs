/*!
Hand maintained lookup tables.

Some driver files size their screens with `#define`d constants that a line oriented scan cannot
see. `ConstantTable` substitutes literal values for those identifiers, per driver file, before a
machine line is matched. `NameAliases` maps machine names that games use but that are filed
under another name. Both are read only for the whole scan.
*/

use std::borrow::Cow;
use std::collections::HashMap;

use regex::{NoExpand, Regex};


type Constants = &'static [(&'static str, &'static str)]; //< (identifier, literal) pairs

const EXIDY440_CONSTANTS: Constants = &[
  ("HBSTART", "320"),
  ("VBSTART", "240"),
];

/// driver file -> constants to substitute in it
static CONSTANT_SUBSTITUTIONS: phf::Map<&'static str, Constants> = phf_map! {
  "exidy440.c" => EXIDY440_CONSTANTS,
};

/// alternate machine name -> the machine it is filed under
static MACHINE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
  "nss" => "snes",
  "stvbios" => "stv",
};


#[derive(Clone, Debug)]
struct Substitution {
  identifier : Regex,  //< the identifier, matched as a whole word
  literal    : String,
}


/// Per driver file substitutions of unresolvable preprocessor constants.
#[derive(Clone, Debug, Default)]
pub struct ConstantTable {
  files: HashMap<String, Vec<Substitution>>,
}

impl ConstantTable {
  /// The built in table.
  pub fn builtin() -> Self {
    CONSTANT_SUBSTITUTIONS
        .entries()
        .fold(ConstantTable::default(), |table, (driver, constants)| {
          constants
              .iter()
              .fold(table, |table, (identifier, literal)| table.with_constant(driver, identifier, literal))
        })
  }

  pub fn with_constant(mut self, driver: &str, identifier: &str, literal: &str) -> Self {
    // An escaped identifier between word boundaries is always a valid regex.
    let pattern = format!(r"\b{}\b", regex::escape(identifier));
    if let Ok(identifier) = Regex::new(&pattern) {
      self.files
          .entry(driver.to_string())
          .or_default()
          .push(Substitution { identifier, literal: literal.to_string() });
    }
    self
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Replaces every whole-word occurrence of a known constant of `driver` in `line`.
  pub fn apply<'l>(&self, driver: &str, line: &'l str) -> Cow<'l, str> {
    let substitutions = match self.files.get(driver) {
      Some(substitutions) => substitutions,
      None => return Cow::Borrowed(line),
    };

    substitutions.iter().fold(Cow::Borrowed(line), |text, substitution| {
      if substitution.identifier.is_match(&text) {
        let literal = NoExpand(substitution.literal.as_str());
        Cow::Owned(substitution.identifier.replace_all(&text, literal).into_owned())
      } else {
        text
      }
    })
  }
}


/// Canonical names for machine names that games refer to by an alias.
#[derive(Clone, Debug, Default)]
pub struct NameAliases {
  aliases: HashMap<String, String>,
}

impl NameAliases {
  /// The built in table.
  pub fn builtin() -> Self {
    MACHINE_ALIASES
        .entries()
        .fold(NameAliases::default(), |aliases, (alias, canonical)| aliases.with_alias(alias, canonical))
  }

  pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
    self.aliases.insert(alias.to_string(), canonical.to_string());
    self
  }

  /// The canonical name of `name`, which is `name` itself when it is not an alias.
  pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
    self.aliases.get(name).map(String::as_str).unwrap_or(name)
  }
}


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn substitutes_whole_identifiers_for_the_right_file() {
    let table = ConstantTable::default().with_constant("a.c", "WIDTH", "320");

    assert_eq!(table.apply("a.c", "MDRV_SCREEN_SIZE(WIDTH, 240)"), "MDRV_SCREEN_SIZE(320, 240)");
    assert_eq!(table.apply("a.c", "MDRV_SCREEN_SIZE(WIDTH2, 240)"), "MDRV_SCREEN_SIZE(WIDTH2, 240)");
    assert_eq!(table.apply("b.c", "MDRV_SCREEN_SIZE(WIDTH, 240)"), "MDRV_SCREEN_SIZE(WIDTH, 240)");
  }

  #[test]
  fn unknown_files_are_borrowed() {
    let table = ConstantTable::builtin();
    assert!(matches!(table.apply("unknown.c", "MDRV_VISIBLE_AREA(HBSTART)"), Cow::Borrowed(_)));
  }

  #[test]
  fn builtin_constants() {
    let table = ConstantTable::builtin();
    assert!(!table.is_empty());
    assert_eq!(
      table.apply("exidy440.c", "MDRV_VISIBLE_AREA(0, HBSTART-1, 0, VBSTART-1)"),
      "MDRV_VISIBLE_AREA(0, 320-1, 0, 240-1)"
    );
  }

  #[test]
  fn aliases() {
    let aliases = NameAliases::builtin();
    assert_eq!(aliases.canonical("nss"), "snes");
    assert_eq!(aliases.canonical("galaxian"), "galaxian");
  }
}
