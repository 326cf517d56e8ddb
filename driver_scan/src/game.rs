use std::fmt::{Display, Formatter};

use crate::error::MalformedGameError;
use crate::parser::ToSpan;


/// Number of leading fields of a `GAME(...)` declaration we read.
pub const GAME_FIELDS: usize = 9;


/// Screen orientation of a game as declared, e.g. `ROT90` or `ROT0|ORIENTATION_FLIP_X`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rotation {
  pub raw     : String,      //< the field as written
  pub degrees : Option<u16>, //< `None` when no `ROTn` token is present
}

impl Rotation {
  pub fn parse(field: &str) -> Rotation {
    let degrees = field
        .split('|')
        .map(str::trim)
        .find_map(|token| {
          match token {
            "ROT0" => Some(0),
            "ROT90" => Some(90),
            "ROT180" => Some(180),
            "ROT270" => Some(270),
            _ => None,
          }
        });

    Rotation {
      raw: field.to_string(),
      degrees,
    }
  }

  /// Whether the monitor stands on its side.
  pub fn is_vertical(&self) -> bool {
    matches!(self.degrees, Some(90) | Some(270))
  }
}

impl Display for Rotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.degrees {
      Some(degrees) => write!(f, "{}", degrees),
      None => write!(f, "{}", self.raw),
    }
  }
}


/// A playable title declared by `GAME(...)`, `GAMEB(...)` or `GAMEX(...)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
  pub name     : String,   //< short name, e.g. `pacman`
  pub parent   : String,   //< parent of a clone, empty when none
  pub machine  : String,   //< name of the machine the game runs on
  pub year     : String,
  pub input    : String,   //< input port descriptor
  pub init     : String,   //< driver init function, unused here
  pub rotation : Rotation,
  pub editor   : String,   //< manufacturer, quotes removed
  pub title    : String,   //< full display title, quotes removed
  pub driver   : String,   //< basename of the declaring driver file
}

impl Game {
  /**
  Builds a game from the argument list of a declaration. The list is split on commas and the
  first nine fields are taken in order: year, name, parent, machine, input, init, rotation,
  editor, title. Anything after the ninth field (the flags) is ignored.
  */
  pub fn from_arguments<S>(arguments: &str, driver: &str, span: S) -> Result<Game, MalformedGameError>
    where S: ToSpan
  {
    let fields: Vec<&str> = arguments.split(',').map(str::trim).collect();

    if fields.len() < GAME_FIELDS {
      return Err(MalformedGameError::new(arguments, fields.len(), GAME_FIELDS, span));
    }

    let parent = match fields[2] {
      "0" => "",
      parent => parent,
    };

    Ok(Game {
      year: fields[0].to_string(),
      name: fields[1].to_string(),
      parent: parent.to_string(),
      machine: fields[3].to_string(),
      input: fields[4].to_string(),
      init: fields[5].to_string(),
      rotation: Rotation::parse(fields[6]),
      editor: unquote(fields[7]).to_string(),
      title: unquote(fields[8]).to_string(),
      driver: driver.to_string(),
    })
  }

  pub fn is_clone(&self) -> bool {
    !self.parent.is_empty()
  }
}

impl Display for Game {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "name: {}", self.name)?;
    if self.is_clone() {
      write!(f, " - clone of: {}", self.parent)?;
    }
    write!(f, " - rotation: {}", self.rotation.raw)
  }
}


fn unquote(field: &str) -> &str {
  field.strip_prefix('"')
       .and_then(|inner| inner.strip_suffix('"'))
       .unwrap_or(field)
}
