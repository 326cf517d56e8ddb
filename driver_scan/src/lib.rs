/*!

Utilities to scan a directory of MAME driver sources and work out the screen resolution of every
game they declare.

Recognition is line oriented: each line of a driver file is cleaned of comments, then matched
against a small closed grammar of machine blocks, game declarations and the three machine
directives we care about (`MDRV_IMPORT_FROM`, `MDRV_SCREEN_SIZE` and `MDRV_VISIBLE_AREA`). A game's
resolution is read from its machine, or from the first machine along the import chain that has a
visible area.

*/
#[macro_use]
extern crate phf;

mod error;
mod parser;
mod tables;
mod machine;
mod game;
mod driver;
mod resolver;
mod scan;

use std::collections::HashMap;

use smallvec::SmallVec;

pub use error::{Error, MalformedGameError, SourceID, ToDiagnostic, UnevaluableExpressionError};
pub use parser::{
  CommentMode,
  CommentScanner,
  Directive,
  DirectiveKind,
  LinePattern,
  evaluate,
  extract_section,
  round_resolution,
  strip_comments,
  source::{Line, SourceFile, SourceFiles},
};
pub use tables::{ConstantTable, NameAliases};
pub use machine::Machine;
pub use game::{Game, Rotation};
pub use driver::Driver;
pub use resolver::Resolver;
pub use scan::{Failure, GameResolution, Resolutions, Scan, ScanConfig, Tables, driver_paths, scan_directory};

pub type DriverFiles = SourceFiles<String, String>;     //< Source code database
pub type MachineTable = HashMap<String, Machine>; //< machine name -> machine
pub type GameTable = HashMap<String, Game>;       //< game name -> game
pub type Imports = SmallVec<[String; 2]>;         //< Ordered names of imported machines
