/*!
Scanning a directory of driver files into global machine and game tables, and resolving every
game against them.
*/

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::{
  DriverFiles,
  GameTable,
  MachineTable,
  driver::Driver,
  error::{Error, SourceID},
  game::Rotation,
  parser::CommentMode,
  resolver::Resolver,
  tables::{ConstantTable, NameAliases},
};


/// Extension of the driver files picked up by a directory scan.
const DRIVER_EXTENSION: &str = "c";


/// Everything that tunes a scan. Read only for its whole duration.
#[derive(Clone, Debug)]
pub struct ScanConfig {
  pub comment_mode : CommentMode,
  pub constants    : ConstantTable,
  pub aliases      : NameAliases,
}

impl Default for ScanConfig {
  fn default() -> Self {
    ScanConfig {
      comment_mode: CommentMode::default(),
      constants: ConstantTable::builtin(),
      aliases: NameAliases::builtin(),
    }
  }
}


/// Machines and games of every driver merged so far.
#[derive(Debug, Default)]
pub struct Tables {
  pub machines : MachineTable,
  pub games    : GameTable,
}

impl Tables {
  /// Adds the machines and games of `driver`. On a name collision the later driver wins.
  pub fn merge(&mut self, driver: Driver) {
    for (name, machine) in driver.machines {
      if let Some(previous) = self.machines.insert(name, machine) {
        info!("machine {} from {} replaced", previous.name, previous.driver);
      }
    }

    for (name, game) in driver.games {
      if let Some(previous) = self.games.insert(name, game) {
        info!("game {} from {} replaced", previous.name, previous.driver);
      }
    }
  }

  /// Resolves every game, keyed by game name.
  pub fn resolve(&self, aliases: &NameAliases) -> Resolutions {
    let resolver = Resolver::new(&self.machines, aliases);

    self.games
        .values()
        .map(|game| {
          let resolution = resolver.resolve_game(game);
          if resolution.is_none() {
            warn!("{}: no resolution found for {}", game.driver, game.name);
          }

          let result = GameResolution {
            game: game.name.clone(),
            driver: game.driver.clone(),
            resolution: resolution.map(str::to_string),
            rotation: game.rotation.clone(),
          };
          (game.name.clone(), result)
        })
        .collect()
  }
}


/// What the scan found out about one game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameResolution {
  pub game       : String,
  pub driver     : String,          //< basename of the declaring driver file
  pub resolution : Option<String>,  //< `WIDTHxHEIGHT`, `None` when not found
  pub rotation   : Rotation,
}

/// game name -> what was found, in name order
pub type Resolutions = BTreeMap<String, GameResolution>;


/// A driver that could not be used. `file` is unset when the file was never read.
#[derive(Debug)]
pub struct Failure {
  pub path  : PathBuf,
  pub file  : Option<SourceID>,
  pub error : Error,
}


/// The outcome of scanning a set of driver files.
#[derive(Debug, Default)]
pub struct Scan {
  pub files    : DriverFiles,            //< every driver read, for diagnostics
  pub tables   : Tables,
  pub warnings : Vec<(SourceID, Error)>, //< non fatal problems, by file
  pub failures : Vec<Failure>,
  pub drivers  : usize,                  //< drivers parsed successfully
}

impl Scan {
  pub fn new() -> Self {
    Scan::default()
  }

  /**
  Reads, parses and merges one driver file. Problems are recorded, never returned: one bad file
  must not stop the scan.
  */
  pub fn add_file(&mut self, path: &Path, config: &ScanConfig) {
    if !path.is_file() {
      error!("{} is not a file", path.display());
      self.fail(path, None, Error::NotAFile(path.to_path_buf()));
      return;
    }

    let bytes = match fs::read(path) {
      Ok(bytes) => bytes,
      Err(io_error) => {
        error!("could not read {}: {}", path.display(), io_error);
        self.fail(path, None, Error::Io(path.to_path_buf(), io_error));
        return;
      }
    };

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Bytes outside UTF-8, e.g. Latin-1 credits in comments, are replaced.
    let text = match String::from_utf8(bytes) {
      Ok(text) => text,
      Err(not_utf8) => {
        warn!("{}: not valid UTF-8, invalid bytes replaced", path.display());
        String::from_utf8_lossy(not_utf8.as_bytes()).into_owned()
      }
    };

    self.add_source(path, name, text, config);
  }

  /// Parses and merges driver text that is already in memory.
  pub fn add_source(&mut self, path: &Path, name: String, text: String, config: &ScanConfig) {
    let file = self.files.add(name, text);

    let parsed = match self.files.get(file) {
      Some(source) => Driver::parse(path, source, config),
      None => return,
    };

    match parsed {
      Ok(mut driver) => {
        info!(
          "{}: {} machines, {} games",
          driver.name,
          driver.machines.len(),
          driver.games.len()
        );
        self.warnings.extend(driver.warnings.drain(..).map(|warning| (file, warning)));
        self.tables.merge(driver);
        self.drivers += 1;
      }

      Err(parse_error) => {
        error!("{}: {}", path.display(), parse_error);
        self.fail(path, Some(file), parse_error);
      }
    }
  }

  fn fail(&mut self, path: &Path, file: Option<SourceID>, error: Error) {
    self.failures.push(Failure { path: path.to_path_buf(), file, error });
  }

  pub fn resolve(&self, aliases: &NameAliases) -> Resolutions {
    self.tables.resolve(aliases)
  }
}


/// The `*.c` files directly under `root`, in path order.
pub fn driver_paths(root: &Path) -> Result<Vec<PathBuf>, Error> {
  let entries = fs::read_dir(root).map_err(|io_error| Error::Io(root.to_path_buf(), io_error))?;

  let mut paths: Vec<PathBuf> = entries
      .filter_map(|entry| entry.ok())
      .map(|entry| entry.path())
      .filter(|path| path.extension().map_or(false, |extension| extension == DRIVER_EXTENSION))
      .collect();
  paths.sort();

  Ok(paths)
}


/**
Scans every driver file of `root`. Files are processed in path order, so which of two colliding
declarations survives the merge does not depend on the file system.
*/
pub fn scan_directory(root: &Path, config: &ScanConfig) -> Result<Scan, Error> {
  if !root.is_dir() {
    return Err(Error::InvalidScanRoot(root.to_path_buf()));
  }

  let start = quanta::Instant::now();
  let mut scan = Scan::new();

  for path in driver_paths(root)? {
    scan.add_file(&path, config);
  }

  info!(
    "Parsed {} of {} drivers read ({} failed): {} machines, {} games in {:?}",
    scan.drivers,
    scan.files.len(),
    scan.failures.len(),
    scan.tables.machines.len(),
    scan.tables.games.len(),
    quanta::Instant::now().duration_since(start)
  );

  Ok(scan)
}


#[cfg(test)]
mod test {
  use super::*;

  fn add(scan: &mut Scan, name: &str, text: &str) {
    scan.add_source(Path::new(name), name.to_string(), text.to_string(), &ScanConfig::default());
  }

  #[test]
  fn last_driver_wins_on_collisions() {
    // Colliding names are replaced, not merged: the second driver's machine is the one kept.
    let mut scan = Scan::new();
    add(&mut scan, "a.c", "MACHINE_DRIVER_START( shared )\nMDRV_VISIBLE_AREA(0, 255, 0, 223)\nMACHINE_DRIVER_END\n");
    add(&mut scan, "b.c", "MACHINE_DRIVER_START( shared )\nMDRV_VISIBLE_AREA(0, 319, 0, 239)\nMACHINE_DRIVER_END\n");

    let shared = &scan.tables.machines["shared"];
    assert_eq!(shared.driver, "b.c");
    assert_eq!(shared.resolution.as_deref(), Some("320x240"));
  }

  #[test]
  fn failed_driver_is_recorded_and_skipped() {
    let mut scan = Scan::new();
    add(&mut scan, "bad.c", "MACHINE_DRIVER_START( m )\nMACHINE_DRIVER_END\nGAME( 1980, g )\n");
    add(&mut scan, "good.c", "GAME( 1980, g, 0, m, g, 0, ROT0, \"Maker\", \"Title\" )\n");

    assert_eq!(scan.drivers, 1);
    assert_eq!(scan.files.len(), 2);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].file, Some(0));
    assert!(scan.failures[0].error.is_fatal());
    assert!(!scan.tables.machines.contains_key("m"));
    assert!(scan.tables.games.contains_key("g"));
  }

  #[test]
  fn resolutions_report_missing_ones() {
    let mut scan = Scan::new();
    add(&mut scan, "a.c", "GAME( 1980, lost, 0, nowhere, g, 0, ROT90, \"Maker\", \"Lost\" )\n");

    let resolutions = scan.resolve(&NameAliases::default());
    let lost = &resolutions["lost"];
    assert_eq!(lost.resolution, None);
    assert_eq!(lost.driver, "a.c");
    assert_eq!(lost.rotation.degrees, Some(90));
  }

  #[test]
  fn warnings_are_kept_by_file() {
    let mut scan = Scan::new();
    add(&mut scan, "a.c", "GAME( 1980, g, 0, m, g, 0, ROT0, \"Maker\", \"Title\" )\n");
    add(&mut scan, "b.c", "MACHINE_DRIVER_START( m )\nMDRV_SCREEN_SIZE(W, 240)\nMACHINE_DRIVER_END\n");

    assert_eq!(scan.warnings.len(), 1);
    assert_eq!(scan.warnings[0].0, 1);
  }

  #[test]
  fn missing_file_is_a_failure() {
    let mut scan = Scan::new();
    scan.add_file(Path::new("/nonexistent/driver.c"), &ScanConfig::default());
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].file, None);
    assert!(matches!(scan.failures[0].error, Error::NotAFile(_)));
  }
}
