use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
  GameTable,
  MachineTable,
  error::Error,
  game::Game,
  machine::Machine,
  parser::{LinePattern, source::SourceFile},
  scan::ScanConfig,
};


/// Marker of a declaration for a game that does not work. Such games are left out.
const NOT_WORKING: &str = "GAME_NOT_WORKING";


/// The machines and games declared by one driver file.
#[derive(Debug)]
pub struct Driver {
  pub name     : String,       //< basename of the file
  pub path     : PathBuf,
  pub machines : MachineTable,
  pub games    : GameTable,
  pub warnings : Vec<Error>,   //< non fatal problems, e.g. unevaluable expressions
}

impl Driver {
  /**
  Parses every machine, then every game, of `source`.

  Each machine is built once, from the first `MACHINE_DRIVER_START` naming it. A game
  declaration with fewer than nine fields fails the whole driver.
  */
  pub fn parse<S: AsRef<str>>(path: &Path, source: &SourceFile<String, S>, config: &ScanConfig) -> Result<Driver, Error> {
    let mut driver = Driver {
      name: source.name().clone(),
      path: path.to_path_buf(),
      machines: MachineTable::new(),
      games: GameTable::new(),
      warnings: Vec::new(),
    };
    debug!("Initiating a new driver ! driver: {}", driver.name);

    let lines = source.cleaned_lines(config.comment_mode);

    for line in &lines {
      let name = match LinePattern::MachineStart.capture(&line.text) {
        Some(name) => name,
        None => continue,
      };
      debug!("Found {}", line.text);

      if driver.machines.contains_key(name) {
        continue;
      }

      let machine = Machine::parse(name, &driver.name, &lines, &config.constants, &mut driver.warnings);
      info!("Adding new machine: {}", machine);
      driver.machines.insert(name.to_string(), machine);
    }

    for line in &lines {
      let arguments = match LinePattern::Game.capture(&line.text) {
        Some(arguments) => arguments,
        None => continue,
      };
      debug!("Found {}", line.text);

      if arguments.contains(NOT_WORKING) {
        warn!("{}:{}: skipping non working game: {}", driver.name, line.index + 1, arguments);
        continue;
      }

      let game = Game::from_arguments(arguments, &driver.name, line)?;
      info!("New game found: {}", game);
      driver.games.insert(game.name.clone(), game);
    }

    Ok(driver)
  }
}
