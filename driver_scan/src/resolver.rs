use std::collections::HashSet;

use log::{debug, warn};

use crate::{MachineTable, game::Game, tables::NameAliases};


/**
Works out resolutions by walking machine imports, depth first.

The first machine along the walk that has a resolution of its own wins; sibling imports are never
merged. Missing machines are skipped. Each machine is visited at most once per walk, so an import
cycle ends that branch unresolved instead of recursing forever.
*/
pub struct Resolver<'t> {
  machines : &'t MachineTable,
  aliases  : &'t NameAliases,
}

impl<'t> Resolver<'t> {
  pub fn new(machines: &'t MachineTable, aliases: &'t NameAliases) -> Self {
    Resolver { machines, aliases }
  }

  /// The resolution of the machine `game` runs on, after alias normalization.
  pub fn resolve_game(&self, game: &Game) -> Option<&'t str> {
    let machine = self.aliases.canonical(&game.machine);
    if machine != game.machine {
      debug!("{}: machine {} is filed as {}", game.name, game.machine, machine);
    }
    self.resolve(&[machine])
  }

  /// The first resolution found along `imports`, in order.
  pub fn resolve<S: AsRef<str>>(&self, imports: &[S]) -> Option<&'t str> {
    let mut visited = HashSet::new();
    self.resolve_from(imports, &mut visited)
  }

  fn resolve_from<S: AsRef<str>>(&self, imports: &[S], visited: &mut HashSet<&'t str>) -> Option<&'t str> {
    for name in imports {
      let name = name.as_ref();

      let (key, machine) = match self.machines.get_key_value(name) {
        Some(entry) => entry,
        None => {
          warn!("machine {} not found", name);
          continue;
        }
      };

      if !visited.insert(key.as_str()) {
        warn!("machine {} already visited, import cycle?", name);
        continue;
      }

      if let Some(resolution) = &machine.resolution {
        return Some(resolution.as_str());
      }

      if let Some(resolution) = self.resolve_from(&machine.imports, visited) {
        return Some(resolution);
      }
    }

    None
  }
}
