/*!
A scan over two small drivers held in memory. It runs the whole pipeline without touching the
file system, and `--test` prints its results.
*/

use std::path::Path;

use log::info;

use driver_scan::{Scan, ScanConfig};


/// (file name, source)
pub const DRIVERS: [(&str, &str); 2] = [
  ("smoke1.c", SMOKE1),
  ("smoke2.c", SMOKE2),
];

const SMOKE1: &str = r#"/***************************************************************************

  Smoke test driver one

***************************************************************************/

static MACHINE_DRIVER_START( m1 )
	MDRV_SCREEN_SIZE(32*8, 32*8)
	MDRV_VISIBLE_AREA(0*8, 32*8-1, 2*8, 30*8-1)
MACHINE_DRIVER_END

GAME( 1980, g1,  0,  m1, g1, 0, ROT90, "Smoke", "Game One" )
GAME( 1980, g1a, g1, m1, g1, 0, ROT90, "Smoke", "Game One (set 2)" )
"#;

const SMOKE2: &str = r#"/* Smoke test driver two: imports, a BIOS alias, and a broken game */

static MACHINE_DRIVER_START( m2 )
	MDRV_IMPORT_FROM( m1 )    /* same video as m1 */
MACHINE_DRIVER_END

static MACHINE_DRIVER_START( snes )
	MDRV_SCREEN_SIZE(256, 256)
	MDRV_VISIBLE_AREA(0, 0xff, 0, 223)
MACHINE_DRIVER_END

GAME( 1981, g2,      0, m2,  g2,  0, ROT0, "Smoke", "Game Two" )
GAME( 1992, nssgame, 0, nss, nss, 0, ROT0, "Smoke", "Game on the BIOS alias" )
GAMEX( 1982, g3,     0, m2,  g2,  0, ROT0, "Smoke", "Game Three", GAME_NOT_WORKING )
"#;


/// Parses and merges the embedded drivers.
pub fn run(config: &ScanConfig) -> Scan {
  let mut scan = Scan::new();

  for (name, source) in DRIVERS.iter() {
    scan.add_source(Path::new(name), name.to_string(), source.to_string(), config);
  }
  info!("Smoke scan: {} machines, {} games", scan.tables.machines.len(), scan.tables.games.len());

  scan
}


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn every_game_resolves() {
    let config = ScanConfig::default();
    let scan = run(&config);
    assert!(scan.failures.is_empty());
    assert!(scan.warnings.is_empty());

    let resolutions = scan.resolve(&config.aliases);
    let found: Vec<(&str, Option<&str>)> = resolutions
        .values()
        .map(|result| (result.game.as_str(), result.resolution.as_deref()))
        .collect();

    assert_eq!(found, vec![
      ("g1", Some("256x224")),
      ("g1a", Some("256x224")),
      ("g2", Some("256x224")),
      ("nssgame", Some("256x224")),
    ]);
    assert_eq!(resolutions["g1"].rotation.degrees, Some(90));
    assert_eq!(resolutions["g2"].driver, "smoke2.c");
  }
}
