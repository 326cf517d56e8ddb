use std::fs;

use tempfile::TempDir;

use driver_scan::{CommentMode, Error, ScanConfig, driver_paths, scan_directory};


const DRIVER_ONE: &str = "\
static MACHINE_DRIVER_START( m1 )
  MDRV_SCREEN_SIZE(32*8, 32*8)
  MDRV_VISIBLE_AREA(0*8, 32*8-1, 2*8, 30*8-1)
MACHINE_DRIVER_END

GAME( 1980, g1, 0, m1, g1, 0, ROT0, \"A\", \"B\" )
";

const DRIVER_TWO: &str = "\
static MACHINE_DRIVER_START( m2 )
  MDRV_IMPORT_FROM( m1 )
MACHINE_DRIVER_END

GAME( 1981, g2, 0, m2, g2, 0, ROT90, \"A\", \"C\" )
";


fn corpus(files: &[(&str, &str)]) -> TempDir {
  let dir = tempfile::tempdir().unwrap();
  for (name, text) in files {
    fs::write(dir.path().join(name), text).unwrap();
  }
  dir
}


#[test]
fn two_file_corpus_resolves_across_files() {
  let dir = corpus(&[("one.c", DRIVER_ONE), ("two.c", DRIVER_TWO)]);
  let config = ScanConfig::default();
  let scan = scan_directory(dir.path(), &config).unwrap();

  assert_eq!(scan.drivers, 2);
  assert!(scan.failures.is_empty());

  let resolutions = scan.resolve(&config.aliases);
  assert_eq!(resolutions.len(), 2);
  assert_eq!(resolutions["g1"].resolution.as_deref(), Some("256x224"));
  assert_eq!(resolutions["g1"].driver, "one.c");
  assert_eq!(resolutions["g2"].resolution.as_deref(), Some("256x224"));
  assert_eq!(resolutions["g2"].rotation.degrees, Some(90));
}

#[test]
fn invalid_scan_root() {
  let dir = corpus(&[("one.c", DRIVER_ONE)]);

  let missing = dir.path().join("nowhere");
  match scan_directory(&missing, &ScanConfig::default()) {
    Err(Error::InvalidScanRoot(path)) => assert_eq!(path, missing),
    other => panic!("expected an invalid scan root, got {:?}", other.map(|scan| scan.drivers)),
  }

  let file = dir.path().join("one.c");
  assert!(matches!(scan_directory(&file, &ScanConfig::default()), Err(Error::InvalidScanRoot(_))));
}

#[test]
fn malformed_driver_does_not_stop_the_scan() {
  let dir = corpus(&[
    ("a_broken.c", "GAME( 1980, broken, 0, m1 )\n"),
    ("one.c", DRIVER_ONE),
    ("two.c", DRIVER_TWO),
  ]);
  let config = ScanConfig::default();
  let scan = scan_directory(dir.path(), &config).unwrap();

  assert_eq!(scan.drivers, 2);
  assert_eq!(scan.failures.len(), 1);
  assert_eq!(scan.failures[0].path, dir.path().join("a_broken.c"));
  assert!(matches!(scan.failures[0].error, Error::MalformedGame(_)));

  let resolutions = scan.resolve(&config.aliases);
  assert!(!resolutions.contains_key("broken"));
  assert_eq!(resolutions["g2"].resolution.as_deref(), Some("256x224"));
}

#[test]
fn later_file_wins_a_name_collision() {
  let replacement = "\
MACHINE_DRIVER_START( m1 )
  MDRV_VISIBLE_AREA(0, 319, 0, 239)
MACHINE_DRIVER_END
";
  let dir = corpus(&[("one.c", DRIVER_ONE), ("zzz.c", replacement)]);
  let config = ScanConfig::default();
  let scan = scan_directory(dir.path(), &config).unwrap();

  assert_eq!(scan.tables.machines["m1"].driver, "zzz.c");
  assert_eq!(scan.resolve(&config.aliases)["g1"].resolution.as_deref(), Some("320x240"));
}

#[test]
fn only_c_files_are_scanned() {
  let dir = corpus(&[
    ("one.c", DRIVER_ONE),
    ("one.h", DRIVER_TWO),
    ("notes.txt", DRIVER_TWO),
  ]);
  fs::create_dir(dir.path().join("sub.c")).unwrap();

  let paths = driver_paths(dir.path()).unwrap();
  let names: Vec<&str> = paths
      .iter()
      .filter_map(|path| path.file_name())
      .filter_map(|name| name.to_str())
      .collect();
  assert_eq!(names, vec!["one.c", "sub.c"]);

  let scan = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
  assert_eq!(scan.drivers, 1);
  assert!(!scan.tables.games.contains_key("g2"));
  assert!(matches!(scan.failures[0].error, Error::NotAFile(_)));
}

#[test]
fn block_comments_spanning_lines() {
  let driver = "\
/*
static MACHINE_DRIVER_START( m1 )
  MDRV_VISIBLE_AREA(0, 319, 0, 239)
MACHINE_DRIVER_END
*/
static MACHINE_DRIVER_START( m1 )
  MDRV_VISIBLE_AREA(0, 255, 0, 223)
MACHINE_DRIVER_END

GAME( 1980, g1, 0, m1, g1, 0, ROT0, \"A\", \"B\" )
";
  let dir = corpus(&[("one.c", driver)]);

  let stateful = ScanConfig::default();
  let scan = scan_directory(dir.path(), &stateful).unwrap();
  assert_eq!(scan.resolve(&stateful.aliases)["g1"].resolution.as_deref(), Some("256x224"));

  // Per line stripping leaves the commented out block visible, and it comes first.
  let line_local = ScanConfig { comment_mode: CommentMode::LineLocal, ..ScanConfig::default() };
  let scan = scan_directory(dir.path(), &line_local).unwrap();
  assert_eq!(scan.resolve(&line_local.aliases)["g1"].resolution.as_deref(), Some("320x240"));
}

#[test]
fn empty_directory() {
  let dir = tempfile::tempdir().unwrap();
  let scan = scan_directory(dir.path(), &ScanConfig::default()).unwrap();
  assert_eq!(scan.drivers, 0);
  assert!(scan.failures.is_empty());
  assert!(scan.resolve(&Default::default()).is_empty());
}

#[test]
fn latin1_bytes_do_not_fail_the_driver() {
  let dir = tempfile::tempdir().unwrap();
  let mut bytes = b"/* (c) 1980 Maker \xa9 */\n".to_vec();
  bytes.extend_from_slice(DRIVER_ONE.as_bytes());
  fs::write(dir.path().join("one.c"), bytes).unwrap();

  let config = ScanConfig::default();
  let scan = scan_directory(dir.path(), &config).unwrap();

  assert_eq!(scan.drivers, 1);
  assert!(scan.failures.is_empty());
  assert_eq!(scan.resolve(&config.aliases)["g1"].resolution.as_deref(), Some("256x224"));
}
