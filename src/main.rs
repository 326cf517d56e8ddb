/*!
`arcres` scans a MAME driver directory and prints the screen resolution and rotation of every
game it declares.
*/

mod options;
mod report;
mod smoke;

use std::io::{self, Write};
use std::process;

use env_logger::{Builder, Target};
use log::error;
use structopt::StructOpt;

use driver_scan::{Scan, scan_directory};

use options::Options;


fn main() {
  let options = Options::from_args();

  Builder::new()
      .filter_level(options.level_filter())
      .format_timestamp_secs()
      .target(Target::Stdout)
      .init();

  let config = options.scan_config();

  let scan: Scan = match (&options.mamepath, options.test) {
    (_, true) => smoke::run(&config),

    (Some(root), false) => match scan_directory(root, &config) {
      Ok(scan) => scan,
      Err(scan_error) => {
        error!("{}", scan_error);
        eprintln!("Error: {}", scan_error);
        process::exit(1);
      }
    },

    // structopt refuses a missing path outside of test mode
    (None, false) => process::exit(1),
  };

  if let Err(io_error) = report::emit_diagnostics(&scan) {
    error!("could not write diagnostics: {}", io_error);
  }

  let resolutions = scan.resolve(&config.aliases);
  let stdout = io::stdout();
  let mut out = stdout.lock();

  if let Err(io_error) = report::print_results(&mut out, &resolutions, &options.separator).and_then(|_| out.flush()) {
    error!("could not write results: {}", io_error);
    process::exit(1);
  }
}
