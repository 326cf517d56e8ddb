use std::fmt::{Display, Formatter};

use log::{debug, warn};

use crate::{
  Imports,
  error::{Error, UnevaluableExpressionError},
  parser::{Directive, LinePattern, evaluate, extract_section, round_resolution, source::Line},
  tables::ConstantTable,
};


/**
One `MACHINE_DRIVER_START( name ) ... MACHINE_DRIVER_END` block.

Only a visible area gives a machine its own resolution. `width` and `height` stay at `0` until
one is evaluated, and `resolution` is only set when both are positive. The screen size is kept
for reference but never used to resolve a game.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Machine {
  pub name          : String,
  pub driver        : String,       //< basename of the declaring driver file
  pub screen_width  : Option<i64>,  //< from `MDRV_SCREEN_SIZE`
  pub screen_height : Option<i64>,
  pub offset_x      : Option<i64>,  //< `MDRV_VISIBLE_AREA` arguments, in order
  pub area_x        : Option<i64>,
  pub offset_y      : Option<i64>,
  pub area_y        : Option<i64>,
  pub width         : i64,          //< 0 when unresolved
  pub height        : i64,          //< 0 when unresolved
  pub resolution    : Option<String>,
  pub imports       : Imports,      //< `MDRV_IMPORT_FROM` targets, in order
}

impl Machine {
  /// A machine with no geometry and no imports.
  pub fn new(name: &str, driver: &str) -> Self {
    Machine {
      name: name.to_string(),
      driver: driver.to_string(),
      ..Machine::default()
    }
  }

  /**
  Finds the section of `name` among the cleaned `lines` of its driver and reads its directives.
  Arguments that cannot be evaluated are pushed onto `warnings` and leave their field unresolved;
  the rest of the section is still read.
  */
  pub fn parse(
    name      : &str,
    driver    : &str,
    lines     : &[Line],
    constants : &ConstantTable,
    warnings  : &mut Vec<Error>,
  ) -> Machine {
    let mut machine = Machine::new(name, driver);
    let section = extract_section(lines, name, LinePattern::MachineStart, LinePattern::MachineEnd);

    if section.is_empty() {
      warn!("{}: no section found for machine {}", driver, name);
      return machine;
    }

    for line in section {
      let text = constants.apply(driver, &line.text);
      let directive = match Directive::recognize(&text) {
        Some(directive) => directive,
        None => continue,
      };
      debug!("{}: {} line {}: {} {:?}", driver, name, line.index + 1, directive.kind().name(), directive);

      let mut warn_at = |error: UnevaluableExpressionError| {
        let error = error.located(name, line);
        warn!("{}:{}: {}", driver, line.index + 1, error);
        warnings.push(error.into());
      };
      let mut evaluate_at = |expression: &str| -> Option<i64> {
        evaluate(expression).map_err(&mut warn_at).ok()
      };

      match directive {
        Directive::ImportFrom(imported) => machine.imports.push(imported),

        Directive::ScreenSize([width, height]) => {
          machine.screen_width = evaluate_at(&width);
          machine.screen_height = evaluate_at(&height);
        }

        Directive::VisibleArea([offset_x, area_x, offset_y, area_y]) => {
          machine.offset_x = evaluate_at(&offset_x);
          machine.area_x = evaluate_at(&area_x);
          machine.offset_y = evaluate_at(&offset_y);
          machine.area_y = evaluate_at(&area_y);

          let width = span_length(machine.offset_x, machine.area_x).unwrap_or_else(|error| {
            warn_at(error);
            0
          });
          let height = span_length(machine.offset_y, machine.area_y).unwrap_or_else(|error| {
            warn_at(error);
            0
          });
          machine.set_geometry(width, height);
        }
      }
    }

    machine
  }

  fn set_geometry(&mut self, width: i64, height: i64) {
    self.width = width;
    self.height = height;

    self.resolution = if self.has_geometry() {
      Some(format!("{}x{}", self.width, self.height))
    } else {
      None
    };
  }

  /// Whether the machine has a resolution of its own.
  pub fn has_geometry(&self) -> bool {
    self.width > 0 && self.height > 0
  }
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "name: {} - driver: {}", self.name, self.driver)
  }
}


/// Pixel count between an offset and an inclusive end, or 0 when either is unknown.
fn span_length(offset: Option<i64>, area: Option<i64>) -> Result<i64, UnevaluableExpressionError> {
  match (offset, area) {
    (Some(offset), Some(area)) => {
      area.checked_sub(offset)
          .and_then(round_resolution)
          .ok_or_else(|| {
            UnevaluableExpressionError::new(format!("{} - {}", area, offset), "visible area overflows")
          })
    }
    _ => Ok(0),
  }
}
