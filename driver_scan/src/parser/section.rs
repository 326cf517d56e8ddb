use super::{LinePattern, source::Line};


/**
Returns the non-empty lines between the `start` line naming `target` and the next `end` line.

A line only opens the section if the identifier captured by `start` is `target` and `target`
also appears literally on the line. An empty result means the section was not found, or that it
has no content; callers cannot tell the two apart. A section left open runs to the end of the
file.
*/
pub fn extract_section<'l>(
  lines  : &'l [Line],
  target : &str,
  start  : LinePattern,
  end    : LinePattern,
) -> Vec<&'l Line> {
  let mut section = Vec::new();
  let mut in_section = false;

  for line in lines {
    if !in_section {
      in_section = start.capture(&line.text) == Some(target) && line.text.contains(target);
      continue;
    }

    if end.is_match(&line.text) {
      break;
    }

    if !line.text.is_empty() {
      section.push(line);
    }
  }

  section
}


#[cfg(test)]
mod test {
  use super::*;
  use crate::parser::{CommentMode, source::SourceFile};

  const DRIVER: &str = "\
static MACHINE_DRIVER_START( first )
  MDRV_VISIBLE_AREA(0, 255, 0, 223)
MACHINE_DRIVER_END

static MACHINE_DRIVER_START( firstborn )
  MDRV_IMPORT_FROM( first )

  // comment only
  MDRV_SCREEN_SIZE(256, 256)
MACHINE_DRIVER_END
";

  fn lines() -> Vec<Line> {
    SourceFile::new("test.c", DRIVER).cleaned_lines(CommentMode::Stateful)
  }

  fn texts(section: Vec<&Line>) -> Vec<&str> {
    section.into_iter().map(|line| line.text.as_str()).collect()
  }

  #[test]
  fn finds_only_the_named_section() {
    let lines = lines();
    let section = extract_section(&lines, "first", LinePattern::MachineStart, LinePattern::MachineEnd);
    assert_eq!(texts(section), vec!["MDRV_VISIBLE_AREA(0, 255, 0, 223)"]);
  }

  #[test]
  fn skips_empty_and_comment_lines() {
    let lines = lines();
    let section = extract_section(&lines, "firstborn", LinePattern::MachineStart, LinePattern::MachineEnd);
    assert_eq!(texts(section), vec!["MDRV_IMPORT_FROM( first )", "MDRV_SCREEN_SIZE(256, 256)"]);
    assert_eq!(
      extract_section(&lines, "firstborn", LinePattern::MachineStart, LinePattern::MachineEnd)[1].index,
      8
    );
  }

  #[test]
  fn missing_section_is_empty() {
    let lines = lines();
    assert!(extract_section(&lines, "third", LinePattern::MachineStart, LinePattern::MachineEnd).is_empty());
  }
}
