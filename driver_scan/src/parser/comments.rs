
use nom::{
  branch::alt,
  bytes::complete::{
    is_not,
    tag,
    take_until,
  },
  character::complete::{
    anychar,
    char as char1,
    none_of,
  },
  combinator::{
    map,
    recognize,
    rest,
    value,
  },
  multi::many0_count,
  sequence::{
    delimited,
    pair,
    tuple,
  },
  IResult,
};


/// How `/* */` comments that cross line boundaries are treated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CommentMode {
  /// A block comment left open at the end of a line swallows the following lines until `*/`.
  Stateful,
  /// Only block comments opened and closed on the same line are removed. An unterminated `/*`
  /// stays in the line.
  LineLocal,
}

impl Default for CommentMode {
  fn default() -> Self {
    CommentMode::Stateful
  }
}


#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Piece<'a> {
  Comment,
  OpenComment,
  Text(&'a str),
}


/**
Removes comments from driver source one line at a time, replacing each comment with a single
space so that the tokens on either side of it stay apart. String and character literals are
copied through untouched, which keeps a `"//"` inside a title from being read as a comment.
*/
#[derive(Clone, Debug, Default)]
pub struct CommentScanner {
  mode     : CommentMode,
  in_block : bool, //< inside a `/* */` opened on an earlier line
}

impl CommentScanner {
  pub fn new(mode: CommentMode) -> Self {
    CommentScanner { mode, in_block: false }
  }

  pub fn in_block(&self) -> bool {
    self.in_block
  }

  /// Returns `line` without its comments, trimmed.
  pub fn clean_line(&mut self, line: &str) -> String {
    let mut cleaned = String::with_capacity(line.len());
    let mut input = line;

    if self.in_block {
      match take_until::<_, _, nom::error::Error<&str>>("*/")(input) {
        Ok((rest, _)) => {
          input = &rest[2..];
          self.in_block = false;
          cleaned.push(' ');
        }

        // The whole line is inside the comment.
        Err(_) => return String::new(),
      }
    }

    while !input.is_empty() {
      let (rest, piece) = match next_piece(input) {
        Ok(parsed) => parsed,
        Err(_) => break, // unreachable: `anychar` accepts any non-empty input
      };

      match piece {
        Piece::Comment => {
          cleaned.push(' ');
          input = rest;
        }

        Piece::OpenComment if self.mode == CommentMode::Stateful => {
          cleaned.push(' ');
          self.in_block = true;
          input = rest;
        }

        Piece::OpenComment => {
          // Keep the `/` and carry on from the `*`, like a regex scan that failed to match here.
          cleaned.push('/');
          input = &input[1..];
        }

        Piece::Text(text) => {
          cleaned.push_str(text);
          input = rest;
        }
      }
    }

    cleaned.trim().to_string()
  }
}


/// Strips the comments of a single line, without any knowledge of the lines around it.
pub fn strip_comments(line: &str) -> String {
  CommentScanner::new(CommentMode::LineLocal).clean_line(line)
}


fn next_piece(i: &str) -> IResult<&str, Piece> {
  alt((
    map(eol_comment, |_| Piece::Comment),
    map(inline_comment, |_| Piece::Comment),
    map(open_comment, |_| Piece::OpenComment),
    map(string_literal, Piece::Text),
    map(char_literal, Piece::Text),
    map(is_not("/\"'"), Piece::Text),
    map(recognize(anychar), Piece::Text),
  ))(i)
}


// region Nom Comments

// Noms eol comments through the end of the line, returning `()`.
pub fn eol_comment(i: &str) -> IResult<&str, ()> {
  value(
    (), // Output is thrown away.
    pair(tag("//"), rest),
  )(i)
}


// Noms block comments, excluding surrounding whitespace, returning `()`.
pub fn inline_comment(i: &str) -> IResult<&str, ()> {
  value(
    (),
    tuple((
      tag("/*"),
      take_until("*/"),
      tag("*/")
    )),
  )(i)
}


// Noms a block comment that is not closed on this line.
fn open_comment(i: &str) -> IResult<&str, ()> {
  value((), pair(tag("/*"), rest))(i)
}

// endregion


// region Nom Literals

fn escape_sequence(i: &str) -> IResult<&str, ()> {
  value((), pair(char1('\\'), anychar))(i)
}

/// A string: `"This, // is not a comment."`
fn string_literal(i: &str) -> IResult<&str, &str> {
  recognize(delimited(
    char1('"'),
    many0_count(alt((escape_sequence, value((), none_of("\\\""))))),
    char1('"'),
  ))(i)
}

/// A character: `'"'`
fn char_literal(i: &str) -> IResult<&str, &str> {
  recognize(delimited(
    char1('\''),
    many0_count(alt((escape_sequence, value((), none_of("\\'"))))),
    char1('\''),
  ))(i)
}

// endregion


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn removes_line_comments() {
    assert_eq!(strip_comments("GAME( 1980, foo ) // bar"), "GAME( 1980, foo )");
    assert_eq!(strip_comments("// GAME( 1980, foo )"), "");
  }

  #[test]
  fn block_comment_becomes_a_space() {
    assert_eq!(strip_comments("static/**/MACHINE_DRIVER_START"), "static MACHINE_DRIVER_START");
    assert_eq!(strip_comments("a /* one */ b /* two */ c"), "a   b   c");
  }

  #[test]
  fn literals_are_kept() {
    assert_eq!(
      strip_comments(r#"GAME( 1981, x, 0, m, i, 0, ROT0, "A // B", "C /* D */" )"#),
      r#"GAME( 1981, x, 0, m, i, 0, ROT0, "A // B", "C /* D */" )"#
    );
    assert_eq!(strip_comments(r#"c = '"'; // quote"#), r#"c = '"';"#);
    assert_eq!(strip_comments(r#"s = "a \" // b";"#), r#"s = "a \" // b";"#);
  }

  #[test]
  fn plain_lines_are_only_trimmed() {
    assert_eq!(strip_comments("   MDRV_VISIBLE_AREA(0, 255, 0, 223)  "), "MDRV_VISIBLE_AREA(0, 255, 0, 223)");
    assert_eq!(strip_comments("a / b"), "a / b");
  }

  #[test]
  fn stateful_mode_spans_lines() {
    let mut scanner = CommentScanner::new(CommentMode::Stateful);
    assert_eq!(scanner.clean_line("MACHINE_DRIVER_START( a ) /* start"), "MACHINE_DRIVER_START( a )");
    assert!(scanner.in_block());
    assert_eq!(scanner.clean_line("GAME( 1980, hidden, 0, a, a, 0, ROT0, \"x\", \"y\" )"), "");
    assert_eq!(scanner.clean_line("end */ MACHINE_DRIVER_END"), "MACHINE_DRIVER_END");
    assert!(!scanner.in_block());
  }

  #[test]
  fn line_local_mode_leaves_unterminated_comments() {
    let mut scanner = CommentScanner::new(CommentMode::LineLocal);
    assert_eq!(scanner.clean_line("a /* open // tail"), "a /* open");
    assert!(!scanner.in_block());
    assert_eq!(scanner.clean_line("GAME( 1980, kept )"), "GAME( 1980, kept )");
  }
}
