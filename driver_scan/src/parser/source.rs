use std::ops::Range;

use codespan::Span;
use codespan_reporting::files::{Files, line_starts};

use super::{CommentMode, CommentScanner, ToSpan};


/// One line of a driver file after comment removal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
  pub index : usize,  //< zero based line number in the file
  pub text  : String, //< cleaned and trimmed text
  pub span  : Span,   //< byte range of the raw line in the file
}

impl ToSpan for Line {
  fn to_span(&self) -> Span {
    self.span
  }
}


/// A driver file: its name, its text, and where each of its lines starts.
#[derive(Debug, Clone)]
pub struct SourceFile<Name, Source> {
  /// The name of the file.
  name: Name,
  /// The source code of the file.
  source: Source,
  /// The starting byte indices in the source code.
  line_starts: Vec<usize>,
}

impl<Name, Source> SourceFile<Name, Source>
  where
      Name: std::fmt::Display,
      Source: AsRef<str>,
{
  /// Create a new source file.
  pub fn new(name: Name, source: Source) -> SourceFile<Name, Source> {
    SourceFile {
      name,
      line_starts: line_starts(source.as_ref()).collect(),
      source,
    }
  }

  /// Return the name of the file.
  pub fn name(&self) -> &Name {
    &self.name
  }

  /// Return the source of the file.
  pub fn source(&self) -> &Source {
    &self.source
  }

  /**
  Cleans every line of the file with a single `CommentScanner`, so that in
  `CommentMode::Stateful` a block comment opened on one line keeps swallowing the following lines
  until it is closed. Empty lines are kept so that `Line::index` matches the file.
  */
  pub fn cleaned_lines(&self, mode: CommentMode) -> Vec<Line> {
    let source = self.source.as_ref();
    let mut scanner = CommentScanner::new(mode);

    self.line_starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
          let end = self.line_start(index + 1).unwrap_or_else(|| source.len());
          let raw = source[start..end].trim_end_matches(|c| c == '\n' || c == '\r');

          Line {
            index,
            text: scanner.clean_line(raw),
            span: Span::new(start as u32, (start + raw.len()) as u32),
          }
        })
        .collect()
  }

  fn line_start(&self, line_index: usize) -> Option<usize> {
    use std::cmp::Ordering;

    match line_index.cmp(&self.line_starts.len()) {
      Ordering::Less => self.line_starts.get(line_index).cloned(),
      Ordering::Equal => Some(self.source.as_ref().len()),
      Ordering::Greater => None,
    }
  }
}

impl<'a, Name, Source> Files<'a> for SourceFile<Name, Source>
  where
      Name: 'a + std::fmt::Display + Clone,
      Source: 'a + AsRef<str>,
{
  type FileId = ();
  type Name = Name;
  type Source = &'a str;

  fn name(&self, (): ()) -> Option<Name> {
    Some(self.name.clone())
  }

  fn source(&self, (): ()) -> Option<&str> {
    Some(self.source.as_ref())
  }

  fn line_index(&self, (): (), byte_index: usize) -> Option<usize> {
    match self.line_starts.binary_search(&byte_index) {
      Ok(line) => Some(line),
      Err(next_line) => Some(next_line - 1),
    }
  }

  fn line_range(&self, (): (), line_index: usize) -> Option<Range<usize>> {
    let line_start = self.line_start(line_index)?;
    let next_line_start = self.line_start(line_index + 1)?;

    Some(line_start..next_line_start)
  }
}

/// All driver files read during a scan. Diagnostics refer to a file by its index here.
#[derive(Debug, Clone)]
pub struct SourceFiles<Name, Source> {
  files: Vec<SourceFile<Name, Source>>,
}

impl<Name, Source> Default for SourceFiles<Name, Source> {
  fn default() -> Self {
    SourceFiles { files: Vec::new() }
  }
}

impl<Name, Source> SourceFiles<Name, Source>
  where
      Name: std::fmt::Display,
      Source: AsRef<str>,
{
  /// Add a file to the database, returning the handle that can be used to
  /// refer to it again.
  pub fn add(&mut self, name: Name, source: Source) -> usize {
    let file_id = self.files.len();
    self.files.push(SourceFile::new(name, source));
    file_id
  }

  /// Get the file corresponding to the given id.
  pub fn get(&self, file_id: usize) -> Option<&SourceFile<Name, Source>> {
    self.files.get(file_id)
  }

  /// Number of files read so far.
  pub fn len(&self) -> usize {
    self.files.len()
  }
}

impl<'a, Name, Source> Files<'a> for SourceFiles<Name, Source>
  where
      Name: 'a + std::fmt::Display + Clone,
      Source: 'a + AsRef<str>,
{
  type FileId = usize;
  type Name = Name;
  type Source = &'a str;

  fn name(&self, file_id: usize) -> Option<Name> {
    Some(self.get(file_id)?.name().clone())
  }

  fn source(&self, file_id: usize) -> Option<&str> {
    Some(self.get(file_id)?.source().as_ref())
  }

  fn line_index(&self, file_id: usize, byte_index: usize) -> Option<usize> {
    self.get(file_id)?.line_index((), byte_index)
  }

  fn line_range(&self, file_id: usize, line_index: usize) -> Option<Range<usize>> {
    self.get(file_id)?.line_range((), line_index)
  }
}


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn cleaned_lines_keep_numbering_and_spans() {
    let file = SourceFile::new("a.c", "one // x\r\n/* two\nthree */ four\n");
    let lines = file.cleaned_lines(CommentMode::Stateful);

    // The trailing newline starts a fourth, empty line.
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].text, "one");
    assert_eq!(lines[1].text, "");
    assert_eq!(lines[2].text, "four");
    assert_eq!(lines[2].index, 2);
    assert_eq!(lines[3].text, "");
    assert_eq!(&file.source()[lines[0].span.start().to_usize()..lines[0].span.end().to_usize()], "one // x");
  }

  #[test]
  fn line_index_lookup() {
    let file = SourceFile::new("a.c", "ab\ncd\n");
    assert_eq!(file.line_index((), 0), Some(0));
    assert_eq!(file.line_index((), 4), Some(1));
    assert_eq!(file.line_range((), 1), Some(3..6));
  }
}
