//! # Content Transformer Module
//!
//! Line-level helpers for taking a file apart and putting it back together
//! around a new header. Lines keep their original terminators, so the body
//! that follows the header is written back byte for byte. The header and its
//! separator take the body's line terminator, and a leading byte-order mark
//! stays at the very start of the file.

use crate::templates::COMMENT_PREFIX;

/// UTF-8 byte-order mark.
pub const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Splits a leading byte-order mark off the content.
///
/// Returns the mark (or `""`) and the rest of the content.
pub fn split_byte_order_mark(content: &str) -> (&str, &str) {
  match content.strip_prefix(BYTE_ORDER_MARK) {
    Some(rest) => (BYTE_ORDER_MARK, rest),
    None => ("", content),
  }
}

/// Line terminator of the first terminated line, if any.
pub fn detect_line_ending(lines: &[&str]) -> Option<&'static str> {
  let line = lines.iter().find(|line| line.ends_with('\n'))?;
  Some(if line.ends_with("\r\n") { "\r\n" } else { "\n" })
}

/// Splits content into lines, each keeping its trailing `\n` (or `\r\n`).
///
/// The last line has no terminator if the file does not end with one.
/// Empty content yields no lines.
pub fn split_lines(content: &str) -> Vec<&str> {
  content.split_inclusive('\n').collect()
}

/// Returns the line without its `\n` / `\r\n` terminator.
pub fn line_text(line: &str) -> &str {
  line.trim_end_matches(['\n', '\r'])
}

/// Whether a line is a `//` comment (after indentation) or blank.
pub fn is_comment_or_blank(line: &str) -> bool {
  let trimmed = line.trim();
  trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}

pub fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// Number of leading lines that are comments or blank.
pub fn leading_comment_block_len(lines: &[&str]) -> usize {
  lines.iter().take_while(|line| is_comment_or_blank(line)).count()
}

/// Drops the leading run of comment and blank lines.
///
/// Everything from the first line that is neither is returned unchanged.
/// Stray comments at the top of a file are removed along with any header.
pub fn strip_leading_header<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
  &lines[leading_comment_block_len(lines)..]
}

/// Builds the new file content: header, one blank separator line, then body.
///
/// `header` is `\n`-terminated; its lines and the separator are written with
/// `line_ending` instead.
pub fn compose(header: &str, body: &[&str], line_ending: &str) -> String {
  let body_len: usize = body.iter().map(|line| line.len()).sum();
  let mut content = String::with_capacity(header.len() * 2 + body_len);
  for line in header.lines() {
    content.push_str(line);
    content.push_str(line_ending);
  }
  content.push_str(line_ending);
  for line in body {
    content.push_str(line);
  }
  content
}
