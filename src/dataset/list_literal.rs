//! List-valued CSV cells
//!
//! Recipe exports usually store ingredient and direction lists as a quoted
//! list literal, e.g. `['1 cup milk', "2 eggs"]`. Cells that are not a
//! well-formed literal are treated as newline-separated text.

use std::iter::Peekable;
use std::str::Chars;

/// Parse a list-valued cell
///
/// Blank cells give an empty list. Blank lines of the newline fallback are
/// dropped.
pub fn parse_list_cell(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Some(items) = parse_literal(trimmed) {
        return items;
    }

    trimmed
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `[ 'a', "b", ... ]` literal of string items
///
/// Returns `None` on anything else, including non-string items.
pub fn parse_literal(text: &str) -> Option<Vec<String>> {
    let mut chars = text.chars().peekable();
    let mut items = Vec::new();

    skip_ws(&mut chars);
    if chars.next()? != '[' {
        return None;
    }

    loop {
        skip_ws(&mut chars);
        match chars.peek()? {
            ']' => {
                chars.next();
                break;
            }
            '\'' | '"' => {
                items.push(parse_quoted(&mut chars)?);
                skip_ws(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    skip_ws(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'x' => out.push(hex_escape(chars, 2)?),
                'u' => out.push(hex_escape(chars, 4)?),
                'U' => out.push(hex_escape(chars, 8)?),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

/// Decode the `digits` hex digits of a `\x`, `\u` or `\U` escape
fn hex_escape(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<char> {
    let mut code: u32 = 0;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}
