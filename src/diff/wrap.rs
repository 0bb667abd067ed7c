//! Text Wrapper: greedy word reflow to a column limit.

use super::colorize::{StyleTag, StyledString};
use crate::buffer::Style;
use unicode_width::UnicodeWidthStr;

/// Greedily pack words into lines no wider than `limit` where possible.
///
/// The first word always starts a line. A further word joins the current
/// line (after one space) when it fits in the remaining width, otherwise it
/// starts a new line. Words are never split, so an overlong word sits alone
/// on a line that overflows.
fn pack<W>(
    words: impl IntoIterator<Item = W>,
    limit: usize,
    width: impl Fn(&W) -> usize,
) -> Vec<Vec<W>> {
    let mut lines: Vec<Vec<W>> = Vec::new();
    let mut remaining = 0;

    for word in words {
        let w = width(&word);
        match lines.last_mut() {
            Some(line) if w < remaining => {
                remaining -= w + 1;
                line.push(word);
            }
            _ => {
                remaining = limit.saturating_sub(w);
                lines.push(vec![word]);
            }
        }
    }

    lines
}

/// Reflow `text` to at most `limit` columns per line.
///
/// All whitespace, newlines included, separates words; lines are joined with
/// `"\n"` and words within a line with a single space. Text with no words is
/// returned unchanged.
///
/// `limit` is in terminal columns, not characters: wide characters take two
/// columns and zero-width combining marks take none, so a line of decomposed
/// accents can hold more than `limit` chars while still fitting on screen.
///
/// # Example
///
/// ```
/// use diffbench::diff::wrap;
///
/// assert_eq!(wrap("aa bb ccccccc", 5), "aa bb\nccccccc");
/// ```
pub fn wrap(text: &str, limit: usize) -> String {
    let lines = pack(text.split_whitespace(), limit, |word| word.width());
    if lines.is_empty() {
        return text.to_string();
    }
    lines
        .iter()
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reflow styled text exactly like [`wrap`], keeping each character's style.
///
/// Separating spaces are unstyled. Text with no words yields no lines.
pub fn wrap_styled(text: &StyledString, limit: usize) -> Vec<StyledString> {
    let lines = pack(styled_words(text), limit, |(plain, _)| plain.width());

    lines
        .into_iter()
        .map(|words| {
            let mut line = StyledString::new();
            for (i, (_, word)) in words.iter().enumerate() {
                if i > 0 {
                    line.push(" ", StyleTag::Unchanged, Style::PLAIN);
                }
                line.append(word);
            }
            line
        })
        .collect()
}

/// Split styled text on whitespace, pairing each word's plain text with its
/// styled form.
fn styled_words(text: &StyledString) -> Vec<(String, StyledString)> {
    let mut words = Vec::new();
    let mut plain = String::new();
    let mut styled = StyledString::new();
    let mut buf = [0u8; 4];

    for (c, tag, style) in text.chars() {
        if c.is_whitespace() {
            if !plain.is_empty() {
                words.push((std::mem::take(&mut plain), std::mem::take(&mut styled)));
            }
        } else {
            plain.push(c);
            styled.push(c.encode_utf8(&mut buf), tag, style);
        }
    }
    if !plain.is_empty() {
        words.push((plain, styled));
    }

    words
}
