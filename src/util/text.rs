use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji take two columns, combining marks none.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate `s` so it fits in `max_width` terminal columns.
///
/// Appends `"..."` when something was cut. Widths of three columns or less
/// have no room for an ellipsis, so they get as many characters as fit.
/// Returns `Cow::Borrowed` when `s` already fits.
///
/// ```
/// use newsdesk::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("你好世界", 7), "你好...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if max_width <= ELLIPSIS_WIDTH {
        let mut byte_end = 0;
        let mut current_width = 0;
        for (idx, c) in s.char_indices() {
            let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width > max_width {
                break;
            }
            current_width += char_width;
            byte_end = idx + c.len_utf8();
        }
        if byte_end == s.len() {
            return Cow::Borrowed(s);
        }
        return Cow::Owned(s[..byte_end].to_string());
    }

    let target_width = max_width - ELLIPSIS_WIDTH;
    let mut current_width = 0;
    let mut cut_point = None;

    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);

        // Remember where to cut so the ellipsis still fits
        if cut_point.is_none() && current_width + char_width > target_width {
            cut_point = Some(idx);
        }

        if current_width + char_width > max_width {
            let cut = cut_point.unwrap_or(idx);
            return Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS));
        }

        current_width += char_width;
    }

    Cow::Borrowed(s)
}

fn is_stripped(b: u8) -> bool {
    b == 0x1b || b == 0x7f || (b < 0x20 && b != 0x09 && b != 0x0a && b != 0x0d)
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Article text comes straight from the feed; without this a title could
/// move the cursor or retitle the terminal window.
///
/// Strips C0 controls (except tab, newline, carriage return), DEL, CSI
/// sequences (`ESC [ ... final`), OSC sequences (`ESC ] ... BEL|ST`) and bare
/// ESC bytes. Returns `Cow::Borrowed` for clean input.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let len = bytes.len();

    if !bytes.iter().any(|&b| is_stripped(b)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        let b = bytes[i];

        if b == 0x1b {
            if i + 1 < len && bytes[i + 1] == b'[' {
                // CSI: skip parameters up to and including the final byte
                i += 2;
                while i < len {
                    let c = bytes[i];
                    i += 1;
                    if (0x40..=0x7e).contains(&c) {
                        break;
                    }
                }
            } else if i + 1 < len && bytes[i + 1] == b']' {
                // OSC: skip until BEL or ST
                i += 2;
                while i < len {
                    if bytes[i] == 0x07 {
                        i += 1;
                        break;
                    }
                    if bytes[i] == 0x1b && i + 1 < len && bytes[i + 1] == b'\\' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            } else {
                i += 1;
            }
        } else if is_stripped(b) {
            i += 1;
        } else {
            let start = i;
            i += 1;
            while i < len && !is_stripped(bytes[i]) {
                i += 1;
            }
            // Only ASCII bytes stop the run, so the slice is on char boundaries.
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}

/// Sanitize `s` and fold line breaks and tabs into single spaces.
///
/// Card previews and list titles are one line tall.
pub fn single_line(s: &str) -> Cow<'_, str> {
    let cleaned = strip_control_chars(s);
    if !cleaned.contains(['\n', '\r', '\t']) {
        return cleaned;
    }

    let folded = cleaned
        .split(['\n', '\r', '\t'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(folded)
}
