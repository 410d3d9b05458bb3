//! Label sizing without font metrics.
//!
//! SVG output leaves glyph shaping to the viewer, so widths here are an
//! average-advance estimate. Good enough to keep labels inside their boxes.

/// Average glyph advance as a fraction of the font size.
const ADVANCE: f64 = 0.60;

pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let raw = (text.chars().count() as f64) * f64::from(font_px) * ADVANCE;
    // 0.6 is inexact in binary; drop the representation error before ceil.
    ((raw * 1000.0).round() / 1000.0).ceil() as u32
}

/// Longest prefix of `text` fitting `max_px`, with a trailing ellipsis when cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    if out.is_empty() {
        return String::new();
    }
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

/// Greedy word wrap to `max_px`. A single word wider than a line is truncated.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if estimate_text_width_px(word, font_px) <= max_px {
            cur = word.to_string();
        } else {
            lines.push(truncate_to_width(word, font_px, max_px));
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}
