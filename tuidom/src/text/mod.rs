use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal column width of `s`.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cut `s` to at most `max_width` columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out: String = s
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    out.push('…');
    out
}

/// Right-pad `s` with spaces to exactly `width` columns (truncating if wider).
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&out));
    out.push_str(&" ".repeat(pad));
    out
}
