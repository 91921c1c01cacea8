use crate::domain::{bar_width, clamp_percentage};
use ratatui::widgets::ListState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) fn list_state(selected: usize) -> ListState {
    let mut st = ListState::default();
    st.select(Some(selected));
    st
}

/// `[######----] 60%`, always drawn from the clamped percentage.
pub(super) fn progress_bar_text(percentage: i64, width: u16) -> String {
    let filled = usize::from(bar_width(percentage, width));
    let empty = usize::from(width) - filled;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(empty),
        clamp_percentage(percentage)
    )
}

/// Cuts `s` to `max` terminal columns, ending with `…` when shortened.
pub(super) fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar_text(50, 10), "[#####-----]  50%");
        assert_eq!(progress_bar_text(140, 4), "[####] 100%");
        assert_eq!(progress_bar_text(-3, 4), "[----]   0%");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Playlist name", 6), "Playl…");
        assert_eq!(truncate("日本語の歌", 5), "日本…");
    }
}
