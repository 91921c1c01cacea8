use crate::domain::StatusTone;
use ratatui::style::{Color, Modifier, Style};

pub(super) fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Waiting => Color::Yellow,
        StatusTone::Active => Color::Blue,
        StatusTone::Success => Color::Green,
        StatusTone::Danger => Color::Red,
        StatusTone::Caution => Color::Magenta,
        StatusTone::Muted => Color::Gray,
    }
}

pub(super) fn tone_style(tone: StatusTone) -> Style {
    Style::default().fg(tone_color(tone))
}

pub(super) fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub(super) fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
