use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ToastLevel {
    Info,
    Error,
}

impl ToastLevel {
    fn duration(self) -> Duration {
        match self {
            ToastLevel::Info => Duration::from_secs(3),
            ToastLevel::Error => Duration::from_secs(6),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct Toast {
    pub message: String,
    pub level: ToastLevel,
    shown_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.level.duration()
    }
}

pub(super) fn draw_toast(f: &mut Frame, area: Rect, toast: &Toast) {
    let (icon, color) = match toast.level {
        ToastLevel::Error => ("❌", Color::Red),
        ToastLevel::Info => ("ℹ️ ", Color::Green),
    };
    let paragraph = Paragraph::new(format!("{icon} {}", toast.message))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
