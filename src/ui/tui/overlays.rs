use super::styles::highlight_style;
use crate::app::InputKind;
use ratatui::{
    Frame,
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub(super) fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(72);
    let height = area.height.saturating_sub(4).min(26);
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Global"),
        Line::from("  F1-F4 / Tab / Ctrl+Tab: switch view    ?: help    L: log out"),
        Line::from("  Esc: close input, modal or detail    q / Ctrl+C: quit"),
        Line::from(""),
        Line::from("Dashboard      r: refresh"),
        Line::from("Playlists      ↑/↓ select   Enter: songs   b: back"),
        Line::from("               i: pick a Spotify playlist   t: transfer   e: export CSV"),
        Line::from("               r: reload"),
        Line::from("Spotify picker Enter: import   u: paste a link instead   r: reload"),
        Line::from("Transfer modal Enter: start   r: refresh progress   c: cancel"),
        Line::from("Transfers      Enter: details   p: refresh progress   c: cancel"),
        Line::from("               r: reload"),
        Line::from("Accounts       ↑/↓ card   a: Spotify auth URL   Enter: paste / set"),
        Line::from("               t: test YouTube Music   d: disconnect   r: refresh"),
        Line::from("Login          ↑/↓ field   Enter: submit   Ctrl+R: log in / new account"),
        Line::from(""),
        Line::from("? / Esc: close help"),
    ];
    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup);
}

pub(super) fn draw_input_overlay(f: &mut Frame, area: Rect, kind: InputKind, buffer: &str) {
    let width = area.width.saturating_sub(4).min(90);
    let popup = centered_rect(area, width, 5);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(format!("{buffer}▏"), highlight_style()),
        Line::from("Enter: submit   Esc: cancel"),
    ];
    let input = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(kind.title()))
        .wrap(Wrap { trim: false });
    f.render_widget(input, popup);
}

pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
