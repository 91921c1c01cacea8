use super::overlays::centered_rect;
use super::styles::focus_style;
use crate::app::{App, LoginField, LoginMode};
use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(super) fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let fields = app.login_mode.fields();
    let popup = centered_rect(area, 60, 8 + fields.len() as u16);

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|field| field_line(app, *field))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        app.login_status.clone(),
        Style::default().fg(Color::Gray),
    ));

    let title = match app.login_mode {
        LoginMode::Login => "Log in",
        LoginMode::Register => "Create account",
    };
    let login = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(login, popup);
}

fn field_line(app: &App, field: LoginField) -> Line<'static> {
    let active = app.login_field == field;
    let cursor = if active { "▏" } else { "" };
    let masked = |s: &str| "•".repeat(s.chars().count());
    let (label, value) = match field {
        LoginField::Username => ("Username: ", app.login_username.clone()),
        LoginField::Email => ("Email:    ", app.login_email.clone()),
        LoginField::Password => ("Password: ", masked(&app.login_password)),
        LoginField::Confirm => ("Confirm:  ", masked(&app.login_confirm)),
    };
    Line::from(vec![
        Span::styled(label, focus_style(active)),
        Span::raw(format!("{value}{cursor}")),
    ])
}
