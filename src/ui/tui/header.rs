use crate::app::{App, tab_configs, tab_index_for_view};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

pub(super) fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let configs = tab_configs(app.logged_in);
    let titles: Vec<Line> = configs
        .iter()
        .enumerate()
        .map(|(i, c)| Line::from(format!("{}[F{}]", c.title, i + 1)))
        .collect();
    let selected = tab_index_for_view(app.view, app.logged_in).unwrap_or(0);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("playlist-transfer");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(inner);

    let tabs = Tabs::new(titles)
        .select(selected)
        .divider("|")
        .padding(" ", " ")
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, cols[0]);

    let who = match app.username.as_deref() {
        Some(name) if app.logged_in => format!("👤 {name}  L logout  ? help"),
        _ => "not logged in  ? help".to_owned(),
    };
    f.render_widget(
        Paragraph::new(who)
            .style(Style::default().fg(Color::Gray))
            .right_aligned(),
        cols[1],
    );
}
