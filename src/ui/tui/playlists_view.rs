use super::styles::{highlight_style, hint_style, tone_style};
use super::widgets::list_state;
use crate::app::{App, PlaylistMode};
use crate::domain::StatusTone;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub(super) fn draw_playlists(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(area);

    let (title, items, selected) = match app.playlist_mode {
        PlaylistMode::List => {
            let items: Vec<ListItem> = app
                .playlists
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let mut spans = vec![Span::raw(format!(
                        "{:>3}  {} ({} tracks)",
                        i + 1,
                        p.name,
                        p.total_tracks
                    ))];
                    if p.is_transferred() {
                        spans.push(Span::styled(
                            "  ✓ on YouTube",
                            tone_style(StatusTone::Success),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();
            ("Playlists", items, app.playlists_selected)
        }
        PlaylistMode::Songs => {
            let items: Vec<ListItem> = app
                .songs
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{:>3}  {} - {}", i + 1, s.name, s.artist)),
                        Span::styled(format!("  {}", s.duration_text()), hint_style()),
                    ]))
                })
                .collect();
            ("Songs (Esc back)", items, app.songs_selected)
        }
    };

    let items = if items.is_empty() {
        vec![ListItem::new(Line::styled("Nothing here yet", hint_style()))]
    } else {
        items
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, chunks[0], &mut list_state(selected));

    f.render_widget(
        Paragraph::new(app.playlists_status.as_str()).style(hint_style()),
        chunks[1],
    );
}
