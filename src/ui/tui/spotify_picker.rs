use super::overlays::centered_rect;
use super::styles::{highlight_style, hint_style, tone_style};
use super::widgets::{list_state, truncate};
use crate::app::SpotifyPicker;
use crate::domain::StatusTone;
use crate::domain::model::{Playlist, SpotifyPlaylist};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

const PICKER_WIDTH: u16 = 80;
const NAME_COLUMNS: usize = 40;

pub(super) fn draw_spotify_picker(
    f: &mut Frame,
    area: Rect,
    picker: &SpotifyPicker,
    imported: &[Playlist],
) {
    let popup = centered_rect(
        area,
        area.width.saturating_sub(4).min(PICKER_WIDTH),
        area.height.saturating_sub(2),
    );
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Import from Spotify (Enter import · u paste link · Esc close)");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let items: Vec<ListItem> = picker
        .playlists
        .iter()
        .map(|p| picker_row(p, p.is_imported(imported)))
        .collect();
    if items.is_empty() {
        let text = if picker.loading { "Loading..." } else { "Nothing to import" };
        f.render_widget(Paragraph::new(Line::styled(text, hint_style())), rows[0]);
    } else {
        let list = List::new(items).highlight_style(highlight_style());
        f.render_stateful_widget(list, rows[0], &mut list_state(picker.selected));
    }

    f.render_widget(
        Paragraph::new(picker.status.as_str())
            .style(hint_style())
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn picker_row(p: &SpotifyPlaylist, imported: bool) -> ListItem<'static> {
    let mut spans = vec![Span::raw(format!(
        "{:<width$} {:>4} tracks",
        truncate(&p.name, NAME_COLUMNS),
        p.track_count,
        width = NAME_COLUMNS
    ))];
    if let Some(owner) = p.owner.as_deref().filter(|o| !o.is_empty()) {
        spans.push(Span::styled(format!("  by {owner}"), hint_style()));
    }
    if imported {
        spans.push(Span::styled("  ✓ imported", tone_style(StatusTone::Success)));
    }
    ListItem::new(Line::from(spans))
}
