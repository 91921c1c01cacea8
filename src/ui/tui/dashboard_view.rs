use super::styles::{tone_style, hint_style};
use super::widgets::{progress_bar_text, truncate};
use crate::app::App;
use crate::domain::StatusTone;
use crate::domain::time::format_opt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const RECENT_JOBS: usize = 5;

pub(super) fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(rows[0]);

    let spotify = match app.spotify.as_ref() {
        None => vec![Line::styled("checking...", hint_style())],
        Some(s) if s.is_connected && !s.needs_reconnection => vec![
            Line::styled("✅ Connected", tone_style(StatusTone::Success)),
            Line::from(
                s.spotify_display_name
                    .clone()
                    .or_else(|| s.spotify_user_id.clone())
                    .unwrap_or_default(),
            ),
        ],
        Some(s) if s.is_connected => vec![
            Line::styled("⚠️ Needs reconnection", tone_style(StatusTone::Caution)),
            Line::styled("Accounts → a to reconnect", hint_style()),
        ],
        Some(_) => vec![
            Line::styled("❌ Not connected", tone_style(StatusTone::Danger)),
            Line::styled("Accounts → a to connect", hint_style()),
        ],
    };
    f.render_widget(
        Paragraph::new(Text::from(spotify))
            .block(Block::default().borders(Borders::ALL).title("Spotify")),
        cards[0],
    );

    let youtube = match app.youtube.as_ref() {
        None => vec![Line::styled("checking...", hint_style())],
        Some(y) if y.is_configured => vec![
            Line::styled("✅ Configured", tone_style(StatusTone::Success)),
            Line::from(format!("since {}", format_opt(y.configured_at.as_deref()))),
        ],
        Some(_) => vec![
            Line::styled("❌ Not configured", tone_style(StatusTone::Danger)),
            Line::styled("Accounts → Enter to set browser.json", hint_style()),
        ],
    };
    f.render_widget(
        Paragraph::new(Text::from(youtube))
            .block(Block::default().borders(Borders::ALL).title("YouTube Music")),
        cards[1],
    );

    let counts = vec![
        Line::from(format!("{} playlists", app.playlists.len())),
        Line::from(format!("{} active jobs", app.active_job_count())),
    ];
    f.render_widget(
        Paragraph::new(Text::from(counts))
            .block(Block::default().borders(Borders::ALL).title("Library")),
        cards[2],
    );

    let name_width = usize::from(rows[1].width.saturating_sub(48)).max(8);
    let items: Vec<ListItem> = if app.jobs.is_empty() {
        vec![ListItem::new(Line::styled("No transfers yet", hint_style()))]
    } else {
        app.jobs
            .iter()
            .take(RECENT_JOBS)
            .map(|job| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", job.status.badge()),
                        tone_style(job.status.tone()),
                    ),
                    Span::raw(format!(" {} ", progress_bar_text(job.progress_percentage, 20))),
                    Span::raw(truncate(job.playlist_name(), name_width)),
                ]))
            })
            .collect()
    };
    f.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent transfers"),
        ),
        rows[1],
    );

    f.render_widget(
        Paragraph::new(app.dashboard_status.as_str()).style(hint_style()),
        rows[2],
    );
}
