use super::styles::{focus_style, hint_style, tone_style};
use crate::app::{AccountCard, App};
use crate::domain::StatusTone;
use crate::domain::time::format_opt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(super) fn draw_accounts(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(1),
        ])
        .split(area);

    card(
        f,
        rows[0],
        "Spotify",
        app.account_card == AccountCard::Spotify,
        spotify_lines(app),
    );
    card(
        f,
        rows[1],
        "YouTube Music",
        app.account_card == AccountCard::YouTubeMusic,
        youtube_lines(app),
    );
    f.render_widget(
        Paragraph::new(app.accounts_status.as_str()).style(hint_style()),
        rows[2],
    );
}

fn card(f: &mut Frame, area: Rect, title: &str, focused: bool, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(title.to_owned());
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn spotify_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = match app.spotify.as_ref() {
        None => vec![Line::styled("checking...", hint_style())],
        Some(s) if s.is_connected => {
            let who = s
                .spotify_display_name
                .clone()
                .or_else(|| s.spotify_user_id.clone())
                .unwrap_or_default();
            let mut v = vec![Line::styled(
                format!("✅ Connected as {who}"),
                tone_style(StatusTone::Success),
            )];
            if s.needs_reconnection || !s.token_valid {
                v.push(Line::styled(
                    "⚠️ Token expired, press a to reconnect",
                    tone_style(StatusTone::Caution),
                ));
            }
            v
        }
        Some(_) => vec![
            Line::styled("❌ Not connected", tone_style(StatusTone::Danger)),
            Line::styled(
                "a: get the authorization URL, then Enter to paste the redirect URL",
                hint_style(),
            ),
        ],
    };
    if let Some(url) = app.spotify_auth_url.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from("Open this URL, approve, then press Enter and paste where it redirected:"));
        lines.push(Line::from(url.to_owned()));
    }
    if let Some(account) = app.spotify_account.as_ref() {
        let plan = if account.premium { "premium" } else { "free" };
        lines.push(Line::styled(
            format!("Last linked: {} ({plan})", account.label()),
            hint_style(),
        ));
    }
    lines
}

fn youtube_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = match app.youtube.as_ref() {
        None => vec![Line::styled("checking...", hint_style())],
        Some(y) if y.is_configured => vec![
            Line::styled("✅ Configured", tone_style(StatusTone::Success)),
            Line::from(format!(
                "Configured at {}",
                format_opt(y.configured_at.as_deref())
            )),
        ],
        Some(_) => vec![
            Line::styled("❌ Not configured", tone_style(StatusTone::Danger)),
            Line::styled(
                "Enter: path to a browser.json exported with ytmusicapi",
                hint_style(),
            ),
        ],
    };
    if let Some(test) = app.youtube_test.as_ref() {
        let tone = if test.success {
            StatusTone::Success
        } else {
            StatusTone::Danger
        };
        lines.push(Line::styled(format!("Test: {}", test.summary()), tone_style(tone)));
    }
    lines
}
