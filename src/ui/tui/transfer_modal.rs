use super::overlays::centered_rect;
use super::styles::{focus_style, hint_style, tone_color, tone_style};
use crate::app::TransferModal;
use crate::domain::{StatusTone, clamp_percentage};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

const MODAL_WIDTH: u16 = 70;
const MODAL_HEIGHT: u16 = 13;

pub(super) fn draw_transfer_modal(f: &mut Frame, area: Rect, modal: &TransferModal) {
    let popup = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Transfer \"{}\" to YouTube Music", modal.playlist_name));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(job) = modal.job.as_ref() else {
        let lines = vec![
            Line::from("YouTube Music playlist name:"),
            Line::from(vec![
                Span::styled("> ", focus_style(true)),
                Span::raw(format!("{}▏", modal.name)),
            ]),
            Line::from(""),
            Line::styled(modal.status.clone(), hint_style()),
        ];
        f.render_widget(
            Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }),
            inner,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::styled(job.status.badge(), tone_style(job.status.tone()))),
        rows[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(tone_color(job.status.tone())))
            .percent(clamp_percentage(job.progress_percentage)),
        rows[1],
    );

    let mut lines = vec![
        Line::from(format!(
            "{} / {} processed",
            job.processed_songs, job.total_songs
        )),
        Line::from(vec![
            Span::styled(
                format!("{} transferred", job.successful_transfers),
                tone_style(StatusTone::Success),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} failed", job.failed_transfers),
                tone_style(StatusTone::Danger),
            ),
        ]),
    ];
    if let Some(url) = job.youtube_url() {
        lines.push(Line::from(format!("Playlist: {url}")));
    }
    if !job.error_message.is_empty() {
        lines.push(Line::styled(
            job.error_message.clone(),
            tone_style(StatusTone::Danger),
        ));
    }
    lines.push(Line::styled(modal.status.clone(), hint_style()));
    f.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }),
        rows[2],
    );
}
