use super::styles::{highlight_style, hint_style, tone_style};
use super::widgets::{list_state, progress_bar_text, truncate};
use crate::app::App;
use crate::domain::StatusTone;
use crate::domain::model::{SongTransferResult, TransferJob};
use crate::domain::time::format_opt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub(super) fn draw_transfers(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(area);

    let body = if app.job_detail.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0])
    } else {
        Layout::default()
            .constraints([Constraint::Percentage(100)])
            .split(rows[0])
    };

    draw_job_list(f, body[0], app);
    if let Some(job) = app.job_detail.as_ref() {
        draw_job_detail(f, body[1], job);
    }

    f.render_widget(
        Paragraph::new(app.transfers_status.as_str()).style(hint_style()),
        rows[1],
    );
}

fn draw_job_list(f: &mut Frame, area: Rect, app: &App) {
    let name_width = usize::from(area.width.saturating_sub(40)).max(8);
    let items: Vec<ListItem> = if app.jobs.is_empty() {
        vec![ListItem::new(Line::styled("No transfers yet", hint_style()))]
    } else {
        app.jobs
            .iter()
            .map(|job| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", job.status.badge()),
                        tone_style(job.status.tone()),
                    ),
                    Span::raw(format!(" {} ", progress_bar_text(job.progress_percentage, 10))),
                    Span::raw(truncate(job.playlist_name(), name_width)),
                ]))
            })
            .collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Transfer history"))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, area, &mut list_state(app.jobs_selected));
}

fn draw_job_detail(f: &mut Frame, area: Rect, job: &TransferJob) {
    let mut lines = vec![
        Line::styled(job.status.badge(), tone_style(job.status.tone())),
        Line::from(format!("From:    {}", job.playlist_name())),
        Line::from(format!("To:      {}", job.youtube_playlist_name)),
        Line::from(format!("Created: {}", format_opt(job.created_at.as_deref()))),
        Line::from(format!("Started: {}", format_opt(job.started_at.as_deref()))),
        Line::from(format!("Done:    {}", format_opt(job.completed_at.as_deref()))),
        Line::from(format!(
            "{} / {} processed, {} ok, {} failed",
            job.processed_songs, job.total_songs, job.successful_transfers, job.failed_transfers
        )),
    ];
    if let Some(url) = job.youtube_url() {
        lines.push(Line::from(url));
    }
    if !job.error_message.is_empty() {
        lines.push(Line::styled(
            job.error_message.clone(),
            tone_style(StatusTone::Danger),
        ));
    }
    if !job.notes.is_empty() {
        lines.push(Line::styled(job.notes.clone(), hint_style()));
    }
    lines.push(Line::from(""));
    if job.song_results.is_empty() {
        lines.push(Line::styled("No per-song results yet", hint_style()));
    }
    lines.extend(job.song_results.iter().map(song_result_line));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Job #{} (Esc close)", job.id)),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn song_result_line(r: &SongTransferResult) -> Line<'static> {
    let status = r.transfer_status;
    let song = r
        .song
        .as_ref()
        .map(|s| format!("{} - {}", s.name, s.artist))
        .unwrap_or_else(|| format!("song #{}", r.id));
    let mut spans = vec![
        Span::styled(
            format!("{} {:<11}", status.emoji(), status.label()),
            tone_style(status.tone()),
        ),
        Span::raw(format!(" {song}")),
    ];
    if let Some(title) = r.youtube_title.as_deref() {
        spans.push(Span::styled(
            format!(" → {title} ({:.0}%)", r.match_confidence * 100.0),
            hint_style(),
        ));
    }
    if let Some(err) = r.error_message.as_deref() {
        spans.push(Span::styled(
            format!(" {err}"),
            tone_style(StatusTone::Danger),
        ));
    }
    Line::from(spans)
}
