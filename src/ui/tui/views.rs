use super::accounts_view::draw_accounts;
use super::dashboard_view::draw_dashboard;
use super::header::draw_header;
use super::login_view::draw_login;
use super::overlays::{draw_help_overlay, draw_input_overlay};
use super::playlists_view::draw_playlists;
use super::spotify_picker::draw_spotify_picker;
use super::styles::hint_style;
use super::toast::{Toast, draw_toast};
use super::transfer_modal::draw_transfer_modal;
use super::transfers_view::draw_transfers;
use crate::app::{App, LoginMode, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    widgets::Paragraph,
};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const TOAST_HEIGHT: u16 = 3;

pub(super) fn draw_ui(f: &mut Frame, app: &App, toast: Option<&Toast>) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    draw_header(f, chunks[0], app);

    let body = chunks[1];
    match app.view {
        View::Login => draw_login(f, body, app),
        View::Dashboard => draw_dashboard(f, body, app),
        View::Playlists => draw_playlists(f, body, app),
        View::Transfers => draw_transfers(f, body, app),
        View::Accounts => draw_accounts(f, body, app),
    }

    f.render_widget(
        Paragraph::new(footer_hint(app)).style(hint_style()),
        chunks[2],
    );

    if app.view == View::Playlists
        && let Some(modal) = app.transfer_modal.as_ref()
    {
        draw_transfer_modal(f, body, modal);
    }
    if app.view == View::Playlists
        && let Some(picker) = app.spotify_picker.as_ref()
    {
        draw_spotify_picker(f, body, picker, &app.playlists);
    }
    if let Some(kind) = app.input {
        draw_input_overlay(f, body, kind, &app.input_buffer);
    }
    if app.help_visible {
        draw_help_overlay(f, area);
    }
    if let Some(toast) = toast
        && body.height > TOAST_HEIGHT
    {
        let rect = Rect {
            x: body.x,
            y: body.y + body.height - TOAST_HEIGHT,
            width: body.width,
            height: TOAST_HEIGHT,
        };
        draw_toast(f, rect, toast);
    }
}

fn footer_hint(app: &App) -> &'static str {
    if app.input.is_some() {
        return "Enter submit · Esc cancel";
    }
    match app.view {
        View::Login => match app.login_mode {
            LoginMode::Login => "↑/↓ field · Enter log in · Ctrl+R new account · Ctrl+C quit",
            LoginMode::Register => "↑/↓ field · Enter create account · Ctrl+R back to log in",
        },
        View::Dashboard => "r refresh · F2 playlists · F3 transfers · F4 accounts · q quit",
        View::Playlists => match app.transfer_modal.as_ref() {
            Some(m) if m.is_editing() => "type a name · Enter start · Esc close",
            Some(_) => "r refresh progress · c cancel · Esc close",
            None if app.spotify_picker.is_some() => {
                "↑/↓ select · Enter import · u paste link · r reload · Esc close"
            }
            None => "↑/↓ select · Enter songs · i import · t transfer · e export · r reload",
        },
        View::Transfers => "↑/↓ select · Enter details · p progress · c cancel · r reload · Esc close",
        View::Accounts => "↑/↓ card · a auth URL · Enter paste/set · t test · d disconnect · r refresh",
    }
}
