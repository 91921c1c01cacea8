use crate::domain::model::{
    ConnectionTest, Playlist, Song, SpotifyAccount, SpotifyPlaylist, SpotifyStatus, TransferJob,
    YouTubeMusicStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Playlists,
    Transfers,
    Accounts,
}

#[derive(Debug, Clone, Copy)]
pub struct TabConfig {
    pub title: &'static str,
    pub view: View,
}

/// Tabs shown in the header; a logged-out user only sees the login form.
pub fn tab_configs(logged_in: bool) -> &'static [TabConfig] {
    if logged_in {
        &[
            TabConfig {
                title: "Dashboard",
                view: View::Dashboard,
            },
            TabConfig {
                title: "Playlists",
                view: View::Playlists,
            },
            TabConfig {
                title: "Transfers",
                view: View::Transfers,
            },
            TabConfig {
                title: "Accounts",
                view: View::Accounts,
            },
        ]
    } else {
        &[TabConfig {
            title: "Login",
            view: View::Login,
        }]
    }
}

pub fn tab_index_for_view(view: View, logged_in: bool) -> Option<usize> {
    tab_configs(logged_in).iter().position(|c| c.view == view)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Login,
    Register,
}

impl LoginMode {
    pub fn fields(self) -> &'static [LoginField] {
        match self {
            LoginMode::Login => &[LoginField::Username, LoginField::Password],
            LoginMode::Register => &[
                LoginField::Username,
                LoginField::Email,
                LoginField::Password,
                LoginField::Confirm,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Email,
    Password,
    Confirm,
}

impl LoginField {
    /// Next field of `mode`, wrapping; `back` walks the other way.
    pub fn cycle(self, mode: LoginMode, back: bool) -> LoginField {
        let fields = mode.fields();
        let Some(pos) = fields.iter().position(|f| *f == self) else {
            return LoginField::Username;
        };
        let next = if back {
            (pos + fields.len() - 1) % fields.len()
        } else {
            (pos + 1) % fields.len()
        };
        fields[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistMode {
    List,
    Songs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCard {
    Spotify,
    YouTubeMusic,
}

/// Which single-line input currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    ImportRef,
    SpotifyCallback,
    BrowserConfigPath,
}

impl InputKind {
    pub fn title(self) -> &'static str {
        match self {
            InputKind::ImportRef => "Spotify playlist URL or ID",
            InputKind::SpotifyCallback => "Spotify redirect URL or code",
            InputKind::BrowserConfigPath => "Path to browser.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferModal {
    pub playlist_id: i64,
    pub playlist_name: String,
    /// Destination name being edited; ignored once `job` is set.
    pub name: String,
    pub job: Option<TransferJob>,
    pub status: String,
}

impl TransferModal {
    pub fn new(playlist: &Playlist) -> Self {
        Self {
            playlist_id: playlist.id,
            playlist_name: playlist.name.clone(),
            name: playlist.name.clone(),
            job: None,
            status: "Enter starts the transfer, Esc closes".to_owned(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.job.is_none()
    }
}

/// Pick list of the playlists on the linked Spotify account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotifyPicker {
    pub playlists: Vec<SpotifyPlaylist>,
    pub selected: usize,
    pub loading: bool,
    pub status: String,
}

impl SpotifyPicker {
    pub fn loading() -> Self {
        Self {
            loading: true,
            status: "Loading your Spotify playlists...".to_owned(),
            ..Self::default()
        }
    }

    pub fn selected_playlist(&self) -> Option<&SpotifyPlaylist> {
        self.playlists.get(self.selected)
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub view: View,
    pub logged_in: bool,
    pub username: Option<String>,
    pub help_visible: bool,

    pub login_mode: LoginMode,
    pub login_username: String,
    pub login_email: String,
    pub login_password: String,
    pub login_confirm: String,
    pub login_field: LoginField,
    pub login_status: String,

    pub input: Option<InputKind>,
    pub input_buffer: String,

    pub dashboard_status: String,

    pub playlists: Vec<Playlist>,
    pub playlists_selected: usize,
    pub playlist_mode: PlaylistMode,
    pub songs: Vec<Song>,
    pub songs_playlist_id: Option<i64>,
    pub songs_selected: usize,
    pub playlists_status: String,
    pub transfer_modal: Option<TransferModal>,
    pub spotify_picker: Option<SpotifyPicker>,

    pub jobs: Vec<TransferJob>,
    pub jobs_selected: usize,
    pub job_detail: Option<TransferJob>,
    pub transfers_status: String,

    pub account_card: AccountCard,
    pub spotify: Option<SpotifyStatus>,
    pub spotify_account: Option<SpotifyAccount>,
    pub spotify_auth_url: Option<String>,
    pub youtube: Option<YouTubeMusicStatus>,
    pub youtube_test: Option<ConnectionTest>,
    pub accounts_status: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            view: View::Login,
            logged_in: false,
            username: None,
            help_visible: false,
            login_mode: LoginMode::Login,
            login_username: String::new(),
            login_email: String::new(),
            login_password: String::new(),
            login_confirm: String::new(),
            login_field: LoginField::Username,
            login_status: "Connecting...".to_owned(),
            input: None,
            input_buffer: String::new(),
            dashboard_status: String::new(),
            playlists: Vec::new(),
            playlists_selected: 0,
            playlist_mode: PlaylistMode::List,
            songs: Vec::new(),
            songs_playlist_id: None,
            songs_selected: 0,
            playlists_status: String::new(),
            transfer_modal: None,
            spotify_picker: None,
            jobs: Vec::new(),
            jobs_selected: 0,
            job_detail: None,
            transfers_status: String::new(),
            account_card: AccountCard::Spotify,
            spotify: None,
            spotify_account: None,
            spotify_auth_url: None,
            youtube: None,
            youtube_test: None,
            accounts_status: String::new(),
        }
    }
}

impl App {
    /// Text entry is active, so plain letters must not trigger shortcuts.
    pub fn is_typing(&self) -> bool {
        self.view == View::Login
            || self.input.is_some()
            || self
                .transfer_modal
                .as_ref()
                .is_some_and(TransferModal::is_editing)
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.playlists_selected)
    }

    pub fn selected_job(&self) -> Option<&TransferJob> {
        self.jobs.get(self.jobs_selected)
    }

    pub fn active_job_count(&self) -> usize {
        self.jobs.iter().filter(|j| j.status.is_active()).count()
    }

    /// Everything tied to the logged-in account; the login form is kept.
    pub fn clear_user_data(&mut self) {
        let login_username = std::mem::take(&mut self.login_username);
        *self = Self {
            login_username,
            help_visible: self.help_visible,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_only_has_login_tab() {
        assert_eq!(tab_configs(false).len(), 1);
        assert_eq!(tab_index_for_view(View::Login, false), Some(0));
        assert_eq!(tab_index_for_view(View::Playlists, false), None);
        assert_eq!(tab_index_for_view(View::Accounts, true), Some(3));
    }

    #[test]
    fn typing_follows_inputs() {
        let mut app = App {
            view: View::Playlists,
            ..App::default()
        };
        assert!(!app.is_typing());

        app.input = Some(InputKind::ImportRef);
        assert!(app.is_typing());
        app.input = None;

        let playlist = Playlist {
            id: 7,
            name: "Focus".to_owned(),
            ..Default::default()
        };
        app.transfer_modal = Some(TransferModal::new(&playlist));
        assert!(app.is_typing());

        if let Some(modal) = app.transfer_modal.as_mut() {
            modal.job = Some(TransferJob {
                id: 1,
                ..Default::default()
            });
        }
        assert!(!app.is_typing());
    }

    #[test]
    fn login_fields_cycle_within_mode() {
        let f = LoginField::Password;
        assert_eq!(f.cycle(LoginMode::Login, false), LoginField::Username);
        assert_eq!(f.cycle(LoginMode::Register, false), LoginField::Confirm);
        assert_eq!(
            LoginField::Username.cycle(LoginMode::Register, true),
            LoginField::Confirm
        );
        assert_eq!(
            LoginField::Email.cycle(LoginMode::Login, false),
            LoginField::Username
        );
    }

    #[test]
    fn picker_is_not_a_text_input() {
        let app = App {
            view: View::Playlists,
            spotify_picker: Some(SpotifyPicker::loading()),
            ..App::default()
        };
        assert!(!app.is_typing());
        assert!(app.spotify_picker.as_ref().is_some_and(|p| p.loading));
    }

    #[test]
    fn clear_user_data_keeps_login_name() {
        let mut app = App {
            view: View::Transfers,
            logged_in: true,
            login_username: "ana".to_owned(),
            login_password: "secret".to_owned(),
            login_confirm: "secret".to_owned(),
            login_mode: LoginMode::Register,
            jobs: vec![TransferJob::default()],
            spotify_picker: Some(SpotifyPicker::default()),
            ..App::default()
        };
        app.clear_user_data();
        assert_eq!(app.view, View::Login);
        assert!(!app.logged_in);
        assert!(app.jobs.is_empty());
        assert!(app.login_password.is_empty());
        assert!(app.login_confirm.is_empty());
        assert_eq!(app.login_mode, LoginMode::Login);
        assert!(app.spotify_picker.is_none());
        assert_eq!(app.login_username, "ana");
    }
}
