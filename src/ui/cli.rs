use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "playlist-transfer",
    version,
    about = "Move Spotify playlists to YouTube Music from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Data directory for session, settings and logs (default: system data_local_dir)
    #[arg(long, env = "PLAYLIST_TRANSFER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log directory (default: `{data_dir}/logs`)
    #[arg(long, env = "PLAYLIST_TRANSFER_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log filter, same syntax as RUST_LOG
    #[arg(long, env = "RUST_LOG", global = true)]
    pub log_filter: Option<String>,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, env = "PLAYLIST_TRANSFER_API_URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the TUI (default)
    Tui,

    /// Log in and store the session token
    Login {
        username: String,

        #[arg(long, env = "PLAYLIST_TRANSFER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log into it
    Register {
        username: String,

        /// Optional contact address
        #[arg(long, default_value = "")]
        email: String,

        /// At least 8 characters
        #[arg(long, env = "PLAYLIST_TRANSFER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat of the password (default: same as --password)
        #[arg(long)]
        password_confirm: Option<String>,
    },

    /// Log out and forget the stored token
    Logout,

    /// List imported playlists
    Playlists,

    /// Import a Spotify playlist by link, URI or id
    Import {
        #[arg(value_name = "URL_OR_ID")]
        playlist: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// List the songs of an imported playlist
    Songs { playlist_id: i64 },

    /// Download a playlist as CSV
    ExportCsv {
        playlist_id: i64,

        /// Output file (default: `<name>_playlist.csv` in the export dir)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Start a transfer to YouTube Music
    Transfer {
        playlist_id: i64,

        /// YouTube Music playlist name (default: the Spotify playlist name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the progress of a transfer job
    Progress { job_id: i64 },

    /// Cancel a transfer job
    Cancel { job_id: i64 },

    /// List transfer jobs
    History,

    /// Spotify account
    #[command(subcommand)]
    Spotify(SpotifyCommand),

    /// YouTube Music account
    #[command(subcommand)]
    Ytmusic(YtMusicCommand),
}

#[derive(Debug, Subcommand)]
pub enum SpotifyCommand {
    /// Connection status
    Status,
    /// List the playlists on the linked account, marking imported ones
    Playlists,
    /// Print the authorization URL (and open it when enabled in settings)
    Url,
    /// Finish linking with the redirect URL or the bare code
    Callback {
        #[arg(value_name = "URL_OR_CODE")]
        input: String,
    },
    /// Unlink the Spotify account
    Disconnect,
}

#[derive(Debug, Subcommand)]
pub enum YtMusicCommand {
    /// Configuration status
    Status,
    /// Upload a browser.json exported from a logged-in browser
    Configure { file: PathBuf },
    /// Ask the backend to test the stored credentials
    Test,
    /// Remove the stored credentials
    Disconnect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_means_tui() {
        let cli = Cli::try_parse_from(["playlist-transfer"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn nested_and_global_flags() {
        let cli = Cli::try_parse_from([
            "playlist-transfer",
            "ytmusic",
            "configure",
            "browser.json",
            "--api-url",
            "http://h/api",
        ])
        .expect("parse");
        assert_eq!(cli.api_url.as_deref(), Some("http://h/api"));
        assert!(matches!(
            cli.command,
            Some(Command::Ytmusic(YtMusicCommand::Configure { .. }))
        ));
    }

    #[test]
    fn register_confirm_defaults_to_none() {
        let cli = Cli::try_parse_from([
            "playlist-transfer",
            "register",
            "ana",
            "--password",
            "longenough",
        ])
        .expect("parse");
        match cli.command {
            Some(Command::Register {
                username,
                email,
                password_confirm,
                ..
            }) => {
                assert_eq!(username, "ana");
                assert!(email.is_empty());
                assert!(password_confirm.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn spotify_playlists_parses() {
        let cli =
            Cli::try_parse_from(["playlist-transfer", "spotify", "playlists"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Spotify(SpotifyCommand::Playlists))
        ));
    }

    #[test]
    fn transfer_name_is_optional() {
        let cli = Cli::try_parse_from(["playlist-transfer", "transfer", "7"]).expect("parse");
        match cli.command {
            Some(Command::Transfer { playlist_id, name }) => {
                assert_eq!(playlist_id, 7);
                assert!(name.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
