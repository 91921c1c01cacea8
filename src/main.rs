use clap::Parser;
use playlist_transfer::api::ApiClientConfig;
use playlist_transfer::app::App;
use playlist_transfer::error::AppError;
use playlist_transfer::settings::load_settings;
use playlist_transfer::ui::{Cli, Command, run_command, run_tui};
use playlist_transfer::{core, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(err = %e, "exiting with error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = ApiClientConfig::default();
    if let Some(v) = cli.data_dir.clone() {
        cfg.data_dir = v;
    }

    let _log_guard = logging::init(
        &cfg.data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );

    let settings = load_settings(&cfg.data_dir);
    let mut cfg = cfg.with_settings(&settings);
    if let Some(v) = cli.api_url.clone().filter(|u| !u.trim().is_empty()) {
        cfg.base_url = v.trim().to_owned();
    }
    tracing::info!(
        data_dir = %cfg.data_dir.display(),
        base_url = %cfg.base_url,
        "playlist-transfer starting"
    );

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let (tx, rx) = core::spawn_app_actor(cfg, settings);
            run_tui(App::default(), tx, rx).await?;
            Ok(())
        }
        cmd => run_command(cmd, cfg, &settings).await,
    }
}
