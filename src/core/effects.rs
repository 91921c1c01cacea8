use crate::api::ApiCommand;
use crate::app::App;
use crate::messages::app::AppEvent;
use tokio::sync::mpsc;

#[derive(Default)]
pub struct CoreEffects {
    pub(super) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<App>),
    EmitToast(String),
    EmitError(String),
    SendApi {
        cmd: ApiCommand,
        warn: Option<&'static str>,
    },
    /// Hand a URL to the system browser.
    OpenUrl(String),
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions.push(CoreEffect::EmitState(Box::new(app.clone())));
    }

    pub fn send_api(&mut self, cmd: ApiCommand) {
        self.actions.push(CoreEffect::SendApi { cmd, warn: None });
    }

    pub fn send_api_warn(&mut self, cmd: ApiCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendApi {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitError(message.into()));
    }

    pub fn open_url(&mut self, url: impl Into<String>) {
        self.actions.push(CoreEffect::OpenUrl(url.into()));
    }

    #[cfg(test)]
    pub(crate) fn api_commands(&self) -> impl Iterator<Item = &ApiCommand> {
        self.actions.iter().filter_map(|a| match a {
            CoreEffect::SendApi { cmd, .. } => Some(cmd),
            _ => None,
        })
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_api: &'a mpsc::Sender<ApiCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitToast(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(msg)).await;
            }
            CoreEffect::EmitError(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Error(msg)).await;
            }
            CoreEffect::SendApi { cmd, warn } => {
                if let Err(e) = dispatch.tx_api.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::OpenUrl(url) => {
                let res = tokio::task::spawn_blocking(move || webbrowser::open(&url)).await;
                match res {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        tracing::warn!(err = %e, "could not open browser");
                        let _ = dispatch
                            .tx_evt
                            .send(AppEvent::Toast(
                                "Could not open a browser, copy the URL instead".to_owned(),
                            ))
                            .await;
                    }
                    Err(e) => tracing::warn!(err = %e, "browser task failed"),
                }
            }
        }
    }
}
