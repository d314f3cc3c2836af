//! Runtime bridge between UI command queue and backend event intake.
//!
//! Every command runs on its own task, so completions reach the UI in
//! whatever order the remote answers.

use std::thread;

use client_core::{ClientSettings, HttpCategoryApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_preview_image;

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpCategoryApi::from_settings(&settings) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("invalid client settings: {err}");
                    let reason = err.to_string();
                    while let Ok(cmd) = cmd_rx.recv() {
                        if ui_tx.try_send(refuse_command(cmd, &reason)).is_err() {
                            tracing::warn!("ui event queue unavailable; dropping backend event");
                        }
                    }
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Backend worker ready ({})",
                api.base_url()
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    handle_command(&api, cmd, &ui_tx).await;
                });
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Answers a command the worker cannot run because the client never started.
fn refuse_command(cmd: BackendCommand, reason: &str) -> UiEvent {
    match cmd {
        BackendCommand::Remote(cmd) => UiEvent::Remote(cmd.unavailable(reason)),
        BackendCommand::FetchCardImage { url } => UiEvent::CardImageFailed {
            url,
            reason: reason.to_string(),
        },
    }
}

async fn handle_command(api: &HttpCategoryApi, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::Remote(cmd) => UiEvent::Remote(cmd.execute(api).await),
        BackendCommand::FetchCardImage { url } => match api.download_image(&url).await {
            Ok(bytes) => match decode_preview_image(&bytes) {
                Ok(image) => UiEvent::CardImageLoaded { url, image },
                Err(reason) => UiEvent::CardImageFailed { url, reason },
            },
            Err(err) => UiEvent::CardImageFailed {
                url,
                reason: err.to_string(),
            },
        },
    };

    if ui_tx.try_send(event).is_err() {
        tracing::warn!("ui event queue unavailable; dropping backend event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{CategoryListState, Notice, RemoteCommand};
    use crossbeam_channel::bounded;
    use std::time::Duration;

    #[test]
    fn refused_fetch_surfaces_as_fetch_failure() {
        let mut state = CategoryListState::new();
        let cmd = state.initialize().expect("first initialize");

        match refuse_command(BackendCommand::Remote(cmd), "invalid api base url") {
            UiEvent::Remote(outcome) => state.apply(outcome),
            _ => panic!("expected a remote outcome"),
        }

        assert!(state.categories().is_empty());
        assert_eq!(
            state.notice(),
            Some(&Notice::Error("Error fetching categories".to_string()))
        );
    }

    #[test]
    fn refused_image_fetch_is_marked_failed() {
        let event = refuse_command(
            BackendCommand::FetchCardImage {
                url: "http://x/1.png".to_string(),
            },
            "invalid api base url",
        );
        assert!(matches!(
            event,
            UiEvent::CardImageFailed { url, reason }
                if url == "http://x/1.png" && reason == "invalid api base url"
        ));
    }

    #[test]
    fn worker_with_bad_settings_still_answers_initial_fetch() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        cmd_tx
            .send(BackendCommand::Remote(RemoteCommand::FetchAll))
            .expect("queue fetch");

        let settings = ClientSettings {
            api_base_url: "not a url".to_string(),
            ..ClientSettings::default()
        };
        launch(settings, cmd_rx, ui_tx);

        let mut state = CategoryListState::new();
        let mut saw_startup_error = false;
        for _ in 0..2 {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("ui event") {
                UiEvent::Error(err) => {
                    saw_startup_error = err.context() == UiErrorContext::BackendStartup;
                }
                UiEvent::Remote(outcome) => state.apply(outcome),
                _ => panic!("unexpected ui event"),
            }
        }
        drop(cmd_tx);

        assert!(saw_startup_error);
        assert_eq!(
            state.notice().map(Notice::message),
            Some("Error fetching categories")
        );
    }
}
