//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::RemoteCommand;
    use crossbeam_channel::bounded;

    #[test]
    fn queues_command_and_leaves_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = "idle".to_string();

        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::Remote(RemoteCommand::FetchAll),
            &mut status
        ));
        assert_eq!(status, "idle");
        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::Remote(RemoteCommand::FetchAll))
        ));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Remote(RemoteCommand::FetchAll), &mut status);

        let queued = dispatch_backend_command(
            &tx,
            BackendCommand::FetchCardImage {
                url: "http://x/1.png".to_string(),
            },
            &mut status,
        );
        assert!(!queued);
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_backend() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();

        let queued = dispatch_backend_command(
            &tx,
            BackendCommand::Remote(RemoteCommand::FetchAll),
            &mut status,
        );
        assert!(!queued);
        assert!(status.contains("disconnected"));
    }
}
