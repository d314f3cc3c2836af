//! Backend commands queued from UI to backend worker.

use client_core::RemoteCommand;

pub enum BackendCommand {
    Remote(RemoteCommand),
    FetchCardImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Remote(cmd) => cmd.name(),
            BackendCommand::FetchCardImage { .. } => "fetch_card_image",
        }
    }
}
