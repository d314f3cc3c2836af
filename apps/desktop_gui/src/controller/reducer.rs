//! Applies backend events to the GUI state.

use std::collections::HashMap;

use client_core::CategoryListState;

use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::media::PreviewImage;

pub enum CardImage {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

#[derive(Default)]
pub struct GuiState {
    pub categories: CategoryListState,
    /// Keyed by image url so cards sharing an image share one download.
    pub images: HashMap<String, CardImage>,
    pub status: String,
    pub startup_error: Option<UiError>,
}

impl GuiState {
    /// Marks `url` as loading and reports whether a download should be queued.
    pub fn claim_image_fetch(&mut self, url: &str) -> bool {
        if url.is_empty() || self.images.contains_key(url) {
            return false;
        }
        self.images.insert(url.to_string(), CardImage::Loading);
        true
    }

    /// Forgets a claimed download that never reached the backend.
    pub fn release_image_fetch(&mut self, url: &str) {
        if matches!(self.images.get(url), Some(CardImage::Loading)) {
            self.images.remove(url);
        }
    }
}

pub fn reduce(state: &mut GuiState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::Remote(outcome) => {
            state.categories.apply(outcome);
        }
        UiEvent::CardImageLoaded { url, image } => {
            state.images.insert(
                url,
                CardImage::Ready {
                    image,
                    texture: None,
                },
            );
        }
        UiEvent::CardImageFailed { url, reason } => {
            tracing::warn!("card image {url} unavailable: {reason}");
            state.images.insert(url, CardImage::Failed(reason));
        }
        UiEvent::Error(err) => {
            state.status = format!("{} error: {}", err_label(err.category()), err.message());
            if err.context() == UiErrorContext::BackendStartup {
                state.startup_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
