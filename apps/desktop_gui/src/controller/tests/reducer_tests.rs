use super::*;

use client_core::{CategoryApiError, Notice, RemoteOutcome};
use shared::{
    domain::{Category, CategoryId},
    error::{ApiError, ErrorCode},
};

fn sample_image() -> PreviewImage {
    PreviewImage {
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
    }
}

fn clothes() -> Category {
    Category::new(CategoryId(1), "Clothes", "http://x/1.png")
}

#[test]
fn remote_outcomes_flow_into_category_state() {
    let mut state = GuiState::default();
    reduce(
        &mut state,
        UiEvent::Remote(RemoteOutcome::Fetched(Ok(vec![clothes()]))),
    );
    reduce(
        &mut state,
        UiEvent::Remote(RemoteOutcome::Deleted {
            id: CategoryId(1),
            result: Err(CategoryApiError::Status {
                method: "DELETE",
                url: "http://x/api/v1/categories/1".to_string(),
                status: 500,
                error: ApiError::new(ErrorCode::Internal, "boom"),
            }),
        }),
    );

    assert_eq!(state.categories.categories(), &[clothes()]);
    assert_eq!(
        state.categories.notice(),
        Some(&Notice::Error("Error deleting category".to_string()))
    );
}

#[test]
fn image_fetch_is_claimed_once_per_url() {
    let mut state = GuiState::default();
    assert!(state.claim_image_fetch("http://x/1.png"));
    assert!(!state.claim_image_fetch("http://x/1.png"));
    assert!(!state.claim_image_fetch(""));

    reduce(
        &mut state,
        UiEvent::CardImageLoaded {
            url: "http://x/1.png".to_string(),
            image: sample_image(),
        },
    );
    assert!(matches!(
        state.images.get("http://x/1.png"),
        Some(CardImage::Ready { texture: None, .. })
    ));
    assert!(!state.claim_image_fetch("http://x/1.png"));
}

#[test]
fn released_claim_can_be_retried() {
    let mut state = GuiState::default();
    assert!(state.claim_image_fetch("http://x/2.png"));
    state.release_image_fetch("http://x/2.png");
    assert!(state.claim_image_fetch("http://x/2.png"));
}

#[test]
fn failed_image_is_remembered() {
    let mut state = GuiState::default();
    state.claim_image_fetch("http://x/broken.png");
    reduce(
        &mut state,
        UiEvent::CardImageFailed {
            url: "http://x/broken.png".to_string(),
            reason: "unsupported image format".to_string(),
        },
    );

    assert!(matches!(
        state.images.get("http://x/broken.png"),
        Some(CardImage::Failed(reason)) if reason == "unsupported image format"
    ));
    state.release_image_fetch("http://x/broken.png");
    assert!(state.images.contains_key("http://x/broken.png"));
}

#[test]
fn startup_errors_are_kept_for_the_banner() {
    let mut state = GuiState::default();
    reduce(
        &mut state,
        UiEvent::Error(UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: invalid api base url 'nope': relative URL without a base",
        )),
    );

    assert!(state.status.starts_with("Configuration error:"));
    assert!(state.startup_error.is_some());

    reduce(
        &mut state,
        UiEvent::Error(UiError::from_message(
            UiErrorContext::General,
            "UI command queue is full; please retry",
        )),
    );
    assert!(state.status.starts_with("Transport error:"));
    assert_eq!(
        state.startup_error.as_ref().map(UiError::context),
        Some(UiErrorContext::BackendStartup)
    );
}

#[test]
fn info_replaces_status_line() {
    let mut state = GuiState::default();
    reduce(&mut state, UiEvent::Info("Backend worker ready".to_string()));
    assert_eq!(state.status, "Backend worker ready");
}
