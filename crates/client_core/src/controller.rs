//! Category list state and its reconciliation with the remote collection.
//!
//! [`CategoryListState`] never talks to the network. User intents that need a
//! remote call produce a [`RemoteCommand`]; whoever runs the command feeds the
//! resulting [`RemoteOutcome`] back through [`CategoryListState::apply`].
//! [`CategoryListController`] is the direct-await driver for the same state.

use serde_json::{Map, Value};
use shared::domain::{Category, CategoryFields, CategoryId, DraftField};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{error::CategoryApiError, CategoryApi};

pub const FETCH_FAILED: &str = "Error fetching categories";
pub const CREATE_SUCCEEDED: &str = "Category added successfully";
pub const CREATE_FAILED: &str = "Error adding category";
pub const UPDATE_SUCCEEDED: &str = "Category updated successfully";
pub const UPDATE_FAILED: &str = "Error updating category";
pub const DELETE_SUCCEEDED: &str = "Category deleted successfully";
pub const DELETE_FAILED: &str = "Error deleting category";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditTarget {
    #[default]
    NoEdit,
    Editing(CategoryId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{} is required", .0.label())]
    MissingField(DraftField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    FetchAll,
    Create(CategoryFields),
    Update(Category),
    Delete(CategoryId),
}

impl RemoteCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCommand::FetchAll => "fetch_all",
            RemoteCommand::Create(_) => "create",
            RemoteCommand::Update(_) => "update",
            RemoteCommand::Delete(_) => "delete",
        }
    }

    /// The failure outcome for a command that never reached the remote.
    pub fn unavailable(self, reason: impl Into<String>) -> RemoteOutcome {
        let err = CategoryApiError::Unavailable(reason.into());
        match self {
            RemoteCommand::FetchAll => RemoteOutcome::Fetched(Err(err)),
            RemoteCommand::Create(_) => RemoteOutcome::Created(Err(err)),
            RemoteCommand::Update(category) => RemoteOutcome::Updated {
                id: category.id,
                result: Err(err),
            },
            RemoteCommand::Delete(id) => RemoteOutcome::Deleted {
                id,
                result: Err(err),
            },
        }
    }

    pub async fn execute<A>(self, api: &A) -> RemoteOutcome
    where
        A: CategoryApi + ?Sized,
    {
        debug!(command = self.name(), "executing remote command");
        match self {
            RemoteCommand::FetchAll => RemoteOutcome::Fetched(api.list_categories().await),
            RemoteCommand::Create(fields) => {
                RemoteOutcome::Created(api.create_category(&fields).await)
            }
            RemoteCommand::Update(category) => RemoteOutcome::Updated {
                id: category.id,
                result: api.update_category(&category).await,
            },
            RemoteCommand::Delete(id) => RemoteOutcome::Deleted {
                id,
                result: api.delete_category(id).await,
            },
        }
    }
}

#[derive(Debug)]
pub enum RemoteOutcome {
    Fetched(Result<Vec<Category>, CategoryApiError>),
    Created(Result<Category, CategoryApiError>),
    Updated {
        id: CategoryId,
        result: Result<Category, CategoryApiError>,
    },
    Deleted {
        id: CategoryId,
        result: Result<(), CategoryApiError>,
    },
}

/// Local mirror of the remote collection plus the form drafts.
///
/// The new-category buffer is always resident; the edit buffer only means
/// something while `edit_target` is `Editing`.
#[derive(Debug, Default)]
pub struct CategoryListState {
    categories: Vec<Category>,
    new_fields: CategoryFields,
    edit_target: EditTarget,
    edit_fields: CategoryFields,
    edit_extra: Map<String, Value>,
    notice: Option<Notice>,
    initialized: bool,
}

impl CategoryListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn new_draft(&self) -> &CategoryFields {
        &self.new_fields
    }

    pub fn edit_target(&self) -> EditTarget {
        self.edit_target
    }

    pub fn is_editing(&self, id: CategoryId) -> bool {
        self.edit_target == EditTarget::Editing(id)
    }

    /// The edit draft as it would be sent on submit.
    pub fn edit_draft(&self) -> Option<Category> {
        match self.edit_target {
            EditTarget::NoEdit => None,
            EditTarget::Editing(id) => Some(Category {
                id,
                name: self.edit_fields.name.clone(),
                image: self.edit_fields.image.clone(),
                extra: self.edit_extra.clone(),
            }),
        }
    }

    /// Fields of whichever draft currently receives input.
    pub fn active_fields(&self) -> &CategoryFields {
        match self.edit_target {
            EditTarget::NoEdit => &self.new_fields,
            EditTarget::Editing(_) => &self.edit_fields,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns the initial fetch exactly once per state lifetime.
    pub fn initialize(&mut self) -> Option<RemoteCommand> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        Some(RemoteCommand::FetchAll)
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        match self.edit_target {
            EditTarget::Editing(_) => self.edit_fields.set(field, value),
            EditTarget::NoEdit => self.new_fields.set(field, value),
        }
    }

    /// Starts editing `category`. Any in-progress new-category input is discarded.
    pub fn begin_edit(&mut self, category: &Category) {
        self.edit_target = EditTarget::Editing(category.id);
        self.edit_fields = category.fields();
        self.edit_extra = category.extra.clone();
        self.new_fields = CategoryFields::default();
    }

    pub fn begin_edit_by_id(&mut self, id: CategoryId) -> bool {
        let Some(category) = self.categories.iter().find(|c| c.id == id).cloned() else {
            return false;
        };
        self.begin_edit(&category);
        true
    }

    pub fn submit_draft(&self) -> Result<RemoteCommand, DraftError> {
        if let Some(field) = self.active_fields().first_missing() {
            return Err(DraftError::MissingField(field));
        }

        Ok(match self.edit_draft() {
            Some(category) => RemoteCommand::Update(category),
            None => RemoteCommand::Create(self.new_fields.clone()),
        })
    }

    pub fn delete_category(&self, id: CategoryId) -> RemoteCommand {
        RemoteCommand::Delete(id)
    }

    pub fn apply(&mut self, outcome: RemoteOutcome) {
        match outcome {
            RemoteOutcome::Fetched(Ok(categories)) => {
                info!(count = categories.len(), "adopted category collection");
                self.categories = categories;
            }
            RemoteOutcome::Fetched(Err(err)) => {
                warn!("failed to fetch categories: {err}");
                self.notice = Some(Notice::Error(FETCH_FAILED.to_string()));
            }
            RemoteOutcome::Created(Ok(category)) => {
                self.categories.push(category);
                self.new_fields = CategoryFields::default();
                self.notice = Some(Notice::Success(CREATE_SUCCEEDED.to_string()));
            }
            RemoteOutcome::Created(Err(err)) => {
                warn!("failed to create category: {err}");
                self.notice = Some(Notice::Error(CREATE_FAILED.to_string()));
            }
            RemoteOutcome::Updated {
                id,
                result: Ok(updated),
            } => {
                for entry in self.categories.iter_mut().filter(|c| c.id == id) {
                    *entry = updated.clone();
                }
                // A later beginEdit on another category must survive this completion.
                if self.is_editing(id) {
                    self.clear_edit();
                }
                self.notice = Some(Notice::Success(UPDATE_SUCCEEDED.to_string()));
            }
            RemoteOutcome::Updated { id, result: Err(err) } => {
                warn!(%id, "failed to update category: {err}");
                self.notice = Some(Notice::Error(UPDATE_FAILED.to_string()));
            }
            RemoteOutcome::Deleted { id, result: Ok(()) } => {
                self.categories.retain(|c| c.id != id);
                if self.is_editing(id) {
                    self.clear_edit();
                }
                self.notice = Some(Notice::Success(DELETE_SUCCEEDED.to_string()));
            }
            RemoteOutcome::Deleted { id, result: Err(err) } => {
                warn!(%id, "failed to delete category: {err}");
                self.notice = Some(Notice::Error(DELETE_FAILED.to_string()));
            }
        }
    }

    fn clear_edit(&mut self) {
        self.edit_target = EditTarget::NoEdit;
        self.edit_fields = CategoryFields::default();
        self.edit_extra = Map::new();
    }
}

/// Drives a [`CategoryListState`] by awaiting each remote call in turn.
pub struct CategoryListController<A> {
    api: A,
    state: CategoryListState,
}

impl<A: CategoryApi> CategoryListController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: CategoryListState::new(),
        }
    }

    pub fn state(&self) -> &CategoryListState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn initialize(&mut self) {
        if let Some(cmd) = self.state.initialize() {
            self.run(cmd).await;
        }
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.state.update_draft_field(field, value);
    }

    pub fn begin_edit(&mut self, category: &Category) {
        self.state.begin_edit(category);
    }

    pub fn begin_edit_by_id(&mut self, id: CategoryId) -> bool {
        self.state.begin_edit_by_id(id)
    }

    pub async fn submit_draft(&mut self) -> Result<(), DraftError> {
        let cmd = self.state.submit_draft()?;
        self.run(cmd).await;
        Ok(())
    }

    pub async fn delete_category(&mut self, id: CategoryId) {
        let cmd = self.state.delete_category(id);
        self.run(cmd).await;
    }

    async fn run(&mut self, cmd: RemoteCommand) {
        let outcome = cmd.execute(&self.api).await;
        self.state.apply(outcome);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
