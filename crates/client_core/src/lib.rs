use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{Category, CategoryFields, CategoryId},
    error::ApiError,
};
use tracing::{debug, info, warn};

pub mod config;
pub mod controller;
pub mod error;

pub use config::{load_settings, ClientSettings, DEFAULT_API_BASE_URL};
pub use controller::{
    CategoryListController, CategoryListState, DraftError, EditTarget, Notice, RemoteCommand,
    RemoteOutcome,
};
pub use error::CategoryApiError;

/// Remote `categories` collection.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Returns an empty list when the remote answers with anything but an array.
    ///
    /// Decoding is all or nothing: one entry without a numeric `id` or a
    /// string `name` and `image` fails the whole listing with
    /// [`CategoryApiError::Decode`].
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryApiError>;
    async fn create_category(&self, fields: &CategoryFields)
        -> Result<Category, CategoryApiError>;
    async fn update_category(&self, category: &Category) -> Result<Category, CategoryApiError>;
    async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryApiError>;
}

#[async_trait]
impl<T> CategoryApi for std::sync::Arc<T>
where
    T: CategoryApi + ?Sized,
{
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryApiError> {
        (**self).list_categories().await
    }

    async fn create_category(
        &self,
        fields: &CategoryFields,
    ) -> Result<Category, CategoryApiError> {
        (**self).create_category(fields).await
    }

    async fn update_category(&self, category: &Category) -> Result<Category, CategoryApiError> {
        (**self).update_category(category).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryApiError> {
        (**self).delete_category(id).await
    }
}

#[derive(Clone)]
pub struct HttpCategoryApi {
    http: Client,
    base_url: String,
}

impl fmt::Debug for HttpCategoryApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCategoryApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpCategoryApi {
    pub fn new(base_url: &str) -> Result<Self, CategoryApiError> {
        Ok(Self {
            http: Client::new(),
            base_url: config::normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, CategoryApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build().map_err(CategoryApiError::ClientBuild)?,
            base_url: config::normalize_base_url(&settings.api_base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    fn item_url(&self, id: CategoryId) -> String {
        format!("{}/categories/{}", self.base_url, id)
    }

    /// Downloads raw image bytes for a category card.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, CategoryApiError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| transport("GET", url, source))?;
        let res = ensure_success("GET", url, res).await?;
        let bytes = res
            .bytes()
            .await
            .map_err(|source| transport("GET", url, source))?;
        Ok(bytes.to_vec())
    }
}

fn transport(method: &'static str, url: &str, source: reqwest::Error) -> CategoryApiError {
    CategoryApiError::Transport {
        method,
        url: url.to_string(),
        source,
    }
}

async fn ensure_success(
    method: &'static str,
    url: &str,
    res: Response,
) -> Result<Response, CategoryApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    warn!(method, url = %url, status = status.as_u16(), "remote call rejected");
    Err(CategoryApiError::Status {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        error: ApiError::from_response(status.as_u16(), &body),
    })
}

async fn decode_json<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    res: Response,
) -> Result<T, CategoryApiError> {
    let bytes = res
        .bytes()
        .await
        .map_err(|source| transport(method, url, source))?;
    serde_json::from_slice(&bytes).map_err(|source| CategoryApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl CategoryApi for HttpCategoryApi {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryApiError> {
        let url = self.collection_url();
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| transport("GET", &url, source))?;
        let res = ensure_success("GET", &url, res).await?;
        let body: Value = decode_json("GET", &url, res).await?;

        let Value::Array(_) = body else {
            debug!(url = %url, "category listing was not an array; treating as empty");
            return Ok(Vec::new());
        };
        let categories: Vec<Category> =
            serde_json::from_value(body).map_err(|source| CategoryApiError::Decode {
                url: url.clone(),
                source,
            })?;
        info!(count = categories.len(), "fetched categories");
        Ok(categories)
    }

    async fn create_category(
        &self,
        fields: &CategoryFields,
    ) -> Result<Category, CategoryApiError> {
        // The collection endpoint takes creates with a trailing slash.
        let url = format!("{}/", self.collection_url());
        let res = self
            .http
            .post(&url)
            .json(fields)
            .send()
            .await
            .map_err(|source| transport("POST", &url, source))?;
        let res = ensure_success("POST", &url, res).await?;
        let created: Category = decode_json("POST", &url, res).await?;
        info!(id = %created.id, name = %created.name, "created category");
        Ok(created)
    }

    async fn update_category(&self, category: &Category) -> Result<Category, CategoryApiError> {
        let url = self.item_url(category.id);
        let res = self
            .http
            .put(&url)
            .json(category)
            .send()
            .await
            .map_err(|source| transport("PUT", &url, source))?;
        let res = ensure_success("PUT", &url, res).await?;
        let updated: Category = decode_json("PUT", &url, res).await?;
        info!(id = %updated.id, "updated category");
        Ok(updated)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryApiError> {
        let url = self.item_url(id);
        let res = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| transport("DELETE", &url, source))?;
        ensure_success("DELETE", &url, res).await?;
        info!(%id, "deleted category");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
