//! REST client for the product/comment collection API.
//!
//! Every request runs under a deadline (3 s by default) that covers
//! sending, the status check, and reading the body; on expiry the request
//! future is dropped, which cancels it. Non-2xx statuses, transport
//! failures and timeouts all surface as [`RemoteError`]. Nothing is
//! retried here.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use shopfront_core::backend::CatalogBackend;
use shopfront_core::comment::{Comment, NewComment};
use shopfront_core::product::{Product, ProductFormData, ProductRecord};
use shopfront_core::types::DbId;

use crate::payload::{CreateProductBody, UpdateProductBody};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Per-request deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP client for one collection API endpoint.
pub struct CatalogApi {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

/// Errors from the collection API layer.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, TLS, decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request did not complete before the deadline.
    #[error("Request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },
}

impl CatalogApi {
    /// Create a client for the API rooted at `api_url`,
    /// e.g. `http://localhost:3001`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch all products, then each product's comments concurrently.
    ///
    /// If any comment fetch fails the whole listing fails; no product is
    /// degraded to an empty comment list.
    pub async fn list_products(&self) -> Result<Vec<Product>, RemoteError> {
        let records: Vec<ProductRecord> =
            self.fetch_json(self.client.get(self.url("products"))).await?;

        try_join_all(records.into_iter().map(|record| async move {
            let comments = self.comments_for(record.id).await?;
            Ok::<_, RemoteError>(record.with_comments(comments))
        }))
        .await
    }

    /// `POST /products`. The new product starts with no comments.
    pub async fn create_product(&self, form: &ProductFormData) -> Result<Product, RemoteError> {
        let record: ProductRecord = self
            .fetch_json(
                self.client
                    .post(self.url("products"))
                    .json(&CreateProductBody::from(form)),
            )
            .await?;

        tracing::debug!(product_id = record.id, "Created remote product");
        Ok(record.with_comments(Vec::new()))
    }

    /// `PATCH /products/{id}`, then re-read the product's comments since
    /// the patch does not return them.
    pub async fn update_product(
        &self,
        id: DbId,
        form: &ProductFormData,
    ) -> Result<Product, RemoteError> {
        let record: ProductRecord = self
            .fetch_json(
                self.client
                    .patch(self.url(&format!("products/{id}")))
                    .json(&UpdateProductBody::new(id, form)),
            )
            .await?;
        let comments = self.comments_for(id).await?;

        tracing::debug!(product_id = id, "Updated remote product");
        Ok(record.with_comments(comments))
    }

    /// `DELETE /products/{id}`, then delete each of its comments
    /// concurrently. Any failed sub-request fails the call.
    pub async fn delete_product(&self, id: DbId) -> Result<DbId, RemoteError> {
        self.execute(self.client.delete(self.url(&format!("products/{id}"))))
            .await?;

        let comments = self.comments_for(id).await?;
        try_join_all(comments.iter().map(|comment| {
            self.execute(
                self.client
                    .delete(self.url(&format!("comments/{}", comment.id))),
            )
        }))
        .await?;

        tracing::debug!(
            product_id = id,
            comments_removed = comments.len(),
            "Deleted remote product"
        );
        Ok(id)
    }

    /// `POST /comments` with a locally stamped date.
    pub async fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> Result<Comment, RemoteError> {
        let body = NewComment::new(product_id, description);
        let comment: Comment = self
            .fetch_json(self.client.post(self.url("comments")).json(&body))
            .await?;

        tracing::debug!(comment_id = comment.id, product_id, "Created remote comment");
        Ok(comment)
    }

    /// `DELETE /comments/{id}`.
    pub async fn delete_comment(&self, comment_id: DbId) -> Result<DbId, RemoteError> {
        self.execute(
            self.client
                .delete(self.url(&format!("comments/{comment_id}"))),
        )
        .await?;
        Ok(comment_id)
    }

    // ---- private helpers ----

    /// `GET /comments?productId={id}`.
    async fn comments_for(&self, product_id: DbId) -> Result<Vec<Comment>, RemoteError> {
        self.fetch_json(
            self.client
                .get(self.url("comments"))
                .query(&[("productId", product_id)]),
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Send a request and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        self.within_deadline(request, |response| async move {
            Ok::<T, RemoteError>(response.json::<T>().await?)
        })
        .await
    }

    /// Send a request, discarding the body.
    async fn execute(&self, request: RequestBuilder) -> Result<(), RemoteError> {
        self.within_deadline(request, |_| async { Ok::<(), RemoteError>(()) }).await
    }

    /// Run the request and `read` under the configured deadline.
    async fn within_deadline<T, F, Fut>(
        &self,
        request: RequestBuilder,
        read: F,
    ) -> Result<T, RemoteError>
    where
        F: FnOnce(reqwest::Response) -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let request = request.build()?;
        let url = request.url().to_string();
        tracing::debug!(method = %request.method(), url = %url, "Catalog API request");

        let work = async {
            let response = self.client.execute(request).await?;
            let response = Self::ensure_success(response).await?;
            read(response).await
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout {
                url,
                after: self.timeout,
            }),
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`RemoteError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogBackend for CatalogApi {
    type Error = RemoteError;

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        CatalogApi::list_products(self).await
    }

    async fn create_product(&self, form: &ProductFormData) -> Result<Product, Self::Error> {
        CatalogApi::create_product(self, form).await
    }

    async fn update_product(
        &self,
        id: DbId,
        form: &ProductFormData,
    ) -> Result<Product, Self::Error> {
        CatalogApi::update_product(self, id, form).await
    }

    async fn delete_product(&self, id: DbId) -> Result<DbId, Self::Error> {
        CatalogApi::delete_product(self, id).await
    }

    async fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> Result<Comment, Self::Error> {
        CatalogApi::create_comment(self, product_id, description).await
    }

    async fn delete_comment(&self, comment_id: DbId) -> Result<DbId, Self::Error> {
        CatalogApi::delete_comment(self, comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = CatalogApi::new("http://localhost:3001/");
        assert_eq!(api.api_url(), "http://localhost:3001");
        assert_eq!(api.url("products/3"), "http://localhost:3001/products/3");
    }

    #[test]
    fn default_timeout_is_three_seconds() {
        let api = CatalogApi::new(DEFAULT_BASE_URL);
        assert_eq!(api.timeout(), Duration::from_secs(3));
        let api = api.with_timeout(Duration::from_millis(250));
        assert_eq!(api.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn api_error_display() {
        let err = RemoteError::ApiError {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Catalog API error (404): Not Found");
    }

    #[test]
    fn request_error_display() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = RemoteError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
