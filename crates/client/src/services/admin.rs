//! Admin endpoints: user administration and global catalog management.

use eazika_core::{AdminUserPage, ProductCategory};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ApiClient, HttpRequest, RequestOptions};

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<ProductCategory>,
}

/// `/admin/*` endpoints.
#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /admin/users/get-all-users?page=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_all_users(&self, page: u32, limit: u32) -> Result<AdminUserPage, ApiError> {
        self.client
            .request(
                HttpRequest::get("/admin/users/get-all-users")
                    .query("page", page.to_string())
                    .query("limit", limit.to_string()),
                RequestOptions::default(),
            )
            .await
    }

    /// `GET /admin/products/get-categories`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn get_all_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        let envelope: CategoriesEnvelope = self
            .client
            .request(
                HttpRequest::get("/admin/products/get-categories"),
                RequestOptions::default(),
            )
            .await?;
        Ok(envelope.categories)
    }

    /// `POST /admin/products/create-category`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> Result<ProductCategory, ApiError> {
        self.client
            .request(
                HttpRequest::post(
                    "/admin/products/create-category",
                    serde_json::json!({"name": name, "description": description}),
                ),
                RequestOptions::default(),
            )
            .await
    }

    /// `POST /admin/products/add-global`
    ///
    /// The global-product form is free-shaped on the admin side; the body
    /// is passed through as-is.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn create_global_product(&self, product: Value) -> Result<Value, ApiError> {
        self.client
            .request(
                HttpRequest::post("/admin/products/add-global", product),
                RequestOptions::default(),
            )
            .await
    }

    /// `POST /admin/products/add-global-in-bluk` (endpoint spelling is the
    /// server's).
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the pipeline.
    pub async fn create_global_products_bulk(&self, products: Vec<Value>) -> Result<Value, ApiError> {
        self.client
            .request(
                HttpRequest::post(
                    "/admin/products/add-global-in-bluk",
                    serde_json::json!({"products": products}),
                ),
                RequestOptions::default(),
            )
            .await
    }
}
