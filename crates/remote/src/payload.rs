//! Request bodies in the shape the collection API stores.

use serde::Serialize;
use shopfront_core::comment::Comment;
use shopfront_core::product::{ProductFormData, ProductSize};
use shopfront_core::types::DbId;

/// Body of `POST /products`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody<'a> {
    pub image_url: &'a str,
    pub name: &'a str,
    pub count: i64,
    pub size: ProductSize,
    pub weight: &'a str,
    pub comments: Vec<Comment>,
}

impl<'a> From<&'a ProductFormData> for CreateProductBody<'a> {
    fn from(form: &'a ProductFormData) -> Self {
        Self {
            image_url: &form.image_url,
            name: &form.name,
            count: form.count,
            size: form.size(),
            weight: &form.weight,
            comments: Vec::new(),
        }
    }
}

/// Body of `PATCH /products/{id}`. Comments are left untouched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody<'a> {
    pub id: DbId,
    pub image_url: &'a str,
    pub name: &'a str,
    pub count: i64,
    pub size: ProductSize,
    pub weight: &'a str,
}

impl<'a> UpdateProductBody<'a> {
    pub fn new(id: DbId, form: &'a ProductFormData) -> Self {
        Self {
            id,
            image_url: &form.image_url,
            name: &form.name,
            count: form.count,
            size: form.size(),
            weight: &form.weight,
        }
    }
}
