//! Product entity, its stored shape, and the edit buffer used to build
//! create/update payloads.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::comment::Comment;
use crate::error::CoreError;
use crate::types::DbId;

/// Default image reference pre-filled into a fresh edit buffer.
pub const DEFAULT_IMAGE_URL: &str = "";
/// Default count pre-filled into a fresh edit buffer.
pub const DEFAULT_COUNT: i64 = 1;
/// Default width/height pre-filled into a fresh edit buffer.
pub const DEFAULT_DIMENSION: f64 = 100.0;

/// Physical size of a product, nested under `size` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductSize {
    pub width: f64,
    pub height: f64,
}

/// A product as stored in a collection, without its comments.
///
/// Both backends persist this shape; comments live in their own
/// collection and are joined on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: DbId,
    pub image_url: String,
    pub name: String,
    pub count: i64,
    pub size: ProductSize,
    pub weight: String,
}

/// A denormalized product: the stored record with its comments embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub image_url: String,
    pub name: String,
    pub count: i64,
    pub size: ProductSize,
    pub weight: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Transient edit buffer for creating or updating a product.
///
/// Carries no identifier and is never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    #[validate(custom(function = "not_blank"))]
    pub image_url: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub count: i64,
    #[validate(custom(function = "positive_finite"))]
    pub width: f64,
    #[validate(custom(function = "positive_finite"))]
    pub height: f64,
    #[validate(custom(function = "not_blank"))]
    pub weight: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("is required".into());
        return Err(err);
    }
    Ok(())
}

/// Non-finite floats serialize as JSON `null` and cannot be read back.
fn positive_finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut err = ValidationError::new("finite");
        err.message = Some("must be a finite number".into());
        return Err(err);
    }
    if value <= 0.0 {
        let mut err = ValidationError::new("range");
        err.message = Some("must be greater than 0".into());
        return Err(err);
    }
    Ok(())
}

impl ProductSize {
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl ProductFormData {
    /// Validate the buffer, collapsing field failures into a single
    /// [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }

    /// The subset of [`check`](Self::check) that storage depends on: a
    /// size that survives a JSON round-trip.
    pub fn check_encodable(&self) -> Result<(), CoreError> {
        if self.size().is_finite() {
            return Ok(());
        }
        Err(CoreError::Validation(format!(
            "size must be finite, got {} x {}",
            self.width, self.height
        )))
    }

    /// The nested size object built from the flat width/height fields.
    pub fn size(&self) -> ProductSize {
        ProductSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for ProductFormData {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_IMAGE_URL.to_string(),
            name: String::new(),
            count: DEFAULT_COUNT,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            weight: String::new(),
        }
    }
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        Self {
            image_url: product.image_url.clone(),
            name: product.name.clone(),
            count: product.count,
            width: product.size.width,
            height: product.size.height,
            weight: product.weight.clone(),
        }
    }
}

impl ProductRecord {
    /// Build a stored record for a freshly assigned id.
    pub fn from_form(id: DbId, form: &ProductFormData) -> Self {
        Self {
            id,
            image_url: form.image_url.clone(),
            name: form.name.clone(),
            count: form.count,
            size: form.size(),
            weight: form.weight.clone(),
        }
    }

    /// Replace every editable field, keeping the id.
    pub fn apply_form(&mut self, form: &ProductFormData) {
        self.image_url = form.image_url.clone();
        self.name = form.name.clone();
        self.count = form.count;
        self.size = form.size();
        self.weight = form.weight.clone();
    }

    /// Embed `comments` to produce the denormalized product.
    pub fn with_comments(self, comments: Vec<Comment>) -> Product {
        Product {
            id: self.id,
            image_url: self.image_url,
            name: self.name,
            count: self.count,
            size: self.size,
            weight: self.weight,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn widget() -> ProductFormData {
        ProductFormData {
            image_url: "u".to_string(),
            name: "Widget".to_string(),
            count: 2,
            width: 10.0,
            height: 5.0,
            weight: "1kg".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(widget().check().is_ok());
    }

    #[test]
    fn default_form_needs_name_image_and_weight() {
        let err = ProductFormData::default().check().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) => {
            assert!(msg.contains("name"));
            assert!(msg.to_lowercase().contains("image"));
            assert!(msg.contains("weight"));
            assert!(!msg.contains("count"));
        });
    }

    #[test]
    fn whitespace_name_is_blank() {
        let form = ProductFormData {
            name: "   ".to_string(),
            ..widget()
        };
        assert_matches!(form.check(), Err(CoreError::Validation(msg)) if msg.starts_with("name"));
    }

    #[test]
    fn count_below_one_rejected() {
        let form = ProductFormData { count: 0, ..widget() };
        assert_matches!(form.check(), Err(CoreError::Validation(msg)) if msg.contains("count"));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let form = ProductFormData {
            width: 0.0,
            height: -1.0,
            ..widget()
        };
        let err = form.check().unwrap_err().to_string();
        assert!(err.contains("width"));
        assert!(err.contains("height"));
    }

    #[test]
    fn non_finite_dimensions_rejected() {
        for (width, height) in [
            (1.0, f64::INFINITY),
            (f64::NAN, 1.0),
            (f64::NEG_INFINITY, 2.0),
        ] {
            let form = ProductFormData {
                width,
                height,
                ..widget()
            };
            assert_matches!(form.check(), Err(CoreError::Validation(msg)) if msg.contains("finite"));
            assert_matches!(form.check_encodable(), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn finite_size_is_encodable_even_if_invalid() {
        let form = ProductFormData {
            width: -3.0,
            ..widget()
        };
        assert!(form.check().is_err());
        assert!(form.check_encodable().is_ok());
    }

    #[test]
    fn record_nests_size_and_joins_comments() {
        let record = ProductRecord::from_form(7, &widget());
        assert_eq!(record.size, ProductSize { width: 10.0, height: 5.0 });

        let product = record.with_comments(Vec::new());
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Widget");
        assert!(product.comments.is_empty());
    }

    #[test]
    fn apply_form_keeps_id() {
        let mut record = ProductRecord::from_form(3, &widget());
        let edit = ProductFormData {
            name: "Gadget".to_string(),
            width: 12.5,
            ..widget()
        };
        record.apply_form(&edit);
        assert_eq!(record.id, 3);
        assert_eq!(record.name, "Gadget");
        assert_eq!(record.size.width, 12.5);
    }

    #[test]
    fn edit_buffer_prefills_from_product() {
        let product = ProductRecord::from_form(1, &widget()).with_comments(Vec::new());
        assert_eq!(ProductFormData::from(&product), widget());
    }

    #[test]
    fn wire_shape_is_camel_case_with_nested_size() {
        let json = serde_json::to_value(ProductRecord::from_form(1, &widget())).unwrap();
        assert_eq!(json["imageUrl"], "u");
        assert_eq!(json["size"]["width"], 10.0);
        assert!(json.get("comments").is_none());
    }

    #[test]
    fn product_without_comments_field_decodes_empty() {
        let json = r#"{"id":4,"imageUrl":"x","name":"n","count":1,"size":{"width":1,"height":2},"weight":"w"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.comments.is_empty());
    }
}
