//! Product comments.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timestamp::comment_date_now;
use crate::types::DbId;

/// A comment attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub product_id: DbId,
    pub description: String,
    /// Creation time rendered as `H:MM DD.MM.YYYY`.
    pub date: String,
}

/// A comment that has not been assigned an id yet.
///
/// The timestamp is stamped locally when the value is built, never by a
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub product_id: DbId,
    pub description: String,
    pub date: String,
}

impl NewComment {
    pub fn new(product_id: DbId, description: &str) -> Self {
        Self {
            product_id,
            description: description.to_string(),
            date: comment_date_now(),
        }
    }

    pub fn with_id(self, id: DbId) -> Comment {
        Comment {
            id,
            product_id: self.product_id,
            description: self.description,
            date: self.date,
        }
    }
}

/// Trim a user-entered comment, rejecting text that is empty once trimmed.
pub fn normalize_description(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
