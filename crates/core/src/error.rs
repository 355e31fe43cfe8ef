use crate::types::DbId;

/// Domain-level failures shared by every backend and consumer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn product_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "product",
            id,
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{field}: {}", messages.join(", "))
            })
            .collect();
        // HashMap iteration order is unstable; keep messages deterministic.
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}
