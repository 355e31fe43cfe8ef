//! Default collections written on first access to an empty store.

use shopfront_core::comment::Comment;
use shopfront_core::product::{ProductRecord, ProductSize};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x200";

pub fn default_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            id: 1,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            name: "Apple iPhone 14".to_string(),
            count: 5,
            size: ProductSize {
                width: 146.7,
                height: 71.5,
            },
            weight: "172g".to_string(),
        },
        ProductRecord {
            id: 2,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            name: "Samsung Galaxy S23".to_string(),
            count: 3,
            size: ProductSize {
                width: 151.0,
                height: 70.6,
            },
            weight: "168g".to_string(),
        },
    ]
}

pub fn default_comments() -> Vec<Comment> {
    vec![Comment {
        id: 1,
        product_id: 1,
        description: "Great phone with excellent camera quality!".to_string(),
        date: "14:30 15.08.2024".to_string(),
    }]
}
