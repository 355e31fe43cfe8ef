//! Plain-text rendering of catalog entities for the terminal.

use std::fmt;

use shopfront_core::comment::Comment;
use shopfront_core::product::Product;

/// One-line summary used by `list`.
pub fn product_line(product: &Product) -> String {
    format!(
        "#{:<4} {:<32} count {:<5} {}x{}  {}  ({} comments)",
        product.id,
        product.name,
        product.count,
        product.size.width,
        product.size.height,
        product.weight,
        product.comments.len()
    )
}

/// Full product view used by `show` and after mutations.
pub fn product_detail(product: &Product) -> String {
    ProductDetail(product).to_string()
}

struct ProductDetail<'a>(&'a Product);

impl fmt::Display for ProductDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = self.0;
        writeln!(f, "#{} {}", product.id, product.name)?;
        writeln!(f, "  image:  {}", product.image_url)?;
        writeln!(f, "  count:  {}", product.count)?;
        writeln!(
            f,
            "  size:   {} x {}",
            product.size.width, product.size.height
        )?;
        writeln!(f, "  weight: {}", product.weight)?;
        if product.comments.is_empty() {
            return writeln!(f, "  no comments");
        }
        writeln!(f, "  comments:")?;
        for comment in &product.comments {
            writeln!(f, "    {}", comment_line(comment))?;
        }
        Ok(())
    }
}

pub fn comment_line(comment: &Comment) -> String {
    format!("[{}] {}  {}", comment.id, comment.date, comment.description)
}
