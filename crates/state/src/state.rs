//! The products state machine.

use shopfront_core::comment::Comment;
use shopfront_core::product::Product;
use shopfront_core::sorting::{sort_products, SortMode};
use shopfront_core::types::DbId;

/// Shown when a failed listing carries no message of its own.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// In-memory view of the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsState {
    /// Products in the order the backend returned or confirmed them.
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub sort_by: SortMode,
}

/// Every way the state can change. Mutation outcomes are dispatched only
/// after a backend confirmed them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchSucceeded(Vec<Product>),
    FetchFailed(String),
    ProductCreated(Product),
    ProductUpdated(Product),
    ProductDeleted(DbId),
    CommentAdded(Comment),
    CommentDeleted(DbId),
    SortChanged(SortMode),
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchStarted => "fetch_started",
            Self::FetchSucceeded(_) => "fetch_succeeded",
            Self::FetchFailed(_) => "fetch_failed",
            Self::ProductCreated(_) => "product_created",
            Self::ProductUpdated(_) => "product_updated",
            Self::ProductDeleted(_) => "product_deleted",
            Self::CommentAdded(_) => "comment_added",
            Self::CommentDeleted(_) => "comment_deleted",
            Self::SortChanged(_) => "sort_changed",
        }
    }
}

impl ProductsState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::FetchSucceeded(items) => {
                self.loading = false;
                self.items = items;
            }
            Action::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(if message.is_empty() {
                    FETCH_FAILED_MESSAGE.to_string()
                } else {
                    message
                });
            }
            Action::ProductCreated(product) => self.items.push(product),
            Action::ProductUpdated(product) => {
                if let Some(slot) = self.items.iter_mut().find(|p| p.id == product.id) {
                    *slot = product;
                }
            }
            Action::ProductDeleted(id) => self.items.retain(|p| p.id != id),
            Action::CommentAdded(comment) => {
                if let Some(product) = self.items.iter_mut().find(|p| p.id == comment.product_id) {
                    product.comments.push(comment);
                }
            }
            Action::CommentDeleted(id) => {
                // Sweep every product; ids are unique so at most one matches.
                for product in &mut self.items {
                    product.comments.retain(|c| c.id != id);
                }
            }
            Action::SortChanged(mode) => self.sort_by = mode,
        }
    }

    /// `items` in the current sort order. `items` itself is not reordered.
    pub fn sorted_items(&self) -> Vec<&Product> {
        sort_products(&self.items, self.sort_by)
    }

    pub fn find_product(&self, id: DbId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use shopfront_core::product::{ProductFormData, ProductRecord};

    use super::*;

    fn product(id: DbId, name: &str, count: i64) -> Product {
        let form = ProductFormData {
            image_url: "u".to_string(),
            name: name.to_string(),
            count,
            weight: "1g".to_string(),
            ..ProductFormData::default()
        };
        ProductRecord::from_form(id, &form).with_comments(Vec::new())
    }

    fn comment(id: DbId, product_id: DbId) -> Comment {
        Comment {
            id,
            product_id,
            description: format!("c{id}"),
            date: "9:00 01.01.2025".to_string(),
        }
    }

    fn loaded(items: Vec<Product>) -> ProductsState {
        let mut state = ProductsState::default();
        state.reduce(Action::FetchSucceeded(items));
        state
    }

    #[test]
    fn fetch_lifecycle() {
        let mut state = ProductsState {
            error: Some("old".to_string()),
            ..ProductsState::default()
        };

        state.reduce(Action::FetchStarted);
        assert!(state.loading);
        assert_eq!(state.error, None);

        state.reduce(Action::FetchSucceeded(vec![product(1, "a", 1)]));
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn fetch_failure_keeps_items_and_sets_message() {
        let mut state = loaded(vec![product(1, "a", 1)]);
        state.reduce(Action::FetchStarted);
        state.reduce(Action::FetchFailed("disk gone".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("disk gone"));
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn empty_failure_message_gets_default() {
        let mut state = ProductsState::default();
        state.reduce(Action::FetchFailed(String::new()));
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn create_appends_update_replaces_in_place() {
        let mut state = loaded(vec![product(1, "a", 1), product(2, "b", 2)]);
        state.reduce(Action::ProductCreated(product(3, "c", 3)));
        assert_eq!(state.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        state.reduce(Action::ProductUpdated(product(1, "z", 9)));
        assert_eq!(state.items[0].name, "z");
        assert_eq!(state.items[0].count, 9);
    }

    #[test]
    fn update_of_unloaded_product_is_ignored() {
        let mut state = loaded(vec![product(1, "a", 1)]);
        state.reduce(Action::ProductUpdated(product(5, "x", 1)));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "a");
    }

    #[test]
    fn delete_removes_by_id() {
        let mut state = loaded(vec![product(1, "a", 1), product(2, "b", 2)]);
        state.reduce(Action::ProductDeleted(1));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 2);
    }

    #[test]
    fn comment_added_to_owner_only() {
        let mut state = loaded(vec![product(1, "a", 1), product(2, "b", 2)]);
        state.reduce(Action::CommentAdded(comment(7, 2)));
        assert!(state.items[0].comments.is_empty());
        assert_eq!(state.items[1].comments, vec![comment(7, 2)]);

        // No loaded owner: no-op.
        state.reduce(Action::CommentAdded(comment(8, 99)));
        assert_eq!(state.items.iter().map(|p| p.comments.len()).sum::<usize>(), 1);
    }

    #[test]
    fn comment_deleted_sweeps_all_products() {
        let mut a = product(1, "a", 1);
        a.comments = vec![comment(1, 1), comment(2, 1)];
        let mut b = product(2, "b", 1);
        b.comments = vec![comment(3, 2)];
        let mut state = loaded(vec![a, b]);

        state.reduce(Action::CommentDeleted(2));
        assert_eq!(state.items[0].comments, vec![comment(1, 1)]);
        assert_eq!(state.items[1].comments, vec![comment(3, 2)]);
    }

    #[test]
    fn sorting_is_view_only() {
        let mut state = loaded(vec![product(1, "a", 5), product(2, "b", 1), product(3, "c", 3)]);
        state.reduce(Action::SortChanged(SortMode::Count));

        let counts: Vec<i64> = state.sorted_items().iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![1, 3, 5]);
        assert_eq!(state.items.iter().map(|p| p.count).collect::<Vec<_>>(), vec![5, 1, 3]);
    }

    #[test]
    fn find_product_by_id() {
        let state = loaded(vec![product(4, "a", 1)]);
        assert_eq!(state.find_product(4).map(|p| p.name.as_str()), Some("a"));
        assert!(state.find_product(5).is_none());
    }
}
