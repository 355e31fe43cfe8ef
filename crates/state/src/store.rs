//! Owner of the products state.
//!
//! [`CatalogStore`] is the only writer of its [`ProductsState`]. Each
//! operation calls the facade and dispatches the confirmed result;
//! failed mutations leave the state untouched and hand the error back to
//! the caller. Every dispatch publishes a snapshot to subscribers.

use shopfront_core::backend::CatalogBackend;
use shopfront_core::comment::Comment;
use shopfront_core::product::{Product, ProductFormData};
use shopfront_core::sorting::SortMode;
use shopfront_core::types::DbId;
use shopfront_provider::{DataProvider, ProviderResult};
use tokio::sync::watch;

use crate::state::{Action, ProductsState};

pub struct CatalogStore<R, L> {
    provider: DataProvider<R, L>,
    state: ProductsState,
    snapshots: watch::Sender<ProductsState>,
}

impl<R, L> CatalogStore<R, L>
where
    R: CatalogBackend,
    L: CatalogBackend,
{
    pub fn new(provider: DataProvider<R, L>) -> Self {
        let state = ProductsState::default();
        let (snapshots, _) = watch::channel(state.clone());
        Self {
            provider,
            state,
            snapshots,
        }
    }

    pub fn state(&self) -> &ProductsState {
        &self.state
    }

    pub fn provider(&self) -> &DataProvider<R, L> {
        &self.provider
    }

    /// Receive a snapshot after every dispatched action.
    pub fn subscribe(&self) -> watch::Receiver<ProductsState> {
        self.snapshots.subscribe()
    }

    /// Apply `action` and publish the new state.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatching catalog action");
        self.state.reduce(action);
        self.snapshots.send_replace(self.state.clone());
    }

    /// Load the product list. Returns how many products were loaded.
    pub async fn fetch_products(&mut self) -> ProviderResult<usize, L> {
        self.dispatch(Action::FetchStarted);
        let result = self.provider.list_products().await;
        match result {
            Ok(served) => {
                tracing::info!(
                    backend = %served.backend(),
                    count = served.value().len(),
                    "Products loaded"
                );
                Ok(served.map(|items| {
                    let count = items.len();
                    self.dispatch(Action::FetchSucceeded(items));
                    count
                }))
            }
            Err(e) => {
                self.dispatch(Action::FetchFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn add_product(&mut self, form: &ProductFormData) -> ProviderResult<Product, L> {
        let served = self.provider.create_product(form).await?;
        self.dispatch(Action::ProductCreated(served.value().clone()));
        Ok(served)
    }

    pub async fn update_product(
        &mut self,
        id: DbId,
        form: &ProductFormData,
    ) -> ProviderResult<Product, L> {
        let served = self.provider.update_product(id, form).await?;
        self.dispatch(Action::ProductUpdated(served.value().clone()));
        Ok(served)
    }

    pub async fn delete_product(&mut self, id: DbId) -> ProviderResult<DbId, L> {
        let served = self.provider.delete_product(id).await?;
        self.dispatch(Action::ProductDeleted(*served.value()));
        Ok(served)
    }

    pub async fn add_comment(
        &mut self,
        product_id: DbId,
        description: &str,
    ) -> ProviderResult<Comment, L> {
        let served = self.provider.create_comment(product_id, description).await?;
        self.dispatch(Action::CommentAdded(served.value().clone()));
        Ok(served)
    }

    pub async fn delete_comment(&mut self, comment_id: DbId) -> ProviderResult<DbId, L> {
        let served = self.provider.delete_comment(comment_id).await?;
        self.dispatch(Action::CommentDeleted(*served.value()));
        Ok(served)
    }

    pub fn set_sort_by(&mut self, mode: SortMode) {
        self.dispatch(Action::SortChanged(mode));
    }

    /// Products in the current sort order.
    pub fn sorted_items(&self) -> Vec<&Product> {
        self.state.sorted_items()
    }

    pub fn find_product(&self, id: DbId) -> Option<&Product> {
        self.state.find_product(id)
    }
}
