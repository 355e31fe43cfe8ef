//! Command-line surface and command execution.

use std::io::Write;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use shopfront_core::backend::CatalogBackend;
use shopfront_core::comment::normalize_description;
use shopfront_core::error::CoreError;
use shopfront_core::product::{ProductFormData, DEFAULT_COUNT, DEFAULT_DIMENSION};
use shopfront_core::sorting::SortMode;
use shopfront_core::types::DbId;
use shopfront_state::CatalogStore;

use crate::output;

#[derive(Debug, Parser)]
#[command(name = "shopfront", version, about = "Manage the product catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all products.
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },
    /// Show one product with its comments.
    Show { id: DbId },
    /// Create a product.
    Add(NewProductArgs),
    /// Change fields of an existing product.
    Edit {
        id: DbId,
        #[command(flatten)]
        changes: ProductChanges,
    },
    /// Delete a product and its comments.
    Delete { id: DbId },
    /// Add a comment to a product.
    Comment { product_id: DbId, text: String },
    /// Delete a comment.
    Uncomment { comment_id: DbId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    NameDesc,
    Count,
    CountDesc,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortMode::Name,
            SortArg::NameDesc => SortMode::NameDesc,
            SortArg::Count => SortMode::Count,
            SortArg::CountDesc => SortMode::CountDesc,
        }
    }
}

#[derive(Debug, Args)]
pub struct NewProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub image_url: String,
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: i64,
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub width: f64,
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub height: f64,
    #[arg(long)]
    pub weight: String,
}

impl From<NewProductArgs> for ProductFormData {
    fn from(args: NewProductArgs) -> Self {
        Self {
            image_url: args.image_url,
            name: args.name,
            count: args.count,
            width: args.width,
            height: args.height,
            weight: args.weight,
        }
    }
}

/// Fields to overwrite on `edit`. Anything left out keeps its value.
#[derive(Debug, Default, Args)]
pub struct ProductChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub count: Option<i64>,
    #[arg(long)]
    pub width: Option<f64>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub weight: Option<String>,
}

impl ProductChanges {
    pub fn apply(self, form: &mut ProductFormData) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(image_url) = self.image_url {
            form.image_url = image_url;
        }
        if let Some(count) = self.count {
            form.count = count;
        }
        if let Some(width) = self.width {
            form.width = width;
        }
        if let Some(height) = self.height {
            form.height = height;
        }
        if let Some(weight) = self.weight {
            form.weight = weight;
        }
    }
}

/// Load the catalog, run `command` against it and print the result to `out`.
pub async fn run<R, L>(
    command: Command,
    store: &mut CatalogStore<R, L>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    R: CatalogBackend,
    L: CatalogBackend,
{
    store
        .fetch_products()
        .await
        .context("Failed to fetch products")?;

    match command {
        Command::List { sort } => {
            store.set_sort_by(sort.into());
            let items = store.sorted_items();
            if items.is_empty() {
                writeln!(out, "No products")?;
            }
            for product in items {
                writeln!(out, "{}", output::product_line(product))?;
            }
        }
        Command::Show { id } => {
            let product = store
                .find_product(id)
                .ok_or_else(|| CoreError::product_not_found(id))?;
            write!(out, "{}", output::product_detail(product))?;
        }
        Command::Add(args) => {
            let form = ProductFormData::from(args);
            form.check()?;
            let served = store.add_product(&form).await?;
            tracing::info!(backend = %served.backend(), id = served.value().id, "Product created");
            write!(out, "{}", output::product_detail(served.value()))?;
        }
        Command::Edit { id, changes } => {
            let mut form = store
                .find_product(id)
                .map(ProductFormData::from)
                .ok_or_else(|| CoreError::product_not_found(id))?;
            changes.apply(&mut form);
            form.check()?;
            let served = store.update_product(id, &form).await?;
            tracing::info!(backend = %served.backend(), id, "Product updated");
            write!(out, "{}", output::product_detail(served.value()))?;
        }
        Command::Delete { id } => {
            let served = store.delete_product(id).await?;
            tracing::info!(backend = %served.backend(), id, "Product deleted");
            writeln!(out, "Deleted product #{}", served.value())?;
        }
        Command::Comment { product_id, text } => {
            if store.find_product(product_id).is_none() {
                return Err(CoreError::product_not_found(product_id).into());
            }
            let description = normalize_description(&text)?;
            let served = store.add_comment(product_id, &description).await?;
            tracing::info!(backend = %served.backend(), product_id, "Comment added");
            writeln!(out, "{}", output::comment_line(served.value()))?;
        }
        Command::Uncomment { comment_id } => {
            let served = store.delete_comment(comment_id).await?;
            tracing::info!(backend = %served.backend(), comment_id, "Comment deleted");
            writeln!(out, "Deleted comment #{}", served.value())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use shopfront_db::{LocalStore, MemoryStore};
    use shopfront_provider::DataProvider;

    use super::*;

    type TestStore = CatalogStore<LocalStore<MemoryStore>, LocalStore<MemoryStore>>;

    fn store() -> TestStore {
        CatalogStore::new(DataProvider::new(
            LocalStore::new(MemoryStore::new()),
            LocalStore::new(MemoryStore::new()),
        ))
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["shopfront"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    async fn exec(store: &mut TestStore, args: &[&str]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(parse(args), store, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_list_sort() {
        assert_matches!(parse(&["list"]), Command::List { sort: SortArg::Name });
        assert_matches!(
            parse(&["list", "--sort", "count-desc"]),
            Command::List { sort: SortArg::CountDesc }
        );
        assert!(Cli::try_parse_from(["shopfront", "list", "--sort", "price"]).is_err());
    }

    #[test]
    fn add_defaults_match_fresh_form() {
        let Command::Add(args) = parse(&["add", "--name", "Mug", "--image-url", "mug.png", "--weight", "300g"]) else {
            panic!("expected add");
        };
        let form = ProductFormData::from(args);
        let defaults = ProductFormData::default();
        assert_eq!(form.count, defaults.count);
        assert_eq!(form.width, defaults.width);
        assert_eq!(form.height, defaults.height);
    }

    #[test]
    fn changes_only_touch_given_fields() {
        let mut form = ProductFormData {
            image_url: "a.png".into(),
            name: "Lamp".into(),
            count: 4,
            width: 20.0,
            height: 40.0,
            weight: "1kg".into(),
        };
        ProductChanges {
            count: Some(9),
            weight: Some("900g".into()),
            ..Default::default()
        }
        .apply(&mut form);
        assert_eq!(form.name, "Lamp");
        assert_eq!(form.count, 9);
        assert_eq!(form.weight, "900g");
        assert_eq!(form.width, 20.0);
    }

    #[tokio::test]
    async fn list_sorts_seeded_products() {
        let mut store = store();
        let out = exec(&mut store, &["list", "--sort", "name-desc"]).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Samsung Galaxy S23"));
        assert!(lines[1].contains("Apple iPhone 14"));
    }

    #[tokio::test]
    async fn add_then_show() {
        let mut store = store();
        exec(
            &mut store,
            &["add", "--name", "Kettle", "--image-url", "k.png", "--count", "2", "--weight", "1.2kg"],
        )
        .await
        .unwrap();
        let out = exec(&mut store, &["show", "3"]).await.unwrap();
        assert!(out.starts_with("#3 Kettle"));
        assert!(out.contains("count:  2"));
    }

    #[tokio::test]
    async fn add_rejects_invalid_form() {
        let mut store = store();
        let err = exec(
            &mut store,
            &["add", "--name", " ", "--image-url", "k.png", "--weight", "1kg"],
        )
        .await
        .unwrap_err();
        assert_matches!(err.downcast_ref::<CoreError>(), Some(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn edit_keeps_unchanged_fields() {
        let mut store = store();
        let out = exec(&mut store, &["edit", "1", "--count", "12"]).await.unwrap();
        assert!(out.contains("Apple iPhone 14"));
        assert!(out.contains("count:  12"));
        assert_eq!(store.find_product(1).unwrap().count, 12);
    }

    #[tokio::test]
    async fn edit_unknown_product_fails() {
        let mut store = store();
        let err = exec(&mut store, &["edit", "42", "--count", "1"]).await.unwrap_err();
        assert_matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::NotFound { id: 42, .. })
        );
    }

    #[tokio::test]
    async fn comment_and_uncomment() {
        let mut store = store();
        let out = exec(&mut store, &["comment", "2", "  Great screen  "]).await.unwrap();
        assert!(out.starts_with("[2] "));
        assert!(out.trim_end().ends_with("Great screen"));
        assert_eq!(store.find_product(2).unwrap().comments.len(), 1);

        exec(&mut store, &["uncomment", "2"]).await.unwrap();
        assert!(store.find_product(2).unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let mut store = store();
        assert!(exec(&mut store, &["comment", "1", "   "]).await.is_err());
        assert_eq!(store.find_product(1).unwrap().comments.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let mut store = store();
        let out = exec(&mut store, &["delete", "1"]).await.unwrap();
        assert_eq!(out.trim(), "Deleted product #1");
        assert!(store.find_product(1).is_none());
    }
}
