//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! ekart products
//! ekart products --category electronics
//! ekart product 7
//! ekart categories
//! ekart search "backpack"
//! ```

use ekart_core::ProductId;
use ekart_storefront::catalog;
use ekart_storefront::error::Result;
use ekart_storefront::state::Storefront;

use crate::output;

/// List products, optionally limited to one category.
#[allow(clippy::print_stdout)]
pub async fn list(store: &Storefront, category: Option<&str>) -> Result<()> {
    let items = match category {
        Some(category) => store.catalog().list_by_category(category).await?,
        None => store.catalog().list_all().await?,
    };

    for item in &items {
        println!("{}", output::item_row(item));
    }
    Ok(())
}

/// Show one product.
#[allow(clippy::print_stdout)]
pub async fn show(store: &Storefront, id: ProductId) -> Result<()> {
    let item = store.catalog().get_by_id(id).await?;
    println!("{}", output::item_detail(&item));
    Ok(())
}

/// List category names.
#[allow(clippy::print_stdout)]
pub async fn categories(store: &Storefront) -> Result<()> {
    for category in store.catalog().list_categories().await? {
        println!("{category}");
    }
    Ok(())
}

/// Search titles, descriptions and categories.
#[allow(clippy::print_stdout)]
pub async fn search(store: &Storefront, query: &str) -> Result<()> {
    let items = store.catalog().list_all().await?;
    let hits = catalog::search(&items, query);

    println!("{}", catalog::results_label(hits.len()));
    for item in hits {
        println!("{}", output::item_row(item));
    }
    Ok(())
}
