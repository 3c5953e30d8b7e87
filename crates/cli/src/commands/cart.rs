//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! ekart cart show
//! ekart cart add 7 --quantity 2
//! ekart cart update 7 5
//! ekart cart remove 7
//! ekart cart clear
//! ```

use ekart_core::ProductId;
use ekart_storefront::error::Result;
use ekart_storefront::state::Storefront;

use crate::output;

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show(store: &Storefront) {
    println!("{}", output::cart(store.cart()));
}

/// Look a product up in the catalog and add it.
pub async fn add(store: &mut Storefront, id: ProductId, quantity: u32) -> Result<()> {
    let item = store.catalog().get_by_id(id).await?;
    store.cart_mut().add_to_cart(&item, quantity)?;
    Ok(())
}

/// Remove a product entirely.
pub fn remove(store: &mut Storefront, id: ProductId) -> Result<()> {
    store.cart_mut().remove_from_cart(id)?;
    Ok(())
}

/// Set a product's quantity; zero or less removes it.
pub fn update(store: &mut Storefront, id: ProductId, quantity: i64) -> Result<()> {
    store.cart_mut().update_quantity(id, quantity)?;
    Ok(())
}

/// Empty the cart.
pub fn clear(store: &mut Storefront) -> Result<()> {
    store.cart_mut().clear_cart()?;
    Ok(())
}
