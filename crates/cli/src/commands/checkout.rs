//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! ekart checkout --address "12 MG Road" --city Pune --state MH \
//!     --pincode 411001 --phone 9999999999 \
//!     --card-number 4111111111111111 --card-name "Asha" --expiry 12/30 --cvv 123
//! ```
//!
//! Name and email default to the signed-in user.

use secrecy::SecretString;

use ekart_storefront::error::Result;
use ekart_storefront::services::checkout::{
    OrderRequest, PaymentDetails, ShippingDetails,
};
use ekart_storefront::state::Storefront;

use crate::output;

/// Values collected from the command line.
pub struct CheckoutForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    pub card_number: SecretString,
    pub card_name: String,
    pub expiry: String,
    pub cvv: SecretString,
}

impl CheckoutForm {
    fn into_request(self, store: &Storefront) -> OrderRequest {
        let defaults = ShippingDetails::for_session(store.session().current());
        OrderRequest {
            shipping: ShippingDetails {
                name: self.name.unwrap_or(defaults.name),
                email: self.email.unwrap_or(defaults.email),
                address: self.address,
                city: self.city,
                state: self.state,
                pincode: self.pincode,
                phone: self.phone,
            },
            payment: PaymentDetails {
                card_number: self.card_number,
                card_name: self.card_name,
                expiry: self.expiry,
                cvv: self.cvv,
            },
        }
    }
}

/// Place an order for the whole cart.
#[allow(clippy::print_stdout)]
pub async fn place_order(store: &mut Storefront, form: CheckoutForm) -> Result<()> {
    let request = form.into_request(store);

    if store.session().is_authenticated() && !store.cart().is_empty() {
        println!("Processing order...");
    }

    let receipt = store.place_order(&request).await?;

    println!(
        "Order for {} item(s) placed at {}",
        receipt.item_count,
        receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", output::order_summary(&receipt.summary));
    Ok(())
}
