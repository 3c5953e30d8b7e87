//! eKart CLI - Browse the catalog, manage the cart, and check out.
//!
//! Every invocation restores the session and cart from the data directory,
//! runs one command, and prints the notifications it produced.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! ekart products --category electronics
//! ekart search backpack
//!
//! # Account
//! EKART_PASSWORD=... ekart signup -n "Asha" -e asha@example.com
//!
//! # Cart
//! ekart cart add 1 --quantity 2
//! ekart cart show
//!
//! # Checkout
//! ekart checkout --address "12 MG Road" --city Pune ...
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};

use ekart_core::ProductId;
use ekart_storefront::config::StorefrontConfig;
use ekart_storefront::error::{self, AppError};
use ekart_storefront::services::notify::{FanoutNotifier, RecordingNotifier, TracingNotifier};
use ekart_storefront::state::Storefront;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::checkout::CheckoutForm;

#[derive(Parser)]
#[command(name = "ekart")]
#[command(author, version, about = "eKart storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List product categories
    Categories,
    /// Search products by title, description or category
    Search {
        /// Text to look for
        query: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long, env = "EKART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long, env = "EKART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Place an order for everything in the cart
    Checkout(Box<CheckoutArgs>),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a product's quantity (zero or less removes it)
    Update {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every product
    Clear,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Full name (defaults to the signed-in user)
    #[arg(long)]
    name: Option<String>,
    /// Email (defaults to the signed-in user)
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    pincode: String,
    #[arg(long)]
    phone: String,
    #[arg(long, env = "EKART_CARD_NUMBER", hide_env_values = true)]
    card_number: String,
    #[arg(long)]
    card_name: String,
    /// Card expiry (MM/YY)
    #[arg(long)]
    expiry: String,
    #[arg(long, env = "EKART_CARD_CVV", hide_env_values = true)]
    cvv: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            address: args.address,
            city: args.city,
            state: args.state,
            pincode: args.pincode,
            phone: args.phone,
            card_number: SecretString::from(args.card_number),
            card_name: args.card_name,
            expiry: args.expiry,
            cvv: SecretString::from(args.cvv),
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
#[allow(clippy::print_stdout, clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to warnings only so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ekart_storefront=warn,ekart_cli=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Notifications are printed after the command and also logged
    let notifier = Arc::new(RecordingNotifier::new());
    let sinks = FanoutNotifier::new(vec![notifier.clone(), Arc::new(TracingNotifier)]);
    let result = match Storefront::new(config, Arc::new(sinks)) {
        Ok(mut store) => run(cli, &mut store).await,
        Err(e) => Err(AppError::from(e)),
    };

    let notifications = notifier.drain();
    for notification in &notifications {
        println!("{}", output::notification(notification));
    }

    if let Err(e) = result {
        e.report();
        // A failure already explained by a notification needs no second message
        if !notifications.iter().any(|n| n.is_destructive()) {
            eprintln!("error: {}", e.user_message());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, store: &mut Storefront) -> Result<(), AppError> {
    match cli.command {
        Commands::Products { category } => {
            error::add_breadcrumb("catalog", "Listed products");
            commands::catalog::list(store, category.as_deref()).await?;
        }
        Commands::Product { id } => {
            error::add_breadcrumb("catalog", "Viewed product");
            commands::catalog::show(store, id).await?;
        }
        Commands::Categories => commands::catalog::categories(store).await?,
        Commands::Search { query } => {
            error::add_breadcrumb("catalog", "Searched products");
            commands::catalog::search(store, &query).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(store),
            CartAction::Add { id, quantity } => {
                error::add_breadcrumb("cart", "Added to cart");
                commands::cart::add(store, id, quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(store, id)?,
            CartAction::Update { id, quantity } => commands::cart::update(store, id, quantity)?,
            CartAction::Clear => commands::cart::clear(store)?,
        },
        Commands::Signup {
            name,
            email,
            password,
        } => {
            commands::account::signup(store, &name, &email, &SecretString::from(password))?;
        }
        Commands::Login { email, password } => {
            commands::account::login(store, &email, &SecretString::from(password))?;
        }
        Commands::Logout => commands::account::logout(store)?,
        Commands::Whoami => commands::account::whoami(store),
        Commands::Checkout(args) => {
            error::add_breadcrumb("checkout", "Placed order");
            commands::checkout::place_order(store, CheckoutForm::from(*args)).await?;
        }
    }
    Ok(())
}
