//! Price Lookup
//!
//! Look up Azure retail prices the way the pricing form does: pick a
//! service, narrow it to a product, ARM SKU and SKU, choose region, price
//! type and currency, then fetch the matching prices.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_retail_prices::{Level, RetailPricesClient};
use eyre::Result;
use tracing::debug;

mod config;
mod interactive;
mod lookup;
mod render;

use config::Config;
use lookup::SelectionArgs;

#[derive(Parser)]
#[command(name = "price-lookup")]
#[command(about = "Look up Azure retail prices by service, product, SKU and region")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all services
    Services,

    /// List the products of a service
    Products {
        #[arg(short, long)]
        service: String,
    },

    /// List the ARM SKUs of a product
    ArmSkus {
        #[arg(short, long)]
        service: String,
        #[arg(short, long)]
        product: String,
    },

    /// List the SKUs of an ARM SKU
    Skus {
        #[arg(short, long)]
        service: String,
        #[arg(short, long)]
        product: String,
        #[arg(short, long)]
        arm_sku: String,
    },

    /// Fetch prices for the given selection
    Prices {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show the region, price type and currency choices
    Options,

    /// Walk the selections interactively
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!(endpoint = %config.retail_prices.endpoint, "Loaded configuration");

    let client = RetailPricesClient::new(config.retail_prices.clone())?;

    let output = match cli.command {
        Commands::Services => {
            lookup::candidates(client, Level::Service, &SelectionArgs::default(), cli.json).await?
        }

        Commands::Products { service } => {
            let args = SelectionArgs {
                service: Some(service),
                ..Default::default()
            };
            lookup::candidates(client, Level::Product, &args, cli.json).await?
        }

        Commands::ArmSkus { service, product } => {
            let args = SelectionArgs {
                service: Some(service),
                product: Some(product),
                ..Default::default()
            };
            lookup::candidates(client, Level::ArmSku, &args, cli.json).await?
        }

        Commands::Skus {
            service,
            product,
            arm_sku,
        } => {
            let args = SelectionArgs {
                service: Some(service),
                product: Some(product),
                arm_sku: Some(arm_sku),
                ..Default::default()
            };
            lookup::candidates(client, Level::Sku, &args, cli.json).await?
        }

        Commands::Prices { selection } => lookup::prices(client, &selection, cli.json).await?,

        Commands::Options => render::options(),

        Commands::Interactive => {
            interactive::run(client).await?;
            return Ok(());
        }
    };

    println!("{}", output);
    Ok(())
}
