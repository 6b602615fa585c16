//! One-shot lookups: drive the controller from command-line arguments

use clap::Args;
use domain_retail_prices::{Currency, FilterController, Level, PriceType, RetailPricesApi};
use eyre::Result;
use tracing::info;

use crate::render;

/// Selections given on the command line. Each level needs the one above it.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Service name (e.g. "Virtual Machines")
    #[arg(short, long)]
    pub service: Option<String>,

    /// Product name within the service
    #[arg(short, long, requires = "service")]
    pub product: Option<String>,

    /// ARM SKU name within the product (e.g. "Standard_D2s_v3")
    #[arg(short, long, requires = "product")]
    pub arm_sku: Option<String>,

    /// SKU name within the ARM SKU
    #[arg(long, requires = "arm_sku")]
    pub sku: Option<String>,

    /// Region, e.g. eastus (see `options`)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Consumption or Reservation
    #[arg(short = 't', long)]
    pub price_type: Option<PriceType>,

    /// USD, EUR, GBP or AUD
    #[arg(short, long)]
    pub currency: Option<Currency>,
}

impl SelectionArgs {
    fn levels(&self) -> [(Level, Option<&str>); 4] {
        [
            (Level::Service, self.service.as_deref()),
            (Level::Product, self.product.as_deref()),
            (Level::ArmSku, self.arm_sku.as_deref()),
            (Level::Sku, self.sku.as_deref()),
        ]
    }
}

/// Apply the argument selections in chain order, as a user would pick them
pub async fn apply<A: RetailPricesApi>(
    controller: &mut FilterController<A>,
    args: &SelectionArgs,
) -> Result<()> {
    for (level, value) in args.levels() {
        if let Some(value) = value {
            controller.select(level, value).await?;
        }
    }
    if let Some(region) = &args.region {
        controller.set_region(region.as_str());
    }
    if let Some(price_type) = args.price_type {
        controller.set_price_type(price_type);
    }
    if let Some(currency) = args.currency {
        controller.set_currency(currency);
    }
    Ok(())
}

/// Candidates offered at `level` after applying `args`
pub async fn candidates<A: RetailPricesApi>(
    api: A,
    level: Level,
    args: &SelectionArgs,
    json: bool,
) -> Result<String> {
    let mut controller = if level == Level::Service {
        FilterController::mount(api).await
    } else {
        FilterController::new(api)
    };
    apply(&mut controller, args).await?;
    report_error(&controller);

    let values = controller.selection().candidates(level);
    info!(level = %level, count = values.len(), "Listed candidates");

    if json {
        render::json(values)
    } else {
        Ok(values.join("\n"))
    }
}

/// Price records for `args`
pub async fn prices<A: RetailPricesApi>(api: A, args: &SelectionArgs, json: bool) -> Result<String> {
    let mut controller = FilterController::new(api);
    apply(&mut controller, args).await?;
    controller.submit().await;
    report_error(&controller);

    if json {
        render::json(controller.prices())
    } else {
        Ok(render::prices(controller.prices()))
    }
}

/// Print the controller's error, if any, the way the form showed it
pub fn report_error<A: RetailPricesApi>(controller: &FilterController<A>) {
    if let Some(message) = controller.error() {
        eprintln!("{}", message);
    }
}
