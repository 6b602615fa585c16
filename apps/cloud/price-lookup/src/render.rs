//! Terminal output for candidates, options and price records

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use domain_retail_prices::{Currency, Level, PriceRecord, PriceType, REGIONS};
use eyre::Result;
use serde::Serialize;
use strum::IntoEnumIterator;

/// Numbered candidate list, with `0` standing for "All"
pub fn candidates(level: Level, values: &[String]) -> String {
    let mut out = format!("  0) All {}\n", level.label());
    for (i, value) in values.iter().enumerate() {
        out.push_str(&format!("{:>3}) {}\n", i + 1, value));
    }
    out
}

/// Price records as a table
pub fn prices(records: &[PriceRecord]) -> String {
    if records.is_empty() {
        return "No prices found.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("SKU").fg(Color::Cyan),
        Cell::new("PRODUCT").fg(Color::Cyan),
        Cell::new("REGION").fg(Color::Cyan),
        Cell::new("RETAIL PRICE").fg(Color::Cyan),
        Cell::new("UNIT OF MEASURE").fg(Color::Cyan),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.sku_name),
            Cell::new(&record.product_name),
            Cell::new(&record.arm_region_name),
            Cell::new(format!("{} {}", record.retail_price, record.currency_code)),
            Cell::new(&record.unit_of_measure),
        ]);
    }

    format!("{}\n{} price(s)", table, records.len())
}

/// The fixed region, price type and currency choices
pub fn options() -> String {
    let mut out = String::from("Regions:\n");
    for region in REGIONS {
        out.push_str(&format!("  {:<14} {}\n", region.value, region.label));
    }

    out.push_str("Price types:\n");
    for price_type in PriceType::iter() {
        out.push_str(&format!("  {}\n", price_type));
    }

    out.push_str("Currencies:\n");
    for currency in Currency::iter() {
        out.push_str(&format!("  {}\n", currency));
    }
    out
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
