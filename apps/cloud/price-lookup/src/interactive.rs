//! Prompt-driven lookup session that walks the form level by level

use domain_retail_prices::{
    Currency, FilterController, Level, PriceType, REGIONS, RetailPricesApi, region_label,
};
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fmt::Display;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::lookup::report_error;
use crate::render;

/// What the user typed at a choice prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Empty input or `0`: "All" for a level, "keep" for an option
    Default,
    Pick(String),
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Interpret input against a numbered option list.
///
/// Accepts a 1-based number, the exact option text (case-insensitive),
/// empty / `0` for the default, and `q` / `quit`.
pub fn parse_choice(input: &str, options: &[String]) -> Result<Choice, String> {
    let input = input.trim();
    if input.is_empty() || input == "0" {
        return Ok(Choice::Default);
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Ok(Choice::Quit);
    }
    if let Ok(n) = input.parse::<usize>() {
        return options
            .get(n.wrapping_sub(1))
            .map(|o| Choice::Pick(o.clone()))
            .ok_or_else(|| format!("choose a number between 0 and {}", options.len()));
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(input))
        .map(|o| Choice::Pick(o.clone()))
        .ok_or_else(|| format!("'{}' is not one of the listed options", input))
}

/// Run the session until the user quits or input ends
pub async fn run<A: RetailPricesApi>(api: A) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("Loading services...");
    let mut controller = FilterController::mount(api).await;
    report_error(&controller);

    loop {
        if let Flow::Quit = choose_levels(&mut editor, &mut controller).await? {
            break;
        }
        if let Flow::Quit = choose_options(&mut editor, &mut controller)? {
            break;
        }

        println!("Fetching prices...");
        controller.submit().await;
        report_error(&controller);
        println!("{}", render::prices(controller.prices()));

        match prompt(&mut editor, "Another lookup? [Y/n] ")? {
            Some(answer) if !answer.eq_ignore_ascii_case("n") => continue,
            _ => break,
        }
    }
    Ok(())
}

async fn choose_levels<A: RetailPricesApi>(
    editor: &mut DefaultEditor,
    controller: &mut FilterController<A>,
) -> Result<Flow> {
    for level in Level::ALL {
        let options = controller.selection().candidates(level).to_vec();
        if options.is_empty() {
            println!("No {} to choose from.", level.label());
            controller.select(level, "").await?;
            break;
        }

        println!("\n{}", render::candidates(level, &options));
        match ask(editor, &format!("{} [number, empty for all, q to quit]: ", level), &options)? {
            Choice::Quit => return Ok(Flow::Quit),
            Choice::Default => {
                controller.select(level, "").await?;
                break;
            }
            Choice::Pick(value) => {
                controller.select(level, value).await?;
                report_error(controller);
            }
        }
    }
    Ok(Flow::Continue)
}

fn choose_options<A: RetailPricesApi>(
    editor: &mut DefaultEditor,
    controller: &mut FilterController<A>,
) -> Result<Flow> {
    let regions: Vec<String> = REGIONS.iter().map(|r| r.value.to_string()).collect();
    println!();
    for (i, region) in REGIONS.iter().enumerate() {
        println!("{:>3}) {} ({})", i + 1, region.label, region.value);
    }
    let current = controller.selection().region.clone();
    let label = format!("region [empty keeps {}]: ", region_label(&current));
    match ask(editor, &label, &regions)? {
        Choice::Quit => return Ok(Flow::Quit),
        Choice::Default => {}
        Choice::Pick(region) => controller.set_region(region),
    }

    let price_types: Vec<String> = PriceType::iter().map(|t| t.to_string()).collect();
    let current = controller.selection().price_type;
    match pick_enum::<PriceType>(editor, "price type", &price_types, current)? {
        None => return Ok(Flow::Quit),
        Some(price_type) => controller.set_price_type(price_type),
    }

    let currencies: Vec<String> = Currency::iter().map(|c| c.to_string()).collect();
    let current = controller.selection().currency;
    match pick_enum::<Currency>(editor, "currency", &currencies, current)? {
        None => return Ok(Flow::Quit),
        Some(currency) => controller.set_currency(currency),
    }

    Ok(Flow::Continue)
}

/// Offer a fixed enum choice; `None` means quit
fn pick_enum<T>(
    editor: &mut DefaultEditor,
    name: &str,
    options: &[String],
    current: T,
) -> Result<Option<T>>
where
    T: FromStr + Display,
{
    println!();
    for (i, option) in options.iter().enumerate() {
        println!("{:>3}) {}", i + 1, option);
    }
    let label = format!("{} [empty keeps {}]: ", name, current);
    Ok(match ask(editor, &label, options)? {
        Choice::Quit => None,
        Choice::Default => Some(current),
        Choice::Pick(value) => Some(T::from_str(&value).unwrap_or(current)),
    })
}

/// Prompt until the input parses; end of input counts as quit
fn ask(editor: &mut DefaultEditor, label: &str, options: &[String]) -> Result<Choice> {
    loop {
        let Some(line) = prompt(editor, label)? else {
            return Ok(Choice::Quit);
        };
        match parse_choice(&line, options) {
            Ok(choice) => return Ok(choice),
            Err(message) => println!("{}", message),
        }
    }
}

fn prompt(editor: &mut DefaultEditor, label: &str) -> Result<Option<String>> {
    match editor.readline(label) {
        Ok(line) => {
            let line = line.trim().to_string();
            if !line.is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
