use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use portfolio_quotes::{
    api::{AlphaVantageClient, QuoteProvider},
    app::{Portfolio, calc::summarize, utils::split_symbols},
    config::Config,
    models::Quote,
    services::{QuoteService, SymbolSearchService, quote_service::normalize_symbols},
};

#[derive(Debug, Parser)]
#[command(version, about = "Stock quotes and portfolio summary backed by Alpha Vantage")]
struct Cli {
    /// Overrides ALPHA_VANTAGE_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Use synthetic quotes instead of calling the provider
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quotes for a comma-separated list of symbols, e.g. AAPL,MSFT
    Quote {
        symbols: String,
        #[arg(long)]
        json: bool,
    },
    /// Look up symbols by name or ticker
    Search { query: String },
    /// Value the holdings in a CSV file
    Portfolio {
        csv_path: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }

    let provider: Arc<dyn QuoteProvider> = Arc::new(AlphaVantageClient::new(&config)?);

    match cli.command {
        Command::Quote { symbols, json } => {
            let requested = split_symbols(&symbols)?;
            let service = QuoteService::new(provider, &config);
            let quotes = service.get_quotes(&requested, cli.mock).await;

            if json {
                let ordered: BTreeMap<_, _> = quotes.iter().collect();
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else {
                for symbol in normalize_symbols(&requested) {
                    if let Some(quote) = quotes.get(&symbol) {
                        print_quote(quote);
                    }
                }
            }
        }
        Command::Search { query } => {
            let search = SymbolSearchService::new(provider, &config);
            let matches = search.search(&query).await;

            if matches.is_empty() {
                println!("No matches for '{}'", query);
            }
            for m in matches {
                println!("{:<12} {}", m.symbol(), m.name());
            }
        }
        Command::Portfolio { csv_path, json } => {
            let service = QuoteService::new(provider, &config);
            let mut portfolio = Portfolio::import_holdings(&csv_path)?;
            portfolio.refresh_prices(&service, cli.mock).await;

            let priced = portfolio.priced_holdings()?;
            let summary = summarize(&priced)?;

            if json {
                let out = serde_json::json!({ "holdings": priced, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!(
                "{:<8} {:>10} {:>10} {:>12} {:>12} {:>9} {:>10}",
                "Symbol", "Quantity", "Price", "Value", "Gain", "Gain %", "Day"
            );
            for p in &priced {
                println!(
                    "{:<8} {:>10.2} {:>10.2} {:>12.2} {:>12.2} {:>8.2}% {:>10.2}",
                    p.holding().symbol(),
                    p.holding().quantity(),
                    p.current_price(),
                    p.current_value(),
                    p.total_gain(),
                    p.total_gain_percent(),
                    p.day_change(),
                );
            }
            println!();
            println!("Total value: {:.2}", summary.total_value());
            println!("Total cost:  {:.2}", summary.total_cost());
            println!(
                "Total gain:  {:.2} ({:.2}%)",
                summary.total_gain(),
                summary.total_gain_percent()
            );
            println!(
                "Day change:  {:.2} ({:.2}%)",
                summary.day_change(),
                summary.day_change_percent()
            );
        }
    }

    Ok(())
}

fn print_quote(quote: &Quote) {
    println!(
        "{:<8} {:>10.2} {:>+9.2} ({:>+.2}%)  vol {:>11}  {}",
        quote.symbol(),
        quote.price(),
        quote.change(),
        quote.change_percent(),
        quote.volume(),
        quote.latest_trading_day(),
    );
}
