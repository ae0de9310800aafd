//! `sitequote` command-line entry point.
//!
//! # Responsibility
//! - Build an in-memory catalog from config and fixtures.
//! - Run one command and render either records or a fallback message.
//!
//! # Invariants
//! - Lookup failures print the generic screen message and exit non-zero.
//! - The process never panics on user input.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::warn;
use serde::Serialize;
use sitequote_core::view::{self, LoadState};
use sitequote_core::{
    in_memory_catalog, init_from_config, seed_catalog, AddressInput, AppConfig, Fixture,
    InMemoryCatalog, Quotation, QuotationInput, RepoError, Site, SiteId, SiteInput,
};

use crate::cli::{AddQuoteArgs, AddSiteArgs, Cli, Command, GlobalOpts, QuotesCommand, SitesCommand};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let catalog = in_memory_catalog(&config);
    if let Err(message) = load_fixture(&catalog, &cli.global, &config).await {
        eprintln!("error: {message}");
        return ExitCode::from(2);
    }

    run(&catalog, cli.command, cli.global.json).await
}

async fn load_fixture(
    catalog: &InMemoryCatalog,
    global: &GlobalOpts,
    config: &AppConfig,
) -> Result<(), String> {
    let fixture = if global.demo {
        Fixture::demo()
    } else if let Some(path) = global.seed.as_deref().or(config.seed_path.as_deref()) {
        Fixture::from_path(path)
    } else {
        return Ok(());
    };
    let fixture = fixture.map_err(|err| err.to_string())?;
    seed_catalog(catalog, &fixture)
        .await
        .map(|_| ())
        .map_err(|err| err.to_string())
}

async fn run(catalog: &InMemoryCatalog, command: Command, json: bool) -> ExitCode {
    match command {
        Command::Sites(SitesCommand::List) => {
            render(view::load_sites(catalog).await, json, |sites| {
                for site in sites {
                    print_site(site);
                }
            })
        }
        Command::Sites(SitesCommand::Show { id }) => {
            render(view::load_site(catalog, id.as_str()).await, json, print_site)
        }
        Command::Sites(SitesCommand::Add(args)) => {
            let result = catalog.add_site(&site_input(args)).await;
            render_write(result, json, print_site)
        }
        Command::Quotes(QuotesCommand::List { site: Some(site) }) => render(
            view::load_site_quotations(catalog, site.as_str()).await,
            json,
            |quotations| quotations.iter().for_each(print_quotation),
        ),
        Command::Quotes(QuotesCommand::List { site: None }) => render(
            LoadState::Ready(catalog.list_quotations().await),
            json,
            |quotations| quotations.iter().for_each(print_quotation),
        ),
        Command::Quotes(QuotesCommand::Show { id }) => render(
            view::load_quotation(catalog, id.as_str()).await,
            json,
            print_quotation,
        ),
        Command::Quotes(QuotesCommand::Add(args)) => {
            let input = match quotation_input(args) {
                Ok(input) => input,
                Err(err) => return render_write::<Quotation>(Err(err), json, print_quotation),
            };
            let result = catalog.add_quotation(&input).await;
            render_write(result, json, print_quotation)
        }
        Command::SiteDetails { id } => render(
            view::load_site_details(catalog, id.as_str()).await,
            json,
            |details| {
                print_site(&details.site);
                if details.quotations.is_empty() {
                    println!("  (no quotations)");
                }
                details.quotations.iter().for_each(print_quotation);
            },
        ),
    }
}

fn site_input(args: AddSiteArgs) -> SiteInput {
    SiteInput {
        name: args.name,
        address: Some(AddressInput {
            street: args.street,
            city: args.city,
            state: args.state,
            country: args.country,
            postal_code: args.postal_code,
        }),
        site_type: args.site_type,
        risks: Vec::new(),
    }
    .with_risk_list(args.risks.as_str())
}

fn quotation_input(args: AddQuoteArgs) -> Result<QuotationInput, RepoError> {
    let site_id = args
        .site
        .as_deref()
        .map(SiteId::parse)
        .transpose()?;
    Ok(QuotationInput {
        quotation_id: args.id,
        site_id,
        product_name: args.product,
        height: args.height,
        width: args.width,
        quantity: args.quantity,
    })
}

fn render<T: Serialize>(state: LoadState<T>, json: bool, print: impl FnOnce(&T)) -> ExitCode {
    match state {
        LoadState::Ready(value) => {
            if json {
                print_json(&value);
            } else {
                print(&value);
            }
            ExitCode::SUCCESS
        }
        LoadState::Failed { message } => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn render_write<T: Serialize>(
    result: Result<T, RepoError>,
    json: bool,
    print: impl FnOnce(&T),
) -> ExitCode {
    match result {
        Ok(value) => render(LoadState::Ready(value), json, print),
        Err(RepoError::Validation(err)) => {
            for field in &err.fields {
                eprintln!("{}: {}", field.field, field.problem);
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            warn!("event=cli_write module=cli status=error kind={}", err.kind());
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("error: failed to encode json: {err}"),
    }
}

fn print_site(site: &Site) {
    println!("#{} {}", site.site_id, site.name);
    println!("  Address: {}", site.address.one_line());
    println!("  Type: {}", site.site_type);
    println!("  Risks: {}", site.risks.join(", "));
}

fn print_quotation(quotation: &Quotation) {
    println!(
        "  Quotation {} (site {}): {} {}cm x {}cm, qty {}",
        quotation.quotation_id,
        quotation.site_id,
        quotation.product_name,
        quotation.height,
        quotation.width,
        quotation.quantity
    );
}

#[cfg(test)]
mod tests {
    use super::{quotation_input, run, site_input};
    use crate::cli::{AddQuoteArgs, AddSiteArgs, Command};
    use sitequote_core::{in_memory_catalog, AppConfig, RepoError};
    use std::process::ExitCode;

    fn quote_args(site: Option<&str>) -> AddQuoteArgs {
        AddQuoteArgs {
            id: None,
            site: site.map(str::to_string),
            product: Some("Window".to_string()),
            height: Some(100.0),
            width: Some(50.0),
            quantity: None,
        }
    }

    #[tokio::test]
    async fn site_details_for_missing_site_exits_with_failure() {
        let catalog = in_memory_catalog(&AppConfig::default());
        let code = run(
            &catalog,
            Command::SiteDetails {
                id: "999".to_string(),
            },
            false,
        )
        .await;
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn malformed_site_flag_is_invalid_argument() {
        let err = quotation_input(quote_args(Some("abc"))).unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)), "{err:?}");

        let input = quotation_input(quote_args(Some("3"))).unwrap();
        assert_eq!(input.site_id.map(|id| id.get()), Some(3));
        assert!(quotation_input(quote_args(None)).unwrap().site_id.is_none());
    }

    #[test]
    fn risks_flag_drops_blank_labels() {
        let input = site_input(AddSiteArgs {
            name: Some("Harbor Depot".to_string()),
            street: None,
            city: None,
            state: None,
            country: None,
            postal_code: None,
            site_type: None,
            risks: "Fire,,Flood".to_string(),
        });
        assert_eq!(input.risks, vec!["Fire", "Flood"]);
        assert_eq!(input.name.as_deref(), Some("Harbor Depot"));
    }
}
