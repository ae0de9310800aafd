//! Clap derive structures for the `sitequote` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sitequote_core::SiteType;

/// sitequote -- browse and extend a site/quotation catalog
#[derive(Debug, Parser)]
#[command(
    name = "sitequote",
    version,
    about = "Manage installation sites and their quotations",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TOML config file
    #[arg(long, env = "SITEQUOTE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// JSON fixture to load before running the command (overrides config)
    #[arg(long, global = true, conflicts_with = "demo")]
    pub seed: Option<PathBuf>,

    /// Load the built-in demo fixture
    #[arg(long, global = true)]
    pub demo: bool,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Site operations
    #[command(subcommand)]
    Sites(SitesCommand),

    /// Quotation operations
    #[command(subcommand)]
    Quotes(QuotesCommand),

    /// Show a site with its quotations
    SiteDetails {
        /// Site id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List all sites
    List,
    /// Show one site
    Show { id: String },
    /// Add a site
    Add(AddSiteArgs),
}

#[derive(Debug, Args)]
pub struct AddSiteArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Industrial or Residential
    #[arg(long = "type", value_parser = parse_site_type)]
    pub site_type: Option<SiteType>,
    /// Comma separated risk labels
    #[arg(long, default_value = "")]
    pub risks: String,
}

#[derive(Debug, Subcommand)]
pub enum QuotesCommand {
    /// List quotations, optionally for one site
    List {
        #[arg(long)]
        site: Option<String>,
    },
    /// Show one quotation
    Show { id: String },
    /// Add a quotation
    Add(AddQuoteArgs),
}

#[derive(Debug, Args)]
pub struct AddQuoteArgs {
    /// Quotation id; generated when omitted
    #[arg(long)]
    pub id: Option<String>,
    /// Site id the quotation belongs to
    #[arg(long)]
    pub site: Option<String>,
    #[arg(long)]
    pub product: Option<String>,
    /// Height in centimeters
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<f64>,
    /// Width in centimeters
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<f64>,
    /// Defaults to 1
    #[arg(long)]
    pub quantity: Option<u32>,
}

fn parse_site_type(raw: &str) -> Result<SiteType, String> {
    raw.parse()
}
