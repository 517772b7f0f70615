use crate::commands;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sales_forecast::SalesChannel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Artlinx sales summary and what-if predictions", long_about = None)]
struct Cli {
    /// Path to the dashboard configuration file
    #[arg(long, global = true, default_value = "dashboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show monthly actual vs predicted quantities and write the chart
    Summary {
        /// Where to write the SVG chart (defaults to the configured path)
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// List brands available for simulation
    Brands,
    /// List products available for simulation
    Products,
    /// Predict quantities for every local product of a brand
    SimulateBrand {
        /// Brand name (defaults to the first available brand)
        #[arg(long)]
        brand: Option<String>,
        /// Month, 1 to 12
        #[arg(long)]
        month: Option<u32>,
        /// Year
        #[arg(long)]
        year: Option<i32>,
        /// Discount percentage, 0 to 100
        #[arg(long)]
        discount: Option<u8>,
        /// Write the result spreadsheet; the directory defaults to the configured one
        #[arg(long, value_name = "DIR")]
        export: Option<Option<PathBuf>>,
    },
    /// Predict the quantity of one product on one date
    SimulateProduct {
        /// Product name
        #[arg(long)]
        product: String,
        /// Sales channel: online or offline
        #[arg(long)]
        channel: Option<SalesChannel>,
        /// Discount percentage, 0 to 100
        #[arg(long)]
        discount: Option<u8>,
        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Commands::Summary { chart } => commands::summary(&config, chart),
        Commands::Brands => commands::brands(&config),
        Commands::Products => commands::products(&config),
        Commands::SimulateBrand {
            brand,
            month,
            year,
            discount,
            export,
        } => commands::simulate_brand(&config, brand, month, year, discount, export),
        Commands::SimulateProduct {
            product,
            channel,
            discount,
            date,
        } => commands::simulate_product(&config, product, channel, discount, date),
    }
}
