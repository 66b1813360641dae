mod commands;
mod config;
mod db;
mod logging;
mod schema;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tenant_guard::TenantId;

use crate::config::AppConfig;

/// Tenant Guard demo - tenant-scoped product catalog
#[derive(Parser)]
#[command(name = "tenant-guard-demo")]
#[command(about = "Tenant Guard demo - tenant-scoped product catalog")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tables if they do not exist
    Init,
    /// Register a tenant
    AddTenant {
        #[arg(long)]
        name: String,
    },
    /// Add a product owned by a tenant
    AddProduct {
        #[arg(long)]
        tenant: TenantId,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the products of a tenant
    ListProducts {
        #[arg(long)]
        tenant: TenantId,
        #[arg(long)]
        sku_prefix: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Delete a product of a tenant by SKU
    DeleteProduct {
        #[arg(long)]
        tenant: TenantId,
        #[arg(long)]
        sku: String,
    },
    /// Validate configuration and database connectivity, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (TENANT_GUARD__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.verbose);

    logging::init_logging(&config.logging);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("no command given, see --help");
    };
    run(&config, command).await
}

async fn run(config: &AppConfig, command: Commands) -> Result<()> {
    let db = db::connect(&config.database).await?;

    match command {
        Commands::Init => commands::init_schema(&db).await?,
        Commands::AddTenant { name } => {
            let id = commands::add_tenant(&db, &name).await?;
            println!("{id}\t{name}");
        }
        Commands::AddProduct {
            tenant,
            sku,
            description,
        } => {
            let p = commands::add_product(&db, tenant, &sku, description.as_deref()).await?;
            println!("{}\t{}\t{}", p.product_id, p.tenant_id, p.sku);
        }
        Commands::ListProducts {
            tenant,
            sku_prefix,
            limit,
        } => {
            let rows = commands::list_products(&db, tenant, sku_prefix.as_deref(), limit).await?;
            for p in rows {
                println!(
                    "{}\t{}\t{}",
                    p.product_id,
                    p.sku,
                    p.description.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::DeleteProduct { tenant, sku } => {
            if !commands::delete_product(&db, tenant, &sku).await? {
                anyhow::bail!("product `{sku}` not found for tenant {tenant}");
            }
        }
        Commands::Check => {
            tracing::info!(engine = db::db_engine(&db), "configuration is valid");
            println!("Configuration is valid:\n{}", config.to_yaml()?);
        }
    }

    db.close().await?;
    Ok(())
}
