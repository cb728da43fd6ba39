//! Fetch command - one-shot catalog query printed to stdout

use clap::Args;
use serde_json::Value;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::services::CatalogService;

/// Filters for a one-shot query; at most one may be given
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct FetchArgs {
    /// Print the model with this title (case-insensitive), or null
    #[arg(long)]
    pub name: Option<String>,

    /// Print the models offering this capability
    #[arg(long)]
    pub capability: Option<String>,

    /// Print the models published in this size
    #[arg(long)]
    pub size: Option<String>,
}

/// Query the catalog once and print the JSON result
pub async fn run(args: FetchArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    let service = CatalogService::from_config(&config.catalog)?;
    let output = query(&service, &args).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn query(service: &CatalogService, args: &FetchArgs) -> anyhow::Result<Value> {
    let value = if let Some(name) = &args.name {
        serde_json::to_value(service.get_model_by_name(name).await?)?
    } else if let Some(capability) = &args.capability {
        serde_json::to_value(service.get_models_by_capability(capability).await?)?
    } else if let Some(size) = &args.size {
        serde_json::to_value(service.get_models_by_size(size).await?)?
    } else {
        serde_json::to_value(service.get_models_json().await?)?
    };

    Ok(value)
}
