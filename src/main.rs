//! # appcertctl
//!
//! Host-engine CLI for the App Service certificate controller. Desired
//! configuration is read from a YAML or JSON file and the tracked record is
//! persisted as a JSON state file between invocations.
//!
//! ```bash
//! appcertctl apply --config cert.yaml --state cert.state.json
//! appcertctl refresh --state cert.state.json
//! appcertctl import /subscriptions/.../providers/Microsoft.Web/certificates/cert1 --state cert.state.json
//! appcertctl destroy --state cert.state.json
//! ```

use anyhow::{Context, Result};
use app_service_certificate::config::ControllerConfig;
use app_service_certificate::observability::{gather_text, init_logging, register_metrics};
use app_service_certificate::schema::{certificate_config_schema, CertificateConfig, ResourceData};
use app_service_certificate::Plan;
use app_service_certificate::state::{load_config, load_state, remove_state, save_state};
use app_service_certificate::{controller, provider};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// App Service Certificate Controller CLI
#[derive(Parser)]
#[command(name = "appcertctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write Prometheus metrics (text format) to this file on exit
    #[arg(long, global = true, value_name = "PATH")]
    metrics_textfile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the certificate and record it in the state file
    Apply {
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Refresh the state file from Azure; removes it when the certificate is gone
    Refresh {
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Delete the certificate and remove the state file
    Destroy {
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Adopt an existing certificate by ID
    Import {
        #[arg(value_name = "ID")]
        id: String,
        /// Configuration for fields Azure does not return (payload, plan, timeouts)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Show which changes would replace the certificate
    Plan {
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Print the JSON Schema of the configuration file
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Required for rustls 0.23+ when no default provider is set via features
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|provider| {
            anyhow::anyhow!("Failed to install rustls crypto provider: {provider:?}")
        })?;

    let cli = Cli::parse();
    let config = ControllerConfig::from_env();
    init_logging(&config)?;
    if config.enable_metrics {
        register_metrics().context("Failed to register metrics")?;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        build_git_hash = env!("BUILD_GIT_HASH"),
        build_datetime = env!("BUILD_DATETIME"),
        "Starting appcertctl"
    );

    let result = run(cli.command, &config).await;

    if let Some(path) = cli.metrics_textfile {
        if config.enable_metrics {
            std::fs::write(&path, gather_text()?)
                .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        } else {
            warn!("--metrics-textfile ignored because ENABLE_METRICS is false");
        }
    }

    result
}

async fn run(command: Commands, config: &ControllerConfig) -> Result<()> {
    match command {
        Commands::Apply { config: desired, state } => {
            let desired = load_config(&desired)?;
            let clients = provider::azure::connect(config).await?;

            let mut record = load_state(&state)?;
            let result = controller::apply(&clients, &mut record, desired).await;
            match &record {
                Some(data) => save_state(&state, data)?,
                None => remove_state(&state)?,
            }
            let plan = result?;

            let data = record.context("Apply succeeded without a tracked record")?;
            info!(action = plan.action(), "Applied certificate configuration");
            print_summary("applied", &data)
        }
        Commands::Refresh { state } => {
            let mut data = require_state(&state)?;
            let clients = provider::azure::connect(config).await?;
            controller::read(&clients, &mut data).await?;

            if data.is_new_resource() {
                remove_state(&state)?;
                println!("{}", json!({ "status": "removed" }));
                return Ok(());
            }
            save_state(&state, &data)?;
            print_summary("refreshed", &data)
        }
        Commands::Destroy { state } => {
            let data = require_state(&state)?;
            let clients = provider::azure::connect(config).await?;
            controller::delete(&clients, &data).await?;
            remove_state(&state)?;
            println!("{}", json!({ "status": "destroyed", "id": data.id }));
            Ok(())
        }
        Commands::Import {
            id,
            config: desired,
            state,
        } => {
            let desired = match desired {
                Some(path) => load_config(&path)?,
                None => CertificateConfig::default(),
            };
            let clients = provider::azure::connect(config).await?;
            let data = controller::import(&clients, &id, desired).await?;
            save_state(&state, &data)?;
            print_summary("imported", &data)
        }
        Commands::Plan {
            config: desired,
            state,
        } => {
            let desired = load_config(&desired)?;
            controller::validate_config(&desired)?;
            let prior = load_state(&state)?;
            let plan = Plan::for_config(prior.as_ref(), &desired);
            let mut summary = json!({
                "action": plan.action(),
                "id": prior.and_then(|prior| prior.id),
            });
            if let Plan::Replace { fields } = &plan {
                summary["replacement_fields"] = json!(fields);
            }
            let warnings: Vec<_> = desired
                .deprecation_warnings()
                .into_iter()
                .map(|(field, notice)| format!("{field}: {notice}"))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "plan": summary, "warnings": warnings }))?
            );
            Ok(())
        }
        Commands::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&certificate_config_schema())?
            );
            Ok(())
        }
    }
}

fn require_state(path: &Path) -> Result<ResourceData> {
    load_state(path)?.with_context(|| format!("No state file at {}", path.display()))
}

/// Print identity and computed attributes; configuration is omitted since it may hold secrets
fn print_summary(status: &str, data: &ResourceData) -> Result<()> {
    let summary = json!({
        "status": status,
        "id": data.id,
        "location": data.config.location,
        "tags": data.config.tags,
        "attributes": data.attributes,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
