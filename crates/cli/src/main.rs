//! Edison CLI - Command-line interface for the Edison Platform client

mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use edison_core::application::resolve_api_key;
use edison_core::port::EnvKeySource;
use edison_infra_http::ConnectivityProbe;
use edison_platform::{EdisonPlatformClient, Fields, HttpTransportConfig, TaskDescription, TaskId};
use tracing::debug;
use serde_json::Value;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "edison")]
#[command(about = "Edison Platform CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key
    #[arg(long, env = "EDISON_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Service base URL
    #[arg(long, env = "EDISON_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Print raw JSON only
    #[arg(long, global = true)]
    json: bool,

    /// Log client activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a task until it completes
    Run {
        /// Task description as JSON, e.g. '{"name":"LITERATURE","query":"..."}'
        #[arg(short, long)]
        task: String,
    },

    /// Create a task without waiting
    Create {
        /// Task description as JSON
        #[arg(short, long)]
        task: String,
    },

    /// Fetch a task's current status and result
    Get {
        /// Task ID
        task_id: String,
    },

    /// Literature search
    Literature {
        query: String,
    },

    /// Precedent search
    Precedent {
        query: String,
    },

    /// Dataset analysis
    Analyze {
        /// Dataset identifier
        dataset: String,

        /// Extra field as key=value (value parsed as JSON when possible)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },

    /// Chemistry / molecular task
    Chemistry {
        query: String,

        /// Extra field as key=value (value parsed as JSON when possible)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },

    /// List supported job kinds
    Kinds,

    /// Check connectivity, authentication and resource listing
    Check,
}

fn parse_field(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_task(raw: &str) -> edison_platform::Result<TaskDescription> {
    Ok(raw.parse::<TaskDescription>()?)
}

fn transport_config(cli: &Cli) -> Result<HttpTransportConfig> {
    let mut config = HttpTransportConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn client(cli: &Cli) -> Result<EdisonPlatformClient> {
    let mut builder = EdisonPlatformClient::builder().config(transport_config(cli)?);
    if let Some(key) = &cli.api_key {
        builder = builder.api_key(key);
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    debug!(command = ?cli.command, json = cli.json, "Dispatching command");

    match &cli.command {
        Commands::Run { task } => {
            let task = parse_task(task)?;
            let result = client(&cli)?.run_task(&task).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Create { task } => {
            let task = parse_task(task)?;
            let task_id = client(&cli)?.create_task(&task).await?;
            output::print_task_id(&task_id, cli.json);
        }

        Commands::Get { task_id } => {
            let result = client(&cli)?.get_task(&TaskId::new(task_id.clone())).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Literature { query } => {
            let result = client(&cli)?.literature_search(query.clone()).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Precedent { query } => {
            let result = client(&cli)?.precedent_search(query.clone()).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Analyze { dataset, fields } => {
            let extra: Fields = fields.iter().cloned().collect();
            let result = client(&cli)?.analyze_data(dataset.clone(), extra).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Chemistry { query, fields } => {
            let extra: Fields = fields.iter().cloned().collect();
            let result = client(&cli)?.chemistry_task(query.clone(), extra).await?;
            output::print_result(&result, cli.json)?;
        }

        Commands::Kinds => {
            println!("{}", output::job_kinds_table());
        }

        Commands::Check => {
            let api_key = resolve_api_key(cli.api_key.as_deref(), &EnvKeySource::default())?;
            let probe = ConnectivityProbe::new(&api_key, transport_config(&cli)?)?;
            let report = probe.run().await;
            output::print_probe_report(&report);
            if !report.all_passed() {
                anyhow::bail!("{} connectivity check(s) failed", report.failed());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edison_platform::{ClientError, DomainError};
    use serde_json::json;

    #[test]
    fn test_parse_field_json_and_string_values() {
        assert_eq!(
            parse_field("analysis_type=differential").unwrap(),
            ("analysis_type".to_string(), json!("differential"))
        );
        assert_eq!(parse_field("top_k=5").unwrap(), ("top_k".to_string(), json!(5)));
        assert_eq!(
            parse_field(r#"metadata={"priority":"high"}"#).unwrap(),
            ("metadata".to_string(), json!({"priority": "high"}))
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_parse_task_errors_are_domain_errors() {
        assert!(parse_task(r#"{"name":"LITERATURE","query":"q"}"#).is_ok());

        for raw in [r#"{"query":"q"}"#, r#"{"name":7}"#, "not json"] {
            let err = parse_task(raw).unwrap_err();
            assert!(
                matches!(
                    err,
                    ClientError::Domain(DomainError::InvalidTaskDescription(_))
                ),
                "{}: {:?}",
                raw,
                err
            );
            assert!(!err.is_config());
        }
    }

    #[test]
    fn test_cli_parses_analyze_fields() {
        let cli = Cli::try_parse_from([
            "edison",
            "analyze",
            "dataset_1",
            "-f",
            "analysis_type=differential",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Analyze { dataset, fields } => {
                assert_eq!(dataset, "dataset_1");
                assert_eq!(fields, vec![("analysis_type".to_string(), json!("differential"))]);
            }
            _ => panic!("expected analyze"),
        }
    }
}
