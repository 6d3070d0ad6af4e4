use adminctl::api::{format_api_error, ApiClient, Query, RequestConfig, TableData};
use adminctl::config::Config;
use adminctl::resource::{self, ResourceDef, ResourceId};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Storage and work order client for the admin backend
#[derive(Parser, Debug)]
#[command(name = "adminctl", version = adminctl::VERSION, about, long_about = None)]
struct Args {
    /// Backend base URL, including any path prefix
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Print the request instead of sending it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print the full response envelope
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known resource collections
    Resources,
    /// Save connection settings to the config file
    Config {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
    /// Query a collection
    List {
        resource: String,
        /// Filter as key=value, repeatable
        #[arg(short, long = "query", value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },
    /// Fetch records by id
    Get {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create a record from a JSON object
    Add {
        resource: String,
        #[arg(long)]
        data: String,
    },
    /// Update a record from a JSON object that includes its id field
    Update {
        resource: String,
        #[arg(long)]
        data: String,
    },
    /// Delete records by id (several ids go in one request)
    Delete {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // ADMINCTL_LOG narrows the filter further, e.g. "adminctl::api=trace"
    let filter = EnvFilter::try_from_env("ADMINCTL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("adminctl started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("adminctl").join("adminctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".adminctl").join("adminctl.log");
    }
    PathBuf::from("adminctl.log")
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

fn parse_payload(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    if !value.is_object() {
        return Err(anyhow::anyhow!("--data must be a JSON object"));
    }
    Ok(value)
}

fn parse_ids(ids: &[String]) -> ResourceId {
    match ids {
        [single] => ResourceId::parse(single),
        many => ResourceId::Many(many.iter().map(|id| ResourceId::parse(id)).collect()),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("{:?}", err);
        eprintln!("Error: {}", format_api_error(&err));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load();

    let (def, request) = match &args.command {
        Command::Resources => {
            for key in resource::get_all_resource_keys() {
                if let Some(def) = resource::get_resource(key) {
                    println!("{:<18} {:<20} {}", key, def.base_path(), def.display_name);
                }
            }
            return Ok(());
        }
        Command::Config { base_url, token } => {
            let mut stored = config;
            if let Some(base_url) = base_url {
                adminctl::api::client::validate_base_url(base_url)?;
                stored.set_base_url(base_url)?;
            }
            if let Some(token) = token {
                stored.set_token(token)?;
            }
            println!("base_url: {}", stored.saved_base_url());
            println!(
                "token:    {}",
                if stored.token.is_some() { "set" } else { "not set" }
            );
            return Ok(());
        }
        Command::List { resource: key, query } => {
            let def = resource::require_resource(key)?;
            let query: Query = query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            (def, def.api().list_request(query))
        }
        Command::Get { resource: key, ids } => {
            let def = resource::require_resource(key)?;
            if ids.len() > 1 {
                if args.dry_run {
                    for id in ids {
                        println!("{}", def.api().get_request(ResourceId::parse(id)));
                    }
                    return Ok(());
                }
                let client = build_client(&args, &config)?;
                return get_many(&client, def, ids, args.raw).await;
            }
            (def, def.api().get_request(ResourceId::parse(&ids[0])))
        }
        Command::Add { resource: key, data } => {
            let def = resource::require_resource(key)?;
            (def, def.api().add_request(parse_payload(data)?))
        }
        Command::Update { resource: key, data } => {
            let def = resource::require_resource(key)?;
            let payload = parse_payload(data)?;
            if payload.get(&def.id_field).is_none() {
                tracing::warn!("update payload has no {} field", def.id_field);
            }
            (def, def.api().update_request(payload))
        }
        Command::Delete { resource: key, ids } => {
            let def = resource::require_resource(key)?;
            (def, def.api().delete_request(parse_ids(ids)))
        }
    };

    if args.dry_run {
        print_request(&request)?;
        return Ok(());
    }

    let client = build_client(&args, &config)?;
    tracing::info!("{} ({})", request, def.display_name);

    let is_list = request.url.ends_with("/list");
    let response = client.request(request).await?;

    if args.raw {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if is_list {
        let table = TableData::from(&response);
        println!("{}", serde_json::to_string_pretty(&table.rows)?);
        eprintln!("{} of {} rows", table.rows.len(), table.total);
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(adminctl::api::extract_data(&response))?
        );
    }

    Ok(())
}

/// Client settings: CLI flag > env > config file > default
fn build_client(args: &Args, config: &Config) -> Result<ApiClient> {
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.effective_base_url());
    let timeout = args
        .timeout
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.effective_timeout());

    let client = ApiClient::new(&base_url)?.with_timeout(timeout)?;

    Ok(match args.token.clone().or_else(|| config.effective_token()) {
        Some(token) => client.with_token(token),
        None => client,
    })
}

async fn get_many(client: &ApiClient, def: &ResourceDef, ids: &[String], raw: bool) -> Result<()> {
    let parsed: Vec<ResourceId> = ids.iter().map(|id| ResourceId::parse(id)).collect();
    let results = def.api().get_many(client, parsed).await;

    let mut failures = 0;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(response) => {
                let shown = if raw {
                    &response
                } else {
                    adminctl::api::extract_data(&response)
                };
                println!("{}", serde_json::to_string_pretty(shown)?);
            }
            Err(err) => {
                failures += 1;
                tracing::error!("get {} failed: {:?}", id, err);
                eprintln!("{} {}: {}", def.id_field, id, format_api_error(&err));
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!("{} of {} requests failed", failures, ids.len()));
    }
    Ok(())
}

fn print_request(request: &RequestConfig) -> Result<()> {
    println!("{}", request);
    if let Some(data) = &request.data {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}
