use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use engagement_calc::api::{log_data_quality, parse_entries};
use engagement_calc::config::EngagementConfig;
use engagement_calc::{
    build_report, format_count, format_share, server, AppError, AppResult, EngagementMetrics,
    PlatformEntry,
};

#[derive(Parser)]
#[command(name = "engagement-calc", about = "Multi-platform engagement rate calculator")]
#[command(version)]
struct Cli {
    /// Path to engagement.toml (defaults to $ENGAGEMENT_CONFIG_PATH or config/engagement.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Engagement rate for a single platform
    Rate(RateArgs),
    /// Audience-weighted rate across several platforms, read as JSON
    Combine(CombineArgs),
    /// Classify an existing rate against platform benchmarks
    Quality(QualityArgs),
    /// Run the JSON HTTP API
    Serve(ServeArgs),
    /// Write the default config file
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct RateArgs {
    #[arg(long)]
    platform: String,
    #[arg(long)]
    content_type: Option<String>,
    #[arg(long, default_value_t = 0)]
    likes: u64,
    #[arg(long, default_value_t = 0)]
    comments: u64,
    #[arg(long, default_value_t = 0)]
    shares: u64,
    #[arg(long, default_value_t = 0)]
    saves: u64,
    #[arg(long, default_value_t = 0)]
    views: u64,
    #[arg(long, default_value_t = 0)]
    followers: u64,
    #[arg(long, default_value_t = 0)]
    subscribers: u64,
    #[arg(long, default_value_t = 0)]
    impressions: u64,
}

impl RateArgs {
    fn into_entry(self) -> PlatformEntry {
        let metrics = EngagementMetrics {
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            saves: self.saves,
            views: self.views,
            followers: self.followers,
            subscribers: self.subscribers,
            impressions: self.impressions,
        };
        let entry = PlatformEntry::new(self.platform, metrics);
        match self.content_type {
            Some(content_type) => entry.with_content_type(content_type),
            None => entry,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct CombineArgs {
    /// JSON file with the entries; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct QualityArgs {
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    platform: String,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/engagement.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let (config, config_path) = EngagementConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref() {
        debug!(path = %path.display(), "resolved config path");
    }

    match cli.command {
        Command::Rate(args) => run_rate(args, &config),
        Command::Combine(args) => run_combine(args, &config),
        Command::Quality(args) => run_quality(args, &config),
        Command::Serve(args) => run_serve(args, config).await,
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_rate(args: RateArgs, config: &EngagementConfig) -> AppResult<()> {
    let entry = args.into_entry();
    log_data_quality(&entry);

    let result = entry.result();
    let quality = config.classifier().classify(result.rate, &result.platform);

    println!("Engagement rate: {}", result.formatted_rate);
    match result.content_type {
        Some(content_type) => println!("Platform: {} ({})", result.platform, content_type.label()),
        None => println!("Platform: {}", result.platform),
    }
    println!("Quality: {} ({})", quality.quality.label(), quality.description);
    Ok(())
}

fn run_combine(args: CombineArgs, config: &EngagementConfig) -> AppResult<()> {
    let payload = read_payload(args.input.as_deref())?;
    let entries = parse_entries(&payload)?;
    for entry in &entries {
        log_data_quality(entry);
    }
    info!(entries = entries.len(), "combining engagement entries");

    let report = build_report(&entries, &config.classifier());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Combined engagement: {} ({})",
        report.combined.formatted_rate,
        report.combined_quality.quality.label()
    );
    for item in &report.entries {
        let platform = match item.result.content_type {
            Some(content_type) => format!("{} {}", item.result.platform, content_type.label()),
            None => item.result.platform.clone(),
        };
        println!(
            "  {}: {} | {} | weight {} ({})",
            platform,
            item.result.formatted_rate,
            item.quality.quality.label(),
            format_count(item.weight as u64),
            format_share(item.weight_share)
        );
    }
    Ok(())
}

fn run_quality(args: QualityArgs, config: &EngagementConfig) -> AppResult<()> {
    if !args.rate.is_finite() {
        return Err(AppError::InvalidInput(format!("rate must be finite: {}", args.rate)));
    }
    let quality = config.classifier().classify(args.rate, &args.platform);
    println!("Quality: {}", quality.quality.label());
    println!("{}", quality.description);
    Ok(())
}

async fn run_serve(args: ServeArgs, mut config: EngagementConfig) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let classifier = config.classifier();
    server::serve(&config.server, classifier).await
}

fn run_init_config(args: InitConfigArgs) -> AppResult<()> {
    if args.path.exists() {
        return Err(AppError::Config(format!(
            "refusing to overwrite existing config: {}",
            args.path.display()
        )));
    }
    EngagementConfig::default().write(&args.path)?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn read_payload(path: Option<&Path>) -> AppResult<String> {
    if let Some(path) = path {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "missing entries: pass --input or pipe JSON on stdin".to_string(),
        ));
    }
    Ok(buffer)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
