use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokemeta::calculate::final_stats::DEFAULT_LEVEL;
use pokemeta::calculate::spreads::SpreadKey;
use pokemeta::calculate::{self, calculate_stats, collect, top_pokemon};
use pokemeta::config::AppConfig;
use pokemeta::models::{MetadataTables, Stat, UsageTable};
use pokemeta::storage::{self, StorageConfig};
use pokemeta::{default_config_path, parse_ivs};

#[derive(Parser)]
#[command(name = "pokemeta")]
#[command(about = "Competitive Pokémon usage statistics analyzer")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full analytics record for a Pokémon
    Stats {
        /// Pokémon name (defaults to the most used Pokémon)
        pokemon: Option<String>,

        /// Format id, e.g. gen9ou
        #[arg(long)]
        format: Option<String>,

        /// Rating cutoff (defaults to the highest available)
        #[arg(long)]
        rating: Option<u32>,
    },

    /// Checks and counters analysis
    Counters {
        /// Pokémon to look up as a counter ("chart" and "top5-detailed" also accepted)
        pokemon: Option<String>,

        /// Format id, e.g. gen9ou
        #[arg(long)]
        format: Option<String>,

        /// Show leaderboard of top counters
        #[arg(long)]
        chart: bool,

        /// Show detailed victims for the top 5 counters
        #[arg(long)]
        top5: bool,

        /// Leaderboard size for --chart
        #[arg(long, default_value = "50")]
        top: usize,
    },

    /// List formats and their ratings for the latest month
    Formats,

    /// Compute final stats for a spread
    Calc {
        /// Pokémon name (defaults to the most used Pokémon)
        pokemon: Option<String>,

        /// Spread as Nature:HP/Atk/Def/SpA/SpD/Spe
        #[arg(long)]
        spread: String,

        /// Level
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level: u32,

        /// IVs, one value or six separated by '/'
        #[arg(long, default_value = "31")]
        ivs: String,

        /// Format id used to pick the default Pokémon
        #[arg(long)]
        format: Option<String>,
    },

    /// Build global_stats.json for every format in the latest month
    BuildGlobal {
        /// Output path (defaults to data/<month>/global_stats.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Some(default_config_path()).filter(|p| p.exists()),
    };

    let mut config = AppConfig::load(path.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }
    Ok(config)
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Latest month's stats file for a format, loaded.
fn load_table(
    storage: &StorageConfig,
    format: &str,
    rating: Option<u32>,
) -> Result<UsageTable> {
    let date = storage::latest_date(storage)?;
    let file = storage::stats_file(storage, &date, format, rating)?;
    tracing::info!("Loading stats from {:?}", file.path);
    Ok(storage::load_usage_table(&file.path)?)
}

fn subject_or_top(pokemon: Option<String>, table: &UsageTable) -> Result<String> {
    match pokemon {
        Some(name) => Ok(name),
        None => {
            let top = top_pokemon(table).ok_or_else(|| anyhow!("Could not determine top Pokémon"))?;
            tracing::info!("No Pokémon specified, using top Pokémon: {}", top);
            Ok(top.to_string())
        }
    }
}

fn print_victims(subject: &str, table: &UsageTable) {
    let victims = calculate::victims(subject, table);
    if victims.is_empty() {
        println!("\n'{}' is not a counter for any Pokémon in this dataset.", subject);
        return;
    }

    println!(
        "\n'{}' is a counter for the following {} Pokémon:\n",
        subject,
        victims.len()
    );
    println!("{:<25} | {:<5} | {:<10}", "Pokémon", "Rank", "Score");
    println!("{}", "-".repeat(45));
    for victim in victims {
        println!("{:<25} | {:<5} | {:<10}", victim.name, victim.rank, victim.score);
    }
}

fn print_leaderboard(table: &UsageTable, top: usize, show_victims: bool) {
    let board = calculate::leaderboard(table);

    println!("\n--- Top {} Most Common Counters ---", top);
    if !show_victims {
        println!(
            "{:<5} | {:<25} | {:<15} | {:<10}",
            "Rank", "Pokémon", "Counter Count", "Avg Score"
        );
        println!("{}", "-".repeat(65));
    }

    for (i, entry) in board.iter().take(top).enumerate() {
        if show_victims {
            println!(
                "\n#{} {} (Counters {} Pokémon, Avg Score: {:.2})",
                i + 1,
                entry.name,
                entry.count,
                entry.avg_score
            );
            println!("Countered: {}", entry.victims.join(", "));
        } else {
            println!(
                "{:<5} | {:<25} | {:<15} | {:<10.2}",
                i + 1,
                entry.name,
                entry.count,
                entry.avg_score
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting pokemeta v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Stats {
            pokemon,
            format,
            rating,
        } => {
            let format = format.unwrap_or_else(|| config.default_format.clone());
            let table = load_table(&storage, &format, rating)?;
            let metadata = storage::load_metadata(&storage.meta_dir());
            let name = subject_or_top(pokemon, &table)?;

            let stats = collect(&name, &table, &metadata)
                .ok_or_else(|| anyhow!("Pokémon '{}' not found in {}", name, format))?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Counters {
            pokemon,
            format,
            chart,
            top5,
            top,
        } => {
            let format = format.unwrap_or_else(|| config.default_format.clone());
            let table = load_table(&storage, &format, None)?;

            let keyword = pokemon.as_deref().map(str::to_lowercase);
            if chart || keyword.as_deref() == Some("chart") {
                print_leaderboard(&table, top, false);
            } else if top5 || keyword.as_deref() == Some("top5-detailed") {
                print_leaderboard(&table, 5, true);
            } else {
                let subject = subject_or_top(pokemon, &table)?;
                print_victims(&subject, &table);
            }
        }
        Commands::Formats => {
            let date = storage::latest_date(&storage)?;
            let metadata = storage::load_metadata(&storage.meta_dir());

            println!("Formats for {}:\n", date);
            for format in storage::list_formats(&storage, &date)? {
                let ratings = storage::list_ratings(&storage, &date, &format)?;
                let ratings: Vec<String> = ratings.iter().map(u32::to_string).collect();
                println!(
                    "{:<30} {:<30} {}",
                    format,
                    metadata.format_name(&format),
                    ratings.join(", ")
                );
            }
        }
        Commands::Calc {
            pokemon,
            spread,
            level,
            ivs,
            format,
        } => {
            let key = SpreadKey::parse(&spread)
                .ok_or_else(|| anyhow!("Invalid spread '{}', expected Nature:H/A/D/C/D/S", spread))?;
            let ivs = parse_ivs(&ivs).ok_or_else(|| anyhow!("Invalid IVs '{}'", ivs))?;
            if !(1..=100).contains(&level) {
                bail!("Level must be between 1 and 100");
            }

            let metadata: MetadataTables = storage::load_metadata(&storage.meta_dir());
            let name = match pokemon {
                Some(name) => name,
                None => {
                    let format = format.unwrap_or_else(|| config.default_format.clone());
                    let table = load_table(&storage, &format, None)?;
                    subject_or_top(None, &table)?
                }
            };
            let species = metadata
                .species(&name)
                .ok_or_else(|| anyhow!("Species '{}' not found in pokedex", name))?;
            if key.nature.is_none() {
                tracing::warn!("Unknown nature '{}', treating as neutral", key.nature_name);
            }

            let stats = calculate_stats(
                species.base_stats.to_array(),
                key.evs,
                key.nature,
                level,
                ivs,
            );

            println!("{} @ level {} ({})\n", species.name, level, spread);
            for stat in Stat::ALL {
                println!("{:<4} {:>4}", stat.label(), stats[stat.index()]);
            }
        }
        Commands::BuildGlobal { output } => {
            let metadata = storage::load_metadata(&storage.meta_dir());
            let summary = pokemeta::global::build_and_write(&storage, &metadata, output.as_deref())?;

            println!("\n=== Global Build ===");
            println!("Month:    {}", summary.date);
            println!("Formats:  {}", summary.formats.len());
            println!("Pokémon:  {}", summary.total_pokemon());
        }
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let metadata = storage::load_metadata(&storage.meta_dir());
            let state = pokemeta::api::state::AppState::new(
                storage,
                metadata,
                config.server.cors_origin.clone(),
            );

            let app = pokemeta::api::build_router(state);
            let app = if access_log {
                app.layer(TraceLayer::new_for_http())
            } else {
                app
            };

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
