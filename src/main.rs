//! Command-line host for the skatemap view engine.
//!
//! The binary is a thin layer over the library: it resolves configuration, installs
//! tracing, loads the park collection into an `AppState` drawing on a headless map
//! surface, then feeds the requested criteria through the same event loop a UI host
//! would use and prints the resulting view.
//!
//! # Commands
//!
//! - `list` (default): the filtered, sorted list view
//! - `map`: the marker legend and the parks visible under a quick filter
//! - `show <ID>`: the detail page of one park
//! - `add`: validates and submits a new park, then prints the refreshed list
//!
//! # Configuration
//!
//! `--config` (or `SKATEMAP_CONFIG`) names a TOML file; without one the defaults are
//! used. `--base-url` and `--trace-level` override the file.

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use skatemap::app::{process_event, AppState, Event};
use skatemap::domain::{Difficulty, NewLocationRecord, RecordId, Status};
use skatemap::infrastructure::expand_tilde;
use skatemap::map::{HeadlessSurface, MarkerStyle};
use skatemap::observability::init_tracing;
use skatemap::remote::HttpSource;
use skatemap::view::{CategoryFilter, ListViewModel, ParkDetail, QuickFilter, SortDirection, SortKey};
use skatemap::{initialize, remote_source, Config, Result};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "skatemap")]
#[command(about = "Browse and extend a skatepark directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "SKATEMAP_CONFIG", global = true)]
    config: Option<String>,

    /// Root URL of the park service
    #[arg(long, env = "SKATEMAP_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Tracing level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, env = "SKATEMAP_TRACE_LEVEL", global = true)]
    trace_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the park list
    List {
        /// Case-insensitive text matched against name, description, and address
        #[arg(short, long, default_value = "")]
        search: String,

        /// Difficulty to show, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Sort key (name, difficulty, status)
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "asc")]
        direction: SortDirection,
    },

    /// Print the marker legend and the parks shown on the map
    Map {
        /// Quick filter (all, beginner, intermediate, advanced, lighted)
        #[arg(short, long, default_value = "all")]
        quick_filter: QuickFilter,
    },

    /// Print the detail page of one park
    Show {
        /// Park identifier
        id: i64,
    },

    /// Submit a new park
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        #[arg(long)]
        address: String,

        #[arg(long)]
        description: String,

        /// Beginner, Intermediate, Advanced, or All-Levels
        #[arg(long, default_value = "Intermediate")]
        difficulty: String,

        /// Active, Under Construction, Temporarily Closed, or Closed
        #[arg(long, default_value = "Active")]
        status: String,

        #[arg(long, default_value = "08:00")]
        opens: String,

        #[arg(long, default_value = "Dusk")]
        closes: String,

        /// The park has fixed closing hours
        #[arg(long)]
        fixed_hours: bool,

        /// The park has night lighting
        #[arg(long)]
        lighting: bool,

        #[arg(long)]
        website: Option<String>,

        /// Feature identifiers, comma separated
        #[arg(long, value_delimiter = ',')]
        features: Vec<i64>,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(&expand_tilde(path))?,
        None => Config::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if cli.trace_level.is_some() {
        config.trace_level.clone_from(&cli.trace_level);
    }
    Ok(config)
}

fn print_list(viewmodel: &ListViewModel) {
    if let Some(notice) = &viewmodel.notice {
        println!("{notice}");
    }
    if let Some(error) = &viewmodel.error {
        eprintln!("error: {error}");
    }
    println!("{}", viewmodel.summary());
    for row in &viewmodel.rows {
        let lighting = if row.has_lighting { "  [lighted]" } else { "" };
        println!(
            "{:>5}  {}  ({}, {})  {}{lighting}",
            row.id, row.name, row.difficulty, row.status, row.hours
        );
        if !row.excerpt.is_empty() {
            println!("       {}", row.excerpt);
        }
    }
}

fn print_map(config: &Config, state: &AppState<HeadlessSurface>, filter: QuickFilter) {
    println!(
        "Map centered on {:.4}, {:.4} at zoom {}",
        config.map.center_lat, config.map.center_lng, config.map.zoom
    );
    println!("Legend:");
    for style in MarkerStyle::ALL {
        println!("  {:<18} {}", style.label(), style.icon_url());
    }
    let parks = state.map_records();
    println!("{}: {} parks", filter.label(), parks.len());
    for record in parks {
        println!("{:>5}  {}", record.id, record.display_name());
    }
}

fn print_detail(detail: &ParkDetail) {
    println!("{}", detail.name);
    println!("  Status:      {}", detail.status);
    println!("  Difficulty:  {}", detail.difficulty);
    println!("  Hours:       {}", detail.hours);
    println!("  Lighting:    {}", if detail.has_lighting { "yes" } else { "no" });
    if !detail.address.is_empty() {
        println!("  Address:     {}", detail.address);
    }
    if let Some(website) = &detail.website {
        println!("  Website:     {website}");
    }
    if let Some(updated) = &detail.last_updated {
        println!("  Updated:     {updated}");
    }
    if let Some(url) = &detail.directions_url {
        println!("  Directions:  {url}");
    }
    if !detail.description.is_empty() {
        println!();
        println!("{}", detail.description);
    }
    for (category, features) in &detail.feature_groups {
        println!();
        println!("{category}:");
        for feature in features {
            println!("  - {}", feature.label());
        }
    }
}

async fn run(cli: Cli, config: Config, source: HttpSource) -> Result<ExitCode> {
    let mut state = initialize(&config, HeadlessSurface::new());
    process_event(&mut state, &source, Event::Refresh).await?;

    let command = cli.command.unwrap_or(Commands::List {
        search: String::new(),
        category: CategoryFilter::All,
        sort: SortKey::Name,
        direction: SortDirection::Ascending,
    });

    match command {
        Commands::List { search, category, sort, direction } => {
            for event in [
                Event::SetSearch(search),
                Event::SetCategory(category),
                Event::SetSortKey(sort),
                Event::SetSortDirection(direction),
            ] {
                process_event(&mut state, &source, event).await?;
            }
            print_list(&state.compute_viewmodel());
        }
        Commands::Map { quick_filter } => {
            process_event(&mut state, &source, Event::SetQuickFilter(quick_filter)).await?;
            if let Some(error) = state.error_message() {
                eprintln!("error: {error}");
            }
            print_map(&config, &state, quick_filter);
        }
        Commands::Show { id } => match state.detail(RecordId(id)) {
            Some(detail) => print_detail(&detail),
            None => {
                if let Some(error) = state.error_message() {
                    eprintln!("error: {error}");
                }
                eprintln!("no park with id {id}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Add {
            name,
            latitude,
            longitude,
            address,
            description,
            difficulty,
            status,
            opens,
            closes,
            fixed_hours,
            lighting,
            website,
            features,
        } => {
            let draft = NewLocationRecord {
                name,
                status: Status::from(status),
                latitude,
                longitude,
                address,
                difficulty: Difficulty::from(difficulty),
                has_lighting: lighting,
                description,
                opens_at: opens,
                closes_at: closes,
                website,
                has_variable_hours: !fixed_hours,
                feature_ids: features,
            };
            process_event(&mut state, &source, Event::SubmitPark(draft)).await?;
            let viewmodel = state.compute_viewmodel();
            print_list(&viewmodel);
            if viewmodel.notice.is_none() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    process_event(&mut state, &source, Event::NavigateAway).await?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("skatemap: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let source = match remote_source(&config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "failed to build remote source");
            eprintln!("skatemap: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(records_url = %source.records_url(), "skatemap starting");

    match run(cli, config, source).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "skatemap failed");
            eprintln!("skatemap: {e}");
            ExitCode::FAILURE
        }
    }
}
