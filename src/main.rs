use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::{error, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use roots_hunt::{
    AppConfig, Catalog, CollectionResult, Direction, FileBasedStore, HuntError, HuntState,
    KeyValueStore, MemoryStore, Motion, Orientation, Point, Station, VisitKind,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Directory of the hunt store
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// JSON station catalog to use instead of the built-in one
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Seed for a reproducible session draw
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every station of the site
    Stations,
    /// Show the stations drawn for this visit
    Session,
    /// Show session stations near a map position
    Nearby {
        #[arg(short, long)]
        x: f32,
        #[arg(short, long)]
        y: f32,
    },
    /// Collect the item of a station
    Collect { id: String },
    /// Show collected items and progress
    Inventory,
    /// Tell the story of a station
    Story { id: String },
    /// Walk the map interactively
    Explore,
    /// Show the settings in use
    Config {
        /// Write them to the user's config file
        #[arg(long)]
        save: bool,
    },
}

fn open_store(args: &Args, config: &AppConfig) -> Box<dyn KeyValueStore> {
    let store = match args.store.clone().or_else(|| config.store_path.clone()) {
        Some(path) => FileBasedStore::new(path),
        None => FileBasedStore::new_default(),
    };
    match store {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Hunt store unavailable, progress will not be saved: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn start_hunt(args: &Args) -> Result<HuntState, HuntError> {
    let config = AppConfig::from_local_file().unwrap_or_default();
    let catalog = match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::default(),
    };
    let store = open_store(args, &config);
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(HuntState::start(config, catalog, store, &mut rng))
}

fn print_stations<'a>(hunt: &HuntState, stations: impl IntoIterator<Item = &'a Station>) {
    for station in stations {
        let mark = if hunt.is_collected(&station.id) { "✔" } else { " " };
        println!(
            "[{}] {} {} {} ({:.0}, {:.0}) - {}",
            mark,
            station.id,
            station.icon,
            station.name,
            station.position.x,
            station.position.y,
            station.item
        );
    }
}

fn print_inventory(hunt: &HuntState) {
    let progress = hunt.progress();
    println!(
        "{} / {} items collected ({:.0}%)",
        progress.collected,
        progress.total,
        progress.percent()
    );
    for item in hunt.inventory() {
        let date = item
            .collected_at
            .map(|at| at.with_timezone(&Local).format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        println!(
            "  {} {} [{}] from {} - collected {}",
            item.icon, item.item, item.nft_image, item.name, date
        );
    }
    if progress.is_complete() {
        println!("Every item of the site is in your collection!");
    } else if !hunt.inventory().is_empty() {
        println!("Keep exploring to find {} more items.", progress.remaining());
    } else {
        println!("Nothing collected yet. Explore the map to find the stations.");
    }
}

fn print_surroundings(hunt: &HuntState) {
    let nearby = hunt.nearby();
    println!(
        "Position {} - {} stations nearby",
        hunt.position(),
        nearby.len()
    );
    if nearby.is_empty() {
        if let Some((station, distance)) = hunt.nearest() {
            println!(
                "Closest: {} {} ({:.0} away)",
                station.icon, station.name, distance
            );
        }
    } else {
        print_stations(hunt, nearby);
    }
}

fn collect(hunt: &mut HuntState, id: &str) -> Result<(), HuntError> {
    let station = hunt
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| HuntError::UnknownStation { id: id.to_string() })?;
    match hunt.collect(id)? {
        CollectionResult::Collected => {
            println!("{}\n", station.story());
            println!("Collected {} {}", station.icon, station.item);
        }
        CollectionResult::AlreadyCollected => {
            println!(
                "{} {} is already in your collection",
                station.icon, station.item
            );
        }
    }
    let progress = hunt.progress();
    println!("Collection: {}/{}", progress.collected, progress.total);
    Ok(())
}

/// Parse the three numeric readings of a sensor command
fn parse_reading<'a>(
    field: &str,
    words: impl Iterator<Item = &'a str>,
) -> Result<[f32; 3], HuntError> {
    let values: Vec<f32> = words
        .map(|w| w.parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| HuntError::InvalidUserInput {
            field: field.to_string(),
            reason: e.to_string(),
        })?;
    <[f32; 3]>::try_from(values).map_err(|values| HuntError::InvalidUserInput {
        field: field.to_string(),
        reason: format!("expected 3 values, got {}", values.len()),
    })
}

fn show_config(hunt: &HuntState, save: bool) -> Result<(), HuntError> {
    let config = hunt.config();
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| HuntError::ConfigSerializeError { source: e })?;
    println!("{}", content);
    if save {
        config.save()?;
        println!("Saved to {:?}", AppConfig::config_path()?);
    }
    Ok(())
}

fn explore(hunt: &mut HuntState) -> Result<(), HuntError> {
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .map_err(|e| HuntError::SignalHandlerError { source: e })?;

    println!(
        "Session stations: {}",
        hunt.session().stations().iter().map(|s| &s.id).join(", ")
    );
    println!("Move with w/a/s/d, collect with 'c <ID>', 'i' for inventory, 'q' to quit");
    println!("Tilt with 't <alpha> <beta> <gamma>', shake with 'm <x> <y> <z>'");
    print_surroundings(hunt);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| HuntError::ConsoleIOError { source: e })?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| HuntError::ConsoleIOError { source: e })?;
        if read == 0 {
            return Ok(());
        }

        let mut words = line.split_whitespace();
        match words.next() {
            None => continue,
            Some("q") => return Ok(()),
            Some("i") => print_inventory(hunt),
            Some("c") => match words.next() {
                Some(id) => {
                    if let Err(e) = collect(hunt, id) {
                        println!("{}", e);
                    }
                }
                None => println!("Usage: c <ID>"),
            },
            Some("t") => match parse_reading("orientation", words) {
                Ok([alpha, beta, gamma]) => {
                    hunt.apply_orientation(Orientation { alpha, beta, gamma });
                    print_surroundings(hunt);
                }
                Err(e) => println!("{}", e),
            },
            Some("m") => match parse_reading("motion", words) {
                Ok([x, y, z]) => {
                    if hunt.apply_motion(Motion { x, y, z }) {
                        print_surroundings(hunt);
                    } else {
                        println!("Too gentle, shake harder to move");
                    }
                }
                Err(e) => println!("{}", e),
            },
            Some(word) => match word.parse::<Direction>() {
                Ok(direction) => {
                    hunt.move_player(direction);
                    print_surroundings(hunt);
                }
                Err(e) => println!("{}", e),
            },
        }
    }
}

fn run(args: &Args) -> Result<(), HuntError> {
    let mut hunt = start_hunt(args)?;
    if hunt.visit() == VisitKind::FirstVisit {
        println!("Welcome to Code The Roots - Phú Thọ Hòa tunnels!");
    }

    match &args.command {
        Commands::Stations => print_stations(&hunt, hunt.catalog().stations()),
        Commands::Session => print_stations(&hunt, hunt.session().stations()),
        Commands::Nearby { x, y } => {
            hunt.set_position(Point::new(*x, *y));
            print_surroundings(&hunt);
        }
        Commands::Collect { id } => collect(&mut hunt, id)?,
        Commands::Inventory => print_inventory(&hunt),
        Commands::Story { id } => println!("{}", hunt.story(id)?),
        Commands::Explore => explore(&mut hunt)?,
        Commands::Config { save } => show_config(&hunt, *save)?,
    }
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
