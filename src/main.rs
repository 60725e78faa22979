// src/main.rs
//
// Command-line front end of the movie catalog

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use moviedb::db::{get_connection, get_database_stats, verify_database_integrity};
use moviedb::utils::init_logger;
use moviedb::{
    create_connection_pool, Catalog, CatalogConfig, CollectionStorage, EventBus, PersonKind,
    SqliteCollectionStorage,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Database file, overriding MOVIEDB_DATABASE and the default location
    #[clap(long, global = true)]
    database: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the stored catalog with the sample data
    Seed,
    /// Delete all stored movie data
    Clear,
    /// Print stored entries
    List {
        #[clap(value_enum, default_value_t = Listing::All)]
        what: Listing,
    },
    /// Verify the database file and report its size
    Check,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Listing {
    Persons,
    Actors,
    Directors,
    Movies,
    All,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logger();
    let args = Args::parse();

    let mut config = CatalogConfig::from_env()?;
    if let Some(path) = args.database {
        config = config.with_database_path(path);
    }

    // 1. INFRASTRUCTURE
    let pool = Arc::new(
        create_connection_pool(&config.database_path)
            .with_context(|| format!("opening {}", config.database_path.display()))?,
    );
    let event_bus = Arc::new(EventBus::new());

    // 2. STORAGE
    let storage: Arc<dyn CollectionStorage> = Arc::new(SqliteCollectionStorage::new(pool.clone())?);

    // 3. CATALOG
    let mut catalog = Catalog::new(storage, event_bus, config.collections.clone());

    match args.cmd {
        Some(Command::Seed) => {
            catalog.create_test_data()?;
            println!(
                "Stored {} persons and {} movies.",
                catalog.persons().len(),
                catalog.movies().len()
            );
        }
        Some(Command::Clear) => {
            catalog.clear_data()?;
            println!("All data cleared.");
        }
        Some(Command::List { what }) => {
            catalog.retrieve_all();
            list(&catalog, what);
        }
        Some(Command::Check) => {
            let conn = get_connection(&pool)?;
            verify_database_integrity(&conn)?;
            let stats = get_database_stats(&conn)?;
            let report = catalog.retrieve_all();
            println!("Database: {}", config.database_path.display());
            println!(
                "  {} bytes in {} pages, {} collections",
                stats.size_bytes, stats.page_count, stats.collection_count
            );
            println!(
                "  {} persons, {} actors, {} directors, {} movies, {} rejected records",
                report.persons, report.actors, report.directors, report.movies, report.rejected
            );
        }
        None => {
            println!("MovieDB CLI. Use --help for usage.");
        }
    }

    Ok(())
}

fn list(catalog: &Catalog, what: Listing) {
    let kinds = [
        (Listing::Persons, PersonKind::Person),
        (Listing::Actors, PersonKind::Actor),
        (Listing::Directors, PersonKind::Director),
    ];
    for (listing, kind) in kinds {
        if what == listing || what == Listing::All {
            println!("{:?}:", listing);
            for person in catalog.persons().iter_kind(kind) {
                println!("  {}", person);
            }
        }
    }
    if what == Listing::Movies || what == Listing::All {
        println!("Movies:");
        for movie in catalog.movies().iter() {
            println!("  {}", movie);
        }
    }
}
