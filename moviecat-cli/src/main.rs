mod cli;
mod error;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use moviecat_lib::MovieRepository;
use moviecat_lib::RepositoryConfig;
use moviecat_lib::TmdbClient;
use moviecat_lib::cache::CacheConfig;
use moviecat_lib::store::KvStore;
use moviecat_lib::store::SqliteBackend;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::FavoritesCommand;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(log_file) = File::create(&path) else { return };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(level, Config::default(), log_file);
}

fn database_path(cli: &Cli) -> Result<PathBuf, CliError> {
    let path = match &cli.db {
        Some(path) => path.clone(),
        None => paths::database().ok_or(CliError::NoDataDir)?,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| CliError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(path)
}

async fn open_repository(cli: &Cli) -> Result<MovieRepository, CliError> {
    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None if cli.command.needs_network() => return Err(CliError::MissingApiKey),
        // Offline commands never reach the API.
        None => String::new(),
    };
    let api = TmdbClient::builder().api_key(api_key).build()?;

    let path = database_path(cli)?;
    log::info!("Using database {}", path.display());
    let store = KvStore::new(SqliteBackend::open(&path).await?);

    let cache = if cli.no_delay {
        CacheConfig::no_delay()
    } else {
        CacheConfig::default()
    };
    let config = RepositoryConfig::new()
        .with_cache(cache)
        .with_language(cli.language.clone());

    let repository = MovieRepository::builder()
        .api(api)
        .store(store)
        .config(config)
        .build()
        .await?;
    Ok(repository)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let repository = open_repository(&cli).await?;

    match cli.command {
        Command::Trending { window, refresh } => {
            let response = if refresh {
                repository.refresh_trending(window).await?
            } else {
                repository.trending_movies(window).await?
            };
            if let Some(note) = render::cache_note(&response.cache) {
                println!("{}", note);
            }
            let favorites = repository.favorites();
            for movie in response.data() {
                println!("{}", render::movie_line(movie, favorites.contains(movie.id)));
            }
        }
        Command::Details { id } => {
            let details = repository.movie_details(id).await?;
            print!("{}", render::details(&details, repository.favorites().contains(id)));
        }
        Command::Favorites(command) => favorites(&repository, command).await?,
    }

    Ok(())
}

async fn favorites(repository: &MovieRepository, command: FavoritesCommand) -> Result<(), CliError> {
    match command {
        FavoritesCommand::List => {
            for id in repository.favorite_ids() {
                println!("{}", id);
            }
        }
        FavoritesCommand::Add { id } => {
            if repository.add_favorite(id).await? {
                println!("Added {} to favorites", id);
            } else {
                println!("{} is already a favorite", id);
            }
        }
        FavoritesCommand::Remove { id } => {
            if repository.remove_favorite(id).await? {
                println!("Removed {} from favorites", id);
            } else {
                println!("{} is not a favorite", id);
            }
        }
        FavoritesCommand::Toggle { id } => {
            let now_favorite = repository.toggle_favorite(id).await?;
            println!(
                "{} {}",
                id,
                if now_favorite { "added to favorites" } else { "removed from favorites" }
            );
        }
        FavoritesCommand::Show => {
            let movies = repository.favorite_movie_details().await;
            if movies.is_empty() {
                println!("No favorites");
            }
            for details in &movies {
                println!("{}", render::details(details, true));
            }
        }
    }
    Ok(())
}
