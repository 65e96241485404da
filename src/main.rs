mod cli;
mod logging;
mod reporter;

use std::process;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, ProcessArgs};
use colored::*;
use dotenv::dotenv;
use reporter::CliReporter;
use slide_picker::config::load_configuration;
use slide_picker::model::Coordinate;
use slide_picker::{AppConfig, ExifReader, GeoNamesGazetteer, SlideshowEngine};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let config = match load_configuration(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    match args
        .command
        .unwrap_or(Commands::Process(ProcessArgs::default()))
    {
        Commands::Process(process_args) => run_process(&config, process_args.dry_run)?,
        Commands::Caption { photo } => {
            let engine = build_engine(&config)?;
            let outcome = engine.caption_for(&photo);
            println!("Label  : {}", outcome.caption);
            println!("Date   : {}", outcome.full_date);
            println!("GPS    : {}", outcome.gps_status);
        }
        Commands::Locate {
            latitude,
            longitude,
        } => {
            let Some(coordinate) = Coordinate::new(latitude, longitude) else {
                bail!("({}, {}) is not a usable coordinate", latitude, longitude);
            };
            let engine = build_engine(&config)?;
            match engine.locate(coordinate) {
                Some(location) => {
                    println!("Label  : {}", location.label);
                    println!("Status : {}", location.status);
                }
                None => println!("No city found near ({}, {})", latitude, longitude),
            }
        }
        Commands::PrintConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn build_engine(config: &AppConfig) -> anyhow::Result<SlideshowEngine> {
    let gazetteer = GeoNamesGazetteer::open(&config.gazetteer)
        .with_context(|| format!("loading gazetteer '{}'", config.gazetteer.path))?;
    let engine = SlideshowEngine::new(config.clone(), Box::new(gazetteer), Box::new(ExifReader))?;
    Ok(engine)
}

fn run_process(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    info!("--- Lancement du tirage photo (mode séquentiel) ---");

    let engine = build_engine(config)?.with_dry_run(dry_run);
    let reporter = CliReporter::new();
    let summary = engine.run(&reporter)?;

    println!();
    info!(
        "Scan: {}, Captions: {}",
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.process_duration.as_secs_f64()).green(),
    );
    info!(
        "{} photos found, {} drawn, {} written, {} failed",
        format!("{}", summary.photos_found).cyan(),
        format!("{}", summary.selected).cyan(),
        format!("{}", summary.written).green(),
        format!("{}", summary.failed).red(),
    );
    info!(
        "{} located by GPS, {} by folder name",
        format!("{}", summary.located_by_gps).cyan(),
        format!("{}", summary.located_by_folder).cyan(),
    );
    info!("--- Terminé ! ---");

    Ok(())
}
