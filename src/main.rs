use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Deserialize;

use synastry::{
    analyze_with, build, validate_profiles, visualize, AstrologyProfile, Config, SajuProfile,
};

/// Compatibility graph engine: build, analyze and encode the relational
/// graph for two people's Saju and Western astrology profiles.
#[derive(Parser)]
#[command(name = "synastry", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the raw compatibility graph as JSON
    Graph {
        person1: PathBuf,
        person2: PathBuf,
    },
    /// Print the graph analysis (paths, scores, critical nodes, insights)
    Analyze {
        person1: PathBuf,
        person2: PathBuf,
    },
    /// Print the render-ready visualization payload
    Visualize {
        person1: PathBuf,
        person2: PathBuf,
    },
}

/// One person's input file: `{ "saju": {...}, "astro": {...} }`.
#[derive(Deserialize)]
struct PersonFile {
    saju: SajuProfile,
    astro: AstrologyProfile,
}

fn load_person(path: &Path) -> Result<PersonFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {}", path.display()))?;
    let person: PersonFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profile JSON: {}", path.display()))?;
    validate_profiles(&person.saju, &person.astro)
        .with_context(|| format!("Invalid profile: {}", path.display()))?;
    Ok(person)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::load()?;

    // RUST_LOG still wins; the config value is only the default filter.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.output.log_level),
    )
    .init();

    let cli = Cli::parse();

    let (p1_path, p2_path) = match &cli.command {
        Command::Graph { person1, person2 }
        | Command::Analyze { person1, person2 }
        | Command::Visualize { person1, person2 } => (person1.clone(), person2.clone()),
    };

    let person1 = load_person(&p1_path)?;
    let person2 = load_person(&p2_path)?;

    let graph = build(&person1.saju, &person1.astro, &person2.saju, &person2.astro);
    info!(
        "graph built: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    match cli.command {
        Command::Graph { .. } => print_json(&graph, config.output.pretty)?,
        Command::Analyze { .. } => {
            let analysis = analyze_with(&graph, &config.tuning());
            print_json(&analysis, config.output.pretty)?;
        }
        Command::Visualize { .. } => {
            let payload = visualize(&graph);
            print_json(&payload, config.output.pretty)?;
        }
    }

    Ok(())
}
