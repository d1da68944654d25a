use anyhow::{Context, Result};
use clap::Parser;
use miasma_core::{init_logging, AppConfig, Wetness};
use miasma_lib::Simulation;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Scenario to run (house_fire, gas, electric, vents)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Number of turns to simulate
    #[arg(short, long)]
    turns: Option<u64>,

    /// Seed for the random stream (makes the run deterministic)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the map every N turns
    #[arg(long)]
    render_every: Option<u64>,

    /// Rain on the bubble
    #[arg(long, value_enum)]
    rain: Option<Rain>,

    /// Restore the field layer from a save file before running
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the field layer to a save file after running (`.gz` compresses)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Rain {
    Wet,
    VeryWet,
}

impl From<Rain> for Wetness {
    fn from(rain: Rain) -> Self {
        match rain {
            Rain::Wet => Wetness::Wet,
            Rain::VeryWet => Wetness::VeryWet,
        }
    }
}

fn load_config(path: &str) -> AppConfig {
    if let Ok(content) = std::fs::read_to_string(path) {
        match AppConfig::from_toml(&content) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path, e);
            }
        }
    }
    let default = AppConfig::default();
    if !std::path::Path::new(path).exists() {
        if let Ok(toml_str) = toml::to_string(&default) {
            let _ = std::fs::write(path, toml_str);
        }
    }
    default
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config);
    if let Some(scenario) = args.scenario {
        config.run.scenario = scenario;
    }
    if let Some(turns) = args.turns {
        config.run.turns = turns;
    }
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
        config.world.deterministic = true;
    }
    config.validate()?;

    let mut sim = Simulation::from_config(&config)?;
    sim.weather = args.rain.map(Wetness::from);
    if let Some(path) = &args.load {
        let snapshot = miasma_io::load_snapshot(path)?;
        let report = sim
            .load_fields(&snapshot)
            .with_context(|| format!("restoring {}", path.display()))?;
        tracing::info!(
            loaded = report.loaded,
            unknown = report.unknown,
            clamped = report.clamped,
            "Fields restored"
        );
    }

    println!("{}", sim.render());
    let summary = match args.render_every.filter(|n| *n > 0) {
        Some(every) => sim.run_with(config.run.turns, |sim| {
            if sim.turn as u64 % every == 0 {
                println!("Turn {}\n{}", sim.turn, sim.render());
            }
        }),
        None => {
            let summary = sim.run(config.run.turns);
            println!("{}", sim.render());
            summary
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Turns: {}", summary.turns);
        for (key, count) in &summary.active {
            println!("  {key}: {count}");
        }
        println!(
            "Explosions: {}  Monsters alive: {}  dead: {}",
            summary.explosions, summary.monsters_alive, summary.monsters_dead
        );
        if let Some(hp) = summary.player_hp {
            println!("Player hp: {hp:?}");
        }
        for message in summary.messages.iter().rev().take(10).rev() {
            println!("> {message}");
        }
    }

    if let Some(path) = &args.save {
        miasma_io::save_snapshot(&sim.snapshot(), path)?;
        println!("Fields saved to {}", path.display());
    }
    Ok(())
}
