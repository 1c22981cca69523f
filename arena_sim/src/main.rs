//! arena_sim - Play persisted arena fights from the command line
//!
//! Fights are stored in a JSON file, so a fight started by one invocation can
//! be continued by the next.

mod simulation;

use anyhow::{Context, Result};
use arena_core::config::{load_constants, load_roster};
use arena_core::{
    default_constants, default_roster, CharacterId, FightEngine, FightId, FightStore,
    InMemoryFightStore, JsonFileFightStore, TurnRequest,
};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::AutoFight;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena_sim")]
#[command(about = "Hero vs villain arena: resolve and persist fights turn by turn", long_about = None)]
struct Cli {
    /// Roster TOML file (bundled roster if omitted)
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Arena constants TOML file (bundled constants if omitted)
    #[arg(long)]
    constants: Option<PathBuf>,
    /// JSON file holding every fight
    #[arg(long, default_value = "fights.json")]
    store: PathBuf,
    /// Keep fights in memory only
    #[arg(long)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a 1v1 fight automatically until one side falls
    Duel {
        #[arg(long)]
        a: u32,
        #[arg(long)]
        b: u32,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        creator: Option<String>,
        #[arg(long, default_value_t = 500)]
        max_turns: u32,
    },
    /// Play a team battle automatically until one team is wiped out
    Team {
        #[arg(long)]
        heroes: String,
        #[arg(long)]
        villains: String,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        creator: Option<String>,
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,
    },
    /// Resolve a single turn and print the response as JSON
    Turn {
        /// Continue this fight; omit to start a new one
        #[arg(long)]
        fight_id: Option<u64>,
        /// First duelist when starting a 1v1 fight
        #[arg(long)]
        a: Option<u32>,
        /// Second duelist when starting a 1v1 fight
        #[arg(long)]
        b: Option<u32>,
        /// Hero team when starting a team battle
        #[arg(long)]
        heroes: Option<String>,
        /// Villain team when starting a team battle
        #[arg(long)]
        villains: Option<String>,
        #[arg(long)]
        attacker: u32,
        #[arg(long)]
        defender: u32,
        /// basic, special, critical or ultimate
        #[arg(long, default_value = "basic")]
        kind: String,
        #[arg(long)]
        creator: Option<String>,
        /// Retrying with the same id does not apply the turn twice
        #[arg(long)]
        request_id: Option<String>,
    },
    /// Print one stored fight as JSON
    Show {
        #[arg(long)]
        fight_id: u64,
    },
    /// List stored fights, one page at a time
    List {
        #[arg(long)]
        creator: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Delete one stored fight
    Delete {
        #[arg(long)]
        fight_id: u64,
    },
    /// Delete every stored fight
    DeleteAll,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let roster = match &cli.roster {
        Some(path) => load_roster(path)
            .with_context(|| format!("loading roster from {}", path.display()))?,
        None => default_roster(),
    };
    let constants = match &cli.constants {
        Some(path) => load_constants(path)
            .with_context(|| format!("loading constants from {}", path.display()))?,
        None => default_constants(),
    };
    let store: Arc<dyn FightStore> = if cli.ephemeral {
        Arc::new(InMemoryFightStore::new())
    } else {
        let store = JsonFileFightStore::open(&cli.store)
            .with_context(|| format!("opening fight store {}", cli.store.display()))?;
        info!(path = %store.path().display(), "fight store opened");
        Arc::new(store)
    };
    info!(characters = roster.len(), ephemeral = cli.ephemeral, "arena ready");

    let engine = FightEngine::with_roster(store, roster.clone(), constants);
    match cli.command {
        Commands::Duel {
            a,
            b,
            seed,
            creator,
            max_turns,
        } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = simulation::play_duel(
                &engine,
                CharacterId(a),
                CharacterId(b),
                creator.as_deref(),
                max_turns,
                &mut rng,
            )?;
            print_auto_fight(&result);
        }
        Commands::Team {
            heroes,
            villains,
            seed,
            creator,
            max_turns,
        } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = simulation::play_team_battle(
                &engine,
                &roster,
                &heroes,
                &villains,
                creator.as_deref(),
                max_turns,
                &mut rng,
            )?;
            print_auto_fight(&result);
        }
        Commands::Turn {
            fight_id,
            a,
            b,
            heroes,
            villains,
            attacker,
            defender,
            kind,
            creator,
            request_id,
        } => {
            let request = TurnRequest {
                fight_id: fight_id.map(FightId),
                character_a: a.map(CharacterId),
                character_b: b.map(CharacterId),
                hero_team: heroes,
                villain_team: villains,
                attacker_id: CharacterId(attacker),
                defender_id: CharacterId(defender),
                attack_kind: kind,
                creator,
                request_id,
            };
            let view = engine.take_turn(&request)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Show { fight_id } => {
            let fight = engine.get_fight(FightId(fight_id))?;
            println!("{}", serde_json::to_string_pretty(&fight)?);
        }
        Commands::List {
            creator,
            page,
            limit,
        } => {
            let page = engine.list_fights(creator.as_deref(), page, limit)?;
            println!(
                "Page {}/{} ({} fights)",
                page.page,
                page.total_pages.max(1),
                page.total
            );
            for fight in &page.fights {
                let names: Vec<&str> = fight.participants().into_iter().map(|p| p.name.as_str()).collect();
                println!(
                    "  #{:<4} {:<12} {:?} turns={} [{}]",
                    fight.id,
                    fight.mode.name(),
                    fight.status,
                    fight.turn_log.len(),
                    names.join(", ")
                );
            }
        }
        Commands::Delete { fight_id } => {
            engine.delete_fight(FightId(fight_id))?;
            println!("Deleted fight {fight_id}");
        }
        Commands::DeleteAll => {
            let count = engine.delete_all_fights()?;
            println!("Deleted {count} fights");
        }
    }

    Ok(())
}

fn print_auto_fight(result: &AutoFight) {
    for line in &result.log {
        println!("{line}");
    }
    println!();
    if let Some(id) = result.fight_id {
        println!("Fight:        {id}");
    }
    println!("Turns:        {}", result.turns);
    println!("Ultimates:    {}", result.ultimates);
    println!("Avg damage:   {:.2}", result.avg_damage());
    match result.winner {
        Some(winner) => println!("Winner:       {winner}"),
        None => println!("Winner:       none (turn limit reached)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_turn() {
        let cli = Cli::try_parse_from([
            "arena_sim",
            "--ephemeral",
            "turn",
            "--a",
            "1",
            "--b",
            "2",
            "--attacker",
            "1",
            "--defender",
            "2",
            "--kind",
            "special",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        match cli.command {
            Commands::Turn { a, kind, fight_id, .. } => {
                assert_eq!(a, Some(1));
                assert_eq!(kind, "special");
                assert_eq!(fight_id, None);
            }
            _ => panic!("expected turn command"),
        }
    }

    #[test]
    fn test_turn_command_starts_fight() {
        let cli = Cli::try_parse_from([
            "arena_sim", "--ephemeral", "turn", "--a", "1", "--b", "2", "--attacker", "1",
            "--defender", "2",
        ])
        .unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_unknown_attack_kind_fails() {
        let cli = Cli::try_parse_from([
            "arena_sim", "--ephemeral", "turn", "--a", "1", "--b", "2", "--attacker", "1",
            "--defender", "2", "--kind", "laser",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("laser"));
    }
}
