mod manual;
mod play;
mod render;
mod sim;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use sandlot_game::{League, Team};

#[derive(Debug, Parser)]
#[command(name = "sandlot", version)]
#[command(about = "Dice-driven baseball play simulator - pitch-by-pitch games in the terminal")]
struct Args {
    /// Path to a league JSON file (defaults to the built-in league)
    #[arg(long)]
    league: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive a game one dice roll at a time
    Play {
        /// Team pitching the top of the first
        #[arg(long, default_value = "Rat Stack")]
        pitching: String,

        /// Team batting the top of the first
        #[arg(long, default_value = "Content Kings")]
        batting: String,

        /// Seed for the automatic roll source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Enter every die roll by hand instead of rolling automatically
        #[arg(long)]
        manual: bool,
    },
    /// Simulate innings automatically and print the play log
    Sim {
        #[arg(long, default_value = "Rat Stack")]
        pitching: String,

        #[arg(long, default_value = "Content Kings")]
        batting: String,

        /// Innings to play
        #[arg(long, default_value_t = 3)]
        innings: u16,

        #[arg(long, default_value_t = 1337)]
        seed: u64,

        /// Print every step's breakdown, not just the play log
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the teams and rosters in the league
    Roster,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let league = load_league(args.league.as_deref())?;

    match args.command {
        Command::Play {
            pitching,
            batting,
            seed,
            manual,
        } => {
            announce_banner();
            let pitching = find_team(&league, &pitching)?.clone();
            let batting = find_team(&league, &batting)?.clone();
            play::run(pitching, batting, seed, manual)
        }
        Command::Sim {
            pitching,
            batting,
            innings,
            seed,
            verbose,
        } => {
            let pitching = find_team(&league, &pitching)?.clone();
            let batting = find_team(&league, &batting)?.clone();
            sim::run(
                pitching,
                batting,
                &sim::SimConfig {
                    innings,
                    seed,
                    verbose,
                },
            )
        }
        Command::Roster => {
            print_rosters(&league);
            Ok(())
        }
    }
}

fn announce_banner() {
    println!("{}", "⚾ Sandlot".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_league(path: Option<&Path>) -> Result<League> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            League::from_json(&raw)
                .with_context(|| format!("{} is not a valid league file", path.display()))
        }
        None => Ok(League::builtin()),
    }
}

fn find_team<'a>(league: &'a League, name: &str) -> Result<&'a Team> {
    league.team(name).with_context(|| {
        let known: Vec<&str> = league.teams.iter().map(|t| t.name.as_str()).collect();
        format!("no team named {name:?} (league has: {})", known.join(", "))
    })
}

fn print_rosters(league: &League) {
    for team in &league.teams {
        println!("{}", team.name.bold());
        for player in &team.players {
            let pitching = if player.can_pitch() {
                format!(
                    "  control {} velocity {} stamina {}",
                    player.control, player.velocity, player.stamina
                )
            } else {
                String::new()
            };
            println!(
                "  {}. {:10} {:2}  con {} pow {} eye {} spd {} arm {} glv {}{}",
                player.batting_order,
                player.name,
                player.position.code(),
                player.contact,
                player.power,
                player.eye,
                player.speed,
                player.arm,
                player.glove,
                pitching.dimmed(),
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_league_loads_without_a_path() {
        let league = load_league(None).unwrap();
        assert_eq!(league.teams.len(), 4);
    }

    #[test]
    fn find_team_reports_the_known_names() {
        let league = League::builtin();
        let err = find_team(&league, "Mudville").unwrap_err();
        assert!(err.to_string().contains("Rat Stack"));
        assert!(find_team(&league, "Straw Hat Pirates").is_ok());
    }
}
