//! Automatic simulation: play whole innings on a seed and report.

use anyhow::Result;
use colored::Colorize;

use sandlot_game::{GameSession, GameState, SeededRolls, Step, Team, TransitionOutcome};

use crate::render;

pub struct SimConfig {
    pub innings: u16,
    pub seed: u64,
    pub verbose: bool,
}

/// Run `innings` full innings with every roll automatic. Runners always tag
/// up when the window opens; every other step has exactly one legal action.
pub fn run(pitching: Team, batting: Team, cfg: &SimConfig) -> Result<()> {
    let state = GameState::new(pitching, batting)?;
    let mut session = GameSession::new(state, SeededRolls::new(cfg.seed));
    log::debug!("simulating {} innings with seed {}", cfg.innings, cfg.seed);

    let halves_target = u32::from(cfg.innings) * 2;
    let mut halves_played = 0_u32;
    while halves_played < halves_target {
        match session.legal_step() {
            Some(Step::PitchDelivery) => {
                let outcome = session.pitch()?;
                if cfg.verbose {
                    println!("{}", render::pitch(&outcome));
                }
            }
            Some(Step::BatterResponse) => {
                let outcome = session.swing()?;
                if cfg.verbose {
                    println!("{}", render::swing(&outcome));
                }
            }
            Some(Step::FielderDetermination) => {
                let outcome = session.determine_fielder()?;
                if cfg.verbose {
                    println!("{}", render::fielder(&outcome));
                }
            }
            Some(Step::HandleCheck) => {
                let outcome = session.handle_check()?;
                if cfg.verbose {
                    println!("{}", render::handle(&outcome));
                }
            }
            Some(Step::ThrowAttempt) => {
                let outcome = session.throw()?;
                if cfg.verbose {
                    println!("{}", render::throw(&outcome));
                }
            }
            Some(Step::TagUp) => {
                let outcome = session.tag_up()?;
                if cfg.verbose {
                    println!("{}", render::tag_up(&outcome));
                }
            }
            None => {
                let transition = session.advance();
                if matches!(transition, TransitionOutcome::HalfInning(_)) {
                    halves_played += 1;
                }
                if cfg.verbose {
                    println!("{}", render::transition(&transition));
                }
            }
        }
    }

    println!("{}", render::play_log(session.state()));
    println!();
    let state = session.state();
    println!(
        "{} {} {} - {} {}",
        format!("Final after {} innings:", cfg.innings).bold(),
        state.batting_team.name,
        state.scores.batting,
        state.pitching_team.name,
        state.scores.pitching,
    );
    Ok(())
}
