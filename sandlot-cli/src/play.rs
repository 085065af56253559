//! Interactive pitch-by-pitch session: exactly one action is legal at a
//! time, and the prompt only offers that one.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use sandlot_game::{
    GameError, GameSession, GameState, RollSource, SeededRolls, Step, Team,
};

use crate::manual::ManualRolls;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Resolve whatever step the state machine is waiting on.
    Roll,
    /// Resolve one named step, if it is the legal one.
    Do(Step),
    Next,
    Log,
    Help,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "roll" | "r" | "" => Some(Command::Roll),
        "pitch" => Some(Command::Do(Step::PitchDelivery)),
        "swing" => Some(Command::Do(Step::BatterResponse)),
        "field" => Some(Command::Do(Step::FielderDetermination)),
        "handle" => Some(Command::Do(Step::HandleCheck)),
        "throw" => Some(Command::Do(Step::ThrowAttempt)),
        "tag" => Some(Command::Do(Step::TagUp)),
        "next" | "n" => Some(Command::Next),
        "log" | "l" => Some(Command::Log),
        "help" | "h" | "?" => Some(Command::Help),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn run(pitching: Team, batting: Team, seed: Option<u64>, manual: bool) -> Result<()> {
    let auto = seed.map_or_else(SeededRolls::from_entropy, SeededRolls::new);
    let rolls: Box<dyn RollSource> = if manual {
        Box::new(ManualRolls::new(auto))
    } else {
        Box::new(auto)
    };
    let state = GameState::new(pitching, batting)?;
    let mut session = GameSession::new(state, rolls);

    println!("{}", render::play_log(session.state()));
    print_help();

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        println!();
        println!("{}", render::scoreboard(session.state()));
        println!("{}", render::bases(session.state()));
        print_prompt(&session);
        line.clear();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let Some(command) = parse_command(&line) else {
            println!("unknown command; 'help' lists them");
            continue;
        };
        match command {
            Command::Roll => match session.legal_step() {
                Some(step) => resolve(&mut session, step),
                None => println!("play resolved; 'next' brings up the next batter"),
            },
            Command::Do(step) => {
                if session.legal_step() == Some(step) {
                    resolve(&mut session, step);
                } else {
                    println!("{step} is not available right now");
                }
            }
            Command::Next => println!("{}", render::transition(&session.advance())),
            Command::Log => println!("{}", render::play_log(session.state())),
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn resolve(session: &mut GameSession<Box<dyn RollSource>>, step: Step) {
    let rendered = match step {
        Step::PitchDelivery => session.pitch().map(|o| render::pitch(&o)),
        Step::BatterResponse => session.swing().map(|o| render::swing(&o)),
        Step::FielderDetermination => session.determine_fielder().map(|o| render::fielder(&o)),
        Step::HandleCheck => session.handle_check().map(|o| render::handle(&o)),
        Step::ThrowAttempt => session.throw().map(|o| render::throw(&o)),
        Step::TagUp => session.tag_up().map(|o| render::tag_up(&o)),
    };
    match rendered {
        Ok(text) => println!("{text}"),
        // The prompt only offers legal steps, but a race with 'next' is
        // harmless: the engine refuses and nothing changed.
        Err(GameError::StepUnavailable { step }) => println!("{step} is not available right now"),
        Err(err) => println!("{err}"),
    }
}

fn print_prompt(session: &GameSession<Box<dyn RollSource>>) {
    match session.legal_step() {
        Some(Step::TagUp) => print!(
            "{} ",
            "play resolved; 'tag' sends the runners, 'next' moves on >".bold()
        ),
        Some(step) => {
            println!("{}", render::matchup(session.state()));
            print!("{} ", format!("waiting on {step}; 'roll' resolves it >").bold());
        }
        None => print!("{} ", "play resolved; 'next' moves on >".bold()),
    }
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!(
        "commands: roll (resolve the pending step), pitch/swing/field/handle/throw/tag, \
         next (batter or half-inning), log, help, quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_aliases() {
        assert_eq!(parse_command("roll"), Some(Command::Roll));
        assert_eq!(parse_command(" R \n"), Some(Command::Roll));
        assert_eq!(parse_command("swing"), Some(Command::Do(Step::BatterResponse)));
        assert_eq!(parse_command("tag"), Some(Command::Do(Step::TagUp)));
        assert_eq!(parse_command("n"), Some(Command::Next));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("bunt"), None);
    }

    #[test]
    fn empty_line_means_roll() {
        assert_eq!(parse_command("\n"), Some(Command::Roll));
    }
}
