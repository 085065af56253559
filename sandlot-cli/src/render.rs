//! Console rendering for game state and step breakdowns.

use colored::Colorize;

use sandlot_game::{
    Base, Destination, FielderOutcome, GameState, HandleOutcome, HandleVerdict, PitchCall,
    PitchOutcome, PlayDelta, SwingCall, SwingOutcome, TagUpOutcome, ThrowKind, ThrowOutcome,
    TransitionOutcome,
};

pub fn scoreboard(state: &GameState) -> String {
    format!(
        "{} | {} outs | {} {} - {} {}",
        state.inning_label().bold(),
        state.outs,
        state.batting_team.name.as_str().bright_yellow(),
        state.scores.batting,
        state.pitching_team.name.as_str().bright_blue(),
        state.scores.pitching,
    )
}

pub fn bases(state: &GameState) -> String {
    let occupant = |base: Base| {
        state
            .bases
            .get(base)
            .map_or("-".to_string(), |slot| state.runner(slot).name.clone())
    };
    format!(
        "1B {} | 2B {} | 3B {}",
        occupant(Base::First),
        occupant(Base::Second),
        occupant(Base::Third),
    )
}

pub fn matchup(state: &GameState) -> String {
    format!(
        "{} pitching to {}",
        state.pitcher().name.as_str().bright_blue(),
        state.batter().name.as_str().bright_yellow(),
    )
}

pub fn pitch(outcome: &PitchOutcome) -> String {
    let call = match outcome.call {
        PitchCall::StrikeoutLooking => outcome.call.label().red().bold(),
        PitchCall::Walk | PitchCall::WildPitch => outcome.call.label().yellow().bold(),
        _ => outcome.call.label().normal().bold(),
    };
    let mut text = format!(
        "  d20 {} + control {} - eye {} = {} -> {call}",
        outcome.roll, outcome.control, outcome.eye, outcome.total,
    );
    if outcome.pitch_again {
        text.push_str("\n  runners advance; same batter, new pitch");
    }
    text.push_str(&delta_line(&outcome.delta));
    text
}

pub fn swing(outcome: &SwingOutcome) -> String {
    let call = match outcome.call {
        SwingCall::StrikeoutSwinging => outcome.call.label().red().bold(),
        SwingCall::HomeRun => outcome.call.label().green().bold(),
        SwingCall::InPlay(_) => outcome.call.label().normal().bold(),
    };
    let mut text = match &outcome.breakdown {
        Some(b) => {
            let power = b
                .power
                .map_or(String::new(), |p| format!(" + power {p}"));
            format!(
                "  d12 {} - velocity {} + contact {} + mod {}{} = {} -> {call}",
                outcome.roll, b.velocity, b.contact, b.pitch_modifier, power, b.total,
            )
        }
        None => format!("  d12 {} (natural 1) -> {call}", outcome.roll),
    };
    text.push_str(&delta_line(&outcome.delta));
    text
}

pub fn fielder(outcome: &FielderOutcome) -> String {
    format!(
        "  d{} {} -> {} ({}) fields the ball",
        outcome.die_sides,
        outcome.roll,
        outcome.fielder.name.as_str().bright_blue(),
        outcome.position.code(),
    )
}

pub fn handle(outcome: &HandleOutcome) -> String {
    let verdict = match outcome.verdict {
        HandleVerdict::CaughtOut { .. } => "caught - batter out".red().bold(),
        HandleVerdict::Single => "not handled - single".green().bold(),
        HandleVerdict::ThrowToFirst => "handled - throw to first".normal().bold(),
        HandleVerdict::DoublePlayArmed { target } => {
            return format!(
                "  d6 {} + glove {} = {} vs {} -> {}",
                outcome.roll,
                outcome.glove,
                outcome.score,
                outcome.needed,
                format!("handled - double play attempt, lead throw to {target}")
                    .normal()
                    .bold(),
            );
        }
    };
    let mut text = format!(
        "  d6 {} + glove {} = {} vs {} -> {verdict}",
        outcome.roll, outcome.glove, outcome.score, outcome.needed,
    );
    text.push_str(&delta_line(&outcome.delta));
    text
}

pub fn throw(outcome: &ThrowOutcome) -> String {
    let target = match outcome.kind {
        ThrowKind::ToFirst | ThrowKind::Relay => "first".to_string(),
        ThrowKind::LeadForce { target } => target.to_string(),
    };
    let result = if outcome.out {
        format!("OUT at {target}").red().bold()
    } else {
        format!("SAFE at {target}").green().bold()
    };
    let mut text = format!(
        "  {} d6 {} + arm {} = {}  vs  {} d6 {} + speed {} = {} -> {result}",
        outcome.fielder,
        outcome.fielder_roll,
        outcome.fielder_arm,
        outcome.fielder_total,
        outcome.runner,
        outcome.runner_roll,
        outcome.runner_speed,
        outcome.runner_total,
    );
    if outcome.relay_pending {
        text.push_str("\n  relay to first is live");
    }
    text.push_str(&delta_line(&outcome.delta));
    text
}

pub fn tag_up(outcome: &TagUpOutcome) -> String {
    let mut lines = Vec::new();
    for attempt in &outcome.attempts {
        lines.push(format!(
            "  {}: confidence d6 {} + speed {} = {} (needs 4)",
            attempt.runner, attempt.confidence_roll, attempt.speed, attempt.confidence,
        ));
        match &attempt.throw {
            Some(throw) => {
                let result = if throw.out {
                    format!("OUT at {}", attempt.target).red().bold()
                } else {
                    format!("SAFE at {}", attempt.target).green().bold()
                };
                lines.push(format!(
                    "  {} d6 {} + arm {} = {}  vs  d6 {} + speed {} = {} -> {result}",
                    throw.fielder,
                    throw.fielder_roll,
                    throw.fielder_arm,
                    throw.fielder_total,
                    throw.runner_roll,
                    attempt.speed,
                    throw.runner_total,
                ));
            }
            None => lines.push("  holds the base".to_string()),
        }
    }
    if lines.is_empty() {
        lines.push("  nobody aboard to tag".to_string());
    }
    lines.join("\n")
}

pub fn transition(outcome: &TransitionOutcome) -> String {
    match outcome {
        TransitionOutcome::NextBatter { name, order } => {
            format!("now batting: {} (#{order} in the order)", name.as_str().bold())
        }
        TransitionOutcome::HalfInning(summary) => format!(
            "{}\n{} takes the mound, {} leads off",
            format!(
                "=== {} {} ===",
                summary.half,
                sandlot_game::inning_ordinal(summary.inning)
            )
            .bright_cyan()
            .bold(),
            summary.pitcher,
            summary.leadoff,
        ),
    }
}

pub fn play_log(state: &GameState) -> String {
    state
        .play_log
        .iter()
        .map(|entry| {
            if entry.inning_start {
                entry.message.as_str().bright_cyan().bold().to_string()
            } else {
                format!("  {}", entry.message)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn delta_line(delta: &PlayDelta) -> String {
    let mut parts = Vec::new();
    if delta.runs > 0 {
        parts.push(
            format!(
                "{} run{} score",
                delta.runs,
                if delta.runs == 1 { "" } else { "s" }
            )
            .green()
            .to_string(),
        );
    }
    for movement in &delta.moves {
        match movement.to {
            Destination::Home => parts.push(format!("{} scores", movement.name)),
            Destination::Base(base) => parts.push(format!("{} to {base}", movement.name)),
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("\n  {}", parts.join(", "))
    }
}
