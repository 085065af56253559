//! Sweeps over the outcome bands and threshold tables: every total lands in
//! exactly one band, and ties always go to the defense.

use sandlot_game::{
    BattedBall, FielderClass, GameState, League, PitchCall, ScriptedRolls, SwingCall,
    resolve_throw,
};
use sandlot_game::{ActiveFielder, AtBatPhase, Position};

#[test]
fn pitch_bands_are_total_and_ordered() {
    let mut previous = PitchCall::from_total(-40);
    let mut transitions = 0;
    for total in -39..=60_i16 {
        let call = PitchCall::from_total(total);
        if call != previous {
            transitions += 1;
            previous = call;
        }
    }
    // Six bands means exactly five boundaries crossed.
    assert_eq!(transitions, 5);
    assert_eq!(PitchCall::from_total(2), PitchCall::WildPitch);
    assert_eq!(PitchCall::from_total(3), PitchCall::Walk);
    assert_eq!(PitchCall::from_total(5), PitchCall::DownTheMiddle);
    assert_eq!(PitchCall::from_total(12), PitchCall::OnThePlate);
    assert_eq!(PitchCall::from_total(16), PitchCall::Paint);
    assert_eq!(PitchCall::from_total(20), PitchCall::StrikeoutLooking);
}

#[test]
fn swing_bands_are_total_and_ordered() {
    let mut previous = SwingCall::from_total(-40);
    let mut transitions = 0;
    for total in -39..=60_i16 {
        let call = SwingCall::from_total(total);
        if call != previous {
            transitions += 1;
            previous = call;
        }
    }
    assert_eq!(transitions, 6);
    assert_eq!(SwingCall::from_total(3), SwingCall::StrikeoutSwinging);
    assert_eq!(SwingCall::from_total(4), SwingCall::InPlay(BattedBall::Dribbler));
    assert_eq!(SwingCall::from_total(11), SwingCall::InPlay(BattedBall::Laser));
    assert_eq!(SwingCall::from_total(12), SwingCall::HomeRun);
}

#[test]
fn every_category_maps_to_one_fielder_class_and_threshold() {
    let all = [
        BattedBall::Dribbler,
        BattedBall::CanOfCorn,
        BattedBall::Bloop,
        BattedBall::Screamer,
        BattedBall::Laser,
    ];
    for ball in all {
        match ball.fielder_class() {
            FielderClass::Infield => assert!(!matches!(
                ball,
                BattedBall::CanOfCorn | BattedBall::Laser
            )),
            FielderClass::Outfield => {
                assert!(matches!(ball, BattedBall::CanOfCorn | BattedBall::Laser));
            }
        }
        assert!((3..=7).contains(&ball.handle_target()));
        // Ground balls and catchable balls partition the categories.
        assert_ne!(ball.is_ground_ball(), ball.is_catchable());
    }
}

#[test]
fn every_tied_throw_goes_to_the_defense() {
    let league = League::builtin();
    // Fielder arm 2 against Super's speed 3: runner rolls one lower to tie.
    for fielder_roll in 2..=6_u8 {
        let mut state =
            GameState::new(league.teams[0].clone(), league.teams[1].clone()).unwrap();
        state.at_bat.fielder = Some(ActiveFielder {
            name: "Donezo".to_string(),
            position: Position::Shortstop,
            arm: 2,
            glove: 1,
        });
        state.at_bat.phase = AtBatPhase::AwaitingThrow;
        let runner_roll = fielder_roll - 1;
        let mut rolls = ScriptedRolls::new([fielder_roll, runner_roll]);
        let outcome = resolve_throw(&mut state, &mut rolls).unwrap();
        assert_eq!(outcome.fielder_total, outcome.runner_total);
        assert!(outcome.out, "tie at {} must retire the runner", outcome.fielder_total);
        assert_eq!(state.outs, 1);
    }
}
