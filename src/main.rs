use pokecalc::{
    resolve_turn, submit_action, BattleResult, BattleSetup, BattleState, EventBus, PlayerTarget,
    TurnAction, TurnRng,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Usage: `pokecalc [SETUP.ron] [--json]`
///
/// Without a setup file a built-in exchange is played. `RUST_LOG` controls
/// the engine's tracing output on stderr.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut setup_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            other => setup_path = Some(PathBuf::from(other)),
        }
    }

    let setup = match setup_path {
        Some(path) => match BattleSetup::load(&path) {
            Ok(setup) => setup,
            Err(e) => {
                eprintln!("Error loading battle setup: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => BattleSetup::demo(),
    };

    match run(&setup, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Battle error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(setup: &BattleSetup, json: bool) -> BattleResult<()> {
    let mut state = setup.start()?;
    let mut rng = TurnRng::new(state.config.seed);
    info!(seed = rng.initial_seed(), "battle started");

    let mut turns: Vec<EventBus> = Vec::new();
    for &(p1_move, p2_move) in &setup.turns {
        if state.game_state.is_over() {
            break;
        }
        submit_action(
            &mut state,
            PlayerTarget::Player1,
            TurnAction::use_move(PlayerTarget::Player1, p1_move),
        )?;
        submit_action(
            &mut state,
            PlayerTarget::Player2,
            TurnAction::use_move(PlayerTarget::Player2, p2_move),
        )?;
        let bus = resolve_turn(&mut state, &mut rng)?;
        if !json {
            bus.print_formatted(&state);
        }
        turns.push(bus);
    }

    if json {
        match serde_json::to_string_pretty(&turns) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!(error = %e, "could not serialize the event log"),
        }
    } else {
        print_summary(&state);
    }
    Ok(())
}

fn print_summary(state: &BattleState) {
    println!();
    for player in PlayerTarget::both() {
        let combatant = state.combatant(player);
        println!(
            "{}: #{:03} {}/{} HP{}",
            player,
            combatant.species_id,
            combatant.current_hp(),
            combatant.max_hp(),
            combatant
                .status
                .map(|status| format!(" ({:?})", status))
                .unwrap_or_default()
        );
    }
    match (state.game_state.is_over(), state.winner()) {
        (true, Some(winner)) => println!("{} wins!", winner),
        (true, None) => println!("The battle ended in a draw."),
        (false, _) => println!("The script ran out after {} turn(s).", state.turn_number - 1),
    }
}
