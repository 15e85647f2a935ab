//! Example driving one full scripted game session.
//!
//! This example plays the role of the excluded view layer: it supplies the
//! cell sources, subscribes to every session signal, starts a deterministic
//! game, forwards a few clock ticks, and then replays the riddle's own picks
//! to win it.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=debug cargo run --example scripted_game
//! ```

use lightsout_core::Position;
use lightsout_game::{
    DEFAULT_FIELD_SIZE, FieldSource, GameConfig, GameSession, NodeChange, PopupCommand,
};

/// Stand-in for the view's row-major toggle widgets.
struct ConsoleField {
    cells: usize,
}

impl FieldSource for ConsoleField {
    fn cell_count(&self) -> usize {
        self.cells
    }
}

fn main() {
    env_logger::init();

    let size = usize::from(DEFAULT_FIELD_SIZE);
    let config = GameConfig {
        riddle_seed: Some(2024),
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config, Box::new(ConsoleField { cells: size * size }));

    let signals = session.signals_mut();
    signals.running.subscribe(|running: &bool| {
        println!("[view] running = {running}");
    });
    signals.counter.subscribe(|count: &u32| {
        println!("[view] presses = {count}");
    });
    signals.clock.subscribe(|seconds: &u32| {
        // The view formats MM:SS; the session only publishes seconds.
        println!("[view] time = {:02}:{:02}", seconds / 60, seconds % 60);
    });
    signals.nodes.subscribe(|change: &NodeChange| {
        println!(
            "[view] cell {} is now {}",
            change.position,
            if change.is_on { "on" } else { "off" }
        );
    });
    signals.popup.subscribe(|command: &PopupCommand| {
        println!("[view] win popup: {command:?}");
    });

    session
        .handle_start_request(true)
        .expect("field supplies enough cells");

    // Simulate the periodic timer driver for a couple of intervals.
    let source = session.tick_source().expect("clock is running");
    for _ in 0..3 {
        session.handle_clock_tick(source);
    }

    // The riddle's own picks double as its solution; replay them.
    let picks: Vec<Position> = session
        .last_riddle()
        .expect("riddle was generated")
        .picks
        .clone();
    for pick in picks {
        let next = !session.node_state(pick);
        session.handle_cell_pressed(pick, next);
    }

    println!(
        "finished: status {:?}, {} presses, {} seconds",
        session.status(),
        session.counter_value(),
        session.elapsed_seconds()
    );
}
