//! Headless demo driver
//!
//! Runs a scripted duel at a fixed cadence with both ships firing whenever
//! loaded, logs the sound effects a host would play, and dumps the final
//! state as JSON. Useful for eyeballing the simulation without a renderer.

use broadside::sim::{CommandQueue, GamePhase, GameState, KeySnapshot, TickInput, Viewport, tick};
use broadside::variant::SpriteVariant;
use broadside::render;

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_TICKS: u64 = 20_000;

fn scripted_keys(tick_no: u64) -> KeySnapshot {
    let mut keys = KeySnapshot::default();
    // Both captains hold the trigger; the reload gate sets the fire rate
    keys.press(" ");
    keys.press("f");
    // Alternate turning phases so the ships circle each other
    match (tick_no / 180) % 3 {
        0 => {
            keys.press("ArrowLeft");
            keys.press("d");
        }
        1 => {
            keys.press("ArrowRight");
            keys.press("a");
        }
        _ => {}
    }
    keys
}

fn main() {
    env_logger::init();

    let viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };
    let mut state = GameState::new(SpriteVariant::Classic);
    let mut queue = CommandQueue::new();
    let mut now_ms = 0.0;

    for tick_no in 0..MAX_TICKS {
        let input = TickInput {
            keys: scripted_keys(tick_no),
            viewport,
            now_ms,
        };
        let events = tick(&mut state, &input, &mut queue);
        for cmd in queue.drain_ready(now_ms) {
            state.apply(cmd);
        }
        for event in &events {
            if let Some(sound) = event.sound() {
                log::info!("tick {tick_no}: play {sound}");
            }
        }

        if state.phase == GamePhase::GameOver {
            log::info!(
                "match ended after {} ticks, {} drawables in final frame",
                state.time_ticks,
                render(&state, viewport).len()
            );
            break;
        }
        now_ms += FRAME_MS;
    }

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize final state: {err}"),
    }
}
