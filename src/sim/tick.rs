//! Per-tick state transition
//!
//! One tick advances cannonballs and explosions, updates both players,
//! checks boundary exits, and resolves hits. Entity spawns, removals, and
//! reload re-arms are enqueued as deferred commands; the caller drains and
//! applies them before the next tick (see `command`).

use std::collections::HashSet;

use glam::Vec2;

use super::collision::{fully_outside, hits_on};
use super::command::{Command, CommandQueue};
use super::state::{GameEvent, GamePhase, GameState, Player, PlayerId, Viewport};
use crate::consts::*;
use crate::{advance, to_radians};

/// Key that restarts a finished match
pub const RESTART_KEY: &str = "Enter";

/// Set of key identifiers currently held, as reported by the host
#[derive(Debug, Clone, Default)]
pub struct KeySnapshot {
    held: HashSet<String>,
}

impl KeySnapshot {
    pub fn press(&mut self, key: impl Into<String>) {
        self.held.insert(key.into());
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

impl<S: Into<String>> FromIterator<S> for KeySnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Environment snapshot for one tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Keys held this tick; players resolve their own bindings against it
    pub keys: KeySnapshot,
    /// Visible play area for boundary checks
    pub viewport: Viewport,
    /// Host wall clock in milliseconds, used only for reload scheduling
    pub now_ms: f64,
}

/// Advance the game state by one tick.
///
/// Synchronously updates positions, headings, scores, and the phase; spawns
/// and removals go through `queue`. Returns events for host-side effects.
pub fn tick(state: &mut GameState, input: &TickInput, queue: &mut CommandQueue) -> Vec<GameEvent> {
    if state.phase == GamePhase::GameOver {
        if input.keys.is_down(RESTART_KEY) {
            log::info!("restarting match (epoch {})", state.epoch + 1);
            state.reset();
        }
        return Vec::new();
    }

    state.time_ticks += 1;
    let mut events = Vec::new();

    // Cannonballs fly at fixed speed along their spawn heading
    for ball in &mut state.cannonballs {
        ball.pos = advance(ball.pos, CANNONBALL_SPEED, ball.heading);
    }

    // Explosions animate and expire at the variant's terminal frame
    let terminal_frame = state.variant.explosion_frames();
    for explosion in &mut state.explosions {
        explosion.frame += 1;
    }
    state.explosions.retain(|e| e.frame < terminal_frame);

    // Each player aims at the other's pre-update position
    let enemy_of_p1 = state.player2.pos;
    let enemy_of_p2 = state.player1.pos;
    let epoch = state.epoch;
    update_player(&mut state.player1, enemy_of_p1, input, queue, epoch, &mut events);
    update_player(&mut state.player2, enemy_of_p2, input, queue, epoch, &mut events);

    // A ship fully off-screen loses instantly; player1 is checked first
    if fully_outside(&state.player1, input.viewport) {
        end_game(state, PlayerId::Two, &mut events);
        return events;
    }
    if fully_outside(&state.player2, input.viewport) {
        end_game(state, PlayerId::One, &mut events);
        return events;
    }

    // Both hit sets come from the same post-movement snapshot and both are
    // resolved even if the first one ends the game
    let hits_on_p1 = hits_on(&state.player1, &state.cannonballs);
    let hits_on_p2 = hits_on(&state.player2, &state.cannonballs);
    resolve_hits(state, PlayerId::One, &hits_on_p1, queue, &mut events);
    resolve_hits(state, PlayerId::Two, &hits_on_p2, queue, &mut events);

    events
}

/// Turn delta in degrees for this tick; left wins when both keys are held
fn turn_delta(player: &Player, keys: &KeySnapshot) -> f32 {
    if keys.is_down(&player.controls.turn_left) {
        -TURN_RATE
    } else if keys.is_down(&player.controls.turn_right) {
        TURN_RATE
    } else {
        0.0
    }
}

/// Heading for a cannonball fired by `player` at `enemy_pos`.
///
/// Always the player's heading deflected a full 90 degrees toward the side
/// the enemy lies on, decided by the cross-product sign against a probe
/// point ahead of the ship. The collinear case resolves to +90.
fn cannonball_heading(player: &Player, enemy_pos: Vec2) -> f32 {
    let rad = to_radians(player.heading);
    let probe = player.pos + Vec2::new(rad.cos(), rad.sin()) * AIM_PROBE_DISTANCE;
    let cross = (player.pos.x - probe.x) * (enemy_pos.y - probe.y)
        - (player.pos.y - probe.y) * (enemy_pos.x - probe.x);
    let side = if cross >= 0.0 { 1.0 } else { -1.0 };
    player.heading + side * 90.0
}

/// Apply rotation, fire control, and motion for one player.
///
/// Firing spawns the cannonball from the pre-turn heading and pre-move
/// position, then the ship turns and advances.
fn update_player(
    player: &mut Player,
    enemy_pos: Vec2,
    input: &TickInput,
    queue: &mut CommandQueue,
    epoch: u64,
    events: &mut Vec<GameEvent>,
) {
    let heading = player.heading + turn_delta(player, &input.keys);

    if player.loaded && input.keys.is_down(&player.controls.fire) {
        queue.push(
            epoch,
            Command::SpawnCannonball {
                owner: player.id,
                pos: player.pos,
                heading: cannonball_heading(player, enemy_pos),
            },
        );
        queue.schedule(
            input.now_ms + RELOAD_MS,
            epoch,
            Command::Reload { player: player.id },
        );
        player.loaded = false;
        events.push(GameEvent::CannonFired { player: player.id });
    }

    player.heading = heading;
    player.pos = advance(player.pos, player.speed, heading);
}

/// Score and clean up this tick's hits on `target`.
///
/// The opponent scores one point per hitting cannonball; each hit spawns a
/// deferred explosion and the hit cannonballs are removed via a deferred
/// command, so the synchronous state still contains them this tick.
fn resolve_hits(
    state: &mut GameState,
    target: PlayerId,
    hits: &[super::state::Cannonball],
    queue: &mut CommandQueue,
    events: &mut Vec<GameEvent>,
) {
    if hits.is_empty() {
        return;
    }

    let scorer = target.opponent();
    let score = {
        let player = state.player_mut(scorer);
        player.score += hits.len() as u32;
        player.score
    };
    events.push(GameEvent::CannonballHit { target });

    for ball in hits {
        queue.push(state.epoch, Command::SpawnExplosion { pos: ball.pos });
    }
    queue.push(
        state.epoch,
        Command::RemoveCannonballs {
            ids: hits.iter().map(|b| b.id).collect(),
        },
    );

    // A winner already set this tick is never overwritten
    if score >= SCORE_LIMIT && state.winner.is_none() {
        end_game(state, scorer, events);
    }
}

fn end_game(state: &mut GameState, winner: PlayerId, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.winner = Some(winner);
    events.push(GameEvent::MatchEnded { winner });
    log::info!("game over, {} wins", winner);
}
