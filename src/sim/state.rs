//! Game state and core simulation types
//!
//! Everything the simulation needs to resume a match lives here and is
//! serializable. Input snapshots and the deferred command queue are not
//! state; they arrive fresh each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::variant::SpriteVariant;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerId::One => "player1",
            PlayerId::Two => "player2",
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key bindings for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub fire: String,
    pub turn_left: String,
    pub turn_right: String,
}

/// A player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Facing angle in degrees, 0 = rightward, counter-clockwise in screen space
    pub heading: f32,
    /// Forward speed in units per tick
    pub speed: f32,
    /// Cooldown gate; false only while a reload is pending
    pub loaded: bool,
    pub score: u32,
    pub controls: Controls,
}

impl Player {
    /// Player at its match starting position with default bindings
    pub fn starting(id: PlayerId) -> Self {
        let (pos, heading, controls) = match id {
            PlayerId::One => (
                PLAYER1_START,
                PLAYER1_HEADING,
                Controls {
                    fire: " ".to_string(),
                    turn_left: "ArrowLeft".to_string(),
                    turn_right: "ArrowRight".to_string(),
                },
            ),
            PlayerId::Two => (
                PLAYER2_START,
                PLAYER2_HEADING,
                Controls {
                    fire: "f".to_string(),
                    turn_left: "a".to_string(),
                    turn_right: "d".to_string(),
                },
            ),
        };
        Self {
            id,
            pos: Vec2::new(pos.0, pos.1),
            heading,
            speed: SHIP_SPEED,
            loaded: true,
            score: 0,
            controls,
        }
    }
}

/// A cannonball in flight; heading is fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cannonball {
    pub id: u32,
    pub pos: Vec2,
    pub heading: f32,
    pub owner: PlayerId,
}

/// An explosion animation; removed once `frame` reaches the variant's
/// terminal frame count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub frame: u32,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Match ended; holding until a restart input
    GameOver,
}

/// Events emitted by a tick for host-side effects (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A player fired a cannonball
    CannonFired { player: PlayerId },
    /// One or more cannonballs struck a ship
    CannonballHit { target: PlayerId },
    /// The match ended
    MatchEnded { winner: PlayerId },
}

impl GameEvent {
    /// Sound effect the host should play for this event, if any
    pub fn sound(&self) -> Option<&'static str> {
        match self {
            GameEvent::CannonFired { .. } => Some("cannon.wav"),
            GameEvent::CannonballHit { .. } => Some("explosion.wav"),
            GameEvent::MatchEnded { .. } => None,
        }
    }
}

/// Visible play area, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Set before `phase` becomes `GameOver`, never unset while it holds
    pub winner: Option<PlayerId>,
    pub player1: Player,
    pub player2: Player,
    pub cannonballs: Vec<Cannonball>,
    pub explosions: Vec<Explosion>,
    /// Bumped on every restart; deferred commands from an older epoch are
    /// dropped on apply
    pub epoch: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Selected art set (the simulation reads only its explosion frame count)
    pub variant: SpriteVariant,
    next_cannonball_id: u32,
    next_explosion_id: u32,
}

impl GameState {
    /// Fresh match state
    pub fn new(variant: SpriteVariant) -> Self {
        Self {
            phase: GamePhase::Playing,
            winner: None,
            player1: Player::starting(PlayerId::One),
            player2: Player::starting(PlayerId::Two),
            cannonballs: Vec::new(),
            explosions: Vec::new(),
            epoch: 0,
            time_ticks: 0,
            variant,
            next_cannonball_id: 0,
            next_explosion_id: 0,
        }
    }

    /// Reset to initial state for a new match, invalidating any deferred
    /// commands still pending from the previous one
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::new(self.variant);
        self.epoch = epoch;
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a cannonball id (unique among live cannonballs)
    pub(crate) fn next_cannonball_id(&mut self) -> u32 {
        let id = self.next_cannonball_id;
        self.next_cannonball_id += 1;
        id
    }

    /// Allocate an explosion id (unique among live explosions)
    pub(crate) fn next_explosion_id(&mut self) -> u32 {
        let id = self.next_explosion_id;
        self.next_explosion_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(SpriteVariant::Classic);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.winner.is_none());
        assert!(state.player1.loaded);
        assert!(state.player2.loaded);
        assert_eq!(state.player1.score, 0);
        assert_eq!(state.player2.score, 0);
        assert!(state.cannonballs.is_empty());
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_reset_bumps_epoch_and_keeps_variant() {
        let mut state = GameState::new(SpriteVariant::Compact);
        state.player1.score = 2;
        state.phase = GamePhase::GameOver;
        state.winner = Some(PlayerId::One);

        state.reset();
        assert_eq!(state.epoch, 1);
        assert_eq!(state.variant, SpriteVariant::Compact);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.winner.is_none());
        assert_eq!(state.player1.score, 0);
    }

    #[test]
    fn test_entity_ids_monotonic() {
        let mut state = GameState::new(SpriteVariant::Classic);
        assert_eq!(state.next_cannonball_id(), 0);
        assert_eq!(state.next_cannonball_id(), 1);
        assert_eq!(state.next_explosion_id(), 0);
        assert_eq!(state.next_explosion_id(), 1);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = GameState::new(SpriteVariant::Classic);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
