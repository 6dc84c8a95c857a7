//! Render projection
//!
//! Pure function from game state to a flat list of drawable descriptors.
//! The external renderer resolves each descriptor by its variant tag; no
//! drawing happens here, so rendering the same state twice yields the same
//! list.

use glam::Vec2;

use crate::consts::CANNONBALL_RADIUS;
use crate::sim::{GamePhase, GameState, Player, Viewport};
use crate::variant::{ShipImage, SpriteSheet};

const SEA_COLOR: &str = "#add8e6";
const CANNONBALL_COLOR: &str = "#000000";
const TEXT_COLOR: &str = "#ffff00";
const TEXT_SIZE: f32 = 18.0;
const HUD_MARGIN: f32 = 40.0;

/// One thing for the host renderer to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Full-viewport backdrop
    Background {
        width: f32,
        height: f32,
        color: &'static str,
    },
    Ship {
        pos: Vec2,
        /// Rotation in degrees, matching the ship's heading
        rotation: f32,
        image: ShipImage,
    },
    Cannonball {
        pos: Vec2,
        radius: f32,
        color: &'static str,
    },
    Explosion {
        pos: Vec2,
        sheet: SpriteSheet,
        frame: u32,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: &'static str,
    },
}

fn hud_text(text: impl Into<String>, x: f32, y: f32) -> Drawable {
    Drawable::Text {
        pos: Vec2::new(x, y),
        text: text.into(),
        size: TEXT_SIZE,
        color: TEXT_COLOR,
    }
}

fn ship(player: &Player, image: ShipImage) -> Drawable {
    Drawable::Ship {
        pos: player.pos,
        rotation: player.heading,
        image,
    }
}

/// Project the game state into drawables, back to front.
pub fn render(state: &GameState, viewport: Viewport) -> Vec<Drawable> {
    let half_w = viewport.width / 2.0;
    let half_h = viewport.height / 2.0;
    let image = state.variant.ship_image();
    let sheet = state.variant.explosion_sheet();

    let mut drawables = vec![
        Drawable::Background {
            width: viewport.width,
            height: viewport.height,
            color: SEA_COLOR,
        },
        hud_text("Player 1", -half_w + HUD_MARGIN, half_h - 20.0),
        hud_text(state.player1.score.to_string(), -half_w + HUD_MARGIN, half_h - 40.0),
        hud_text("Player 2", half_w - HUD_MARGIN, half_h - 20.0),
        hud_text(state.player2.score.to_string(), half_w - HUD_MARGIN, half_h - 40.0),
        ship(&state.player1, image),
        ship(&state.player2, image),
    ];

    drawables.extend(state.cannonballs.iter().map(|ball| Drawable::Cannonball {
        pos: ball.pos,
        radius: CANNONBALL_RADIUS,
        color: CANNONBALL_COLOR,
    }));

    drawables.extend(state.explosions.iter().map(|e| Drawable::Explosion {
        pos: e.pos,
        sheet,
        frame: e.frame,
    }));

    if state.phase == GamePhase::GameOver {
        // Winner is set before the phase flips, by construction
        if let Some(winner) = state.winner {
            drawables.push(hud_text("Game Over", 0.0, 20.0));
            drawables.push(hud_text(format!("{winner} wins!"), 0.0, -20.0));
        }
    }

    drawables
}
