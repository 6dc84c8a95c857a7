//! Hit detection for oriented ship hitboxes
//!
//! A ship's hitbox is an oriented rectangle decomposed into two triangles
//! sharing the diagonal; a cannonball hits if its point lies inside either
//! triangle. The same oriented extents feed the boundary-exit check.

use glam::Vec2;

use super::state::{Cannonball, Player, Viewport};
use crate::consts::{HITBOX_HEIGHT, HITBOX_WIDTH};
use crate::to_radians;

/// Center-relative half-extents of the hitbox rotated by `heading_deg`.
///
/// Height runs bow to stern, width across the beam; the mix of the two by
/// cos/sin gives the rectangle's reach along each screen axis.
fn oriented_extents(heading_deg: f32) -> Vec2 {
    let angle = to_radians(heading_deg);
    Vec2::new(
        (HITBOX_HEIGHT * angle.cos() + HITBOX_WIDTH * angle.sin()) / 2.0,
        (HITBOX_WIDTH * angle.cos() + HITBOX_HEIGHT * angle.sin()) / 2.0,
    )
}

/// Barycentric sign test with inclusive edges
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let sign = |p: Vec2, a: Vec2, b: Vec2| (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y);

    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Cannonballs currently inside `player`'s hitbox, excluding the player's own.
///
/// Pure over current positions; removal is the caller's concern.
pub fn hits_on(player: &Player, cannonballs: &[Cannonball]) -> Vec<Cannonball> {
    let center = player.pos;
    let ext = oriented_extents(player.heading);

    // Two triangles sharing the diagonal of the oriented rectangle
    let a = center - ext;
    let b = Vec2::new(center.x - ext.x, center.y + ext.y);
    let c = center + ext;
    let d = Vec2::new(center.x + ext.x, center.y - ext.y);

    cannonballs
        .iter()
        .filter(|ball| {
            ball.owner != player.id
                && (point_in_triangle(ball.pos, a, b, c) || point_in_triangle(ball.pos, c, d, a))
        })
        .copied()
        .collect()
}

/// True when the player's hitbox lies entirely outside the viewport.
///
/// Compares the axis-aligned bounds of the oriented extents against the
/// half-width/half-height of the centered viewport. No grace period.
pub fn fully_outside(player: &Player, viewport: Viewport) -> bool {
    let ext = oriented_extents(player.heading);
    let max_x = (player.pos.x - ext.x).max(player.pos.x + ext.x);
    let min_x = (player.pos.x - ext.x).min(player.pos.x + ext.x);
    let max_y = (player.pos.y - ext.y).max(player.pos.y + ext.y);
    let min_y = (player.pos.y - ext.y).min(player.pos.y + ext.y);

    max_x < -viewport.width / 2.0
        || min_x > viewport.width / 2.0
        || max_y < -viewport.height / 2.0
        || min_y > viewport.height / 2.0
}
