//! Presentation variant configuration
//!
//! The game shipped with two art sets that differ in explosion frame count,
//! sprite sheet layout, and ship image sizing. The simulation only reads the
//! terminal explosion frame; everything else is consumed by `render`.

use serde::{Deserialize, Serialize};

/// Sprite sheet descriptor for the explosion animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub file_name: &'static str,
    pub columns: u32,
    pub rows: u32,
    /// Square tile size in world units
    pub tile_size: f32,
}

/// Ship image descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipImage {
    pub file_name: &'static str,
    pub width: f32,
    pub height: f32,
    pub tint: &'static str,
}

/// Which art set to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpriteVariant {
    #[default]
    Classic,
    Compact,
}

impl SpriteVariant {
    /// Terminal explosion frame; an explosion is removed once its frame
    /// counter reaches this value.
    pub fn explosion_frames(&self) -> u32 {
        match self {
            SpriteVariant::Classic => 16,
            SpriteVariant::Compact => 8,
        }
    }

    pub fn explosion_sheet(&self) -> SpriteSheet {
        match self {
            SpriteVariant::Classic => SpriteSheet {
                file_name: "ex.png",
                columns: 4,
                rows: 4,
                tile_size: 20.0,
            },
            SpriteVariant::Compact => SpriteSheet {
                file_name: "ex-small.png",
                columns: 4,
                rows: 2,
                tile_size: 16.0,
            },
        }
    }

    pub fn ship_image(&self) -> ShipImage {
        match self {
            SpriteVariant::Classic => ShipImage {
                file_name: "ship1.png",
                width: 80.0,
                height: 30.0,
                tint: "#aa6600",
            },
            SpriteVariant::Compact => ShipImage {
                file_name: "ship2.png",
                width: 64.0,
                height: 24.0,
                tint: "#aa6600",
            },
        }
    }
}
