//! ECS Components for the Starry Sim scene.
//!
//! Components are pure data containers attached to entities.
//! All placement and churn logic lives in systems that read these components.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// Top-left corner of an entity inside the play area.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of an entity's bounding rectangle.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

/// Axis-aligned rectangle used for overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_parts(pos: Position, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Intersection of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left > right || top > bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Two rectangles overlap when their intersection has positive width or
    /// positive height. Shared edges count; a shared corner does not.
    pub fn overlaps(&self, other: &Rect) -> bool {
        match self.intersection(other) {
            Some(i) => i.width > 0.0 || i.height > 0.0,
            None => false,
        }
    }
}

// ============================================================================
// KIND MARKERS
// ============================================================================

/// Marker for bee entities. Bees keep their size for their whole life.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bee;

/// Marker for star entities. Stars share the configured star size.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Star;

/// Which kind of entity a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bee,
    Star,
}

// ============================================================================
// BUNDLES
// ============================================================================

/// Bundle for spawning a bee.
#[derive(Bundle, Default)]
pub struct BeeBundle {
    pub bee: Bee,
    pub position: Position,
    pub size: Size,
}

impl BeeBundle {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            bee: Bee,
            position,
            size,
        }
    }
}

/// Bundle for spawning a star.
#[derive(Bundle, Default)]
pub struct StarBundle {
    pub star: Star,
    pub position: Position,
    pub size: Size,
}

impl StarBundle {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            star: Star,
            position,
            size,
        }
    }
}
