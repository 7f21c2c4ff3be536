use std::fmt;

use voxelbox_blocks::BlockKindId;
use voxelbox_geom::{Aabb, Vec3};

/// Grid layer holding the ground footprint.
pub const FLOOR_Y: i32 = -1;

/// Quantized block position, one unit per cube edge.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Snap a continuous position to the nearest grid cell (halves round up).
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            x: (v.x + 0.5).floor() as i32,
            y: (v.y + 0.5).floor() as i32,
            z: (v.z + 0.5).floor() as i32,
        }
    }

    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    #[inline]
    pub fn is_floor(self) -> bool {
        self.y == FLOOR_Y
    }

    /// Full unit cube occupied by this cell.
    #[inline]
    pub fn cell_aabb(self) -> Aabb {
        Aabb::cube(self.center(), 1.0)
    }

    /// Order used wherever a reproducible iteration order matters: bottom layer first.
    #[inline]
    pub fn sort_key(self) -> (i32, i32, i32) {
        (self.y, self.x, self.z)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Opaque handle for a render-side resource owned by a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ArtifactId(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Animation {
    #[default]
    None,
    /// Scale climbing toward 1.0; `elapsed` is time banked toward the next step.
    Growing { elapsed: f32 },
    /// Scale falling toward 0.0; the block is removed when it gets there.
    Shrinking { elapsed: f32 },
}

impl Animation {
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, Animation::None)
    }

    #[inline]
    pub fn is_shrinking(&self) -> bool {
        matches!(self, Animation::Shrinking { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub pos: GridPos,
    pub kind: BlockKindId,
    pub scale: f32,
    pub anim: Animation,
    pub artifact: ArtifactId,
    /// Released as soon as removal starts, so `None` while shrinking.
    pub outline: Option<ArtifactId>,
}

impl Block {
    /// Collision box at the block's current scale.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::cube(self.pos.center(), self.scale)
    }

    /// A block being removed is no longer a target for edits.
    #[inline]
    pub fn is_targetable(&self) -> bool {
        !self.anim.is_shrinking()
    }
}
