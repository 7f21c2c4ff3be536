use hashbrown::HashSet;

use voxelbox_blocks::BlockKindId;
use voxelbox_world::{Animation, ArtifactId, GridPos, World};

/// Seconds between grow steps.
pub const GROW_INTERVAL: f32 = 0.016;
pub const GROW_STEP: f32 = 0.15;
/// Seconds between shrink steps.
pub const SHRINK_INTERVAL: f32 = 0.020;
pub const SHRINK_STEP: f32 = 0.1;

// absorbs float drift in the repeated step sums
const SCALE_EPS: f32 = 1e-4;

#[derive(Clone, Debug, PartialEq)]
pub enum AnimOutcome {
    Scaled {
        pos: GridPos,
        artifact: ArtifactId,
        scale: f32,
    },
    /// Grow reached full size.
    Finalized { pos: GridPos, artifact: ArtifactId },
    /// Shrink reached zero and the block left the store.
    Removed {
        pos: GridPos,
        kind: BlockKindId,
        artifact: ArtifactId,
    },
}

/// Active block animations, advanced from the main tick in the order they started.
#[derive(Debug, Default)]
pub struct Animator {
    active: Vec<GridPos>,
    tracked: HashSet<GridPos>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the animation state stored on the block at `pos`. A block already
    /// tracked keeps its place; a grow turned into a shrink just continues from
    /// the current scale.
    pub fn track(&mut self, pos: GridPos) {
        if self.tracked.insert(pos) {
            self.active.push(pos);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[inline]
    pub fn is_animating(&self, pos: GridPos) -> bool {
        self.tracked.contains(&pos)
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.tracked.clear();
    }

    pub fn advance(&mut self, dt: f32, world: &mut World) -> Vec<AnimOutcome> {
        let mut out = Vec::new();
        let mut still = Vec::with_capacity(self.active.len());
        for pos in self.active.drain(..) {
            if step_block(pos, dt, world, &mut out) {
                still.push(pos);
            } else {
                self.tracked.remove(&pos);
            }
        }
        self.active = still;
        out
    }
}

/// Returns whether the block at `pos` is still animating.
fn step_block(pos: GridPos, dt: f32, world: &mut World, out: &mut Vec<AnimOutcome>) -> bool {
    let Some(block) = world.get_mut(pos) else {
        return false;
    };
    let artifact = block.artifact;
    match block.anim {
        Animation::None => false,
        Animation::Growing { elapsed } => {
            let mut elapsed = elapsed + dt;
            let mut stepped = false;
            while elapsed >= GROW_INTERVAL {
                elapsed -= GROW_INTERVAL;
                block.scale += GROW_STEP;
                stepped = true;
                if block.scale >= 1.0 - SCALE_EPS {
                    block.scale = 1.0;
                    block.anim = Animation::None;
                    out.push(AnimOutcome::Scaled {
                        pos,
                        artifact,
                        scale: 1.0,
                    });
                    out.push(AnimOutcome::Finalized { pos, artifact });
                    return false;
                }
            }
            block.anim = Animation::Growing { elapsed };
            if stepped {
                out.push(AnimOutcome::Scaled {
                    pos,
                    artifact,
                    scale: block.scale,
                });
            }
            true
        }
        Animation::Shrinking { elapsed } => {
            let mut elapsed = elapsed + dt;
            let mut stepped = false;
            while elapsed >= SHRINK_INTERVAL {
                elapsed -= SHRINK_INTERVAL;
                block.scale -= SHRINK_STEP;
                stepped = true;
                if block.scale <= SCALE_EPS {
                    let kind = block.kind;
                    world.remove(pos);
                    out.push(AnimOutcome::Removed {
                        pos,
                        kind,
                        artifact,
                    });
                    return false;
                }
            }
            block.anim = Animation::Shrinking { elapsed };
            if stepped {
                out.push(AnimOutcome::Scaled {
                    pos,
                    artifact,
                    scale: block.scale,
                });
            }
            true
        }
    }
}
