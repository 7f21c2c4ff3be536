use hashbrown::HashMap;

use voxelbox_blocks::BlockKindId;
use voxelbox_geom::Aabb;

use crate::types::{Animation, ArtifactId, Block, GridPos};

/// Authoritative set of placed blocks, hashed by grid cell.
pub struct World {
    size: u32,
    blocks: HashMap<GridPos, Block>,
    // floor blocks that are not already on their way out
    floor_live: usize,
    next_artifact: u64,
}

impl World {
    pub fn new(size: u32) -> Self {
        let footprint = (size as usize) * (size as usize);
        Self {
            size,
            blocks: HashMap::with_capacity(footprint * 2),
            floor_live: 0,
            next_artifact: 1,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    fn alloc_artifact(&mut self) -> ArtifactId {
        let id = ArtifactId(self.next_artifact);
        self.next_artifact = self.next_artifact.wrapping_add(1).max(1);
        id
    }

    /// Place a full-size block. Returns `None` when the cell is already taken.
    pub fn insert(&mut self, pos: GridPos, kind: BlockKindId) -> Option<&Block> {
        self.insert_with(pos, kind, 1.0, Animation::None)
    }

    pub fn insert_with(
        &mut self,
        pos: GridPos,
        kind: BlockKindId,
        scale: f32,
        anim: Animation,
    ) -> Option<&Block> {
        if self.blocks.contains_key(&pos) {
            return None;
        }
        let artifact = self.alloc_artifact();
        let outline = Some(self.alloc_artifact());
        if pos.is_floor() && !anim.is_shrinking() {
            self.floor_live += 1;
        }
        let block = Block {
            pos,
            kind,
            scale,
            anim,
            artifact,
            outline,
        };
        Some(&*self.blocks.entry(pos).or_insert(block))
    }

    /// Drop a block from the store, returning it so its artifacts can be released.
    pub fn remove(&mut self, pos: GridPos) -> Option<Block> {
        let b = self.blocks.remove(&pos)?;
        if pos.is_floor() && !b.anim.is_shrinking() {
            self.floor_live -= 1;
        }
        Some(b)
    }

    /// Switch a block into its removal animation. The block stays in the store
    /// (and keeps colliding) until the animation finishes; its outline is handed
    /// back for immediate release. Returns `None` if there is no such block or it
    /// is already shrinking.
    pub fn begin_shrink(&mut self, pos: GridPos) -> Option<Option<ArtifactId>> {
        let b = self.blocks.get_mut(&pos)?;
        if b.anim.is_shrinking() {
            return None;
        }
        b.anim = Animation::Shrinking { elapsed: 0.0 };
        if pos.is_floor() {
            self.floor_live -= 1;
        }
        Some(b.outline.take())
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    #[inline]
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Block> {
        self.blocks.get_mut(&pos)
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    /// Whether a ray should stop at this cell.
    #[inline]
    pub fn is_targetable_at(&self, pos: GridPos) -> bool {
        self.blocks.get(&pos).is_some_and(Block::is_targetable)
    }

    /// Number of occupied face-neighbors of `pos`.
    pub fn neighbors_occupied(&self, pos: GridPos) -> usize {
        const FACES: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        FACES
            .iter()
            .filter(|(dx, dy, dz)| self.contains(pos.offset(*dx, *dy, *dz)))
            .count()
    }

    /// Floor blocks that are present and not being removed.
    #[inline]
    pub fn floor_count(&self) -> usize {
        self.floor_live
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// All blocks, bottom layer first, then x, then z.
    pub fn iter_sorted(&self) -> Vec<&Block> {
        let mut v: Vec<&Block> = self.blocks.values().collect();
        v.sort_by_key(|b| b.pos.sort_key());
        v
    }

    /// Occupied cells whose unit cube touches `bounds`, in `GridPos::sort_key` order.
    pub fn blocks_in(&self, bounds: &Aabb) -> Vec<GridPos> {
        let x0 = (bounds.min.x - 0.5).ceil() as i32;
        let x1 = (bounds.max.x + 0.5).floor() as i32;
        let y0 = (bounds.min.y - 0.5).ceil() as i32;
        let y1 = (bounds.max.y + 0.5).floor() as i32;
        let z0 = (bounds.min.z - 0.5).ceil() as i32;
        let z1 = (bounds.max.z + 0.5).floor() as i32;
        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                for z in z0..=z1 {
                    let p = GridPos::new(x, y, z);
                    if self.blocks.contains_key(&p) {
                        out.push(p);
                    }
                }
            }
        }
        out
    }

    /// Empty the store, returning every artifact it owned.
    pub fn clear(&mut self) -> Vec<ArtifactId> {
        let mut released = Vec::with_capacity(self.blocks.len() * 2);
        let mut all: Vec<Block> = self.blocks.drain().map(|(_, b)| b).collect();
        all.sort_by_key(|b| b.pos.sort_key());
        for b in all {
            released.push(b.artifact);
            if let Some(o) = b.outline {
                released.push(o);
            }
        }
        self.floor_live = 0;
        released
    }
}
