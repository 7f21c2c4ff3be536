use super::types::BlockKindId;

/// Immutable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockKind {
    pub id: BlockKindId,
    pub name: &'static str,
    /// 0xRRGGBB
    pub color: u32,
}

impl BlockKind {
    pub fn color_hex(&self) -> String {
        format!("#{:06x}", self.color & 0x00FF_FFFF)
    }
}

const KINDS: [BlockKind; 9] = [
    BlockKind {
        id: BlockKindId::DIRT,
        name: "Dirt",
        color: 0x8B4513,
    },
    BlockKind {
        id: BlockKindId::STONE,
        name: "Stone",
        color: 0x808080,
    },
    BlockKind {
        id: BlockKindId::GRASS,
        name: "Grass",
        color: 0x228B22,
    },
    BlockKind {
        id: BlockKindId::SAND,
        name: "Sand",
        color: 0xFFFF00,
    },
    BlockKind {
        id: BlockKindId::REDSTONE,
        name: "Redstone",
        color: 0xFF0000,
    },
    BlockKind {
        id: BlockKindId::LAPIS,
        name: "Lapis",
        color: 0x0000FF,
    },
    BlockKind {
        id: BlockKindId::SNOW,
        name: "Snow",
        color: 0xFFFFFF,
    },
    BlockKind {
        id: BlockKindId::WOOD,
        name: "Wood",
        color: 0xA0522D,
    },
    BlockKind {
        id: BlockKindId::LEAVES,
        name: "Leaves",
        color: 0x90EE90,
    },
];

/// Fixed, process-wide block catalog.
#[derive(Debug)]
pub struct BlockRegistry {
    kinds: &'static [BlockKind],
}

pub static REGISTRY: BlockRegistry = BlockRegistry { kinds: &KINDS };

impl BlockRegistry {
    #[inline]
    pub fn get(&self, id: BlockKindId) -> Option<&BlockKind> {
        self.kinds.get(id.index())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockKindId> {
        self.kinds
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(name))
            .map(|k| k.id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockKind> {
        self.kinds.iter()
    }

    #[inline]
    pub fn contains(&self, id: BlockKindId) -> bool {
        id.index() < self.kinds.len()
    }

    /// Step the selection by `direction` (usually +1/-1), wrapping at both ends.
    pub fn cycle(&self, id: BlockKindId, direction: i32) -> BlockKindId {
        let len = self.kinds.len() as i32;
        let next = (id.0 as i32 + direction).rem_euclid(len);
        BlockKindId(next as u8)
    }

    /// Display name, or `"?"` for ids outside the catalog.
    pub fn name(&self, id: BlockKindId) -> &'static str {
        self.kinds.get(id.index()).map(|k| k.name).unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_positions() {
        for (i, k) in REGISTRY.iter().enumerate() {
            assert_eq!(k.id.index(), i);
        }
    }

    #[test]
    fn color_hex_is_zero_padded() {
        let lapis = REGISTRY.get(BlockKindId::LAPIS).unwrap();
        assert_eq!(lapis.color_hex(), "#0000ff");
        let dirt = REGISTRY.get(BlockKindId::DIRT).unwrap();
        assert_eq!(dirt.color_hex(), "#8b4513");
    }
}
