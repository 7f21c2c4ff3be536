use std::fmt;

/// Index into the block registry.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BlockKindId(pub u8);

impl BlockKindId {
    pub const DIRT: BlockKindId = BlockKindId(0);
    pub const STONE: BlockKindId = BlockKindId(1);
    pub const GRASS: BlockKindId = BlockKindId(2);
    pub const SAND: BlockKindId = BlockKindId(3);
    pub const REDSTONE: BlockKindId = BlockKindId(4);
    pub const LAPIS: BlockKindId = BlockKindId(5);
    pub const SNOW: BlockKindId = BlockKindId(6);
    pub const WOOD: BlockKindId = BlockKindId(7);
    pub const LEAVES: BlockKindId = BlockKindId(8);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
