//! The closed biome enumeration, as a combinable bit-flag set.

use bitflags::bitflags;

bitflags! {
    /// Set of biomes a piece may be restricted to. Flag values follow the
    /// host game's biome flags.
    #[derive(Default)]
    pub struct BiomeMask: u32 {
        const MEADOWS = 1;
        const SWAMP = 1 << 1;
        const MOUNTAIN = 1 << 2;
        const BLACK_FOREST = 1 << 3;
        const PLAINS = 1 << 4;
        const ASH_LANDS = 1 << 5;
        const DEEP_NORTH = 1 << 6;
        const OCEAN = 1 << 8;
        const MISTLANDS = 1 << 9;
    }
}

impl BiomeMask {
    /// Exact-name lookup against the closed enumeration. Names are the
    /// game's identifiers and are case-sensitive; anything else is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Meadows" => Some(Self::MEADOWS),
            "Swamp" => Some(Self::SWAMP),
            "Mountain" => Some(Self::MOUNTAIN),
            "BlackForest" => Some(Self::BLACK_FOREST),
            "Plains" => Some(Self::PLAINS),
            "AshLands" => Some(Self::ASH_LANDS),
            "DeepNorth" => Some(Self::DEEP_NORTH),
            "Ocean" => Some(Self::OCEAN),
            "Mistlands" => Some(Self::MISTLANDS),
            _ => None,
        }
    }
}
