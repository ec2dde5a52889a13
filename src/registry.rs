//! Entity model and the registry contract.
//!
//! Entities are created and owned by the host's registry before the pipeline
//! runs. The engine never creates or deletes entities; it only mutates fields
//! on entities the registry hands it ids for, during one synchronous pass in
//! which it has exclusive access.

use std::collections::HashMap;

use crate::biome::BiomeMask;

/// Handle to an item prefab held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub usize);

/// Handle to a crafting/repair station component held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(pub usize);

/// Handle to a recipe entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(pub usize);

/// Handle to a buildable piece entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(pub usize);

/// One ingredient of a recipe or piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub item: ItemId,
    pub amount: i32,
    pub amount_per_level: i32,
    pub recoverable: bool,
}

impl Requirement {
    pub fn new(item: ItemId) -> Self {
        Self {
            item,
            amount: 0,
            amount_per_level: 0,
            recoverable: false,
        }
    }
}

/// A crafting recipe. `item` is the prefab the recipe produces; recipes are
/// matched by that item's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub item: ItemId,
    pub amount: i32,
    pub enabled: bool,
    pub min_station_level: i32,
    pub crafting_station: Option<StationId>,
    pub repair_station: Option<StationId>,
    pub resources: Vec<Requirement>,
}

impl Recipe {
    pub fn new(item: ItemId) -> Self {
        Self {
            item,
            amount: 1,
            enabled: true,
            min_station_level: 1,
            crafting_station: None,
            repair_station: None,
            resources: Vec::new(),
        }
    }
}

/// A buildable piece, reachable through the build table of some tool item.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub name: String,
    pub enabled: bool,
    pub crafting_station: Option<StationId>,
    pub only_in_biomes: BiomeMask,
    pub resources: Vec<Requirement>,
}

impl Piece {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            crafting_station: None,
            only_in_biomes: BiomeMask::empty(),
            resources: Vec::new(),
        }
    }
}

/// Storage and name-resolution contract the host provides.
///
/// The contract is deliberately dumb: it exposes entity storage plus prefab
/// and component resolution, and nothing else. All matching policy (which
/// comparisons are case-sensitive, what counts as exactly one result) lives
/// in the engine.
///
/// Ids handed out by a registry stay valid for the duration of one pipeline
/// invocation; accessors may panic on an id from a different registry or an
/// earlier run.
pub trait EntityRegistry {
    /// All recipe ids, in registry order.
    fn recipe_ids(&self) -> Vec<RecipeId>;

    fn recipe(&self, id: RecipeId) -> &Recipe;

    fn recipe_mut(&mut self, id: RecipeId) -> &mut Recipe;

    fn piece(&self, id: PieceId) -> &Piece;

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece;

    /// Resolve an item prefab name (case-sensitive exact match).
    fn resolve_item(&self, name: &str) -> Option<ItemId>;

    fn item_name(&self, id: ItemId) -> &str;

    /// Resolve a crafting/repair station component by prefab name.
    fn resolve_station(&self, name: &str) -> Option<StationId>;

    /// The ordered build-piece table of a tool item. Empty when the item is
    /// not a build tool.
    fn build_table(&self, tool: ItemId) -> &[PieceId];
}

/// In-memory registry: a complete reference implementation of the host
/// collaborator, used throughout the crate's tests and usable by hosts that
/// keep their entities in plain collections.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    items: Vec<String>,
    stations: Vec<String>,
    recipes: Vec<Recipe>,
    pieces: Vec<Piece>,
    build_tables: HashMap<ItemId, Vec<PieceId>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, name: impl Into<String>) -> ItemId {
        self.items.push(name.into());
        ItemId(self.items.len() - 1)
    }

    pub fn add_station(&mut self, name: impl Into<String>) -> StationId {
        self.stations.push(name.into());
        StationId(self.stations.len() - 1)
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> RecipeId {
        self.recipes.push(recipe);
        RecipeId(self.recipes.len() - 1)
    }

    pub fn add_piece(&mut self, piece: Piece) -> PieceId {
        self.pieces.push(piece);
        PieceId(self.pieces.len() - 1)
    }

    /// Register `pieces` as the ordered build table of `tool`, replacing any
    /// previous table.
    pub fn set_build_table(&mut self, tool: ItemId, pieces: Vec<PieceId>) {
        self.build_tables.insert(tool, pieces);
    }

    pub fn station_name(&self, id: StationId) -> &str {
        &self.stations[id.0]
    }
}

impl EntityRegistry for MemoryRegistry {
    fn recipe_ids(&self) -> Vec<RecipeId> {
        (0..self.recipes.len()).map(RecipeId).collect()
    }

    fn recipe(&self, id: RecipeId) -> &Recipe {
        &self.recipes[id.0]
    }

    fn recipe_mut(&mut self, id: RecipeId) -> &mut Recipe {
        &mut self.recipes[id.0]
    }

    fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }

    fn resolve_item(&self, name: &str) -> Option<ItemId> {
        self.items.iter().position(|n| n == name).map(ItemId)
    }

    fn item_name(&self, id: ItemId) -> &str {
        &self.items[id.0]
    }

    fn resolve_station(&self, name: &str) -> Option<StationId> {
        self.stations.iter().position(|n| n == name).map(StationId)
    }

    fn build_table(&self, tool: ItemId) -> &[PieceId] {
        self.build_tables
            .get(&tool)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
