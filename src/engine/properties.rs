//! Property updater tables.
//!
//! One explicit mapping per entity kind from a lowercased property name to
//! its mutation. Unrecognized keys fall through to [`Applied::Unknown`], the
//! forward-compatibility no-op branch.
//!
//! Station references degrade per-property: an unresolved name yields
//! [`Applied::Skipped`] and the field keeps its prior value. Requirement
//! items do not degrade — a requirement with no item is not a valid partial
//! state, so `resources` updates are all-or-nothing.

use serde_json::Value;

use crate::biome::BiomeMask;
use crate::document::{bool_value, get_ignore_case, int_value, opt_bool, opt_int, str_value};
use crate::registry::{EntityRegistry, PieceId, RecipeId, Requirement, StationId};
use crate::{Result, RewriteError};

/// What applying a single property did.
#[derive(Debug)]
pub enum Applied {
    /// The property was recognized and the entity updated.
    Updated,
    /// The property was recognized but its reference did not resolve; the
    /// field keeps its prior value and the rule continues.
    Skipped(RewriteError),
    /// Unrecognized property name, ignored.
    Unknown,
}

/// Recipe-kind property table.
pub fn apply_recipe_property<R: EntityRegistry>(
    key: &str,
    value: &Value,
    id: RecipeId,
    registry: &mut R,
) -> Result<Applied> {
    match key {
        "amount" => registry.recipe_mut(id).amount = int_value(value, key)?,
        "enabled" => registry.recipe_mut(id).enabled = bool_value(value, key)?,
        "minstationlevel" => {
            registry.recipe_mut(id).min_station_level = int_value(value, key)?;
        }
        "craftingstation" => {
            return set_station(value, key, registry, |registry, station| {
                registry.recipe_mut(id).crafting_station = Some(station);
            });
        }
        "repairstation" => {
            return set_station(value, key, registry, |registry, station| {
                registry.recipe_mut(id).repair_station = Some(station);
            });
        }
        "resources" => {
            let resources = build_requirements(value, registry)?;
            registry.recipe_mut(id).resources = resources;
        }
        _ => return Ok(Applied::Unknown),
    }
    Ok(Applied::Updated)
}

/// Piece-kind property table.
pub fn apply_piece_property<R: EntityRegistry>(
    key: &str,
    value: &Value,
    id: PieceId,
    registry: &mut R,
) -> Result<Applied> {
    match key {
        "enabled" => registry.piece_mut(id).enabled = bool_value(value, key)?,
        "craftingstation" => {
            return set_station(value, key, registry, |registry, station| {
                registry.piece_mut(id).crafting_station = Some(station);
            });
        }
        "biomes" => registry.piece_mut(id).only_in_biomes = build_biome_mask(value)?,
        "resources" => {
            let resources = build_requirements(value, registry)?;
            registry.piece_mut(id).resources = resources;
        }
        _ => return Ok(Applied::Unknown),
    }
    Ok(Applied::Updated)
}

/// Resolve a station name and hand it to `set`. A name of the wrong JSON
/// type is a hard error; a name that does not resolve only skips this
/// property.
fn set_station<R, F>(value: &Value, key: &str, registry: &mut R, set: F) -> Result<Applied>
where
    R: EntityRegistry,
    F: FnOnce(&mut R, StationId),
{
    let name = str_value(value, key)?;
    match registry.resolve_station(name) {
        Some(station) => {
            set(registry, station);
            Ok(Applied::Updated)
        }
        None => Ok(Applied::Skipped(RewriteError::ComponentResolution(
            name.to_string(),
        ))),
    }
}

/// Build a full replacement requirement list from a raw `resources` value.
///
/// Output order follows input order, without deduplication. Every element
/// needs a `name` that resolves to an item; a missing name or unresolved
/// item fails the whole update.
pub fn build_requirements<R: EntityRegistry>(
    value: &Value,
    registry: &R,
) -> Result<Vec<Requirement>> {
    let entries = value.as_array().ok_or(RewriteError::InvalidValue {
        key: "resources".to_string(),
        expected: "array",
    })?;

    let mut requirements = Vec::with_capacity(entries.len());
    for entry in entries {
        let object = entry.as_object().ok_or(RewriteError::InvalidValue {
            key: "resources".to_string(),
            expected: "array of objects",
        })?;

        let name = get_ignore_case(object, "name")
            .and_then(Value::as_str)
            .ok_or(RewriteError::MissingRequiredField("name"))?;
        let item = registry
            .resolve_item(name)
            .ok_or_else(|| RewriteError::ComponentResolution(name.to_string()))?;

        requirements.push(Requirement {
            item,
            amount: opt_int(object, "amount")?.unwrap_or(0),
            amount_per_level: opt_int(object, "amountPerLevel")?.unwrap_or(0),
            recoverable: opt_bool(object, "recover")?.unwrap_or(false),
        });
    }

    Ok(requirements)
}

/// OR together the named biome flags, starting from the empty set. The prior
/// mask is discarded by the caller, never merged.
pub fn build_biome_mask(value: &Value) -> Result<BiomeMask> {
    let names = value.as_array().ok_or(RewriteError::InvalidValue {
        key: "biomes".to_string(),
        expected: "array",
    })?;

    let mut mask = BiomeMask::empty();
    for name in names {
        let name = str_value(name, "biomes")?;
        mask |= BiomeMask::from_name(name)
            .ok_or_else(|| RewriteError::UnknownBiome(name.to_string()))?;
    }

    Ok(mask)
}
