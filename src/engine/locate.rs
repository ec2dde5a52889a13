//! Entity locator strategies.
//!
//! Each strategy narrows match criteria to exactly one registry entity.
//! Zero or many candidates is an error; there is no silent first-match
//! fallback for recipes.

use crate::document::MatchCriteria;
use crate::registry::{EntityRegistry, PieceId, RecipeId};
use crate::{Result, RewriteError};

/// Find the single recipe whose crafted item's name equals `criteria.name`
/// (case-sensitive), further narrowed by `criteria.amount` when present.
pub fn locate_recipe<R: EntityRegistry>(
    criteria: &MatchCriteria,
    registry: &R,
) -> Result<RecipeId> {
    if criteria.name.is_empty() {
        return Err(RewriteError::MissingRequiredField("name"));
    }

    let mut candidates = registry.recipe_ids().into_iter().filter(|&id| {
        let recipe = registry.recipe(id);
        registry.item_name(recipe.item) == criteria.name
            && criteria.amount.map_or(true, |amount| recipe.amount == amount)
    });

    let Some(found) = candidates.next() else {
        return Err(RewriteError::NoMatch(criteria.name.clone()));
    };

    let extra = candidates.count();
    if extra > 0 {
        return Err(RewriteError::AmbiguousMatch {
            name: criteria.name.clone(),
            count: extra + 1,
        });
    }

    Ok(found)
}

/// Find the piece named `criteria.name` in the build table of the tool named
/// by `criteria.build_tool`. Piece names match case-insensitively, unlike
/// recipe item names.
pub fn locate_piece<R: EntityRegistry>(criteria: &MatchCriteria, registry: &R) -> Result<PieceId> {
    if criteria.name.is_empty() {
        return Err(RewriteError::MissingRequiredField("name"));
    }

    let tool_name = criteria
        .build_tool
        .as_deref()
        .ok_or(RewriteError::MissingRequiredField("buildTool"))?;

    let Some(tool) = registry.resolve_item(tool_name) else {
        return Err(RewriteError::NoMatch(criteria.name.clone()));
    };

    registry
        .build_table(tool)
        .iter()
        .copied()
        .find(|&id| registry.piece(id).name.eq_ignore_ascii_case(&criteria.name))
        .ok_or_else(|| RewriteError::NoMatch(criteria.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MemoryRegistry, Piece, Recipe};
    use pretty_assertions::assert_eq;

    fn criteria(name: &str) -> MatchCriteria {
        MatchCriteria {
            name: name.to_string(),
            amount: None,
            build_tool: None,
        }
    }

    #[test]
    fn test_locate_recipe_by_item_name() {
        let mut registry = MemoryRegistry::new();
        let club = registry.add_item("Club");
        let torch = registry.add_item("Torch");
        registry.add_recipe(Recipe::new(club));
        let wanted = registry.add_recipe(Recipe::new(torch));

        assert_eq!(locate_recipe(&criteria("Torch"), &registry).unwrap(), wanted);
    }

    #[test]
    fn test_recipe_name_match_is_case_sensitive() {
        let mut registry = MemoryRegistry::new();
        let club = registry.add_item("Club");
        registry.add_recipe(Recipe::new(club));

        let err = locate_recipe(&criteria("club"), &registry).unwrap_err();
        assert!(matches!(err, RewriteError::NoMatch(_)));
    }

    #[test]
    fn test_ambiguous_recipe_without_amount() {
        let mut registry = MemoryRegistry::new();
        let torch = registry.add_item("Torch");
        registry.add_recipe(Recipe::new(torch));
        let mut second = Recipe::new(torch);
        second.amount = 2;
        registry.add_recipe(second);

        let err = locate_recipe(&criteria("Torch"), &registry).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::AmbiguousMatch { count: 2, .. }
        ));
    }

    #[test]
    fn test_amount_disambiguates() {
        let mut registry = MemoryRegistry::new();
        let torch = registry.add_item("Torch");
        let one = registry.add_recipe(Recipe::new(torch));
        let mut second = Recipe::new(torch);
        second.amount = 2;
        let two = registry.add_recipe(second);

        let mut wanted = criteria("Torch");
        wanted.amount = Some(1);
        assert_eq!(locate_recipe(&wanted, &registry).unwrap(), one);

        wanted.amount = Some(2);
        assert_eq!(locate_recipe(&wanted, &registry).unwrap(), two);
    }

    #[test]
    fn test_locate_piece_requires_build_tool() {
        let registry = MemoryRegistry::new();
        let err = locate_piece(&criteria("wood_wall"), &registry).unwrap_err();
        assert!(matches!(
            err,
            RewriteError::MissingRequiredField("buildTool")
        ));
    }

    #[test]
    fn test_locate_piece_is_case_insensitive() {
        let mut registry = MemoryRegistry::new();
        let hammer = registry.add_item("Hammer");
        let wall = registry.add_piece(Piece::new("wood_wall"));
        registry.set_build_table(hammer, vec![wall]);

        let mut wanted = criteria("WOOD_WALL");
        wanted.build_tool = Some("Hammer".to_string());
        assert_eq!(locate_piece(&wanted, &registry).unwrap(), wall);
    }

    #[test]
    fn test_unresolvable_tool_is_no_match() {
        let mut registry = MemoryRegistry::new();
        registry.add_piece(Piece::new("wood_wall"));

        let mut wanted = criteria("wood_wall");
        wanted.build_tool = Some("Hoe".to_string());
        let err = locate_piece(&wanted, &registry).unwrap_err();
        assert!(matches!(err, RewriteError::NoMatch(_)));
    }

    #[test]
    fn test_locate_is_referentially_transparent() {
        let mut registry = MemoryRegistry::new();
        let club = registry.add_item("Club");
        registry.add_recipe(Recipe::new(club));

        let first = locate_recipe(&criteria("Club"), &registry).unwrap();
        let second = locate_recipe(&criteria("Club"), &registry).unwrap();
        assert_eq!(first, second);
    }
}
