//! Declarative patch engine for crafting recipes and buildable pieces.
//!
//! Rule documents (JSON) select entities in a host-owned registry by match
//! predicate and mutate named properties on them. The host populates its
//! registry, hands the engine an ordered batch of documents once everything
//! is registered, and gets back a structured [`RunReport`]. Failures stay
//! local: a bad rule never stops its list, a bad document never stops the
//! batch.
//!
//! The registry is an explicit handle behind the [`EntityRegistry`] trait;
//! [`MemoryRegistry`] is a complete in-memory implementation.
//!
//! ```
//! use recipe_rewriter::{rewrite_all, DocumentSource, EntityRegistry, MemoryRegistry, Recipe};
//!
//! let mut registry = MemoryRegistry::new();
//! let club = registry.add_item("Club");
//! let id = registry.add_recipe(Recipe::new(club));
//!
//! let source = DocumentSource::new(
//!     "rules.json",
//!     r#"{ "recipes": [ { "match": { "name": "Club" }, "amount": 2, "enabled": false } ] }"#,
//! );
//! let report = rewrite_all(&[source], &mut registry);
//!
//! assert_eq!(report.rules_applied(), 1);
//! assert_eq!(registry.recipe(id).amount, 2);
//! assert!(!registry.recipe(id).enabled);
//! ```

pub mod biome;
pub mod document;
pub mod engine;
pub mod error;
pub mod registry;

pub use biome::BiomeMask;
pub use document::{DocumentSource, MatchCriteria, RuleDocument};
pub use engine::{
    apply_document, apply_section, rewrite_all, Applied, DocumentOutcome, DocumentReport,
    EntityKind, PieceKind, RecipeKind, RuleOutcome, RuleStatus, RunReport, SectionReport,
};
pub use error::{Result, RewriteError};
pub use registry::{
    EntityRegistry, ItemId, MemoryRegistry, Piece, PieceId, Recipe, RecipeId, Requirement,
    StationId,
};
