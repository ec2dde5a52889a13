//! The rewrite pipeline.
//!
//! Orchestrates, for every rule: parse match criteria, locate exactly one
//! target entity, apply the kind's property table in declaration order.
//! Failures are isolated at two boundaries: a failing rule never stops its
//! list, and a malformed document never stops the batch. There is no fatal
//! error path here.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::document::{DocumentSource, MatchCriteria, RuleDocument};
use crate::registry::{EntityRegistry, PieceId, RecipeId};
use crate::{Result, RewriteError};

pub mod locate;
pub mod properties;

pub use properties::{build_biome_mask, build_requirements, Applied};

/// Per-kind strategy: how to locate a target and how to apply one property.
/// The pipeline holds one strategy per document section.
pub trait EntityKind<R: EntityRegistry> {
    /// Registry handle for this kind's entities.
    type Id: Copy + std::fmt::Debug;

    /// Section key in rule documents.
    const SECTION: &'static str;

    fn locate(criteria: &MatchCriteria, registry: &R) -> Result<Self::Id>;

    /// Apply one property. `key` arrives lowercased.
    fn apply_property(key: &str, value: &Value, id: Self::Id, registry: &mut R)
        -> Result<Applied>;
}

/// Strategy for the recipe entity kind.
pub struct RecipeKind;

/// Strategy for the buildable piece entity kind.
pub struct PieceKind;

impl<R: EntityRegistry> EntityKind<R> for RecipeKind {
    type Id = RecipeId;
    const SECTION: &'static str = "recipes";

    fn locate(criteria: &MatchCriteria, registry: &R) -> Result<RecipeId> {
        locate::locate_recipe(criteria, registry)
    }

    fn apply_property(
        key: &str,
        value: &Value,
        id: RecipeId,
        registry: &mut R,
    ) -> Result<Applied> {
        properties::apply_recipe_property(key, value, id, registry)
    }
}

impl<R: EntityRegistry> EntityKind<R> for PieceKind {
    type Id = PieceId;
    const SECTION: &'static str = "pieces";

    fn locate(criteria: &MatchCriteria, registry: &R) -> Result<PieceId> {
        locate::locate_piece(criteria, registry)
    }

    fn apply_property(key: &str, value: &Value, id: PieceId, registry: &mut R) -> Result<Applied> {
        properties::apply_piece_property(key, value, id, registry)
    }
}

/// Terminal state of one rule.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum RuleStatus {
    Applied,
    Failed { error: String },
}

/// Outcome of one rule in a section.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    /// Position of the rule in its section, counting from zero.
    pub index: usize,
    pub status: RuleStatus,
    /// Degraded single-property failures (unresolved station references).
    pub warnings: Vec<String>,
}

/// Outcomes of one section's rules, in input order.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SectionReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl SectionReport {
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == RuleStatus::Applied)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

/// How one document ended up.
#[derive(Debug, Clone, Serialize)]
pub enum DocumentOutcome {
    /// The document parsed; each section ran with per-rule isolation.
    Applied {
        recipes: SectionReport,
        pieces: SectionReport,
    },
    /// The document itself could not be parsed as the expected shape; no
    /// rule from it was applied.
    Malformed { error: String },
}

/// Report for one document source.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub outcome: DocumentOutcome,
}

/// Report for one whole batch of documents.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RunReport {
    pub documents: Vec<DocumentReport>,
}

impl RunReport {
    /// Total rules applied across all documents and sections.
    pub fn rules_applied(&self) -> usize {
        self.sections().map(SectionReport::applied).sum()
    }

    /// Total rules that failed across all documents and sections.
    pub fn rules_failed(&self) -> usize {
        self.sections().map(SectionReport::failed).sum()
    }

    fn sections(&self) -> impl Iterator<Item = &SectionReport> {
        self.documents.iter().flat_map(|doc| match &doc.outcome {
            DocumentOutcome::Applied { recipes, pieces } => vec![recipes, pieces].into_iter(),
            DocumentOutcome::Malformed { .. } => Vec::new().into_iter(),
        })
    }
}

/// Apply every document source to the registry, in the order supplied.
///
/// This is the batch entry point the host calls once its registry is
/// populated. A document that fails to parse is reported and skipped; it
/// never affects the documents around it.
pub fn rewrite_all<R: EntityRegistry>(sources: &[DocumentSource], registry: &mut R) -> RunReport {
    let mut report = RunReport::default();
    for source in sources {
        info!("Processing rewrite document '{}'", source.name);
        let outcome = match RuleDocument::from_text(&source.text) {
            Ok(document) => apply_parsed(&document, registry),
            Err(e) => {
                error!("Skipping malformed document '{}': {}", source.name, e);
                DocumentOutcome::Malformed {
                    error: e.to_string(),
                }
            }
        };
        report.documents.push(DocumentReport {
            name: source.name.clone(),
            outcome,
        });
    }
    report
}

/// Apply one already-parsed document value to the registry.
pub fn apply_document<R: EntityRegistry>(
    name: &str,
    value: &Value,
    registry: &mut R,
) -> DocumentReport {
    info!("Processing rewrite document '{}'", name);
    let outcome = match RuleDocument::from_value(value) {
        Ok(document) => apply_parsed(&document, registry),
        Err(e) => {
            error!("Skipping malformed document '{}': {}", name, e);
            DocumentOutcome::Malformed {
                error: e.to_string(),
            }
        }
    };
    DocumentReport {
        name: name.to_string(),
        outcome,
    }
}

// Recipes run before pieces, fixed, so later sections observe earlier
// sections' effects deterministically.
fn apply_parsed<R: EntityRegistry>(document: &RuleDocument, registry: &mut R) -> DocumentOutcome {
    let recipes = apply_section::<RecipeKind, R>(&document.recipes, registry);
    let pieces = apply_section::<PieceKind, R>(&document.pieces, registry);
    DocumentOutcome::Applied { recipes, pieces }
}

/// Apply one section's rules in input order. Each rule fails independently;
/// effects a rule applied before its own failure remain applied.
pub fn apply_section<K: EntityKind<R>, R: EntityRegistry>(
    rules: &[Value],
    registry: &mut R,
) -> SectionReport {
    let mut outcomes = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        let mut warnings = Vec::new();
        let status = match apply_rule::<K, R>(rule, registry, &mut warnings) {
            Ok(()) => RuleStatus::Applied,
            Err(e) => {
                error!("Rule {} in '{}' failed: {}", index, K::SECTION, e);
                RuleStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(RuleOutcome {
            index,
            status,
            warnings,
        });
    }
    SectionReport { outcomes }
}

fn apply_rule<K: EntityKind<R>, R: EntityRegistry>(
    rule: &Value,
    registry: &mut R,
    warnings: &mut Vec<String>,
) -> Result<()> {
    let criteria = MatchCriteria::parse(rule)?;
    debug!("Matching '{}' rule against '{}'", K::SECTION, criteria.name);

    let id = K::locate(&criteria, registry)?;
    debug!("Resolved '{}' to {:?}", criteria.name, id);

    // parse() already proved the rule is an object
    let object = rule.as_object().ok_or(RewriteError::MissingMatchBlock)?;
    for (key, value) in object {
        if key.eq_ignore_ascii_case("match") {
            continue;
        }
        match K::apply_property(&key.to_ascii_lowercase(), value, id, registry)? {
            Applied::Updated => debug!("Applied '{}' on '{}'", key, criteria.name),
            Applied::Skipped(e) => {
                warn!("Skipping property '{}' on '{}': {}", key, criteria.name, e);
                warnings.push(format!("{key}: {e}"));
            }
            Applied::Unknown => {
                debug!("Ignoring unrecognized property '{}'", key);
            }
        }
    }

    Ok(())
}
