// ABOUTME: Reconciles a recipe's ingredient associations against a requested list
// ABOUTME: Computes keep/remove/add sets and resolves shared ingredient identities by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Ingredient Reconciliation
//!
//! Updating a recipe never recreates associations that survive the update:
//!
//! 1. names on both sides are kept and get the requested quantity and unit,
//! 2. names only on the existing side are removed,
//! 3. names only on the requested side are added, reusing an existing
//!    ingredient identity with the same (case-sensitive) name or creating one.
//!
//! Planning is pure ([`plan_reconciliation`]); applying the plan goes through
//! the [`IngredientStore`] seam so the database runs it inside one transaction.
//!
//! Duplicate names in a requested list are merged last-write-wins: the last
//! entry's quantity and unit are used, at the position of the first entry.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppResult;
use crate::models::{AssociationId, IngredientId, IngredientRequest, RecipeId, RecipeIngredient};

/// Current association of a recipe, as loaded from the store
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingAssociation {
    /// Association row id
    pub association_id: AssociationId,
    /// Shared ingredient identity
    pub ingredient_id: IngredientId,
    /// Ingredient name
    pub name: String,
    /// Current quantity
    pub quantity: f64,
    /// Current unit
    pub unit: String,
}

impl From<&RecipeIngredient> for ExistingAssociation {
    fn from(ingredient: &RecipeIngredient) -> Self {
        Self {
            association_id: ingredient.id,
            ingredient_id: ingredient.ingredient_id,
            name: ingredient.name.clone(),
            quantity: ingredient.quantity,
            unit: ingredient.unit.clone(),
        }
    }
}

/// In-place overwrite of a kept association
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientUpdate {
    /// Association to overwrite
    pub association_id: AssociationId,
    /// Requested quantity
    pub quantity: f64,
    /// Requested unit
    pub unit: String,
}

/// Association to insert once its ingredient identity is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssociation {
    /// Resolved ingredient identity
    pub ingredient_id: IngredientId,
    /// Requested quantity
    pub quantity: f64,
    /// Requested unit
    pub unit: String,
}

/// Outcome of diffing existing associations against a requested list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan {
    /// Associations that stay, with their new quantity and unit
    pub keep: Vec<IngredientUpdate>,
    /// Associations to drop
    pub remove: Vec<AssociationId>,
    /// Ingredients to attach, identities not yet resolved
    pub add: Vec<IngredientRequest>,
}

/// Plan with every added ingredient resolved to an identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssociationChanges {
    /// Associations that stay, with their new quantity and unit
    pub keep: Vec<IngredientUpdate>,
    /// Associations to drop
    pub remove: Vec<AssociationId>,
    /// Associations to insert
    pub add: Vec<NewAssociation>,
}

/// Storage operations needed to reconcile ingredients.
///
/// Implementations are expected to run every call of one reconciliation on
/// the same transaction.
#[async_trait]
pub trait IngredientStore: Send {
    /// Exact, case-sensitive lookup of an ingredient identity
    async fn find_ingredient_by_name(&mut self, name: &str) -> AppResult<Option<IngredientId>>;

    /// Create a new ingredient identity
    async fn create_ingredient(&mut self, name: &str) -> AppResult<IngredientId>;

    /// Apply removals, in-place updates and insertions for one recipe
    async fn persist_association_changes(
        &mut self,
        recipe_id: RecipeId,
        changes: &AssociationChanges,
    ) -> AppResult<()>;
}

/// Merge entries that share a name, last write wins
#[must_use]
pub fn merge_duplicate_requests(requested: &[IngredientRequest]) -> Vec<IngredientRequest> {
    let mut merged: Vec<IngredientRequest> = Vec::with_capacity(requested.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(requested.len());
    for request in requested {
        if let Some(&position) = positions.get(request.name.as_str()) {
            merged[position] = request.clone();
        } else {
            positions.insert(request.name.as_str(), merged.len());
            merged.push(request.clone());
        }
    }
    merged
}

/// Diff existing associations against the requested ingredient list
#[must_use]
pub fn plan_reconciliation(
    existing: &[ExistingAssociation],
    requested: &[IngredientRequest],
) -> ReconciliationPlan {
    let requested = merge_duplicate_requests(requested);
    let requested_by_name: HashMap<&str, &IngredientRequest> = requested
        .iter()
        .map(|request| (request.name.as_str(), request))
        .collect();
    let existing_names: HashSet<&str> = existing
        .iter()
        .map(|association| association.name.as_str())
        .collect();

    let mut plan = ReconciliationPlan::default();
    for association in existing {
        match requested_by_name.get(association.name.as_str()) {
            Some(request) => plan.keep.push(IngredientUpdate {
                association_id: association.association_id,
                quantity: request.quantity,
                unit: request.unit.clone(),
            }),
            None => plan.remove.push(association.association_id),
        }
    }
    plan.add = requested
        .iter()
        .filter(|request| !existing_names.contains(request.name.as_str()))
        .cloned()
        .collect();
    plan
}

/// Find an ingredient identity by name, creating it when absent
///
/// # Errors
///
/// Propagates storage errors; a concurrent creation of the same name surfaces
/// as a conflict from the store's uniqueness constraint
pub async fn resolve_ingredient<S>(store: &mut S, name: &str) -> AppResult<IngredientId>
where
    S: IngredientStore + ?Sized,
{
    if let Some(ingredient_id) = store.find_ingredient_by_name(name).await? {
        return Ok(ingredient_id);
    }
    let ingredient_id = store.create_ingredient(name).await?;
    debug!(ingredient.id = ingredient_id, ingredient.name = %name, "Created ingredient identity");
    Ok(ingredient_id)
}

/// Plan, resolve and persist the ingredient changes of one recipe.
///
/// Creating a recipe is the same operation against an empty `existing` list.
///
/// # Errors
///
/// Propagates storage errors from the store
pub async fn reconcile_with_store<S>(
    store: &mut S,
    recipe_id: RecipeId,
    existing: &[ExistingAssociation],
    requested: &[IngredientRequest],
) -> AppResult<AssociationChanges>
where
    S: IngredientStore + ?Sized,
{
    let plan = plan_reconciliation(existing, requested);

    let mut add = Vec::with_capacity(plan.add.len());
    for request in &plan.add {
        let ingredient_id = resolve_ingredient(store, &request.name).await?;
        add.push(NewAssociation {
            ingredient_id,
            quantity: request.quantity,
            unit: request.unit.clone(),
        });
    }

    let changes = AssociationChanges {
        keep: plan.keep,
        remove: plan.remove,
        add,
    };
    store.persist_association_changes(recipe_id, &changes).await?;
    debug!(
        recipe.id = recipe_id,
        kept = changes.keep.len(),
        removed = changes.remove.len(),
        added = changes.add.len(),
        "Reconciled recipe ingredients"
    );
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    struct StoredAssociation {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        quantity: f64,
        unit: String,
    }

    /// Ingredient identities are `index + 1` into `ingredients`
    #[derive(Default)]
    struct MemoryStore {
        ingredients: Vec<String>,
        associations: BTreeMap<AssociationId, StoredAssociation>,
        next_association_id: AssociationId,
    }

    impl MemoryStore {
        fn ingredient_id(&self, name: &str) -> Option<IngredientId> {
            self.ingredients
                .iter()
                .position(|existing| existing == name)
                .map(|index| index as IngredientId + 1)
        }

        fn add(&mut self, recipe_id: RecipeId, name: &str, quantity: f64, unit: &str) {
            let ingredient_id = self.ingredient_id(name).unwrap_or_else(|| {
                self.ingredients.push(name.to_owned());
                self.ingredients.len() as IngredientId
            });
            self.next_association_id += 1;
            self.associations.insert(
                self.next_association_id,
                StoredAssociation {
                    recipe_id,
                    ingredient_id,
                    quantity,
                    unit: unit.to_owned(),
                },
            );
        }

        fn existing(&self, recipe_id: RecipeId) -> Vec<ExistingAssociation> {
            self.associations
                .iter()
                .filter(|(_, stored)| stored.recipe_id == recipe_id)
                .map(|(id, stored)| ExistingAssociation {
                    association_id: *id,
                    ingredient_id: stored.ingredient_id,
                    name: self.ingredients[(stored.ingredient_id - 1) as usize].clone(),
                    quantity: stored.quantity,
                    unit: stored.unit.clone(),
                })
                .collect()
        }
    }

    #[async_trait]
    impl IngredientStore for MemoryStore {
        async fn find_ingredient_by_name(&mut self, name: &str) -> AppResult<Option<IngredientId>> {
            Ok(self.ingredient_id(name))
        }

        async fn create_ingredient(&mut self, name: &str) -> AppResult<IngredientId> {
            self.ingredients.push(name.to_owned());
            Ok(self.ingredients.len() as IngredientId)
        }

        async fn persist_association_changes(
            &mut self,
            recipe_id: RecipeId,
            changes: &AssociationChanges,
        ) -> AppResult<()> {
            for association_id in &changes.remove {
                self.associations.remove(association_id);
            }
            for update in &changes.keep {
                let stored = self.associations.get_mut(&update.association_id).unwrap();
                stored.quantity = update.quantity;
                stored.unit.clone_from(&update.unit);
            }
            for new in &changes.add {
                self.next_association_id += 1;
                self.associations.insert(
                    self.next_association_id,
                    StoredAssociation {
                        recipe_id,
                        ingredient_id: new.ingredient_id,
                        quantity: new.quantity,
                        unit: new.unit.clone(),
                    },
                );
            }
            Ok(())
        }
    }

    fn request(name: &str, quantity: f64, unit: &str) -> IngredientRequest {
        IngredientRequest {
            name: name.to_owned(),
            quantity,
            unit: unit.to_owned(),
        }
    }

    async fn reconcile(store: &mut MemoryStore, recipe_id: RecipeId, requested: &[IngredientRequest]) {
        let existing = store.existing(recipe_id);
        reconcile_with_store(store, recipe_id, &existing, requested)
            .await
            .unwrap();
    }

    // ========================================================================
    // Planning
    // ========================================================================

    #[test]
    fn test_plan_splits_keep_remove_add() {
        let existing = vec![
            ExistingAssociation {
                association_id: 1,
                ingredient_id: 10,
                name: "Carrot".into(),
                quantity: 10.0,
                unit: "units".into(),
            },
            ExistingAssociation {
                association_id: 2,
                ingredient_id: 11,
                name: "Delete".into(),
                quantity: 1.0,
                unit: "stuff".into(),
            },
        ];
        let plan = plan_reconciliation(
            &existing,
            &[request("Carrot", 20.0, "units"), request("Salt", 1.0, "tsp")],
        );

        assert_eq!(
            plan.keep,
            vec![IngredientUpdate {
                association_id: 1,
                quantity: 20.0,
                unit: "units".into()
            }]
        );
        assert_eq!(plan.remove, vec![2]);
        assert_eq!(plan.add, vec![request("Salt", 1.0, "tsp")]);
    }

    #[test]
    fn test_plan_is_case_sensitive() {
        let existing = vec![ExistingAssociation {
            association_id: 1,
            ingredient_id: 10,
            name: "Carrot".into(),
            quantity: 10.0,
            unit: "units".into(),
        }];
        let plan = plan_reconciliation(&existing, &[request("carrot", 10.0, "units")]);

        assert!(plan.keep.is_empty());
        assert_eq!(plan.remove, vec![1]);
        assert_eq!(plan.add.len(), 1);
    }

    #[test]
    fn test_duplicate_requests_last_write_wins() {
        let merged = merge_duplicate_requests(&[
            request("Salt", 1.0, "tsp"),
            request("Pepper", 1.0, "pinch"),
            request("Salt", 2.0, "tbsp"),
        ]);
        assert_eq!(
            merged,
            vec![request("Salt", 2.0, "tbsp"), request("Pepper", 1.0, "pinch")]
        );
    }

    // ========================================================================
    // Applying against a store
    // ========================================================================

    #[tokio::test]
    async fn test_identical_request_changes_nothing() {
        let mut store = MemoryStore::default();
        store.add(1, "Carrot", 10.0, "units");
        let before = store.associations.clone();

        reconcile(&mut store, 1, &[request("Carrot", 10.0, "units")]).await;

        assert_eq!(store.associations, before);
        assert_eq!(store.ingredients, vec!["Carrot".to_owned()]);
    }

    #[tokio::test]
    async fn test_add_reuses_identity_from_other_recipe() {
        let mut store = MemoryStore::default();
        store.add(1, "Carrot", 10.0, "units");
        store.add(2, "Salt", 3.0, "pinch");
        let salt_id = store.ingredient_id("Salt").unwrap();

        reconcile(
            &mut store,
            1,
            &[request("Carrot", 10.0, "units"), request("Salt", 1.0, "tsp")],
        )
        .await;

        let recipe = store.existing(1);
        assert_eq!(recipe.len(), 2);
        assert_eq!(recipe[0].association_id, 1);
        assert_eq!(recipe[1].ingredient_id, salt_id);
        assert_eq!(recipe[1].unit, "tsp");
        assert_eq!(store.ingredients.len(), 2);
        // The other recipe keeps its own quantity
        assert_eq!(store.existing(2)[0].unit, "pinch");
    }

    #[tokio::test]
    async fn test_removal_keeps_ingredient_identity() {
        let mut store = MemoryStore::default();
        store.add(1, "Carrot", 10.0, "units");
        store.add(1, "Delete", 1.0, "stuff");

        reconcile(&mut store, 1, &[request("Carrot", 10.0, "units")]).await;

        let recipe = store.existing(1);
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].name, "Carrot");
        assert!(store.ingredient_id("Delete").is_some());
    }

    #[tokio::test]
    async fn test_quantity_update_keeps_association() {
        let mut store = MemoryStore::default();
        store.add(1, "Carrot", 10.0, "units");

        reconcile(&mut store, 1, &[request("Carrot", 20.0, "units")]).await;

        let recipe = store.existing(1);
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].association_id, 1);
        assert!((recipe[0].quantity - 20.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_new_name_creates_identity_once() {
        let mut store = MemoryStore::default();

        reconcile(
            &mut store,
            1,
            &[request("Saffron", 1.0, "pinch"), request("Saffron", 2.0, "pinch")],
        )
        .await;

        assert_eq!(store.ingredients, vec!["Saffron".to_owned()]);
        let recipe = store.existing(1);
        assert_eq!(recipe.len(), 1);
        assert!((recipe[0].quantity - 2.0).abs() < f64::EPSILON);
    }
}
