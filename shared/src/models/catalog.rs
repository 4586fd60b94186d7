//! Tenant catalog snapshot and ingredient lookup

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Drink, Ingredient};

/// Resolves an ingredient id against the current catalog
///
/// Every calculation that needs ingredient data goes through this, so derived
/// values (alcoholic flag, average cost) always reflect the catalog as it is now.
pub trait IngredientLookup {
    fn find_ingredient(&self, ingredient_id: &Uuid) -> Option<&Ingredient>;
}

impl IngredientLookup for [Ingredient] {
    fn find_ingredient(&self, ingredient_id: &Uuid) -> Option<&Ingredient> {
        self.iter().find(|ingredient| ingredient.id == *ingredient_id)
    }
}

impl IngredientLookup for HashMap<Uuid, Ingredient> {
    fn find_ingredient(&self, ingredient_id: &Uuid) -> Option<&Ingredient> {
        self.get(ingredient_id)
    }
}

/// Ingredients and drinks belonging to one company
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub drinks: Vec<Drink>,
}

impl Catalog {
    pub fn new(ingredients: Vec<Ingredient>, drinks: Vec<Drink>) -> Self {
        Self { ingredients, drinks }
    }

    pub fn ingredient(&self, ingredient_id: &Uuid) -> Option<&Ingredient> {
        self.ingredients.find_ingredient(ingredient_id)
    }

    pub fn ingredient_mut(&mut self, ingredient_id: &Uuid) -> Option<&mut Ingredient> {
        self.ingredients
            .iter_mut()
            .find(|ingredient| ingredient.id == *ingredient_id)
    }

    pub fn drink(&self, drink_id: &Uuid) -> Option<&Drink> {
        self.drinks.iter().find(|drink| drink.id == *drink_id)
    }

    pub fn drink_mut(&mut self, drink_id: &Uuid) -> Option<&mut Drink> {
        self.drinks.iter_mut().find(|drink| drink.id == *drink_id)
    }

    pub fn remove_ingredient(&mut self, ingredient_id: &Uuid) -> Option<Ingredient> {
        let index = self
            .ingredients
            .iter()
            .position(|ingredient| ingredient.id == *ingredient_id)?;
        Some(self.ingredients.remove(index))
    }

    pub fn remove_drink(&mut self, drink_id: &Uuid) -> Option<Drink> {
        let index = self.drinks.iter().position(|drink| drink.id == *drink_id)?;
        Some(self.drinks.remove(index))
    }

    /// Drinks whose recipe references the ingredient
    pub fn drinks_using(&self, ingredient_id: &Uuid) -> Vec<&Drink> {
        self.drinks
            .iter()
            .filter(|drink| drink.uses_ingredient(ingredient_id))
            .collect()
    }
}

impl IngredientLookup for Catalog {
    fn find_ingredient(&self, ingredient_id: &Uuid) -> Option<&Ingredient> {
        self.ingredient(ingredient_id)
    }
}
