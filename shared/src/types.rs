//! Common types used across the engine

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sum that clamps at the edge of the decimal range instead of panicking
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Quotient clamped to the decimal range. Dividing by zero yields zero.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// Guest composition of an event or simulation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GuestCount {
    pub adults: u32,
    pub children: u32,
}

impl GuestCount {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Quantity used per ingredient, each in that ingredient's own unit
///
/// Adding to an ingredient that is already present sums the quantities, so
/// maps projected for several drinks can be merged into one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UsageMap(BTreeMap<Uuid, Decimal>);

impl UsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ingredient_id: Uuid, quantity: Decimal) {
        let entry = self.0.entry(ingredient_id).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(quantity);
    }

    pub fn merge(&mut self, other: &UsageMap) {
        for (ingredient_id, quantity) in other.iter() {
            self.add(*ingredient_id, *quantity);
        }
    }

    /// Quantity for an ingredient, zero when absent
    pub fn get(&self, ingredient_id: &Uuid) -> Decimal {
        self.0.get(ingredient_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, ingredient_id: &Uuid) -> bool {
        self.0.contains_key(ingredient_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &Decimal)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Uuid, Decimal)> for UsageMap {
    fn from_iter<I: IntoIterator<Item = (Uuid, Decimal)>>(iter: I) -> Self {
        let mut usage = UsageMap::new();
        for (ingredient_id, quantity) in iter {
            usage.add(ingredient_id, quantity);
        }
        usage
    }
}

impl<'a> IntoIterator for &'a UsageMap {
    type Item = (&'a Uuid, &'a Decimal);
    type IntoIter = std::collections::btree_map::Iter<'a, Uuid, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
