//! Bin models and loadable bin instances.

use crate::constraint::Constraint;
use crate::decimal::quantize;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::space::Vector3;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A model of bin: named dimensions plus a weight ceiling.
///
/// Models are immutable during a pack apart from the one-time precision
/// normalisation applied by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinModel {
    name: String,
    size: Vector3,
    max_weight: Decimal,
}

impl BinModel {
    /// Creates a new bin model.
    pub fn new(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        depth: Decimal,
        max_weight: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            size: Vector3::new(width, height, depth),
            max_weight,
        }
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dimensions (width, height, depth).
    pub fn size(&self) -> Vector3 {
        self.size
    }

    /// Returns the width (X extent).
    pub fn width(&self) -> Decimal {
        self.size.x
    }

    /// Returns the height (Y extent).
    pub fn height(&self) -> Decimal {
        self.size.y
    }

    /// Returns the depth (Z extent).
    pub fn depth(&self) -> Decimal {
        self.size.z
    }

    /// Returns the weight ceiling.
    pub fn max_weight(&self) -> Decimal {
        self.max_weight
    }

    /// Volumetric capacity.
    pub fn measure(&self) -> Decimal {
        self.size.x * self.size.y * self.size.z
    }

    /// Rounds dimensions and weight ceiling to `decimals` fractional digits.
    pub fn format_numbers(&mut self, decimals: u32) {
        self.size = self.size.quantized(decimals);
        self.max_weight = quantize(self.max_weight, decimals);
    }

    /// Validates the model and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.size.x <= Decimal::ZERO
            || self.size.y <= Decimal::ZERO
            || self.size.z <= Decimal::ZERO
        {
            return Err(Error::InvalidBin(format!(
                "{}: all dimensions must be positive",
                self.name
            )));
        }
        if self.max_weight < Decimal::ZERO {
            return Err(Error::InvalidBin(format!(
                "{}: weight ceiling must be non-negative",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for BinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}x{}x{}, max_weight:{}) vol({})",
            self.name,
            self.width(),
            self.height(),
            self.depth(),
            self.max_weight,
            self.measure()
        )
    }
}

/// A loadable instance of a [`BinModel`].
///
/// The bin owns its placed items and grows monotonically during a pack.
/// [`Bin::put_item`] is the single commit point: constraints are evaluated
/// first, and the bin is left untouched when any of them rejects.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bin {
    id: usize,
    model: BinModel,
    items: Vec<Item>,
    weight: Decimal,
}

impl Bin {
    /// Creates an empty bin with the given identifier and model.
    pub fn new(id: usize, model: BinModel) -> Self {
        Self {
            id,
            model,
            items: Vec::new(),
            weight: Decimal::ZERO,
        }
    }

    /// Returns the bin identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the model.
    pub fn model(&self) -> &BinModel {
        &self.model
    }

    /// Returns the placed items, in placement order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the accumulated weight of the placed items.
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the dimensions of the underlying model.
    pub fn size(&self) -> Vector3 {
        self.model.size()
    }

    /// Returns the width (X extent).
    pub fn width(&self) -> Decimal {
        self.model.width()
    }

    /// Returns the height (Y extent).
    pub fn height(&self) -> Decimal {
        self.model.height()
    }

    /// Returns the depth (Z extent).
    pub fn depth(&self) -> Decimal {
        self.model.depth()
    }

    /// Returns the weight ceiling of the underlying model.
    pub fn max_weight(&self) -> Decimal {
        self.model.max_weight()
    }

    /// Attempts to place an item at its current position and orientation.
    ///
    /// Every constraint is evaluated in the given order (short-circuit AND)
    /// against `(self, item)`. On success the item is appended and its
    /// weight added; on failure the bin is unchanged and the item is handed
    /// back exactly as passed in.
    pub fn put_item(&mut self, item: Item, constraints: &[Constraint]) -> std::result::Result<(), Item> {
        if constraints.iter().all(|c| c.evaluate(self, &item)) {
            self.commit_item(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Appends an item without re-evaluating constraints.
    ///
    /// Callers must have validated the placement beforehand; the scored
    /// selection path commits through here after evaluating every candidate.
    pub fn commit_item(&mut self, item: Item) {
        self.weight += item.weight();
        self.items.push(item);
    }

    /// Removes an item by name, subtracting its weight. Returns the removed
    /// item, or `None` when no item with that name is placed.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|i| i.name() == name)?;
        let item = self.items.remove(index);
        self.weight -= item.weight();
        Some(item)
    }

    /// The centre of gravity of the current load.
    ///
    /// For an empty (or weightless) load this is the geometric centre of the
    /// bin interior. Otherwise it is the mass-weighted mean of the items'
    /// geometric centres, exact in decimals.
    pub fn center_of_gravity(&self) -> Vector3 {
        if self.weight == Decimal::ZERO {
            return Vector3::new(
                self.width() / Decimal::TWO,
                self.height() / Decimal::TWO,
                self.depth() / Decimal::TWO,
            );
        }

        let mut moment = Vector3::ZERO;
        for item in &self.items {
            let center = item.center();
            moment += Vector3::new(
                center.x * item.weight(),
                center.y * item.weight(),
                center.z * item.weight(),
            );
        }

        Vector3::new(
            moment.x / self.weight,
            moment.y / self.weight,
            moment.z / self.weight,
        )
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bin {} of model {}: loaded items {}",
            self.id,
            self.model.name(),
            self.items.len()
        )
    }
}
