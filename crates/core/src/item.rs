//! Items to be packed.

use crate::decimal::quantize;
use crate::error::{Error, Result};
use crate::space::{Vector3, Volume};
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular item with a weight and a reserved priority.
///
/// The owned [`Volume`] is canonical for both position and size. Strategies
/// move and rotate an item while trialling placements and restore it to its
/// pre-trial state when no candidate is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    name: String,
    volume: Volume,
    weight: Decimal,
    priority: i32,
}

impl Item {
    /// Creates a new item with the given dimensions and weight, positioned
    /// at the origin.
    pub fn new(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        depth: Decimal,
        weight: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            volume: Volume::new(Vector3::new(width, height, depth)),
            weight,
            priority: 0,
        }
    }

    /// Sets the placement priority (reserved; not consumed by the current
    /// strategies).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bounding box.
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Returns the bounding box for trial mutation.
    pub fn volume_mut(&mut self) -> &mut Volume {
        &mut self.volume
    }

    /// Returns the width (X extent) at the current orientation.
    pub fn width(&self) -> Decimal {
        self.volume.size.x
    }

    /// Returns the height (Y extent) at the current orientation.
    pub fn height(&self) -> Decimal {
        self.volume.size.y
    }

    /// Returns the depth (Z extent) at the current orientation.
    pub fn depth(&self) -> Decimal {
        self.volume.size.z
    }

    /// Returns the weight.
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the bottom-left-front corner.
    pub fn position(&self) -> Vector3 {
        self.volume.position
    }

    /// Moves the item to the given bottom-left-front corner.
    pub fn set_position(&mut self, position: Vector3) {
        self.volume.position = position;
    }

    /// The Y coordinate of the item's top face.
    pub fn top(&self) -> Decimal {
        self.volume.top()
    }

    /// The geometric centre of the item.
    pub fn center(&self) -> Vector3 {
        Vector3::new(
            self.volume.position.x + self.volume.size.x / Decimal::TWO,
            self.volume.position.y + self.volume.size.y / Decimal::TWO,
            self.volume.position.z + self.volume.size.z / Decimal::TWO,
        )
    }

    /// Volumetric occupation.
    pub fn measure(&self) -> Decimal {
        self.volume.measure()
    }

    /// Rotates the item by 90° multiples (size only).
    pub fn rotate90(&mut self, horizontal: bool, vertical: bool) {
        self.volume.rotate90(horizontal, vertical);
    }

    /// Rounds size, position, and weight to `decimals` fractional digits.
    pub fn format_numbers(&mut self, decimals: u32) {
        self.volume.size = self.volume.size.quantized(decimals);
        self.volume.position = self.volume.position.quantized(decimals);
        self.weight = quantize(self.weight, decimals);
    }

    /// Validates the item and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.volume.size.x <= Decimal::ZERO
            || self.volume.size.y <= Decimal::ZERO
            || self.volume.size.z <= Decimal::ZERO
        {
            return Err(Error::InvalidItem(format!(
                "{}: all dimensions must be positive",
                self.name
            )));
        }
        if self.weight < Decimal::ZERO {
            return Err(Error::InvalidItem(format!(
                "{}: weight must be non-negative",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}x{}x{}, weight:{})",
            self.name,
            self.width(),
            self.height(),
            self.depth(),
            self.weight
        )
    }
}
