//! Fleet driver for multi-bin packing.
//!
//! The driver owns the fleet, the batch, and the resulting configuration.
//! A pack normalises every decimal once, sorts fleet and batch by volume,
//! then repeatedly allocates a bin (from the fleet front, falling back to
//! the default model) and runs the chosen strategy over the pending items.
//! Items the strategy rejects become the pending list for the next bin;
//! the pack stops when a freshly allocated bin accepts nothing.

use crate::greedy::GreedyPlacer;
use crate::multi_anchor::{MultiAnchorPlacer, DEFAULT_COMPACT_WEIGHT, DEFAULT_HEIGHT_WEIGHT};
use crate::strategy::PlacementStrategy;
use rust_decimal::Decimal;
use stowage_core::decimal::{DEFAULT_DECIMALS, MAX_DECIMALS};
use stowage_core::{sort_by_weight, Bin, BinModel, Constraint, Error, Item, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packing strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Greedy corner-point placement (fast, corner-biased).
    #[default]
    Greedy,
    /// Multi-anchor scored placement (slower, balanced).
    MultiAnchor,
}

/// Configuration for a pack run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackConfig {
    /// Placement strategy.
    pub strategy: Strategy,

    /// Sort fleet and batch by volume descending (largest first).
    pub bigger_first: bool,

    /// Respect item priorities (reserved; not consumed by the current
    /// strategies).
    pub follow_priority: bool,

    /// Fractional digits for decimal normalisation at pack start.
    pub number_of_decimals: u32,

    /// Scoring weight for placement height (multi-anchor only).
    pub height_weight: f64,

    /// Scoring weight for compactness (multi-anchor only).
    pub compact_weight: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            bigger_first: true,
            follow_priority: true,
            number_of_decimals: DEFAULT_DECIMALS,
            height_weight: DEFAULT_HEIGHT_WEIGHT,
            compact_weight: DEFAULT_COMPACT_WEIGHT,
        }
    }
}

impl PackConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placement strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets whether larger bins and items are handled first.
    pub fn with_bigger_first(mut self, bigger_first: bool) -> Self {
        self.bigger_first = bigger_first;
        self
    }

    /// Sets the decimal precision.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.number_of_decimals = decimals;
        self
    }

    /// Sets the height scoring weight.
    pub fn with_height_weight(mut self, weight: f64) -> Self {
        self.height_weight = weight;
        self
    }

    /// Sets the compactness scoring weight.
    pub fn with_compact_weight(mut self, weight: f64) -> Self {
        self.compact_weight = weight;
        self
    }
}

/// Aggregate load statistics over a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackStats {
    /// Total volume of the placed items.
    pub loaded_volume: Decimal,
    /// Total weight of the placed items.
    pub loaded_weight: Decimal,
    /// `loaded_volume` over the summed capacity of the used bins
    /// (zero when no bins are used).
    pub average_volume: Decimal,
}

/// Stores a fleet and a batch and executes the 3D bin packing algorithms.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    default_bin: Option<BinModel>,
    fleet: Vec<BinModel>,
    items: Vec<Item>,
    configuration: Vec<Bin>,
    unfitted: Vec<Item>,
}

impl Packer {
    /// Creates an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback model used when the fleet is exhausted.
    pub fn set_default_bin(&mut self, model: BinModel) {
        self.default_bin = Some(model);
    }

    /// Appends a single model to the fleet.
    pub fn add_bin(&mut self, model: BinModel) {
        self.fleet.push(model);
    }

    /// Appends models to the fleet.
    pub fn add_fleet(&mut self, fleet: Vec<BinModel>) {
        self.fleet.extend(fleet);
    }

    /// Appends items to the batch.
    pub fn add_batch(&mut self, batch: Vec<Item>) {
        self.items.extend(batch);
    }

    /// Discards the current configuration and unfitted set.
    pub fn clear_configuration(&mut self) {
        self.configuration.clear();
        self.unfitted.clear();
    }

    /// The bins produced by the last pack, in allocation order.
    pub fn configuration(&self) -> &[Bin] {
        &self.configuration
    }

    /// Items the last pack could not place in any allocated bin.
    pub fn unfitted(&self) -> &[Item] {
        &self.unfitted
    }

    /// The pending batch (drained by [`Packer::pack`]).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Executes the pack over the stored fleet and batch.
    ///
    /// Consumes the batch: every input item ends up either placed in a
    /// configuration bin or in the unfitted set. Fleet models are consumed
    /// front-first as bins are allocated; unused models stay in the fleet.
    pub fn pack(&mut self, constraints: &[Constraint], config: &PackConfig) -> Result<()> {
        if config.number_of_decimals > MAX_DECIMALS {
            return Err(Error::ConfigError(format!(
                "number_of_decimals must be at most {MAX_DECIMALS}"
            )));
        }

        let decimals = config.number_of_decimals;
        for model in &mut self.fleet {
            model.validate()?;
            model.format_numbers(decimals);
        }
        if let Some(model) = &mut self.default_bin {
            model.validate()?;
            model.format_numbers(decimals);
        }
        for item in &mut self.items {
            item.validate()?;
            item.format_numbers(decimals);
        }

        if config.bigger_first {
            self.fleet.sort_by(|a, b| b.measure().cmp(&a.measure()));
            self.items.sort_by(|a, b| b.measure().cmp(&a.measure()));
        } else {
            self.fleet.sort_by(|a, b| a.measure().cmp(&b.measure()));
            self.items.sort_by(|a, b| a.measure().cmp(&b.measure()));
        }

        let mut active: Vec<Constraint> = constraints.to_vec();
        sort_by_weight(&mut active);

        let strategy: Box<dyn PlacementStrategy> = match config.strategy {
            Strategy::Greedy => Box::new(GreedyPlacer::new()),
            Strategy::MultiAnchor => Box::new(
                MultiAnchorPlacer::new()
                    .with_height_weight(config.height_weight)
                    .with_compact_weight(config.compact_weight),
            ),
        };

        self.configuration.clear();
        self.unfitted.clear();
        let mut pending: Vec<Item> = self.items.drain(..).collect();

        while !pending.is_empty() {
            let model = if !self.fleet.is_empty() {
                self.fleet.remove(0)
            } else if let Some(model) = self.default_bin.clone() {
                model
            } else {
                log::debug!("fleet exhausted with {} items pending", pending.len());
                self.unfitted.append(&mut pending);
                break;
            };

            let mut bin = Bin::new(self.configuration.len(), model);
            let mut rejected = Vec::new();
            for item in pending {
                match strategy.place(&mut bin, item, &active) {
                    Ok(()) => {}
                    Err(item) => rejected.push(item),
                }
            }

            if bin.items().is_empty() {
                // A fresh bin that accepts nothing means further bins of the
                // same model would accept nothing either.
                log::debug!(
                    "bin {} of model {} accepted no items; stopping",
                    bin.id(),
                    bin.model().name()
                );
                self.unfitted = rejected;
                break;
            }

            log::debug!(
                "bin {}: placed {} items, weight {}",
                bin.id(),
                bin.items().len(),
                bin.weight()
            );
            pending = rejected;
            self.configuration.push(bin);
        }

        Ok(())
    }

    /// Aggregate statistics over the current configuration.
    pub fn statistics(&self) -> PackStats {
        let mut loaded_volume = Decimal::ZERO;
        let mut loaded_weight = Decimal::ZERO;
        let mut capacity = Decimal::ZERO;

        for bin in &self.configuration {
            for item in bin.items() {
                loaded_volume += item.measure();
            }
            loaded_weight += bin.weight();
            capacity += bin.model().measure();
        }

        let average_volume = if capacity > Decimal::ZERO {
            loaded_volume / capacity
        } else {
            Decimal::ZERO
        };

        PackStats {
            loaded_volume,
            loaded_weight,
            average_volume,
        }
    }

    /// Test-packs the full batch greedily into one trial bin per candidate
    /// model, without consuming the fleet or the batch. Useful for sizing a
    /// fleet before committing to a pack.
    pub fn trial_on_models(&self, models: &[BinModel], constraints: &[Constraint]) -> Vec<Bin> {
        let mut active: Vec<Constraint> = constraints.to_vec();
        sort_by_weight(&mut active);
        let placer = GreedyPlacer::new();

        models
            .iter()
            .map(|model| {
                let mut bin = Bin::new(0, model.clone());
                for item in &self.items {
                    let _ = placer.place(&mut bin, item.clone(), &active);
                }
                bin
            })
            .collect()
    }
}
