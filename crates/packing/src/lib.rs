//! # Stowage Packing
//!
//! Placement strategies and fleet driver for the Stowage 3D bin packing
//! engine.
//!
//! This crate turns a batch of items and a fleet of bin models into a
//! configuration of loaded bins, trialling positions and 90° orientations
//! against the constraint framework from `stowage_core`.
//!
//! ## Strategies
//!
//! | Strategy | Speed | Quality | Description |
//! |----------|-------|---------|-------------|
//! | [`GreedyPlacer`] | Fast | Basic | First-fit corner-point placement |
//! | [`MultiAnchorPlacer`] | Medium | Balanced | Best-of-all-anchors scored placement |
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use stowage_packing::{base_constraints, BinModel, Item, PackConfig, Packer};
//!
//! let mut packer = Packer::new();
//! packer.set_default_bin(BinModel::new(
//!     "van",
//!     Decimal::from(10),
//!     Decimal::from(10),
//!     Decimal::from(10),
//!     Decimal::from(100),
//! ));
//! packer.add_batch(vec![Item::new(
//!     "crate",
//!     Decimal::from(5),
//!     Decimal::from(5),
//!     Decimal::from(5),
//!     Decimal::from(10),
//! )]);
//! packer.pack(&base_constraints(), &PackConfig::default()).unwrap();
//! assert_eq!(packer.configuration().len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod greedy;
pub mod multi_anchor;
pub mod packer;
pub mod strategy;

// Re-exports
pub use greedy::GreedyPlacer;
pub use multi_anchor::{MultiAnchorPlacer, DEFAULT_COMPACT_WEIGHT, DEFAULT_HEIGHT_WEIGHT};
pub use packer::{PackConfig, PackStats, Packer, Strategy};
pub use strategy::PlacementStrategy;
pub use stowage_core::{
    base_constraints, builtin, Bin, BinModel, CogParams, Constraint, ConstraintRule, Error, Item,
    Result, Vector3, Volume,
};
