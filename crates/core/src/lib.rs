//! # Stowage Core
//!
//! Core geometry, entities, and constraint framework for the Stowage 3D bin
//! packing engine.
//!
//! This crate provides the foundational types shared by every placement
//! strategy: fixed-precision decimal geometry, the [`Item`] / [`BinModel`] /
//! [`Bin`] entities, and the weighted [`Constraint`] framework with its
//! built-in registry.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Vector3`], [`Volume`], [`rect_intersect`], [`intersect`]
//! - **Entities**: [`Item`], [`BinModel`], [`Bin`]
//! - **Constraints**: [`Constraint`], [`ConstraintRule`], [`builtin`],
//!   [`base_constraints`]
//!
//! ## Fixed precision
//!
//! Every dimension, weight, position, and moment is a
//! [`rust_decimal::Decimal`], normalised once per pack to a configurable
//! number of fractional digits (default [`DEFAULT_DECIMALS`]). Support
//! ratios and centre-of-gravity tolerances therefore compare exactly and a
//! pack reproduces bit-for-bit across platforms.
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use stowage_core::{base_constraints, Bin, BinModel, Item};
//!
//! let model = BinModel::new(
//!     "van",
//!     Decimal::from(10),
//!     Decimal::from(10),
//!     Decimal::from(10),
//!     Decimal::from(100),
//! );
//! let mut bin = Bin::new(0, model);
//! let item = Item::new(
//!     "crate",
//!     Decimal::from(5),
//!     Decimal::from(5),
//!     Decimal::from(5),
//!     Decimal::from(10),
//! );
//! assert!(bin.put_item(item, &base_constraints()).is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod bin;
pub mod constraint;
pub mod decimal;
pub mod error;
pub mod item;
pub mod space;

// Re-exports
pub use bin::{Bin, BinModel};
pub use constraint::{
    base_constraints, builtin, sort_by_weight, CogParams, Constraint, ConstraintRule,
};
pub use decimal::{quantize, DEFAULT_DECIMALS, MAX_DECIMALS};
pub use error::{Error, Result};
pub use item::Item;
pub use space::{intersect, rect_intersect, Axis, Vector3, Volume};
