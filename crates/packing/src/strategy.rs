//! Placement strategy seam.

use stowage_core::{Bin, Constraint, Item};

/// A single-item placement strategy.
///
/// Implementations trial candidate positions and orientations against the
/// constraint set and commit at most one placement into the bin.
pub trait PlacementStrategy {
    /// Attempts to place `item` into `bin` under `constraints`.
    ///
    /// On success the item has been committed into the bin. On failure the
    /// item is handed back with its position and size equal to their
    /// pre-attempt values, and the bin is unchanged.
    fn place(
        &self,
        bin: &mut Bin,
        item: Item,
        constraints: &[Constraint],
    ) -> Result<(), Item>;
}
