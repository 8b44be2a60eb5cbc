//! Greedy corner-point placement.
//!
//! Candidate positions are generated by offsetting from every already-placed
//! item along each axis; each candidate is tried in all four 90° orientations
//! across the available resting surfaces, and the first placement the
//! constraints accept is committed. Fast, but biased toward the
//! left-front-bottom corner of the bin (see the multi-anchor strategy for
//! the balanced alternative).

use crate::strategy::PlacementStrategy;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use stowage_core::{rect_intersect, Axis, Bin, Constraint, Item, Vector3};

/// Corner-point placer: first accepted candidate wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPlacer;

impl GreedyPlacer {
    /// Creates a new greedy placer.
    pub fn new() -> Self {
        Self
    }

    /// Resting surfaces under the item's current footprint: the floor plus
    /// the top of every placed item that overlaps the footprint with
    /// positive area. Highest first, so stacking is preferred.
    fn surface_candidates(bin: &Bin, item: &Item) -> Vec<Decimal> {
        let mut levels: BTreeSet<Decimal> = BTreeSet::new();
        levels.insert(Decimal::ZERO);
        for placed in bin.items() {
            if rect_intersect(placed.volume(), item.volume(), Axis::X, Axis::Z) > Decimal::ZERO {
                levels.insert(placed.top());
            }
        }
        levels.into_iter().rev().collect()
    }
}

impl PlacementStrategy for GreedyPlacer {
    fn place(
        &self,
        bin: &mut Bin,
        mut item: Item,
        constraints: &[Constraint],
    ) -> Result<(), Item> {
        let original_position = item.position();
        let original_size = item.volume().size;

        // The first item of an empty bin skips corner-point generation and
        // is tried at the origin only.
        if bin.items().is_empty() {
            item.set_position(Vector3::ZERO);
            return bin.put_item(item, constraints).map_err(|mut item| {
                item.set_position(original_position);
                item
            });
        }

        let pivots: Vec<(Vector3, Vector3)> = bin
            .items()
            .iter()
            .map(|placed| (placed.position(), placed.volume().size))
            .collect();

        for (pivot_position, pivot_size) in pivots {
            for axis in Axis::ALL {
                let mut anchor = pivot_position;
                anchor[axis] += pivot_size[axis];

                for _ in 0..2 {
                    for _ in 0..2 {
                        item.set_position(Vector3::new(anchor.x, Decimal::ZERO, anchor.z));
                        let levels = if axis == Axis::Y {
                            // Stacking on top of the pivot: Y is fixed.
                            vec![anchor.y]
                        } else {
                            Self::surface_candidates(bin, &item)
                        };

                        for y in levels {
                            item.set_position(Vector3::new(anchor.x, y, anchor.z));
                            match bin.put_item(item, constraints) {
                                Ok(()) => return Ok(()),
                                Err(rejected) => item = rejected,
                            }
                        }

                        item.rotate90(false, true);
                    }
                    item.rotate90(true, false);
                }
            }
        }

        item.set_position(original_position);
        item.volume_mut().size = original_size;
        Err(item)
    }
}
