//! Multi-anchor scored placement.
//!
//! The greedy corner-point placer accepts the first feasible position it
//! finds. Because candidates are generated from already-placed items in
//! insertion order, it drifts toward the left-front-bottom corner of the
//! bin; with a centre-of-gravity constraint active that drift causes many
//! rejections and poor utilisation. This placer decouples candidate
//! generation from selection:
//!
//! 1. X-Z anchors come from several sources: the floor corners, the floor
//!    centre, item-adjacent offsets, and wall-mirrored reflections of every
//!    anchor so both halves of the bin are explored equally.
//! 2. Each anchor gets a Y-surface scan over the resting levels under the
//!    current footprint.
//! 3. Every feasible (orientation, anchor, y) triple is evaluated against
//!    all constraints without committing, then scored: low placements and
//!    tight packing score better. Balance itself is not scored; the
//!    centre-of-gravity constraint, when present, filters candidates and
//!    this placer's job is to offer it enough diverse ones.
//! 4. Only the best-scoring triple is committed.

use crate::strategy::PlacementStrategy;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use stowage_core::{rect_intersect, Axis, Bin, Constraint, Item, Vector3};

/// Default scoring weight for placement height.
pub const DEFAULT_HEIGHT_WEIGHT: f64 = 0.3;

/// Default scoring weight for compactness.
pub const DEFAULT_COMPACT_WEIGHT: f64 = 0.2;

/// Anchor-set placer: evaluates every feasible candidate and commits the
/// best-scoring one. Scores are plain floats; they are only ever compared
/// against each other, and on ties the first candidate seen wins.
#[derive(Debug, Clone, Copy)]
pub struct MultiAnchorPlacer {
    height_weight: f64,
    compact_weight: f64,
}

impl Default for MultiAnchorPlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiAnchorPlacer {
    /// Creates a placer with the default scoring weights.
    pub fn new() -> Self {
        Self {
            height_weight: DEFAULT_HEIGHT_WEIGHT,
            compact_weight: DEFAULT_COMPACT_WEIGHT,
        }
    }

    /// Sets the height penalty weight.
    pub fn with_height_weight(mut self, weight: f64) -> Self {
        self.height_weight = weight;
        self
    }

    /// Sets the compactness weight.
    pub fn with_compact_weight(mut self, weight: f64) -> Self {
        self.compact_weight = weight;
        self
    }

    /// Candidate (x, z) positions for the item's bottom-left-front corner
    /// at its current orientation. Deduplicated and iterated in sorted
    /// order, so a pack replays identically.
    fn xz_anchors(bin: &Bin, item: &Item) -> BTreeSet<(Decimal, Decimal)> {
        let width = item.width();
        let depth = item.depth();
        let mut anchors: BTreeSet<(Decimal, Decimal)> = BTreeSet::new();

        // Floor corners.
        anchors.insert((Decimal::ZERO, Decimal::ZERO));
        let right_x = bin.width() - width;
        let back_z = bin.depth() - depth;
        if right_x >= Decimal::ZERO {
            anchors.insert((right_x, Decimal::ZERO));
        }
        if back_z >= Decimal::ZERO {
            anchors.insert((Decimal::ZERO, back_z));
        }
        if right_x >= Decimal::ZERO && back_z >= Decimal::ZERO {
            anchors.insert((right_x, back_z));
            // Floor centre.
            anchors.insert((right_x / Decimal::TWO, back_z / Decimal::TWO));
        }

        // Item-adjacent positions.
        for placed in bin.items() {
            let px = placed.position().x;
            let pz = placed.position().z;
            anchors.insert((px + placed.width(), pz));
            anchors.insert((px, pz + placed.depth()));
            anchors.insert((px + placed.width(), pz + placed.depth()));
            let left_x = px - width;
            if left_x >= Decimal::ZERO {
                anchors.insert((left_x, pz));
            }
            let front_z = pz - depth;
            if front_z >= Decimal::ZERO {
                anchors.insert((px, front_z));
            }
        }

        // Wall-mirrored reflections of everything collected so far.
        let snapshot: Vec<(Decimal, Decimal)> = anchors.iter().copied().collect();
        for (ax, az) in snapshot {
            let mirror_x = bin.width() - width - ax;
            let mirror_z = bin.depth() - depth - az;
            if mirror_x >= Decimal::ZERO {
                anchors.insert((mirror_x, az));
            }
            if mirror_z >= Decimal::ZERO {
                anchors.insert((ax, mirror_z));
            }
            if mirror_x >= Decimal::ZERO && mirror_z >= Decimal::ZERO {
                anchors.insert((mirror_x, mirror_z));
            }
        }

        anchors.retain(|&(x, z)| {
            x >= Decimal::ZERO
                && z >= Decimal::ZERO
                && x + width <= bin.width()
                && z + depth <= bin.depth()
        });
        anchors
    }

    /// Resting levels at the given footprint, highest first: the floor plus
    /// the top of every placed item that overlaps the footprint with
    /// positive area and leaves vertical headroom for the item.
    fn surface_candidates(bin: &Bin, item: &mut Item, x: Decimal, z: Decimal) -> Vec<Decimal> {
        item.set_position(Vector3::new(x, Decimal::ZERO, z));
        let mut levels: BTreeSet<Decimal> = BTreeSet::new();
        levels.insert(Decimal::ZERO);
        for placed in bin.items() {
            let top = placed.top();
            if top + item.height() <= bin.height()
                && rect_intersect(placed.volume(), item.volume(), Axis::X, Axis::Z)
                    > Decimal::ZERO
            {
                levels.insert(top);
            }
        }
        levels.into_iter().rev().collect()
    }

    /// Scores a candidate placement; lower is better. Height is normalised
    /// by the bin height, compactness by the minimum L1 distance to any
    /// placed item over the bin's summed dimensions. An empty bin scores
    /// height only.
    fn score(&self, bin: &Bin, position: Vector3) -> f64 {
        let height = decimal_ratio(position.y, bin.height());
        let mut score = self.height_weight * height;

        if !bin.items().is_empty() {
            let norm = bin.width() + bin.height() + bin.depth();
            let min_distance = bin
                .items()
                .iter()
                .map(|placed| {
                    let other = placed.position();
                    (position.x - other.x).abs()
                        + (position.y - other.y).abs()
                        + (position.z - other.z).abs()
                })
                .min()
                .unwrap_or(Decimal::ZERO);
            score += self.compact_weight * decimal_ratio(min_distance, norm);
        }

        score
    }
}

fn decimal_ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    let n = numerator.to_f64().unwrap_or_default();
    let d = denominator.to_f64().unwrap_or_default();
    if d == 0.0 {
        0.0
    } else {
        n / d
    }
}

impl PlacementStrategy for MultiAnchorPlacer {
    fn place(
        &self,
        bin: &mut Bin,
        mut item: Item,
        constraints: &[Constraint],
    ) -> Result<(), Item> {
        let original_position = item.position();
        let original_size = item.volume().size;

        let mut best: Option<(f64, Vector3, Vector3)> = None;

        for _ in 0..2 {
            for _ in 0..2 {
                // Anchors depend on the footprint, so regenerate per
                // orientation.
                let anchors = Self::xz_anchors(bin, &item);

                for (anchor_x, anchor_z) in anchors {
                    for y in Self::surface_candidates(bin, &mut item, anchor_x, anchor_z) {
                        item.set_position(Vector3::new(anchor_x, y, anchor_z));

                        if constraints.iter().all(|c| c.evaluate(bin, &item)) {
                            let score = self.score(bin, item.position());
                            let improved = match best {
                                None => true,
                                Some((best_score, _, _)) => score < best_score,
                            };
                            if improved {
                                best = Some((score, item.position(), item.volume().size));
                            }
                        }
                    }
                }

                item.rotate90(false, true);
            }
            item.rotate90(true, false);
        }

        match best {
            Some((_, position, size)) => {
                item.volume_mut().size = size;
                item.set_position(position);
                // Constraints were satisfied during evaluation and have no
                // side effects, so commit without re-checking.
                bin.commit_item(item);
                Ok(())
            }
            None => {
                item.set_position(original_position);
                item.volume_mut().size = original_size;
                Err(item)
            }
        }
    }
}
