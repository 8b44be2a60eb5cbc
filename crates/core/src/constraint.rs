//! Weighted placement constraints.
//!
//! A constraint is a pure predicate over `(Bin, Item)` with bound parameters
//! and an integer weight. Collections of constraints are sorted ascending by
//! weight before a placement attempt so that cheap, always-required checks
//! (weight, fit, overlap) run before expensive ones (support, centre of
//! gravity). Evaluation never mutates the bin or the item.
//!
//! # Built-in constraints
//!
//! | Name | Weight | Semantics |
//! |------|--------|-----------|
//! | `weight_within_limit` | 5 | load plus item stays under the ceiling |
//! | `fits_inside_bin` | 10 | item box within the bin interior |
//! | `no_overlap` | 15 | no positive-measure intersection with placed items |
//! | `is_supported` | 20 | floor contact or sufficient resting area |
//! | `maintain_center_of_gravity` | 25 | progressive CoG tolerance |
//!
//! User-defined constraints plug in through [`ConstraintRule`] and the
//! [`Constraint::Custom`] variant.

use crate::bin::Bin;
use crate::item::Item;
use crate::space::{intersect, rect_intersect, Axis};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum ratio of supported base area for `is_supported`.
fn default_minimum_support() -> Decimal {
    Decimal::new(75, 2)
}

/// Parameters of the progressive centre-of-gravity constraint.
///
/// The target centre is `(width/2, depth * depth_bias)` on the X-Z plane;
/// the Z target is shifted toward the back of the bin, where a rear-biased
/// load rides stably in vehicle loading. Tolerances shrink linearly with
/// the load ratio: at an empty bin the full tolerance applies, at the
/// weight ceiling it has shrunk to `tol * (1 - progressive_tightening)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CogParams {
    /// Allowed X deviation as a fraction of the bin width.
    pub tol_x_percent: Decimal,
    /// Allowed Z deviation as a fraction of the bin depth.
    pub tol_z_percent: Decimal,
    /// How much of the tolerance is lost at full load (0 = fixed tolerance).
    pub progressive_tightening: Decimal,
    /// Z target as a fraction of the bin depth.
    pub depth_bias: Decimal,
}

impl Default for CogParams {
    fn default() -> Self {
        Self {
            tol_x_percent: Decimal::new(2, 1),
            tol_z_percent: Decimal::new(2, 1),
            progressive_tightening: Decimal::new(7, 1),
            depth_bias: Decimal::new(4, 1),
        }
    }
}

impl CogParams {
    /// Sets the X tolerance fraction.
    pub fn with_tol_x(mut self, fraction: Decimal) -> Self {
        self.tol_x_percent = fraction;
        self
    }

    /// Sets the Z tolerance fraction.
    pub fn with_tol_z(mut self, fraction: Decimal) -> Self {
        self.tol_z_percent = fraction;
        self
    }

    /// Sets the progressive tightening factor.
    pub fn with_tightening(mut self, factor: Decimal) -> Self {
        self.progressive_tightening = factor;
        self
    }

    /// Sets the Z target fraction.
    pub fn with_depth_bias(mut self, fraction: Decimal) -> Self {
        self.depth_bias = fraction;
        self
    }
}

/// Extension point for user-defined constraints.
pub trait ConstraintRule: Send + Sync {
    /// A stable name for registry and display purposes.
    fn name(&self) -> &str;

    /// Evaluation-order weight (lower runs earlier).
    fn weight(&self) -> i32;

    /// Returns true when the placement is admissible.
    fn evaluate(&self, bin: &Bin, item: &Item) -> bool;
}

/// A weighted placement predicate with bound parameters.
///
/// Parameters are fixed at composition time and stay constant for the
/// duration of a pack.
#[derive(Clone)]
pub enum Constraint {
    /// `bin.weight + item.weight ≤ bin.max_weight`.
    WeightWithinLimit,
    /// The item's box, at its current position, lies within the bin interior.
    FitsInsideBin,
    /// No strictly-positive 3D intersection with any placed item.
    NoOverlap,
    /// The item rests on the floor or on enough contact area.
    IsSupported {
        /// Minimum ratio of supported base area (0.0-1.0).
        minimum_support: Decimal,
    },
    /// Progressive centre-of-gravity discipline.
    MaintainCenterOfGravity(CogParams),
    /// A user-defined rule.
    Custom(Arc<dyn ConstraintRule>),
}

impl Constraint {
    /// The weight-ceiling constraint.
    pub fn weight_within_limit() -> Self {
        Self::WeightWithinLimit
    }

    /// The containment constraint.
    pub fn fits_inside_bin() -> Self {
        Self::FitsInsideBin
    }

    /// The pairwise non-overlap constraint.
    pub fn no_overlap() -> Self {
        Self::NoOverlap
    }

    /// The support constraint with the given minimum ratio, clamped to
    /// `[0, 1]`.
    pub fn is_supported(minimum_support: Decimal) -> Self {
        Self::IsSupported {
            minimum_support: minimum_support.clamp(Decimal::ZERO, Decimal::ONE),
        }
    }

    /// The progressive centre-of-gravity constraint.
    pub fn maintain_center_of_gravity(params: CogParams) -> Self {
        Self::MaintainCenterOfGravity(params)
    }

    /// Returns the registry name of this constraint.
    pub fn name(&self) -> &str {
        match self {
            Self::WeightWithinLimit => "weight_within_limit",
            Self::FitsInsideBin => "fits_inside_bin",
            Self::NoOverlap => "no_overlap",
            Self::IsSupported { .. } => "is_supported",
            Self::MaintainCenterOfGravity(_) => "maintain_center_of_gravity",
            Self::Custom(rule) => rule.name(),
        }
    }

    /// Returns the evaluation-order weight.
    pub fn weight(&self) -> i32 {
        match self {
            Self::WeightWithinLimit => 5,
            Self::FitsInsideBin => 10,
            Self::NoOverlap => 15,
            Self::IsSupported { .. } => 20,
            Self::MaintainCenterOfGravity(_) => 25,
            Self::Custom(rule) => rule.weight(),
        }
    }

    /// Evaluates the constraint against a prospective placement.
    pub fn evaluate(&self, bin: &Bin, item: &Item) -> bool {
        match self {
            Self::WeightWithinLimit => weight_within_limit(bin, item),
            Self::FitsInsideBin => fits_inside_bin(bin, item),
            Self::NoOverlap => no_overlap(bin, item),
            Self::IsSupported { minimum_support } => is_supported(bin, item, *minimum_support),
            Self::MaintainCenterOfGravity(params) => {
                maintain_center_of_gravity(bin, item, params)
            }
            Self::Custom(rule) => rule.evaluate(bin, item),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint {} weight({})", self.name(), self.weight())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint {} weight({})", self.name(), self.weight())
    }
}

fn weight_within_limit(bin: &Bin, item: &Item) -> bool {
    bin.weight() + item.weight() <= bin.max_weight()
}

fn fits_inside_bin(bin: &Bin, item: &Item) -> bool {
    let position = item.position();
    let size = item.volume().size;
    let bin_size = bin.size();
    Axis::ALL.iter().all(|&axis| {
        position[axis] >= Decimal::ZERO && position[axis] + size[axis] <= bin_size[axis]
    })
}

fn no_overlap(bin: &Bin, item: &Item) -> bool {
    bin.items()
        .iter()
        .all(|placed| !intersect(placed.volume(), item.volume()))
}

/// Floor contact always supports. Above the floor, the summed X-Z contact
/// area from items whose top exactly equals the item's bottom must cover at
/// least `minimum_support` of the base area. The equality is exact under
/// the pack's decimal precision; no epsilon is involved.
fn is_supported(bin: &Bin, item: &Item, minimum_support: Decimal) -> bool {
    let bottom = item.position().y;
    if bottom == Decimal::ZERO {
        return true;
    }

    let base_area = item.width() * item.depth();
    if base_area <= Decimal::ZERO {
        return false;
    }

    let mut contact = Decimal::ZERO;
    for placed in bin.items() {
        if placed.top() == bottom {
            contact += rect_intersect(placed.volume(), item.volume(), Axis::X, Axis::Z);
        }
    }

    contact / base_area >= minimum_support
}

/// Progressive centre-of-gravity check.
///
/// The prospective CoG is the current moment (current CoG times current
/// weight) combined with the item's moment, divided by the future weight:
/// an O(1) incremental update that matches [`Bin::center_of_gravity`]
/// recomputed after commit. Within the tolerance window, placements that
/// grow a deviation already past half the effective tolerance are also
/// rejected.
fn maintain_center_of_gravity(bin: &Bin, item: &Item, params: &CogParams) -> bool {
    let future_weight = bin.weight() + item.weight();
    if future_weight == Decimal::ZERO {
        return true;
    }

    let load_ratio = if bin.max_weight() > Decimal::ZERO {
        future_weight / bin.max_weight()
    } else {
        Decimal::ZERO
    };

    // An empty bin contributes a zero moment: its CoG is the geometric
    // centre but its weight is zero.
    let current = bin.center_of_gravity();
    let item_center = item.center();
    let cog_x = (current.x * bin.weight() + item_center.x * item.weight()) / future_weight;
    let cog_z = (current.z * bin.weight() + item_center.z * item.weight()) / future_weight;

    let target_x = bin.width() / Decimal::TWO;
    let target_z = bin.depth() * params.depth_bias;

    let scale = Decimal::ONE - load_ratio * params.progressive_tightening;
    let tol_x = bin.width() * params.tol_x_percent * scale;
    let tol_z = bin.depth() * params.tol_z_percent * scale;

    let dev_x = (cog_x - target_x).abs();
    let dev_z = (cog_z - target_z).abs();
    if dev_x > tol_x || dev_z > tol_z {
        return false;
    }

    if !bin.items().is_empty() {
        let current_dev_x = (current.x - target_x).abs();
        let current_dev_z = (current.z - target_z).abs();
        if current_dev_x > tol_x / Decimal::TWO && dev_x > current_dev_x {
            return false;
        }
        if current_dev_z > tol_z / Decimal::TWO && dev_z > current_dev_z {
            return false;
        }
    }

    true
}

/// Sorts a constraint collection ascending by weight (stable).
pub fn sort_by_weight(constraints: &mut [Constraint]) {
    constraints.sort_by_key(|c| c.weight());
}

static REGISTRY: OnceLock<HashMap<&'static str, Constraint>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, Constraint> {
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert("weight_within_limit", Constraint::weight_within_limit());
        map.insert("fits_inside_bin", Constraint::fits_inside_bin());
        map.insert("no_overlap", Constraint::no_overlap());
        map.insert(
            "is_supported",
            Constraint::is_supported(default_minimum_support()),
        );
        map.insert(
            "maintain_center_of_gravity",
            Constraint::maintain_center_of_gravity(CogParams::default()),
        );
        map
    })
}

/// Looks up a built-in constraint by name, with its default parameters.
pub fn builtin(name: &str) -> Option<Constraint> {
    registry().get(name).cloned()
}

/// The always-required constraint set: weight ceiling, containment, and
/// non-overlap, in weight order.
pub fn base_constraints() -> Vec<Constraint> {
    vec![
        Constraint::weight_within_limit(),
        Constraint::fits_inside_bin(),
        Constraint::no_overlap(),
    ]
}
