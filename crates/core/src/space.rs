//! Geometry primitives for axis-aligned decimal space.
//!
//! The packing space uses a fixed axes convention: X is width (left-right),
//! Y is height (vertical), Z is depth (front-back). Positions are the
//! bottom-left-front corner of a box. Rotations are 90° multiples only,
//! expressed as component swaps of a size vector.

use crate::decimal::quantize;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named axes of the packing space, with stable indices 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Width (left-right).
    X = 0,
    /// Height (vertical).
    Y = 1,
    /// Depth (front-back).
    Z = 2,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the numeric index of this axis.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A point or extent in 3D decimal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    /// Component along [`Axis::X`].
    pub x: Decimal,
    /// Component along [`Axis::Y`].
    pub y: Decimal,
    /// Component along [`Axis::Z`].
    pub z: Decimal,
}

impl Vector3 {
    /// The origin.
    pub const ZERO: Vector3 = Vector3 {
        x: Decimal::ZERO,
        y: Decimal::ZERO,
        z: Decimal::ZERO,
    };

    /// Creates a new vector from its components.
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self { x, y, z }
    }

    /// Rotates the vector by 90° multiples, interpreting the components as a
    /// size. A horizontal rotation (about Y) swaps components 0 and 2; a
    /// vertical rotation (about X) swaps components 1 and 2. When both flags
    /// are set the horizontal swap is applied first.
    pub fn rotate90(&mut self, horizontal: bool, vertical: bool) {
        if horizontal {
            std::mem::swap(&mut self.x, &mut self.z);
        }
        if vertical {
            std::mem::swap(&mut self.y, &mut self.z);
        }
    }

    /// Returns the vector with every component rounded to `decimals` digits.
    pub fn quantized(&self, decimals: u32) -> Vector3 {
        Vector3::new(
            quantize(self.x, decimals),
            quantize(self.y, decimals),
            quantize(self.z, decimals),
        )
    }
}

impl Index<Axis> for Vector3 {
    type Output = Decimal;

    fn index(&self, axis: Axis) -> &Decimal {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for Vector3 {
    fn index_mut(&mut self, axis: Axis) -> &mut Decimal {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl Index<usize> for Vector3 {
    type Output = Decimal;

    fn index(&self, index: usize) -> &Decimal {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut Decimal {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("axis index out of range: {index}"),
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-aligned box: bottom-left-front corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Volume {
    /// Bottom-left-front corner.
    pub position: Vector3,
    /// Extent along each axis.
    pub size: Vector3,
}

impl Volume {
    /// Creates a volume of the given size at the origin.
    pub fn new(size: Vector3) -> Self {
        Self {
            position: Vector3::ZERO,
            size,
        }
    }

    /// Sets the position.
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Volumetric occupation (product of the size components).
    pub fn measure(&self) -> Decimal {
        self.size.x * self.size.y * self.size.z
    }

    /// The Y coordinate of the top face.
    pub fn top(&self) -> Decimal {
        self.position.y + self.size.y
    }

    /// Rotates the box by 90° multiples. Only the size is affected; the
    /// position stays put.
    pub fn rotate90(&mut self, horizontal: bool, vertical: bool) {
        self.size.rotate90(horizontal, vertical);
    }
}

/// Overlap area of two volumes projected on the plane spanned by axes
/// `u` and `v`. Computed from centre distances and summed half-extents;
/// zero when the projections are separated (or merely touching) on either
/// axis.
pub fn rect_intersect(a: &Volume, b: &Volume, u: Axis, v: Axis) -> Decimal {
    let cu_a = a.position[u] + a.size[u] / Decimal::TWO;
    let cv_a = a.position[v] + a.size[v] / Decimal::TWO;
    let cu_b = b.position[u] + b.size[u] / Decimal::TWO;
    let cv_b = b.position[v] + b.size[v] / Decimal::TWO;

    let du = (cu_b - cu_a).abs();
    let dv = (cv_b - cv_a).abs();

    let overlap_u = ((a.size[u] + b.size[u]) / Decimal::TWO - du).max(Decimal::ZERO);
    let overlap_v = ((a.size[v] + b.size[v]) / Decimal::TWO - dv).max(Decimal::ZERO);

    overlap_u * overlap_v
}

/// Returns true iff the two volumes overlap with strictly positive measure
/// on all three axis pairs. Touching faces are not intersection.
pub fn intersect(a: &Volume, b: &Volume) -> bool {
    rect_intersect(a, b, Axis::X, Axis::Y) > Decimal::ZERO
        && rect_intersect(a, b, Axis::Y, Axis::Z) > Decimal::ZERO
        && rect_intersect(a, b, Axis::X, Axis::Z) > Decimal::ZERO
}
