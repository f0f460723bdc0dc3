//! Integer lattice directions and their slot indices.
//!
//! - Axis directions (±x, ±y, ±z) index the 6 face slots of cubes and faces.
//! - Neighbour offsets (components in {-1,0,1}, non-zero) index the 27 cube
//!   neighbour slots; index 13 is the zero offset and never used.

use nalgebra::Vector3;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Number of face slots on a cube (one per axis direction).
pub const AXIS_SLOTS: usize = 6;
/// Number of neighbour slots on a cube (3×3×3 block, centre unused).
pub const NEIGHBOR_SLOTS: usize = 27;
/// Slot index of the zero offset in the 3×3×3 block.
pub const CENTER_SLOT: usize = 13;

/// Integer 3-vector used for face directions and cube offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dir3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Dir3 {
    pub const ZERO: Dir3 = Dir3::new(0, 0, 0);
    pub const PX: Dir3 = Dir3::new(1, 0, 0);
    pub const PY: Dir3 = Dir3::new(0, 1, 0);
    pub const PZ: Dir3 = Dir3::new(0, 0, 1);
    pub const MX: Dir3 = Dir3::new(-1, 0, 0);
    pub const MY: Dir3 = Dir3::new(0, -1, 0);
    pub const MZ: Dir3 = Dir3::new(0, 0, -1);

    /// The 6 axis directions in slot order.
    pub const AXES: [Dir3; AXIS_SLOTS] = [
        Dir3::PX,
        Dir3::PY,
        Dir3::PZ,
        Dir3::MX,
        Dir3::MY,
        Dir3::MZ,
    ];

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Dir3::ZERO
    }

    /// True for the 6 unit vectors ±x, ±y, ±z.
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.x.abs() + self.y.abs() + self.z.abs() == 1
    }

    /// True for the 26 non-zero offsets of the 3×3×3 block.
    #[inline]
    pub fn is_neighbor_offset(self) -> bool {
        !self.is_zero()
            && (-1..=1).contains(&self.x)
            && (-1..=1).contains(&self.y)
            && (-1..=1).contains(&self.z)
    }

    #[inline]
    pub fn dot(self, other: Dir3) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Face slot index in `+x,+y,+z,-x,-y,-z` order.
    ///
    /// Panics on a non-axis direction.
    pub fn axis_index(self) -> usize {
        match (self.x, self.y, self.z) {
            (1, 0, 0) => 0,
            (0, 1, 0) => 1,
            (0, 0, 1) => 2,
            (-1, 0, 0) => 3,
            (0, -1, 0) => 4,
            (0, 0, -1) => 5,
            _ => panic!("axis direction required, got {self:?}"),
        }
    }

    /// Inverse of [`Dir3::axis_index`].
    #[inline]
    pub fn from_axis_index(index: usize) -> Dir3 {
        assert!(index < AXIS_SLOTS, "axis index {index} out of range");
        Dir3::AXES[index]
    }

    /// Neighbour slot index `(x+1)*9 + (y+1)*3 + (z+1)`.
    ///
    /// Panics on the zero offset or on components outside {-1,0,1}.
    pub fn neighbor_index(self) -> usize {
        assert!(
            self.is_neighbor_offset(),
            "neighbour offset required, got {self:?}"
        );
        ((self.x + 1) * 9 + (self.y + 1) * 3 + (self.z + 1)) as usize
    }

    /// Inverse of [`Dir3::neighbor_index`].
    pub fn from_neighbor_index(index: usize) -> Dir3 {
        assert!(
            index < NEIGHBOR_SLOTS && index != CENTER_SLOT,
            "neighbour index {index} out of range"
        );
        let i = index as i32;
        Dir3::new(i / 9 - 1, (i / 3) % 3 - 1, i % 3 - 1)
    }

    /// The 4 axis directions orthogonal to `self`, in cyclic order.
    ///
    /// `o[(i+1)%4]` is the next direction around the face and `o[(i+2)%4]` is
    /// `-o[i]`. The order depends only on the axis, not on its sign.
    pub fn orthogonal(self) -> [Dir3; 4] {
        assert!(
            self.is_axis_aligned(),
            "orthogonal() needs an axis direction, got {self:?}"
        );
        if self.x != 0 {
            [Dir3::PY, Dir3::PZ, Dir3::MY, Dir3::MZ]
        } else if self.y != 0 {
            [Dir3::PX, Dir3::PZ, Dir3::MX, Dir3::MZ]
        } else {
            [Dir3::PX, Dir3::PY, Dir3::MX, Dir3::MY]
        }
    }

    /// Short axis label for messages: "x", "-y", ... and "0" for anything else.
    pub fn label(self) -> &'static str {
        match (self.x, self.y, self.z) {
            (1, 0, 0) => "x",
            (-1, 0, 0) => "-x",
            (0, 1, 0) => "y",
            (0, -1, 0) => "-y",
            (0, 0, 1) => "z",
            (0, 0, -1) => "-z",
            _ => "0",
        }
    }

    /// All 26 neighbour offsets in slot order.
    pub fn neighbor_offsets() -> impl Iterator<Item = Dir3> {
        (0..NEIGHBOR_SLOTS)
            .filter(|&i| i != CENTER_SLOT)
            .map(Dir3::from_neighbor_index)
    }
}

impl Add for Dir3 {
    type Output = Dir3;
    #[inline]
    fn add(self, rhs: Dir3) -> Dir3 {
        Dir3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Dir3 {
    type Output = Dir3;
    #[inline]
    fn sub(self, rhs: Dir3) -> Dir3 {
        Dir3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Dir3 {
    type Output = Dir3;
    #[inline]
    fn neg(self) -> Dir3 {
        Dir3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i32> for Dir3 {
    type Output = Dir3;
    #[inline]
    fn mul(self, k: i32) -> Dir3 {
        Dir3::new(self.x * k, self.y * k, self.z * k)
    }
}

impl From<Dir3> for Vector3<i32> {
    #[inline]
    fn from(d: Dir3) -> Self {
        Vector3::new(d.x, d.y, d.z)
    }
}

impl fmt::Display for Dir3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
