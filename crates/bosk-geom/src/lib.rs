//! Integer voxel-space geometry for the placement crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Sub, SubAssign};

/// A cell coordinate (or relative offset) in a discrete 3D grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Pos3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Pos3 {
    pub const ZERO: Pos3 = Pos3 { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Pos3 {
        Pos3 {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    #[inline]
    pub const fn above(self) -> Pos3 {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub const fn below(self) -> Pos3 {
        self.offset(0, -1, 0)
    }

    /// Same column, `n` cells higher (negative `n` goes down).
    #[inline]
    pub const fn up(self, n: i32) -> Pos3 {
        self.offset(0, n, 0)
    }
}

impl Add for Pos3 {
    type Output = Pos3;
    #[inline]
    fn add(self, rhs: Pos3) -> Pos3 {
        Pos3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Pos3 {
    #[inline]
    fn add_assign(&mut self, rhs: Pos3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Pos3 {
    type Output = Pos3;
    #[inline]
    fn sub(self, rhs: Pos3) -> Pos3 {
        Pos3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Pos3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Pos3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

/// An inclusive axis-aligned box of cells.
///
/// A box with any `min` component greater than the matching `max` component
/// is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Bounds {
    pub min: Pos3,
    pub max: Pos3,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Pos3, max: Pos3) -> Self {
        Self { min, max }
    }

    /// The box covering both corners, whichever order they come in.
    pub fn spanning(a: Pos3, b: Pos3) -> Self {
        Self {
            min: Pos3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Pos3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Relative footprint: x and z in `[-half_xz, half_xz]`, y in
    /// `[y_min, y_max]`. Used for clearance scans around an anchor.
    #[inline]
    pub const fn footprint(half_xz: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            min: Pos3::new(-half_xz, y_min, -half_xz),
            max: Pos3::new(half_xz, y_max, half_xz),
        }
    }

    #[inline]
    pub fn contains(&self, p: Pos3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    #[inline]
    pub fn translated(&self, by: Pos3) -> Bounds {
        Bounds {
            min: self.min + by,
            max: self.max + by,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let dx = (self.max.x - self.min.x + 1) as usize;
        let dy = (self.max.y - self.min.y + 1) as usize;
        let dz = (self.max.z - self.min.z + 1) as usize;
        dx * dy * dz
    }

    /// Visit every cell, bottom-to-top (y outermost), then z, then x.
    pub fn cells(&self) -> Cells {
        Cells {
            bounds: *self,
            next: if self.is_empty() { None } else { Some(self.min) },
        }
    }
}

pub struct Cells {
    bounds: Bounds,
    next: Option<Pos3>,
}

impl Iterator for Cells {
    type Item = Pos3;

    fn next(&mut self) -> Option<Pos3> {
        let cur = self.next?;
        let b = self.bounds;
        let mut n = cur;
        n.x += 1;
        if n.x > b.max.x {
            n.x = b.min.x;
            n.z += 1;
            if n.z > b.max.z {
                n.z = b.min.z;
                n.y += 1;
            }
        }
        self.next = if n.y > b.max.y { None } else { Some(n) };
        Some(cur)
    }
}
