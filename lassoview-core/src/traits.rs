//! Bounding volumes and the trait for things that have one

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Degenerate box containing a single point
    pub fn from_point(point: Point3f) -> Self {
        Self { min: point, max: point }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::from_point(first), |mut acc, p| {
            acc.expand(p);
            acc
        }))
    }

    /// Grow the box so it contains `point`
    pub fn expand(&mut self, point: &Point3f) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn corners(&self) -> [Point3f; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3f::new(lo.x, lo.y, lo.z),
            Point3f::new(hi.x, lo.y, lo.z),
            Point3f::new(lo.x, hi.y, lo.z),
            Point3f::new(hi.x, hi.y, lo.z),
            Point3f::new(lo.x, lo.y, hi.z),
            Point3f::new(hi.x, lo.y, hi.z),
            Point3f::new(lo.x, hi.y, hi.z),
            Point3f::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Trait for objects with a local-space bounding box
pub trait Bounded {
    /// Local bounding box, `None` when the object has no extent data
    fn bounding_box(&self) -> Option<Aabb>;

    /// Center of the local bounding box
    fn center(&self) -> Option<Point3f> {
        self.bounding_box().map(|b| b.center())
    }
}
