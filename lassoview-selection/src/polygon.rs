//! Point-in-polygon containment in normalized device coordinates

use crate::projector::{project_screen_point, Viewport};
use lassoview_core::{NdcPoint, ScreenPoint};

/// Even-odd ray casting test.
///
/// `polygon` is implicitly closed; a repeated closing vertex is harmless. Points that
/// sit exactly on an edge may go either way.
pub fn contains(point: NdcPoint, polygon: &[NdcPoint]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A lasso outline converted to normalized coordinates and closed.
///
/// Immutable for the duration of a resolution pass. The cached bounds let most
/// far-away points skip the edge loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPolygon {
    points: Vec<NdcPoint>,
    min: NdcPoint,
    max: NdcPoint,
}

impl ClosedPolygon {
    /// Minimum number of distinct path points that enclose an area
    pub const MIN_POINTS: usize = 3;

    /// Build a polygon from normalized points, `None` with fewer than three points
    pub fn new(mut points: Vec<NdcPoint>) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }
        let first = points[0];
        if points.last() != Some(&first) {
            points.push(first);
        }

        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (
                NdcPoint::new(lo.x.min(p.x), lo.y.min(p.y)),
                NdcPoint::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(Self { points, min, max })
    }

    /// Convert a pixel-space lasso path using the render surface size
    pub fn from_screen_path(path: &[ScreenPoint], viewport: &Viewport) -> Option<Self> {
        if path.len() < Self::MIN_POINTS {
            return None;
        }
        Self::new(
            path.iter()
                .map(|&p| project_screen_point(p, viewport))
                .collect(),
        )
    }

    /// Vertices including the closing repeat of the first one
    pub fn points(&self) -> &[NdcPoint] {
        &self.points
    }

    pub fn bounds(&self) -> (NdcPoint, NdcPoint) {
        (self.min, self.max)
    }

    pub fn contains(&self, point: NdcPoint) -> bool {
        if point.x < self.min.x
            || point.x > self.max.x
            || point.y < self.min.y
            || point.y > self.max.y
        {
            return false;
        }
        contains(point, &self.points)
    }
}
