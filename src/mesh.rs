//! Delaunay mesh derivation over the boundary rectangle plus the collected
//! points. The triangulation itself is `delaunator`; this module owns the
//! seam so the renderer can be exercised with deterministic fakes.

use crate::model::{boundary_corners, CanvasSize, Point};

pub type Triangle = [usize; 3];

/// Narrow triangulation capability. `None` means the input was degenerate
/// (fewer than three usable points, non-finite coordinates, or an empty
/// triangle list, e.g. all points collinear) and the caller should keep its
/// previous mesh.
pub trait Triangulator {
    fn triangulate(&self, points: &[Point]) -> Option<Vec<Triangle>>;
}

/// The triangulation input: boundary corners first, then every collected
/// point in insertion order.
pub fn mesh_points(canvas: CanvasSize, dots: &[Point]) -> Vec<Point> {
    let mut points = boundary_corners(canvas).to_vec();
    points.extend_from_slice(dots);
    points
}

pub struct DelaunayMesher;

impl Triangulator for DelaunayMesher {
    fn triangulate(&self, points: &[Point]) -> Option<Vec<Triangle>> {
        if points.len() < 3 {
            return None;
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return None;
        }
        let input: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let result = delaunator::triangulate(&input);
        if result.triangles.is_empty() {
            return None;
        }
        Some(
            result
                .triangles
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
        )
    }
}

/// Last successfully derived mesh, kept so a degenerate retriangulation can
/// fall back to the previous frame's triangles.
#[derive(Default)]
pub struct MeshCache {
    pub points: Vec<Point>,
    pub triangles: Vec<Triangle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasSize {
        CanvasSize {
            width: 640.0,
            height: 480.0,
        }
    }

    fn vertex_indices(triangles: &[Triangle]) -> Vec<usize> {
        let mut idx: Vec<usize> = triangles.iter().flatten().copied().collect();
        idx.sort_unstable();
        idx.dedup();
        idx
    }

    #[test]
    fn boundary_corners_lead_the_mesh_input() {
        let dots = vec![Point { x: 10.0, y: 20.0 }];
        let points = mesh_points(canvas(), &dots);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Point { x: 0.0, y: 0.0 });
        assert_eq!(points[4], Point { x: 10.0, y: 20.0 });
    }

    #[test]
    fn boundary_vertices_appear_for_any_collection() {
        // Empty collection: the rectangle alone still triangulates.
        let empty = mesh_points(canvas(), &[]);
        let triangles = DelaunayMesher.triangulate(&empty).expect("mesh");
        assert_eq!(vertex_indices(&triangles), vec![0, 1, 2, 3]);

        // Non-empty: all four corners remain triangle vertices.
        let dots = vec![
            Point { x: 320.0, y: 240.0 },
            Point { x: 100.0, y: 100.0 },
        ];
        let points = mesh_points(canvas(), &dots);
        let triangles = DelaunayMesher.triangulate(&points).expect("mesh");
        let idx = vertex_indices(&triangles);
        for corner in 0..4 {
            assert!(idx.contains(&corner), "corner {corner} missing");
        }
    }

    #[test]
    fn triangulation_is_deterministic() {
        let points = mesh_points(canvas(), &[Point { x: 200.0, y: 150.0 }]);
        let a = DelaunayMesher.triangulate(&points).expect("mesh");
        let b = DelaunayMesher.triangulate(&points).expect("mesh");
        assert_eq!(a, b);
    }

    #[test]
    fn interior_point_splits_the_rectangle() {
        let points = mesh_points(canvas(), &[Point { x: 320.0, y: 240.0 }]);
        let triangles = DelaunayMesher.triangulate(&points).expect("mesh");
        // A strictly interior point fans the quad into four triangles.
        assert_eq!(triangles.len(), 4);
        assert!(triangles.iter().all(|t| t.contains(&4)));
    }

    #[test]
    fn collinear_input_yields_no_mesh() {
        let points = vec![
            Point { x: 0.0, y: 0.0 },
            Point { x: 1.0, y: 1.0 },
            Point { x: 2.0, y: 2.0 },
            Point { x: 3.0, y: 3.0 },
        ];
        assert!(DelaunayMesher.triangulate(&points).is_none());
    }

    #[test]
    fn non_finite_input_yields_no_mesh() {
        let mut points = mesh_points(canvas(), &[]);
        points.push(Point {
            x: f64::INFINITY,
            y: 0.0,
        });
        assert!(DelaunayMesher.triangulate(&points).is_none());
    }

    #[test]
    fn too_few_points_yield_no_mesh() {
        let points = vec![Point { x: 0.0, y: 0.0 }, Point { x: 1.0, y: 0.0 }];
        assert!(DelaunayMesher.triangulate(&points).is_none());
    }
}
