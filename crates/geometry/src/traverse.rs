//! Voxel traversal using DDA (Digital Differential Analyzer).

use blockray_core::OFFSET;
use glam::{DVec3, IVec3};

/// Walk the cells pierced by a ray in order, stopping at the first cell for
/// which `visit` returns `Some`.
///
/// `visit` receives the cell coordinate and the distance at which the ray
/// enters it (zero for the starting cell). Traversal ends once the entry
/// distance exceeds `max_distance`. An origin on a cell boundary starts in
/// the cell the ray is heading into, matching [`blockray_core::Ray::local_origin`].
pub fn traverse<T, F>(origin: DVec3, direction: DVec3, max_distance: f64, mut visit: F) -> Option<T>
where
    F: FnMut(IVec3, f64) -> Option<T>,
{
    let mut cell = (origin + direction * OFFSET).floor().as_ivec3();

    let step = IVec3::new(
        if direction.x > 0.0 { 1 } else { -1 },
        if direction.y > 0.0 { 1 } else { -1 },
        if direction.z > 0.0 { 1 } else { -1 },
    );

    // Distance along ray to cross one cell in each axis
    let delta = DVec3::new(
        axis_delta(direction.x),
        axis_delta(direction.y),
        axis_delta(direction.z),
    );

    // Distance from origin to the next boundary in each axis
    let mut t_max = DVec3::new(
        first_crossing(origin.x, direction.x, cell.x),
        first_crossing(origin.y, direction.y, cell.y),
        first_crossing(origin.z, direction.z, cell.z),
    );

    let mut entry = 0.0;
    while entry <= max_distance {
        if let Some(found) = visit(cell, entry) {
            return Some(found);
        }

        if t_max.x < t_max.y && t_max.x < t_max.z {
            cell.x += step.x;
            entry = t_max.x;
            t_max.x += delta.x;
        } else if t_max.y < t_max.z {
            cell.y += step.y;
            entry = t_max.y;
            t_max.y += delta.y;
        } else {
            cell.z += step.z;
            entry = t_max.z;
            t_max.z += delta.z;
        }
    }

    None
}

fn axis_delta(d: f64) -> f64 {
    if d != 0.0 {
        (1.0 / d).abs()
    } else {
        f64::INFINITY
    }
}

fn first_crossing(o: f64, d: f64, cell: i32) -> f64 {
    if d > 0.0 {
        (f64::from(cell + 1) - o) / d
    } else if d < 0.0 {
        (f64::from(cell) - o) / d
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_cells_along_axis() {
        let mut seen = Vec::new();
        let hit = traverse(DVec3::new(0.5, 0.5, 0.5), DVec3::X, 3.0, |cell, entry| {
            seen.push((cell, entry));
            (cell.x == 3).then_some(cell)
        });
        assert_eq!(hit, Some(IVec3::new(3, 0, 0)));
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[1], (IVec3::new(1, 0, 0), 0.5));
        assert_eq!(seen[3].1, 2.5);
    }

    #[test]
    fn stops_at_max_distance() {
        let mut visits = 0;
        let hit: Option<()> = traverse(DVec3::splat(0.5), DVec3::new(0.0, -1.0, 0.0), 4.0, |_, _| {
            visits += 1;
            None
        });
        assert!(hit.is_none());
        // Entries at 0, 0.5, 1.5, 2.5, 3.5.
        assert_eq!(visits, 5);
    }

    #[test]
    fn boundary_origin_starts_in_the_cell_ahead() {
        let mut seen = Vec::new();
        let _: Option<()> = traverse(DVec3::new(0.5, 1.0, 0.5), -DVec3::Y, 1.5, |cell, entry| {
            seen.push((cell, entry));
            None
        });
        assert_eq!(seen, [(IVec3::new(0, 0, 0), 0.0), (IVec3::new(0, -1, 0), 1.0)]);
    }

    #[test]
    fn diagonal_ray_steps_one_axis_at_a_time() {
        let dir = DVec3::new(1.0, 1.0, 0.0).normalize();
        let mut cells = Vec::new();
        let _: Option<()> = traverse(DVec3::new(0.2, 0.7, 0.5), dir, 2.0, |cell, _| {
            cells.push(cell);
            None
        });
        for pair in cells.windows(2) {
            let diff = (pair[1] - pair[0]).abs();
            assert_eq!(diff.x + diff.y + diff.z, 1);
        }
    }
}
