use std::collections::HashMap;

use tinyfold_geometry::Vec3;

/// Grid-based spatial hash used to enumerate candidate interaction pairs in O(n).
///
/// Every position hashes to the cell `(floor(x/h), floor(y/h), floor(z/h))`, packed
/// into a single 32-bit key by bit-interleaving the three (offset) cell coordinates.
/// A neighbour query returns the union of the atom lists of the 27 cells in the
/// 3x3x3 block around the query point; with the cell edge no smaller than the
/// interaction cutoff that union is guaranteed to be a superset of the true
/// in-cutoff neighbour set, and the caller filters by exact distance.
///
/// ```
/// # use tinyfold_ff::SpatialHash;
/// # use tinyfold_geometry::Vec3;
/// let positions = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(50.0, 0.0, 0.0)];
/// let hash = SpatialHash::new(&positions, 10.0);
/// let near_origin = hash.neighbors(&positions[0]);
/// assert!(near_origin.contains(&0) && near_origin.contains(&1));
/// assert!(!near_origin.contains(&2));
/// ```
pub struct SpatialHash {
    cell_size: f64,
    cells: HashMap<u32, Vec<usize>>,
}

/// Spreads the lowest 10 bits of a value so that two zero bits separate each of them.
fn spread_bits(v: u32) -> u32 {
    let mut x = v & 0x3ff;
    x = (x | (x << 16)) & 0x0300_00ff;
    x = (x | (x << 8)) & 0x0300_f00f;
    x = (x | (x << 4)) & 0x030c_30c3;
    x = (x | (x << 2)) & 0x0924_9249;
    return x;
}

/// Packs three cell coordinates into one 32-bit key by bit-interleaving.
///
/// Coordinates are offset by 512 cells so that negative cells pack correctly;
/// with the default cell sizes this covers far more space than the 1000 A
/// working radius of any sane structure.
fn pack_cell(ix: i32, iy: i32, iz: i32) -> u32 {
    let x = (ix + 512) as u32;
    let y = (iy + 512) as u32;
    let z = (iz + 512) as u32;
    return spread_bits(x) | (spread_bits(y) << 1) | (spread_bits(z) << 2);
}

impl SpatialHash {
    /// Builds a hash over a set of positions with a given cell edge length.
    pub fn new(positions: &[Vec3], cell_size: f64) -> SpatialHash {
        let mut cells: HashMap<u32, Vec<usize>> = HashMap::new();
        for (index, pos) in positions.iter().enumerate() {
            let key = pack_cell(
                Self::cell_coord(pos.x, cell_size),
                Self::cell_coord(pos.y, cell_size),
                Self::cell_coord(pos.z, cell_size),
            );
            cells.entry(key).or_default().push(index);
        }
        return SpatialHash { cell_size, cells };
    }

    fn cell_coord(v: f64, h: f64) -> i32 {
        (v / h).floor() as i32
    }

    /// Returns the indices stored in the 3x3x3 block of cells around a query point.
    ///
    /// The result is a superset of all indices within one cell edge of the query;
    /// it includes the query atom itself when its position was inserted.
    pub fn neighbors(&self, pos: &Vec3) -> Vec<usize> {
        let cx = Self::cell_coord(pos.x, self.cell_size);
        let cy = Self::cell_coord(pos.y, self.cell_size);
        let cz = Self::cell_coord(pos.z, self.cell_size);

        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(list) = self.cells.get(&pack_cell(cx + dx, cy + dy, cz + dz)) {
                        found.extend_from_slice(list);
                    }
                }
            }
        }
        return found;
    }

    /// Counts the occupied cells of this hash.
    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }
}
