#[cfg(test)]
mod hashgrid_tests {
    use tinyfold_ff::SpatialHash;
    use tinyfold_geometry::Vec3;

    /// A deterministic, irregular cloud of points spread over a ~40 A box.
    fn point_cloud(n: usize) -> Vec<Vec3> {
        let mut points = Vec::with_capacity(n);
        for k in 0..n {
            let t = k as f64;
            points.push(Vec3::new(
                20.0 * (1.7 * t).sin() + 10.0 * (0.3 * t).cos(),
                20.0 * (2.3 * t).cos() + 5.0 * (0.7 * t).sin(),
                20.0 * (0.9 * t).sin() * (1.3 * t).cos(),
            ));
        }
        return points;
    }

    #[test]
    fn neighbour_set_is_a_superset_of_the_in_cutoff_set() {
        let cutoff = 6.0;
        let points = point_cloud(200);
        let hash = SpatialHash::new(&points, cutoff);

        for i in 0..points.len() {
            let neighbours = hash.neighbors(&points[i]);
            for j in 0..points.len() {
                if i == j {
                    continue;
                }
                if points[i].distance_to(&points[j]) < cutoff {
                    assert!(
                        neighbours.contains(&j),
                        "pair ({}, {}) within {} A missed by the hash", i, j, cutoff
                    );
                }
            }
        }
    }

    #[test]
    fn query_point_finds_itself() {
        let points = point_cloud(50);
        let hash = SpatialHash::new(&points, 8.0);
        for (i, p) in points.iter().enumerate() {
            assert!(hash.neighbors(p).contains(&i));
        }
    }

    #[test]
    fn distant_points_land_in_distinct_cells() {
        let points = vec![Vec3::zero(), Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 100.0, 0.0)];
        let hash = SpatialHash::new(&points, 10.0);
        assert_eq!(hash.count_cells(), 3);
        assert_eq!(hash.neighbors(&points[0]), vec![0]);
    }

    #[test]
    fn negative_coordinates_hash_correctly() {
        let points = vec![Vec3::new(-15.0, -15.0, -15.0), Vec3::new(-14.0, -15.5, -14.5)];
        let hash = SpatialHash::new(&points, 10.0);
        let neighbours = hash.neighbors(&points[0]);
        assert!(neighbours.contains(&0) && neighbours.contains(&1));
    }
}
