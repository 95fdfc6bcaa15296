use crate::error::LatticeError;
use crate::geometry::{build_lattice, feature_grids, linspace};
use crate::types::Range;

fn vector_epsilon_equal(v1: &[f64], v2: &[f64], epsilon: f64) -> bool {
    v1.len() == v2.len() && v1.iter().zip(v2).all(|(a, b)| (a - b).abs() < epsilon)
}

#[test]
fn test_linspace() {
    let cases: Vec<(f64, f64, usize, Vec<f64>)> = vec![
        (-1.0, 1.0, 5, vec![-1.0, -0.5, 0.0, 0.5, 1.0]),
        (0.0, 10.0, 4, vec![0.0, 3.333333, 6.666667, 10.0]),
        (2.0, 3.0, 2, vec![2.0, 3.0]),
        (0.0, 1.0, 11, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]),
        (-2.0, -1.0, 3, vec![-2.0, -1.5, -1.0]),
    ];

    for (min, max, n, expected) in cases {
        let points = linspace(min, max, n).unwrap();
        assert!(
            vector_epsilon_equal(&points, &expected, 1e-5),
            "{:?} != {:?}",
            points,
            expected
        );
    }
}

#[test]
fn test_linspace_endpoints_are_exact() {
    let points = linspace(-0.7, 0.7, 7).unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0], -0.7);
    assert_eq!(points[6], 0.7);

    let gap = points[1] - points[0];
    for pair in points.windows(2) {
        assert!((pair[1] - pair[0] - gap).abs() < 1e-12);
    }
}

#[test]
fn test_linspace_rejects_degenerate_resolutions() {
    assert!(matches!(linspace(0.0, 1.0, 1), Err(LatticeError::DegenerateGrid { points: 1 })));
    assert!(matches!(linspace(0.0, 1.0, 0), Err(LatticeError::DegenerateGrid { points: 0 })));
}

#[test]
fn test_linspace_zero_width_range() {
    let points = linspace(0.5, 0.5, 3).unwrap();
    assert_eq!(points, vec![0.5, 0.5, 0.5]);
}

#[test]
fn test_build_lattice_two_by_two() {
    let lattice = build_lattice(&[vec![1.0, 2.0], vec![10.0, 20.0]]).unwrap();

    assert_eq!(lattice.len(), 4);
    let coordinates: Vec<Vec<f64>> = lattice.iter().map(|s| s.coordinates.clone()).collect();
    assert_eq!(
        coordinates,
        vec![
            vec![1.0, 10.0],
            vec![1.0, 20.0],
            vec![2.0, 10.0],
            vec![2.0, 20.0],
        ]
    );
    let ids: Vec<Option<usize>> = lattice.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![Some(0), Some(1), Some(2), Some(3)]);
}

#[test]
fn test_build_lattice_first_dimension_slowest() {
    let lattice = build_lattice(&[vec![1.0, 2.0, 3.0], vec![-1.0, 1.0]]).unwrap();
    let first_coords: Vec<f64> = lattice.iter().map(|s| s.coordinates[0]).collect();
    assert_eq!(first_coords, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
}

#[test]
fn test_build_lattice_three_dimensions() {
    let grid = vec![-1.0, 0.0, 1.0];
    let lattice = build_lattice(&[grid.clone(), grid.clone(), grid]).unwrap();

    assert_eq!(lattice.len(), 27);
    assert_eq!(lattice[0].coordinates, vec![-1.0, -1.0, -1.0]);
    assert_eq!(lattice[1].coordinates, vec![-1.0, -1.0, 0.0]);
    assert_eq!(lattice[3].coordinates, vec![-1.0, 0.0, -1.0]);
    assert_eq!(lattice[26].coordinates, vec![1.0, 1.0, 1.0]);
    assert_eq!(lattice[26].id, Some(26));
}

#[test]
fn test_build_lattice_single_dimension() {
    let lattice = build_lattice(&[vec![0.0, 0.5, 1.0]]).unwrap();
    assert_eq!(lattice.len(), 3);
    assert_eq!(lattice[2].coordinates, vec![1.0]);
}

#[test]
fn test_build_lattice_rejects_empty_input() {
    assert!(build_lattice(&[]).is_err());
    assert!(build_lattice(&[vec![1.0], vec![]]).is_err());
}

#[test]
fn test_feature_grids_requires_one_resolution_per_feature() {
    let features = vec![Range { min: 0.0, max: 1.0 }, Range { min: -1.0, max: 1.0 }];

    let grids = feature_grids(&features, &[2, 3]).unwrap();
    assert_eq!(grids, vec![vec![0.0, 1.0], vec![-1.0, 0.0, 1.0]]);

    let err = feature_grids(&features, &[2]).unwrap_err();
    assert!(matches!(err, LatticeError::DimensionMismatch { expected: 2, actual: 1 }));
}

#[test]
fn test_range_validation() {
    assert!(Range::new(0.0, 1.0).is_ok());
    assert!(Range::new(1.0, 1.0).is_ok());
    assert!(Range::new(1.0, 0.0).is_err());
    assert!(Range::new(f64::NAN, 0.0).is_err());
}

#[test]
fn test_malformed_feature_ranges_are_rejected() {
    let inverted = vec![Range { min: 1.0, max: -1.0 }];
    let err = feature_grids(&inverted, &[3]).unwrap_err();
    assert!(matches!(err, LatticeError::InvalidParameter { ref name, .. } if name == "range"));

    let unbounded = vec![Range { min: 0.0, max: f64::INFINITY }];
    assert!(feature_grids(&unbounded, &[3]).is_err());

    assert!(Range { min: -1.0, max: 1.0 }.validate().is_ok());
    assert!(Range { min: 2.0, max: 2.0 }.validate().is_ok());
}
