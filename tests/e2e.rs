mod common;

use common::synthetic_points::{blobs_2d, uniform_points};
use fast_dbscan::{dbscan, Dbscan, DbscanParams, IndexKind, InvalidInput, Metric, PointSet, NOISE};

#[test]
fn two_separated_triples_form_two_clusters() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = [
        0.0, 0.0, 1.0, 0.0, 0.0, 1.0, //
        10.0, 10.0, 11.0, 10.0, 10.0, 11.0,
    ];
    let result = dbscan(&data, 6, 2, 1.5, 2).unwrap();

    assert_eq!(result.n_clusters, 2);
    assert_eq!(result.noise_count(), 0);
    assert_eq!(result.clusters, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(result.labels, vec![0, 0, 0, 1, 1, 1]);
}

#[test]
fn isolated_point_is_noise_for_any_local_eps() {
    let data = [0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 100.0, 100.0];
    for eps in [0.0, 0.5, 1.0, 10.0, 100.0] {
        let result = dbscan(&data, 4, 2, eps, 2).unwrap();
        assert_eq!(result.labels[3], NOISE, "eps={eps}");
    }
    // Once eps reaches the nearest neighbor the point joins a cluster.
    let result = dbscan(&data, 4, 2, 150.0, 2).unwrap();
    assert_ne!(result.labels[3], NOISE);
}

#[test]
fn min_samples_one_groups_exact_duplicates_only() {
    let data = [
        1.0, 1.0, //
        2.0, 2.0, //
        1.0, 1.0, //
        3.0, 3.0, //
        2.0, 2.0, //
        1.0, 1.0,
    ];
    let result = dbscan(&data, 6, 2, 0.0, 1).unwrap();
    assert_eq!(result.n_clusters, 3);
    assert_eq!(result.noise_count(), 0);
    assert_eq!(result.labels, vec![0, 1, 0, 2, 1, 0]);
    assert_eq!(result.core_sample_indices, (0..6).collect::<Vec<_>>());
}

#[test]
fn far_apart_points_stay_noise_under_a_huge_radius() {
    let data = [0.0, 1.5e20, 5.0e20];
    for kind in [IndexKind::Grid, IndexKind::KdTree, IndexKind::BruteForce] {
        let params = DbscanParams::new(1.0e20, 2).with_index(kind);
        let result = Dbscan::new(params).fit_flat(&data, 1).unwrap();
        assert_eq!(result.labels, vec![NOISE; 3], "{kind:?}");
    }
    let result = dbscan(&[0.0, 1.0e-23], 2, 1, 1.0e-25, 2).unwrap();
    assert_eq!(result.labels, vec![NOISE, NOISE]);
}

#[test]
fn identical_points_form_one_cluster() {
    let data = vec![4.2f32; 3 * 50];
    let result = dbscan(&data, 50, 3, 0.0, 5).unwrap();
    assert_eq!(result.n_clusters, 1);
    assert!(result.labels.iter().all(|&l| l == 0));
}

#[test]
fn invalid_input_is_rejected_before_clustering() {
    assert_eq!(
        dbscan(&[], 0, 2, 1.0, 2).unwrap_err(),
        InvalidInput::EmptyPointSet
    );
    assert_eq!(
        dbscan(&[0.0, 0.0], 1, 2, -0.1, 2).unwrap_err(),
        InvalidInput::NegativeEps { eps: -0.1 }
    );
    assert_eq!(
        dbscan(&[0.0, 0.0, 1.0], 2, 2, 1.0, 2).unwrap_err(),
        InvalidInput::ShapeMismatch {
            len: 3,
            n: 2,
            dim: 2
        }
    );
    let err = dbscan(&[0.0, 0.0], 1, 2, 1.0, 0).unwrap_err();
    assert!(err.reason().contains("min_samples"), "{err}");
}

#[test]
fn spiral_blobs_are_recovered_by_every_index() {
    let centers = [[0.0, 0.0], [20.0, 0.0], [0.0, 20.0]];
    let per_blob = 200;
    let data = blobs_2d(&centers, per_blob, 2.0);
    let points = PointSet::from_flat(&data, 2).unwrap();

    let mut previous = None;
    for kind in [IndexKind::Grid, IndexKind::KdTree, IndexKind::BruteForce] {
        let params = DbscanParams::new(0.5, 4).with_index(kind);
        let result = Dbscan::new(params).fit(points).unwrap();
        assert_eq!(result.n_clusters, 3, "{kind:?}");
        assert_eq!(result.noise_count(), 0, "{kind:?}");
        for (b, members) in result.clusters.iter().enumerate() {
            let expected: Vec<usize> = (b * per_blob..(b + 1) * per_blob).collect();
            assert_eq!(members, &expected, "{kind:?} blob {b}");
        }
        if let Some(prev) = previous.replace(result.clone()) {
            assert_eq!(prev, result, "{kind:?} disagrees with previous index");
        }
    }
}

#[test]
fn every_point_gets_exactly_one_label() {
    let data = uniform_points(2_000, 3, 10.0, 42);
    let points = PointSet::from_flat(&data, 3).unwrap();
    let result = Dbscan::new(DbscanParams::new(0.6, 5)).fit(points).unwrap();

    assert_eq!(result.labels.len(), 2_000);
    let mut seen = vec![0usize; 2_000];
    for members in &result.clusters {
        for &i in members {
            seen[i] += 1;
        }
    }
    for i in result.noise_indices() {
        seen[i] += 1;
    }
    assert!(seen.iter().all(|&c| c == 1));
    assert!(result
        .labels
        .iter()
        .all(|&l| l == NOISE || (0..result.n_clusters as i32).contains(&l)));
}

#[test]
fn repeated_runs_are_identical() {
    let data = uniform_points(3_000, 2, 30.0, 7);
    let points = PointSet::from_flat(&data, 2).unwrap();
    for parallel in [false, true] {
        let dbscan = Dbscan::new(DbscanParams::new(0.5, 4).with_parallel(parallel));
        let first = dbscan.fit(points).unwrap();
        let second = dbscan.fit(points).unwrap();
        assert_eq!(first, second, "parallel={parallel}");
    }
}

#[test]
fn parallel_run_matches_sequential_run() {
    let data = uniform_points(10_000, 2, 40.0, 3);
    let points = PointSet::from_flat(&data, 2).unwrap();
    for kind in [IndexKind::Grid, IndexKind::KdTree] {
        let base = DbscanParams::new(0.45, 4).with_index(kind);
        let seq = Dbscan::new(base).fit(points).unwrap();
        let par = Dbscan::new(base.with_parallel(true)).fit(points).unwrap();
        assert_eq!(seq, par, "{kind:?}");
    }
}

#[test]
fn higher_dimensions_use_the_tree() {
    let data = uniform_points(500, 6, 1.0, 5);
    let points = PointSet::from_flat(&data, 6).unwrap();
    let (auto, report) = Dbscan::new(DbscanParams::new(0.4, 3))
        .fit_with_report(points)
        .unwrap();
    assert_eq!(report.index, IndexKind::KdTree);
    let brute = Dbscan::new(DbscanParams::new(0.4, 3).with_index(IndexKind::BruteForce))
        .fit(points)
        .unwrap();
    assert_eq!(auto, brute);
}

#[test]
fn metric_changes_neighborhood_shape() {
    // (1, 1) is within 1.0 of the origin under Chebyshev only.
    let data = [0.0, 0.0, 1.0, 1.0];
    let euclid = Dbscan::new(DbscanParams::new(1.0, 2))
        .fit_flat(&data, 2)
        .unwrap();
    assert_eq!(euclid.n_clusters, 0);
    let cheb = Dbscan::new(DbscanParams::new(1.0, 2).with_metric(Metric::Chebyshev))
        .fit_flat(&data, 2)
        .unwrap();
    assert_eq!(cheb.n_clusters, 1);
    let manhattan = Dbscan::new(DbscanParams::new(2.0, 2).with_metric(Metric::Manhattan))
        .fit_flat(&data, 2)
        .unwrap();
    assert_eq!(manhattan.n_clusters, 1);
}
