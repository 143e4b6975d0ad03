use glam::{DVec2, DVec3};

use super::*;

fn cloud_from_xy(points: &[(f64, f64)]) -> PointCloud {
  let mut cloud = PointCloud::new();
  for &(x, y) in points {
    cloud.append(DVec3::new(x, y, 0.0));
  }
  cloud
}

#[test]
fn test_empty_cloud_yields_empty_order() {
  let cloud = PointCloud::new();
  let bounds = Aabb2::new(DVec2::ZERO, DVec2::splat(1.0));
  assert!(compute_order(&cloud, bounds).is_empty());
}

#[test]
fn test_single_point_is_level_zero() {
  let cloud = cloud_from_xy(&[(3.0, 4.0)]);
  let order = compute_order(&cloud, cloud.bounds2().unwrap());
  assert_eq!(order, vec![(0, 0)]);
}

#[test]
fn test_output_is_permutation_of_input() {
  // 6x6 grid, ids 0..36
  let points: Vec<(f64, f64)> = (0..6)
    .flat_map(|y| (0..6).map(move |x| (x as f64, y as f64)))
    .collect();
  let cloud = cloud_from_xy(&points);
  let order = compute_order(&cloud, cloud.bounds2().unwrap());

  assert_eq!(order.len(), cloud.len());
  let mut ids: Vec<_> = order.iter().map(|&(_, id)| id).collect();
  ids.sort_unstable();
  let expected: Vec<_> = cloud.ids().collect();
  assert_eq!(ids, expected, "every id exactly once");
}

#[test]
fn test_levels_are_non_decreasing() {
  let points: Vec<(f64, f64)> = (0..5)
    .flat_map(|y| (0..5).map(move |x| (x as f64 * 1.3, y as f64 * 0.7)))
    .collect();
  let cloud = cloud_from_xy(&points);
  let order = compute_order(&cloud, cloud.bounds2().unwrap());

  for pair in order.windows(2) {
    assert!(pair[0].0 <= pair[1].0, "levels must not decrease: {order:?}");
  }
}

#[test]
fn test_level_zero_is_closest_to_box_center() {
  let cloud = cloud_from_xy(&[(0.0, 0.0), (9.0, 9.0), (5.2, 4.8), (1.0, 8.0)]);
  let bounds = cloud.bounds2().unwrap();
  let order = compute_order(&cloud, bounds);

  let center = bounds.center();
  let closest = cloud
    .ids()
    .min_by(|&a, &b| {
      let da = cloud.position2(a).distance_squared(center);
      let db = cloud.position2(b).distance_squared(center);
      da.partial_cmp(&db).unwrap()
    })
    .unwrap();
  assert_eq!(order[0], (0, closest));
}

#[test]
fn test_deterministic_across_runs() {
  let points: Vec<(f64, f64)> = (0..40)
    .map(|i| {
      let f = i as f64;
      (f * 0.37 % 7.0, f * 0.73 % 5.0)
    })
    .collect();
  let cloud = cloud_from_xy(&points);
  let bounds = cloud.bounds2().unwrap();

  assert_eq!(compute_order(&cloud, bounds), compute_order(&cloud, bounds));
}

#[test]
fn test_plus_sign_scenario() {
  // Center point plus 4 cardinal points, box exactly bounding them.
  // Level 0 must be the center; the cardinals refine over levels 1..n,
  // landing one per occupied quadrant lineage.
  let cloud = cloud_from_xy(&[
    (0.0, 0.0),  // 0: center
    (1.0, 0.0),  // 1: east
    (-1.0, 0.0), // 2: west
    (0.0, 1.0),  // 3: north
    (0.0, -1.0), // 4: south
  ]);
  let order = compute_order(&cloud, cloud.bounds2().unwrap());

  assert_eq!(order.len(), 5);
  assert_eq!(order[0], (0, 0), "center point is the level-0 pick");

  // East and north sit on the shared quadrant edge and both land in the
  // upper-right child; the tie resolves to the first-seen id (east) and
  // north refines one level deeper.
  assert_eq!(order[1..4], [(1, 4), (1, 2), (1, 1)]);
  assert_eq!(order[4], (2, 3));
}

#[test]
fn test_points_outside_box_are_dropped() {
  let cloud = cloud_from_xy(&[(0.5, 0.5), (0.2, 0.9), (5.0, 5.0)]);
  let bounds = Aabb2::new(DVec2::ZERO, DVec2::splat(1.0));
  let order = compute_order(&cloud, bounds);

  let ids: Vec<_> = order.iter().map(|&(_, id)| id).collect();
  assert!(!ids.contains(&2), "outside point must not be picked");
  assert_eq!(order.len(), 2);
}

#[test]
fn test_coincident_points_all_emitted() {
  // Same position twice: one picked per box, the duplicate refines deeper
  let cloud = cloud_from_xy(&[(1.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);
  let order = compute_order(&cloud, cloud.bounds2().unwrap());
  assert_eq!(order.len(), 3);
}

#[test]
fn test_reorder_materializes_permutation() {
  let cloud = cloud_from_xy(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (4.0, 4.0), (2.1, 1.9)]);
  let reordered = reorder(&cloud);

  assert_eq!(reordered.len(), cloud.len());
  // The most central point leads the reordered cloud
  assert_eq!(reordered.position(0), DVec3::new(2.1, 1.9, 0.0));
}

#[test]
fn test_reorder_empty() {
  assert!(reorder(&PointCloud::new()).is_empty());
}
