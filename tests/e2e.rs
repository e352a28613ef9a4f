mod common;

use common::synthetic_scan::{
    clutter_scan, left_corner, left_corner_scan, right_corner, right_corner_scan,
};
use fence_detector::visualization::LineListMarker;
use fence_detector::{DetectorParams, FenceDetector, FenceError};
use rstest::rstest;

const TOLERANCE: f32 = 0.05;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[rstest]
#[case::left(left_corner_scan(), left_corner().corner())]
#[case::right(right_corner_scan(), right_corner().corner())]
fn corner_scan_yields_known_corner(
    #[case] msg: fence_detector::LaserScanMsg,
    #[case] corner: [f32; 2],
) {
    init_logging();
    let detector = FenceDetector::new(DetectorParams::default());
    let pose = detector.process(&msg).expect("fence pose");

    let [x, y] = pose.position();
    let err = (x - corner[0]).hypot(y - corner[1]);
    assert!(
        err < TOLERANCE,
        "pose ({:.3}, {:.3}) is {:.3} m from corner ({:.3}, {:.3})",
        pose.x,
        pose.y,
        err,
        corner[0],
        corner[1]
    );
    assert_eq!(pose.theta, 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    init_logging();
    let detector = FenceDetector::default();
    let msg = left_corner_scan();
    let a = detector.process(&msg).expect("first run");
    let b = detector.process(&msg).expect("second run");
    assert_eq!(a, b);
}

#[test]
fn diagnostics_trace_every_stage() {
    init_logging();
    let detector = FenceDetector::default();
    let msg = left_corner_scan();
    let report = detector
        .process_with_diagnostics(&msg)
        .expect("detection report");
    assert_eq!(report.pose, detector.process(&msg).expect("pose"));

    let trace = &report.trace;
    assert_eq!(trace.input.beams, msg.ranges.len());
    assert!(trace.input.valid_beams < trace.input.beams);
    assert_eq!(trace.input.frame_id, "laser");
    assert!(trace.raster.occupied_cells > 0);
    assert!(trace.raster.width > 100 && trace.raster.height > 100);

    let segments = &trace.hough.segments;
    assert!(segments.len() >= 2);
    assert_eq!(segments.len(), trace.hough.grid_segments.len());
    assert_eq!(trace.clusters.labels.len(), segments.len());
    let front = &segments[trace.clusters.front.representative];
    let side = &segments[trace.clusters.side.representative];
    assert!(front.normal()[0].abs() > 0.9, "front normal {:?}", front.normal());
    assert!(side.normal()[1].abs() > 0.9, "side normal {:?}", side.normal());
    assert!((trace.clusters.separation - std::f32::consts::FRAC_PI_2).abs() < 0.05);

    let labels: Vec<&str> = trace.timings.stages.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["scan", "raster", "hough", "cluster", "intersection"]);
    assert!(trace.timings.total_ms >= 0.0);

    let json = serde_json::to_value(&report).expect("serialize report");
    assert!(json["trace"]["hough"]["segments"].is_array());
    assert!(json["pose"]["x"].is_number());
}

#[test]
fn extracted_lines_feed_the_marker() {
    init_logging();
    let msg = left_corner_scan();
    let lines = FenceDetector::default()
        .extract_lines(&msg)
        .expect("line extraction");
    assert!(lines.len() >= 2);

    let marker = LineListMarker::from_segments(&lines.segments, &msg.frame_id, msg.stamp);
    assert_eq!(marker.points.len(), 2 * lines.len());
    assert_eq!(marker.stamp, msg.stamp);
    for (pair, seg) in marker.points.chunks(2).zip(&lines.segments) {
        assert_eq!(pair[0], [seg.p0[0], seg.p0[1], 0.0]);
        assert_eq!(pair[1], [seg.p1[0], seg.p1[1], 0.0]);
    }
}

#[test]
fn clutter_without_walls_has_insufficient_segments() {
    init_logging();
    let err = FenceDetector::default()
        .process(&clutter_scan())
        .unwrap_err();
    assert_eq!(
        err,
        FenceError::InsufficientSegments {
            found: 0,
            minimum: 2
        }
    );
}

#[test]
fn blind_scan_is_empty() {
    init_logging();
    let mut msg = clutter_scan();
    msg.ranges.iter_mut().for_each(|r| *r = f32::INFINITY);
    assert_eq!(
        FenceDetector::default().process(&msg).unwrap_err(),
        FenceError::EmptyScan
    );
}

#[test]
fn truncated_ranges_are_a_dimension_mismatch() {
    init_logging();
    let mut msg = left_corner_scan();
    msg.ranges.truncate(100);
    assert!(matches!(
        FenceDetector::default().process(&msg),
        Err(FenceError::DimensionMismatch { found: 100, .. })
    ));
}
