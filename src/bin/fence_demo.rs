use fence_detector::config::load_config;
use fence_detector::image::io::{load_scan_json, save_occupancy_grid, write_json_file};
use fence_detector::raster::rasterize;
use fence_detector::visualization::LineListMarker;
use fence_detector::{FenceDetector, ScanFrame};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let msg = load_scan_json(&config.input)?;

    let detector = FenceDetector::new(config.detector);
    let report = detector
        .process_with_diagnostics(&msg)
        .map_err(|e| format!("Detection failed for {}: {e}", config.input.display()))?;

    write_json_file(&config.output.report_json, &report)?;
    println!(
        "Saved detection report to {}",
        config.output.report_json.display()
    );

    if let Some(path) = &config.output.markers_json {
        let marker =
            LineListMarker::from_segments(&report.trace.hough.segments, &msg.frame_id, msg.stamp);
        write_json_file(path, &marker)?;
        println!(
            "Saved {} line markers to {}",
            marker.segment_count(),
            path.display()
        );
    }

    if let Some(path) = &config.output.grid_image {
        let frame = ScanFrame::from_message(&msg).map_err(|e| e.to_string())?;
        let grid = rasterize(&frame, config.detector.resolution).map_err(|e| e.to_string())?;
        save_occupancy_grid(&grid, path)?;
        println!(
            "Saved {}x{} occupancy grid to {}",
            grid.w,
            grid.h,
            path.display()
        );
    }

    println!(
        "Fence corner: x={:.3} y={:.3} theta={:.3} ({} segments, {:.2} ms)",
        report.pose.x,
        report.pose.y,
        report.pose.theta,
        report.trace.hough.segments.len(),
        report.trace.timings.total_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: fence_demo <config.json>".to_string()
}
