use crate::detector::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `fence_demo` tool.
///
/// ```json
/// {
///   "input": "scan.json",
///   "detector": { "resolution": 0.01, "hough": { "max_line_gap": 50 } },
///   "output": { "report_json": "out/report.json", "grid_image": "out/grid.png" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Scan message recorded as JSON.
    pub input: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub report_json: PathBuf,
    /// Line-list marker of the extracted segments.
    #[serde(default)]
    pub markers_json: Option<PathBuf>,
    /// Occupancy grid rendered as PNG.
    #[serde(default)]
    pub grid_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .detector
        .validate()
        .map_err(|e| format!("Invalid detector settings in {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fence_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn minimal_config_uses_detector_defaults() {
        let path = write_temp(
            "minimal.json",
            r#"{ "input": "scan.json", "output": { "report_json": "report.json" } }"#,
        );
        let config = load_config(&path).expect("config");
        assert_eq!(config.input, PathBuf::from("scan.json"));
        assert_eq!(config.detector, DetectorParams::default());
        assert!(config.output.markers_json.is_none());
        assert!(config.output.grid_image.is_none());
    }

    #[test]
    fn invalid_detector_settings_are_rejected() {
        let path = write_temp(
            "invalid.json",
            r#"{ "input": "scan.json", "detector": { "resolution": 0.0 },
                 "output": { "report_json": "report.json" } }"#,
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.contains("Invalid detector settings"), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config(Path::new("/nonexistent/fence.json")).unwrap_err();
        assert!(err.starts_with("Failed to read config"), "{err}");
    }
}
