//! JSON camera and network descriptor.
//!
//! ```json
//! {
//!     "team": 1234,
//!     "ntmode": "client",
//!     "cameras": [
//!         { "name": "front", "path": "/dev/video0", "width": 320, "height": 240 }
//!     ]
//! }
//! ```
//!
//! Camera entries may carry any further properties (pixel format,
//! exposure, stream settings, ...). They are kept verbatim for the camera
//! subsystem and not interpreted here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::frame::FrameGeometry;
use crate::processor::ProcessorParams;

/// Where the descriptor lives on a coprocessor image.
pub const DEFAULT_CONFIG_PATH: &str = "/boot/frc.json";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("camera {index}: {reason}")]
    Camera { index: usize, reason: String },
}

/// Telemetry transport role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Connect to the robot's server for the configured team.
    #[default]
    Client,
    /// Host the server locally.
    Server,
}

impl NetworkMode {
    /// Case-insensitive `client` / `server`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("client") {
            Some(NetworkMode::Client)
        } else if s.eq_ignore_ascii_case("server") {
            Some(NetworkMode::Server)
        } else {
            None
        }
    }
}

/// One camera entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    /// Settings for the camera's own stream, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<Value>,
    /// Every other property of the entry.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl CameraConfig {
    /// Video-mode size, when both dimensions are configured.
    pub fn geometry(&self) -> Option<FrameGeometry> {
        Some(FrameGeometry::new(self.width?, self.height?))
    }
}

/// Top-level descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    pub team: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntmode: Option<String>,
    pub cameras: Vec<CameraConfig>,
    /// Frame-cycle settings; defaults when absent.
    #[serde(default)]
    pub vision: ProcessorParams,
}

impl VisionConfig {
    /// Load and validate a descriptor from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a descriptor.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: VisionConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, cam) in self.cameras.iter().enumerate() {
            if cam.name.trim().is_empty() {
                return Err(ConfigError::Camera {
                    index,
                    reason: "could not read camera name".to_string(),
                });
            }
            if cam.path.trim().is_empty() {
                return Err(ConfigError::Camera {
                    index,
                    reason: format!("camera '{}': could not read path", cam.name),
                });
            }
        }
        Ok(())
    }

    /// Network role. An unrecognised `ntmode` is reported and treated as client.
    pub fn network_mode(&self) -> NetworkMode {
        match self.ntmode.as_deref() {
            None => NetworkMode::Client,
            Some(s) => NetworkMode::parse(s).unwrap_or_else(|| {
                log::error!("config error: could not understand ntmode value '{s}'");
                NetworkMode::Client
            }),
        }
    }

    /// The camera whose frames are processed; only the first one is.
    pub fn primary_camera(&self) -> Option<&CameraConfig> {
        self.cameras.first()
    }

    /// Write this descriptor to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "team": 4904,
        "ntmode": "SERVER",
        "cameras": [
            {
                "name": "front",
                "path": "/dev/video0",
                "pixel format": "MJPEG",
                "width": 640,
                "height": 480,
                "fps": 30,
                "exposure": "auto",
                "stream": { "properties": [ { "name": "compression", "value": 30 } ] }
            },
            { "name": "rear", "path": "/dev/video1" }
        ]
    }"#;

    #[test]
    fn parses_full_descriptor() {
        let cfg = VisionConfig::from_json_str(SAMPLE).expect("valid config");
        assert_eq!(cfg.team, 4904);
        assert_eq!(cfg.network_mode(), NetworkMode::Server);
        assert_eq!(cfg.cameras.len(), 2);

        let primary = cfg.primary_camera().expect("camera 0");
        assert_eq!(primary.name, "front");
        assert_eq!(primary.geometry(), Some(FrameGeometry::new(640, 480)));
        assert_eq!(primary.properties.get("pixel format"), Some(&Value::from("MJPEG")));
        assert!(primary.stream.is_some());
        assert_eq!(cfg.cameras[1].geometry(), None);
        assert_eq!(cfg.vision, ProcessorParams::default());
    }

    #[test]
    fn ntmode_defaults_to_client() {
        let cfg = VisionConfig::from_json_str(r#"{ "team": 1, "cameras": [] }"#).expect("valid");
        assert_eq!(cfg.network_mode(), NetworkMode::Client);
        assert!(cfg.primary_camera().is_none());
    }

    #[test]
    fn unknown_ntmode_falls_back_to_client() {
        let cfg = VisionConfig::from_json_str(r#"{ "team": 1, "ntmode": "peer", "cameras": [] }"#)
            .expect("still valid");
        assert_eq!(cfg.network_mode(), NetworkMode::Client);
    }

    #[test]
    fn missing_required_fields_are_errors() {
        for raw in [
            r#"{ "cameras": [] }"#,
            r#"{ "team": 1 }"#,
            r#"{ "team": 1, "cameras": [ { "path": "/dev/video0" } ] }"#,
            r#"{ "team": 1, "cameras": [ { "name": "front" } ] }"#,
            r#"[1, 2, 3]"#,
        ] {
            assert!(
                matches!(VisionConfig::from_json_str(raw), Err(ConfigError::Json(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn blank_camera_name_is_rejected() {
        let err = VisionConfig::from_json_str(
            r#"{ "team": 1, "cameras": [ { "name": " ", "path": "/dev/video0" } ] }"#,
        )
        .expect_err("blank name");
        assert!(matches!(err, ConfigError::Camera { index: 0, .. }));
    }

    #[test]
    fn vision_section_overrides_defaults() {
        let cfg = VisionConfig::from_json_str(
            r#"{ "team": 1, "cameras": [], "vision": { "table": "Aux", "classifier": { "min_skew_deg": 8.0 } } }"#,
        )
        .expect("valid");
        assert_eq!(cfg.vision.table, "Aux");
        assert_eq!(cfg.vision.classifier.min_skew_deg, 8.0);
        assert_eq!(cfg.vision.classifier.max_skew_deg, 60.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = VisionConfig::load_json("/nonexistent/frc.json").expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/frc.json"));
    }
}
