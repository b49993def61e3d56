use blockray_liquid::SimplexParams;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::warn;

pub const DEFAULT_PROBE_PATH: &str = "config/probe.toml";

/// Which water shader the probe scene installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderMode {
    #[default]
    Still,
    Animated,
}

impl FromStr for ShaderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "still" => Ok(ShaderMode::Still),
            "animated" => Ok(ShaderMode::Animated),
            other => Err(format!("unknown shader mode '{other}' (expected still|animated)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [-1.5, 3.5, -3.0],
            target: [6.0, 0.4, 0.5],
            fov_degrees: 55.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WaterConfig {
    pub shader: ShaderMode,
    pub simplex: SimplexParams,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub width: u32,
    pub height: u32,
    /// Jittered primary rays per pixel.
    pub samples: u32,
    pub seed: u64,
    pub camera: CameraConfig,
    pub water: WaterConfig,
    /// Animation clock handed to the scene, in seconds.
    pub animation_time: f64,
    /// Directory holding `<texture id>.png` files. Missing files keep the
    /// built-in flat colors.
    pub texture_dir: Option<PathBuf>,
    pub out: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
            samples: 1,
            seed: 0,
            camera: CameraConfig::default(),
            water: WaterConfig::default(),
            animation_time: 0.0,
            texture_dir: None,
            out: PathBuf::from("probe.png"),
        }
    }
}

impl ProbeConfig {
    /// Load probe configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_PROBE_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ProbeConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ProbeConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_PROBE_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Probe config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ProbeConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: ProbeConfig = toml::from_str(
            r#"
            width = 64
            [water]
            shader = "animated"
            [water.simplex]
            iterations = 2
            "#,
        )
        .expect("partial config parses");
        assert_eq!(cfg.width, 64);
        assert_eq!(cfg.height, 180);
        assert_eq!(cfg.water.shader, ShaderMode::Animated);
        assert_eq!(cfg.water.simplex.iterations, 2);
        assert_eq!(cfg.water.simplex.frequency, 0.4);
        assert_eq!(cfg.camera.fov_degrees, 55.0);
    }

    #[test]
    fn unreadable_or_invalid_files_fall_back() {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let missing = std::env::temp_dir().join(format!("blockray_missing_{timestamp}.toml"));
        assert_eq!(ProbeConfig::load_from_path(&missing).width, 320);

        let broken = std::env::temp_dir().join(format!("blockray_broken_{timestamp}.toml"));
        fs::write(&broken, "width = \"wide\"").expect("write broken config");
        assert_eq!(ProbeConfig::load_from_path(&broken).width, 320);
        let _ = fs::remove_file(&broken);
    }

    #[test]
    fn shader_mode_names() {
        assert_eq!("still".parse::<ShaderMode>(), Ok(ShaderMode::Still));
        assert_eq!("animated".parse::<ShaderMode>(), Ok(ShaderMode::Animated));
        assert!("wavy".parse::<ShaderMode>().is_err());
    }

    #[test]
    fn shipped_config_parses() {
        let contents = fs::read_to_string(DEFAULT_PROBE_PATH).expect("shipped probe config");
        let cfg: ProbeConfig = toml::from_str(&contents).expect("shipped probe config parses");
        assert!(cfg.samples >= 1);
    }
}
