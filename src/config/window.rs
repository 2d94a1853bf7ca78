use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window and context settings for the demos.
///
/// Replaces the usual pair of file-scope width/height constants; every demo
/// passes one of these into the window bootstrap explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glimt".to_string(),
            width: 800,
            height: 600,
            gl_major: 3,
            gl_minor: 3,
            vsync: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl WindowConfig {
    /// Reads the config from `path`, falling back to the compiled-in
    /// defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {path:?}"))
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_classic_teal_window() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.gl_major, 3);
        assert_eq!(config.gl_minor, 3);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WindowConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.title, WindowConfig::default().title);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glimt.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"width = 1280\nheight = 720\nvsync = false\n")
            .unwrap();

        let config = WindowConfig::load_or_default(&path).unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert!(!config.vsync);
        assert_eq!(config.gl_major, 3);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glimt.toml");
        std::fs::write(&path, "width = \"wide\"").unwrap();

        assert!(WindowConfig::load_or_default(&path).is_err());
    }
}
