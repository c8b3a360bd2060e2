//! Locally persisted preferences.
//!
//! A small JSON file under the platform data dir holding the window
//! geometry and the email last used to sign in, which prefills the
//! sign-in form on the next launch. List data never lands here; the
//! document store owns it.

use iced::{Point, Size};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "prefs.json";

const DEFAULT_WIDTH: f32 = 960.0;
const DEFAULT_HEIGHT: f32 = 640.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub window: Option<WindowGeom>,
    pub last_email: Option<String>,
}

/// Saved window geometry. Negative coordinates mean "never moved", so
/// the window opens centered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowGeom {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for WindowGeom {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: -1.0,
            y: -1.0,
        }
    }
}

impl Prefs {
    /// Load from disk; a missing or unreadable file yields defaults.
    pub fn load() -> Self {
        prefs_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save to disk. Errors are logged but not propagated.
    pub fn save(&self) {
        let Some(path) = prefs_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save preferences: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize preferences: {e}"),
        }
    }

    /// Initial window size, clamped to something usable.
    pub fn window_size(&self) -> Size {
        let geom = self.window.unwrap_or_default();
        Size::new(geom.width.max(400.0), geom.height.max(300.0))
    }

    /// Saved window position, if one was ever recorded.
    pub fn window_position(&self) -> Option<Point> {
        let geom = self.window?;
        (geom.x >= 0.0 && geom.y >= 0.0).then(|| Point::new(geom.x, geom.y))
    }
}

fn prefs_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "", "yuna").map(|dirs| dirs.data_dir().join(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_center_the_window() {
        let prefs = Prefs::default();
        assert_eq!(prefs.window_size(), Size::new(960.0, 640.0));
        assert!(prefs.window_position().is_none());
        assert!(prefs.last_email.is_none());
    }

    #[test]
    fn test_round_trip() {
        let prefs = Prefs {
            window: Some(WindowGeom {
                width: 1280.0,
                height: 720.0,
                x: 40.0,
                y: 60.0,
            }),
            last_email: Some("rin@example.com".into()),
        };

        let json = serde_json::to_string(&prefs).unwrap();
        let parsed: Prefs = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.window_position(), Some(Point::new(40.0, 60.0)));
        assert_eq!(parsed.last_email.as_deref(), Some("rin@example.com"));
    }

    #[test]
    fn test_tiny_saved_sizes_are_clamped() {
        let prefs = Prefs {
            window: Some(WindowGeom {
                width: 10.0,
                height: 10.0,
                x: -1.0,
                y: -1.0,
            }),
            last_email: None,
        };
        assert_eq!(prefs.window_size(), Size::new(400.0, 300.0));
        assert!(prefs.window_position().is_none());
    }
}
