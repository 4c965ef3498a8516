use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::math::Vector2;

/// A structure containing configuration data for the engine.
///
/// Every field takes its default value when missing from the JSON source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineParams,
    pub window: WindowParams,
    pub video: VideoParams,
    pub audio: AudioParams,
    /// Runs without window, graphics or audio device behind the engine.
    pub headless: bool,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// The upper bound of ticks per second, 0 means unlimited.
    pub max_fps: u32,
    /// How long `Engine::stop` waits for the loop thread to exit.
    pub stop_timeout_ms: u64,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            max_fps: 60,
            stop_timeout_ms: 2000,
        }
    }
}

impl EngineParams {
    #[inline]
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// Returns the minimum duration of one tick.
    pub fn min_frame_duration(&self) -> Option<Duration> {
        if self.max_fps == 0 {
            None
        } else {
            Some(Duration::from_nanos(1_000_000_000 / u64::from(self.max_fps)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Chalk".to_owned(),
            size: Vector2::new(800, 600),
            multisample: 0,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    /// Requests a debug context from the native window.
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioParams {
    /// Whether the headless audio backend reports the effect extension.
    pub efx: bool,
}

impl Default for AudioParams {
    fn default() -> Self {
        AudioParams { efx: true }
    }
}
