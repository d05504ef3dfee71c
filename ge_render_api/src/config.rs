//! Configuration for the render API
//!
//! Settings are read once, when the device is initialized, from a
//! [`ConfigProvider`] supplied by the engine. [`MapConfig`] is an in-memory
//! provider for tools and tests.

use rustc_hash::FxHashMap;

/// Section holding every render API key
pub const RENDER_API_SECTION: &str = "RenderAPI";

/// Key/value configuration source
pub trait ConfigProvider: Send + Sync {
    /// Raw string value of `section/key`, if present
    fn get(&self, section: &str, key: &str) -> Option<String>;

    /// String value or `default`
    fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key).unwrap_or_else(|| default.to_string())
    }

    /// Signed integer value or `default` (also used when the value does not parse)
    fn get_i32(&self, section: &str, key: &str, default: i32) -> i32 {
        self.get(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Unsigned integer value or `default` (also used when the value does not parse)
    fn get_u32(&self, section: &str, key: &str, default: u32) -> u32 {
        self.get(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// In-memory configuration
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: FxHashMap<(String, String), String>,
}

impl MapConfig {
    /// Create an empty configuration (every lookup returns its default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `section/key` to `value`, replacing any previous value
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert((section.to_string(), key.to_string()), value.into());
        self
    }
}

impl ConfigProvider for MapConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.values.get(&(section.to_string(), key.to_string())).cloned()
    }
}

/// How the swap chain stretches the back buffer to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingMode {
    /// No scaling, the back buffer is presented at its own size
    None,
    /// Stretch to the window size
    Stretch,
    /// Stretch while keeping the aspect ratio
    AspectRatioStretch,
}

impl ScalingMode {
    /// Parse a configuration string ("STRETCH", "ASPECT", anything else is None)
    pub fn from_config(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "STRETCH" => ScalingMode::Stretch,
            "ASPECT" => ScalingMode::AspectRatioStretch,
            _ => ScalingMode::None,
        }
    }
}

/// Flip-model presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipMode {
    /// Buffers are presented in order and kept
    Sequential,
    /// Buffer contents are discarded after present
    Discard,
}

impl FlipMode {
    /// Parse a configuration string ("SEQUENTIAL", anything else is Discard)
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("SEQUENTIAL") {
            FlipMode::Sequential
        } else {
            FlipMode::Discard
        }
    }
}

/// Render API settings
#[derive(Debug, Clone)]
pub struct RenderApiConfig {
    /// Requested adapter index (negative values clamp to 0)
    pub adapter_index: i32,
    /// Number of swap chain buffers
    pub buffer_count: u32,
    /// Swap chain scaling
    pub scaling: ScalingMode,
    /// Swap chain flip model
    pub flip_mode: FlipMode,
    /// Maximum number of frames queued by the driver
    pub max_frame_latency: u32,
    /// Ordered `#include` search directories, relative to the working directory
    pub shader_include_dirs: Vec<String>,
    /// Create the native device with its debug layer
    pub enable_debug_layer: bool,
}

impl Default for RenderApiConfig {
    fn default() -> Self {
        Self {
            adapter_index: 0,
            buffer_count: 2,
            scaling: ScalingMode::None,
            flip_mode: FlipMode::Discard,
            max_frame_latency: 1,
            shader_include_dirs: vec![
                "Data/Engine/Shaders/".to_string(),
                "Data/Shaders/".to_string(),
            ],
            enable_debug_layer: cfg!(debug_assertions),
        }
    }
}

impl RenderApiConfig {
    /// Read every key of the `RenderAPI` section, falling back to defaults
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        let defaults = Self::default();
        let section = RENDER_API_SECTION;
        Self {
            adapter_index: provider.get_i32(section, "AdapterIndex", defaults.adapter_index),
            buffer_count: provider.get_u32(section, "BufferCount", defaults.buffer_count),
            scaling: ScalingMode::from_config(&provider.get_string(section, "Scaling", "None")),
            flip_mode: FlipMode::from_config(&provider.get_string(section, "FlipMode", "None")),
            max_frame_latency: provider.get_u32(section, "MaximumFrameLatency", defaults.max_frame_latency),
            ..defaults
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
