//! Unit tests for config.rs

use crate::config::{ConfigProvider, FlipMode, MapConfig, RenderApiConfig, ScalingMode, RENDER_API_SECTION};

#[test]
fn test_empty_provider_gives_defaults() {
    let config = RenderApiConfig::from_provider(&MapConfig::new());
    assert_eq!(config.adapter_index, 0);
    assert_eq!(config.buffer_count, 2);
    assert_eq!(config.scaling, ScalingMode::None);
    assert_eq!(config.flip_mode, FlipMode::Discard);
    assert_eq!(config.max_frame_latency, 1);
    assert_eq!(config.shader_include_dirs, vec!["Data/Engine/Shaders/", "Data/Shaders/"]);
}

#[test]
fn test_provider_values_are_read() {
    let mut map = MapConfig::new();
    map.set(RENDER_API_SECTION, "AdapterIndex", "2")
        .set(RENDER_API_SECTION, "BufferCount", "3")
        .set(RENDER_API_SECTION, "Scaling", "aspect")
        .set(RENDER_API_SECTION, "FlipMode", "Sequential")
        .set(RENDER_API_SECTION, "MaximumFrameLatency", "4");

    let config = RenderApiConfig::from_provider(&map);
    assert_eq!(config.adapter_index, 2);
    assert_eq!(config.buffer_count, 3);
    assert_eq!(config.scaling, ScalingMode::AspectRatioStretch);
    assert_eq!(config.flip_mode, FlipMode::Sequential);
    assert_eq!(config.max_frame_latency, 4);
}

#[test]
fn test_unparsable_numbers_fall_back() {
    let mut map = MapConfig::new();
    map.set(RENDER_API_SECTION, "BufferCount", "many");
    assert_eq!(map.get_u32(RENDER_API_SECTION, "BufferCount", 2), 2);
    assert_eq!(map.get_i32(RENDER_API_SECTION, "Missing", -1), -1);
}

#[test]
fn test_scaling_and_flip_parsing() {
    assert_eq!(ScalingMode::from_config("STRETCH"), ScalingMode::Stretch);
    assert_eq!(ScalingMode::from_config("stretch"), ScalingMode::Stretch);
    assert_eq!(ScalingMode::from_config("whatever"), ScalingMode::None);
    assert_eq!(FlipMode::from_config("SEQUENTIAL"), FlipMode::Sequential);
    assert_eq!(FlipMode::from_config("None"), FlipMode::Discard);
}

#[test]
fn test_sections_are_distinct() {
    let mut map = MapConfig::new();
    map.set("Audio", "BufferCount", "8");
    assert_eq!(map.get_u32(RENDER_API_SECTION, "BufferCount", 2), 2);
    assert_eq!(map.get_string("Audio", "BufferCount", ""), "8");
}
