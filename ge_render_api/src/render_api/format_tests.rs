//! Unit tests for GraphicsFormat names

use crate::render_api::GraphicsFormat;

#[test]
fn test_name_round_trip_for_every_format() {
    for &format in GraphicsFormat::ALL {
        assert_eq!(GraphicsFormat::from_name(format.name()), format, "{}", format.name());
    }
}

#[test]
fn test_names_are_unique() {
    let mut names: Vec<&str> = GraphicsFormat::ALL.iter().map(|f| f.name()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len());
}

#[test]
fn test_unknown_name_gives_unknown() {
    assert_eq!(GraphicsFormat::from_name("R8G8B8A8_unorm"), GraphicsFormat::UNKNOWN);
    assert_eq!(GraphicsFormat::from_name(""), GraphicsFormat::UNKNOWN);
}

#[test]
fn test_opaque_420_keeps_native_spelling() {
    assert_eq!(GraphicsFormat::OPAQUE_420.name(), "420_OPAQUE");
    assert_eq!(GraphicsFormat::from_name("420_OPAQUE"), GraphicsFormat::OPAQUE_420);
}

#[test]
fn test_depth_and_block_compressed_queries() {
    assert!(GraphicsFormat::D24_UNORM_S8_UINT.is_depth());
    assert!(GraphicsFormat::D16_UNORM.is_depth());
    assert!(!GraphicsFormat::R32_FLOAT.is_depth());

    assert!(GraphicsFormat::BC7_UNORM_SRGB.is_block_compressed());
    assert!(!GraphicsFormat::B8G8R8A8_UNORM.is_block_compressed());
}

// ============================================================================
// BITS PER PIXEL
// ============================================================================

#[test]
fn test_bits_per_pixel_common_formats() {
    let expected = [
        (GraphicsFormat::R32G32B32A32_FLOAT, 128),
        (GraphicsFormat::R32G32B32_FLOAT, 96),
        (GraphicsFormat::R16G16B16A16_FLOAT, 64),
        (GraphicsFormat::R8G8B8A8_UNORM, 32),
        (GraphicsFormat::D24_UNORM_S8_UINT, 32),
        (GraphicsFormat::D16_UNORM, 16),
        (GraphicsFormat::R8_UNORM, 8),
        (GraphicsFormat::BC1_UNORM, 4),
        (GraphicsFormat::BC7_UNORM, 8),
        (GraphicsFormat::R1_UNORM, 1),
        (GraphicsFormat::UNKNOWN, 0),
    ];

    for (format, bits) in expected {
        assert_eq!(format.bits_per_pixel(), bits, "{}", format);
    }
}
