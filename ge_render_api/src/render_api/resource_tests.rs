//! Unit tests for resource flags and mapped data helpers

use crate::render_api::{BindFlags, ClearFlags, GraphicsBox, MappedSubresource, ResourceUsage};

#[test]
fn test_bind_flags_native_bit_values() {
    assert_eq!(BindFlags::VERTEX_BUFFER.bits(), 0x1);
    assert_eq!(BindFlags::SHADER_RESOURCE.bits(), 0x8);
    assert_eq!(BindFlags::RENDER_TARGET.bits(), 0x20);
    assert_eq!(BindFlags::DEPTH_STENCIL.bits(), 0x40);
    assert_eq!(BindFlags::UNORDERED_ACCESS.bits(), 0x80);
}

#[test]
fn test_clear_flags_combine() {
    let both = ClearFlags::DEPTH | ClearFlags::STENCIL;
    assert!(both.contains(ClearFlags::DEPTH));
    assert!(both.contains(ClearFlags::STENCIL));
    assert_eq!(both.bits(), 0x3);
}

#[test]
fn test_resource_usage_default() {
    assert_eq!(ResourceUsage::default(), ResourceUsage::Default);
}

#[test]
fn test_graphics_box_rect_is_single_slice() {
    let b = GraphicsBox::rect(1, 2, 3, 4);
    assert_eq!((b.front, b.back), (0, 1));
    assert_eq!((b.right - b.left, b.bottom - b.top), (2, 2));
}

#[test]
fn test_mapped_subresource_empty_sentinel() {
    let mapped = MappedSubresource::empty();
    assert!(mapped.is_empty());
    assert!(mapped.texels::<u32>().is_empty());
    assert!(mapped.row(0).is_empty());
}

#[test]
fn test_mapped_subresource_texels_and_rows() {
    let values: [u32; 4] = [1, 2, 3, 4];
    let mapped = MappedSubresource {
        data: bytemuck::cast_slice(&values).to_vec(),
        row_pitch: 8,
        depth_pitch: 16,
    };

    assert_eq!(mapped.texels::<u32>(), values.to_vec());
    assert_eq!(mapped.row(1), bytemuck::cast_slice::<u32, u8>(&values[2..]));
    assert!(mapped.row(2).is_empty());
}

#[test]
fn test_mapped_subresource_texels_ignore_trailing_bytes() {
    let mapped = MappedSubresource { data: vec![1, 0, 0, 0, 9], row_pitch: 5, depth_pitch: 5 };
    assert_eq!(mapped.texels::<u32>(), vec![1]);
}
