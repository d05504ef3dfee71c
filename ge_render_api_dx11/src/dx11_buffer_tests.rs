use super::*;
use crate::native::{CreateDeviceFlag, NativeFactory};
use crate::reference::{ReferenceDriver, ReferenceFactory};
use ge_render_api::ge::render::{VertexElement, VertexElementSemantic, VertexElementType};
use ge_render_api::ge::Error;

fn device() -> (Arc<dyn NativeDevice>, ReferenceDriver) {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    (device, factory.driver())
}

fn position_uv() -> Arc<VertexDeclaration> {
    Arc::new(
        VertexDeclaration::new(&[
            VertexElement::new(0, VertexElementType::Float3, VertexElementSemantic::Position, 0),
            VertexElement::new(12, VertexElementType::Float2, VertexElementSemantic::TexCoord, 0),
        ])
        .unwrap(),
    )
}

#[test]
fn test_index_buffer_reports_size_and_format() {
    let (device, driver) = device();
    let inner = NativeBuffer::create(&device, 600, None, ResourceUsage::Default, BindFlag::INDEX_BUFFER, 2).unwrap();
    let buffer = Dx11IndexBuffer::new(inner, IndexBufferFormat::R16);

    assert_eq!(buffer.size(), 600);
    assert_eq!(buffer.memory_usage(), 600);
    assert_eq!(buffer.stride(), 2);
    assert_eq!(buffer.format(), IndexBufferFormat::R16);
    assert_eq!(buffer.kind(), ResourceKind::IndexBuffer);
    assert_eq!(driver.allocated_bytes(), 600);
}

#[test]
fn test_dynamic_buffers_get_cpu_write() {
    let (device, _driver) = device();
    let inner = NativeBuffer::create(&device, 64, None, ResourceUsage::Dynamic, BindFlag::CONSTANT_BUFFER, 0).unwrap();
    let buffer = Dx11ConstantBuffer::new(inner);

    assert_eq!(buffer.usage(), ResourceUsage::Dynamic);
    assert_eq!(buffer.cpu_access(), CpuAccessFlags::WRITE);
    assert_eq!(buffer.stride(), 0);
}

#[test]
fn test_vertex_buffer_declaration_is_weak() {
    let (device, _driver) = device();
    let declaration = position_uv();
    let data = [0u8; 20 * 3];
    let inner = NativeBuffer::create(&device, data.len(), Some(&data), ResourceUsage::Immutable, BindFlag::VERTEX_BUFFER, 20)
        .unwrap();
    let buffer = Dx11VertexBuffer::new(inner, &declaration);

    assert_eq!(buffer.declaration().as_deref(), Some(&*declaration));
    drop(declaration);
    assert!(buffer.declaration().is_none());
    assert!(buffer.is_loaded());
}

#[test]
fn test_release_and_debug_name() {
    let (device, driver) = device();
    let inner = NativeBuffer::create(&device, 32, None, ResourceUsage::Default, BindFlag::VERTEX_BUFFER, 16).unwrap();
    let raw = inner.raw().unwrap();
    let declaration = position_uv();
    let buffer = Dx11VertexBuffer::new(inner, &declaration);

    buffer.set_debug_name("Quad");
    assert_eq!(buffer.name(), "Quad");
    assert_eq!(driver.object_name(raw).as_deref(), Some("Quad"));

    buffer.release();
    assert!(!buffer.is_loaded());
    assert_eq!(buffer.native_resource(), None);
    assert_eq!(driver.ref_count(raw), None);

    buffer.release();
    assert_eq!(driver.live_object_count(), 0);
}

#[test]
fn test_immutable_buffer_without_data_fails() {
    let (device, driver) = device();

    let result = NativeBuffer::create(&device, 48, None, ResourceUsage::Immutable, BindFlag::VERTEX_BUFFER, 12);

    assert!(matches!(result, Err(Error::DeviceError { .. })));
    assert_eq!(driver.live_object_count(), 0);
}

#[test]
fn test_unaligned_constant_buffer_fails() {
    let (device, _driver) = device();
    let result = NativeBuffer::create(&device, 20, None, ResourceUsage::Default, BindFlag::CONSTANT_BUFFER, 0);
    let err = result.err().unwrap();
    assert!(err.to_string().contains("Could not create a 20 byte buffer"));
}

#[test]
#[should_panic(expected = "buffer size must be non-zero")]
fn test_zero_size_panics() {
    let (device, _driver) = device();
    let _ = NativeBuffer::create(&device, 0, None, ResourceUsage::Default, BindFlag::VERTEX_BUFFER, 4);
}

#[test]
#[cfg(target_pointer_width = "64")]
#[should_panic(expected = "buffer size must fit in 32 bits")]
fn test_oversized_buffer_panics() {
    let (device, _driver) = device();
    let _ = NativeBuffer::create(&device, u32::MAX as usize + 1, None, ResourceUsage::Default, BindFlag::VERTEX_BUFFER, 4);
}

#[test]
#[should_panic(expected = "buffer bind flags must not be empty")]
fn test_empty_bind_flags_panic() {
    let (device, _driver) = device();
    let _ = NativeBuffer::create(&device, 16, None, ResourceUsage::Default, BindFlag::empty(), 4);
}
