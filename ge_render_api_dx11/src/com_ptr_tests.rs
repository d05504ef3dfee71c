use super::*;
use crate::native::*;
use crate::reference::{ReferenceDriver, ReferenceFactory};

fn buffer() -> (ComPtr, ReferenceDriver) {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    let desc = BufferDesc {
        byte_width: 16,
        usage: Usage::Default,
        bind_flags: BindFlag::VERTEX_BUFFER,
        cpu_access_flags: CpuAccessFlag::empty(),
        misc_flags: ResourceMiscFlag::empty(),
        structure_byte_stride: 0,
    };
    let raw = device.create_buffer(&desc, None).unwrap();
    (ComPtr::from_raw(raw, device), factory.driver())
}

#[test]
fn test_clone_adds_and_drop_releases() {
    let (ptr, driver) = buffer();
    let raw = ptr.raw();
    assert_eq!(driver.ref_count(raw), Some(1));

    let copy = ptr.clone();
    assert_eq!(driver.ref_count(raw), Some(2));
    assert_eq!(copy, ptr);

    drop(copy);
    assert_eq!(driver.ref_count(raw), Some(1));
    drop(ptr);
    assert_eq!(driver.ref_count(raw), None);
}

#[test]
fn test_from_raw_opt() {
    let (ptr, _driver) = buffer();
    assert!(ComPtr::from_raw_opt(None, ptr.device()).is_none());
    assert_eq!(raw_of(Some(&ptr)), Some(ptr.raw()));
    assert_eq!(raw_of(None), None);
}

#[test]
fn test_debug_name_reaches_driver() {
    let (ptr, driver) = buffer();
    ptr.set_debug_name("vertices");
    assert_eq!(driver.object_name(ptr.raw()).as_deref(), Some("vertices"));
}

#[test]
fn test_resource_cell_take_releases_once() {
    let (ptr, driver) = buffer();
    let raw = ptr.raw();
    let cell = ResourceCell::new(ptr);

    assert!(cell.is_set());
    assert_eq!(cell.with(|p| p.raw()), Some(raw));

    drop(cell.take());
    assert_eq!(driver.ref_count(raw), None);
    assert!(!cell.is_set());
    assert!(cell.take().is_none());
    assert_eq!(cell.with(|p| p.raw()), None);
}

#[test]
fn test_resource_cell_replace_drops_previous() {
    let (first, driver) = buffer();
    let first_raw = first.raw();
    let second = first.clone();
    let cell: ResourceCell<ComPtr> = ResourceCell::empty();

    cell.replace(first);
    cell.replace(second);
    assert_eq!(driver.ref_count(first_raw), Some(1));
}
