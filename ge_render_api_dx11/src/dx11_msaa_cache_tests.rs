use super::*;
use crate::native::{CreateDeviceFlag, NativeFactory};
use crate::reference::ReferenceFactory;

#[test]
fn test_query_picks_highest_count() {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    let driver = factory.driver();
    let cache = MsaaSupportCache::new();

    assert_eq!(cache.lookup(GraphicsFormat::R8G8B8A8_UNORM), MsaaSupport::NotQueried);
    let support = cache.get_or_query(&*device, GraphicsFormat::R8G8B8A8_UNORM);
    assert_eq!(support, MsaaSupport::Supported(MsaaSampleDesc { samples: 8, quality: 0 }));
    assert_eq!(cache.lookup(GraphicsFormat::R8G8B8A8_UNORM), support);

    // Counts above 8 are walked from MAX_MSAA_SAMPLES down before the hit
    assert_eq!(driver.multisample_queries(), MAX_MSAA_SAMPLES - 8 + 1);
}

#[test]
fn test_unknown_format_skips_the_device() {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    let driver = factory.driver();
    let cache = MsaaSupportCache::new();

    assert_eq!(cache.get_or_query(&*device, GraphicsFormat::UNKNOWN), MsaaSupport::Unsupported);
    assert_eq!(driver.multisample_queries(), 0);
    assert_eq!(cache.lookup(GraphicsFormat::UNKNOWN), MsaaSupport::Unsupported);
}

#[test]
fn test_single_sample_formats_walk_every_count() {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    let driver = factory.driver();
    let cache = MsaaSupportCache::new();

    let support = cache.get_or_query(&*device, GraphicsFormat::BC1_UNORM);
    assert_eq!(support, MsaaSupport::Supported(MsaaSampleDesc { samples: 1, quality: 0 }));
    let queries = driver.multisample_queries();
    assert_eq!(queries, MAX_MSAA_SAMPLES);

    assert_eq!(cache.get_or_query(&*device, GraphicsFormat::BC1_UNORM), support);
    assert_eq!(driver.multisample_queries(), queries);
    assert_eq!(MsaaSupport::Unsupported.sample_desc(), None);
}
