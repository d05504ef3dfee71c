/// Multisample support cache, one device query per format

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use ge_render_api::ge::render::{GraphicsFormat, MsaaSampleDesc};

use crate::native::{DxgiFormat, NativeDevice};
use crate::translate;

/// Highest sample count queried
pub const MAX_MSAA_SAMPLES: u32 = 32;

/// Query outcome for one format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsaaSupport {
    NotQueried,
    Supported(MsaaSampleDesc),
    Unsupported,
}

impl MsaaSupport {
    pub fn sample_desc(self) -> Option<MsaaSampleDesc> {
        match self {
            MsaaSupport::Supported(desc) => Some(desc),
            _ => None,
        }
    }
}

/// Memoized multisample capabilities, owned by the render API instance
#[derive(Default)]
pub struct MsaaSupportCache {
    entries: Mutex<FxHashMap<GraphicsFormat, MsaaSupport>>,
}

impl MsaaSupportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached outcome without querying the device
    pub fn lookup(&self, format: GraphicsFormat) -> MsaaSupport {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(&format).copied().unwrap_or(MsaaSupport::NotQueried)
    }

    /// Cached outcome, querying the device the first time a format is seen
    pub fn get_or_query(&self, device: &dyn NativeDevice, format: GraphicsFormat) -> MsaaSupport {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        *entries.entry(format).or_insert_with(|| query(device, format))
    }
}

/// Highest sample count with at least one quality level
fn query(device: &dyn NativeDevice, format: GraphicsFormat) -> MsaaSupport {
    let native = translate::to_native(format);
    if native == DxgiFormat::UNKNOWN {
        return MsaaSupport::Unsupported;
    }
    (1..=MAX_MSAA_SAMPLES)
        .rev()
        .find_map(|samples| match device.check_multisample_quality_levels(native, samples) {
            Ok(levels) if levels > 0 => Some(MsaaSampleDesc { samples, quality: levels - 1 }),
            _ => None,
        })
        .map_or(MsaaSupport::Unsupported, MsaaSupport::Supported)
}

#[cfg(test)]
#[path = "dx11_msaa_cache_tests.rs"]
mod tests;
