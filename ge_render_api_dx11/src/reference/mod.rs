//! Software reference driver
//!
//! Implements every native trait on the CPU: objects live in a
//! reference-counted table, textures keep their bytes, the context records
//! bindings and submissions, and a small HLSL front end produces bytecode
//! carrying an input signature. Used by the test suites and for running the
//! backend headless. [`ReferenceDriver`] exposes what a debug layer would.

mod compiler;
mod context;
mod device;
mod objects;
mod swap_chain;
mod texels;

pub use compiler::ReferenceCompiler;
pub use context::{BoundSlots, DrawCall, ReferenceContext, StageSlots};
pub use device::ReferenceDevice;
pub use swap_chain::ReferenceSwapChain;

use std::sync::{Arc, Mutex, MutexGuard};

use raw_window_handle::RawWindowHandle;
use rustc_hash::FxHashMap;

use crate::native::*;
use objects::ObjectTable;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Environment the reference driver pretends to run in
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    /// Adapters returned by enumeration, in order
    pub adapters: Vec<AdapterDesc>,
    /// Bytes of resource memory before creation fails with `E_OUTOFMEMORY`
    pub memory_budget: u64,
    /// Client area of every window
    pub client_size: (u32, u32),
    /// Desktop size of each adapter's first output
    pub output_size: Option<(u32, u32)>,
    pub screen_size: (u32, u32),
    /// Make `create_device` fail
    pub fail_device_creation: bool,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            adapters: vec![AdapterDesc {
                description: "Reference Adapter".to_string(),
                vendor_id: 0x1414,
                device_id: 0x8c,
                dedicated_video_memory: 1 << 30,
            }],
            memory_budget: 1 << 30,
            client_size: (800, 600),
            output_size: Some((1920, 1080)),
            screen_size: (1920, 1080),
            fail_device_creation: false,
        }
    }
}

// ============================================================================
// SHARED STATE
// ============================================================================

/// Counters and logs a debug layer would expose
#[derive(Debug, Clone, Default)]
pub(crate) struct DriverStats {
    pub created: FxHashMap<&'static str, u32>,
    pub format_support_queries: u32,
    pub multisample_queries: u32,
    pub draw_calls: Vec<DrawCall>,
    pub present_count: u32,
    pub last_sync_interval: Option<u32>,
    pub generate_mips_calls: u32,
    pub discarded_views: Vec<RawHandle>,
    pub clear_state_calls: u32,
    pub resize_count: u32,
    pub frame_latency: Option<u32>,
    pub device_flags: Option<CreateDeviceFlag>,
    pub swap_chains: Vec<SwapChainDesc>,
}

pub(crate) struct DriverState {
    pub objects: ObjectTable,
    pub context: BoundSlots,
    pub stats: DriverStats,
    pub config: ReferenceConfig,
}

/// State behind every device, context and swap chain of one factory
pub(crate) struct Shared {
    state: Mutex<DriverState>,
}

impl Shared {
    fn new(config: ReferenceConfig) -> Self {
        Self {
            state: Mutex::new(DriverState {
                objects: ObjectTable::default(),
                context: BoundSlots::default(),
                stats: DriverStats::default(),
                config,
            }),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(feature = "leak-report")]
impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.lock();
        if state.objects.len() == 0 {
            return;
        }
        let live: Vec<LiveObject> = state
            .objects
            .iter()
            .map(|(handle, object)| LiveObject {
                handle,
                kind: object.data.kind(),
                name: object.name.clone(),
                ref_count: object.ref_count,
            })
            .collect();
        crate::debug::print_live_objects_report(&live);
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Entry point of the software driver
#[derive(Clone)]
pub struct ReferenceFactory {
    shared: Arc<Shared>,
    compiler: Arc<ReferenceCompiler>,
}

impl ReferenceFactory {
    pub fn new(config: ReferenceConfig) -> Self {
        Self { shared: Arc::new(Shared::new(config)), compiler: Arc::new(ReferenceCompiler) }
    }

    /// Inspection handle sharing this factory's state
    pub fn driver(&self) -> ReferenceDriver {
        ReferenceDriver { shared: self.shared.clone() }
    }
}

impl Default for ReferenceFactory {
    fn default() -> Self {
        Self::new(ReferenceConfig::default())
    }
}

impl NativeFactory for ReferenceFactory {
    fn enum_adapters(&self) -> Vec<AdapterDesc> {
        self.shared.lock().config.adapters.clone()
    }

    fn create_device(
        &self,
        adapter: usize,
        flags: CreateDeviceFlag,
        feature_levels: &[FeatureLevel],
    ) -> NativeResult<(Arc<dyn NativeDevice>, Arc<dyn NativeContext>, FeatureLevel)> {
        {
            let mut state = self.shared.lock();
            if state.config.fail_device_creation {
                return Err(HResult::E_FAIL);
            }
            if adapter >= state.config.adapters.len() {
                return Err(HResult::DXGI_ERROR_NOT_FOUND);
            }
            state.stats.device_flags = Some(flags);
        }

        let level = feature_levels.first().copied().unwrap_or(FeatureLevel::Level11_1);
        let device: Arc<dyn NativeDevice> = Arc::new(ReferenceDevice { shared: self.shared.clone() });
        let context: Arc<dyn NativeContext> = Arc::new(ReferenceContext { shared: self.shared.clone() });
        Ok((device, context, level))
    }

    fn create_swap_chain(
        &self,
        _device: &Arc<dyn NativeDevice>,
        _window: &RawWindowHandle,
        desc: &SwapChainDesc,
    ) -> NativeResult<Box<dyn NativeSwapChain>> {
        Ok(Box::new(ReferenceSwapChain::create(self.shared.clone(), desc)?))
    }

    fn client_size(&self, _window: &RawWindowHandle) -> NativeResult<(u32, u32)> {
        Ok(self.shared.lock().config.client_size)
    }

    fn output_desktop_size(&self, adapter: usize) -> Option<(u32, u32)> {
        let state = self.shared.lock();
        if adapter >= state.config.adapters.len() {
            return None;
        }
        state.config.output_size
    }

    fn primary_screen_size(&self) -> (u32, u32) {
        self.shared.lock().config.screen_size
    }

    fn set_maximum_frame_latency(&self, _device: &Arc<dyn NativeDevice>, latency: u32) -> NativeResult<()> {
        if latency == 0 || latency > 16 {
            return Err(HResult::E_INVALIDARG);
        }
        self.shared.lock().stats.frame_latency = Some(latency);
        Ok(())
    }

    fn compiler(&self) -> Arc<dyn NativeCompiler> {
        self.compiler.clone()
    }
}

// ============================================================================
// INSPECTION
// ============================================================================

/// Read access to the driver's objects, bindings and counters
#[derive(Clone)]
pub struct ReferenceDriver {
    shared: Arc<Shared>,
}

impl ReferenceDriver {
    /// Number of live objects of every kind
    pub fn live_object_count(&self) -> usize {
        self.shared.lock().objects.len()
    }

    /// Number of live objects of one native interface ("ID3D11Texture2D", ...)
    pub fn live_count(&self, kind: &str) -> usize {
        self.shared.lock().objects.iter().filter(|(_, o)| o.data.kind() == kind).count()
    }

    /// Reference count of an object; `None` once destroyed
    pub fn ref_count(&self, handle: RawHandle) -> Option<u32> {
        self.shared.lock().objects.get(handle).map(|o| o.ref_count)
    }

    pub fn object_name(&self, handle: RawHandle) -> Option<String> {
        self.shared.lock().objects.get(handle).map(|o| o.name.clone())
    }

    /// Objects of one kind created since start-up
    pub fn created(&self, kind: &str) -> u32 {
        self.shared.lock().stats.created.get(kind).copied().unwrap_or(0)
    }

    /// Bytes held by live resources
    pub fn allocated_bytes(&self) -> u64 {
        self.shared.lock().objects.allocated()
    }

    pub fn set_memory_budget(&self, bytes: u64) {
        self.shared.lock().config.memory_budget = bytes;
    }

    pub fn format_support_queries(&self) -> u32 {
        self.shared.lock().stats.format_support_queries
    }

    pub fn multisample_queries(&self) -> u32 {
        self.shared.lock().stats.multisample_queries
    }

    /// Copy of everything currently bound to the pipeline
    pub fn bound_slots(&self) -> BoundSlots {
        self.shared.lock().context.clone()
    }

    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.shared.lock().stats.draw_calls.clone()
    }

    pub fn present_count(&self) -> u32 {
        self.shared.lock().stats.present_count
    }

    pub fn last_sync_interval(&self) -> Option<u32> {
        self.shared.lock().stats.last_sync_interval
    }

    pub fn generate_mips_calls(&self) -> u32 {
        self.shared.lock().stats.generate_mips_calls
    }

    pub fn discarded_views(&self) -> Vec<RawHandle> {
        self.shared.lock().stats.discarded_views.clone()
    }

    pub fn clear_state_calls(&self) -> u32 {
        self.shared.lock().stats.clear_state_calls
    }

    pub fn resize_count(&self) -> u32 {
        self.shared.lock().stats.resize_count
    }

    pub fn frame_latency(&self) -> Option<u32> {
        self.shared.lock().stats.frame_latency
    }

    pub fn device_flags(&self) -> Option<CreateDeviceFlag> {
        self.shared.lock().stats.device_flags
    }

    /// Descriptions of every swap chain created, in order
    pub fn swap_chains(&self) -> Vec<SwapChainDesc> {
        self.shared.lock().stats.swap_chains.clone()
    }

    pub fn texture_desc(&self, texture: RawHandle) -> Option<Texture2dDesc> {
        self.shared.lock().objects.texture(texture).map(|t| t.desc)
    }

    /// Texture behind a view, or the texture itself
    pub fn texture_of(&self, handle: RawHandle) -> Option<RawHandle> {
        self.shared.lock().objects.texture_of(handle)
    }

    /// Bytes of one texture subresource (`mip + slice * mip_levels`)
    pub fn subresource(&self, texture: RawHandle, index: u32) -> Option<Vec<u8>> {
        let state = self.shared.lock();
        state.objects.texture(texture)?.subresources.get(index as usize).cloned()
    }

    /// Current contents of a buffer
    pub fn buffer_data(&self, buffer: RawHandle) -> Option<Vec<u8>> {
        self.shared.lock().objects.buffer(buffer).map(|b| b.data.clone())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
