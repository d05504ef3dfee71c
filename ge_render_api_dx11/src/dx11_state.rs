/// Fixed-function state objects - rasterizer, depth-stencil, blend, sampler

use std::sync::RwLock;

use ge_render_api::glam::Vec4;

use ge_render_api::ge::render::{LogicalResource, ResourceKind};

use crate::com_ptr::{ComPtr, ResourceCell};
use crate::native::RawHandle;

/// Native state handle and debug name
pub(crate) struct StateObject {
    state: ResourceCell<ComPtr>,
    name: RwLock<String>,
}

impl StateObject {
    fn new(state: ComPtr) -> Self {
        Self { state: ResourceCell::new(state), name: RwLock::new(String::new()) }
    }
}

macro_rules! state_resource {
    ($ty:ident, $kind:ident) => {
        impl $ty {
            pub(crate) fn raw(&self) -> Option<RawHandle> {
                self.inner.state.with(ComPtr::raw)
            }
        }

        impl LogicalResource for $ty {
            fn kind(&self) -> ResourceKind {
                ResourceKind::$kind
            }

            fn name(&self) -> String {
                self.inner.name.read().unwrap_or_else(|e| e.into_inner()).clone()
            }

            fn set_debug_name(&self, name: &str) {
                *self.inner.name.write().unwrap_or_else(|e| e.into_inner()) = name.to_string();
                self.inner.state.with(|s| s.set_debug_name(name));
            }

            fn memory_usage(&self) -> usize {
                0
            }

            fn release(&self) {
                drop(self.inner.state.take());
            }

            fn is_loaded(&self) -> bool {
                self.inner.state.is_set()
            }
        }
    };
}

// ===== RASTERIZER =====

pub struct Dx11RasterizerState {
    inner: StateObject,
}

impl Dx11RasterizerState {
    pub(crate) fn new(state: ComPtr) -> Self {
        Self { inner: StateObject::new(state) }
    }
}

state_resource!(Dx11RasterizerState, RasterizerState);

// ===== DEPTH STENCIL =====

pub struct Dx11DepthStencilState {
    inner: StateObject,
}

impl Dx11DepthStencilState {
    pub(crate) fn new(state: ComPtr) -> Self {
        Self { inner: StateObject::new(state) }
    }
}

state_resource!(Dx11DepthStencilState, DepthStencilState);

// ===== BLEND =====

/// Blend state with the factor and sample mask supplied on every bind
pub struct Dx11BlendState {
    inner: StateObject,
    blend_factor: Vec4,
    sample_mask: u32,
}

impl Dx11BlendState {
    pub(crate) fn new(state: ComPtr, blend_factor: Vec4, sample_mask: u32) -> Self {
        Self { inner: StateObject::new(state), blend_factor, sample_mask }
    }

    pub fn blend_factor(&self) -> Vec4 {
        self.blend_factor
    }

    pub fn sample_mask(&self) -> u32 {
        self.sample_mask
    }
}

state_resource!(Dx11BlendState, BlendState);

// ===== SAMPLER =====

pub struct Dx11SamplerState {
    inner: StateObject,
}

impl Dx11SamplerState {
    pub(crate) fn new(state: ComPtr) -> Self {
        Self { inner: StateObject::new(state) }
    }
}

state_resource!(Dx11SamplerState, SamplerState);
