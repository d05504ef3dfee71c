/// Swap chain of the software driver

use std::sync::{Arc, Mutex};

use super::objects::{mip_layout, ObjectData, TextureObject};
use super::Shared;
use crate::native::*;

const MAX_BUFFER_COUNT: u32 = 16;

struct SwapChainState {
    desc: SwapChainDesc,
    buffer: RawHandle,
}

/// `IDXGISwapChain1` of the software driver
///
/// Owns one reference on its back buffer texture.
pub struct ReferenceSwapChain {
    shared: Arc<Shared>,
    state: Mutex<SwapChainState>,
}

impl ReferenceSwapChain {
    pub(crate) fn create(shared: Arc<Shared>, desc: &SwapChainDesc) -> NativeResult<Self> {
        let flip = matches!(desc.swap_effect, SwapEffect::FlipSequential | SwapEffect::FlipDiscard);
        let min_buffers = if flip { 2 } else { 1 };
        if desc.buffer_count < min_buffers || desc.buffer_count > MAX_BUFFER_COUNT {
            return Err(HResult::DXGI_ERROR_INVALID_CALL);
        }
        if flip && desc.sample_desc.count != 1 {
            return Err(HResult::DXGI_ERROR_INVALID_CALL);
        }
        let displayable = super::device::format_support(desc.format)
            .map(|s| s.contains(FormatSupport::DISPLAY))
            .unwrap_or(false);
        if !displayable {
            return Err(HResult::E_INVALIDARG);
        }

        let mut desc = *desc;
        {
            let state = shared.lock();
            if desc.width == 0 || desc.height == 0 {
                (desc.width, desc.height) = state.config.client_size;
            }
        }

        let buffer = create_back_buffer(&shared, &desc);
        shared.lock().stats.swap_chains.push(desc);
        Ok(Self { shared, state: Mutex::new(SwapChainState { desc, buffer }) })
    }

    fn state(&self) -> std::sync::MutexGuard<'_, SwapChainState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn create_back_buffer(shared: &Shared, desc: &SwapChainDesc) -> RawHandle {
    let texture = Texture2dDesc {
        width: desc.width,
        height: desc.height,
        mip_levels: 1,
        array_size: 1,
        format: desc.format,
        sample_desc: desc.sample_desc,
        usage: Usage::Default,
        bind_flags: BindFlag::RENDER_TARGET,
        cpu_access_flags: CpuAccessFlag::empty(),
        misc_flags: ResourceMiscFlag::empty(),
    };
    let (pitch, rows) = mip_layout(desc.format, desc.width, desc.height, 0);
    let data = ObjectData::Texture(TextureObject {
        desc: texture,
        subresources: vec![vec![0u8; (pitch * rows) as usize]],
        mapped: Vec::new(),
    });

    let mut state = shared.lock();
    *state.stats.created.entry(data.kind()).or_insert(0) += 1;
    state.objects.insert(data)
}

impl NativeSwapChain for ReferenceSwapChain {
    fn desc(&self) -> SwapChainDesc {
        self.state().desc
    }

    fn get_buffer(&self, index: u32) -> NativeResult<RawHandle> {
        if index != 0 {
            return Err(HResult::DXGI_ERROR_INVALID_CALL);
        }
        let buffer = self.state().buffer;
        self.shared.lock().objects.add_ref(buffer);
        Ok(buffer)
    }

    fn resize_buffers(&self, buffer_count: u32, width: u32, height: u32, format: DxgiFormat, _flags: u32) -> NativeResult<()> {
        let mut swap_chain = self.state();
        {
            let mut state = self.shared.lock();
            let outstanding = state.objects.get(swap_chain.buffer).map_or(0, |o| o.ref_count);
            if outstanding > 1 {
                return Err(HResult::DXGI_ERROR_INVALID_CALL);
            }
            if buffer_count > MAX_BUFFER_COUNT {
                return Err(HResult::DXGI_ERROR_INVALID_CALL);
            }

            let desc = &mut swap_chain.desc;
            if buffer_count != 0 {
                desc.buffer_count = buffer_count;
            }
            if format != DxgiFormat::UNKNOWN {
                desc.format = format;
            }
            (desc.width, desc.height) = if width == 0 || height == 0 { state.config.client_size } else { (width, height) };

            state.objects.release(swap_chain.buffer);
            state.stats.resize_count += 1;
        }

        swap_chain.buffer = create_back_buffer(&self.shared, &swap_chain.desc);
        Ok(())
    }

    fn present(&self, sync_interval: u32, _flags: u32) -> NativeResult<()> {
        let mut state = self.shared.lock();
        state.stats.present_count += 1;
        state.stats.last_sync_interval = Some(sync_interval);
        Ok(())
    }
}

impl Drop for ReferenceSwapChain {
    fn drop(&mut self) {
        let buffer = self.state().buffer;
        self.shared.lock().objects.release(buffer);
    }
}
