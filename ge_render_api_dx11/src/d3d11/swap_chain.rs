/// `IDXGISwapChain1` behind the native swap chain seam

use std::sync::{Mutex, MutexGuard};

use windows::Win32::Graphics::Direct3D11::ID3D11Texture2D;
use windows::Win32::Graphics::Dxgi::{IDXGISwapChain1, DXGI_PRESENT, DXGI_SWAP_CHAIN_FLAG};

use super::{convert, into_handle};
use crate::native::*;

pub struct D3D11SwapChain {
    swap_chain: IDXGISwapChain1,
    /// Description as created, updated on resize
    desc: Mutex<SwapChainDesc>,
}

// DXGI swap chains are free-threaded.
unsafe impl Send for D3D11SwapChain {}
unsafe impl Sync for D3D11SwapChain {}

impl D3D11SwapChain {
    pub(crate) fn new(swap_chain: IDXGISwapChain1, desc: SwapChainDesc) -> Self {
        let swap_chain = Self { swap_chain, desc: Mutex::new(desc) };
        swap_chain.refresh_size();
        swap_chain
    }

    fn desc_lock(&self) -> MutexGuard<'_, SwapChainDesc> {
        self.desc.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Zero-sized swap chains take their size from the window
    fn refresh_size(&self) {
        if let Ok(native) = unsafe { self.swap_chain.GetDesc1() } {
            let mut desc = self.desc_lock();
            desc.width = native.Width;
            desc.height = native.Height;
            desc.buffer_count = native.BufferCount;
            desc.format = convert::from_format(native.Format);
        }
    }
}

impl NativeSwapChain for D3D11SwapChain {
    fn desc(&self) -> SwapChainDesc {
        *self.desc_lock()
    }

    fn get_buffer(&self, index: u32) -> NativeResult<RawHandle> {
        let buffer: ID3D11Texture2D = unsafe { self.swap_chain.GetBuffer(index)? };
        Ok(into_handle(buffer))
    }

    fn resize_buffers(&self, buffer_count: u32, width: u32, height: u32, format: DxgiFormat, flags: u32) -> NativeResult<()> {
        unsafe {
            self.swap_chain.ResizeBuffers(
                buffer_count,
                width,
                height,
                convert::format(format),
                DXGI_SWAP_CHAIN_FLAG(flags as _),
            )?;
        }
        self.refresh_size();
        Ok(())
    }

    fn present(&self, sync_interval: u32, flags: u32) -> NativeResult<()> {
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT(flags as _)).ok()? };
        Ok(())
    }
}
