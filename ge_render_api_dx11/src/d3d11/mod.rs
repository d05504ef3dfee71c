//! Direct3D 11 driver
//!
//! Implements the native seam on `ID3D11Device1`, `ID3D11DeviceContext1`,
//! `IDXGISwapChain1` and the FXC compiler. A [`RawHandle`] is the interface
//! pointer itself: creating an object moves its reference into the handle,
//! `add_ref` / `release` go straight to `IUnknown`, and calls that need a
//! typed interface borrow one from the pointer.

mod compiler;
mod context;
mod convert;
mod device;
mod swap_chain;

pub use compiler::D3D11Compiler;
pub use context::D3D11Context;
pub use device::D3D11Device;
pub use swap_chain::D3D11SwapChain;

use std::ffi::c_void;
use std::sync::Arc;

use raw_window_handle::RawWindowHandle;
use windows::core::{IUnknown, Interface};
use windows::Win32::Foundation::{HMODULE, HWND, RECT};
use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_UNKNOWN, D3D_FEATURE_LEVEL};
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, ID3D11Device1, ID3D11DeviceContext, ID3D11DeviceContext1,
    D3D11_CREATE_DEVICE_FLAG, D3D11_SDK_VERSION,
};
use windows::Win32::Graphics::Dxgi::{
    CreateDXGIFactory1, IDXGIAdapter1, IDXGIDevice1, IDXGIFactory2, DXGI_SWAP_CHAIN_FULLSCREEN_DESC,
};
use windows::Win32::UI::WindowsAndMessaging::{GetClientRect, GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::native::*;

// ============================================================================
// HANDLES
// ============================================================================

impl From<windows::core::Error> for HResult {
    fn from(error: windows::core::Error) -> Self {
        HResult(error.code().0)
    }
}

/// Move an interface reference into a handle
pub(crate) fn into_handle<T: Interface>(object: T) -> RawHandle {
    RawHandle(object.into_raw() as usize as u64)
}

/// Owned interface for a handle; adds a reference that drops with the value
///
/// The handle must come from [`into_handle`] with `T` or an interface
/// derived from `T`.
pub(crate) fn interface<T: Interface>(handle: RawHandle) -> Option<T> {
    let raw = handle.0 as usize as *mut c_void;
    unsafe { T::from_raw_borrowed(&raw).cloned() }
}

pub(crate) fn interfaces<T: Interface>(handles: &[Option<RawHandle>]) -> Vec<Option<T>> {
    handles.iter().map(|h| h.and_then(interface::<T>)).collect()
}

pub(crate) fn handles<T: Interface>(objects: Vec<Option<T>>) -> Vec<Option<RawHandle>> {
    objects.into_iter().map(|o| o.map(into_handle)).collect()
}

fn unknown_call(handle: RawHandle, release: bool) -> u32 {
    let raw = handle.0 as usize as *mut c_void;
    let Some(unknown) = (unsafe { IUnknown::from_raw_borrowed(&raw) }) else {
        return 0;
    };
    let vtable = unknown.vtable();
    unsafe {
        if release {
            (vtable.Release)(unknown.as_raw())
        } else {
            (vtable.AddRef)(unknown.as_raw())
        }
    }
}

pub(crate) fn add_ref(handle: RawHandle) -> u32 {
    unknown_call(handle, false)
}

pub(crate) fn release(handle: RawHandle) -> u32 {
    unknown_call(handle, true)
}

fn hwnd(window: &RawWindowHandle) -> NativeResult<HWND> {
    match window {
        RawWindowHandle::Win32(handle) => Ok(HWND(handle.hwnd.get() as *mut c_void)),
        _ => Err(HResult::E_INVALIDARG),
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Entry point of the Direct3D 11 driver
pub struct D3D11Factory {
    factory: IDXGIFactory2,
    compiler: Arc<D3D11Compiler>,
}

// DXGI factories are free-threaded.
unsafe impl Send for D3D11Factory {}
unsafe impl Sync for D3D11Factory {}

impl D3D11Factory {
    pub fn new() -> NativeResult<Self> {
        let factory: IDXGIFactory2 = unsafe { CreateDXGIFactory1()? };
        Ok(Self { factory, compiler: Arc::new(D3D11Compiler) })
    }

    fn adapter(&self, index: usize) -> NativeResult<IDXGIAdapter1> {
        Ok(unsafe { self.factory.EnumAdapters1(index as u32)? })
    }

    fn native_device(device: &Arc<dyn NativeDevice>) -> NativeResult<&D3D11Device> {
        device.as_any().downcast_ref::<D3D11Device>().ok_or(HResult::E_INVALIDARG)
    }
}

impl NativeFactory for D3D11Factory {
    fn enum_adapters(&self) -> Vec<AdapterDesc> {
        (0..)
            .map_while(|index| self.adapter(index).ok())
            .filter_map(|adapter| unsafe { adapter.GetDesc1() }.ok())
            .map(|desc| AdapterDesc {
                description: convert::wide_string(&desc.Description),
                vendor_id: desc.VendorId,
                device_id: desc.DeviceId,
                dedicated_video_memory: desc.DedicatedVideoMemory as u64,
            })
            .collect()
    }

    fn create_device(
        &self,
        adapter: usize,
        flags: CreateDeviceFlag,
        feature_levels: &[FeatureLevel],
    ) -> NativeResult<(Arc<dyn NativeDevice>, Arc<dyn NativeContext>, FeatureLevel)> {
        let adapter = self.adapter(adapter)?;
        let levels: Vec<D3D_FEATURE_LEVEL> = feature_levels.iter().map(|&l| convert::feature_level(l)).collect();

        let mut device: Option<ID3D11Device> = None;
        let mut context: Option<ID3D11DeviceContext> = None;
        let mut level = D3D_FEATURE_LEVEL::default();
        unsafe {
            D3D11CreateDevice(
                &adapter,
                D3D_DRIVER_TYPE_UNKNOWN,
                HMODULE::default(),
                D3D11_CREATE_DEVICE_FLAG(flags.bits() as _),
                Some(&levels),
                D3D11_SDK_VERSION,
                Some(&mut device),
                Some(&mut level),
                Some(&mut context),
            )?;
        }

        let device: ID3D11Device1 = device.ok_or(HResult::E_FAIL)?.cast()?;
        let context: ID3D11DeviceContext1 = context.ok_or(HResult::E_FAIL)?.cast()?;
        let debug = flags.contains(CreateDeviceFlag::DEBUG);

        let device: Arc<dyn NativeDevice> = Arc::new(D3D11Device::new(device, debug));
        let context: Arc<dyn NativeContext> = Arc::new(D3D11Context::new(context));
        Ok((device, context, convert::from_feature_level(level)))
    }

    fn create_swap_chain(
        &self,
        device: &Arc<dyn NativeDevice>,
        window: &RawWindowHandle,
        desc: &SwapChainDesc,
    ) -> NativeResult<Box<dyn NativeSwapChain>> {
        let device = Self::native_device(device)?;
        let hwnd = hwnd(window)?;
        let native_desc = convert::swap_chain_desc(desc);
        let fullscreen = DXGI_SWAP_CHAIN_FULLSCREEN_DESC { Windowed: desc.windowed.into(), ..Default::default() };

        let swap_chain = unsafe {
            self.factory.CreateSwapChainForHwnd(
                device.device(),
                hwnd,
                &native_desc,
                Some(&fullscreen),
                None,
            )?
        };
        Ok(Box::new(D3D11SwapChain::new(swap_chain, *desc)))
    }

    fn client_size(&self, window: &RawWindowHandle) -> NativeResult<(u32, u32)> {
        let hwnd = hwnd(window)?;
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd, &mut rect)? };
        Ok(((rect.right - rect.left).max(0) as u32, (rect.bottom - rect.top).max(0) as u32))
    }

    fn output_desktop_size(&self, adapter: usize) -> Option<(u32, u32)> {
        let output = unsafe { self.adapter(adapter).ok()?.EnumOutputs(0).ok()? };
        let desc = unsafe { output.GetDesc().ok()? };
        let rect = desc.DesktopCoordinates;
        Some(((rect.right - rect.left).max(0) as u32, (rect.bottom - rect.top).max(0) as u32))
    }

    fn primary_screen_size(&self) -> (u32, u32) {
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_maximum_frame_latency(&self, device: &Arc<dyn NativeDevice>, latency: u32) -> NativeResult<()> {
        let dxgi: IDXGIDevice1 = Self::native_device(device)?.device().cast()?;
        unsafe { dxgi.SetMaximumFrameLatency(latency)? };
        Ok(())
    }

    fn compiler(&self) -> Arc<dyn NativeCompiler> {
        self.compiler.clone()
    }
}
