/// `ID3D11Device1` behind the native device seam

use std::any::Any;
use std::sync::{Mutex, MutexGuard};

use rustc_hash::FxHashMap;
use windows::core::Interface;
use windows::Win32::Graphics::Direct3D::WKPDID_D3DDebugObjectName;
use windows::Win32::Graphics::Direct3D11::*;

use ge_render_api::ge::render::ShaderStage;

use super::convert::{self, SemanticNames};
use super::{add_ref, interface, into_handle, release};
use crate::native::*;

struct TrackedObject {
    kind: &'static str,
    name: String,
}

/// Direct3D 11 device
///
/// Remembers every object it created until its last reference is released,
/// so live objects can be listed without the debug layer. With the debug
/// layer enabled the runtime's own report goes to the debugger as well.
pub struct D3D11Device {
    device: ID3D11Device1,
    debug: Option<ID3D11Debug>,
    objects: Mutex<FxHashMap<RawHandle, TrackedObject>>,
}

// ID3D11Device is free-threaded; the object table has its own lock.
unsafe impl Send for D3D11Device {}
unsafe impl Sync for D3D11Device {}

impl D3D11Device {
    pub(crate) fn new(device: ID3D11Device1, debug_layer: bool) -> Self {
        let debug = if debug_layer { device.cast::<ID3D11Debug>().ok() } else { None };
        Self { device, debug, objects: Mutex::new(FxHashMap::default()) }
    }

    pub fn device(&self) -> &ID3D11Device1 {
        &self.device
    }

    fn objects(&self) -> MutexGuard<'_, FxHashMap<RawHandle, TrackedObject>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn track<T: Interface>(&self, object: Option<T>, kind: &'static str) -> NativeResult<RawHandle> {
        let handle = into_handle(object.ok_or(HResult::E_FAIL)?);
        self.objects().insert(handle, TrackedObject { kind, name: String::new() });
        Ok(handle)
    }

    fn resource(handle: RawHandle) -> NativeResult<ID3D11Resource> {
        interface::<ID3D11Resource>(handle).ok_or(HResult::E_INVALIDARG)
    }
}

impl NativeDevice for D3D11Device {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn add_ref(&self, handle: RawHandle) -> u32 {
        add_ref(handle)
    }

    fn release(&self, handle: RawHandle) -> u32 {
        let mut objects = self.objects();
        let remaining = release(handle);
        if remaining == 0 {
            objects.remove(&handle);
        }
        remaining
    }

    fn set_debug_name(&self, handle: RawHandle, name: &str) {
        if let Some(child) = interface::<ID3D11DeviceChild>(handle) {
            // Failure only loses the name in graphics debuggers
            let _ = unsafe {
                child.SetPrivateData(&WKPDID_D3DDebugObjectName, name.len() as u32, Some(name.as_ptr().cast()))
            };
        }
        if let Some(object) = self.objects().get_mut(&handle) {
            object.name = name.to_string();
        }
    }

    fn check_format_support(&self, format: DxgiFormat) -> NativeResult<FormatSupport> {
        let support = unsafe { self.device.CheckFormatSupport(convert::format(format))? };
        Ok(FormatSupport::from_bits_truncate(support))
    }

    fn check_multisample_quality_levels(&self, format: DxgiFormat, sample_count: u32) -> NativeResult<u32> {
        Ok(unsafe { self.device.CheckMultisampleQualityLevels(convert::format(format), sample_count)? })
    }

    fn create_texture_2d(
        &self,
        desc: &Texture2dDesc,
        initial_data: Option<&[SubresourceData<'_>]>,
    ) -> NativeResult<RawHandle> {
        let native_desc = convert::texture_2d_desc(desc);
        let data: Option<Vec<D3D11_SUBRESOURCE_DATA>> =
            initial_data.map(|subresources| subresources.iter().map(convert::subresource_data).collect());

        let mut texture: Option<ID3D11Texture2D> = None;
        unsafe {
            self.device.CreateTexture2D(&native_desc, data.as_ref().map(|d| d.as_ptr()), Some(&mut texture))?;
        }
        self.track(texture, "ID3D11Texture2D")
    }

    fn texture_2d_desc(&self, texture: RawHandle) -> NativeResult<Texture2dDesc> {
        let texture = interface::<ID3D11Texture2D>(texture).ok_or(HResult::E_INVALIDARG)?;
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { texture.GetDesc(&mut desc) };
        Ok(convert::from_texture_2d_desc(&desc))
    }

    fn create_render_target_view(
        &self,
        resource: RawHandle,
        desc: Option<&RenderTargetViewDesc>,
    ) -> NativeResult<RawHandle> {
        let resource = Self::resource(resource)?;
        let native_desc = desc.map(convert::render_target_view_desc);
        let mut view: Option<ID3D11RenderTargetView> = None;
        unsafe {
            self.device.CreateRenderTargetView(
                &resource,
                native_desc.as_ref().map(|d| d as *const _),
                Some(&mut view),
            )?;
        }
        self.track(view, "ID3D11RenderTargetView")
    }

    fn create_depth_stencil_view(&self, resource: RawHandle, desc: &DepthStencilViewDesc) -> NativeResult<RawHandle> {
        let resource = Self::resource(resource)?;
        let native_desc = convert::depth_stencil_view_desc(desc);
        let mut view: Option<ID3D11DepthStencilView> = None;
        unsafe { self.device.CreateDepthStencilView(&resource, Some(&native_desc), Some(&mut view))? };
        self.track(view, "ID3D11DepthStencilView")
    }

    fn create_shader_resource_view(&self, resource: RawHandle, desc: &ShaderResourceViewDesc) -> NativeResult<RawHandle> {
        let resource = Self::resource(resource)?;
        let native_desc = convert::shader_resource_view_desc(desc);
        let mut view: Option<ID3D11ShaderResourceView> = None;
        unsafe { self.device.CreateShaderResourceView(&resource, Some(&native_desc), Some(&mut view))? };
        self.track(view, "ID3D11ShaderResourceView")
    }

    fn create_unordered_access_view(&self, resource: RawHandle, desc: &UnorderedAccessViewDesc) -> NativeResult<RawHandle> {
        let resource = Self::resource(resource)?;
        let native_desc = convert::unordered_access_view_desc(desc);
        let mut view: Option<ID3D11UnorderedAccessView> = None;
        unsafe { self.device.CreateUnorderedAccessView(&resource, Some(&native_desc), Some(&mut view))? };
        self.track(view, "ID3D11UnorderedAccessView")
    }

    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&SubresourceData<'_>>) -> NativeResult<RawHandle> {
        let native_desc = convert::buffer_desc(desc);
        let data = initial_data.map(convert::subresource_data);
        let mut buffer: Option<ID3D11Buffer> = None;
        unsafe {
            self.device.CreateBuffer(&native_desc, data.as_ref().map(|d| d as *const _), Some(&mut buffer))?;
        }
        self.track(buffer, "ID3D11Buffer")
    }

    fn create_input_layout(&self, elements: &[InputElementDesc], vs_bytecode: &[u8]) -> NativeResult<RawHandle> {
        let mut names = SemanticNames::default();
        let native: Vec<D3D11_INPUT_ELEMENT_DESC> =
            elements.iter().map(|e| convert::input_element_desc(e, &mut names)).collect();
        let mut layout: Option<ID3D11InputLayout> = None;
        unsafe { self.device.CreateInputLayout(&native, vs_bytecode, Some(&mut layout))? };
        self.track(layout, "ID3D11InputLayout")
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc1) -> NativeResult<RawHandle> {
        let native_desc = convert::rasterizer_desc(desc);
        let mut state: Option<ID3D11RasterizerState1> = None;
        unsafe { self.device.CreateRasterizerState1(&native_desc, Some(&mut state))? };
        self.track(state, "ID3D11RasterizerState1")
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> NativeResult<RawHandle> {
        let native_desc = convert::depth_stencil_desc(desc);
        let mut state: Option<ID3D11DepthStencilState> = None;
        unsafe { self.device.CreateDepthStencilState(&native_desc, Some(&mut state))? };
        self.track(state, "ID3D11DepthStencilState")
    }

    fn create_blend_state(&self, desc: &BlendDesc1) -> NativeResult<RawHandle> {
        let native_desc = convert::blend_desc(desc);
        let mut state: Option<ID3D11BlendState1> = None;
        unsafe { self.device.CreateBlendState1(&native_desc, Some(&mut state))? };
        self.track(state, "ID3D11BlendState1")
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> NativeResult<RawHandle> {
        let native_desc = convert::sampler_desc(desc);
        let mut state: Option<ID3D11SamplerState> = None;
        unsafe { self.device.CreateSamplerState(&native_desc, Some(&mut state))? };
        self.track(state, "ID3D11SamplerState")
    }

    fn create_shader(&self, stage: ShaderStage, bytecode: &[u8]) -> NativeResult<RawHandle> {
        let linkage = None::<&ID3D11ClassLinkage>;
        unsafe {
            match stage {
                ShaderStage::Vertex => {
                    let mut shader: Option<ID3D11VertexShader> = None;
                    self.device.CreateVertexShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11VertexShader")
                }
                ShaderStage::Pixel => {
                    let mut shader: Option<ID3D11PixelShader> = None;
                    self.device.CreatePixelShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11PixelShader")
                }
                ShaderStage::Geometry => {
                    let mut shader: Option<ID3D11GeometryShader> = None;
                    self.device.CreateGeometryShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11GeometryShader")
                }
                ShaderStage::Hull => {
                    let mut shader: Option<ID3D11HullShader> = None;
                    self.device.CreateHullShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11HullShader")
                }
                ShaderStage::Domain => {
                    let mut shader: Option<ID3D11DomainShader> = None;
                    self.device.CreateDomainShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11DomainShader")
                }
                ShaderStage::Compute => {
                    let mut shader: Option<ID3D11ComputeShader> = None;
                    self.device.CreateComputeShader(bytecode, linkage, Some(&mut shader))?;
                    self.track(shader, "ID3D11ComputeShader")
                }
            }
        }
    }

    fn create_geometry_shader_with_stream_output(
        &self,
        bytecode: &[u8],
        entries: &[SoDeclarationEntry],
        strides: &[u32],
        rasterized_stream: u32,
    ) -> NativeResult<RawHandle> {
        let mut names = SemanticNames::default();
        let native: Vec<D3D11_SO_DECLARATION_ENTRY> =
            entries.iter().map(|e| convert::so_declaration_entry(e, &mut names)).collect();
        let mut shader: Option<ID3D11GeometryShader> = None;
        unsafe {
            self.device.CreateGeometryShaderWithStreamOutput(
                bytecode,
                Some(&native),
                Some(strides),
                rasterized_stream,
                None::<&ID3D11ClassLinkage>,
                Some(&mut shader),
            )?;
        }
        self.track(shader, "ID3D11GeometryShader")
    }

    fn live_objects(&self) -> Vec<LiveObject> {
        if let Some(debug) = &self.debug {
            // Also printed to the debugger output by the runtime
            let _ = unsafe { debug.ReportLiveDeviceObjects(D3D11_RLDO_DETAIL | D3D11_RLDO_IGNORE_INTERNAL) };
        }

        let objects = self.objects();
        let mut live: Vec<LiveObject> = objects
            .iter()
            .map(|(&handle, object)| {
                add_ref(handle);
                LiveObject { handle, kind: object.kind, name: object.name.clone(), ref_count: release(handle) }
            })
            .collect();
        live.sort_by_key(|o| o.handle);
        live
    }
}
