/// Texture - D3D11 implementation of a logical texture
///
/// One storage texture plus every view created for it. Views are built once,
/// at creation, and released before the storage they point at.

use std::sync::{Arc, RwLock};

use ge_render_api::ge::render::{
    GraphicsFormat, LogicalResource, ResourceKind, TextureInfo,
};
use ge_render_api::ge::Result;

use crate::com_ptr::{ComPtr, NativeResource, ResourceCell};
use crate::dx11::throw_if_failed;
use crate::native::{
    BindFlag, DepthStencilViewDesc, DsvDimension, DsvFlag, DxgiFormat, NativeDevice, RawHandle,
    RenderTargetViewDesc, RtvDimension, ShaderResourceViewDesc, SrvDimension, Texture2dDesc,
    UavDimension, UnorderedAccessViewDesc,
};
use crate::translate;

// ============================================================================
// NATIVE OBJECTS
// ============================================================================

/// Storage texture and its views
///
/// Views hold a reference on the storage, so they are dropped first.
pub(crate) struct TextureObjects {
    pub(crate) render_target_views: Vec<ComPtr>,
    pub(crate) depth_stencil_view: Option<ComPtr>,
    pub(crate) read_only_depth_stencil_view: Option<ComPtr>,
    pub(crate) shader_resource_views: Vec<ComPtr>,
    pub(crate) unordered_access_views: Vec<ComPtr>,
    pub(crate) texture: ComPtr,
}

impl Drop for TextureObjects {
    fn drop(&mut self) {
        self.render_target_views.clear();
        self.depth_stencil_view = None;
        self.read_only_depth_stencil_view = None;
        self.shader_resource_views.clear();
        self.unordered_access_views.clear();
    }
}

/// Formats and shape the views of a texture are built from
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewPlan {
    /// Format of render-target and unordered-access views
    pub(crate) color_format: DxgiFormat,
    pub(crate) shader_resource_format: DxgiFormat,
    pub(crate) depth_stencil_format: DxgiFormat,
    pub(crate) bind_flags: BindFlag,
    pub(crate) mip_levels: u32,
    /// Native slice count (six per cube)
    pub(crate) array_size: u32,
    pub(crate) is_cube_map: bool,
    pub(crate) is_multisampled: bool,
}

impl ViewPlan {
    fn is_array(&self) -> bool {
        self.array_size > 1
    }

    fn render_target_view(&self, mip: u32) -> RenderTargetViewDesc {
        let dimension = match (self.is_multisampled, self.is_array()) {
            (true, true) => RtvDimension::Texture2dMsArray { first_array_slice: 0, array_size: self.array_size },
            (true, false) => RtvDimension::Texture2dMs,
            (false, true) => RtvDimension::Texture2dArray { mip_slice: mip, first_array_slice: 0, array_size: self.array_size },
            (false, false) => RtvDimension::Texture2d { mip_slice: mip },
        };
        RenderTargetViewDesc { format: self.color_format, dimension }
    }

    fn depth_stencil_view(&self, flags: DsvFlag) -> DepthStencilViewDesc {
        let dimension = match (self.is_multisampled, self.is_array()) {
            (true, true) => DsvDimension::Texture2dMsArray { first_array_slice: 0, array_size: self.array_size },
            (true, false) => DsvDimension::Texture2dMs,
            (false, true) => DsvDimension::Texture2dArray { mip_slice: 0, first_array_slice: 0, array_size: self.array_size },
            (false, false) => DsvDimension::Texture2d { mip_slice: 0 },
        };
        DepthStencilViewDesc { format: self.depth_stencil_format, flags, dimension }
    }

    fn read_only_flags(&self) -> DsvFlag {
        match self.depth_stencil_format {
            DxgiFormat::D24_UNORM_S8_UINT | DxgiFormat::D32_FLOAT_S8X24_UINT => {
                DsvFlag::READ_ONLY_DEPTH | DsvFlag::READ_ONLY_STENCIL
            }
            _ => DsvFlag::READ_ONLY_DEPTH,
        }
    }

    fn unordered_access_view(&self, mip: u32) -> UnorderedAccessViewDesc {
        let dimension = if self.is_array() {
            UavDimension::Texture2dArray { mip_slice: mip, first_array_slice: 0, array_size: self.array_size }
        } else {
            UavDimension::Texture2d { mip_slice: mip }
        };
        UnorderedAccessViewDesc { format: self.color_format, dimension }
    }

    /// Cube maps get a single view; other textures one per mip, view `i`
    /// covering mips `i..end`
    fn shader_resource_views(&self) -> Vec<ShaderResourceViewDesc> {
        let format = self.shader_resource_format;
        let mips = self.mip_levels;

        if self.is_cube_map {
            let cubes = self.array_size / 6;
            let dimension = if cubes > 1 {
                SrvDimension::TextureCubeArray { most_detailed_mip: 0, mip_levels: mips, first_2d_array_face: 0, num_cubes: cubes }
            } else {
                SrvDimension::TextureCube { most_detailed_mip: 0, mip_levels: mips }
            };
            return vec![ShaderResourceViewDesc { format, dimension }];
        }

        if self.is_multisampled {
            let dimension = if self.is_array() {
                SrvDimension::Texture2dMsArray { first_array_slice: 0, array_size: self.array_size }
            } else {
                SrvDimension::Texture2dMs
            };
            return vec![ShaderResourceViewDesc { format, dimension }];
        }

        (0..mips)
            .map(|mip| {
                let dimension = if self.is_array() {
                    SrvDimension::Texture2dArray {
                        most_detailed_mip: mip,
                        mip_levels: mips - mip,
                        first_array_slice: 0,
                        array_size: self.array_size,
                    }
                } else {
                    SrvDimension::Texture2d { most_detailed_mip: mip, mip_levels: mips - mip }
                };
                ShaderResourceViewDesc { format, dimension }
            })
            .collect()
    }
}

impl TextureObjects {
    /// Build every view `plan` asks for
    ///
    /// A failure part way drops the views already created along with the
    /// storage.
    pub(crate) fn create(device: &Arc<dyn NativeDevice>, texture: ComPtr, plan: &ViewPlan) -> Result<Self> {
        let raw = texture.raw();
        let wrap = |handle: RawHandle| ComPtr::from_raw(handle, device.clone());

        let mut objects = TextureObjects {
            render_target_views: Vec::new(),
            depth_stencil_view: None,
            read_only_depth_stencil_view: None,
            shader_resource_views: Vec::new(),
            unordered_access_views: Vec::new(),
            texture,
        };

        if plan.bind_flags.contains(BindFlag::RENDER_TARGET) && !plan.is_cube_map {
            let count = if plan.is_multisampled { 1 } else { plan.mip_levels };
            for mip in 0..count {
                let desc = plan.render_target_view(mip);
                let view = throw_if_failed(
                    device.create_render_target_view(raw, Some(&desc)),
                    &format!("Could not create render target view for mip {}", mip),
                )?;
                objects.render_target_views.push(wrap(view));
            }
        }

        if plan.bind_flags.contains(BindFlag::DEPTH_STENCIL) && !plan.is_cube_map {
            let view = throw_if_failed(
                device.create_depth_stencil_view(raw, &plan.depth_stencil_view(DsvFlag::empty())),
                "Could not create depth stencil view",
            )?;
            objects.depth_stencil_view = Some(wrap(view));

            let view = throw_if_failed(
                device.create_depth_stencil_view(raw, &plan.depth_stencil_view(plan.read_only_flags())),
                "Could not create read-only depth stencil view",
            )?;
            objects.read_only_depth_stencil_view = Some(wrap(view));
        }

        if plan.bind_flags.contains(BindFlag::UNORDERED_ACCESS) && !plan.is_cube_map {
            for mip in 0..plan.mip_levels {
                let view = throw_if_failed(
                    device.create_unordered_access_view(raw, &plan.unordered_access_view(mip)),
                    &format!("Could not create unordered access view for mip {}", mip),
                )?;
                objects.unordered_access_views.push(wrap(view));
            }
        }

        if plan.bind_flags.contains(BindFlag::SHADER_RESOURCE) {
            for (index, desc) in plan.shader_resource_views().iter().enumerate() {
                let view = throw_if_failed(
                    device.create_shader_resource_view(raw, desc),
                    &format!("Could not create shader resource view {}", index),
                )?;
                objects.shader_resource_views.push(wrap(view));
            }
        }

        Ok(objects)
    }

    /// Back buffer objects: one render-target view in the buffer's own format
    pub(crate) fn back_buffer(device: &Arc<dyn NativeDevice>, texture: ComPtr) -> Result<Self> {
        let view = throw_if_failed(
            device.create_render_target_view(texture.raw(), None),
            "Could not create the back buffer render target view",
        )?;
        Ok(TextureObjects {
            render_target_views: vec![ComPtr::from_raw(view, device.clone())],
            depth_stencil_view: None,
            read_only_depth_stencil_view: None,
            shader_resource_views: Vec::new(),
            unordered_access_views: Vec::new(),
            texture,
        })
    }

    fn set_debug_name(&self, name: &str) {
        self.texture.set_debug_name(name);
        for (mip, view) in self.render_target_views.iter().enumerate() {
            view.set_debug_name(&format!("{}_RTV_{}", name, mip));
        }
        if let Some(view) = &self.depth_stencil_view {
            view.set_debug_name(&format!("{}_DSV", name));
        }
        if let Some(view) = &self.read_only_depth_stencil_view {
            view.set_debug_name(&format!("{}_DSV_RO", name));
        }
        for (mip, view) in self.shader_resource_views.iter().enumerate() {
            view.set_debug_name(&format!("{}_SRV_{}", name, mip));
        }
        for (mip, view) in self.unordered_access_views.iter().enumerate() {
            view.set_debug_name(&format!("{}_UAV_{}", name, mip));
        }
    }
}

// ============================================================================
// TEXTURE
// ============================================================================

/// D3D11 texture
pub struct Dx11Texture {
    objects: ResourceCell<TextureObjects>,
    info: RwLock<TextureInfo>,
    name: RwLock<String>,
}

impl Dx11Texture {
    pub(crate) fn new(objects: TextureObjects, info: TextureInfo) -> Self {
        Self {
            objects: ResourceCell::new(objects),
            info: RwLock::new(info),
            name: RwLock::new(String::new()),
        }
    }

    /// Read-only properties of the texture
    pub fn info(&self) -> TextureInfo {
        self.info.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn render_target_view_count(&self) -> usize {
        self.objects.with(|o| o.render_target_views.len()).unwrap_or(0)
    }

    pub fn shader_resource_view_count(&self) -> usize {
        self.objects.with(|o| o.shader_resource_views.len()).unwrap_or(0)
    }

    pub fn unordered_access_view_count(&self) -> usize {
        self.objects.with(|o| o.unordered_access_views.len()).unwrap_or(0)
    }

    /// True when both the writable and the read-only depth views exist
    pub fn has_depth_stencil_views(&self) -> bool {
        self.objects
            .with(|o| o.depth_stencil_view.is_some() && o.read_only_depth_stencil_view.is_some())
            .unwrap_or(false)
    }

    // ===== NATIVE ACCESS =====

    pub(crate) fn render_target_view(&self, mip: u32) -> Option<RawHandle> {
        self.objects.with(|o| o.render_target_views.get(mip as usize).map(ComPtr::raw)).flatten()
    }

    pub(crate) fn depth_stencil_view(&self) -> Option<RawHandle> {
        self.objects.with(|o| o.depth_stencil_view.as_ref().map(ComPtr::raw)).flatten()
    }

    pub(crate) fn read_only_depth_stencil_view(&self) -> Option<RawHandle> {
        self.objects.with(|o| o.read_only_depth_stencil_view.as_ref().map(ComPtr::raw)).flatten()
    }

    /// View `mip` covers mips `mip..end`; view 0 is the full chain
    pub(crate) fn shader_resource_view(&self, mip: u32) -> Option<RawHandle> {
        self.objects.with(|o| o.shader_resource_views.get(mip as usize).map(ComPtr::raw)).flatten()
    }

    pub(crate) fn unordered_access_view(&self, mip: u32) -> Option<RawHandle> {
        self.objects.with(|o| o.unordered_access_views.get(mip as usize).map(ComPtr::raw)).flatten()
    }

    /// Install rebuilt native objects, keeping this wrapper's identity
    pub(crate) fn rebuild(&self, objects: TextureObjects, info: TextureInfo) {
        *self.info.write().unwrap_or_else(|e| e.into_inner()) = info;
        let name = self.name();
        if !name.is_empty() {
            objects.set_debug_name(&name);
        }
        self.objects.replace(objects);
    }
}

impl NativeResource for Dx11Texture {
    fn native_resource(&self) -> Option<RawHandle> {
        self.objects.with(|o| o.texture.raw())
    }
}

impl LogicalResource for Dx11Texture {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Texture
    }

    fn name(&self) -> String {
        self.name.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_debug_name(&self, name: &str) {
        *self.name.write().unwrap_or_else(|e| e.into_inner()) = name.to_string();
        self.objects.with(|o| o.set_debug_name(name));
    }

    fn memory_usage(&self) -> usize {
        let info = self.info.read().unwrap_or_else(|e| e.into_inner());
        texture_memory_usage(&info)
    }

    fn release(&self) {
        drop(self.objects.take());
    }

    fn is_loaded(&self) -> bool {
        self.objects.is_set()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Bytes held by every mip of every slice
pub(crate) fn texture_memory_usage(info: &TextureInfo) -> usize {
    let bits = translate::bits_per_pixel(translate::to_native(info.format)) as usize;
    let per_slice: usize = (0..info.mip_levels)
        .map(|mip| {
            let w = (info.width >> mip).max(1) as usize;
            let h = (info.height >> mip).max(1) as usize;
            w * h * bits / 8
        })
        .sum();
    per_slice * info.array_size as usize
}

/// Row pitch and slice size of one mip of a tightly packed subresource
pub(crate) fn subresource_pitch(format: GraphicsFormat, width: u32, height: u32, mip: u32) -> (u32, u32) {
    let w = (width >> mip).max(1);
    let h = (height >> mip).max(1);
    let bits = format.bits_per_pixel();
    if format.is_block_compressed() {
        let row_pitch = w.div_ceil(4) * bits * 2;
        (row_pitch, row_pitch * h.div_ceil(4))
    } else {
        let row_pitch = (w * bits).div_ceil(8);
        (row_pitch, row_pitch * h)
    }
}

/// Abstract info of a created texture
pub(crate) fn texture_info(desc: &Texture2dDesc, format: GraphicsFormat, is_cube_map: bool) -> TextureInfo {
    TextureInfo {
        width: desc.width,
        height: desc.height,
        format,
        mip_levels: desc.mip_levels,
        array_size: desc.array_size,
        sample_count: desc.sample_desc.count,
        sample_quality: desc.sample_desc.quality,
        usage: translate::usage_to_abstract(desc.usage),
        bind_flags: translate::bind_flags_to_abstract(desc.bind_flags),
        cpu_access: translate::cpu_access_to_abstract(desc.cpu_access_flags),
        is_cube_map,
    }
}

#[cfg(test)]
#[path = "dx11_texture_tests.rs"]
mod tests;
