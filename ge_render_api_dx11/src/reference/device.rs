/// Object creation and validation of the software driver

use std::sync::Arc;

use ge_render_api::ge::render::ShaderStage;

use super::compiler::Container;
use super::objects::{full_mip_count, mip_layout, BufferObject, ObjectData, TextureObject};
use super::Shared;
use crate::native::*;
use crate::translate;

const MAX_TEXTURE_DIMENSION: u32 = 16384;
const MAX_TEXTURE_ARRAY_SIZE: u32 = 2048;
const MAX_SO_SLOTS: usize = 4;

/// `ID3D11Device` of the software driver
pub struct ReferenceDevice {
    pub(crate) shared: Arc<Shared>,
}

// ============================================================================
// FORMAT CAPABILITIES
// ============================================================================

fn format_name(format: DxgiFormat) -> &'static str {
    match format {
        DxgiFormat::A4B4G4R4_UNORM => "A4B4G4R4_UNORM",
        other => translate::to_abstract(other).name(),
    }
}

pub(crate) fn is_depth_view_format(format: DxgiFormat) -> bool {
    matches!(
        format,
        DxgiFormat::D32_FLOAT | DxgiFormat::D24_UNORM_S8_UINT | DxgiFormat::D16_UNORM | DxgiFormat::D32_FLOAT_S8X24_UINT
    )
}

fn is_depth_storage_format(format: DxgiFormat) -> bool {
    is_depth_view_format(format)
        || matches!(
            format,
            DxgiFormat::R32_TYPELESS | DxgiFormat::R24G8_TYPELESS | DxgiFormat::R16_TYPELESS | DxgiFormat::R32G8X24_TYPELESS
        )
}

pub(crate) fn is_typeless(format: DxgiFormat) -> bool {
    format_name(format).ends_with("TYPELESS")
}

/// Capabilities of a format; `E_FAIL` for formats the device does not know
pub(crate) fn format_support(format: DxgiFormat) -> NativeResult<FormatSupport> {
    use DxgiFormat::*;

    let texture = FormatSupport::TEXTURE2D | FormatSupport::TEXTURECUBE | FormatSupport::MIP;
    let sampled = texture | FormatSupport::SHADER_LOAD | FormatSupport::SHADER_SAMPLE;
    let name = format_name(format);

    let support = match format {
        UNKNOWN | FORCE_UINT => return Err(HResult::E_FAIL),
        D32_FLOAT | D24_UNORM_S8_UINT | D16_UNORM | D32_FLOAT_S8X24_UINT => {
            texture | FormatSupport::DEPTH_STENCIL | FormatSupport::MULTISAMPLE_RENDERTARGET
        }
        R24_UNORM_X8_TYPELESS | X24_TYPELESS_G8_UINT | R32_FLOAT_X8X24_TYPELESS | X32_TYPELESS_G8X24_UINT => sampled,
        R9G9B9E5_SHAREDEXP | R1_UNORM | R8G8_B8G8_UNORM | G8R8_G8B8_UNORM => sampled,
        AYUV | Y410 | Y416 | NV12 | P010 | P016 | OPAQUE_420 | YUY2 | Y210 | Y216 | NV11 | AI44 | IA44 | P8
        | A8P8 | P208 | V208 | V408 | SAMPLER_FEEDBACK_MIN_MIP_OPAQUE | SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE => {
            FormatSupport::TEXTURE2D | FormatSupport::SHADER_LOAD
        }
        _ if name.starts_with("BC") => sampled,
        _ if is_typeless(format) => texture,
        _ if name.ends_with("_UINT") || name.ends_with("_SINT") => {
            let mut support = texture
                | FormatSupport::SHADER_LOAD
                | FormatSupport::BUFFER
                | FormatSupport::IA_VERTEX_BUFFER
                | FormatSupport::SO_BUFFER
                | FormatSupport::RENDER_TARGET
                | FormatSupport::CPU_LOCKABLE
                | FormatSupport::MULTISAMPLE_RENDERTARGET
                | FormatSupport::TYPED_UNORDERED_ACCESS_VIEW;
            if matches!(format, R16_UINT | R32_UINT) {
                support |= FormatSupport::IA_INDEX_BUFFER;
            }
            support
        }
        _ => {
            let mut support = sampled
                | FormatSupport::BUFFER
                | FormatSupport::IA_VERTEX_BUFFER
                | FormatSupport::SO_BUFFER
                | FormatSupport::MIP_AUTOGEN
                | FormatSupport::RENDER_TARGET
                | FormatSupport::BLENDABLE
                | FormatSupport::CPU_LOCKABLE
                | FormatSupport::MULTISAMPLE_RENDERTARGET
                | FormatSupport::MULTISAMPLE_RESOLVE
                | FormatSupport::TYPED_UNORDERED_ACCESS_VIEW;
            if matches!(
                format,
                R8G8B8A8_UNORM | R8G8B8A8_UNORM_SRGB | B8G8R8A8_UNORM | B8G8R8A8_UNORM_SRGB | R10G10B10A2_UNORM | R16G16B16A16_FLOAT
            ) {
                support |= FormatSupport::DISPLAY;
            }
            support
        }
    };
    Ok(support)
}

/// Quality levels reported for a sample count
pub(crate) fn multisample_quality_levels(format: DxgiFormat, sample_count: u32) -> u32 {
    let Ok(support) = format_support(format) else { return 0 };
    match sample_count {
        1 if support.contains(FormatSupport::TEXTURE2D) => 1,
        2 | 4 | 8 if support.contains(FormatSupport::MULTISAMPLE_RENDERTARGET) => 1,
        _ => 0,
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check a texture description and resolve `mip_levels == 0`
fn validate_texture(desc: &Texture2dDesc) -> NativeResult<Texture2dDesc> {
    let invalid = Err(HResult::E_INVALIDARG);

    if desc.width == 0 || desc.height == 0 || desc.width > MAX_TEXTURE_DIMENSION || desc.height > MAX_TEXTURE_DIMENSION {
        return invalid;
    }
    if desc.array_size == 0 || desc.array_size > MAX_TEXTURE_ARRAY_SIZE {
        return invalid;
    }

    let support = format_support(desc.format).map_err(|_| HResult::E_INVALIDARG)?;
    if !support.contains(FormatSupport::TEXTURE2D) {
        return invalid;
    }

    let full_chain = full_mip_count(desc.width, desc.height);
    let mip_levels = if desc.mip_levels == 0 { full_chain } else { desc.mip_levels };
    if mip_levels > full_chain {
        return invalid;
    }

    let bind = desc.bind_flags;
    if bind.contains(BindFlag::DEPTH_STENCIL) {
        if !is_depth_storage_format(desc.format) || bind.contains(BindFlag::RENDER_TARGET) {
            return invalid;
        }
    }
    if bind.contains(BindFlag::RENDER_TARGET) && !support.contains(FormatSupport::RENDER_TARGET) && !is_typeless(desc.format) {
        return invalid;
    }
    if bind.intersects(BindFlag::VERTEX_BUFFER | BindFlag::INDEX_BUFFER | BindFlag::CONSTANT_BUFFER | BindFlag::STREAM_OUTPUT) {
        return invalid;
    }

    let misc = desc.misc_flags;
    if misc.contains(ResourceMiscFlag::GENERATE_MIPS)
        && !bind.contains(BindFlag::RENDER_TARGET | BindFlag::SHADER_RESOURCE)
    {
        return invalid;
    }
    if misc.contains(ResourceMiscFlag::TEXTURECUBE) && desc.array_size % 6 != 0 {
        return invalid;
    }

    match desc.usage {
        Usage::Staging if !bind.is_empty() || desc.cpu_access_flags.is_empty() => return invalid,
        Usage::Dynamic if !desc.cpu_access_flags.contains(CpuAccessFlag::WRITE) || mip_levels != 1 => return invalid,
        Usage::Default | Usage::Immutable if !desc.cpu_access_flags.is_empty() => return invalid,
        _ => {}
    }

    let samples = desc.sample_desc;
    if samples.count == 0 {
        return invalid;
    }
    if samples.count > 1 {
        if mip_levels != 1 || desc.usage != Usage::Default || bind.contains(BindFlag::UNORDERED_ACCESS) {
            return invalid;
        }
        if samples.quality >= multisample_quality_levels(desc.format, samples.count) {
            return invalid;
        }
    }

    Ok(Texture2dDesc { mip_levels, ..*desc })
}

fn validate_buffer(desc: &BufferDesc, has_data: bool) -> NativeResult<()> {
    let invalid = Err(HResult::E_INVALIDARG);
    if desc.byte_width == 0 {
        return invalid;
    }
    if desc.bind_flags.contains(BindFlag::CONSTANT_BUFFER)
        && (desc.byte_width % 16 != 0 || desc.bind_flags != BindFlag::CONSTANT_BUFFER)
    {
        return invalid;
    }
    if desc.bind_flags.intersects(BindFlag::RENDER_TARGET | BindFlag::DEPTH_STENCIL) {
        return invalid;
    }
    match desc.usage {
        Usage::Staging if !desc.bind_flags.is_empty() => invalid,
        Usage::Dynamic if !desc.cpu_access_flags.contains(CpuAccessFlag::WRITE) => invalid,
        Usage::Immutable if !has_data => invalid,
        _ => Ok(()),
    }
}

/// Every non-system input of the signature must be fed by an element
fn validate_input_layout(elements: &[InputElementDesc], vs_bytecode: &[u8]) -> NativeResult<()> {
    let container = Container::parse(vs_bytecode).ok_or(HResult::E_INVALIDARG)?;
    if container.stage_prefix() != ShaderStage::Vertex.target_prefix() {
        return Err(HResult::E_INVALIDARG);
    }

    for (i, element) in elements.iter().enumerate() {
        if element.format == DxgiFormat::UNKNOWN || element.semantic_name.is_empty() {
            return Err(HResult::E_INVALIDARG);
        }
        let duplicate = elements[..i].iter().any(|other| {
            other.semantic_name.eq_ignore_ascii_case(&element.semantic_name) && other.semantic_index == element.semantic_index
        });
        if duplicate {
            return Err(HResult::E_INVALIDARG);
        }
    }

    for input in &container.inputs {
        if input.semantic_name.to_ascii_uppercase().starts_with("SV_") {
            continue;
        }
        let fed = elements.iter().any(|element| {
            element.semantic_name.eq_ignore_ascii_case(&input.semantic_name) && element.semantic_index == input.semantic_index
        });
        if !fed {
            return Err(HResult::E_INVALIDARG);
        }
    }
    Ok(())
}

fn shader_container(stage: ShaderStage, bytecode: &[u8]) -> NativeResult<()> {
    let container = Container::parse(bytecode).ok_or(HResult::E_INVALIDARG)?;
    if container.stage_prefix() != stage.target_prefix() {
        return Err(HResult::E_INVALIDARG);
    }
    Ok(())
}

/// Copy initial data rows into a tightly packed subresource
fn copy_rows(dst: &mut [u8], tight_pitch: u32, rows: u32, src: &SubresourceData<'_>) {
    let tight = tight_pitch as usize;
    let pitch = if src.row_pitch == 0 { tight } else { src.row_pitch as usize };
    for row in 0..rows as usize {
        let from = row * pitch;
        if from >= src.data.len() {
            break;
        }
        let count = tight.min(src.data.len() - from);
        dst[row * tight..row * tight + count].copy_from_slice(&src.data[from..from + count]);
    }
}

// ============================================================================
// DEVICE
// ============================================================================

impl ReferenceDevice {
    fn insert(&self, data: ObjectData) -> RawHandle {
        let mut state = self.shared.lock();
        *state.stats.created.entry(data.kind()).or_insert(0) += 1;
        state.objects.insert(data)
    }

    /// Texture description of the resource a view is created on
    fn view_target(&self, resource: RawHandle, bind: BindFlag) -> NativeResult<Texture2dDesc> {
        let state = self.shared.lock();
        let texture = state.objects.texture(resource).ok_or(HResult::E_INVALIDARG)?;
        if !texture.desc.bind_flags.contains(bind) {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(texture.desc)
    }

    /// Insert a view and take its reference on the viewed resource
    fn insert_view(&self, resource: RawHandle, data: ObjectData) -> RawHandle {
        let handle = self.insert(data);
        self.shared.lock().objects.add_ref(resource);
        handle
    }
}

fn array_range_valid(first: u32, size: u32, total: u32) -> bool {
    size > 0 && first.checked_add(size).is_some_and(|end| end <= total)
}

impl NativeDevice for ReferenceDevice {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn add_ref(&self, handle: RawHandle) -> u32 {
        self.shared.lock().objects.add_ref(handle)
    }

    fn release(&self, handle: RawHandle) -> u32 {
        self.shared.lock().objects.release(handle)
    }

    fn set_debug_name(&self, handle: RawHandle, name: &str) {
        if let Some(object) = self.shared.lock().objects.get_mut(handle) {
            object.name = name.to_string();
        }
    }

    fn check_format_support(&self, format: DxgiFormat) -> NativeResult<FormatSupport> {
        self.shared.lock().stats.format_support_queries += 1;
        format_support(format)
    }

    fn check_multisample_quality_levels(&self, format: DxgiFormat, sample_count: u32) -> NativeResult<u32> {
        self.shared.lock().stats.multisample_queries += 1;
        if format == DxgiFormat::UNKNOWN {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(multisample_quality_levels(format, sample_count))
    }

    fn create_texture_2d(&self, desc: &Texture2dDesc, initial_data: Option<&[SubresourceData<'_>]>) -> NativeResult<RawHandle> {
        let desc = validate_texture(desc)?;
        let subresource_count = (desc.mip_levels * desc.array_size) as usize;

        if desc.usage == Usage::Immutable && initial_data.is_none() {
            return Err(HResult::E_INVALIDARG);
        }
        if initial_data.is_some_and(|data| data.len() < subresource_count) {
            return Err(HResult::E_INVALIDARG);
        }

        let mut subresources = Vec::with_capacity(subresource_count);
        let mut total = 0u64;
        for _slice in 0..desc.array_size {
            for mip in 0..desc.mip_levels {
                let (pitch, rows) = mip_layout(desc.format, desc.width, desc.height, mip);
                let size = pitch as u64 * rows as u64;
                total += size;
                subresources.push((pitch, rows, size));
            }
        }

        {
            let state = self.shared.lock();
            if state.objects.allocated() + total > state.config.memory_budget {
                return Err(HResult::E_OUTOFMEMORY);
            }
        }

        let subresources = subresources
            .into_iter()
            .enumerate()
            .map(|(index, (pitch, rows, size))| {
                let mut bytes = vec![0u8; size as usize];
                if let Some(data) = initial_data {
                    copy_rows(&mut bytes, pitch, rows, &data[index]);
                }
                bytes
            })
            .collect();

        Ok(self.insert(ObjectData::Texture(TextureObject { desc, subresources, mapped: Vec::new() })))
    }

    fn texture_2d_desc(&self, texture: RawHandle) -> NativeResult<Texture2dDesc> {
        let state = self.shared.lock();
        state.objects.texture(texture).map(|t| t.desc).ok_or(HResult::E_INVALIDARG)
    }

    fn create_render_target_view(&self, resource: RawHandle, desc: Option<&RenderTargetViewDesc>) -> NativeResult<RawHandle> {
        let texture = self.view_target(resource, BindFlag::RENDER_TARGET)?;

        let desc = match desc {
            Some(desc) => {
                let valid = match desc.dimension {
                    RtvDimension::Texture2d { mip_slice } => mip_slice < texture.mip_levels,
                    RtvDimension::Texture2dArray { mip_slice, first_array_slice, array_size } => {
                        mip_slice < texture.mip_levels && array_range_valid(first_array_slice, array_size, texture.array_size)
                    }
                    RtvDimension::Texture2dMs => true,
                    RtvDimension::Texture2dMsArray { first_array_slice, array_size } => {
                        array_range_valid(first_array_slice, array_size, texture.array_size)
                    }
                };
                if !valid {
                    return Err(HResult::E_INVALIDARG);
                }
                let format = if desc.format == DxgiFormat::UNKNOWN { texture.format } else { desc.format };
                RenderTargetViewDesc { format, dimension: desc.dimension }
            }
            None => {
                let multisampled = texture.sample_desc.count > 1;
                let dimension = match (multisampled, texture.array_size > 1) {
                    (false, false) => RtvDimension::Texture2d { mip_slice: 0 },
                    (false, true) => RtvDimension::Texture2dArray { mip_slice: 0, first_array_slice: 0, array_size: texture.array_size },
                    (true, false) => RtvDimension::Texture2dMs,
                    (true, true) => RtvDimension::Texture2dMsArray { first_array_slice: 0, array_size: texture.array_size },
                };
                RenderTargetViewDesc { format: texture.format, dimension }
            }
        };

        if is_typeless(desc.format) {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert_view(resource, ObjectData::RenderTargetView { resource, desc }))
    }

    fn create_depth_stencil_view(&self, resource: RawHandle, desc: &DepthStencilViewDesc) -> NativeResult<RawHandle> {
        let texture = self.view_target(resource, BindFlag::DEPTH_STENCIL)?;
        if !is_depth_view_format(desc.format) {
            return Err(HResult::E_INVALIDARG);
        }
        let valid = match desc.dimension {
            DsvDimension::Texture2d { mip_slice } => mip_slice < texture.mip_levels,
            DsvDimension::Texture2dArray { mip_slice, first_array_slice, array_size } => {
                mip_slice < texture.mip_levels && array_range_valid(first_array_slice, array_size, texture.array_size)
            }
            DsvDimension::Texture2dMs => true,
            DsvDimension::Texture2dMsArray { first_array_slice, array_size } => {
                array_range_valid(first_array_slice, array_size, texture.array_size)
            }
        };
        if !valid {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert_view(resource, ObjectData::DepthStencilView { resource, desc: *desc }))
    }

    fn create_shader_resource_view(&self, resource: RawHandle, desc: &ShaderResourceViewDesc) -> NativeResult<RawHandle> {
        let texture = self.view_target(resource, BindFlag::SHADER_RESOURCE)?;
        let support = format_support(desc.format).map_err(|_| HResult::E_INVALIDARG)?;
        if !support.contains(FormatSupport::SHADER_LOAD) {
            return Err(HResult::E_INVALIDARG);
        }

        let mips_valid = |most_detailed: u32, count: u32| {
            let count = if count == u32::MAX { texture.mip_levels.saturating_sub(most_detailed) } else { count };
            count > 0 && most_detailed + count <= texture.mip_levels
        };
        let is_cube = texture.misc_flags.contains(ResourceMiscFlag::TEXTURECUBE);

        let valid = match desc.dimension {
            SrvDimension::Texture2d { most_detailed_mip, mip_levels } => mips_valid(most_detailed_mip, mip_levels),
            SrvDimension::Texture2dArray { most_detailed_mip, mip_levels, first_array_slice, array_size } => {
                mips_valid(most_detailed_mip, mip_levels) && array_range_valid(first_array_slice, array_size, texture.array_size)
            }
            SrvDimension::Texture2dMs => true,
            SrvDimension::Texture2dMsArray { first_array_slice, array_size } => {
                array_range_valid(first_array_slice, array_size, texture.array_size)
            }
            SrvDimension::TextureCube { most_detailed_mip, mip_levels } => is_cube && mips_valid(most_detailed_mip, mip_levels),
            SrvDimension::TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes } => {
                is_cube
                    && mips_valid(most_detailed_mip, mip_levels)
                    && array_range_valid(first_2d_array_face, num_cubes * 6, texture.array_size)
            }
        };
        if !valid {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert_view(resource, ObjectData::ShaderResourceView { resource, desc: *desc }))
    }

    fn create_unordered_access_view(&self, resource: RawHandle, desc: &UnorderedAccessViewDesc) -> NativeResult<RawHandle> {
        let texture = self.view_target(resource, BindFlag::UNORDERED_ACCESS)?;
        let valid = match desc.dimension {
            UavDimension::Texture2d { mip_slice } => mip_slice < texture.mip_levels,
            UavDimension::Texture2dArray { mip_slice, first_array_slice, array_size } => {
                mip_slice < texture.mip_levels && array_range_valid(first_array_slice, array_size, texture.array_size)
            }
        };
        if !valid || is_typeless(desc.format) {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert_view(resource, ObjectData::UnorderedAccessView { resource, desc: *desc }))
    }

    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&SubresourceData<'_>>) -> NativeResult<RawHandle> {
        validate_buffer(desc, initial_data.is_some())?;
        {
            let state = self.shared.lock();
            if state.objects.allocated() + desc.byte_width as u64 > state.config.memory_budget {
                return Err(HResult::E_OUTOFMEMORY);
            }
        }

        let mut data = vec![0u8; desc.byte_width as usize];
        if let Some(initial) = initial_data {
            let count = data.len().min(initial.data.len());
            data[..count].copy_from_slice(&initial.data[..count]);
        }
        Ok(self.insert(ObjectData::Buffer(BufferObject { desc: *desc, data, mapped: false })))
    }

    fn create_input_layout(&self, elements: &[InputElementDesc], vs_bytecode: &[u8]) -> NativeResult<RawHandle> {
        validate_input_layout(elements, vs_bytecode)?;
        Ok(self.insert(ObjectData::InputLayout(elements.to_vec())))
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc1) -> NativeResult<RawHandle> {
        Ok(self.insert(ObjectData::RasterizerState(*desc)))
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> NativeResult<RawHandle> {
        Ok(self.insert(ObjectData::DepthStencilState(*desc)))
    }

    fn create_blend_state(&self, desc: &BlendDesc1) -> NativeResult<RawHandle> {
        if desc.render_target.iter().any(|rt| rt.blend_enable && rt.logic_op_enable) {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert(ObjectData::BlendState(*desc)))
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> NativeResult<RawHandle> {
        if desc.filter.is_anisotropic() && !(1..=16).contains(&desc.max_anisotropy) {
            return Err(HResult::E_INVALIDARG);
        }
        if desc.min_lod > desc.max_lod {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert(ObjectData::SamplerState(*desc)))
    }

    fn create_shader(&self, stage: ShaderStage, bytecode: &[u8]) -> NativeResult<RawHandle> {
        shader_container(stage, bytecode)?;
        Ok(self.insert(ObjectData::Shader { stage, bytecode: bytecode.to_vec(), stream_output: Vec::new() }))
    }

    fn create_geometry_shader_with_stream_output(
        &self,
        bytecode: &[u8],
        entries: &[SoDeclarationEntry],
        strides: &[u32],
        rasterized_stream: u32,
    ) -> NativeResult<RawHandle> {
        let stage_ok = Container::parse(bytecode).is_some_and(|c| {
            c.stage_prefix() == ShaderStage::Geometry.target_prefix() || c.stage_prefix() == ShaderStage::Vertex.target_prefix()
        });
        if !stage_ok || entries.is_empty() || strides.len() > MAX_SO_SLOTS {
            return Err(HResult::E_INVALIDARG);
        }
        let entries_ok = entries.iter().all(|e| {
            (e.output_slot as usize) < MAX_SO_SLOTS
                && (1..=4).contains(&e.component_count)
                && e.start_component as u32 + e.component_count as u32 <= 4
                && e.stream < 4
        });
        if !entries_ok || (rasterized_stream != SO_NO_RASTERIZED_STREAM && rasterized_stream >= 4) {
            return Err(HResult::E_INVALIDARG);
        }
        Ok(self.insert(ObjectData::Shader {
            stage: ShaderStage::Geometry,
            bytecode: bytecode.to_vec(),
            stream_output: entries.to_vec(),
        }))
    }

    fn live_objects(&self) -> Vec<LiveObject> {
        let state = self.shared.lock();
        let mut objects: Vec<LiveObject> = state
            .objects
            .iter()
            .map(|(handle, object)| LiveObject {
                handle,
                kind: object.data.kind(),
                name: object.name.clone(),
                ref_count: object.ref_count,
            })
            .collect();
        objects.sort_by_key(|o| o.handle);
        objects
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
