/// Immediate context of the software driver

use std::sync::Arc;

use ge_render_api::ge::render::ShaderStage;

use super::objects::{mip_layout, ObjectData, ObjectTable};
use super::texels::{self, TexelLayout};
use super::{DriverState, Shared};
use crate::native::*;
use crate::translate;

const SHADER_RESOURCE_SLOTS: usize = 128;
const CONSTANT_BUFFER_SLOTS: usize = 14;
const SAMPLER_SLOTS: usize = 16;
const VERTEX_BUFFER_SLOTS: usize = 32;
const UNORDERED_ACCESS_SLOTS: usize = 8;
const STREAM_OUTPUT_SLOTS: usize = 4;

/// One recorded submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Draw { vertex_count: u32, start_vertex: u32 },
    DrawIndexed { index_count: u32, start_index: u32, base_vertex: i32 },
    DrawInstanced { vertex_count_per_instance: u32, instance_count: u32, start_vertex: u32, start_instance: u32 },
    DrawAuto,
    Dispatch { x: u32, y: u32, z: u32 },
}

// ============================================================================
// BINDING STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StageSlots {
    pub shader: Option<RawHandle>,
    pub class_instances: Vec<RawHandle>,
    pub shader_resources: Vec<Option<RawHandle>>,
    pub constant_buffers: Vec<Option<RawHandle>>,
    pub samplers: Vec<Option<RawHandle>>,
}

impl Default for StageSlots {
    fn default() -> Self {
        Self {
            shader: None,
            class_instances: Vec::new(),
            shader_resources: vec![None; SHADER_RESOURCE_SLOTS],
            constant_buffers: vec![None; CONSTANT_BUFFER_SLOTS],
            samplers: vec![None; SAMPLER_SLOTS],
        }
    }
}

/// Everything bound to the pipeline
///
/// Every bound handle holds a reference. [`ReferenceDriver::bound_slots`](super::ReferenceDriver::bound_slots)
/// returns a copy for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSlots {
    pub stages: [StageSlots; 6],
    pub unordered_access_views: Vec<Option<RawHandle>>,
    pub input_layout: Option<RawHandle>,
    pub topology: PrimitiveTopology,
    pub vertex_buffers: Vec<(Option<RawHandle>, u32, u32)>,
    pub index_buffer: (Option<RawHandle>, DxgiFormat, u32),
    pub rasterizer_state: Option<RawHandle>,
    pub viewports: Vec<Viewport>,
    pub scissor_rects: Vec<Rect>,
    pub render_targets: Vec<Option<RawHandle>>,
    pub depth_stencil_view: Option<RawHandle>,
    pub blend_state: Option<RawHandle>,
    pub blend_factor: [f32; 4],
    pub sample_mask: u32,
    pub depth_stencil_state: Option<RawHandle>,
    pub stencil_ref: u32,
    pub stream_output_targets: Vec<(Option<RawHandle>, u32)>,
}

impl Default for BoundSlots {
    fn default() -> Self {
        Self {
            stages: Default::default(),
            unordered_access_views: vec![None; UNORDERED_ACCESS_SLOTS],
            input_layout: None,
            topology: PrimitiveTopology::UNDEFINED,
            vertex_buffers: vec![(None, 0, 0); VERTEX_BUFFER_SLOTS],
            index_buffer: (None, DxgiFormat::UNKNOWN, 0),
            rasterizer_state: None,
            viewports: Vec::new(),
            scissor_rects: Vec::new(),
            render_targets: vec![None; 8],
            depth_stencil_view: None,
            blend_state: None,
            blend_factor: [1.0; 4],
            sample_mask: 0xffff_ffff,
            depth_stencil_state: None,
            stencil_ref: 0,
            stream_output_targets: vec![(None, 0); STREAM_OUTPUT_SLOTS],
        }
    }
}

impl BoundSlots {
    /// Every handle the bindings hold a reference on
    fn held_handles(&self) -> Vec<RawHandle> {
        let mut handles = Vec::new();
        for stage in &self.stages {
            handles.extend(stage.shader);
            handles.extend(stage.class_instances.iter().copied());
            handles.extend(stage.shader_resources.iter().flatten());
            handles.extend(stage.constant_buffers.iter().flatten());
            handles.extend(stage.samplers.iter().flatten());
        }
        handles.extend(self.unordered_access_views.iter().flatten());
        handles.extend(self.input_layout);
        handles.extend(self.vertex_buffers.iter().filter_map(|vb| vb.0));
        handles.extend(self.index_buffer.0);
        handles.extend(self.rasterizer_state);
        handles.extend(self.render_targets.iter().flatten());
        handles.extend(self.depth_stencil_view);
        handles.extend(self.blend_state);
        handles.extend(self.depth_stencil_state);
        handles.extend(self.stream_output_targets.iter().filter_map(|so| so.0));
        handles
    }
}

/// Rebind a run of slots starting at `start`; slots past the end are ignored
fn rebind_slots(objects: &mut ObjectTable, slots: &mut [Option<RawHandle>], start: u32, handles: &[Option<RawHandle>]) {
    for (slot, handle) in slots.iter_mut().skip(start as usize).zip(handles) {
        objects.rebind(slot, *handle);
    }
}

/// Read a run of slots, adding the reference the caller will own
fn get_slots(objects: &mut ObjectTable, slots: &[Option<RawHandle>], start: u32, count: u32) -> Vec<Option<RawHandle>> {
    (start..start + count)
        .map(|i| {
            let handle = slots.get(i as usize).copied().flatten();
            objects.add_ref_opt(handle);
            handle
        })
        .collect()
}

// ============================================================================
// CONTEXT
// ============================================================================

/// `ID3D11DeviceContext1` of the software driver
pub struct ReferenceContext {
    pub(crate) shared: Arc<Shared>,
}

impl ReferenceContext {
    fn set_shader(&self, stage: ShaderStage, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        let slots = &mut context.stages[stage.index()];
        objects.rebind(&mut slots.shader, shader);
        for instance in class_instances {
            objects.add_ref(*instance);
        }
        for old in std::mem::replace(&mut slots.class_instances, class_instances.to_vec()) {
            objects.release(old);
        }
    }

    fn set_shader_resources(&self, stage: ShaderStage, start: u32, views: &[Option<RawHandle>]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        rebind_slots(objects, &mut context.stages[stage.index()].shader_resources, start, views);
    }

    fn set_constant_buffers(&self, stage: ShaderStage, start: u32, buffers: &[Option<RawHandle>]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        rebind_slots(objects, &mut context.stages[stage.index()].constant_buffers, start, buffers);
    }

    fn set_samplers(&self, stage: ShaderStage, start: u32, samplers: &[Option<RawHandle>]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        rebind_slots(objects, &mut context.stages[stage.index()].samplers, start, samplers);
    }

    fn get_shader(&self, stage: ShaderStage, max_class_instances: usize) -> BoundShader {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        let slots = &context.stages[stage.index()];
        objects.add_ref_opt(slots.shader);
        let instances: Vec<RawHandle> = slots.class_instances.iter().take(max_class_instances).copied().collect();
        for instance in &instances {
            objects.add_ref(*instance);
        }
        (slots.shader, instances)
    }

    fn record(&self, call: DrawCall) {
        self.shared.lock().stats.draw_calls.push(call);
    }
}

/// Subresource indices written through a render-target or depth view
fn view_subresources(objects: &ObjectTable, view: RawHandle) -> Option<(RawHandle, DxgiFormat, Vec<u32>)> {
    let object = objects.get(view)?;
    let (resource, format, mip, first, count) = match &object.data {
        ObjectData::RenderTargetView { resource, desc } => match desc.dimension {
            RtvDimension::Texture2d { mip_slice } => (*resource, desc.format, mip_slice, 0, 1),
            RtvDimension::Texture2dArray { mip_slice, first_array_slice, array_size } => {
                (*resource, desc.format, mip_slice, first_array_slice, array_size)
            }
            RtvDimension::Texture2dMs => (*resource, desc.format, 0, 0, 1),
            RtvDimension::Texture2dMsArray { first_array_slice, array_size } => {
                (*resource, desc.format, 0, first_array_slice, array_size)
            }
        },
        ObjectData::DepthStencilView { resource, desc } => match desc.dimension {
            DsvDimension::Texture2d { mip_slice } => (*resource, desc.format, mip_slice, 0, 1),
            DsvDimension::Texture2dArray { mip_slice, first_array_slice, array_size } => {
                (*resource, desc.format, mip_slice, first_array_slice, array_size)
            }
            DsvDimension::Texture2dMs => (*resource, desc.format, 0, 0, 1),
            DsvDimension::Texture2dMsArray { first_array_slice, array_size } => {
                (*resource, desc.format, 0, first_array_slice, array_size)
            }
        },
        _ => return None,
    };
    let mips = objects.texture(resource)?.desc.mip_levels;
    let subresources = (first..first + count).map(|slice| mip + slice * mips).collect();
    Some((resource, format, subresources))
}

impl NativeContext for ReferenceContext {
    // ===== PER-STAGE =====

    fn vs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Vertex, shader, class_instances);
    }
    fn ps_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Pixel, shader, class_instances);
    }
    fn gs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Geometry, shader, class_instances);
    }
    fn hs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Hull, shader, class_instances);
    }
    fn ds_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Domain, shader, class_instances);
    }
    fn cs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]) {
        self.set_shader(ShaderStage::Compute, shader, class_instances);
    }

    fn vs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Vertex, start_slot, views);
    }
    fn ps_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Pixel, start_slot, views);
    }
    fn gs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Geometry, start_slot, views);
    }
    fn hs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Hull, start_slot, views);
    }
    fn ds_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Domain, start_slot, views);
    }
    fn cs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        self.set_shader_resources(ShaderStage::Compute, start_slot, views);
    }

    fn vs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Vertex, start_slot, buffers);
    }
    fn ps_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Pixel, start_slot, buffers);
    }
    fn gs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Geometry, start_slot, buffers);
    }
    fn hs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Hull, start_slot, buffers);
    }
    fn ds_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Domain, start_slot, buffers);
    }
    fn cs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
        self.set_constant_buffers(ShaderStage::Compute, start_slot, buffers);
    }

    fn vs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Vertex, start_slot, samplers);
    }
    fn ps_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Pixel, start_slot, samplers);
    }
    fn gs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Geometry, start_slot, samplers);
    }
    fn hs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Hull, start_slot, samplers);
    }
    fn ds_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Domain, start_slot, samplers);
    }
    fn cs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
        self.set_samplers(ShaderStage::Compute, start_slot, samplers);
    }

    fn cs_set_unordered_access_views(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        rebind_slots(objects, &mut context.unordered_access_views, start_slot, views);
    }

    fn vs_get_shader(&self, max_class_instances: usize) -> BoundShader {
        self.get_shader(ShaderStage::Vertex, max_class_instances)
    }
    fn ps_get_shader(&self, max_class_instances: usize) -> BoundShader {
        self.get_shader(ShaderStage::Pixel, max_class_instances)
    }
    fn gs_get_shader(&self, max_class_instances: usize) -> BoundShader {
        self.get_shader(ShaderStage::Geometry, max_class_instances)
    }

    fn ps_get_shader_resources(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        get_slots(objects, &context.stages[ShaderStage::Pixel.index()].shader_resources, start_slot, count)
    }

    fn ps_get_samplers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        get_slots(objects, &context.stages[ShaderStage::Pixel.index()].samplers, start_slot, count)
    }

    fn vs_get_constant_buffers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        get_slots(objects, &context.stages[ShaderStage::Vertex.index()].constant_buffers, start_slot, count)
    }

    // ===== INPUT ASSEMBLER =====

    fn ia_set_input_layout(&self, layout: Option<RawHandle>) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        objects.rebind(&mut context.input_layout, layout);
    }

    fn ia_set_primitive_topology(&self, topology: PrimitiveTopology) {
        self.shared.lock().context.topology = topology;
    }

    fn ia_set_vertex_buffers(&self, start_slot: u32, buffers: &[(Option<RawHandle>, u32, u32)]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        for (slot, (buffer, stride, offset)) in context.vertex_buffers.iter_mut().skip(start_slot as usize).zip(buffers) {
            objects.rebind(&mut slot.0, *buffer);
            slot.1 = *stride;
            slot.2 = *offset;
        }
    }

    fn ia_set_index_buffer(&self, buffer: Option<RawHandle>, format: DxgiFormat, offset: u32) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        objects.rebind(&mut context.index_buffer.0, buffer);
        context.index_buffer.1 = format;
        context.index_buffer.2 = offset;
    }

    fn ia_get_input_layout(&self) -> Option<RawHandle> {
        let mut state = self.shared.lock();
        let handle = state.context.input_layout;
        state.objects.add_ref_opt(handle);
        handle
    }

    fn ia_get_primitive_topology(&self) -> PrimitiveTopology {
        self.shared.lock().context.topology
    }

    fn ia_get_vertex_buffers(&self, start_slot: u32, count: u32) -> Vec<(Option<RawHandle>, u32, u32)> {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        (start_slot..start_slot + count)
            .map(|i| {
                let slot = context.vertex_buffers.get(i as usize).copied().unwrap_or((None, 0, 0));
                objects.add_ref_opt(slot.0);
                slot
            })
            .collect()
    }

    fn ia_get_index_buffer(&self) -> (Option<RawHandle>, DxgiFormat, u32) {
        let mut state = self.shared.lock();
        let index_buffer = state.context.index_buffer;
        state.objects.add_ref_opt(index_buffer.0);
        index_buffer
    }

    // ===== RASTERIZER =====

    fn rs_set_state(&self, rasterizer_state: Option<RawHandle>) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        objects.rebind(&mut context.rasterizer_state, rasterizer_state);
    }

    fn rs_set_viewports(&self, viewports: &[Viewport]) {
        let count = viewports.len().min(VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE);
        self.shared.lock().context.viewports = viewports[..count].to_vec();
    }

    fn rs_set_scissor_rects(&self, rects: &[Rect]) {
        let count = rects.len().min(VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE);
        self.shared.lock().context.scissor_rects = rects[..count].to_vec();
    }

    fn rs_get_state(&self) -> Option<RawHandle> {
        let mut state = self.shared.lock();
        let handle = state.context.rasterizer_state;
        state.objects.add_ref_opt(handle);
        handle
    }

    fn rs_get_viewports(&self, max: usize) -> Vec<Viewport> {
        self.shared.lock().context.viewports.iter().take(max).copied().collect()
    }

    fn rs_get_scissor_rects(&self, max: usize) -> Vec<Rect> {
        self.shared.lock().context.scissor_rects.iter().take(max).copied().collect()
    }

    // ===== OUTPUT MERGER =====

    fn om_set_render_targets(&self, views: &[Option<RawHandle>], depth_stencil: Option<RawHandle>) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        for (i, slot) in context.render_targets.iter_mut().enumerate() {
            objects.rebind(slot, views.get(i).copied().flatten());
        }
        objects.rebind(&mut context.depth_stencil_view, depth_stencil);
    }

    fn om_set_blend_state(&self, blend_state: Option<RawHandle>, blend_factor: [f32; 4], sample_mask: u32) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        objects.rebind(&mut context.blend_state, blend_state);
        context.blend_factor = blend_factor;
        context.sample_mask = sample_mask;
    }

    fn om_set_depth_stencil_state(&self, depth_stencil_state: Option<RawHandle>, stencil_ref: u32) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        objects.rebind(&mut context.depth_stencil_state, depth_stencil_state);
        context.stencil_ref = stencil_ref;
    }

    fn om_get_blend_state(&self) -> (Option<RawHandle>, [f32; 4], u32) {
        let mut state = self.shared.lock();
        let context = &state.context;
        let result = (context.blend_state, context.blend_factor, context.sample_mask);
        state.objects.add_ref_opt(result.0);
        result
    }

    fn om_get_depth_stencil_state(&self) -> (Option<RawHandle>, u32) {
        let mut state = self.shared.lock();
        let result = (state.context.depth_stencil_state, state.context.stencil_ref);
        state.objects.add_ref_opt(result.0);
        result
    }

    // ===== STREAM OUTPUT =====

    fn so_set_targets(&self, targets: &[(Option<RawHandle>, u32)]) {
        let mut state = self.shared.lock();
        let DriverState { objects, context, .. } = &mut *state;
        for (i, slot) in context.stream_output_targets.iter_mut().enumerate() {
            let (buffer, offset) = targets.get(i).copied().unwrap_or((None, 0));
            objects.rebind(&mut slot.0, buffer);
            slot.1 = offset;
        }
    }

    // ===== SUBMISSION =====

    fn draw(&self, vertex_count: u32, start_vertex: u32) {
        self.record(DrawCall::Draw { vertex_count, start_vertex });
    }

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.record(DrawCall::DrawIndexed { index_count, start_index, base_vertex });
    }

    fn draw_instanced(&self, vertex_count_per_instance: u32, instance_count: u32, start_vertex: u32, start_instance: u32) {
        self.record(DrawCall::DrawInstanced { vertex_count_per_instance, instance_count, start_vertex, start_instance });
    }

    fn draw_auto(&self) {
        self.record(DrawCall::DrawAuto);
    }

    fn dispatch(&self, x: u32, y: u32, z: u32) {
        self.record(DrawCall::Dispatch { x, y, z });
    }

    // ===== DATA =====

    fn update_subresource(
        &self,
        resource: RawHandle,
        subresource: u32,
        dst_box: Option<&NativeBox>,
        data: &[u8],
        row_pitch: u32,
        _depth_pitch: u32,
        _flags: CopyFlag,
    ) {
        let mut state = self.shared.lock();

        if let Some(buffer) = state.objects.buffer_mut(resource) {
            if matches!(buffer.desc.usage, Usage::Immutable | Usage::Staging) {
                return;
            }
            let (start, end) = match dst_box {
                Some(b) => (b.left as usize, b.right as usize),
                None => (0, buffer.data.len()),
            };
            let end = end.min(buffer.data.len());
            if start >= end {
                return;
            }
            let count = (end - start).min(data.len());
            buffer.data[start..start + count].copy_from_slice(&data[..count]);
            return;
        }

        let Some(texture) = state.objects.texture_mut(resource) else { return };
        if matches!(texture.desc.usage, Usage::Immutable | Usage::Staging) {
            return;
        }
        let desc = texture.desc;
        let Some(target) = texture.subresources.get_mut(subresource as usize) else { return };

        let mip = subresource % desc.mip_levels;
        let (pitch, rows) = mip_layout(desc.format, desc.width, desc.height, mip);
        let mip_width = (desc.width >> mip).max(1);
        let texel_bytes = (pitch / mip_width).max(1);

        let (left, top, right, bottom) = match dst_box {
            Some(b) if !translate::to_abstract(desc.format).is_block_compressed() => {
                (b.left.min(mip_width), b.top.min(rows), b.right.min(mip_width), b.bottom.min(rows))
            }
            _ => (0, 0, mip_width, rows),
        };
        if left >= right || top >= bottom {
            return;
        }

        let width_bytes = if dst_box.is_some() { ((right - left) * texel_bytes) as usize } else { pitch as usize };
        let src_pitch = if row_pitch == 0 { width_bytes } else { row_pitch as usize };
        for row in 0..(bottom - top) as usize {
            let from = row * src_pitch;
            if from >= data.len() {
                break;
            }
            let count = width_bytes.min(data.len() - from);
            let to = (top as usize + row) * pitch as usize + (left * texel_bytes) as usize;
            target[to..to + count].copy_from_slice(&data[from..from + count]);
        }
    }

    fn map(&self, resource: RawHandle, subresource: u32, map_type: MapType, _flags: MapFlag) -> NativeResult<MappedSubresource> {
        let mut state = self.shared.lock();
        let readable = |usage: Usage, cpu: CpuAccessFlag| usage == Usage::Staging && cpu.contains(CpuAccessFlag::READ);
        if !matches!(map_type, MapType::Read) {
            return Err(HResult::E_NOTIMPL);
        }

        if let Some(buffer) = state.objects.buffer_mut(resource) {
            if !readable(buffer.desc.usage, buffer.desc.cpu_access_flags) {
                return Err(HResult::E_INVALIDARG);
            }
            buffer.mapped = true;
            let width = buffer.desc.byte_width;
            return Ok(MappedSubresource { data: buffer.data.clone(), row_pitch: width, depth_pitch: width });
        }

        let texture = state.objects.texture_mut(resource).ok_or(HResult::E_INVALIDARG)?;
        if !readable(texture.desc.usage, texture.desc.cpu_access_flags) {
            return Err(HResult::E_INVALIDARG);
        }
        let desc = texture.desc;
        let data = texture.subresources.get(subresource as usize).ok_or(HResult::E_INVALIDARG)?.clone();
        if !texture.mapped.contains(&subresource) {
            texture.mapped.push(subresource);
        }
        let (pitch, rows) = mip_layout(desc.format, desc.width, desc.height, subresource % desc.mip_levels);
        Ok(MappedSubresource { data, row_pitch: pitch, depth_pitch: pitch * rows })
    }

    fn unmap(&self, resource: RawHandle, subresource: u32) {
        let mut state = self.shared.lock();
        if let Some(buffer) = state.objects.buffer_mut(resource) {
            buffer.mapped = false;
        } else if let Some(texture) = state.objects.texture_mut(resource) {
            texture.mapped.retain(|s| *s != subresource);
        }
    }

    fn copy_resource(&self, destination: RawHandle, source: RawHandle) {
        if destination == source {
            return;
        }
        let mut state = self.shared.lock();
        let objects = &mut state.objects;

        let source_bytes = match objects.get(source).map(|o| &o.data) {
            Some(ObjectData::Texture(t)) => Some((Some(t.desc), t.subresources.clone())),
            Some(ObjectData::Buffer(b)) => Some((None, vec![b.data.clone()])),
            _ => None,
        };
        let Some((source_desc, bytes)) = source_bytes else { return };

        match (objects.get_mut(destination).map(|o| &mut o.data), source_desc) {
            (Some(ObjectData::Texture(dst)), Some(src_desc)) => {
                let compatible = dst.desc.width == src_desc.width
                    && dst.desc.height == src_desc.height
                    && dst.desc.mip_levels == src_desc.mip_levels
                    && dst.desc.array_size == src_desc.array_size
                    && translate::bits_per_pixel(dst.desc.format) == translate::bits_per_pixel(src_desc.format);
                if compatible && dst.desc.usage != Usage::Immutable {
                    dst.subresources = bytes;
                }
            }
            (Some(ObjectData::Buffer(dst)), None) => {
                if let Some(src) = bytes.into_iter().next() {
                    if src.len() == dst.data.len() && dst.desc.usage != Usage::Immutable {
                        dst.data = src;
                    }
                }
            }
            _ => {}
        }
    }

    fn resolve_subresource(
        &self,
        destination: RawHandle,
        dst_subresource: u32,
        source: RawHandle,
        src_subresource: u32,
        _format: DxgiFormat,
    ) {
        let mut state = self.shared.lock();
        let Some(src) = state.objects.texture(source) else { return };
        if src.desc.sample_desc.count <= 1 {
            return;
        }
        let Some(bytes) = src.subresources.get(src_subresource as usize).cloned() else { return };
        let Some(dst) = state.objects.texture_mut(destination) else { return };
        if dst.desc.sample_desc.count != 1 {
            return;
        }
        if let Some(target) = dst.subresources.get_mut(dst_subresource as usize) {
            if target.len() == bytes.len() {
                *target = bytes;
            }
        }
    }

    fn generate_mips(&self, view: RawHandle) {
        let mut state = self.shared.lock();
        state.stats.generate_mips_calls += 1;

        let Some(ObjectData::ShaderResourceView { resource, desc }) = state.objects.get(view).map(|o| &o.data) else {
            return;
        };
        let (resource, format) = (*resource, desc.format);
        let (first_mip, mip_count) = match desc.dimension {
            SrvDimension::Texture2d { most_detailed_mip, mip_levels }
            | SrvDimension::Texture2dArray { most_detailed_mip, mip_levels, .. }
            | SrvDimension::TextureCube { most_detailed_mip, mip_levels }
            | SrvDimension::TextureCubeArray { most_detailed_mip, mip_levels, .. } => (most_detailed_mip, mip_levels),
            SrvDimension::Texture2dMs | SrvDimension::Texture2dMsArray { .. } => return,
        };

        let Some(texture) = state.objects.texture_mut(resource) else { return };
        if !texture.desc.misc_flags.contains(ResourceMiscFlag::GENERATE_MIPS) {
            return;
        }
        let desc = texture.desc;
        let last_mip = if mip_count == u32::MAX { desc.mip_levels } else { (first_mip + mip_count).min(desc.mip_levels) };
        let layout = TexelLayout::of(format);

        for slice in 0..desc.array_size {
            for mip in first_mip + 1..last_mip {
                let src_index = (mip - 1 + slice * desc.mip_levels) as usize;
                let src_w = (desc.width >> (mip - 1)).max(1);
                let src_h = (desc.height >> (mip - 1)).max(1);
                let next = texels::downsample(layout, &texture.subresources[src_index], src_w, src_h);
                let dst = &mut texture.subresources[src_index + 1];
                if dst.len() == next.len() {
                    *dst = next;
                }
            }
        }
    }

    fn clear_render_target_view(&self, view: RawHandle, color: [f32; 4]) {
        let mut state = self.shared.lock();
        let Some((resource, format, subresources)) = view_subresources(&state.objects, view) else { return };
        if !matches!(state.objects.get(view).map(|o| &o.data), Some(ObjectData::RenderTargetView { .. })) {
            return;
        }
        let texel = TexelLayout::of(format).encode(color);
        if let Some(texture) = state.objects.texture_mut(resource) {
            for index in subresources {
                if let Some(bytes) = texture.subresources.get_mut(index as usize) {
                    texels::fill(bytes, &texel);
                }
            }
        }
    }

    fn clear_depth_stencil_view(&self, view: RawHandle, flags: ClearFlag, depth: f32, stencil: u8) {
        let mut state = self.shared.lock();
        let Some(ObjectData::DepthStencilView { desc, .. }) = state.objects.get(view).map(|o| &o.data) else {
            return;
        };
        let read_only = desc.flags;
        let Some((resource, format, subresources)) = view_subresources(&state.objects, view) else { return };

        let depth = (flags.contains(ClearFlag::DEPTH) && !read_only.contains(DsvFlag::READ_ONLY_DEPTH)).then_some(depth);
        let stencil = (flags.contains(ClearFlag::STENCIL) && !read_only.contains(DsvFlag::READ_ONLY_STENCIL)).then_some(stencil);
        let texel_size = (translate::bits_per_pixel(format) / 8).max(1) as usize;

        if let Some(texture) = state.objects.texture_mut(resource) {
            for index in subresources {
                let Some(bytes) = texture.subresources.get_mut(index as usize) else { continue };
                for texel in bytes.chunks_exact_mut(texel_size) {
                    let encoded = texels::encode_depth_stencil(format, texel, depth, stencil);
                    texel.copy_from_slice(&encoded);
                }
            }
        }
    }

    fn discard_view(&self, view: RawHandle) {
        self.shared.lock().stats.discarded_views.push(view);
    }

    fn clear_state(&self) {
        let mut state = self.shared.lock();
        state.stats.clear_state_calls += 1;
        let old = std::mem::take(&mut state.context);
        for handle in old.held_handles() {
            state.objects.release(handle);
        }
    }
}
