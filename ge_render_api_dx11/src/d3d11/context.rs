/// `ID3D11DeviceContext1` behind the native context seam

use std::sync::{Mutex, MutexGuard};

use windows::Win32::Graphics::Direct3D11::*;

use super::convert;
use super::{handles, interface, interfaces, into_handle};
use crate::native::*;

/// Immediate context
///
/// The native context is single-threaded; every call takes the lock.
pub struct D3D11Context {
    context: Mutex<ID3D11DeviceContext1>,
}

// Access is serialized through the mutex.
unsafe impl Send for D3D11Context {}
unsafe impl Sync for D3D11Context {}

impl D3D11Context {
    pub(crate) fn new(context: ID3D11DeviceContext1) -> Self {
        Self { context: Mutex::new(context) }
    }

    fn lock(&self) -> MutexGuard<'_, ID3D11DeviceContext1> {
        self.context.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn class_instances(handles: &[RawHandle]) -> Vec<Option<ID3D11ClassInstance>> {
    handles.iter().map(|&h| interface(h)).collect()
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    (!items.is_empty()).then_some(items)
}

/// Setters of one programmable stage
macro_rules! stage_setters {
    (
        $shader_ty:ty,
        $set_shader:ident => $SetShader:ident,
        $set_resources:ident => $SetResources:ident,
        $set_buffers:ident => $SetBuffers:ident,
        $set_samplers:ident => $SetSamplers:ident
    ) => {
        fn $set_shader(&self, shader: Option<RawHandle>, instances: &[RawHandle]) {
            let shader = shader.and_then(interface::<$shader_ty>);
            let instances = class_instances(instances);
            unsafe { self.lock().$SetShader(shader.as_ref(), non_empty(&instances)) };
        }

        fn $set_resources(&self, start_slot: u32, views: &[Option<RawHandle>]) {
            let views = interfaces::<ID3D11ShaderResourceView>(views);
            unsafe { self.lock().$SetResources(start_slot, Some(&views)) };
        }

        fn $set_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]) {
            let buffers = interfaces::<ID3D11Buffer>(buffers);
            unsafe { self.lock().$SetBuffers(start_slot, Some(&buffers)) };
        }

        fn $set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]) {
            let samplers = interfaces::<ID3D11SamplerState>(samplers);
            unsafe { self.lock().$SetSamplers(start_slot, Some(&samplers)) };
        }
    };
}

/// Getter of one stage's shader and its class instances
macro_rules! shader_getter {
    ($shader_ty:ty, $get_shader:ident => $GetShader:ident) => {
        fn $get_shader(&self, max_class_instances: usize) -> BoundShader {
            let mut shader: Option<$shader_ty> = None;
            let mut instances: Vec<Option<ID3D11ClassInstance>> = vec![None; max_class_instances];
            let mut count = max_class_instances as u32;
            unsafe { self.lock().$GetShader(&mut shader, Some(instances.as_mut_ptr()), Some(&mut count)) };
            instances.truncate(count as usize);
            let instances = instances.into_iter().flatten().map(into_handle).collect();
            (shader.map(into_handle), instances)
        }
    };
}

impl NativeContext for D3D11Context {
    // ===== PER-STAGE =====

    stage_setters!(
        ID3D11VertexShader,
        vs_set_shader => VSSetShader,
        vs_set_shader_resources => VSSetShaderResources,
        vs_set_constant_buffers => VSSetConstantBuffers,
        vs_set_samplers => VSSetSamplers
    );
    stage_setters!(
        ID3D11PixelShader,
        ps_set_shader => PSSetShader,
        ps_set_shader_resources => PSSetShaderResources,
        ps_set_constant_buffers => PSSetConstantBuffers,
        ps_set_samplers => PSSetSamplers
    );
    stage_setters!(
        ID3D11GeometryShader,
        gs_set_shader => GSSetShader,
        gs_set_shader_resources => GSSetShaderResources,
        gs_set_constant_buffers => GSSetConstantBuffers,
        gs_set_samplers => GSSetSamplers
    );
    stage_setters!(
        ID3D11HullShader,
        hs_set_shader => HSSetShader,
        hs_set_shader_resources => HSSetShaderResources,
        hs_set_constant_buffers => HSSetConstantBuffers,
        hs_set_samplers => HSSetSamplers
    );
    stage_setters!(
        ID3D11DomainShader,
        ds_set_shader => DSSetShader,
        ds_set_shader_resources => DSSetShaderResources,
        ds_set_constant_buffers => DSSetConstantBuffers,
        ds_set_samplers => DSSetSamplers
    );
    stage_setters!(
        ID3D11ComputeShader,
        cs_set_shader => CSSetShader,
        cs_set_shader_resources => CSSetShaderResources,
        cs_set_constant_buffers => CSSetConstantBuffers,
        cs_set_samplers => CSSetSamplers
    );

    fn cs_set_unordered_access_views(&self, start_slot: u32, views: &[Option<RawHandle>]) {
        let views = interfaces::<ID3D11UnorderedAccessView>(views);
        unsafe { self.lock().CSSetUnorderedAccessViews(start_slot, views.len() as u32, Some(views.as_ptr()), None) };
    }

    shader_getter!(ID3D11VertexShader, vs_get_shader => VSGetShader);
    shader_getter!(ID3D11PixelShader, ps_get_shader => PSGetShader);
    shader_getter!(ID3D11GeometryShader, gs_get_shader => GSGetShader);

    fn ps_get_shader_resources(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut views: Vec<Option<ID3D11ShaderResourceView>> = vec![None; count as usize];
        unsafe { self.lock().PSGetShaderResources(start_slot, Some(&mut views)) };
        handles(views)
    }

    fn ps_get_samplers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut samplers: Vec<Option<ID3D11SamplerState>> = vec![None; count as usize];
        unsafe { self.lock().PSGetSamplers(start_slot, Some(&mut samplers)) };
        handles(samplers)
    }

    fn vs_get_constant_buffers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>> {
        let mut buffers: Vec<Option<ID3D11Buffer>> = vec![None; count as usize];
        unsafe { self.lock().VSGetConstantBuffers(start_slot, Some(&mut buffers)) };
        handles(buffers)
    }

    // ===== INPUT ASSEMBLER =====

    fn ia_set_input_layout(&self, layout: Option<RawHandle>) {
        let layout = layout.and_then(interface::<ID3D11InputLayout>);
        unsafe { self.lock().IASetInputLayout(layout.as_ref()) };
    }

    fn ia_set_primitive_topology(&self, topology: PrimitiveTopology) {
        unsafe { self.lock().IASetPrimitiveTopology(convert::topology(topology)) };
    }

    fn ia_set_vertex_buffers(&self, start_slot: u32, buffers: &[(Option<RawHandle>, u32, u32)]) {
        let views: Vec<Option<ID3D11Buffer>> = buffers.iter().map(|(b, _, _)| b.and_then(interface)).collect();
        let strides: Vec<u32> = buffers.iter().map(|&(_, stride, _)| stride).collect();
        let offsets: Vec<u32> = buffers.iter().map(|&(_, _, offset)| offset).collect();
        unsafe {
            self.lock().IASetVertexBuffers(
                start_slot,
                views.len() as u32,
                Some(views.as_ptr()),
                Some(strides.as_ptr()),
                Some(offsets.as_ptr()),
            )
        };
    }

    fn ia_set_index_buffer(&self, buffer: Option<RawHandle>, format: DxgiFormat, offset: u32) {
        let buffer = buffer.and_then(interface::<ID3D11Buffer>);
        unsafe { self.lock().IASetIndexBuffer(buffer.as_ref(), convert::format(format), offset) };
    }

    fn ia_get_input_layout(&self) -> Option<RawHandle> {
        let mut layout: Option<ID3D11InputLayout> = None;
        unsafe { self.lock().IAGetInputLayout(Some(&mut layout)) };
        layout.map(into_handle)
    }

    fn ia_get_primitive_topology(&self) -> PrimitiveTopology {
        let mut topology = Default::default();
        unsafe { self.lock().IAGetPrimitiveTopology(&mut topology) };
        convert::from_topology(topology)
    }

    fn ia_get_vertex_buffers(&self, start_slot: u32, count: u32) -> Vec<(Option<RawHandle>, u32, u32)> {
        let mut buffers: Vec<Option<ID3D11Buffer>> = vec![None; count as usize];
        let mut strides = vec![0u32; count as usize];
        let mut offsets = vec![0u32; count as usize];
        unsafe {
            self.lock().IAGetVertexBuffers(
                start_slot,
                count,
                Some(buffers.as_mut_ptr()),
                Some(strides.as_mut_ptr()),
                Some(offsets.as_mut_ptr()),
            )
        };
        handles(buffers).into_iter().zip(strides).zip(offsets).map(|((b, s), o)| (b, s, o)).collect()
    }

    fn ia_get_index_buffer(&self) -> (Option<RawHandle>, DxgiFormat, u32) {
        let mut buffer: Option<ID3D11Buffer> = None;
        let mut format = Default::default();
        let mut offset = 0;
        unsafe { self.lock().IAGetIndexBuffer(Some(&mut buffer), Some(&mut format), Some(&mut offset)) };
        (buffer.map(into_handle), convert::from_format(format), offset)
    }

    // ===== RASTERIZER =====

    fn rs_set_state(&self, state: Option<RawHandle>) {
        let state = state.and_then(interface::<ID3D11RasterizerState>);
        unsafe { self.lock().RSSetState(state.as_ref()) };
    }

    fn rs_set_viewports(&self, viewports: &[Viewport]) {
        let viewports: Vec<D3D11_VIEWPORT> = viewports.iter().map(convert::viewport).collect();
        unsafe { self.lock().RSSetViewports(Some(&viewports)) };
    }

    fn rs_set_scissor_rects(&self, rects: &[Rect]) {
        let rects: Vec<_> = rects.iter().map(convert::rect).collect();
        unsafe { self.lock().RSSetScissorRects(Some(&rects)) };
    }

    fn rs_get_state(&self) -> Option<RawHandle> {
        let mut state: Option<ID3D11RasterizerState> = None;
        unsafe { self.lock().RSGetState(Some(&mut state)) };
        state.map(into_handle)
    }

    fn rs_get_viewports(&self, max: usize) -> Vec<Viewport> {
        let mut viewports = vec![D3D11_VIEWPORT::default(); max];
        let mut count = max as u32;
        unsafe { self.lock().RSGetViewports(&mut count, Some(viewports.as_mut_ptr())) };
        viewports.truncate(count as usize);
        viewports.iter().map(convert::from_viewport).collect()
    }

    fn rs_get_scissor_rects(&self, max: usize) -> Vec<Rect> {
        let mut rects = vec![Default::default(); max];
        let mut count = max as u32;
        unsafe { self.lock().RSGetScissorRects(&mut count, Some(rects.as_mut_ptr())) };
        rects.truncate(count as usize);
        rects.iter().map(convert::from_rect).collect()
    }

    // ===== OUTPUT MERGER =====

    fn om_set_render_targets(&self, views: &[Option<RawHandle>], depth_stencil: Option<RawHandle>) {
        let views = interfaces::<ID3D11RenderTargetView>(views);
        let depth_stencil = depth_stencil.and_then(interface::<ID3D11DepthStencilView>);
        unsafe { self.lock().OMSetRenderTargets(non_empty(&views), depth_stencil.as_ref()) };
    }

    fn om_set_blend_state(&self, state: Option<RawHandle>, blend_factor: [f32; 4], sample_mask: u32) {
        let state = state.and_then(interface::<ID3D11BlendState>);
        unsafe { self.lock().OMSetBlendState(state.as_ref(), Some(&blend_factor), sample_mask) };
    }

    fn om_set_depth_stencil_state(&self, state: Option<RawHandle>, stencil_ref: u32) {
        let state = state.and_then(interface::<ID3D11DepthStencilState>);
        unsafe { self.lock().OMSetDepthStencilState(state.as_ref(), stencil_ref) };
    }

    fn om_get_blend_state(&self) -> (Option<RawHandle>, [f32; 4], u32) {
        let mut state: Option<ID3D11BlendState> = None;
        let mut factor = [0.0f32; 4];
        let mut mask = 0u32;
        unsafe { self.lock().OMGetBlendState(Some(&mut state), Some(&mut factor), Some(&mut mask)) };
        (state.map(into_handle), factor, mask)
    }

    fn om_get_depth_stencil_state(&self) -> (Option<RawHandle>, u32) {
        let mut state: Option<ID3D11DepthStencilState> = None;
        let mut stencil_ref = 0u32;
        unsafe { self.lock().OMGetDepthStencilState(Some(&mut state), Some(&mut stencil_ref)) };
        (state.map(into_handle), stencil_ref)
    }

    // ===== STREAM OUTPUT =====

    fn so_set_targets(&self, targets: &[(Option<RawHandle>, u32)]) {
        let buffers: Vec<Option<ID3D11Buffer>> = targets.iter().map(|(b, _)| b.and_then(interface)).collect();
        let offsets: Vec<u32> = targets.iter().map(|&(_, offset)| offset).collect();
        unsafe { self.lock().SOSetTargets(buffers.len() as u32, Some(buffers.as_ptr()), Some(offsets.as_ptr())) };
    }

    // ===== SUBMISSION =====

    fn draw(&self, vertex_count: u32, start_vertex: u32) {
        unsafe { self.lock().Draw(vertex_count, start_vertex) };
    }

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32) {
        unsafe { self.lock().DrawIndexed(index_count, start_index, base_vertex) };
    }

    fn draw_instanced(&self, vertex_count_per_instance: u32, instance_count: u32, start_vertex: u32, start_instance: u32) {
        unsafe { self.lock().DrawInstanced(vertex_count_per_instance, instance_count, start_vertex, start_instance) };
    }

    fn draw_auto(&self) {
        unsafe { self.lock().DrawAuto() };
    }

    fn dispatch(&self, x: u32, y: u32, z: u32) {
        unsafe { self.lock().Dispatch(x, y, z) };
    }

    // ===== DATA =====

    fn update_subresource(
        &self,
        resource: RawHandle,
        subresource: u32,
        dst_box: Option<&NativeBox>,
        data: &[u8],
        row_pitch: u32,
        depth_pitch: u32,
        flags: CopyFlag,
    ) {
        let Some(resource) = interface::<ID3D11Resource>(resource) else {
            return;
        };
        let dst_box = dst_box.map(convert::native_box);
        unsafe {
            self.lock().UpdateSubresource1(
                &resource,
                subresource,
                dst_box.as_ref().map(|b| b as *const _),
                data.as_ptr().cast(),
                row_pitch,
                depth_pitch,
                flags.bits(),
            )
        };
    }

    fn map(&self, resource: RawHandle, subresource: u32, map_type: MapType, flags: MapFlag) -> NativeResult<MappedSubresource> {
        let resource = interface::<ID3D11Resource>(resource).ok_or(HResult::E_INVALIDARG)?;
        let context = self.lock();
        let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
        unsafe {
            context.Map(&resource, subresource, D3D11_MAP(map_type as _), flags.bits(), Some(&mut mapped))?;
        }

        // 2D textures report rows x row pitch as the depth pitch; buffers report their width
        let size = mapped.DepthPitch.max(mapped.RowPitch) as usize;
        let data = if mapped.pData.is_null() {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(mapped.pData.cast::<u8>(), size) }.to_vec()
        };
        Ok(MappedSubresource { data, row_pitch: mapped.RowPitch, depth_pitch: mapped.DepthPitch })
    }

    fn unmap(&self, resource: RawHandle, subresource: u32) {
        if let Some(resource) = interface::<ID3D11Resource>(resource) {
            unsafe { self.lock().Unmap(&resource, subresource) };
        }
    }

    fn copy_resource(&self, destination: RawHandle, source: RawHandle) {
        let (Some(destination), Some(source)) =
            (interface::<ID3D11Resource>(destination), interface::<ID3D11Resource>(source))
        else {
            return;
        };
        unsafe { self.lock().CopyResource(&destination, &source) };
    }

    fn resolve_subresource(
        &self,
        destination: RawHandle,
        dst_subresource: u32,
        source: RawHandle,
        src_subresource: u32,
        format: DxgiFormat,
    ) {
        let (Some(destination), Some(source)) =
            (interface::<ID3D11Resource>(destination), interface::<ID3D11Resource>(source))
        else {
            return;
        };
        unsafe {
            self.lock().ResolveSubresource(&destination, dst_subresource, &source, src_subresource, convert::format(format))
        };
    }

    fn generate_mips(&self, view: RawHandle) {
        if let Some(view) = interface::<ID3D11ShaderResourceView>(view) {
            unsafe { self.lock().GenerateMips(&view) };
        }
    }

    fn clear_render_target_view(&self, view: RawHandle, color: [f32; 4]) {
        if let Some(view) = interface::<ID3D11RenderTargetView>(view) {
            unsafe { self.lock().ClearRenderTargetView(&view, &color) };
        }
    }

    fn clear_depth_stencil_view(&self, view: RawHandle, flags: ClearFlag, depth: f32, stencil: u8) {
        if let Some(view) = interface::<ID3D11DepthStencilView>(view) {
            unsafe { self.lock().ClearDepthStencilView(&view, flags.bits(), depth, stencil) };
        }
    }

    fn discard_view(&self, view: RawHandle) {
        if let Some(view) = interface::<ID3D11View>(view) {
            unsafe { self.lock().DiscardView(&view) };
        }
    }

    fn clear_state(&self) {
        unsafe { self.lock().ClearState() };
    }
}
