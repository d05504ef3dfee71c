/// Pipeline state snapshot - save and restore around out-of-band rendering
///
/// Native getters add a reference to every object they return; the snapshot
/// keeps each one in a `ComPtr`, so dropping it releases them whether or not
/// it was restored.

use std::sync::Arc;

use crate::com_ptr::{raw_of, ComPtr};
use crate::native::{
    BoundShader, DxgiFormat, NativeContext, NativeDevice, PrimitiveTopology, Rect, Viewport,
    MAX_CLASS_INSTANCES, VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE,
};

/// Shader bound to a stage with its class instances
struct CapturedShader {
    shader: Option<ComPtr>,
    class_instances: Vec<ComPtr>,
}

impl CapturedShader {
    fn new((shader, class_instances): BoundShader, device: &Arc<dyn NativeDevice>) -> Self {
        Self {
            shader: ComPtr::from_raw_opt(shader, device),
            class_instances: class_instances
                .into_iter()
                .map(|raw| ComPtr::from_raw(raw, device.clone()))
                .collect(),
        }
    }

    fn class_instances(&self) -> Vec<crate::native::RawHandle> {
        self.class_instances.iter().map(ComPtr::raw).collect()
    }
}

/// Opaque capture of every pipeline slot the render API binds
pub struct Dx11PipelineState {
    scissor_rects: Vec<Rect>,
    viewports: Vec<Viewport>,
    rasterizer_state: Option<ComPtr>,
    blend_state: Option<ComPtr>,
    blend_factor: [f32; 4],
    sample_mask: u32,
    depth_stencil_state: Option<ComPtr>,
    stencil_ref: u32,
    ps_shader_resource: Option<ComPtr>,
    ps_sampler: Option<ComPtr>,
    pixel_shader: CapturedShader,
    vertex_shader: CapturedShader,
    geometry_shader: CapturedShader,
    vs_constant_buffer: Option<ComPtr>,
    topology: PrimitiveTopology,
    index_buffer: Option<ComPtr>,
    index_format: DxgiFormat,
    index_offset: u32,
    vertex_buffer: Option<ComPtr>,
    vertex_stride: u32,
    vertex_offset: u32,
    input_layout: Option<ComPtr>,
}

impl Dx11PipelineState {
    /// Capture the bound slots of `context`
    pub(crate) fn capture(context: &dyn NativeContext, device: &Arc<dyn NativeDevice>) -> Self {
        let wrap = |raw| ComPtr::from_raw_opt(raw, device);
        let first = |slots: Vec<Option<crate::native::RawHandle>>| slots.into_iter().next().flatten();

        let scissor_rects = context.rs_get_scissor_rects(VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE);
        let viewports = context.rs_get_viewports(VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE);
        let rasterizer_state = wrap(context.rs_get_state());
        let (blend_state, blend_factor, sample_mask) = context.om_get_blend_state();
        let blend_state = wrap(blend_state);
        let (depth_stencil_state, stencil_ref) = context.om_get_depth_stencil_state();
        let depth_stencil_state = wrap(depth_stencil_state);
        let ps_shader_resource = wrap(first(context.ps_get_shader_resources(0, 1)));
        let ps_sampler = wrap(first(context.ps_get_samplers(0, 1)));
        let pixel_shader = CapturedShader::new(context.ps_get_shader(MAX_CLASS_INSTANCES), device);
        let vertex_shader = CapturedShader::new(context.vs_get_shader(MAX_CLASS_INSTANCES), device);
        let vs_constant_buffer = wrap(first(context.vs_get_constant_buffers(0, 1)));
        let geometry_shader = CapturedShader::new(context.gs_get_shader(MAX_CLASS_INSTANCES), device);
        let topology = context.ia_get_primitive_topology();
        let (index_buffer, index_format, index_offset) = context.ia_get_index_buffer();
        let index_buffer = wrap(index_buffer);
        let (vertex_buffer, vertex_stride, vertex_offset) = context
            .ia_get_vertex_buffers(0, 1)
            .into_iter()
            .next()
            .unwrap_or((None, 0, 0));
        let vertex_buffer = wrap(vertex_buffer);
        let input_layout = wrap(context.ia_get_input_layout());

        Self {
            scissor_rects,
            viewports,
            rasterizer_state,
            blend_state,
            blend_factor,
            sample_mask,
            depth_stencil_state,
            stencil_ref,
            ps_shader_resource,
            ps_sampler,
            pixel_shader,
            vertex_shader,
            geometry_shader,
            vs_constant_buffer,
            topology,
            index_buffer,
            index_format,
            index_offset,
            vertex_buffer,
            vertex_stride,
            vertex_offset,
            input_layout,
        }
    }

    /// Rebind every captured slot, in capture order
    ///
    /// The snapshot keeps its references and can be applied again.
    pub(crate) fn apply(&self, context: &dyn NativeContext) {
        context.rs_set_scissor_rects(&self.scissor_rects);
        context.rs_set_viewports(&self.viewports);
        context.rs_set_state(raw_of(self.rasterizer_state.as_ref()));
        context.om_set_blend_state(raw_of(self.blend_state.as_ref()), self.blend_factor, self.sample_mask);
        context.om_set_depth_stencil_state(raw_of(self.depth_stencil_state.as_ref()), self.stencil_ref);
        context.ps_set_shader_resources(0, &[raw_of(self.ps_shader_resource.as_ref())]);
        context.ps_set_samplers(0, &[raw_of(self.ps_sampler.as_ref())]);
        context.ps_set_shader(raw_of(self.pixel_shader.shader.as_ref()), &self.pixel_shader.class_instances());
        context.vs_set_shader(raw_of(self.vertex_shader.shader.as_ref()), &self.vertex_shader.class_instances());
        context.vs_set_constant_buffers(0, &[raw_of(self.vs_constant_buffer.as_ref())]);
        context.gs_set_shader(raw_of(self.geometry_shader.shader.as_ref()), &self.geometry_shader.class_instances());
        context.ia_set_primitive_topology(self.topology);
        context.ia_set_index_buffer(raw_of(self.index_buffer.as_ref()), self.index_format, self.index_offset);
        context.ia_set_vertex_buffers(0, &[(raw_of(self.vertex_buffer.as_ref()), self.vertex_stride, self.vertex_offset)]);
        context.ia_set_input_layout(raw_of(self.input_layout.as_ref()));
    }

    /// Number of native references the snapshot holds
    pub fn held_references(&self) -> usize {
        let shaders = [&self.pixel_shader, &self.vertex_shader, &self.geometry_shader]
            .iter()
            .map(|s| usize::from(s.shader.is_some()) + s.class_instances.len())
            .sum::<usize>();
        let slots = [
            &self.rasterizer_state,
            &self.blend_state,
            &self.depth_stencil_state,
            &self.ps_shader_resource,
            &self.ps_sampler,
            &self.vs_constant_buffer,
            &self.index_buffer,
            &self.vertex_buffer,
            &self.input_layout,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count();
        shaders + slots
    }
}
