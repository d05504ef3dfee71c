/// Per-stage binding entry points
///
/// The native context has one entry point per stage and operation
/// (`VSSetShader`, `PSSetShaderResources`, ...). The table maps a
/// [`ShaderStage`] to the four it needs so the binding code is written once.

use ge_render_api::ge::render::ShaderStage;

use crate::native::{NativeContext, RawHandle};

type SetShaderFn = fn(&dyn NativeContext, Option<RawHandle>, &[RawHandle]);
type SetSlotsFn = fn(&dyn NativeContext, u32, &[Option<RawHandle>]);

/// Binding entry points of one stage
pub(crate) struct StageFunctions {
    pub(crate) set_shader: SetShaderFn,
    pub(crate) set_shader_resources: SetSlotsFn,
    pub(crate) set_constant_buffers: SetSlotsFn,
    pub(crate) set_samplers: SetSlotsFn,
}

/// Indexed by [`ShaderStage::index`]
static STAGE_FUNCTIONS: [StageFunctions; 6] = [
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.vs_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.vs_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.vs_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.vs_set_samplers(slot, samplers),
    },
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.ps_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.ps_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.ps_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.ps_set_samplers(slot, samplers),
    },
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.gs_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.gs_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.gs_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.gs_set_samplers(slot, samplers),
    },
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.hs_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.hs_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.hs_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.hs_set_samplers(slot, samplers),
    },
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.ds_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.ds_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.ds_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.ds_set_samplers(slot, samplers),
    },
    StageFunctions {
        set_shader: |ctx, shader, instances| ctx.cs_set_shader(shader, instances),
        set_shader_resources: |ctx, slot, views| ctx.cs_set_shader_resources(slot, views),
        set_constant_buffers: |ctx, slot, buffers| ctx.cs_set_constant_buffers(slot, buffers),
        set_samplers: |ctx, slot, samplers| ctx.cs_set_samplers(slot, samplers),
    },
];

/// Binding entry points of `stage`
pub(crate) fn stage_functions(stage: ShaderStage) -> &'static StageFunctions {
    &STAGE_FUNCTIONS[stage.index()]
}

#[cfg(test)]
#[path = "dx11_shader_stage_tests.rs"]
mod tests;
