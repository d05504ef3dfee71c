/*!
# geEngine render API - Direct3D 11 backend

Direct3D 11 implementation of the geEngine rendering-device abstraction.

This crate provides [`Dx11RenderApi`], which implements
`ge_render_api::ge::render::RenderApi` on top of a native driver seam shaped
after the D3D11 / DXGI / D3DCompiler entry points. On Windows the `d3d11`
module implements that seam on the real runtime through the `windows` crate.
The [`reference`] module holds a software driver implementing the same seam,
so the backend runs and is tested without a GPU.

## Modules

- **translate**: pure conversions between abstract and native enums/descriptors
- **dx11_***: resource wrappers owning their native objects
- **dx11**: device, swap chain, resource creation, binding and submission
- **dx11_pipeline_state**: save/restore snapshot of the bound pipeline
*/

// Native seam, Direct3D 11 driver and software driver
pub mod native;
#[cfg(windows)]
pub mod d3d11;
pub mod reference;

// Format and descriptor translation
pub mod translate;

// Backend implementation modules
mod com_ptr;
mod debug;
mod dx11;
mod dx11_buffer;
mod dx11_input_layout;
mod dx11_msaa_cache;
mod dx11_pipeline_state;
mod dx11_shader;
mod dx11_shader_stage;
mod dx11_state;
mod dx11_texture;

pub use dx11::Dx11RenderApi;
pub use dx11_buffer::{Dx11ConstantBuffer, Dx11IndexBuffer, Dx11StreamOutputBuffer, Dx11VertexBuffer};
pub use dx11_input_layout::Dx11InputLayout;
pub use dx11_msaa_cache::{MsaaSupport, MsaaSupportCache, MAX_MSAA_SAMPLES};
pub use dx11_pipeline_state::Dx11PipelineState;
pub use dx11_shader::{Dx11Shader, ShaderIncludeResolver};
pub use dx11_state::{Dx11BlendState, Dx11DepthStencilState, Dx11RasterizerState, Dx11SamplerState};
pub use dx11_texture::Dx11Texture;

// Re-export debug utilities
pub use debug::{describe, print_live_objects_report, summarize, LiveObjectGroup};
