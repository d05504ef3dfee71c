/// Abstract rendering-device surface shared by every backend

pub mod buffer;
pub mod format;
pub mod pipeline;
pub mod render_api;
pub mod resource;
pub mod shader;
pub mod state;
pub mod texture;
pub mod vertex;

pub use buffer::{IndexBufferFormat, MsaaSampleDesc};
pub use format::GraphicsFormat;
pub use pipeline::{
    LinearColor, PrimitiveTopology, RenderTarget, ScissorRect, Viewport, MAX_VIEWPORTS,
};
pub use render_api::{GraphicsResource, RenderApi};
pub use resource::{
    BindFlags, ClearFlags, CopyFlags, CpuAccessFlags, GraphicsBox, LogicalResource, MapFlags,
    MappedSubresource, ResourceKind, ResourceUsage,
};
pub use shader::{ShaderDesc, ShaderMacro, ShaderSource, ShaderStage};
pub use state::{
    Blend, BlendDesc, BlendOp, ColorWriteMask, ComparisonFunc, CullMode, DepthStencilDesc,
    DepthStencilOpDesc, DepthWriteMask, FillMode, Filter, FilterReduction, FilterType, LogicOp,
    RasterizerDesc, RenderTargetBlendDesc, SamplerDesc, StencilOp, TextureAddressMode,
    MAX_RENDER_TARGETS,
};
pub use texture::{TextureData, TextureDesc, TextureInfo, TextureLayerData};
pub use vertex::{
    StreamOutputDeclaration, StreamOutputElement, VertexDeclaration, VertexElement,
    VertexElementSemantic, VertexElementType,
};
