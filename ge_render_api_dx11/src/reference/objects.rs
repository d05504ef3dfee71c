/// Reference-counted object table of the software driver

use ge_render_api::ge::render::ShaderStage;
use slotmap::{new_key_type, Key, KeyData, SlotMap};

use crate::native::*;
use crate::translate;

new_key_type! {
    /// Slot-map key behind every `RawHandle` the driver hands out
    pub(crate) struct ObjectKey;
}

pub(crate) fn handle_of(key: ObjectKey) -> RawHandle {
    RawHandle(key.data().as_ffi())
}

pub(crate) fn key_of(handle: RawHandle) -> ObjectKey {
    ObjectKey::from(KeyData::from_ffi(handle.0))
}

// ============================================================================
// OBJECT DATA
// ============================================================================

pub(crate) struct TextureObject {
    pub desc: Texture2dDesc,
    /// One byte vector per subresource (`mip + slice * mip_levels`)
    pub subresources: Vec<Vec<u8>>,
    pub mapped: Vec<u32>,
}

pub(crate) struct BufferObject {
    pub desc: BufferDesc,
    pub data: Vec<u8>,
    pub mapped: bool,
}

pub(crate) enum ObjectData {
    Texture(TextureObject),
    Buffer(BufferObject),
    RenderTargetView { resource: RawHandle, desc: RenderTargetViewDesc },
    DepthStencilView { resource: RawHandle, desc: DepthStencilViewDesc },
    ShaderResourceView { resource: RawHandle, desc: ShaderResourceViewDesc },
    UnorderedAccessView { resource: RawHandle, desc: UnorderedAccessViewDesc },
    InputLayout(Vec<InputElementDesc>),
    RasterizerState(RasterizerDesc1),
    DepthStencilState(DepthStencilDesc),
    BlendState(BlendDesc1),
    SamplerState(SamplerDesc),
    Shader { stage: ShaderStage, bytecode: Vec<u8>, stream_output: Vec<SoDeclarationEntry> },
}

impl ObjectData {
    /// Native interface name
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectData::Texture(_) => "ID3D11Texture2D",
            ObjectData::Buffer(_) => "ID3D11Buffer",
            ObjectData::RenderTargetView { .. } => "ID3D11RenderTargetView",
            ObjectData::DepthStencilView { .. } => "ID3D11DepthStencilView",
            ObjectData::ShaderResourceView { .. } => "ID3D11ShaderResourceView",
            ObjectData::UnorderedAccessView { .. } => "ID3D11UnorderedAccessView",
            ObjectData::InputLayout(_) => "ID3D11InputLayout",
            ObjectData::RasterizerState(_) => "ID3D11RasterizerState1",
            ObjectData::DepthStencilState(_) => "ID3D11DepthStencilState",
            ObjectData::BlendState(_) => "ID3D11BlendState1",
            ObjectData::SamplerState(_) => "ID3D11SamplerState",
            ObjectData::Shader { stage, .. } => match stage {
                ShaderStage::Vertex => "ID3D11VertexShader",
                ShaderStage::Pixel => "ID3D11PixelShader",
                ShaderStage::Geometry => "ID3D11GeometryShader",
                ShaderStage::Hull => "ID3D11HullShader",
                ShaderStage::Domain => "ID3D11DomainShader",
                ShaderStage::Compute => "ID3D11ComputeShader",
            },
        }
    }

    /// Resource a view keeps alive
    fn view_resource(&self) -> Option<RawHandle> {
        match self {
            ObjectData::RenderTargetView { resource, .. }
            | ObjectData::DepthStencilView { resource, .. }
            | ObjectData::ShaderResourceView { resource, .. }
            | ObjectData::UnorderedAccessView { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// Bytes held by a resource object
    pub fn memory_size(&self) -> u64 {
        match self {
            ObjectData::Texture(t) => t.subresources.iter().map(|s| s.len() as u64).sum(),
            ObjectData::Buffer(b) => b.data.len() as u64,
            _ => 0,
        }
    }
}

pub(crate) struct Object {
    pub data: ObjectData,
    pub ref_count: u32,
    pub name: String,
}

// ============================================================================
// OBJECT TABLE
// ============================================================================

/// Live objects with native reference-count semantics
#[derive(Default)]
pub(crate) struct ObjectTable {
    objects: SlotMap<ObjectKey, Object>,
    allocated: u64,
}

impl ObjectTable {
    /// Insert an object holding one reference
    pub fn insert(&mut self, data: ObjectData) -> RawHandle {
        self.allocated += data.memory_size();
        handle_of(self.objects.insert(Object { data, ref_count: 1, name: String::new() }))
    }

    pub fn get(&self, handle: RawHandle) -> Option<&Object> {
        self.objects.get(key_of(handle))
    }

    pub fn get_mut(&mut self, handle: RawHandle) -> Option<&mut Object> {
        self.objects.get_mut(key_of(handle))
    }

    pub fn add_ref(&mut self, handle: RawHandle) -> u32 {
        match self.get_mut(handle) {
            Some(object) => {
                object.ref_count += 1;
                object.ref_count
            }
            None => 0,
        }
    }

    pub fn add_ref_opt(&mut self, handle: Option<RawHandle>) {
        if let Some(handle) = handle {
            self.add_ref(handle);
        }
    }

    /// Drop a reference; destroying a view releases the resource it viewed
    pub fn release(&mut self, handle: RawHandle) -> u32 {
        let Some(object) = self.get_mut(handle) else {
            return 0;
        };
        object.ref_count = object.ref_count.saturating_sub(1);
        let remaining = object.ref_count;
        if remaining == 0 {
            if let Some(object) = self.objects.remove(key_of(handle)) {
                self.allocated = self.allocated.saturating_sub(object.data.memory_size());
                if let Some(resource) = object.data.view_resource() {
                    self.release(resource);
                }
            }
        }
        remaining
    }

    pub fn release_opt(&mut self, handle: Option<RawHandle>) {
        if let Some(handle) = handle {
            self.release(handle);
        }
    }

    /// Point a binding slot at a new object, moving the slot's reference
    pub fn rebind(&mut self, slot: &mut Option<RawHandle>, handle: Option<RawHandle>) {
        let handle = handle.filter(|h| self.get(*h).is_some());
        self.add_ref_opt(handle);
        let old = std::mem::replace(slot, handle);
        self.release_opt(old);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    pub fn iter(&self) -> impl Iterator<Item = (RawHandle, &Object)> {
        self.objects.iter().map(|(k, o)| (handle_of(k), o))
    }

    /// Texture behind a view or a texture handle
    pub fn texture_of(&self, handle: RawHandle) -> Option<RawHandle> {
        match &self.get(handle)?.data {
            ObjectData::Texture(_) => Some(handle),
            data => data.view_resource(),
        }
    }

    pub fn texture(&self, handle: RawHandle) -> Option<&TextureObject> {
        match &self.get(handle)?.data {
            ObjectData::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn texture_mut(&mut self, handle: RawHandle) -> Option<&mut TextureObject> {
        match &mut self.get_mut(handle)?.data {
            ObjectData::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn buffer(&self, handle: RawHandle) -> Option<&BufferObject> {
        match &self.get(handle)?.data {
            ObjectData::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn buffer_mut(&mut self, handle: RawHandle) -> Option<&mut BufferObject> {
        match &mut self.get_mut(handle)?.data {
            ObjectData::Buffer(b) => Some(b),
            _ => None,
        }
    }
}

// ============================================================================
// SUBRESOURCE LAYOUT
// ============================================================================

/// Bytes per row and number of rows of one mip level
pub(crate) fn mip_layout(format: DxgiFormat, width: u32, height: u32, mip: u32) -> (u32, u32) {
    let w = (width >> mip).max(1);
    let h = (height >> mip).max(1);
    let bits = translate::bits_per_pixel(format);
    if translate::to_abstract(format).is_block_compressed() {
        let block_bytes = bits * 16 / 8;
        (w.div_ceil(4) * block_bytes, h.div_ceil(4))
    } else {
        ((w * bits).div_ceil(8), h)
    }
}

/// Full mip chain length for a size
pub(crate) fn full_mip_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}
