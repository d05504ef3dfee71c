/// Input layout - native layout handle plus the declaration it was built from

use std::sync::{Arc, RwLock};

use ge_render_api::ge::render::{LogicalResource, ResourceKind, VertexDeclaration};

use crate::com_ptr::{ComPtr, ResourceCell};
use crate::native::RawHandle;

/// D3D11 input layout
///
/// Keeps its declaration alive: the native handle cannot report strides or
/// slots on its own.
pub struct Dx11InputLayout {
    layout: ResourceCell<ComPtr>,
    declaration: Arc<VertexDeclaration>,
    name: RwLock<String>,
}

impl Dx11InputLayout {
    pub(crate) fn new(layout: ComPtr, declaration: Arc<VertexDeclaration>) -> Self {
        Self {
            layout: ResourceCell::new(layout),
            declaration,
            name: RwLock::new(String::new()),
        }
    }

    /// Declaration describing the layout's elements
    pub fn declaration(&self) -> &Arc<VertexDeclaration> {
        &self.declaration
    }

    pub(crate) fn raw(&self) -> Option<RawHandle> {
        self.layout.with(ComPtr::raw)
    }
}

impl LogicalResource for Dx11InputLayout {
    fn kind(&self) -> ResourceKind {
        ResourceKind::InputLayout
    }

    fn name(&self) -> String {
        self.name.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_debug_name(&self, name: &str) {
        *self.name.write().unwrap_or_else(|e| e.into_inner()) = name.to_string();
        self.layout.with(|l| l.set_debug_name(name));
    }

    fn memory_usage(&self) -> usize {
        0
    }

    fn release(&self) {
        drop(self.layout.take());
    }

    fn is_loaded(&self) -> bool {
        self.layout.is_set()
    }
}
