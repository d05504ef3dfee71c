/// Shader - compiled program of one stage, and `#include` resolution

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use ge_render_api::ge::fs::FileSystem;
use ge_render_api::ge::render::{LogicalResource, ResourceKind, ShaderStage};
use ge_render_api::ge::Result;

use crate::com_ptr::{ComPtr, ResourceCell};
use crate::native::{HResult, IncludeHandler, IncludeType, NativeResult, RawHandle};

// ============================================================================
// SHADER
// ============================================================================

/// D3D11 shader object with the bytecode it was created from
///
/// The bytecode outlives a `release()`: input layouts are validated against
/// it.
pub struct Dx11Shader {
    shader: ResourceCell<ComPtr>,
    stage: ShaderStage,
    bytecode: Vec<u8>,
    name: RwLock<String>,
}

impl Dx11Shader {
    pub(crate) fn new(shader: ComPtr, stage: ShaderStage, bytecode: Vec<u8>) -> Self {
        Self {
            shader: ResourceCell::new(shader),
            stage,
            bytecode,
            name: RwLock::new(String::new()),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compiled bytecode
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    pub(crate) fn raw(&self) -> Option<RawHandle> {
        self.shader.with(ComPtr::raw)
    }
}

impl LogicalResource for Dx11Shader {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Shader
    }

    fn name(&self) -> String {
        self.name.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_debug_name(&self, name: &str) {
        *self.name.write().unwrap_or_else(|e| e.into_inner()) = name.to_string();
        self.shader.with(|s| s.set_debug_name(name));
    }

    fn memory_usage(&self) -> usize {
        self.bytecode.len()
    }

    fn release(&self) {
        drop(self.shader.take());
    }

    fn is_loaded(&self) -> bool {
        self.shader.is_set()
    }
}

// ============================================================================
// INCLUDE RESOLUTION
// ============================================================================

/// Finds shader sources in an ordered list of search directories
///
/// Relative directories are resolved against the file system's working
/// directory. The first directory containing the file wins.
pub struct ShaderIncludeResolver {
    file_system: Arc<dyn FileSystem>,
    search_dirs: Vec<PathBuf>,
}

impl ShaderIncludeResolver {
    pub fn new(file_system: Arc<dyn FileSystem>, search_dirs: &[String]) -> Self {
        let working_dir = file_system.working_directory();
        let search_dirs = search_dirs.iter().map(|dir| working_dir.join(dir)).collect();
        Self { file_system, search_dirs }
    }

    /// Directories searched, in order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First search directory containing `file_name`
    pub fn find(&self, file_name: &Path) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| self.file_system.exists(candidate))
    }

    /// Locate a source file: the path itself, then the search directories
    pub fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let direct = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.file_system.working_directory().join(path)
        };
        if self.file_system.exists(&direct) {
            return Some(direct);
        }
        self.find(path)
    }

    /// Read a shader source file
    pub fn read_source(&self, path: &Path) -> Result<(PathBuf, Vec<u8>)> {
        let resolved = self.resolve(path).unwrap_or_else(|| path.to_path_buf());
        let bytes = self.file_system.read(&resolved)?;
        Ok((resolved, bytes))
    }
}

impl IncludeHandler for ShaderIncludeResolver {
    fn open(&self, _include_type: IncludeType, file_name: &str) -> NativeResult<Vec<u8>> {
        let Some(path) = self.find(Path::new(file_name)) else {
            return Err(HResult::E_FAIL);
        };
        ge_render_api::engine_debug!("ge::dx11", "Shader include '{}' -> {}", file_name, path.display());
        self.file_system.read(&path).map_err(|_| HResult::E_FAIL)
    }
}

#[cfg(test)]
#[path = "dx11_shader_tests.rs"]
mod tests;
