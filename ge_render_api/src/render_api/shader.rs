/// Shader stages and compilation descriptors

use std::path::PathBuf;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Geometry,
    Hull,
    Domain,
    Compute,
}

impl ShaderStage {
    /// Every stage, in table order
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::Pixel,
        ShaderStage::Geometry,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Compute,
    ];

    /// Position of the stage in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shader-model target prefix ("vs", "ps", ...)
    pub fn target_prefix(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Geometry => "gs",
            ShaderStage::Hull => "hs",
            ShaderStage::Domain => "ds",
            ShaderStage::Compute => "cs",
        }
    }

    /// Full compile target for a shader model, e.g. `"ps_5_0"` for `"5_0"`
    pub fn target(self, shader_model: &str) -> String {
        format!("{}_{}", self.target_prefix(), shader_model)
    }
}

/// Preprocessor definition passed to the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderMacro {
    pub name: String,
    pub definition: String,
}

impl ShaderMacro {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self { name: name.into(), definition: definition.into() }
    }
}

/// Where shader source text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Read through the engine file system
    File(PathBuf),
    /// In-memory text; `name` appears in compiler diagnostics
    Code { name: String, text: String },
}

/// Everything needed to compile one shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    pub source: ShaderSource,
    pub entry_point: String,
    /// Shader model without stage prefix ("5_0")
    pub shader_model: String,
    pub macros: Vec<ShaderMacro>,
}

impl ShaderDesc {
    /// Shader model 5.0 description of in-memory source
    pub fn from_code(name: &str, text: &str, entry_point: &str) -> Self {
        Self {
            source: ShaderSource::Code { name: name.to_string(), text: text.to_string() },
            entry_point: entry_point.to_string(),
            shader_model: "5_0".to_string(),
            macros: Vec::new(),
        }
    }

    /// Shader model 5.0 description of a source file
    pub fn from_file(path: impl Into<PathBuf>, entry_point: &str) -> Self {
        Self {
            source: ShaderSource::File(path.into()),
            entry_point: entry_point.to_string(),
            shader_model: "5_0".to_string(),
            macros: Vec::new(),
        }
    }

    /// Add a preprocessor definition
    pub fn with_macro(mut self, name: &str, definition: &str) -> Self {
        self.macros.push(ShaderMacro::new(name, definition));
        self
    }
}
