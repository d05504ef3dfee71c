/// Vertex and stream-output declarations

// ===== VERTEX ELEMENT TYPE =====

/// Data type of one vertex element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementType {
    Float1,
    Float2,
    Float3,
    Float4,
    /// Packed 8-bit normalized color (RGBA order)
    Color,
    ColorAbgr,
    ColorArgb,
    Short1,
    Short2,
    Short4,
    UShort1,
    UShort2,
    UShort4,
    Int1,
    Int2,
    Int3,
    Int4,
    UInt1,
    UInt2,
    UInt3,
    UInt4,
    UByte4,
    UByte4Norm,
    Unknown,
}

impl VertexElementType {
    /// Size of the element in bytes
    pub fn size(self) -> u32 {
        match self {
            VertexElementType::Float1 | VertexElementType::Int1 | VertexElementType::UInt1 => 4,
            VertexElementType::Float2 | VertexElementType::Int2 | VertexElementType::UInt2 => 8,
            VertexElementType::Float3 | VertexElementType::Int3 | VertexElementType::UInt3 => 12,
            VertexElementType::Float4 | VertexElementType::Int4 | VertexElementType::UInt4 => 16,
            VertexElementType::Color
            | VertexElementType::ColorAbgr
            | VertexElementType::ColorArgb
            | VertexElementType::UByte4
            | VertexElementType::UByte4Norm => 4,
            VertexElementType::Short1 | VertexElementType::UShort1 => 2,
            VertexElementType::Short2 | VertexElementType::UShort2 => 4,
            VertexElementType::Short4 | VertexElementType::UShort4 => 8,
            VertexElementType::Unknown => 0,
        }
    }

    /// Number of components
    pub fn component_count(self) -> u32 {
        match self {
            VertexElementType::Float1
            | VertexElementType::Int1
            | VertexElementType::UInt1
            | VertexElementType::Short1
            | VertexElementType::UShort1 => 1,
            VertexElementType::Float2
            | VertexElementType::Int2
            | VertexElementType::UInt2
            | VertexElementType::Short2
            | VertexElementType::UShort2 => 2,
            VertexElementType::Float3 | VertexElementType::Int3 | VertexElementType::UInt3 => 3,
            VertexElementType::Unknown => 0,
            _ => 4,
        }
    }
}

// ===== VERTEX ELEMENT SEMANTIC =====

/// Meaning of a vertex element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementSemantic {
    Position,
    BlendWeight,
    BlendIndices,
    Normal,
    PointSize,
    TexCoord,
    Tangent,
    Bitangent,
    /// Pre-transformed position
    PositionT,
    Color,
    /// Application-defined data, named "CUSTOM" in shaders
    Custom,
}

// ===== VERTEX ELEMENT =====

/// One element of a vertex declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexElement {
    /// Input slot the element is read from
    pub stream_index: u32,
    /// Byte offset inside the vertex
    pub offset: u32,
    pub element_type: VertexElementType,
    pub semantic: VertexElementSemantic,
    pub semantic_index: u32,
    /// 0 for per-vertex data, otherwise instances per element step
    pub instance_step_rate: u32,
}

impl VertexElement {
    /// Per-vertex element on stream 0
    pub fn new(
        offset: u32,
        element_type: VertexElementType,
        semantic: VertexElementSemantic,
        semantic_index: u32,
    ) -> Self {
        Self {
            stream_index: 0,
            offset,
            element_type,
            semantic,
            semantic_index,
            instance_step_rate: 0,
        }
    }

    /// Size of the element in bytes
    pub fn size(&self) -> u32 {
        self.element_type.size()
    }
}

// ===== VERTEX DECLARATION =====

/// Ordered list of vertex elements describing one vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexDeclaration {
    elements: Vec<VertexElement>,
}

impl VertexDeclaration {
    /// Build a declaration; `None` when `elements` is empty
    pub fn new(elements: &[VertexElement]) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }
        Some(Self { elements: elements.to_vec() })
    }

    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// Bytes per vertex on a stream: the furthest element end
    pub fn vertex_size(&self, stream_index: u32) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.stream_index == stream_index)
            .map(|e| e.offset + e.size())
            .max()
            .unwrap_or(0)
    }

    /// First element with the given semantic and index
    pub fn find(&self, semantic: VertexElementSemantic, semantic_index: u32) -> Option<&VertexElement> {
        self.elements
            .iter()
            .find(|e| e.semantic == semantic && e.semantic_index == semantic_index)
    }
}

// ===== STREAM OUTPUT =====

/// One element written by a stream-output stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOutputElement {
    /// Output stream (0-3)
    pub stream: u32,
    pub semantic: VertexElementSemantic,
    pub semantic_index: u32,
    /// First component written (0-3)
    pub start_component: u8,
    /// Number of components written (1-4)
    pub component_count: u8,
    /// Buffer slot (0-3)
    pub output_slot: u8,
}

/// Ordered list of stream-output elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutputDeclaration {
    elements: Vec<StreamOutputElement>,
}

impl StreamOutputDeclaration {
    /// Build a declaration; `None` when `elements` is empty
    pub fn new(elements: &[StreamOutputElement]) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }
        Some(Self { elements: elements.to_vec() })
    }

    pub fn elements(&self) -> &[StreamOutputElement] {
        &self.elements
    }

    /// Total components written to one output slot
    pub fn component_count_for_output_slot(&self, slot: u8) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.output_slot == slot)
            .map(|e| u32::from(e.component_count))
            .sum()
    }
}

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
