//! Unit tests for vertex and stream-output declarations

use crate::render_api::{
    StreamOutputDeclaration, StreamOutputElement, VertexDeclaration, VertexElement,
    VertexElementSemantic, VertexElementType,
};

fn position_normal_uv() -> Vec<VertexElement> {
    vec![
        VertexElement::new(0, VertexElementType::Float3, VertexElementSemantic::Position, 0),
        VertexElement::new(12, VertexElementType::Float3, VertexElementSemantic::Normal, 0),
        VertexElement::new(24, VertexElementType::Float2, VertexElementSemantic::TexCoord, 0),
    ]
}

// ============================================================================
// ELEMENT TYPES
// ============================================================================

#[test]
fn test_element_type_sizes() {
    assert_eq!(VertexElementType::Float1.size(), 4);
    assert_eq!(VertexElementType::Float3.size(), 12);
    assert_eq!(VertexElementType::UInt4.size(), 16);
    assert_eq!(VertexElementType::Color.size(), 4);
    assert_eq!(VertexElementType::Short2.size(), 4);
    assert_eq!(VertexElementType::UShort4.size(), 8);
    assert_eq!(VertexElementType::Unknown.size(), 0);
}

#[test]
fn test_element_type_component_counts() {
    assert_eq!(VertexElementType::Float1.component_count(), 1);
    assert_eq!(VertexElementType::Short2.component_count(), 2);
    assert_eq!(VertexElementType::Int3.component_count(), 3);
    assert_eq!(VertexElementType::UByte4Norm.component_count(), 4);
}

// ============================================================================
// VERTEX DECLARATION
// ============================================================================

#[test]
fn test_empty_declaration_is_none() {
    assert!(VertexDeclaration::new(&[]).is_none());
}

#[test]
fn test_vertex_size_is_furthest_element_end() {
    let decl = VertexDeclaration::new(&position_normal_uv()).unwrap();
    assert_eq!(decl.vertex_size(0), 32);
    assert_eq!(decl.vertex_size(1), 0);
}

#[test]
fn test_vertex_size_per_stream() {
    let mut elements = position_normal_uv();
    let mut instance = VertexElement::new(0, VertexElementType::Float4, VertexElementSemantic::TexCoord, 1);
    instance.stream_index = 1;
    instance.instance_step_rate = 1;
    elements.push(instance);

    let decl = VertexDeclaration::new(&elements).unwrap();
    assert_eq!(decl.vertex_size(0), 32);
    assert_eq!(decl.vertex_size(1), 16);
}

#[test]
fn test_find_element() {
    let decl = VertexDeclaration::new(&position_normal_uv()).unwrap();
    assert_eq!(decl.find(VertexElementSemantic::Normal, 0).map(|e| e.offset), Some(12));
    assert!(decl.find(VertexElementSemantic::Normal, 1).is_none());
}

// ============================================================================
// STREAM OUTPUT
// ============================================================================

#[test]
fn test_stream_output_component_count_per_slot() {
    let element = |semantic, count, slot| StreamOutputElement {
        stream: 0,
        semantic,
        semantic_index: 0,
        start_component: 0,
        component_count: count,
        output_slot: slot,
    };
    let decl = StreamOutputDeclaration::new(&[
        element(VertexElementSemantic::Position, 4, 0),
        element(VertexElementSemantic::TexCoord, 2, 0),
        element(VertexElementSemantic::Color, 4, 1),
    ])
    .unwrap();

    assert_eq!(decl.component_count_for_output_slot(0), 6);
    assert_eq!(decl.component_count_for_output_slot(1), 4);
    assert_eq!(decl.component_count_for_output_slot(2), 0);
}

#[test]
fn test_empty_stream_output_declaration_is_none() {
    assert!(StreamOutputDeclaration::new(&[]).is_none());
}
