use super::*;
use std::collections::HashMap;

struct MapIncludes(HashMap<&'static str, &'static str>);

impl IncludeHandler for MapIncludes {
    fn open(&self, _include_type: IncludeType, file_name: &str) -> NativeResult<Vec<u8>> {
        self.0.get(file_name).map(|s| s.as_bytes().to_vec()).ok_or(HResult::E_FAIL)
    }
}

const VS: &str = r#"
struct VSIn {
    float3 position : POSITION;
    float2 uv : TEXCOORD0;
    uint id : SV_VertexID;
};

float4 main(VSIn input) : SV_Position {
    return float4(input.position, 1.0);
}
"#;

fn compile(source: &str, entry: &str, target: &str) -> Result<Vec<u8>, CompileError> {
    ReferenceCompiler.compile(source.as_bytes(), "test.hlsl", &[], None, entry, target, CompileFlag::empty())
}

#[test]
fn test_compile_struct_input_signature() {
    let bytecode = compile(VS, "main", "vs_5_0").unwrap();
    let inputs = ReferenceCompiler.reflect_input_signature(&bytecode).unwrap();

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[0].semantic_name, "POSITION");
    assert_eq!(inputs[0].mask, 0b0111);
    assert_eq!(inputs[0].component_type, RegisterComponentType::Float32);
    assert_eq!(inputs[1].semantic_name, "TEXCOORD");
    assert_eq!(inputs[1].semantic_index, 0);
    assert_eq!(inputs[1].mask, 0b0011);
    assert_eq!(inputs[2].semantic_name, "SV_VertexID");
    assert_eq!(inputs[2].component_type, RegisterComponentType::Uint32);
    assert_eq!(inputs[2].register, 2);
}

#[test]
fn test_compile_parameter_semantics() {
    let source = "float4 ps(float4 pos : SV_Position, float4 color : COLOR1, out float depth : SV_Depth) : SV_Target { return color; }";
    let bytecode = compile(source, "ps", "ps_5_0").unwrap();
    let inputs = ReferenceCompiler.reflect_input_signature(&bytecode).unwrap();

    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[1].semantic_name, "COLOR");
    assert_eq!(inputs[1].semantic_index, 1);
}

#[test]
fn test_matrix_input_spans_rows() {
    let source = "float4 main(float4x4 world : WORLD) : SV_Position { return world[0]; }";
    let bytecode = compile(source, "main", "vs_5_0").unwrap();
    let inputs = ReferenceCompiler.reflect_input_signature(&bytecode).unwrap();

    assert_eq!(inputs.len(), 4);
    assert_eq!(inputs[3].semantic_index, 3);
}

#[test]
fn test_missing_entry_point() {
    let err = compile(VS, "other", "vs_5_0").unwrap_err();
    assert!(err.code.failed());
    assert!(err.diagnostics.contains("X3501"));
}

#[test]
fn test_invalid_target() {
    let err = compile(VS, "main", "xx_9_9").unwrap_err();
    assert!(err.diagnostics.contains("X3523"));
}

#[test]
fn test_unbalanced_braces() {
    let err = compile("float4 main() : SV_Target { return 0;", "main", "ps_5_0").unwrap_err();
    assert!(err.diagnostics.contains("X3000"));
}

#[test]
fn test_braces_in_comments_ignored() {
    let source = "// {\nfloat4 main() : SV_Target { return 0; } /* } */";
    assert!(compile(source, "main", "ps_5_0").is_ok());
}

#[test]
fn test_includes_are_expanded() {
    let includes = MapIncludes(HashMap::from([("common.hlsl", "struct VSIn { float3 p : POSITION; };")]));
    let source = "#include \"common.hlsl\"\nfloat4 main(VSIn v) : SV_Position { return 0; }";

    let bytecode = ReferenceCompiler
        .compile(source.as_bytes(), "t.hlsl", &[], Some(&includes), "main", "vs_5_0", CompileFlag::empty())
        .unwrap();
    let inputs = ReferenceCompiler.reflect_input_signature(&bytecode).unwrap();
    assert_eq!(inputs[0].semantic_name, "POSITION");
}

#[test]
fn test_missing_include_fails() {
    let includes = MapIncludes(HashMap::new());
    let err = ReferenceCompiler
        .compile(b"#include <missing.hlsl>\n", "t.hlsl", &[], Some(&includes), "main", "vs_5_0", CompileFlag::empty())
        .unwrap_err();
    assert!(err.diagnostics.contains("missing.hlsl"));
}

#[test]
fn test_defines_substitute_tokens() {
    let defines = [ShaderDefine { name: "ENTRY".to_string(), definition: "main".to_string() }];
    let source = "float4 ENTRY() : SV_Target { return 0; }";
    let result = ReferenceCompiler.compile(source.as_bytes(), "t.hlsl", &defines, None, "main", "ps_5_0", CompileFlag::empty());
    assert!(result.is_ok());
}

#[test]
fn test_container_records_target() {
    let bytecode = compile(VS, "main", "vs_4_0").unwrap();
    let container = Container::parse(&bytecode).unwrap();
    assert_eq!(container.stage_prefix(), "vs");
}

#[test]
fn test_reflect_rejects_garbage() {
    assert_eq!(ReferenceCompiler.reflect_input_signature(b"DXBC...").unwrap_err(), HResult::E_INVALIDARG);
}
