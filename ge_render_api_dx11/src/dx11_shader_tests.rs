use super::*;
use crate::native::{CompileFlag, CreateDeviceFlag, NativeCompiler, NativeFactory};
use crate::reference::ReferenceFactory;
use ge_render_api::ge::fs::MemoryFileSystem;

fn resolver(fs: MemoryFileSystem) -> ShaderIncludeResolver {
    let dirs = ["Data/Engine/Shaders/".to_string(), "Data/Shaders/".to_string()];
    ShaderIncludeResolver::new(Arc::new(fs), &dirs)
}

#[test]
fn test_search_dirs_are_relative_to_working_directory() {
    let resolver = resolver(MemoryFileSystem::new("/game"));

    assert_eq!(
        resolver.search_dirs(),
        &[PathBuf::from("/game/Data/Engine/Shaders/"), PathBuf::from("/game/Data/Shaders/")]
    );
}

#[test]
fn test_first_directory_wins() {
    let fs = MemoryFileSystem::new("/game")
        .with_file("Data/Engine/Shaders/common.hlsl", "engine")
        .with_file("Data/Shaders/common.hlsl", "game")
        .with_file("Data/Shaders/lighting.hlsl", "lighting");
    let resolver = resolver(fs);

    assert_eq!(
        resolver.find(Path::new("common.hlsl")),
        Some(PathBuf::from("/game/Data/Engine/Shaders/common.hlsl"))
    );
    assert_eq!(
        resolver.find(Path::new("lighting.hlsl")),
        Some(PathBuf::from("/game/Data/Shaders/lighting.hlsl"))
    );
    assert_eq!(resolver.find(Path::new("missing.hlsl")), None);
}

#[test]
fn test_resolve_prefers_direct_path() {
    let fs = MemoryFileSystem::new("/game")
        .with_file("sky.hlsl", "direct")
        .with_file("Data/Shaders/sky.hlsl", "searched")
        .with_file("Data/Shaders/water.hlsl", "searched");
    let resolver = resolver(fs);

    assert_eq!(resolver.resolve(Path::new("sky.hlsl")), Some(PathBuf::from("/game/sky.hlsl")));
    assert_eq!(resolver.resolve(Path::new("water.hlsl")), Some(PathBuf::from("/game/Data/Shaders/water.hlsl")));

    let (path, bytes) = resolver.read_source(Path::new("sky.hlsl")).unwrap();
    assert_eq!(path, PathBuf::from("/game/sky.hlsl"));
    assert_eq!(bytes, b"direct");
}

#[test]
fn test_read_missing_source_fails() {
    let resolver = resolver(MemoryFileSystem::new("/game"));
    assert!(resolver.read_source(Path::new("missing.hlsl")).is_err());
}

#[test]
fn test_include_handler_searches_directories_only() {
    let fs = MemoryFileSystem::new("/game")
        .with_file("common.hlsl", "working directory")
        .with_file("Data/Shaders/common.hlsl", "searched");
    let resolver = resolver(fs);

    assert_eq!(resolver.open(IncludeType::Local, "common.hlsl").unwrap(), b"searched");
    assert_eq!(resolver.open(IncludeType::System, "missing.hlsl"), Err(HResult::E_FAIL));
}

#[test]
fn test_includes_expand_during_compilation() {
    let fs = MemoryFileSystem::new("/game")
        .with_file("Data/Shaders/vertex.hlsl", "struct VSIn { float3 position : POSITION; };");
    let resolver = resolver(fs);
    let factory = ReferenceFactory::default();
    let source = "#include \"vertex.hlsl\"\nfloat4 main(VSIn v) : SV_Position { return 0; }";

    let bytecode = factory
        .compiler()
        .compile(source.as_bytes(), "main.hlsl", &[], Some(&resolver), "main", "vs_5_0", CompileFlag::empty())
        .unwrap();

    let inputs = factory.compiler().reflect_input_signature(&bytecode).unwrap();
    assert_eq!(inputs[0].semantic_name, "POSITION");
}

#[test]
fn test_shader_keeps_bytecode_after_release() {
    let factory = ReferenceFactory::default();
    let (device, _, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    let driver = factory.driver();
    let bytecode = factory
        .compiler()
        .compile(b"float4 main() : SV_Target { return 0; }", "ps.hlsl", &[], None, "main", "ps_5_0", CompileFlag::empty())
        .unwrap();
    let raw = device.create_shader(ShaderStage::Pixel, &bytecode).unwrap();
    let shader = Dx11Shader::new(ComPtr::from_raw(raw, device.clone()), ShaderStage::Pixel, bytecode.clone());

    assert_eq!(shader.stage(), ShaderStage::Pixel);
    assert_eq!(shader.memory_usage(), bytecode.len());
    assert_eq!(shader.kind(), ResourceKind::Shader);
    assert_eq!(driver.live_count("ID3D11PixelShader"), 1);

    shader.release();
    assert!(!shader.is_loaded());
    assert_eq!(shader.raw(), None);
    assert_eq!(shader.bytecode(), bytecode.as_slice());
    assert_eq!(driver.live_count("ID3D11PixelShader"), 0);
}
