/// FXC shader compiler (`D3DCompile` / `D3DReflect`)

use std::ffi::{c_void, CString};

use windows::core::{Interface, PCSTR};
use windows::Win32::Graphics::Direct3D::Fxc::{D3DCompile, D3DReflect};
use windows::Win32::Graphics::Direct3D::{ID3DBlob, ID3DInclude, D3D_SHADER_MACRO};
use windows::Win32::Graphics::Direct3D11::{
    ID3D11ShaderReflection, D3D11_SHADER_DESC, D3D11_SIGNATURE_PARAMETER_DESC,
};

use crate::native::*;

/// Compiler shipped with the Direct3D 11 driver
///
/// `#include` directives are expanded through the handler before the source
/// reaches FXC.
#[derive(Debug, Default)]
pub struct D3D11Compiler;

fn c_string(text: &str) -> CString {
    CString::new(text.split('\0').next().unwrap_or_default()).unwrap_or_default()
}

fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer().cast::<u8>(), blob.GetBufferSize()) }
}

fn component_type(value: i32) -> RegisterComponentType {
    match value {
        1 => RegisterComponentType::Uint32,
        2 => RegisterComponentType::Sint32,
        3 => RegisterComponentType::Float32,
        _ => RegisterComponentType::Unknown,
    }
}

impl NativeCompiler for D3D11Compiler {
    fn compile(
        &self,
        source: &[u8],
        source_name: &str,
        defines: &[ShaderDefine],
        include: Option<&dyn IncludeHandler>,
        entry_point: &str,
        target: &str,
        flags: CompileFlag,
    ) -> Result<Vec<u8>, CompileError> {
        let text = String::from_utf8_lossy(source);
        let text = expand_includes(&text, source_name, include, 0)?;

        let strings: Vec<(CString, CString)> =
            defines.iter().map(|d| (c_string(&d.name), c_string(&d.definition))).collect();
        let mut macros: Vec<D3D_SHADER_MACRO> = strings
            .iter()
            .map(|(name, definition)| D3D_SHADER_MACRO {
                Name: PCSTR(name.as_ptr().cast()),
                Definition: PCSTR(definition.as_ptr().cast()),
            })
            .collect();
        macros.push(D3D_SHADER_MACRO::default());

        let name = c_string(source_name);
        let entry = c_string(entry_point);
        let profile = c_string(target);

        let mut code: Option<ID3DBlob> = None;
        let mut errors: Option<ID3DBlob> = None;
        let result = unsafe {
            D3DCompile(
                text.as_ptr().cast::<c_void>(),
                text.len(),
                PCSTR(name.as_ptr().cast()),
                Some(macros.as_ptr()),
                None::<&ID3DInclude>,
                PCSTR(entry.as_ptr().cast()),
                PCSTR(profile.as_ptr().cast()),
                flags.bits(),
                0,
                &mut code,
                Some(&mut errors),
            )
        };

        let diagnostics = errors
            .as_ref()
            .map(|blob| String::from_utf8_lossy(blob_bytes(blob)).trim_end_matches('\0').to_string())
            .unwrap_or_default();

        match (result, code) {
            (Ok(()), Some(code)) => Ok(blob_bytes(&code).to_vec()),
            (Ok(()), None) => Err(CompileError { code: HResult::E_FAIL, diagnostics }),
            (Err(error), _) => Err(CompileError { code: error.into(), diagnostics }),
        }
    }

    fn reflect_input_signature(&self, bytecode: &[u8]) -> NativeResult<Vec<SignatureParameterDesc>> {
        let mut raw: *mut c_void = std::ptr::null_mut();
        unsafe { D3DReflect(bytecode.as_ptr().cast(), bytecode.len(), &ID3D11ShaderReflection::IID, &mut raw)? };
        if raw.is_null() {
            return Err(HResult::E_FAIL);
        }
        let reflection = unsafe { ID3D11ShaderReflection::from_raw(raw) };

        let mut desc = D3D11_SHADER_DESC::default();
        unsafe { reflection.GetDesc(&mut desc)? };

        (0..desc.InputParameters)
            .map(|index| {
                let mut param = D3D11_SIGNATURE_PARAMETER_DESC::default();
                unsafe { reflection.GetInputParameterDesc(index, &mut param)? };
                let semantic_name = unsafe { param.SemanticName.to_string() }.map_err(|_| HResult::E_FAIL)?;
                Ok(SignatureParameterDesc {
                    semantic_name,
                    semantic_index: param.SemanticIndex,
                    register: param.Register,
                    component_type: component_type(param.ComponentType.0 as i32),
                    mask: param.Mask,
                })
            })
            .collect()
    }
}
