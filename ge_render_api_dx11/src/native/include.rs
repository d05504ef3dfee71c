/// `#include` expansion shared by the shader compilers

use super::{CompileError, HResult, IncludeHandler, IncludeType};

const MAX_INCLUDE_DEPTH: usize = 16;

/// Replace every `#include` line with the contents the handler returns
///
/// Nested includes are expanded recursively. A missing handler fails the
/// first include it meets.
pub fn expand_includes(
    text: &str,
    source_name: &str,
    include: Option<&dyn IncludeHandler>,
    depth: usize,
) -> Result<String, CompileError> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(error(format!("{}: error X1504: #include nested too deeply", source_name)));
    }

    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix("#include") else {
            out.push_str(line);
            out.push('\n');
            continue;
        };

        let rest = rest.trim();
        let (include_type, name) = if let Some(name) = rest.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            (IncludeType::Local, name)
        } else if let Some(name) = rest.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
            (IncludeType::System, name)
        } else {
            return Err(error(format!("{}: error X1507: malformed #include", source_name)));
        };

        let contents = include
            .ok_or(HResult::E_FAIL)
            .and_then(|handler| handler.open(include_type, name))
            .map_err(|_| error(format!("{}: error X1507: failed to open source file: '{}'", source_name, name)))?;

        let nested = String::from_utf8_lossy(&contents).into_owned();
        out.push_str(&expand_includes(&nested, name, include, depth + 1)?);
    }
    Ok(out)
}

fn error(diagnostics: String) -> CompileError {
    CompileError { code: HResult::E_FAIL, diagnostics }
}
