//! Minimal HLSL front end of the software driver
//!
//! Does not generate code. It expands `#include` directives, checks the
//! target profile, finds the entry point and extracts its input signature.
//! The "bytecode" is a small text container:
//!
//! ```text
//! RBC0
//! target vs_5_0
//! entry main
//! in POSITION 0 0 3 7
//! ```
//!
//! Input lines are `in <semantic> <index> <register> <component type> <mask>`.

use crate::native::*;

const MAGIC: &str = "RBC0";
const STAGE_PREFIXES: [&str; 6] = ["vs", "ps", "gs", "hs", "ds", "cs"];
const PROFILES: [&str; 4] = ["4_0", "4_1", "5_0", "5_1"];

/// Compiler and reflector used by the reference factory
#[derive(Debug, Default)]
pub struct ReferenceCompiler;

impl NativeCompiler for ReferenceCompiler {
    fn compile(
        &self,
        source: &[u8],
        source_name: &str,
        defines: &[ShaderDefine],
        include: Option<&dyn IncludeHandler>,
        entry_point: &str,
        target: &str,
        _flags: CompileFlag,
    ) -> Result<Vec<u8>, CompileError> {
        if !is_valid_target(target) {
            return Err(error(format!("{}: error X3523: invalid target '{}'", source_name, target)));
        }

        let text = String::from_utf8_lossy(source).into_owned();
        let text = expand_includes(&text, source_name, include, 0)?;
        let text = apply_defines(&text, defines);

        check_braces(&text, source_name)?;

        let Some(params) = find_entry_parameters(&text, entry_point) else {
            return Err(error(format!(
                "{}: error X3501: '{}': entrypoint not found",
                source_name, entry_point
            )));
        };

        let inputs = input_signature(&text, &params);

        let mut bytecode = format!("{}\ntarget {}\nentry {}\n", MAGIC, target, entry_point);
        for input in &inputs {
            bytecode.push_str(&format!(
                "in {} {} {} {} {}\n",
                input.semantic_name,
                input.semantic_index,
                input.register,
                input.component_type as u32,
                input.mask
            ));
        }
        Ok(bytecode.into_bytes())
    }

    fn reflect_input_signature(&self, bytecode: &[u8]) -> NativeResult<Vec<SignatureParameterDesc>> {
        let container = Container::parse(bytecode).ok_or(HResult::E_INVALIDARG)?;
        Ok(container.inputs)
    }
}

fn error(diagnostics: String) -> CompileError {
    CompileError { code: HResult::E_FAIL, diagnostics }
}

fn is_valid_target(target: &str) -> bool {
    match target.split_once('_') {
        Some((stage, profile)) => STAGE_PREFIXES.contains(&stage) && PROFILES.contains(&profile),
        None => false,
    }
}

// ============================================================================
// BYTECODE CONTAINER
// ============================================================================

/// Parsed bytecode
pub(crate) struct Container {
    pub target: String,
    pub inputs: Vec<SignatureParameterDesc>,
}

impl Container {
    pub fn parse(bytecode: &[u8]) -> Option<Container> {
        let text = std::str::from_utf8(bytecode).ok()?;
        let mut lines = text.lines();
        if lines.next()? != MAGIC {
            return None;
        }

        let mut target = None;
        let mut inputs = Vec::new();
        for line in lines {
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("target") => target = parts.next().map(str::to_string),
                Some("in") => {
                    let fields: Vec<&str> = parts.collect();
                    if fields.len() != 5 {
                        return None;
                    }
                    inputs.push(SignatureParameterDesc {
                        semantic_name: fields[0].to_string(),
                        semantic_index: fields[1].parse().ok()?,
                        register: fields[2].parse().ok()?,
                        component_type: match fields[3].parse::<u32>().ok()? {
                            1 => RegisterComponentType::Uint32,
                            2 => RegisterComponentType::Sint32,
                            3 => RegisterComponentType::Float32,
                            _ => RegisterComponentType::Unknown,
                        },
                        mask: fields[4].parse().ok()?,
                    });
                }
                _ => {}
            }
        }
        Some(Container { target: target?, inputs })
    }

    /// Stage prefix of the target profile ("vs", "ps", ...)
    pub fn stage_prefix(&self) -> &str {
        self.target.split('_').next().unwrap_or_default()
    }
}

// ============================================================================
// PREPROCESSING
// ============================================================================

/// Plain token substitution of `#define NAME VALUE` style definitions
fn apply_defines(text: &str, defines: &[ShaderDefine]) -> String {
    if defines.is_empty() {
        return text.to_string();
    }
    tokens_replace(text, |token| {
        defines.iter().find(|d| d.name == token).map(|d| d.definition.clone())
    })
}

fn tokens_replace(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();
    let flush = |token: &mut String, out: &mut String| {
        match lookup(token.as_str()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(token),
        }
        token.clear();
    };
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            token.push(c);
            continue;
        }
        flush(&mut token, &mut out);
        out.push(c);
    }
    flush(&mut token, &mut out);
    out
}

fn check_braces(text: &str, source_name: &str) -> Result<(), CompileError> {
    let mut depth: i64 = 0;
    for c in strip_comments(text).chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(error(format!("{}: error X3000: syntax error: unexpected token '}}'", source_name)));
        }
    }
    if depth != 0 {
        return Err(error(format!("{}: error X3000: syntax error: unexpected end of file", source_name)));
    }
    Ok(())
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |at| &after[at..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |at| &after[at + 2..]);
        } else {
            let c = rest.chars().next().unwrap_or_default();
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

// ============================================================================
// SIGNATURE EXTRACTION
// ============================================================================

/// Parameter list of the entry point's definition
fn find_entry_parameters(text: &str, entry_point: &str) -> Option<String> {
    let text = strip_comments(text);
    let mut search = 0;
    while let Some(found) = text[search..].find(entry_point) {
        let start = search + found;
        let end = start + entry_point.len();
        search = end;

        let before_ok = text[..start].chars().next_back().map_or(true, |c| c.is_whitespace());
        let after = text[end..].trim_start();
        if !before_ok || !after.starts_with('(') {
            continue;
        }

        let open = text.len() - after.len();
        let close = matching_paren(&text, open)?;
        // A definition has a body; a call site does not
        let tail = text[close + 1..].trim_start();
        let has_body = tail.starts_with('{') || tail.starts_with(':') || tail.starts_with('[');
        if has_body {
            return Some(text[open + 1..close].to_string());
        }
    }
    None
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// A `type name : SEMANTIC` declaration
struct Declaration {
    type_name: String,
    semantic: Option<String>,
}

fn parse_declaration(decl: &str) -> Option<Declaration> {
    let (head, semantic) = match decl.split_once(':') {
        Some((head, semantic)) => (head, Some(semantic.trim().to_string())),
        None => (decl, None),
    };
    let words: Vec<&str> = head
        .split_whitespace()
        .filter(|w| !matches!(*w, "in" | "out" | "inout" | "uniform" | "const" | "nointerpolation" | "linear" | "centroid" | "noperspective" | "point" | "line" | "triangle" | "lineadj" | "triangleadj"))
        .collect();
    if words.is_empty() {
        return None;
    }
    let type_name = words[0].split('<').next().unwrap_or(words[0]).to_string();
    Some(Declaration { type_name, semantic })
}

/// `out` parameters are not part of the input signature; `inout` ones are
fn is_output(decl: &str) -> bool {
    decl.split_whitespace().any(|w| w == "out")
}

/// Fields of `struct name { ... };`
fn struct_fields(text: &str, name: &str) -> Option<Vec<String>> {
    let mut search = 0;
    while let Some(found) = text[search..].find("struct") {
        let start = search + found + "struct".len();
        search = start;
        let rest = text[start..].trim_start();
        let Some(rest) = rest.strip_prefix(name) else { continue };
        let rest = rest.trim_start();
        if !rest.starts_with('{') {
            continue;
        }
        let body_end = rest.find('}')?;
        return Some(
            rest[1..body_end]
                .split(';')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    None
}

fn split_semantic(semantic: &str) -> (String, u32) {
    let digits = semantic.len() - semantic.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (name, index) = semantic.split_at(semantic.len() - digits);
    (name.to_string(), index.parse().unwrap_or(0))
}

/// Component type, row count and component count of a scalar, vector or matrix type
fn type_shape(type_name: &str) -> (RegisterComponentType, u32, u32) {
    let (base, dims) = ["float", "half", "double", "uint", "int", "bool", "min16float", "min16int", "min16uint"]
        .iter()
        .filter(|base| type_name.starts_with(*base))
        .max_by_key(|base| base.len())
        .map(|base| (*base, &type_name[base.len()..]))
        .unwrap_or(("float", "4"));

    let component_type = match base {
        "uint" | "min16uint" | "bool" => RegisterComponentType::Uint32,
        "int" | "min16int" => RegisterComponentType::Sint32,
        _ => RegisterComponentType::Float32,
    };

    let (rows, columns) = match dims.split_once('x') {
        Some((r, c)) => (r.parse().unwrap_or(1), c.parse().unwrap_or(1)),
        None => (1, dims.parse().unwrap_or(1)),
    };
    (component_type, rows, columns)
}

fn input_signature(text: &str, params: &str) -> Vec<SignatureParameterDesc> {
    let text = strip_comments(text);
    let mut inputs = Vec::new();

    let push = |decl: &Declaration, inputs: &mut Vec<SignatureParameterDesc>| {
        let Some(semantic) = &decl.semantic else { return };
        let (name, index) = split_semantic(semantic);
        let (component_type, rows, columns) = type_shape(&decl.type_name);
        let mask = ((1u32 << columns.min(4)) - 1) as u8;
        for row in 0..rows {
            let register = inputs.len() as u32;
            inputs.push(SignatureParameterDesc {
                semantic_name: name.clone(),
                semantic_index: index + row,
                register,
                component_type,
                mask,
            });
        }
    };

    for param in split_top_level(params) {
        if is_output(&param) {
            continue;
        }
        let Some(decl) = parse_declaration(&param) else { continue };
        if decl.semantic.is_some() {
            push(&decl, &mut inputs);
        } else if let Some(fields) = struct_fields(&text, &decl.type_name) {
            for field in fields {
                if let Some(field) = parse_declaration(&field) {
                    push(&field, &mut inputs);
                }
            }
        }
    }
    inputs
}

fn split_top_level(params: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0;
    let mut current = String::new();
    for c in params.chars() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth -= 1,
            ',' if depth == 0 => {
                out.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
