// Copyright 2015 Brendan Zabarauskas and the gl-rs developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parameter classification.
//!
//! Every parameter is first resolved into a `ParamInfo` carrying its base
//! implementation shape. An overload then pairs each `ParamInfo` with the
//! `ParamKind` variant chosen for it, and the variant decides how the
//! parameter shows up in the public signature and at the call site.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Context;
use crate::flags::{CommandFlags, ParamModifier};
use crate::registry::{Command, Length, NativeType, BOOLEAN_GROUP};
use crate::typemap::{TypeMap, C_VOID};

static OFFSET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)offset").unwrap());

/// Shape of a parameter in the plain overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImplType {
    /// Passed by value.
    Value(String),
    /// `void *`.
    Opaque { mutable: bool },
    /// Pointer to a caller-supplied array of `elem`.
    Slice { elem: String, mutable: bool },
    /// `const GLchar *` holding a nul-terminated string.
    Str,
    /// Pointer to exactly one `elem`.
    Scalar { elem: String, mutable: bool },
    /// Anything deeper, passed through as the raw pointer type.
    Raw(String),
}

/// A parameter resolved against the generator tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    /// Position in the owning command's parameter list.
    pub index: usize,
    /// Registry name, the one `len` annotations refer to.
    pub name: String,
    /// Name used in generated code.
    pub ident: String,
    pub native: NativeType,
    pub delegate_ty: String,
    pub group: Option<String>,
    pub length: Length,
    pub modifier: Option<ParamModifier>,
    pub base: ImplType,
}

/// The native type of a parameter once overrides are applied.
pub(crate) fn effective_type(cmd: &Command, index: usize, ctx: &Context) -> NativeType {
    let param = &cmd.params[index];
    ctx.flags
        .parameter(&cmd.name, &param.name, index)
        .and_then(|o| o.retype.as_deref())
        .map_or_else(|| param.ty.clone(), NativeType::parse)
}

impl ParamInfo {
    pub(crate) fn resolve(cmd: &Command, index: usize, read_back: bool, ctx: &Context) -> ParamInfo {
        let param = &cmd.params[index];
        let over = ctx.flags.parameter(&cmd.name, &param.name, index);
        let ident = ctx
            .types
            .ident(over.and_then(|o| o.rename.as_deref()).unwrap_or(&param.name));
        let native = effective_type(cmd, index, ctx);
        let length = param.length();
        let modifier = over.and_then(|o| o.modifier);
        let delegate_ty = ctx.types.delegate_type(&native);
        let base = base_type(&native, &length, modifier, read_back, &delegate_ty, ctx.types);

        trace!("`{}` parameter `{}`: {:?}", cmd.name, param.name, base);

        ParamInfo {
            index,
            name: param.name.clone(),
            ident,
            native,
            delegate_ty,
            group: param.group.clone(),
            length,
            modifier,
            base,
        }
    }
}

fn base_type(
    native: &NativeType,
    length: &Length,
    modifier: Option<ParamModifier>,
    read_back: bool,
    delegate_ty: &str,
    types: &TypeMap,
) -> ImplType {
    match native.pointers {
        0 => ImplType::Value(types.map_type(&native.base).to_string()),
        1 if native.is_opaque_pointer() => ImplType::Opaque {
            mutable: !native.is_const,
        },
        1 => {
            let elem = types.map_type(&native.base).to_string();
            match modifier {
                Some(ParamModifier::Out) => ImplType::Scalar {
                    elem,
                    mutable: true,
                },
                Some(ParamModifier::Ref) => ImplType::Scalar {
                    elem,
                    mutable: false,
                },
                None if read_back && !native.is_const && *length == Length::Constant(1) => {
                    ImplType::Scalar {
                        elem,
                        mutable: true,
                    }
                },
                None if native.is_const
                    && (native.base == "GLchar" || native.base == "GLcharARB")
                    && length.param_name().is_none() =>
                {
                    ImplType::Str
                },
                None => ImplType::Slice {
                    elem,
                    mutable: !native.is_const,
                },
            }
        },
        _ => ImplType::Raw(delegate_ty.to_string()),
    }
}

/// Can be replaced by its enumeration group's strong type.
pub(crate) fn is_strong_compatible(info: &ParamInfo, ctx: &Context) -> bool {
    let group = match info.group.as_deref() {
        Some(group) if group != BOOLEAN_GROUP => group,
        _ => return false,
    };
    match info.base {
        ImplType::Value(_) => {},
        _ => return false,
    }
    ctx.types.is_safe(&info.native) && ctx.registry.get_group(group).is_some()
}

/// Can be passed as a borrowed, pinned object instead of a raw pointer.
pub(crate) fn is_pinned_compatible(info: &ParamInfo, read_back: bool) -> bool {
    match info.base {
        ImplType::Opaque { .. } => {
            !OFFSET_NAME.is_match(&info.name) && (info.native.is_const || read_back)
        },
        _ => false,
    }
}

/// Can be narrowed from an array to a single-element reference.
pub(crate) fn is_out_compatible(info: &ParamInfo, flags: CommandFlags) -> bool {
    info.modifier != Some(ParamModifier::Out)
        && matches!(info.base, ImplType::Slice { .. })
        && info.length != Length::Constant(1)
        && flags.contains(CommandFlags::OUT_PARAM)
}

/// When `info` only carries the element count of a sibling array, returns
/// that array's index and the number of elements per counted item.
///
/// A count shared by several parameters stays explicit, since one slice
/// length cannot vouch for the others.
pub(crate) fn array_length_target(info: &ParamInfo, params: &[ParamInfo]) -> Option<(usize, usize)> {
    if !matches!(info.base, ImplType::Value(_)) {
        return None;
    }
    let mut counted = params.iter().filter_map(|array| match &array.length {
        Length::Param(name) if *name == info.name => Some((array, 1)),
        Length::Multiple(name, k) if *name == info.name => Some((array, *k)),
        _ => None,
    });
    match (counted.next(), counted.next()) {
        (Some((array, multiple)), None) if multiple > 0 && matches!(array.base, ImplType::Slice { .. }) => {
            Some((array.index, multiple))
        },
        _ => None,
    }
}

/// The variant a parameter takes in one overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Base shape, unchanged.
    Plain,
    /// Enumeration group newtype, cast back to the raw type at the call site.
    Strong { group: String },
    /// Borrowed object pinned for the duration of the call.
    Pinned,
    /// Single-element reference in place of an array.
    Out,
    /// Implicit element count computed from the sibling array at `array`.
    ArrayLength { array: usize, multiple: usize },
    /// Implicit element count fixed to one.
    ConvenienceCount,
    /// Implicit single-element array, returned to the caller.
    ConvenienceResult,
}

/// How a visible parameter is passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    None,
    Ref,
    Out,
    Pinned,
}

/// Call-site code for one parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marshal {
    /// The argument expression, usable as is.
    Direct(String),
    /// A local computed before anything else.
    Local { init: String, arg: String },
    /// A binding opening its own scope around the call.
    Fixed { bind: String, arg: String },
    /// A pin guard acquired in the pin block around the call.
    Pinned { bind: String, arg: String },
}

/// One parameter of a synthesized overload: a copy of the resolved
/// parameter plus the variant chosen for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverloadParam {
    pub info: ParamInfo,
    pub kind: ParamKind,
}

impl OverloadParam {
    /// Index of the original parameter this one was derived from.
    pub fn index(&self) -> usize {
        self.info.index
    }

    pub fn is_implicit(&self) -> bool {
        match self.kind {
            ParamKind::ArrayLength { .. } | ParamKind::ConvenienceCount | ParamKind::ConvenienceResult => true,
            _ => false,
        }
    }

    /// Type parameter introduced by a pinned parameter.
    pub fn generic(&self) -> Option<String> {
        match self.kind {
            ParamKind::Pinned => Some(format!("T{}", self.info.index)),
            _ => None,
        }
    }

    /// Public type, or `None` for implicit parameters.
    pub fn signature_type(&self) -> Option<String> {
        match &self.kind {
            ParamKind::Plain => Some(base_signature(&self.info.base)),
            ParamKind::Strong { group } => Some(format!("groups::{}", group)),
            ParamKind::Pinned => match self.info.base {
                ImplType::Opaque { mutable: true } => Some(format!("&mut T{}", self.info.index)),
                _ => Some(format!("&T{}", self.info.index)),
            },
            ParamKind::Out => match &self.info.base {
                ImplType::Slice { elem, mutable } => Some(reference(elem, *mutable)),
                base => Some(base_signature(base)),
            },
            ParamKind::ArrayLength { .. } | ParamKind::ConvenienceCount | ParamKind::ConvenienceResult => None,
        }
    }

    pub fn modifier(&self) -> Modifier {
        match (&self.kind, &self.info.base) {
            (ParamKind::Pinned, _) => Modifier::Pinned,
            (ParamKind::Out, ImplType::Slice { mutable, .. })
            | (ParamKind::Plain, ImplType::Scalar { mutable, .. }) => {
                if *mutable {
                    Modifier::Out
                } else {
                    Modifier::Ref
                }
            },
            _ => Modifier::None,
        }
    }

    /// Call-site code. `params` is the full parameter list of the overload,
    /// needed to find the array an implicit length is computed from.
    pub fn marshal(&self, params: &[OverloadParam]) -> Marshal {
        let ident = &self.info.ident;
        let raw = &self.info.delegate_ty;
        match &self.kind {
            ParamKind::Plain => match &self.info.base {
                ImplType::Value(_) | ImplType::Opaque { .. } | ImplType::Raw(_) => {
                    Marshal::Direct(ident.clone())
                },
                ImplType::Slice { mutable, .. } => Marshal::Fixed {
                    bind: format!(
                        "let {ident}_ptr = {ident}.{method}();",
                        ident = ident,
                        method = if *mutable { "as_mut_ptr" } else { "as_ptr" },
                    ),
                    arg: format!("{}_ptr", ident),
                },
                ImplType::Str => Marshal::Fixed {
                    bind: format!(
                        "let {ident}_c = __gl_imports::CString::new({ident}).expect(\"`{ident}` contains an interior nul byte\");",
                        ident = ident,
                    ),
                    arg: format!("{}_c.as_ptr()", ident),
                },
                ImplType::Scalar { elem, mutable } => {
                    Marshal::Direct(reference_to_pointer(ident, elem, *mutable, raw))
                },
            },
            ParamKind::Strong { .. } => Marshal::Direct(format!("{}.0 as {}", ident, raw)),
            ParamKind::Pinned => {
                let mutable = match self.info.base {
                    ImplType::Opaque { mutable } => mutable,
                    _ => false,
                };
                Marshal::Pinned {
                    bind: format!(
                        "let {ident}_pin = PinnedRef::{ctor}({ident});",
                        ident = ident,
                        ctor = if mutable { "of_mut" } else { "of" },
                    ),
                    arg: format!("{}_pin.addr() as {}", ident, raw),
                }
            },
            ParamKind::Out => match &self.info.base {
                ImplType::Slice { elem, mutable } => {
                    Marshal::Direct(reference_to_pointer(ident, elem, *mutable, raw))
                },
                _ => Marshal::Direct(ident.clone()),
            },
            ParamKind::ArrayLength { array, multiple } => {
                let array = params
                    .iter()
                    .find(|p| p.info.index == *array)
                    .map_or("", |p| &p.info.ident[..]);
                let len = if *multiple == 1 {
                    format!("{}.len()", array)
                } else {
                    format!("({}.len() / {})", array, multiple)
                };
                Marshal::Local {
                    init: format!("let {} = {} as {};", ident, len, raw),
                    arg: ident.clone(),
                }
            },
            ParamKind::ConvenienceCount => Marshal::Local {
                init: format!("let {}: {} = 1;", ident, raw),
                arg: ident.clone(),
            },
            ParamKind::ConvenienceResult => {
                let elem = result_type(&self.info.base);
                Marshal::Local {
                    init: format!("let mut {}: {} = __gl_imports::mem::zeroed();", ident, elem),
                    arg: reference_to_pointer(&format!("&mut {}", ident), &elem, true, raw),
                }
            },
        }
    }
}

/// Element type produced by a convenience result parameter.
pub(crate) fn result_type(base: &ImplType) -> String {
    match base {
        ImplType::Slice { elem, .. } | ImplType::Scalar { elem, .. } => elem.clone(),
        other => base_signature(other),
    }
}

fn base_signature(base: &ImplType) -> String {
    match base {
        ImplType::Value(ty) | ImplType::Raw(ty) => ty.clone(),
        ImplType::Opaque { mutable: true } => format!("*mut {}", C_VOID),
        ImplType::Opaque { mutable: false } => format!("*const {}", C_VOID),
        ImplType::Slice { elem, mutable: true } => format!("&mut [{}]", elem),
        ImplType::Slice { elem, mutable: false } => format!("&[{}]", elem),
        ImplType::Str => "&str".to_string(),
        ImplType::Scalar { elem, mutable } => reference(elem, *mutable),
    }
}

fn reference(elem: &str, mutable: bool) -> String {
    if mutable {
        format!("&mut {}", elem)
    } else {
        format!("&{}", elem)
    }
}

fn reference_to_pointer(expr: &str, elem: &str, mutable: bool, raw: &str) -> String {
    format!(
        "{} as *{} {} as {}",
        expr,
        if mutable { "mut" } else { "const" },
        elem,
        raw
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{CommandFlagsDatabase, CommandOverride, ParameterOverride};
    use crate::registry::{Api, CommandParameter, EnumGroup, Registry, ReturnType};

    fn registry() -> Registry {
        let mut registry = Registry::new(Api::Gl);
        registry
            .push_group(EnumGroup::new("BlendEquationMode", &["GL_FUNC_ADD"]))
            .push_group(EnumGroup::new("Boolean", &["GL_TRUE", "GL_FALSE"]));
        registry.link();
        registry
    }

    fn resolve_all(cmd: &Command, ctx: &Context) -> Vec<ParamInfo> {
        let read_back = crate::registry::is_read_back(cmd.impl_name(ctx.registry.api));
        (0..cmd.params.len())
            .map(|i| ParamInfo::resolve(cmd, i, read_back, ctx))
            .collect()
    }

    #[test]
    fn base_shapes() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glGetShaderInfoLog", ReturnType::void())
            .param(CommandParameter::new("shader", "GLuint"))
            .param(CommandParameter::new("bufSize", "GLsizei"))
            .param(CommandParameter::new("length", "GLsizei *").with_len("1"))
            .param(CommandParameter::new("infoLog", "GLchar *").with_len("bufSize"))
            .param(CommandParameter::new("pointer", "const void *"))
            .param(CommandParameter::new("label", "const GLchar *").with_len("COMPSIZE(label)"))
            .param(CommandParameter::new("strings", "const GLchar *const*"));
        let infos = resolve_all(&cmd, &ctx);
        let bases: Vec<_> = infos.iter().map(|i| i.base.clone()).collect();
        assert_eq!(bases, [
            ImplType::Value("u32".into()),
            ImplType::Value("i32".into()),
            ImplType::Scalar { elem: "i32".into(), mutable: true },
            ImplType::Slice { elem: "__gl_imports::raw::c_char".into(), mutable: true },
            ImplType::Opaque { mutable: false },
            ImplType::Str,
            ImplType::Raw("*const *const __gl_imports::raw::c_char".into()),
        ]);
    }

    #[test]
    fn single_element_outside_read_back_stays_an_array() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glFooData", ReturnType::void())
            .param(CommandParameter::new("value", "GLint *").with_len("1"));
        let infos = resolve_all(&cmd, &ctx);
        assert_eq!(infos[0].base, ImplType::Slice { elem: "i32".into(), mutable: true });
    }

    #[test]
    fn overrides_apply_before_classification() {
        let registry = registry();
        let types = TypeMap::gl();
        let mut flags = CommandFlagsDatabase::new();
        flags.push(
            CommandOverride::new("glFoo")
                .unwrap()
                .param(ParameterOverride::named("type").retyped("GLenum"))
                .param(ParameterOverride::at(1).renamed("data").modifier(ParamModifier::Out)),
        );
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glFoo", ReturnType::void())
            .param(CommandParameter::new("type", "GLint"))
            .param(CommandParameter::new("params", "GLint *").with_len("COMPSIZE(type)"));
        let infos = resolve_all(&cmd, &ctx);
        assert_eq!(infos[0].ident, "type_");
        assert_eq!(infos[0].delegate_ty, "u32");
        assert_eq!(infos[1].ident, "data");
        assert_eq!(infos[1].name, "params");
        assert_eq!(infos[1].base, ImplType::Scalar { elem: "i32".into(), mutable: true });
    }

    #[test]
    fn strong_compatibility() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glFoo", ReturnType::void())
            .param(CommandParameter::new("mode", "GLenum").with_group("BlendEquationMode"))
            .param(CommandParameter::new("flag", "GLboolean").with_group("Boolean"))
            .param(CommandParameter::new("other", "GLenum").with_group("MissingGroup"))
            .param(CommandParameter::new("raw", "GLenum"))
            .param(CommandParameter::new("modes", "const GLenum *").with_group("BlendEquationMode"));
        let strong: Vec<_> = resolve_all(&cmd, &ctx)
            .iter()
            .map(|i| is_strong_compatible(i, &ctx))
            .collect();
        assert_eq!(strong, [true, false, false, false, false]);
    }

    #[test]
    fn pinned_compatibility() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glVertexAttribPointer", ReturnType::void())
            .param(CommandParameter::new("pointer", "const void *"))
            .param(CommandParameter::new("offset", "const void *"))
            .param(CommandParameter::new("data", "void *"));
        let infos = resolve_all(&cmd, &ctx);
        assert!(is_pinned_compatible(&infos[0], false));
        assert!(!is_pinned_compatible(&infos[1], false));
        assert!(!is_pinned_compatible(&infos[2], false));
        assert!(is_pinned_compatible(&infos[2], true));
    }

    #[test]
    fn out_compatibility_requires_flag() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glFooiv", ReturnType::void())
            .param(CommandParameter::new("params", "GLint *").with_len("COMPSIZE(pname)"))
            .param(CommandParameter::new("one", "GLint *").with_len("1"));
        let infos = resolve_all(&cmd, &ctx);
        assert!(!is_out_compatible(&infos[0], CommandFlags::empty()));
        assert!(is_out_compatible(&infos[0], CommandFlags::OUT_PARAM));
        assert!(!is_out_compatible(&infos[1], CommandFlags::OUT_PARAM));
    }

    #[test]
    fn array_length_targets() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glUniform2fv", ReturnType::void())
            .param(CommandParameter::new("location", "GLint"))
            .param(CommandParameter::new("count", "GLsizei"))
            .param(CommandParameter::new("value", "const GLfloat *").with_len("count*2"))
            .param(CommandParameter::new("size", "GLsizei"))
            .param(CommandParameter::new("data", "const void *").with_len("size"));
        let infos = resolve_all(&cmd, &ctx);
        let targets: Vec<_> = infos.iter().map(|i| array_length_target(i, &infos)).collect();
        assert_eq!(targets, [None, Some((2, 2)), None, None, None]);
    }

    #[test]
    fn shared_count_stays_explicit() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glShaderSource", ReturnType::void())
            .param(CommandParameter::new("shader", "GLuint"))
            .param(CommandParameter::new("count", "GLsizei"))
            .param(CommandParameter::new("string", "const GLchar *const*").with_len("count"))
            .param(CommandParameter::new("length", "const GLint *").with_len("count"));
        let infos = resolve_all(&cmd, &ctx);
        assert_eq!(infos[3].base, ImplType::Slice { elem: "i32".into(), mutable: false });
        assert_eq!(array_length_target(&infos[1], &infos), None);
    }

    #[test]
    fn marshaling() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glFoo", ReturnType::void())
            .param(CommandParameter::new("mode", "GLenum").with_group("BlendEquationMode"))
            .param(CommandParameter::new("n", "GLsizei"))
            .param(CommandParameter::new("ids", "GLuint *").with_len("n"))
            .param(CommandParameter::new("data", "const void *"));
        let infos = resolve_all(&cmd, &ctx);
        let params = vec![
            OverloadParam { info: infos[0].clone(), kind: ParamKind::Strong { group: "BlendEquationMode".into() } },
            OverloadParam { info: infos[1].clone(), kind: ParamKind::ArrayLength { array: 2, multiple: 1 } },
            OverloadParam { info: infos[2].clone(), kind: ParamKind::Plain },
            OverloadParam { info: infos[3].clone(), kind: ParamKind::Pinned },
        ];

        assert_eq!(params[0].signature_type().as_deref(), Some("groups::BlendEquationMode"));
        assert_eq!(params[0].marshal(&params), Marshal::Direct("mode.0 as u32".into()));

        assert!(params[1].is_implicit());
        assert_eq!(params[1].signature_type(), None);
        assert_eq!(params[1].marshal(&params), Marshal::Local {
            init: "let n = ids.len() as i32;".into(),
            arg: "n".into(),
        });

        assert_eq!(params[2].signature_type().as_deref(), Some("&mut [u32]"));
        assert_eq!(params[2].marshal(&params), Marshal::Fixed {
            bind: "let ids_ptr = ids.as_mut_ptr();".into(),
            arg: "ids_ptr".into(),
        });

        assert_eq!(params[3].signature_type().as_deref(), Some("&T3"));
        assert_eq!(params[3].generic().as_deref(), Some("T3"));
        assert_eq!(params[3].modifier(), Modifier::Pinned);
        assert_eq!(params[3].marshal(&params), Marshal::Pinned {
            bind: "let data_pin = PinnedRef::of(data);".into(),
            arg: "data_pin.addr() as *const __gl_imports::raw::c_void".into(),
        });
    }

    #[test]
    fn convenience_marshaling() {
        let registry = registry();
        let types = TypeMap::gl();
        let flags = CommandFlagsDatabase::new();
        let ctx = Context::new(&registry, &types, &flags).unwrap();

        let cmd = Command::new("glGenTextures", ReturnType::void())
            .param(CommandParameter::new("n", "GLsizei"))
            .param(CommandParameter::new("textures", "GLuint *").with_len("n"));
        let infos = resolve_all(&cmd, &ctx);
        let params = vec![
            OverloadParam { info: infos[0].clone(), kind: ParamKind::ConvenienceCount },
            OverloadParam { info: infos[1].clone(), kind: ParamKind::ConvenienceResult },
        ];
        assert_eq!(params[0].marshal(&params), Marshal::Local {
            init: "let n: i32 = 1;".into(),
            arg: "n".into(),
        });
        assert_eq!(params[1].marshal(&params), Marshal::Local {
            init: "let mut textures: u32 = __gl_imports::mem::zeroed();".into(),
            arg: "&mut textures as *mut u32 as *mut u32".into(),
        });
    }
}
