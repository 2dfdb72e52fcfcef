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

//! Native type tokens to Rust types.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::document;
use crate::registry::NativeType;
use crate::Error;

/// Path of `c_void` inside generated bindings.
pub const C_VOID: &str = "__gl_imports::raw::c_void";

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

const GL_TYPES: &[(&str, &str)] = &[
    ("void", "()"),
    ("GLvoid", "()"),
    ("GLenum", "u32"),
    ("GLboolean", "u8"),
    ("GLbitfield", "u32"),
    ("GLbyte", "i8"),
    ("GLubyte", "u8"),
    ("GLshort", "i16"),
    ("GLushort", "u16"),
    ("GLint", "i32"),
    ("GLuint", "u32"),
    ("GLclampx", "i32"),
    ("GLsizei", "i32"),
    ("GLfloat", "f32"),
    ("GLclampf", "f32"),
    ("GLdouble", "f64"),
    ("GLclampd", "f64"),
    ("GLchar", "__gl_imports::raw::c_char"),
    ("GLcharARB", "__gl_imports::raw::c_char"),
    ("GLhalf", "u16"),
    ("GLhalfARB", "u16"),
    ("GLhalfNV", "u16"),
    ("GLfixed", "i32"),
    ("GLintptr", "isize"),
    ("GLintptrARB", "isize"),
    ("GLsizeiptr", "isize"),
    ("GLsizeiptrARB", "isize"),
    ("GLint64", "i64"),
    ("GLint64EXT", "i64"),
    ("GLuint64", "u64"),
    ("GLuint64EXT", "u64"),
    ("GLhandleARB", "u32"),
    ("GLvdpauSurfaceNV", "isize"),
];

const GL_HANDLES: &[(&str, &str)] = &[
    ("GLsync", "types::GLsync"),
    ("GLeglImageOES", "types::GLeglImageOES"),
    ("GLeglClientBufferEXT", "types::GLeglClientBufferEXT"),
    ("GLDEBUGPROC", "types::GLDEBUGPROC"),
    ("GLDEBUGPROCARB", "types::GLDEBUGPROC"),
    ("GLDEBUGPROCKHR", "types::GLDEBUGPROC"),
    ("GLDEBUGPROCAMD", "types::GLDEBUGPROCAMD"),
    ("GLVULKANPROCNV", "types::GLVULKANPROCNV"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
struct Mapping {
    target: String,
    handle: bool,
}

/// Lookup table from native type tokens to the Rust types used in generated
/// bindings, plus the set of identifiers that cannot be used verbatim.
///
/// Tokens without a mapping pass through unchanged.
#[derive(Clone, Debug, Default)]
pub struct TypeMap {
    types: HashMap<String, Mapping>,
    reserved: HashSet<String>,
}

impl TypeMap {
    /// A table with nothing mapped and the Rust keywords reserved.
    pub fn new() -> TypeMap {
        TypeMap {
            types: HashMap::new(),
            reserved: RUST_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The built-in table for the Khronos GL family.
    pub fn gl() -> TypeMap {
        let mut map = TypeMap::new();
        for &(native, target) in GL_TYPES {
            map.insert(native, target);
        }
        for &(native, target) in GL_HANDLES {
            map.insert_handle(native, target);
        }
        map
    }

    /// Loads a table from a `<typemap>` document:
    ///
    /// ```xml
    /// <typemap>
    ///     <type native="GLuint" target="u32"/>
    ///     <type native="GLsync" target="types::GLsync" handle="true"/>
    ///     <reserved name="loop"/>
    /// </typemap>
    /// ```
    pub fn from_xml<R: Read>(reader: R) -> Result<TypeMap, Error> {
        let mut map = TypeMap::new();
        for element in document::elements(reader)? {
            match &element.name[..] {
                "type" => {
                    let native = element.require("type", "native")?;
                    let target = element.require("type", "target")?;
                    if element.get("handle") == Some("true") {
                        map.insert_handle(native, target);
                    } else {
                        map.insert(native, target);
                    }
                },
                "reserved" => map.reserve(element.require("reserved", "name")?),
                _ => {},
            }
        }
        Ok(map)
    }

    pub fn insert(&mut self, native: &str, target: &str) {
        self.types.insert(native.to_string(), Mapping {
            target: target.to_string(),
            handle: false,
        });
    }

    /// Maps an opaque handle type, which is never treated as a plain value.
    pub fn insert_handle(&mut self, native: &str, target: &str) {
        self.types.insert(native.to_string(), Mapping {
            target: target.to_string(),
            handle: true,
        });
    }

    pub fn reserve(&mut self, ident: &str) {
        self.reserved.insert(ident.to_string());
    }

    pub fn map_type<'a>(&'a self, token: &'a str) -> &'a str {
        self.types.get(token).map_or(token, |m| &m.target[..])
    }

    pub fn is_handle(&self, token: &str) -> bool {
        self.types.get(token).map_or(false, |m| m.handle)
    }

    pub fn is_reserved(&self, ident: &str) -> bool {
        self.reserved.contains(ident)
    }

    /// An identifier usable in generated code.
    pub fn ident(&self, name: &str) -> String {
        if self.is_reserved(name) {
            format!("{}_", name)
        } else {
            name.to_string()
        }
    }

    /// Neither a pointer nor a handle to unmanaged memory.
    pub fn is_safe(&self, ty: &NativeType) -> bool {
        !ty.is_pointer() && !self.is_handle(&ty.base) && !self.map_type(&ty.base).starts_with('*')
    }

    /// The raw Rust type of a native declaration, as it appears in the
    /// `extern "system"` signature of the native entry point.
    pub fn delegate_type(&self, ty: &NativeType) -> String {
        if ty.pointers == 0 {
            return self.map_type(&ty.base).to_string();
        }

        let canonical = ty.canonical();
        let mapped = self.map_type(&canonical);
        if mapped != canonical {
            return mapped.to_string();
        }

        let mut rust = if ty.base == "void" || ty.base == "GLvoid" {
            C_VOID.to_string()
        } else {
            self.map_type(&ty.base).to_string()
        };
        let pointer = if ty.is_const { "*const " } else { "*mut " };
        for _ in 0..ty.pointers {
            rust.insert_str(0, pointer);
        }
        rust
    }
}
