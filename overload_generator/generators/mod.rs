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

use std::io;

use crate::overload::{Context, Overload};
use crate::registry::{Api, Enum};
use crate::typemap::TypeMap;

pub use self::overload_gen::GlobalOverloadGenerator;

mod common;
mod overload_gen;

/// Trait for a bindings generator.
pub trait Generator {
    /// Builds the bindings for every emitted command of the context's registry.
    fn write<W>(&self, ctx: &Context, dest: &mut W) -> io::Result<()>
    where
        W: io::Write;
}

/// The Rust name of a registry constant: `GL_FUNC_ADD` gives `FUNC_ADD`,
/// `GL_2D` gives `_2D`.
pub fn gen_enum_ident(api: Api, ident: &str) -> String {
    let stripped = ident
        .strip_prefix(api.enum_prefix())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(ident);
    if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", stripped)
    } else {
        stripped.to_string()
    }
}

/// This function generates a `const name: type = value;` item.
pub fn gen_enum_item<W>(api: Api, enm: &Enum, types: &TypeMap, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let ty = types.map_type(&enm.ty);
    let value = if enm.value.starts_with('-') && ty.starts_with('u') {
        format!("({}i64) as {}", enm.value, ty)
    } else {
        enm.value.clone()
    };
    writeln!(
        dest,
        "#[allow(dead_code, non_upper_case_globals)] pub const {ident}: {ty} = {value};",
        ident = gen_enum_ident(api, &enm.ident),
        ty = ty,
        value = value,
    )
}

/// Generates all the type aliases for a namespace.
///
/// Aliases are `pub type = ...` items for the handle and callback types
/// that have no direct Rust counterpart.
pub fn gen_types<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "{}", include_str!("templates/types.rs"))
}

/// Generates the list of Rust `Arg`s visible in an overload's signature.
pub fn gen_parameters(overload: &Overload, with_idents: bool, with_types: bool) -> Vec<String> {
    overload
        .signature()
        .into_iter()
        .map(|param| {
            if with_idents && with_types {
                format!("{}: {}", param.ident, param.ty)
            } else if with_types {
                param.ty
            } else {
                param.ident
            }
        })
        .collect()
}

/// Generates the `<T0: ?Sized, ...>` list of an overload, or nothing.
pub fn gen_generics(overload: &Overload) -> String {
    let generics = overload.generics();
    if generics.is_empty() {
        String::new()
    } else {
        let bounded: Vec<String> = generics.iter().map(|g| format!("{}: ?Sized", g)).collect();
        format!("<{}>", bounded.join(", "))
    }
}
