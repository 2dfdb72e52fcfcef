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

//! A bindings generator that synthesizes typed overloads for GL-style
//! registries.
//!
//! For every native command it decides which public overloads to generate
//! (plain, strongly typed, pinned-object, out-parameter, implicit-length and
//! single-object convenience variants) and emits the marshaling and dispatch
//! code behind each of them. Function pointers are stored per thread, and
//! every call probes the command and then its aliases in link order.
//!
//! # Example
//!
//! In `build.rs`:
//!
//! ```no_run
//! extern crate overload_generator;
//!
//! use overload_generator::{
//!     Api, Command, CommandFlagsDatabase, CommandParameter, Context, Feature,
//!     GlobalOverloadGenerator, Registry, ReturnType, TypeMap,
//! };
//! use std::env;
//! use std::fs::File;
//! use std::path::Path;
//!
//! fn main() {
//!     let dest = env::var("OUT_DIR").unwrap();
//!     let mut file = File::create(&Path::new(&dest).join("gl_bindings.rs")).unwrap();
//!
//!     let mut registry = Registry::new(Api::Gl);
//!     registry
//!         .push_command(
//!             Command::new("glGenTextures", ReturnType::void())
//!                 .param(CommandParameter::new("n", "GLsizei"))
//!                 .param(CommandParameter::new("textures", "GLuint *").with_len("n")),
//!         )
//!         .push_feature(Feature::new("GL_VERSION_1_1", Api::Gl, "1.1").requires(&["glGenTextures"]));
//!     registry.link();
//!
//!     let types = TypeMap::gl();
//!     let flags = CommandFlagsDatabase::new();
//!     Context::new(&registry, &types, &flags)
//!         .unwrap()
//!         .write_bindings(GlobalOverloadGenerator, &mut file)
//!         .unwrap();
//! }
//! ```
//!
//! In your project:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
//! ```

#[macro_use]
extern crate log;
extern crate xml;

#[cfg(feature = "unstable_generator_utils")]
pub mod generators;
#[cfg(not(feature = "unstable_generator_utils"))]
mod generators;

pub mod overload;

mod document;
mod error;
mod flags;
mod registry;
mod typemap;

pub use crate::error::Error;
pub use crate::flags::{
    CommandFlags, CommandFlagsDatabase, CommandOverride, ParamModifier, ParameterOverride, Visibility,
};
pub use crate::generators::{Generator, GlobalOverloadGenerator};
pub use crate::overload::{Context, Overload};
pub use crate::registry::*;
pub use crate::typemap::TypeMap;
