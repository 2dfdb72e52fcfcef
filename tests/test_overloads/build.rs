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

extern crate overload_generator;

use overload_generator::*;
use std::env;
use std::fs::File;
use std::path::Path;

fn registry() -> Registry {
    let mut registry = Registry::new(Api::Gl);
    registry
        .push_enum(Enum::new("GL_NO_ERROR", "0"))
        .push_enum(Enum::new("GL_INVALID_ENUM", "0x0500"))
        .push_enum(Enum::new("GL_VIEWPORT", "0x0BA2"))
        .push_enum(Enum::new("GL_MAX_TEXTURE_SIZE", "0x0D33"))
        .push_enum(Enum::new("GL_FUNC_ADD", "0x8006"))
        .push_enum(Enum::new("GL_MIN", "0x8007"))
        .push_enum(Enum::new("GL_MAX", "0x8008"))
        .push_enum(Enum::new("GL_ARRAY_BUFFER", "0x8892"))
        .push_enum(Enum::new("GL_ELEMENT_ARRAY_BUFFER", "0x8893"))
        .push_enum(Enum::new("GL_STATIC_DRAW", "0x88E4"))
        .push_enum(Enum::new("GL_DYNAMIC_DRAW", "0x88E8"))
        .push_enum(Enum::new("GL_INVALID_INDEX", "-1").with_type("GLuint"))
        .push_group(EnumGroup::new("BlendEquationMode", &["GL_FUNC_ADD", "GL_MIN", "GL_MAX"]))
        .push_group(EnumGroup::new("BufferTargetARB", &["GL_ARRAY_BUFFER", "GL_ELEMENT_ARRAY_BUFFER"]))
        .push_group(EnumGroup::new("BufferUsageARB", &["GL_STATIC_DRAW", "GL_DYNAMIC_DRAW"]))
        .push_group(EnumGroup::new("GetPName", &["GL_VIEWPORT", "GL_MAX_TEXTURE_SIZE"]))
        .push_group(EnumGroup::new("ErrorCode", &["GL_NO_ERROR", "GL_INVALID_ENUM"]));

    registry
        .push_command(
            Command::new("glBlendEquation", ReturnType::void())
                .param(CommandParameter::new("mode", "GLenum").with_group("BlendEquationMode")),
        )
        .push_command(
            Command::new("glBlendEquationEXT", ReturnType::void())
                .param(CommandParameter::new("mode", "GLenum").with_group("BlendEquationMode"))
                .alias_of("glBlendEquation"),
        )
        .push_command(
            Command::new("glGenTextures", ReturnType::void())
                .param(CommandParameter::new("n", "GLsizei"))
                .param(CommandParameter::new("textures", "GLuint *").with_len("n")),
        )
        .push_command(
            Command::new("glDeleteTextures", ReturnType::void())
                .param(CommandParameter::new("n", "GLsizei"))
                .param(CommandParameter::new("textures", "const GLuint *").with_len("n")),
        )
        .push_command(
            Command::new("glBufferData", ReturnType::void())
                .param(CommandParameter::new("target", "GLenum").with_group("BufferTargetARB"))
                .param(CommandParameter::new("size", "GLsizeiptr"))
                .param(CommandParameter::new("data", "const void *").with_len("size"))
                .param(CommandParameter::new("usage", "GLenum").with_group("BufferUsageARB")),
        )
        .push_command(
            Command::new("glGetIntegerv", ReturnType::void())
                .param(CommandParameter::new("pname", "GLenum").with_group("GetPName"))
                .param(CommandParameter::new("data", "GLint *").with_len("COMPSIZE(pname)")),
        )
        .push_command(Command::new("glGetError", ReturnType::new("GLenum").with_group("ErrorCode")))
        .push_command(
            Command::new("glIsTexture", ReturnType::new("GLboolean"))
                .param(CommandParameter::new("texture", "GLuint")),
        )
        .push_command(
            Command::new("glGetQueryObjectuiv", ReturnType::void())
                .param(CommandParameter::new("id", "GLuint"))
                .param(CommandParameter::new("pname", "GLenum"))
                .param(CommandParameter::new("params", "GLuint *").with_len("1")),
        )
        .push_command(
            Command::new("glGetAttribLocation", ReturnType::new("GLint"))
                .param(CommandParameter::new("program", "GLuint"))
                .param(CommandParameter::new("name", "const GLchar *")),
        )
        .push_command(
            Command::new("glUniform2fv", ReturnType::void())
                .param(CommandParameter::new("location", "GLint"))
                .param(CommandParameter::new("count", "GLsizei"))
                .param(CommandParameter::new("value", "const GLfloat *").with_len("count*2")),
        )
        .push_command(
            Command::new("glNeverLoaded", ReturnType::void())
                .param(CommandParameter::new("value", "GLint")),
        );

    registry
        .push_feature(Feature::new("GL_VERSION_4_6", Api::Gl, "4.6").requires(&[
            "glBlendEquation",
            "glGenTextures",
            "glDeleteTextures",
            "glBufferData",
            "glGetIntegerv",
            "glGetError",
            "glIsTexture",
            "glGetQueryObjectuiv",
            "glGetAttribLocation",
            "glUniform2fv",
            "glNeverLoaded",
        ]))
        .push_extension(Extension::new("GL_EXT_blend_minmax", &[Api::Gl]).requires(&["glBlendEquationEXT"]));

    registry.link();
    registry
}

fn flags() -> CommandFlagsDatabase {
    let mut flags = CommandFlagsDatabase::new();
    flags
        .push(
            CommandOverride::new("glBlendEquation(EXT)?")
                .unwrap()
                .with_flags(CommandFlags::FORCE_PLAIN),
        )
        .push(
            CommandOverride::new("glGetIntegerv")
                .unwrap()
                .with_flags(CommandFlags::OUT_PARAM),
        )
        .push(
            CommandOverride::new("glIs.*")
                .unwrap()
                .with_flags(CommandFlags::NO_ERROR_CHECK),
        );
    flags
}

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let mut file = File::create(&Path::new(&dest).join("test_overloads.rs")).unwrap();

    let registry = registry();
    let types = TypeMap::gl();
    let flags = flags();
    Context::new(&registry, &types, &flags)
        .unwrap()
        .write_bindings(GlobalOverloadGenerator, &mut file)
        .unwrap();
}
