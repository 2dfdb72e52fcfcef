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

#![cfg(test)]

#[allow(non_upper_case_globals, non_snake_case, non_camel_case_types, dead_code)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/test_overloads.rs"));
}

use std::cell::RefCell;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::thread;

thread_local! {
    static CALLS: RefCell<Vec<(&'static str, Vec<i64>)>> = RefCell::new(Vec::new());
    static CHECKED: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
}

fn record(command: &'static str, args: &[i64]) {
    CALLS.with(|calls| calls.borrow_mut().push((command, args.to_vec())));
}

fn take_calls() -> Vec<(&'static str, Vec<i64>)> {
    CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
}

extern "system" fn blend_equation(mode: u32) {
    record("glBlendEquation", &[mode as i64]);
}

extern "system" fn blend_equation_ext(mode: u32) {
    record("glBlendEquationEXT", &[mode as i64]);
}

extern "system" fn gen_textures(n: i32, textures: *mut u32) {
    record("glGenTextures", &[n as i64]);
    for i in 0..n as usize {
        unsafe { *textures.add(i) = 7 + i as u32 };
    }
}

extern "system" fn delete_textures(n: i32, textures: *const u32) {
    let mut args = vec![n as i64];
    for i in 0..n as usize {
        args.push(unsafe { *textures.add(i) } as i64);
    }
    record("glDeleteTextures", &args);
}

extern "system" fn buffer_data(target: u32, size: isize, data: *const c_void, usage: u32) {
    record("glBufferData", &[target as i64, size as i64, data as usize as i64, usage as i64]);
}

extern "system" fn get_integerv(pname: u32, data: *mut i32) {
    record("glGetIntegerv", &[pname as i64]);
    unsafe { *data = 42 };
}

extern "system" fn get_error() -> u32 {
    record("glGetError", &[]);
    0x0500
}

extern "system" fn is_texture(texture: u32) -> u8 {
    record("glIsTexture", &[texture as i64]);
    (texture == 7) as u8
}

extern "system" fn get_query_object_uiv(id: u32, pname: u32, params: *mut u32) {
    record("glGetQueryObjectuiv", &[id as i64, pname as i64]);
    unsafe { *params = 1 };
}

extern "system" fn get_attrib_location(program: u32, name: *const c_char) -> i32 {
    let name = unsafe { CStr::from_ptr(name) };
    record("glGetAttribLocation", &[program as i64]);
    name.to_bytes().len() as i32
}

extern "system" fn uniform_2fv(location: i32, count: i32, value: *const f32) {
    let first = unsafe { *value };
    record("glUniform2fv", &[location as i64, count as i64, first as i64]);
}

fn symbol(name: &str) -> *const c_void {
    match name {
        "glBlendEquation" => blend_equation as *const c_void,
        "glBlendEquationEXT" => blend_equation_ext as *const c_void,
        "glGenTextures" => gen_textures as *const c_void,
        "glDeleteTextures" => delete_textures as *const c_void,
        "glBufferData" => buffer_data as *const c_void,
        "glGetIntegerv" => get_integerv as *const c_void,
        "glGetError" => get_error as *const c_void,
        "glIsTexture" => is_texture as *const c_void,
        "glGetQueryObjectuiv" => get_query_object_uiv as *const c_void,
        "glGetAttribLocation" => get_attrib_location as *const c_void,
        "glUniform2fv" => uniform_2fv as *const c_void,
        _ => std::ptr::null(),
    }
}

fn load_all() {
    gl::load_with(|name| symbol(name));
}

fn load_only(names: &'static [&'static str]) {
    gl::load_with(|name| {
        if names.contains(&name) {
            symbol(name)
        } else {
            std::ptr::null()
        }
    });
}

#[test]
fn calls_the_primary_entry_point() {
    load_all();
    unsafe { gl::BlendEquation(gl::FUNC_ADD) };
    assert_eq!(take_calls(), [("glBlendEquation", vec![0x8006])]);
}

#[test]
fn falls_back_to_aliases_in_link_order() {
    load_only(&["glBlendEquationEXT"]);
    unsafe { gl::BlendEquation_enum(gl::groups::BlendEquationMode::MIN) };
    assert_eq!(take_calls(), [("glBlendEquationEXT", vec![0x8007])]);

    load_all();
    unsafe { gl::BlendEquationEXT(gl::MAX) };
    assert_eq!(take_calls(), [("glBlendEquationEXT", vec![0x8008])]);
}

#[test]
#[should_panic(expected = "glNeverLoaded")]
fn unloaded_commands_fail_loudly() {
    load_all();
    unsafe { gl::NeverLoaded(1) };
}

#[test]
#[should_panic(expected = "glBlendEquation")]
fn no_resolved_alias_fails_with_the_primary_name() {
    load_only(&["glGenTextures"]);
    unsafe { gl::BlendEquation(gl::FUNC_ADD) };
}

#[test]
fn slots_are_per_thread() {
    load_all();
    assert!(gl::is_loaded("glBlendEquation"));
    assert!(!gl::is_loaded("glNeverLoaded"));
    assert!(!gl::is_loaded("glUnknown"));

    let other = thread::spawn(|| gl::is_loaded("glBlendEquation")).join().unwrap();
    assert!(!other);

    let other = thread::spawn(|| {
        load_only(&["glBlendEquationEXT"]);
        unsafe { gl::BlendEquation(gl::FUNC_ADD) };
        take_calls()
    })
    .join()
    .unwrap();
    assert_eq!(other, [("glBlendEquationEXT", vec![0x8006])]);

    unsafe { gl::BlendEquation(gl::FUNC_ADD) };
    assert_eq!(take_calls(), [("glBlendEquation", vec![0x8006])]);
}

#[test]
fn convenience_returns_the_generated_object() {
    load_all();
    let texture = unsafe { gl::GenTexture() };
    assert_eq!(texture, 7);
    assert_eq!(take_calls(), [("glGenTextures", vec![1])]);
}

#[test]
fn slices_carry_their_length() {
    load_all();
    let mut textures = [0; 3];
    unsafe { gl::GenTextures_slice(&mut textures) };
    assert_eq!(textures, [7, 8, 9]);

    unsafe { gl::DeleteTextures_slice(&textures[..2]) };
    assert_eq!(take_calls(), [
        ("glGenTextures", vec![3]),
        ("glDeleteTextures", vec![2, 7, 8]),
    ]);

    unsafe { gl::DeleteTextures(1, &[9]) };
    assert_eq!(take_calls(), [("glDeleteTextures", vec![1, 9])]);
}

#[test]
fn multiple_lengths_are_divided() {
    load_all();
    unsafe { gl::Uniform2fv_slice(3, &[5.0, 6.0, 7.0, 8.0]) };
    assert_eq!(take_calls(), [("glUniform2fv", vec![3, 2, 5])]);
}

#[test]
fn pinned_objects_pass_their_address() {
    load_all();
    let data = [1.0f32, 2.0, 3.0];
    unsafe {
        gl::BufferData_obj(
            gl::groups::BufferTargetARB::ARRAY_BUFFER,
            12,
            &data[..],
            gl::groups::BufferUsageARB::STATIC_DRAW,
        )
    };
    assert_eq!(take_calls(), [(
        "glBufferData",
        vec![0x8892, 12, data.as_ptr() as usize as i64, 0x88E4]
    )]);
}

#[test]
fn out_parameters_write_through() {
    load_all();
    let mut value = 0;
    unsafe { gl::GetIntegerv_out(gl::groups::GetPName::VIEWPORT, &mut value) };
    assert_eq!(value, 42);

    let mut values = [0; 4];
    unsafe { gl::GetIntegerv(gl::groups::GetPName::MAX_TEXTURE_SIZE, &mut values) };
    assert_eq!(values[0], 42);

    let mut result = 0;
    unsafe { gl::GetQueryObjectuiv(3, 0x8866, &mut result) };
    assert_eq!(result, 1);

    assert_eq!(take_calls(), [
        ("glGetIntegerv", vec![0x0BA2]),
        ("glGetIntegerv", vec![0x0D33]),
        ("glGetQueryObjectuiv", vec![3, 0x8866]),
    ]);
}

#[test]
fn strings_are_nul_terminated() {
    load_all();
    assert_eq!(unsafe { gl::GetAttribLocation(2, "position") }, 8);
    assert_eq!(take_calls(), [("glGetAttribLocation", vec![2])]);
}

#[test]
fn error_hook_runs_after_checked_commands() {
    fn hook(command: &'static str) {
        CHECKED.with(|checked| checked.borrow_mut().push(command));
    }

    load_all();
    gl::set_error_hook(Some(hook));
    unsafe {
        gl::BlendEquation(gl::FUNC_ADD);
        assert_eq!(gl::GetError(), gl::INVALID_ENUM);
        assert_eq!(gl::IsTexture(7), 1);
        gl::GenTexture();
    }
    gl::set_error_hook(None);
    unsafe { gl::BlendEquation(gl::MIN) };

    let checked = CHECKED.with(|checked| checked.borrow().clone());
    assert_eq!(checked, ["glBlendEquation", "glGenTextures"]);
}

#[test]
fn strong_values_round_trip() {
    load_all();
    assert_eq!(gl::groups::BlendEquationMode::VALUES.len(), 3);
    for &mode in gl::groups::BlendEquationMode::VALUES {
        unsafe { gl::BlendEquation_enum(mode) };
        let raw = take_calls()[0].1[0] as u32;
        assert_eq!(gl::groups::BlendEquationMode::from(raw), mode);
        assert_eq!(u32::from(mode), raw);
    }
    for &target in gl::groups::BufferTargetARB::VALUES {
        assert_eq!(gl::groups::BufferTargetARB::from(u32::from(target)), target);
    }
}

#[test]
fn constants() {
    assert_eq!(gl::INVALID_INDEX, u32::max_value());
    assert_eq!(gl::groups::ErrorCode::VALUES, &[
        gl::groups::ErrorCode::NO_ERROR,
        gl::groups::ErrorCode::INVALID_ENUM,
    ]);
}
