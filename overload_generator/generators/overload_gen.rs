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

use std::collections::HashSet;
use std::io;

use super::common;
use crate::flags::Visibility;
use crate::overload::{Context, Marshal, Overload, ReturnConversion};
use crate::registry::Command;

/// Generates free functions backed by thread-local function pointers, one
/// function per synthesized overload.
#[allow(missing_copy_implementations)]
pub struct GlobalOverloadGenerator;

impl super::Generator for GlobalOverloadGenerator {
    fn write<W>(&self, ctx: &Context, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        common::write_header(dest)?;
        common::write_type_aliases(dest)?;
        common::write_enums(ctx, dest)?;
        common::write_groups(ctx, dest)?;
        common::write_pinned_ref(dest)?;
        common::write_missing_fn(ctx, dest)?;
        common::write_error_hook(dest)?;
        write_fns(ctx, dest)?;
        write_ptrs(ctx, dest)?;
        write_resolved(dest)?;
        write_load_fn(ctx, dest)?;
        write_is_loaded(ctx, dest)?;
        Ok(())
    }
}

const HELPERS: &[&str] = &[
    "PinnedRef",
    "missing_fn",
    "set_error_hook",
    "check_error",
    "resolved",
    "load_with",
    "is_loaded",
];

/// Creates the functions corresponding to the overloads of every emitted
/// command.
///
/// A command whose overloads cannot be synthesized is logged and left out.
/// An overload whose name is already taken is logged and left out.
fn write_fns<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let mut taken: HashSet<String> = HELPERS.iter().map(|h| h.to_string()).collect();
    taken.extend(
        ctx.registry
            .enums
            .iter()
            .map(|enm| super::gen_enum_ident(ctx.registry.api, &enm.ident)),
    );

    for cmd in ctx.registry.emitted_cmds() {
        let overloads = match ctx.overloads(cmd) {
            Ok(overloads) => overloads,
            Err(err) => {
                error!("skipping `{}`: {}", cmd.name, err);
                continue;
            },
        };

        for overload in &overloads {
            if !taken.insert(overload.ident.clone()) {
                warn!(
                    "`{}` overload `{}` collides with an earlier item, skipping it",
                    cmd.name, overload.ident
                );
                continue;
            }
            write_fn(overload, dest)?;
        }
    }

    Ok(())
}

/// Creates one overload.
///
/// Locals come first, then one nested scope per fixed parameter, then the
/// block holding the pin guards and the dispatch ladder. The error hook runs
/// once every scope has closed.
fn write_fn<W>(overload: &Overload, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let marshals: Vec<Marshal> = overload
        .params
        .iter()
        .map(|param| param.marshal(&overload.params))
        .collect();

    writeln!(
        dest,
        "#[allow(non_snake_case, unused_variables, unused_mut, dead_code, clippy::all)]
        #[inline]
        {visibility}unsafe fn {ident}{generics}({params}) -> {ret} {{",
        visibility = match overload.visibility {
            Visibility::Public => "pub ",
            Visibility::Private => "",
        },
        ident = overload.ident,
        generics = super::gen_generics(overload),
        params = super::gen_parameters(overload, true, true).join(", "),
        ret = overload.ret.public_ty.as_deref().unwrap_or("()"),
    )?;

    for marshal in &marshals {
        if let Marshal::Local { init, .. } = marshal {
            writeln!(dest, "{}", init)?;
        }
    }
    if let Some(ty) = &overload.ret.delegate_ty {
        writeln!(dest, "let __retval: {};", ty)?;
    }

    for &index in &overload.plan.fixed {
        if let Marshal::Fixed { bind, .. } = &marshals[index] {
            writeln!(dest, "{{ {}", bind)?;
        }
    }
    writeln!(dest, "{{")?;
    for &index in &overload.plan.pinned {
        if let Marshal::Pinned { bind, .. } = &marshals[index] {
            writeln!(dest, "{}", bind)?;
        }
    }

    let args: Vec<&str> = marshals
        .iter()
        .map(|marshal| match marshal {
            Marshal::Direct(arg)
            | Marshal::Local { arg, .. }
            | Marshal::Fixed { arg, .. }
            | Marshal::Pinned { arg, .. } => &arg[..],
        })
        .collect();
    write_dispatch(overload, &args, dest)?;

    writeln!(dest, "}}")?;
    for _ in &overload.plan.fixed {
        writeln!(dest, "}}")?;
    }

    if overload.plan.error_check {
        writeln!(dest, "check_error(\"{}\");", overload.command)?;
    }

    match &overload.ret.conversion {
        ReturnConversion::Direct if overload.ret.delegate_ty.is_some() => writeln!(dest, "__retval")?,
        ReturnConversion::Direct => {},
        ReturnConversion::Strong(group) => {
            writeln!(dest, "groups::{}(__retval as u32)", group)?
        },
        ReturnConversion::Local(ident) => writeln!(dest, "{}", ident)?,
    }

    writeln!(dest, "}}")
}

/// Creates the ladder probing each entry point of the dispatch plan on the
/// current thread and calling the first one that was loaded.
fn write_dispatch<W>(overload: &Overload, args: &[&str], dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let primary = match overload.plan.dispatch.first() {
        Some(primary) => primary,
        None => return writeln!(dest, "missing_fn(\"{}\");", overload.command),
    };

    if overload.ret.delegate_ty.is_some() {
        write!(dest, "__retval = ")?;
    }

    for (i, target) in overload.plan.dispatch.iter().enumerate() {
        let call_args: Vec<String> = args
            .iter()
            .zip(&target.params)
            .zip(&primary.params)
            .map(|((arg, ty), primary_ty)| {
                if ty == primary_ty {
                    arg.to_string()
                } else {
                    format!("({}) as {}", arg, ty)
                }
            })
            .collect();
        let call = format!(
            "__gl_imports::mem::transmute::<_, extern \"system\" fn({params}) -> {ret}>(__f)({args})",
            params = target.params.join(", "),
            ret = target.ret.as_deref().unwrap_or("()"),
            args = call_args.join(", "),
        );
        let call = match (&target.ret, &primary.ret) {
            (Some(ty), Some(primary_ty)) if ty != primary_ty => format!("{} as {}", call, primary_ty),
            _ => call,
        };

        writeln!(
            dest,
            "{keyword} let Some(__f) = resolved(&storage::{command}) {{ {call} }}",
            keyword = if i == 0 { "if" } else { "else if" },
            command = target.command,
            call = call,
        )?;
    }

    writeln!(
        dest,
        "else {{ missing_fn(\"{}\") }}{}",
        overload.command,
        if overload.ret.delegate_ty.is_some() { ";" } else { "" }
    )
}

/// Creates a `storage` module which contains one thread-local function
/// pointer slot per emitted command.
fn write_ptrs<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "mod storage {{
            #![allow(non_upper_case_globals)]
            use super::__gl_imports::{{Cell, ptr, raw}};

            thread_local! {{"
    )?;

    for cmd in ctx.registry.emitted_cmds() {
        writeln!(
            dest,
            "pub static {name}: Cell<*const raw::c_void> = Cell::new(ptr::null());",
            name = cmd.name
        )?;
    }

    writeln!(dest, "}} }}")
}

/// Creates the helper reading a slot of the current thread.
fn write_resolved<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        #[inline]
        #[allow(dead_code)]
        fn resolved(
            slot: &'static __gl_imports::LocalKey<__gl_imports::Cell<*const __gl_imports::raw::c_void>>,
        ) -> Option<*const __gl_imports::raw::c_void> {{
            let ptr = slot.with(|cell| cell.get());
            if ptr.is_null() {{
                None
            }} else {{
                Some(ptr)
            }}
        }}
    "#
    )
}

/// Creates the `load_with` function.
///
/// Slots are thread-local, so only the calling thread's pointers change.
fn write_load_fn<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest,
                  "
        /// Load each symbol on the current thread using a custom load function.
        /// Other threads keep their own pointers and must load them separately.
        /// ~~~ignore
        /// gl::load_with(|s| window.get_proc_address(s));
        /// ~~~
        #[allow(dead_code)]
        pub fn load_with<F>(mut loadfn: F) where F: FnMut(&'static str) -> *const __gl_imports::raw::c_void {{
            #[inline(never)]
            fn inner(loadfn: &mut dyn FnMut(&'static str) -> *const __gl_imports::raw::c_void) {{
    ")?;

    for cmd in ctx.registry.emitted_cmds() {
        write_load_slot(cmd, dest)?;
    }

    writeln!(
        dest,
        "
            }}

            inner(&mut loadfn)
        }}
    "
    )
}

fn write_load_slot<W>(cmd: &Command, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "let ptr = loadfn(\"{name}\"); storage::{name}.with(|slot| slot.set(ptr));",
        name = cmd.name
    )
}

/// Creates the `is_loaded` function reporting whether a symbol was loaded
/// on the current thread.
fn write_is_loaded<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "#[allow(dead_code)]
        pub fn is_loaded(symbol: &str) -> bool {{
            match symbol {{"
    )?;

    for cmd in ctx.registry.emitted_cmds() {
        writeln!(
            dest,
            "\"{name}\" => resolved(&storage::{name}).is_some(),",
            name = cmd.name
        )?;
    }

    writeln!(dest, "_ => false, }} }}")
}
