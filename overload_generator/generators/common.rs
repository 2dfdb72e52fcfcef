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

use crate::overload::Context;

/// Creates a `__gl_imports` module which contains all the external symbols that we need for the
///  bindings.
pub fn write_header<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        #[allow(unused_imports)]
        mod __gl_imports {{
            pub use std::cell::Cell;
            pub use std::ffi::CString;
            pub use std::marker::PhantomData;
            pub use std::mem;
            pub use std::os::raw;
            pub use std::ptr;
            pub use std::thread::LocalKey;
        }}
    "#
    )
}

/// Creates a `types` module which contains all the type aliases.
///
/// See also `generators::gen_types`.
pub fn write_type_aliases<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        pub mod types {{
            #![allow(non_camel_case_types, non_snake_case, dead_code, missing_copy_implementations)]
    "#
    )?;

    super::gen_types(dest)?;

    writeln!(dest, "}}")
}

/// Creates all the `<enum>` elements at the root of the bindings.
pub fn write_enums<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    for enm in &ctx.registry.enums {
        super::gen_enum_item(ctx.registry.api, enm, ctx.types, dest)?;
    }

    Ok(())
}

/// Creates a `groups` module with one newtype per enumeration group.
///
/// Only `u32` constants become members, and a constant listed twice is
/// emitted once.
pub fn write_groups<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "pub mod groups {{
            #![allow(non_upper_case_globals, non_camel_case_types, dead_code)]"
    )?;

    for group in ctx.registry.groups.values() {
        let mut seen = HashSet::new();
        let members: Vec<String> = group
            .members
            .iter()
            .filter_map(|member| ctx.registry.get_enum(member))
            .filter(|enm| ctx.types.map_type(&enm.ty) == "u32")
            .map(|enm| super::gen_enum_ident(ctx.registry.api, &enm.ident))
            .filter(|ident| seen.insert(ident.clone()))
            .collect();

        writeln!(
            dest,
            "#[repr(transparent)]
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub struct {name}(pub u32);

            impl {name} {{",
            name = group.name
        )?;
        for member in &members {
            writeln!(
                dest,
                "pub const {member}: {name} = {name}(super::{member});",
                member = member,
                name = group.name
            )?;
        }
        writeln!(
            dest,
            "    /// Every member, in registry order.
                pub const VALUES: &'static [{name}] = &[{values}];
            }}

            impl From<{name}> for u32 {{
                #[inline]
                fn from(value: {name}) -> u32 {{
                    value.0
                }}
            }}

            impl From<u32> for {name} {{
                #[inline]
                fn from(value: u32) -> {name} {{
                    {name}(value)
                }}
            }}",
            name = group.name,
            values = members
                .iter()
                .map(|m| format!("{}::{}", group.name, m))
                .collect::<Vec<_>>()
                .join(", "),
        )?;
    }

    writeln!(dest, "}}")
}

/// Creates the `PinnedRef` guard used by overloads taking borrowed objects.
///
/// The guard holds the borrow until it is dropped, which happens when the
/// block around the native call ends, whether or not the call returned.
pub fn write_pinned_ref<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        /// An object whose address is handed to a native call. The object stays
        /// borrowed, and so cannot move, until the guard is dropped.
        #[allow(dead_code)]
        pub struct PinnedRef<'a> {{
            addr: *mut __gl_imports::raw::c_void,
            _borrow: __gl_imports::PhantomData<&'a mut ()>,
        }}

        #[allow(dead_code)]
        impl<'a> PinnedRef<'a> {{
            #[inline]
            pub fn of<T: ?Sized>(value: &'a T) -> PinnedRef<'a> {{
                PinnedRef {{
                    addr: (value as *const T).cast::<__gl_imports::raw::c_void>() as *mut _,
                    _borrow: __gl_imports::PhantomData,
                }}
            }}

            #[inline]
            pub fn of_mut<T: ?Sized>(value: &'a mut T) -> PinnedRef<'a> {{
                PinnedRef {{
                    addr: (value as *mut T).cast::<__gl_imports::raw::c_void>(),
                    _borrow: __gl_imports::PhantomData,
                }}
            }}

            #[inline]
            pub fn addr(&self) -> *mut __gl_imports::raw::c_void {{
                self.addr
            }}
        }}

        impl<'a> Drop for PinnedRef<'a> {{
            #[inline]
            fn drop(&mut self) {{
                self.addr = __gl_imports::ptr::null_mut();
            }}
        }}
    "#
    )
}

/// Creates the function called when no entry point of a dispatch ladder
/// was loaded on the current thread.
pub fn write_missing_fn<W>(ctx: &Context, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "#[cold]
        #[inline(never)]
        #[allow(dead_code)]
        fn missing_fn(command: &'static str) -> ! {{
            unimplemented!(\"{api} function `{{}}` was not loaded on this thread\", command)
        }}",
        api = ctx.registry.api
    )
}

/// Creates the per-thread error hook run after checked commands.
pub fn write_error_hook<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        r#"
        thread_local! {{
            static ERROR_HOOK: __gl_imports::Cell<Option<fn(&'static str)>> = __gl_imports::Cell::new(None);
        }}

        /// Installs the function run on this thread after every command that
        /// checks for errors, or removes it with `None`. The hook receives the
        /// native name of the command that just returned.
        #[allow(dead_code)]
        pub fn set_error_hook(hook: Option<fn(&'static str)>) {{
            ERROR_HOOK.with(|slot| slot.set(hook));
        }}

        #[inline]
        #[allow(dead_code)]
        fn check_error(command: &'static str) {{
            if let Some(hook) = ERROR_HOOK.with(|slot| slot.get()) {{
                hook(command);
            }}
        }}
    "#
    )
}
