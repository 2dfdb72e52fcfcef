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

//! Overload synthesis.
//!
//! For every command this decides which set of public overloads to generate
//! and builds, for each of them, the plan the emitter follows: which
//! parameters open a scope, which are pinned, which native entry points are
//! probed and in what order, and whether the error hook runs afterwards.

use std::io;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::flags::{CommandFlags, CommandFlagsDatabase, Visibility};
use crate::generators::Generator;
use crate::registry::{is_read_back, Command, Length, Registry, BOOLEAN_GROUP};
use crate::typemap::TypeMap;
use crate::Error;

pub use self::param::{ImplType, Marshal, Modifier, OverloadParam, ParamInfo, ParamKind};

use self::param::{
    array_length_target, effective_type, is_out_compatible, is_pinned_compatible,
    is_strong_compatible, result_type,
};

mod param;

static CONVENIENCE_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Gen|Create)[A-Z]").unwrap());
static VENDOR_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*[a-z0-9])([A-Z]{2,})$").unwrap());

/// Everything generation reads. Nothing in it changes while bindings are
/// being produced.
#[derive(Copy, Clone, Debug)]
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub types: &'a TypeMap,
    pub flags: &'a CommandFlagsDatabase,
}

impl<'a> Context<'a> {
    /// Fails with `Error::NotLinked` unless `Registry::link` has run, since
    /// alias ladders and the emitted command set depend on it.
    pub fn new(
        registry: &'a Registry,
        types: &'a TypeMap,
        flags: &'a CommandFlagsDatabase,
    ) -> Result<Context<'a>, Error> {
        if !registry.is_linked() {
            return Err(Error::NotLinked);
        }
        Ok(Context {
            registry,
            types,
            flags,
        })
    }

    pub fn write_bindings<G, W>(&self, generator: G, dest: &mut W) -> io::Result<()>
    where
        G: Generator,
        W: io::Write,
    {
        generator.write(self, dest)
    }

    /// The name overloads of `cmd` are derived from.
    pub fn public_name<'c>(&'c self, cmd: &'c Command) -> &'c str {
        self.flags
            .rename(&cmd.name)
            .unwrap_or_else(|| cmd.impl_name(self.registry.api))
    }

    pub fn overloads(&self, cmd: &Command) -> Result<Vec<Overload>, Error> {
        synthesize(cmd, self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverloadKind {
    /// Every parameter in its base shape.
    Plain,
    /// Group-tagged parameters take their strong type.
    Strong,
    /// Opaque pointers become borrowed objects.
    Pinned { strong: bool },
    /// Arrays become single-element references.
    Out { strong: bool },
    /// Length parameters are computed from their arrays.
    ArrayLength,
    /// Produces one object and returns it.
    Convenience,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnConversion {
    /// The native return value, unchanged.
    Direct,
    /// Wrapped into the group's strong type.
    Strong(String),
    /// The value of the named local, filled in by the call.
    Local(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnPlan {
    pub delegate_ty: Option<String>,
    pub public_ty: Option<String>,
    pub conversion: ReturnConversion,
}

/// One native entry point the dispatch ladder probes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchTarget {
    pub command: String,
    pub params: Vec<String>,
    pub ret: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarshalPlan {
    /// Parameters that open a scope around the call, outermost first.
    pub fixed: Vec<usize>,
    /// Parameters pinned for the duration of the call.
    pub pinned: Vec<usize>,
    /// The command first, then its peer aliases in link order.
    pub dispatch: Vec<DispatchTarget>,
    pub error_check: bool,
}

/// A visible parameter of an overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignatureParam {
    pub ident: String,
    pub ty: String,
    pub modifier: Modifier,
    pub group: Option<String>,
}

/// A synthesized public overload and how to call through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overload {
    /// The native command.
    pub command: String,
    /// Public name.
    pub name: String,
    /// Function name in generated code, unique among the command's overloads.
    pub ident: String,
    pub kind: OverloadKind,
    pub visibility: Visibility,
    /// Every parameter, implicit ones included, in native order.
    pub params: Vec<OverloadParam>,
    pub ret: ReturnPlan,
    pub plan: MarshalPlan,
}

impl Overload {
    pub fn signature(&self) -> Vec<SignatureParam> {
        self.params
            .iter()
            .filter_map(|p| {
                p.signature_type().map(|ty| SignatureParam {
                    ident: p.info.ident.clone(),
                    ty,
                    modifier: p.modifier(),
                    group: match &p.kind {
                        ParamKind::Strong { group } => Some(group.clone()),
                        _ => p.info.group.clone(),
                    },
                })
            })
            .collect()
    }

    /// Name plus visible parameter types, e.g. `GenTextures(&mut [u32])`.
    pub fn signature_key(&self) -> String {
        let types: Vec<String> = self.signature().into_iter().map(|p| p.ty).collect();
        format!("{}({})", self.name, types.join(", "))
    }

    /// Type parameters, one per pinned parameter.
    pub fn generics(&self) -> Vec<String> {
        self.params.iter().filter_map(OverloadParam::generic).collect()
    }

    pub fn is_void(&self) -> bool {
        self.ret.public_ty.is_none()
    }
}

struct Candidates {
    strong: Vec<bool>,
    pinned: Vec<bool>,
    out: Vec<bool>,
    array_length: Vec<Option<(usize, usize)>>,
}

impl Candidates {
    fn has_strong(&self) -> bool {
        self.strong.iter().any(|&c| c)
    }

    fn has_pinned(&self) -> bool {
        self.pinned.iter().any(|&c| c)
    }

    fn has_out(&self) -> bool {
        self.out.iter().any(|&c| c)
    }

    fn has_array_length(&self) -> bool {
        self.array_length.iter().any(Option::is_some)
    }
}

/// Kind of each parameter when only the strong choice is being made.
fn surface(infos: &[ParamInfo], candidates: &Candidates, strong: bool) -> Vec<ParamKind> {
    infos
        .iter()
        .map(|info| match &info.group {
            Some(group) if strong && candidates.strong[info.index] => ParamKind::Strong {
                group: group.clone(),
            },
            _ => ParamKind::Plain,
        })
        .collect()
}

/// The overloads generated for `cmd`, in a fixed order.
pub fn synthesize(cmd: &Command, ctx: &Context) -> Result<Vec<Overload>, Error> {
    let flags = ctx.flags.flags(&cmd.name);
    if flags.contains(CommandFlags::DISABLE) {
        debug!("`{}` is disabled", cmd.name);
        return Ok(Vec::new());
    }

    let read_back = is_read_back(cmd.impl_name(ctx.registry.api));
    let infos: Vec<ParamInfo> = (0..cmd.params.len())
        .map(|i| ParamInfo::resolve(cmd, i, read_back, ctx))
        .collect();
    let candidates = Candidates {
        strong: infos.iter().map(|i| is_strong_compatible(i, ctx)).collect(),
        pinned: infos.iter().map(|i| is_pinned_compatible(i, read_back)).collect(),
        out: infos.iter().map(|i| is_out_compatible(i, flags)).collect(),
        array_length: infos.iter().map(|i| array_length_target(i, &infos)).collect(),
    };

    let force_plain = flags.contains(CommandFlags::FORCE_PLAIN);
    let has_strong = candidates.has_strong();
    let default_strong = has_strong && !force_plain;
    let name = ctx.public_name(cmd);
    let builder = Builder {
        cmd,
        ctx,
        flags,
        infos: &infos,
        dispatch: dispatch_targets(cmd, ctx),
    };

    let mut kinds: Vec<(OverloadKind, Vec<ParamKind>)> = Vec::new();
    if !has_strong || force_plain {
        kinds.push((OverloadKind::Plain, surface(&infos, &candidates, false)));
    }
    if has_strong {
        kinds.push((OverloadKind::Strong, surface(&infos, &candidates, true)));
    }
    if candidates.has_pinned() {
        let twins = if force_plain && has_strong {
            vec![true, false]
        } else {
            vec![default_strong]
        };
        for strong in twins {
            let mut params = surface(&infos, &candidates, strong);
            for (kind, _) in params.iter_mut().zip(&candidates.pinned).filter(|&(_, &c)| c) {
                *kind = ParamKind::Pinned;
            }
            kinds.push((OverloadKind::Pinned { strong }, params));
        }
    }
    if candidates.has_out() {
        let twins = if force_plain && has_strong {
            vec![true, false]
        } else {
            vec![default_strong]
        };
        for strong in twins {
            let mut params = surface(&infos, &candidates, strong);
            for (kind, _) in params.iter_mut().zip(&candidates.out).filter(|&(_, &c)| c) {
                *kind = ParamKind::Out;
            }
            kinds.push((OverloadKind::Out { strong }, params));
        }
    }
    if candidates.has_array_length() {
        let mut params = surface(&infos, &candidates, has_strong);
        for (kind, target) in params.iter_mut().zip(&candidates.array_length) {
            if let Some((array, multiple)) = *target {
                *kind = ParamKind::ArrayLength { array, multiple };
            }
        }
        kinds.push((OverloadKind::ArrayLength, params));
    }

    let has_plain = kinds.iter().any(|(kind, _)| *kind == OverloadKind::Plain);
    let mut overloads: Vec<Overload> = kinds
        .into_iter()
        .map(|(kind, params)| {
            let ident = match kind {
                OverloadKind::Plain => name.to_string(),
                OverloadKind::Strong if has_plain => format!("{}_enum", name),
                OverloadKind::Strong => name.to_string(),
                OverloadKind::Pinned { strong } if strong && force_plain => format!("{}_enum_obj", name),
                OverloadKind::Pinned { .. } => format!("{}_obj", name),
                OverloadKind::Out { strong } if strong && force_plain => format!("{}_enum_out", name),
                OverloadKind::Out { .. } => format!("{}_out", name),
                OverloadKind::ArrayLength => format!("{}_slice", name),
                OverloadKind::Convenience => singular_name(name).unwrap_or_else(|| name.to_string()),
            };
            builder.build(name, ident, kind, params)
        })
        .collect();

    let convenience = if CONVENIENCE_VERB.is_match(name)
        && cmd.proto.is_void()
        && candidates.has_array_length()
    {
        singular_name(name)
    } else {
        None
    };
    if let Some(singular) = convenience {
        let result = convenience_result(cmd, &infos, &candidates)?;
        let mut params = surface(&infos, &candidates, default_strong);
        params[result] = ParamKind::ConvenienceResult;
        if let Some((count, _)) = candidates
            .array_length
            .iter()
            .enumerate()
            .find(|(_, target)| matches!(target, Some((array, _)) if *array == result))
        {
            params[count] = ParamKind::ConvenienceCount;
        }
        overloads.push(builder.build(&singular, singular.clone(), OverloadKind::Convenience, params));
    }

    debug!(
        "`{}`: {}",
        cmd.name,
        overloads
            .iter()
            .map(|o| o.ident.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(overloads)
}

/// The one mutable array a convenience overload returns an element of.
fn convenience_result(cmd: &Command, infos: &[ParamInfo], candidates: &Candidates) -> Result<usize, Error> {
    let results: Vec<usize> = infos
        .iter()
        .filter(|info| match (&info.base, &info.length) {
            (ImplType::Slice { mutable: true, .. }, Length::Param(len)) => infos
                .iter()
                .any(|p| p.name == *len && candidates.array_length[p.index].is_some()),
            _ => false,
        })
        .map(|info| info.index)
        .collect();
    match results[..] {
        [result] => Ok(result),
        _ => Err(Error::ConvenienceShape {
            command: cmd.name.clone(),
            count: results.len(),
        }),
    }
}

/// `GenTextures` gives `GenTexture`, `GenQueriesEXT` gives `GenQueryEXT`.
pub fn singular_name(name: &str) -> Option<String> {
    let (stem, suffix) = match VENDOR_SUFFIX.captures(name) {
        Some(caps) => (caps.get(1)?.as_str(), caps.get(2)?.as_str()),
        None => (name, ""),
    };
    let singular = if let Some(stem) = stem.strip_suffix("ies") {
        format!("{}y", stem)
    } else {
        stem.strip_suffix('s')?.to_string()
    };
    Some(singular + suffix)
}

/// Probe order for `cmd`: itself, then every emitted peer alias with the
/// same arity, in link order.
fn dispatch_targets(cmd: &Command, ctx: &Context) -> Vec<DispatchTarget> {
    let peers = cmd.aliases().iter().filter_map(|alias| {
        let peer = ctx.registry.get_command(alias);
        if peer.is_none() {
            warn!("`{}` lists unknown alias `{}`", cmd.name, alias);
        }
        peer.filter(|peer| peer.is_emitted() && peer.params.len() == cmd.params.len())
    });
    Some(cmd)
        .into_iter()
        .chain(peers)
        .map(|target| DispatchTarget {
            command: target.name.clone(),
            params: (0..target.params.len())
                .map(|i| ctx.types.delegate_type(&effective_type(target, i, ctx)))
                .collect(),
            ret: if target.proto.is_void() {
                None
            } else {
                Some(ctx.types.delegate_type(&target.proto.ty))
            },
        })
        .collect()
}

struct Builder<'a, 'b> {
    cmd: &'a Command,
    ctx: &'a Context<'b>,
    flags: CommandFlags,
    infos: &'a [ParamInfo],
    dispatch: Vec<DispatchTarget>,
}

impl<'a, 'b> Builder<'a, 'b> {
    fn build(&self, name: &str, ident: String, kind: OverloadKind, kinds: Vec<ParamKind>) -> Overload {
        let params: Vec<OverloadParam> = self
            .infos
            .iter()
            .cloned()
            .zip(kinds)
            .map(|(info, kind)| OverloadParam { info, kind })
            .collect();

        let mut fixed = Vec::new();
        let mut pinned = Vec::new();
        for (i, param) in params.iter().enumerate() {
            match param.marshal(&params) {
                Marshal::Fixed { .. } => fixed.push(i),
                Marshal::Pinned { .. } => pinned.push(i),
                _ => {},
            }
        }

        let uses_strong = params
            .iter()
            .any(|p| matches!(p.kind, ParamKind::Strong { .. }));
        let ret = self.return_plan(&params, kind, uses_strong);
        let error_check = !self.flags.contains(CommandFlags::NO_ERROR_CHECK)
            && self.cmd.impl_name(self.ctx.registry.api) != "GetError";

        Overload {
            command: self.cmd.name.clone(),
            name: name.to_string(),
            ident,
            kind,
            visibility: self.ctx.flags.visibility(&self.cmd.name),
            params,
            ret,
            plan: MarshalPlan {
                fixed,
                pinned,
                dispatch: self.dispatch.clone(),
                error_check,
            },
        }
    }

    fn return_plan(&self, params: &[OverloadParam], kind: OverloadKind, uses_strong: bool) -> ReturnPlan {
        let proto = &self.cmd.proto;
        let delegate_ty = if proto.is_void() {
            None
        } else {
            Some(self.ctx.types.delegate_type(&proto.ty))
        };

        if kind == OverloadKind::Convenience {
            if let Some(result) = params.iter().find(|p| p.kind == ParamKind::ConvenienceResult) {
                return ReturnPlan {
                    delegate_ty,
                    public_ty: Some(result_type(&result.info.base)),
                    conversion: ReturnConversion::Local(result.info.ident.clone()),
                };
            }
        }

        let strong_group = proto.group.as_ref().filter(|group| {
            uses_strong
                && *group != BOOLEAN_GROUP
                && self.ctx.types.is_safe(&proto.ty)
                && self.ctx.registry.get_group(group).is_some()
        });
        match strong_group {
            Some(group) if delegate_ty.is_some() => ReturnPlan {
                delegate_ty,
                public_ty: Some(format!("groups::{}", group)),
                conversion: ReturnConversion::Strong(group.clone()),
            },
            _ => ReturnPlan {
                public_ty: delegate_ty.clone(),
                delegate_ty,
                conversion: ReturnConversion::Direct,
            },
        }
    }
}
