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

//! The registry object graph consumed by overload synthesis.
//!
//! Registries are built in two passes: commands, enums, groups, features and
//! extensions are pushed first, then `Registry::link` resolves aliases and
//! feature requirements across the whole graph.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

mod command;
mod parameter;

pub use self::command::{is_read_back, Command, ReturnType};
pub use self::parameter::{CommandParameter, Length, NativeType};

/// Name of the boolean-flag enumeration group.
pub const BOOLEAN_GROUP: &str = "Boolean";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Api {
    Gl,
    Glx,
    Wgl,
    Egl,
    Gles1,
    Gles2,
    Glsc2,
}

impl Api {
    /// Prefix shared by every native symbol of the api.
    pub fn symbol_prefix(self) -> &'static str {
        match self {
            Api::Gl | Api::Gles1 | Api::Gles2 | Api::Glsc2 => "gl",
            Api::Glx => "glX",
            Api::Wgl => "wgl",
            Api::Egl => "egl",
        }
    }

    /// Prefix shared by every enumerant of the api.
    pub fn enum_prefix(self) -> &'static str {
        match self {
            Api::Gl | Api::Gles1 | Api::Gles2 | Api::Glsc2 => "GL_",
            Api::Glx => "GLX_",
            Api::Wgl => "WGL_",
            Api::Egl => "EGL_",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Api::Gl => write!(fmt, "gl"),
            Api::Glx => write!(fmt, "glx"),
            Api::Wgl => write!(fmt, "wgl"),
            Api::Egl => write!(fmt, "egl"),
            Api::Gles1 => write!(fmt, "gles1"),
            Api::Gles2 => write!(fmt, "gles2"),
            Api::Glsc2 => write!(fmt, "glsc2"),
        }
    }
}

/// A registry constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enum {
    pub ident: String,
    pub value: String,
    /// Native type token, `GLenum` unless the registry says otherwise.
    pub ty: String,
}

impl Enum {
    pub fn new(ident: &str, value: &str) -> Enum {
        Enum {
            ident: ident.to_string(),
            value: value.to_string(),
            ty: "GLenum".to_string(),
        }
    }

    pub fn with_type(mut self, ty: &str) -> Enum {
        self.ty = ty.to_string();
        self
    }
}

/// A named set of related enumerants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumGroup {
    pub name: String,
    pub members: Vec<String>,
    pub bitmask: bool,
}

impl EnumGroup {
    pub fn new(name: &str, members: &[&str]) -> EnumGroup {
        EnumGroup {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            bitmask: false,
        }
    }

    pub fn bitmask(mut self) -> EnumGroup {
        self.bitmask = true;
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.name == BOOLEAN_GROUP
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub api: Api,
    pub number: String,
    pub requires: Vec<String>,
    pub removes: Vec<String>,
}

impl Feature {
    pub fn new(name: &str, api: Api, number: &str) -> Feature {
        Feature {
            name: name.to_string(),
            api,
            number: number.to_string(),
            requires: Vec::new(),
            removes: Vec::new(),
        }
    }

    pub fn requires(mut self, commands: &[&str]) -> Feature {
        self.requires.extend(commands.iter().map(|c| c.to_string()));
        self
    }

    pub fn removes(mut self, commands: &[&str]) -> Feature {
        self.removes.extend(commands.iter().map(|c| c.to_string()));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub supported: Vec<Api>,
    pub requires: Vec<String>,
}

impl Extension {
    pub fn new(name: &str, supported: &[Api]) -> Extension {
        Extension {
            name: name.to_string(),
            supported: supported.to_vec(),
            requires: Vec::new(),
        }
    }

    pub fn requires(mut self, commands: &[&str]) -> Extension {
        self.requires.extend(commands.iter().map(|c| c.to_string()));
        self
    }
}

/// Problems found by the link pass. None of them abort linking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// `(command, declared alias)` pairs whose alias names no known command.
    pub unresolved_aliases: Vec<(String, String)>,
    /// Groups whose declared aliases loop back on themselves, in registry
    /// order. Each is still linked as one group.
    pub alias_cycles: Vec<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct Registry {
    pub api: Api,
    pub enums: Vec<Enum>,
    pub groups: BTreeMap<String, EnumGroup>,
    pub cmds: Vec<Command>,
    pub features: Vec<Feature>,
    pub extensions: Vec<Extension>,
    linked: bool,
}

impl Registry {
    pub fn new(api: Api) -> Registry {
        Registry {
            api,
            enums: Vec::new(),
            groups: BTreeMap::new(),
            cmds: Vec::new(),
            features: Vec::new(),
            extensions: Vec::new(),
            linked: false,
        }
    }

    pub fn push_enum(&mut self, enm: Enum) -> &mut Registry {
        self.enums.push(enm);
        self
    }

    pub fn push_group(&mut self, group: EnumGroup) -> &mut Registry {
        self.groups.insert(group.name.clone(), group);
        self
    }

    pub fn push_command(&mut self, cmd: Command) -> &mut Registry {
        self.cmds.push(cmd);
        self
    }

    pub fn push_feature(&mut self, feature: Feature) -> &mut Registry {
        self.features.push(feature);
        self
    }

    pub fn push_extension(&mut self, extension: Extension) -> &mut Registry {
        self.extensions.push(extension);
        self
    }

    pub fn get_command(&self, name: &str) -> Option<&Command> {
        self.cmds.iter().find(|cmd| cmd.name == name)
    }

    pub fn get_group(&self, name: &str) -> Option<&EnumGroup> {
        self.groups.get(name)
    }

    pub fn get_enum(&self, ident: &str) -> Option<&Enum> {
        self.enums.iter().find(|enm| enm.ident == ident)
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Commands bindings are generated for, in registry order.
    pub fn emitted_cmds(&self) -> impl Iterator<Item = &Command> {
        self.cmds.iter().filter(|cmd| cmd.is_emitted())
    }

    /// Resolves declared aliases into peer alias lists and records which
    /// features and extensions require or remove each command.
    ///
    /// Commands connected through declared aliases form one group, ordered
    /// root first and then by registry order. A group without a root, where
    /// the aliases form a cycle, is ordered by registry order alone. Every member receives all other
    /// members as peers in that order. Linking an already linked registry does
    /// nothing.
    pub fn link(&mut self) -> LinkReport {
        let mut report = LinkReport::default();
        if self.linked {
            return report;
        }

        let index: HashMap<String, usize> = self
            .cmds
            .iter()
            .enumerate()
            .map(|(i, cmd)| (cmd.name.clone(), i))
            .collect();

        let mut parent = vec![None; self.cmds.len()];
        for (i, cmd) in self.cmds.iter().enumerate() {
            let alias = match &cmd.alias {
                Some(alias) => alias,
                None => continue,
            };
            match index.get(alias) {
                Some(&target) if target != i => parent[i] = Some(target),
                Some(_) => debug!("`{}` declares itself as its alias", cmd.name),
                None => {
                    warn!("`{}` declares unknown alias `{}`, skipping link", cmd.name, alias);
                    report
                        .unresolved_aliases
                        .push((cmd.name.clone(), alias.clone()));
                },
            }
        }

        fn find(component: &mut [usize], mut i: usize) -> usize {
            while component[i] != i {
                component[i] = component[component[i]];
                i = component[i];
            }
            i
        }

        let mut component: Vec<usize> = (0..self.cmds.len()).collect();
        for (i, target) in parent.iter().enumerate() {
            if let Some(target) = *target {
                let (a, b) = (find(&mut component, i), find(&mut component, target));
                if a != b {
                    component[a.max(b)] = a.min(b);
                }
            }
        }

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of: HashMap<usize, usize> = HashMap::new();
        for i in 0..self.cmds.len() {
            let c = find(&mut component, i);
            let group = *group_of.entry(c).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(i);
        }
        groups.retain(|group| group.len() > 1);

        for group in &mut groups {
            match group.iter().position(|&i| parent[i].is_none()) {
                Some(root) => {
                    let root = group.remove(root);
                    group.insert(0, root);
                },
                None => {
                    let names: Vec<String> = group.iter().map(|&i| self.cmds[i].name.clone()).collect();
                    warn!("alias cycle between {}, linking as one group", names.join(", "));
                    report.alias_cycles.push(names);
                },
            }
        }

        for group in &groups {
            for &member in group {
                for &peer in group {
                    if peer == member {
                        continue;
                    }
                    let peer_name = self.cmds[peer].name.clone();
                    let aliases = &mut self.cmds[member].aliases;
                    if !aliases.contains(&peer_name) {
                        aliases.push(peer_name);
                    }
                }
            }
        }

        let api = self.api;
        for feature in self.features.iter().filter(|f| f.api == api) {
            for name in &feature.requires {
                match index.get(name) {
                    Some(&i) => self.cmds[i].required_by.push(feature.name.clone()),
                    None => debug!("`{}` requires unknown command `{}`", feature.name, name),
                }
            }
            for name in &feature.removes {
                match index.get(name) {
                    Some(&i) => self.cmds[i].removed_by.push(feature.name.clone()),
                    None => debug!("`{}` removes unknown command `{}`", feature.name, name),
                }
            }
        }

        for extension in self
            .extensions
            .iter()
            .filter(|e| e.supported.contains(&api))
        {
            for name in &extension.requires {
                match index.get(name) {
                    Some(&i) => self.cmds[i].required_by.push(extension.name.clone()),
                    None => debug!("`{}` requires unknown command `{}`", extension.name, name),
                }
            }
        }

        self.linked = true;
        report
    }
}
