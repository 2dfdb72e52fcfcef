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

use super::{Api, CommandParameter, NativeType};

/// Return type of a command prototype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnType {
    pub ty: NativeType,
    pub group: Option<String>,
}

impl ReturnType {
    pub fn new(decl: &str) -> ReturnType {
        ReturnType {
            ty: NativeType::parse(decl),
            group: None,
        }
    }

    pub fn void() -> ReturnType {
        ReturnType::new("void")
    }

    pub fn with_group(mut self, group: &str) -> ReturnType {
        self.group = Some(group.to_string());
        self
    }

    pub fn is_void(&self) -> bool {
        self.ty.is_void()
    }
}

/// A native command: one prototype plus the links established by
/// `Registry::link`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// Native symbol, e.g. `glGenTextures`. Unique within a registry.
    pub name: String,
    pub proto: ReturnType,
    pub params: Vec<CommandParameter>,
    /// Declared `alias` of this command, if it is a pure rename.
    pub alias: Option<String>,
    pub vecequiv: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) required_by: Vec<String>,
    pub(crate) removed_by: Vec<String>,
}

impl Command {
    pub fn new(name: &str, proto: ReturnType) -> Command {
        Command {
            name: name.to_string(),
            proto,
            params: Vec::new(),
            alias: None,
            vecequiv: None,
            aliases: Vec::new(),
            required_by: Vec::new(),
            removed_by: Vec::new(),
        }
    }

    pub fn param(mut self, param: CommandParameter) -> Command {
        self.params.push(param);
        self
    }

    pub fn alias_of(mut self, name: &str) -> Command {
        self.alias = Some(name.to_string());
        self
    }

    pub fn vector_equivalent(mut self, name: &str) -> Command {
        self.vecequiv = Some(name.to_string());
        self
    }

    /// Peer aliases in link order, which is also the runtime probe order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn required_by(&self) -> &[String] {
        &self.required_by
    }

    pub fn removed_by(&self) -> &[String] {
        &self.removed_by
    }

    /// Whether bindings are generated for this command.
    pub fn is_emitted(&self) -> bool {
        !self.required_by.is_empty() && self.removed_by.is_empty()
    }

    /// The native name without its api prefix: `glGenTextures` gives
    /// `GenTextures`.
    pub fn impl_name(&self, api: Api) -> &str {
        self.name
            .strip_prefix(api.symbol_prefix())
            .filter(|rest| !rest.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

/// Read-back commands retrieve information into caller-supplied storage.
pub fn is_read_back(impl_name: &str) -> bool {
    ["Get", "Is", "Are"].iter().any(|verb| {
        impl_name
            .strip_prefix(verb)
            .and_then(|rest| rest.chars().next())
            .map_or(false, |c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}
