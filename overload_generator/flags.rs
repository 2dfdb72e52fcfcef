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

//! Per-command overrides, matched by regular expression against the native
//! command name.

use std::io::Read;
use std::str::FromStr;

use bitflags::bitflags;
use regex::Regex;

use crate::document;
use crate::Error;

bitflags! {
    /// Behavioral switches for one command.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u32 {
        /// Generate nothing for the command.
        const DISABLE = 1 << 0;
        /// Skip the post-call error check.
        const NO_ERROR_CHECK = 1 << 1;
        /// Synthesize single-element output overloads for array parameters
        /// whose length is not `1`.
        const OUT_PARAM = 1 << 2;
        /// Keep the plain overload even when strongly typed parameters exist.
        const FORCE_PLAIN = 1 << 3;
    }
}

impl FromStr for CommandFlags {
    type Err = Error;

    /// Parses a list of flag names separated by whitespace, `,` or `|`.
    fn from_str(s: &str) -> Result<CommandFlags, Error> {
        s.split(|c: char| c.is_whitespace() || c == ',' || c == '|')
            .filter(|name| !name.is_empty())
            .try_fold(CommandFlags::empty(), |flags, name| {
                let flag = match name {
                    "disable" => CommandFlags::DISABLE,
                    "no-error-check" => CommandFlags::NO_ERROR_CHECK,
                    "out-param" => CommandFlags::OUT_PARAM,
                    "force-plain" => CommandFlags::FORCE_PLAIN,
                    _ => return Err(Error::UnknownFlag(name.to_string())),
                };
                Ok(flags | flag)
            })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Default for Visibility {
    fn default() -> Visibility {
        Visibility::Public
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Visibility, Error> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(Error::UnknownVisibility(s.to_string())),
        }
    }
}

/// How a single-element pointer parameter is exposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamModifier {
    /// Mutable reference the command writes through.
    Out,
    /// Shared reference the command reads through.
    Ref,
}

impl FromStr for ParamModifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<ParamModifier, Error> {
        match s {
            "out" => Ok(ParamModifier::Out),
            "ref" => Ok(ParamModifier::Ref),
            _ => Err(Error::UnknownModifier(s.to_string())),
        }
    }
}

/// Override for one parameter, selected by name or by zero-based position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterOverride {
    pub name: Option<String>,
    pub index: Option<usize>,
    pub rename: Option<String>,
    /// Full native declaration replacing the registry one.
    pub retype: Option<String>,
    pub modifier: Option<ParamModifier>,
}

impl ParameterOverride {
    pub fn named(name: &str) -> ParameterOverride {
        ParameterOverride {
            name: Some(name.to_string()),
            ..ParameterOverride::default()
        }
    }

    pub fn at(index: usize) -> ParameterOverride {
        ParameterOverride {
            index: Some(index),
            ..ParameterOverride::default()
        }
    }

    pub fn renamed(mut self, name: &str) -> ParameterOverride {
        self.rename = Some(name.to_string());
        self
    }

    pub fn retyped(mut self, decl: &str) -> ParameterOverride {
        self.retype = Some(decl.to_string());
        self
    }

    pub fn modifier(mut self, modifier: ParamModifier) -> ParameterOverride {
        self.modifier = Some(modifier);
        self
    }
}

/// One row of the override table.
#[derive(Clone, Debug)]
pub struct CommandOverride {
    pattern: Regex,
    pub flags: CommandFlags,
    pub rename: Option<String>,
    pub visibility: Option<Visibility>,
    pub params: Vec<ParameterOverride>,
}

impl CommandOverride {
    /// A row applying to every command whose full name matches `pattern`.
    pub fn new(pattern: &str) -> Result<CommandOverride, Error> {
        let anchored = format!("^(?:{})$", pattern);
        let pattern = Regex::new(&anchored).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(CommandOverride {
            pattern,
            flags: CommandFlags::empty(),
            rename: None,
            visibility: None,
            params: Vec::new(),
        })
    }

    pub fn with_flags(mut self, flags: CommandFlags) -> CommandOverride {
        self.flags |= flags;
        self
    }

    pub fn renamed(mut self, name: &str) -> CommandOverride {
        self.rename = Some(name.to_string());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> CommandOverride {
        self.visibility = Some(visibility);
        self
    }

    pub fn param(mut self, param: ParameterOverride) -> CommandOverride {
        self.params.push(param);
        self
    }

    pub fn matches(&self, command: &str) -> bool {
        self.pattern.is_match(command)
    }
}

/// Ordered override table. The first row matching a command is the only row
/// consulted for it, so rows must stay in the order they were loaded.
#[derive(Clone, Debug, Default)]
pub struct CommandFlagsDatabase {
    rows: Vec<CommandOverride>,
}

impl CommandFlagsDatabase {
    pub fn new() -> CommandFlagsDatabase {
        CommandFlagsDatabase::default()
    }

    /// Loads a `<commandflags>` document:
    ///
    /// ```xml
    /// <commandflags>
    ///     <command name="glGetIntegerv" flags="out-param" rename="GetInteger">
    ///         <param name="data" modifier="out"/>
    ///     </command>
    ///     <command name="gl(Begin|End)" visibility="private"/>
    /// </commandflags>
    /// ```
    pub fn from_xml<R: Read>(reader: R) -> Result<CommandFlagsDatabase, Error> {
        let mut db = CommandFlagsDatabase::new();
        for element in document::elements(reader)? {
            match &element.name[..] {
                "command" => {
                    let mut row = CommandOverride::new(element.require("command", "name")?)?;
                    if let Some(flags) = element.get("flags") {
                        row.flags = flags.parse()?;
                    }
                    row.rename = element.get("rename").map(str::to_string);
                    if let Some(visibility) = element.get("visibility") {
                        row.visibility = Some(visibility.parse()?);
                    }
                    db.push(row);
                },
                "param" => {
                    let param = ParameterOverride {
                        name: element.get("name").map(str::to_string),
                        index: match element.get("index") {
                            Some(index) => Some(
                                index
                                    .parse()
                                    .map_err(|_| Error::InvalidIndex(index.to_string()))?,
                            ),
                            None => None,
                        },
                        rename: element.get("rename").map(str::to_string),
                        retype: element.get("type").map(str::to_string),
                        modifier: match element.get("modifier") {
                            Some(modifier) => Some(modifier.parse()?),
                            None => None,
                        },
                    };
                    match db.rows.last_mut() {
                        Some(row) if element.depth > 1 => row.params.push(param),
                        _ => warn!("`<param>` outside of a `<command>`, ignoring"),
                    }
                },
                _ => {},
            }
        }
        Ok(db)
    }

    pub fn push(&mut self, row: CommandOverride) -> &mut CommandFlagsDatabase {
        self.rows.push(row);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row whose pattern matches `command`.
    pub fn find(&self, command: &str) -> Option<&CommandOverride> {
        self.rows.iter().find(|row| row.matches(command))
    }

    pub fn flags(&self, command: &str) -> CommandFlags {
        self.find(command).map_or(CommandFlags::empty(), |row| row.flags)
    }

    pub fn rename(&self, command: &str) -> Option<&str> {
        self.find(command).and_then(|row| row.rename.as_deref())
    }

    pub fn visibility(&self, command: &str) -> Visibility {
        self.find(command)
            .and_then(|row| row.visibility)
            .unwrap_or_default()
    }

    /// Override for the parameter `name` at `index`. A match by name takes
    /// precedence over a match by position.
    pub fn parameter(&self, command: &str, name: &str, index: usize) -> Option<&ParameterOverride> {
        let row = self.find(command)?;
        row.params
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .or_else(|| row.params.iter().find(|p| p.index == Some(index)))
    }
}
