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

use once_cell::sync::Lazy;
use regex::Regex;

static ARRAY_DECLARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static CONSTANT_LEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static PARAM_LEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());
static MULTIPLE_LEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*\*\s*(\d+)$").unwrap());

/// A C declaration reduced to its base token, pointee constness and
/// pointer depth.
///
/// Array declarators count as one level of indirection, so `GLfloat[4]` and
/// `GLfloat *` both canonicalize to `GLfloat*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeType {
    pub base: String,
    pub is_const: bool,
    pub pointers: usize,
}

impl NativeType {
    pub fn parse(decl: &str) -> NativeType {
        let normalized = ARRAY_DECLARATOR.replace_all(decl, "*");
        let mut base = Vec::new();
        let mut is_const = false;
        let mut pointers = 0;
        let mut word = String::new();

        for c in normalized.chars().chain(Some(' ')) {
            if c.is_whitespace() || c == '*' {
                match &word[..] {
                    "" | "struct" => {},
                    // only a qualifier ahead of the first `*` applies to the pointee
                    "const" => is_const |= pointers == 0,
                    _ => base.push(word.clone()),
                }
                word.clear();
                if c == '*' {
                    pointers += 1;
                }
            } else {
                word.push(c);
            }
        }

        NativeType {
            base: base.join(" "),
            is_const,
            pointers,
        }
    }

    /// The `TypeMap` lookup token, e.g. `GLuint*`.
    pub fn canonical(&self) -> String {
        let mut token = self.base.clone();
        for _ in 0..self.pointers {
            token.push('*');
        }
        token
    }

    pub fn is_pointer(&self) -> bool {
        self.pointers > 0
    }

    pub fn is_void(&self) -> bool {
        self.pointers == 0 && is_void_token(&self.base)
    }

    /// True for `void *` and `GLvoid *`.
    pub fn is_opaque_pointer(&self) -> bool {
        self.pointers == 1 && is_void_token(&self.base)
    }
}

fn is_void_token(token: &str) -> bool {
    token == "void" || token == "GLvoid"
}

/// Classification of a parameter's `len` annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Length {
    None,
    Constant(usize),
    /// Element count carried by a sibling parameter.
    Param(String),
    /// `sibling*k`: the sibling counts groups of `k` elements.
    Multiple(String, usize),
    /// Anything else, `COMPSIZE(...)` included.
    Complex(String),
}

impl Length {
    pub fn parse(len: &str) -> Length {
        let len = len.trim();
        if len.is_empty() {
            return Length::None;
        }
        if CONSTANT_LEN.is_match(len) {
            if let Ok(n) = len.parse() {
                return Length::Constant(n);
            }
        }
        if PARAM_LEN.is_match(len) {
            return Length::Param(len.to_string());
        }
        if let Some(caps) = MULTIPLE_LEN.captures(len) {
            if let Ok(k) = caps[2].parse() {
                return Length::Multiple(caps[1].to_string(), k);
            }
        }
        Length::Complex(len.to_string())
    }

    /// The sibling parameter this length refers to, if any.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Length::Param(name) | Length::Multiple(name, _) => Some(name),
            _ => None,
        }
    }
}

/// One parameter of a native command prototype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandParameter {
    pub name: String,
    pub ty: NativeType,
    /// Enumeration group the value belongs to, independent of its native type.
    pub group: Option<String>,
    pub len: Option<String>,
}

impl CommandParameter {
    pub fn new(name: &str, decl: &str) -> CommandParameter {
        CommandParameter {
            name: name.to_string(),
            ty: NativeType::parse(decl),
            group: None,
            len: None,
        }
    }

    pub fn with_group(mut self, group: &str) -> CommandParameter {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_len(mut self, len: &str) -> CommandParameter {
        self.len = Some(len.to_string());
        self
    }

    pub fn length(&self) -> Length {
        self.len.as_deref().map_or(Length::None, Length::parse)
    }
}
