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

use std::io;

use thiserror::Error;

/// Errors raised while loading generator tables or synthesizing overloads.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] io::Error),

    #[error("malformed xml document")]
    Xml(#[from] xml::reader::Error),

    #[error("invalid command pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown command flag `{0}`")]
    UnknownFlag(String),

    #[error("unknown parameter modifier `{0}`")]
    UnknownModifier(String),

    #[error("unknown visibility `{0}`")]
    UnknownVisibility(String),

    #[error("`<{element}>` is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("`{0}` is not a valid parameter index")]
    InvalidIndex(String),

    /// Overloads can only be synthesized once aliases and feature
    /// requirements have been resolved.
    #[error("the registry must be linked before generating overloads")]
    NotLinked,

    /// A generator-style command (`glGen*`, `glCreate*`) must produce exactly
    /// one array whose length is carried by a sibling parameter.
    #[error("`{command}` has {count} length-correlated output arrays, expected exactly one")]
    ConvenienceShape { command: String, count: usize },
}
