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

//! Flat view over the small xml documents the generator tables load from.

use std::io::Read;

use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

use crate::Error;

/// A start tag together with its nesting depth (the root element is 0).
pub(crate) struct Element {
    pub depth: usize,
    pub name: String,
    attributes: Vec<OwnedAttribute>,
}

impl Element {
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.local_name == attribute)
            .map(|attr| attr.value.as_str())
    }

    pub fn require(&self, element: &'static str, attribute: &'static str) -> Result<&str, Error> {
        self.get(attribute)
            .ok_or(Error::MissingAttribute { element, attribute })
    }
}

/// Reads every start tag of a document, in document order.
pub(crate) fn elements<R: Read>(reader: R) -> Result<Vec<Element>, Error> {
    let mut elements = Vec::new();
    let mut depth = 0;
    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                elements.push(Element {
                    depth,
                    name: name.local_name,
                    attributes,
                });
                depth += 1;
            },
            XmlEvent::EndElement { .. } => depth -= 1,
            _ => {},
        }
    }
    Ok(elements)
}
