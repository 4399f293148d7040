//! Drawing file model.
//!
//! [`Drawing`] is the serde view of a [`MemoryDocument`]: layers with their
//! lock state and containers with their elements, each element tagged with
//! its layer. In TOML it reads:
//!
//! ```toml
//! [layers]
//! frame = { locked = true }
//!
//! [[containers."*Model_Space"]]
//! layer = "frame"
//! kind = "line"
//! start = [0.0, 0.0, 5.0]
//! end = [10.0, 0.0, 5.0]
//! ```
//!
//! Omitted `root` defaults to model space and omitted `layer` to `"0"`.
//! A `kind` with no dedicated element variant is loaded as
//! [`Element::Opaque`] with its other fields kept, and written back the same
//! way.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use planar_core::{element::Element, identifier::Id};

use crate::{
    host::{Document, HostError},
    memory::{DEFAULT_LAYER, MODEL_SPACE, MemoryDocument},
};

/// Serializable contents of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Top-level container.
    #[serde(default = "default_root")]
    root: Id,

    #[serde(default)]
    layers: IndexMap<Id, LayerEntry>,

    #[serde(default)]
    containers: IndexMap<Id, Vec<ElementEntry>>,
}

/// Lock state of one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    #[serde(default)]
    locked: bool,
}

/// One element together with its layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEntry {
    layer: Id,
    element: Element,
}

impl Serialize for ElementEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut table = toml::Table::new();
        table.insert("layer".to_string(), toml::Value::String(self.layer.name()));

        match &self.element {
            Element::Opaque {
                class_name,
                properties,
            } => {
                table.insert("kind".to_string(), toml::Value::String(class_name.clone()));
                for (key, value) in properties {
                    table.insert(key.clone(), value.clone());
                }
            }
            element => match toml::Value::try_from(element).map_err(ser::Error::custom)? {
                toml::Value::Table(fields) => {
                    for (key, value) in fields {
                        table.insert(key, value);
                    }
                }
                _ => return Err(ser::Error::custom("element is not a table")),
            },
        }

        table.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElementEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = toml::Table::deserialize(deserializer)?;

        let layer = match fields.remove("layer") {
            Some(value) => value.try_into::<Id>().map_err(de::Error::custom)?,
            None => default_layer(),
        };
        let kind = match fields.get("kind") {
            Some(toml::Value::String(kind)) => kind.clone(),
            Some(_) => return Err(de::Error::custom("element `kind` must be a string")),
            None => return Err(de::Error::missing_field("kind")),
        };

        let element = if Element::is_known_kind(&kind) {
            toml::Value::Table(fields)
                .try_into()
                .map_err(de::Error::custom)?
        } else {
            fields.remove("kind");
            debug!(kind = kind.as_str(); "Loading element of unknown kind as opaque");
            Element::Opaque {
                class_name: kind,
                properties: fields,
            }
        };

        Ok(Self { layer, element })
    }
}

fn default_root() -> Id {
    Id::new(MODEL_SPACE)
}

fn default_layer() -> Id {
    Id::new(DEFAULT_LAYER)
}

impl Drawing {
    /// Builds a host document from this drawing.
    ///
    /// Layers referenced by elements but not declared are created unlocked.
    /// Containers are created in declaration order; the root container always
    /// exists. Block references to undeclared containers are kept as is and
    /// only fail when a recursive flatten tries to enter them.
    ///
    /// # Errors
    ///
    /// Returns the host error if an element cannot be stored.
    pub fn into_document(self) -> Result<MemoryDocument, HostError> {
        let mut document = MemoryDocument::new(self.root);

        for (layer, entry) in &self.layers {
            document.add_layer(*layer, entry.locked);
        }
        for container in self.containers.keys() {
            document.add_container(*container);
        }

        let mut count = 0usize;
        for (container, entries) in self.containers {
            for entry in entries {
                if document.is_layer_locked(entry.layer).is_err() {
                    warn!(layer:% = entry.layer; "Undeclared layer, creating it unlocked");
                    document.add_layer(entry.layer, false);
                }
                document.push_element(container, entry.layer, entry.element)?;
                count += 1;
            }
        }

        debug!(elements = count, root:% = self.root; "Drawing loaded");
        Ok(document)
    }

    /// Captures the current contents of a document.
    ///
    /// # Errors
    ///
    /// Returns the host error if a member cannot be read back.
    pub fn from_document(document: &MemoryDocument) -> Result<Self, HostError> {
        let layers = document
            .layers()
            .map(|(layer, locked)| (layer, LayerEntry { locked }))
            .collect();

        let mut containers = IndexMap::new();
        for container in document.containers() {
            let entries = document
                .members(container)?
                .into_iter()
                .map(|id| {
                    Ok(ElementEntry {
                        layer: document.layer_of(id)?,
                        element: document.element(id)?,
                    })
                })
                .collect::<Result<Vec<_>, HostError>>()?;
            containers.insert(container, entries);
        }

        Ok(Self {
            root: document.root(),
            layers,
            containers,
        })
    }

    /// The container a flatten run starts from.
    pub fn root(&self) -> Id {
        self.root
    }

    /// Total number of elements across all containers.
    pub fn element_count(&self) -> usize {
        self.containers.values().map(Vec::len).sum()
    }
}
