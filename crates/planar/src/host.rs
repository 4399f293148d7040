//! The host document interface.
//!
//! The flattening engine never owns drawing data. It talks to the host's
//! document model through [`Document`], which covers exactly what a flatten
//! session needs: enumerating containers, reading and writing elements,
//! toggling layer locks and bracketing the work in a transaction.
//!
//! [`crate::memory::MemoryDocument`] is the in-process implementation used by
//! the CLI and the tests.

use std::fmt;

use thiserror::Error;

use planar_core::{element::Element, identifier::Id};

/// Opaque handle of one element inside a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Creates a handle from the host's raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the host's raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A read or write rejected by the host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("container `{0}` does not exist")]
    MissingContainer(Id),

    #[error("element {0} does not exist")]
    MissingElement(ElementId),

    #[error("layer `{0}` does not exist")]
    MissingLayer(Id),

    #[error("element {element} is on locked layer `{layer}`")]
    LayerLocked { element: ElementId, layer: Id },

    #[error("a transaction is already active")]
    TransactionActive,

    #[error("no transaction is active")]
    NoTransaction,

    #[error("{0}")]
    Rejected(String),
}

/// Access to a host drawing database.
///
/// Reads return owned copies; a flatten rule works on the copy and the engine
/// calls [`Document::write_element`] only when the rule reports a change.
pub trait Document {
    /// Returns the name of the top-level container (model space).
    fn root(&self) -> Id;

    /// Lists the members of `container` in host order.
    fn members(&self, container: Id) -> Result<Vec<ElementId>, HostError>;

    /// Reads a copy of an element.
    fn element(&self, id: ElementId) -> Result<Element, HostError>;

    /// Replaces an element's fields.
    ///
    /// Hosts reject writes to elements on locked layers with
    /// [`HostError::LayerLocked`].
    fn write_element(&mut self, id: ElementId, element: Element) -> Result<(), HostError>;

    /// Returns the layer an element is drawn on.
    fn layer_of(&self, id: ElementId) -> Result<Id, HostError>;

    fn is_layer_locked(&self, layer: Id) -> Result<bool, HostError>;

    fn set_layer_locked(&mut self, layer: Id, locked: bool) -> Result<(), HostError>;

    /// Opens a mutation scope. Only one scope may be open at a time.
    fn begin_transaction(&mut self) -> Result<(), HostError>;

    /// Makes every write since [`Document::begin_transaction`] permanent.
    fn commit_transaction(&mut self) -> Result<(), HostError>;

    /// Discards every write since [`Document::begin_transaction`].
    ///
    /// Aborting without an open scope does nothing.
    fn abort_transaction(&mut self);
}
