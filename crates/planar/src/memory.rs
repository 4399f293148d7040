//! In-memory host document.
//!
//! [`MemoryDocument`] implements [`Document`] over plain collections. It
//! behaves like a strict CAD database: writes to elements on locked layers
//! are rejected, and an aborted transaction restores the element and layer
//! state captured when it began.

use indexmap::IndexMap;
use log::{debug, trace};

use planar_core::{element::Element, identifier::Id};

use crate::host::{Document, ElementId, HostError};

/// Name of the layer every drawing starts with.
pub const DEFAULT_LAYER: &str = "0";

/// Name of the default top-level container.
pub const MODEL_SPACE: &str = "*Model_Space";

#[derive(Debug, Clone, PartialEq)]
struct Record {
    layer: Id,
    element: Element,
}

#[derive(Debug, Clone)]
struct Snapshot {
    layers: IndexMap<Id, bool>,
    records: Vec<Record>,
}

/// A drawing database held entirely in memory.
///
/// # Examples
///
/// ```
/// use planar::{
///     host::Document,
///     memory::MemoryDocument,
///     element::Element,
///     geometry::Point3,
///     identifier::Id,
/// };
///
/// let mut document = MemoryDocument::default().with_layer(Id::new("frame"), true);
/// let root = document.root();
/// let id = document
///     .push_element(root, Id::new("frame"), Element::Point { position: Point3::new(1.0, 2.0, 3.0) })
///     .expect("root and layer exist");
///
/// assert_eq!(document.members(root).unwrap(), vec![id]);
/// assert_eq!(document.is_layer_locked(Id::new("frame")), Ok(true));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    root: Id,
    layers: IndexMap<Id, bool>,
    containers: IndexMap<Id, Vec<ElementId>>,
    records: Vec<Record>,
    snapshot: Option<Snapshot>,
    write_count: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new(Id::new(MODEL_SPACE))
    }
}

impl MemoryDocument {
    /// Creates an empty document whose top-level container is `root`.
    ///
    /// The root container and the unlocked default layer `"0"` always exist.
    pub fn new(root: Id) -> Self {
        let mut layers = IndexMap::new();
        layers.insert(Id::new(DEFAULT_LAYER), false);
        let mut containers = IndexMap::new();
        containers.insert(root, Vec::new());

        Self {
            root,
            layers,
            containers,
            records: Vec::new(),
            snapshot: None,
            write_count: 0,
        }
    }

    /// Adds (or re-locks) a layer (builder style).
    pub fn with_layer(mut self, layer: Id, locked: bool) -> Self {
        self.add_layer(layer, locked);
        self
    }

    /// Adds an empty container (builder style).
    pub fn with_container(mut self, container: Id) -> Self {
        self.add_container(container);
        self
    }

    /// Adds a layer, or updates the lock of an existing one.
    pub fn add_layer(&mut self, layer: Id, locked: bool) {
        self.layers.insert(layer, locked);
    }

    /// Adds an empty container if it does not exist yet.
    pub fn add_container(&mut self, container: Id) {
        self.containers.entry(container).or_default();
    }

    /// Appends an element to a container.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingContainer`] or [`HostError::MissingLayer`]
    /// when either name is unknown.
    pub fn push_element(
        &mut self,
        container: Id,
        layer: Id,
        element: Element,
    ) -> Result<ElementId, HostError> {
        if !self.layers.contains_key(&layer) {
            return Err(HostError::MissingLayer(layer));
        }
        let members = self
            .containers
            .get_mut(&container)
            .ok_or(HostError::MissingContainer(container))?;

        let id = ElementId::new(self.records.len());
        self.records.push(Record { layer, element });
        members.push(id);
        Ok(id)
    }

    /// Iterates over layers and their lock state in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = (Id, bool)> + '_ {
        self.layers.iter().map(|(layer, locked)| (*layer, *locked))
    }

    /// Iterates over container names in insertion order.
    pub fn containers(&self) -> impl Iterator<Item = Id> + '_ {
        self.containers.keys().copied()
    }

    /// Returns the element stored under `id`, if any.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.records.get(id.index()).map(|record| &record.element)
    }

    /// Returns every element in storage order, for comparing document state.
    pub fn elements(&self) -> Vec<Element> {
        self.records
            .iter()
            .map(|record| record.element.clone())
            .collect()
    }

    /// Number of successful [`Document::write_element`] calls so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Returns `true` while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    fn record(&self, id: ElementId) -> Result<&Record, HostError> {
        self.records
            .get(id.index())
            .ok_or(HostError::MissingElement(id))
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> Id {
        self.root
    }

    fn members(&self, container: Id) -> Result<Vec<ElementId>, HostError> {
        self.containers
            .get(&container)
            .cloned()
            .ok_or(HostError::MissingContainer(container))
    }

    fn element(&self, id: ElementId) -> Result<Element, HostError> {
        self.record(id).map(|record| record.element.clone())
    }

    fn write_element(&mut self, id: ElementId, element: Element) -> Result<(), HostError> {
        let layer = self.record(id)?.layer;
        if self.is_layer_locked(layer)? {
            return Err(HostError::LayerLocked { element: id, layer });
        }

        trace!(element:% = id; "Writing element");
        self.records[id.index()].element = element;
        self.write_count += 1;
        Ok(())
    }

    fn layer_of(&self, id: ElementId) -> Result<Id, HostError> {
        self.record(id).map(|record| record.layer)
    }

    fn is_layer_locked(&self, layer: Id) -> Result<bool, HostError> {
        self.layers
            .get(&layer)
            .copied()
            .ok_or(HostError::MissingLayer(layer))
    }

    fn set_layer_locked(&mut self, layer: Id, locked: bool) -> Result<(), HostError> {
        let slot = self
            .layers
            .get_mut(&layer)
            .ok_or(HostError::MissingLayer(layer))?;
        *slot = locked;
        Ok(())
    }

    fn begin_transaction(&mut self) -> Result<(), HostError> {
        if self.snapshot.is_some() {
            return Err(HostError::TransactionActive);
        }

        debug!("Beginning transaction");
        self.snapshot = Some(Snapshot {
            layers: self.layers.clone(),
            records: self.records.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<(), HostError> {
        if self.snapshot.take().is_none() {
            return Err(HostError::NoTransaction);
        }

        debug!("Committed transaction");
        Ok(())
    }

    fn abort_transaction(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            debug!("Aborting transaction");
            self.layers = snapshot.layers;
            self.records = snapshot.records;
        }
    }
}
