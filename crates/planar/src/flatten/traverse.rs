//! Depth-first walk over a container hierarchy.

use std::fmt;

use indexmap::IndexSet;
use log::{debug, trace, warn};

use planar_core::identifier::Id;

use super::{
    dispatch::{FlattenOutcome, flatten_element},
    lock::LockGuard,
};
use crate::host::{Document, ElementId, HostError};

/// Running totals of one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    examined: u64,
    changed: u64,
}

impl Counters {
    /// Elements visited, including block references and unknown kinds.
    pub fn examined(&self) -> u64 {
        self.examined
    }

    /// Elements whose depth-bearing fields were rewritten.
    pub fn changed(&self) -> u64 {
        self.changed
    }
}

/// A non-fatal condition met during a traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The element's kind has no flattening rule; it was left as is.
    UnrecognizedKind {
        element: ElementId,
        class_name: String,
    },
    /// A block reference points at a container already being walked.
    ///
    /// `path` lists the containers from the root down to the one holding the
    /// reference.
    CycleRefused {
        element: ElementId,
        container: Id,
        path: Vec<Id>,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedKind {
                element,
                class_name,
            } => write!(f, "element {element}: no flattening rule for `{class_name}`"),
            Self::CycleRefused {
                element,
                container,
                path,
            } => {
                write!(f, "element {element}: not entering `{container}` again (")?;
                for id in path {
                    write!(f, "{id} -> ")?;
                }
                write!(f, "{container})")
            }
        }
    }
}

/// Walks containers, flattening members and counting them.
///
/// With `recurse` set, block references are followed into the containers they
/// insert and members on locked layers are flattened too. Without it only the
/// given container's own members on unlocked layers are touched. Every member
/// is counted as examined either way.
#[derive(Debug)]
pub struct ContainerTraverser {
    recurse: bool,
    path: IndexSet<Id>,
    counters: Counters,
    notices: Vec<Notice>,
}

impl ContainerTraverser {
    /// Creates a traverser with zeroed counters.
    pub fn new(recurse: bool) -> Self {
        Self {
            recurse,
            path: IndexSet::new(),
            counters: Counters::default(),
            notices: Vec::new(),
        }
    }

    /// Totals accumulated so far.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Notices recorded so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Consumes the traverser, returning its totals and notices.
    pub fn finish(self) -> (Counters, Vec<Notice>) {
        (self.counters, self.notices)
    }

    /// Visits every member of `container`.
    ///
    /// Counts from nested containers add to the same totals.
    ///
    /// # Errors
    ///
    /// Returns the first host error met. Layers unlocked for the failing visit
    /// are locked again before this returns; element writes already made are
    /// left for the caller's transaction to discard.
    pub fn traverse<D>(&mut self, document: &mut D, container: Id) -> Result<(), HostError>
    where
        D: Document + ?Sized,
    {
        self.path.insert(container);
        debug!(container:% = container, depth = self.path.len(); "Entering container");

        let result = self.visit_members(document, container);

        self.path.pop();
        result
    }

    fn visit_members<D>(&mut self, document: &mut D, container: Id) -> Result<(), HostError>
    where
        D: Document + ?Sized,
    {
        for id in document.members(container)? {
            self.visit(document, id)?;
        }
        Ok(())
    }

    fn visit<D>(&mut self, document: &mut D, id: ElementId) -> Result<(), HostError>
    where
        D: Document + ?Sized,
    {
        let layer = document.layer_of(id)?;
        let mut guard = LockGuard::acquire(document, layer)?;
        let mut element = guard.element(id)?;

        if self.recurse {
            if let Some(block) = element.referenced_block() {
                self.descend(&mut *guard, id, block)?;
            }
        }

        if self.recurse || !guard.was_locked() {
            match flatten_element(&mut element) {
                FlattenOutcome::Changed => {
                    guard.write_element(id, element)?;
                    self.counters.changed += 1;
                    trace!(element:% = id, layer:% = layer; "Flattened element");
                }
                FlattenOutcome::Unchanged => {
                    trace!(element:% = id; "Element already planar");
                }
                FlattenOutcome::Unrecognized => {
                    self.notices.push(Notice::UnrecognizedKind {
                        element: id,
                        class_name: element.kind_name().to_string(),
                    });
                }
            }
        } else {
            trace!(element:% = id, layer:% = layer; "Skipping element on locked layer");
        }

        self.counters.examined += 1;
        guard.release()
    }

    fn descend<D>(&mut self, document: &mut D, id: ElementId, block: Id) -> Result<(), HostError>
    where
        D: Document + ?Sized,
    {
        if self.path.contains(&block) {
            warn!(element:% = id, container:% = block; "Refusing to re-enter container on the current path");
            self.notices.push(Notice::CycleRefused {
                element: id,
                container: block,
                path: self.path.iter().copied().collect(),
            });
            return Ok(());
        }

        self.traverse(document, block)
    }
}
