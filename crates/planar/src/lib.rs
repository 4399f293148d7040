//! Planar - flattens CAD drawings onto the `Z = 0` plane.
//!
//! Every element whose depth-bearing fields sit off the plane by more than
//! [`geometry::TOLERANCE`] is rewritten with those fields zeroed; elements
//! already planar are left untouched and are not counted as changed. A run
//! can optionally descend into block definitions and into elements on locked
//! layers, and is always committed or rolled back as a whole.
//!
//! The engine works against any host implementing [`host::Document`];
//! [`memory::MemoryDocument`] is the in-process host, loadable from a
//! [`drawing::Drawing`] file.

pub mod config;
pub mod drawing;
pub mod flatten;
pub mod host;
pub mod memory;

mod error;

pub use planar_core::{element, geometry, identifier};

pub use error::{PlanarError, TransactionFailure, TransactionStage};

use log::{debug, info};

use config::AppConfig;
use flatten::{FlattenSession, FlattenSummary};
use host::Document;
use identifier::Id;

/// Entry point for flattening documents with a given configuration.
///
/// # Examples
///
/// ```rust
/// use planar::{
///     Flattener,
///     element::Element,
///     geometry::Point3,
///     host::Document,
///     identifier::Id,
///     memory::MemoryDocument,
/// };
///
/// let mut document = MemoryDocument::default();
/// let root = document.root();
/// document
///     .push_element(
///         root,
///         Id::new("0"),
///         Element::Circle { center: Point3::new(0.0, 0.0, 2.0), radius: 1.0 },
///     )
///     .unwrap();
///
/// let flattener = Flattener::default();
/// let summary = flattener.flatten(&mut document, false).expect("flatten succeeds");
///
/// assert_eq!(summary.examined(), 1);
/// assert_eq!(summary.changed(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Flattener {
    config: AppConfig,
}

impl Flattener {
    /// Create a new flattener with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Flatten a document in one transaction.
    ///
    /// Starts from the configured root container, or from the document's
    /// model space when none is configured.
    ///
    /// # Arguments
    ///
    /// * `document` - Host document to modify
    /// * `recurse` - Descend into blocks and flatten locked-layer members
    ///
    /// # Errors
    ///
    /// Returns [`PlanarError::Transaction`] when the session was rolled back.
    pub fn flatten<D>(&self, document: &mut D, recurse: bool) -> Result<FlattenSummary, PlanarError>
    where
        D: Document + ?Sized,
    {
        let root = self.root_of(document);
        info!(root:% = root, recurse = recurse; "Flattening document");

        let summary = FlattenSession::new(recurse).run(document, root)?;
        for notice in summary.notices() {
            debug!(notice:% = notice; "Flatten notice");
        }

        Ok(summary)
    }

    /// Count the members of the root container without modifying anything.
    ///
    /// # Errors
    ///
    /// Returns [`PlanarError::Host`] if the root container cannot be read.
    pub fn count<D>(&self, document: &D) -> Result<usize, PlanarError>
    where
        D: Document + ?Sized,
    {
        Ok(document.members(self.root_of(document))?.len())
    }

    /// The container a run starts from: the configured root, or the
    /// document's model space.
    pub fn root_of<D>(&self, document: &D) -> Id
    where
        D: Document + ?Sized,
    {
        self.config
            .flatten()
            .root()
            .unwrap_or_else(|| document.root())
    }
}
