//! One transactional flatten run.

use log::{info, warn};

use planar_core::identifier::Id;

use super::traverse::{ContainerTraverser, Counters, Notice};
use crate::{
    error::{TransactionFailure, TransactionStage},
    host::{Document, HostError},
};

/// Outcome of a committed flatten session.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenSummary {
    counters: Counters,
    notices: Vec<Notice>,
}

impl FlattenSummary {
    /// Elements visited.
    pub fn examined(&self) -> u64 {
        self.counters.examined()
    }

    /// Elements rewritten.
    pub fn changed(&self) -> u64 {
        self.counters.changed()
    }

    /// Non-fatal conditions met during the walk.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Runs one traversal inside one host transaction.
///
/// Either every write of the run is committed, or the transaction is aborted
/// and the document is left as it was.
///
/// # Examples
///
/// ```
/// use planar::{
///     element::Element,
///     flatten::FlattenSession,
///     geometry::Point3,
///     host::Document,
///     identifier::Id,
///     memory::MemoryDocument,
/// };
///
/// let mut document = MemoryDocument::default();
/// let root = document.root();
/// document
///     .push_element(root, Id::new("0"), Element::Point { position: Point3::new(1.0, 1.0, 9.0) })
///     .unwrap();
///
/// let summary = FlattenSession::new(false).run(&mut document, root).unwrap();
/// assert_eq!((summary.examined(), summary.changed()), (1, 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlattenSession {
    recurse: bool,
}

impl FlattenSession {
    /// Creates a session.
    ///
    /// # Arguments
    ///
    /// * `recurse` - Descend into block references and flatten members on
    ///   locked layers.
    pub fn new(recurse: bool) -> Self {
        Self { recurse }
    }

    /// Flattens everything reachable from `root` and commits.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionFailure`] if the transaction cannot be opened, a
    /// host access fails during the walk, or the commit fails. The
    /// transaction is aborted in every one of these cases.
    pub fn run<D>(&self, document: &mut D, root: Id) -> Result<FlattenSummary, TransactionFailure>
    where
        D: Document + ?Sized,
    {
        info!(root:% = root, recurse = self.recurse; "Starting flatten session");

        let transaction = Transaction::begin(document)
            .map_err(|cause| TransactionFailure::new(TransactionStage::Begin, cause))?;

        let mut traverser = ContainerTraverser::new(self.recurse);
        if let Err(cause) = traverser.traverse(&mut *transaction.document, root) {
            warn!(err:% = cause; "Flatten traversal failed, aborting transaction");
            transaction.abort();
            return Err(TransactionFailure::new(TransactionStage::Traverse, cause));
        }

        transaction
            .commit()
            .map_err(|cause| TransactionFailure::new(TransactionStage::Commit, cause))?;

        let (counters, notices) = traverser.finish();
        info!(
            examined = counters.examined(),
            changed = counters.changed(),
            notices = notices.len();
            "Flatten session committed"
        );

        Ok(FlattenSummary { counters, notices })
    }
}

/// An open host transaction that aborts on drop unless committed.
struct Transaction<'doc, D: Document + ?Sized> {
    document: &'doc mut D,
    finished: bool,
}

impl<'doc, D: Document + ?Sized> Transaction<'doc, D> {
    fn begin(document: &'doc mut D) -> Result<Self, HostError> {
        document.begin_transaction()?;
        Ok(Self {
            document,
            finished: false,
        })
    }

    fn commit(mut self) -> Result<(), HostError> {
        self.finished = true;
        let result = self.document.commit_transaction();
        if result.is_err() {
            self.document.abort_transaction();
        }
        result
    }

    fn abort(mut self) {
        self.finished = true;
        self.document.abort_transaction();
    }
}

impl<D: Document + ?Sized> Drop for Transaction<'_, D> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Transaction dropped without commit, aborting");
            self.document.abort_transaction();
        }
    }
}
