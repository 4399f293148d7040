//! Scoped unlocking of layers.
//!
//! CAD hosts refuse writes to elements on locked layers. [`LockGuard`] clears
//! a layer's lock for the duration of one element visit and puts the saved
//! value back when the scope ends, whichever way it ends.

use std::ops::{Deref, DerefMut};

use log::error;

use planar_core::identifier::Id;

use crate::host::{Document, HostError};

/// Holds a layer unlocked and lends out the document meanwhile.
///
/// The saved lock state is restored by [`LockGuard::release`], which reports
/// a failed restore, or by `Drop` on early return, `?` propagation and
/// unwinding, which can only log it.
///
/// # Examples
///
/// ```
/// use planar::{flatten::LockGuard, host::Document, identifier::Id, memory::MemoryDocument};
///
/// let frame = Id::new("frame");
/// let mut document = MemoryDocument::default().with_layer(frame, true);
///
/// {
///     let guard = LockGuard::acquire(&mut document, frame).unwrap();
///     assert!(guard.was_locked());
///     assert_eq!(guard.is_layer_locked(frame), Ok(false));
/// }
///
/// assert_eq!(document.is_layer_locked(frame), Ok(true));
/// ```
#[derive(Debug)]
pub struct LockGuard<'doc, D: Document + ?Sized> {
    document: &'doc mut D,
    layer: Id,
    was_locked: bool,
    released: bool,
}

impl<'doc, D: Document + ?Sized> LockGuard<'doc, D> {
    /// Saves the lock state of `layer` and clears it.
    ///
    /// The lock is cleared even when the layer is already unlocked.
    ///
    /// # Errors
    ///
    /// Returns the host error if the layer cannot be read or unlocked; in that
    /// case nothing needs restoring.
    pub fn acquire(document: &'doc mut D, layer: Id) -> Result<Self, HostError> {
        let was_locked = document.is_layer_locked(layer)?;
        document.set_layer_locked(layer, false)?;

        Ok(Self {
            document,
            layer,
            was_locked,
            released: false,
        })
    }

    /// The layer this guard holds unlocked.
    pub fn layer(&self) -> Id {
        self.layer
    }

    /// Lock state of the layer before the guard was acquired.
    pub fn was_locked(&self) -> bool {
        self.was_locked
    }

    /// Restores the saved lock state and ends the scope.
    ///
    /// # Errors
    ///
    /// Returns the host error if the lock cannot be written back.
    pub fn release(mut self) -> Result<(), HostError> {
        self.released = true;
        self.document.set_layer_locked(self.layer, self.was_locked)
    }
}

impl<D: Document + ?Sized> Deref for LockGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.document
    }
}

impl<D: Document + ?Sized> DerefMut for LockGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.document
    }
}

impl<D: Document + ?Sized> Drop for LockGuard<'_, D> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.document.set_layer_locked(self.layer, self.was_locked) {
            error!(layer:% = self.layer, err:% = err; "Failed to restore layer lock");
        }
    }
}

/// Runs `body` with `layer` unlocked and restores the lock afterwards.
///
/// The body receives the document and the saved lock state. When the body
/// fails its error is returned and the lock is still restored.
///
/// # Errors
///
/// Returns the body's error, or the host error from acquiring or restoring
/// the lock.
pub fn with_unlocked<D, T, E>(
    document: &mut D,
    layer: Id,
    body: impl FnOnce(&mut D, bool) -> Result<T, E>,
) -> Result<T, E>
where
    D: Document + ?Sized,
    E: From<HostError>,
{
    let mut guard = LockGuard::acquire(document, layer)?;
    let was_locked = guard.was_locked();
    let value = body(&mut *guard, was_locked)?;
    guard.release()?;
    Ok(value)
}
