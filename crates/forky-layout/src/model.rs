//! Panel size model: the single owner of the live [`PanelSizes`].
//!
//! Every accepted mutation is merged, clamped as a whole record, and written
//! through to the store before it becomes visible. [`PanelSizeModel::set`]
//! logs persistence failures; [`PanelSizeModel::try_set`] returns them.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::sizes::{PanelSizes, PanelSizesPatch};
use crate::store::{SizeStore, StoreError};

/// Store key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "panelSizes";

/// Owns the current sizes and writes them through to a [`SizeStore`].
pub struct PanelSizeModel {
    sizes: PanelSizes,
    store: Box<dyn SizeStore>,
    key: String,
    revision: u64,
}

impl std::fmt::Debug for PanelSizeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSizeModel")
            .field("sizes", &self.sizes)
            .field("key", &self.key)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl PanelSizeModel {
    /// Load sizes stored under `key`, falling back to defaults.
    ///
    /// Absent, unreadable, or malformed records all yield the defaults;
    /// partial records are completed from the defaults and clamped.
    pub fn load(store: Box<dyn SizeStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let sizes = match store.get(&key) {
            Ok(Some(value)) => decode_stored(value).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Ignoring malformed panel sizes");
                PanelSizes::default()
            }),
            Ok(None) => {
                debug!(key = %key, "No stored panel sizes, using defaults");
                PanelSizes::default()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read panel sizes, using defaults");
                PanelSizes::default()
            }
        };

        Self {
            sizes,
            store,
            key,
            revision: 0,
        }
    }

    /// Current sizes.
    pub fn get(&self) -> PanelSizes {
        self.sizes
    }

    /// Merge `patch`, clamp, persist, and return the new sizes.
    ///
    /// A failed write is logged; the in-memory sizes still change.
    pub fn set(&mut self, patch: PanelSizesPatch) -> PanelSizes {
        match self.try_set(patch) {
            Ok(sizes) => sizes,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to persist panel sizes");
                self.sizes
            }
        }
    }

    /// Like [`set`](Self::set), but reports a failed write.
    ///
    /// A patch with no finite value is a no-op: no revision, no write.
    pub fn try_set(&mut self, patch: PanelSizesPatch) -> Result<PanelSizes, StoreError> {
        if !patch.has_finite_value() {
            trace!(?patch, "Ignoring patch without finite values");
            return Ok(self.sizes);
        }
        let next = self.sizes.merge(patch);
        self.sizes = next;
        self.revision += 1;
        trace!(revision = self.revision, ?next, "Panel sizes updated");
        self.persist()?;
        Ok(next)
    }

    /// Restore and persist the default sizes.
    pub fn reset(&mut self) -> PanelSizes {
        self.set(Self::defaults_patch())
    }

    /// Like [`reset`](Self::reset), but reports a failed write.
    pub fn try_reset(&mut self) -> Result<PanelSizes, StoreError> {
        self.try_set(Self::defaults_patch())
    }

    fn defaults_patch() -> PanelSizesPatch {
        PanelSizesPatch::full(PanelSizes::default())
    }

    /// Number of accepted mutations since load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Store key the sizes live under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let value = serde_json::to_value(self.sizes).map_err(StoreError::Serialize)?;
        self.store.set(&self.key, value)
    }
}

fn decode_stored(value: Value) -> Result<PanelSizes, serde_json::Error> {
    if !value.is_object() {
        let msg = "expected an object of panel sizes";
        return Err(serde::de::Error::custom(msg));
    }
    let patch: PanelSizesPatch = serde_json::from_value(value)?;
    Ok(PanelSizes::default().merge(patch))
}

/// Shared handle to a [`PanelSizeModel`].
///
/// The controller and the rendering layer each hold a clone; every read goes
/// through the handle, so nobody works from a stale snapshot. Single-threaded
/// by construction.
#[derive(Debug, Clone)]
pub struct SharedSizes {
    inner: Rc<RefCell<PanelSizeModel>>,
}

impl SharedSizes {
    pub fn new(model: PanelSizeModel) -> Self {
        Self {
            inner: Rc::new(RefCell::new(model)),
        }
    }

    /// Live sizes.
    pub fn get(&self) -> PanelSizes {
        self.inner.borrow().get()
    }

    /// See [`PanelSizeModel::set`].
    pub fn set(&self, patch: PanelSizesPatch) -> PanelSizes {
        self.inner.borrow_mut().set(patch)
    }

    /// See [`PanelSizeModel::reset`].
    pub fn reset(&self) -> PanelSizes {
        self.inner.borrow_mut().reset()
    }

    /// See [`PanelSizeModel::revision`].
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision()
    }
}
