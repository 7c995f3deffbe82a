use crate::error::{ButtonsError, Result};
use crate::widget::StatefulWidget;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque, self-describing blob holding one piece of saved view state.
///
/// The `kind` tag names the type that wrote the payload so a restorer can
/// refuse parcels it did not produce instead of misreading them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    kind: String,
    data: Vec<u8>,
}

impl Parcel {
    /// Type tag of the state this parcel carries.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Raw encoded payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A saved-state type that can be written into and read back from a [`Parcel`].
pub trait Parcelable: Serialize + DeserializeOwned {
    /// Unique tag written into every parcel of this type.
    const KIND: &'static str;

    fn to_parcel(&self) -> Result<Parcel> {
        let data = serde_json::to_vec(self)
            .map_err(|e| ButtonsError::Parcel(format!("cannot encode '{}': {e}", Self::KIND)))?;
        Ok(Parcel {
            kind: Self::KIND.to_string(),
            data,
        })
    }

    /// Decode `parcel`, failing with [`ButtonsError::InvalidStateSnapshotKind`]
    /// when it was written by another type.
    fn from_parcel(parcel: &Parcel) -> Result<Self> {
        if parcel.kind != Self::KIND {
            return Err(ButtonsError::InvalidStateSnapshotKind {
                expected: Self::KIND.to_string(),
                found: parcel.kind.clone(),
            });
        }
        serde_json::from_slice(&parcel.data)
            .map_err(|e| ButtonsError::Parcel(format!("cannot decode '{}': {e}", Self::KIND)))
    }
}

/// State every view saves regardless of its concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSavedState {
    pub id: String,
}

impl BaseSavedState {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Parcelable for BaseSavedState {
    const KIND: &'static str = "view";
}

/// Parcels kept by the host across a teardown/recreate cycle, keyed by widget id.
///
/// Entries are removed on read so each saved state is applied at most once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateBundle {
    entries: BTreeMap<String, Parcel>,
}

impl StateBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `parcel` under `key`, returning any parcel it replaced.
    pub fn put(&mut self, key: impl Into<String>, parcel: Parcel) -> Option<Parcel> {
        self.entries.insert(key.into(), parcel)
    }

    /// Remove and return the parcel stored under `key`.
    pub fn take(&mut self, key: &str) -> Option<Parcel> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save `widget` under its own id.
    pub fn save_widget<W: StatefulWidget + ?Sized>(&mut self, widget: &W) -> Result<()> {
        let parcel = widget.save_state()?;
        self.put(widget.id(), parcel);
        Ok(())
    }

    /// Restore `widget` from the parcel saved under its id, consuming it.
    ///
    /// Returns `Ok(false)` when nothing was saved for this widget.
    pub fn restore_widget<W: StatefulWidget + ?Sized>(&mut self, widget: &mut W) -> Result<bool> {
        match self.take(widget.id()) {
            Some(parcel) => {
                widget.restore_state(&parcel)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
