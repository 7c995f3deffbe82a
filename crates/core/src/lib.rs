pub mod error;
pub mod event;
pub mod state;
pub mod widget;

pub use error::{ButtonsError, Result};
pub use event::ButtonAction;
pub use state::{BaseSavedState, Parcel, Parcelable, StateBundle};
pub use widget::StatefulWidget;
