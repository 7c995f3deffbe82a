pub mod bottom_buttons;
pub mod toast;

pub use bottom_buttons::{
    ActionListener, BottomButtons, ButtonsConfig, Event as ButtonsEvent, SavedState, Visibility,
};
pub use toast::{Toast, Toasts};
