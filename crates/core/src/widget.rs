use crate::error::Result;
use crate::state::{BaseSavedState, Parcel, Parcelable};

/// A widget whose state must survive the host tearing it down and building it
/// again (window recreate, config reload).
///
/// The default implementations save and restore only the base view state.
/// Widgets with fields of their own override both methods and nest the base
/// parcel inside their own saved state.
pub trait StatefulWidget {
    /// Unique string identifier, also the key in a [`StateBundle`](crate::StateBundle).
    fn id(&self) -> &str;

    fn save_state(&self) -> Result<Parcel> {
        BaseSavedState::new(self.id()).to_parcel()
    }

    fn restore_state(&mut self, parcel: &Parcel) -> Result<()> {
        BaseSavedState::from_parcel(parcel).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateBundle;

    struct Plain;

    impl StatefulWidget for Plain {
        fn id(&self) -> &str {
            "plain"
        }
    }

    #[test]
    fn default_state_round_trips_through_bundle() {
        let mut bundle = StateBundle::new();
        bundle.save_widget(&Plain).unwrap();
        assert!(bundle.restore_widget(&mut Plain).unwrap());
        assert!(!bundle.restore_widget(&mut Plain).unwrap());
    }
}
