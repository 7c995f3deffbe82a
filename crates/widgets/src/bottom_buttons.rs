use buttons_config::BottomButtonsAttrs;
use buttons_core::{BaseSavedState, ButtonAction, Parcel, Parcelable, Result, StatefulWidget};
use buttons_theme::{tinted_button, Color, Theme};
use iced::{
    widget::{button, container, progress_bar, row, text},
    Alignment, Background, Element, Length, Subscription,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_POSITIVE_TEXT: &str = "Ok";
pub const DEFAULT_NEGATIVE_TEXT: &str = "Cancel";

/// Fixed height of the bar, shared by both presentations so toggling does not
/// shift the surrounding layout.
const BAR_HEIGHT: f32 = 44.0;
/// Frame interval of the busy-indicator animation.
const PROGRESS_FRAME: Duration = Duration::from_millis(30);
/// Phase advance per frame; a full sweep there and back takes `2 / STEP` frames.
const PROGRESS_STEP: f32 = 0.025;

/// Subscriber notified when one of the two controls is activated.
///
/// It maps the action to a host message; the host handles that message in its
/// own update step and is free to mutate the widget from there.
pub type ActionListener<M> = Box<dyn Fn(ButtonAction) -> M>;

/// Resolved configuration of a [`BottomButtons`] bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonsConfig {
    /// `None` → `"Ok"`.
    pub positive_text: Option<String>,
    /// `None` → `"Cancel"`.
    pub negative_text: Option<String>,
    pub positive_background: Color,
    pub negative_background: Color,
    /// Start in the busy presentation.
    pub progress_mode: bool,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            positive_text: None,
            negative_text: None,
            positive_background: Color::BLACK,
            negative_background: Color::WHITE,
            progress_mode: false,
        }
    }
}

impl ButtonsConfig {
    /// Resolve the declarative attribute set.  Infallible: unset or unparsable
    /// colors fall back to opaque black / opaque white.
    pub fn from_attrs(attrs: &BottomButtonsAttrs) -> Self {
        let color = |hex: &Option<String>, fallback: Color| {
            hex.as_deref().and_then(Color::from_hex).unwrap_or(fallback)
        };

        Self {
            positive_text: attrs.positive_button_text.clone(),
            negative_text: attrs.negative_button_text.clone(),
            positive_background: color(&attrs.positive_background_color, Color::BLACK),
            negative_background: color(&attrs.negative_background_color, Color::WHITE),
            progress_mode: attrs.progress_mode,
        }
    }
}

/// Visibility of one child of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Hidden but still occupying its space.
    Invisible,
    /// Hidden and taking no space.
    Gone,
}

/// Messages produced by the bar's own view and subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PositivePressed,
    NegativePressed,
    /// Busy-indicator animation frame.
    Tick,
}

/// Snapshot of the bar that survives a teardown/recreate: the positive label
/// plus whatever base view state was saved alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub parent: Option<Parcel>,
    pub positive_button_text: Option<String>,
}

impl Parcelable for SavedState {
    const KIND: &'static str = "bottom_buttons";
}

/// A bar with a positive and a negative button that can swap both for a busy
/// indicator.
///
/// The bar is in exactly one of two presentations at any time:
///
/// | `is_progress_mode()` | buttons | progress indicator |
/// |---|---|---|
/// | `false` (interactive) | visible | gone |
/// | `true` (busy) | invisible | visible |
///
/// It never switches on its own; activating a control only notifies the
/// listener, and the host decides whether to enter the busy state.
pub struct BottomButtons<M> {
    id: String,
    positive_text: String,
    negative_text: String,
    positive_background: Color,
    negative_background: Color,
    progress_mode: bool,
    progress_phase: f32,
    listener: Option<ActionListener<M>>,
}

impl<M> BottomButtons<M> {
    pub fn new(id: impl Into<String>, config: ButtonsConfig) -> Self {
        let mut bar = Self {
            id: id.into(),
            positive_text: DEFAULT_POSITIVE_TEXT.to_string(),
            negative_text: DEFAULT_NEGATIVE_TEXT.to_string(),
            positive_background: Color::BLACK,
            negative_background: Color::WHITE,
            progress_mode: false,
            progress_phase: 0.0,
            listener: None,
        };
        bar.configure(config);
        bar
    }

    pub fn from_attrs(id: impl Into<String>, attrs: &BottomButtonsAttrs) -> Self {
        Self::new(id, ButtonsConfig::from_attrs(attrs))
    }

    /// Apply labels, tints and the initial presentation.
    pub fn configure(&mut self, config: ButtonsConfig) {
        self.set_positive_button_text(config.positive_text.as_deref());
        self.set_negative_button_text(config.negative_text.as_deref());
        self.positive_background = config.positive_background;
        self.negative_background = config.negative_background;
        self.set_progress_mode(config.progress_mode);
    }

    /// Replace the subscriber; `None` unsubscribes.
    pub fn set_listener(&mut self, listener: Option<ActionListener<M>>) {
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// `None` or an empty string restores `"Ok"`.
    pub fn set_positive_button_text(&mut self, text: Option<&str>) {
        self.positive_text = label_or(text, DEFAULT_POSITIVE_TEXT);
    }

    /// `None` or an empty string restores `"Cancel"`.
    pub fn set_negative_button_text(&mut self, text: Option<&str>) {
        self.negative_text = label_or(text, DEFAULT_NEGATIVE_TEXT);
    }

    pub fn positive_button_text(&self) -> &str {
        &self.positive_text
    }

    pub fn negative_button_text(&self) -> &str {
        &self.negative_text
    }

    pub fn positive_background(&self) -> Color {
        self.positive_background
    }

    pub fn negative_background(&self) -> Color {
        self.negative_background
    }

    pub fn is_progress_mode(&self) -> bool {
        self.progress_mode
    }

    pub fn set_progress_mode(&mut self, progress_mode: bool) {
        if self.progress_mode != progress_mode {
            debug!(
                id = %self.id,
                "bottom buttons → {}",
                if progress_mode { "busy" } else { "interactive" }
            );
        }
        self.progress_mode = progress_mode;
        self.progress_phase = 0.0;
    }

    pub fn positive_visibility(&self) -> Visibility {
        self.buttons_visibility()
    }

    pub fn negative_visibility(&self) -> Visibility {
        self.buttons_visibility()
    }

    pub fn progress_visibility(&self) -> Visibility {
        if self.progress_mode {
            Visibility::Visible
        } else {
            Visibility::Gone
        }
    }

    fn buttons_visibility(&self) -> Visibility {
        if self.progress_mode {
            Visibility::Invisible
        } else {
            Visibility::Visible
        }
    }

    /// Relay an activation to the listener, returning its message.
    ///
    /// Not gated on the busy state: while busy the controls are not rendered,
    /// so the view cannot produce presses, but a direct call still relays.
    pub fn click(&self, action: ButtonAction) -> Option<M> {
        let listener = self.listener.as_ref()?;
        debug!(id = %self.id, %action, "relaying button action");
        Some(listener(action))
    }

    pub fn update(&mut self, event: Event) -> Option<M> {
        match event {
            Event::PositivePressed => self.click(ButtonAction::Positive),
            Event::NegativePressed => self.click(ButtonAction::Negative),
            Event::Tick => {
                if self.progress_mode {
                    self.progress_phase = (self.progress_phase + PROGRESS_STEP) % 2.0;
                }
                None
            }
        }
    }

    /// Position of the busy indicator in `[0, 1]`, sweeping back and forth.
    pub fn progress_value(&self) -> f32 {
        if self.progress_phase <= 1.0 {
            self.progress_phase
        } else {
            2.0 - self.progress_phase
        }
    }

    /// Animation frames while busy, nothing otherwise.
    pub fn subscription(&self) -> Subscription<Event> {
        if self.progress_mode {
            iced::time::every(PROGRESS_FRAME).map(|_| Event::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self, theme: &Theme) -> Element<'_, Event> {
        let content: Element<'_, Event> = if self.progress_mode {
            let accent = theme.accent;
            progress_bar(0.0..=1.0, self.progress_value())
                .style(move |t: &iced::Theme| {
                    let mut style = progress_bar::primary(t);
                    style.bar = Background::Color(accent.to_iced());
                    style
                })
                .into()
        } else {
            let negative = action_button(&self.negative_text, self.negative_background, theme)
                .on_press(Event::NegativePressed);
            let positive = action_button(&self.positive_text, self.positive_background, theme)
                .on_press(Event::PositivePressed);

            row![negative, positive]
                .spacing(theme.gap as f32)
                .align_y(Alignment::Center)
                .into()
        };

        container(content)
            .width(Length::Fill)
            .center_y(Length::Fixed(BAR_HEIGHT))
            .into()
    }

    /// Typed snapshot of the state that must survive a recreate.
    pub fn snapshot(&self) -> SavedState {
        SavedState {
            parent: None,
            positive_button_text: Some(self.positive_text.clone()),
        }
    }

    pub fn apply_snapshot(&mut self, saved: SavedState) {
        self.set_positive_button_text(saved.positive_button_text.as_deref());
    }
}

impl<M> StatefulWidget for BottomButtons<M> {
    fn id(&self) -> &str {
        &self.id
    }

    fn save_state(&self) -> Result<Parcel> {
        let parent = BaseSavedState::new(self.id.clone()).to_parcel()?;
        SavedState {
            parent: Some(parent),
            ..self.snapshot()
        }
        .to_parcel()
    }

    fn restore_state(&mut self, parcel: &Parcel) -> Result<()> {
        let saved = SavedState::from_parcel(parcel)?;
        if let Some(parent) = &saved.parent {
            BaseSavedState::from_parcel(parent)?;
        }
        self.apply_snapshot(saved);
        Ok(())
    }
}

impl<M> fmt::Debug for BottomButtons<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomButtons")
            .field("id", &self.id)
            .field("positive_text", &self.positive_text)
            .field("negative_text", &self.negative_text)
            .field("progress_mode", &self.progress_mode)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

fn label_or(text: Option<&str>, fallback: &str) -> String {
    match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => fallback.to_string(),
    }
}

fn action_button<'a>(label: &'a str, tint: Color, theme: &Theme) -> button::Button<'a, Event> {
    button(container(text(label).size(theme.font_size)).center_x(Length::Fill))
        .width(Length::Fill)
        .padding([8, 16])
        .style(tinted_button(tint, theme.border_radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn bar() -> BottomButtons<ButtonAction> {
        BottomButtons::new("bottom_buttons", ButtonsConfig::default())
    }

    fn assert_presentation(bar: &BottomButtons<ButtonAction>) {
        if bar.is_progress_mode() {
            assert_eq!(bar.positive_visibility(), Visibility::Invisible);
            assert_eq!(bar.negative_visibility(), Visibility::Invisible);
            assert_eq!(bar.progress_visibility(), Visibility::Visible);
        } else {
            assert_eq!(bar.positive_visibility(), Visibility::Visible);
            assert_eq!(bar.negative_visibility(), Visibility::Visible);
            assert_eq!(bar.progress_visibility(), Visibility::Gone);
        }
    }

    #[test]
    fn defaults_without_attributes() {
        let bar = bar();
        assert_eq!(bar.positive_button_text(), "Ok");
        assert_eq!(bar.negative_button_text(), "Cancel");
        assert_eq!(bar.positive_background(), Color::BLACK);
        assert_eq!(bar.negative_background(), Color::WHITE);
        assert!(!bar.is_progress_mode());
        assert!(!bar.has_listener());
    }

    #[test]
    fn configured_labels_are_shown() {
        for label in ["Save", "Delete forever", "✓"] {
            let cfg = ButtonsConfig {
                positive_text: Some(label.to_string()),
                negative_text: Some(format!("not {label}")),
                ..ButtonsConfig::default()
            };
            let bar: BottomButtons<()> = BottomButtons::new("b", cfg);
            assert_eq!(bar.positive_button_text(), label);
            assert_eq!(bar.negative_button_text(), format!("not {label}"));
        }
    }

    #[test]
    fn attrs_resolve_colors_and_fall_back() {
        let attrs = BottomButtonsAttrs {
            positive_background_color: Some("#336699".into()),
            negative_background_color: Some("bogus".into()),
            progress_mode: true,
            ..BottomButtonsAttrs::default()
        };
        let cfg = ButtonsConfig::from_attrs(&attrs);
        assert_eq!(cfg.positive_background, Color::from_hex("#336699").unwrap());
        assert_eq!(cfg.negative_background, Color::WHITE);

        let bar: BottomButtons<()> = BottomButtons::new("b", cfg);
        assert!(bar.is_progress_mode());
        assert_eq!(bar.positive_button_text(), "Ok");
    }

    #[test]
    fn absent_or_empty_text_restores_defaults() {
        let mut bar = bar();
        bar.set_positive_button_text(Some("Go"));
        bar.set_negative_button_text(Some("Stop"));
        bar.set_positive_button_text(None);
        bar.set_negative_button_text(Some(""));
        assert_eq!(bar.positive_button_text(), "Ok");
        assert_eq!(bar.negative_button_text(), "Cancel");
    }

    #[test]
    fn exactly_one_presentation_after_every_write() {
        let mut bar = bar();
        assert_presentation(&bar);
        for mode in [true, true, false, true, false, false, true] {
            bar.set_progress_mode(mode);
            assert_eq!(bar.is_progress_mode(), mode);
            assert_presentation(&bar);
        }
    }

    #[test]
    fn clicks_do_not_change_presentation() {
        let mut bar = bar();
        bar.set_listener(Some(Box::new(|a: ButtonAction| a)));
        bar.update(Event::PositivePressed);
        bar.update(Event::NegativePressed);
        assert!(!bar.is_progress_mode());
    }

    #[test]
    fn positive_press_invokes_listener_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut bar = bar();
        bar.set_listener(Some(Box::new(move |a: ButtonAction| {
            seen.lock().unwrap().push(a);
            a
        })));

        assert_eq!(bar.update(Event::PositivePressed), Some(ButtonAction::Positive));
        assert_eq!(*calls.lock().unwrap(), vec![ButtonAction::Positive]);
    }

    #[test]
    fn negative_press_reports_negative() {
        let mut bar = bar();
        bar.set_listener(Some(Box::new(|a: ButtonAction| a)));
        assert_eq!(bar.update(Event::NegativePressed), Some(ButtonAction::Negative));
    }

    #[test]
    fn press_without_listener_is_a_no_op() {
        let mut bar = bar();
        assert_eq!(bar.update(Event::PositivePressed), None);
        assert_eq!(bar.positive_button_text(), "Ok");
    }

    #[test]
    fn cleared_listener_is_not_invoked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut bar = bar();
        bar.set_listener(Some(Box::new(move |a: ButtonAction| {
            counter.fetch_add(1, Ordering::SeqCst);
            a
        })));
        bar.set_listener(None);

        assert_eq!(bar.update(Event::NegativePressed), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn last_registered_listener_wins() {
        let mut bar: BottomButtons<&'static str> = BottomButtons::new("b", ButtonsConfig::default());
        bar.set_listener(Some(Box::new(|_: ButtonAction| "first")));
        bar.set_listener(Some(Box::new(|_: ButtonAction| "second")));
        assert_eq!(bar.click(ButtonAction::Positive), Some("second"));
    }

    #[test]
    fn host_reaction_enters_busy_with_new_label() {
        let mut bar = bar();
        bar.set_listener(Some(Box::new(|a: ButtonAction| a)));

        if let Some(ButtonAction::Positive) = bar.update(Event::PositivePressed) {
            bar.set_positive_button_text(Some("Updated OK"));
            bar.set_progress_mode(true);
        }

        assert!(bar.is_progress_mode());
        assert_eq!(bar.positive_button_text(), "Updated OK");
        assert_presentation(&bar);
    }

    #[test]
    fn save_then_restore_keeps_positive_label() {
        let mut bar = bar();
        bar.set_positive_button_text(Some("Updated OK"));
        let parcel = bar.save_state().unwrap();

        let mut recreated = self::bar();
        assert_eq!(recreated.positive_button_text(), "Ok");
        recreated.restore_state(&parcel).unwrap();
        assert_eq!(recreated.positive_button_text(), "Updated OK");
    }

    #[test]
    fn saved_parcel_nests_base_view_state() {
        let parcel = bar().save_state().unwrap();
        let saved = SavedState::from_parcel(&parcel).unwrap();
        let base = BaseSavedState::from_parcel(saved.parent.as_ref().unwrap()).unwrap();
        assert_eq!(base.id, "bottom_buttons");
    }

    #[test]
    fn only_the_positive_label_is_persisted() {
        let mut bar = bar();
        bar.set_negative_button_text(Some("Updated Cancel"));
        bar.set_progress_mode(true);
        let parcel = bar.save_state().unwrap();

        let mut recreated = self::bar();
        recreated.restore_state(&parcel).unwrap();
        assert_eq!(recreated.negative_button_text(), "Cancel");
        assert!(!recreated.is_progress_mode());
    }

    #[test]
    fn restoring_foreign_parcel_fails() {
        let foreign = BaseSavedState::new("other").to_parcel().unwrap();
        let mut bar = bar();
        bar.set_positive_button_text(Some("Keep me"));

        let err = bar.restore_state(&foreign).unwrap_err();
        assert!(matches!(err, buttons_core::ButtonsError::InvalidStateSnapshotKind { .. }));
        assert_eq!(bar.positive_button_text(), "Keep me");
    }

    #[test]
    fn busy_indicator_sweeps_back_and_forth() {
        let mut bar = bar();
        bar.update(Event::Tick);
        assert_eq!(bar.progress_value(), 0.0);

        bar.set_progress_mode(true);
        let mut peak = 0.0_f32;
        for _ in 0..60 {
            bar.update(Event::Tick);
            let v = bar.progress_value();
            assert!((0.0..=1.0).contains(&v));
            peak = peak.max(v);
        }
        assert!(peak > 0.9);
        assert!(bar.progress_value() < peak);
    }
}
