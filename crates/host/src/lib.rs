//! Host screen for the bottom-buttons bar.
//!
//! Owns the Iced application loop and wires the bar to the rest of the screen:
//! - bar actions → label updates, busy state and toasts
//! - simulated work timer → back to the interactive state
//! - config file watcher → recreate the bar, carrying its saved state over

use buttons_config::{default_path, load as load_config, AppConfig, ConfigWatcher};
use buttons_core::{ButtonAction, StateBundle};
use buttons_theme::Theme;
use buttons_widgets::{BottomButtons, ButtonsEvent, Toasts};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{button, column, container, row, text},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Key of the bar in the saved-state bundle.
const BAR_ID: &str = "bottom_buttons";

pub const UPDATED_POSITIVE_TEXT: &str = "Updated OK";
pub const UPDATED_NEGATIVE_TEXT: &str = "Updated Cancel";

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the host window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    let window = load_config(default_path()).unwrap_or_default().window;

    iced::application(HostScreen::new, HostScreen::update, HostScreen::view)
        .title(HostScreen::title)
        .subscription(HostScreen::subscription)
        .style(HostScreen::style)
        .window_size(Size::new(window.width, window.height))
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    /// Raw event from the bar's own view or subscription.
    Buttons(ButtonsEvent),
    /// The bar's listener reported an activated control.
    Action(ButtonAction),
    /// Simulated work finished; carries the generation it was started in.
    WorkFinished(u64),
    /// Flip the bar between interactive and busy by hand.
    ToggleBusy,
    /// Tear the bar down and rebuild it from the current config.
    Recreate,
    /// Config file changed on disk.
    ConfigReloaded,
    /// A toast's display time ran out.
    ToastExpired(u64),
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct HostScreen {
    config:  AppConfig,
    theme:   Theme,
    buttons: BottomButtons<Message>,
    toasts:  Toasts,
    saved:   StateBundle,
    /// Bumped whenever pending work should no longer end the busy state.
    work_generation: u64,
}

impl HostScreen {
    fn new() -> (Self, Task<Message>) {
        let config = load_config(default_path()).unwrap_or_else(|e| {
            warn!("{e}; using defaults");
            AppConfig::default()
        });
        (Self::with_config(config), Task::none())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            theme:   Theme::from_config(&config.theme),
            buttons: Self::build_buttons(&config),
            toasts:  Toasts::new(),
            saved:   StateBundle::new(),
            work_generation: 0,
            config,
        }
    }

    fn build_buttons(config: &AppConfig) -> BottomButtons<Message> {
        let mut bar = BottomButtons::from_attrs(BAR_ID, &config.bottom_buttons);
        bar.set_listener(Some(Box::new(Message::Action)));
        bar
    }

    pub fn buttons(&self) -> &BottomButtons<Message> {
        &self.buttons
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn title(&self) -> String {
        self.config.window.title.clone()
    }

    // ── Update ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Buttons(event) => match self.buttons.update(event) {
                Some(msg) => self.update(msg),
                None => Task::none(),
            },
            Message::Action(action) => self.handle_action(action),
            Message::WorkFinished(generation) => {
                if generation == self.work_generation {
                    self.buttons.set_progress_mode(false);
                } else {
                    debug!("Ignoring stale work completion ({generation})");
                }
                Task::none()
            }
            Message::ToggleBusy => {
                self.work_generation += 1;
                let busy = !self.buttons.is_progress_mode();
                self.buttons.set_progress_mode(busy);
                Task::none()
            }
            Message::Recreate => self.recreate(self.config.clone()),
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => {
                    info!("Config reloaded");
                    self.recreate(cfg)
                }
                Err(e) => {
                    warn!("Config reload failed: {e}");
                    self.notify(format!("Config reload failed: {e}"))
                }
            },
            Message::ToastExpired(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    fn handle_action(&mut self, action: ButtonAction) -> Task<Message> {
        match action {
            ButtonAction::Positive => {
                self.buttons.set_positive_button_text(Some(UPDATED_POSITIVE_TEXT));
                self.buttons.set_progress_mode(true);

                self.work_generation += 1;
                let generation = self.work_generation;
                let work = Duration::from_millis(self.config.host.work_duration_ms);
                let finish = Task::perform(
                    async move { tokio::time::sleep(work).await },
                    move |_| Message::WorkFinished(generation),
                );

                Task::batch([self.notify("Positive button pressed"), finish])
            }
            ButtonAction::Negative => {
                self.buttons.set_negative_button_text(Some(UPDATED_NEGATIVE_TEXT));
                self.notify("Negative button pressed")
            }
        }
    }

    /// Show a short toast and schedule its removal.
    fn notify(&mut self, message: impl Into<String>) -> Task<Message> {
        let id = self.toasts.push(message);
        let duration = Duration::from_millis(self.config.toast.duration_ms);
        Task::perform(
            async move { tokio::time::sleep(duration).await },
            move |_| Message::ToastExpired(id),
        )
    }

    /// Tear the bar down and rebuild it from `config`, carrying its saved
    /// state across.  Restore failures are reported, never dropped.
    fn recreate(&mut self, config: AppConfig) -> Task<Message> {
        if let Err(e) = self.saved.save_widget(&self.buttons) {
            error!("Saving bottom buttons state failed: {e}");
            return self.notify(format!("Could not save state: {e}"));
        }

        self.theme   = Theme::from_config(&config.theme);
        self.buttons = Self::build_buttons(&config);
        self.config  = config;
        // Work started by the old bar must not end the new bar's busy state.
        self.work_generation += 1;

        match self.saved.restore_widget(&mut self.buttons) {
            Ok(_) => {
                info!("Bottom buttons recreated");
                Task::none()
            }
            Err(e) => {
                error!("Restoring bottom buttons state failed: {e}");
                self.notify(format!("Could not restore state: {e}"))
            }
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = self.theme.gap as f32;
        let pad = self.theme.padding;

        let status = if self.buttons.is_progress_mode() { "busy" } else { "interactive" };

        let controls = row![
            button(text("Toggle busy").size(self.theme.font_size))
                .on_press(Message::ToggleBusy)
                .style(button::secondary),
            button(text("Recreate").size(self.theme.font_size))
                .on_press(Message::Recreate)
                .style(button::secondary),
        ]
        .spacing(gap);

        let mut body = column![
            text(format!("Bar state: {status}")).size(self.theme.font_size),
            controls,
        ]
        .spacing(gap * 2.0)
        .align_x(Alignment::Center);

        if let Some(toasts) = self.toasts.view(&self.theme) {
            body = body.push(toasts);
        }

        let bar = self.buttons.view(&self.theme).map(Message::Buttons);

        column![
            container(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            container(bar).width(Length::Fill).padding(pad),
        ]
        .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            self.buttons.subscription().map(Message::Buttons),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches the config file and sends `ConfigReloaded` on every change.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        // Watcher gave up; stall rather than end the subscription.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
