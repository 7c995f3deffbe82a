use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host window settings.
    pub window: WindowConfig,
    /// Declarative attributes of the bottom-buttons bar.
    pub bottom_buttons: BottomButtonsAttrs,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
    /// Transient notification settings.
    pub toast: ToastConfig,
    /// Host screen behaviour.
    pub host: HostConfig,
}

/// Host window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in logical pixels.
    pub width: f32,
    /// Window height in logical pixels.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bottom Buttons".to_string(),
            width: 420.0,
            height: 320.0,
        }
    }
}

/// Attribute set of one bottom-buttons bar, as written by the host.
///
/// Every attribute is optional.  Unset labels fall back to `"Ok"` / `"Cancel"`,
/// unset or unparsable colors to opaque black (positive) and opaque white
/// (negative).  Resolution into typed values happens once, when the widget is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomButtonsAttrs {
    pub positive_button_text: Option<String>,
    pub negative_button_text: Option<String>,
    /// Hex color (`#RRGGBB` or `#RRGGBBAA`).
    pub positive_background_color: Option<String>,
    /// Hex color (`#RRGGBB` or `#RRGGBBAA`).
    pub negative_background_color: Option<String>,
    /// Start in the busy (progress) presentation.
    pub progress_mode: bool,
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Screen background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent color, used by the progress indicator and toasts.
    pub accent: String,
    /// Font size in points.
    pub font_size: f32,
    /// Corner radius for buttons and toasts (pixels).
    pub border_radius: f32,
    /// Outer padding around the bar (pixels).
    pub padding: u16,
    /// Gap between the two buttons (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:    "#1e1e2e".to_string(), // Catppuccin Mocha — base
            foreground:    "#cdd6f4".to_string(), // Catppuccin Mocha — text
            accent:        "#cba6f7".to_string(), // Catppuccin Mocha — mauve
            font_size:     14.0,
            border_radius: 6.0,
            padding:       12,
            gap:           8,
        }
    }
}

/// Transient notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// How long a toast stays on screen (milliseconds).
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 2_000 }
    }
}

/// Host screen behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Length of the simulated work started by the positive action (milliseconds).
    pub work_duration_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            work_duration_ms: 1_500,
        }
    }
}
