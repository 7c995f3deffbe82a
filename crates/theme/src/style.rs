use crate::colors::Color;
use iced::widget::{button, container};
use iced::{Background, Border};

/// Button style with a solid tint and auto-contrasting label.
///
/// Hover lightens towards the label color, press darkens, disabled fades.
pub fn tinted_button(
    tint: Color,
    radius: f32,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |theme, status| {
        let label = tint.contrasting_text();
        let fill = match status {
            button::Status::Active => tint,
            button::Status::Hovered => tint.mix(label, 0.12),
            button::Status::Pressed => tint.mix(Color::BLACK, 0.2),
            button::Status::Disabled => tint.with_alpha(tint.a * 0.5),
        };

        let mut style = button::primary(theme, status);
        style.background = Some(Background::Color(fill.to_iced()));
        style.text_color = label.to_iced();
        style.border = Border {
            color: label.with_alpha(0.25).to_iced(),
            width: 1.0,
            radius: radius.into(),
        };
        style
    }
}

/// Floating pill used for toasts.
pub fn toast_container(
    background: Color,
    foreground: Color,
    radius: f32,
) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        text_color: Some(foreground.to_iced()),
        background: Some(Background::Color(background.to_iced())),
        border: Border {
            color: foreground.with_alpha(0.2).to_iced(),
            width: 1.0,
            radius: radius.into(),
        },
        ..container::Style::default()
    }
}
