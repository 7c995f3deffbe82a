use buttons_theme::{toast_container, Theme};
use iced::{
    widget::{container, text, Column},
    Alignment, Element,
};
use std::collections::VecDeque;

/// Toasts beyond this many push the oldest one out.
const MAX_VISIBLE: usize = 3;

/// One short-lived notification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Stack of on-screen toasts, newest last.
///
/// The stack only tracks what is showing; expiry timers belong to the host,
/// which calls [`Toasts::dismiss`] with the id returned by [`Toasts::push`].
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    active: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, returning the id to dismiss it with.
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.active.push_back(Toast {
            id,
            message: message.into(),
        });
        while self.active.len() > MAX_VISIBLE {
            self.active.pop_front();
        }
        id
    }

    /// Remove the toast with `id`.  Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        self.active.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns `None` when nothing is showing — callers should skip rendering.
    pub fn view<'a, M: 'a>(&'a self, theme: &Theme) -> Option<Element<'a, M>> {
        if self.active.is_empty() {
            return None;
        }

        let bg = theme.foreground.with_alpha(0.92);
        let fg = theme.background;

        let items: Vec<Element<'a, M>> = self
            .active
            .iter()
            .map(|toast| {
                container(text(toast.message.as_str()).size(theme.font_size * 0.9))
                    .padding([6, 14])
                    .style(toast_container(bg, fg, theme.border_radius * 2.0))
                    .into()
            })
            .collect();

        Some(
            Column::from_vec(items)
                .spacing(theme.gap as f32 / 2.0)
                .align_x(Alignment::Center)
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut toasts = Toasts::new();
        let a = toasts.push("first");
        let b = toasts.push("second");
        assert!(b > a);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::new();
        let a = toasts.push("first");
        let b = toasts.push("second");

        assert!(toasts.dismiss(a));
        assert!(!toasts.dismiss(a));
        let left: Vec<u64> = toasts.iter().map(|t| t.id).collect();
        assert_eq!(left, vec![b]);
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut toasts = Toasts::new();
        for i in 0..5 {
            toasts.push(format!("toast {i}"));
        }
        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert_eq!(toasts.iter().next().unwrap().message, "toast 2");
    }
}
