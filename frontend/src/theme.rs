//! Light/dark theme preference

use crate::store::{Listeners, SubscriptionId};
use crate::web::KeyValueStorage;
use std::cell::Cell;
use std::rc::Rc;

pub const STORAGE_THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct ThemeStore {
    storage: Rc<dyn KeyValueStorage>,
    theme: Rc<Cell<Theme>>,
    system_dark: Rc<Cell<bool>>,
    listeners: Listeners,
}

impl ThemeStore {
    /// Restores the saved preference; unknown values fall back to `System`.
    pub fn new(storage: Rc<dyn KeyValueStorage>, system_dark: bool) -> Self {
        let theme = storage
            .get(STORAGE_THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();
        Self {
            storage,
            theme: Rc::new(Cell::new(theme)),
            system_dark: Rc::new(Cell::new(system_dark)),
            listeners: Listeners::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn is_dark(&self) -> bool {
        match self.theme.get() {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => self.system_dark.get(),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        if !self.storage.set(STORAGE_THEME_KEY, theme.as_str()) {
            tracing::warn!(theme = theme.as_str(), "could not persist theme");
        }
        self.listeners.notify();
    }

    /// Flips between light and dark, resolving `System` first.
    pub fn toggle_theme(&self) {
        let next = if self.is_dark() {
            Theme::Light
        } else {
            Theme::Dark
        };
        self.set_theme(next);
    }

    /// Fed by the `prefers-color-scheme` media query.
    pub fn set_system_dark(&self, dark: bool) {
        if self.system_dark.replace(dark) != dark {
            self.listeners.notify();
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }
}
