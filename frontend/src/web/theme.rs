//! Applies the theme to the document

use crate::theme::ThemeStore;
use wasm_bindgen::prelude::*;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_media_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

pub fn system_prefers_dark() -> bool {
    dark_media_query().is_some_and(|query| query.matches())
}

fn apply_dark_class(dark: bool) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let result = if dark {
        classes.add_1("dark")
    } else {
        classes.remove_1("dark")
    };
    if result.is_err() {
        tracing::warn!(dark, "could not update theme class");
    }
}

/// Keeps the `dark` class on `<html>` in sync with the store and the OS.
pub fn bind(store: &ThemeStore) {
    apply_dark_class(store.is_dark());

    let watched = store.clone();
    store.subscribe(move || apply_dark_class(watched.is_dark()));

    let Some(query) = dark_media_query() else {
        return;
    };
    let target = store.clone();
    let closure = Closure::<dyn Fn()>::new(move || {
        target.set_system_dark(system_prefers_dark());
    });
    let _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());

    // the listener lives as long as the page
    closure.forget();
}
