use client::{CategoryView, Notification};
use yew::prelude::*;
use crate::styles::*;

/// The page's status line; renders nothing while no message is visible.
pub fn notice(notification: Option<Notification>) -> Html {
    match notification {
        Some(notification) => html! {
            <div class={alert_style(notification.tone)} role="status" data-tone={notification.tone.as_str()}>
                {notification.text}
            </div>
        },
        None => html! {},
    }
}

pub fn category_body<T>(view: &CategoryView<T>, item: impl Fn(&T) -> Html) -> Html {
    match view {
        CategoryView::Placeholder(message) => html! {
            <p class={combine_classes(TEXT_MUTED, "py-6 text-center")}>{*message}</p>
        },
        CategoryView::Items(items) => items.iter().map(item).collect::<Html>(),
    }
}

pub fn loading() -> Html {
    html! {
        <div class="flex items-center justify-center p-8">
            <div class="animate-spin rounded-full h-12 w-12 border-4 border-orange-500 border-t-transparent"/>
        </div>
    }
}
