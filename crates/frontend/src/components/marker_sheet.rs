use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use pinmap_shared::models::MarkerEntity;

use crate::config::SHEET_ANIMATION_MS;

/// Bottom sheet with the selected marker's details.
///
/// `animating` is raised for the length of every open and close transition so
/// the map can pause its gestures meanwhile.
#[component]
pub fn MarkerSheet(
    mut selected: Signal<Option<MarkerEntity>>,
    mut animating: Signal<bool>,
) -> Element {
    let mut was_open = use_signal(|| false);

    use_effect(move || {
        let open = selected.read().is_some();
        if open == *was_open.peek() {
            return;
        }
        was_open.set(open);
        animating.set(true);
        spawn(async move {
            TimeoutFuture::new(SHEET_ANIMATION_MS).await;
            animating.set(false);
        });
    });

    let current = selected.read().clone();
    let class = if current.is_some() {
        "marker-sheet open"
    } else {
        "marker-sheet"
    };

    rsx! {
        div { class: "{class}",
            if let Some(marker) = current {
                div { class: "marker-sheet-header",
                    img { class: "marker-sheet-icon", src: "{marker.icon_ref}" }
                    div {
                        h2 { "{marker.name_th}" }
                        if let Some(name_en) = marker.name_en.clone() {
                            h3 { "{name_en}" }
                        }
                        span { class: "marker-sheet-category", "{marker.category}" }
                    }
                    button {
                        class: "marker-sheet-close",
                        title: "Close",
                        onclick: move |_| selected.set(None),
                        "\u{2715}"
                    }
                }
                p { "{marker.description_th}" }
                if let Some(desc_en) = marker.description_en.clone() {
                    p { class: "marker-sheet-en", "{desc_en}" }
                }
            }
        }
    }
}
