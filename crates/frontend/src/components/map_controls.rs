use dioxus::prelude::*;
use pinmap_shared::viewport::ViewportInput;

#[component]
pub fn MapControls(on_input: EventHandler<ViewportInput>) -> Element {
    rsx! {
        div { class: "map-controls",
            button {
                title: "Zoom in",
                onclick: move |_| on_input.call(ViewportInput::ZoomIn),
                "+"
            }
            button {
                title: "Zoom out",
                onclick: move |_| on_input.call(ViewportInput::ZoomOut),
                "\u{2212}"
            }
            button {
                title: "Rotate",
                onclick: move |_| on_input.call(ViewportInput::Rotate),
                "\u{21bb}"
            }
            button {
                title: "Reset view",
                onclick: move |_| on_input.call(ViewportInput::Reset),
                "\u{2316}"
            }
        }
    }
}
