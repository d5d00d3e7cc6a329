use dioxus::prelude::*;

#[component]
pub fn LoadingOverlay(visible: bool) -> Element {
    if !visible {
        return rsx! {};
    }

    rsx! {
        div { class: "loading-overlay",
            div { class: "loading-spinner" }
            p { "กำลังโหลดร้านอาหาร..." }
        }
    }
}
