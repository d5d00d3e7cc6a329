use dioxus::prelude::*;
use pinmap_shared::filter::MarkerFilter;
use pinmap_shared::models::MarkerCategory;

fn chip_class(active: bool) -> &'static str {
    if active {
        "chip active"
    } else {
        "chip"
    }
}

#[component]
pub fn FilterBar(mut filter: Signal<MarkerFilter>) -> Element {
    let search = filter.read().search.clone();

    rsx! {
        div { class: "filter-bar",
            input {
                class: "filter-search",
                r#type: "search",
                placeholder: "Search restaurants",
                value: "{search}",
                oninput: move |evt: Event<FormData>| filter.write().search = evt.value(),
            }
            div { class: "filter-chips",
                for category in MarkerCategory::ALL {
                    button {
                        key: "{category:?}",
                        class: chip_class(filter.read().categories.contains(&category)),
                        onclick: move |_| filter.write().toggle_category(category),
                        "{category}"
                    }
                }
            }
        }
    }
}
