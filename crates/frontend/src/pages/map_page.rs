use dioxus::prelude::*;
use pinmap_shared::filter::MarkerFilter;
use pinmap_shared::marker::{coerce_coordinate, MapEvent, MarkerLayer, MarkerMode, PositionProposal};
use pinmap_shared::models::MarkerEntity;
use pinmap_shared::store::MarkerStore;

use crate::api;
use crate::components::filter_bar::FilterBar;
use crate::components::map_view::MapView;
use crate::components::marker_sheet::MarkerSheet;

/// Persist a proposed position. The store only changes once the server has
/// confirmed; a failure leaves the last good position and reports the error.
fn persist_position(
    proposal: PositionProposal,
    mut store: Signal<MarkerStore>,
    mut error: Signal<Option<String>>,
) {
    spawn(async move {
        let result = api::update_position(&proposal.id, proposal.x, proposal.y).await;
        let outcome = store.write().settle(result);
        match outcome {
            Ok(()) => {
                tracing::info!(marker = %proposal.id, "marker position saved");
                error.set(None);
            }
            Err(e) => {
                tracing::warn!(marker = %proposal.id, error = %e, "marker position not saved");
                error.set(Some(e.to_string()));
            }
        }
    });
}

fn marker_mode(admin: bool, editing_id: Option<String>, preview: Option<(f64, f64)>) -> MarkerMode {
    if admin {
        MarkerMode::AdminEdit {
            editing_id,
            preview,
        }
    } else {
        MarkerMode::Browse
    }
}

/// The map page. `admin` turns on edit mode; `editing_id` focuses one marker.
#[component]
pub fn MapPage(admin: bool, editing_id: Option<String>) -> Element {
    let mut store = use_signal(MarkerStore::new);
    let filter = use_signal(MarkerFilter::default);
    let mut selected = use_signal(|| None::<MarkerEntity>);
    let sheet_animating = use_signal(|| false);
    let preview = use_signal(|| None::<(f64, f64)>);
    let mut error = use_signal(|| None::<String>);

    use_future(move || async move {
        store.write().set_loading(true);
        match api::fetch_markers().await {
            Ok(markers) => store.write().replace_all(markers),
            Err(e) => {
                tracing::error!(error = %e, "failed to load markers");
                store.write().set_loading(false);
                error.set(Some(e.to_string()));
            }
        }
    });

    let displayed = use_memo({
        let editing_id = editing_id.clone();
        use_reactive!(|(admin, editing_id)| {
            let layer = MarkerLayer::new(marker_mode(admin, editing_id, preview()));
            let store = store.read();
            if admin {
                layer.displayed(store.markers())
            } else {
                layer.displayed(&filter.read().apply(store.markers()))
            }
        })
    });
    let is_loading = use_memo(move || store.read().is_loading());

    let on_event = move |event: MapEvent| match event {
        MapEvent::MarkerSelected(marker) => selected.set(Some(marker)),
        MapEvent::PositionProposed(proposal) => persist_position(proposal, store, error),
    };

    let mode = marker_mode(admin, editing_id.clone(), preview());
    let focus = editing_id
        .as_deref()
        .and_then(|id| store.read().get(id).cloned());

    rsx! {
        div { class: "map-page",
            if !admin {
                FilterBar { filter }
            }

            if let Some(message) = error() {
                div { class: "error-banner", "{message}" }
            }

            MapView {
                markers: displayed,
                is_loading: is_loading,
                mode: mode,
                sheet_animating: sheet_animating,
                on_event: on_event,
            }

            if let Some(marker) = focus {
                PreviewPanel { marker, preview, store, error }
            }

            if !admin {
                MarkerSheet { selected, animating: sheet_animating }
            }
        }
    }
}

/// Manual position entry for the focused marker. While a preview is set the
/// pin is drawn there and cannot be dragged.
#[component]
fn PreviewPanel(
    marker: MarkerEntity,
    mut preview: Signal<Option<(f64, f64)>>,
    store: Signal<MarkerStore>,
    error: Signal<Option<String>>,
) -> Element {
    let stored = (marker.normalized_x, marker.normalized_y);
    let (x, y) = preview().unwrap_or(stored);
    let id = marker.id.clone();

    rsx! {
        div { class: "preview-panel",
            h3 { "{marker.name_th}" }
            label {
                "X (%)"
                input {
                    r#type: "number",
                    step: "0.1",
                    value: "{x}",
                    oninput: move |evt: Event<FormData>| {
                        let (_, y) = preview().unwrap_or(stored);
                        preview.set(Some((coerce_coordinate(&evt.value()), y)));
                    },
                }
            }
            label {
                "Y (%)"
                input {
                    r#type: "number",
                    step: "0.1",
                    value: "{y}",
                    oninput: move |evt: Event<FormData>| {
                        let (x, _) = preview().unwrap_or(stored);
                        preview.set(Some((x, coerce_coordinate(&evt.value()))));
                    },
                }
            }
            div { class: "preview-actions",
                button {
                    disabled: preview().is_none(),
                    onclick: move |_| {
                        if let Some((x, y)) = preview() {
                            persist_position(PositionProposal { id: id.clone(), x, y }, store, error);
                            preview.set(None);
                        }
                    },
                    "Save position"
                }
                button {
                    disabled: preview().is_none(),
                    onclick: move |_| preview.set(None),
                    "Clear preview"
                }
            }
        }
    }
}
