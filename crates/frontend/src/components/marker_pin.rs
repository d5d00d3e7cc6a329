use dioxus::prelude::*;
use pinmap_shared::marker::{self, MapEvent, MarkerLayer};
use pinmap_shared::models::MarkerEntity;

use crate::dom::{self, MAP_CONTAINER_ID};

#[component]
pub fn MarkerPin(
    marker: MarkerEntity,
    layer: MarkerLayer,
    draggable: bool,
    on_event: EventHandler<MapEvent>,
) -> Element {
    let style = marker::pin_style(&marker);
    let class = if draggable {
        "marker-pin draggable"
    } else {
        "marker-pin"
    };
    let alt = format!("{} pin", marker.name_th);
    let icon = marker.icon_ref.clone();
    let id = marker.id.clone();
    let click_layer = layer.clone();
    let draggable_attr = if draggable { "true" } else { "false" };

    rsx! {
        div {
            class: "{class}",
            style: "{style}",
            draggable: draggable_attr,

            onclick: move |evt: Event<MouseData>| {
                evt.stop_propagation();
                if let Some(event) = click_layer.click(&marker) {
                    on_event.call(event);
                }
            },
            onmousedown: move |evt: Event<MouseData>| {
                // Keep a pin drag from also panning the map.
                if draggable {
                    evt.stop_propagation();
                }
            },
            ondragstart: move |evt: Event<DragData>| {
                if !draggable {
                    evt.prevent_default();
                    return;
                }
                dom::set_body_scroll_locked(true);
            },
            ondragend: move |evt: Event<DragData>| {
                dom::set_body_scroll_locked(false);
                let Some(rect) = dom::element_rect(MAP_CONTAINER_ID) else {
                    tracing::error!("map container not found");
                    return;
                };
                let c = evt.client_coordinates();
                if let Ok(proposal) = layer.drop_at(&id, c.x, c.y, rect) {
                    tracing::info!(
                        marker = %proposal.id,
                        x = proposal.x,
                        y = proposal.y,
                        "pin dropped"
                    );
                    on_event.call(MapEvent::PositionProposed(proposal));
                }
            },

            img { src: "{icon}", alt: "{alt}", draggable: "false" }
        }
    }
}
