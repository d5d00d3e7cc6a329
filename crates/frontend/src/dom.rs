use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use pinmap_shared::marker::ContainerRect;
use pinmap_shared::models::VisibleSize;
use pinmap_shared::scheduler::FrameClock;
use pinmap_shared::size::{
    resolve_visible_size, SizeChangeFilter, SizeSource, ViewportSizeProvider,
};

/// Id of the transformed content box; drop positions are measured against it.
pub const MAP_CONTAINER_ID: &str = "pinmap-content";

// ---------------------------------------------------------------------------
// Frame clock
// ---------------------------------------------------------------------------

/// `requestAnimationFrame`. Dropping the handle cancels the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RafClock;

impl FrameClock for RafClock {
    type Handle = AnimationFrame;

    fn request(&self, callback: Box<dyn FnOnce()>) -> AnimationFrame {
        request_animation_frame(move |_timestamp| callback())
    }
}

// ---------------------------------------------------------------------------
// Visible size
// ---------------------------------------------------------------------------

fn sample_size() -> Option<(VisibleSize, SizeSource)> {
    let window = web_sys::window()?;
    let visual = window.visual_viewport().map(|vv| (vv.width(), vv.height()));
    let inner = (
        window.inner_width().ok()?.as_f64()?,
        window.inner_height().ok()?.as_f64()?,
    );
    Some(resolve_visible_size(visual, inner))
}

/// Browser-backed size provider.
///
/// Listens to the visual viewport's `resize` and `scroll` events when the API
/// exists (mobile toolbars move it without a window resize), otherwise to the
/// window's `resize` and `orientationchange`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSizeProvider;

impl ViewportSizeProvider for BrowserSizeProvider {
    type Subscription = Vec<EventListener>;

    fn current_size(&self) -> VisibleSize {
        sample_size().map(|(size, _)| size).unwrap_or_default()
    }

    fn on_change(&self, callback: Box<dyn Fn(VisibleSize)>) -> Vec<EventListener> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let filter = SizeChangeFilter::seeded(self.current_size());
        let notify: Rc<dyn Fn()> = Rc::new(move || {
            if let Some((size, _)) = sample_size() {
                if filter.accept(size) {
                    callback(size);
                }
            }
        });
        let listen = |target: &web_sys::EventTarget, event: &'static str| {
            let notify = Rc::clone(&notify);
            EventListener::new(target, event, move |_| notify())
        };

        match window.visual_viewport() {
            Some(vv) => {
                tracing::debug!("tracking visual viewport");
                vec![listen(&vv, "resize"), listen(&vv, "scroll")]
            }
            None => {
                tracing::debug!("visual viewport unavailable, tracking window");
                vec![listen(&window, "resize"), listen(&window, "orientationchange")]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Bounding client rect of an element by id.
pub fn element_rect(id: &str) -> Option<ContainerRect> {
    let document = web_sys::window()?.document()?;
    let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
    Some(ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height()))
}

/// Hide the page scrollbars while a drag is in progress.
pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    if body.style().set_property("overflow", value).is_err() {
        tracing::warn!(locked, "could not update body overflow");
    }
}
