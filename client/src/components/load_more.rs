//! Sentinel at the end of the feed that requests the next page.

use leptos::prelude::*;

use crate::observer::{InViewHandle, use_in_view};
use crate::state::gallery::GalleryState;

/// Loads pages while it sits inside the prefetch region.
///
/// Intersection events only fire on transitions, so after each page lands
/// the sentinel is checked again once layout has settled; a page too short
/// to push it out of the region loads the next one.
#[component]
pub fn LoadMoreSentinel() -> impl IntoView {
    let gallery = expect_context::<RwSignal<GalleryState>>();
    let handle: InViewHandle = use_in_view(false, None);
    let visible = handle.visible;

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let pages = gallery.with(|state| state.pages_loaded);
        if !gallery.with_untracked(|state| state.needs_more(visible.get())) {
            return;
        }
        leptos::leptos_dom::helpers::set_timeout(
            move || {
                let unchanged = gallery.with_untracked(|state| state.pages_loaded) == pages;
                if unchanged && gallery.with_untracked(|state| state.needs_more(visible.get_untracked())) {
                    gallery.update(|state| {
                        state.load_next_page();
                    });
                }
            },
            std::time::Duration::from_millis(crate::state::gallery::LOAD_SETTLE_MS),
        );
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = visible;

    view! {
        <div class="load-more" node_ref=handle.node_ref>
            <Show when=move || !gallery.with(GalleryState::is_exhausted) fallback=|| "End of feed">
                "Loading more…"
            </Show>
        </div>
    }
}
