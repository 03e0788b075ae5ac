//! Feed card that renders its body only while near the viewport.
//!
//! DESIGN
//! ======
//! Off-screen cards keep their last measured height pinned and drop the
//! body, so a long feed holds only a few screens of heavy markup while the
//! scroll position stays put.

use leptos::prelude::*;

use crate::observer::{InViewHandle, use_in_view_dynamic};
use crate::state::gallery::GalleryItem;

/// One gallery item inside the feed scope.
#[component]
pub fn GalleryCard(item: GalleryItem) -> impl IntoView {
    let handle: InViewHandle = use_in_view_dynamic(false, item.id.clone());
    let visible = handle.visible;
    let GalleryItem { id, title, color, body_lines } = item;

    view! {
        <div class="gallery-card" data-item=id node_ref=handle.node_ref>
            <Show
                when=move || visible.get()
                fallback=|| view! { <div class="gallery-card__placeholder" aria-hidden="true"></div> }
            >
                <div class="gallery-card__swatch" style=format!("background: {color}")></div>
                <h3 class="gallery-card__title">{title.clone()}</h3>
                <div class="gallery-card__body">
                    {(0..body_lines).map(|line| view! { <p class="gallery-card__line">{format!("Note {}", line + 1)}</p> }).collect_view()}
                </div>
            </Show>
        </div>
    }
}
