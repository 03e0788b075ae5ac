//! Gallery feed page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The feed scrolls inside a `ScrollArea`; one provider with the feed scope
//! id covers every card and the load-more sentinel, so the whole page shares
//! a single native observer rooted at the scroll container.

use leptos::prelude::*;

use crate::components::gallery_card::GalleryCard;
use crate::components::load_more::LoadMoreSentinel;
use crate::components::scroll_area::ScrollArea;
use crate::observer::IntersectionObserverProvider;
use crate::state::gallery::{FEED_SCOPE_ID, GalleryState};

/// Infinite feed of demo cards.
#[component]
pub fn GalleryPage() -> impl IntoView {
    let gallery = expect_context::<RwSignal<GalleryState>>();
    let items = move || gallery.with(|state| state.items.clone());

    view! {
        <main class="gallery-page">
            <h1 class="gallery-page__title">"Gallery"</h1>
            <ScrollArea class="gallery-page__feed">
                <IntersectionObserverProvider id=FEED_SCOPE_ID>
                    <div class="gallery-grid">
                        <For each=items key=|item| item.id.clone() children=|item| view! { <GalleryCard item=item/> }/>
                    </div>
                    <LoadMoreSentinel/>
                </IntersectionObserverProvider>
            </ScrollArea>
        </main>
    }
}
