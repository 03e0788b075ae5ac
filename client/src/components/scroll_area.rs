//! Scrollable region that doubles as the visibility root.
//!
//! A provider nested inside a `ScrollArea` uses the area's container as the
//! observer root instead of the browser viewport.

use leptos::html::Div;
use leptos::prelude::*;

/// Container handle published to descendants.
#[derive(Clone, Copy)]
pub struct ScrollAreaContext {
    pub node_ref: NodeRef<Div>,
}

/// Overflow container; children scroll inside it.
#[component]
pub fn ScrollArea(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let node_ref = NodeRef::<Div>::new();
    provide_context(ScrollAreaContext { node_ref });

    view! {
        <div class=format!("scroll-area {class}") node_ref=node_ref>
            {children()}
        </div>
    }
}
