//! Feed state for the gallery page.
//!
//! DESIGN
//! ======
//! Items are generated deterministically from their index so server render
//! and hydration agree without a data source. Card heights vary by index to
//! exercise remembered sizes when cards scroll out and back in.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

/// Scope id of the gallery feed; remembered sizes are keyed under it.
pub const FEED_SCOPE_ID: &str = "feed";

/// Items appended per page load.
pub const PAGE_SIZE: usize = 24;

/// Feed length after which no further pages load.
pub const MAX_ITEMS: usize = 240;

/// Delay before re-checking the load-more sentinel after a page lands.
pub const LOAD_SETTLE_MS: u64 = 150;

const BODY_LINE_CHOICES: [usize; 5] = [2, 5, 3, 8, 4];

const PALETTE: [&str; 6] = ["#d9480f", "#1971c2", "#2f9e44", "#ae3ec9", "#f08c00", "#0c8599"];

/// One card in the feed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub color: String,
    pub body_lines: usize,
}

impl GalleryItem {
    /// Demo item for position `index` in the feed.
    #[must_use]
    pub fn demo(index: usize) -> Self {
        Self {
            id: format!("item-{index}"),
            title: format!("Study #{}", index + 1),
            color: PALETTE[index % PALETTE.len()].to_owned(),
            body_lines: BODY_LINE_CHOICES[index % BODY_LINE_CHOICES.len()],
        }
    }
}

/// Loaded items plus paging progress.
#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    pub items: Vec<GalleryItem>,
    pub pages_loaded: usize,
}

impl GalleryState {
    /// State with the first page already loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self::default();
        state.load_next_page();
        state
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.items.len() >= MAX_ITEMS
    }

    /// Whether another page should load while the sentinel is `sentinel_visible`.
    #[must_use]
    pub fn needs_more(&self, sentinel_visible: bool) -> bool {
        sentinel_visible && !self.is_exhausted()
    }

    /// Append the next page; returns how many items were added.
    pub fn load_next_page(&mut self) -> usize {
        let start = self.items.len();
        let end = (start + PAGE_SIZE).min(MAX_ITEMS);
        if start >= end {
            return 0;
        }
        self.items.extend((start..end).map(GalleryItem::demo));
        self.pages_loaded += 1;
        end - start
    }
}
