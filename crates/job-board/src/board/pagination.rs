//! Page indicator window for paginated listings.
//!
//! The window always shows the first page, up to three pages centred on the active
//! one, the last page, and ellipses where pages were skipped. Previous/next requests
//! are clamped to the valid page range.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    Previous { target: u32, disabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, disabled: bool },
}

impl PageItem {
    /// Page requested when the item is clicked, `None` for ellipses and disabled
    /// controls.
    pub fn target(&self) -> Option<u32> {
        match *self {
            PageItem::Previous { target, disabled } | PageItem::Next { target, disabled } => {
                (!disabled).then_some(target)
            }
            PageItem::Page { number, .. } => Some(number),
            PageItem::Ellipsis => None,
        }
    }
}

/// Ordered page indicators for one `(active_page, total_pages)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub active_page: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
}

impl PageWindow {
    pub fn compute(active_page: u32, total_pages: u32) -> Self {
        let active = i64::from(active_page);
        let total = i64::from(total_pages);
        let mut items = Vec::with_capacity(9);

        items.push(PageItem::Previous {
            target: active_page.saturating_sub(1).max(1),
            disabled: active_page <= 1,
        });
        items.push(PageItem::Page {
            number: 1,
            active: active_page == 1,
        });

        if active > 3 {
            items.push(PageItem::Ellipsis);
        }

        for page in (active - 1)..=(active + 1) {
            if page > 1 && page < total {
                let number = page as u32;
                items.push(PageItem::Page {
                    number,
                    active: number == active_page,
                });
            }
        }

        if active < total - 2 {
            items.push(PageItem::Ellipsis);
        }

        if total_pages > 1 {
            items.push(PageItem::Page {
                number: total_pages,
                active: active_page == total_pages,
            });
        }

        items.push(PageItem::Next {
            target: active_page.saturating_add(1).min(total_pages).max(1),
            disabled: active_page >= total_pages,
        });

        Self {
            active_page,
            total_pages,
            items,
        }
    }

    /// Page numbers in render order, skipping ellipses and prev/next.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    pub fn links(&self, href: &str) -> Vec<PageLink> {
        self.items
            .iter()
            .map(|item| PageLink::from_item(item, href))
            .collect()
    }
}

/// Serialisable control for clients that navigate by URL rather than callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

impl PageLink {
    fn from_item(item: &PageItem, base: &str) -> Self {
        let href = item.target().map(|page| page_href(base, page));
        match *item {
            PageItem::Previous { disabled, .. } => Self {
                label: "Previous".to_string(),
                href,
                active: false,
                disabled,
            },
            PageItem::Next { disabled, .. } => Self {
                label: "Next".to_string(),
                href,
                active: false,
                disabled,
            },
            PageItem::Page { number, active } => Self {
                label: number.to_string(),
                href,
                active,
                disabled: false,
            },
            PageItem::Ellipsis => Self {
                label: "...".to_string(),
                href: None,
                active: false,
                disabled: true,
            },
        }
    }
}

fn page_href(base: &str, page: u32) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}page={page}")
}

/// Click-driven navigation over a [`PageWindow`].
pub struct Pager<F> {
    window: PageWindow,
    on_page_change: F,
}

impl<F> Pager<F>
where
    F: FnMut(u32),
{
    pub fn render(active_page: u32, total_pages: u32, on_page_change: F) -> Self {
        Self {
            window: PageWindow::compute(active_page, total_pages),
            on_page_change,
        }
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn items(&self) -> &[PageItem] {
        &self.window.items
    }

    /// Fires the page-change callback for a clickable item and returns the page sent.
    pub fn click(&mut self, item: &PageItem) -> Option<u32> {
        let page = item.target()?;
        (self.on_page_change)(page);
        Some(page)
    }

    pub fn previous(&mut self) -> Option<u32> {
        let item = *self.window.items.first()?;
        self.click(&item)
    }

    pub fn next(&mut self) -> Option<u32> {
        let item = *self.window.items.last()?;
        self.click(&item)
    }

    /// Clicks the rendered indicator for `page`; pages outside the window are ignored.
    pub fn select(&mut self, page: u32) -> Option<u32> {
        let item = self
            .window
            .items
            .iter()
            .copied()
            .find(|item| matches!(item, PageItem::Page { number, .. } if *number == page))?;
        self.click(&item)
    }
}
