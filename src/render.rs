//! HTML rendering.
//!
//! One directory becomes one self-contained page: the stylesheet is inlined,
//! media is referenced relative to the page, and there is no script. The
//! page body comes in two shapes:
//!
//! - **formal**: tiles flow left to right in listing order
//! - **freeform**: tiles sit at their recorded icon positions, with the
//!   cluster centered horizontally
//!
//! [`PageData::center_offset`] being set is what selects freeform.

use crate::types::{EntryKind, EntryRecord, PageData};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/garden.css");

/// Render a directory page to its full HTML document.
pub fn garden_page(page: &PageData) -> Markup {
    let content = match page.center_offset {
        Some(offset) => freeform_body(page, offset),
        None => formal_body(page),
    };
    base_document(page, content)
}

fn base_document(page: &PageData, content: Markup) -> Markup {
    let body_style = page.colors.map(|colors| {
        let (r, g, b) = colors.background;
        format!(
            "background-color: rgb({r}, {g}, {b}); color: {};",
            colors.text.as_css()
        )
    });
    let title = if page.title.is_empty() {
        "garden"
    } else {
        &page.title
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body style=[body_style.as_deref()] {
                @if !page.title.is_empty() {
                    h1 { (page.title) }
                }
                (content)
            }
        }
    }
}

fn formal_body(page: &PageData) -> Markup {
    html! {
        main.formal {
            @for entry in &page.entries {
                div.plot {
                    (tile(entry))
                }
            }
        }
    }
}

fn freeform_body(page: &PageData, offset: f64) -> Markup {
    let shift = format!("margin-left: calc(50% - {offset}px);");
    html! {
        main.freeform style=(shift) {
            @for entry in &page.entries {
                @let place = entry
                    .position
                    .map(|p| format!("left: {}px; top: {}px;", p.x, p.y));
                div.plot style=[place.as_deref()] {
                    (tile(entry))
                }
            }
        }
    }
}

fn tile(entry: &EntryRecord) -> Markup {
    match &entry.kind {
        EntryKind::Directory { summary } => html! {
            a.dir href=(entry.display_name) {
                (entry.display_name)
                span.summary { (summary) }
            }
        },
        EntryKind::Image { width, height } => html! {
            figure {
                img src=(entry.name) alt=(entry.display_name)
                    width=(width) height=(height) loading="lazy";
                (caption(entry))
            }
        },
        EntryKind::Video { width, height } => html! {
            figure {
                video src=(entry.name) width=(width) height=(height)
                    controls preload="metadata" {}
                (caption(entry))
            }
        },
        EntryKind::Audio => html! {
            figure {
                audio src=(entry.name) controls preload="metadata" {}
                (caption(entry))
            }
        },
        EntryKind::Markdown { html } => html! {
            article.patch {
                (PreEscaped(html.as_str()))
            }
        },
        EntryKind::Raw { text } => html! {
            pre.patch { (text) }
        },
        EntryKind::Other => html! {
            a.file href=(entry.name) {
                (entry.display_name)
                @if let Some(size) = &entry.size_label {
                    span.size { (size) }
                }
            }
        },
    }
}

fn caption(entry: &EntryRecord) -> Markup {
    html! {
        div.caption {
            a href=(entry.name) { (entry.display_name) }
            @if let Some(size) = &entry.size_label {
                " "
                span.size { "(" (size) ")" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
