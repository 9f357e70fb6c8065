//! HTML rendering of a [`SidebarView`].
//!
//! Produces the theme's menu markup: `menu__list` / `menu__list-item` /
//! `menu__link` classes with state modifiers, tag badges and the responsive
//! container.

use std::borrow::Cow;
use std::fmt::Write;

use crate::container::{ItemView, SidebarView};
use crate::model::is_new_tag;

/// Render the complete sidebar.
pub fn render_sidebar(view: &SidebarView) -> String {
    let mut html = String::with_capacity(4096);

    let _ = writeln!(
        html,
        "<div class=\"{}\">",
        classes(&[
            ("sidebar", true),
            ("sidebar--hideable-navbar", view.hide_on_scroll),
        ])
    );
    let _ = writeln!(
        html,
        "<div class=\"{}\">",
        classes(&[
            ("menu", true),
            ("menu--responsive", true),
            ("sidebar__menu", true),
            ("menu--show", view.mobile_visible),
        ])
    );
    html.push_str("<ul class=\"menu__list\">\n");

    // Logo and search are opaque; placed as-is
    let _ = writeln!(html, "<li class=\"menu__list-item\">{}</li>", view.logo);
    let _ = writeln!(html, "<li class=\"menu__list-item\">{}</li>", view.search);

    render_items(&mut html, &view.items);

    html.push_str("</ul>\n</div>\n</div>");
    html
}

/// Render items recursively.
fn render_items(html: &mut String, items: &[ItemView]) {
    for item in items {
        match item {
            ItemView::Category {
                key,
                label,
                tags,
                collapsible,
                collapsed,
                active,
                tab_index,
                items,
            } => {
                let _ = writeln!(
                    html,
                    "<li class=\"{}\" data-key=\"{}\">",
                    classes(&[
                        ("menu__list-item", true),
                        ("menu__list-item--collapsed", *collapsed),
                    ]),
                    escape(key.as_str()),
                );
                let _ = write!(
                    html,
                    "<a class=\"{}\" href=\"#!\"{}>",
                    classes(&[
                        ("menu__link", true),
                        ("menu__link--sublist", *collapsible),
                        ("menu__link--active", *active),
                    ]),
                    tab_index_attr(*tab_index),
                );
                render_tags(html, tags);
                html.push_str(&escape(label));
                html.push_str("</a>\n");

                html.push_str("<ul class=\"menu__list\">\n");
                render_items(html, items);
                html.push_str("</ul>\n</li>\n");
            }
            ItemView::Link {
                label,
                tags,
                href,
                active,
                external,
                tab_index,
                ..
            } => {
                html.push_str("<li class=\"menu__list-item\">");
                let _ = write!(
                    html,
                    "<a class=\"{}\" href=\"{}\"",
                    classes(&[("menu__link", true), ("menu__link--active", *active)]),
                    escape(href),
                );
                if *active {
                    html.push_str(" aria-current=\"page\"");
                }
                if *external {
                    html.push_str(" target=\"_blank\" rel=\"noreferrer noopener\"");
                }
                html.push_str(&tab_index_attr(*tab_index));
                html.push('>');
                html.push_str(&escape(label));
                render_tags(html, tags);
                html.push_str("</a></li>\n");
            }
        }
    }
}

/// Render tag badges.
fn render_tags(html: &mut String, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    html.push_str("<span class=\"sidebar__labels\">");
    for tag in tags {
        let _ = write!(
            html,
            "<span class=\"{}\">{}</span>",
            classes(&[
                ("sidebar__label", true),
                ("sidebar__label--new", is_new_tag(tag)),
            ]),
            escape(tag),
        );
    }
    html.push_str("</span>");
}

fn tab_index_attr(tab_index: Option<i8>) -> String {
    tab_index.map_or_else(String::new, |t| format!(" tabindex=\"{t}\""))
}

/// Join the class names whose condition holds.
fn classes(entries: &[(&str, bool)]) -> String {
    entries
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for element content and double- or single-quoted attributes.
///
/// Borrows the input when nothing needs escaping, which is the common case
/// for labels and hrefs.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => {
                escaped.push(c);
                continue;
            }
        };
        escaped.push_str(entity);
    }
    Cow::Owned(escaped)
}
