//! Opaque widgets shown above the sidebar items.
//!
//! The sidebar has no data dependency on them; it only places their markup.

use std::fmt::Write;

use crate::html::escape;

/// Widget rendered as an opaque block of markup.
pub trait SidebarWidget {
    /// Render the widget's HTML.
    fn render_html(&self) -> String;
}

/// Site logo linking to the site root.
#[derive(Clone, Debug)]
pub struct Logo {
    /// Link target, usually the site base URL.
    pub href: String,
    /// Title shown next to the image.
    pub title: String,
    /// Image source, if any.
    pub src: Option<String>,
    /// Image alternative text.
    pub alt: String,
}

impl SidebarWidget for Logo {
    fn render_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<a class=\"navbar__brand sidebar__logo\" href=\"{}\">",
            escape(&self.href)
        );
        if let Some(src) = &self.src {
            let _ = write!(
                html,
                "<img class=\"navbar__logo\" src=\"{}\" alt=\"{}\">",
                escape(src),
                escape(&self.alt),
            );
        }
        if !self.title.is_empty() {
            let _ = write!(
                html,
                "<strong class=\"navbar__title\">{}</strong>",
                escape(&self.title)
            );
        }
        html.push_str("</a>");
        html
    }
}

/// Search entry point bound to a search index.
#[derive(Clone, Debug)]
pub struct SearchBar {
    /// Search application id.
    pub app_id: Option<String>,
    /// Search-only API key.
    pub api_key: String,
    /// Index name.
    pub index_name: String,
}

impl SidebarWidget for SearchBar {
    fn render_html(&self) -> String {
        let mut html = String::from("<div class=\"navbar__search\" data-search");
        if let Some(app_id) = &self.app_id {
            let _ = write!(html, " data-app-id=\"{}\"", escape(app_id));
        }
        let _ = write!(
            html,
            " data-api-key=\"{}\" data-index-name=\"{}\">",
            escape(&self.api_key),
            escape(&self.index_name),
        );
        html.push_str(
            "<input class=\"navbar__search-input\" type=\"search\" \
             placeholder=\"Search\" aria-label=\"Search\">",
        );
        html.push_str("</div>");
        html
    }
}

/// Widget that renders nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyWidget;

impl SidebarWidget for EmptyWidget {
    fn render_html(&self) -> String {
        String::new()
    }
}
