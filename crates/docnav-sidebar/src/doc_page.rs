//! Doc page routing.
//!
//! Maps a browser location to the page's active path and the id of the
//! sidebar that should accompany it.

use std::collections::HashMap;

/// Resolved doc page for a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocRoute {
    /// No doc route matches the location.
    NotFound,
    /// A doc page.
    Page {
        /// Path used to highlight the sidebar.
        active_path: String,
        /// Sidebar for the page, `None` when the page has none.
        sidebar: Option<String>,
        /// Whether this is the docs home page.
        is_home_page: bool,
    },
}

/// Doc routes and their sidebar assignment for one docs version.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    base_path: String,
    routes: Vec<String>,
    permalink_to_sidebar: HashMap<String, String>,
    home_page_path: Option<String>,
    default_sidebar: Option<String>,
}

impl RouteTable {
    /// Create a route table.
    ///
    /// Every permalink in `permalink_to_sidebar` is a route as well; extra
    /// `routes` cover pages without a sidebar mapping.
    #[must_use]
    pub fn new(
        routes: Vec<String>,
        permalink_to_sidebar: HashMap<String, String>,
        home_page_path: Option<String>,
    ) -> Self {
        let mut all_routes = routes;
        let mut permalinks: Vec<&String> = permalink_to_sidebar.keys().collect();
        permalinks.sort_unstable();
        for permalink in permalinks {
            if !all_routes.contains(permalink) {
                all_routes.push(permalink.clone());
            }
        }

        Self {
            base_path: "/".to_owned(),
            routes: all_routes,
            permalink_to_sidebar,
            home_page_path,
            default_sidebar: None,
        }
    }

    /// Set the path the docs home page is served at.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the sidebar used for routes without an explicit mapping.
    #[must_use]
    pub fn with_default_sidebar(mut self, default_sidebar: Option<String>) -> Self {
        self.default_sidebar = default_sidebar;
        self
    }

    /// All known routes.
    #[must_use]
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Resolve a location pathname.
    #[must_use]
    pub fn resolve(&self, pathname: &str) -> DocRoute {
        if let Some(home) = &self.home_page_path
            && normalize(pathname) == normalize(&self.base_path)
        {
            return DocRoute::Page {
                active_path: home.clone(),
                sidebar: self.sidebar_for(home),
                is_home_page: true,
            };
        }

        let Some(route) = self.match_route(pathname) else {
            tracing::debug!(path = %pathname, "No doc route matches");
            return DocRoute::NotFound;
        };

        DocRoute::Page {
            active_path: route.to_owned(),
            sidebar: self.sidebar_for(route),
            is_home_page: false,
        }
    }

    fn match_route(&self, pathname: &str) -> Option<&str> {
        let wanted = normalize(pathname);
        self.routes
            .iter()
            .map(String::as_str)
            .find(|route| normalize(route) == wanted)
    }

    fn sidebar_for(&self, path: &str) -> Option<String> {
        self.permalink_to_sidebar
            .get(path)
            .or(self.default_sidebar.as_ref())
            .cloned()
    }
}

/// Drop a trailing slash, keeping the root path intact.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}
