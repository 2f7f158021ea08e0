//! Static route classification shared by the request gate and the view shell.

/// Root path; never rendered, always redirected.
pub const ROOT_PATH: &str = "/";
/// Login page.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated users land.
pub const LANDING_PATH: &str = "/dashboard";

/// Paths reachable without a credential.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH];

/// Namespaces the gate never intercepts: the REST API, built client assets and
/// static images.
const EXCLUDED_NAMESPACES: &[&str] = &["/api", "/pkg", "/assets"];

/// Individual files the gate never intercepts.
const EXCLUDED_FILES: &[&str] = &["/favicon.ico"];

/// Category of a request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// `/`
    Root,
    /// Login-equivalent pages.
    Public,
    /// Everything that needs a valid credential.
    Protected,
    /// Infrastructure paths (API, assets) that are never classified further.
    Excluded,
}

impl RouteClass {
    /// `true` for root and public pages, which render without navigation chrome.
    #[must_use]
    pub fn is_bare(self) -> bool {
        matches!(self, Self::Root | Self::Public)
    }
}

/// Classify a request path. Query strings must already be stripped.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if EXCLUDED_FILES.contains(&path) || EXCLUDED_NAMESPACES.iter().any(|ns| in_namespace(path, ns)) {
        return RouteClass::Excluded;
    }

    let path = normalize(path);
    if path == ROOT_PATH {
        RouteClass::Root
    } else if PUBLIC_PATHS.contains(&path) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

fn in_namespace(path: &str, namespace: &str) -> bool {
    path.strip_prefix(namespace)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Drop one trailing slash (except on `/` itself); empty paths become `/`.
fn normalize(path: &str) -> &str {
    if path.is_empty() {
        return ROOT_PATH;
    }
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
