//! Static route table: descriptors, nesting, aliases, and path matching.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at startup and shared read-only with the navigation guard.
//! Construction validates the invariants the guard relies on, most
//! importantly that the login route is the only public route, so the
//! forced-logout redirect can never bounce off another auth check.
//!
//! DESIGN
//! ======
//! Nested routes are flattened on construction. A child inherits its parent's
//! `requires_auth` and, unless it names its own, the parent's required role.
//! Matching prefers an exact static path, then the first `:param` pattern in
//! declaration order.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use crate::config::GuardConfig;
use crate::error::RouteTableError;
use crate::session::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub requires_auth: bool,
    pub required_role: Option<Role>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    /// A route reachable without a session. Only the login route may be public.
    pub fn public(path: impl Into<String>) -> Self {
        Self { path: path.into(), requires_auth: false, required_role: None, children: Vec::new() }
    }

    pub fn protected(path: impl Into<String>) -> Self {
        Self { path: path.into(), requires_auth: true, required_role: None, children: Vec::new() }
    }

    pub fn for_role(path: impl Into<String>, role: Role) -> Self {
        Self { path: path.into(), requires_auth: true, required_role: Some(role), children: Vec::new() }
    }

    /// Attach nested routes. Child paths are relative to this route.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// Where a path lands in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Route(&'a RouteDescriptor),
    /// Alias; navigate to the contained path instead.
    Redirect(&'a str),
    Unknown,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
    routes: Vec<RouteDescriptor>,
    redirects: Vec<(String, String)>,
}

impl RouteTable {
    /// Flatten and validate `routes`.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found.
    pub fn new(login_path: &str, routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut flat = Vec::new();
        for route in routes {
            if !route.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(route.path));
            }
            flatten(route, None, &mut flat);
        }

        let mut seen_login = false;
        for (idx, route) in flat.iter().enumerate() {
            if flat[..idx].iter().any(|earlier| earlier.path == route.path) {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
            if let Some(role) = &route.required_role {
                if !role.is_recognized() {
                    return Err(RouteTableError::UnrecognizedRole {
                        path: route.path.clone(),
                        role: role.to_string(),
                    });
                }
                if !route.requires_auth {
                    return Err(RouteTableError::RoleWithoutAuth(route.path.clone()));
                }
            }
            if route.path == login_path {
                if route.requires_auth {
                    return Err(RouteTableError::LoginRequiresAuth(route.path.clone()));
                }
                seen_login = true;
            } else if !route.requires_auth {
                return Err(RouteTableError::ExtraPublicRoute(route.path.clone()));
            }
        }
        if !seen_login {
            return Err(RouteTableError::MissingLoginRoute(login_path.to_owned()));
        }

        Ok(Self { login_path: login_path.to_owned(), routes: flat, redirects: Vec::new() })
    }

    /// Register an alias such as `/` → `/login`.
    ///
    /// # Errors
    ///
    /// `DanglingRedirect` if `to` is not a declared route path.
    pub fn with_redirect(mut self, from: &str, to: &str) -> Result<Self, RouteTableError> {
        if !self.routes.iter().any(|route| route.path == to) {
            return Err(RouteTableError::DanglingRedirect { from: from.to_owned(), to: to.to_owned() });
        }
        if self.routes.iter().any(|route| route.path == from)
            || self.redirects.iter().any(|(existing, _)| existing == from)
        {
            return Err(RouteTableError::DuplicatePath(from.to_owned()));
        }
        self.redirects.push((from.to_owned(), to.to_owned()));
        Ok(self)
    }

    /// The portal's stock route table.
    ///
    /// # Errors
    ///
    /// Only if `config` paths collide with the fixed portal routes.
    pub fn portal_default(config: &GuardConfig) -> Result<Self, RouteTableError> {
        let routes = vec![
            RouteDescriptor::public(config.login_path.as_str()),
            RouteDescriptor::for_role(config.admin_home.as_str(), Role::Admin),
            RouteDescriptor::for_role(config.agent_home.as_str(), Role::Agent),
            RouteDescriptor::protected("/clients"),
            RouteDescriptor::protected("/clients/new"),
            RouteDescriptor::for_role("/clients/:id/edit", Role::Agent),
            RouteDescriptor::protected("/accounts"),
            RouteDescriptor::for_role("/accounts/unassigned", Role::Admin),
            RouteDescriptor::protected("/transactions"),
            RouteDescriptor::protected("/logs").with_children(vec![
                RouteDescriptor::protected("client"),
                RouteDescriptor::protected("account"),
                RouteDescriptor::protected("email"),
            ]),
        ];
        Self::new(&config.login_path, routes)?.with_redirect("/", &config.login_path)
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Match a location path (query string and fragment are ignored).
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let path = normalize_path(path);
        if let Some((_, to)) = self.redirects.iter().find(|(from, _)| from == path) {
            return Resolution::Redirect(to.as_str());
        }
        if let Some(route) = self.routes.iter().find(|route| route.path == path) {
            return Resolution::Route(route);
        }
        self.routes
            .iter()
            .find(|route| pattern_matches(&route.path, path))
            .map_or(Resolution::Unknown, Resolution::Route)
    }
}

fn flatten(route: RouteDescriptor, parent: Option<&RouteDescriptor>, out: &mut Vec<RouteDescriptor>) {
    let RouteDescriptor { path, requires_auth, required_role, children } = route;
    let resolved = match parent {
        Some(parent) => RouteDescriptor {
            path: join_path(&parent.path, &path),
            requires_auth: requires_auth || parent.requires_auth,
            required_role: required_role.or_else(|| parent.required_role.clone()),
            children: Vec::new(),
        },
        None => RouteDescriptor { path: normalize_path(&path).to_owned(), requires_auth, required_role, children: Vec::new() },
    };
    out.push(resolved.clone());
    for child in children {
        flatten(child, Some(&resolved), out);
    }
}

fn join_path(parent: &str, child: &str) -> String {
    let child = child.trim_matches('/');
    if child.is_empty() {
        return parent.to_owned();
    }
    format!("{}/{child}", parent.trim_end_matches('/'))
}

/// Strip query, fragment, and a trailing slash (except for the root).
pub(crate) fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    if !pattern.contains(':') {
        return false;
    }
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let matched = if expected.starts_with(':') {
                    !actual.is_empty()
                } else {
                    expected == actual
                };
                if !matched {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
