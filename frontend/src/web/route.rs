//! Route table and navigation guard
//!
//! Pure routing logic with no DOM access: path parsing, per-route auth
//! flags and the guard decision. `web::router` applies it to the browser
//! history.

use merq_shared::Id;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

/// Upper bound on chained redirects (alias, guard, guard).
const MAX_REDIRECTS: usize = 4;

// =========================================================
// Routes
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Public landing page
    #[default]
    Home,
    Login,
    Register,
    UserDashboard {
        username: String,
    },
    RoadmapCreate {
        username: String,
    },
    RoadmapDetail {
        username: String,
        roadmap_id: Id,
    },
    Settings {
        username: String,
    },
    NotFound,
}

impl AppRoute {
    /// Matches a path (without query) against the route table.
    ///
    /// Legacy aliases are not routes; see [`alias_target`].
    pub fn from_path(path: &str) -> Self {
        // `/jos%C3%A9` names the user `josé`
        let decoded: Vec<Cow<'_, str>> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(|segment| &**segment).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["auth", "login"] => Self::Login,
            ["auth", "register"] => Self::Register,
            [username] => Self::UserDashboard {
                username: username.to_string(),
            },
            [username, "roadmaps", "new"] => Self::RoadmapCreate {
                username: username.to_string(),
            },
            [username, "roadmaps", id] => match id.parse() {
                Ok(roadmap_id) => Self::RoadmapDetail {
                    username: username.to_string(),
                    roadmap_id,
                },
                Err(_) => Self::NotFound,
            },
            [username, "settings"] => Self::Settings {
                username: username.to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// Signed-in users only
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::UserDashboard { .. }
                | Self::RoadmapCreate { .. }
                | Self::RoadmapDetail { .. }
                | Self::Settings { .. }
        )
    }

    /// Signed-in users are sent to their dashboard instead
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// Old paths kept working by redirecting to their current location.
pub fn alias_target(path: &str) -> Option<&'static str> {
    match path {
        "/login" => Some(LOGIN_PATH),
        "/register" => Some(REGISTER_PATH),
        _ => None,
    }
}

// =========================================================
// Locations
// =========================================================

/// A full path split into path and raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    pub fn parse(full_path: &str) -> Self {
        let (path, query) = match full_path.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (full_path, None),
        };
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self {
            path,
            query: query.filter(|q| !q.is_empty()),
        }
    }

    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Decoded value of the first `name=` pair in the query.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// The login page, remembering where the user was headed.
pub fn login_redirect(full_path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(full_path.as_bytes()).collect();
    // `/` stays readable in the address bar
    format!("{LOGIN_PATH}?redirect={}", encoded.replace("%2F", "/"))
}

// =========================================================
// Guard
// =========================================================

/// What the guard needs to know about the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(username: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            username: Some(username.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(AppRoute),
    Redirect(String),
}

/// Decides whether `route` (reached through `full_path`) may be shown.
pub fn guard(route: &AppRoute, full_path: &str, session: &Session) -> Navigation {
    if route.requires_auth() && !session.authenticated {
        return Navigation::Redirect(login_redirect(full_path));
    }
    if route.is_guest_only() && session.authenticated {
        if let Some(username) = &session.username {
            return Navigation::Redirect(UserRoutes::new(username).dashboard());
        }
    }
    Navigation::Proceed(route.clone())
}

/// Final destination of a navigation after aliases and guard redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub route: AppRoute,
    pub path: String,
}

pub fn resolve(full_path: &str, session: &Session) -> Resolved {
    let mut location = Location::parse(full_path);

    for _ in 0..MAX_REDIRECTS {
        if let Some(target) = alias_target(&location.path) {
            location.path = target.to_string();
            continue;
        }
        let route = AppRoute::from_path(&location.path);
        match guard(&route, &location.full_path(), session) {
            Navigation::Proceed(route) => {
                return Resolved {
                    route,
                    path: location.full_path(),
                };
            }
            Navigation::Redirect(next) => location = Location::parse(&next),
        }
    }

    Resolved {
        route: AppRoute::NotFound,
        path: location.full_path(),
    }
}

// =========================================================
// Per-user paths
// =========================================================

/// Paths under a user's namespace (`/<username>/...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoutes {
    username: String,
}

impl UserRoutes {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }

    pub fn dashboard(&self) -> String {
        format!("/{}", self.username)
    }

    pub fn settings(&self) -> String {
        format!("/{}/settings", self.username)
    }

    pub fn new_roadmap(&self) -> String {
        format!("/{}/roadmaps/new", self.username)
    }

    pub fn roadmap(&self, id: Id) -> String {
        format!("/{}/roadmaps/{id}", self.username)
    }

    pub fn new_course(&self) -> String {
        format!("/{}/courses/new", self.username)
    }

    pub fn course(&self, id: Id) -> String {
        format!("/{}/courses/{id}", self.username)
    }
}
