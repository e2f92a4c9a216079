//! Route table and session gate

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the client requires a signed-in user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// No session concept at all
    Disabled,
    /// Every app route needs a session
    #[default]
    Required,
}

/// Known client routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` project listing
    Projects,
    /// `/form` new project
    NewProject,
    /// `/project/:id`
    ProjectDetail(String),
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// Anything else
    Unknown(String),
}

impl Route {
    /// Parse a path. Query strings and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Projects,
            "/form" => Route::NewProject,
            "/login" => Route::Login,
            "/register" => Route::Register,
            _ => match trimmed.strip_prefix("/project/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::ProjectDetail(id.to_string())
                }
                _ => Route::Unknown(path.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Projects => "/".to_string(),
            Route::NewProject => "/form".to_string(),
            Route::ProjectDetail(id) => format!("/project/{}", id),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Unknown(path) => path.clone(),
        }
    }

    fn is_auth_screen(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of resolving a route against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Decide what a path shows given the auth mode and whether a session exists
pub fn resolve(path: &str, mode: AuthMode, signed_in: bool) -> Navigation {
    let route = Route::parse(path);

    match mode {
        AuthMode::Disabled => match route {
            Route::Unknown(_) | Route::Login | Route::Register => {
                Navigation::Redirect(Route::Projects)
            }
            route => Navigation::Render(route),
        },
        AuthMode::Required if !signed_in => {
            if route.is_auth_screen() {
                Navigation::Render(route)
            } else {
                Navigation::Redirect(Route::Login)
            }
        }
        AuthMode::Required => match route {
            Route::Unknown(_) | Route::Login | Route::Register => {
                Navigation::Redirect(Route::Projects)
            }
            route => Navigation::Render(route),
        },
    }
}
