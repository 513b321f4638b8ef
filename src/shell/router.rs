use std::fmt;

use crate::foundation::error::{AtelierError, AtelierResult};

/// Logical page locations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Gallery(String),
}

impl Route {
    pub fn parse(path: &str) -> AtelierResult<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::Home);
        }
        match trimmed.strip_prefix("/gallery/") {
            Some(slug) if !slug.is_empty() && !slug.contains('/') => {
                Ok(Self::Gallery(slug.to_string()))
            }
            _ => Err(AtelierError::validation(format!("unknown route '{path}'"))),
        }
    }

    pub fn gallery_slug(&self) -> Option<&str> {
        match self {
            Self::Home => None,
            Self::Gallery(slug) => Some(slug),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Gallery(slug) => write!(f, "/gallery/{slug}"),
        }
    }
}

/// In-memory session history with browser-like length accounting.
///
/// Going back only pops when there is more than the entry page plus the current one behind it;
/// otherwise "back" is a fresh navigation home, which itself lengthens history.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn current(&self) -> &Route {
        // Never empty.
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    pub fn back(&mut self) -> &Route {
        if self.entries.len() > 2 {
            self.entries.pop();
        } else {
            self.entries.push(Route::Home);
        }
        self.current()
    }
}
