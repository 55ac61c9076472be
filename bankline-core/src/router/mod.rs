//! Router - route table, auth guard and path resolution
//!
//! Resolution is synchronous: `/` becomes `/login`, then the guard runs and
//! redirects are followed until a route is entered.

mod guard;
mod routes;

pub use guard::{guard, guard_with_storage, Navigation};
pub use routes::{route_table, Route};

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStorage;

/// Redirect chains longer than this are treated as a loop
const MAX_REDIRECTS: usize = 4;

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Route finally entered
    pub route: Route,
    /// Routes redirected away from, in order
    pub redirects: Vec<Route>,
}

impl Resolved {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Resolve `path` against the route table and the guard.
///
/// Unknown paths give [`Error::NotFound`].
pub fn navigate(path: &str, storage: &dyn KeyValueStorage) -> Result<Resolved> {
    let mut route =
        Route::parse(path).ok_or_else(|| Error::not_found(format!("No route for '{}'", path)))?;
    let mut redirects = Vec::new();

    loop {
        let next = match route {
            Route::Root => Navigation::Redirect(Route::Login),
            ref target => guard_with_storage(target, storage)?,
        };

        match next {
            Navigation::Proceed => {
                tracing::debug!(route = %route, "Route entered");
                return Ok(Resolved { route, redirects });
            }
            Navigation::Redirect(to) => {
                if redirects.len() >= MAX_REDIRECTS {
                    return Err(Error::Other(format!("Redirect loop resolving '{}'", path)));
                }
                tracing::debug!(from = %route, to = %to, "Redirected");
                redirects.push(std::mem::replace(&mut route, to));
            }
        }
    }
}
