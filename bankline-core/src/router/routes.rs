//! Route table

use std::fmt;

/// A client route.
///
/// `Root` only ever redirects to `Login`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Register,
    Login,
    Dashboard { user_id: String },
    Profile,
    Beneficiaries,
    Transfer,
    Deposit,
    Transactions,
}

impl Route {
    /// Match a path against the table. Query strings, fragments and
    /// trailing slashes are ignored; unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Root,
            ["register"] => Route::Register,
            ["login"] => Route::Login,
            ["dashboard", user_id] => Route::Dashboard {
                user_id: (*user_id).to_string(),
            },
            ["profile"] => Route::Profile,
            ["beneficiaries"] => Route::Beneficiaries,
            ["transfer"] => Route::Transfer,
            ["deposit"] => Route::Deposit,
            ["transactions"] => Route::Transactions,
            _ => return None,
        };
        Some(route)
    }

    /// Canonical path, with `:userId` filled in
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Register => "/register".to_string(),
            Route::Login => "/login".to_string(),
            Route::Dashboard { user_id } => format!("/dashboard/{}", user_id),
            Route::Profile => "/profile".to_string(),
            Route::Beneficiaries => "/beneficiaries".to_string(),
            Route::Transfer => "/transfer".to_string(),
            Route::Deposit => "/deposit".to_string(),
            Route::Transactions => "/transactions".to_string(),
        }
    }

    /// Route name; `None` for the root redirect
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Route::Root => None,
            Route::Register => Some("register"),
            Route::Login => Some("login"),
            Route::Dashboard { .. } => Some("dashboard"),
            Route::Profile => Some("profile"),
            Route::Beneficiaries => Some("beneficiaries"),
            Route::Transfer => Some("transfer"),
            Route::Deposit => Some("deposit"),
            Route::Transactions => Some("transactions"),
        }
    }

    /// Whether the route is only reachable with a token
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard { .. }
                | Route::Profile
                | Route::Beneficiaries
                | Route::Transfer
                | Route::Deposit
                | Route::Transactions
        )
    }

    /// Login and register: pages a signed-in user is sent away from
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Pattern as written in the route table
    pub fn pattern(&self) -> &'static str {
        match self {
            Route::Dashboard { .. } => "/dashboard/:userId",
            Route::Root => "/",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Profile => "/profile",
            Route::Beneficiaries => "/beneficiaries",
            Route::Transfer => "/transfer",
            Route::Deposit => "/deposit",
            Route::Transactions => "/transactions",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Every route, in table order. `Dashboard` carries an empty id.
pub fn route_table() -> Vec<Route> {
    vec![
        Route::Root,
        Route::Register,
        Route::Login,
        Route::Dashboard {
            user_id: String::new(),
        },
        Route::Profile,
        Route::Beneficiaries,
        Route::Transfer,
        Route::Deposit,
        Route::Transactions,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Root));
        assert_eq!(Route::parse(""), Some(Route::Root));
        assert_eq!(Route::parse("/login/"), Some(Route::Login));
        assert_eq!(Route::parse("/transactions?page=2"), Some(Route::Transactions));
        assert_eq!(
            Route::parse("/dashboard/7"),
            Some(Route::Dashboard {
                user_id: "7".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/dashboard"), None);
        assert_eq!(Route::parse("/dashboard/7/extra"), None);
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_path_round_trip() {
        for path in ["/register", "/login", "/dashboard/42", "/profile", "/deposit"] {
            assert_eq!(Route::parse(path).unwrap().path(), path);
        }
    }

    #[test]
    fn test_auth_requirements() {
        let protected: Vec<_> = route_table()
            .into_iter()
            .filter(|r| r.requires_auth())
            .filter_map(|r| r.name())
            .collect();
        assert_eq!(
            protected,
            vec!["dashboard", "profile", "beneficiaries", "transfer", "deposit", "transactions"]
        );
        assert!(!Route::Root.requires_auth());
        assert!(Route::Login.is_guest_only());
        assert!(!Route::Profile.is_guest_only());
    }
}
