use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Expenses,
    Income,
    AdminCategories,
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Public,
    Authenticated,
    Privileged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/expenses" => Route::Expenses,
            "/income" => Route::Income,
            "/admin/categories" => Route::AdminCategories,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Expenses => "/expenses",
            Route::Income => "/income",
            Route::AdminCategories => "/admin/categories",
            Route::NotFound => "/404",
        }
    }

    pub fn guard(self) -> Guard {
        match self {
            Route::Dashboard | Route::Expenses | Route::Income => Guard::Authenticated,
            Route::AdminCategories => Guard::Privileged,
            Route::Landing | Route::Login | Route::Register | Route::NotFound => Guard::Public,
        }
    }

    /// Where a navigation to `self` actually lands, given the session as it
    /// is right now.
    pub fn resolve(self, session: &Session) -> Route {
        let access = match self.guard() {
            Guard::Public => Access::Allow,
            Guard::Authenticated => require_authenticated(session),
            Guard::Privileged => require_privileged(session),
        };
        match access {
            Access::Allow => self,
            Access::Redirect(target) => {
                log::debug!("{} redirected to {}", self.path(), target.path());
                target
            }
        }
    }
}

/// Route the address bar should be rewritten to, if the requested one is
/// not reachable with the current session.
pub fn redirect_target(requested: Route, session: &Session) -> Option<Route> {
    let resolved = requested.resolve(session);
    (resolved != requested).then_some(resolved)
}

pub fn require_authenticated(session: &Session) -> Access {
    if session.is_authenticated() {
        Access::Allow
    } else {
        Access::Redirect(Route::Login)
    }
}

pub fn require_privileged(session: &Session) -> Access {
    if !session.is_authenticated() {
        Access::Redirect(Route::Login)
    } else if !session.is_privileged() {
        Access::Redirect(Route::Landing)
    } else {
        Access::Allow
    }
}
