use super::auth::Session;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

/// Decides whether a request for `path` may proceed.
///
/// The dashboard is only for signed-in users; everything else (the login
/// page included) is only for anonymous ones.
pub fn authorize(session: Option<&Session>, path: &str) -> Decision {
    let is_logged_in = session.is_some();
    let is_on_dashboard = path.starts_with(DASHBOARD_PATH);

    match (is_logged_in, is_on_dashboard) {
        (true, true) | (false, false) => Decision::Allow,
        (false, true) => Decision::Redirect(LOGIN_PATH),
        (true, false) => Decision::Redirect(DASHBOARD_PATH),
    }
}
