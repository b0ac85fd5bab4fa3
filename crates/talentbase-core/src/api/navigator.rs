//! Hook for sending the user back to the login screen.

/// Path of the login screen.
pub const LOGIN_PAGE: &str = "/login";

/// Whatever front end hosts the client: a router, a terminal prompt, ...
pub trait Navigator: Send + Sync {
    /// Where the user currently is.
    fn current_path(&self) -> String;

    fn navigate(&self, path: &str);
}

/// Navigator for headless use. Never leaves the page it is on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn navigate(&self, _path: &str) {}
}
