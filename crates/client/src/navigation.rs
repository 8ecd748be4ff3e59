//! Navigation intents.
//!
//! The client core never redirects by itself. Terminal auth failures and
//! logout report a [`Destination`] through the [`Navigator`] seam; the
//! hosting application shell owns the actual page change.

/// A navigation target the hosting shell knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The login surface. Reported on logout and on terminal refresh
    /// failure.
    Login,
}

/// Sink for navigation intents, plus a location query used to avoid
/// redirect loops (a logout while already on the login surface must not
/// re-navigate there).
pub trait Navigator: Send + Sync {
    /// Report that the shell should navigate to `dest`.
    fn redirect(&self, dest: Destination);

    /// Whether the shell is currently at `dest`.
    fn is_at(&self, _dest: Destination) -> bool {
        false
    }
}

/// Navigator that drops all intents. For headless use and tests that do
/// not care about navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, _dest: Destination) {}
}
