//! [`Session`] collaborator definitions.

/// Session the listings are browsed under.
///
/// The only contract with the filtering core is whether a user is present;
/// the HTTP remote additionally uses the credentials to authorize its
/// requests. Filtering logic never branches on it.
pub trait Session {
    /// Returns the credentials token of the present user, if any.
    fn credentials(&self) -> Option<&str>;

    /// Indicates whether a user is present.
    fn is_present(&self) -> bool {
        self.credentials().is_some()
    }
}

/// Guest session with no user present.
impl Session for () {
    fn credentials(&self) -> Option<&str> {
        None
    }
}
