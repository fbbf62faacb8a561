//! Session identity.
//!
//! A session is identified by its id together with the deployment it belongs
//! to: the canonical context path of the application and the first virtual
//! host configured for it. Two deployments at the same path on different
//! virtual hosts never share sessions.

use std::fmt;

/// Virtual host recorded for deployments that do not configure one.
pub const DEFAULT_VIRTUAL_HOST: &str = "0.0.0.0";

/// Composite, immutable identity of a stored session.
///
/// An absent context path and an empty one are the same identity: both are
/// normalized to `""` on construction, so equality and hashing never
/// distinguish them. Whether an empty path is queried as `''` or as `NULL` is
/// a dialect decision made by the [`SessionTableSchema`](crate::SessionTableSchema).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    id: String,
    canonical_context_path: String,
    virtual_host: String,
}

impl SessionKey {
    /// Creates a key from its three parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use tower_sessions_seaorm_cluster_store::SessionKey;
    ///
    /// let absent = SessionKey::new("s1", None::<String>, "host1");
    /// let empty = SessionKey::new("s1", Some(""), "host1");
    /// assert_eq!(absent, empty);
    /// ```
    pub fn new(
        id: impl Into<String>,
        canonical_context_path: Option<impl Into<String>>,
        virtual_host: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            canonical_context_path: canonical_context_path.map(Into::into).unwrap_or_default(),
            virtual_host: virtual_host.into(),
        }
    }

    /// The opaque session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The canonical context path, `""` when the session has no context.
    pub fn canonical_context_path(&self) -> &str {
        &self.canonical_context_path
    }

    /// True when the key carries no context path.
    pub fn has_empty_context_path(&self) -> bool {
        self.canonical_context_path.is_empty()
    }

    /// The first virtual host of the owning deployment.
    pub fn virtual_host(&self) -> &str {
        &self.virtual_host
    }

    /// Synthetic primary key for the row holding this session.
    ///
    /// Context path and virtual host are prefixed with their length, so
    /// underscores inside the parts cannot make two keys share a row id.
    pub fn row_id(&self) -> String {
        format!(
            "{}:{}_{}:{}_{}",
            self.canonical_context_path.len(),
            self.canonical_context_path,
            self.virtual_host.len(),
            self.virtual_host,
            self.id
        )
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.canonical_context_path, self.virtual_host, self.id
        )
    }
}

/// The deployment a store serves: its canonical context path and virtual host.
///
/// Own-node scavenging is scoped to this context, and keys minted through
/// [`SessionContext::key`] always belong to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionContext {
    canonical_context_path: String,
    virtual_host: String,
}

impl SessionContext {
    /// Creates a context from an already canonical path and a virtual host.
    pub fn new(canonical_context_path: impl Into<String>, virtual_host: impl Into<String>) -> Self {
        Self {
            canonical_context_path: canonical_context_path.into(),
            virtual_host: virtual_host.into(),
        }
    }

    /// Derives the context of a deployment from its raw context path and the
    /// virtual hosts it is bound to.
    ///
    /// The root context (`"/"` or `""`) maps to an empty path; otherwise path
    /// separators and dots become underscores. The first virtual host wins;
    /// with none configured [`DEFAULT_VIRTUAL_HOST`] is used.
    ///
    /// ```
    /// use tower_sessions_seaorm_cluster_store::SessionContext;
    ///
    /// let ctx = SessionContext::from_deployment("/shop/v1.2", &["shop.example.com", "alt"]);
    /// assert_eq!(ctx.canonical_context_path(), "_shop_v1_2");
    /// assert_eq!(ctx.virtual_host(), "shop.example.com");
    /// ```
    pub fn from_deployment<S: AsRef<str>>(context_path: &str, virtual_hosts: &[S]) -> Self {
        let canonical_context_path = if context_path.is_empty() || context_path == "/" {
            String::new()
        } else {
            context_path.replace(['/', '.', '\\'], "_")
        };
        let virtual_host = virtual_hosts
            .first()
            .map(|host| host.as_ref().to_string())
            .unwrap_or_else(|| DEFAULT_VIRTUAL_HOST.to_string());

        Self {
            canonical_context_path,
            virtual_host,
        }
    }

    pub fn canonical_context_path(&self) -> &str {
        &self.canonical_context_path
    }

    pub fn virtual_host(&self) -> &str {
        &self.virtual_host
    }

    /// Builds the key of session `id` within this context.
    pub fn key(&self, id: impl Into<String>) -> SessionKey {
        SessionKey::new(
            id,
            Some(self.canonical_context_path.clone()),
            self.virtual_host.clone(),
        )
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new("", DEFAULT_VIRTUAL_HOST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_absent_and_empty_context_are_equal() {
        let absent = SessionKey::new("abc", None::<&str>, "host1");
        let empty = SessionKey::new("abc", Some(""), "host1");

        assert_eq!(absent, empty);
        assert!(absent.has_empty_context_path());

        let mut set = HashSet::new();
        set.insert(absent);
        assert!(set.contains(&empty));
    }

    #[test]
    fn test_all_three_parts_take_part_in_equality() {
        let key = SessionKey::new("abc", Some("/app"), "host1");

        assert_ne!(key, SessionKey::new("abd", Some("/app"), "host1"));
        assert_ne!(key, SessionKey::new("abc", Some("/other"), "host1"));
        assert_ne!(key, SessionKey::new("abc", Some("/app"), "host2"));
    }

    #[test]
    fn test_row_id_joins_context_host_and_id() {
        let key = SessionKey::new("s1", Some("_app"), "host1");
        assert_eq!(key.row_id(), "4:_app_5:host1_s1");
        assert_eq!(SessionKey::new("s1", None::<&str>, "h").row_id(), "0:_1:h_s1");
    }

    #[test]
    fn test_row_id_distinguishes_underscored_parts() {
        let first = SessionKey::new("y", Some("_a"), "h_x");
        let second = SessionKey::new("x_y", Some("_a"), "h");

        assert_ne!(first, second);
        assert_ne!(first.row_id(), second.row_id());
    }

    #[test]
    fn test_root_context_is_canonicalized_to_empty() {
        let ctx = SessionContext::from_deployment("/", &[] as &[&str]);

        assert_eq!(ctx.canonical_context_path(), "");
        assert_eq!(ctx.virtual_host(), DEFAULT_VIRTUAL_HOST);
        assert!(ctx.key("s1").has_empty_context_path());
    }

    #[test]
    fn test_context_mints_keys_in_context() {
        let ctx = SessionContext::from_deployment("/app", &["host1"]);
        let key = ctx.key("s1");

        assert_eq!(key, SessionKey::new("s1", Some("_app"), "host1"));
    }
}
