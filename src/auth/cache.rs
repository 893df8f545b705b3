//! On-disk token cache that decorates any [`TokenSource`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{Error, Result};

use super::{Token, TokenSource};

/// File name used under the per-user config directory by default.
const DEFAULT_FILE_NAME: &str = "robinhood.token";

/// A [`TokenSource`] decorator that persists the obtained token to a file.
///
/// The cache avoids re-authenticating (and re-prompting for MFA) across
/// process runs: once a login succeeds, the token is written to disk and
/// reused on subsequent calls until the file goes missing or becomes
/// unreadable. A cached token is returned **without any expiry check**; a
/// stale access token is the HTTP layer's problem, surfaced as a 401 that
/// the caller answers by re-acquiring through this source.
///
/// Any parse failure or structurally incomplete token in the file is treated
/// as "not cached" and silently (at `debug` level) falls through to a fresh
/// login. This is deliberate graceful fallback, not an oversight.
///
/// # Concurrency
///
/// The read-check-write sequence is not atomic and the file is not locked.
/// At most one process is expected to use a given cache path; concurrent
/// writers race with last-writer-wins.
///
/// # Example
///
/// ```no_run
/// use robinhood_rs::auth::{Credentials, TokenCache, TokenSource};
///
/// # async fn example() -> robinhood_rs::Result<()> {
/// let creds = Credentials::new("user@example.com", "hunter2");
/// let cache = TokenCache::with_default_path(creds)?;
/// let token = cache.token().await?;
/// # Ok(())
/// # }
/// ```
pub struct TokenCache {
    source: Box<dyn TokenSource>,
    path: PathBuf,
}

impl TokenCache {
    /// Wrap a source, caching its token at an explicit path.
    pub fn new(source: impl TokenSource + 'static, path: impl Into<PathBuf>) -> Self {
        Self {
            source: Box::new(source),
            path: path.into(),
        }
    }

    /// Wrap a source, caching under the per-user config directory
    /// (`<config-dir>/robinhood.token`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no config directory can be determined
    /// for the current user.
    pub fn with_default_path(source: impl TokenSource + 'static) -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no per-user config directory available".into()))?;
        Ok(Self::new(source, dir.join(DEFAULT_FILE_NAME)))
    }

    /// The path this cache reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached token, if the file holds a structurally valid one.
    ///
    /// Empty files, unparseable JSON, and tokens missing either field all
    /// yield `None`.
    async fn read_cached(&self) -> Result<Option<Token>> {
        match fs::metadata(&self.path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let bytes = fs::read(&self.path).await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        match serde_json::from_slice::<Token>(&bytes) {
            Ok(token) if token.is_usable() => Ok(Some(token)),
            Ok(_) => {
                tracing::debug!(path = %self.path.display(), "cached token incomplete; re-authenticating");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "cached token unreadable; re-authenticating");
                Ok(None)
            }
        }
    }

    async fn ensure_parent_dir(&self) -> std::io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if fs::metadata(dir).await.is_ok() {
            return Ok(());
        }
        fs::create_dir_all(dir).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(dir, std::fs::Permissions::from_mode(0o750)).await?;
        }
        Ok(())
    }

    async fn persist(&self, token: &Token) -> std::io::Result<()> {
        let bytes = serde_json::to_vec(token).map_err(std::io::Error::other)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o640);

        let mut file = options.open(&self.path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl TokenSource for TokenCache {
    /// Return the cached token if present and valid, otherwise authenticate
    /// through the wrapped source and persist the result.
    ///
    /// # Errors
    ///
    /// - Directory creation and file stat/read failures are fatal
    ///   ([`Error::Io`]).
    /// - Errors from the wrapped source (including [`Error::MissingMfa`])
    ///   propagate unchanged.
    /// - If the fresh token cannot be written, the call fails with
    ///   [`Error::CachePersist`] which still carries the token; recover it
    ///   with [`Error::persisted_token`](crate::Error::persisted_token).
    async fn token(&self) -> Result<Token> {
        self.ensure_parent_dir().await?;

        if let Some(token) = self.read_cached().await? {
            tracing::debug!(path = %self.path.display(), "using cached token");
            return Ok(token);
        }

        let token = self.source.token().await?;

        match self.persist(&token).await {
            Ok(()) => Ok(token),
            Err(source) => {
                tracing::warn!(path = %self.path.display(), error = %source, "failed to persist token");
                Err(Error::CachePersist {
                    token: Box::new(token),
                    source,
                })
            }
        }
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("path", &self.path)
            .finish()
    }
}
