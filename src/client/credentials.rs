//! Explicit cookie jar for credentialed requests. The backend manages the
//! session through `Set-Cookie` responses; modeling the jar as a capability
//! trait keeps the client testable with an injected fake store and lets the
//! CLI persist the session between invocations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Cookie storage consulted and updated on every request.
pub trait CredentialStore: Send + Sync {
    /// Value of a cookie by name, if present.
    fn get(&self, name: &str) -> Option<String>;

    /// Ingest one `Set-Cookie` header value from a response.
    fn observe(&self, set_cookie: &str);

    /// Render the jar as a `Cookie` request header, `None` when empty.
    fn cookie_header(&self) -> Option<String>;
}

/// In-memory cookie jar preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    cookies: RwLock<Vec<(String, String)>>,
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    cookies: Vec<(String, String)>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a persisted session. A missing file yields an empty jar; an
    /// unreadable or malformed file is an error so a corrupt session is
    /// never silently discarded.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("no session file at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)?;
        let session: SessionFile = serde_json::from_str(&contents)?;

        Ok(Self {
            cookies: RwLock::new(session.cookies),
        })
    }

    /// Persist the jar for the next invocation.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let cookies = self
            .cookies
            .read()
            .map_err(|_| anyhow::anyhow!("cookie store lock poisoned"))?
            .clone();

        let contents = serde_json::to_string_pretty(&SessionFile { cookies })?;
        fs::write(path, contents)?;

        Ok(())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.read().ok()?;

        cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn observe(&self, set_cookie: &str) {
        let Some((pair, attributes)) = split_set_cookie(set_cookie) else {
            return;
        };
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };

        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let value = value.trim().to_string();

        let Ok(mut cookies) = self.cookies.write() else {
            return;
        };

        if is_deletion(&attributes) {
            cookies.retain(|(n, _)| n != name);
            return;
        }

        match cookies.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => cookies.push((name.to_string(), value)),
        }
    }

    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read().ok()?;

        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|(n, v)| format!("{n}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Split a `Set-Cookie` value into the leading `name=value` pair and the
/// remaining attributes.
fn split_set_cookie(set_cookie: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = set_cookie.split(';');
    let pair = parts.next()?.trim();

    if pair.is_empty() {
        return None;
    }

    Some((pair, parts.map(str::trim).collect()))
}

/// The backend ends sessions by re-setting the cookie with `Max-Age=0`.
fn is_deletion(attributes: &[&str]) -> bool {
    attributes
        .iter()
        .any(|a| a.eq_ignore_ascii_case("max-age=0"))
}
