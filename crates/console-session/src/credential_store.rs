use std::collections::BTreeMap;

/// Cookie that carries the proxy-issued session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Trait contract for reading a browser-persisted named value.
pub trait CredentialStore {
    fn read(&self, name: &str) -> Option<String>;

    /// Reads the session token cookie.
    fn session_token(&self) -> Option<String> {
        self.read(SESSION_COOKIE_NAME)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Cookie pairs parsed from a `document.cookie` string or a `Cookie` request header.
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn parse(raw: &str) -> Self {
        let mut cookies = BTreeMap::new();
        for pair in raw.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            // First occurrence wins, as browsers list the most specific path first.
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.trim().to_string());
        }
        Self { cookies }
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CredentialStore for CookieJar {
    fn read(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store used by tests and server-side renders.
pub struct MemoryCredentialStore {
    values: BTreeMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn with_session_token(token: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.insert(SESSION_COOKIE_NAME, token);
        store
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn read(&self, name: &str) -> Option<String> {
        (**self).read(name)
    }
}
