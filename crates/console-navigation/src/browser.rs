/// Trait contract for the parts of the browser window the console touches.
pub trait BrowserWindow {
    /// Current `location.search`, including the leading `?` when non-empty.
    fn location_search(&self) -> String;

    /// `history.pushState` with a new search string; never reloads the document.
    fn push_state(&mut self, search: &str);

    /// `history.replaceState` with a new search string; never reloads the document.
    fn replace_state(&mut self, search: &str);

    /// Full-page navigation (`location.href = ...`); the current view is discarded.
    fn assign_location(&mut self, href: &str);
}

#[derive(Debug, Clone)]
/// History-stack model of a browser tab used by tests and server-side renders.
pub struct InMemoryBrowser {
    entries: Vec<String>,
    cursor: usize,
    assigned: Vec<String>,
    document_loads: usize,
}

impl InMemoryBrowser {
    pub fn new(initial_search: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_search.into()],
            cursor: 0,
            assigned: Vec::new(),
            document_loads: 1,
        }
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Number of document loads; only the initial one unless a full navigation happened.
    pub fn document_loads(&self) -> usize {
        self.document_loads
    }

    pub fn assigned_locations(&self) -> &[String] {
        self.assigned.as_slice()
    }

    /// Moves one entry back, as the back button does. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl Default for InMemoryBrowser {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl BrowserWindow for InMemoryBrowser {
    fn location_search(&self) -> String {
        self.entries.get(self.cursor).cloned().unwrap_or_default()
    }

    fn push_state(&mut self, search: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(search.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn replace_state(&mut self, search: &str) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            *entry = search.to_string();
        }
    }

    fn assign_location(&mut self, href: &str) {
        self.assigned.push(href.to_string());
        self.document_loads += 1;
    }
}

impl<T: BrowserWindow + ?Sized> BrowserWindow for &mut T {
    fn location_search(&self) -> String {
        (**self).location_search()
    }

    fn push_state(&mut self, search: &str) {
        (**self).push_state(search);
    }

    fn replace_state(&mut self, search: &str) {
        (**self).replace_state(search);
    }

    fn assign_location(&mut self, href: &str) {
        (**self).assign_location(href);
    }
}
