use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered `application/x-www-form-urlencoded` pairs of a location search string.
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a search string with or without its leading `?`.
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes()).into_owned().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets `name` to `value`: the first occurrence keeps its position, later duplicates are dropped, a
    /// missing name is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        self.pairs.retain_mut(|(key, existing)| {
            if key != name {
                return true;
            }
            if replaced {
                return false;
            }
            *existing = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Serialized pairs without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Search string suitable for `history.pushState`, always starting with `?`.
    pub fn to_search(&self) -> String {
        format!("?{}", self.to_query_string())
    }
}
