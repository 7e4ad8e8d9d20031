use crate::dom::tree::FileBlob;

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    /// Nothing selected in an optional single-choice group.
    Null,
    File(FileBlob),
}

/// Ordered field → value mapping built fresh for every submit attempt.
/// Keys may repeat (one entry per selected file).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionPayload {
    entries: Vec<(String, PayloadValue)>,
}

/// A payload entry as it goes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum WirePart<'a> {
    Text(String),
    File(&'a FileBlob),
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: PayloadValue) {
        self.entries.push((name.to_string(), value));
    }

    pub fn entries(&self) -> &[(String, PayloadValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_all(&self, name: &str) -> Vec<&PayloadValue> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v)
            .collect()
    }

    /// Multipart encoding: lists as JSON arrays, booleans as `true`/`false`,
    /// nulls as `null`, files as file parts.
    pub fn wire_parts(&self) -> Vec<(String, WirePart<'_>)> {
        self.entries
            .iter()
            .map(|(name, value)| {
                let part = match value {
                    PayloadValue::Text(s) => WirePart::Text(s.clone()),
                    PayloadValue::List(items) => {
                        WirePart::Text(serde_json::Value::from(items.clone()).to_string())
                    }
                    PayloadValue::Bool(b) => WirePart::Text(b.to_string()),
                    PayloadValue::Null => WirePart::Text("null".to_string()),
                    PayloadValue::File(blob) => WirePart::File(blob),
                };
                (name.clone(), part)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_encoding_per_value_kind() {
        let mut payload = SubmissionPayload::new();
        payload.append("colors", PayloadValue::List(vec!["red".into(), "blue".into()]));
        payload.append("agree", PayloadValue::Bool(true));
        payload.append("plan", PayloadValue::Null);

        let parts = payload.wire_parts();
        assert_eq!(parts[0].1, WirePart::Text("[\"red\",\"blue\"]".into()));
        assert_eq!(parts[1].1, WirePart::Text("true".into()));
        assert_eq!(parts[2].1, WirePart::Text("null".into()));
    }
}
