//! Request and response bodies for the contact endpoint.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Field names the endpoint always expects to be present and non-blank.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Submission payload: form field name → string value.
///
/// Keeps insertion order so the JSON body lists fields the way the form
/// does. Setting a name that is already present replaces its value in place.
///
/// # Example
///
/// ```
/// use contact_api::ContactRequest;
///
/// let request = ContactRequest::new()
///     .with("name", "Alice")
///     .with("email", "a@b.com")
///     .with("message", "hi");
///
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"name":"Alice","email":"a@b.com","message":"hi"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRequest {
    fields: Vec<(String, String)>,
}

impl ContactRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing an existing value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required fields that are absent or blank after trimming.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|name| self.get(name).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }
}

impl Serialize for ContactRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ContactRequest {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (name, value) in iter {
            request.insert(name, value);
        }
        request
    }
}

/// The endpoint's answer.
///
/// Extra keys (the server also sends per-field `errors` on failure) are
/// ignored; a missing `success` or `message` is a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    /// Parse a raw response body.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut request = ContactRequest::new().with("name", "A").with("email", "x");
        request.insert("name", "B");
        let fields: Vec<_> = request.iter().collect();
        assert_eq!(fields, vec![("name", "B"), ("email", "x")]);
    }

    #[test]
    fn test_missing_required_trims() {
        let request = ContactRequest::new()
            .with("name", "Alice")
            .with("email", "  ")
            .with("phone", "123");
        assert_eq!(request.missing_required(), vec!["email", "message"]);
    }

    #[test]
    fn test_response_ignores_extra_keys() {
        let response = ContactResponse::from_body(
            r#"{"success":false,"errors":{"email":["bad"]},"message":"Fix errors"}"#,
        )
        .unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "Fix errors");
    }

    #[test]
    fn test_response_requires_shape() {
        assert!(ContactResponse::from_body(r#"{"success":true}"#).is_err());
        assert!(ContactResponse::from_body(r#"{"success":"yes","message":"x"}"#).is_err());
        assert!(ContactResponse::from_body("<html>oops</html>").is_err());
        assert!(ContactResponse::from_body("[]").is_err());
    }
}
