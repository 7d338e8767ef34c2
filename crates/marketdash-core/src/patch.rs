//! Tri-state field type for partial updates.
//!
//! A JSON body can leave a key out, send it as `null`, or send a value. For
//! PATCH-style updates those are three different requests, so they get three
//! variants. Fields must be annotated with `#[serde(default)]` so that an
//! absent key lands on [`Patch::Missing`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the request.
    #[default]
    Missing,
    /// Key present with an explicit `null`.
    Null,
    /// Key present with a value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Collapses `Missing` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` when the key was absent, `Some(None)` for an explicit null.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    pub fn map<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        description: Patch<String>,
        #[serde(default)]
        budget: Patch<f64>,
    }

    #[test]
    fn test_absent_key_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.description.is_missing());
        assert!(body.budget.is_missing());
    }

    #[test]
    fn test_explicit_null() {
        let body: Body = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert!(body.description.is_null());
        assert!(body.budget.is_missing());
    }

    #[test]
    fn test_value_present() {
        let body: Body =
            serde_json::from_str(r#"{"description":"spring","budget":12.5}"#).unwrap();
        assert_eq!(body.description, Patch::Value("spring".to_string()));
        assert_eq!(body.budget.as_value(), Some(&12.5));
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let body: Body = serde_json::from_str(r#"{"description":""}"#).unwrap();
        assert_eq!(body.description, Patch::Value(String::new()));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(serde_json::from_str::<Body>(r#"{"budget":"lots"}"#).is_err());
    }

    #[test]
    fn test_into_change() {
        assert_eq!(Patch::<i32>::Missing.into_change(), None);
        assert_eq!(Patch::<i32>::Null.into_change(), Some(None));
        assert_eq!(Patch::Value(3).into_change(), Some(Some(3)));
    }

    #[test]
    fn test_map_keeps_variant() {
        assert_eq!(Patch::Value(2).map(|v| v * 2), Patch::Value(4));
        assert_eq!(Patch::<i32>::Null.map(|v| v * 2), Patch::Null);
        assert!(Patch::<i32>::Missing.map(|v| v * 2).is_missing());
    }
}
