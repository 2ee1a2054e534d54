/**
 * Validation Schemas
 *
 * A `Schema` describes the expected shape of one request section as a list
 * of field rules. Interpreting the schema produces either the cleaned
 * object (known fields only, values coerced) or the full list of failures.
 *
 * The validator never stops at the first error: a request missing both
 * `title` and `body` reports both, in rule order.
 */

use serde_json::{Map, Value};
use uuid::Uuid;

/// What a single field must look like.
#[derive(Debug, Clone)]
pub enum Kind {
    /// A string with a minimum (and optional maximum) length, measured
    /// after trimming.
    Text { min: usize, max: Option<usize> },
    /// An email address; trimmed and lowercased on success.
    Email,
    /// A document id in canonical UUID form.
    Id,
}

impl Kind {
    /// Non-empty text.
    pub fn text() -> Self {
        Self::Text { min: 1, max: None }
    }

    pub fn text_min(min: usize) -> Self {
        Self::Text { min, max: None }
    }

    fn check(&self, name: &str, value: &Value) -> Result<Value, Vec<String>> {
        let Some(raw) = value.as_str() else {
            return Err(vec![format!("{name} must be a string")]);
        };

        match self {
            Kind::Text { min, max } => {
                let text = raw.trim();
                let mut errors = Vec::new();
                if text.is_empty() && *min <= 1 {
                    errors.push(format!("{name} must not be empty"));
                } else if text.chars().count() < *min {
                    errors.push(format!("{name} must be at least {min} characters"));
                }
                if let Some(max) = max {
                    if text.chars().count() > *max {
                        errors.push(format!("{name} must be at most {max} characters"));
                    }
                }
                if errors.is_empty() {
                    Ok(Value::String(text.to_string()))
                } else {
                    Err(errors)
                }
            }
            Kind::Email => {
                let email = raw.trim().to_lowercase();
                let valid = match email.split_once('@') {
                    Some((local, domain)) => {
                        !local.is_empty() && !domain.is_empty() && !domain.starts_with('.')
                    }
                    None => false,
                };
                if valid {
                    Ok(Value::String(email))
                } else {
                    Err(vec![format!("{name} must be a valid email address")])
                }
            }
            Kind::Id => match Uuid::parse_str(raw.trim()) {
                Ok(id) => Ok(Value::String(id.to_string())),
                Err(_) => Err(vec![format!("{name} must be a valid id")]),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Field {
    name: &'static str,
    kind: Kind,
    required: bool,
}

/// Declarative description of one request section.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, name: &'static str, kind: Kind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &'static str, kind: Kind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: false,
        });
        self
    }

    /// Interpret the schema against one request section.
    ///
    /// Returns the cleaned object on success. On failure returns every
    /// collected message; the input is left untouched.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, Vec<String>> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            // An absent body behaves like an empty object so that required
            // fields each produce their own message.
            Value::Null => &empty,
            _ => return Err(vec!["request input must be a JSON object".to_string()]),
        };

        let mut output = Map::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        errors.push(format!("{} is required", field.name));
                    }
                }
                Some(value) => match field.kind.check(field.name, value) {
                    Ok(clean) => {
                        output.insert(field.name.to_string(), clean);
                    }
                    Err(messages) => errors.extend(messages),
                },
            }
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn post_schema() -> Schema {
        Schema::new()
            .require("title", Kind::text())
            .require("body", Kind::text())
    }

    #[test]
    fn test_valid_input_passes_through() {
        let clean = post_schema()
            .validate(&json!({"title": "Hello", "body": "World"}))
            .unwrap();
        assert_eq!(clean.get("title"), Some(&json!("Hello")));
        assert_eq!(clean.get("body"), Some(&json!("World")));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let errors = post_schema().validate(&json!({})).unwrap_err();
        assert_eq!(
            errors,
            vec!["title is required".to_string(), "body is required".to_string()]
        );
    }

    #[test]
    fn test_null_input_behaves_like_empty_object() {
        let errors = post_schema().validate(&Value::Null).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_unknown_fields_are_stripped_not_rejected() {
        let clean = post_schema()
            .validate(&json!({"title": "a", "body": "b", "admin": true}))
            .unwrap();
        assert!(!clean.contains_key("admin"));
    }

    #[test]
    fn test_wrong_type_and_missing_field_both_reported() {
        let errors = post_schema()
            .validate(&json!({"title": 7}))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "title must be a string".to_string(),
                "body is required".to_string()
            ]
        );
    }

    #[test]
    fn test_text_is_trimmed_and_empty_rejected() {
        let clean = post_schema()
            .validate(&json!({"title": "  padded  ", "body": "x"}))
            .unwrap();
        assert_eq!(clean.get("title"), Some(&json!("padded")));

        let errors = post_schema()
            .validate(&json!({"title": "   ", "body": "x"}))
            .unwrap_err();
        assert_eq!(errors, vec!["title must not be empty".to_string()]);
    }

    #[test]
    fn test_minimum_length_is_enforced() {
        let schema = Schema::new().require("password", Kind::text_min(8));
        let errors = schema.validate(&json!({"password": "short"})).unwrap_err();
        assert_eq!(
            errors,
            vec!["password must be at least 8 characters".to_string()]
        );
    }

    #[test]
    fn test_email_is_normalized() {
        let schema = Schema::new().require("email", Kind::Email);
        let clean = schema
            .validate(&json!({"email": " A@X.Com "}))
            .unwrap();
        assert_eq!(clean.get("email"), Some(&json!("a@x.com")));

        for bad in ["nope", "@x.com", "a@", "a"] {
            let errors = schema.validate(&json!({ "email": bad })).unwrap_err();
            assert_eq!(errors, vec!["email must be a valid email address".to_string()]);
        }
    }

    #[test]
    fn test_id_must_be_a_uuid() {
        let schema = Schema::new().require("postId", Kind::Id);
        assert!(schema
            .validate(&json!({"postId": "8e8bbf4c-9ad6-4dd5-a45c-4d6d4ccc3f25"}))
            .is_ok());

        let errors = schema.validate(&json!({"postId": "12345"})).unwrap_err();
        assert_eq!(errors, vec!["postId must be a valid id".to_string()]);
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = Schema::new()
            .require("email", Kind::Email)
            .optional("name", Kind::text());
        let clean = schema.validate(&json!({"email": "a@x.com"})).unwrap();
        assert!(!clean.contains_key("name"));
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        let errors = post_schema().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(errors, vec!["request input must be a JSON object".to_string()]);
    }
}
