//! Post validation - an explicit schema evaluated against raw JSON input.
//!
//! Every writable field is described by a [`FieldRule`]. The same rules run in
//! two modes: [`Mode::Full`] requires every required field to be present, while
//! [`Mode::Partial`] only checks the fields that were supplied.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{NewPost, Post, PostChanges};

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// How supplied fields are checked against the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create and PUT: all required fields must be present.
    Full,
    /// PATCH: only supplied fields are checked.
    Partial,
}

/// Constraints for one writable field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub allow_blank: bool,
    pub max_length: Option<usize>,
}

pub const TITLE: FieldRule = FieldRule {
    name: "title",
    required: true,
    allow_blank: false,
    max_length: Some(100),
};

pub const CONTENT: FieldRule = FieldRule {
    name: "content",
    required: true,
    allow_blank: false,
    max_length: None,
};

pub const CATEGORY: FieldRule = FieldRule {
    name: "category",
    required: true,
    allow_blank: false,
    max_length: None,
};

pub const TAGS: FieldRule = FieldRule {
    name: "tags",
    required: false,
    allow_blank: true,
    max_length: None,
};

/// Rule applied to every element of `tags`.
pub const TAG_ITEM: FieldRule = FieldRule {
    name: "tags",
    required: true,
    allow_blank: false,
    max_length: Some(50),
};

/// Field name to list of violation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed for: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

/// Validate a create request. Always runs in [`Mode::Full`].
pub fn validate_new(data: &Value) -> Result<NewPost, ValidationErrors> {
    let object = as_object(data)?;

    let mut errors = ValidationErrors::new();
    let title = field(object, &TITLE, Mode::Full, &mut errors, clean_text);
    let content = field(object, &CONTENT, Mode::Full, &mut errors, clean_text);
    let category = field(object, &CATEGORY, Mode::Full, &mut errors, clean_text);
    let tags = field(object, &TAGS, Mode::Full, &mut errors, clean_tags);

    match (title, content, category) {
        (Some(title), Some(content), Some(category)) if errors.is_empty() => Ok(NewPost {
            title,
            content,
            category,
            tags: tags.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

/// Validate an update request and merge it into `existing`.
///
/// On failure `existing` is dropped untouched; the caller still holds the stored copy.
pub fn validate_update(data: &Value, mut existing: Post, mode: Mode) -> Result<Post, ValidationErrors> {
    let object = as_object(data)?;

    let mut errors = ValidationErrors::new();
    let changes = PostChanges {
        title: field(object, &TITLE, mode, &mut errors, clean_text),
        content: field(object, &CONTENT, mode, &mut errors, clean_text),
        category: field(object, &CATEGORY, mode, &mut errors, clean_text),
        tags: field(object, &TAGS, mode, &mut errors, clean_tags),
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    changes.apply(&mut existing);
    Ok(existing)
}

fn as_object(data: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    data.as_object().ok_or_else(|| {
        ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!("Invalid data. Expected a dictionary, but got {}.", type_name(data)),
        )
    })
}

fn field<T>(
    object: &Map<String, Value>,
    rule: &FieldRule,
    mode: Mode,
    errors: &mut ValidationErrors,
    clean: fn(&FieldRule, &Value) -> Result<T, Vec<String>>,
) -> Option<T> {
    match object.get(rule.name) {
        None => {
            if rule.required && mode == Mode::Full {
                errors.add(rule.name, REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(rule.name, NULL);
            None
        }
        Some(value) => match clean(rule, value) {
            Ok(cleaned) => Some(cleaned),
            Err(messages) => {
                for message in messages {
                    errors.add(rule.name, message);
                }
                None
            }
        },
    }
}

fn clean_text(rule: &FieldRule, value: &Value) -> Result<String, Vec<String>> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(vec![NOT_A_STRING.to_string()]),
    };

    if text.is_empty() && !rule.allow_blank {
        return Err(vec![BLANK.to_string()]);
    }

    if let Some(max) = rule.max_length {
        if text.chars().count() > max {
            return Err(vec![format!(
                "Ensure this field has no more than {max} characters."
            )]);
        }
    }

    Ok(text)
}

fn clean_tags(_rule: &FieldRule, value: &Value) -> Result<Vec<String>, Vec<String>> {
    let Value::Array(items) = value else {
        return Err(vec![format!(
            "Expected a list of items but got type \"{}\".",
            type_name(value)
        )]);
    };

    let mut tags = Vec::with_capacity(items.len());
    let mut messages = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let cleaned = match item {
            Value::Null => Err(vec![NULL.to_string()]),
            other => clean_text(&TAG_ITEM, other),
        };
        match cleaned {
            Ok(tag) => tags.push(tag),
            Err(errs) => messages.extend(errs.into_iter().map(|e| format!("Item {index}: {e}"))),
        }
    }

    if messages.is_empty() {
        Ok(tags)
    } else {
        Err(messages)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn stored() -> Post {
        NewPost {
            title: "Original title".to_string(),
            content: "Original content".to_string(),
            category: "General".to_string(),
            tags: vec!["keep".to_string()],
        }
        .into_post(1, Utc::now() - Duration::seconds(10))
    }

    #[test]
    fn test_create_with_all_required_fields() {
        let post = validate_new(&json!({
            "title": "My last post",
            "content": "This is the content of the post.",
            "category": "C#"
        }))
        .unwrap();

        assert_eq!(post.title, "My last post");
        assert_eq!(post.category, "C#");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = validate_new(&json!({ "content": "Only content" })).unwrap_err();

        assert_eq!(errors.get("title"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("category"), Some(&[REQUIRED.to_string()][..]));
        assert!(errors.get("content").is_none());
        assert!(errors.get("tags").is_none());
    }

    #[test]
    fn test_create_failure_carries_only_field_errors() {
        let errors = validate_new(&json!({
            "title": "t",
            "content": "c",
            "tags": [true]
        }))
        .unwrap_err();

        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["category", "tags"]);
        assert!(errors.get(NON_FIELD_ERRORS).is_none());
    }

    #[test]
    fn test_blank_and_whitespace_fields_are_rejected() {
        let errors = validate_new(&json!({
            "title": "",
            "content": "   ",
            "category": "Rust"
        }))
        .unwrap_err();

        assert_eq!(errors.get("title"), Some(&[BLANK.to_string()][..]));
        assert_eq!(errors.get("content"), Some(&[BLANK.to_string()][..]));
        assert_eq!(errors.fields().count(), 2);
    }

    #[test]
    fn test_text_is_trimmed() {
        let post = validate_new(&json!({
            "title": "  Padded  ",
            "content": "c",
            "category": "k"
        }))
        .unwrap();
        assert_eq!(post.title, "Padded");
    }

    #[test]
    fn test_title_length_limit_counts_characters() {
        let exact = "é".repeat(100);
        assert!(
            validate_new(&json!({ "title": exact, "content": "c", "category": "k" })).is_ok()
        );

        let errors = validate_new(&json!({
            "title": "x".repeat(101),
            "content": "c",
            "category": "k"
        }))
        .unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&["Ensure this field has no more than 100 characters.".to_string()][..])
        );
    }

    #[test]
    fn test_null_and_wrong_types() {
        let errors = validate_new(&json!({
            "title": null,
            "content": { "nested": true },
            "category": 42
        }))
        .unwrap_err();

        assert_eq!(errors.get("title"), Some(&[NULL.to_string()][..]));
        assert_eq!(errors.get("content"), Some(&[NOT_A_STRING.to_string()][..]));
        assert!(errors.get("category").is_none());
    }

    #[test]
    fn test_tags_rules() {
        let post = validate_new(&json!({
            "title": "t",
            "content": "c",
            "category": "k",
            "tags": ["rust", " web "]
        }))
        .unwrap();
        assert_eq!(post.tags, vec!["rust", "web"]);

        let errors = validate_new(&json!({
            "title": "t",
            "content": "c",
            "category": "k",
            "tags": ["ok", "y".repeat(51), ""]
        }))
        .unwrap_err();
        assert_eq!(
            errors.get("tags"),
            Some(
                &[
                    "Item 1: Ensure this field has no more than 50 characters.".to_string(),
                    "Item 2: This field may not be blank.".to_string(),
                ][..]
            )
        );

        let errors = validate_new(&json!({
            "title": "t",
            "content": "c",
            "category": "k",
            "tags": "rust"
        }))
        .unwrap_err();
        assert_eq!(
            errors.get("tags"),
            Some(&["Expected a list of items but got type \"str\".".to_string()][..])
        );
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_new(&json!(["title"])).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS),
            Some(&["Invalid data. Expected a dictionary, but got list.".to_string()][..])
        );
    }

    #[test]
    fn test_read_only_and_unknown_keys_are_ignored() {
        let post = validate_update(
            &json!({ "id": 99, "created_at": "2000-01-01T00:00:00Z", "extra": 1, "title": "New" }),
            stored(),
            Mode::Partial,
        )
        .unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "New");
    }

    #[test]
    fn test_full_update_requires_all_fields() {
        let errors =
            validate_update(&json!({ "title": "Only title" }), stored(), Mode::Full).unwrap_err();
        assert!(errors.get("content").is_some());
        assert!(errors.get("category").is_some());
    }

    #[test]
    fn test_full_update_keeps_tags_when_omitted() {
        let post = validate_update(
            &json!({ "title": "T", "content": "C", "category": "K" }),
            stored(),
            Mode::Full,
        )
        .unwrap();
        assert_eq!(post.tags, vec!["keep"]);
        assert_eq!(post.title, "T");
    }

    #[test]
    fn test_partial_update_only_checks_supplied_fields() {
        let original = stored();
        let post = validate_update(&json!({ "content": "Patched" }), original.clone(), Mode::Partial)
            .unwrap();

        assert_eq!(post.content, "Patched");
        assert_eq!(post.title, original.title);
        assert_eq!(post.category, original.category);
        assert_eq!(post.created_at, original.created_at);
        assert!(post.updated_at > original.updated_at);

        let errors =
            validate_update(&json!({ "category": "" }), stored(), Mode::Partial).unwrap_err();
        assert_eq!(errors.get("category"), Some(&[BLANK.to_string()][..]));
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let errors = validate_new(&json!({})).unwrap_err();
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            json!({
                "category": [REQUIRED],
                "content": [REQUIRED],
                "title": [REQUIRED]
            })
        );
    }
}
