//! Declarative request-body validation.
//!
//! A schema is a list of field rules evaluated against the raw JSON payload
//! before it is deserialized into a typed request. Every violation is
//! collected, so a caller sees all failing fields at once.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `category.name` or `products.0.quantity`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Typed request bodies declare the schema their raw payload must satisfy.
pub trait RequestSchema: DeserializeOwned {
    /// The payload is passed so a body can select between schema variants.
    fn schema(payload: &Value) -> ObjectSchema;
}

#[derive(Debug, Clone)]
pub enum Rule {
    String,
    Number { min: Option<f64> },
    Integer { min: Option<i64>, max: Option<i64> },
    /// A string holding a well-formed identifier.
    Identifier,
    Array(Box<Rule>),
    Object(ObjectSchema),
    /// The key must not appear at all.
    Absent,
}

impl Rule {
    pub fn number() -> Self {
        Rule::Number { min: None }
    }

    pub fn non_negative_number() -> Self {
        Rule::Number { min: Some(0.0) }
    }

    pub fn positive_integer() -> Self {
        Rule::Integer {
            min: Some(1),
            max: Some(i64::from(i32::MAX)),
        }
    }

    pub fn array_of(item: Rule) -> Self {
        Rule::Array(Box::new(item))
    }

    pub fn object(schema: ObjectSchema) -> Self {
        Rule::Object(schema)
    }

    fn check(&self, value: &Value, path: &str, errors: &mut ValidationErrors) {
        match self {
            Rule::String => {
                if !value.is_string() {
                    mismatch("string", value, path, errors);
                }
            }
            Rule::Number { min } => match value.as_f64() {
                Some(n) => {
                    if let Some(min) = min.filter(|min| n < *min) {
                        errors.push(
                            label(path),
                            format!("Must be greater than or equal to {min}"),
                        );
                    }
                }
                None => mismatch("number", value, path, errors),
            },
            Rule::Integer { min, max } => match value.as_i64() {
                Some(n) => {
                    if let Some(min) = min.filter(|min| n < *min) {
                        errors.push(
                            label(path),
                            format!("Must be greater than or equal to {min}"),
                        );
                    } else if let Some(max) = max.filter(|max| n > *max) {
                        errors.push(
                            label(path),
                            format!("Must be less than or equal to {max}"),
                        );
                    }
                }
                None => mismatch("integer", value, path, errors),
            },
            Rule::Identifier => match value.as_str() {
                Some(raw) if Uuid::parse_str(raw).is_ok() => {}
                Some(_) => errors.push(label(path), "Invalid identifier"),
                None => mismatch("string", value, path, errors),
            },
            Rule::Array(item) => match value.as_array() {
                Some(values) => {
                    for (index, value) in values.iter().enumerate() {
                        item.check(value, &join(path, &index.to_string()), errors);
                    }
                }
                None => mismatch("array", value, path, errors),
            },
            Rule::Object(schema) => schema.check(value, path, errors),
            Rule::Absent => errors.push(label(path), "Must not be present"),
        }
    }
}

#[derive(Debug, Clone)]
struct Field {
    name: &'static str,
    rule: Rule,
    required: bool,
}

/// Rules for a JSON object. Strict schemas reject keys they do not declare.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
    strict: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            fields: Vec::new(),
            strict: true,
        }
    }

    pub fn required(self, name: &'static str, rule: Rule) -> Self {
        self.field(name, rule, true)
    }

    pub fn optional(self, name: &'static str, rule: Rule) -> Self {
        self.field(name, rule, false)
    }

    /// Declares a key that must be absent.
    pub fn forbidden(self, name: &'static str) -> Self {
        self.field(name, Rule::Absent, false)
    }

    /// Fields of `other` are added, replacing same-named fields. Strictness follows `other`.
    pub fn merge(mut self, other: ObjectSchema) -> Self {
        for field in other.fields {
            self = self.field(field.name, field.rule, field.required);
        }
        self.strict = other.strict;
        self
    }

    /// Every field becomes optional.
    pub fn partial(mut self) -> Self {
        for field in &mut self.fields {
            field.required = false;
        }
        self
    }

    pub fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.check(value, "", &mut errors);
        errors.into_result()
    }

    fn field(mut self, name: &'static str, rule: Rule, required: bool) -> Self {
        let field = Field {
            name,
            rule,
            required,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    fn check(&self, value: &Value, path: &str, errors: &mut ValidationErrors) {
        let Some(object) = value.as_object() else {
            mismatch("object", value, path, errors);
            return;
        };

        for field in &self.fields {
            let field_path = join(path, field.name);
            match object.get(field.name) {
                Some(value) => field.rule.check(value, &field_path, errors),
                None if field.required => {
                    errors.push(field_path, format!("{} is required", capitalize(field.name)));
                }
                None => {}
            }
        }

        if self.strict {
            for key in object.keys() {
                if !self.fields.iter().any(|f| f.name == key) {
                    errors.push(join(path, key), "Unrecognized key");
                }
            }
        }
    }
}

fn mismatch(expected: &str, value: &Value, path: &str, errors: &mut ValidationErrors) {
    errors.push(
        label(path),
        format!("Expected {expected}, received {}", type_name(value)),
    );
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

// The payload root has no key of its own.
fn label(path: &str) -> String {
    if path.is_empty() {
        "body".to_string()
    } else {
        path.to_string()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn category() -> ObjectSchema {
        ObjectSchema::strict().required("name", Rule::String)
    }

    fn product() -> ObjectSchema {
        ObjectSchema::strict()
            .required("name", Rule::String)
            .required("price", Rule::non_negative_number())
            .required("category", Rule::object(category()))
            .required("images", Rule::array_of(Rule::String))
    }

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn accepts_matching_payload() {
        let payload = json!({
            "name": "Lamp",
            "price": 12.5,
            "category": { "name": "Home" },
            "images": ["a.png", "b.png"]
        });
        assert!(product().validate(&payload).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = product().validate(&json!({ "name": "Lamp" })).unwrap_err();
        assert_eq!(fields(&errors), vec!["price", "category", "images"]);
        assert_eq!(errors.errors()[0].message, "Price is required");
    }

    #[test]
    fn strict_object_rejects_unknown_keys() {
        let payload = json!({
            "name": "Lamp",
            "price": 1,
            "category": { "name": "Home", "slug": "home" },
            "images": [],
            "stock": 3
        });
        let errors = product().validate(&payload).unwrap_err();
        assert_eq!(fields(&errors), vec!["category.slug", "stock"]);
        assert!(errors.errors().iter().all(|e| e.message == "Unrecognized key"));
    }

    #[test]
    fn non_strict_object_ignores_unknown_keys() {
        let schema = ObjectSchema::new().required("name", Rule::String);
        assert!(schema.validate(&json!({ "name": "x", "extra": true })).is_ok());
    }

    #[test]
    fn type_mismatches_name_nested_paths() {
        let payload = json!({
            "name": 7,
            "price": "9.99",
            "category": { "name": null },
            "images": ["ok", 3]
        });
        let errors = product().validate(&payload).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["name", "price", "category.name", "images.1"]
        );
        assert_eq!(errors.errors()[1].message, "Expected number, received string");
        assert_eq!(errors.errors()[2].message, "Expected string, received null");
    }

    #[test]
    fn negative_price_is_rejected() {
        let payload = json!({
            "name": "Lamp",
            "price": -0.01,
            "category": { "name": "Home" },
            "images": []
        });
        let errors = product().validate(&payload).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError {
                field: "price".into(),
                message: "Must be greater than or equal to 0".into(),
            }]
        );
    }

    #[test]
    fn partial_schema_keeps_strictness() {
        let schema = product().partial();
        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({ "price": 3 })).is_ok());
        let errors = schema.validate(&json!({ "colour": "red" })).unwrap_err();
        assert_eq!(fields(&errors), vec!["colour"]);
    }

    #[test]
    fn merge_replaces_and_forbids_fields() {
        let by_reference = product().merge(
            ObjectSchema::strict()
                .required("categoryId", Rule::Identifier)
                .forbidden("category"),
        );

        let ok = json!({
            "name": "Lamp",
            "price": 1,
            "categoryId": "6f1c2a58-1f4b-4a5e-9d55-2d3b8c0f7a10",
            "images": []
        });
        assert!(by_reference.validate(&ok).is_ok());

        let both = json!({
            "name": "Lamp",
            "price": 1,
            "category": { "name": "Home" },
            "categoryId": "not-an-id",
            "images": []
        });
        let errors = by_reference.validate(&both).unwrap_err();
        assert_eq!(fields(&errors), vec!["category", "categoryId"]);
        assert_eq!(errors.errors()[0].message, "Must not be present");
        assert_eq!(errors.errors()[1].message, "Invalid identifier");
    }

    #[test]
    fn integer_rule_rejects_fractions_and_zero() {
        let schema = ObjectSchema::strict().required("quantity", Rule::positive_integer());
        assert!(schema.validate(&json!({ "quantity": 2 })).is_ok());
        let errors = schema.validate(&json!({ "quantity": 0 })).unwrap_err();
        assert_eq!(errors.errors()[0].message, "Must be greater than or equal to 1");
        let errors = schema.validate(&json!({ "quantity": 1.5 })).unwrap_err();
        assert_eq!(errors.errors()[0].message, "Expected integer, received number");
    }

    #[test]
    fn integer_rule_caps_at_stored_width() {
        let schema = ObjectSchema::strict().required("quantity", Rule::positive_integer());
        assert!(schema.validate(&json!({ "quantity": i32::MAX })).is_ok());
        let errors = schema
            .validate(&json!({ "quantity": 3_000_000_000_i64 }))
            .unwrap_err();
        assert_eq!(fields(&errors), vec!["quantity"]);
        assert_eq!(
            errors.errors()[0].message,
            "Must be less than or equal to 2147483647"
        );
    }

    #[test]
    fn non_object_root_is_reported_on_body() {
        let errors = category().validate(&json!(["name"])).unwrap_err();
        assert_eq!(errors.to_string(), "body: Expected object, received array");
    }
}
