//! Explicit argument schemas and the generic validator.
//!
//! Every tool declares its arguments as a list of [`ParamDef`]s. Validation
//! resolves wire aliases, applies defaults, coerces integer-like values and
//! reports every offending field at once. Handlers then deserialize the
//! normalized [`ToolArguments`] into their own params struct.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::error::{FieldError, ToolError, ToolResult};
use crate::domains::steam::QueryParams;

// ============================================================================
// Parameter types
// ============================================================================

/// Semantic type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    String,
    IntegerList,
    StringList,
}

impl ParamType {
    /// Check (and for integers, coerce) a value.
    fn coerce(self, field: &str, value: &Value) -> Result<Value, Vec<FieldError>> {
        match self {
            Self::Integer => coerce_integer(value)
                .map(Value::from)
                .ok_or_else(|| vec![int_error(field, None)]),
            Self::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(vec![string_error(field, None)]),
            },
            Self::IntegerList => {
                let items = value.as_array().ok_or_else(|| vec![list_error(field)])?;
                let mut errors = Vec::new();
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match coerce_integer(item) {
                        Some(n) => out.push(Value::from(n)),
                        None => errors.push(int_error(field, Some(i))),
                    }
                }
                if errors.is_empty() { Ok(Value::Array(out)) } else { Err(errors) }
            }
            Self::StringList => {
                let items = value.as_array().ok_or_else(|| vec![list_error(field)])?;
                let errors: Vec<_> = items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| !item.is_string())
                    .map(|(i, _)| string_error(field, Some(i)))
                    .collect();
                if errors.is_empty() { Ok(value.clone()) } else { Err(errors) }
            }
        }
    }

    /// JSON Schema fragment for the catalog.
    fn json_schema(self) -> Value {
        match self {
            Self::Integer => json!({"type": "integer"}),
            Self::String => json!({"type": "string"}),
            Self::IntegerList => json!({"type": "array", "items": {"type": "integer"}}),
            Self::StringList => json!({"type": "array", "items": {"type": "string"}}),
        }
    }
}

/// Integers, integral floats, decimal strings and booleans are accepted as
/// integers.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn int_error(field: &str, index: Option<usize>) -> FieldError {
    let msg = "Input should be a valid integer";
    match index {
        Some(i) => FieldError::at_index(field, i, "int_type", msg),
        None => FieldError::new(field, "int_type", msg),
    }
}

fn string_error(field: &str, index: Option<usize>) -> FieldError {
    let msg = "Input should be a valid string";
    match index {
        Some(i) => FieldError::at_index(field, i, "string_type", msg),
        None => FieldError::new(field, "string_type", msg),
    }
}

fn list_error(field: &str) -> FieldError {
    FieldError::new(field, "list_type", "Input should be a valid list")
}

// ============================================================================
// Parameter definition
// ============================================================================

/// A single argument declaration.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    /// Name used on the wire (inbound arguments and upstream query).
    pub alias: Option<&'static str>,
}

impl ParamDef {
    /// A required argument.
    pub fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: true,
            default: None,
            alias: None,
        }
    }

    /// An optional argument with no default.
    pub fn optional(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    /// Make the argument optional with a default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(default.into());
        self
    }

    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Name under which the argument travels on the wire.
    pub fn wire_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.param_type.json_schema();
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("description".into(), Value::from(self.description));
            if let Some(default) = &self.default {
                obj.insert("default".into(), default.clone());
            }
        }
        schema
    }
}

// ============================================================================
// Tool schema
// ============================================================================

/// Ordered set of argument declarations for one tool.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    params: Vec<ParamDef>,
}

impl ToolSchema {
    pub fn new(params: Vec<ParamDef>) -> Self {
        Self { params }
    }

    /// Schema for tools that take no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Validate raw arguments.
    ///
    /// Unknown keys are ignored. `null` on an optional field counts as absent.
    pub fn validate(&self, arguments: &Map<String, Value>) -> ToolResult<ToolArguments> {
        let mut values = Map::new();
        let mut errors = Vec::new();

        for def in &self.params {
            let raw = arguments
                .get(def.wire_name())
                .filter(|v| def.required || !v.is_null());

            match raw {
                Some(value) => match def.param_type.coerce(def.wire_name(), value) {
                    Ok(value) => {
                        values.insert(def.name.to_string(), value);
                    }
                    Err(field_errors) => errors.extend(field_errors),
                },
                None if def.required => errors.push(FieldError::missing(def.wire_name())),
                None => {
                    values.insert(
                        def.name.to_string(),
                        def.default.clone().unwrap_or(Value::Null),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(ToolArguments { values })
        } else {
            Err(ToolError::InvalidArguments(errors))
        }
    }

    /// Upstream query parameters for validated arguments, keyed by wire name.
    /// Absent optional arguments are skipped.
    pub fn wire_params(&self, arguments: &ToolArguments) -> QueryParams {
        self.params
            .iter()
            .filter_map(|def| {
                let value = arguments.values.get(def.name)?;
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((def.wire_name().to_string(), rendered))
            })
            .collect()
    }

    /// JSON Schema document for the tool catalog.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|def| (def.wire_name().to_string(), def.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|def| def.required)
            .map(ParamDef::wire_name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

// ============================================================================
// Validated arguments
// ============================================================================

/// Arguments that passed schema validation, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserialize into a tool's params struct.
    pub fn parse<T: DeserializeOwned>(&self) -> ToolResult<T> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| ToolError::internal(format!("validated arguments did not decode: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn news_schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required("appid", ParamType::Integer, "App id"),
            ParamDef::required("count", ParamType::Integer, "Items").with_default(10),
            ParamDef::optional("country", ParamType::String, "Country"),
        ])
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn field_errors(err: ToolError) -> Vec<FieldError> {
        match err {
            ToolError::InvalidArguments(errors) => errors,
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let validated = news_schema().validate(&args(json!({"appid": 570}))).unwrap();
        assert_eq!(validated.get("appid"), Some(&json!(570)));
        assert_eq!(validated.get("count"), Some(&json!(10)));
        assert_eq!(validated.get("country"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_required_reported() {
        let errors = field_errors(news_schema().validate(&Map::new()).unwrap_err());
        assert_eq!(errors, vec![FieldError::missing("appid")]);
    }

    #[test]
    fn test_all_type_errors_reported_together() {
        let errors = field_errors(
            news_schema()
                .validate(&args(json!({"appid": "abc", "count": [1], "country": 3})))
                .unwrap_err(),
        );
        let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
        assert_eq!(fields, vec!["appid", "count", "country"]);
        assert_eq!(errors[2].kind, "string_type");
    }

    #[test]
    fn test_integer_coercion() {
        let validated = news_schema()
            .validate(&args(json!({"appid": "570", "count": 5.0})))
            .unwrap();
        assert_eq!(validated.get("appid"), Some(&json!(570)));
        assert_eq!(validated.get("count"), Some(&json!(5)));

        let errors = field_errors(news_schema().validate(&args(json!({"appid": 5.5}))).unwrap_err());
        assert_eq!(errors[0].kind, "int_type");
    }

    #[test]
    fn test_booleans_coerce_to_integers() {
        let validated = news_schema()
            .validate(&args(json!({"appid": true, "count": false})))
            .unwrap();
        assert_eq!(validated.get("appid"), Some(&json!(1)));
        assert_eq!(validated.get("count"), Some(&json!(0)));
    }

    #[test]
    fn test_list_element_errors_carry_index() {
        let schema = ToolSchema::new(vec![ParamDef::required(
            "stat_names",
            ParamType::StringList,
            "Stats",
        )]);
        let errors = field_errors(
            schema
                .validate(&args(json!({"stat_names": ["kills", 7]})))
                .unwrap_err(),
        );
        assert_eq!(errors[0].loc, vec!["stat_names".to_string(), "1".to_string()]);

        let errors = field_errors(schema.validate(&args(json!({"stat_names": "kills"}))).unwrap_err());
        assert_eq!(errors[0].kind, "list_type");
    }

    #[test]
    fn test_alias_resolution_and_wire_params() {
        let schema = ToolSchema::new(vec![
            ParamDef::required("appid", ParamType::Integer, "App id").with_alias("gameid"),
        ]);

        let by_alias = schema.validate(&args(json!({"gameid": 440}))).unwrap();
        assert_eq!(by_alias.get("appid"), Some(&json!(440)));

        let wire = schema.wire_params(&by_alias);
        assert_eq!(wire.get("gameid").map(String::as_str), Some("440"));
        assert!(!wire.contains_key("appid"));

        let errors = field_errors(schema.validate(&Map::new()).unwrap_err());
        assert_eq!(errors[0].field(), "gameid");
    }

    #[test]
    fn test_aliased_field_rejects_internal_name() {
        let schema = ToolSchema::new(vec![
            ParamDef::required("appid", ParamType::Integer, "App id").with_alias("gameid"),
        ]);

        let errors = field_errors(schema.validate(&args(json!({"appid": 9}))).unwrap_err());
        assert_eq!(errors, vec![FieldError::missing("gameid")]);
    }

    #[test]
    fn test_null_optional_treated_as_absent() {
        let validated = news_schema()
            .validate(&args(json!({"appid": 1, "country": null, "extra": true})))
            .unwrap();
        assert_eq!(validated.get("country"), Some(&Value::Null));
        assert!(validated.get("extra").is_none());
        assert!(!news_schema().wire_params(&validated).contains_key("country"));
    }

    #[test]
    fn test_parse_into_struct() {
        #[derive(Deserialize)]
        struct Params {
            appid: i64,
            count: i64,
            country: Option<String>,
        }

        let params: Params = news_schema()
            .validate(&args(json!({"appid": 570, "country": "US"})))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(params.appid, 570);
        assert_eq!(params.count, 10);
        assert_eq!(params.country.as_deref(), Some("US"));
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = news_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["appid"]));
        assert_eq!(schema["properties"]["count"]["default"], 10);
        assert_eq!(schema["properties"]["country"]["type"], "string");
    }
}
