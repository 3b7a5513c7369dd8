//! Runtime values reported by the engine and the variable tree built from them.

use indexmap::IndexMap;

/// Capability set shared by every displayable engine value.
///
/// Renderers only go through these three calls, so a new engine-side shape is a
/// new implementor rather than a new code path in the UI.
pub trait EngineObject {
    /// Short display string.
    fn stringify_value(&self) -> String;
    /// Flat list of child variables, empty for leaves.
    fn sub_values(&self) -> Vec<Variable>;
    fn type_name(&self) -> String;
}

/// Reference to an engine object known only by its engine-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub i64);

impl EngineObject for ObjectId {
    fn stringify_value(&self) -> String {
        format!("<{}>", self.0)
    }

    fn sub_values(&self) -> Vec<Variable> {
        vec![Variable::new("id", Value::Int(self.0))]
    }

    fn type_name(&self) -> String {
        "Object".to_string()
    }
}

/// An object the engine sent without resolving it into a richer shape: a class
/// name plus its fields in the order they arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObject {
    pub class_name: String,
    fields: IndexMap<String, Value>,
}

impl RawObject {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EngineObject for RawObject {
    fn stringify_value(&self) -> String {
        self.class_name.clone()
    }

    fn sub_values(&self) -> Vec<Variable> {
        self.fields
            .iter()
            .map(|(key, value)| Variable::new(key.clone(), value.clone()))
            .collect()
    }

    fn type_name(&self) -> String {
        self.class_name.clone()
    }
}

/// A value as decoded from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Key/value pairs in engine order. Keys may be any value.
    Dictionary(Vec<(Value, Value)>),
    Object(ObjectId),
    Raw(RawObject),
}

/// Integers print as-is; other floats are cut to at most five decimals with
/// trailing zeros dropped.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        return format!("{}", value);
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.5}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl EngineObject for Value {
    fn stringify_value(&self) -> String {
        match self {
            Value::Nil => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::Array(items) => format!("Array[{}]", items.len()),
            Value::Dictionary(entries) => format!("Dictionary[{}]", entries.len()),
            Value::Object(obj) => obj.stringify_value(),
            Value::Raw(raw) => raw.stringify_value(),
        }
    }

    fn sub_values(&self) -> Vec<Variable> {
        match self {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| Variable::new(i.to_string(), v.clone()))
                .collect(),
            Value::Dictionary(entries) => entries
                .iter()
                .map(|(k, v)| Variable::new(k.stringify_value(), v.clone()))
                .collect(),
            Value::Object(obj) => obj.sub_values(),
            Value::Raw(raw) => raw.sub_values(),
            _ => Vec::new(),
        }
    }

    fn type_name(&self) -> String {
        match self {
            Value::Nil => "Nil".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::Dictionary(_) => "Dictionary".to_string(),
            Value::Object(obj) => obj.type_name(),
            Value::Raw(raw) => raw.type_name(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}

impl From<RawObject> for Value {
    fn from(raw: RawObject) -> Self {
        Value::Raw(raw)
    }
}

/// One named node of the variable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
    /// Disambiguates same-named variables across scopes.
    pub scope_path: Option<String>,
    /// Children the engine already sent. When absent they come from `value`.
    pub sub_values: Option<Vec<Variable>>,
    pub type_id: Option<i64>,
    pub id: Option<i64>,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope_path: None,
            sub_values: None,
            type_id: None,
            id: None,
        }
    }

    pub fn with_scope_path(mut self, scope_path: impl Into<String>) -> Self {
        self.scope_path = Some(scope_path.into());
        self
    }

    pub fn with_sub_values(mut self, sub_values: Vec<Variable>) -> Self {
        self.sub_values = Some(sub_values);
        self
    }

    pub fn children(&self) -> Vec<Variable> {
        match &self.sub_values {
            Some(children) => children.clone(),
            None => self.value.sub_values(),
        }
    }

    pub fn has_children(&self) -> bool {
        match &self.sub_values {
            Some(children) => !children.is_empty(),
            None => !self.value.sub_values().is_empty(),
        }
    }
}
