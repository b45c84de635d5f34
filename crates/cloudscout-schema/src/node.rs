//! # Schema Node Model
//!
//! A closed set of tagged JSON Schema node shapes. Composition works on
//! these typed nodes so every shape is handled exhaustively; the generic
//! `serde_json::Value` tree is produced only at the boundary by
//! [`SchemaNode::to_value`].
//!
//! Only the vocabulary the player documents need is modelled: `type`,
//! `properties`, `required`, `additionalProperties`, `enum`, `const` and
//! `pattern`.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `"null"`
    Null,
    /// `"number"`
    Number,
    /// `"integer"`
    Integer,
    /// `"string"`
    String,
    /// `"object"`
    Object,
}

impl JsonType {
    /// The keyword value for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

fn type_keyword(ty: JsonType, nullable: bool) -> Value {
    if nullable && ty != JsonType::Null {
        json!([ty.as_str(), JsonType::Null.as_str()])
    } else {
        Value::from(ty.as_str())
    }
}

/// One node of a composed schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// An object with declared properties.
    Object(ObjectNode),
    /// A string, optionally constrained by a pattern.
    String(StringNode),
    /// A number or integer.
    Number(NumberNode),
    /// A value restricted to a constant or a fixed set.
    Enum(EnumNode),
}

impl SchemaNode {
    /// Nullable string without further constraints.
    pub fn nullable_string() -> Self {
        Self::String(StringNode {
            nullable: true,
            pattern: None,
        })
    }

    /// Nullable `number`.
    pub fn nullable_number() -> Self {
        Self::Number(NumberNode {
            ty: NumericType::Number,
            nullable: true,
        })
    }

    /// Nullable `integer`.
    pub fn nullable_integer() -> Self {
        Self::Number(NumberNode {
            ty: NumericType::Integer,
            nullable: true,
        })
    }

    /// String matching `pattern`.
    pub fn pattern(pattern: impl Into<String>, nullable: bool) -> Self {
        Self::String(StringNode {
            nullable,
            pattern: Some(pattern.into()),
        })
    }

    /// Returns the object node, if this is one.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Serialize to the generic JSON Schema wire form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Object(obj) => obj.to_value(),
            Self::String(s) => {
                let mut map = Map::new();
                map.insert("type".into(), type_keyword(JsonType::String, s.nullable));
                if let Some(pattern) = &s.pattern {
                    map.insert("pattern".into(), Value::from(pattern.as_str()));
                }
                Value::Object(map)
            }
            Self::Number(n) => {
                let ty = match n.ty {
                    NumericType::Number => JsonType::Number,
                    NumericType::Integer => JsonType::Integer,
                };
                json!({ "type": type_keyword(ty, n.nullable) })
            }
            Self::Enum(e) => {
                let mut map = Map::new();
                map.insert("type".into(), type_keyword(e.ty, e.nullable));
                match &e.values {
                    EnumValues::Const(v) => map.insert("const".into(), v.clone()),
                    EnumValues::OneOf(vs) => map.insert("enum".into(), Value::Array(vs.clone())),
                };
                Value::Object(map)
            }
        }
    }
}

impl From<ObjectNode> for SchemaNode {
    fn from(obj: ObjectNode) -> Self {
        Self::Object(obj)
    }
}

impl From<EnumNode> for SchemaNode {
    fn from(e: EnumNode) -> Self {
        Self::Enum(e)
    }
}

impl From<&SchemaNode> for Value {
    fn from(node: &SchemaNode) -> Self {
        node.to_value()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Object node: ordered properties, the required subset, and whether
/// undeclared keys are forbidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    properties: Vec<(String, SchemaNode)>,
    required: Vec<String>,
    closed: bool,
}

impl ObjectNode {
    /// An empty, open object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required property.
    pub fn property(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.push((name, node.into()));
        self
    }

    /// Declare a property that may be omitted.
    pub fn optional_property(
        mut self,
        name: impl Into<String>,
        node: impl Into<SchemaNode>,
    ) -> Self {
        self.properties.push((name.into(), node.into()));
        self
    }

    /// Forbid undeclared properties (`additionalProperties: false`).
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Declared properties in insertion order.
    pub fn properties(&self) -> &[(String, SchemaNode)] {
        &self.properties
    }

    /// Required property names in insertion order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Whether undeclared properties are rejected.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Look up a declared property.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    fn to_value(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, node)| (name.clone(), node.to_value()))
            .collect();

        let mut map = Map::new();
        map.insert("type".into(), Value::from(JsonType::Object.as_str()));
        map.insert("properties".into(), Value::Object(properties));
        map.insert("required".into(), json!(self.required));
        if self.closed {
            map.insert("additionalProperties".into(), Value::Bool(false));
        }
        Value::Object(map)
    }
}

/// String node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode {
    /// Whether `null` is also accepted.
    pub nullable: bool,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
}

/// Numeric flavour of a [`NumberNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// Any JSON number.
    Number,
    /// Integral JSON numbers only.
    Integer,
}

/// Number node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberNode {
    /// Number or integer.
    pub ty: NumericType,
    /// Whether `null` is also accepted.
    pub nullable: bool,
}

/// Allowed values of an [`EnumNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValues {
    /// Exactly one value (`const`).
    Const(Value),
    /// Any of a fixed list (`enum`).
    OneOf(Vec<Value>),
}

/// Enumerated or constant node over a base type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumNode {
    /// Base type of the accepted values.
    pub ty: JsonType,
    /// Whether the `type` keyword also admits `null`.
    pub nullable: bool,
    /// The accepted values.
    pub values: EnumValues,
}

impl EnumNode {
    /// `const` constraint.
    pub fn constant(ty: JsonType, nullable: bool, value: impl Into<Value>) -> Self {
        Self {
            ty,
            nullable,
            values: EnumValues::Const(value.into()),
        }
    }

    /// `enum` constraint.
    pub fn one_of<V: Into<Value>>(
        ty: JsonType,
        nullable: bool,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            ty,
            nullable,
            values: EnumValues::OneOf(values.into_iter().map(Into::into).collect()),
        }
    }
}
