//! Value objects for the IL
//!
//! Identifiers name the value an action will bind; value sources describe
//! where an action reads its arguments from.

use super::errors::ConversionError;
use serde::Serialize;
use serde_json::Number;
use std::collections::HashSet;
use std::fmt;

/// Names that would render the same as a non-reference source.
const RESERVED_NAMES: [&str; 3] = ["input", "true", "false"];

/// Named handle for the value an action will eventually produce.
///
/// Equality, ordering and hashing are by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier.
    ///
    /// The name must contain a non-whitespace character, must not be one of
    /// `input`, `true` or `false`, and must not read as a JSON number.
    pub fn new(name: impl Into<String>) -> Result<Self, ConversionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConversionError::invalid("identifier name cannot be empty"));
        }
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(ConversionError::invalid(format!(
                "identifier name `{}` is reserved",
                name
            )));
        }
        if serde_json::from_str::<Number>(&name).is_ok() {
            return Err(ConversionError::invalid(format!(
                "identifier name `{}` reads as a number",
                name
            )));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write `text` as a JSON string literal, escapes included.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quoted = serde_json::to_string(text).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// One projection step applied to a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "segment", content = "value", rename_all = "snake_case")]
pub enum PathSegment {
    /// `.name`
    Field(String),
    /// `[n]`
    Index(usize),
    /// `["name"]`
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Key(key) => {
                f.write_str("[")?;
                write_quoted(f, key)?;
                f.write_str("]")
            }
        }
    }
}

/// Constant JSON scalar written inline in a program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(Number),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Number(value) => write!(f, "{}", value),
            Literal::String(value) => write_quoted(f, value),
        }
    }
}

/// One `"key": value` entry of an object source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectField {
    pub key: String,
    pub value: ValueSource,
}

/// Where an action reads one of its arguments from.
///
/// Every variant carries a projection path, applied after the base value is
/// produced. Composite sources may hold references at any depth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    /// Data available before conversion begins. Never a dependency.
    #[serde(rename = "input")]
    ExternalInput { path: Vec<PathSegment> },
    /// The value bound by the action declaring `identifier`.
    #[serde(rename = "identifier")]
    Reference {
        #[serde(rename = "name")]
        identifier: Identifier,
        path: Vec<PathSegment>,
    },
    Constant {
        value: Literal,
        path: Vec<PathSegment>,
    },
    Array {
        items: Vec<ValueSource>,
        path: Vec<PathSegment>,
    },
    /// Keys are unique and kept in declaration order.
    Object {
        fields: Vec<ObjectField>,
        path: Vec<PathSegment>,
    },
}

impl ValueSource {
    pub fn input() -> Self {
        ValueSource::ExternalInput { path: Vec::new() }
    }

    /// Path-less reference. Existence is checked at conversion, not here.
    pub fn reference(identifier: &Identifier) -> Self {
        ValueSource::Reference {
            identifier: identifier.clone(),
            path: Vec::new(),
        }
    }

    pub fn constant(value: Literal) -> Self {
        ValueSource::Constant {
            value,
            path: Vec::new(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Literal::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::constant(Literal::Bool(value))
    }

    pub fn integer(value: i64) -> Self {
        Self::constant(Literal::Number(value.into()))
    }

    /// Fails on NaN and infinities, which JSON cannot express.
    pub fn float(value: f64) -> Result<Self, ConversionError> {
        Number::from_f64(value)
            .map(|number| Self::constant(Literal::Number(number)))
            .ok_or_else(|| ConversionError::invalid(format!("{} is not a JSON number", value)))
    }

    pub fn array(items: impl IntoIterator<Item = ValueSource>) -> Self {
        ValueSource::Array {
            items: items.into_iter().collect(),
            path: Vec::new(),
        }
    }

    /// Object from `(key, value)` pairs. Duplicate keys are rejected.
    pub fn object<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, ValueSource)>,
    ) -> Result<Self, ConversionError> {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for (key, value) in fields {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(ConversionError::invalid(format!(
                    "duplicate object key \"{}\"",
                    key
                )));
            }
            collected.push(ObjectField { key, value });
        }
        Ok(ValueSource::Object {
            fields: collected,
            path: Vec::new(),
        })
    }

    /// Append a `.name` projection.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.push_segment(PathSegment::Field(name.into()))
    }

    /// Append a `[n]` projection.
    pub fn index(self, index: usize) -> Self {
        self.push_segment(PathSegment::Index(index))
    }

    /// Append a `["name"]` projection.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.push_segment(PathSegment::Key(key.into()))
    }

    fn push_segment(mut self, segment: PathSegment) -> Self {
        self.path_mut().push(segment);
        self
    }

    fn path_mut(&mut self) -> &mut Vec<PathSegment> {
        match self {
            ValueSource::ExternalInput { path }
            | ValueSource::Reference { path, .. }
            | ValueSource::Constant { path, .. }
            | ValueSource::Array { path, .. }
            | ValueSource::Object { path, .. } => path,
        }
    }

    pub fn path(&self) -> &[PathSegment] {
        match self {
            ValueSource::ExternalInput { path }
            | ValueSource::Reference { path, .. }
            | ValueSource::Constant { path, .. }
            | ValueSource::Array { path, .. }
            | ValueSource::Object { path, .. } => path,
        }
    }

    /// Every identifier this source depends on, depth-first, in the order
    /// written. May repeat.
    pub fn references(&self) -> Vec<&Identifier> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Identifier>) {
        match self {
            ValueSource::Reference { identifier, .. } => found.push(identifier),
            ValueSource::Array { items, .. } => {
                for item in items {
                    item.collect_references(found);
                }
            }
            ValueSource::Object { fields, .. } => {
                for field in fields {
                    field.value.collect_references(found);
                }
            }
            ValueSource::ExternalInput { .. } | ValueSource::Constant { .. } => {}
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ValueSource::ExternalInput { .. })
    }
}

impl From<Identifier> for ValueSource {
    fn from(identifier: Identifier) -> Self {
        ValueSource::Reference {
            identifier,
            path: Vec::new(),
        }
    }
}

impl From<&Identifier> for ValueSource {
    fn from(identifier: &Identifier) -> Self {
        ValueSource::reference(identifier)
    }
}

impl From<Literal> for ValueSource {
    fn from(value: Literal) -> Self {
        ValueSource::constant(value)
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::ExternalInput { .. } => f.write_str("input")?,
            ValueSource::Reference { identifier, .. } => write!(f, "{}", identifier)?,
            ValueSource::Constant { value, .. } => write!(f, "{}", value)?,
            ValueSource::Array { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")?;
            }
            ValueSource::Object { fields, .. } => {
                f.write_str("{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, &field.key)?;
                    write!(f, ": {}", field.value)?;
                }
                f.write_str("}")?;
            }
        }
        for segment in self.path() {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
