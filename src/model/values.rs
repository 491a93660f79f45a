// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value elements: scalars, arrays, references and object values
//! (DSP0201 "Value Elements" section).
//!
//! The grammar here is dominated by `xs:choice` groups. Each one is a Rust
//! enum so that "exactly one alternative populated" holds by construction.

use std::fmt;

use crate::model::naming::{
    CimClassName, CimClassPath, CimInstanceName, CimInstancePath, CimLocalClassPath,
    CimLocalInstancePath,
};
use crate::model::object::{CimClass, CimInstance};

/// Canonical text used where a value is absent.
pub const NULL_STRING: &str = "null";

/// VALUE: a non-reference scalar carried as text, with an optional declared
/// type. An untyped value is just its text content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimValue {
    pub value: String,
    pub value_type: Option<String>,
}

impl CimValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            value_type: None,
        }
    }

    pub fn is_nil(&self) -> bool {
        false
    }
}

impl fmt::Display for CimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// VALUE or VALUE.NULL inside an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimValueOrNull {
    Value(CimValue),
    Null,
}

impl CimValueOrNull {
    pub fn value(&self) -> Option<&CimValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Null => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for CimValueOrNull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Null => f.write_str(NULL_STRING),
        }
    }
}

/// VALUE.ARRAY: a non-reference array value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimValueArray {
    pub values: Vec<CimValueOrNull>,
}

impl CimValueArray {
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|s| CimValueOrNull::Value(CimValue::new(s)))
                .collect(),
        }
    }

    pub fn is_nil(&self) -> bool {
        false
    }

    /// The non-null element texts, nulls skipped.
    pub fn string_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter_map(|v| v.value().map(|v| v.value.as_str()))
            .collect()
    }
}

impl fmt::Display for CimValueArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, v) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// VALUE.REFERENCE: a reference scalar, one of six path forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimValueReference {
    ClassPath(CimClassPath),
    LocalClassPath(CimLocalClassPath),
    ClassName(CimClassName),
    InstancePath(CimInstancePath),
    LocalInstancePath(CimLocalInstancePath),
    InstanceName(CimInstanceName),
}

impl fmt::Display for CimValueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassPath(p) => write!(f, "{p}"),
            Self::LocalClassPath(p) => write!(f, "{p}"),
            Self::ClassName(n) => write!(f, "{n}"),
            Self::InstancePath(p) => write!(f, "{p}"),
            Self::LocalInstancePath(p) => write!(f, "{p}"),
            Self::InstanceName(n) => write!(f, "{n}"),
        }
    }
}

/// VALUE.REFERENCE or VALUE.NULL inside a reference array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimRefOrNull {
    Reference(CimValueReference),
    Null,
}

impl CimRefOrNull {
    pub fn reference(&self) -> Option<&CimValueReference> {
        match self {
            Self::Reference(r) => Some(r),
            Self::Null => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for CimRefOrNull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(r) => write!(f, "{r}"),
            Self::Null => f.write_str(NULL_STRING),
        }
    }
}

/// VALUE.REFARRAY: a reference array value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimValueRefArray {
    pub values: Vec<CimRefOrNull>,
}

impl fmt::Display for CimValueRefArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, v) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// VALUE.OBJECT: a class or instance definition.
#[derive(Debug, Clone, PartialEq)]
pub enum CimValueObject {
    Class(CimClass),
    Instance(CimInstance),
}

/// VALUE.NAMEDINSTANCE: an instance together with its instance name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimValueNamedInstance {
    pub instance_name: CimInstanceName,
    pub instance: CimInstance,
}

/// VALUE.NAMEDOBJECT: a class, or an instance with its name.
#[derive(Debug, Clone, PartialEq)]
pub enum CimValueNamedObject {
    Class(CimClass),
    Instance {
        name: CimInstanceName,
        instance: CimInstance,
    },
}

/// VALUE.OBJECTWITHPATH: a class or instance with its absolute path.
#[derive(Debug, Clone, PartialEq)]
pub enum CimValueObjectWithPath {
    Class {
        path: CimClassPath,
        class: CimClass,
    },
    Instance {
        path: CimInstancePath,
        instance: CimInstance,
    },
}

/// VALUE.OBJECTWITHLOCALPATH: a class or instance with its local path.
#[derive(Debug, Clone, PartialEq)]
pub enum CimValueObjectWithLocalPath {
    Class {
        path: CimLocalClassPath,
        class: CimClass,
    },
    Instance {
        path: CimLocalInstancePath,
        instance: CimInstance,
    },
}

/// VALUE.INSTANCEWITHPATH: an instance with its absolute path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimValueInstanceWithPath {
    pub instance_path: CimInstancePath,
    pub instance: CimInstance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_or_null_accessors() {
        let v = CimValueOrNull::Value(CimValue::new("42"));
        assert!(!v.is_nil());
        assert_eq!(v.value().map(|v| v.value.as_str()), Some("42"));
        assert_eq!(v.to_string(), "42");

        let n = CimValueOrNull::Null;
        assert!(n.is_nil());
        assert!(n.value().is_none());
        assert_eq!(n.to_string(), "null");
    }

    #[test]
    fn value_array_rendering() {
        let arr = CimValueArray {
            values: vec![
                CimValueOrNull::Value(CimValue::new("a")),
                CimValueOrNull::Null,
                CimValueOrNull::Value(CimValue::new("b")),
            ],
        };
        assert_eq!(arr.to_string(), "[a,null,b]");
        assert_eq!(arr.string_values(), vec!["a", "b"]);

        assert_eq!(CimValueArray::default().to_string(), "[]");
    }

    #[test]
    fn reference_rendering_dispatches_on_variant() {
        let by_name = CimValueReference::ClassName(CimClassName::new("CIM_System"));
        assert_eq!(by_name.to_string(), "CIM_System");

        let by_instance =
            CimValueReference::InstanceName(CimInstanceName::class_only("CIM_System"));
        assert_eq!(by_instance.to_string(), "CIM_System");
    }
}
