// Copyright (c) 2025 - Cowboy AI, Inc.
//! Naming and location elements: namespaces, object paths, instance names
//! and key bindings (DSP0201 "Naming and Location Elements" section).

use std::fmt;

use crate::model::types::CimType;
use crate::model::values::CimValueReference;

/// A single NAMESPACE segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimNamespace {
    pub name: String,
}

impl CimNamespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The HOST element of an absolute namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimHost {
    pub value: String,
}

/// LOCALNAMESPACEPATH: a namespace path without a host component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimLocalNamespacePath {
    pub namespaces: Vec<CimNamespace>,
}

impl CimLocalNamespacePath {
    /// Split a `root/cimv2`-style namespace string into segments.
    /// Backslashes are treated as forward slashes.
    pub fn from_namespace(namespace: &str) -> Self {
        if namespace.is_empty() {
            return Self::default();
        }
        Self {
            namespaces: crate::path::split_namespaces(namespace)
                .into_iter()
                .map(CimNamespace::new)
                .collect(),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl fmt::Display for CimLocalNamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, ns) in self.namespaces.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }
            f.write_str(&ns.name)?;
        }
        Ok(())
    }
}

/// NAMESPACEPATH: host plus local namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimNamespacePath {
    pub host: CimHost,
    pub local_namespace_path: CimLocalNamespacePath,
}

impl CimNamespacePath {
    pub fn is_nil(&self) -> bool {
        self.local_namespace_path.is_nil()
    }
}

impl fmt::Display for CimNamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host.value, self.local_namespace_path)
    }
}

/// CLASSNAME: the name of a CIM class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimClassName {
    pub name: String,
}

impl CimClassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for CimClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// CLASSPATH: the absolute path to a CIM class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimClassPath {
    pub namespace_path: CimNamespacePath,
    pub class_name: CimClassName,
}

impl CimClassPath {
    pub fn is_nil(&self) -> bool {
        self.namespace_path.is_nil()
    }
}

impl fmt::Display for CimClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_path, self.class_name)
    }
}

/// LOCALCLASSPATH: the local path to a CIM class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimLocalClassPath {
    pub namespace_path: CimLocalNamespacePath,
    pub class_name: CimClassName,
}

impl CimLocalClassPath {
    pub fn is_nil(&self) -> bool {
        self.namespace_path.is_nil()
    }
}

impl fmt::Display for CimLocalClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_path, self.class_name)
    }
}

/// KEYVALUE: the value of a non-reference key binding.
///
/// `cim_type` is the TYPE attribute, `value_type` the older VALUETYPE
/// attribute; TYPE wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimKeyValue {
    pub value_type: Option<String>,
    pub cim_type: Option<String>,
    pub value: String,
}

impl CimKeyValue {
    pub fn untyped(value: impl Into<String>) -> Self {
        Self {
            value_type: None,
            cim_type: None,
            value: value.into(),
        }
    }

    pub fn typed(cim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_type: None,
            cim_type: Some(cim_type.into()),
            value: value.into(),
        }
    }

    /// The declared type, preferring TYPE over VALUETYPE.
    pub fn declared_type(&self) -> Option<&str> {
        self.cim_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.value_type.as_deref().filter(|t| !t.is_empty()))
    }

    pub fn is_typed(&self) -> bool {
        self.declared_type().is_some()
    }

    pub fn is_nil(&self) -> bool {
        self.value.is_empty()
    }
}

/// Append `value` to `out` double-quoted, with embedded quote characters
/// escaped in the object-path mini-language form (`''` and `'"`).
fn push_quoted(out: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    out.write_str("\"")?;
    for c in value.chars() {
        if c == '"' || c == '\'' {
            out.write_str("'")?;
        }
        write!(out, "{c}")?;
    }
    out.write_str("\"")
}

impl fmt::Display for CimKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declared_type() {
            None => {
                // Untyped values are inferred: boolean and numeric literals
                // render bare, everything else as a quoted string.
                let lower = self.value.to_ascii_lowercase();
                if lower == "true" || lower == "false" || self.value.parse::<f64>().is_ok() {
                    f.write_str(&self.value)
                } else {
                    push_quoted(f, &self.value)
                }
            }
            Some("string") => push_quoted(f, &self.value),
            Some(t) => write!(f, "({}){}", t, self.value),
        }
    }
}

/// The value side of a KEYBINDING: a key value or a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimKeyBindingValue {
    Value(CimKeyValue),
    Reference(CimValueReference),
}

/// KEYBINDING: a named key-property value within an instance name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CimKeyBinding {
    pub name: String,
    pub value: CimKeyBindingValue,
}

impl CimKeyBinding {
    pub fn new(name: impl Into<String>, value: CimKeyValue) -> Self {
        Self {
            name: name.into(),
            value: CimKeyBindingValue::Value(value),
        }
    }

    pub fn reference(name: impl Into<String>, reference: CimValueReference) -> Self {
        Self {
            name: name.into(),
            value: CimKeyBindingValue::Reference(reference),
        }
    }

    pub fn get_type(&self) -> CimType {
        match &self.value {
            CimKeyBindingValue::Value(kv) => CimType::create(kv.declared_type().unwrap_or("")),
            CimKeyBindingValue::Reference(_) => CimType::create("reference"),
        }
    }

    pub fn is_typed(&self) -> bool {
        match &self.value {
            CimKeyBindingValue::Value(kv) => kv.is_typed(),
            CimKeyBindingValue::Reference(_) => false,
        }
    }
}

impl fmt::Display for CimKeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        match &self.value {
            CimKeyBindingValue::Value(kv) => write!(f, "{kv}"),
            CimKeyBindingValue::Reference(r) => {
                f.write_str(&urlencoding::encode(&r.to_string()))
            }
        }
    }
}

/// Render a key-binding list as `Name1=V1,Name2=V2`.
pub fn format_key_bindings(
    bindings: &[CimKeyBinding],
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    for (idx, kb) in bindings.iter().enumerate() {
        if idx > 0 {
            f.write_str(",")?;
        }
        write!(f, "{kb}")?;
    }
    Ok(())
}

/// The key representation of an instance name. At most one form is
/// populated; `None` is the keyless form used for class-level calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CimInstanceKeys {
    #[default]
    None,
    Bindings(Vec<CimKeyBinding>),
    Value(CimKeyValue),
    Reference(Box<CimValueReference>),
}

/// INSTANCENAME: a class name plus the keys identifying one instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimInstanceName {
    pub class_name: String,
    pub keys: CimInstanceKeys,
}

impl CimInstanceName {
    /// A keyless instance name, as used by class-level association calls.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            keys: CimInstanceKeys::None,
        }
    }

    pub fn with_bindings(class_name: impl Into<String>, bindings: Vec<CimKeyBinding>) -> Self {
        Self {
            class_name: class_name.into(),
            keys: CimInstanceKeys::Bindings(bindings),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.class_name.is_empty()
    }

    pub fn has_keys(&self) -> bool {
        match &self.keys {
            CimInstanceKeys::None => false,
            CimInstanceKeys::Bindings(bindings) => !bindings.is_empty(),
            CimInstanceKeys::Value(_) | CimInstanceKeys::Reference(_) => true,
        }
    }

    /// True only when every key binding carries an explicit type (or the
    /// single-key-value form is typed). Governs path rendering: typed
    /// instance paths use the `/(instance)` marker instead of `:`.
    pub fn is_typed(&self) -> bool {
        match &self.keys {
            CimInstanceKeys::Bindings(bindings) if !bindings.is_empty() => {
                bindings.iter().all(CimKeyBinding::is_typed)
            }
            CimInstanceKeys::Value(kv) => kv.is_typed(),
            _ => false,
        }
    }
}

impl fmt::Display for CimInstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)?;
        match &self.keys {
            CimInstanceKeys::None => Ok(()),
            CimInstanceKeys::Bindings(bindings) => {
                if bindings.is_empty() {
                    return Ok(());
                }
                f.write_str(".")?;
                format_key_bindings(bindings, f)
            }
            CimInstanceKeys::Value(kv) => write!(f, ".{kv}"),
            CimInstanceKeys::Reference(r) => write!(f, ".{r}"),
        }
    }
}

/// INSTANCEPATH: the absolute path to a CIM instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimInstancePath {
    pub namespace_path: CimNamespacePath,
    pub instance_name: CimInstanceName,
}

impl CimInstancePath {
    pub fn is_nil(&self) -> bool {
        self.namespace_path.is_nil()
    }
}

impl fmt::Display for CimInstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace_path)?;
        if self.instance_name.is_typed() {
            f.write_str("/(instance)")?;
        } else {
            f.write_str(":")?;
        }
        write!(f, "{}", self.instance_name)
    }
}

/// LOCALINSTANCEPATH: the local path to a CIM instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimLocalInstancePath {
    pub namespace_path: CimLocalNamespacePath,
    pub instance_name: CimInstanceName,
}

impl CimLocalInstancePath {
    pub fn new(namespace: &str, instance_name: CimInstanceName) -> Self {
        Self {
            namespace_path: CimLocalNamespacePath::from_namespace(namespace),
            instance_name,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.namespace_path.is_nil()
    }
}

impl fmt::Display for CimLocalInstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace_path)?;
        if self.instance_name.is_typed() {
            f.write_str("/(instance)")?;
        } else {
            f.write_str(":")?;
        }
        write!(f, "{}", self.instance_name)
    }
}

/// OBJECTPATH: the full path to a single class or instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimObjectPath {
    Instance(CimInstancePath),
    Class(CimClassPath),
}

impl fmt::Display for CimObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(p) => write!(f, "{p}"),
            Self::Class(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn local_namespace_path_from_namespace() {
        let path = CimLocalNamespacePath::from_namespace("root/cimv2");
        assert_eq!(path.namespaces.len(), 2);
        assert_eq!(path.to_string(), "root/cimv2");

        let empty = CimLocalNamespacePath::from_namespace("");
        assert!(empty.is_nil());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn key_value_rendering_heuristics() {
        assert_eq!(CimKeyValue::untyped("true").to_string(), "true");
        assert_eq!(CimKeyValue::untyped("False").to_string(), "False");
        assert_eq!(CimKeyValue::untyped("12.5").to_string(), "12.5");
        assert_eq!(CimKeyValue::untyped("hello").to_string(), "\"hello\"");
        assert_eq!(CimKeyValue::typed("string", "abc").to_string(), "\"abc\"");
        assert_eq!(CimKeyValue::typed("uint32", "3").to_string(), "(uint32)3");
    }

    #[test]
    fn key_value_rendering_escapes_quotes() {
        assert_eq!(CimKeyValue::typed("string", "a'b").to_string(), "\"a''b\"");
        assert_eq!(
            CimKeyValue::typed("string", "say \"hi\"").to_string(),
            "\"say '\"hi'\"\""
        );
    }

    #[test]
    fn declared_type_prefers_type_over_valuetype() {
        let kv = CimKeyValue {
            value_type: Some("numeric".into()),
            cim_type: Some("uint32".into()),
            value: "9".into(),
        };
        assert_eq!(kv.declared_type(), Some("uint32"));

        let kv = CimKeyValue {
            value_type: Some("numeric".into()),
            cim_type: None,
            value: "9".into(),
        };
        assert_eq!(kv.declared_type(), Some("numeric"));
        assert!(kv.is_typed());
    }

    #[test]
    fn instance_name_is_typed_is_all_or_nothing() {
        let both_typed = CimInstanceName::with_bindings(
            "CIM_Process",
            vec![
                CimKeyBinding::new("Handle", CimKeyValue::typed("string", "42")),
                CimKeyBinding::new("CSName", CimKeyValue::typed("string", "host1")),
            ],
        );
        assert!(both_typed.is_typed());

        let one_untyped = CimInstanceName::with_bindings(
            "CIM_Process",
            vec![
                CimKeyBinding::new("Handle", CimKeyValue::typed("string", "42")),
                CimKeyBinding::new("CSName", CimKeyValue::untyped("host1")),
            ],
        );
        assert!(!one_untyped.is_typed());

        assert!(!CimInstanceName::class_only("CIM_Process").is_typed());
    }

    #[test]
    fn instance_name_rendering() {
        let name = CimInstanceName::with_bindings(
            "Linux_UnixProcess",
            vec![
                CimKeyBinding::new("Handle", CimKeyValue::typed("string", "1234")),
                CimKeyBinding::new(
                    "CSCreationClassName",
                    CimKeyValue::typed("string", "Linux_ComputerSystem"),
                ),
            ],
        );
        assert_eq!(
            name.to_string(),
            "Linux_UnixProcess.Handle=\"1234\",CSCreationClassName=\"Linux_ComputerSystem\""
        );
    }

    #[test]
    fn local_instance_path_rendering() {
        let untyped = CimLocalInstancePath::new(
            "root/cimv2",
            CimInstanceName::with_bindings(
                "CIM_Process",
                vec![CimKeyBinding::new("Handle", CimKeyValue::untyped("42"))],
            ),
        );
        assert_eq!(untyped.to_string(), "root/cimv2:CIM_Process.Handle=42");

        let typed = CimLocalInstancePath::new(
            "root/cimv2",
            CimInstanceName::with_bindings(
                "CIM_Process",
                vec![CimKeyBinding::new(
                    "Handle",
                    CimKeyValue::typed("uint32", "42"),
                )],
            ),
        );
        assert_eq!(
            typed.to_string(),
            "root/cimv2/(instance)CIM_Process.Handle=(uint32)42"
        );
    }
}
