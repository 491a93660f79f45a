// Copyright (c) 2025 - Cowboy AI, Inc.
//! Object definition elements: qualifiers, properties, instances, classes,
//! methods and parameter declarations (DSP0201 "Object Definition Elements").

use crate::model::types::{CimType, UNBOUNDED_ARRAY};
use crate::model::values::{CimValue, CimValueArray, CimValueReference};

/// Qualifier flavor attribute group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimQualifierFlavor {
    pub overridable: bool,
    pub to_subclass: bool,
    pub to_instance: bool,
    pub translatable: bool,
}

/// A qualifier value: scalar or array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimQualifierValue {
    Value(CimValue),
    Array(CimValueArray),
}

/// QUALIFIER: metadata attached to a class, property or method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimQualifier {
    pub name: String,
    pub cim_type: String,
    pub propagated: bool,
    pub lang: Option<String>,
    pub flavor: CimQualifierFlavor,
    pub value: Option<CimQualifierValue>,
}

impl CimQualifier {
    pub fn new(name: impl Into<String>, cim_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cim_type: cim_type.into(),
            ..Self::default()
        }
    }
}

/// SCOPE: where a qualifier declaration applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimScope {
    pub class: bool,
    pub association: bool,
    pub reference: bool,
    pub property: bool,
    pub method: bool,
    pub parameter: bool,
    pub indication: bool,
}

/// QUALIFIER.DECLARATION: a qualifier type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimQualifierDeclaration {
    pub name: String,
    pub cim_type: String,
    pub is_array: bool,
    pub array_size: Option<i32>,
    pub flavor: CimQualifierFlavor,
    pub scope: Option<CimScope>,
    pub value: Option<CimQualifierValue>,
}

/// PROPERTY: a non-reference scalar property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimProperty {
    pub name: String,
    pub cim_type: String,
    pub class_origin: Option<String>,
    pub propagated: bool,
    pub embedded_object: Option<String>,
    pub lang: Option<String>,
    pub qualifiers: Vec<CimQualifier>,
    pub value: Option<CimValue>,
}

/// PROPERTY.ARRAY: a non-reference array property. An absent ARRAYSIZE
/// means the array is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimPropertyArray {
    pub name: String,
    pub cim_type: String,
    pub array_size: Option<i32>,
    pub class_origin: Option<String>,
    pub propagated: bool,
    pub embedded_object: Option<String>,
    pub lang: Option<String>,
    pub qualifiers: Vec<CimQualifier>,
    pub value_array: Option<CimValueArray>,
}

/// PROPERTY.REFERENCE: a scalar reference property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimPropertyReference {
    pub name: String,
    pub reference_class: Option<String>,
    pub class_origin: Option<String>,
    pub propagated: bool,
    pub qualifiers: Vec<CimQualifier>,
    pub value_reference: Option<CimValueReference>,
}

fn has_key_qualifier(qualifiers: &[CimQualifier]) -> bool {
    qualifiers.iter().any(|q| q.name == "key")
}

/// One entry of a property list: the PROPERTY / PROPERTY.ARRAY /
/// PROPERTY.REFERENCE choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimPropertyEntry {
    Scalar(CimProperty),
    Array(CimPropertyArray),
    Reference(CimPropertyReference),
}

impl CimPropertyEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(p) => &p.name,
            Self::Array(p) => &p.name,
            Self::Reference(p) => &p.name,
        }
    }

    pub fn get_type(&self) -> CimType {
        match self {
            Self::Scalar(p) => CimType::create(&p.cim_type),
            Self::Array(p) => {
                CimType::create_array(&p.cim_type, p.array_size.unwrap_or(UNBOUNDED_ARRAY))
            }
            Self::Reference(p) => {
                CimType::create_reference(p.reference_class.as_deref().unwrap_or(""))
            }
        }
    }

    pub fn class_origin(&self) -> Option<&str> {
        match self {
            Self::Scalar(p) => p.class_origin.as_deref(),
            Self::Array(p) => p.class_origin.as_deref(),
            Self::Reference(p) => p.class_origin.as_deref(),
        }
    }

    /// True iff a qualifier named `key` (case-sensitive) is present.
    pub fn is_key(&self) -> bool {
        match self {
            Self::Scalar(p) => has_key_qualifier(&p.qualifiers),
            Self::Array(p) => has_key_qualifier(&p.qualifiers),
            Self::Reference(p) => has_key_qualifier(&p.qualifiers),
        }
    }

    pub fn is_propagated(&self) -> bool {
        match self {
            Self::Scalar(p) => p.propagated,
            Self::Array(p) => p.propagated,
            Self::Reference(p) => p.propagated,
        }
    }

    /// The scalar value text, when this is a scalar property with a value.
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Self::Scalar(p) => p.value.as_ref().map(|v| v.value.as_str()),
            _ => None,
        }
    }

    /// The array element texts, when this is an array property with a value.
    pub fn string_values(&self) -> Option<Vec<&str>> {
        match self {
            Self::Array(p) => p.value_array.as_ref().map(CimValueArray::string_values),
            _ => None,
        }
    }
}

/// INSTANCE: a CIM instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimInstance {
    pub class_name: String,
    pub lang: Option<String>,
    pub qualifiers: Vec<CimQualifier>,
    pub properties: Vec<CimPropertyEntry>,
}

impl CimInstance {
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn get_property_by_index(&self, index: usize) -> Option<&CimPropertyEntry> {
        self.properties.get(index)
    }

    /// First property with the given name, or `None`.
    pub fn get_property_by_name(&self, name: &str) -> Option<&CimPropertyEntry> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// First property whose name **or** origin class matches. The OR is
    /// deliberate: it reproduces the upstream behavior exactly, even though
    /// callers may expect an AND here.
    pub fn get_property_by_name_and_origin(
        &self,
        name: &str,
        origin_class: &str,
    ) -> Option<&CimPropertyEntry> {
        if origin_class.is_empty() {
            return self.get_property_by_name(name);
        }
        self.properties
            .iter()
            .find(|p| p.name() == name || p.class_origin() == Some(origin_class))
    }
}

/// PARAMETER: a non-reference scalar method parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimParameter {
    pub name: String,
    pub cim_type: String,
    pub qualifiers: Vec<CimQualifier>,
}

/// PARAMETER.REFERENCE: a reference-typed scalar parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimParameterReference {
    pub name: String,
    pub reference_class: Option<String>,
    pub qualifiers: Vec<CimQualifier>,
}

/// PARAMETER.ARRAY: a non-reference array parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimParameterArray {
    pub name: String,
    pub cim_type: String,
    pub array_size: Option<i32>,
    pub qualifiers: Vec<CimQualifier>,
}

/// PARAMETER.REFARRAY: a reference-typed array parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimParameterRefArray {
    pub name: String,
    pub reference_class: String,
    pub array_size: Option<i32>,
    pub qualifiers: Vec<CimQualifier>,
}

/// One entry of a method's parameter list: the four-way PARAMETER choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimParameterEntry {
    Scalar(CimParameter),
    Reference(CimParameterReference),
    Array(CimParameterArray),
    RefArray(CimParameterRefArray),
}

impl CimParameterEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(p) => &p.name,
            Self::Reference(p) => &p.name,
            Self::Array(p) => &p.name,
            Self::RefArray(p) => &p.name,
        }
    }
}

/// METHOD: a method declaration within a class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimMethod {
    pub name: String,
    pub cim_type: Option<String>,
    pub class_origin: Option<String>,
    pub propagated: bool,
    pub qualifiers: Vec<CimQualifier>,
    pub parameters: Vec<CimParameterEntry>,
}

/// CLASS: a CIM class definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimClass {
    pub name: String,
    pub super_class: Option<String>,
    pub qualifiers: Vec<CimQualifier>,
    pub properties: Vec<CimPropertyEntry>,
    pub methods: Vec<CimMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::CimTypeCode;
    use pretty_assertions::assert_eq;

    fn key_qualifier() -> CimQualifier {
        CimQualifier::new("key", "boolean")
    }

    fn scalar(name: &str, origin: Option<&str>, value: &str) -> CimPropertyEntry {
        CimPropertyEntry::Scalar(CimProperty {
            name: name.into(),
            cim_type: "string".into(),
            class_origin: origin.map(Into::into),
            value: Some(CimValue::new(value)),
            ..CimProperty::default()
        })
    }

    #[test]
    fn is_key_matches_exact_qualifier_name() {
        let keyed = CimPropertyEntry::Scalar(CimProperty {
            name: "Handle".into(),
            cim_type: "string".into(),
            qualifiers: vec![key_qualifier()],
            ..CimProperty::default()
        });
        assert!(keyed.is_key());

        let wrong_case = CimPropertyEntry::Scalar(CimProperty {
            name: "Handle".into(),
            cim_type: "string".into(),
            qualifiers: vec![CimQualifier::new("Key", "boolean")],
            ..CimProperty::default()
        });
        assert!(!wrong_case.is_key());
    }

    #[test]
    fn property_entry_types() {
        let arr = CimPropertyEntry::Array(CimPropertyArray {
            name: "Capabilities".into(),
            cim_type: "uint16".into(),
            array_size: None,
            ..CimPropertyArray::default()
        });
        let t = arr.get_type();
        assert_eq!(t.code(), CimTypeCode::Uint16);
        assert_eq!(t.array_size(), -1);
        assert!(t.is_array());

        let bounded = CimPropertyEntry::Array(CimPropertyArray {
            name: "Slots".into(),
            cim_type: "uint8".into(),
            array_size: Some(4),
            ..CimPropertyArray::default()
        });
        assert_eq!(bounded.get_type().array_size(), 4);

        let reference = CimPropertyEntry::Reference(CimPropertyReference {
            name: "Antecedent".into(),
            reference_class: Some("CIM_System".into()),
            ..CimPropertyReference::default()
        });
        let t = reference.get_type();
        assert_eq!(t.code(), CimTypeCode::Reference);
        assert_eq!(t.class_name(), "CIM_System");
    }

    #[test]
    fn property_lookup_by_name_takes_first_match() {
        let instance = CimInstance {
            class_name: "Test_Class".into(),
            properties: vec![
                scalar("Name", Some("Test_Base"), "first"),
                scalar("Name", Some("Test_Class"), "second"),
            ],
            ..CimInstance::default()
        };
        let found = instance.get_property_by_name("Name").unwrap();
        assert_eq!(found.string_value(), Some("first"));
        assert!(instance.get_property_by_name("Missing").is_none());
    }

    #[test]
    fn property_lookup_by_name_or_origin() {
        let instance = CimInstance {
            class_name: "Test_Class".into(),
            properties: vec![
                scalar("Caption", Some("Test_Base"), "base"),
                scalar("Name", Some("Test_Class"), "mine"),
            ],
            ..CimInstance::default()
        };

        // Matches on name even though the origin differs.
        let by_name = instance
            .get_property_by_name_and_origin("Caption", "Other_Class")
            .unwrap();
        assert_eq!(by_name.string_value(), Some("base"));

        // Matches on origin even though the name differs.
        let by_origin = instance
            .get_property_by_name_and_origin("Nope", "Test_Class")
            .unwrap();
        assert_eq!(by_origin.string_value(), Some("mine"));

        // Empty origin degrades to plain name lookup.
        assert!(instance
            .get_property_by_name_and_origin("Nope", "")
            .is_none());
    }

    #[test]
    fn string_values_skips_nulls() {
        use crate::model::values::{CimValueArray, CimValueOrNull};

        let entry = CimPropertyEntry::Array(CimPropertyArray {
            name: "Namespaces".into(),
            cim_type: "string".into(),
            value_array: Some(CimValueArray {
                values: vec![
                    CimValueOrNull::Value(CimValue::new("root/cimv2")),
                    CimValueOrNull::Null,
                    CimValueOrNull::Value(CimValue::new("interop")),
                ],
            }),
            ..CimPropertyArray::default()
        });
        assert_eq!(
            entry.string_values(),
            Some(vec!["root/cimv2", "interop"])
        );
        assert_eq!(entry.string_value(), None);
    }
}
