// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM-XML decoding: recursive descent over pull-parser events, one reader
//! per element, choice groups dispatching on the child tag name.
//!
//! Decoding is permissive where the upstream servers are sloppy: unknown
//! elements are skipped, missing optional substructure decodes to its
//! default and is left for the fault-evaluation chain to report.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::model::message::*;
use crate::model::naming::*;
use crate::model::object::*;
use crate::model::values::*;
use crate::xml::XmlError;

type R<'a> = Reader<&'a [u8]>;

/// Decode a full CIM envelope from raw response bytes.
pub fn decode_envelope(bytes: &[u8]) -> Result<Cim, XmlError> {
    let text = std::str::from_utf8(bytes)?;
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"CIM" => {
                return read_cim(&mut reader, &e, false);
            }
            Event::Empty(e) if e.name().as_ref() == b"CIM" => {
                return read_cim(&mut reader, &e, true);
            }
            Event::Start(_) | Event::Empty(_) => return Err(XmlError::NotCim),
            Event::Eof => return Err(XmlError::NotCim),
            _ => {}
        }
    }
}

fn attr_value(start: &BytesStart, name: &[u8]) -> Result<Option<String>, XmlError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(
    start: &BytesStart,
    element: &'static str,
    name: &'static str,
) -> Result<String, XmlError> {
    attr_value(start, name.as_bytes())?.ok_or(XmlError::MissingAttribute {
        element,
        attr: name,
    })
}

fn bool_attr(
    start: &BytesStart,
    element: &'static str,
    name: &'static str,
) -> Result<bool, XmlError> {
    match attr_value(start, name.as_bytes())? {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "true" | "TRUE" | "1" => Ok(true),
            "false" | "FALSE" | "0" => Ok(false),
            _ => Err(XmlError::InvalidAttribute {
                element,
                attr: name,
                value: v,
            }),
        },
    }
}

fn int_attr(
    start: &BytesStart,
    element: &'static str,
    name: &'static str,
) -> Result<Option<i32>, XmlError> {
    match attr_value(start, name.as_bytes())? {
        None => Ok(None),
        Some(v) => v
            .parse::<i32>()
            .map(Some)
            .map_err(|_| XmlError::InvalidAttribute {
                element,
                attr: name,
                value: v,
            }),
    }
}

fn read_flavor(start: &BytesStart, element: &'static str) -> Result<CimQualifierFlavor, XmlError> {
    Ok(CimQualifierFlavor {
        overridable: bool_attr(start, element, "OVERRIDABLE")?,
        to_subclass: bool_attr(start, element, "TOSUBCLASS")?,
        to_instance: bool_attr(start, element, "TOINSTANCE")?,
        translatable: bool_attr(start, element, "TRANSLATABLE")?,
    })
}

/// Skip over an element (and everything inside it).
fn skip(r: &mut R, e: &BytesStart, empty: bool) -> Result<(), XmlError> {
    if !empty {
        r.read_to_end(e.name())?;
    }
    Ok(())
}

/// Collect the character content of the current element up to its end tag,
/// skipping any nested markup.
fn read_text(r: &mut R, element: &'static str, empty: bool) -> Result<String, XmlError> {
    let mut out = String::new();
    if empty {
        return Ok(out);
    }
    loop {
        match r.read_event()? {
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::CData(t) => out.push_str(std::str::from_utf8(&t)?),
            Event::Start(e) => {
                r.read_to_end(e.name())?;
            }
            Event::End(_) => return Ok(out),
            Event::Eof => return Err(XmlError::UnexpectedEof(element)),
            _ => {}
        }
    }
}

/// The next child element, or `None` at the parent's end tag.
fn next_child<'a>(
    r: &mut R<'a>,
    element: &'static str,
) -> Result<Option<(BytesStart<'a>, bool)>, XmlError> {
    loop {
        match r.read_event()? {
            Event::Start(e) => return Ok(Some((e, false))),
            Event::Empty(e) => return Ok(Some((e, true))),
            Event::End(_) => return Ok(None),
            Event::Eof => return Err(XmlError::UnexpectedEof(element)),
            _ => {}
        }
    }
}

fn read_value(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimValue, XmlError> {
    let value_type = attr_value(start, b"TYPE")?;
    Ok(CimValue {
        value: read_text(r, "VALUE", empty)?,
        value_type,
    })
}

fn read_value_array(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimValueArray, XmlError> {
    let _ = start;
    let mut values = Vec::new();
    if empty {
        return Ok(CimValueArray { values });
    }
    while let Some((e, child_empty)) = next_child(r, "VALUE.ARRAY")? {
        match e.name().as_ref() {
            b"VALUE" => values.push(CimValueOrNull::Value(read_value(r, &e, child_empty)?)),
            b"VALUE.NULL" => {
                skip(r, &e, child_empty)?;
                values.push(CimValueOrNull::Null);
            }
            _ => skip(r, &e, child_empty)?,
        }
    }
    Ok(CimValueArray { values })
}

fn read_value_reference(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueReference, XmlError> {
    let _ = start;
    let mut reference = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.REFERENCE")? {
            match e.name().as_ref() {
                b"CLASSPATH" => {
                    reference = Some(CimValueReference::ClassPath(read_class_path(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"LOCALCLASSPATH" => {
                    reference = Some(CimValueReference::LocalClassPath(read_local_class_path(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"CLASSNAME" => {
                    reference = Some(CimValueReference::ClassName(read_class_name(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"INSTANCEPATH" => {
                    reference = Some(CimValueReference::InstancePath(read_instance_path(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"LOCALINSTANCEPATH" => {
                    reference = Some(CimValueReference::LocalInstancePath(
                        read_local_instance_path(r, &e, child_empty)?,
                    ))
                }
                b"INSTANCENAME" => {
                    reference = Some(CimValueReference::InstanceName(read_instance_name(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    reference.ok_or(XmlError::MissingElement {
        context: "VALUE.REFERENCE",
        element: "reference target",
    })
}

fn read_value_ref_array(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueRefArray, XmlError> {
    let _ = start;
    let mut values = Vec::new();
    if empty {
        return Ok(CimValueRefArray { values });
    }
    while let Some((e, child_empty)) = next_child(r, "VALUE.REFARRAY")? {
        match e.name().as_ref() {
            b"VALUE.REFERENCE" => values.push(CimRefOrNull::Reference(read_value_reference(
                r,
                &e,
                child_empty,
            )?)),
            b"VALUE.NULL" => {
                skip(r, &e, child_empty)?;
                values.push(CimRefOrNull::Null);
            }
            _ => skip(r, &e, child_empty)?,
        }
    }
    Ok(CimValueRefArray { values })
}

fn read_host(r: &mut R, _start: &BytesStart, empty: bool) -> Result<CimHost, XmlError> {
    Ok(CimHost {
        value: read_text(r, "HOST", empty)?,
    })
}

fn read_namespace(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimNamespace, XmlError> {
    let name = required_attr(start, "NAMESPACE", "NAME")?;
    skip(r, start, empty)?;
    Ok(CimNamespace { name })
}

fn read_local_namespace_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimLocalNamespacePath, XmlError> {
    let _ = start;
    let mut namespaces = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "LOCALNAMESPACEPATH")? {
            match e.name().as_ref() {
                b"NAMESPACE" => namespaces.push(read_namespace(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimLocalNamespacePath { namespaces })
}

fn read_namespace_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimNamespacePath, XmlError> {
    let _ = start;
    let mut host = None;
    let mut local = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "NAMESPACEPATH")? {
            match e.name().as_ref() {
                b"HOST" => host = Some(read_host(r, &e, child_empty)?),
                b"LOCALNAMESPACEPATH" => {
                    local = Some(read_local_namespace_path(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimNamespacePath {
        host: host.unwrap_or_default(),
        local_namespace_path: local.unwrap_or_default(),
    })
}

fn read_class_name(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimClassName, XmlError> {
    let name = required_attr(start, "CLASSNAME", "NAME")?;
    skip(r, start, empty)?;
    Ok(CimClassName { name })
}

fn read_class_path(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimClassPath, XmlError> {
    let _ = start;
    let mut namespace_path = None;
    let mut class_name = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "CLASSPATH")? {
            match e.name().as_ref() {
                b"NAMESPACEPATH" => {
                    namespace_path = Some(read_namespace_path(r, &e, child_empty)?)
                }
                b"CLASSNAME" => class_name = Some(read_class_name(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimClassPath {
        namespace_path: namespace_path.unwrap_or_default(),
        class_name: class_name.unwrap_or_default(),
    })
}

fn read_local_class_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimLocalClassPath, XmlError> {
    let _ = start;
    let mut namespace_path = None;
    let mut class_name = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "LOCALCLASSPATH")? {
            match e.name().as_ref() {
                b"LOCALNAMESPACEPATH" => {
                    namespace_path = Some(read_local_namespace_path(r, &e, child_empty)?)
                }
                b"CLASSNAME" => class_name = Some(read_class_name(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimLocalClassPath {
        namespace_path: namespace_path.unwrap_or_default(),
        class_name: class_name.unwrap_or_default(),
    })
}

fn read_key_value(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimKeyValue, XmlError> {
    let value_type = attr_value(start, b"VALUETYPE")?;
    let cim_type = attr_value(start, b"TYPE")?;
    Ok(CimKeyValue {
        value_type,
        cim_type,
        value: read_text(r, "KEYVALUE", empty)?,
    })
}

fn read_key_binding(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimKeyBinding, XmlError> {
    let name = required_attr(start, "KEYBINDING", "NAME")?;
    let mut value = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "KEYBINDING")? {
            match e.name().as_ref() {
                b"KEYVALUE" => {
                    value = Some(CimKeyBindingValue::Value(read_key_value(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"VALUE.REFERENCE" => {
                    value = Some(CimKeyBindingValue::Reference(read_value_reference(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    let value = value.ok_or(XmlError::MissingElement {
        context: "KEYBINDING",
        element: "KEYVALUE or VALUE.REFERENCE",
    })?;
    Ok(CimKeyBinding { name, value })
}

fn read_instance_name(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimInstanceName, XmlError> {
    let class_name = required_attr(start, "INSTANCENAME", "CLASSNAME")?;
    let mut bindings = Vec::new();
    let mut key_value = None;
    let mut reference = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "INSTANCENAME")? {
            match e.name().as_ref() {
                b"KEYBINDING" => bindings.push(read_key_binding(r, &e, child_empty)?),
                b"KEYVALUE" => key_value = Some(read_key_value(r, &e, child_empty)?),
                b"VALUE.REFERENCE" => {
                    reference = Some(read_value_reference(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    let keys = if !bindings.is_empty() {
        CimInstanceKeys::Bindings(bindings)
    } else if let Some(kv) = key_value {
        CimInstanceKeys::Value(kv)
    } else if let Some(reference) = reference {
        CimInstanceKeys::Reference(Box::new(reference))
    } else {
        CimInstanceKeys::None
    };
    Ok(CimInstanceName { class_name, keys })
}

fn read_instance_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimInstancePath, XmlError> {
    let _ = start;
    let mut namespace_path = None;
    let mut instance_name = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "INSTANCEPATH")? {
            match e.name().as_ref() {
                b"NAMESPACEPATH" => {
                    namespace_path = Some(read_namespace_path(r, &e, child_empty)?)
                }
                b"INSTANCENAME" => instance_name = Some(read_instance_name(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimInstancePath {
        namespace_path: namespace_path.unwrap_or_default(),
        instance_name: instance_name.unwrap_or_default(),
    })
}

fn read_local_instance_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimLocalInstancePath, XmlError> {
    let _ = start;
    let mut namespace_path = None;
    let mut instance_name = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "LOCALINSTANCEPATH")? {
            match e.name().as_ref() {
                b"LOCALNAMESPACEPATH" => {
                    namespace_path = Some(read_local_namespace_path(r, &e, child_empty)?)
                }
                b"INSTANCENAME" => instance_name = Some(read_instance_name(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimLocalInstancePath {
        namespace_path: namespace_path.unwrap_or_default(),
        instance_name: instance_name.unwrap_or_default(),
    })
}

fn read_object_path(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimObjectPath, XmlError> {
    let _ = start;
    let mut path = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "OBJECTPATH")? {
            match e.name().as_ref() {
                b"INSTANCEPATH" => {
                    path = Some(CimObjectPath::Instance(read_instance_path(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"CLASSPATH" => {
                    path = Some(CimObjectPath::Class(read_class_path(r, &e, child_empty)?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    path.ok_or(XmlError::MissingElement {
        context: "OBJECTPATH",
        element: "INSTANCEPATH or CLASSPATH",
    })
}

fn read_qualifier(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimQualifier, XmlError> {
    let mut qualifier = CimQualifier {
        name: required_attr(start, "QUALIFIER", "NAME")?,
        cim_type: required_attr(start, "QUALIFIER", "TYPE")?,
        propagated: bool_attr(start, "QUALIFIER", "PROPAGATED")?,
        lang: attr_value(start, b"xml:lang")?,
        flavor: read_flavor(start, "QUALIFIER")?,
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "QUALIFIER")? {
            match e.name().as_ref() {
                b"VALUE" => {
                    qualifier.value =
                        Some(CimQualifierValue::Value(read_value(r, &e, child_empty)?))
                }
                b"VALUE.ARRAY" => {
                    qualifier.value = Some(CimQualifierValue::Array(read_value_array(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(qualifier)
}

fn read_scope(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimScope, XmlError> {
    let scope = CimScope {
        class: bool_attr(start, "SCOPE", "CLASS")?,
        association: bool_attr(start, "SCOPE", "ASSOCIATION")?,
        reference: bool_attr(start, "SCOPE", "REFERENCE")?,
        property: bool_attr(start, "SCOPE", "PROPERTY")?,
        method: bool_attr(start, "SCOPE", "METHOD")?,
        parameter: bool_attr(start, "SCOPE", "PARAMETER")?,
        indication: bool_attr(start, "SCOPE", "INDICATION")?,
    };
    skip(r, start, empty)?;
    Ok(scope)
}

fn read_qualifier_declaration(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimQualifierDeclaration, XmlError> {
    let mut decl = CimQualifierDeclaration {
        name: required_attr(start, "QUALIFIER.DECLARATION", "NAME")?,
        cim_type: required_attr(start, "QUALIFIER.DECLARATION", "TYPE")?,
        is_array: bool_attr(start, "QUALIFIER.DECLARATION", "ISARRAY")?,
        array_size: int_attr(start, "QUALIFIER.DECLARATION", "ARRAYSIZE")?,
        flavor: read_flavor(start, "QUALIFIER.DECLARATION")?,
        scope: None,
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "QUALIFIER.DECLARATION")? {
            match e.name().as_ref() {
                b"SCOPE" => decl.scope = Some(read_scope(r, &e, child_empty)?),
                b"VALUE" => {
                    decl.value = Some(CimQualifierValue::Value(read_value(r, &e, child_empty)?))
                }
                b"VALUE.ARRAY" => {
                    decl.value = Some(CimQualifierValue::Array(read_value_array(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(decl)
}

fn read_property(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimProperty, XmlError> {
    let mut property = CimProperty {
        name: required_attr(start, "PROPERTY", "NAME")?,
        cim_type: required_attr(start, "PROPERTY", "TYPE")?,
        class_origin: attr_value(start, b"CLASSORIGIN")?,
        propagated: bool_attr(start, "PROPERTY", "PROPAGATED")?,
        embedded_object: attr_value(start, b"EmbeddedObject")?,
        lang: attr_value(start, b"xml:lang")?,
        qualifiers: Vec::new(),
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PROPERTY")? {
            match e.name().as_ref() {
                b"QUALIFIER" => property.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"VALUE" => property.value = Some(read_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(property)
}

fn read_property_array(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimPropertyArray, XmlError> {
    let mut property = CimPropertyArray {
        name: required_attr(start, "PROPERTY.ARRAY", "NAME")?,
        cim_type: required_attr(start, "PROPERTY.ARRAY", "TYPE")?,
        array_size: int_attr(start, "PROPERTY.ARRAY", "ARRAYSIZE")?,
        class_origin: attr_value(start, b"CLASSORIGIN")?,
        propagated: bool_attr(start, "PROPERTY.ARRAY", "PROPAGATED")?,
        embedded_object: attr_value(start, b"EmbeddedObject")?,
        lang: attr_value(start, b"xml:lang")?,
        qualifiers: Vec::new(),
        value_array: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PROPERTY.ARRAY")? {
            match e.name().as_ref() {
                b"QUALIFIER" => property.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"VALUE.ARRAY" => {
                    property.value_array = Some(read_value_array(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(property)
}

fn read_property_reference(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimPropertyReference, XmlError> {
    let mut property = CimPropertyReference {
        name: required_attr(start, "PROPERTY.REFERENCE", "NAME")?,
        reference_class: attr_value(start, b"REFERENCECLASS")?,
        class_origin: attr_value(start, b"CLASSORIGIN")?,
        propagated: bool_attr(start, "PROPERTY.REFERENCE", "PROPAGATED")?,
        qualifiers: Vec::new(),
        value_reference: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PROPERTY.REFERENCE")? {
            match e.name().as_ref() {
                b"QUALIFIER" => property.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"VALUE.REFERENCE" => {
                    property.value_reference = Some(read_value_reference(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(property)
}

fn read_instance(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimInstance, XmlError> {
    let mut instance = CimInstance {
        class_name: required_attr(start, "INSTANCE", "CLASSNAME")?,
        lang: attr_value(start, b"xml:lang")?,
        qualifiers: Vec::new(),
        properties: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "INSTANCE")? {
            match e.name().as_ref() {
                b"QUALIFIER" => instance.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"PROPERTY" => instance
                    .properties
                    .push(CimPropertyEntry::Scalar(read_property(r, &e, child_empty)?)),
                b"PROPERTY.ARRAY" => instance.properties.push(CimPropertyEntry::Array(
                    read_property_array(r, &e, child_empty)?,
                )),
                b"PROPERTY.REFERENCE" => instance.properties.push(CimPropertyEntry::Reference(
                    read_property_reference(r, &e, child_empty)?,
                )),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(instance)
}

fn read_parameter(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimParameter, XmlError> {
    let mut parameter = CimParameter {
        name: required_attr(start, "PARAMETER", "NAME")?,
        cim_type: required_attr(start, "PARAMETER", "TYPE")?,
        qualifiers: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PARAMETER")? {
            match e.name().as_ref() {
                b"QUALIFIER" => parameter.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(parameter)
}

fn read_parameter_reference(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimParameterReference, XmlError> {
    let mut parameter = CimParameterReference {
        name: required_attr(start, "PARAMETER.REFERENCE", "NAME")?,
        reference_class: attr_value(start, b"REFERENCECLASS")?,
        qualifiers: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PARAMETER.REFERENCE")? {
            match e.name().as_ref() {
                b"QUALIFIER" => parameter.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(parameter)
}

fn read_parameter_array(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimParameterArray, XmlError> {
    let mut parameter = CimParameterArray {
        name: required_attr(start, "PARAMETER.ARRAY", "NAME")?,
        cim_type: required_attr(start, "PARAMETER.ARRAY", "TYPE")?,
        array_size: int_attr(start, "PARAMETER.ARRAY", "ARRAYSIZE")?,
        qualifiers: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PARAMETER.ARRAY")? {
            match e.name().as_ref() {
                b"QUALIFIER" => parameter.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(parameter)
}

fn read_parameter_ref_array(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimParameterRefArray, XmlError> {
    let mut parameter = CimParameterRefArray {
        name: required_attr(start, "PARAMETER.REFARRAY", "NAME")?,
        reference_class: attr_value(start, b"REFERENCECLASS")?.unwrap_or_default(),
        array_size: int_attr(start, "PARAMETER.REFARRAY", "ARRAYSIZE")?,
        qualifiers: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PARAMETER.REFARRAY")? {
            match e.name().as_ref() {
                b"QUALIFIER" => parameter.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(parameter)
}

fn read_method(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimMethod, XmlError> {
    let mut method = CimMethod {
        name: required_attr(start, "METHOD", "NAME")?,
        cim_type: attr_value(start, b"TYPE")?,
        class_origin: attr_value(start, b"CLASSORIGIN")?,
        propagated: bool_attr(start, "METHOD", "PROPAGATED")?,
        qualifiers: Vec::new(),
        parameters: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "METHOD")? {
            match e.name().as_ref() {
                b"QUALIFIER" => method.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"PARAMETER" => method
                    .parameters
                    .push(CimParameterEntry::Scalar(read_parameter(r, &e, child_empty)?)),
                b"PARAMETER.REFERENCE" => method.parameters.push(CimParameterEntry::Reference(
                    read_parameter_reference(r, &e, child_empty)?,
                )),
                b"PARAMETER.ARRAY" => method.parameters.push(CimParameterEntry::Array(
                    read_parameter_array(r, &e, child_empty)?,
                )),
                b"PARAMETER.REFARRAY" => method.parameters.push(CimParameterEntry::RefArray(
                    read_parameter_ref_array(r, &e, child_empty)?,
                )),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(method)
}

fn read_class(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimClass, XmlError> {
    let mut class = CimClass {
        name: required_attr(start, "CLASS", "NAME")?,
        super_class: attr_value(start, b"SUPERCLASS")?,
        qualifiers: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "CLASS")? {
            match e.name().as_ref() {
                b"QUALIFIER" => class.qualifiers.push(read_qualifier(r, &e, child_empty)?),
                b"PROPERTY" => class
                    .properties
                    .push(CimPropertyEntry::Scalar(read_property(r, &e, child_empty)?)),
                b"PROPERTY.ARRAY" => class.properties.push(CimPropertyEntry::Array(
                    read_property_array(r, &e, child_empty)?,
                )),
                b"PROPERTY.REFERENCE" => class.properties.push(CimPropertyEntry::Reference(
                    read_property_reference(r, &e, child_empty)?,
                )),
                b"METHOD" => class.methods.push(read_method(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(class)
}

fn read_value_object(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimValueObject, XmlError> {
    let _ = start;
    let mut object = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.OBJECT")? {
            match e.name().as_ref() {
                b"CLASS" => object = Some(CimValueObject::Class(read_class(r, &e, child_empty)?)),
                b"INSTANCE" => {
                    object = Some(CimValueObject::Instance(read_instance(r, &e, child_empty)?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    object.ok_or(XmlError::MissingElement {
        context: "VALUE.OBJECT",
        element: "CLASS or INSTANCE",
    })
}

fn read_value_named_instance(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueNamedInstance, XmlError> {
    let _ = start;
    let mut instance_name = None;
    let mut instance = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.NAMEDINSTANCE")? {
            match e.name().as_ref() {
                b"INSTANCENAME" => instance_name = Some(read_instance_name(r, &e, child_empty)?),
                b"INSTANCE" => instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimValueNamedInstance {
        instance_name: instance_name.ok_or(XmlError::MissingElement {
            context: "VALUE.NAMEDINSTANCE",
            element: "INSTANCENAME",
        })?,
        instance: instance.ok_or(XmlError::MissingElement {
            context: "VALUE.NAMEDINSTANCE",
            element: "INSTANCE",
        })?,
    })
}

fn read_value_named_object(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueNamedObject, XmlError> {
    let _ = start;
    let mut class = None;
    let mut instance_name = None;
    let mut instance = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.NAMEDOBJECT")? {
            match e.name().as_ref() {
                b"CLASS" => class = Some(read_class(r, &e, child_empty)?),
                b"INSTANCENAME" => instance_name = Some(read_instance_name(r, &e, child_empty)?),
                b"INSTANCE" => instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    if let Some(class) = class {
        return Ok(CimValueNamedObject::Class(class));
    }
    match (instance_name, instance) {
        (Some(name), Some(instance)) => Ok(CimValueNamedObject::Instance { name, instance }),
        _ => Err(XmlError::MissingElement {
            context: "VALUE.NAMEDOBJECT",
            element: "CLASS or INSTANCENAME+INSTANCE",
        }),
    }
}

fn read_value_object_with_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueObjectWithPath, XmlError> {
    let _ = start;
    let mut class_path = None;
    let mut class = None;
    let mut instance_path = None;
    let mut instance = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.OBJECTWITHPATH")? {
            match e.name().as_ref() {
                b"CLASSPATH" => class_path = Some(read_class_path(r, &e, child_empty)?),
                b"CLASS" => class = Some(read_class(r, &e, child_empty)?),
                b"INSTANCEPATH" => instance_path = Some(read_instance_path(r, &e, child_empty)?),
                b"INSTANCE" => instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    if let (Some(path), Some(instance)) = (instance_path, instance) {
        return Ok(CimValueObjectWithPath::Instance { path, instance });
    }
    match (class_path, class) {
        (Some(path), Some(class)) => Ok(CimValueObjectWithPath::Class { path, class }),
        _ => Err(XmlError::MissingElement {
            context: "VALUE.OBJECTWITHPATH",
            element: "CLASSPATH+CLASS or INSTANCEPATH+INSTANCE",
        }),
    }
}

fn read_value_object_with_local_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueObjectWithLocalPath, XmlError> {
    let _ = start;
    let mut class_path = None;
    let mut class = None;
    let mut instance_path = None;
    let mut instance = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.OBJECTWITHLOCALPATH")? {
            match e.name().as_ref() {
                b"LOCALCLASSPATH" => class_path = Some(read_local_class_path(r, &e, child_empty)?),
                b"CLASS" => class = Some(read_class(r, &e, child_empty)?),
                b"LOCALINSTANCEPATH" => {
                    instance_path = Some(read_local_instance_path(r, &e, child_empty)?)
                }
                b"INSTANCE" => instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    if let (Some(path), Some(instance)) = (instance_path, instance) {
        return Ok(CimValueObjectWithLocalPath::Instance { path, instance });
    }
    match (class_path, class) {
        (Some(path), Some(class)) => Ok(CimValueObjectWithLocalPath::Class { path, class }),
        _ => Err(XmlError::MissingElement {
            context: "VALUE.OBJECTWITHLOCALPATH",
            element: "LOCALCLASSPATH+CLASS or LOCALINSTANCEPATH+INSTANCE",
        }),
    }
}

fn read_value_instance_with_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimValueInstanceWithPath, XmlError> {
    let _ = start;
    let mut instance_path = None;
    let mut instance = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "VALUE.INSTANCEWITHPATH")? {
            match e.name().as_ref() {
                b"INSTANCEPATH" => instance_path = Some(read_instance_path(r, &e, child_empty)?),
                b"INSTANCE" => instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimValueInstanceWithPath {
        instance_path: instance_path.ok_or(XmlError::MissingElement {
            context: "VALUE.INSTANCEWITHPATH",
            element: "INSTANCEPATH",
        })?,
        instance: instance.ok_or(XmlError::MissingElement {
            context: "VALUE.INSTANCEWITHPATH",
            element: "INSTANCE",
        })?,
    })
}

fn read_correlator(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimCorrelator, XmlError> {
    let mut correlator = CimCorrelator {
        name: required_attr(start, "CORRELATOR", "NAME")?,
        cim_type: required_attr(start, "CORRELATOR", "TYPE")?,
        value: CimValue::default(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "CORRELATOR")? {
            match e.name().as_ref() {
                b"VALUE" => correlator.value = read_value(r, &e, child_empty)?,
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(correlator)
}

fn read_param_value(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimParamValue, XmlError> {
    let mut param = CimParamValue {
        name: required_attr(start, "PARAMVALUE", "NAME")?,
        param_type: attr_value(start, b"PARAMTYPE")?,
        embedded_object: attr_value(start, b"EmbeddedObject")?,
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "PARAMVALUE")? {
            param.value = Some(match e.name().as_ref() {
                b"VALUE" => CimParamValueKind::Value(read_value(r, &e, child_empty)?),
                b"VALUE.REFERENCE" => {
                    CimParamValueKind::Reference(read_value_reference(r, &e, child_empty)?)
                }
                b"VALUE.ARRAY" => CimParamValueKind::Array(read_value_array(r, &e, child_empty)?),
                b"VALUE.REFARRAY" => {
                    CimParamValueKind::RefArray(read_value_ref_array(r, &e, child_empty)?)
                }
                b"CLASSNAME" => CimParamValueKind::ClassName(read_class_name(r, &e, child_empty)?),
                b"INSTANCENAME" => {
                    CimParamValueKind::InstanceName(read_instance_name(r, &e, child_empty)?)
                }
                b"CLASS" => CimParamValueKind::Class(read_class(r, &e, child_empty)?),
                b"INSTANCE" => CimParamValueKind::Instance(read_instance(r, &e, child_empty)?),
                b"VALUE.NAMEDINSTANCE" => CimParamValueKind::NamedInstance(
                    read_value_named_instance(r, &e, child_empty)?,
                ),
                _ => {
                    skip(r, &e, child_empty)?;
                    continue;
                }
            });
        }
    }
    Ok(param)
}

fn read_iparam_value(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimIParamValue, XmlError> {
    let mut param = CimIParamValue {
        name: required_attr(start, "IPARAMVALUE", "NAME")?,
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "IPARAMVALUE")? {
            param.value = Some(match e.name().as_ref() {
                b"VALUE" => CimIParamValueKind::Value(read_value(r, &e, child_empty)?),
                b"VALUE.REFERENCE" => {
                    CimIParamValueKind::Reference(read_value_reference(r, &e, child_empty)?)
                }
                b"VALUE.ARRAY" => CimIParamValueKind::Array(read_value_array(r, &e, child_empty)?),
                b"CLASSNAME" => CimIParamValueKind::ClassName(read_class_name(r, &e, child_empty)?),
                b"INSTANCENAME" => {
                    CimIParamValueKind::InstanceName(read_instance_name(r, &e, child_empty)?)
                }
                b"QUALIFIER.DECLARATION" => CimIParamValueKind::QualifierDeclaration(
                    read_qualifier_declaration(r, &e, child_empty)?,
                ),
                b"CLASS" => CimIParamValueKind::Class(read_class(r, &e, child_empty)?),
                b"INSTANCE" => CimIParamValueKind::Instance(read_instance(r, &e, child_empty)?),
                b"VALUE.NAMEDINSTANCE" => CimIParamValueKind::NamedInstance(
                    read_value_named_instance(r, &e, child_empty)?,
                ),
                _ => {
                    skip(r, &e, child_empty)?;
                    continue;
                }
            });
        }
    }
    Ok(param)
}

fn read_return_value(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimReturnValue, XmlError> {
    let mut rv = CimReturnValue {
        param_type: attr_value(start, b"PARAMTYPE")?,
        embedded_object: attr_value(start, b"EmbeddedObject")?,
        value: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "RETURNVALUE")? {
            match e.name().as_ref() {
                b"VALUE" => rv.value = Some(CimReturnValueKind::Value(read_value(r, &e, child_empty)?)),
                b"VALUE.REFERENCE" => {
                    rv.value = Some(CimReturnValueKind::Reference(read_value_reference(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(rv)
}

fn read_ireturn_value(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimIReturnValue, XmlError> {
    let _ = start;
    let mut rv = CimIReturnValue::default();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "IRETURNVALUE")? {
            match e.name().as_ref() {
                b"CLASSNAME" => rv.class_names.push(read_class_name(r, &e, child_empty)?),
                b"INSTANCENAME" => rv.instance_names.push(read_instance_name(r, &e, child_empty)?),
                b"VALUE" => rv.values.push(read_value(r, &e, child_empty)?),
                b"VALUE.OBJECTWITHPATH" => rv
                    .value_object_with_paths
                    .push(read_value_object_with_path(r, &e, child_empty)?),
                b"VALUE.OBJECTWITHLOCALPATH" => rv
                    .value_object_with_local_paths
                    .push(read_value_object_with_local_path(r, &e, child_empty)?),
                b"VALUE.OBJECT" => rv.value_objects.push(read_value_object(r, &e, child_empty)?),
                b"OBJECTPATH" => rv.object_paths.push(read_object_path(r, &e, child_empty)?),
                b"QUALIFIER.DECLARATION" => rv
                    .qualifier_declarations
                    .push(read_qualifier_declaration(r, &e, child_empty)?),
                b"VALUE.ARRAY" => rv.value_array = Some(read_value_array(r, &e, child_empty)?),
                b"VALUE.REFERENCE" => {
                    rv.value_reference = Some(read_value_reference(r, &e, child_empty)?)
                }
                b"CLASS" => rv.classes.push(read_class(r, &e, child_empty)?),
                b"INSTANCE" => rv.instances.push(read_instance(r, &e, child_empty)?),
                b"INSTANCEPATH" => rv.instance_paths.push(read_instance_path(r, &e, child_empty)?),
                b"VALUE.NAMEDINSTANCE" => rv
                    .value_named_instances
                    .push(read_value_named_instance(r, &e, child_empty)?),
                b"VALUE.INSTANCEWITHPATH" => rv
                    .value_instance_with_paths
                    .push(read_value_instance_with_path(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(rv)
}

fn read_error(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimError, XmlError> {
    let code_text = required_attr(start, "ERROR", "CODE")?;
    let code = code_text
        .parse::<u32>()
        .map_err(|_| XmlError::InvalidAttribute {
            element: "ERROR",
            attr: "CODE",
            value: code_text,
        })?;
    let mut error = CimError {
        code,
        description: attr_value(start, b"DESCRIPTION")?.unwrap_or_default(),
        instances: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "ERROR")? {
            match e.name().as_ref() {
                b"INSTANCE" => error.instances.push(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(error)
}

fn read_method_response(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimMethodResponse, XmlError> {
    let mut response = CimMethodResponse {
        name: required_attr(start, "METHODRESPONSE", "NAME")?,
        ..CimMethodResponse::default()
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "METHODRESPONSE")? {
            match e.name().as_ref() {
                b"ERROR" => response.error = Some(read_error(r, &e, child_empty)?),
                b"RETURNVALUE" => {
                    response.return_value = Some(read_return_value(r, &e, child_empty)?)
                }
                b"PARAMVALUE" => response
                    .param_values
                    .push(read_param_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(response)
}

fn read_imethod_response(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimIMethodResponse, XmlError> {
    let mut response = CimIMethodResponse {
        name: required_attr(start, "IMETHODRESPONSE", "NAME")?,
        ..CimIMethodResponse::default()
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "IMETHODRESPONSE")? {
            match e.name().as_ref() {
                b"ERROR" => response.error = Some(read_error(r, &e, child_empty)?),
                b"IRETURNVALUE" => {
                    response.return_value = Some(read_ireturn_value(r, &e, child_empty)?)
                }
                b"PARAMVALUE" => response
                    .param_values
                    .push(read_param_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(response)
}

fn read_simple_rsp(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimSimpleRsp, XmlError> {
    let _ = start;
    let mut response = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "SIMPLERSP")? {
            match e.name().as_ref() {
                b"METHODRESPONSE" => {
                    response = Some(CimRsp::Method(read_method_response(r, &e, child_empty)?))
                }
                b"IMETHODRESPONSE" => {
                    response = Some(CimRsp::IMethod(read_imethod_response(r, &e, child_empty)?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimSimpleRsp { response })
}

fn read_method_call(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimMethodCall, XmlError> {
    let name = required_attr(start, "METHODCALL", "NAME")?;
    let mut path = None;
    let mut param_values = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "METHODCALL")? {
            match e.name().as_ref() {
                b"LOCALCLASSPATH" => {
                    path = Some(CimCallPath::Class(read_local_class_path(r, &e, child_empty)?))
                }
                b"LOCALINSTANCEPATH" => {
                    path = Some(CimCallPath::Instance(read_local_instance_path(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"PARAMVALUE" => param_values.push(read_param_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMethodCall {
        name,
        path: path.ok_or(XmlError::MissingElement {
            context: "METHODCALL",
            element: "LOCALCLASSPATH or LOCALINSTANCEPATH",
        })?,
        param_values,
    })
}

fn read_imethod_call(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimIMethodCall, XmlError> {
    let mut call = CimIMethodCall {
        name: required_attr(start, "IMETHODCALL", "NAME")?,
        ..CimIMethodCall::default()
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "IMETHODCALL")? {
            match e.name().as_ref() {
                b"LOCALNAMESPACEPATH" => {
                    call.namespace_path = read_local_namespace_path(r, &e, child_empty)?
                }
                b"IPARAMVALUE" => call.param_values.push(read_iparam_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(call)
}

fn read_simple_req(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimSimpleReq, XmlError> {
    let _ = start;
    let mut correlators = Vec::new();
    let mut call = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "SIMPLEREQ")? {
            match e.name().as_ref() {
                b"CORRELATOR" => correlators.push(read_correlator(r, &e, child_empty)?),
                b"METHODCALL" => {
                    call = Some(CimCall::Method(read_method_call(r, &e, child_empty)?))
                }
                b"IMETHODCALL" => {
                    call = Some(CimCall::IMethod(read_imethod_call(r, &e, child_empty)?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimSimpleReq {
        correlators,
        call: call.ok_or(XmlError::MissingElement {
            context: "SIMPLEREQ",
            element: "METHODCALL or IMETHODCALL",
        })?,
    })
}

fn read_multi_req(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimMultiReq, XmlError> {
    let _ = start;
    let mut requests = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "MULTIREQ")? {
            match e.name().as_ref() {
                b"SIMPLEREQ" => requests.push(read_simple_req(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMultiReq { requests })
}

fn read_multi_rsp(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimMultiRsp, XmlError> {
    let _ = start;
    let mut responses = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "MULTIRSP")? {
            match e.name().as_ref() {
                b"SIMPLERSP" => responses.push(read_simple_rsp(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMultiRsp { responses })
}

fn read_exp_param_value(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimExpParamValue, XmlError> {
    let mut param = CimExpParamValue {
        name: required_attr(start, "EXPPARAMVALUE", "NAME")?,
        instance: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "EXPPARAMVALUE")? {
            match e.name().as_ref() {
                b"INSTANCE" => param.instance = Some(read_instance(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(param)
}

fn read_exp_method_call(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimExpMethodCall, XmlError> {
    let mut call = CimExpMethodCall {
        name: required_attr(start, "EXPMETHODCALL", "NAME")?,
        param_values: Vec::new(),
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "EXPMETHODCALL")? {
            match e.name().as_ref() {
                b"EXPPARAMVALUE" => call.param_values.push(read_exp_param_value(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(call)
}

fn read_simple_exp_req(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimSimpleExpReq, XmlError> {
    let _ = start;
    let mut correlators = Vec::new();
    let mut call = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "SIMPLEEXPREQ")? {
            match e.name().as_ref() {
                b"CORRELATOR" => correlators.push(read_correlator(r, &e, child_empty)?),
                b"EXPMETHODCALL" => call = Some(read_exp_method_call(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimSimpleExpReq {
        correlators,
        call: call.ok_or(XmlError::MissingElement {
            context: "SIMPLEEXPREQ",
            element: "EXPMETHODCALL",
        })?,
    })
}

fn read_exp_method_response(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimExpMethodResponse, XmlError> {
    let mut response = CimExpMethodResponse {
        name: required_attr(start, "EXPMETHODRESPONSE", "NAME")?,
        ..CimExpMethodResponse::default()
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "EXPMETHODRESPONSE")? {
            match e.name().as_ref() {
                b"ERROR" => response.error = Some(read_error(r, &e, child_empty)?),
                b"IRETURNVALUE" => {
                    response.return_value = Some(read_ireturn_value(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(response)
}

fn read_simple_exp_rsp(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimSimpleExpRsp, XmlError> {
    let _ = start;
    let mut response = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "SIMPLEEXPRSP")? {
            match e.name().as_ref() {
                b"EXPMETHODRESPONSE" => {
                    response = Some(read_exp_method_response(r, &e, child_empty)?)
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimSimpleExpRsp {
        response: response.ok_or(XmlError::MissingElement {
            context: "SIMPLEEXPRSP",
            element: "EXPMETHODRESPONSE",
        })?,
    })
}

fn read_multi_exp_req(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimMultiExpReq, XmlError> {
    let _ = start;
    let mut requests = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "MULTIEXPREQ")? {
            match e.name().as_ref() {
                b"SIMPLEEXPREQ" => requests.push(read_simple_exp_req(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMultiExpReq { requests })
}

fn read_multi_exp_rsp(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimMultiExpRsp, XmlError> {
    let _ = start;
    let mut responses = Vec::new();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "MULTIEXPRSP")? {
            match e.name().as_ref() {
                b"SIMPLEEXPRSP" => responses.push(read_simple_exp_rsp(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMultiExpRsp { responses })
}

fn read_decl_group(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimDeclGroup, XmlError> {
    let _ = start;
    let mut group = CimDeclGroup::default();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "DECLGROUP")? {
            match e.name().as_ref() {
                b"LOCALNAMESPACEPATH" => {
                    group.namespace_path = Some(CimDeclNamespacePath::Local(
                        read_local_namespace_path(r, &e, child_empty)?,
                    ))
                }
                b"NAMESPACEPATH" => {
                    group.namespace_path = Some(CimDeclNamespacePath::Absolute(
                        read_namespace_path(r, &e, child_empty)?,
                    ))
                }
                b"QUALIFIER.DECLARATION" => group
                    .qualifier_declarations
                    .push(read_qualifier_declaration(r, &e, child_empty)?),
                b"VALUE.OBJECT" => group.value_objects.push(read_value_object(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(group)
}

fn read_decl_group_with_name(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimDeclGroupWithName, XmlError> {
    let _ = start;
    let mut group = CimDeclGroupWithName::default();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "DECLGROUP.WITHNAME")? {
            match e.name().as_ref() {
                b"LOCALNAMESPACEPATH" => {
                    group.namespace_path = Some(CimDeclNamespacePath::Local(
                        read_local_namespace_path(r, &e, child_empty)?,
                    ))
                }
                b"NAMESPACEPATH" => {
                    group.namespace_path = Some(CimDeclNamespacePath::Absolute(
                        read_namespace_path(r, &e, child_empty)?,
                    ))
                }
                b"QUALIFIER.DECLARATION" => group
                    .qualifier_declarations
                    .push(read_qualifier_declaration(r, &e, child_empty)?),
                b"VALUE.NAMEDOBJECT" => group
                    .value_named_objects
                    .push(read_value_named_object(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(group)
}

fn read_decl_group_with_path(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimDeclGroupWithPath, XmlError> {
    let _ = start;
    let mut group = CimDeclGroupWithPath::default();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "DECLGROUP.WITHPATH")? {
            match e.name().as_ref() {
                b"VALUE.OBJECTWITHPATH" => group.values.push(CimDeclPathObject::WithPath(
                    read_value_object_with_path(r, &e, child_empty)?,
                )),
                b"VALUE.OBJECTWITHLOCALPATH" => {
                    group.values.push(CimDeclPathObject::WithLocalPath(
                        read_value_object_with_local_path(r, &e, child_empty)?,
                    ))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(group)
}

fn read_declaration(
    r: &mut R,
    start: &BytesStart,
    empty: bool,
) -> Result<CimDeclaration, XmlError> {
    let _ = start;
    let mut declaration = CimDeclaration::default();
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "DECLARATION")? {
            match e.name().as_ref() {
                b"DECLGROUP" => declaration
                    .groups
                    .push(CimDeclGroupKind::Plain(read_decl_group(r, &e, child_empty)?)),
                b"DECLGROUP.WITHNAME" => declaration.groups.push(CimDeclGroupKind::WithName(
                    read_decl_group_with_name(r, &e, child_empty)?,
                )),
                b"DECLGROUP.WITHPATH" => declaration.groups.push(CimDeclGroupKind::WithPath(
                    read_decl_group_with_path(r, &e, child_empty)?,
                )),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(declaration)
}

fn read_message(r: &mut R, start: &BytesStart, empty: bool) -> Result<CimMessage, XmlError> {
    let id = required_attr(start, "MESSAGE", "ID")?;
    let protocol_version = required_attr(start, "MESSAGE", "PROTOCOLVERSION")?;
    let mut body = None;
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "MESSAGE")? {
            match e.name().as_ref() {
                b"SIMPLEREQ" => {
                    body = Some(CimMessageBody::SimpleReq(read_simple_req(r, &e, child_empty)?))
                }
                b"MULTIREQ" => {
                    body = Some(CimMessageBody::MultiReq(read_multi_req(r, &e, child_empty)?))
                }
                b"SIMPLERSP" => {
                    body = Some(CimMessageBody::SimpleRsp(read_simple_rsp(r, &e, child_empty)?))
                }
                b"MULTIRSP" => {
                    body = Some(CimMessageBody::MultiRsp(read_multi_rsp(r, &e, child_empty)?))
                }
                b"SIMPLEEXPREQ" => {
                    body = Some(CimMessageBody::SimpleExpReq(read_simple_exp_req(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"MULTIEXPREQ" => {
                    body = Some(CimMessageBody::MultiExpReq(read_multi_exp_req(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"SIMPLEEXPRSP" => {
                    body = Some(CimMessageBody::SimpleExpRsp(read_simple_exp_rsp(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                b"MULTIEXPRSP" => {
                    body = Some(CimMessageBody::MultiExpRsp(read_multi_exp_rsp(
                        r,
                        &e,
                        child_empty,
                    )?))
                }
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(CimMessage {
        id,
        protocol_version,
        body: body.ok_or(XmlError::MissingElement {
            context: "MESSAGE",
            element: "request or response body",
        })?,
    })
}

fn read_cim(r: &mut R, start: &BytesStart, empty: bool) -> Result<Cim, XmlError> {
    let mut cim = Cim {
        cim_version: attr_value(start, b"CIMVERSION")?.unwrap_or_default(),
        dtd_version: attr_value(start, b"DTDVERSION")?.unwrap_or_default(),
        message: None,
        declaration: None,
    };
    if !empty {
        while let Some((e, child_empty)) = next_child(r, "CIM")? {
            match e.name().as_ref() {
                b"MESSAGE" => cim.message = Some(read_message(r, &e, child_empty)?),
                b"DECLARATION" => cim.declaration = Some(read_declaration(r, &e, child_empty)?),
                _ => skip(r, &e, child_empty)?,
            }
        }
    }
    Ok(cim)
}
