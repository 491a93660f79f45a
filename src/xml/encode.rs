// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM-XML encoding: one encoder per element, choice groups write the
//! populated variant.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::model::message::*;
use crate::model::naming::*;
use crate::model::object::*;
use crate::model::values::*;
use crate::xml::XmlError;

/// Serialize a CIM envelope into `out`. No XML declaration is written; the
/// transport prepends one.
pub fn encode_envelope(cim: &Cim, out: &mut Vec<u8>) -> Result<(), XmlError> {
    let mut writer = Writer::new(out);
    cim.encode(&mut writer)
}

pub(crate) trait XmlEncode {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError>;
}

fn start(name: &'static str) -> BytesStart<'static> {
    BytesStart::new(name)
}

fn end<W: Write>(w: &mut Writer<W>, name: &'static str) -> Result<(), XmlError> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn open<W: Write>(w: &mut Writer<W>, el: BytesStart) -> Result<(), XmlError> {
    w.write_event(Event::Start(el))?;
    Ok(())
}

fn empty<W: Write>(w: &mut Writer<W>, el: BytesStart) -> Result<(), XmlError> {
    w.write_event(Event::Empty(el))?;
    Ok(())
}

fn text<W: Write>(w: &mut Writer<W>, value: &str) -> Result<(), XmlError> {
    w.write_event(Event::Text(BytesText::new(value)))?;
    Ok(())
}

fn push_opt(el: &mut BytesStart, attr: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        el.push_attribute((attr, value));
    }
}

fn push_flag(el: &mut BytesStart, attr: &'static str, value: bool) {
    if value {
        el.push_attribute((attr, "true"));
    }
}

fn push_flavor(el: &mut BytesStart, flavor: &CimQualifierFlavor) {
    push_flag(el, "OVERRIDABLE", flavor.overridable);
    push_flag(el, "TOSUBCLASS", flavor.to_subclass);
    push_flag(el, "TOINSTANCE", flavor.to_instance);
    push_flag(el, "TRANSLATABLE", flavor.translatable);
}

impl XmlEncode for CimValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("VALUE");
        push_opt(&mut el, "TYPE", self.value_type.as_deref());
        open(w, el)?;
        text(w, &self.value)?;
        end(w, "VALUE")
    }
}

impl XmlEncode for CimValueOrNull {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        match self {
            Self::Value(v) => v.encode(w),
            Self::Null => empty(w, start("VALUE.NULL")),
        }
    }
}

impl XmlEncode for CimValueArray {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.ARRAY"))?;
        for value in &self.values {
            value.encode(w)?;
        }
        end(w, "VALUE.ARRAY")
    }
}

impl XmlEncode for CimValueReference {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.REFERENCE"))?;
        match self {
            Self::ClassPath(p) => p.encode(w)?,
            Self::LocalClassPath(p) => p.encode(w)?,
            Self::ClassName(n) => n.encode(w)?,
            Self::InstancePath(p) => p.encode(w)?,
            Self::LocalInstancePath(p) => p.encode(w)?,
            Self::InstanceName(n) => n.encode(w)?,
        }
        end(w, "VALUE.REFERENCE")
    }
}

impl XmlEncode for CimRefOrNull {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        match self {
            Self::Reference(r) => r.encode(w),
            Self::Null => empty(w, start("VALUE.NULL")),
        }
    }
}

impl XmlEncode for CimValueRefArray {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.REFARRAY"))?;
        for value in &self.values {
            value.encode(w)?;
        }
        end(w, "VALUE.REFARRAY")
    }
}

impl XmlEncode for CimValueObject {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.OBJECT"))?;
        match self {
            Self::Class(c) => c.encode(w)?,
            Self::Instance(i) => i.encode(w)?,
        }
        end(w, "VALUE.OBJECT")
    }
}

impl XmlEncode for CimValueNamedInstance {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.NAMEDINSTANCE"))?;
        self.instance_name.encode(w)?;
        self.instance.encode(w)?;
        end(w, "VALUE.NAMEDINSTANCE")
    }
}

impl XmlEncode for CimValueNamedObject {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.NAMEDOBJECT"))?;
        match self {
            Self::Class(c) => c.encode(w)?,
            Self::Instance { name, instance } => {
                name.encode(w)?;
                instance.encode(w)?;
            }
        }
        end(w, "VALUE.NAMEDOBJECT")
    }
}

impl XmlEncode for CimValueObjectWithPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.OBJECTWITHPATH"))?;
        match self {
            Self::Class { path, class } => {
                path.encode(w)?;
                class.encode(w)?;
            }
            Self::Instance { path, instance } => {
                path.encode(w)?;
                instance.encode(w)?;
            }
        }
        end(w, "VALUE.OBJECTWITHPATH")
    }
}

impl XmlEncode for CimValueObjectWithLocalPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.OBJECTWITHLOCALPATH"))?;
        match self {
            Self::Class { path, class } => {
                path.encode(w)?;
                class.encode(w)?;
            }
            Self::Instance { path, instance } => {
                path.encode(w)?;
                instance.encode(w)?;
            }
        }
        end(w, "VALUE.OBJECTWITHLOCALPATH")
    }
}

impl XmlEncode for CimValueInstanceWithPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("VALUE.INSTANCEWITHPATH"))?;
        self.instance_path.encode(w)?;
        self.instance.encode(w)?;
        end(w, "VALUE.INSTANCEWITHPATH")
    }
}

impl XmlEncode for CimHost {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("HOST"))?;
        text(w, &self.value)?;
        end(w, "HOST")
    }
}

impl XmlEncode for CimNamespace {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("NAMESPACE");
        el.push_attribute(("NAME", self.name.as_str()));
        empty(w, el)
    }
}

impl XmlEncode for CimLocalNamespacePath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("LOCALNAMESPACEPATH"))?;
        for ns in &self.namespaces {
            ns.encode(w)?;
        }
        end(w, "LOCALNAMESPACEPATH")
    }
}

impl XmlEncode for CimNamespacePath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("NAMESPACEPATH"))?;
        self.host.encode(w)?;
        self.local_namespace_path.encode(w)?;
        end(w, "NAMESPACEPATH")
    }
}

impl XmlEncode for CimClassName {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("CLASSNAME");
        el.push_attribute(("NAME", self.name.as_str()));
        empty(w, el)
    }
}

impl XmlEncode for CimClassPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("CLASSPATH"))?;
        self.namespace_path.encode(w)?;
        self.class_name.encode(w)?;
        end(w, "CLASSPATH")
    }
}

impl XmlEncode for CimLocalClassPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("LOCALCLASSPATH"))?;
        self.namespace_path.encode(w)?;
        self.class_name.encode(w)?;
        end(w, "LOCALCLASSPATH")
    }
}

impl XmlEncode for CimInstancePath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("INSTANCEPATH"))?;
        self.namespace_path.encode(w)?;
        self.instance_name.encode(w)?;
        end(w, "INSTANCEPATH")
    }
}

impl XmlEncode for CimLocalInstancePath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("LOCALINSTANCEPATH"))?;
        self.namespace_path.encode(w)?;
        self.instance_name.encode(w)?;
        end(w, "LOCALINSTANCEPATH")
    }
}

impl XmlEncode for CimKeyValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("KEYVALUE");
        push_opt(&mut el, "VALUETYPE", self.value_type.as_deref());
        push_opt(&mut el, "TYPE", self.cim_type.as_deref());
        open(w, el)?;
        text(w, &self.value)?;
        end(w, "KEYVALUE")
    }
}

impl XmlEncode for CimKeyBinding {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("KEYBINDING");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        match &self.value {
            CimKeyBindingValue::Value(kv) => kv.encode(w)?,
            CimKeyBindingValue::Reference(r) => r.encode(w)?,
        }
        end(w, "KEYBINDING")
    }
}

impl XmlEncode for CimInstanceName {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("INSTANCENAME");
        el.push_attribute(("CLASSNAME", self.class_name.as_str()));
        match &self.keys {
            CimInstanceKeys::None => empty(w, el),
            CimInstanceKeys::Bindings(bindings) => {
                open(w, el)?;
                for kb in bindings {
                    kb.encode(w)?;
                }
                end(w, "INSTANCENAME")
            }
            CimInstanceKeys::Value(kv) => {
                open(w, el)?;
                kv.encode(w)?;
                end(w, "INSTANCENAME")
            }
            CimInstanceKeys::Reference(r) => {
                open(w, el)?;
                r.encode(w)?;
                end(w, "INSTANCENAME")
            }
        }
    }
}

impl XmlEncode for CimObjectPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("OBJECTPATH"))?;
        match self {
            Self::Instance(p) => p.encode(w)?,
            Self::Class(p) => p.encode(w)?,
        }
        end(w, "OBJECTPATH")
    }
}

impl XmlEncode for CimQualifier {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("QUALIFIER");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        push_flag(&mut el, "PROPAGATED", self.propagated);
        push_opt(&mut el, "xml:lang", self.lang.as_deref());
        push_flavor(&mut el, &self.flavor);
        match &self.value {
            None => empty(w, el),
            Some(value) => {
                open(w, el)?;
                match value {
                    CimQualifierValue::Value(v) => v.encode(w)?,
                    CimQualifierValue::Array(a) => a.encode(w)?,
                }
                end(w, "QUALIFIER")
            }
        }
    }
}

impl XmlEncode for CimScope {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("SCOPE");
        push_flag(&mut el, "CLASS", self.class);
        push_flag(&mut el, "ASSOCIATION", self.association);
        push_flag(&mut el, "REFERENCE", self.reference);
        push_flag(&mut el, "PROPERTY", self.property);
        push_flag(&mut el, "METHOD", self.method);
        push_flag(&mut el, "PARAMETER", self.parameter);
        push_flag(&mut el, "INDICATION", self.indication);
        empty(w, el)
    }
}

impl XmlEncode for CimQualifierDeclaration {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("QUALIFIER.DECLARATION");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        push_flag(&mut el, "ISARRAY", self.is_array);
        if let Some(size) = self.array_size {
            el.push_attribute(("ARRAYSIZE", size.to_string().as_str()));
        }
        push_flavor(&mut el, &self.flavor);
        open(w, el)?;
        if let Some(scope) = &self.scope {
            scope.encode(w)?;
        }
        match &self.value {
            Some(CimQualifierValue::Value(v)) => v.encode(w)?,
            Some(CimQualifierValue::Array(a)) => a.encode(w)?,
            None => {}
        }
        end(w, "QUALIFIER.DECLARATION")
    }
}

impl XmlEncode for CimProperty {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PROPERTY");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        push_opt(&mut el, "CLASSORIGIN", self.class_origin.as_deref());
        push_flag(&mut el, "PROPAGATED", self.propagated);
        push_opt(&mut el, "EmbeddedObject", self.embedded_object.as_deref());
        push_opt(&mut el, "xml:lang", self.lang.as_deref());
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        if let Some(value) = &self.value {
            value.encode(w)?;
        }
        end(w, "PROPERTY")
    }
}

impl XmlEncode for CimPropertyArray {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PROPERTY.ARRAY");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        if let Some(size) = self.array_size {
            el.push_attribute(("ARRAYSIZE", size.to_string().as_str()));
        }
        push_opt(&mut el, "CLASSORIGIN", self.class_origin.as_deref());
        push_flag(&mut el, "PROPAGATED", self.propagated);
        push_opt(&mut el, "EmbeddedObject", self.embedded_object.as_deref());
        push_opt(&mut el, "xml:lang", self.lang.as_deref());
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        if let Some(values) = &self.value_array {
            values.encode(w)?;
        }
        end(w, "PROPERTY.ARRAY")
    }
}

impl XmlEncode for CimPropertyReference {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PROPERTY.REFERENCE");
        el.push_attribute(("NAME", self.name.as_str()));
        push_opt(&mut el, "REFERENCECLASS", self.reference_class.as_deref());
        push_opt(&mut el, "CLASSORIGIN", self.class_origin.as_deref());
        push_flag(&mut el, "PROPAGATED", self.propagated);
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        if let Some(reference) = &self.value_reference {
            reference.encode(w)?;
        }
        end(w, "PROPERTY.REFERENCE")
    }
}

impl XmlEncode for CimPropertyEntry {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        match self {
            Self::Scalar(p) => p.encode(w),
            Self::Array(p) => p.encode(w),
            Self::Reference(p) => p.encode(w),
        }
    }
}

impl XmlEncode for CimInstance {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("INSTANCE");
        el.push_attribute(("CLASSNAME", self.class_name.as_str()));
        push_opt(&mut el, "xml:lang", self.lang.as_deref());
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        for p in &self.properties {
            p.encode(w)?;
        }
        end(w, "INSTANCE")
    }
}

impl XmlEncode for CimParameter {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PARAMETER");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        end(w, "PARAMETER")
    }
}

impl XmlEncode for CimParameterReference {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PARAMETER.REFERENCE");
        el.push_attribute(("NAME", self.name.as_str()));
        push_opt(&mut el, "REFERENCECLASS", self.reference_class.as_deref());
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        end(w, "PARAMETER.REFERENCE")
    }
}

impl XmlEncode for CimParameterArray {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PARAMETER.ARRAY");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        if let Some(size) = self.array_size {
            el.push_attribute(("ARRAYSIZE", size.to_string().as_str()));
        }
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        end(w, "PARAMETER.ARRAY")
    }
}

impl XmlEncode for CimParameterRefArray {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PARAMETER.REFARRAY");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("REFERENCECLASS", self.reference_class.as_str()));
        if let Some(size) = self.array_size {
            el.push_attribute(("ARRAYSIZE", size.to_string().as_str()));
        }
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        end(w, "PARAMETER.REFARRAY")
    }
}

impl XmlEncode for CimParameterEntry {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        match self {
            Self::Scalar(p) => p.encode(w),
            Self::Reference(p) => p.encode(w),
            Self::Array(p) => p.encode(w),
            Self::RefArray(p) => p.encode(w),
        }
    }
}

impl XmlEncode for CimMethod {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("METHOD");
        el.push_attribute(("NAME", self.name.as_str()));
        push_opt(&mut el, "TYPE", self.cim_type.as_deref());
        push_opt(&mut el, "CLASSORIGIN", self.class_origin.as_deref());
        push_flag(&mut el, "PROPAGATED", self.propagated);
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        for p in &self.parameters {
            p.encode(w)?;
        }
        end(w, "METHOD")
    }
}

impl XmlEncode for CimClass {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("CLASS");
        el.push_attribute(("NAME", self.name.as_str()));
        push_opt(&mut el, "SUPERCLASS", self.super_class.as_deref());
        open(w, el)?;
        for q in &self.qualifiers {
            q.encode(w)?;
        }
        for p in &self.properties {
            p.encode(w)?;
        }
        for m in &self.methods {
            m.encode(w)?;
        }
        end(w, "CLASS")
    }
}

impl XmlEncode for CimCorrelator {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("CORRELATOR");
        el.push_attribute(("NAME", self.name.as_str()));
        el.push_attribute(("TYPE", self.cim_type.as_str()));
        open(w, el)?;
        self.value.encode(w)?;
        end(w, "CORRELATOR")
    }
}

impl XmlEncode for CimParamValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("PARAMVALUE");
        el.push_attribute(("NAME", self.name.as_str()));
        push_opt(&mut el, "PARAMTYPE", self.param_type.as_deref());
        push_opt(&mut el, "EmbeddedObject", self.embedded_object.as_deref());
        match &self.value {
            None => empty(w, el),
            Some(value) => {
                open(w, el)?;
                match value {
                    CimParamValueKind::Value(v) => v.encode(w)?,
                    CimParamValueKind::Reference(r) => r.encode(w)?,
                    CimParamValueKind::Array(a) => a.encode(w)?,
                    CimParamValueKind::RefArray(a) => a.encode(w)?,
                    CimParamValueKind::ClassName(n) => n.encode(w)?,
                    CimParamValueKind::InstanceName(n) => n.encode(w)?,
                    CimParamValueKind::Class(c) => c.encode(w)?,
                    CimParamValueKind::Instance(i) => i.encode(w)?,
                    CimParamValueKind::NamedInstance(n) => n.encode(w)?,
                }
                end(w, "PARAMVALUE")
            }
        }
    }
}

impl XmlEncode for CimIParamValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("IPARAMVALUE");
        el.push_attribute(("NAME", self.name.as_str()));
        match &self.value {
            None => empty(w, el),
            Some(value) => {
                open(w, el)?;
                match value {
                    CimIParamValueKind::Value(v) => v.encode(w)?,
                    CimIParamValueKind::Reference(r) => r.encode(w)?,
                    CimIParamValueKind::Array(a) => a.encode(w)?,
                    CimIParamValueKind::ClassName(n) => n.encode(w)?,
                    CimIParamValueKind::InstanceName(n) => n.encode(w)?,
                    CimIParamValueKind::QualifierDeclaration(q) => q.encode(w)?,
                    CimIParamValueKind::Class(c) => c.encode(w)?,
                    CimIParamValueKind::Instance(i) => i.encode(w)?,
                    CimIParamValueKind::NamedInstance(n) => n.encode(w)?,
                }
                end(w, "IPARAMVALUE")
            }
        }
    }
}

impl XmlEncode for CimReturnValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("RETURNVALUE");
        push_opt(&mut el, "PARAMTYPE", self.param_type.as_deref());
        push_opt(&mut el, "EmbeddedObject", self.embedded_object.as_deref());
        match &self.value {
            None => empty(w, el),
            Some(value) => {
                open(w, el)?;
                match value {
                    CimReturnValueKind::Value(v) => v.encode(w)?,
                    CimReturnValueKind::Reference(r) => r.encode(w)?,
                }
                end(w, "RETURNVALUE")
            }
        }
    }
}

impl XmlEncode for CimIReturnValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("IRETURNVALUE"))?;
        for n in &self.class_names {
            n.encode(w)?;
        }
        for n in &self.instance_names {
            n.encode(w)?;
        }
        for v in &self.values {
            v.encode(w)?;
        }
        for v in &self.value_object_with_paths {
            v.encode(w)?;
        }
        for v in &self.value_object_with_local_paths {
            v.encode(w)?;
        }
        for v in &self.value_objects {
            v.encode(w)?;
        }
        for p in &self.object_paths {
            p.encode(w)?;
        }
        for q in &self.qualifier_declarations {
            q.encode(w)?;
        }
        if let Some(a) = &self.value_array {
            a.encode(w)?;
        }
        if let Some(r) = &self.value_reference {
            r.encode(w)?;
        }
        for c in &self.classes {
            c.encode(w)?;
        }
        for i in &self.instances {
            i.encode(w)?;
        }
        for p in &self.instance_paths {
            p.encode(w)?;
        }
        for v in &self.value_named_instances {
            v.encode(w)?;
        }
        for v in &self.value_instance_with_paths {
            v.encode(w)?;
        }
        end(w, "IRETURNVALUE")
    }
}

impl XmlEncode for CimError {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("ERROR");
        el.push_attribute(("CODE", self.code.to_string().as_str()));
        if !self.description.is_empty() {
            el.push_attribute(("DESCRIPTION", self.description.as_str()));
        }
        if self.instances.is_empty() {
            empty(w, el)
        } else {
            open(w, el)?;
            for i in &self.instances {
                i.encode(w)?;
            }
            end(w, "ERROR")
        }
    }
}

impl XmlEncode for CimMethodCall {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("METHODCALL");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        match &self.path {
            CimCallPath::Class(p) => p.encode(w)?,
            CimCallPath::Instance(p) => p.encode(w)?,
        }
        for p in &self.param_values {
            p.encode(w)?;
        }
        end(w, "METHODCALL")
    }
}

impl XmlEncode for CimIMethodCall {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("IMETHODCALL");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        self.namespace_path.encode(w)?;
        for p in &self.param_values {
            p.encode(w)?;
        }
        end(w, "IMETHODCALL")
    }
}

impl XmlEncode for CimSimpleReq {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("SIMPLEREQ"))?;
        for c in &self.correlators {
            c.encode(w)?;
        }
        match &self.call {
            CimCall::Method(call) => call.encode(w)?,
            CimCall::IMethod(call) => call.encode(w)?,
        }
        end(w, "SIMPLEREQ")
    }
}

impl XmlEncode for CimMultiReq {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("MULTIREQ"))?;
        for r in &self.requests {
            r.encode(w)?;
        }
        end(w, "MULTIREQ")
    }
}

impl XmlEncode for CimMethodResponse {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("METHODRESPONSE");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        if let Some(error) = &self.error {
            error.encode(w)?;
        } else {
            if let Some(rv) = &self.return_value {
                rv.encode(w)?;
            }
            for p in &self.param_values {
                p.encode(w)?;
            }
        }
        end(w, "METHODRESPONSE")
    }
}

impl XmlEncode for CimIMethodResponse {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("IMETHODRESPONSE");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        if let Some(error) = &self.error {
            error.encode(w)?;
        } else {
            if let Some(rv) = &self.return_value {
                rv.encode(w)?;
            }
            for p in &self.param_values {
                p.encode(w)?;
            }
        }
        end(w, "IMETHODRESPONSE")
    }
}

impl XmlEncode for CimSimpleRsp {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("SIMPLERSP"))?;
        match &self.response {
            Some(CimRsp::Method(rsp)) => rsp.encode(w)?,
            Some(CimRsp::IMethod(rsp)) => rsp.encode(w)?,
            None => {}
        }
        end(w, "SIMPLERSP")
    }
}

impl XmlEncode for CimMultiRsp {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("MULTIRSP"))?;
        for r in &self.responses {
            r.encode(w)?;
        }
        end(w, "MULTIRSP")
    }
}

impl XmlEncode for CimExpParamValue {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("EXPPARAMVALUE");
        el.push_attribute(("NAME", self.name.as_str()));
        match &self.instance {
            None => empty(w, el),
            Some(instance) => {
                open(w, el)?;
                instance.encode(w)?;
                end(w, "EXPPARAMVALUE")
            }
        }
    }
}

impl XmlEncode for CimExpMethodCall {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("EXPMETHODCALL");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        for p in &self.param_values {
            p.encode(w)?;
        }
        end(w, "EXPMETHODCALL")
    }
}

impl XmlEncode for CimSimpleExpReq {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("SIMPLEEXPREQ"))?;
        for c in &self.correlators {
            c.encode(w)?;
        }
        self.call.encode(w)?;
        end(w, "SIMPLEEXPREQ")
    }
}

impl XmlEncode for CimMultiExpReq {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("MULTIEXPREQ"))?;
        for r in &self.requests {
            r.encode(w)?;
        }
        end(w, "MULTIEXPREQ")
    }
}

impl XmlEncode for CimExpMethodResponse {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("EXPMETHODRESPONSE");
        el.push_attribute(("NAME", self.name.as_str()));
        open(w, el)?;
        if let Some(error) = &self.error {
            error.encode(w)?;
        } else if let Some(rv) = &self.return_value {
            rv.encode(w)?;
        }
        end(w, "EXPMETHODRESPONSE")
    }
}

impl XmlEncode for CimSimpleExpRsp {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("SIMPLEEXPRSP"))?;
        self.response.encode(w)?;
        end(w, "SIMPLEEXPRSP")
    }
}

impl XmlEncode for CimMultiExpRsp {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("MULTIEXPRSP"))?;
        for r in &self.responses {
            r.encode(w)?;
        }
        end(w, "MULTIEXPRSP")
    }
}

impl XmlEncode for CimDeclGroup {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("DECLGROUP"))?;
        match &self.namespace_path {
            Some(CimDeclNamespacePath::Local(p)) => p.encode(w)?,
            Some(CimDeclNamespacePath::Absolute(p)) => p.encode(w)?,
            None => {}
        }
        for q in &self.qualifier_declarations {
            q.encode(w)?;
        }
        for v in &self.value_objects {
            v.encode(w)?;
        }
        end(w, "DECLGROUP")
    }
}

impl XmlEncode for CimDeclGroupWithName {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("DECLGROUP.WITHNAME"))?;
        match &self.namespace_path {
            Some(CimDeclNamespacePath::Local(p)) => p.encode(w)?,
            Some(CimDeclNamespacePath::Absolute(p)) => p.encode(w)?,
            None => {}
        }
        for q in &self.qualifier_declarations {
            q.encode(w)?;
        }
        for v in &self.value_named_objects {
            v.encode(w)?;
        }
        end(w, "DECLGROUP.WITHNAME")
    }
}

impl XmlEncode for CimDeclGroupWithPath {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("DECLGROUP.WITHPATH"))?;
        for value in &self.values {
            match value {
                CimDeclPathObject::WithPath(v) => v.encode(w)?,
                CimDeclPathObject::WithLocalPath(v) => v.encode(w)?,
            }
        }
        end(w, "DECLGROUP.WITHPATH")
    }
}

impl XmlEncode for CimDeclaration {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        open(w, start("DECLARATION"))?;
        for group in &self.groups {
            match group {
                CimDeclGroupKind::Plain(g) => g.encode(w)?,
                CimDeclGroupKind::WithName(g) => g.encode(w)?,
                CimDeclGroupKind::WithPath(g) => g.encode(w)?,
            }
        }
        end(w, "DECLARATION")
    }
}

impl XmlEncode for CimMessage {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("MESSAGE");
        el.push_attribute(("ID", self.id.as_str()));
        el.push_attribute(("PROTOCOLVERSION", self.protocol_version.as_str()));
        open(w, el)?;
        match &self.body {
            CimMessageBody::SimpleReq(b) => b.encode(w)?,
            CimMessageBody::MultiReq(b) => b.encode(w)?,
            CimMessageBody::SimpleRsp(b) => b.encode(w)?,
            CimMessageBody::MultiRsp(b) => b.encode(w)?,
            CimMessageBody::SimpleExpReq(b) => b.encode(w)?,
            CimMessageBody::MultiExpReq(b) => b.encode(w)?,
            CimMessageBody::SimpleExpRsp(b) => b.encode(w)?,
            CimMessageBody::MultiExpRsp(b) => b.encode(w)?,
        }
        end(w, "MESSAGE")
    }
}

impl XmlEncode for Cim {
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<(), XmlError> {
        let mut el = start("CIM");
        el.push_attribute(("CIMVERSION", self.cim_version.as_str()));
        el.push_attribute(("DTDVERSION", self.dtd_version.as_str()));
        open(w, el)?;
        if let Some(message) = &self.message {
            message.encode(w)?;
        }
        if let Some(declaration) = &self.declaration {
            declaration.encode(w)?;
        }
        end(w, "CIM")
    }
}
