// Copyright (c) 2025 - Cowboy AI, Inc.
//! Convenience constructors for extrinsic method-call parameters

use crate::model::message::{CimParamValue, CimParamValueKind};
use crate::model::naming::{
    CimClassName, CimInstanceName, CimLocalClassPath, CimLocalInstancePath, CimLocalNamespacePath,
};
use crate::model::values::{CimValue, CimValueReference};
use crate::path::{parse_instance_name, PathError};

/// A plain scalar parameter.
pub fn value(name: &str, value: &str) -> CimParamValue {
    CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Value(CimValue::new(value))),
        ..CimParamValue::default()
    }
}

/// A reference parameter naming a class.
pub fn class_name(name: &str, class: &str) -> CimParamValue {
    CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Reference(CimValueReference::ClassName(
            CimClassName::new(class),
        ))),
        ..CimParamValue::default()
    }
}

/// A reference parameter carrying a local class path.
pub fn local_class_path(name: &str, namespace: &str, class: &str) -> CimParamValue {
    CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Reference(
            CimValueReference::LocalClassPath(CimLocalClassPath {
                namespace_path: CimLocalNamespacePath::from_namespace(namespace),
                class_name: CimClassName::new(class),
            }),
        )),
        ..CimParamValue::default()
    }
}

/// A reference parameter carrying a local instance path, from a structured
/// instance name.
pub fn local_instance_path_for(
    name: &str,
    namespace: &str,
    instance_name: CimInstanceName,
) -> CimParamValue {
    CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Reference(
            CimValueReference::LocalInstancePath(CimLocalInstancePath::new(
                namespace,
                instance_name,
            )),
        )),
        ..CimParamValue::default()
    }
}

/// A reference parameter carrying a local instance path, from object-path
/// text such as `Class.Key="v"`.
pub fn local_instance_path(
    name: &str,
    namespace: &str,
    instance: &str,
) -> Result<CimParamValue, PathError> {
    let parsed = parse_instance_name(instance)?;
    Ok(local_instance_path_for(name, namespace, parsed))
}

/// A reference parameter carrying a bare instance name, from object-path
/// text.
pub fn instance_name(name: &str, instance: &str) -> Result<CimParamValue, PathError> {
    let parsed = parse_instance_name(instance)?;
    Ok(CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Reference(
            CimValueReference::InstanceName(parsed),
        )),
        ..CimParamValue::default()
    })
}

/// A reference parameter from an already-built reference value.
pub fn reference(name: &str, reference: CimValueReference) -> CimParamValue {
    CimParamValue {
        name: name.to_string(),
        value: Some(CimParamValueKind::Reference(reference)),
        ..CimParamValue::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_param_carries_text() {
        let p = value("Force", "true");
        assert_eq!(p.name, "Force");
        match p.value {
            Some(CimParamValueKind::Value(v)) => assert_eq!(v.value, "true"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn local_instance_path_parses_its_input() {
        let p = local_instance_path("Target", "root/cimv2", "CIM_Process.Handle=\"42\"").unwrap();
        match p.value {
            Some(CimParamValueKind::Reference(CimValueReference::LocalInstancePath(path))) => {
                assert_eq!(path.namespace_path.to_string(), "root/cimv2");
                assert_eq!(path.instance_name.class_name, "CIM_Process");
            }
            other => panic!("unexpected payload: {other:?}"),
        }

        assert!(local_instance_path("Target", "root/cimv2", "CIM_Process.Handle=").is_err());
    }

    #[test]
    fn class_name_param_is_a_reference() {
        let p = class_name("SystemClass", "CIM_ComputerSystem");
        assert!(matches!(
            p.value,
            Some(CimParamValueKind::Reference(CimValueReference::ClassName(_)))
        ));
    }
}
