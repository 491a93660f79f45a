// Copyright (c) 2025 - Cowboy AI, Inc.
//! The WBEM intrinsic operations, extrinsic method invocation and
//! best-effort namespace discovery
//!
//! Every operation follows the same shape: validate the required string
//! arguments (empty values fail with `CIM_ERR_INVALID_PARAMETER` before
//! anything touches the wire), build the ordered DSP0201 parameter list,
//! wrap it in a request envelope, round-trip it, and pull the typed result
//! out of the decoded response after the fault-evaluation chain has run.
//!
//! The fault chain is ordered: missing MESSAGE, missing SIMPLERSP, missing
//! operation response wrapper, an explicit ERROR element, a missing
//! IRETURNVALUE, then the operation-specific shape checks. An ERROR always
//! wins over a missing return value, which always wins over emptiness.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{ResponseEnvelope, WbemClient};
use crate::errors::{
    is_empty_results, is_err_not_supported, CimStatusCode, WbemError, WbemResult,
};
use crate::model::message::*;
use crate::model::naming::*;
use crate::model::object::{CimClass, CimInstance};
use crate::model::values::{
    CimValue, CimValueArray, CimValueObjectWithLocalPath, CimValueObjectWithPath, CimValueOrNull,
};

/// An instance paired with the name that identifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct CimNamedInstance {
    pub name: CimInstanceName,
    pub instance: CimInstance,
}

/// The result of a class-level enumeration: full class definitions plus
/// any bare class names the server chose to send instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassEnumeration {
    pub classes: Vec<CimClass>,
    pub class_names: Vec<String>,
}

/// The result of an extrinsic method invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodResult {
    pub return_value: Option<CimReturnValue>,
    pub out_params: Vec<CimParamValue>,
}

const DEFAULT_NAMESPACES: [&str; 5] = [
    "interop",
    "root/interop",
    "root/cimv2",
    "root/PG_InterOp",
    "root/PG_Internal",
];

const NAMESPACE_CLASSES: [&str; 3] = ["CIM_Namespace", "__Namespace", "PG_NameSpace"];

fn boolean_string(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn require_namespace(namespace: &str) -> WbemResult<()> {
    if namespace.is_empty() {
        return Err(WbemError::invalid_parameter("namespace name is empty"));
    }
    Ok(())
}

fn require_class(class_name: &str) -> WbemResult<()> {
    if class_name.is_empty() {
        return Err(WbemError::invalid_parameter("class name is empty"));
    }
    Ok(())
}

fn value_param(name: &str, value: &str) -> CimIParamValue {
    CimIParamValue {
        name: name.to_string(),
        value: Some(CimIParamValueKind::Value(CimValue::new(value))),
    }
}

fn bool_param(name: &str, value: bool) -> CimIParamValue {
    value_param(name, boolean_string(value))
}

fn class_name_param(name: &str, class_name: &str) -> CimIParamValue {
    CimIParamValue {
        name: name.to_string(),
        value: Some(CimIParamValueKind::ClassName(CimClassName::new(class_name))),
    }
}

fn instance_name_param(name: &str, instance_name: CimInstanceName) -> CimIParamValue {
    CimIParamValue {
        name: name.to_string(),
        value: Some(CimIParamValueKind::InstanceName(instance_name)),
    }
}

fn property_list_param(property_list: &[String]) -> CimIParamValue {
    CimIParamValue {
        name: "PropertyList".to_string(),
        value: Some(CimIParamValueKind::Array(CimValueArray {
            values: property_list
                .iter()
                .map(|p| CimValueOrNull::Value(CimValue::new(p.clone())))
                .collect(),
        })),
    }
}

// The shared prefix of every intrinsic fault chain: steps (1) through (4).
fn imethod_response_checked(cim: &Cim) -> WbemResult<&CimIMethodResponse> {
    let message = cim.message.as_ref().ok_or(WbemError::MessageMissing)?;
    let simple_rsp = match &message.body {
        CimMessageBody::SimpleRsp(rsp) => rsp,
        _ => return Err(WbemError::SimpleRspMissing),
    };
    let response = match simple_rsp.response.as_ref() {
        Some(CimRsp::IMethod(response)) => response,
        _ => return Err(WbemError::IMethodResponseMissing),
    };
    if let Some(error) = &response.error {
        return Err(WbemError::cim(
            CimStatusCode(error.code),
            error.description.clone(),
        ));
    }
    Ok(response)
}

// Step (5): the return-value wrapper must be present.
fn ireturn_value_checked(cim: &Cim) -> WbemResult<&CimIReturnValue> {
    imethod_response_checked(cim)?
        .return_value
        .as_ref()
        .ok_or(WbemError::IReturnValueMissing)
}

fn check_ireturn_value(cim: &Cim) -> WbemResult<()> {
    ireturn_value_checked(cim).map(|_| ())
}

fn check_class_names(cim: &Cim) -> WbemResult<()> {
    if ireturn_value_checked(cim)?.class_names.is_empty() {
        return Err(WbemError::ClassNamesMissing);
    }
    Ok(())
}

fn check_instance_names(cim: &Cim) -> WbemResult<()> {
    if ireturn_value_checked(cim)?.instance_names.is_empty() {
        return Err(WbemError::InstanceNamesMissing);
    }
    Ok(())
}

fn check_named_instances(cim: &Cim) -> WbemResult<()> {
    if ireturn_value_checked(cim)?.value_named_instances.is_empty() {
        return Err(WbemError::NamedInstancesMissing);
    }
    Ok(())
}

// GetInstance is fully keyed: more than one INSTANCE is a server defect,
// zero is the empty-result sentinel.
fn check_single_instance(cim: &Cim) -> WbemResult<()> {
    match ireturn_value_checked(cim)?.instances.len() {
        0 => Err(WbemError::InstancesMissing),
        1 => Ok(()),
        _ => Err(WbemError::AmbiguousInstances),
    }
}

fn check_single_class(cim: &Cim) -> WbemResult<()> {
    match ireturn_value_checked(cim)?.classes.len() {
        0 => Err(WbemError::ClassesMissing),
        1 => Ok(()),
        _ => Err(WbemError::AmbiguousClasses),
    }
}

// The extrinsic chain mirrors the intrinsic one through METHODRESPONSE.
fn check_method_return_value(cim: &Cim) -> WbemResult<()> {
    let message = cim.message.as_ref().ok_or(WbemError::MessageMissing)?;
    let simple_rsp = match &message.body {
        CimMessageBody::SimpleRsp(rsp) => rsp,
        _ => return Err(WbemError::SimpleRspMissing),
    };
    let response = match simple_rsp.response.as_ref() {
        Some(CimRsp::Method(response)) => response,
        _ => return Err(WbemError::MethodResponseMissing),
    };
    if let Some(error) = &response.error {
        return Err(WbemError::cim(
            CimStatusCode(error.code),
            error.description.clone(),
        ));
    }
    if response.return_value.is_none() {
        return Err(WbemError::ReturnValueMissing);
    }
    Ok(())
}

impl WbemClient {
    fn intrinsic_request(
        &self,
        operation: &str,
        namespace: &str,
        param_values: Vec<CimIParamValue>,
    ) -> Cim {
        Cim {
            cim_version: self.config().cim_version.clone(),
            dtd_version: self.config().dtd_version.clone(),
            message: Some(CimMessage {
                id: self.next_message_id(),
                protocol_version: self.config().protocol_version.clone(),
                body: CimMessageBody::SimpleReq(CimSimpleReq {
                    correlators: Vec::new(),
                    call: CimCall::IMethod(CimIMethodCall {
                        name: operation.to_string(),
                        namespace_path: CimLocalNamespacePath::from_namespace(namespace),
                        param_values,
                    }),
                }),
            }),
            declaration: None,
        }
    }

    async fn intrinsic_call(
        &mut self,
        operation: &'static str,
        namespace: &str,
        param_values: Vec<CimIParamValue>,
        check: crate::client::FaultCheck,
    ) -> WbemResult<CimIReturnValue> {
        let request = self.intrinsic_request(operation, namespace, param_values);
        let mut response = ResponseEnvelope::new(check);
        self.round_trip(operation, namespace, &request, &mut response)
            .await?;
        response
            .cim
            .into_ireturn_value()
            .ok_or(WbemError::IReturnValueMissing)
    }

    /// Enumerate the names of classes in `namespace`, optionally rooted at
    /// `class_name`, optionally descending the class hierarchy.
    pub async fn enumerate_class_names(
        &mut self,
        namespace: &str,
        class_name: Option<&str>,
        deep: bool,
    ) -> WbemResult<Vec<String>> {
        require_namespace(namespace)?;

        let mut param_values = Vec::new();
        if deep {
            param_values.push(value_param("DeepInheritance", "true"));
        }
        if let Some(class_name) = class_name.filter(|c| !c.is_empty()) {
            param_values.push(class_name_param("ClassName", class_name));
        }

        let rv = self
            .intrinsic_call(
                "EnumerateClassNames",
                namespace,
                param_values,
                check_class_names,
            )
            .await?;
        Ok(rv.class_names.into_iter().map(|n| n.name).collect())
    }

    /// Enumerate the instance names of `class_name` in `namespace`.
    pub async fn enumerate_instance_names(
        &mut self,
        namespace: &str,
        class_name: &str,
    ) -> WbemResult<Vec<CimInstanceName>> {
        require_namespace(namespace)?;
        require_class(class_name)?;

        let param_values = vec![class_name_param("ClassName", class_name)];
        let rv = self
            .intrinsic_call(
                "EnumerateInstanceNames",
                namespace,
                param_values,
                check_instance_names,
            )
            .await?;
        Ok(rv.instance_names)
    }

    /// Fetch one instance by class name and key bindings. A single binding
    /// named `_` stands for the anonymous single-key form.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_instance(
        &mut self,
        namespace: &str,
        class_name: &str,
        mut key_bindings: Vec<CimKeyBinding>,
        local_only: bool,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<CimInstance> {
        if key_bindings.is_empty() {
            return Err(WbemError::invalid_parameter("key bindings are empty"));
        }
        let keys = if key_bindings.len() == 1 && key_bindings[0].name == "_" {
            match key_bindings.remove(0).value {
                CimKeyBindingValue::Value(kv) => CimInstanceKeys::Value(kv),
                CimKeyBindingValue::Reference(r) => CimInstanceKeys::Reference(Box::new(r)),
            }
        } else {
            CimInstanceKeys::Bindings(key_bindings)
        };
        let instance_name = CimInstanceName {
            class_name: class_name.to_string(),
            keys,
        };
        self.get_instance_by_name(
            namespace,
            &instance_name,
            local_only,
            include_qualifiers,
            include_class_origin,
            property_list,
        )
        .await
    }

    /// Fetch one instance by its structured instance name.
    pub async fn get_instance_by_name(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        local_only: bool,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<CimInstance> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;

        let mut param_values = vec![
            instance_name_param("InstanceName", instance_name.clone()),
            bool_param("LocalOnly", local_only),
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("GetInstance", namespace, param_values, check_single_instance)
            .await?;
        rv.instances
            .into_iter()
            .next()
            .ok_or(WbemError::InstancesMissing)
    }

    /// Enumerate the instances of `class_name` in `namespace`, names
    /// included.
    #[allow(clippy::too_many_arguments)]
    pub async fn enumerate_instances(
        &mut self,
        namespace: &str,
        class_name: &str,
        deep_inheritance: bool,
        local_only: bool,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<Vec<CimNamedInstance>> {
        require_namespace(namespace)?;
        require_class(class_name)?;

        let mut param_values = vec![
            class_name_param("ClassName", class_name),
            bool_param("LocalOnly", local_only),
            bool_param("DeepInheritance", deep_inheritance),
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call(
                "EnumerateInstances",
                namespace,
                param_values,
                check_named_instances,
            )
            .await?;
        Ok(rv
            .value_named_instances
            .into_iter()
            .map(|v| CimNamedInstance {
                name: v.instance_name,
                instance: v.instance,
            })
            .collect())
    }

    /// Fetch one class definition.
    pub async fn get_class(
        &mut self,
        namespace: &str,
        class_name: &str,
        local_only: bool,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<CimClass> {
        require_namespace(namespace)?;
        require_class(class_name)?;

        let mut param_values = vec![
            class_name_param("ClassName", class_name),
            bool_param("LocalOnly", local_only),
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("GetClass", namespace, param_values, check_single_class)
            .await?;
        rv.classes
            .into_iter()
            .next()
            .ok_or(WbemError::ClassesMissing)
    }

    /// Enumerate class definitions in `namespace`, optionally rooted at
    /// `class_name`.
    pub async fn enumerate_classes(
        &mut self,
        namespace: &str,
        class_name: Option<&str>,
        deep_inheritance: bool,
        local_only: bool,
        include_qualifiers: bool,
        include_class_origin: bool,
    ) -> WbemResult<ClassEnumeration> {
        require_namespace(namespace)?;

        let mut param_values = vec![
            bool_param("LocalOnly", local_only),
            bool_param("DeepInheritance", deep_inheritance),
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if let Some(class_name) = class_name.filter(|c| !c.is_empty()) {
            param_values.push(class_name_param("ClassName", class_name));
        }

        let rv = self
            .intrinsic_call(
                "EnumerateClasses",
                namespace,
                param_values,
                check_ireturn_value,
            )
            .await?;
        Ok(ClassEnumeration {
            classes: rv.classes,
            class_names: rv.class_names.into_iter().map(|n| n.name).collect(),
        })
    }

    /// Names of the instances associated with `instance_name`.
    pub async fn associator_names(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        assoc_class: Option<&str>,
        result_class: Option<&str>,
        role: Option<&str>,
        result_role: Option<&str>,
    ) -> WbemResult<Vec<CimInstanceName>> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;

        let mut param_values = vec![instance_name_param("ObjectName", instance_name.clone())];
        push_assoc_filters(
            &mut param_values,
            assoc_class,
            result_class,
            role,
            result_role,
        );

        let rv = self
            .intrinsic_call(
                "AssociatorNames",
                namespace,
                param_values,
                check_ireturn_value,
            )
            .await?;
        Ok(instance_names_of(rv.object_paths))
    }

    /// Instances associated with `instance_name`, with their names.
    #[allow(clippy::too_many_arguments)]
    pub async fn associator_instances(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        assoc_class: Option<&str>,
        result_class: Option<&str>,
        role: Option<&str>,
        result_role: Option<&str>,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<Vec<CimNamedInstance>> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;

        let mut param_values = vec![
            instance_name_param("ObjectName", instance_name.clone()),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        push_assoc_filters(
            &mut param_values,
            assoc_class,
            result_class,
            role,
            result_role,
        );
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("Associators", namespace, param_values, check_ireturn_value)
            .await?;
        Ok(named_instances_of(
            rv.value_object_with_paths,
            rv.value_object_with_local_paths,
        ))
    }

    /// Classes associated with `class_name`.
    #[allow(clippy::too_many_arguments)]
    pub async fn associator_classes(
        &mut self,
        namespace: &str,
        class_name: &str,
        assoc_class: Option<&str>,
        result_class: Option<&str>,
        role: Option<&str>,
        result_role: Option<&str>,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<ClassEnumeration> {
        require_namespace(namespace)?;
        require_class(class_name)?;

        let mut param_values = vec![
            instance_name_param("ObjectName", CimInstanceName::class_only(class_name)),
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        push_assoc_filters(
            &mut param_values,
            assoc_class,
            result_class,
            role,
            result_role,
        );
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("Associators", namespace, param_values, check_ireturn_value)
            .await?;
        Ok(class_enumeration_of(rv))
    }

    /// Names of the association instances referencing `instance_name`.
    pub async fn reference_names(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        result_class: Option<&str>,
        role: Option<&str>,
    ) -> WbemResult<Vec<CimInstanceName>> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;
        if !instance_name.has_keys() {
            return Err(WbemError::invalid_parameter("key bindings are empty"));
        }

        let mut param_values = vec![instance_name_param("ObjectName", instance_name.clone())];
        if let Some(result_class) = result_class.filter(|c| !c.is_empty()) {
            param_values.push(class_name_param("ResultClass", result_class));
        }
        if let Some(role) = role.filter(|r| !r.is_empty()) {
            param_values.push(value_param("Role", role));
        }

        let rv = self
            .intrinsic_call(
                "ReferenceNames",
                namespace,
                param_values,
                check_ireturn_value,
            )
            .await?;
        Ok(instance_names_of(rv.object_paths))
    }

    /// Association instances referencing `instance_name`.
    #[allow(clippy::too_many_arguments)]
    pub async fn reference_instances(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        result_class: Option<&str>,
        role: Option<&str>,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<Vec<CimInstance>> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;

        let mut param_values = vec![
            instance_name_param("ObjectName", instance_name.clone()),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if let Some(result_class) = result_class.filter(|c| !c.is_empty()) {
            param_values.push(class_name_param("ResultClass", result_class));
        }
        if let Some(role) = role.filter(|r| !r.is_empty()) {
            param_values.push(value_param("Role", role));
        }
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("References", namespace, param_values, check_ireturn_value)
            .await?;
        let mut results = Vec::new();
        for entry in rv.value_object_with_paths {
            if let CimValueObjectWithPath::Instance { instance, .. } = entry {
                results.push(instance);
            }
        }
        if results.is_empty() {
            for entry in rv.value_object_with_local_paths {
                if let CimValueObjectWithLocalPath::Instance { instance, .. } = entry {
                    results.push(instance);
                }
            }
        }
        Ok(results)
    }

    /// Association classes referencing `class_name`.
    #[allow(clippy::too_many_arguments)]
    pub async fn reference_classes(
        &mut self,
        namespace: &str,
        class_name: &str,
        result_class: Option<&str>,
        role: Option<&str>,
        include_qualifiers: bool,
        include_class_origin: bool,
        property_list: &[String],
    ) -> WbemResult<ClassEnumeration> {
        require_namespace(namespace)?;
        require_class(class_name)?;

        let mut param_values = vec![
            CimIParamValue {
                name: "ObjectName".to_string(),
                value: Some(CimIParamValueKind::ClassName(CimClassName::new(class_name))),
            },
            bool_param("IncludeQualifiers", include_qualifiers),
            bool_param("IncludeClassOrigin", include_class_origin),
        ];
        if let Some(result_class) = result_class.filter(|c| !c.is_empty()) {
            param_values.push(class_name_param("ResultClass", result_class));
        }
        if let Some(role) = role.filter(|r| !r.is_empty()) {
            param_values.push(value_param("Role", role));
        }
        if !property_list.is_empty() {
            param_values.push(property_list_param(property_list));
        }

        let rv = self
            .intrinsic_call("References", namespace, param_values, check_ireturn_value)
            .await?;
        Ok(class_enumeration_of(rv))
    }

    /// Invoke an extrinsic (class-defined) method on an instance.
    pub async fn invoke_method(
        &mut self,
        namespace: &str,
        instance_name: &CimInstanceName,
        method_name: &str,
        in_params: Vec<CimParamValue>,
    ) -> WbemResult<MethodResult> {
        require_namespace(namespace)?;
        require_class(&instance_name.class_name)?;

        let local_instance_path = CimLocalInstancePath::new(namespace, instance_name.clone());
        let cim_object = local_instance_path.to_string();

        let request = Cim {
            cim_version: self.config().cim_version.clone(),
            dtd_version: self.config().dtd_version.clone(),
            message: Some(CimMessage {
                id: self.next_message_id(),
                protocol_version: self.config().protocol_version.clone(),
                body: CimMessageBody::SimpleReq(CimSimpleReq {
                    correlators: Vec::new(),
                    call: CimCall::Method(CimMethodCall {
                        name: method_name.to_string(),
                        path: CimCallPath::Instance(local_instance_path),
                        param_values: in_params,
                    }),
                }),
            }),
            declaration: None,
        };

        let mut response = ResponseEnvelope::new(check_method_return_value);
        self.round_trip(method_name, &cim_object, &request, &mut response)
            .await?;

        let response = response
            .cim
            .into_method_response()
            .ok_or(WbemError::MethodResponseMissing)?;
        Ok(MethodResult {
            return_value: response.return_value,
            out_params: response.param_values,
        })
    }

    /// Best-effort namespace discovery.
    ///
    /// Probes a fixed set of well-known namespaces (plus `candidates`)
    /// against the well-known namespace-enumeration classes, falling back
    /// to `PG_ProviderCapabilities` when that yields nothing. Individual
    /// probe failures are accumulated and logged, never raised; the call
    /// itself always succeeds.
    pub async fn enumerate_namespaces(
        &mut self,
        candidates: &[String],
        per_probe_timeout: Duration,
        progress: Option<&dyn Fn(usize, usize)>,
    ) -> WbemResult<Vec<String>> {
        let timeout = if per_probe_timeout.is_zero() {
            Duration::from_secs(10)
        } else {
            per_probe_timeout
        };

        let mut probes: Vec<String> = candidates.to_vec();
        probes.extend(DEFAULT_NAMESPACES.iter().map(|s| s.to_string()));

        let total = probes.len() * 3 + 4;
        let mut errors: Vec<WbemError> = Vec::new();
        let mut namespaces: BTreeSet<String> = BTreeSet::new();

        for (idx, ns) in probes.iter().enumerate() {
            for class_name in NAMESPACE_CLASSES {
                debug!("probing {}:{} for namespaces", ns, class_name);
                let probe = tokio::time::timeout(
                    timeout,
                    self.enumerate_instances(ns, class_name, true, false, true, true, &[]),
                )
                .await;
                match probe {
                    Err(_) => errors.push(WbemError::Timeout(format!("{ns}:{class_name}"))),
                    Ok(Err(err)) => {
                        if !is_err_not_supported(&err) && !is_empty_results(&err) {
                            errors.push(err);
                        }
                    }
                    Ok(Ok(instances)) => {
                        for named in instances {
                            let name = named
                                .instance
                                .get_property_by_name("Name")
                                .and_then(|p| p.string_value());
                            if let Some(name) = name.filter(|n| !n.is_empty()) {
                                namespaces.insert(name.to_string());
                            }
                        }
                    }
                }
            }
            if let Some(cb) = progress {
                cb(total, (idx + 1) * 3);
            }
        }

        if namespaces.is_empty() {
            let fallback = ["interop", "root/interop", "root/PG_InterOp", "root/PG_Internal"];
            for (idx, ns) in fallback.iter().enumerate() {
                let probe = tokio::time::timeout(
                    timeout,
                    self.enumerate_instance_names(ns, "PG_ProviderCapabilities"),
                )
                .await;
                let names = match probe {
                    Err(_) => {
                        errors.push(WbemError::Timeout(format!("{ns}:PG_ProviderCapabilities")));
                        continue;
                    }
                    Ok(Err(err)) => {
                        if !is_err_not_supported(&err) && !is_empty_results(&err) {
                            errors.push(err);
                        }
                        continue;
                    }
                    Ok(Ok(names)) => names,
                };
                let Some(first) = names.into_iter().next() else {
                    continue;
                };

                let instance = match tokio::time::timeout(
                    Duration::from_secs(2),
                    self.get_instance_by_name(ns, &first, false, false, false, &[]),
                )
                .await
                {
                    Err(_) => {
                        errors.push(WbemError::Timeout(format!("{ns}:{first}")));
                        continue;
                    }
                    Ok(Err(err)) => {
                        if !is_err_not_supported(&err) {
                            errors.push(err);
                        }
                        continue;
                    }
                    Ok(Ok(instance)) => instance,
                };

                let names = instance
                    .get_property_by_name("Namespaces")
                    .and_then(|p| p.string_values());
                if let Some(names) = names {
                    for name in names {
                        if !name.is_empty() {
                            namespaces.insert(name.to_string());
                        }
                    }
                }

                if let Some(cb) = progress {
                    cb(total, probes.len() * 3 + idx);
                }
            }
        }

        let non_default = namespaces
            .iter()
            .filter(|ns| !DEFAULT_NAMESPACES.contains(&ns.as_str()))
            .count();
        if non_default == 0 {
            if errors.is_empty() {
                warn!(
                    "namespace discovery on {} found nothing beyond the defaults",
                    self.config().base_url
                );
            } else {
                let summary = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("\r\n\t");
                warn!(
                    "namespace discovery on {} was unsuccessful:\r\n\t{}",
                    self.config().base_url,
                    summary
                );
            }
        }

        if let Some(cb) = progress {
            cb(total, total);
        }

        Ok(namespaces.into_iter().collect())
    }
}

fn push_assoc_filters(
    param_values: &mut Vec<CimIParamValue>,
    assoc_class: Option<&str>,
    result_class: Option<&str>,
    role: Option<&str>,
    result_role: Option<&str>,
) {
    if let Some(assoc_class) = assoc_class.filter(|c| !c.is_empty()) {
        param_values.push(class_name_param("AssocClass", assoc_class));
    }
    if let Some(result_class) = result_class.filter(|c| !c.is_empty()) {
        param_values.push(class_name_param("ResultClass", result_class));
    }
    if let Some(role) = role.filter(|r| !r.is_empty()) {
        param_values.push(value_param("Role", role));
    }
    if let Some(result_role) = result_role.filter(|r| !r.is_empty()) {
        param_values.push(value_param("ResultRole", result_role));
    }
}

fn instance_names_of(object_paths: Vec<CimObjectPath>) -> Vec<CimInstanceName> {
    object_paths
        .into_iter()
        .filter_map(|path| match path {
            CimObjectPath::Instance(p) => Some(p.instance_name),
            CimObjectPath::Class(_) => None,
        })
        .collect()
}

fn named_instances_of(
    with_paths: Vec<CimValueObjectWithPath>,
    with_local_paths: Vec<CimValueObjectWithLocalPath>,
) -> Vec<CimNamedInstance> {
    let mut results = Vec::new();
    for entry in with_paths {
        if let CimValueObjectWithPath::Instance { path, instance } = entry {
            results.push(CimNamedInstance {
                name: path.instance_name,
                instance,
            });
        }
    }
    for entry in with_local_paths {
        if let CimValueObjectWithLocalPath::Instance { path, instance } = entry {
            results.push(CimNamedInstance {
                name: path.instance_name,
                instance,
            });
        }
    }
    results
}

fn class_enumeration_of(rv: CimIReturnValue) -> ClassEnumeration {
    let mut enumeration = ClassEnumeration {
        classes: rv.classes,
        class_names: rv.class_names.into_iter().map(|n| n.name).collect(),
    };
    for entry in rv.value_object_with_paths {
        if let CimValueObjectWithPath::Class { class, .. } = entry {
            enumeration.classes.push(class);
        }
    }
    for entry in rv.value_object_with_local_paths {
        if let CimValueObjectWithLocalPath::Class { class, .. } = entry {
            enumeration.classes.push(class);
        }
    }
    enumeration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::WbemConfig;
    use crate::model::values::CimValueNamedInstance;
    use pretty_assertions::assert_eq;

    fn response_envelope(response: CimIMethodResponse) -> Cim {
        Cim {
            cim_version: "2.0".into(),
            dtd_version: "2.0".into(),
            message: Some(CimMessage {
                id: "1-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                    response: Some(CimRsp::IMethod(response)),
                }),
            }),
            declaration: None,
        }
    }

    fn instance(class_name: &str) -> CimInstance {
        CimInstance {
            class_name: class_name.into(),
            ..CimInstance::default()
        }
    }

    #[test]
    fn fault_chain_reports_structural_gaps_in_order() {
        let no_message = Cim::default();
        assert!(matches!(
            check_single_instance(&no_message),
            Err(WbemError::MessageMissing)
        ));

        let wrong_body = Cim {
            message: Some(CimMessage {
                id: "1-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleReq(CimSimpleReq {
                    correlators: Vec::new(),
                    call: CimCall::IMethod(CimIMethodCall::default()),
                }),
            }),
            ..Cim::default()
        };
        assert!(matches!(
            check_single_instance(&wrong_body),
            Err(WbemError::SimpleRspMissing)
        ));

        let empty_rsp = Cim {
            message: Some(CimMessage {
                id: "1-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp::default()),
            }),
            ..Cim::default()
        };
        assert!(matches!(
            check_single_instance(&empty_rsp),
            Err(WbemError::IMethodResponseMissing)
        ));

        let no_return_value = response_envelope(CimIMethodResponse {
            name: "GetInstance".into(),
            ..CimIMethodResponse::default()
        });
        assert!(matches!(
            check_single_instance(&no_return_value),
            Err(WbemError::IReturnValueMissing)
        ));
    }

    #[test]
    fn error_element_takes_precedence_over_missing_return_value() {
        // Both an ERROR and no IRETURNVALUE: the ERROR must win.
        let cim = response_envelope(CimIMethodResponse {
            name: "GetInstance".into(),
            error: Some(CimError {
                code: 6,
                description: "not found".into(),
                instances: Vec::new(),
            }),
            return_value: None,
            ..CimIMethodResponse::default()
        });
        match check_single_instance(&cim) {
            Err(WbemError::Cim { code, message }) => {
                assert_eq!(code, CimStatusCode::NOT_FOUND);
                assert_eq!(message, "not found");
            }
            other => panic!("expected a protocol fault, got {other:?}"),
        }
        let err = check_single_instance(&cim).unwrap_err();
        assert!(!is_empty_results(&err));
    }

    #[test]
    fn get_instance_cardinality() {
        let empty = response_envelope(CimIMethodResponse {
            name: "GetInstance".into(),
            return_value: Some(CimIReturnValue::default()),
            ..CimIMethodResponse::default()
        });
        let err = check_single_instance(&empty).unwrap_err();
        assert!(matches!(err, WbemError::InstancesMissing));
        assert!(is_empty_results(&err));

        let single = response_envelope(CimIMethodResponse {
            name: "GetInstance".into(),
            return_value: Some(CimIReturnValue {
                instances: vec![instance("CIM_Process")],
                ..CimIReturnValue::default()
            }),
            ..CimIMethodResponse::default()
        });
        assert!(check_single_instance(&single).is_ok());

        let ambiguous = response_envelope(CimIMethodResponse {
            name: "GetInstance".into(),
            return_value: Some(CimIReturnValue {
                instances: vec![instance("CIM_Process"), instance("CIM_Process")],
                ..CimIReturnValue::default()
            }),
            ..CimIMethodResponse::default()
        });
        let err = check_single_instance(&ambiguous).unwrap_err();
        assert!(matches!(err, WbemError::AmbiguousInstances));
        assert!(!is_empty_results(&err));
    }

    #[test]
    fn shape_checks_match_their_operations() {
        let empty_rv = response_envelope(CimIMethodResponse {
            name: "op".into(),
            return_value: Some(CimIReturnValue::default()),
            ..CimIMethodResponse::default()
        });
        assert!(check_ireturn_value(&empty_rv).is_ok());
        assert!(matches!(
            check_class_names(&empty_rv),
            Err(WbemError::ClassNamesMissing)
        ));
        let err = check_instance_names(&empty_rv).unwrap_err();
        assert!(is_empty_results(&err));
        let err = check_named_instances(&empty_rv).unwrap_err();
        assert!(is_empty_results(&err));
        assert!(matches!(
            check_single_class(&empty_rv),
            Err(WbemError::ClassesMissing)
        ));

        let named = response_envelope(CimIMethodResponse {
            name: "EnumerateInstances".into(),
            return_value: Some(CimIReturnValue {
                value_named_instances: vec![CimValueNamedInstance {
                    instance_name: CimInstanceName::class_only("CIM_Process"),
                    instance: instance("CIM_Process"),
                }],
                ..CimIReturnValue::default()
            }),
            ..CimIMethodResponse::default()
        });
        assert!(check_named_instances(&named).is_ok());
    }

    #[test]
    fn extrinsic_fault_chain_requires_method_response() {
        let intrinsic = response_envelope(CimIMethodResponse {
            name: "op".into(),
            return_value: Some(CimIReturnValue::default()),
            ..CimIMethodResponse::default()
        });
        assert!(matches!(
            check_method_return_value(&intrinsic),
            Err(WbemError::MethodResponseMissing)
        ));

        let extrinsic = Cim {
            message: Some(CimMessage {
                id: "1-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                    response: Some(CimRsp::Method(CimMethodResponse {
                        name: "Reboot".into(),
                        return_value: Some(CimReturnValue::default()),
                        ..CimMethodResponse::default()
                    })),
                }),
            }),
            ..Cim::default()
        };
        assert!(check_method_return_value(&extrinsic).is_ok());

        let missing_rv = Cim {
            message: Some(CimMessage {
                id: "1-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                    response: Some(CimRsp::Method(CimMethodResponse {
                        name: "Reboot".into(),
                        ..CimMethodResponse::default()
                    })),
                }),
            }),
            ..Cim::default()
        };
        assert!(matches!(
            check_method_return_value(&missing_rv),
            Err(WbemError::ReturnValueMissing)
        ));
    }

    #[test]
    fn validation_rejects_empty_arguments_before_the_wire() {
        let mut client = WbemClient::new(WbemConfig {
            base_url: "http://127.0.0.1:1/cimom".into(),
            ..WbemConfig::default()
        })
        .unwrap();

        let err =
            tokio_test::block_on(client.enumerate_class_names("", None, true)).unwrap_err();
        assert!(matches!(
            err,
            WbemError::Cim { code, .. } if code == CimStatusCode::INVALID_PARAMETER
        ));

        let err = tokio_test::block_on(client.enumerate_instance_names("root/cimv2", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            WbemError::Cim { code, .. } if code == CimStatusCode::INVALID_PARAMETER
        ));

        let err = tokio_test::block_on(client.get_instance(
            "root/cimv2",
            "CIM_Process",
            Vec::new(),
            false,
            false,
            false,
            &[],
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            WbemError::Cim { code, .. } if code == CimStatusCode::INVALID_PARAMETER
        ));

        let keyless = CimInstanceName::class_only("CIM_Process");
        let err = tokio_test::block_on(client.reference_names("root/cimv2", &keyless, None, None))
            .unwrap_err();
        assert!(matches!(
            err,
            WbemError::Cim { code, .. } if code == CimStatusCode::INVALID_PARAMETER
        ));
    }

    #[test]
    fn request_parameters_follow_the_operation_order() {
        let client = WbemClient::new(WbemConfig::default()).unwrap();
        let request = client.intrinsic_request(
            "EnumerateInstances",
            "root/cimv2",
            vec![
                class_name_param("ClassName", "CIM_Process"),
                bool_param("LocalOnly", false),
                bool_param("DeepInheritance", true),
                bool_param("IncludeQualifiers", false),
                bool_param("IncludeClassOrigin", true),
                property_list_param(&["Handle".to_string()]),
            ],
        );

        let message = request.message.expect("message");
        assert_eq!(message.protocol_version, "1.0");
        let call = match message.body {
            CimMessageBody::SimpleReq(CimSimpleReq {
                call: CimCall::IMethod(call),
                ..
            }) => call,
            other => panic!("unexpected body: {other:?}"),
        };
        assert_eq!(call.name, "EnumerateInstances");
        assert_eq!(call.namespace_path.to_string(), "root/cimv2");
        let names: Vec<&str> = call.param_values.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ClassName",
                "LocalOnly",
                "DeepInheritance",
                "IncludeQualifiers",
                "IncludeClassOrigin",
                "PropertyList"
            ]
        );
        match &call.param_values[1].value {
            Some(CimIParamValueKind::Value(v)) => assert_eq!(v.value, "false"),
            other => panic!("unexpected LocalOnly payload: {other:?}"),
        }
    }

    #[test]
    fn result_extraction_helpers() {
        let named = named_instances_of(
            vec![CimValueObjectWithPath::Instance {
                path: crate::model::naming::CimInstancePath {
                    instance_name: CimInstanceName::class_only("CIM_Process"),
                    ..Default::default()
                },
                instance: instance("CIM_Process"),
            }],
            Vec::new(),
        );
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name.class_name, "CIM_Process");

        let rv = CimIReturnValue {
            classes: vec![CimClass {
                name: "Test_A".into(),
                ..CimClass::default()
            }],
            class_names: vec![CimClassName::new("Test_B")],
            value_object_with_paths: vec![CimValueObjectWithPath::Class {
                path: Default::default(),
                class: CimClass {
                    name: "Test_C".into(),
                    ..CimClass::default()
                },
            }],
            ..CimIReturnValue::default()
        };
        let enumeration = class_enumeration_of(rv);
        let names: Vec<&str> = enumeration.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Test_A", "Test_C"]);
        assert_eq!(enumeration.class_names, vec!["Test_B"]);
    }
}
