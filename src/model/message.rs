// Copyright (c) 2025 - Cowboy AI, Inc.
//! Message elements: the CIM envelope, request/response wrappers, parameter
//! values and return values (DSP0201 "Message Elements" section), plus the
//! declaration and export data shapes.

use crate::model::naming::{
    CimClassName, CimInstanceName, CimInstancePath, CimLocalClassPath, CimLocalInstancePath,
    CimLocalNamespacePath, CimNamespacePath, CimObjectPath,
};
use crate::model::object::{CimClass, CimInstance, CimQualifierDeclaration};
use crate::model::values::{
    CimValue, CimValueArray, CimValueInstanceWithPath, CimValueNamedInstance, CimValueNamedObject,
    CimValueObject, CimValueObjectWithLocalPath, CimValueObjectWithPath, CimValueRefArray,
    CimValueReference,
};

/// The top-level CIM element: protocol/DTD versions plus an optional
/// message and an optional declaration (schema bulk-load payload).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cim {
    pub cim_version: String,
    pub dtd_version: String,
    pub message: Option<CimMessage>,
    pub declaration: Option<CimDeclaration>,
}

impl Cim {
    pub fn simple_rsp(&self) -> Option<&CimSimpleRsp> {
        match &self.message.as_ref()?.body {
            CimMessageBody::SimpleRsp(rsp) => Some(rsp),
            _ => None,
        }
    }

    pub fn imethod_response(&self) -> Option<&CimIMethodResponse> {
        match self.simple_rsp()?.response.as_ref()? {
            CimRsp::IMethod(rsp) => Some(rsp),
            CimRsp::Method(_) => None,
        }
    }

    pub fn method_response(&self) -> Option<&CimMethodResponse> {
        match self.simple_rsp()?.response.as_ref()? {
            CimRsp::Method(rsp) => Some(rsp),
            CimRsp::IMethod(_) => None,
        }
    }

    pub fn ireturn_value(&self) -> Option<&CimIReturnValue> {
        self.imethod_response()?.return_value.as_ref()
    }

    /// Consume the envelope, yielding the intrinsic response if that is
    /// what it holds.
    pub fn into_imethod_response(self) -> Option<CimIMethodResponse> {
        match self.message?.body {
            CimMessageBody::SimpleRsp(CimSimpleRsp {
                response: Some(CimRsp::IMethod(response)),
            }) => Some(response),
            _ => None,
        }
    }

    /// Consume the envelope, yielding the extrinsic response if that is
    /// what it holds.
    pub fn into_method_response(self) -> Option<CimMethodResponse> {
        match self.message?.body {
            CimMessageBody::SimpleRsp(CimSimpleRsp {
                response: Some(CimRsp::Method(response)),
            }) => Some(response),
            _ => None,
        }
    }

    /// Consume the envelope, yielding the intrinsic return payload.
    pub fn into_ireturn_value(self) -> Option<CimIReturnValue> {
        self.into_imethod_response()?.return_value
    }
}

/// MESSAGE: id, protocol version and the eight-way request/response choice.
#[derive(Debug, Clone, PartialEq)]
pub struct CimMessage {
    pub id: String,
    pub protocol_version: String,
    pub body: CimMessageBody,
}

/// The MESSAGE content choice.
#[derive(Debug, Clone, PartialEq)]
pub enum CimMessageBody {
    SimpleReq(CimSimpleReq),
    MultiReq(CimMultiReq),
    SimpleRsp(CimSimpleRsp),
    MultiRsp(CimMultiRsp),
    SimpleExpReq(CimSimpleExpReq),
    MultiExpReq(CimMultiExpReq),
    SimpleExpRsp(CimSimpleExpRsp),
    MultiExpRsp(CimMultiExpRsp),
}

/// CORRELATOR: an operation correlator attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimCorrelator {
    pub name: String,
    pub cim_type: String,
    pub value: CimValue,
}

/// SIMPLEREQ: one intrinsic or extrinsic call.
#[derive(Debug, Clone, PartialEq)]
pub struct CimSimpleReq {
    pub correlators: Vec<CimCorrelator>,
    pub call: CimCall,
}

/// The METHODCALL / IMETHODCALL choice.
#[derive(Debug, Clone, PartialEq)]
pub enum CimCall {
    Method(CimMethodCall),
    IMethod(CimIMethodCall),
}

/// MULTIREQ: a batch of simple requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimMultiReq {
    pub requests: Vec<CimSimpleReq>,
}

/// The target of an extrinsic METHODCALL.
#[derive(Debug, Clone, PartialEq)]
pub enum CimCallPath {
    Class(CimLocalClassPath),
    Instance(CimLocalInstancePath),
}

/// METHODCALL: an extrinsic (class-defined) method invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CimMethodCall {
    pub name: String,
    pub path: CimCallPath,
    pub param_values: Vec<CimParamValue>,
}

/// IMETHODCALL: an intrinsic operation invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimIMethodCall {
    pub name: String,
    pub namespace_path: CimLocalNamespacePath,
    pub param_values: Vec<CimIParamValue>,
}

/// The PARAMVALUE payload choice (extrinsic calls and responses).
#[derive(Debug, Clone, PartialEq)]
pub enum CimParamValueKind {
    Value(CimValue),
    Reference(CimValueReference),
    Array(CimValueArray),
    RefArray(CimValueRefArray),
    ClassName(CimClassName),
    InstanceName(CimInstanceName),
    Class(CimClass),
    Instance(CimInstance),
    NamedInstance(CimValueNamedInstance),
}

/// PARAMVALUE: a named parameter of an extrinsic call or response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimParamValue {
    pub name: String,
    pub param_type: Option<String>,
    pub embedded_object: Option<String>,
    pub value: Option<CimParamValueKind>,
}

/// The IPARAMVALUE payload choice (intrinsic operations).
#[derive(Debug, Clone, PartialEq)]
pub enum CimIParamValueKind {
    Value(CimValue),
    Reference(CimValueReference),
    Array(CimValueArray),
    ClassName(CimClassName),
    InstanceName(CimInstanceName),
    QualifierDeclaration(CimQualifierDeclaration),
    Class(CimClass),
    Instance(CimInstance),
    NamedInstance(CimValueNamedInstance),
}

/// IPARAMVALUE: a named parameter of an intrinsic operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimIParamValue {
    pub name: String,
    pub value: Option<CimIParamValueKind>,
}

/// SIMPLERSP: one intrinsic or extrinsic response. The inner choice is
/// optional so a structurally empty response decodes and is then reported
/// by the fault-evaluation chain rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimSimpleRsp {
    pub response: Option<CimRsp>,
}

/// The METHODRESPONSE / IMETHODRESPONSE choice.
#[derive(Debug, Clone, PartialEq)]
pub enum CimRsp {
    Method(CimMethodResponse),
    IMethod(CimIMethodResponse),
}

/// MULTIRSP: a batch of simple responses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimMultiRsp {
    pub responses: Vec<CimSimpleRsp>,
}

/// ERROR: a protocol fault with numeric status code and description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimError {
    pub code: u32,
    pub description: String,
    pub instances: Vec<CimInstance>,
}

/// RETURNVALUE payload of an extrinsic method response.
#[derive(Debug, Clone, PartialEq)]
pub enum CimReturnValueKind {
    Value(CimValue),
    Reference(CimValueReference),
}

/// RETURNVALUE: the return value of an extrinsic method.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimReturnValue {
    pub param_type: Option<String>,
    pub embedded_object: Option<String>,
    pub value: Option<CimReturnValueKind>,
}

/// METHODRESPONSE: an extrinsic method response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimMethodResponse {
    pub name: String,
    pub error: Option<CimError>,
    pub return_value: Option<CimReturnValue>,
    pub param_values: Vec<CimParamValue>,
}

/// IMETHODRESPONSE: an intrinsic operation response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimIMethodResponse {
    pub name: String,
    pub error: Option<CimError>,
    pub return_value: Option<CimIReturnValue>,
    pub param_values: Vec<CimParamValue>,
}

/// IRETURNVALUE: the return payload of an intrinsic operation. The grammar
/// is a repeated choice, so every alternative is a list here; an operation
/// populates exactly the alternatives its result shape uses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimIReturnValue {
    pub class_names: Vec<CimClassName>,
    pub instance_names: Vec<CimInstanceName>,
    pub values: Vec<CimValue>,
    pub value_object_with_paths: Vec<CimValueObjectWithPath>,
    pub value_object_with_local_paths: Vec<CimValueObjectWithLocalPath>,
    pub value_objects: Vec<CimValueObject>,
    pub object_paths: Vec<CimObjectPath>,
    pub qualifier_declarations: Vec<CimQualifierDeclaration>,
    pub value_array: Option<CimValueArray>,
    pub value_reference: Option<CimValueReference>,
    pub classes: Vec<CimClass>,
    pub instances: Vec<CimInstance>,
    pub instance_paths: Vec<CimInstancePath>,
    pub value_named_instances: Vec<CimValueNamedInstance>,
    pub value_instance_with_paths: Vec<CimValueInstanceWithPath>,
}

/// EXPMETHODCALL: a listener-operation invocation (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimExpMethodCall {
    pub name: String,
    pub param_values: Vec<CimExpParamValue>,
}

/// EXPPARAMVALUE: a listener-operation parameter (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimExpParamValue {
    pub name: String,
    pub instance: Option<CimInstance>,
}

/// SIMPLEEXPREQ: a simple export request (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimSimpleExpReq {
    pub correlators: Vec<CimCorrelator>,
    pub call: CimExpMethodCall,
}

/// MULTIEXPREQ: a batch of export requests (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimMultiExpReq {
    pub requests: Vec<CimSimpleExpReq>,
}

/// EXPMETHODRESPONSE: a listener-operation response (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimExpMethodResponse {
    pub name: String,
    pub error: Option<CimError>,
    pub return_value: Option<CimIReturnValue>,
}

/// SIMPLEEXPRSP: a simple export response (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimSimpleExpRsp {
    pub response: CimExpMethodResponse,
}

/// MULTIEXPRSP: a batch of export responses (data shape only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimMultiExpRsp {
    pub responses: Vec<CimSimpleExpRsp>,
}

/// DECLARATION: a set of schema element declarations. Out of scope for
/// operation traffic; carried as data only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimDeclaration {
    pub groups: Vec<CimDeclGroupKind>,
}

/// The DECLGROUP choice.
#[derive(Debug, Clone, PartialEq)]
pub enum CimDeclGroupKind {
    Plain(CimDeclGroup),
    WithName(CimDeclGroupWithName),
    WithPath(CimDeclGroupWithPath),
}

/// The optional namespace-path choice at the head of a declaration group.
#[derive(Debug, Clone, PartialEq)]
pub enum CimDeclNamespacePath {
    Local(CimLocalNamespacePath),
    Absolute(CimNamespacePath),
}

/// DECLGROUP: declarations without path information.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimDeclGroup {
    pub namespace_path: Option<CimDeclNamespacePath>,
    pub qualifier_declarations: Vec<CimQualifierDeclaration>,
    pub value_objects: Vec<CimValueObject>,
}

/// DECLGROUP.WITHNAME: declarations with local-name information.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimDeclGroupWithName {
    pub namespace_path: Option<CimDeclNamespacePath>,
    pub qualifier_declarations: Vec<CimQualifierDeclaration>,
    pub value_named_objects: Vec<CimValueNamedObject>,
}

/// An entry of DECLGROUP.WITHPATH.
#[derive(Debug, Clone, PartialEq)]
pub enum CimDeclPathObject {
    WithPath(CimValueObjectWithPath),
    WithLocalPath(CimValueObjectWithLocalPath),
}

/// DECLGROUP.WITHPATH: declarations with full path information.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CimDeclGroupWithPath {
    pub values: Vec<CimDeclPathObject>,
}
