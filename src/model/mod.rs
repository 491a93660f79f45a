// Copyright (c) 2025 - Cowboy AI, Inc.
//! The CIM-XML data model (DSP0201)
//!
//! Leaves first: primitive types, then values, naming, object definitions
//! and finally the message envelope. Every `xs:choice` group in the grammar
//! is a Rust enum, so "exactly one alternative populated" is guaranteed by
//! construction rather than checked at runtime.

pub mod message;
pub mod naming;
pub mod object;
pub mod types;
pub mod values;

pub use message::{
    Cim, CimCall, CimCallPath, CimError, CimIMethodCall, CimIMethodResponse, CimIParamValue,
    CimIParamValueKind, CimIReturnValue, CimMessage, CimMessageBody, CimMethodCall,
    CimMethodResponse, CimParamValue, CimParamValueKind, CimReturnValue, CimReturnValueKind,
    CimRsp, CimSimpleReq, CimSimpleRsp,
};
pub use naming::{
    CimClassName, CimClassPath, CimHost, CimInstanceKeys, CimInstanceName, CimInstancePath,
    CimKeyBinding, CimKeyBindingValue, CimKeyValue, CimLocalClassPath, CimLocalInstancePath,
    CimLocalNamespacePath, CimNamespace, CimNamespacePath, CimObjectPath,
};
pub use object::{
    CimClass, CimInstance, CimMethod, CimParameter, CimParameterArray, CimParameterEntry,
    CimParameterRefArray, CimParameterReference, CimProperty, CimPropertyArray, CimPropertyEntry,
    CimPropertyReference, CimQualifier, CimQualifierDeclaration, CimQualifierFlavor,
    CimQualifierValue, CimScope,
};
pub use types::{CimType, CimTypeCode, NON_ARRAY, UNBOUNDED_ARRAY};
pub use values::{
    CimRefOrNull, CimValue, CimValueArray, CimValueInstanceWithPath, CimValueNamedInstance,
    CimValueNamedObject, CimValueObject, CimValueObjectWithLocalPath, CimValueObjectWithPath,
    CimValueOrNull, CimValueRefArray, CimValueReference,
};
