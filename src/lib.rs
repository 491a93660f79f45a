//! CIM-XML operation-protocol client (DSP0200/DSP0201)
//!
//! This crate talks to a WBEM server ("CIMOM") over HTTP: enumerate
//! namespaces, classes and instances, fetch objects, navigate association
//! graphs and invoke extrinsic methods. The pieces, leaves first: a typed
//! data model for the CIM-XML grammar, a parser for the object-path
//! mini-language, a hand-written XML codec, the operation envelope layer
//! with its layered fault detection, and the HTTP transport.

pub mod capture;
pub mod client;
pub mod errors;
pub mod model;
pub mod operations;
pub mod params;
pub mod path;
pub mod xml;

// Re-export the commonly used types
pub use capture::{CaptureSink, FileCaptureSink};
pub use client::{ResponseEnvelope, WbemClient, WbemConfig};
pub use errors::{is_empty_results, is_err_not_supported, CimStatusCode, WbemError, WbemResult};
pub use model::{
    Cim, CimClass, CimInstance, CimInstanceKeys, CimInstanceName, CimKeyBinding,
    CimKeyBindingValue, CimKeyValue, CimLocalInstancePath, CimPropertyEntry, CimType, CimTypeCode,
    CimValue, CimValueReference,
};
pub use operations::{CimNamedInstance, ClassEnumeration, MethodResult};
pub use path::{
    parse_instance_name, parse_key_bindings, parse_local_instance_path, parse_object_path,
    split_namespaces, ParsedPath, PathError,
};
