//! Error types and CIM status codes for WBEM operations

use std::fmt;

use thiserror::Error;

use crate::path::PathError;
use crate::xml::XmlError;

/// CIM status code carried by a protocol fault (DSP0200).
///
/// Codes 1 through 28 are defined by the specification; 18 and 19 are
/// reserved. Anything else renders as `COM_ERR_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CimStatusCode(pub u32);

impl CimStatusCode {
    /// A general error occurred.
    pub const FAILED: Self = Self(1);
    /// Resource not available.
    pub const ACCESS_DENIED: Self = Self(2);
    /// The target namespace does not exist.
    pub const INVALID_NAMESPACE: Self = Self(3);
    /// Parameter value(s) invalid.
    pub const INVALID_PARAMETER: Self = Self(4);
    /// The specified class does not exist.
    pub const INVALID_CLASS: Self = Self(5);
    /// Requested object could not be found.
    pub const NOT_FOUND: Self = Self(6);
    /// Operation not supported.
    pub const NOT_SUPPORTED: Self = Self(7);
    /// Class has subclasses.
    pub const CLASS_HAS_CHILDREN: Self = Self(8);
    /// Class has instances.
    pub const CLASS_HAS_INSTANCES: Self = Self(9);
    /// Superclass does not exist.
    pub const INVALID_SUPERCLASS: Self = Self(10);
    /// Object already exists.
    pub const ALREADY_EXISTS: Self = Self(11);
    /// Property does not exist.
    pub const NO_SUCH_PROPERTY: Self = Self(12);
    /// Value incompatible with type.
    pub const TYPE_MISMATCH: Self = Self(13);
    /// Query language not supported.
    pub const QUERY_LANGUAGE_NOT_SUPPORTED: Self = Self(14);
    /// Query not valid.
    pub const INVALID_QUERY: Self = Self(15);
    /// Extrinsic method not executed.
    pub const METHOD_NOT_AVAILABLE: Self = Self(16);
    /// Extrinsic method does not exist.
    pub const METHOD_NOT_FOUND: Self = Self(17);
    pub const NAMESPACE_NOT_EMPTY: Self = Self(20);
    pub const INVALID_ENUMERATION_CONTEXT: Self = Self(21);
    pub const INVALID_OPERATION_TIMEOUT: Self = Self(22);
    pub const PULL_HAS_BEEN_ABANDONED: Self = Self(23);
    pub const PULL_CANNOT_BE_ABANDONED: Self = Self(24);
    pub const FILTERED_ENUMERATION_NOT_SUPPORTED: Self = Self(25);
    pub const CONTINUATION_ON_ERROR_NOT_SUPPORTED: Self = Self(26);
    pub const SERVER_LIMITS_EXCEEDED: Self = Self(27);
    pub const SERVER_IS_SHUTTING_DOWN: Self = Self(28);
}

const STATUS_NAMES: [&str; 29] = [
    "COM_ERR_OK",
    "CIM_ERR_FAILED",
    "CIM_ERR_ACCESS_DENIED",
    "CIM_ERR_INVALID_NAMESPACE",
    "CIM_ERR_INVALID_PARAMETER",
    "CIM_ERR_INVALID_CLASS",
    "CIM_ERR_NOT_FOUND",
    "CIM_ERR_NOT_SUPPORTED",
    "CIM_ERR_CLASS_HAS_CHILDREN",
    "CIM_ERR_CLASS_HAS_INSTANCES",
    "CIM_ERR_INVALID_SUPERCLASS",
    "CIM_ERR_ALREADY_EXISTS",
    "CIM_ERR_NO_SUCH_PROPERTY",
    "CIM_ERR_TYPE_MISMATCH",
    "CIM_ERR_QUERY_LANGUAGE_NOT_SUPPORTED",
    "CIM_ERR_INVALID_QUERY",
    "CIM_ERR_METHOD_NOT_AVAILABLE",
    "CIM_ERR_METHOD_NOT_FOUND",
    "CIM_ERR_18",
    "CIM_ERR_19",
    "CIM_ERR_NAMESPACE_NOT_EMPTY",
    "CIM_ERR_INVALID_ENUMERATION_CONTEXT",
    "CIM_ERR_INVALID_OPERATION_TIMEOUT",
    "CIM_ERR_PULL_HAS_BEEN_ABANDONED",
    "CIM_ERR_PULL_CANNOT_BE_ABANDONED",
    "CIM_ERR_FILTERED_ENUMERATION_NOT_SUPPORTED",
    "CIM_ERR_CONTINUATION_ON_ERROR_NOT_SUPPORTED",
    "CIM_ERR_SERVER_LIMITS_EXCEEDED",
    "CIM_ERR_SERVER_IS_SHUTTING_DOWN",
];

impl fmt::Display for CimStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (1..=28).contains(&self.0) {
            f.write_str(STATUS_NAMES[self.0 as usize])
        } else {
            write!(f, "COM_ERR_{}", self.0)
        }
    }
}

/// Errors that can occur while talking to a CIMOM.
#[derive(Debug, Error)]
pub enum WbemError {
    /// Protocol fault reported by the CIMOM, or a local validation failure
    /// raised before anything was sent over the wire.
    #[error("{code}: {message}")]
    Cim {
        code: CimStatusCode,
        message: String,
    },

    /// HTTP-level failure (connection, TLS, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, with whatever diagnostic text was available.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// The request envelope could not be serialized.
    #[error("request encode error: {0}")]
    Encode(#[from] XmlError),

    /// The response bytes are not a well-formed CIM envelope. Carries the
    /// raw bytes for postmortem.
    #[error("decode error: {source}, response body follows:\r\n{}", String::from_utf8_lossy(.bytes))]
    Decode { bytes: Vec<u8>, source: XmlError },

    /// The envelope decoded but its fault evaluator reported a problem.
    /// Carries the raw bytes for postmortem.
    #[error("{source}, response body follows:\r\n{}", String::from_utf8_lossy(.bytes))]
    Fault {
        bytes: Vec<u8>,
        #[source]
        source: Box<WbemError>,
    },

    /// A probe did not complete within its allotted time.
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Object-path text could not be parsed.
    #[error("object path parse error: {0}")]
    Path(#[from] PathError),

    #[error("CIM.MESSAGE is missing")]
    MessageMissing,

    #[error("CIM.MESSAGE.SIMPLERSP is missing")]
    SimpleRspMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE is missing")]
    IMethodResponseMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.METHODRESPONSE is missing")]
    MethodResponseMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE is missing")]
    IReturnValueMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.METHODRESPONSE.RETURNVALUE is missing")]
    ReturnValueMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.CLASSNAME is missing")]
    ClassNamesMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.INSTANCENAME is missing")]
    InstanceNamesMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.INSTANCEPATH is missing")]
    InstancePathsMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.INSTANCE is missing")]
    InstancesMissing,

    /// More than one INSTANCE in a GetInstance response. A fully-keyed get
    /// must match at most one instance, so this indicates a server defect or
    /// under-specified keys.
    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE holds more than one INSTANCE")]
    AmbiguousInstances,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.VALUE.NAMEDINSTANCE is missing")]
    NamedInstancesMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE.CLASS is missing")]
    ClassesMissing,

    #[error("CIM.MESSAGE.SIMPLERSP.IMETHODRESPONSE.IRETURNVALUE holds more than one CLASS")]
    AmbiguousClasses,
}

impl WbemError {
    /// Build a protocol-fault error from a status code and description.
    pub fn cim(code: CimStatusCode, message: impl Into<String>) -> Self {
        WbemError::Cim {
            code,
            message: message.into(),
        }
    }

    /// Build the validation error raised for empty required arguments.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::cim(CimStatusCode::INVALID_PARAMETER, message)
    }
}

/// Result type for WBEM operations.
pub type WbemResult<T> = Result<T, WbemError>;

/// Classifies the "missing substructure" sentinels that mean a well-formed
/// response simply carried no matches. Most callers treat these as a normal,
/// continuable outcome rather than a failure.
pub fn is_empty_results(err: &WbemError) -> bool {
    match err {
        WbemError::IReturnValueMissing
        | WbemError::InstancePathsMissing
        | WbemError::InstanceNamesMissing
        | WbemError::NamedInstancesMissing
        | WbemError::InstancesMissing => true,
        WbemError::Fault { source, .. } => is_empty_results(source),
        _ => false,
    }
}

/// True when the error is a protocol fault with status `CIM_ERR_NOT_SUPPORTED`,
/// letting callers skip optional or vendor-specific operations.
pub fn is_err_not_supported(err: &WbemError) -> bool {
    match err {
        WbemError::Cim { code, .. } => *code == CimStatusCode::NOT_SUPPORTED,
        WbemError::Fault { source, .. } => is_err_not_supported(source),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CimStatusCode::FAILED, "CIM_ERR_FAILED")]
    #[test_case(CimStatusCode::NOT_SUPPORTED, "CIM_ERR_NOT_SUPPORTED")]
    #[test_case(CimStatusCode(18), "CIM_ERR_18")]
    #[test_case(CimStatusCode(19), "CIM_ERR_19")]
    #[test_case(CimStatusCode::SERVER_IS_SHUTTING_DOWN, "CIM_ERR_SERVER_IS_SHUTTING_DOWN")]
    fn status_code_names(code: CimStatusCode, expected: &str) {
        assert_eq!(code.to_string(), expected);
    }

    #[test_case(CimStatusCode(0), "COM_ERR_0")]
    #[test_case(CimStatusCode(29), "COM_ERR_29")]
    #[test_case(CimStatusCode(4097), "COM_ERR_4097")]
    fn status_code_out_of_range(code: CimStatusCode, expected: &str) {
        assert_eq!(code.to_string(), expected);
    }

    #[test]
    fn empty_results_classifier() {
        assert!(is_empty_results(&WbemError::IReturnValueMissing));
        assert!(is_empty_results(&WbemError::InstanceNamesMissing));
        assert!(is_empty_results(&WbemError::NamedInstancesMissing));
        assert!(is_empty_results(&WbemError::InstancesMissing));
        assert!(!is_empty_results(&WbemError::AmbiguousInstances));
        assert!(!is_empty_results(&WbemError::MessageMissing));
        assert!(!is_empty_results(&WbemError::cim(
            CimStatusCode::NOT_FOUND,
            "gone"
        )));
    }

    #[test]
    fn empty_results_seen_through_fault_wrapper() {
        let wrapped = WbemError::Fault {
            bytes: b"<CIM/>".to_vec(),
            source: Box::new(WbemError::IReturnValueMissing),
        };
        assert!(is_empty_results(&wrapped));

        let wrapped = WbemError::Fault {
            bytes: Vec::new(),
            source: Box::new(WbemError::AmbiguousInstances),
        };
        assert!(!is_empty_results(&wrapped));
    }

    #[test]
    fn not_supported_classifier() {
        let direct = WbemError::cim(CimStatusCode::NOT_SUPPORTED, "nope");
        assert!(is_err_not_supported(&direct));

        let wrapped = WbemError::Fault {
            bytes: Vec::new(),
            source: Box::new(WbemError::cim(CimStatusCode::NOT_SUPPORTED, "nope")),
        };
        assert!(is_err_not_supported(&wrapped));

        assert!(!is_err_not_supported(&WbemError::cim(
            CimStatusCode::FAILED,
            "broken"
        )));
        assert!(!is_err_not_supported(&WbemError::IReturnValueMissing));
    }

    #[test]
    fn fault_display_keeps_code_and_description() {
        let err = WbemError::cim(CimStatusCode::INVALID_NAMESPACE, "no such namespace");
        assert_eq!(
            err.to_string(),
            "CIM_ERR_INVALID_NAMESPACE: no such namespace"
        );
    }
}
