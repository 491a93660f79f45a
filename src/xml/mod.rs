// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hand-written CIM-XML codec
//!
//! DSP0201's grammar is dominated by `xs:choice` groups, which a generic
//! structural (de)serializer cannot express. Encoding therefore selects the
//! populated enum variant per choice group, and decoding dispatches on the
//! child element's tag name. Every union is enumerated exhaustively, no
//! reflection.

mod decode;
mod encode;

use thiserror::Error;

pub use decode::decode_envelope;
pub use encode::encode_envelope;

/// A malformed document or an I/O failure while reading/writing XML.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("bad character escape: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("missing required attribute {attr} on {element}")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("invalid value `{value}` for attribute {attr} on {element}")]
    InvalidAttribute {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("missing required element {element} inside {context}")]
    MissingElement {
        context: &'static str,
        element: &'static str,
    },

    #[error("unexpected end of document inside {0}")]
    UnexpectedEof(&'static str),

    #[error("document does not start with a CIM element")]
    NotCim,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use pretty_assertions::assert_eq;

    fn round_trip(cim: &Cim) -> Cim {
        let mut buf = Vec::new();
        encode_envelope(cim, &mut buf).expect("encode");
        decode_envelope(&buf).expect("decode")
    }

    fn envelope_with_ireturn(rv: CimIReturnValue) -> Cim {
        Cim {
            cim_version: "2.0".into(),
            dtd_version: "2.0".into(),
            message: Some(CimMessage {
                id: "7-1".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                    response: Some(CimRsp::IMethod(CimIMethodResponse {
                        name: "EnumerateInstances".into(),
                        return_value: Some(rv),
                        ..CimIMethodResponse::default()
                    })),
                }),
            }),
            declaration: None,
        }
    }

    fn sample_instance_name() -> CimInstanceName {
        CimInstanceName::with_bindings(
            "Linux_UnixProcess",
            vec![
                CimKeyBinding::new("Handle", CimKeyValue::typed("string", "1234")),
                CimKeyBinding::new("CSName", CimKeyValue::untyped("host1")),
            ],
        )
    }

    fn sample_instance() -> CimInstance {
        CimInstance {
            class_name: "Linux_UnixProcess".into(),
            lang: None,
            qualifiers: vec![CimQualifier::new("Description", "string")],
            properties: vec![
                CimPropertyEntry::Scalar(CimProperty {
                    name: "Handle".into(),
                    cim_type: "string".into(),
                    class_origin: Some("CIM_Process".into()),
                    propagated: true,
                    qualifiers: vec![CimQualifier::new("key", "boolean")],
                    value: Some(CimValue::new("1234")),
                    ..CimProperty::default()
                }),
                CimPropertyEntry::Array(CimPropertyArray {
                    name: "Parameters".into(),
                    cim_type: "string".into(),
                    array_size: Some(8),
                    value_array: Some(CimValueArray {
                        values: vec![
                            CimValueOrNull::Value(CimValue::new("-a")),
                            CimValueOrNull::Null,
                        ],
                    }),
                    ..CimPropertyArray::default()
                }),
                CimPropertyEntry::Reference(CimPropertyReference {
                    name: "OwningSystem".into(),
                    reference_class: Some("CIM_System".into()),
                    value_reference: Some(CimValueReference::ClassName(CimClassName::new(
                        "Linux_ComputerSystem",
                    ))),
                    ..CimPropertyReference::default()
                }),
            ],
        }
    }

    #[test]
    fn envelope_versions_round_trip() {
        let cim = Cim {
            cim_version: "2.0".into(),
            dtd_version: "2.0".into(),
            message: None,
            declaration: None,
        };
        assert_eq!(round_trip(&cim), cim);
    }

    #[test]
    fn request_envelope_round_trips() {
        let cim = Cim {
            cim_version: "2.0".into(),
            dtd_version: "2.0".into(),
            message: Some(CimMessage {
                id: "1-2".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleReq(CimSimpleReq {
                    correlators: Vec::new(),
                    call: CimCall::IMethod(CimIMethodCall {
                        name: "EnumerateInstances".into(),
                        namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
                        param_values: vec![
                            CimIParamValue {
                                name: "ClassName".into(),
                                value: Some(CimIParamValueKind::ClassName(CimClassName::new(
                                    "CIM_Process",
                                ))),
                            },
                            CimIParamValue {
                                name: "LocalOnly".into(),
                                value: Some(CimIParamValueKind::Value(CimValue::new("false"))),
                            },
                            CimIParamValue {
                                name: "PropertyList".into(),
                                value: Some(CimIParamValueKind::Array(
                                    CimValueArray::from_strings(["Handle", "Name"]),
                                )),
                            },
                        ],
                    }),
                }),
            }),
            declaration: None,
        };
        assert_eq!(round_trip(&cim), cim);
    }

    #[test]
    fn value_or_null_variants_round_trip() {
        let rv = CimIReturnValue {
            value_array: Some(CimValueArray {
                values: vec![
                    CimValueOrNull::Value(CimValue::new("abc")),
                    CimValueOrNull::Null,
                    CimValueOrNull::Value(CimValue::new("x < y & z")),
                ],
            }),
            ..CimIReturnValue::default()
        };
        let cim = envelope_with_ireturn(rv);
        assert_eq!(round_trip(&cim), cim);
    }

    #[test]
    fn every_value_reference_variant_round_trips() {
        let namespace_path = CimNamespacePath {
            host: CimHost {
                value: "192.168.1.23".into(),
            },
            local_namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
        };
        let variants = vec![
            CimValueReference::ClassPath(CimClassPath {
                namespace_path: namespace_path.clone(),
                class_name: CimClassName::new("CIM_System"),
            }),
            CimValueReference::LocalClassPath(CimLocalClassPath {
                namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
                class_name: CimClassName::new("CIM_System"),
            }),
            CimValueReference::ClassName(CimClassName::new("CIM_System")),
            CimValueReference::InstancePath(CimInstancePath {
                namespace_path,
                instance_name: sample_instance_name(),
            }),
            CimValueReference::LocalInstancePath(CimLocalInstancePath {
                namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
                instance_name: sample_instance_name(),
            }),
            CimValueReference::InstanceName(sample_instance_name()),
        ];
        for reference in variants {
            let rv = CimIReturnValue {
                value_reference: Some(reference),
                ..CimIReturnValue::default()
            };
            let cim = envelope_with_ireturn(rv);
            assert_eq!(round_trip(&cim), cim);
        }
    }

    #[test]
    fn instance_name_key_forms_round_trip() {
        let forms = vec![
            CimInstanceName::class_only("CIM_Process"),
            sample_instance_name(),
            CimInstanceName {
                class_name: "CIM_Process".into(),
                keys: CimInstanceKeys::Value(CimKeyValue {
                    value_type: Some("numeric".into()),
                    cim_type: None,
                    value: "42".into(),
                }),
            },
            CimInstanceName {
                class_name: "CIM_Process".into(),
                keys: CimInstanceKeys::Reference(Box::new(CimValueReference::ClassName(
                    CimClassName::new("CIM_System"),
                ))),
            },
        ];
        for name in forms {
            let rv = CimIReturnValue {
                instance_names: vec![name],
                ..CimIReturnValue::default()
            };
            let cim = envelope_with_ireturn(rv);
            assert_eq!(round_trip(&cim), cim);
        }
    }

    #[test]
    fn every_param_value_variant_round_trips() {
        let kinds = vec![
            CimParamValueKind::Value(CimValue::new("v1")),
            CimParamValueKind::Reference(CimValueReference::ClassName(CimClassName::new(
                "CIM_System",
            ))),
            CimParamValueKind::Array(CimValueArray::from_strings(["a", "b"])),
            CimParamValueKind::RefArray(CimValueRefArray {
                values: vec![
                    CimRefOrNull::Reference(CimValueReference::InstanceName(
                        sample_instance_name(),
                    )),
                    CimRefOrNull::Null,
                ],
            }),
            CimParamValueKind::ClassName(CimClassName::new("CIM_LogicalDevice")),
            CimParamValueKind::InstanceName(sample_instance_name()),
            CimParamValueKind::Class(CimClass {
                name: "Test_Class".into(),
                super_class: Some("Test_Base".into()),
                ..CimClass::default()
            }),
            CimParamValueKind::Instance(sample_instance()),
            CimParamValueKind::NamedInstance(CimValueNamedInstance {
                instance_name: sample_instance_name(),
                instance: sample_instance(),
            }),
        ];
        for kind in kinds {
            let cim = Cim {
                cim_version: "2.0".into(),
                dtd_version: "2.0".into(),
                message: Some(CimMessage {
                    id: "3-9".into(),
                    protocol_version: "1.0".into(),
                    body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                        response: Some(CimRsp::Method(CimMethodResponse {
                            name: "Reboot".into(),
                            return_value: Some(CimReturnValue {
                                param_type: Some("uint32".into()),
                                embedded_object: None,
                                value: Some(CimReturnValueKind::Value(CimValue::new("0"))),
                            }),
                            param_values: vec![CimParamValue {
                                name: "Out1".into(),
                                param_type: Some("string".into()),
                                embedded_object: None,
                                value: Some(kind),
                            }],
                            ..CimMethodResponse::default()
                        })),
                    }),
                }),
                declaration: None,
            };
            assert_eq!(round_trip(&cim), cim);
        }
    }

    #[test]
    fn every_ireturn_value_alternative_round_trips() {
        let namespace_path = CimNamespacePath {
            host: CimHost {
                value: "cimom.example.com".into(),
            },
            local_namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
        };
        let instance_path = CimInstancePath {
            namespace_path: namespace_path.clone(),
            instance_name: sample_instance_name(),
        };
        let class = CimClass {
            name: "Test_Class".into(),
            super_class: Some("Test_Base".into()),
            qualifiers: vec![CimQualifier::new("Association", "boolean")],
            properties: vec![CimPropertyEntry::Scalar(CimProperty {
                name: "Caption".into(),
                cim_type: "string".into(),
                ..CimProperty::default()
            })],
            methods: vec![CimMethod {
                name: "Reset".into(),
                cim_type: Some("uint32".into()),
                parameters: vec![
                    CimParameterEntry::Scalar(CimParameter {
                        name: "Force".into(),
                        cim_type: "boolean".into(),
                        ..CimParameter::default()
                    }),
                    CimParameterEntry::Reference(CimParameterReference {
                        name: "Target".into(),
                        reference_class: Some("CIM_System".into()),
                        ..CimParameterReference::default()
                    }),
                    CimParameterEntry::Array(CimParameterArray {
                        name: "Flags".into(),
                        cim_type: "uint8".into(),
                        array_size: Some(4),
                        ..CimParameterArray::default()
                    }),
                    CimParameterEntry::RefArray(CimParameterRefArray {
                        name: "Peers".into(),
                        reference_class: "CIM_System".into(),
                        ..CimParameterRefArray::default()
                    }),
                ],
                ..CimMethod::default()
            }],
        };

        let alternatives = vec![
            CimIReturnValue {
                class_names: vec![CimClassName::new("CIM_Process")],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                instance_names: vec![sample_instance_name()],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                values: vec![CimValue::new("42")],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_object_with_paths: vec![CimValueObjectWithPath::Instance {
                    path: instance_path.clone(),
                    instance: sample_instance(),
                }],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_object_with_paths: vec![CimValueObjectWithPath::Class {
                    path: CimClassPath {
                        namespace_path: namespace_path.clone(),
                        class_name: CimClassName::new("Test_Class"),
                    },
                    class: class.clone(),
                }],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_object_with_local_paths: vec![CimValueObjectWithLocalPath::Instance {
                    path: CimLocalInstancePath {
                        namespace_path: CimLocalNamespacePath::from_namespace("root/cimv2"),
                        instance_name: sample_instance_name(),
                    },
                    instance: sample_instance(),
                }],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_objects: vec![
                    CimValueObject::Class(class.clone()),
                    CimValueObject::Instance(sample_instance()),
                ],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                object_paths: vec![
                    CimObjectPath::Instance(instance_path.clone()),
                    CimObjectPath::Class(CimClassPath {
                        namespace_path: namespace_path.clone(),
                        class_name: CimClassName::new("CIM_System"),
                    }),
                ],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                qualifier_declarations: vec![CimQualifierDeclaration {
                    name: "Key".into(),
                    cim_type: "boolean".into(),
                    is_array: false,
                    scope: Some(CimScope {
                        property: true,
                        reference: true,
                        ..CimScope::default()
                    }),
                    value: Some(CimQualifierValue::Value(CimValue::new("false"))),
                    ..CimQualifierDeclaration::default()
                }],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_array: Some(CimValueArray::from_strings(["a"])),
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_reference: Some(CimValueReference::InstancePath(instance_path.clone())),
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                classes: vec![class],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                instances: vec![sample_instance()],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                instance_paths: vec![instance_path.clone()],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_named_instances: vec![CimValueNamedInstance {
                    instance_name: sample_instance_name(),
                    instance: sample_instance(),
                }],
                ..CimIReturnValue::default()
            },
            CimIReturnValue {
                value_instance_with_paths: vec![CimValueInstanceWithPath {
                    instance_path,
                    instance: sample_instance(),
                }],
                ..CimIReturnValue::default()
            },
        ];
        for rv in alternatives {
            let cim = envelope_with_ireturn(rv);
            assert_eq!(round_trip(&cim), cim);
        }
    }

    #[test]
    fn error_element_round_trips() {
        let cim = Cim {
            cim_version: "2.0".into(),
            dtd_version: "2.0".into(),
            message: Some(CimMessage {
                id: "2-4".into(),
                protocol_version: "1.0".into(),
                body: CimMessageBody::SimpleRsp(CimSimpleRsp {
                    response: Some(CimRsp::IMethod(CimIMethodResponse {
                        name: "GetInstance".into(),
                        error: Some(CimError {
                            code: 6,
                            description: "requested object could not be found".into(),
                            instances: Vec::new(),
                        }),
                        ..CimIMethodResponse::default()
                    })),
                }),
            }),
            declaration: None,
        };
        assert_eq!(round_trip(&cim), cim);
    }

    #[test]
    fn decodes_a_literal_server_response() {
        let body = concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<CIM CIMVERSION="2.0" DTDVERSION="2.0">"#,
            r#"<MESSAGE ID="42" PROTOCOLVERSION="1.0">"#,
            r#"<SIMPLERSP><IMETHODRESPONSE NAME="EnumerateInstanceNames">"#,
            r#"<IRETURNVALUE>"#,
            r#"<INSTANCENAME CLASSNAME="CIM_Process">"#,
            r#"<KEYBINDING NAME="Handle"><KEYVALUE VALUETYPE="string">77</KEYVALUE></KEYBINDING>"#,
            r#"</INSTANCENAME>"#,
            r#"</IRETURNVALUE>"#,
            r#"</IMETHODRESPONSE></SIMPLERSP></MESSAGE></CIM>"#
        );
        let cim = decode_envelope(body.as_bytes()).expect("decode");
        assert_eq!(cim.cim_version, "2.0");
        let rv = cim.ireturn_value().expect("return value");
        assert_eq!(rv.instance_names.len(), 1);
        assert_eq!(rv.instance_names[0].class_name, "CIM_Process");
        match &rv.instance_names[0].keys {
            CimInstanceKeys::Bindings(bindings) => {
                assert_eq!(bindings.len(), 1);
                assert_eq!(bindings[0].name, "Handle");
            }
            other => panic!("unexpected key form: {other:?}"),
        }
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let body = concat!(
            r#"<CIM CIMVERSION="2.0" DTDVERSION="2.0">"#,
            r#"<MESSAGE ID="1" PROTOCOLVERSION="1.0">"#,
            r#"<SIMPLERSP><IMETHODRESPONSE NAME="EnumerateClassNames">"#,
            r#"<VENDORNOISE><DEEP>text</DEEP></VENDORNOISE>"#,
            r#"<IRETURNVALUE><CLASSNAME NAME="CIM_Fan"/></IRETURNVALUE>"#,
            r#"</IMETHODRESPONSE></SIMPLERSP></MESSAGE></CIM>"#
        );
        let cim = decode_envelope(body.as_bytes()).expect("decode");
        let rv = cim.ireturn_value().expect("return value");
        assert_eq!(rv.class_names.len(), 1);
        assert_eq!(rv.class_names[0].name, "CIM_Fan");
    }

    #[test]
    fn truncated_document_is_a_decode_error() {
        let body = br#"<CIM CIMVERSION="2.0" DTDVERSION="2.0"><MESSAGE ID="1""#;
        assert!(decode_envelope(body).is_err());
        assert!(decode_envelope(b"<HTML></HTML>").is_err());
        assert!(decode_envelope(b"").is_err());
    }
}
