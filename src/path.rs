// Copyright (c) 2025 - Cowboy AI, Inc.
//! Parser for the WBEM object-path mini-language
//!
//! The textual form is `[ns1/ns2/.../nsN/]ClassName[.Key1=V1,Key2=V2,...]`
//! (a `:` is also accepted between the namespace and the class name, which
//! is what the path renderers emit). A key value is one of:
//!
//! - a double-quoted string, where `''` and `'"` are the only escapes and
//!   stand for a literal `'` or `"`,
//! - a parenthesized type tag immediately followed by a quoted or unquoted
//!   literal, e.g. `(uint32)3`,
//! - a bare token of name characters (letters, digits, `_`, `-`).
//!
//! Implemented as a deterministic state machine over code points; the states
//! and error conditions mirror the grammar exactly and must not be loosened
//! without evidence of real-world server input requiring it.

use thiserror::Error;

use crate::model::naming::{
    CimInstanceKeys, CimInstanceName, CimKeyBinding, CimKeyValue, CimLocalInstancePath,
    CimLocalNamespacePath,
};

/// Object-path parse failure, reporting the offending byte offset where one
/// exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid class path `{input}` at {at}")]
    InvalidClassPath { input: String, at: usize },

    #[error("invalid key name in `{input}` at {at}")]
    InvalidKeyName { input: String, at: usize },

    #[error("invalid key value in `{input}` at {at}")]
    InvalidKeyValue { input: String, at: usize },

    #[error("invalid escape in `{input}` at {at}")]
    InvalidEscape { input: String, at: usize },

    #[error("property value is missing in `{input}`")]
    MissingValue { input: String },

    #[error("closing quote is missing in `{input}`")]
    UnterminatedQuote { input: String },

    #[error("namespace is not allowed in `{input}`")]
    UnexpectedNamespace { input: String },
}

/// The parsed form of an object-path string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    pub namespace: String,
    pub class_name: String,
    pub key_bindings: Vec<CimKeyBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    KeyNameBegin,
    KeyName,
    ValueBegin,
    TypedValue,
    TypedValueEnd,
    Quoted,
    QuotedEscape,
    QuotedEnd,
    Unquoted,
}

fn is_name_char(c: char) -> bool {
    c == '_' || c == '-' || c.is_ascii_alphanumeric()
}

/// Parse a full object path: optional namespace prefix, class name and
/// key bindings.
pub fn parse_object_path(s: &str) -> Result<ParsedPath, PathError> {
    parse(s, State::Init)
}

/// Parse a bare `Key1=V1,Key2=V2` key-binding list.
pub fn parse_key_bindings(s: &str) -> Result<Vec<CimKeyBinding>, PathError> {
    parse(s, State::KeyNameBegin).map(|p| p.key_bindings)
}

/// Parse `Class.Key=V,...` into an instance name. A namespace prefix is
/// rejected here.
pub fn parse_instance_name(s: &str) -> Result<CimInstanceName, PathError> {
    let parsed = parse(s, State::Init)?;
    if !parsed.namespace.is_empty() {
        return Err(PathError::UnexpectedNamespace { input: s.into() });
    }
    Ok(instance_name_from(parsed))
}

/// Parse `ns1/ns2:Class.Key=V,...` into a local instance path.
pub fn parse_local_instance_path(s: &str) -> Result<CimLocalInstancePath, PathError> {
    let parsed = parse(s, State::Init)?;
    let namespace_path = CimLocalNamespacePath::from_namespace(&parsed.namespace);
    Ok(CimLocalInstancePath {
        namespace_path,
        instance_name: instance_name_from(parsed),
    })
}

/// Split a namespace string into its segments, treating `\` as `/`.
pub fn split_namespaces(namespace: &str) -> Vec<String> {
    namespace
        .replace('\\', "/")
        .split('/')
        .map(str::to_string)
        .collect()
}

fn instance_name_from(parsed: ParsedPath) -> CimInstanceName {
    let keys = if parsed.key_bindings.is_empty() {
        CimInstanceKeys::None
    } else {
        CimInstanceKeys::Bindings(parsed.key_bindings)
    };
    CimInstanceName {
        class_name: parsed.class_name,
        keys,
    }
}

fn head_split(s: &str, end: usize, slash: Option<usize>, colon: Option<usize>) -> (String, String) {
    if let Some(c) = colon {
        return (s[..c].to_string(), s[c + 1..end].to_string());
    }
    match slash {
        Some(l) => (s[..l].to_string(), s[l + 1..end].to_string()),
        None => (String::new(), s[..end].to_string()),
    }
}

fn parse(s: &str, entry: State) -> Result<ParsedPath, PathError> {
    let mut state = entry;
    let mut buf = String::new();
    let mut key_name = String::new();
    let mut key_type = String::new();
    let mut bindings: Vec<CimKeyBinding> = Vec::new();
    let mut namespace = String::new();
    let mut class_name = String::new();
    let mut last_slash: Option<usize> = None;
    let mut colon: Option<usize> = None;

    fn push_binding(
        bindings: &mut Vec<CimKeyBinding>,
        name: &mut String,
        typ: &mut String,
        value: &mut String,
    ) {
        let cim_type = if typ.is_empty() {
            None
        } else {
            Some(std::mem::take(typ))
        };
        bindings.push(CimKeyBinding {
            name: std::mem::take(name),
            value: crate::model::naming::CimKeyBindingValue::Value(CimKeyValue {
                value_type: None,
                cim_type,
                value: std::mem::take(value),
            }),
        });
    }

    for (idx, c) in s.char_indices() {
        match state {
            State::Init => {
                if is_name_char(c) {
                    continue;
                }
                match c {
                    '/' => last_slash = Some(idx),
                    ':' if colon.is_none() => colon = Some(idx),
                    '.' => {
                        let (ns, class) = head_split(s, idx, last_slash, colon);
                        namespace = ns;
                        class_name = class;
                        state = State::KeyNameBegin;
                    }
                    _ => {
                        return Err(PathError::InvalidClassPath {
                            input: s.into(),
                            at: idx,
                        })
                    }
                }
            }
            State::KeyNameBegin | State::KeyName => {
                if state == State::KeyNameBegin {
                    if c == ',' {
                        return Err(PathError::InvalidKeyName {
                            input: s.into(),
                            at: idx,
                        });
                    }
                    buf.clear();
                    key_type.clear();
                    state = State::KeyName;
                }
                if is_name_char(c) {
                    buf.push(c);
                } else if c == '=' {
                    key_name = std::mem::take(&mut buf);
                    state = State::ValueBegin;
                } else {
                    return Err(PathError::InvalidKeyName {
                        input: s.into(),
                        at: idx,
                    });
                }
            }
            State::ValueBegin => match c {
                '"' => state = State::Quoted,
                '(' => state = State::TypedValue,
                c if is_name_char(c) => {
                    buf.push(c);
                    state = State::Unquoted;
                }
                _ => {
                    return Err(PathError::InvalidKeyValue {
                        input: s.into(),
                        at: idx,
                    })
                }
            },
            State::TypedValue => {
                if c == ')' {
                    key_type = std::mem::take(&mut buf);
                    state = State::TypedValueEnd;
                } else {
                    buf.push(c);
                }
            }
            State::TypedValueEnd => {
                if c == '"' {
                    state = State::Quoted;
                } else if is_name_char(c) {
                    buf.push(c);
                    state = State::Unquoted;
                } else {
                    return Err(PathError::InvalidKeyValue {
                        input: s.into(),
                        at: idx,
                    });
                }
            }
            State::Quoted => match c {
                '"' => {
                    push_binding(&mut bindings, &mut key_name, &mut key_type, &mut buf);
                    state = State::QuotedEnd;
                }
                '\'' => state = State::QuotedEscape,
                _ => buf.push(c),
            },
            State::QuotedEscape => {
                if c == '"' || c == '\'' {
                    buf.push(c);
                    state = State::Quoted;
                } else {
                    return Err(PathError::InvalidEscape {
                        input: s.into(),
                        at: idx,
                    });
                }
            }
            State::QuotedEnd => {
                if c == ',' {
                    state = State::KeyNameBegin;
                } else {
                    return Err(PathError::InvalidKeyValue {
                        input: s.into(),
                        at: idx,
                    });
                }
            }
            State::Unquoted => {
                if c == ',' {
                    push_binding(&mut bindings, &mut key_name, &mut key_type, &mut buf);
                    state = State::KeyNameBegin;
                } else if is_name_char(c) {
                    buf.push(c);
                } else {
                    return Err(PathError::InvalidKeyValue {
                        input: s.into(),
                        at: idx,
                    });
                }
            }
        }
    }

    match state {
        State::Init => {
            let (ns, class) = head_split(s, s.len(), last_slash, colon);
            namespace = ns;
            class_name = class;
        }
        // A trailing `,` after a complete binding promises another one.
        State::KeyNameBegin => {
            if !bindings.is_empty() {
                return Err(PathError::MissingValue { input: s.into() });
            }
        }
        State::KeyName | State::ValueBegin | State::TypedValue | State::TypedValueEnd => {
            return Err(PathError::MissingValue { input: s.into() });
        }
        State::Quoted | State::QuotedEscape => {
            return Err(PathError::UnterminatedQuote { input: s.into() });
        }
        State::Unquoted => push_binding(&mut bindings, &mut key_name, &mut key_type, &mut buf),
        State::QuotedEnd => {}
    }

    Ok(ParsedPath {
        namespace,
        class_name,
        key_bindings: bindings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::naming::CimKeyBindingValue;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    fn key_value(binding: &CimKeyBinding) -> &CimKeyValue {
        match &binding.value {
            CimKeyBindingValue::Value(kv) => kv,
            CimKeyBindingValue::Reference(_) => panic!("unexpected reference binding"),
        }
    }

    #[test]
    fn class_only() {
        let parsed = parse_object_path("CIM_ComputerSystem").unwrap();
        assert_eq!(parsed.namespace, "");
        assert_eq!(parsed.class_name, "CIM_ComputerSystem");
        assert!(parsed.key_bindings.is_empty());
    }

    #[test]
    fn class_with_trailing_dot_has_no_bindings() {
        let parsed = parse_object_path("CIM_ComputerSystem.").unwrap();
        assert_eq!(parsed.class_name, "CIM_ComputerSystem");
        assert!(parsed.key_bindings.is_empty());
    }

    #[test]
    fn namespace_with_slashes() {
        let parsed = parse_object_path("root/cimv2/CIM_Process.Handle=\"42\"").unwrap();
        assert_eq!(parsed.namespace, "root/cimv2");
        assert_eq!(parsed.class_name, "CIM_Process");
        assert_eq!(parsed.key_bindings.len(), 1);
    }

    #[test]
    fn namespace_with_colon() {
        let parsed = parse_object_path("root/cimv2:CIM_Process.Handle=\"42\"").unwrap();
        assert_eq!(parsed.namespace, "root/cimv2");
        assert_eq!(parsed.class_name, "CIM_Process");
        let kv = key_value(&parsed.key_bindings[0]);
        assert_eq!(kv.value, "42");
        assert_eq!(kv.cim_type, None);
    }

    #[test]
    fn keyless_namespace_path() {
        let parsed = parse_object_path("root/cimv2/CIM_Process").unwrap();
        assert_eq!(parsed.namespace, "root/cimv2");
        assert_eq!(parsed.class_name, "CIM_Process");
    }

    #[test]
    fn typed_and_quoted_values() {
        let parsed = parse_object_path("Test_Class.K1=(uint32)3,K2=\"x\",K3=abc").unwrap();
        assert_eq!(parsed.key_bindings.len(), 3);

        let k1 = key_value(&parsed.key_bindings[0]);
        assert_eq!(k1.cim_type.as_deref(), Some("uint32"));
        assert_eq!(k1.value, "3");

        let k2 = key_value(&parsed.key_bindings[1]);
        assert_eq!(k2.cim_type, None);
        assert_eq!(k2.value, "x");

        let k3 = key_value(&parsed.key_bindings[2]);
        assert_eq!(k3.value, "abc");
    }

    #[test]
    fn typed_quoted_value() {
        let parsed = parse_object_path("Test_Class.K=(string)\"a b\"").unwrap();
        let kv = key_value(&parsed.key_bindings[0]);
        assert_eq!(kv.cim_type.as_deref(), Some("string"));
        assert_eq!(kv.value, "a b");
    }

    #[test]
    fn escaped_quotes_in_value() {
        let parsed = parse_object_path("Test_Class.K=\"a''b\"").unwrap();
        assert_eq!(key_value(&parsed.key_bindings[0]).value, "a'b");

        let parsed = parse_object_path("Test_Class.K=\"say '\"hi'\"\"").unwrap();
        assert_eq!(key_value(&parsed.key_bindings[0]).value, "say \"hi\"");
    }

    #[test]
    fn parse_key_bindings_only() {
        let bindings = parse_key_bindings("A=\"1\",B=(sint16)-5").unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name, "A");
        assert_eq!(key_value(&bindings[1]).value, "-5");
        assert!(parse_key_bindings("").unwrap().is_empty());
    }

    #[test]
    fn parse_instance_name_rejects_namespace() {
        assert!(parse_instance_name("CIM_Process.Handle=\"42\"").is_ok());
        assert_eq!(
            parse_instance_name("root/cimv2:CIM_Process.Handle=\"42\""),
            Err(PathError::UnexpectedNamespace {
                input: "root/cimv2:CIM_Process.Handle=\"42\"".into()
            })
        );
    }

    #[test]
    fn parse_local_instance_path_splits_namespace() {
        let path = parse_local_instance_path("root/cimv2:CIM_Process.Handle=\"42\"").unwrap();
        assert_eq!(path.namespace_path.to_string(), "root/cimv2");
        assert_eq!(path.instance_name.class_name, "CIM_Process");
    }

    #[test_case("Class.K=" ; "value missing after equals")]
    #[test_case("Class.K" ; "input ends mid key name")]
    #[test_case("Class.K=(uint32" ; "input ends mid type tag")]
    #[test_case("Class.K=(uint32)" ; "input ends after type tag")]
    #[test_case("Class.K=\"v\"," ; "trailing comma")]
    fn missing_value_errors(input: &str) {
        assert_eq!(
            parse_object_path(input),
            Err(PathError::MissingValue {
                input: input.into()
            })
        );
    }

    #[test_case("Class.K=\"unterminated" ; "plain unterminated quote")]
    #[test_case("Class.K=\"ends in escape'" ; "ends inside escape")]
    fn unterminated_quote_errors(input: &str) {
        assert_eq!(
            parse_object_path(input),
            Err(PathError::UnterminatedQuote {
                input: input.into()
            })
        );
    }

    #[test]
    fn error_positions_point_at_the_offending_character() {
        assert_eq!(
            parse_object_path("Cl@ss"),
            Err(PathError::InvalidClassPath {
                input: "Cl@ss".into(),
                at: 2
            })
        );
        assert_eq!(
            parse_object_path("Class.K='x"),
            Err(PathError::InvalidKeyValue {
                input: "Class.K='x".into(),
                at: 8
            })
        );
        assert_eq!(
            parse_object_path("Class.K=\"a'x\""),
            Err(PathError::InvalidEscape {
                input: "Class.K=\"a'x\"".into(),
                at: 11
            })
        );
        assert_eq!(
            parse_object_path("Class.,"),
            Err(PathError::InvalidKeyName {
                input: "Class.,".into(),
                at: 6
            })
        );
        assert_eq!(
            parse_object_path("Class.K=\"v\"x"),
            Err(PathError::InvalidKeyValue {
                input: "Class.K=\"v\"x".into(),
                at: 11
            })
        );
    }

    #[test]
    fn split_namespaces_handles_backslashes() {
        assert_eq!(split_namespaces("root/cimv2"), vec!["root", "cimv2"]);
        assert_eq!(split_namespaces("root\\cimv2"), vec!["root", "cimv2"]);
    }

    #[test_case("Class.Key=\"v\"" ; "no namespace")]
    #[test_case("a/b:Class.Key=\"v\"" ; "with namespace")]
    #[test_case("Class.K1=(uint32)3,K2=\"x\"" ; "typed and quoted keys")]
    #[test_case("Class.K=\"a''b\"" ; "escaped quote")]
    fn parse_then_render_is_identity(input: &str) {
        let parsed = parse_object_path(input).unwrap();
        let rendered = parse_local_instance_path(input).unwrap().to_string();
        let reparsed = parse_object_path(rendered.trim_start_matches(':')).unwrap();
        assert_eq!(parsed, reparsed);
    }

    fn name_token() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,11}"
    }

    fn generated_binding() -> impl Strategy<Value = CimKeyBinding> {
        let value = prop_oneof![
            // Untyped printable text, quotes included. Values that look
            // numeric render bare, so they round-trip only when made of
            // name characters.
            "[ -~]{0,16}"
                .prop_filter("bare-rendered value must be a name token", |v| {
                    v.parse::<f64>().is_err() || v.chars().all(|c| is_name_char(c))
                })
                .prop_map(CimKeyValue::untyped),
            // Typed numeric literals; only name characters may follow a
            // type tag, and `(string)` renders quoted and cannot recover
            // its tag on re-parse.
            ("(uint8|uint32|sint16|real64)", "[0-9]{1,6}")
                .prop_map(|(t, v)| CimKeyValue::typed(t, v)),
        ];
        (name_token(), value).prop_map(|(name, kv)| CimKeyBinding::new(name, kv))
    }

    proptest! {
        #[test]
        fn rendered_instance_names_reparse(
            class in name_token(),
            bindings in proptest::collection::vec(generated_binding(), 1..4),
        ) {
            let name = CimInstanceName::with_bindings(class, bindings);
            let rendered = name.to_string();
            let reparsed = parse_instance_name(&rendered).unwrap();
            prop_assert_eq!(name, reparsed);
        }
    }
}
