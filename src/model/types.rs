// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM intrinsic data types (DSP0004)

/// Scalar array-size marker: not an array.
pub const NON_ARRAY: i32 = 0;
/// Array-size marker: array with no declared bound.
pub const UNBOUNDED_ARRAY: i32 = -1;

/// The CIM primitive type tags.
///
/// `Invalid` stands in for any type name this client does not know;
/// protocol parsing is permissive and never fails on an unknown type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CimTypeCode {
    #[default]
    Invalid,
    Boolean,
    String,
    Char16,
    Uint8,
    Sint8,
    Uint16,
    Sint16,
    Uint32,
    Sint32,
    Uint64,
    Sint64,
    DateTime,
    Real32,
    Real64,
    Numeric,
    Reference,
}

impl CimTypeCode {
    /// Map a DSP0201 type name to its tag. Unknown names yield `Invalid`.
    pub fn parse(name: &str) -> Self {
        match name {
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "char16" => Self::Char16,
            "uint8" => Self::Uint8,
            "sint8" => Self::Sint8,
            "uint16" => Self::Uint16,
            "sint16" => Self::Sint16,
            "uint32" => Self::Uint32,
            "sint32" => Self::Sint32,
            "uint64" => Self::Uint64,
            "sint64" => Self::Sint64,
            "datetime" => Self::DateTime,
            "real32" => Self::Real32,
            "real64" => Self::Real64,
            "numeric" => Self::Numeric,
            "reference" => Self::Reference,
            _ => Self::Invalid,
        }
    }

    /// The DSP0201 type name, or an empty string for `Invalid`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Char16 => "char16",
            Self::Uint8 => "uint8",
            Self::Sint8 => "sint8",
            Self::Uint16 => "uint16",
            Self::Sint16 => "sint16",
            Self::Uint32 => "uint32",
            Self::Sint32 => "sint32",
            Self::Uint64 => "uint64",
            Self::Sint64 => "sint64",
            Self::DateTime => "datetime",
            Self::Real32 => "real32",
            Self::Real64 => "real64",
            Self::Numeric => "numeric",
            Self::Reference => "reference",
        }
    }
}

/// A CIM data type: primitive tag, array-size marker, and (for references)
/// the referenced class name.
///
/// The array-size marker follows the constants above: `0` is a scalar, a
/// negative size is an unbounded array, a positive size is a bounded array
/// holding at most that many elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CimType {
    code: CimTypeCode,
    array_size: i32,
    ref_class_name: String,
}

impl CimType {
    /// The invalid type. Decoding unknown type names lands here.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Create a scalar type from a DSP0201 type name. Never fails.
    pub fn create(name: &str) -> Self {
        Self {
            code: CimTypeCode::parse(name),
            array_size: NON_ARRAY,
            ref_class_name: String::new(),
        }
    }

    /// Create an array type from a DSP0201 type name and array-size marker.
    pub fn create_array(name: &str, array_size: i32) -> Self {
        Self {
            code: CimTypeCode::parse(name),
            array_size,
            ref_class_name: String::new(),
        }
    }

    /// Create a reference type pointing at `class_name`.
    pub fn create_reference(class_name: &str) -> Self {
        Self {
            code: CimTypeCode::Reference,
            array_size: NON_ARRAY,
            ref_class_name: class_name.to_string(),
        }
    }

    pub fn code(&self) -> CimTypeCode {
        self.code
    }

    /// The array-size marker (see `NON_ARRAY`/`UNBOUNDED_ARRAY`).
    pub fn array_size(&self) -> i32 {
        self.array_size
    }

    /// The referenced class name of a reference type; empty otherwise.
    pub fn class_name(&self) -> &str {
        &self.ref_class_name
    }

    pub fn is_array(&self) -> bool {
        self.array_size != NON_ARRAY
    }

    pub fn is_valid(&self) -> bool {
        self.code != CimTypeCode::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_known_and_unknown_names() {
        assert_eq!(CimType::create("uint32").code(), CimTypeCode::Uint32);
        assert_eq!(CimType::create("datetime").code(), CimTypeCode::DateTime);
        assert_eq!(CimType::create("").code(), CimTypeCode::Invalid);
        assert_eq!(CimType::create("uint128").code(), CimTypeCode::Invalid);
        assert!(!CimType::create("whatever").is_valid());
    }

    #[test]
    fn array_size_markers() {
        let scalar = CimType::create_array("uint8", NON_ARRAY);
        assert_eq!(scalar.array_size(), 0);
        assert!(!scalar.is_array());

        let unbounded = CimType::create_array("uint8", UNBOUNDED_ARRAY);
        assert_eq!(unbounded.array_size(), -1);
        assert!(unbounded.is_array());

        let bounded = CimType::create_array("uint8", 5);
        assert_eq!(bounded.array_size(), 5);
        assert!(bounded.is_array());
    }

    #[test]
    fn reference_type_carries_class_name() {
        let t = CimType::create_reference("CIM_ComputerSystem");
        assert_eq!(t.code(), CimTypeCode::Reference);
        assert_eq!(t.class_name(), "CIM_ComputerSystem");
        assert!(!t.is_array());
    }

    #[test]
    fn type_names_round_trip() {
        for name in [
            "boolean", "string", "char16", "uint8", "sint8", "uint16", "sint16", "uint32",
            "sint32", "uint64", "sint64", "datetime", "real32", "real64", "numeric", "reference",
        ] {
            assert_eq!(CimTypeCode::parse(name).as_str(), name);
        }
    }
}
