//! Recursive type descriptions.
//!
//! `TypeInformation` is the tree a property's `type` points at: scalars,
//! collections, optionals, named enums/objects, and references that stand in
//! for a named body.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::property::TypeProperty;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Null,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    String,
    Double,
    Float,
    Url,
    Uuid,
    Date,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(pub String);

/// Key a `reference` uses to point at a named enum or object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceKey(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumCase {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeInformation {
    Scalar(PrimitiveType),
    Repeated {
        element: Box<TypeInformation>,
    },
    Dictionary {
        key: PrimitiveType,
        value: Box<TypeInformation>,
    },
    Optional {
        #[serde(rename = "wrappedValue")]
        wrapped_value: Box<TypeInformation>,
    },
    Enum {
        name: TypeName,
        cases: Vec<EnumCase>,
    },
    Object {
        name: TypeName,
        properties: Vec<TypeProperty>,
    },
    Reference(ReferenceKey),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt => "uint",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::String => "string",
            Self::Double => "double",
            Self::Float => "float",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::Data => "data",
        }
    }
}

impl TypeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl ReferenceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TypeName> for ReferenceKey {
    fn from(name: &TypeName) -> Self {
        Self(name.0.clone())
    }
}

impl From<&str> for ReferenceKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ReferenceKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl EnumCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TypeInformation {
    pub fn scalar(primitive: PrimitiveType) -> Self {
        Self::Scalar(primitive)
    }

    pub fn repeated(element: TypeInformation) -> Self {
        Self::Repeated { element: Box::new(element) }
    }

    pub fn dictionary(key: PrimitiveType, value: TypeInformation) -> Self {
        Self::Dictionary { key, value: Box::new(value) }
    }

    /// Wraps `ty` as optional. Already-optional types are returned as is.
    pub fn optional(ty: TypeInformation) -> Self {
        if ty.is_optional() {
            return ty;
        }
        Self::Optional { wrapped_value: Box::new(ty) }
    }

    pub fn enumeration(name: impl Into<TypeName>, cases: Vec<EnumCase>) -> Self {
        Self::Enum { name: name.into(), cases }
    }

    pub fn object(name: impl Into<TypeName>, properties: Vec<TypeProperty>) -> Self {
        Self::Object { name: name.into(), properties }
    }

    pub fn reference(key: impl Into<ReferenceKey>) -> Self {
        Self::Reference(key.into())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum { .. })
    }

    /// Name of the enum/object this type is, or is built around.
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            Self::Enum { name, .. } | Self::Object { name, .. } => Some(name),
            Self::Repeated { element } => element.type_name(),
            Self::Dictionary { value, .. } => value.type_name(),
            Self::Optional { wrapped_value } => wrapped_value.type_name(),
            Self::Scalar(_) | Self::Reference(_) => None,
        }
    }

    pub fn reference_key(&self) -> Option<&ReferenceKey> {
        match self {
            Self::Reference(key) => Some(key),
            _ => None,
        }
    }

    /// Strips every `optional` layer.
    pub fn unwrapped(&self) -> &TypeInformation {
        match self {
            Self::Optional { wrapped_value } => wrapped_value.unwrapped(),
            other => other,
        }
    }

    pub fn object_properties(&self) -> &[TypeProperty] {
        match self {
            Self::Object { properties, .. } => properties,
            _ => &[],
        }
    }

    /// Named bodies become references; wrappers are rebuilt over the
    /// reference form of what they wrap; scalars and references stay.
    pub fn as_reference(&self) -> Self {
        match self {
            Self::Scalar(_) | Self::Reference(_) => self.clone(),
            Self::Repeated { element } => Self::repeated(element.as_reference()),
            Self::Dictionary { key, value } => Self::dictionary(*key, value.as_reference()),
            Self::Optional { wrapped_value } => Self::Optional {
                wrapped_value: Box::new(wrapped_value.as_reference()),
            },
            Self::Enum { name, .. } | Self::Object { name, .. } => Self::Reference(name.into()),
        }
    }

    /// For an object, the same object with every property switched to its
    /// referenced form. Other variants are returned unchanged.
    pub fn referenced_properties(&self) -> Self {
        match self {
            Self::Object { name, properties } => Self::Object {
                name: name.clone(),
                properties: properties.iter().map(TypeProperty::referenced_type).collect(),
            },
            other => other.clone(),
        }
    }

    /// Every object body reachable from here, first occurrence per name,
    /// in depth-first order.
    pub fn reachable_objects(&self) -> IndexMap<TypeName, &TypeInformation> {
        let mut out = IndexMap::new();
        self.collect_objects(&mut out);
        out
    }

    fn collect_objects<'a>(&'a self, out: &mut IndexMap<TypeName, &'a TypeInformation>) {
        match self {
            Self::Object { name, properties } => {
                if out.contains_key(name) {
                    return;
                }
                out.insert(name.clone(), self);
                for property in properties {
                    property.ty().collect_objects(out);
                }
            }
            Self::Repeated { element } => element.collect_objects(out),
            Self::Dictionary { value, .. } => value.collect_objects(out),
            Self::Optional { wrapped_value } => wrapped_value.collect_objects(out),
            Self::Scalar(_) | Self::Enum { .. } | Self::Reference(_) => {}
        }
    }
}

impl TypeDescriptor for TypeInformation {
    fn is_optional(&self) -> bool {
        TypeInformation::is_optional(self)
    }

    fn as_reference(&self) -> Self {
        TypeInformation::as_reference(self)
    }
}

/// Compact one-line rendering: `[T]`, `[K: V]`, `T?`, `#Key` for references.
impl fmt::Display for TypeInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(primitive) => f.write_str(primitive.as_str()),
            Self::Repeated { element } => write!(f, "[{element}]"),
            Self::Dictionary { key, value } => write!(f, "[{}: {value}]", key.as_str()),
            Self::Optional { wrapped_value } => write!(f, "{wrapped_value}?"),
            Self::Enum { name, .. } | Self::Object { name, .. } => f.write_str(name.as_str()),
            Self::Reference(key) => write!(f, "#{}", key.as_str()),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
