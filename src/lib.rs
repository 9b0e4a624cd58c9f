//! Typed properties of object type descriptions.
//!
//! A [`TypeProperty`] names one slot of an `object` [`TypeInformation`]; its
//! [`Necessity`] is always derived from the slot's type.

pub mod descriptor;
pub mod error;
pub mod necessity;
pub mod path_de;
pub mod property;
pub mod type_info;

pub use descriptor::TypeDescriptor;
pub use error::{DecodeError, DecodeResult};
pub use necessity::Necessity;
pub use property::TypeProperty;
pub use type_info::{EnumCase, PrimitiveType, ReferenceKey, TypeInformation, TypeName};
