//! A named, typed slot of an object type.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::necessity::Necessity;
use crate::type_info::TypeInformation;

/// One property of an `object` type.
///
/// Equality and hashing look at `name` and `type` only. The annotation is
/// carried along (and serialized) but two properties that differ only in
/// their annotation are the same property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeProperty<T = TypeInformation> {
    name: String,
    #[serde(rename = "type")]
    ty: T,
    /// Framework marker such as `@Field`; never interpreted here.
    #[serde(default)]
    annotation: Option<String>,
}

impl<T: TypeDescriptor> TypeProperty<T> {
    pub fn new(name: impl Into<String>, ty: T) -> Self {
        Self { name: name.into(), ty, annotation: None }
    }

    pub fn annotated(name: impl Into<String>, ty: T, annotation: impl Into<String>) -> Self {
        Self { name: name.into(), ty, annotation: Some(annotation.into()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &T {
        &self.ty
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn necessity(&self) -> Necessity {
        Necessity::of(&self.ty)
    }

    /// Copy of `self` whose type is the descriptor's reference form.
    pub fn referenced_type(&self) -> Self {
        let ty = self.ty.as_reference();
        log::trace!("referenced property `{}`", self.name);
        Self { name: self.name.clone(), ty, annotation: self.annotation.clone() }
    }

    pub fn with_annotation(&self, annotation: Option<String>) -> Self {
        Self { name: self.name.clone(), ty: self.ty.clone(), annotation }
    }
}

impl<T: PartialEq> PartialEq for TypeProperty<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl<T: Eq> Eq for TypeProperty<T> {}

impl<T: Hash> Hash for TypeProperty<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ty.hash(state);
    }
}

// ------------------------------- Tests ------------------------------------ //
