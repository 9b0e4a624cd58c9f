use std::hash::Hash;

/// What a property needs from the type it is declared with.
///
/// [`crate::type_info::TypeInformation`] is the implementation used
/// throughout this crate; anything else with the same two queries and
/// structural equality can stand in for it.
pub trait TypeDescriptor: Clone + Eq + Hash {
    /// Whether values of this type may be absent.
    fn is_optional(&self) -> bool;

    /// A compact stand-in for this descriptor that does not embed full type bodies.
    fn as_reference(&self) -> Self;
}
