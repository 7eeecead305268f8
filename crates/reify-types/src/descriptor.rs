//! Type descriptors handed to downstream consumers.
//!
//! A descriptor wraps an already-resolved [`TypeExpr`] together with its raw
//! type, so encoders can pick a strategy without re-walking the expression.

use crate::TypeExpr;
use std::fmt;

/// The resolved type of a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    actual: TypeExpr,
    raw: Option<TypeExpr>,
}

impl TypeDescriptor {
    pub fn new(actual: TypeExpr) -> Self {
        let raw = actual.raw_type();
        Self { actual, raw }
    }

    pub fn actual_type(&self) -> &TypeExpr {
        &self.actual
    }

    /// The erased type, or `None` when the actual type is still a type variable.
    pub fn raw_type(&self) -> Option<&TypeExpr> {
        self.raw.as_ref()
    }

    pub fn is_array(&self) -> bool {
        self.actual.is_array()
    }

    pub fn is_parameterized(&self) -> bool {
        self.actual.is_parameterized()
    }

    pub fn type_arguments(&self) -> &[TypeExpr] {
        self.actual.args()
    }

    pub fn into_type(self) -> TypeExpr {
        self.actual
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.actual)
    }
}

/// Descriptor for an array type.
///
/// Exposes the component one level down as well as the innermost element,
/// so `String[][]` has component `String[]` and element `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayDescriptor {
    descriptor: TypeDescriptor,
    component: TypeExpr,
}

impl ArrayDescriptor {
    /// Wrap an array expression. Returns `None` for any other shape.
    pub fn new(array: TypeExpr) -> Option<Self> {
        let component = array.component()?.clone();
        Some(Self {
            descriptor: TypeDescriptor::new(array),
            component,
        })
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn array_type(&self) -> &TypeExpr {
        self.descriptor.actual_type()
    }

    /// The component one level down.
    pub fn component_type(&self) -> &TypeExpr {
        &self.component
    }

    /// The innermost non-array component.
    pub fn element_type(&self) -> &TypeExpr {
        self.descriptor.actual_type().element_type()
    }

    pub fn element_raw_type(&self) -> Option<TypeExpr> {
        self.element_type().raw_type()
    }

    pub fn depth(&self) -> usize {
        self.descriptor.actual_type().array_depth()
    }
}

impl fmt::Display for ArrayDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor)
    }
}
