//! Resolution errors.
//!
//! Both kinds signal an inconsistency between a declared type and the
//! context it is resolved against. Neither is recoverable by retrying.

use reify_types::{TypeExpr, TypeName, TypeVariable};
use smol_str::SmolStr;
use std::fmt;
use thiserror::Error;

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why a shape was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedReason {
    /// A wildcard such as `? extends Number`, at any depth.
    Wildcard,
    /// An intersection such as `Comparable & Serializable`.
    Intersection,
    /// The declaring context is an array or a bare type variable.
    DeclaringContext,
    /// The array factory was given a non-array expression.
    NotAnArray,
    /// The expression has no raw type to build an array from.
    NoRawType,
    /// The supertype hierarchy of a context is deeper than the configured limit.
    HierarchyTooDeep,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnsupportedReason::Wildcard => "wildcard types cannot be resolved",
            UnsupportedReason::Intersection => "intersection types cannot be resolved",
            UnsupportedReason::DeclaringContext => {
                "a declaring context must be a class or a parameterized type"
            }
            UnsupportedReason::NotAnArray => "expected an array type",
            UnsupportedReason::NoRawType => "the type has no raw type",
            UnsupportedReason::HierarchyTooDeep => {
                "the supertype hierarchy is deeper than the configured limit"
            }
        };
        f.write_str(text)
    }
}

/// Why a type variable could not be matched to a bound argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvableReason {
    /// The instance of the owner carries no type arguments.
    ContextNotParameterized,
    /// Neither the context nor any of its supertypes is an instance of the owner.
    OwnerNotInHierarchy,
    /// The owner's formal parameter list does not contain the variable.
    FormalNotDeclared,
    /// The instance has no argument at the variable's position.
    ArgumentMissing,
    /// The substituted type still mentions a type variable.
    EscapedVariable,
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnresolvableReason::ContextNotParameterized => "the context has no type arguments",
            UnresolvableReason::OwnerNotInHierarchy => {
                "the context is not an instance of the declaring type"
            }
            UnresolvableReason::FormalNotDeclared => "type variable not found in declaring type",
            UnresolvableReason::ArgumentMissing => "no type argument at the variable's position",
            UnresolvableReason::EscapedVariable => "the bound argument is itself unresolved",
        };
        f.write_str(text)
    }
}

/// Resolution error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Type `{shape}` is not a class, parameterized type, generic array or type variable: {reason}")]
    UnsupportedTypeExpression {
        shape: String,
        reason: UnsupportedReason,
    },

    #[error("Cannot resolve type variable `{variable}` of `{owner}` in `{context}`: {reason}")]
    UnresolvableTypeVariable {
        variable: SmolStr,
        owner: TypeName,
        index: usize,
        /// The context (or declaration) the variable was looked up in
        context: String,
        reason: UnresolvableReason,
    },
}

impl ResolveError {
    pub fn unsupported(shape: impl fmt::Display, reason: UnsupportedReason) -> Self {
        ResolveError::UnsupportedTypeExpression {
            shape: shape.to_string(),
            reason,
        }
    }

    pub fn unresolvable(
        variable: &TypeVariable,
        context: impl fmt::Display,
        reason: UnresolvableReason,
    ) -> Self {
        ResolveError::UnresolvableTypeVariable {
            variable: variable.name.clone(),
            owner: variable.owner.clone(),
            index: variable.index,
            context: context.to_string(),
            reason,
        }
    }

    /// Error for an expression whose element is a type variable nobody bound.
    pub(crate) fn escaped(expr: &TypeExpr, context: &TypeExpr) -> Self {
        match expr.first_variable() {
            Some(variable) => {
                Self::unresolvable(variable, context, UnresolvableReason::EscapedVariable)
            }
            None => Self::unsupported(expr, UnsupportedReason::NoRawType),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ResolveError::UnsupportedTypeExpression { .. })
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self, ResolveError::UnresolvableTypeVariable { .. })
    }
}
