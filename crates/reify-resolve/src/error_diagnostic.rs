//! Conversion from ResolveError to Diagnostic.

use crate::error::{ResolveError, UnresolvableReason, UnsupportedReason};
use reify_diagnostics::{Diagnostic, UNRESOLVABLE_TYPE_VARIABLE, UNSUPPORTED_TYPE_EXPRESSION};

impl ResolveError {
    /// The stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::UnsupportedTypeExpression { .. } => UNSUPPORTED_TYPE_EXPRESSION,
            ResolveError::UnresolvableTypeVariable { .. } => UNRESOLVABLE_TYPE_VARIABLE,
        }
    }

    /// Convert this error into a Diagnostic with notes and fix hints.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnsupportedTypeExpression { shape, reason } => {
                let diag = Diagnostic::error(self.code(), "unsupported type expression")
                    .with_subject(shape.clone())
                    .with_child(Diagnostic::note(reason.to_string()));

                match reason {
                    UnsupportedReason::Wildcard | UnsupportedReason::Intersection => diag.with_child(
                        Diagnostic::help("declare the member with a concrete type or a type parameter"),
                    ),
                    UnsupportedReason::DeclaringContext => diag.with_child(Diagnostic::help(
                        "pass the type that declares the member, not an array of it",
                    )),
                    UnsupportedReason::HierarchyTooDeep => diag.with_child(Diagnostic::help(
                        "raise `max_hierarchy_depth` in the resolver configuration",
                    )),
                    UnsupportedReason::NotAnArray | UnsupportedReason::NoRawType => diag,
                }
            }

            ResolveError::UnresolvableTypeVariable {
                variable,
                owner,
                index,
                context,
                reason,
            } => {
                let diag = Diagnostic::error(
                    self.code(),
                    format!("cannot resolve type variable `{}`", variable),
                )
                .with_subject(context.clone())
                .with_child(Diagnostic::note(format!(
                    "`{}` is parameter #{} of `{}`",
                    variable, index, owner
                )))
                .with_child(Diagnostic::note(reason.to_string()));

                match reason {
                    UnresolvableReason::ContextNotParameterized
                    | UnresolvableReason::OwnerNotInHierarchy => diag.with_child(Diagnostic::help(
                        format!("resolve against an instantiated `{}<...>`", owner),
                    )),
                    UnresolvableReason::ArgumentMissing => diag.with_child(Diagnostic::help(format!(
                        "the context must supply every type argument of `{}`",
                        owner
                    ))),
                    UnresolvableReason::EscapedVariable => diag.with_child(Diagnostic::help(
                        "bind the outer type parameter before resolving",
                    )),
                    UnresolvableReason::FormalNotDeclared => diag,
                }
            }
        }
    }
}
