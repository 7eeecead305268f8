//! Substitution of type variables in member types.
//!
//! ## Algorithm
//!
//! `resolve_type(expr, context)` walks the declared type of a member:
//!
//! 1. **Raw**: returned unchanged.
//! 2. **ArrayOf**: the component is resolved. An unchanged component keeps
//!    the original array (nesting included); a substituted one yields an
//!    array of the substituted component's *raw* type, so `T[]` with
//!    `T = List<String>` becomes `List[]`.
//! 3. **Variable**: replaced by the argument bound at its position in the
//!    instance of its owner. The argument is not resolved again.
//! 4. **Parameterized**: returned unchanged.
//!
//! Results borrow from the inputs (`Cow::Borrowed`) whenever nothing was
//! substituted.

use crate::config::{ResolverConfig, UnboundArgumentPolicy};
use crate::declarations::TypeDeclarations;
use crate::error::{ResolveError, ResolveResult, UnresolvableReason};
use reify_types::{TypeExpr, TypeVariable};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};

/// Resolves member types against declaring contexts.
///
/// Without a declaration registry every variable must belong to the
/// context's own type, and its position is taken from the variable itself.
/// With one, formals are looked up by owner and supertypes can be followed.
#[derive(Debug, Clone, Default)]
pub struct Resolver<'d> {
    config: ResolverConfig,
    declarations: Option<&'d TypeDeclarations>,
}

impl<'d> Resolver<'d> {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            declarations: None,
        }
    }

    pub fn with_declarations(mut self, declarations: &'d TypeDeclarations) -> Self {
        self.declarations = Some(declarations);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn declarations(&self) -> Option<&'d TypeDeclarations> {
        self.declarations
    }

    /// Resolve `declared` against `context`, returning an owned expression.
    pub fn resolve_member_type(&self, declared: &TypeExpr, context: &TypeExpr) -> ResolveResult<TypeExpr> {
        self.resolve_type(declared, context).map(Cow::into_owned)
    }

    pub fn resolve_type<'a>(
        &self,
        expr: &'a TypeExpr,
        context: &'a TypeExpr,
    ) -> ResolveResult<Cow<'a, TypeExpr>> {
        match expr {
            TypeExpr::Raw(_) | TypeExpr::Parameterized { .. } => Ok(Cow::Borrowed(expr)),
            TypeExpr::ArrayOf(component) => {
                let resolved = self.resolve_type(component, context)?;
                if *resolved == **component {
                    return Ok(Cow::Borrowed(expr));
                }
                let Some(raw) = resolved.raw_type() else {
                    return Err(ResolveError::escaped(&resolved, context));
                };
                let array = TypeExpr::array_of(raw);
                trace!(declared = %expr, resolved = %array, "substituted array component");
                Ok(Cow::Owned(array))
            }
            TypeExpr::Variable(variable) => self.resolve_variable(variable, context),
        }
    }

    fn resolve_variable<'a>(
        &self,
        variable: &TypeVariable,
        context: &'a TypeExpr,
    ) -> ResolveResult<Cow<'a, TypeExpr>> {
        let instance = self.instance_of(variable, context)?;
        if !instance.is_parameterized() {
            return Err(ResolveError::unresolvable(
                variable,
                context,
                UnresolvableReason::ContextNotParameterized,
            ));
        }

        let index = match self.declarations.and_then(|d| d.formals(variable.owner.as_str())) {
            Some(formals) => index_of_formal_parameter(formals, variable)?,
            None => variable.index,
        };

        let bound = match instance {
            Cow::Borrowed(instance) => instance.args().get(index).map(Cow::Borrowed),
            Cow::Owned(instance) => instance.args().get(index).cloned().map(Cow::Owned),
        };
        let Some(bound) = bound else {
            return Err(ResolveError::unresolvable(
                variable,
                context,
                UnresolvableReason::ArgumentMissing,
            ));
        };

        if bound.contains_variables() {
            match self.config.unbound_arguments {
                UnboundArgumentPolicy::Reject => {
                    return Err(ResolveError::escaped(&bound, context));
                }
                UnboundArgumentPolicy::PassThrough => {
                    debug!(variable = %variable, bound = %bound, "bound argument is not ground");
                }
            }
        }

        trace!(variable = %variable, owner = %variable.owner, bound = %bound, "substituted type variable");
        Ok(bound)
    }

    /// The instance of the variable's owner: the context itself, or one of
    /// its supertypes when a registry is attached.
    fn instance_of<'a>(
        &self,
        variable: &TypeVariable,
        context: &'a TypeExpr,
    ) -> ResolveResult<Cow<'a, TypeExpr>> {
        match context {
            TypeExpr::Raw(base) | TypeExpr::Parameterized { base, .. } if *base == variable.owner => {
                return Ok(Cow::Borrowed(context));
            }
            TypeExpr::ArrayOf(_) | TypeExpr::Variable(_) => {
                return Err(ResolveError::unresolvable(
                    variable,
                    context,
                    UnresolvableReason::ContextNotParameterized,
                ));
            }
            _ => {}
        }

        let depth = self.config.hierarchy_depth();
        if depth > 0 {
            if let Some(lifted) = self
                .declarations
                .and_then(|d| d.instance_of(context, &variable.owner, depth))
            {
                debug!(context = %context, instance = %lifted, "resolving through supertype");
                return Ok(Cow::Owned(lifted));
            }
        }

        Err(ResolveError::unresolvable(
            variable,
            context,
            UnresolvableReason::OwnerNotInHierarchy,
        ))
    }
}

/// Position of `variable` in its owner's formal parameter list.
///
/// A variable only exists because its owner declares it, so a miss means
/// the variable and the declaration are out of sync.
pub fn index_of_formal_parameter(formals: &[TypeVariable], variable: &TypeVariable) -> ResolveResult<usize> {
    formals
        .iter()
        .position(|formal| formal == variable)
        .ok_or_else(|| {
            ResolveError::unresolvable(
                variable,
                FormalList(&variable.owner, formals),
                UnresolvableReason::FormalNotDeclared,
            )
        })
}

/// Renders a declaration head such as `Pair<K, V>`.
struct FormalList<'a>(&'a reify_types::TypeName, &'a [TypeVariable]);

impl fmt::Display for FormalList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        if !self.1.is_empty() {
            write!(f, "<")?;
            for (i, formal) in self.1.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", formal)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Resolve a member type with the default resolver and no registry.
pub fn resolve_member_type(declared: &TypeExpr, context: &TypeExpr) -> ResolveResult<TypeExpr> {
    Resolver::default().resolve_member_type(declared, context)
}
