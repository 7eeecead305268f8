//! Descriptor construction for members and arrays.

use crate::error::{ResolveError, ResolveResult, UnsupportedReason};
use crate::resolver::Resolver;
use crate::shape::Member;
use reify_types::{ArrayDescriptor, TypeDescriptor, TypeExpr, TypeName};
use smol_str::SmolStr;
use tracing::debug;

/// A member together with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: SmolStr,
    pub declaring_type: TypeName,
    pub descriptor: TypeDescriptor,
}

impl Resolver<'_> {
    /// Resolve the declared type of `member` against `context`, the
    /// instantiated type whose member is being inspected.
    pub fn type_descriptor_for_member(
        &self,
        member: &Member,
        context: &TypeExpr,
    ) -> ResolveResult<TypeDescriptor> {
        let declared = member.declared.to_type_expr()?;
        let Some(context_type) = context.base_name() else {
            return Err(ResolveError::unsupported(
                context,
                UnsupportedReason::DeclaringContext,
            ));
        };
        if *context_type != member.declaring_type {
            debug!(member = %member, context = %context, "member is inherited");
        }

        let resolved = self.resolve_type(&declared, context)?.into_owned();
        Ok(TypeDescriptor::new(resolved))
    }

    /// Resolve every member of `context`, inherited ones included.
    ///
    /// Needs a declaration registry; without one there are no members to list.
    /// Inherited members are listed even when `follow_supertypes` is off,
    /// since each one is resolved against its own declaring instance.
    pub fn resolve_members(&self, context: &TypeExpr) -> ResolveResult<Vec<ResolvedMember>> {
        let Some(declarations) = self.declarations() else {
            debug!(context = %context, "no declarations attached, no members resolved");
            return Ok(Vec::new());
        };

        declarations
            .members_of(context, self.config().max_hierarchy_depth)?
            .into_iter()
            .map(|declared| -> ResolveResult<ResolvedMember> {
                let descriptor = self.type_descriptor_for_member(declared.member, &declared.instance)?;
                Ok(ResolvedMember {
                    name: declared.member.name.clone(),
                    declaring_type: declared.member.declaring_type.clone(),
                    descriptor,
                })
            })
            .collect()
    }
}

/// Resolve a member type with the default resolver and no registry.
pub fn type_descriptor_for_member(member: &Member, context: &TypeExpr) -> ResolveResult<TypeDescriptor> {
    Resolver::default().type_descriptor_for_member(member, context)
}

/// Wrap an array expression without resolving it.
pub fn array_descriptor(ty: &TypeExpr) -> ResolveResult<ArrayDescriptor> {
    ArrayDescriptor::new(ty.clone())
        .ok_or_else(|| ResolveError::unsupported(ty, UnsupportedReason::NotAnArray))
}
