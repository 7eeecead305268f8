//! Declared types: formal parameters, supertypes and members.
//!
//! The registry stands in for member introspection. It answers three
//! questions for the resolver:
//! - which formals a type declares, in declaration order
//! - how a context is seen as an instance of one of its supertypes
//! - which members a context has, including inherited ones

use crate::error::{ResolveError, ResolveResult, UnsupportedReason};
use crate::shape::{Member, TypeShape};
use indexmap::IndexMap;
use reify_types::{TypeExpr, TypeName, TypeVariable};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, warn};

/// Declaration of a (possibly generic) type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    name: TypeName,
    formals: Vec<TypeVariable>,
    supertypes: Vec<TypeExpr>,
    members: Vec<Member>,
}

impl TypeDecl {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            formals: Vec::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Declare the next formal type parameter.
    pub fn with_param(mut self, name: impl Into<SmolStr>) -> Self {
        let index = self.formals.len();
        self.formals.push(TypeVariable::new(self.name.clone(), name, index));
        self
    }

    /// Declare a supertype, written in terms of this type's formals,
    /// e.g. `Box<X>` for `class Sub<X> extends Box<X>`.
    pub fn with_supertype(mut self, supertype: TypeExpr) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_member(mut self, name: impl Into<SmolStr>, declared: impl Into<TypeShape>) -> Self {
        self.members.push(Member::new(self.name.clone(), name, declared));
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn formals(&self) -> &[TypeVariable] {
        &self.formals
    }

    /// The formal named `name` as a type expression, for writing member types.
    pub fn param(&self, name: &str) -> Option<TypeExpr> {
        self.formals
            .iter()
            .find(|formal| formal.name == name)
            .map(|formal| TypeExpr::Variable(formal.clone()))
    }

    pub fn supertypes(&self) -> &[TypeExpr] {
        &self.supertypes
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_generic(&self) -> bool {
        !self.formals.is_empty()
    }

    /// The supertypes of `instance`, an instance of this declaration.
    ///
    /// Arguments of `instance` are substituted into each supertype. An
    /// instance that does not bind every formal (a raw use of a generic type)
    /// has erased supertypes: each one is reduced to its raw type.
    pub fn supertype_instances(&self, instance: &TypeExpr) -> Vec<TypeExpr> {
        let args = instance.args();
        if args.len() < self.formals.len() {
            debug!(instance = %instance, "raw use of a generic type, supertypes erased");
            return self.supertypes.iter().filter_map(TypeExpr::raw_type).collect();
        }
        self.supertypes
            .iter()
            .map(|supertype| instantiate(supertype, &self.name, args))
            .collect()
    }
}

/// A member paired with the instance of the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMember<'d> {
    pub member: &'d Member,
    pub instance: TypeExpr,
}

/// Registry of type declarations, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TypeDeclarations {
    decls: IndexMap<TypeName, TypeDecl>,
}

impl TypeDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning the one it replaced.
    pub fn declare(&mut self, decl: TypeDecl) -> Option<TypeDecl> {
        self.decls.insert(decl.name.clone(), decl)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    pub fn formals(&self, name: &str) -> Option<&[TypeVariable]> {
        self.get(name).map(TypeDecl::formals)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.values()
    }

    /// View `context` as an instance of `owner`.
    ///
    /// Walks the declared supertypes breadth-first, substituting each
    /// candidate's arguments into its supertypes. Returns `None` when `owner`
    /// is not reachable within `max_depth` hops.
    ///
    /// A raw generic context only reaches raw supertypes (see
    /// [`TypeDecl::supertype_instances`]), so lifting never binds a variable
    /// to one of the context's own formals.
    pub fn instance_of(&self, context: &TypeExpr, owner: &TypeName, max_depth: usize) -> Option<TypeExpr> {
        let mut visited = FxHashSet::default();
        let mut frontier = vec![context.clone()];

        for _ in 0..=max_depth {
            let mut next = Vec::new();
            for candidate in frontier {
                let Some(base) = candidate.base_name() else {
                    continue;
                };
                if base == owner {
                    return Some(candidate);
                }
                if !visited.insert(base.clone()) {
                    continue;
                }
                if let Some(decl) = self.get(base.as_str()) {
                    next.extend(decl.supertype_instances(&candidate));
                }
            }
            next.retain(|candidate| candidate.base_name().is_some_and(|base| !visited.contains(base)));
            if next.is_empty() {
                return None;
            }
            frontier = next;
        }

        warn!(
            context = %context,
            owner = %owner,
            max_depth,
            "supertype walk hit the depth limit"
        );
        None
    }

    /// Members of `context` followed by inherited members, most-derived first.
    ///
    /// Each member comes with the instance of its declaring type, so
    /// inherited members can be resolved against their own type arguments.
    /// A hierarchy deeper than `max_depth` is an error rather than a
    /// truncated list.
    pub fn members_of(&self, context: &TypeExpr, max_depth: usize) -> ResolveResult<Vec<DeclaredMember<'_>>> {
        let mut members = Vec::new();
        let mut visited = FxHashSet::default();
        let mut frontier = vec![context.clone()];

        for _ in 0..=max_depth {
            let mut next = Vec::new();
            for candidate in frontier {
                let Some(base) = candidate.base_name() else {
                    continue;
                };
                if !visited.insert(base.clone()) {
                    continue;
                }
                let Some(decl) = self.get(base.as_str()) else {
                    debug!(ty = %base, "no declaration, members unknown");
                    continue;
                };
                members.extend(decl.members().iter().map(|member| DeclaredMember {
                    member,
                    instance: candidate.clone(),
                }));
                next.extend(decl.supertype_instances(&candidate));
            }
            next.retain(|candidate| match candidate.base_name() {
                Some(base) => !visited.contains(base) && self.get(base.as_str()).is_some(),
                None => false,
            });
            if next.is_empty() {
                return Ok(members);
            }
            frontier = next;
        }

        warn!(context = %context, max_depth, "member walk hit the depth limit");
        Err(ResolveError::unsupported(context, UnsupportedReason::HierarchyTooDeep))
    }
}

impl FromIterator<TypeDecl> for TypeDeclarations {
    fn from_iter<I: IntoIterator<Item = TypeDecl>>(iter: I) -> Self {
        let mut declarations = Self::new();
        declarations.extend(iter);
        declarations
    }
}

impl Extend<TypeDecl> for TypeDeclarations {
    fn extend<I: IntoIterator<Item = TypeDecl>>(&mut self, iter: I) {
        for decl in iter {
            self.declare(decl);
        }
    }
}

/// Replace every variable declared by `owner` with the argument at its index.
///
/// Unlike member resolution this substitutes at every depth, including inside
/// parameterized types: a supertype such as `Map<K, List<V>>` must come out
/// fully instantiated. Variables without an argument are kept.
fn instantiate(expr: &TypeExpr, owner: &TypeName, args: &[TypeExpr]) -> TypeExpr {
    match expr {
        TypeExpr::Raw(_) => expr.clone(),
        TypeExpr::Variable(variable) if &variable.owner == owner => {
            args.get(variable.index).cloned().unwrap_or_else(|| expr.clone())
        }
        TypeExpr::Variable(_) => expr.clone(),
        TypeExpr::ArrayOf(component) => TypeExpr::array_of(instantiate(component, owner, args)),
        TypeExpr::Parameterized {
            base,
            owner: enclosing,
            args: type_args,
        } => {
            let type_args = type_args.iter().map(|arg| instantiate(arg, owner, args));
            match enclosing {
                Some(enclosing) => {
                    TypeExpr::nested(instantiate(enclosing, owner, args), base, type_args)
                }
                None => TypeExpr::parameterized(base, type_args),
            }
        }
    }
}
