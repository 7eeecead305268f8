//! Resolver configuration.

/// What to do when a substituted argument still mentions a type variable.
///
/// Substitution is one hop: the argument bound in the context is returned as
/// is. If the caller built that context inside another generic scope, the
/// argument may itself be a variable of the outer scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnboundArgumentPolicy {
    /// Return the argument unchanged and leave the outer variable to the caller.
    #[default]
    PassThrough,
    /// Fail with `UnresolvableTypeVariable`.
    Reject,
}

/// Configuration for a [`crate::Resolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Handling of bound arguments that are not ground
    pub unbound_arguments: UnboundArgumentPolicy,

    /// Whether variables of a supertype may be resolved against a subtype
    /// context through the declaration registry
    pub follow_supertypes: bool,

    /// Maximum number of supertype hops, for variable lookup and member
    /// listing alike (default: 32)
    pub max_hierarchy_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unbound_arguments: UnboundArgumentPolicy::PassThrough,
            follow_supertypes: true,
            max_hierarchy_depth: 32,
        }
    }
}

impl ResolverConfig {
    /// Reject any result that still mentions a type variable.
    pub fn strict() -> Self {
        Self {
            unbound_arguments: UnboundArgumentPolicy::Reject,
            ..Default::default()
        }
    }

    /// Resolve only against the context itself, never its supertypes.
    pub fn single_hop() -> Self {
        Self {
            follow_supertypes: false,
            ..Default::default()
        }
    }

    /// Number of supertype hops a hierarchy walk may take.
    pub(crate) fn hierarchy_depth(&self) -> usize {
        if self.follow_supertypes {
            self.max_hierarchy_depth
        } else {
            0
        }
    }
}
