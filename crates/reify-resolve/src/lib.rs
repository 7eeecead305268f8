//! Reify Resolver
//!
//! Computes the actual type of a structure member whose declared type
//! mentions type parameters, given the instantiated type of the structure.
//!
//! ```rust
//! use reify_resolve::{resolve_member_type, TypeExpr};
//!
//! // class Box<T> { T value; }  seen as Box<String>
//! let context = TypeExpr::parameterized("Box", [TypeExpr::raw("String")]);
//! let declared = TypeExpr::variable("Box", "T", 0);
//!
//! assert_eq!(resolve_member_type(&declared, &context)?, TypeExpr::raw("String"));
//! # Ok::<(), reify_resolve::ResolveError>(())
//! ```
//!
//! ## Pieces
//!
//! - [`TypeShape`] and [`Member`]: what member introspection reports
//! - [`TypeDeclarations`]: formals, supertypes and members of declared types
//! - [`Resolver`]: the substitution itself, configured by [`ResolverConfig`]
//! - [`type_descriptor_for_member`] and [`array_descriptor`]: descriptor factories
//!
//! Every operation is a pure function of its inputs, so a `Resolver` can be
//! shared between threads. Failures are [`ResolveError`]s; call
//! [`ResolveError::to_diagnostic`] to report them.

mod config;
mod declarations;
mod error;
mod error_diagnostic;
mod factory;
mod resolver;
mod shape;

pub use config::{ResolverConfig, UnboundArgumentPolicy};
pub use declarations::{DeclaredMember, TypeDecl, TypeDeclarations};
pub use error::{ResolveError, ResolveResult, UnresolvableReason, UnsupportedReason};
pub use factory::{array_descriptor, type_descriptor_for_member, ResolvedMember};
pub use resolver::{index_of_formal_parameter, resolve_member_type, Resolver};
pub use shape::{Member, TypeShape};

pub use reify_types::{ArrayDescriptor, TypeDescriptor, TypeExpr, TypeName, TypeVariable};
