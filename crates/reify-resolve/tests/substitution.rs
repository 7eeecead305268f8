//! Tests for member type substitution
//!
//! This module tests that:
//! 1. Raw and parameterized member types pass through untouched
//! 2. Type variables resolve to the argument bound at their own position
//! 3. Arrays of type variables become arrays of the bound raw type
//! 4. Mismatched contexts and unsupported shapes fail fast

use pretty_assertions::assert_eq;
use reify_resolve::{
    array_descriptor, resolve_member_type, type_descriptor_for_member, Member, ResolveError,
    Resolver, ResolverConfig, TypeExpr, TypeShape, UnresolvableReason, UnsupportedReason,
};

// =========================================================================
// Helper functions
// =========================================================================

fn raw(name: &str) -> TypeExpr {
    TypeExpr::raw(name)
}

fn instance(base: &str, args: &[TypeExpr]) -> TypeExpr {
    TypeExpr::parameterized(base, args.to_vec())
}

fn var(owner: &str, name: &str, index: usize) -> TypeExpr {
    TypeExpr::variable(owner, name, index)
}

fn reason_of(err: ResolveError) -> UnresolvableReason {
    match err {
        ResolveError::UnresolvableTypeVariable { reason, .. } => reason,
        other => panic!("expected an unresolvable type variable, got {other:?}"),
    }
}

// =========================================================================
// Pass-through
// =========================================================================

#[test]
fn test_raw_passes_through_any_context() {
    let contexts = [
        raw("Foo"),
        instance("Foo", &[raw("Integer")]),
        instance("Pair", &[raw("String"), raw("Integer")]),
    ];
    for context in &contexts {
        assert_eq!(resolve_member_type(&raw("String"), context), Ok(raw("String")));
    }
}

#[test]
fn test_parameterized_member_is_returned_as_declared() {
    let declared = instance("List", &[var("Foo", "A", 0)]);
    let context = instance("Foo", &[raw("Integer")]);
    assert_eq!(resolve_member_type(&declared, &context), Ok(declared.clone()));
}

#[test]
fn test_nested_array_is_stable() {
    let declared = TypeExpr::array_of(TypeExpr::array_of(raw("Integer")));
    let context = instance("Foo", &[raw("String")]);
    let resolved = resolve_member_type(&declared, &context).unwrap();
    assert_eq!(resolved, declared);
    assert_eq!(resolved.array_depth(), 2);
}

// =========================================================================
// Variable Substitution
// =========================================================================

#[test]
fn test_single_hop_substitution() {
    let context = instance("Foo", &[raw("Integer")]);
    assert_eq!(resolve_member_type(&var("Foo", "A", 0), &context), Ok(raw("Integer")));
}

#[test]
fn test_multi_parameter_index_correctness() {
    let k = var("Pair", "K", 0);
    let v = var("Pair", "V", 1);

    let pair = instance("Pair", &[raw("String"), raw("Integer")]);
    assert_eq!(resolve_member_type(&k, &pair), Ok(raw("String")));
    assert_eq!(resolve_member_type(&v, &pair), Ok(raw("Integer")));

    let swapped = instance("Pair", &[raw("Integer"), raw("String")]);
    assert_eq!(resolve_member_type(&k, &swapped), Ok(raw("Integer")));
    assert_eq!(resolve_member_type(&v, &swapped), Ok(raw("String")));
}

#[test]
fn test_variable_bound_to_parameterized_argument() {
    let list_of_string = instance("List", &[raw("String")]);
    let context = instance("Foo", &[list_of_string.clone()]);
    assert_eq!(resolve_member_type(&var("Foo", "A", 0), &context), Ok(list_of_string));
}

#[test]
fn test_end_to_end_box_value() {
    let member = Member::new("Box", "value", TypeShape::variable("Box", "T", 0));
    let context = instance("Box", &[raw("String")]);

    let descriptor = type_descriptor_for_member(&member, &context).unwrap();
    assert_eq!(descriptor.actual_type(), &raw("String"));
    assert_eq!(descriptor.raw_type(), Some(&raw("String")));
}

// =========================================================================
// Arrays
// =========================================================================

#[test]
fn test_array_of_variable() {
    let declared = TypeExpr::array_of(var("Foo", "A", 0));
    let context = instance("Foo", &[raw("String")]);
    assert_eq!(
        resolve_member_type(&declared, &context),
        Ok(TypeExpr::array_of(raw("String")))
    );
}

#[test]
fn test_array_of_array_of_variable() {
    let declared = TypeExpr::array_of(TypeExpr::array_of(var("Foo", "A", 0)));
    let context = instance("Foo", &[raw("String")]);
    let resolved = resolve_member_type(&declared, &context).unwrap();
    insta::assert_snapshot!(resolved.to_string(), @"String[][]");
}

#[test]
fn test_array_of_variable_bound_to_parameterized_uses_raw_type() {
    let declared = TypeExpr::array_of(var("Foo", "A", 0));
    let context = instance("Foo", &[instance("List", &[raw("String")])]);
    assert_eq!(
        resolve_member_type(&declared, &context),
        Ok(TypeExpr::array_of(raw("List")))
    );
}

#[test]
fn test_array_of_variable_bound_to_array() {
    let declared = TypeExpr::array_of(var("Foo", "A", 0));
    let context = instance("Foo", &[TypeExpr::array_of(instance("Set", &[raw("Integer")]))]);
    let resolved = resolve_member_type(&declared, &context).unwrap();
    insta::assert_snapshot!(resolved.to_string(), @"Set[][]");
}

#[test]
fn test_array_of_escaped_variable_fails() {
    let declared = TypeExpr::array_of(var("Foo", "A", 0));
    let context = instance("Foo", &[var("Outer", "E", 0)]);
    let err = resolve_member_type(&declared, &context).unwrap_err();
    assert_eq!(reason_of(err), UnresolvableReason::EscapedVariable);
}

#[test]
fn test_array_descriptor_wraps_without_resolving() {
    let declared = TypeExpr::array_of(var("Foo", "A", 0));
    let descriptor = array_descriptor(&declared).unwrap();
    assert_eq!(descriptor.component_type(), &var("Foo", "A", 0));
    assert_eq!(descriptor.element_raw_type(), None);
}

// =========================================================================
// Unbound Arguments
// =========================================================================

#[test]
fn test_unground_argument_passes_through_by_default() {
    let context = instance("Foo", &[instance("List", &[var("Outer", "E", 0)])]);
    let resolved = resolve_member_type(&var("Foo", "A", 0), &context).unwrap();
    insta::assert_snapshot!(resolved.to_string(), @"List<E>");
}

#[test]
fn test_unground_argument_rejected_in_strict_mode() {
    let context = instance("Foo", &[instance("List", &[var("Outer", "E", 0)])]);
    let resolver = Resolver::new(ResolverConfig::strict());
    let err = resolver
        .resolve_member_type(&var("Foo", "A", 0), &context)
        .unwrap_err();
    match err {
        ResolveError::UnresolvableTypeVariable { variable, owner, reason, .. } => {
            assert_eq!(variable, "E");
            assert_eq!(owner, "Outer");
            assert_eq!(reason, UnresolvableReason::EscapedVariable);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn test_mismatched_owner_is_fatal() {
    let context = instance("Foo", &[raw("String")]);
    let err = resolve_member_type(&var("Bar", "A", 0), &context).unwrap_err();
    assert_eq!(reason_of(err), UnresolvableReason::OwnerNotInHierarchy);
}

#[test]
fn test_raw_context_is_fatal_for_variables() {
    let err = resolve_member_type(&var("Foo", "A", 0), &raw("Foo")).unwrap_err();
    assert_eq!(reason_of(err), UnresolvableReason::ContextNotParameterized);
}

#[test]
fn test_missing_argument_is_fatal() {
    let context = instance("Pair", &[raw("String")]);
    let err = resolve_member_type(&var("Pair", "V", 1), &context).unwrap_err();
    assert_eq!(reason_of(err), UnresolvableReason::ArgumentMissing);
}

#[test]
fn test_wildcard_member_is_unsupported() {
    let member = Member::new(
        "Foo",
        "numbers",
        TypeShape::Wildcard {
            upper: vec![TypeShape::class("Number")],
            lower: Vec::new(),
        },
    );
    let context = instance("Foo", &[raw("String")]);
    assert_eq!(
        type_descriptor_for_member(&member, &context),
        Err(ResolveError::unsupported("? extends Number", UnsupportedReason::Wildcard))
    );
}

#[test]
fn test_intersection_member_is_unsupported() {
    let member = Member::new(
        "Foo",
        "sorted",
        TypeShape::Intersection(vec![TypeShape::class("Comparable"), TypeShape::class("Cloneable")]),
    );
    let err = type_descriptor_for_member(&member, &raw("Foo")).unwrap_err();
    assert!(err.is_unsupported());
}
