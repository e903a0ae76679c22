//! Rule resolution: markers in, one decision per member out.
//!
//! Member precedence, first match wins:
//!   1. `ExcludePartial`
//!   2. a single `ReplaceType` / `SubstituteType` (two or more is a conflict)
//!   3. keep the declared type, optionalized unless it is already nullable or
//!      `include_required` protects a required member
//! `ForceNull` and `IncludeInitializer` then annotate whatever survived.

use crate::{
    error::ResolutionError,
    plan::{Decision, MemberPlan, Resolution, TransformPlan},
};
use partialgen_schema::{
    DEFAULT_NAME_PREFIX,
    prelude::*,
    validate::{validate_ident, validate_namespace},
};
use std::collections::BTreeMap;

/// Resolve the transform plan for one source type.
pub fn resolve(source: &TypeDescriptor) -> Result<Resolution, ResolutionError> {
    let mut partials = source.partial_markers();
    let Some(options) = partials.next() else {
        return Ok(Resolution::Skip);
    };

    let extra = partials.count();
    if extra > 0 {
        return Err(ResolutionError::DuplicatePartialMarker {
            type_name: source.path(),
            count: extra + 1,
        });
    }

    if source.name.is_empty() {
        return Err(ResolutionError::MissingRequiredTypeInfo {
            type_name: source.path(),
            member: None,
            what: "type name",
        });
    }

    // the namespace becomes part of the artifact name
    if let Some(namespace) = &source.namespace {
        validate_namespace(namespace).map_err(|reason| ResolutionError::InvalidIdentifier {
            type_name: source.path(),
            member: None,
            reason,
        })?;
    }

    if let Some(marker) = misplaced(&source.markers, MarkerPlacement::Type) {
        return Err(ResolutionError::MisplacedMarker {
            type_name: source.path(),
            member: None,
            marker,
        });
    }

    let output_name = options
        .partial_name
        .clone()
        .unwrap_or_else(|| format!("{DEFAULT_NAME_PREFIX}{}", source.name));
    validate_ident(&output_name).map_err(|reason| ResolutionError::InvalidIdentifier {
        type_name: source.path(),
        member: None,
        reason,
    })?;

    let members = source
        .members
        .iter()
        .map(|member| resolve_member(source, options, member))
        .collect::<Result<Vec<_>, _>>()?;

    check_unique_names(source, &members)?;

    Ok(Resolution::Plan(TransformPlan {
        output_name,
        summary: options.summary.clone().or_else(|| source.summary.clone()),
        keep_abstract: !options.remove_abstract,
        derive_from: options.derive_from.clone(),
        include_required: options.include_required,
        carry_extra_attributes: options.include_extra_attributes,
        members,
    }))
}

// resolve_member
fn resolve_member(
    source: &TypeDescriptor,
    options: &PartialOptions,
    member: &MemberDescriptor,
) -> Result<MemberPlan, ResolutionError> {
    if member.name.is_empty() {
        return Err(ResolutionError::MissingRequiredTypeInfo {
            type_name: source.path(),
            member: None,
            what: "member name",
        });
    }

    // exclusion overrides everything else on the member
    if member.has_marker(MarkerKind::ExcludePartial) {
        return Ok(MemberPlan::excluded());
    }

    if let Some(marker) = misplaced(&member.markers, MarkerPlacement::Member) {
        return Err(ResolutionError::MisplacedMarker {
            type_name: source.path(),
            member: Some(member.name.clone()),
            marker,
        });
    }

    let decision = match substitution(source, member)? {
        Some(decision) => decision,
        None => {
            let declared = declared_type(source, member)?;
            let protected = options.include_required && member.required;

            Decision::Keep {
                ty: declared.clone(),
                optionalize: !declared.nullable && !protected,
            }
        }
    };

    Ok(MemberPlan {
        decision,
        force_null: member.has_marker(MarkerKind::ForceNull),
        carry_initializer: member.has_marker(MarkerKind::IncludeInitializer),
        carry_extra_attributes: options.include_extra_attributes,
    })
}

// substitution
// at most one substitution marker may apply to a member
fn substitution(
    source: &TypeDescriptor,
    member: &MemberDescriptor,
) -> Result<Option<Decision>, ResolutionError> {
    let found: Vec<&ConfigurationMarker> = member
        .markers
        .iter()
        .filter(|m| m.is_type_substitution())
        .collect();

    let marker = match found.as_slice() {
        [] => return Ok(None),
        [marker] => *marker,
        many => {
            return Err(ResolutionError::ConflictingTypeMarkers {
                type_name: source.path(),
                member: member.name.clone(),
                markers: many.iter().map(|m| m.kind()).collect(),
            });
        }
    };

    let (ty, name) = match marker {
        ConfigurationMarker::SubstituteType { replacement, name } => (replacement.clone(), name),
        ConfigurationMarker::ReplaceType {
            original,
            partial,
            name,
        } => {
            let declared = declared_type(source, member)?;
            let ty = declared
                .substitute(original, partial)
                .unwrap_or_else(|| partial.clone());

            (ty, name)
        }
        _ => return Ok(None),
    };

    if let Some(name) = name {
        validate_ident(name).map_err(|reason| ResolutionError::InvalidIdentifier {
            type_name: source.path(),
            member: Some(member.name.clone()),
            reason,
        })?;
    }

    Ok(Some(Decision::Replace {
        ty,
        name: name.clone(),
    }))
}

fn declared_type<'a>(
    source: &TypeDescriptor,
    member: &'a MemberDescriptor,
) -> Result<&'a TypeRef, ResolutionError> {
    member
        .ty
        .as_ref()
        .ok_or_else(|| ResolutionError::MissingRequiredTypeInfo {
            type_name: source.path(),
            member: Some(member.name.clone()),
            what: "declared type",
        })
}

fn misplaced(markers: &[ConfigurationMarker], placement: MarkerPlacement) -> Option<MarkerKind> {
    markers
        .iter()
        .map(ConfigurationMarker::kind)
        .find(|kind| kind.placement() != placement)
}

// renames can collide with a sibling's name
fn check_unique_names(
    source: &TypeDescriptor,
    plans: &[MemberPlan],
) -> Result<(), ResolutionError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

    for (member, plan) in source.members.iter().zip(plans) {
        let name = match &plan.decision {
            Decision::Exclude => continue,
            Decision::Replace {
                name: Some(name), ..
            } => name.as_str(),
            _ => member.name.as_str(),
        };

        if let Some(first) = seen.insert(name, member.name.as_str()) {
            return Err(ResolutionError::DuplicateMemberName {
                type_name: source.path(),
                name: name.to_string(),
                first: first.to_string(),
                second: member.name.clone(),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(s: &str) -> TypeRef {
        s.parse().expect("test type should parse")
    }

    fn partial(options: PartialOptions) -> TypeDescriptor {
        TypeDescriptor::new("Order", TypeKind::Class).with_partial(options)
    }

    fn plan_of(source: &TypeDescriptor) -> TransformPlan {
        match resolve(source).expect("resolution should succeed") {
            Resolution::Plan(plan) => plan,
            Resolution::Skip => panic!("expected a plan for '{}'", source.name),
        }
    }

    #[test]
    fn type_without_partial_marker_is_skipped() {
        let source = TypeDescriptor::new("Order", TypeKind::Class)
            .with_member(MemberDescriptor::new("Id", ty("int")));

        assert_eq!(resolve(&source), Ok(Resolution::Skip));
    }

    #[test]
    fn output_name_defaults_to_prefix() {
        assert_eq!(plan_of(&partial(PartialOptions::default())).output_name, "PartialOrder");
    }

    #[test]
    fn output_name_honours_override() {
        let plan = plan_of(&partial(PartialOptions {
            partial_name: Some("OrderPatch".to_string()),
            ..Default::default()
        }));

        assert_eq!(plan.output_name, "OrderPatch");
    }

    #[test]
    fn invalid_override_name_is_rejected() {
        let err = resolve(&partial(PartialOptions {
            partial_name: Some("class".to_string()),
            ..Default::default()
        }))
        .expect_err("reserved output name should fail");

        assert!(matches!(err, ResolutionError::InvalidIdentifier { member: None, .. }));
    }

    #[test]
    fn malformed_namespace_is_rejected() {
        for namespace in ["Acme/Models", "Acme..Models", "Acme.namespace"] {
            let mut source = partial(PartialOptions::default());
            source.namespace = Some(namespace.to_string());

            let err = resolve(&source).expect_err("malformed namespace should fail");
            assert!(
                matches!(err, ResolutionError::InvalidIdentifier { member: None, .. }),
                "{namespace:?} gave {err:?}"
            );
        }

        let mut source = partial(PartialOptions::default());
        source.namespace = Some("Acme.Models".to_string());
        assert!(resolve(&source).is_ok());
    }

    #[test]
    fn summary_override_wins_over_source_summary() {
        let mut source = partial(PartialOptions::default());
        source.summary = Some("An order.".to_string());
        assert_eq!(plan_of(&source).summary.as_deref(), Some("An order."));

        source.markers = vec![ConfigurationMarker::Partial(PartialOptions {
            summary: Some("Patch for an order.".to_string()),
            ..Default::default()
        })];
        assert_eq!(plan_of(&source).summary.as_deref(), Some("Patch for an order."));
    }

    #[test]
    fn exclusion_beats_every_other_marker() {
        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Customer", ty("Customer"))
                .with_marker(ConfigurationMarker::ForceNull)
                .with_marker(ConfigurationMarker::IncludeInitializer)
                .with_marker(ConfigurationMarker::SubstituteType {
                    replacement: ty("string"),
                    name: None,
                })
                .with_marker(ConfigurationMarker::ReplaceType {
                    original: ty("Customer"),
                    partial: ty("PartialCustomer"),
                    name: None,
                })
                .with_marker(ConfigurationMarker::ExcludePartial),
        );

        let plan = plan_of(&source);
        assert_eq!(plan.members, vec![MemberPlan::excluded()]);
    }

    #[test]
    fn excluded_member_needs_no_declared_type() {
        let mut member = MemberDescriptor::new("Legacy", ty("int"))
            .with_marker(ConfigurationMarker::ExcludePartial);
        member.ty = None;

        let plan = plan_of(&partial(PartialOptions::default()).with_member(member));
        assert!(plan.members[0].is_excluded());
    }

    #[test]
    fn conflicting_substitutions_fail_the_type() {
        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Customer", ty("Customer"))
                .with_marker(ConfigurationMarker::ReplaceType {
                    original: ty("Customer"),
                    partial: ty("PartialCustomer"),
                    name: None,
                })
                .with_marker(ConfigurationMarker::SubstituteType {
                    replacement: ty("string"),
                    name: None,
                }),
        );

        assert_eq!(
            resolve(&source),
            Err(ResolutionError::ConflictingTypeMarkers {
                type_name: "Order".to_string(),
                member: "Customer".to_string(),
                markers: vec![MarkerKind::ReplaceType, MarkerKind::SubstituteType],
            })
        );
    }

    #[test]
    fn two_replace_markers_also_conflict() {
        let replace = ConfigurationMarker::ReplaceType {
            original: ty("Customer"),
            partial: ty("PartialCustomer"),
            name: None,
        };
        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Customer", ty("Customer"))
                .with_marker(replace.clone())
                .with_marker(replace),
        );

        assert!(matches!(
            resolve(&source),
            Err(ResolutionError::ConflictingTypeMarkers { .. })
        ));
    }

    #[test]
    fn replace_type_substitutes_inside_declared_type() {
        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Lines", ty("List<OrderLine>")).with_marker(
                ConfigurationMarker::ReplaceType {
                    original: ty("OrderLine"),
                    partial: ty("PartialOrderLine"),
                    name: Some("LinePatches".to_string()),
                },
            ),
        );

        assert_eq!(
            plan_of(&source).members[0].decision,
            Decision::Replace {
                ty: ty("List<PartialOrderLine>"),
                name: Some("LinePatches".to_string()),
            }
        );
    }

    #[test]
    fn replace_type_falls_back_to_partial_type() {
        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Owner", ty("object")).with_marker(
                ConfigurationMarker::ReplaceType {
                    original: ty("Customer"),
                    partial: ty("PartialCustomer"),
                    name: None,
                },
            ),
        );

        assert_eq!(
            plan_of(&source).members[0].decision,
            Decision::Replace {
                ty: ty("PartialCustomer"),
                name: None,
            }
        );
    }

    #[test]
    fn required_member_is_protected_only_with_include_required() {
        let member = MemberDescriptor::new("Name", ty("string")).required();

        let kept = plan_of(
            &partial(PartialOptions {
                include_required: true,
                ..Default::default()
            })
            .with_member(member.clone()),
        );
        assert_eq!(
            kept.members[0].decision,
            Decision::Keep {
                ty: ty("string"),
                optionalize: false,
            }
        );

        let optional = plan_of(&partial(PartialOptions::default()).with_member(member));
        assert_eq!(
            optional.members[0].decision,
            Decision::Keep {
                ty: ty("string"),
                optionalize: true,
            }
        );
    }

    #[test]
    fn nullable_member_is_not_optionalized_again() {
        let plan = plan_of(
            &partial(PartialOptions::default())
                .with_member(MemberDescriptor::new("Age", ty("int?"))),
        );

        assert_eq!(
            plan.members[0].decision,
            Decision::Keep {
                ty: ty("int?"),
                optionalize: false,
            }
        );
    }

    #[test]
    fn member_flags_follow_markers_and_type_options() {
        let plan = plan_of(
            &partial(PartialOptions {
                include_extra_attributes: true,
                ..Default::default()
            })
            .with_member(
                MemberDescriptor::new("Count", ty("int"))
                    .with_marker(ConfigurationMarker::ForceNull)
                    .with_marker(ConfigurationMarker::IncludeInitializer),
            )
            .with_member(MemberDescriptor::new("Note", ty("string"))),
        );

        let count = &plan.members[0];
        assert!(count.force_null);
        assert!(count.carry_initializer);
        assert!(count.carry_extra_attributes);

        let note = &plan.members[1];
        assert!(!note.force_null);
        assert!(!note.carry_initializer);
        assert!(note.carry_extra_attributes);
    }

    #[test]
    fn missing_declared_type_is_reported() {
        let mut member = MemberDescriptor::new("Broken", ty("int"));
        member.ty = None;

        assert_eq!(
            resolve(&partial(PartialOptions::default()).with_member(member)),
            Err(ResolutionError::MissingRequiredTypeInfo {
                type_name: "Order".to_string(),
                member: Some("Broken".to_string()),
                what: "declared type",
            })
        );
    }

    #[test]
    fn misplaced_markers_are_reported() {
        let mut source = partial(PartialOptions::default());
        source.markers.push(ConfigurationMarker::ForceNull);
        assert!(matches!(
            resolve(&source),
            Err(ResolutionError::MisplacedMarker {
                marker: MarkerKind::ForceNull,
                member: None,
                ..
            })
        ));

        let source = partial(PartialOptions::default()).with_member(
            MemberDescriptor::new("Id", ty("int"))
                .with_marker(ConfigurationMarker::Partial(PartialOptions::default())),
        );
        assert!(matches!(
            resolve(&source),
            Err(ResolutionError::MisplacedMarker {
                marker: MarkerKind::Partial,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_partial_markers_are_reported() {
        let source = partial(PartialOptions::default()).with_partial(PartialOptions::default());

        assert_eq!(
            resolve(&source),
            Err(ResolutionError::DuplicatePartialMarker {
                type_name: "Order".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn rename_collision_is_reported() {
        let source = partial(PartialOptions::default())
            .with_member(MemberDescriptor::new("Total", ty("decimal")))
            .with_member(MemberDescriptor::new("Amount", ty("Money")).with_marker(
                ConfigurationMarker::SubstituteType {
                    replacement: ty("decimal?"),
                    name: Some("Total".to_string()),
                },
            ));

        assert_eq!(
            resolve(&source),
            Err(ResolutionError::DuplicateMemberName {
                type_name: "Order".to_string(),
                name: "Total".to_string(),
                first: "Total".to_string(),
                second: "Amount".to_string(),
            })
        );
    }

    #[test]
    fn abstract_and_base_options_are_reflected() {
        let plan = plan_of(&partial(PartialOptions {
            remove_abstract: true,
            derive_from: Some(ty("PatchBase<Order>")),
            ..Default::default()
        }));

        assert!(!plan.keep_abstract);
        assert_eq!(plan.derive_from, Some(ty("PatchBase<Order>")));
    }
}
