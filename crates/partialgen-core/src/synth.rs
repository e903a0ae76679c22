use crate::{
    output::{OutputMember, OutputTypeDescriptor},
    plan::TransformPlan,
    transform::transform,
};
use partialgen_schema::node::TypeDescriptor;

/// Assemble the output type from type-level decisions and transformed
/// members. Pure data assembly; every decision was made by the resolver.
#[must_use]
pub fn synthesize(
    source: &TypeDescriptor,
    plan: &TransformPlan,
    members: Vec<OutputMember>,
) -> OutputTypeDescriptor {
    OutputTypeDescriptor {
        name: plan.output_name.clone(),
        namespace: source.namespace.clone(),
        usings: source.usings.clone(),
        kind: source.kind,
        accessibility: source.accessibility,
        is_abstract: source.is_abstract && plan.keep_abstract,
        generic_params: source.generic_params.clone(),
        base: plan.derive_from.clone(),
        summary: plan.summary.clone(),
        members,
    }
}

/// Run the member transformer over every source member, in declaration
/// order, and synthesize the result.
#[must_use]
pub fn build_output(source: &TypeDescriptor, plan: &TransformPlan) -> OutputTypeDescriptor {
    let defaults = plan.defaults();
    let members = source
        .members
        .iter()
        .zip(&plan.members)
        .filter_map(|(member, member_plan)| transform(member, member_plan, defaults))
        .collect();

    synthesize(source, plan, members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Resolution;
    use crate::resolve::resolve;
    use partialgen_schema::prelude::*;

    fn ty(s: &str) -> TypeRef {
        s.parse().expect("test type should parse")
    }

    fn output_of(source: &TypeDescriptor) -> OutputTypeDescriptor {
        match resolve(source).expect("resolution should succeed") {
            Resolution::Plan(plan) => build_output(source, &plan),
            Resolution::Skip => panic!("expected a plan"),
        }
    }

    #[test]
    fn member_order_follows_source_with_gaps() {
        let source = TypeDescriptor::new("Invoice", TypeKind::Class)
            .with_partial(PartialOptions::default())
            .with_member(MemberDescriptor::new("Id", ty("Guid")))
            .with_member(
                MemberDescriptor::new("Secret", ty("string"))
                    .with_marker(ConfigurationMarker::ExcludePartial),
            )
            .with_member(MemberDescriptor::new("Total", ty("decimal")))
            .with_member(MemberDescriptor::new("Notes", ty("string?")));

        let names: Vec<_> = output_of(&source)
            .members
            .iter()
            .map(|m| m.name.clone())
            .collect();

        assert_eq!(names, vec!["Id", "Total", "Notes"]);
    }

    #[test]
    fn type_shape_mirrors_source() {
        let mut source = TypeDescriptor::new("Envelope", TypeKind::Struct)
            .with_partial(PartialOptions::default());
        source.namespace = Some("Acme.Messaging".to_string());
        source.usings = vec!["System".to_string()];
        source.accessibility = Accessibility::Internal;
        source.generic_params = vec![GenericParam::new("T").with_constraint("struct")];
        source.base_types = vec![ty("EnvelopeBase")];

        let out = output_of(&source);

        assert_eq!(out.name, "PartialEnvelope");
        assert_eq!(out.kind, TypeKind::Struct);
        assert_eq!(out.accessibility, Accessibility::Internal);
        assert_eq!(out.generic_params, source.generic_params);
        assert_eq!(out.usings, source.usings);
        assert_eq!(out.path(), "Acme.Messaging.PartialEnvelope");
        assert_eq!(out.base, None, "source bases are not inherited");
    }

    #[test]
    fn abstract_flag_and_base_follow_plan() {
        let mut source = TypeDescriptor::new("Shape", TypeKind::Class);
        source.is_abstract = true;

        let kept = output_of(&source.clone().with_partial(PartialOptions::default()));
        assert!(kept.is_abstract);

        let cleared = output_of(&source.with_partial(PartialOptions {
            remove_abstract: true,
            derive_from: Some(ty("PatchBase")),
            ..Default::default()
        }));
        assert!(!cleared.is_abstract);
        assert_eq!(cleared.base, Some(ty("PatchBase")));
    }
}
