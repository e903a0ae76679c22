use crate::{
    output::OutputMember,
    plan::{Decision, MemberPlan, PlanDefaults},
};
use partialgen_schema::node::MemberDescriptor;

/// Apply one member's resolved decision. Returns `None` for excluded members.
///
/// No type checking happens here: a substituted type is copied as given and
/// its own nullability is authoritative unless `ForceNull` asks for more.
#[must_use]
pub fn transform(
    member: &MemberDescriptor,
    plan: &MemberPlan,
    defaults: PlanDefaults,
) -> Option<OutputMember> {
    let (name, ty) = match &plan.decision {
        Decision::Exclude => return None,
        Decision::Keep { ty, optionalize } => {
            let ty = if *optionalize {
                ty.clone().into_nullable()
            } else {
                ty.clone()
            };

            (member.name.clone(), ty)
        }
        Decision::Replace { ty, name } => (
            name.clone().unwrap_or_else(|| member.name.clone()),
            ty.clone(),
        ),
    };

    let ty = if plan.force_null {
        ty.into_nullable()
    } else {
        ty
    };

    let initializer = if plan.carry_initializer {
        member.initializer.clone()
    } else {
        None
    };

    // markers live in their own list, so they can never leak through here
    let attributes = if plan.carry_extra_attributes {
        member.attributes.clone()
    } else {
        Vec::new()
    };

    Some(OutputMember {
        name,
        ty,
        accessibility: member.accessibility,
        required: defaults.include_required && member.required,
        accessors: member.accessors,
        initializer,
        attributes,
    })
}
