use partialgen_schema::type_ref::TypeRef;

///
/// Resolution
///
/// A type without a `Partial` marker asked for nothing; that is a skip,
/// not an error.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Skip,
    Plan(TransformPlan),
}

///
/// TransformPlan
///
/// Every decision needed to build the output type. `members` runs parallel
/// to the source member list: one entry per source member, in order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransformPlan {
    pub output_name: String,
    pub summary: Option<String>,
    pub keep_abstract: bool,
    pub derive_from: Option<TypeRef>,
    pub include_required: bool,
    pub carry_extra_attributes: bool,
    pub members: Vec<MemberPlan>,
}

impl TransformPlan {
    #[must_use]
    pub const fn defaults(&self) -> PlanDefaults {
        PlanDefaults {
            include_required: self.include_required,
        }
    }
}

///
/// PlanDefaults
/// type-level settings the member transformer needs
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlanDefaults {
    pub include_required: bool,
}

///
/// MemberPlan
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberPlan {
    pub decision: Decision,
    pub force_null: bool,
    pub carry_initializer: bool,
    pub carry_extra_attributes: bool,
}

impl MemberPlan {
    /// An excluded member carries nothing forward, `force_null` included.
    #[must_use]
    pub const fn excluded() -> Self {
        Self {
            decision: Decision::Exclude,
            force_null: false,
            carry_initializer: false,
            carry_extra_attributes: false,
        }
    }

    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        matches!(self.decision, Decision::Exclude)
    }
}

///
/// Decision
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Keep { ty: TypeRef, optionalize: bool },
    Replace { ty: TypeRef, name: Option<String> },
    Exclude,
}
