//! Partial type generation engine.
//!
//! `resolve` turns a [`TypeDescriptor`](partialgen_schema::node::TypeDescriptor)
//! and its markers into a [`TransformPlan`](plan::TransformPlan); `transform`
//! and `synthesize` build the [`OutputTypeDescriptor`](output::OutputTypeDescriptor);
//! `render` turns that into text. Every step is a pure function, so the
//! batch driver in [`engine`] can run types in parallel.

pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod output;
pub mod plan;
pub mod render;
pub mod resolve;
pub mod synth;
pub mod transform;

pub use partialgen_schema as schema;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        diagnostic::Diagnostic,
        engine::{BatchEntry, GeneratedType, generate, generate_batch, generate_with},
        error::ResolutionError,
        output::{OutputMember, OutputTypeDescriptor},
        plan::{Decision, MemberPlan, PlanDefaults, Resolution, TransformPlan},
        render::{RenderOptions, render, render_with},
        resolve::resolve,
        synth::{build_output, synthesize},
        transform::transform,
    };
    pub use partialgen_schema::prelude::*;
}
