use crate::{
    diagnostic::Diagnostic,
    error::ResolutionError,
    output::OutputTypeDescriptor,
    plan::Resolution,
    render::{RenderOptions, render_with},
    resolve::resolve,
    synth::build_output,
};
use partialgen_schema::node::TypeDescriptor;
use rayon::prelude::*;
use std::{
    collections::{BTreeMap, btree_map::Entry},
    time::Instant,
};

///
/// GeneratedType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedType {
    pub output: OutputTypeDescriptor,
    pub text: String,

    /// Deterministic artifact name derived from the output type's path.
    pub hint_name: String,
}

/// Generate one type with default render options.
/// `Ok(None)` means the type asked for no partial.
pub fn generate(source: &TypeDescriptor) -> Result<Option<GeneratedType>, ResolutionError> {
    generate_with(source, &RenderOptions::default())
}

pub fn generate_with(
    source: &TypeDescriptor,
    options: &RenderOptions,
) -> Result<Option<GeneratedType>, ResolutionError> {
    let plan = match resolve(source)? {
        Resolution::Skip => return Ok(None),
        Resolution::Plan(plan) => plan,
    };

    let output = build_output(source, &plan);
    let text = render_with(&output, options);
    let hint_name = output.path();

    Ok(Some(GeneratedType {
        output,
        text,
        hint_name,
    }))
}

///
/// BatchEntry
///

#[derive(Debug)]
pub struct BatchEntry<'a> {
    pub source: &'a TypeDescriptor,
    pub result: Result<Option<GeneratedType>, ResolutionError>,
}

impl BatchEntry<'_> {
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        self.result
            .as_ref()
            .err()
            .map(|err| Diagnostic::from_error(self.source, err))
    }
}

/// Generate every type independently and in parallel.
/// Entries come back in input order; a failure stays with its own entry.
/// When two types produce the same output, the first in input order keeps
/// it and every later one fails with `DuplicateOutputName`.
#[must_use]
pub fn generate_batch<'a>(
    sources: &'a [TypeDescriptor],
    options: &RenderOptions,
) -> Vec<BatchEntry<'a>> {
    let started = Instant::now();

    let mut entries: Vec<BatchEntry<'a>> = sources
        .par_iter()
        .map(|source| BatchEntry {
            source,
            result: generate_with(source, options),
        })
        .collect();

    claim_outputs(&mut entries);

    tracing::debug!(
        types = entries.len(),
        elapsed_us = started.elapsed().as_micros(),
        "partial generation batch finished"
    );

    entries
}

// claim_outputs
// one artifact per output path; later claimants become their own failures
fn claim_outputs(entries: &mut [BatchEntry<'_>]) {
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();

    for entry in entries {
        let Ok(Some(generated)) = &entry.result else {
            continue;
        };

        let err = match claimed.entry(generated.hint_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry.source.path());
                continue;
            }
            Entry::Occupied(slot) => ResolutionError::DuplicateOutputName {
                type_name: entry.source.path(),
                output: generated.hint_name.clone(),
                first: slot.get().clone(),
            },
        };

        entry.result = Err(err);
    }
}
