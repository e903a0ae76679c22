//! Build driver: discover types, run the engine over them, hand the text to
//! a sink. Every decision is made by `partialgen-core`; this crate only
//! moves data in and out.

mod error;
mod scan;
mod sink;

pub use error::BuildError;
pub use scan::{ManifestScanner, Scanner};
pub use sink::{DirSink, MemorySink, Sink, WriteOutcome};

use partialgen_config::Config;
use partialgen_core::{engine::generate_batch, render::RenderOptions};

///
/// RunReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunReport {
    /// Types scanned.
    pub types: usize,

    /// Outputs whose text was written.
    pub written: usize,

    /// Outputs identical to what the sink already held.
    pub unchanged: usize,

    /// Types without a `Partial` marker.
    pub skipped: usize,

    /// Types that produced a diagnostic.
    pub failed: usize,
}

impl RunReport {
    #[must_use]
    pub const fn generated(&self) -> usize {
        self.written + self.unchanged
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

///
/// Generator
///

#[derive(Clone, Debug, Default)]
pub struct Generator {
    pub options: RenderOptions,
}

impl Generator {
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(RenderOptions {
            indent_width: config.render.indent,
            header: config.render.header,
        })
    }

    /// Generate every discovered type. Per-type failures are reported to
    /// the sink and counted; only scanner or sink failures abort the run.
    pub fn run<S, K>(&self, scanner: &S, sink: &mut K) -> Result<RunReport, BuildError>
    where
        S: Scanner + ?Sized,
        K: Sink + ?Sized,
    {
        let sources = scanner.discover()?;
        tracing::info!(types = sources.len(), "partial generation started");

        let mut report = RunReport {
            types: sources.len(),
            ..RunReport::default()
        };

        for entry in generate_batch(&sources, &self.options) {
            let path = entry.source.path();

            if let Some(diagnostic) = entry.diagnostic() {
                tracing::warn!(
                    code = diagnostic.code,
                    type_path = %path,
                    "{diagnostic}"
                );
                sink.report(&diagnostic);
                report.failed += 1;
                continue;
            }

            let Ok(Some(generated)) = entry.result else {
                tracing::debug!(type_path = %path, "no partial requested");
                report.skipped += 1;
                continue;
            };

            match sink.write(&generated.hint_name, &generated.text)? {
                WriteOutcome::Written => report.written += 1,
                WriteOutcome::Unchanged => report.unchanged += 1,
            }
            tracing::debug!(type_path = %path, output = %generated.hint_name, "partial generated");
        }

        tracing::info!(
            written = report.written,
            unchanged = report.unchanged,
            skipped = report.skipped,
            failed = report.failed,
            "partial generation finished"
        );

        Ok(report)
    }
}

///
/// TESTS
///
