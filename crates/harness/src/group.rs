//! Test groups and the context they run in

use voltest_core::Limits;
use voltest_gen::SchemaSource;

/// State shared by every group in one run
///
/// Groups draw from the same seeded source in registration order, so a
/// run is replayed exactly by re-running with the reported seed.
#[derive(Debug)]
pub struct ProbeContext {
    connector: String,
    source: SchemaSource,
    iterations: usize,
}

impl ProbeContext {
    /// Create a context
    pub fn new(connector: impl Into<String>, source: SchemaSource, iterations: usize) -> Self {
        Self {
            connector: connector.into(),
            source,
            iterations,
        }
    }

    /// Connector under test
    pub fn connector(&self) -> &str {
        &self.connector
    }

    /// Descriptor source
    pub fn source(&mut self) -> &mut SchemaSource {
        &mut self.source
    }

    /// Descriptors to generate per probe
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed of the descriptor source
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Limits of the descriptor source
    pub fn limits(&self) -> &Limits {
        self.source.limits()
    }
}

/// A named group of probes
///
/// `run` returns the number of failed probes; zero means the group passed.
pub trait TestGroup {
    /// Name shown in logs and reports
    fn name(&self) -> &str;

    /// Run every probe in the group
    fn run(&mut self, ctx: &mut ProbeContext) -> usize;
}

impl<G: TestGroup + ?Sized> TestGroup for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&mut self, ctx: &mut ProbeContext) -> usize {
        (**self).run(ctx)
    }
}
