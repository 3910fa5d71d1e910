//! Seeded descriptor source
//!
//! [`SchemaSource`] bundles a seeded draw source with both generators so a
//! test can ask for datatypes and shapes without threading the random
//! state around. Each source owns its state; use one per thread.
//!
//! ## Usage
//!
//! ```
//! use voltest_gen::SchemaSource;
//! use voltest_core::Limits;
//!
//! let mut source = SchemaSource::builder()
//!     .seed(42)
//!     .limits(Limits::shallow())
//!     .build()
//!     .unwrap();
//! let ty = source.generate_type(None).unwrap();
//! let shape = source.generate_shape(2, None).unwrap();
//! assert_eq!(shape.rank(), 2);
//! println!("seed {}: {} over {}", source.seed(), ty, shape);
//! ```

use crate::backend::NativeBackend;
use crate::draw::RngDraw;
use crate::shape_gen::ShapeGenerator;
use crate::type_gen::{TypeGenerator, DEFAULT_MAX_REROLLS};
use rand::rngs::StdRng;
use tracing::info;
use voltest_core::{
    ConfigError, Limits, MaxExtent, Result, ShapeDescriptor, TypeCategory, TypeClass,
};

/// Seeded source of random datatypes and shapes
#[derive(Debug, Clone)]
pub struct SchemaSource {
    draw: RngDraw<StdRng>,
    seed: u64,
    types: TypeGenerator<NativeBackend>,
    shapes: ShapeGenerator,
}

impl SchemaSource {
    /// Start configuring a source
    pub fn builder() -> SchemaSourceBuilder {
        SchemaSourceBuilder::new()
    }

    /// Source with default limits and the given seed
    pub fn with_seed(seed: u64) -> std::result::Result<Self, ConfigError> {
        Self::builder().seed(seed).build()
    }

    /// Seed the draw source was started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Limits in effect
    pub fn limits(&self) -> &Limits {
        self.types.limits()
    }

    /// Generate a random datatype; `parent` is the enclosing category, if any
    pub fn generate_type(&mut self, parent: Option<TypeCategory>) -> Result<TypeClass> {
        self.types.generate_type(&mut self.draw, parent)
    }

    /// Generate a random shape of `rank` dimensions
    pub fn generate_shape(
        &mut self,
        rank: usize,
        max_extents: Option<&[MaxExtent]>,
    ) -> Result<ShapeDescriptor> {
        self.shapes.generate_shape(&mut self.draw, rank, max_extents)
    }
}

/// Builder for [`SchemaSource`]
#[derive(Debug, Clone)]
pub struct SchemaSourceBuilder {
    seed: Option<u64>,
    limits: Limits,
    max_rerolls: usize,
}

impl SchemaSourceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            seed: None,
            limits: Limits::default(),
            max_rerolls: DEFAULT_MAX_REROLLS,
        }
    }

    /// Fix the seed. Without one, a seed is taken from the clock.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Optional form of [`seed`](Self::seed)
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Use these limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Rejected category draws tolerated per nesting level.
    pub fn max_rerolls(mut self, max_rerolls: usize) -> Self {
        self.max_rerolls = max_rerolls;
        self
    }

    /// Validate the limits and seed the source.
    ///
    /// The seed is logged so a failing run can be replayed.
    pub fn build(self) -> std::result::Result<SchemaSource, ConfigError> {
        let types =
            TypeGenerator::native(self.limits.clone())?.with_max_rerolls(self.max_rerolls);
        let shapes = ShapeGenerator::new(self.limits)?;
        let (draw, seed) = RngDraw::seeded(self.seed);
        info!(seed, "seeded schema source");
        Ok(SchemaSource {
            draw,
            seed,
            types,
            shapes,
        })
    }
}

impl Default for SchemaSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
