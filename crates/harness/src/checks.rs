//! Built-in self-check groups
//!
//! These groups exercise the generators themselves: every descriptor they
//! produce is checked against the structural invariants in
//! [`voltest_core::validate`]. A connector-backed group follows the same
//! shape, handing each descriptor to the connector instead.

use crate::group::{ProbeContext, TestGroup};
use tracing::{debug, error, warn};
use voltest_core::{validate, MaxExtent, TypeCategory};

/// A single probe; `Err` carries the failure message
pub type Probe = fn(&mut ProbeContext) -> Result<(), String>;

fn run_probes(group: &str, probes: &[(&str, Probe)], ctx: &mut ProbeContext) -> usize {
    let mut failed = 0;
    for (name, probe) in probes {
        match probe(ctx) {
            Ok(()) => debug!(group, probe = *name, "PASSED"),
            Err(reason) => {
                error!(group, probe = *name, %reason, "FAILED");
                failed += 1;
            }
        }
    }
    failed
}

// ============================================================================
// Datatypes
// ============================================================================

/// Generates datatypes and checks them
#[derive(Debug, Default)]
pub struct DatatypeSelfCheck;

impl DatatypeSelfCheck {
    const PROBES: [(&'static str, Probe); 3] = [
        ("top-level datatypes", probe_top_level_types),
        ("array element datatypes", probe_array_elements),
        ("datatype size limit", probe_size_limit),
    ];
}

impl TestGroup for DatatypeSelfCheck {
    fn name(&self) -> &str {
        "datatype"
    }

    fn run(&mut self, ctx: &mut ProbeContext) -> usize {
        run_probes(self.name(), &Self::PROBES, ctx)
    }
}

fn probe_top_level_types(ctx: &mut ProbeContext) -> Result<(), String> {
    let limits = ctx.limits().clone();
    for i in 0..ctx.iterations() {
        let ty = ctx
            .source()
            .generate_type(None)
            .map_err(|e| format!("iteration {}: {}", i, e))?;
        validate::check_type(&ty, &limits).map_err(|v| format!("iteration {}: {} in {}", i, v, ty))?;
    }
    Ok(())
}

fn probe_array_elements(ctx: &mut ProbeContext) -> Result<(), String> {
    for i in 0..ctx.iterations() {
        let ty = ctx
            .source()
            .generate_type(Some(TypeCategory::Array))
            .map_err(|e| format!("iteration {}: {}", i, e))?;
        match ty.category() {
            TypeCategory::Integer | TypeCategory::Float | TypeCategory::String => {}
            other => return Err(format!("iteration {}: {} is not a legal array element", i, other)),
        }
    }
    Ok(())
}

fn probe_size_limit(ctx: &mut ProbeContext) -> Result<(), String> {
    let limits = ctx.limits().clone();
    let mut oversized = 0;
    for i in 0..ctx.iterations() {
        let ty = ctx
            .source()
            .generate_type(None)
            .map_err(|e| format!("iteration {}: {}", i, e))?;
        if validate::exceeds_size_limit(&ty, &limits) {
            oversized += 1;
        }
    }
    // Advisory only: the limit is not enforced during generation
    if oversized > 0 {
        warn!(
            oversized,
            max = limits.max_datatype_size,
            "datatypes above the size limit"
        );
    }
    Ok(())
}

// ============================================================================
// Shapes
// ============================================================================

/// Generates shapes and checks them
#[derive(Debug, Default)]
pub struct ShapeSelfCheck;

impl ShapeSelfCheck {
    const PROBES: [(&'static str, Probe); 3] = [
        ("shapes of every rank", probe_every_rank),
        ("max extents pass through", probe_max_extents),
        ("rank above limit rejected", probe_rank_rejected),
    ];
}

impl TestGroup for ShapeSelfCheck {
    fn name(&self) -> &str {
        "dataspace"
    }

    fn run(&mut self, ctx: &mut ProbeContext) -> usize {
        run_probes(self.name(), &Self::PROBES, ctx)
    }
}

fn probe_every_rank(ctx: &mut ProbeContext) -> Result<(), String> {
    let limits = ctx.limits().clone();
    for i in 0..ctx.iterations() {
        let rank = i % (limits.max_rank + 1);
        let shape = ctx
            .source()
            .generate_shape(rank, None)
            .map_err(|e| format!("rank {}: {}", rank, e))?;
        if shape.rank() != rank {
            return Err(format!("asked for rank {}, got {}", rank, shape));
        }
        validate::check_shape(&shape, &limits).map_err(|v| format!("{}: {}", shape, v))?;
    }
    Ok(())
}

fn probe_max_extents(ctx: &mut ProbeContext) -> Result<(), String> {
    let max_rank = ctx.limits().max_rank;
    for i in 0..ctx.iterations() {
        let rank = i % (max_rank + 1);
        let max: Vec<MaxExtent> = (0..rank)
            .map(|d| {
                if d % 2 == 0 {
                    MaxExtent::Unlimited
                } else {
                    MaxExtent::Bounded(d as u64 * 100)
                }
            })
            .collect();
        let shape = ctx
            .source()
            .generate_shape(rank, Some(&max))
            .map_err(|e| format!("rank {}: {}", rank, e))?;
        if shape.max_extents.as_deref() != Some(max.as_slice()) {
            return Err(format!("max extents not copied through: {}", shape));
        }
    }
    Ok(())
}

fn probe_rank_rejected(ctx: &mut ProbeContext) -> Result<(), String> {
    let rank = ctx.limits().max_rank + 1;
    match ctx.source().generate_shape(rank, None) {
        Err(e) if e.is_invalid_argument() => Ok(()),
        Err(e) => Err(format!("rank {}: wrong error {}", rank, e)),
        Ok(shape) => Err(format!("rank {} accepted: {}", rank, shape)),
    }
}
