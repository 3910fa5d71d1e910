//! Output formatting for Human and JSON modes.

use serde_json::json;
use voltest::{Limits, RunReport, ShapeDescriptor, TypeClass};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn format_types(seed: u64, types: &[TypeClass], mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let mut out = format!("seed: {}", seed);
            for (i, ty) in types.iter().enumerate() {
                out.push_str(&format!("\n{}) {} ({} bytes)", i + 1, ty, ty.size()));
            }
            out
        }
        OutputMode::Json => json!({ "seed": seed, "types": types }).to_string(),
    }
}

pub fn format_shape(seed: u64, shape: &ShapeDescriptor, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let count = match shape.element_count() {
                Some(n) => format!("{} elements", n),
                None => "element count overflows u64".to_string(),
            };
            format!("seed: {}\nshape: {} ({})", seed, shape, count)
        }
        OutputMode::Json => json!({ "seed": seed, "shape": shape }).to_string(),
    }
}

pub fn format_report(report: &RunReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let mut out = format!("seed: {}", report.seed);
            for group in &report.groups {
                let status = if group.errors == 0 {
                    "passed".to_string()
                } else {
                    format!("{} failed", group.errors)
                };
                out.push_str(&format!("\n  {:<12} {}", group.name, status));
            }
            out.push('\n');
            out.push_str(&report.summary());
            out
        }
        OutputMode::Json => json!(report).to_string(),
    }
}

pub fn format_limits(limits: &Limits, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let rows = [
                ("max_datatype_size", limits.max_datatype_size),
                ("recursion_max_depth", limits.recursion_max_depth),
                ("compound_max_members", limits.compound_max_members),
                ("array_max_dims", limits.array_max_dims),
                ("enum_max_member_name_length", limits.enum_max_member_name_length),
                ("enum_max_members", limits.enum_max_members),
                ("string_max_size", limits.string_max_size),
                ("max_dim_size", limits.max_dim_size),
                ("max_rank", limits.max_rank),
            ];
            rows.iter()
                .map(|(name, value)| format!("{:<28} {}", name, value))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputMode::Json => json!(limits).to_string(),
    }
}

pub fn format_error(msg: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}", msg),
        OutputMode::Json => json!({ "error": msg }).to_string(),
    }
}
