//! `reify lower`: lower every type in a type file to a descriptor expression.

use crate::config::OutputFormat;
use crate::output::StyledOutput;
use crate::typefile::TypeFile;
use anyhow::Context;
use reify_compiler::{CompileResult, DescriptorExpr, PrettyPrinter, TypeDescriptorBuilder};
use reify_types::ResolvedType;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, info};

pub struct LowerOptions {
    pub format: OutputFormat,
    pub namespace: Option<String>,
}

/// One lowered entry, labelled for output
struct Lowered {
    label: String,
    result: CompileResult<DescriptorExpr>,
}

pub fn execute(file: &Path, options: &LowerOptions, out: &mut StyledOutput) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let type_file = TypeFile::parse(&content)
        .with_context(|| format!("Failed to parse type file {}", file.display()))?;
    let (ctx, entries) = type_file
        .into_parts()
        .with_context(|| format!("Invalid declarations in {}", file.display()))?;

    let (labels, types): (Vec<String>, Vec<ResolvedType>) = entries
        .into_iter()
        .map(|entry| (entry.label(&ctx), entry.ty))
        .unzip();
    debug!(
        classes = ctx.class_count(),
        type_parameters = ctx.type_parameter_count(),
        "loaded {}",
        file.display()
    );

    let builder = TypeDescriptorBuilder::new(&ctx);
    let lowered: Vec<Lowered> = labels
        .into_iter()
        .zip(builder.build_all(&types))
        .map(|(label, result)| Lowered { label, result })
        .collect();

    let printer = printer_for(options.namespace.as_deref());
    match options.format {
        OutputFormat::Json => {
            let document = render_json(&lowered, &printer);
            out.plain(&serde_json::to_string_pretty(&document)?);
            out.newline();
        }
        OutputFormat::Pretty | OutputFormat::Tree => {
            for entry in &lowered {
                match &entry.result {
                    Ok(expr) => {
                        out.label(&entry.label);
                        out.dim(" = ");
                        if options.format == OutputFormat::Tree {
                            out.plain(&printer.tree(expr));
                        } else {
                            out.plain(&printer.compact(expr));
                        }
                        out.newline();
                    }
                    Err(e) => out.stderr_error(&format!("error: {}: {}", entry.label, e)),
                }
            }
        }
    }
    out.flush();

    let failed = lowered.iter().filter(|entry| entry.result.is_err()).count();
    info!(total = lowered.len(), failed, "lowered {}", file.display());
    if failed > 0 {
        anyhow::bail!("{} of {} types failed to lower", failed, lowered.len());
    }
    Ok(())
}

fn printer_for(namespace: Option<&str>) -> PrettyPrinter {
    match namespace {
        Some(ns) => PrettyPrinter::new().with_namespace(ns),
        None => PrettyPrinter::new(),
    }
}

/// JSON document with the descriptor tree and its rendering per entry
fn render_json(lowered: &[Lowered], printer: &PrettyPrinter) -> Value {
    let entries = lowered
        .iter()
        .map(|entry| match &entry.result {
            Ok(expr) => json!({
                "name": entry.label,
                "descriptor": expr,
                "rendered": printer.compact(expr),
            }),
            Err(e) => json!({
                "name": entry.label,
                "error": e.to_string(),
            }),
        })
        .collect::<Vec<_>>();
    Value::Array(entries)
}
