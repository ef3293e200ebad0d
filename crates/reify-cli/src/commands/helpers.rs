//! `reify helpers`: list the runtime helpers descriptors may call.

use crate::output::StyledOutput;
use reify_compiler::RuntimeHelper;

pub fn execute(namespace: Option<&str>, out: &mut StyledOutput) -> anyhow::Result<()> {
    for helper in RuntimeHelper::ALL {
        out.label(&qualified_name(namespace, helper));
        out.dim(&format!("  ({} args)", helper.arity()));
        out.newline();
    }
    out.flush();
    Ok(())
}

fn qualified_name(namespace: Option<&str>, helper: RuntimeHelper) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, helper.name()),
        _ => helper.name().to_string(),
    }
}
