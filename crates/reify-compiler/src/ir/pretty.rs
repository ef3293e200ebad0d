//! Pretty-printing for descriptor expressions
//!
//! Renders descriptor trees in the call syntax the runtime library expects,
//! either on one line or as an indented tree for deep descriptors.

use super::expr::DescriptorExpr;

/// Trait for pretty-printing descriptor constructs
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for DescriptorExpr {
    fn pretty_print(&self) -> String {
        PrettyPrinter::new().compact(self)
    }
}

impl std::fmt::Display for DescriptorExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pretty_print())
    }
}

/// Configurable descriptor printer
#[derive(Debug, Clone, Default)]
pub struct PrettyPrinter {
    /// Object the runtime helpers live on (e.g. `$rt`)
    namespace: Option<String>,
    /// Spaces per nesting level in tree output
    indent: usize,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self {
            namespace: None,
            indent: 2,
        }
    }

    /// Prefix every helper call with `namespace.`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Single-line rendering
    pub fn compact(&self, expr: &DescriptorExpr) -> String {
        let mut output = String::new();
        self.write_compact(&mut output, expr);
        output
    }

    /// Multi-line rendering, one argument per line
    pub fn tree(&self, expr: &DescriptorExpr) -> String {
        let mut output = String::new();
        self.write_tree(&mut output, expr, 0);
        output
    }

    fn write_callee(&self, output: &mut String, name: &str) {
        if let Some(ns) = &self.namespace {
            output.push_str(ns);
            output.push('.');
        }
        output.push_str(name);
    }

    fn write_leaf(&self, output: &mut String, expr: &DescriptorExpr) -> bool {
        match expr {
            DescriptorExpr::ClassRef(name) => output.push_str(name),
            DescriptorExpr::ReifiedClass(name) => {
                output.push_str(name);
                output.push_str("::class");
            }
            DescriptorExpr::String(s) => {
                output.push('"');
                output.extend(s.escape_default());
                output.push('"');
            }
            DescriptorExpr::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
            DescriptorExpr::Call { args, helper } if args.is_empty() => {
                self.write_callee(output, helper.name());
                output.push_str("()");
            }
            DescriptorExpr::Array(items) if items.is_empty() => output.push_str("[]"),
            _ => return false,
        }
        true
    }

    fn write_compact(&self, output: &mut String, expr: &DescriptorExpr) {
        if self.write_leaf(output, expr) {
            return;
        }
        let (open, close, items) = match expr {
            DescriptorExpr::Call { helper, args } => {
                self.write_callee(output, helper.name());
                ("(", ")", args)
            }
            DescriptorExpr::Array(items) => ("[", "]", items),
            _ => unreachable!("leaves handled above"),
        };
        output.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            self.write_compact(output, item);
        }
        output.push_str(close);
    }

    fn write_tree(&self, output: &mut String, expr: &DescriptorExpr, level: usize) {
        if self.write_leaf(output, expr) {
            return;
        }
        let (open, close, items) = match expr {
            DescriptorExpr::Call { helper, args } => {
                self.write_callee(output, helper.name());
                ("(", ")", args)
            }
            DescriptorExpr::Array(items) => ("[", "]", items),
            _ => unreachable!("leaves handled above"),
        };
        let prefix = " ".repeat(self.indent * (level + 1));
        output.push_str(open);
        output.push('\n');
        for (i, item) in items.iter().enumerate() {
            output.push_str(&prefix);
            self.write_tree(output, item, level + 1);
            if i + 1 < items.len() {
                output.push(',');
            }
            output.push('\n');
        }
        output.push_str(&" ".repeat(self.indent * level));
        output.push_str(close);
    }
}
