//! Descriptor IR
//!
//! The expression language emitted by descriptor lowering.
//!
//! # Structure
//!
//! - `DescriptorExpr` - Runtime construction expression tree
//! - `RuntimeHelper` - Closed set of runtime functions a call may address
//! - `PrettyPrinter` - Renders descriptor trees as runtime call syntax

pub mod expr;
pub mod helper;
pub mod pretty;

pub use expr::DescriptorExpr;
pub use helper::RuntimeHelper;
pub use pretty::{PrettyPrint, PrettyPrinter};
