//! JSON type files
//!
//! A type file carries the declarations a set of resolved types refers to,
//! followed by the types to lower. Ids are positions in the declaration lists.
//!
//! ```json
//! {
//!   "classes": [{ "name": "List", "kind": "interface" }, { "name": "String" }],
//!   "type_parameters": [{ "name": "T", "reified": true }],
//!   "types": [{ "name": "strings", "ty": { "concrete": { "classifier": { "class": 0 } } } }]
//! }
//! ```

use reify_types::{ClassifierDecl, ResolvedType, TypeContext, TypeError, TypeParameter};
use serde::Deserialize;

/// One type to lower
#[derive(Debug, Clone, Deserialize)]
pub struct TypeEntry {
    /// Label used in output; defaults to the rendered type
    #[serde(default)]
    pub name: Option<String>,
    pub ty: ResolvedType,
}

impl TypeEntry {
    pub fn label(&self, ctx: &TypeContext) -> String {
        self.name.clone().unwrap_or_else(|| ctx.display(&self.ty))
    }
}

/// Parsed type file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeFile {
    #[serde(default)]
    pub classes: Vec<ClassifierDecl>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

impl TypeFile {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Build the declaration context and check every id in the file
    pub fn into_parts(self) -> Result<(TypeContext, Vec<TypeEntry>), TypeError> {
        let ctx = TypeContext::from_declarations(self.classes, self.type_parameters)?;
        ctx.validate_all()?;
        for entry in &self.types {
            ctx.validate(&entry.ty)?;
        }
        Ok((ctx, self.types))
    }
}
