use serde::Serialize;

use crate::model::ReferenceOrigin;

/// The name of an alert, with pointers to further information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub ident: Option<String>,
    pub text: Option<String>,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub origin: Option<ReferenceOrigin>,
    pub meaning: Option<String>,
    pub name: String,
    pub url: String,
}

impl Reference {
    pub fn origin(&self) -> ReferenceOrigin {
        self.origin.unwrap_or_default()
    }
}
