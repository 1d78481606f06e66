use serde::Serialize;

use crate::model::AdditionalDataType;

/// Free-form data attached to a message.
///
/// Values are kept as the raw text of each child element; the child element is
/// named after the data type keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdditionalData {
    pub data_type: Option<AdditionalDataType>,
    pub meaning: Option<String>,
    pub values: Vec<String>,
}

impl AdditionalData {
    pub fn new(data_type: AdditionalDataType, meaning: impl Into<String>) -> Self {
        AdditionalData {
            data_type: Some(data_type),
            meaning: Some(meaning.into()),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn data_type(&self) -> AdditionalDataType {
        self.data_type.unwrap_or_default()
    }
}
