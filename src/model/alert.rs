use serde::Serialize;

use crate::model::{
    AdditionalData, Analyzer, Assessment, BigInt, Classification, IdmefTime, Source, Target,
};

/// A detected event.
///
/// The fields shared by every alert live here; `kind` selects which of the
/// specialized shapes, if any, this alert takes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alert {
    pub message_id: Option<String>,
    pub analyzer: Analyzer,
    pub create_time: IdmefTime,
    pub classification: Classification,
    pub detect_time: Option<IdmefTime>,
    pub analyzer_time: Option<IdmefTime>,
    pub sources: Vec<Source>,
    pub targets: Vec<Target>,
    pub assessment: Option<Assessment>,
    pub additional_data: Vec<AdditionalData>,
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum AlertKind {
    #[default]
    Plain,
    Tool(ToolAlert),
    Overflow(OverflowAlert),
    Correlation(CorrelationAlert),
}

impl Alert {
    /// Turns this alert into the given specialized shape, keeping every shared field.
    pub fn into_kind(self, kind: AlertKind) -> Self {
        Alert { kind, ..self }
    }

    pub fn tool_alert(&self) -> Option<&ToolAlert> {
        match &self.kind {
            AlertKind::Tool(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn overflow_alert(&self) -> Option<&OverflowAlert> {
        match &self.kind {
            AlertKind::Overflow(overflow) => Some(overflow),
            _ => None,
        }
    }

    pub fn correlation_alert(&self) -> Option<&CorrelationAlert> {
        match &self.kind {
            AlertKind::Correlation(correlation) => Some(correlation),
            _ => None,
        }
    }
}

/// An `alertident`: the `messageid` of a related alert, optionally qualified by its analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertIdent {
    pub analyzer_id: Option<String>,
    pub ident: String,
}

impl AlertIdent {
    pub fn new(ident: impl Into<String>) -> Self {
        AlertIdent {
            analyzer_id: None,
            ident: ident.into(),
        }
    }
}

/// Alerts raised by the use of an attack tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolAlert {
    pub name: String,
    pub command: Option<String>,
    pub alert_idents: Vec<AlertIdent>,
}

/// A buffer overflow attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverflowAlert {
    pub program: String,
    #[serde(serialize_with = "crate::model::serialize_display_opt")]
    pub size: Option<BigInt>,
    /// Raw bytes, signed, as sent to the program.
    #[serde(serialize_with = "crate::model::serialize_hex")]
    pub buffer: Vec<i8>,
}

/// Alerts grouped by a correlating analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationAlert {
    pub name: String,
    pub alert_idents: Vec<AlertIdent>,
}
