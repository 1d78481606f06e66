use serde::Serialize;

use crate::model::{AdditionalData, Alert, Analyzer, IdmefTime};

/// Protocol version written when a document does not state one.
pub const DEFAULT_VERSION: &str = "1.0";

/// A complete IDMEF document: exactly one Heartbeat or Alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub version: String,
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MessageBody {
    Heartbeat(Heartbeat),
    Alert(Alert),
}

impl Message {
    pub fn heartbeat(heartbeat: Heartbeat) -> Self {
        Message {
            version: DEFAULT_VERSION.to_owned(),
            body: MessageBody::Heartbeat(heartbeat),
        }
    }

    pub fn alert(alert: Alert) -> Self {
        Message {
            version: DEFAULT_VERSION.to_owned(),
            body: MessageBody::Alert(alert),
        }
    }

    pub fn as_heartbeat(&self) -> Option<&Heartbeat> {
        match &self.body {
            MessageBody::Heartbeat(heartbeat) => Some(heartbeat),
            MessageBody::Alert(_) => None,
        }
    }

    pub fn as_alert(&self) -> Option<&Alert> {
        match &self.body {
            MessageBody::Alert(alert) => Some(alert),
            MessageBody::Heartbeat(_) => None,
        }
    }

    pub fn message_id(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Heartbeat(heartbeat) => heartbeat.message_id.as_deref(),
            MessageBody::Alert(alert) => alert.message_id.as_deref(),
        }
    }
}

/// Analyzer liveness report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heartbeat {
    pub message_id: Option<String>,
    pub analyzer: Analyzer,
    pub create_time: IdmefTime,
    pub analyzer_time: Option<IdmefTime>,
    /// Seconds between heartbeats.
    pub heartbeat_interval: Option<i64>,
    pub additional_data: Vec<AdditionalData>,
}
