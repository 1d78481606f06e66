//! The typed IDMEF message model.
//!
//! Entities are plain owned values. Optional attributes and elements are `Option`,
//! repeated elements are `Vec` (an empty list and an absent list are the same
//! thing on the wire), and elements the RFC marks as required are stored
//! directly, with an empty string standing for "not provided". Nesting that the
//! format allows to recurse (`Analyzer` in `Analyzer`, `File` in `Linkage`) is
//! boxed.

pub mod vocabulary;

mod additional_data;
mod alert;
mod analyzer;
mod assessment;
mod classification;
mod endpoint;
mod file;
mod message;
mod port_range;
mod time;
pub(crate) mod xml;

pub use self::additional_data::AdditionalData;
pub use self::alert::{Alert, AlertIdent, AlertKind, CorrelationAlert, OverflowAlert, ToolAlert};
pub use self::analyzer::{Address, Analyzer, Node, Process};
pub use self::assessment::{Action, Assessment, Confidence, Impact};
pub use self::classification::{Classification, Reference};
pub use self::endpoint::{
    Service, ServiceKind, SnmpService, Source, Target, User, UserId, WebService,
};
pub use self::file::{Checksum, File, FileAccess, Inode, Linkage};
pub use self::message::{DEFAULT_VERSION, Heartbeat, Message, MessageBody};
pub use self::port_range::PortRange;
pub use self::time::{IdmefTime, NtpStamp, Operator};
pub use self::vocabulary::*;

pub use num_bigint_dig::BigInt;

pub(crate) fn serialize_display_opt<T, S>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn serialize_hex<S>(buffer: &[i8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&crate::utils::encode_buffer(buffer))
}
