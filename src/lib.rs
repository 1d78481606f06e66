#![deny(unused_must_use)]
#![forbid(unsafe_code)]
//! A strict XML codec for IDMEF (RFC 4765) messages.
//!
//! ```
//! use idmef::{IdmefParser, IdmefSerializer};
//!
//! let xml = r#"<idmef:IDMEF-Message version="1.0" xmlns:idmef="http://iana.org/idmef">
//!   <idmef:Heartbeat messageid="hb-1">
//!     <idmef:Analyzer analyzerid="sensor-1"/>
//!     <idmef:CreateTime ntpstamp="0xbc722ebe.0x00000000">2000-03-09T14:07:58Z</idmef:CreateTime>
//!     <idmef:HeartbeatInterval>600</idmef:HeartbeatInterval>
//!   </idmef:Heartbeat>
//! </idmef:IDMEF-Message>"#;
//!
//! let message = IdmefParser::new().parse(xml).unwrap();
//! assert_eq!(message.message_id(), Some("hb-1"));
//!
//! let written = IdmefSerializer::new().serialize(&message).unwrap();
//! assert_eq!(IdmefParser::new().parse(&written).unwrap(), message);
//! ```

#[macro_use]
mod macros;

pub mod err;
pub mod model;
pub mod tag_names;

mod idmef_parser;
mod idmef_serializer;
mod parse;
mod serialize;
mod utils;
mod xml_output;
mod xml_reader;

pub use err::{IdmefError, Result, TagNamesError, ValueError};
pub use idmef_parser::{IdmefParser, ParserSettings};
pub use idmef_serializer::{IdmefSerializer, SerializerSettings};
pub use model::*;
pub use tag_names::{Tag, TagNames};
pub use utils::{decode_buffer, encode_buffer, format_portlist, parse_portlist};
