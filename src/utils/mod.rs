mod hexbuf;
mod portlist;
mod time;

pub use self::hexbuf::{decode_buffer, encode_buffer};
pub use self::portlist::{format_portlist, parse_portlist};
pub use self::time::{
    format_date_time, ntp_parts_from_timestamp, ntp_parts_to_timestamp, parse_date_time,
};
