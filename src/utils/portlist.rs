use crate::err::ValueError;
use crate::model::PortRange;

/// Parses `N` and `N-M` entries separated by commas.
///
/// `N-N` is accepted and collapses to the single port `N`.
pub fn parse_portlist(text: &str) -> Result<Vec<PortRange>, ValueError> {
    let invalid = || ValueError::InvalidPortList {
        value: text.to_owned(),
    };

    let mut ranges = Vec::new();
    for entry in text.split(',') {
        let entry = entry.trim();
        let range = match entry.split_once('-') {
            Some((min, max)) => {
                let min = parse_port(min).ok_or_else(invalid)?;
                let max = parse_port(max).ok_or_else(invalid)?;
                if min == max {
                    PortRange::single(min)
                } else {
                    PortRange::new(min, max)?
                }
            }
            None => PortRange::single(parse_port(entry).ok_or_else(invalid)?),
        };
        ranges.push(range);
    }

    Ok(ranges)
}

fn parse_port(text: &str) -> Option<u16> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

pub fn format_portlist(ranges: &[PortRange]) -> String {
    ranges
        .iter()
        .map(PortRange::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
