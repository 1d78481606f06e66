use std::fmt;

use serde::Serialize;

use crate::err::ValueError;

/// An inclusive range of ports. `min == max` is a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortRange {
    min: u16,
    max: u16,
}

impl PortRange {
    /// A range spanning more than one port; `min` must be below `max`.
    pub fn new(min: u16, max: u16) -> Result<Self, ValueError> {
        if min >= max {
            return Err(ValueError::InvalidPortRange { min, max });
        }
        Ok(PortRange { min, max })
    }

    pub fn single(port: u16) -> Self {
        PortRange {
            min: port,
            max: port,
        }
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.min..=self.max).contains(&port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}
