use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ZyntraError;

/// 8-bit sRGB colour, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Rgb {
    type Err = ZyntraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || ZyntraError::invalid_param(format!("Invalid colour '{}'", s));

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let green: Rgb = "#00A878".parse().unwrap();
        assert_eq!(green, Rgb(0x00, 0xa8, 0x78));
        assert_eq!(green.hex(), "#00a878");
        assert_eq!("fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb(0x0b, 0x13, 0x2b)).unwrap();
        assert_eq!(json, "\"#0b132b\"");
    }
}
