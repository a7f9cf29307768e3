//! Family-specific pin naming: the capability seam between the generic pin
//! map pipeline and one microcontroller family's grammar and vocabulary.

use std::fmt;

use super::PinMapError;
use super::mode::PinMode;

/// A physical pin: port letter plus pin number within the port.
///
/// Ordering is port letter first, then numeric pin number, which is the
/// canonical iteration order of a pin map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortPin {
    pub port: char,
    pub pin_no: u8,
}

impl fmt::Display for PortPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port, self.pin_no)
    }
}

/// Per-family policy injected into the generic [`PinMap`](super::PinMap)
/// pipeline: pin-name grammar, mode vocabulary and allowed attribute keys.
///
/// Swapping the family swaps only this policy; validation, sorting and
/// grouping stay in one place.
pub trait PinFamily {
    /// Parse a pin-name token into a [`PortPin`].
    fn parse_pin_name(&self, pin_name: &str) -> Result<PortPin, PinMapError>;

    /// Coerce a raw mode token into a [`PinMode`]. `pin_name` and `name`
    /// provide error context.
    fn parse_mode(&self, pin_name: &str, name: &str, token: &str) -> Result<PinMode, PinMapError>;

    /// Attribute keys a pin definition may carry, sorted.
    fn allowed_keys(&self) -> &'static [&'static str];
}

/// STM32 Cortex-M family: pin names are `P`, one uppercase port letter and a
/// 1-2 digit pin number in `[0, 31]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StmCortexM;

impl StmCortexM {
    /// Pin numbers above this are invalid on this family.
    const MAX_PIN_NO: u8 = 31;

    const ALLOWED_KEYS: [&'static str; 7] =
        ["af", "init", "initial", "invert", "mode", "name", "speed"];
}

impl PinFamily for StmCortexM {
    fn parse_pin_name(&self, pin_name: &str) -> Result<PortPin, PinMapError> {
        let invalid = |reason: String| PinMapError::InvalidPinName {
            pin_name: pin_name.to_string(),
            reason,
        };

        // Anchored grammar: the whole token must be P<port><1-2 digits>.
        let bytes = pin_name.as_bytes();
        let shape_ok = (3..=4).contains(&bytes.len())
            && bytes[0] == b'P'
            && bytes[1].is_ascii_uppercase()
            && bytes[2..].iter().all(|b| b.is_ascii_digit());
        if !shape_ok {
            return Err(invalid(
                "expected 'P', an uppercase port letter and 1-2 decimal digits".to_string(),
            ));
        }

        let pin_no: u8 = pin_name[2..]
            .parse()
            .map_err(|_| invalid("pin number is not a decimal number".to_string()))?;
        if pin_no > Self::MAX_PIN_NO {
            return Err(invalid(format!(
                "pin number must be between 0 and {}",
                Self::MAX_PIN_NO
            )));
        }

        Ok(PortPin {
            port: bytes[1] as char,
            pin_no,
        })
    }

    fn parse_mode(&self, pin_name: &str, name: &str, token: &str) -> Result<PinMode, PinMapError> {
        PinMode::from_token(token).ok_or_else(|| PinMapError::InvalidAttributeValue {
            pin_name: pin_name.to_string(),
            name: name.to_string(),
            attribute: "mode",
            value: token.to_string(),
            allowed: PinMode::token_list(),
        })
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        &Self::ALLOWED_KEYS
    }
}
