//! Pin map validation and grouping.
//!
//! A pin map binds named logical signals to physical pins, each entry
//! carrying electrical-mode metadata. Construction is one atomic batch:
//! the whole raw mapping is validated first ([`validate`]), every entry is
//! then parsed through the family's pin-name grammar and mode vocabulary
//! ([`family`], [`mode`]), and the result is sorted into canonical
//! (port, pin-number) order. The map is immutable afterwards and is queried
//! for iteration, port usage and functional grouping ([`grouping`]).

pub mod family;
pub mod grouping;
pub mod mode;
mod validate;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use family::{PinFamily, PortPin};
use mode::{InitialLevel, PinMode};

/// Errors raised while constructing a pin map. All are fatal: construction
/// either yields a fully parsed map or the first violation encountered in
/// the fixed validation order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinMapError {
    #[error("no '{attribute}' attribute supplied for '{pin_name}'")]
    MissingAttribute {
        pin_name: String,
        attribute: &'static str,
    },

    #[error(
        "pin {pin_name} (\"{name}\") has invalid value for '{attribute}': {value}; allowed are only {allowed}"
    )]
    InvalidAttributeValue {
        pin_name: String,
        name: String,
        attribute: &'static str,
        value: String,
        allowed: String,
    },

    #[error(
        "invalid keyword(s) {keys} specified for pin {pin_name} (\"{name}\"); allowed are only {allowed}"
    )]
    InvalidAttributeKey {
        pin_name: String,
        name: String,
        keys: String,
        allowed: String,
    },

    #[error("duplicate name '{name}' supplied for '{pin_name}'")]
    DuplicateName { pin_name: String, name: String },

    #[error("pin name '{pin_name}' is invalid: {reason}")]
    InvalidPinName { pin_name: String, reason: String },
}

/// A scalar attribute value as supplied by the caller.
///
/// The attribute vocabulary is strings, booleans and integers only; anything
/// else in the input fails TOML deserialization before validation starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

/// One raw pin definition: attribute key to scalar value.
pub type RawPinDef = BTreeMap<String, AttrValue>;

/// The raw input mapping, pin-name to attribute record. `BTreeMap` iteration
/// gives the lexicographic order the validator's deterministic error
/// reporting relies on.
pub type RawPinMap = BTreeMap<String, RawPinDef>;

/// The validated, typed form of one pin map entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParsedPin {
    pub pin: PortPin,
    pub name: String,
    pub mode: PinMode,
    pub invert: Option<bool>,
    pub af: Option<u32>,
    pub speed: Option<u32>,
    pub init: Option<bool>,
    pub initial: Option<InitialLevel>,
}

impl ParsedPin {
    /// Whether the pin is actively initialized; defaults to true.
    pub fn init_enabled(&self) -> bool {
        self.init.unwrap_or(true)
    }

    /// All attributes except the redundant pin identifier, for diagnostics.
    fn attributes_line(&self) -> String {
        let mut line = format!("name=\"{}\" mode={}", self.name, self.mode.token());
        if let Some(invert) = self.invert {
            line.push_str(&format!(" invert={invert}"));
        }
        if let Some(af) = self.af {
            line.push_str(&format!(" af={af}"));
        }
        if let Some(speed) = self.speed {
            line.push_str(&format!(" speed={speed}"));
        }
        if let Some(init) = self.init {
            line.push_str(&format!(" init={init}"));
        }
        if let Some(initial) = self.initial {
            line.push_str(&format!(" initial={initial}"));
        }
        line
    }
}

/// Grouping key for pins that can share one generated initialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalGroupKey {
    pub port: char,
    pub mode: PinMode,
    pub speed: Option<u32>,
    pub init: bool,
}

impl FunctionalGroupKey {
    fn for_pin(pin: &ParsedPin) -> Self {
        FunctionalGroupKey {
            port: pin.pin.port,
            mode: pin.mode,
            speed: pin.speed,
            init: pin.init_enabled(),
        }
    }

    /// Canonicalized form for group ordering: an absent speed compares as 0.
    fn canonical(&self) -> (char, PinMode, u32, bool) {
        (self.port, self.mode, self.speed.unwrap_or(0), self.init)
    }
}

impl fmt::Display for FunctionalGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port={} mode={}", self.port, self.mode.token())?;
        match self.speed {
            Some(speed) => write!(f, " speed={speed}")?,
            None => write!(f, " speed=-")?,
        }
        write!(f, " init={}", self.init)
    }
}

/// A validated pin map: an immutable sequence of [`ParsedPin`] in canonical
/// (port, pin-number) order.
#[derive(Debug, Clone)]
pub struct PinMap {
    pins: Vec<ParsedPin>,
}

impl PinMap {
    /// Build a pin map from a raw definition mapping using `family` for the
    /// pin-name grammar and mode vocabulary.
    ///
    /// The whole mapping is validated before any entry is parsed; the first
    /// violation aborts construction.
    pub fn new<F: PinFamily>(family: &F, defs: &RawPinMap) -> Result<Self, PinMapError> {
        validate::plausibilize(defs)?;
        let mut pins = defs
            .iter()
            .map(|(pin_name, def)| parse_pin_definition(family, pin_name, def))
            .collect::<Result<Vec<_>, _>>()?;
        pins.sort_by_key(|pin| pin.pin);
        Ok(PinMap { pins })
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Pins in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedPin> {
        self.pins.iter()
    }

    /// Distinct port letters present in the map.
    pub fn used_ports(&self) -> BTreeSet<char> {
        self.pins.iter().map(|pin| pin.pin.port).collect()
    }

    /// Group pins by a caller-supplied key; see [`grouping::group_sorted`]
    /// for the ordering rules. Recomputed from the immutable sequence on
    /// every call, so the result can be requested any number of times.
    pub fn grouped<K, C>(
        &self,
        key_of: impl Fn(&ParsedPin) -> K,
        canon: impl Fn(&K) -> C,
    ) -> Vec<(K, Vec<&ParsedPin>)>
    where
        K: PartialEq,
        C: Ord,
    {
        grouping::group_sorted(self.pins.iter(), |pin| key_of(pin), canon)
    }

    /// Family default grouping: pins sharing (port, mode, speed, init) can be
    /// initialized by one generated call.
    pub fn functional_groups(&self) -> Vec<(FunctionalGroupKey, Vec<&ParsedPin>)> {
        self.grouped(FunctionalGroupKey::for_pin, FunctionalGroupKey::canonical)
    }

    /// Diagnostic listing of every pin on stdout, one line per pin.
    pub fn dump(&self) {
        for line in self.dump_lines() {
            println!("{line}");
        }
    }

    /// The lines [`dump`](Self::dump) prints: `"<pin>: <attributes>"`.
    pub fn dump_lines(&self) -> Vec<String> {
        self.pins
            .iter()
            .map(|pin| format!("{}: {}", pin.pin, pin.attributes_line()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PinMap {
    type Item = &'a ParsedPin;
    type IntoIter = std::slice::Iter<'a, ParsedPin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}

fn parse_pin_definition<F: PinFamily>(
    family: &F,
    pin_name: &str,
    def: &RawPinDef,
) -> Result<ParsedPin, PinMapError> {
    let pin = family.parse_pin_name(pin_name)?;

    // Validation has already established that name and mode are present.
    let name_value = def.get("name").ok_or_else(|| PinMapError::MissingAttribute {
        pin_name: pin_name.to_string(),
        attribute: "name",
    })?;
    let name = typed_attr(pin_name, &name_value.to_string(), def, "name", "a string", AttrValue::as_str)?
        .unwrap_or_default()
        .to_string();

    let unknown: Vec<&str> = def
        .keys()
        .map(String::as_str)
        .filter(|key| !family.allowed_keys().iter().any(|allowed| allowed == key))
        .collect();
    if !unknown.is_empty() {
        return Err(PinMapError::InvalidAttributeKey {
            pin_name: pin_name.to_string(),
            name: name.clone(),
            // BTreeMap keys are already sorted.
            keys: unknown.join(", "),
            allowed: family.allowed_keys().join(", "),
        });
    }

    let mode_token = typed_attr(
        pin_name,
        &name,
        def,
        "mode",
        &PinMode::token_list(),
        AttrValue::as_str,
    )?
    .ok_or_else(|| PinMapError::MissingAttribute {
        pin_name: pin_name.to_string(),
        attribute: "mode",
    })?;
    let mode = family.parse_mode(pin_name, &name, mode_token)?;

    let invert = typed_attr(pin_name, &name, def, "invert", "a boolean", AttrValue::as_bool)?;
    let init = typed_attr(pin_name, &name, def, "init", "a boolean", AttrValue::as_bool)?;
    let af = typed_attr(pin_name, &name, def, "af", "a non-negative integer", |value| {
        value.as_int().and_then(|i| u32::try_from(i).ok())
    })?;
    let speed = typed_attr(pin_name, &name, def, "speed", "a non-negative integer", |value| {
        value.as_int().and_then(|i| u32::try_from(i).ok())
    })?;
    let initial = typed_attr(
        pin_name,
        &name,
        def,
        "initial",
        &InitialLevel::token_list(),
        |value| value.as_str().and_then(InitialLevel::from_token),
    )?;

    Ok(ParsedPin {
        pin,
        name,
        mode,
        invert,
        af,
        speed,
        init,
        initial,
    })
}

/// Extract an optional attribute, mapping a wrong-typed or out-of-vocabulary
/// value to [`PinMapError::InvalidAttributeValue`].
fn typed_attr<'d, T>(
    pin_name: &str,
    name: &str,
    def: &'d RawPinDef,
    attribute: &'static str,
    allowed: &str,
    extract: impl Fn(&'d AttrValue) -> Option<T>,
) -> Result<Option<T>, PinMapError> {
    match def.get(attribute) {
        None => Ok(None),
        Some(value) => {
            extract(value)
                .map(Some)
                .ok_or_else(|| PinMapError::InvalidAttributeValue {
                    pin_name: pin_name.to_string(),
                    name: name.to_string(),
                    attribute,
                    value: value.to_string(),
                    allowed: allowed.to_string(),
                })
        }
    }
}
