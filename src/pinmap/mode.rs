//! Closed enumerations for the electrical pin configuration vocabulary.

use std::cmp::Ordering;
use std::fmt;

/// Electrical/functional configuration of a pin.
///
/// Each variant carries a canonical external token (the value written in a
/// pin map definition) and the name the runtime library uses for the same
/// configuration. The set is closed: unknown tokens are rejected during pin
/// map construction, and the mapping functions below are exhaustive matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinMode {
    Analog,
    InputFloat,
    InputPullup,
    InputPulldown,
    OutputPushPull,
    OutputOpenDrain,
    AlternateFunction,
    AlternateFunctionOpenDrain,
}

impl PinMode {
    pub const ALL: [PinMode; 8] = [
        PinMode::Analog,
        PinMode::InputFloat,
        PinMode::InputPullup,
        PinMode::InputPulldown,
        PinMode::OutputPushPull,
        PinMode::OutputOpenDrain,
        PinMode::AlternateFunction,
        PinMode::AlternateFunctionOpenDrain,
    ];

    /// Canonical token used in pin map definitions.
    pub const fn token(self) -> &'static str {
        match self {
            PinMode::Analog => "analog",
            PinMode::InputFloat => "in",
            PinMode::InputPullup => "in-up",
            PinMode::InputPulldown => "in-down",
            PinMode::OutputPushPull => "out",
            PinMode::OutputOpenDrain => "out-od",
            PinMode::AlternateFunction => "af",
            PinMode::AlternateFunctionOpenDrain => "af-od",
        }
    }

    /// Mode name used by the standard peripheral library in generated code.
    pub const fn stdperiph(self) -> &'static str {
        match self {
            PinMode::Analog => "AIN",
            PinMode::InputFloat => "IN_FLOATING",
            PinMode::InputPullup => "IPU",
            PinMode::InputPulldown => "IPD",
            PinMode::OutputPushPull => "Out_PP",
            PinMode::OutputOpenDrain => "Out_OD",
            PinMode::AlternateFunction => "AF_PP",
            PinMode::AlternateFunctionOpenDrain => "AF_OD",
        }
    }

    /// True iff a level can be actively driven, i.e. an `initial` output
    /// level is meaningful for this mode.
    pub const fn settable(self) -> bool {
        matches!(self, PinMode::OutputPushPull | PinMode::OutputOpenDrain)
    }

    /// Exact-match coercion from a canonical token.
    pub fn from_token(token: &str) -> Option<PinMode> {
        PinMode::ALL.into_iter().find(|mode| mode.token() == token)
    }

    /// All canonical tokens, sorted, joined for error messages.
    pub fn token_list() -> String {
        let mut tokens: Vec<&str> = PinMode::ALL.iter().map(|mode| mode.token()).collect();
        tokens.sort_unstable();
        tokens.join(", ")
    }

    const fn variant_name(self) -> &'static str {
        match self {
            PinMode::Analog => "Analog",
            PinMode::InputFloat => "InputFloat",
            PinMode::InputPullup => "InputPullup",
            PinMode::InputPulldown => "InputPulldown",
            PinMode::OutputPushPull => "OutputPushPull",
            PinMode::OutputOpenDrain => "OutputOpenDrain",
            PinMode::AlternateFunction => "AlternateFunction",
            PinMode::AlternateFunctionOpenDrain => "AlternateFunctionOpenDrain",
        }
    }
}

// Ordering is lexicographic by variant name. It exists only as a grouping
// tie-break and carries no electrical meaning.
impl Ord for PinMode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variant_name().cmp(other.variant_name())
    }
}

impl PartialOrd for PinMode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Initial output level requested for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InitialLevel {
    On,
    Off,
    High,
    Low,
}

impl InitialLevel {
    /// Allowed tokens, in the documented order used by error messages.
    pub const TOKENS: [&'static str; 4] = ["on", "off", "high", "low"];

    pub const fn token(self) -> &'static str {
        match self {
            InitialLevel::On => "on",
            InitialLevel::Off => "off",
            InitialLevel::High => "high",
            InitialLevel::Low => "low",
        }
    }

    pub fn from_token(token: &str) -> Option<InitialLevel> {
        match token {
            "on" => Some(InitialLevel::On),
            "off" => Some(InitialLevel::Off),
            "high" => Some(InitialLevel::High),
            "low" => Some(InitialLevel::Low),
            _ => None,
        }
    }

    pub fn token_list() -> String {
        InitialLevel::TOKENS.join(", ")
    }
}

impl fmt::Display for InitialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settable_only_for_output_modes() {
        for mode in PinMode::ALL {
            let expected = matches!(
                mode,
                PinMode::OutputPushPull | PinMode::OutputOpenDrain
            );
            assert_eq!(mode.settable(), expected, "{mode:?}");
        }
    }

    #[test]
    fn token_coercion_is_exact_match() {
        assert_eq!(PinMode::from_token("out"), Some(PinMode::OutputPushPull));
        assert_eq!(PinMode::from_token("af-od"), Some(PinMode::AlternateFunctionOpenDrain));
        assert_eq!(PinMode::from_token("OUT"), None);
        assert_eq!(PinMode::from_token("out "), None);
        assert_eq!(PinMode::from_token("bogus"), None);
    }

    #[test]
    fn token_list_is_sorted() {
        assert_eq!(
            PinMode::token_list(),
            "af, af-od, analog, in, in-down, in-up, out, out-od"
        );
    }

    #[test]
    fn ordering_is_lexicographic_by_variant_name() {
        assert!(PinMode::AlternateFunction < PinMode::Analog);
        assert!(PinMode::InputPulldown < PinMode::InputPullup);
        assert!(PinMode::OutputOpenDrain < PinMode::OutputPushPull);
        assert!(PinMode::Analog < PinMode::InputFloat);
    }

    #[test]
    fn initial_level_vocabulary() {
        assert_eq!(InitialLevel::from_token("high"), Some(InitialLevel::High));
        assert_eq!(InitialLevel::from_token("1"), None);
        assert_eq!(InitialLevel::token_list(), "on, off, high, low");
    }
}
