//! Whole-batch validation of a raw pin map definition.
//!
//! Runs before any per-entry parsing so structural errors are discoverable
//! independent of parse order. Entries are visited in lexicographic
//! pin-name order (the map is a `BTreeMap`), which makes the first reported
//! violation deterministic across runs.

use std::collections::HashSet;

use super::mode::InitialLevel;
use super::{AttrValue, PinMapError, RawPinMap};

/// Schema-level checks over the full raw mapping, fail-fast.
///
/// Per entry, in order: `name` present, `mode` present, `initial` (if given)
/// within its vocabulary, `name` value globally unique. Uniqueness spans the
/// raw mapping, including entries that would later fail to parse.
pub(crate) fn plausibilize(defs: &RawPinMap) -> Result<(), PinMapError> {
    let mut seen_names: HashSet<&AttrValue> = HashSet::new();
    for (pin_name, def) in defs {
        let Some(name) = def.get("name") else {
            return Err(PinMapError::MissingAttribute {
                pin_name: pin_name.clone(),
                attribute: "name",
            });
        };
        if !def.contains_key("mode") {
            return Err(PinMapError::MissingAttribute {
                pin_name: pin_name.clone(),
                attribute: "mode",
            });
        }
        if let Some(initial) = def.get("initial") {
            let valid = initial
                .as_str()
                .is_some_and(|token| InitialLevel::from_token(token).is_some());
            if !valid {
                return Err(PinMapError::InvalidAttributeValue {
                    pin_name: pin_name.clone(),
                    name: name.to_string(),
                    attribute: "initial",
                    value: initial.to_string(),
                    allowed: InitialLevel::token_list(),
                });
            }
        }
        if !seen_names.insert(name) {
            return Err(PinMapError::DuplicateName {
                pin_name: pin_name.clone(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
