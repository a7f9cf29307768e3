//! mcucfg: validation and normalization of microcontroller build-configuration
//! artifacts for downstream code generators.
//!
//! Two artifact kinds are covered:
//!
//! - a *pin map*: named logical signals bound to physical pins, each carrying
//!   electrical-mode metadata (see [`pinmap`]),
//! - an *interrupt vector table*: handler names at fixed 4-byte offsets,
//!   derived from a simple text description (see [`vector_table`]).
//!
//! Both are built once from caller-supplied input, validated fail-fast, and
//! queried read-only for the rest of their lifetime.

pub mod config;
pub mod pinmap;
pub mod vector_table;

pub use pinmap::family::{PinFamily, PortPin, StmCortexM};
pub use pinmap::mode::{InitialLevel, PinMode};
pub use pinmap::{AttrValue, FunctionalGroupKey, ParsedPin, PinMap, PinMapError, RawPinMap};
pub use vector_table::{VectorTable, VectorTableError};
