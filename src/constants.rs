//! Sizing constants and the literal keys the record scanner looks for.

const ONE_KB: usize = 1024;

/// Default number of bytes mapped per window.
pub const WINDOW_SIZE: usize = 8 * ONE_KB * ONE_KB;

/// Smallest accepted window: one window must be able to hold any UTF-8 character.
pub const MIN_WINDOW_SIZE: usize = 4;

/// Opcode sentinel meaning "match any operation".
pub const NO_OP: &str = "NO_OP";

pub const NAMESPACE_KEY: &str = "ns";
pub const OPCODE_KEY: &str = "op";
pub const OBJECT_KEY: &str = "o";

/// Last namespace segment of a database command record (`db.$cmd`).
pub const COMMAND_COLLECTION: &str = "$cmd";

/// Legacy index-creation namespace suffix (`db.system.indexes`).
pub const SYSTEM_INDEXES: &str = "system.indexes";
