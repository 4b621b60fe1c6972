/// Decimal places kept on budget line and budget totals
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept on aggregated quantities
pub const QUANTITY_DECIMAL_PRECISION: u32 = 4;

/// Smallest and largest phase count a project may declare per tension level
pub const MIN_PHASES: i32 = 1;
pub const MAX_PHASES: i32 = 3;

/// Maximum length of a catalog code
pub const MAX_CODE_LENGTH: usize = 32;

/// Unit of measure used for counted items (poles, screws, connectors)
pub const UNIT_EACH: &str = "UN";

/// Unit of measure used for cables
pub const UNIT_METER: &str = "M";
