//! Rotating daily file logger
//!
//! Writes leveled lines to `<name>-<YYYYMMDD>.log`, rolls over at day
//! boundaries and archives or purges older days.

mod clock;
mod console;
mod line;
mod rotation;
mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use console::{Captured, Console, MemoryConsole, StdConsole};
pub use line::{format_line, Level, UnknownLevel};
pub use rotation::{archive_log, rotate, RotationReport};
pub use writer::{debug_from_env, LoggerBuilder, RotatingFileLogger};
