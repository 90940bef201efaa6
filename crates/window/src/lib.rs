pub mod config;
pub mod error;
pub mod fixed;
pub mod ring;
pub mod rolling;
pub mod stats;

mod evictor;

pub use config::{load_from_file, load_from_str, LoadError, WindowConfig};
pub use error::WindowError;
pub use fixed::FixedWindow;
pub use rolling::RollingWindow;
pub use stats::{MovingAverage, WindowStats};
pub use tally_clock::{ClockSource, ManualClock, SystemClock};
