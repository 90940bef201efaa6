pub mod manual;
pub mod source;
pub mod system;

pub use manual::ManualClock;
pub use source::{ClockSource, Tick, Ticker};
pub use system::SystemClock;
