//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter       | Implements  | Connects to                    |
//! |---------------|-------------|--------------------------------|
//! | `gpio`        | InputPort   | HAT buttons (embedded-hal/rppal)|
//! | `keyboard`    | InputPort   | stdin (simulation)             |
//! | `terminal`    | Renderer    | stdout                         |
//! | `time`        | Clock       | `std::time::Instant`           |
//! | `log_sink`    | EventSink   | `log` facade                   |
//! | `config_file` | ConfigPort  | JSON file                      |

pub mod config_file;
pub mod gpio;
pub mod keyboard;
pub mod log_sink;
pub mod terminal;
pub mod time;
