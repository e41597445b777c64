//! Miscellaneous helper functions.

use core::panic::PanicInfo;
use log::{LevelFilter, Metadata, Record};
use rtt_target::{rprintln, rtt_init, set_print_channel};

/// `log` backend printing over RTT.
struct RttLogger;

impl log::Log for RttLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            rprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: RttLogger = RttLogger;

/// Setup RTT and route the `log` macros to it. Call once, first thing in `main`.
pub fn init_logging(level: LevelFilter) {
    let channels = rtt_init! {
        up: {
            0: {
                size: 4096
                mode: BlockIfFull
                name: "Terminal"
            }
        }
    };
    set_print_channel(channels.up.0);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[inline(never)]
#[panic_handler]
/// Custom handler to use RTT when a panic occurs.
fn panic(_info: &PanicInfo) -> ! {
    rprintln!("Panicked!");
    rprintln!("{:?}", _info);
    loop {}
}
