//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time.
//!
//! It also bakes the initial clock and display settings into `config.rs`:
//!
//! - `UTC_EPOCH`: build time, used as wall-clock time until the clock is set over BLE
//! - `UTC_OFFSET`: offset of local time in seconds, `ULTRA_UTC_OFFSET` or the build host's offset
//! - `CLOCK_24H`: clock style, `ULTRA_CLOCK_24H` (`0` for 12 hour style, default `1`)

use chrono::{Local, Offset};
use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    let now = Local::now();
    let utc_offset = match env::var("ULTRA_UTC_OFFSET") {
        Ok(offset) => offset
            .parse::<i32>()
            .expect("ULTRA_UTC_OFFSET must be an offset in seconds"),
        Err(_) => now.offset().fix().local_minus_utc(),
    };
    let clock_24h = env::var("ULTRA_CLOCK_24H")
        .map(|value| value != "0")
        .unwrap_or(true);

    File::create(out.join("config.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "pub const UTC_EPOCH: i64 = {};\n\
             pub const UTC_OFFSET: i32 = {};\n\
             pub const CLOCK_24H: bool = {};\n",
            now.timestamp(),
            utc_offset,
            clock_24h,
        ))
        .unwrap();

    // Without `rerun-if-changed` the script runs on every build, keeping the epoch current.
}
