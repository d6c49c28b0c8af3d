//! Dissect captured Ethernet frames.
//!
//! Reads a capture of hex encoded frames, one per line, or a single raw binary frame, and prints
//! the recognized headers and the flow key of each frame. Call example:
//!
//! * `wireview-dump capture.txt --payload`
//! * `RUST_LOG=wireview=trace wireview-dump --binary frame.bin`
mod capture;
mod config;

use std::error::Error;
use std::fs;
use std::io::{self, Read};

use log::{info, warn};
use wireview::wire;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = config::Config::from_args();

    let input = read_input(&config)?;
    let frames = if config.binary {
        vec![input]
    } else {
        capture::parse_hex(&String::from_utf8(input)?)?
    };
    info!("read {} frames", frames.len());

    let mut failed = 0;
    for (idx, frame) in frames.iter().enumerate() {
        if !print_frame(idx, frame, config.payload) {
            failed += 1;
        }
    }

    if failed > 0 {
        warn!("{} of {} frames could not be dissected", failed, frames.len());
    }

    Ok(())
}

fn init_logging() {
    env_logger::builder()
        .format_timestamp(None)
        .format_module_path(false)
        .init();
}

fn read_input(config: &config::Config) -> io::Result<Vec<u8>> {
    match &config.input {
        Some(path) => fs::read(path),
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            Ok(data)
        },
    }
}

fn print_frame(idx: usize, frame: &[u8], show_payload: bool) -> bool {
    let dissection = match wire::dissect(frame) {
        Ok(dissection) => dissection,
        Err(err) => {
            println!("#{} ({} octets): {}", idx, frame.len(), err);
            return false;
        },
    };

    println!("#{} {}", idx, dissection);
    if let Some(key) = dissection.flow_key() {
        println!("    flow {} hash={:016x}", key, key.hash_value());
    }

    if show_payload {
        println!("    payload {}", hex::encode(dissection.payload()));
    }

    true
}
