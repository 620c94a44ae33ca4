//! Drive the updater from a tiny counter simulation and print the diagram
//!
//! Usage:
//!   cargo run --example replay_demo
//!
//! Set RUST_LOG=debug to see which path every tick takes.

use wavelane_core::{Level, MemoryDiagram, UpdaterConfig, WaveJson, WaveLaneUpdater};

const BUFFER_LEN: usize = 16;
const TICKS: u64 = 40;

fn main() {
    env_logger::init();

    let config = UpdaterConfig::new();
    let mut description = WaveJson::new(["clk", "q0", "q1", "q2"]);
    description.set_buffer_len(BUFFER_LEN);

    let mut diagram = MemoryDiagram::new(description, &config);
    let mut updater = WaveLaneUpdater::new(config);
    let mut counter = 0u8;
    let mut incremental = 0;

    for tick in 0..TICKS {
        let clk = tick % 2 == 0;
        if clk {
            counter = counter.wrapping_add(1);
        }

        let bit = |n: u8| if counter & (1 << n) != 0 { Level::High } else { Level::Low };
        let values = [if clk { Level::High } else { Level::Low }, bit(0), bit(1), bit(2)];

        let was_full = diagram.description().num_ticks() >= BUFFER_LEN;
        if let Err(e) = diagram.description_mut().push_values(&values) {
            eprintln!("Failed to record tick {}: {}", tick, e);
            return;
        }

        let last_values = diagram.description().last_values();
        let report = updater.update(
            &mut diagram,
            Some(last_values.as_str()),
            if was_full { tick } else { 0 },
        );
        if report.is_incremental() {
            incremental += 1;
        }
    }

    println!("{}", diagram.render_text());
    println!(
        "{} ticks, {} incremental updates, {} full redraws",
        TICKS,
        incremental,
        diagram.full_redraws()
    );
}
