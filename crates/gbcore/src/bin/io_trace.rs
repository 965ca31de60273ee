use std::path::PathBuf;

use anyhow::{Context, Result};
use gbcore::{GameBoy, MachineConfig};

const USAGE: &str = "Usage: io_trace <program.bin> [steps] [load_addr_hex]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let program_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });
    let steps: u64 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid step count '{arg}'"))?,
        None => 1_000_000,
    };
    let load_address = match args.next() {
        Some(arg) => u16::from_str_radix(arg.trim_start_matches("0x"), 16)
            .with_context(|| format!("invalid load address '{arg}'"))?,
        None => 0x0100,
    };

    let program = std::fs::read(&program_path)
        .with_context(|| format!("failed to read program '{}'", program_path.display()))?;

    let config = MachineConfig::builder()
        .load_address(load_address)
        .entry_point(load_address)
        .build();
    let mut gb = GameBoy::new(config)?;
    gb.load(&program);

    log::info!("Running '{}' for up to {steps} steps", program_path.display());
    let cycles = gb.run(steps);

    println!("{}", String::from_utf8_lossy(gb.serial_output()));
    println!(
        "{cycles} T-cycles, PC=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X} SP=0x{:04X}{}",
        gb.cpu.regs.pc,
        gb.cpu.regs.af(),
        gb.cpu.regs.bc(),
        gb.cpu.regs.de(),
        gb.cpu.regs.hl(),
        gb.cpu.regs.sp,
        if gb.cpu.is_locked() { " (locked)" } else { "" },
    );
    Ok(())
}
