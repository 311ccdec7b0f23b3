use clap::Parser;
use gb_core::core::machine::Machine;
use gb_systems::GameBoySystem;

mod audio;
mod config;
mod emulator;
mod input;
mod nvram;
mod overlay;
mod serial;
mod video;

/// A Game Boy / Game Boy Color emulator.
#[derive(Parser)]
struct Args {
    /// Path to a .gb or .gbc ROM file.
    rom: std::path::PathBuf,

    /// Window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Listen for a serial link-cable peer on this TCP port.
    #[arg(long)]
    link_listen: Option<u16>,

    /// Connect to a serial link-cable peer at host:port.
    #[arg(long)]
    link_connect: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let cfg = config::load();

    let rom = std::fs::read(&args.rom).unwrap_or_else(|e| {
        eprintln!("failed to read {}: {e}", args.rom.display());
        std::process::exit(1);
    });

    let mut machine = GameBoySystem::new(rom).unwrap_or_else(|e| {
        eprintln!("failed to load rom: {e}");
        std::process::exit(1);
    });

    let nvram_path = args.rom.with_extension("sav");
    match nvram::load(&nvram_path) {
        Ok(data) => machine.load_nvram(&data),
        Err(e) => log::info!("no nvram loaded for {}: {e}", args.rom.display()),
    }

    let serial_link = resolve_serial_link(&args, &cfg);

    let key_map = input::default_key_map(machine.input_map());
    machine.reset();

    let scale = args.scale.unwrap_or(cfg.scale);
    let save_state_path = args.rom.with_extension("state");
    emulator::run(&mut machine, &key_map, scale, cfg.audio_sample_rate, serial_link, &save_state_path);

    if let Some(data) = machine.save_nvram() {
        if let Err(e) = nvram::save(&nvram_path, &data) {
            log::warn!("failed to save nvram: {e}");
        }
    }
}

fn resolve_serial_link(args: &Args, cfg: &config::Config) -> Option<serial::SerialLink> {
    if let Some(port) = args.link_listen {
        return serial::SerialLink::listen(port).ok();
    }
    if let Some(addr) = &args.link_connect {
        return serial::SerialLink::connect(addr).ok();
    }
    let cfg_serial = cfg.serial.as_ref()?;
    if let Some(port) = cfg_serial.listen_port {
        return serial::SerialLink::listen(port).ok();
    }
    if let Some(addr) = &cfg_serial.connect {
        return serial::SerialLink::connect(addr).ok();
    }
    None
}
