use std::io::IsTerminal;

use android_automation::cli::commands::{
    DeviceContext, cmd_back, cmd_capture, cmd_devices, cmd_extract, cmd_long_press, cmd_swipe,
    cmd_tap, cmd_text,
};
use android_automation::cli::config::{
    Cli, Commands, build_device_settings, build_extract_config, load_config, log_level,
};
use android_automation::device::bridge::AdbBridge;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose));

    let config = load_config(cli.config.as_deref());
    let settings = build_device_settings(&config.device, cli.adb.as_deref());
    let bridge = AdbBridge::new(settings.adb_path.clone());
    let trace_file = config.trace_file.as_deref();

    match cli.command {
        Commands::Devices => {
            cmd_devices(&bridge)?;
        }
        Commands::Capture {
            device,
            prefix,
            output_dir,
            attributes,
            add_index,
            min_dist,
        } => {
            let extract = build_extract_config(&config.extract, &attributes, add_index, min_dist);
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_capture(bridge, &ctx, &prefix, &output_dir, &extract)?;
        }
        Commands::Extract {
            xml,
            attributes,
            add_index,
            min_dist,
        } => {
            let extract = build_extract_config(&config.extract, &attributes, add_index, min_dist);
            cmd_extract(&xml, &extract)?;
        }
        Commands::Tap { device, target } => {
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_tap(bridge, &ctx, &target)?;
        }
        Commands::LongPress {
            device,
            target,
            duration,
        } => {
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_long_press(bridge, &ctx, &target, duration)?;
        }
        Commands::Swipe {
            device,
            target,
            direction,
            distance,
            quick,
        } => {
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_swipe(bridge, &ctx, &target, &direction, &distance, quick)?;
        }
        Commands::Text { device, text } => {
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_text(bridge, &ctx, &text)?;
        }
        Commands::Back { device } => {
            let ctx = DeviceContext::new(&device, &settings, trace_file);
            cmd_back(bridge, &ctx)?;
        }
    }

    Ok(())
}
