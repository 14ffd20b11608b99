use clap::Parser;
use env_logger::Env;
use log::{error, info};
use sc010::{AppConfig, Sc010Client, Sc010Error, find_controller, load_config_or_default};
use std::path::PathBuf;

/// SC010 Controller Survey Tool
#[derive(Parser, Debug)]
#[command(name = "sc010-probe")]
#[command(about = "Discover an SC010 controller and survey its configuration", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();
    let config = load_config_or_default(args.config.as_deref());

    let log_level = args
        .log_level
        .unwrap_or_else(|| config.logging.log_level.clone());
    env_logger::Builder::from_env(Env::default().default_filter_or(&log_level))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run_survey(&config) {
        error!("Error during controller survey: {e}");
    }
}

/// Discover a controller, connect, and walk the full query surface.
fn run_survey(config: &AppConfig) -> Result<(), Sc010Error> {
    print_section("Finding Controller");
    let Some(found) = find_controller(Some(config.controller.discovery_wait()))? else {
        error!("No SC010 controller found on the network");
        return Ok(());
    };

    info!("Found controller at IP: {}", found.ip);
    info!("Controller MAC: {}", found.mac);

    let mut controller = Sc010Client::builder()
        .address(&found.ip.to_string())
        .port(config.controller.port)
        .config(config.controller.connection())
        .build()?;

    survey_controller(&mut controller)
}

/// The fixed survey sequence. A failing query aborts everything after it;
/// the connection is dropped either way.
fn survey_controller(controller: &mut Sc010Client) -> Result<(), Sc010Error> {
    print_section("Controller Information");
    let info = controller.get_controller_info()?;
    for (key, value) in &info {
        info!("{key}: {value}");
    }

    print_section("Device List");
    let device_list = controller.get_device_list()?;
    info!("Device List:");
    for device in &device_list {
        info!("  - {device}");
    }

    print_section("Device Names");
    let device_names = controller.get_device_names()?;
    info!("Device Names and Aliases:");
    for device in &device_names {
        info!("  - {} -> {}", device.true_name, device.alias);
    }

    print_section("Matrix");
    let matrix = controller.get_matrix()?;
    info!("Current Matrix Configuration:");
    for route in &matrix {
        info!("  - {} -> {}", route.tx, route.rx);
    }

    print_section("Video Wall");
    let walls = controller.get_video_wall()?;
    info!("Video Wall Configuration:");
    for wall in &walls {
        info!("  - Name: {}", wall.name);
        info!("    Rows: {}", wall.rows);
        info!("    Columns: {}", wall.cols);
        info!("    Encoder: {}", wall.encoder);
    }

    print_section("IP Settings");
    let ip_settings = controller.get_ip_settings()?;
    info!("LAN(AV) Settings:");
    for (key, value) in &ip_settings {
        info!("  - {key}: {value}");
    }

    if let Some(first_device) = device_list.first() {
        print_section("Device Info");
        let device_info = controller.get_device_info(first_device)?;
        info!("Info for {first_device}:");
        for (key, value) in &device_info {
            info!("  - {key}: {value}");
        }

        print_section("Device Status");
        let device_status = controller.get_device_status(first_device)?;
        info!("Status for {first_device}:");
        for (key, value) in &device_status {
            info!("  - {key}: {value}");
        }
    }

    print_section("Device JSON");
    let device_json = controller.get_device_json()?;
    info!("Device JSON:");
    for device in &device_json {
        info!("  - {} ({})", device.true_name, device.device_type);
        info!("    Online: {}", device.online);
        info!("    IP: {}", device.ip);
    }

    print_section("Scene JSON");
    let scene_json = controller.get_scene_json()?;
    info!("Scene Configuration:");
    for scene in &scene_json {
        info!("  - Scene: {}", scene.name);
        info!("    Layout: {}", scene.layout.as_deref().unwrap_or("N/A"));
    }

    Ok(())
}

/// Print an 80-column section banner
fn print_section(title: &str) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("{:=^80}", format!(" {title} "));
    println!("{rule}\n");
}
