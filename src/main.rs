use clap::Parser;
use serialport::SerialPortType;
use serialterm::args::Cli;
use serialterm::config::Config;
use serialterm::logging::init_tracing;
use serialterm::serial::list_ports;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_ports {
        return print_ports();
    }

    init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    serialterm::ui::runtime::run(config).await
}

fn print_ports() -> anyhow::Result<()> {
    let ports = list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }
    for port in ports {
        let kind = match port.port_type {
            SerialPortType::UsbPort(usb) => {
                let product = usb.product.unwrap_or_default();
                format!("USB {:04x}:{:04x} {}", usb.vid, usb.pid, product)
            }
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::Unknown => "Unknown".to_string(),
        };
        println!("{}\t{}", port.port_name, kind.trim_end());
    }
    Ok(())
}
