//! Audio output device listing.

use bandwave_io::list_output_devices;
use clap::Args;

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_output_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Output Devices");
    println!("==============\n");
    for (idx, name) in devices.iter().enumerate() {
        println!("  [{idx}] {name}");
    }
    println!("\nPass a name (or part of one) to `bandwave play --device`.");
    Ok(())
}
