use parking_lot_manager::domain::select_lowest;
use parking_lot_manager::infra::config;
use parking_lot_manager::{ParkingService, SlotRequirements};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Optional env vars:\n\
           DATABASE_URL (default {}), DB_MAX_CONNECTIONS, BIND_ADDR\n",
        config::DEFAULT_DATABASE_URL
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let settings = config::Settings::from_env();

    println!("> Preflight:");
    println!("  DATABASE_URL={}", settings.database_url);
    println!("  BIND_ADDR={}", settings.bind_addr);
    println!("  DB_MAX_CONNECTIONS={}", settings.max_connections);

    let parking = ParkingService::connect(&settings.database_url, settings.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open slot store: {}", e))?;
    println!("  Slot table is present.");

    let counts = parking.counts().await?;
    println!("  Slots: {} total, {} free", counts.total, counts.free);

    // Preview what each kind of request would get right now (read-only).
    let slots = parking.list_slots().await?;
    for (label, requirements) in [
        ("any", SlotRequirements::new(false, false)),
        ("ev", SlotRequirements::new(true, false)),
        ("covered", SlotRequirements::new(false, true)),
        ("ev+covered", SlotRequirements::new(true, true)),
    ] {
        match select_lowest(&slots, requirements) {
            Some(slot) => println!("  Next {} vehicle -> slot {}", label, slot.slot_no),
            None => println!("  Next {} vehicle -> no slot available", label),
        }
    }

    parking.store().close().await;
    println!("> Preflight OK.");
    Ok(())
}
