#[global_allocator]
#[cfg(not(feature = "system_allocator"))]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod config;

use config::Config;
use ndp_engine::Engine;

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    simple_logger::init_with_level(config.log.level.as_level())?;

    let mut engine = Engine::new(config.ndp.interface);
    if engine.error() != ndp_engine::Error::None {
        anyhow::bail!(engine.error());
    }

    engine.set_stress(config.ndp.stress);
    engine.start();

    log::info!(
        "ndpd running on {} (stress={})",
        engine.interface_name(),
        engine.stress()
    );

    // The sender and receiver activities run on their own threads; the
    // main thread just keeps the process, and the engine, alive.
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}
