//! vigil — watches a screen region and captures it, with OCR, on change.
//!
//! Drag out the region to monitor, then leave the tool running. Every time
//! the region's pixels change, the frame and its recognized text are written
//! under the output root (`./captures` by default).
//!
//! Configuration is environment-driven:
//!   VIGIL_INTERVAL_MS    sampling interval (default 1000)
//!   VIGIL_OUTPUT_DIR     artifact root (default ./captures)
//!   VIGIL_OCR_LANGUAGE   recognition language (default eng)
//!   VIGIL_OCR_ENABLED    set to false to skip recognition (default true)

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vigil_config::Config;
use vigil_core::monitor::{RegionMonitor, TextExtractor};
use vigil_core::store::ArtifactStore;
use vigil_ocr::{NoopExtractor, ScreenSource};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::new();

    println!("Select region to monitor. Drag the mouse over the desired area...");
    let region = vigil_ui::select_region()?;
    info!(?region, "monitoring region");

    let source = ScreenSource::new(region)?;
    let extractor: Box<dyn TextExtractor> = if config.ocr.enabled {
        vigil_ocr::default_extractor(&config.ocr.language)?
    } else {
        Box::new(NoopExtractor)
    };
    let store = ArtifactStore::new(&config.storage.output_dir);
    let monitor = RegionMonitor::new(
        source,
        extractor,
        store,
        Duration::from_millis(config.capture.interval_ms),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let cancel = CancellationToken::new();

        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested");
                signal_cancel.cancel();
            }
        });

        monitor.run(cancel).await
    })?;

    Ok(())
}
