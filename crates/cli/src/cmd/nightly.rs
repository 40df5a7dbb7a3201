//! Create tonight's archive and expire old ones

use anyhow::Result;
use cli_lib::{Action, Dispatcher};
use std::path::Path;
use tarsnap::Tarsnap;
use tracing::info;

pub async fn run(config_path: &Path) -> Result<()> {
    let (config, cutoffs) = super::prepare(config_path)?;
    let tarsnap = Tarsnap::new(&config.tarsnap_bin);

    Dispatcher::new(&tarsnap, &config)
        .run(Action::Nightly, &cutoffs)
        .await?;

    info!("All done!");
    Ok(())
}
