//! Show which archives expiry would delete, without deleting them

use anyhow::Result;
use cli_lib::{report, Action, Dispatcher};
use std::path::Path;
use tarsnap::Tarsnap;

pub async fn run(config_path: &Path, all: bool) -> Result<()> {
    let (config, cutoffs) = super::prepare(config_path)?;
    let tarsnap = Tarsnap::new(&config.tarsnap_bin);

    let summary = Dispatcher::new(&tarsnap, &config)
        .run(Action::ListExpired, &cutoffs)
        .await?;

    if let Some(expiry) = summary.expiry {
        report::print_expiry(&expiry, all || config.list_current);
    }

    Ok(())
}
