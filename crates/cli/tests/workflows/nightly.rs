//! `tsm nightly`: create, then expire

use crate::common::{nightly_days_ago, TestSetup};
use crate::tsm;
use anyhow::Result;

fn seeded() -> Result<TestSetup> {
    TestSetup::new(&[
        "nightly-2000-01-15",
        "nightly-2000-01-31",
        "adhoc-2000-01-01_0000",
        nightly_days_ago(1).as_str(),
    ])
}

#[test]
fn test_nightly_creates_and_expires() -> Result<()> {
    let setup = seeded()?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1\nExpireBackups = true")?;

    let result = tsm!(setup.path(), "nightly").assert_success()?;

    let today = nightly_days_ago(0);
    assert_eq!(
        setup.calls()?,
        vec![
            format!("-c -f {} --one-file-system /srv/data", today),
            "--list-archives".to_string(),
            "-d -f nightly-2000-01-15".to_string(),
            "-d -f nightly-2000-01-31".to_string(),
        ]
    );

    assert_eq!(
        setup.archives()?,
        vec!["adhoc-2000-01-01_0000".to_string(), nightly_days_ago(1), today]
    );

    assert!(result.contains_stdout("Date: "));
    assert!(result.contains_stdout("Expire week: "));
    assert!(result.contains_stderr("Expiring backup nightly-2000-01-15"));
    assert!(result.contains_stderr(&format!("Keeping backup {}", nightly_days_ago(1))));
    assert!(result.contains_stderr("All done!"));

    Ok(())
}

#[test]
fn test_nightly_expiry_disabled() -> Result<()> {
    let setup = seeded()?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1\nExpireBackups = false")?;

    let result = tsm!(setup.path(), "nightly").assert_success()?;

    assert_eq!(setup.calls()?.len(), 1);
    assert!(setup.archives()?.contains(&"nightly-2000-01-15".to_string()));
    assert!(result.contains_stderr("Backup expiration disabled"));

    Ok(())
}

#[test]
fn test_malformed_archive_names_are_expired() -> Result<()> {
    let setup = TestSetup::new(&["manual-snapshot"])?;
    setup.write_config("KeepWeeks = 4\nKeepMonths = 12\nExpireBackups = true")?;

    let result = tsm!(setup.path(), "nightly").assert_success()?;

    assert!(setup.calls()?.contains(&"-d -f manual-snapshot".to_string()));
    assert!(result.contains_stderr("treating it as expired"));

    Ok(())
}
