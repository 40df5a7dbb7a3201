//! `tsm list-expired`: dry-run report

use crate::common::{nightly_days_ago, TestSetup};
use crate::tsm;
use anyhow::Result;

fn seeded() -> Result<TestSetup> {
    TestSetup::new(&[
        "nightly-2000-01-15",
        "nightly-2000-01-31",
        "adhoc-2000-01-01_0000",
        nightly_days_ago(2).as_str(),
    ])
}

#[test]
fn test_list_expired_reports_without_deleting() -> Result<()> {
    let setup = seeded()?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1\nExpireBackups = true")?;
    let before = setup.archives()?;

    let result = tsm!(setup.path(), "list-expired").assert_success()?;

    assert_eq!(setup.calls()?, vec!["--list-archives".to_string()]);
    assert_eq!(setup.archives()?, before);

    assert!(result.contains_stdout("nightly-2000-01-15"));
    assert!(result.contains_stdout("nightly-2000-01-31"));
    assert!(!result.contains_stdout(&nightly_days_ago(2)));
    assert!(!result.contains_stdout("adhoc-2000-01-01_0000"));
    assert!(result.contains_stdout("of 3 nightly archives would be expired"));

    Ok(())
}

#[test]
fn test_list_expired_show_all() -> Result<()> {
    let setup = seeded()?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1")?;

    let result = tsm!(setup.path(), "list-expired", "--all").assert_success()?;
    assert!(result.contains_stdout(&nightly_days_ago(2)));
    assert!(result.contains_stdout("within weekly window"));

    Ok(())
}

#[test]
fn test_list_current_from_config() -> Result<()> {
    let setup = seeded()?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1\nListCurrent = true")?;

    let result = tsm!(setup.path(), "list-expired").assert_success()?;
    assert!(result.contains_stdout(&nightly_days_ago(2)));

    Ok(())
}

#[test]
fn test_list_expired_nothing_to_do() -> Result<()> {
    let setup = TestSetup::new(&["adhoc-2000-01-01_0000"])?;
    setup.write_config("KeepWeeks = 1\nKeepMonths = 1")?;

    let result = tsm!(setup.path(), "list-expired").assert_success()?;
    assert!(result.contains_stdout("No archives would be expired"));

    Ok(())
}
