//! Shared setup for the scenario suites.

#![allow(dead_code)]

use color_eyre::eyre::bail;
use color_eyre::Result;
use log::error;
use talentolab_e2e::support::{fixture, logger, Settings};
use talentolab_e2e::WebDriver;

pub fn settings() -> Settings {
    let settings = Settings::from_env();
    logger::init_in(&settings.logs_dir());
    let _ = color_eyre::install();
    settings
}

/// Run `scenario` in a fresh desktop session, saving a screenshot on failure.
pub fn desktop<F>(test_name: &str, scenario: F) -> Result<()>
where
    F: FnOnce(&WebDriver, &Settings) -> Result<()>,
{
    let settings = settings();
    let driver = fixture::desktop_driver(&settings)?;
    fixture::with_capture(&driver, test_name, &settings.screenshots_dir(), |d| {
        scenario(d, &settings)
    })
}

/// Same as [`desktop`] with the mobile emulation profile.
pub fn mobile<F>(test_name: &str, scenario: F) -> Result<()>
where
    F: FnOnce(&WebDriver, &Settings) -> Result<()>,
{
    let settings = settings();
    let driver = fixture::mobile_driver(&settings)?;
    fixture::with_capture(&driver, test_name, &settings.screenshots_dir(), |d| {
        scenario(d, &settings)
    })
}

/// Run `case` for every row, even after one fails, then fail once naming
/// every failing row index. Returns the number of rows run.
pub fn each_row<T, F>(rows: &[T], mut case: F) -> Result<usize>
where
    F: FnMut(usize, &T) -> Result<()>,
{
    let mut failed = Vec::new();
    let mut ran = 0;
    for (i, row) in rows.iter().enumerate() {
        ran += 1;
        if let Err(e) = case(i, row) {
            error!("Row {} failed: {:?}", i, e);
            failed.push(i);
        }
    }
    if !failed.is_empty() {
        bail!("rows {:?} of {} failed", failed, rows.len());
    }
    Ok(ran)
}
