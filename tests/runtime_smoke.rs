//! Headless start of the full runtime with prefilled options.

use std::time::Duration;

use eightchars::app::{RunOptions, run};
use eightchars::config::Settings;
use eightchars::i18n::Language;

#[tokio::test(flavor = "multi_thread")]
/// What: The runtime idles headless without touching the network or the settings file.
///
/// Inputs:
/// - `EIGHTCHARS_TEST_HEADLESS=1`, Finnish, prefilled date and time, a service URL nobody
///   listens on and a settings path inside a temporary directory
///
/// Output:
/// - Still running after the start-up window, cancels cleanly, settings file never written
async fn headless_runtime_idles_until_cancelled() {
    unsafe {
        std::env::set_var("EIGHTCHARS_TEST_HEADLESS", "1");
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let settings_path = dir.path().join("settings.conf");
    let options = RunOptions {
        settings: Settings {
            api_base_url: "http://127.0.0.1:9".into(),
            ..Settings::default()
        },
        language: Language::Fi,
        settings_path: Some(settings_path.clone()),
        date: Some("1988-02-04".into()),
        time: Some("16:30".into()),
    };
    let handle = tokio::spawn(run(options));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        !handle.is_finished(),
        "headless runtime exited without a quit key"
    );

    handle.abort();
    let join_err = handle.await.expect_err("aborted task");
    assert!(join_err.is_cancelled(), "runtime panicked: {join_err}");
    assert!(
        !settings_path.exists(),
        "settings are only written on a language switch"
    );
}
