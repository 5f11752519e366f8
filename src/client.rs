use once_cell::sync::Lazy;
use std::time::Duration;

/// Timeout for the one catalog request made per run.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub static BLOCKING_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("cpdocs/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build blocking reqwest client")
});
