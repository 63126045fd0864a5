use greet_bot::runner::prepare_polling;
use std::time::{Duration, Instant};
use teloxide::Bot;

/// Webhook cleanup must survive an unreachable Bot API and still take
/// the settle delay before returning, so polling never starts early.
#[tokio::test]
async fn webhook_cleanup_tolerates_api_failure() {
    // Port 9 (discard) has no listener, so the delete-webhook request
    // fails fast with a connection error instead of hitting Telegram.
    let api_url = reqwest::Url::parse("http://127.0.0.1:9/").expect("static url is valid");
    let bot = Bot::new("123456789:TEST-TOKEN-NOT-REAL").set_api_url(api_url);

    let started = Instant::now();
    prepare_polling(&bot).await;

    assert!(
        started.elapsed() >= Duration::from_secs(1),
        "cleanup returned before the settle delay elapsed"
    );
}
