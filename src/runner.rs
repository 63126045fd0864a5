//! Dispatcher wiring and the polling runtime.
//!
//! Startup order matters here: any webhook left over from a previous
//! deployment must be deleted before long-polling starts, otherwise
//! Telegram answers `getUpdates` with a conflict.

use crate::bot::handlers::{self, Command};
use crate::config::Settings;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::{ShutdownToken, UpdateHandler};
use teloxide::error_handlers::ErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use teloxide::{ApiError, RequestError};
use tracing::{error, info, warn};

/// Pause after webhook deletion so Telegram releases the delivery mode.
const WEBHOOK_SETTLE_DELAY: Duration = Duration::from_secs(1);
/// Long-poll timeout for `getUpdates`.
const POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Run the bot until it is interrupted or shut down.
pub async fn run_bot(settings: Settings) {
    let bot = Bot::new(settings.token);

    prepare_polling(&bot).await;

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    let reporter = Arc::new(PollingErrorReporter {
        shutdown: dispatcher.shutdown_token(),
    });
    let listener = Polling::builder(bot)
        .timeout(POLL_TIMEOUT)
        .drop_pending_updates()
        .build();

    info!("Bot is running...");

    dispatcher.dispatch_with_listener(listener, reporter).await;
}

/// Delete any stale webhook, then wait for the deletion to settle.
///
/// Deletion failure is logged and ignored; polling is attempted
/// regardless. The settle delay is taken on both paths.
pub async fn prepare_polling(bot: &Bot) {
    match bot.delete_webhook().drop_pending_updates(true).await {
        Ok(_) => info!("Webhook deleted (if it existed)."),
        Err(e) => warn!("Could not delete webhook: {}", e),
    }

    tokio::time::sleep(WEBHOOK_SETTLE_DELAY).await;
}

fn schema() -> UpdateHandler<RequestError> {
    dptree::entry().branch(
        Update::filter_message()
            .filter_command::<Command>()
            .endpoint(handle_command),
    )
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), RequestError> {
    let res = match cmd {
        Command::Start => handlers::start(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

/// True when polling failed because another consumer (a second bot
/// instance or a still-registered webhook) owns update delivery.
fn is_conflict(error: &RequestError) -> bool {
    matches!(
        error,
        RequestError::Api(ApiError::TerminatedByOtherGetUpdates)
    )
}

/// Listener-error handler: logs transient errors, shuts the dispatcher
/// down on a delivery-mode conflict.
struct PollingErrorReporter {
    shutdown: ShutdownToken,
}

impl ErrorHandler<RequestError> for PollingErrorReporter {
    fn handle_error(self: Arc<Self>, error: RequestError) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            if is_conflict(&error) {
                error!("Another bot instance is already running or a webhook is still active.");
                error!("Stop the other instance (or wait for the webhook to be released), then restart.");
                match self.shutdown.shutdown() {
                    Ok(_) => info!("Shutting down."),
                    Err(e) => warn!("Dispatcher is not running: {}", e),
                }
            } else {
                error!("Error while polling for updates: {}", error);
            }
        })
    }
}
