//! Subcommand implementations.

pub mod ask;
pub mod doctor;
pub mod init;
pub mod relay;

use kinrelay_config::AppConfig;
use kinrelay_core::error::InferenceError;
use kinrelay_core::inference::InferenceResult;
use kinrelay_core::message::ConversationMessage;
use kinrelay_inference::KindroidClient;

pub const RATE_LIMITED_NOTICE: &str = "Kindroid is busy right now, please wait a moment and retry.";
pub const UNAVAILABLE_NOTICE: &str = "The assistant is unavailable right now.";

/// What the user sees for an invocation outcome.
pub fn notice(outcome: &Result<InferenceResult, InferenceError>) -> &str {
    match outcome {
        Ok(result) => result.reply().unwrap_or(RATE_LIMITED_NOTICE),
        Err(_) => UNAVAILABLE_NOTICE,
    }
}

/// Load config, invoke once, and print the outcome.
pub(crate) async fn send(
    share_code: &str,
    conversation: &[ConversationMessage],
    enable_filter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let client = KindroidClient::from_config(&config)?;

    let outcome = client.invoke(share_code, conversation, enable_filter).await;
    match &outcome {
        Ok(result) if result.is_rate_limited() => eprintln!("{}", notice(&outcome)),
        Ok(_) => println!("{}", notice(&outcome)),
        Err(e) => {
            tracing::debug!(
                kind = e.kind(),
                status = ?e.status(),
                error = %e,
                "Invocation failed"
            );
            return Err(notice(&outcome).into());
        }
    }

    Ok(())
}
