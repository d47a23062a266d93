//! Take generation: prompt → upstream call (with retry) → extract → normalize.

use std::time::Instant;

use chrono::NaiveDate;
use llm_service::{AiLlmError, MessagesBackend};
use tracing::{debug, info, instrument, warn};

use crate::{
    api_types::{GenerationResult, TakeRequest},
    error::TakeError,
    extract::collect_text,
    normalize::normalize_quote,
    prompt::build_prompt,
    retry::{RetryPolicy, Sleeper, TokioSleeper},
    sport_profile::{is_known, league_for},
};

/// Produces one normalized take per request.
///
/// Stateless between calls; share one instance behind an `Arc`.
pub struct TakeGenerator<B, S = TokioSleeper> {
    backend: B,
    policy: RetryPolicy,
    sleeper: S,
}

impl<B: MessagesBackend> TakeGenerator<B> {
    /// Generator that waits in real time between retries.
    pub fn new(backend: B, policy: RetryPolicy) -> Self {
        Self::with_sleeper(backend, policy, TokioSleeper)
    }
}

impl<B: MessagesBackend, S: Sleeper> TakeGenerator<B, S> {
    pub fn with_sleeper(backend: B, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            backend,
            policy,
            sleeper,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generates a take for `request`, framing the prompt around `today`.
    ///
    /// # Errors
    /// - [`TakeError::Upstream`] when the call fails (after retries for
    ///   rate limiting and transport failures)
    /// - [`TakeError::EmptyContent`] when the reply has no usable text
    #[instrument(
        name = "generate_take",
        skip(self, request),
        fields(sport = %request.sport(), location = %request.location())
    )]
    pub async fn generate(
        &self,
        request: &TakeRequest,
        today: NaiveDate,
    ) -> Result<GenerationResult, TakeError> {
        let started = Instant::now();
        let sport = request.sport();
        if !is_known(sport) {
            debug!(sport, "no league profile, using sport as given");
        }
        debug!(league = league_for(sport), "resolved league");

        let prompt = build_prompt(request, today);

        let response = self
            .policy
            .run(&self.sleeper, AiLlmError::is_retryable, |attempt| {
                debug!(attempt, "calling upstream");
                self.backend.create_message(&prompt)
            })
            .await?;

        let Some(raw) = collect_text(&response) else {
            warn!(
                blocks = response.content.len(),
                "upstream reply carried no text content"
            );
            return Err(TakeError::EmptyContent);
        };

        let quote = normalize_quote(&raw);
        info!(
            latency_ms = started.elapsed().as_millis() as u64,
            raw_len = raw.len(),
            quote_len = quote.len(),
            "take generated"
        );

        Ok(GenerationResult { quote })
    }
}
