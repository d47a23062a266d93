//! Bar-talk take generation.
//!
//! Public entry point: [`TakeGenerator::generate`]. It resolves the sport to a
//! league descriptor, builds a dated prompt, calls the Messages API with the
//! web search tool (retrying throttling and transport failures with
//! exponential backoff), joins the text blocks of the reply and normalizes
//! them into a single quoted take.

mod api_types;
mod error;

pub mod cfg;
pub mod extract;
pub mod generator;
pub mod normalize;
pub mod prompt;
pub mod retry;
pub mod sport_profile;

pub use api_types::{GenerationResult, TakeRequest};
pub use error::TakeError;
pub use generator::TakeGenerator;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
