//! AI provider adapters.

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAiProvider, MockError, MockResponse};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
