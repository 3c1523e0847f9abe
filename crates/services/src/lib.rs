#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod opentdb;
pub mod provider;
pub mod quiz_loop;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use opentdb::OpenTdbProvider;
pub use provider::{QuestionProvider, QuestionRecord, decode_batch};
pub use quiz_loop::{FetchCompletion, QuizLoopService};
