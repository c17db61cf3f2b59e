pub mod providers;

pub use providers::{
    CompletionProvider, MockCompletionProvider, OpenAiCompletionProvider, OpenAiConfig,
    ProviderError,
};
