/// OpenAI-compatible chat completions backend with strict JSON-schema output.
pub mod openai;

pub use openai::OpenAiGenerator;
