mod whisper_client;

pub use whisper_client::WhisperClient;
