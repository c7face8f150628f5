pub const DEFAULT_AUDIO_FILENAME: &str = "recording.webm";

#[derive(Debug, Clone)]
pub struct TranscribeAudioInput {
    pub audio: Vec<u8>,
    /// Passed through to the collaborator as a format hint.
    pub filename: String,
}

impl TranscribeAudioInput {
    pub fn new(audio: Vec<u8>, filename: Option<String>) -> Self {
        let filename = filename
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUDIO_FILENAME.to_string());

        Self { audio, filename }
    }
}
