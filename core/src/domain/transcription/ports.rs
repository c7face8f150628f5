use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    transcription::{entities::TranscriptionResult, value_objects::TranscribeAudioInput},
};

/// Speech-to-text collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechToTextClient: Send + Sync + 'static {
    fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: String,
    ) -> impl Future<Output = Result<TranscriptionResult, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait TranscriptionService: Send + Sync {
    fn transcribe_audio(
        &self,
        input: TranscribeAudioInput,
    ) -> impl Future<Output = Result<TranscriptionResult, CoreError>> + Send;
}
