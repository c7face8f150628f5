pub mod transcribe_audio;
