mod audio;

pub use audio::{AudioInput, CaptureError, Recorder, SpeechRecognizer};
