use thiserror::Error;

/// Microphone acquisition failures, surfaced as user-facing messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Microphone access was denied.")]
    MicrophoneDenied,

    #[error("No audio input device is available.")]
    NoDevice,
}

/// Device seam: a live audio input producing frequency-spectrum frames.
pub trait AudioInput {
    /// Acquires the device. Called once per recording.
    fn acquire(&mut self) -> Result<(), CaptureError>;

    /// Magnitudes across the captured frequency spectrum for the current
    /// frame.
    fn spectrum(&mut self) -> Vec<u8>;

    /// Releases the device.
    fn release(&mut self);
}

/// Host speech-to-text seam. An open session accumulates recognized
/// segments until stopped.
pub trait SpeechRecognizer {
    fn start(&mut self);

    /// Every segment recognized so far, in arrival order.
    fn segments(&self) -> Vec<String>;

    fn stop(&mut self);
}

/// Polls the microphone for a live amplitude level and, when the host offers
/// speech recognition, a live transcript.
///
/// The recorder never constructs an idea itself; after `stop` the caller
/// decides whether to commit the accumulated transcript through the capture
/// workflow.
pub struct Recorder<I, R> {
    input: I,
    recognizer: Option<R>,
    recording: bool,
    level: f32,
    transcript: String,
}

impl<I: AudioInput, R: SpeechRecognizer> Recorder<I, R> {
    pub fn new(input: I, recognizer: Option<R>) -> Self {
        Self {
            input,
            recognizer,
            recording: false,
            level: 0.0,
            transcript: String::new(),
        }
    }

    /// Acquires the microphone and starts a fresh transcript.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        self.input.acquire()?;
        self.transcript.clear();
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.start();
        }
        self.recording = true;
        Ok(())
    }

    /// One display-frame sample: averages the frequency spectrum into the
    /// live level and refreshes the transcript from the recognizer.
    pub fn poll(&mut self) {
        if !self.recording {
            return;
        }

        let spectrum = self.input.spectrum();
        self.level = if spectrum.is_empty() {
            0.0
        } else {
            spectrum.iter().map(|&v| v as f32).sum::<f32>() / spectrum.len() as f32
        };

        if let Some(recognizer) = self.recognizer.as_ref() {
            self.transcript = recognizer.segments().concat();
        }
    }

    /// Halts sampling, releases the device and any recognition handles, and
    /// resets the displayed level to zero.
    pub fn stop(&mut self) {
        if !self.recording {
            return;
        }
        self.recording = false;
        self.level = 0.0;
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.input.release();
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}
