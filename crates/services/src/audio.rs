//! Fire-and-forget audio cue contract.
//!
//! The state machine signals cues and moves on; playback success or failure
//! never feeds back into session state. Implementations must not block and
//! must swallow playback errors, logging them locally.

/// Sound cues emitted at quiz transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// An answer was chosen and the option card flips.
    Flip,
    /// The chosen answer was right.
    Correct,
    /// The chosen answer was wrong.
    Incorrect,
    /// Moving on to the next question (also played on restart).
    Next,
    /// The final score screen is showing.
    End,
}

impl AudioCue {
    /// File stem of the sound asset for this cue.
    #[must_use]
    pub fn file_stem(&self) -> &'static str {
        match self {
            AudioCue::Flip => "flip",
            AudioCue::Correct => "correct",
            AudioCue::Incorrect => "incorrect",
            AudioCue::Next => "next",
            AudioCue::End => "end",
        }
    }
}

/// Playback sink consumed by the quiz loop.
pub trait AudioSink: Send + Sync {
    fn play(&self, cue: AudioCue);
}

/// Sink for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play(&self, _cue: AudioCue) {}
}
