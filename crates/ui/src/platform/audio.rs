//! Desktop audio playback for quiz cues.
//!
//! Each cue decodes `<sounds_dir>/<stem>.mp3` on a detached thread. A missing
//! file or output device is logged and otherwise ignored: playback never
//! feeds back into session state.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use services::{AudioCue, AudioSink};

pub struct RodioAudioSink {
    sounds_dir: PathBuf,
}

impl RodioAudioSink {
    #[must_use]
    pub fn new(sounds_dir: PathBuf) -> Self {
        Self { sounds_dir }
    }
}

impl AudioSink for RodioAudioSink {
    fn play(&self, cue: AudioCue) {
        let path = self.sounds_dir.join(format!("{}.mp3", cue.file_stem()));
        if !path.exists() {
            tracing::debug!(cue = cue.file_stem(), path = %path.display(), "sound file missing");
            return;
        }

        std::thread::spawn(move || {
            use rodio::{Decoder, OutputStream, Sink};

            let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                tracing::warn!("no audio output device");
                return;
            };
            let Ok(file) = File::open(&path) else {
                tracing::warn!(path = %path.display(), "failed to open sound file");
                return;
            };
            let Ok(source) = Decoder::new(BufReader::new(file)) else {
                tracing::warn!(path = %path.display(), "failed to decode sound file");
                return;
            };
            let Ok(sink) = Sink::try_new(&stream_handle) else {
                return;
            };

            sink.append(source);
            sink.sleep_until_end();
        });
    }
}
