mod audio;

pub use audio::RodioAudioSink;
