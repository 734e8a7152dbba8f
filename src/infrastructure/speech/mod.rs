mod disabled_speech_synthesizer;
mod openai_speech_synthesizer;

pub use disabled_speech_synthesizer::DisabledSpeechSynthesizer;
pub use openai_speech_synthesizer::OpenAiSpeechSynthesizer;
