use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered stages a task moves through while processing.
///
/// `Background` is only ever reported through step events; the background
/// layer is prepared inside the mixing stage, so it is never persisted as a
/// task's current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStep {
    Outline,
    Expand,
    Tts,
    Binaural,
    Background,
    Mixing,
    Export,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Outline => "outline",
            PipelineStep::Expand => "expand",
            PipelineStep::Tts => "tts",
            PipelineStep::Binaural => "binaural",
            PipelineStep::Background => "background",
            PipelineStep::Mixing => "mixing",
            PipelineStep::Export => "export",
        }
    }
}

impl FromStr for PipelineStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outline" => Ok(PipelineStep::Outline),
            "expand" => Ok(PipelineStep::Expand),
            "tts" => Ok(PipelineStep::Tts),
            "binaural" => Ok(PipelineStep::Binaural),
            "background" => Ok(PipelineStep::Background),
            "mixing" => Ok(PipelineStep::Mixing),
            "export" => Ok(PipelineStep::Export),
            _ => Err(format!("Invalid pipeline step: {}", s)),
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
