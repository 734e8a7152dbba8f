use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::AmbientCatalog;

const AMBIENT_TRACKS: &[(&str, &str)] = &[
    ("rain", "bgm/light-rain.mp3"),
    ("light-rain", "bgm/light-rain.mp3"),
    ("heavy-rain", "bgm/heavy-rain.mp3"),
    ("rain-on-window", "bgm/rain-on-window.mp3"),
    ("rain-on-tent", "bgm/rain-on-tent.mp3"),
    ("rain-on-leaves", "bgm/rain-on-leaves.mp3"),
    ("rain-on-car-roof", "bgm/rain-on-car-roof.mp3"),
    ("rain-on-umbrella", "bgm/rain-on-umbrella.mp3"),
    ("river", "bgm/river.mp3"),
    ("waves", "bgm/waves.mp3"),
    ("waterfall", "bgm/waterfall.mp3"),
    ("droplets", "bgm/droplets.mp3"),
    ("bubbles", "bgm/bubbles.mp3"),
    ("boiling-water", "bgm/boiling-water.mp3"),
    ("underwater", "bgm/underwater.mp3"),
    ("wind", "bgm/wind.mp3"),
    ("wind-in-trees", "bgm/wind-in-trees.mp3"),
    ("howling-wind", "bgm/howling-wind.mp3"),
    ("wind-chimes", "bgm/wind-chimes.mp3"),
    ("forest", "bgm/wind-in-trees.mp3"),
    ("jungle", "bgm/jungle.mp3"),
    ("campfire", "bgm/campfire.mp3"),
    ("thunder", "bgm/thunder.mp3"),
    ("singing-bowl", "bgm/singing-bowl.mp3"),
    ("morse-code", "bgm/morse-code.mp3"),
    ("vinyl-effect", "bgm/vinyl-effect.mp3"),
    ("tuning-radio", "bgm/tuning-radio.mp3"),
    ("slide-projector", "bgm/slide-projector.mp3"),
    ("windshield-wipers", "bgm/windshield-wipers.mp3"),
    ("walk-in-snow", "bgm/walk-in-snow.mp3"),
    ("walk-on-gravel", "bgm/walk-on-gravel.mp3"),
    ("walk-on-leaves", "bgm/walk-on-leaves.mp3"),
    ("road", "bgm/road.mp3"),
    ("white", "whitenoise/white.wav"),
    ("pink", "whitenoise/pink.wav"),
    ("brown", "whitenoise/brown.wav"),
    ("blue", "whitenoise/blue.wav"),
    ("violet", "whitenoise/violet.wav"),
];

/// Ambient recordings and noise colours shipped under the assets directory.
pub struct FsAmbientCatalog {
    assets_dir: PathBuf,
}

impl FsAmbientCatalog {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self { assets_dir }
    }

    pub fn relative_path(id: &str) -> Option<&'static str> {
        AMBIENT_TRACKS
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, path)| *path)
    }
}

#[async_trait]
impl AmbientCatalog for FsAmbientCatalog {
    async fn resolve(&self, id: &str) -> Option<PathBuf> {
        let path = self.assets_dir.join(Self::relative_path(id)?);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            _ => {
                tracing::debug!(ambient = %id, path = %path.display(), "Ambient asset not on disk");
                None
            }
        }
    }

    fn ids(&self) -> Vec<String> {
        AMBIENT_TRACKS.iter().map(|(id, _)| id.to_string()).collect()
    }
}
