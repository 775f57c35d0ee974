use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use thiserror::Error;

use crate::levels::LevelConfig;

/// A level file, parsed as soon as it comes off disk.
#[derive(Asset, TypePath, Debug)]
pub struct LevelAsset(pub LevelConfig);

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("could not read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub fn parse_level(bytes: &[u8]) -> Result<LevelConfig, LevelLoadError> {
    Ok(ron::de::from_bytes(bytes)?)
}

#[derive(Default)]
pub struct LevelAssetLoader;

impl AssetLoader for LevelAssetLoader {
    type Asset = LevelAsset;
    type Settings = ();
    type Error = LevelLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(LevelAsset(parse_level(&bytes)?))
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
