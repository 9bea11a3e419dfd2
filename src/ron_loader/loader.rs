//! Asset loader for [`WriterSettings`] from "writer.ron" files.

use bevy::{
    asset::{io::Reader, AssetLoader, AsyncReadExt, LoadContext},
    log::info,
    utils::BoxedFuture,
};
use serde_ron::de::from_bytes;
use thiserror::Error;

use crate::prelude::WriterSettings;

/// Load writer settings from ron assets.
#[derive(Default)]
pub struct WriterSettingsLoader;

/// Errors while loading a settings file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsLoaderError {
    /// An [IO Error](std::io::Error)
    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON Error](serde_ron::error::SpannedError)
    #[error("Could not parse RON: {0}")]
    RonError(#[from] serde_ron::error::SpannedError),
}

/// Parses settings bytes.
pub(crate) fn parse_settings(bytes: &[u8]) -> Result<WriterSettings, SettingsLoaderError> {
    Ok(from_bytes::<WriterSettings>(bytes)?)
}

impl AssetLoader for WriterSettingsLoader {
    type Asset = WriterSettings;
    type Settings = ();
    type Error = SettingsLoaderError;

    fn load<'a>(
        &'a self,
        reader: &'a mut Reader,
        _settings: &'a Self::Settings,
        load_context: &'a mut LoadContext,
    ) -> BoxedFuture<'a, Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let settings = parse_settings(&bytes)?;
            info!(
                "Loaded writer settings {} ({} chars/s)",
                load_context.path().display(),
                settings.writing_speed
            );
            Ok(settings)
        })
    }

    fn extensions(&self) -> &[&str] {
        &["writer.ron"]
    }
}
