//! Image storage for downloaded article promos.
//!
//! Each run owns one [`ImageStore`]: a directory that is wiped and recreated
//! at startup, plus an HTTP client used for the downloads. Download targets
//! are named with a short random slug so two cards pointing at the same
//! image URL never clobber each other.
//!
//! Downloads are best-effort: a failure is logged and the run continues,
//! and the report row keeps the path the download targeted whether or not a
//! file landed there.

use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use rand::{Rng, rng};

/// Symbols a slug may contain. 28 symbols, letters and digits.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrs123456789";

/// Length of a generated slug.
pub const SLUG_LEN: usize = 10;

/// Generate a 10-character filename slug.
///
/// Uniform over [`SLUG_ALPHABET`]; not cryptographic and not
/// guaranteed-unique, but collisions across one run's worth of images are
/// negligible.
pub fn random_slug() -> String {
    let mut generator = rng();
    (0..SLUG_LEN)
        .map(|_| SLUG_ALPHABET[generator.random_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}

/// A per-run image directory and the client that fills it.
pub struct ImageStore {
    dir: PathBuf,
    client: reqwest::Client,
}

impl ImageStore {
    /// Wipe and recreate `dir`, returning a store rooted there.
    ///
    /// The recursive delete means a store directory must not be shared by
    /// concurrent runs.
    #[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
    pub async fn reset(dir: &Path) -> Result<ImageStore, std::io::Error> {
        match fs::remove_dir_all(dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(dir).await?;
        info!("Image directory reset");

        Ok(ImageStore {
            dir: dir.to_path_buf(),
            client: reqwest::Client::new(),
        })
    }

    /// A fresh slug-named `.jpg` target path inside the store.
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(format!("{}.jpg", random_slug()))
    }

    /// Download `url` to `target`, logging any failure instead of
    /// propagating it.
    pub async fn download(&self, url: &str, target: &Path) {
        if let Err(e) = self.fetch_to_file(url, target).await {
            error!(
                %url,
                path = %target.display(),
                error = %e,
                "Image download failed; row keeps the targeted path"
            );
        }
    }

    async fn fetch_to_file(&self, url: &str, target: &Path) -> Result<(), Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        fs::write(target, &body).await?;
        info!(bytes = body.len(), path = %target.display(), "Saved image");
        Ok(())
    }
}
