//! Asset registry collaborators.
//!
//! An asset is a named binary payload of a known kind living under a package
//! path, e.g. `Recordings/Greeting_Audio`. Registries refuse to overwrite an
//! existing asset so that discarding a freshly registered asset can never
//! remove older data.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use voxface_core::{RecordingError, RecordingResult};

/// Kind of registered asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// WAV audio.
    SoundWave,
    /// Face animation asset document.
    FaceAnimation,
}

impl AssetKind {
    /// File extension used when the payload is stored on disk.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::SoundWave => "wav",
            AssetKind::FaceAnimation => "json",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::SoundWave => write!(f, "sound_wave"),
            AssetKind::FaceAnimation => write!(f, "face_animation"),
        }
    }
}

/// Handle to a registered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle {
    /// Asset name.
    pub name: String,
    /// Asset kind.
    pub kind: AssetKind,
    /// `package_path/name`.
    pub object_path: String,
}

/// Destination for committed assets.
pub trait AssetRegistry {
    /// Registers `payload` as a new asset called `name`.
    ///
    /// Fails with [`RecordingError::SinkCreation`] if the asset cannot be
    /// created, including when `name` is already taken.
    fn register_asset(
        &mut self,
        name: &str,
        kind: AssetKind,
        payload: &[u8],
    ) -> RecordingResult<AssetHandle>;

    /// Discards a registered asset. Returns `Ok(false)` if it was already gone.
    fn discard_asset(&mut self, handle: &AssetHandle) -> RecordingResult<bool>;
}

fn object_path(package_path: &str, name: &str) -> String {
    let package = package_path.trim_end_matches('/');
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}/{name}")
    }
}

fn check_asset_name(name: &str) -> RecordingResult<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| matches!(c, '/' | '\\' | ':'))
        && !name.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(RecordingError::sink_creation(
            name,
            "asset names must be a single non-empty path component",
        ))
    }
}

/// A payload held by [`MemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Asset kind.
    pub kind: AssetKind,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

/// In-process [`AssetRegistry`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    package_path: String,
    assets: IndexMap<String, StoredAsset>,
}

impl MemoryRegistry {
    /// Creates an empty registry rooted at `package_path`.
    pub fn new(package_path: impl Into<String>) -> Self {
        Self {
            package_path: package_path.into(),
            assets: IndexMap::new(),
        }
    }

    /// Looks up an asset by name.
    pub fn get(&self, name: &str) -> Option<&StoredAsset> {
        self.assets.get(name)
    }

    /// Registered asset names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetRegistry for MemoryRegistry {
    fn register_asset(
        &mut self,
        name: &str,
        kind: AssetKind,
        payload: &[u8],
    ) -> RecordingResult<AssetHandle> {
        check_asset_name(name)?;
        if self.assets.contains_key(name) {
            return Err(RecordingError::sink_creation(name, "asset already exists"));
        }
        self.assets.insert(
            name.to_string(),
            StoredAsset {
                kind,
                payload: payload.to_vec(),
            },
        );
        Ok(AssetHandle {
            name: name.to_string(),
            kind,
            object_path: object_path(&self.package_path, name),
        })
    }

    fn discard_asset(&mut self, handle: &AssetHandle) -> RecordingResult<bool> {
        Ok(self.assets.shift_remove(&handle.name).is_some())
    }
}

/// Sidecar written next to every payload stored by [`DirectoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Asset name.
    pub name: String,
    /// Asset kind.
    pub kind: AssetKind,
    /// `package_path/name`.
    pub object_path: String,
    /// Payload size in bytes.
    pub size: u64,
    /// BLAKE3 hash of the payload.
    pub blake3: String,
}

/// [`AssetRegistry`] that stores assets as files under `root/package_path`.
///
/// Each asset `name` becomes `name.<ext>` plus a `name.asset.json` manifest.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    root: PathBuf,
    package_path: String,
}

impl DirectoryRegistry {
    /// Creates a registry. Directories are created on first registration.
    pub fn new(root: impl Into<PathBuf>, package_path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package_path: package_path.into(),
        }
    }

    /// Directory holding the package's assets.
    pub fn package_dir(&self) -> PathBuf {
        self.package_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |dir, part| dir.join(part))
    }

    /// Path of the stored payload for `name` and `kind`.
    pub fn payload_path(&self, name: &str, kind: AssetKind) -> PathBuf {
        self.package_dir().join(format!("{}.{}", name, kind.extension()))
    }

    /// Path of the manifest for `name`.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.package_dir().join(format!("{name}.asset.json"))
    }

    /// Reads the manifest of a registered asset.
    pub fn manifest(&self, name: &str) -> RecordingResult<AssetManifest> {
        let content = fs::read_to_string(self.manifest_path(name))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn remove_if_present(path: &Path) -> io::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Removes a file left by a failed registration.
    ///
    /// Returns false, after logging, if the file could not be removed.
    fn discard_partial(path: &Path) -> bool {
        match Self::remove_if_present(path) {
            Ok(_) => true,
            Err(e) => {
                warn!("left orphaned asset file {}: {}", path.display(), e);
                false
            }
        }
    }
}

impl AssetRegistry for DirectoryRegistry {
    fn register_asset(
        &mut self,
        name: &str,
        kind: AssetKind,
        payload: &[u8],
    ) -> RecordingResult<AssetHandle> {
        check_asset_name(name)?;
        let dir = self.package_dir();
        fs::create_dir_all(&dir).map_err(|e| RecordingError::sink_creation(name, e))?;

        let manifest_path = self.manifest_path(name);
        if manifest_path.exists() {
            return Err(RecordingError::sink_creation(name, "asset already exists"));
        }

        let payload_path = self.payload_path(name, kind);
        debug!("writing asset payload {}", payload_path.display());
        if let Err(e) = Self::write_new(&payload_path, payload) {
            if e.kind() != io::ErrorKind::AlreadyExists {
                Self::discard_partial(&payload_path);
            }
            return Err(RecordingError::sink_creation(name, e));
        }

        let handle = AssetHandle {
            name: name.to_string(),
            kind,
            object_path: object_path(&self.package_path, name),
        };
        let manifest = AssetManifest {
            name: handle.name.clone(),
            kind,
            object_path: handle.object_path.clone(),
            size: payload.len() as u64,
            blake3: blake3::hash(payload).to_hex().to_string(),
        };
        let written = serde_json::to_vec_pretty(&manifest)
            .map_err(io::Error::from)
            .and_then(|json| Self::write_new(&manifest_path, &json));
        if let Err(e) = written {
            Self::discard_partial(&payload_path);
            Self::discard_partial(&manifest_path);
            return Err(RecordingError::sink_creation(name, e));
        }

        info!("registered {} asset {}", kind, handle.object_path);
        Ok(handle)
    }

    fn discard_asset(&mut self, handle: &AssetHandle) -> RecordingResult<bool> {
        let removed = Self::remove_if_present(&self.payload_path(&handle.name, handle.kind))?;
        Self::remove_if_present(&self.manifest_path(&handle.name))?;
        Ok(removed)
    }
}
