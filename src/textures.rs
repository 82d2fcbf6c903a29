use anyhow::{Context, Result};
use futures::channel::oneshot;
use std::path::{Path, PathBuf};
use std::task::Poll;

/// How texel values are to be interpreted on the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Display-referred color, decoded to linear by the sampler
    Srgb,
    /// Raw data (normals, masks), sampled as-is
    Linear,
}

/// Texture assets used by the earth scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    EarthDay,
    EarthNormal,
    EarthSpecular,
    EarthClouds,
}

impl TextureRole {
    pub const ALL: [TextureRole; 4] = [
        TextureRole::EarthDay,
        TextureRole::EarthNormal,
        TextureRole::EarthSpecular,
        TextureRole::EarthClouds,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TextureRole::EarthDay => "earth_day.jpg",
            TextureRole::EarthNormal => "earth_normal.png",
            TextureRole::EarthSpecular => "earth_specular.png",
            TextureRole::EarthClouds => "earth_clouds.jpg",
        }
    }

    pub fn color_space(self) -> ColorSpace {
        match self {
            TextureRole::EarthDay | TextureRole::EarthClouds => ColorSpace::Srgb,
            TextureRole::EarthNormal | TextureRole::EarthSpecular => ColorSpace::Linear,
        }
    }
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub color_space: ColorSpace,
}

/// Decode an image file into RGBA8
pub fn decode_texture(path: &Path, color_space: ColorSpace) -> Result<TextureData> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode texture: {:?}", path))?
        .into_rgba8();

    Ok(TextureData {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
        color_space,
    })
}

/// Starts background decodes of texture files relative to a base directory
#[derive(Debug, Clone)]
pub struct TextureLoader {
    base_dir: PathBuf,
}

impl TextureLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn load_role(&self, role: TextureRole) -> PendingTexture {
        self.load(role.file_name(), role.color_space())
    }

    /// Returns immediately; the decode runs on its own thread
    pub fn load(&self, file_name: &str, color_space: ColorSpace) -> PendingTexture {
        let path = self.base_dir.join(file_name);
        let (sender, receiver) = oneshot::channel();

        let worker_path = path.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("texture-{}", file_name))
            .spawn(move || {
                // Receiver may already be gone after dispose
                let _ = sender.send(decode_texture(&worker_path, color_space));
            });

        match spawned {
            Ok(_) => PendingTexture {
                path,
                receiver: Some(receiver),
                early: None,
            },
            Err(e) => PendingTexture {
                early: Some(Err(
                    anyhow::Error::new(e).context("Failed to spawn texture loader thread"),
                )),
                path,
                receiver: None,
            },
        }
    }
}

/// Handle to an in-flight texture decode
#[derive(Debug)]
pub struct PendingTexture {
    path: PathBuf,
    receiver: Option<oneshot::Receiver<Result<TextureData>>>,
    early: Option<Result<TextureData>>,
}

impl PendingTexture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check for completion. Yields `Ready` at most once.
    pub fn poll(&mut self) -> Poll<Result<TextureData>> {
        if let Some(result) = self.early.take() {
            return Poll::Ready(result);
        }

        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Pending;
        };

        match receiver.try_recv() {
            Ok(Some(result)) => {
                self.receiver = None;
                Poll::Ready(result)
            }
            Ok(None) => Poll::Pending,
            Err(oneshot::Canceled) => {
                self.receiver = None;
                Poll::Ready(Err(anyhow::anyhow!(
                    "Texture loader for {:?} exited without a result",
                    self.path
                )))
            }
        }
    }

    /// Await the decode result
    pub async fn wait(mut self) -> Result<TextureData> {
        if let Some(result) = self.early.take() {
            return result;
        }
        match self.receiver.take() {
            Some(receiver) => receiver
                .await
                .map_err(|_| anyhow::anyhow!("Texture loader for {:?} was dropped", self.path))?,
            None => Err(anyhow::anyhow!("Texture {:?} was already taken", self.path)),
        }
    }
}
