use std::path::Path;
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::io::AsyncReadExt;
use tokio::{fs, io};
use uuid::Uuid;
use crate::rng::make_uuid;

#[async_trait]
pub trait NoteStorageIo: Send + Sync {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Reads the whole file unless it is larger than `limit`, in which case
    /// `data` may be incomplete. `size` is the size the file reported.
    async fn read_file(&self, path: &Path, limit: u64) -> io::Result<ReadFile>;

    async fn write_file(&self, path: &Path, data: Vec<u8>) -> io::Result<()>;

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn now(&self) -> OffsetDateTime;

    fn generate_uuid(&self) -> Uuid;
}

pub struct ReadFile {
    pub data: Vec<u8>,
    pub size: u64,
}

pub struct ProductionNoteStorageIo;

impl ProductionNoteStorageIo {
    pub fn new() -> Self {
        ProductionNoteStorageIo
    }
}

#[async_trait]
impl NoteStorageIo for ProductionNoteStorageIo {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read_file(&self, path: &Path, limit: u64) -> io::Result<ReadFile> {
        let file = fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        let mut data = Vec::new();
        if size <= limit {
            data.reserve(size as usize);
            // the file may grow after the metadata was read
            file.take(limit.saturating_add(1)).read_to_end(&mut data).await?;
        }
        Ok(ReadFile {
            size: size.max(data.len() as u64),
            data,
        })
    }

    async fn write_file(&self, path: &Path, data: Vec<u8>) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
