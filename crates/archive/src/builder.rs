use std::collections::HashSet;
use std::io::{Cursor, Write};

use skowt_protocol::AssetRef;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ArchiveError;
use crate::path::{entry_path, numbered_path, sanitize_extension};

/// A file staged for the archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub data: Vec<u8>,
}

/// Accumulates fetched assets and packs them into a zip.
///
/// Paths are unique: a second asset landing on an existing path gets a
/// ` (2)`, ` (3)`, ... suffix before its extension.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<ArchiveEntry>,
    taken: HashSet<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an asset's bytes and returns the path it was stored under.
    pub fn add(&mut self, asset: &AssetRef, data: Vec<u8>) -> String {
        let base = entry_path(asset);
        let ext = sanitize_extension(&asset.extension);

        let mut path = base.clone();
        let mut n = 2;
        while self.taken.contains(&path) {
            path = numbered_path(&base, &ext, n);
            n += 1;
        }

        self.taken.insert(path.clone());
        self.entries.push(ArchiveEntry {
            path: path.clone(),
            data,
        });
        path
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Staged paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Total uncompressed bytes staged.
    pub fn staged_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.data.len() as u64).sum()
    }

    /// Packs the staged entries into an in-memory Deflate zip.
    ///
    /// CPU-bound; async callers should run it on a blocking thread.
    pub fn build(self, level: i64) -> Result<Vec<u8>, ArchiveError> {
        if self.entries.is_empty() {
            return Err(ArchiveError::Empty);
        }

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(level));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            zip.start_file(entry.path.as_str(), options)?;
            zip.write_all(&entry.data)?;
        }
        let bytes = zip.finish()?.into_inner();

        debug!(
            entries = self.entries.len(),
            compressed_bytes = bytes.len(),
            level,
            "archive built"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BALANCED_LEVEL;
    use std::io::Read;
    use zip::ZipArchive;

    fn asset(id: &str, name: &str, ext: &str, category: &str) -> AssetRef {
        AssetRef {
            id: id.into(),
            name: name.into(),
            extension: ext.into(),
            game_slug: "genshin".into(),
            category_name: category.into(),
            size: 0,
        }
    }

    fn read_entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            out.push((file.name().to_string(), data));
        }
        out
    }

    #[test]
    fn builds_grouped_layout() {
        let mut builder = ArchiveBuilder::new();
        builder.add(&asset("a1", "Furina", "png", "characters"), b"png-bytes".to_vec());
        builder.add(&asset("a2", "Sword", "jpg", "weapons"), b"jpg-bytes".to_vec());

        let entries = read_entries(builder.build(BALANCED_LEVEL).unwrap());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "genshin/characters/Furina.png");
        assert_eq!(entries[0].1, b"png-bytes");
        assert_eq!(entries[1].0, "genshin/weapons/Sword.jpg");
    }

    #[test]
    fn duplicate_paths_get_suffix() {
        let mut builder = ArchiveBuilder::new();
        let first = builder.add(&asset("a1", "Icon", "png", "ui"), vec![1]);
        let second = builder.add(&asset("a2", "Icon", "png", "ui"), vec![2]);
        let third = builder.add(&asset("a3", "Icon", "png", "ui"), vec![3]);

        assert_eq!(first, "genshin/ui/Icon.png");
        assert_eq!(second, "genshin/ui/Icon (2).png");
        assert_eq!(third, "genshin/ui/Icon (3).png");

        let entries = read_entries(builder.build(BALANCED_LEVEL).unwrap());
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn first_entry_matches_entry_path() {
        let mut builder = ArchiveBuilder::new();
        for target in [
            asset("a1", "../Furina", "png", "UI/Icons"),
            asset("a2", "raw", "", "misc"),
            asset("a3", "Splash Art. ", ".WebP", "art"),
        ] {
            assert_eq!(builder.add(&target, vec![0]), entry_path(&target));
        }
    }

    #[test]
    fn duplicate_without_extension_gets_suffix() {
        let mut builder = ArchiveBuilder::new();
        builder.add(&asset("a1", "raw", "", "misc"), vec![1]);
        let second = builder.add(&asset("a2", "raw", "", "misc"), vec![2]);
        assert_eq!(second, "genshin/misc/raw (2)");
    }

    #[test]
    fn empty_builder_refuses_to_build() {
        let err = ArchiveBuilder::new().build(BALANCED_LEVEL).unwrap_err();
        assert!(matches!(err, ArchiveError::Empty));
    }

    #[test]
    fn tracks_len_and_bytes() {
        let mut builder = ArchiveBuilder::new();
        assert!(builder.is_empty());
        builder.add(&asset("a1", "x", "png", "c"), vec![0; 100]);
        builder.add(&asset("a2", "y", "png", "c"), vec![0; 50]);
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.staged_bytes(), 150);
        let paths: Vec<&str> = builder.paths().collect();
        assert_eq!(paths, vec!["genshin/c/x.png", "genshin/c/y.png"]);
    }

    #[test]
    fn compresses_repetitive_data() {
        let mut builder = ArchiveBuilder::new();
        builder.add(&asset("a1", "big", "png", "c"), vec![7u8; 64 * 1024]);
        let bytes = builder.build(BALANCED_LEVEL).unwrap();
        assert!(bytes.len() < 64 * 1024);
    }
}
