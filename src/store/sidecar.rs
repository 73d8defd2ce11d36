// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::format::{parse_outline, serialize_outline};
use crate::model::ids::NodeIdGen;
use crate::model::node::{Node, Outline};

const SIDECAR_SUFFIX: &str = ".ramify.json";
const SIDECAR_VERSION: u32 = 1;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    SymlinkRefused { path: PathBuf },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to
    /// stable storage where possible. Exact guarantees are
    /// platform/filesystem-dependent.
    Durable,
}

/// Per-node presentation state the Markdown document cannot carry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl NodeMeta {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// On-disk shape of the sidecar, keyed by encoded title path.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SidecarFile {
    version: u32,
    #[serde(default)]
    nodes: BTreeMap<String, NodeMeta>,
}

/// One Markdown document plus its presentation sidecar.
///
/// The document itself is the single source of truth for structure; the
/// sidecar only carries collapsed/color/stroke/width, keyed by title path so
/// it survives a round-trip through other editors. A missing or corrupt
/// sidecar degrades to defaults, never to an error.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
    durability: WriteDurability,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sidecar_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.push_str(SIDECAR_SUFFIX);
        self.path.with_file_name(name)
    }

    /// Loads the document and applies any sidecar state. A missing document
    /// yields an empty outline so new files can be created on first save.
    pub fn load(&self) -> Result<(Outline, NodeIdGen), StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(StoreError::Io { path: self.path.clone(), source })
            }
        };
        let (mut outline, id_gen) = parse_outline(&text).into_parts();

        if let Some(sidecar) = self.read_sidecar() {
            apply_meta(&mut outline, &sidecar);
        }
        Ok((outline, id_gen))
    }

    /// Writes the Markdown document and the sidecar, both atomically.
    pub fn save(&self, outline: &Outline) -> Result<(), StoreError> {
        let text = serialize_outline(outline);
        write_atomic(&self.path, text.as_bytes(), self.durability)?;

        let sidecar = collect_meta(outline);
        let sidecar_path = self.sidecar_path();
        if sidecar.nodes.is_empty() {
            // Nothing worth keeping; drop a stale sidecar rather than
            // leaving contradictory state behind.
            match fs::remove_file(&sidecar_path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path: sidecar_path, source }),
            }
            return Ok(());
        }

        let json = serde_json::to_vec_pretty(&sidecar)
            .map_err(|source| StoreError::Json { path: sidecar_path.clone(), source })?;
        write_atomic(&sidecar_path, &json, self.durability)
    }

    fn read_sidecar(&self) -> Option<SidecarFile> {
        let text = fs::read_to_string(self.sidecar_path()).ok()?;
        serde_json::from_str(&text).ok()
    }
}

/// Escapes `/` and `\` inside a title so segments can be joined with `/`
/// without ambiguity.
fn encode_path_segment(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            _ => out.push(ch),
        }
    }
    out
}

fn collect_meta(outline: &Outline) -> SidecarFile {
    let mut sidecar = SidecarFile { version: SIDECAR_VERSION, nodes: BTreeMap::new() };
    let mut path = Vec::new();
    for root in outline.roots() {
        collect_node_meta(root, &mut path, &mut sidecar);
    }
    sidecar
}

fn collect_node_meta(node: &Node, path: &mut Vec<String>, sidecar: &mut SidecarFile) {
    path.push(encode_path_segment(node.title()));
    let meta = NodeMeta {
        collapsed: node.collapsed(),
        color: node.color().map(str::to_owned),
        stroke_weight: node.stroke_weight(),
        width: node.width(),
    };
    if !meta.is_default() {
        sidecar.nodes.entry(path.join("/")).or_insert(meta);
    }
    for child in node.children() {
        collect_node_meta(child, path, sidecar);
    }
    path.pop();
}

fn apply_meta(outline: &mut Outline, sidecar: &SidecarFile) {
    let mut path = Vec::new();
    for root in outline.roots_mut() {
        apply_node_meta(root, &mut path, sidecar);
    }
}

fn apply_node_meta(node: &mut Node, path: &mut Vec<String>, sidecar: &SidecarFile) {
    path.push(encode_path_segment(node.title()));
    if let Some(meta) = sidecar.nodes.get(&path.join("/")) {
        node.set_collapsed(meta.collapsed);
        node.set_color(meta.color.clone());
        node.set_stroke_weight(meta.stroke_weight);
        node.set_width(meta.width);
    }
    for child in node.children_mut() {
        apply_node_meta(child, path, sidecar);
    }
    path.pop();
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused { path: path.to_path_buf() });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".ramify.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    file.write_all(contents)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if durability == WriteDurability::Durable {
        file.sync_all()
            .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            dir.sync_all()
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
    }

    Ok(())
}
