//! # Documents and Folders
//!
//! A [`KmlDocument`] owns a root folder whose contents are written directly
//! under `<Document>`, plus any number of named [`Folder`]s. Styles used by
//! elements anywhere in the document are gathered and written once, before
//! the contents.
//!
//! Attachments (overlay images and other files the document refers to by
//! name) are copied next to a `.kml` file, or stored beside the document
//! inside a deflated `.kmz` archive.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::element::{Attachment, KmlElement};
use crate::error::KmlError;
use crate::formats;
use crate::style::Style;
use crate::template::{render, xml_escape};

fn header(template: &str, name: &str, description: &str) -> Result<String, KmlError> {
    let fields = IndexMap::from([
        ("name".to_string(), Value::String(xml_escape(name))),
        ("description".to_string(), Value::String(xml_escape(description))),
    ]);
    render(template, &fields)
}

/// A named group of elements.
pub struct Folder {
    name: String,
    description: String,
    contents: Vec<Box<dyn KmlElement>>,
}

impl Folder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            contents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_element(&mut self, element: impl KmlElement + 'static) {
        self.contents.push(Box::new(element));
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn write_contents(&self) -> Result<String, KmlError> {
        let mut out = String::new();
        for element in &self.contents {
            out.push_str(&element.write()?);
        }
        Ok(out)
    }
}

impl KmlElement for Folder {
    fn write(&self) -> Result<String, KmlError> {
        let mut out = header(formats::FOLDER_HEADER, &self.name, &self.description)?;
        out.push_str(&self.write_contents()?);
        out.push_str(formats::FOLDER_FOOTER);
        Ok(out)
    }

    fn styles(&self) -> Vec<&Style> {
        self.contents.iter().flat_map(|element| element.styles()).collect()
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.contents
            .iter()
            .flat_map(|element| element.attachments())
            .collect()
    }
}

impl fmt::Debug for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Folder")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("elements", &self.contents.len())
            .finish()
    }
}

/// A complete KML file.
#[derive(Debug)]
pub struct KmlDocument {
    name: String,
    description: String,
    root: Folder,
    folders: IndexMap<String, Folder>,
    files: Vec<Attachment>,
}

impl KmlDocument {
    /// An empty document. An empty `name` is replaced by the output file
    /// stem in [`write`](Self::write).
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            root: Folder::new("Root", "Root Folder"),
            folders: IndexMap::new(),
            files: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add `folder` under its own name.
    ///
    /// # Errors
    ///
    /// `KmlError::DuplicateFolder` if a folder with that name exists.
    pub fn add_folder(&mut self, folder: Folder) -> Result<(), KmlError> {
        let key = folder.name.clone();
        self.add_folder_as(key, folder)
    }

    /// Add `folder` under `key`, which `add_element` then refers to.
    ///
    /// # Errors
    ///
    /// `KmlError::DuplicateFolder` if `key` is taken.
    pub fn add_folder_as(
        &mut self,
        key: impl Into<String>,
        folder: Folder,
    ) -> Result<(), KmlError> {
        let key = key.into();
        if self.folders.contains_key(&key) {
            return Err(KmlError::DuplicateFolder(key));
        }
        tracing::trace!(folder = %key, "added folder");
        self.folders.insert(key, folder);
        Ok(())
    }

    /// Add `element` to the folder `folder`, or to the document root when
    /// `folder` is `None`.
    ///
    /// # Errors
    ///
    /// `KmlError::UnknownFolder` if no folder is registered under that key.
    pub fn add_element(
        &mut self,
        element: impl KmlElement + 'static,
        folder: Option<&str>,
    ) -> Result<(), KmlError> {
        let target = match folder {
            None => &mut self.root,
            Some(key) => self
                .folders
                .get_mut(key)
                .ok_or_else(|| KmlError::UnknownFolder(key.to_string()))?,
        };
        target.add_element(element);
        Ok(())
    }

    /// Ship a file on disk with the document, referenced by its file name.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.files.push(Attachment::file(path.as_ref()));
    }

    /// Ship in-memory content with the document under `name`.
    pub fn add_bytes(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.push(Attachment::bytes(name, data));
    }

    fn all_folders(&self) -> impl Iterator<Item = &Folder> {
        std::iter::once(&self.root).chain(self.folders.values())
    }

    /// Every distinct style used in the document, first use first. Elements
    /// sharing a style id must share the style itself.
    ///
    /// # Errors
    ///
    /// `KmlError::ConflictingStyle` if two different styles use one id.
    pub fn styles(&self) -> Result<Vec<&Style>, KmlError> {
        let mut seen: IndexMap<String, &Style> = IndexMap::new();
        for style in self.all_folders().flat_map(KmlElement::styles) {
            let id = style.id();
            match seen.get(&id) {
                Some(first) if *first != style => {
                    tracing::warn!(style = %id, "two different styles share one id");
                    return Err(KmlError::ConflictingStyle(id));
                }
                Some(_) => {}
                None => {
                    seen.insert(id, style);
                }
            }
        }
        Ok(seen.into_values().collect())
    }

    /// Every attachment of the document and its elements, keyed by the
    /// name the document refers to it by. The same attachment used twice
    /// is listed once.
    ///
    /// # Errors
    ///
    /// - `KmlError::DuplicateAttachment` if different attachments share a
    ///   name.
    /// - `KmlError::InvalidAttachment` for a file path without a file name.
    pub fn attachments(&self) -> Result<IndexMap<String, &Attachment>, KmlError> {
        let mut named: IndexMap<String, &Attachment> = IndexMap::new();
        let element_files = self.all_folders().flat_map(KmlElement::attachments);
        for attachment in self.files.iter().chain(element_files) {
            let name = attachment.name()?;
            match named.get(&name) {
                Some(first) if *first != attachment => {
                    return Err(KmlError::DuplicateAttachment(name));
                }
                Some(_) => {}
                None => {
                    named.insert(name, attachment);
                }
            }
        }
        Ok(named)
    }

    /// Render the whole document.
    pub fn render(&self) -> Result<String, KmlError> {
        self.render_named(&self.name)
    }

    fn render_named(&self, name: &str) -> Result<String, KmlError> {
        let mut out = header(formats::FILE_HEADER, name, &self.description)?;
        for style in self.styles()? {
            out.push_str(&style.write()?);
        }
        out.push_str(&self.root.write_contents()?);
        for folder in self.folders.values() {
            out.push_str(&folder.write()?);
        }
        out.push_str(formats::FILE_FOOTER);
        Ok(out)
    }

    /// Write the document to `path`, creating parent directories as
    /// needed.
    ///
    /// A `.kml` path gets the plain document, with every attachment copied
    /// into the same directory. A `.kmz` path gets a deflated archive holding
    /// the document as `<stem>.kml` plus every attachment.
    ///
    /// # Errors
    ///
    /// - `KmlError::UnsupportedExtension` unless `path` ends in `.kml` or
    ///   `.kmz`.
    /// - `KmlError::DuplicateAttachment` if two attachments share a name.
    /// - `KmlError::Io` or `KmlError::Zip` if an output cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), KmlError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if extension != "kml" && extension != "kmz" {
            return Err(KmlError::UnsupportedExtension(extension));
        }

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = if self.name.is_empty() {
            stem.clone()
        } else {
            self.name.clone()
        };
        let text = self.render_named(&name)?;
        let attachments = self.attachments()?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir)?;
        }

        if extension == "kmz" {
            write_kmz(path, &format!("{stem}.kml"), &text, &attachments)?;
        } else {
            std::fs::write(path, &text)?;
            let dir = dir.unwrap_or(Path::new("."));
            for (file_name, attachment) in &attachments {
                copy_attachment(attachment, &dir.join(file_name))?;
            }
        }

        tracing::debug!(
            path = %path.display(),
            bytes = text.len(),
            attachments = attachments.len(),
            "wrote KML document"
        );
        Ok(())
    }
}

fn write_kmz(
    path: &Path,
    kml_name: &str,
    text: &str,
    attachments: &IndexMap<String, &Attachment>,
) -> Result<(), KmlError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut kmz = ZipWriter::new(File::create(path)?);

    kmz.start_file(kml_name, options)?;
    kmz.write_all(text.as_bytes())?;
    for (file_name, attachment) in attachments {
        kmz.start_file(file_name.as_str(), options)?;
        kmz.write_all(&attachment.read()?)?;
    }

    kmz.finish()?;
    Ok(())
}

fn copy_attachment(attachment: &Attachment, dst: &Path) -> Result<(), KmlError> {
    match attachment {
        Attachment::File(src) => {
            let same_file = match (src.canonicalize(), dst.canonicalize()) {
                (Ok(src), Ok(dst)) => src == dst,
                _ => false,
            };
            if !same_file {
                tracing::trace!(src = %src.display(), dst = %dst.display(), "copying attachment");
                std::fs::copy(src, dst)?;
            }
        }
        Attachment::Bytes { data, .. } => {
            tracing::trace!(dst = %dst.display(), "writing attachment");
            std::fs::write(dst, data)?;
        }
    }
    Ok(())
}
