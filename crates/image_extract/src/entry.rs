//! Metadata of a single archive entry

/// File type bits of a unix mode
const S_IFMT: u32 = 0o170000;
/// Symbolic link file type
const S_IFLNK: u32 = 0o120000;

/// The kind of record stored in the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file with a payload
    File,
    /// Directory marker
    Directory,
    /// Symbolic link, the payload is the link target
    Symlink,
}

/// One record from the archive's central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Relative path exactly as stored in the archive
    pub name: String,
    pub kind: EntryKind,
    /// Uncompressed size in bytes
    pub size: u64,
    pub compressed_size: u64,
    /// Name of the compression method, e.g. `Deflated`
    pub compression: String,
}

impl ArchiveEntry {
    /// Build an entry from the fields of a zip central-directory record
    pub(crate) fn from_record(
        name: &str,
        is_dir: bool,
        unix_mode: Option<u32>,
        size: u64,
        compressed_size: u64,
        compression: zip::CompressionMethod,
    ) -> Self {
        let kind = if is_dir {
            EntryKind::Directory
        } else if unix_mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };

        Self {
            name: name.to_string(),
            kind,
            size,
            compressed_size,
            compression: format!("{compression:?}"),
        }
    }

    /// Construct a regular file entry, mainly useful for filtering names
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: 0,
            compressed_size: 0,
            compression: String::from("Stored"),
        }
    }

    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}
