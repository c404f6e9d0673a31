//! Status records for files, real and virtual.

use std::fs::Metadata;

// Identity fields reported for every in-memory file. Callers only branch on
// the record's shape (size and kind predicates), so one fixed identity is
// enough; there is deliberately no mtime/atime/ctime.
const VIRTUAL_DEV: u64 = 8_675_309;
const VIRTUAL_INO: u64 = 44_700_000;
const VIRTUAL_MODE: u32 = 0o100_644;
const VIRTUAL_NLINK: u64 = 1;
const VIRTUAL_UID: u32 = 501;
const VIRTUAL_GID: u32 = 20;
const VIRTUAL_RDEV: u64 = 0;
const VIRTUAL_BLKSIZE: u64 = 4096;

/// Classification of a file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Block device.
    BlockDevice,
    /// Character device.
    CharDevice,
    /// Symbolic link.
    Symlink,
    /// Named pipe.
    Fifo,
    /// Unix domain socket.
    Socket,
    /// Anything the platform reports that fits none of the above.
    Unknown,
}

/// The metadata structure returned by the stat operations.
///
/// Carries the identity fields callers pattern-match on plus a
/// [`FileKind`] backing the type predicates. Records for in-memory files
/// come from [`FileStat::for_virtual_file`]; records for disk files from
/// [`FileStat::from_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Device id of the containing file system.
    pub dev: u64,
    /// Inode number.
    pub ino: u64,
    /// Permission bits and type bits.
    pub mode: u32,
    /// Hard link count.
    pub nlink: u64,
    /// Owning user id.
    pub uid: u32,
    /// Owning group id.
    pub gid: u32,
    /// Device id, for device files.
    pub rdev: u64,
    /// Size in bytes.
    pub size: u64,
    /// Preferred I/O block size.
    pub blksize: u64,
    kind: FileKind,
}

impl FileStat {
    /// Status record for an in-memory file of `size` bytes.
    ///
    /// Every field except `size` is a fixed placeholder; the record always
    /// classifies as a regular file.
    pub fn for_virtual_file(size: u64) -> Self {
        Self {
            dev: VIRTUAL_DEV,
            ino: VIRTUAL_INO,
            mode: VIRTUAL_MODE,
            nlink: VIRTUAL_NLINK,
            uid: VIRTUAL_UID,
            gid: VIRTUAL_GID,
            rdev: VIRTUAL_RDEV,
            size,
            blksize: VIRTUAL_BLKSIZE,
            kind: FileKind::File,
        }
    }

    /// Build a record from on-disk metadata.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode: metadata.mode(),
            nlink: metadata.nlink(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            rdev: metadata.rdev(),
            size: metadata.size(),
            blksize: metadata.blksize(),
            kind: kind_of(metadata),
        }
    }

    /// Build a record from on-disk metadata.
    ///
    /// Unix identity fields are reported as zero on platforms that lack them.
    #[cfg(not(unix))]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            dev: 0,
            ino: 0,
            mode: 0,
            nlink: 0,
            uid: 0,
            gid: 0,
            rdev: 0,
            size: metadata.len(),
            blksize: 0,
            kind: kind_of(metadata),
        }
    }

    /// The entry's classification.
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Whether this is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// Whether this is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Whether this is a block device.
    pub fn is_block_device(&self) -> bool {
        self.kind == FileKind::BlockDevice
    }

    /// Whether this is a character device.
    pub fn is_char_device(&self) -> bool {
        self.kind == FileKind::CharDevice
    }

    /// Whether this is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }

    /// Whether this is a named pipe.
    pub fn is_fifo(&self) -> bool {
        self.kind == FileKind::Fifo
    }

    /// Whether this is a socket.
    pub fn is_socket(&self) -> bool {
        self.kind == FileKind::Socket
    }
}

#[cfg(unix)]
fn kind_of(metadata: &Metadata) -> FileKind {
    use std::os::unix::fs::FileTypeExt;

    let file_type = metadata.file_type();
    if file_type.is_file() {
        FileKind::File
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_symlink() {
        FileKind::Symlink
    } else if file_type.is_block_device() {
        FileKind::BlockDevice
    } else if file_type.is_char_device() {
        FileKind::CharDevice
    } else if file_type.is_fifo() {
        FileKind::Fifo
    } else if file_type.is_socket() {
        FileKind::Socket
    } else {
        FileKind::Unknown
    }
}

#[cfg(not(unix))]
fn kind_of(metadata: &Metadata) -> FileKind {
    let file_type = metadata.file_type();
    if file_type.is_file() {
        FileKind::File
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_symlink() {
        FileKind::Symlink
    } else {
        FileKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_virtual_stat_shape() {
        let stat = FileStat::for_virtual_file(42);
        assert_eq!(stat.size, 42);
        assert!(stat.is_file());
        assert!(!stat.is_directory());
        assert!(!stat.is_block_device());
        assert!(!stat.is_char_device());
        assert!(!stat.is_symlink());
        assert!(!stat.is_fifo());
        assert!(!stat.is_socket());
    }

    #[test]
    fn test_virtual_stat_identity_is_constant() {
        let a = FileStat::for_virtual_file(1);
        let b = FileStat::for_virtual_file(9000);
        assert_eq!((a.dev, a.ino, a.mode, a.uid, a.gid), (b.dev, b.ino, b.mode, b.uid, b.gid));
        // Regular-file type bits, rw-r--r-- permissions.
        assert_eq!(a.mode, 33188);
    }

    #[test]
    fn test_from_metadata_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "12345").unwrap();

        let stat = FileStat::from_metadata(&fs::metadata(&path).unwrap());
        assert!(stat.is_file());
        assert_eq!(stat.size, 5);
    }

    #[test]
    fn test_from_metadata_directory() {
        let dir = TempDir::new().unwrap();
        let stat = FileStat::from_metadata(&fs::metadata(dir.path()).unwrap());
        assert!(stat.is_directory());
        assert!(!stat.is_file());
    }
}
