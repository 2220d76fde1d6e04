//! SHA-256 digests of data files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Buffer size for reading files during checksum computation.
const BUFFER_SIZE: usize = 65536; // 64 KB

/// Compute the SHA-256 of a file as lowercase hex, streaming in fixed-size chunks.
pub fn file_sha256(path: &Path) -> Result<String> {
    let read_error = |source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hex_hash = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %hex_hash, "checksum computed");
    Ok(hex_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_sha256() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("hello.nc");
        std::fs::write(&test_file, b"hello world").unwrap();

        let hash = file_sha256(&test_file).unwrap();
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_identical_files_identical_digest() {
        let dir = tempfile::tempdir().unwrap();
        let content = vec![7u8; BUFFER_SIZE * 2 + 13];
        let a = dir.path().join("a.nc");
        let b = dir.path().join("b.nc");
        std::fs::write(&a, &content).unwrap();
        std::fs::write(&b, &content).unwrap();

        assert_eq!(file_sha256(&a).unwrap(), file_sha256(&b).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = file_sha256(&dir.path().join("absent.nc")).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
