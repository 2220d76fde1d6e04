pub mod attributes;
pub mod checksum;
pub mod datasets;
pub mod discovery;
pub mod error;

pub use attributes::{AttributeSource, FileAttributes, JsonSidecarSource};
pub use checksum::file_sha256;
pub use datasets::{parse_dataset_list, read_dataset_list};
pub use discovery::{DATA_FILE_EXTENSION, FileEnumerator, FsFileEnumerator, list_data_files};
pub use error::{IngestError, Result};
