//! File name grammars.
//!
//! CCI file names are `-` delimited and come in two forms:
//!
//! ```text
//! <date>[<time>]-ESACCI-<level>_<project>-<data type>-<product>[-...]-fv<version>.nc
//! ESACCI-<project>-<level>-<data type>-<product>[-...]-<date>[<time>]-fv<version>.nc
//! ```
//!
//! Only the four facets before the optional segregators are extracted; they
//! are resolved against the vocabulary afterwards.

use std::path::Path;

use thiserror::Error;

use cci_model::Facet;

/// Marker segment identifying a CCI file name.
pub const PROJECT_MARKER: &str = "ESACCI";

const MIN_SEGMENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameGrammar {
    /// Date first, then the marker, then `<level>_<project>`.
    DateFirst,
    /// Marker first, then project and level as separate segments.
    ProjectFirst,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("file name \"{name}\" has {segments} segments, expected at least {MIN_SEGMENTS}")]
    TooFewSegments { name: String, segments: usize },
    #[error("file name \"{name}\" matches no known grammar")]
    UnknownGrammar { name: String },
    #[error("file name \"{name}\" has no '_' between processing level and project")]
    MissingLevelSeparator { name: String },
}

impl FilenameError {
    pub fn file_name(&self) -> &str {
        match self {
            FilenameError::TooFewSegments { name, .. }
            | FilenameError::UnknownGrammar { name }
            | FilenameError::MissingLevelSeparator { name } => name,
        }
    }
}

/// Raw facet values taken from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameFacets {
    pub grammar: FilenameGrammar,
    pub processing_level: String,
    pub project: String,
    pub data_type: String,
    pub product_string: String,
}

impl FilenameFacets {
    /// The raw values paired with their facets, in resolution order.
    pub fn values(&self) -> [(Facet, &str); 4] {
        [
            (Facet::ProcessingLevel, self.processing_level.as_str()),
            (Facet::Ecv, self.project.as_str()),
            (Facet::DataType, self.data_type.as_str()),
            (Facet::ProductString, self.product_string.as_str()),
        ]
    }
}

/// Parse the last path segment of `path`.
pub fn parse_file_name(path: &Path) -> Result<FilenameFacets, FilenameError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_name(&name)
}

/// Parse a bare file name.
pub fn parse_name(name: &str) -> Result<FilenameFacets, FilenameError> {
    let segments: Vec<&str> = name.split('-').collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(FilenameError::TooFewSegments {
            name: name.to_string(),
            segments: segments.len(),
        });
    }

    if segments[1] == PROJECT_MARKER {
        let (level, project) =
            segments[2]
                .split_once('_')
                .ok_or_else(|| FilenameError::MissingLevelSeparator {
                    name: name.to_string(),
                })?;
        // Anything after a second '_' is not part of the project.
        let project = project.split('_').next().unwrap_or(project);
        Ok(FilenameFacets {
            grammar: FilenameGrammar::DateFirst,
            processing_level: level.to_string(),
            project: project.to_string(),
            data_type: segments[3].to_string(),
            product_string: segments[4].to_string(),
        })
    } else if segments[0] == PROJECT_MARKER {
        Ok(FilenameFacets {
            grammar: FilenameGrammar::ProjectFirst,
            processing_level: segments[2].to_string(),
            project: segments[1].to_string(),
            data_type: segments[3].to_string(),
            product_string: segments[4].to_string(),
        })
    } else {
        Err(FilenameError::UnknownGrammar {
            name: name.to_string(),
        })
    }
}
