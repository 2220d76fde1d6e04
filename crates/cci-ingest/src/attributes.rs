//! Access to the attributes embedded in a data file.
//!
//! Reading netCDF headers happens outside the tagger; an external dump step
//! writes one JSON sidecar per data file (`<file>.json`):
//!
//! ```json
//! {
//!   "global": { "platform": "NOAA-14", "sensor": "AVHRR" },
//!   "variables": { "sst": { "long_name": "sea surface temperature" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{IngestError, Result};

/// Global and per-variable attributes of one file.
///
/// Numeric and boolean values are kept in their JSON text form; arrays,
/// objects and nulls are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileAttributes {
    /// Global attributes keyed by lower-cased name.
    #[serde(default, deserialize_with = "scalar_attributes")]
    pub global: BTreeMap<String, String>,
    /// Variable name -> attribute name -> value.
    #[serde(default, deserialize_with = "variable_attributes")]
    pub variables: BTreeMap<String, BTreeMap<String, String>>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalars(raw: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    raw.into_iter()
        .filter_map(|(name, value)| scalar_text(value).map(|text| (name, text)))
        .collect()
}

fn scalar_attributes<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, Value>::deserialize(deserializer).map(scalars)
}

fn variable_attributes<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(variable, attrs)| (variable, scalars(attrs)))
        .collect())
}

impl FileAttributes {
    /// Lower-case the global attribute names. On collision the last name in sort order wins.
    pub fn normalized(self) -> Self {
        let global = self
            .global
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
        Self {
            global,
            variables: self.variables,
        }
    }

    pub fn global(&self, name: &str) -> Option<&str> {
        self.global.get(name).map(String::as_str)
    }

    /// Variables whose `long_name` attribute is present but empty.
    pub fn variables_with_empty_long_name(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .filter(|(_, attrs)| {
                attrs
                    .iter()
                    .any(|(name, value)| name.eq_ignore_ascii_case("long_name") && value.is_empty())
            })
            .map(|(var, _)| var.as_str())
    }
}

/// Supplies the attributes of a data file.
pub trait AttributeSource {
    fn read(&self, path: &Path) -> Result<FileAttributes>;
}

/// Reads attributes from a `<file>.json` sidecar next to each data file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSidecarSource;

impl JsonSidecarSource {
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(".json");
        PathBuf::from(name)
    }
}

impl AttributeSource for JsonSidecarSource {
    fn read(&self, path: &Path) -> Result<FileAttributes> {
        let sidecar = Self::sidecar_path(path);
        if !sidecar.is_file() {
            return Err(IngestError::MissingAttributes {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(&sidecar).map_err(|e| IngestError::FileRead {
            path: sidecar.clone(),
            source: e,
        })?;
        let attributes: FileAttributes =
            serde_json::from_str(&text).map_err(|e| IngestError::AttributeFormat {
                path: sidecar,
                message: e.to_string(),
            })?;
        Ok(attributes.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_appends_json() {
        assert_eq!(
            JsonSidecarSource::sidecar_path(Path::new("/data/a.nc")),
            PathBuf::from("/data/a.nc.json")
        );
    }

    #[test]
    fn normalized_lowercases_global_names() {
        let mut attrs = FileAttributes::default();
        attrs.global.insert("Platform".to_string(), "ENVISAT".to_string());
        let attrs = attrs.normalized();
        assert_eq!(attrs.global("platform"), Some("ENVISAT"));
    }

    #[test]
    fn finds_empty_long_names() {
        let json = r#"{"variables": {"sst": {"long_name": ""}, "lat": {"LONG_NAME": "latitude"}}}"#;
        let attrs: FileAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.variables_with_empty_long_name().collect::<Vec<_>>(), vec!["sst"]);
    }

    #[test]
    fn non_string_values_become_text() {
        let json = r#"{
            "global": {
                "geospatial_lat_min": -90.0,
                "product_version": 2,
                "flag": true,
                "valid_range": [0, 1],
                "comment": null
            },
            "variables": {"sst": {"long_name": "sst", "_FillValue": -32768}}
        }"#;
        let attrs: FileAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.global("geospatial_lat_min"), Some("-90.0"));
        assert_eq!(attrs.global("product_version"), Some("2"));
        assert_eq!(attrs.global("flag"), Some("true"));
        assert_eq!(attrs.global("valid_range"), None);
        assert_eq!(attrs.global("comment"), None);
        assert_eq!(attrs.variables["sst"]["_FillValue"], "-32768");
    }
}
