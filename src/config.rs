//! Options used when writing tags
//!
//! [`WriteOptions`] can be stored as a toml file:
//!
//! ```toml
//! version = 3
//! unsynchronisation = false
//! padding = 2048
//! default_language = "eng"
//! encoding = "UTF16"
//! ```
//!
//! Missing fields are filled with their defaults.

use crate::id3::v2::{Id3v2Version, TextEncoding};

use std::path::Path;

use anyhow::Result;
use figment::{
	providers::{Format, Toml},
	Figment,
};
use serde::{Deserialize, Serialize};

/// The default number of padding bytes after a newly written `ID3v2` tag
pub const DEFAULT_PADDING: u32 = 1024;

/// Options used when writing tags
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct WriteOptions {
	/// The `ID3v2` major version used for newly created tags (2, 3 or 4)
	///
	/// Existing tags keep the version they were read with.
	pub version: u8,
	/// Whether newly created `ID3v2` tags are unsynchronised
	pub unsynchronisation: bool,
	/// Padding added after an `ID3v2` tag whenever the audio data has to be moved anyway
	pub padding: u32,
	/// The language used for comments, when none is given
	pub default_language: String,
	/// The encoding used for text, when none is given
	pub encoding: TextEncoding,
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self {
			version: 4,
			unsynchronisation: false,
			padding: DEFAULT_PADDING,
			default_language: String::from("eng"),
			encoding: TextEncoding::Latin1,
		}
	}
}

impl WriteOptions {
	/// Read the options from a file, needs to be toml formatted
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let data: Self = Figment::new().merge(Toml::file(path)).extract()?;

		Ok(data)
	}

	/// Save the options as a toml file
	pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		std::fs::write(path, toml::to_string(self)?)?;

		Ok(())
	}

	/// The [`Id3v2Version`] from [`WriteOptions::version`]
	///
	/// An unknown version falls back to [`Id3v2Version::V4`].
	pub fn id3v2_version(&self) -> Id3v2Version {
		Id3v2Version::from_major(self.version).unwrap_or_else(|| {
			log::warn!(
				"Unknown ID3v2 version {}, using ID3v2.4 instead",
				self.version
			);
			Id3v2Version::V4
		})
	}
}

#[cfg(test)]
mod tests {
	use super::WriteOptions;
	use crate::id3::v2::{Id3v2Version, TextEncoding};

	use figment::{
		providers::{Format, Toml},
		Figment,
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn should_parse_default_options() {
		let serialized = toml::to_string(&WriteOptions::default()).unwrap();

		let parsed: WriteOptions = Figment::new()
			.merge(Toml::string(&serialized))
			.extract()
			.unwrap();

		assert_eq!(WriteOptions::default(), parsed);
	}

	#[test]
	fn missing_fields_use_defaults() {
		let parsed: WriteOptions = Figment::new()
			.merge(Toml::string("version = 3\nencoding = \"UTF16\""))
			.extract()
			.unwrap();

		assert_eq!(
			parsed,
			WriteOptions {
				version: 3,
				encoding: TextEncoding::UTF16,
				..WriteOptions::default()
			}
		);
		assert_eq!(parsed.id3v2_version(), Id3v2Version::V3);
	}

	#[test]
	fn unknown_version() {
		let options = WriteOptions {
			version: 9,
			..WriteOptions::default()
		};

		assert_eq!(options.id3v2_version(), Id3v2Version::V4);
	}
}
