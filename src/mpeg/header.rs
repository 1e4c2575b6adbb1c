use super::constants::{BITRATES, PADDING_SIZES, SAMPLES_PER_FRAME, SAMPLE_RATES};
use crate::error::{Result, TagError};

/// Whether `first` and `second` start an MPEG frame sync
///
/// The sync is 11 set bits, so `first` must be 0xFF and `second` must have its top three bits set.
pub(crate) fn verify_frame_sync(first: u8, second: u8) -> bool {
	first == 0xFF && second & 0xE0 == 0xE0
}

#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
/// MPEG Audio version
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

impl MpegVersion {
	fn index(self) -> usize {
		match self {
			Self::V1 => 0,
			Self::V2 => 1,
			Self::V2_5 => 2,
		}
	}
}

#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
/// MPEG layer
pub enum Layer {
	Layer1,
	Layer2,
	#[default]
	Layer3,
}

impl Layer {
	fn index(self) -> usize {
		match self {
			Self::Layer1 => 0,
			Self::Layer2 => 1,
			Self::Layer3 => 2,
		}
	}
}

#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
/// Channel mode
pub enum ChannelMode {
	#[default]
	Stereo,
	JointStereo,
	/// Two independent mono channels
	DualChannel,
	SingleChannel,
}

/// A decoded MPEG audio frame header
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
pub struct MpegHeader {
	/// The MPEG version
	pub version: MpegVersion,
	/// The layer
	pub layer: Layer,
	/// Bitrate in kbps, 0 for a free format stream
	pub bitrate: u32,
	/// Sample rate in Hz
	pub sample_rate: u32,
	/// Whether the frame carries a padding slot
	pub padding: bool,
	/// Whether a CRC follows the header
	pub crc_protected: bool,
	/// The channel mode
	pub channel_mode: ChannelMode,
	/// The frame length in bytes, including the header, 0 for a free format stream
	pub len: u32,
	/// The number of samples in the frame
	pub samples: u16,
}

impl MpegHeader {
	/// Decode a big endian frame header
	///
	/// # Errors
	///
	/// [`TagError::Corrupt`] if the frame sync is missing, or any field holds a reserved value
	pub fn read(header: u32) -> Result<Self> {
		if header >> 21 != 0x7FF {
			return Err(TagError::Corrupt("Frame header is missing the frame sync"));
		}

		let version = match (header >> 19) & 0b11 {
			0 => MpegVersion::V2_5,
			2 => MpegVersion::V2,
			3 => MpegVersion::V1,
			_ => return Err(TagError::Corrupt("Frame header has an invalid version")),
		};

		let layer = match (header >> 17) & 0b11 {
			1 => Layer::Layer3,
			2 => Layer::Layer2,
			3 => Layer::Layer1,
			_ => return Err(TagError::Corrupt("Frame header uses a reserved layer")),
		};

		let crc_protected = (header >> 16) & 1 == 0;

		let version_index = if version == MpegVersion::V1 { 0 } else { 1 };
		let layer_index = layer.index();

		let bitrate_index = ((header >> 12) & 0xF) as usize;
		if bitrate_index == 0xF {
			return Err(TagError::Corrupt("Frame header has an invalid bitrate"));
		}

		let bitrate = BITRATES[version_index][layer_index][bitrate_index];

		let sample_rate = match (header >> 10) & 0b11 {
			0b11 => return Err(TagError::Corrupt("Frame header uses a reserved sample rate")),
			idx => SAMPLE_RATES[version.index()][idx as usize],
		};

		let padding = (header >> 9) & 1 == 1;

		let channel_mode = match (header >> 6) & 0b11 {
			0 => ChannelMode::Stereo,
			1 => ChannelMode::JointStereo,
			2 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let samples = SAMPLES_PER_FRAME[layer_index][version_index];

		let len = if bitrate == 0 {
			0
		} else {
			// Bitrate is in kbps, samples / 8 bits per byte
			let mut len = u32::from(samples) * bitrate * 125 / sample_rate;

			if layer == Layer::Layer1 {
				// Layer I lengths are a multiple of 4 byte slots
				len -= len % 4;
			}

			if padding {
				len += u32::from(PADDING_SIZES[layer_index]);
			}

			len
		};

		Ok(Self {
			version,
			layer,
			bitrate,
			sample_rate,
			padding,
			crc_protected,
			channel_mode,
			len,
			samples,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{verify_frame_sync, ChannelMode, Layer, MpegHeader, MpegVersion};
	use crate::error::TagError;

	use pretty_assertions::assert_eq;

	#[test]
	fn frame_sync() {
		assert!(verify_frame_sync(0xFF, 0xFB));
		assert!(verify_frame_sync(0xFF, 0xE0));
		assert!(!verify_frame_sync(0xFF, 0xD0));
		assert!(!verify_frame_sync(0xFE, 0xFB));
	}

	#[test]
	fn mpeg1_layer3() {
		// 128 kbps, 44.1 kHz, no padding, joint stereo
		let header = MpegHeader::read(0xFFFB_9064).unwrap();

		assert_eq!(
			header,
			MpegHeader {
				version: MpegVersion::V1,
				layer: Layer::Layer3,
				bitrate: 128,
				sample_rate: 44100,
				padding: false,
				crc_protected: false,
				channel_mode: ChannelMode::JointStereo,
				len: 417,
				samples: 1152,
			}
		);
	}

	#[test]
	fn padded_frame() {
		let header = MpegHeader::read(0xFFFB_9264).unwrap();

		assert!(header.padding);
		assert_eq!(header.len, 418);
	}

	#[test]
	fn mpeg2_layer3() {
		// MPEG-2, Layer III, 64 kbps, 22.05 kHz, mono
		let header = MpegHeader::read(0xFFF3_80C0).unwrap();

		assert_eq!(header.version, MpegVersion::V2);
		assert_eq!(header.layer, Layer::Layer3);
		assert_eq!(header.bitrate, 64);
		assert_eq!(header.sample_rate, 22050);
		assert_eq!(header.channel_mode, ChannelMode::SingleChannel);
		assert_eq!(header.samples, 576);
		assert_eq!(header.len, 208);
	}

	#[test]
	fn mpeg25_layer1() {
		// MPEG-2.5, Layer I, CRC protected, 32 kbps, 8 kHz
		let header = MpegHeader::read(0xFFE6_1800).unwrap();

		assert_eq!(header.version, MpegVersion::V2_5);
		assert_eq!(header.layer, Layer::Layer1);
		assert!(header.crc_protected);
		assert_eq!(header.bitrate, 32);
		assert_eq!(header.sample_rate, 8000);
		assert_eq!(header.len, 192);
	}

	#[test]
	fn free_format() {
		let header = MpegHeader::read(0xFFFB_0064).unwrap();

		assert_eq!(header.bitrate, 0);
		assert_eq!(header.len, 0);
	}

	#[test]
	fn reserved_values() {
		for header in [
			0x7FFB_9064, // no sync
			0xFFEB_9064, // reserved version
			0xFFF9_9064, // reserved layer
			0xFFFB_F064, // bad bitrate
			0xFFFB_9C64, // reserved sample rate
		] {
			assert!(
				matches!(MpegHeader::read(header), Err(TagError::Corrupt(_))),
				"{header:#010X}"
			);
		}
	}
}
