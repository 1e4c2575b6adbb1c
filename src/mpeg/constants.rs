// [version_index][layer_index][bitrate_index], in kbps
//
// version_index: 0 = MPEG-1, 1 = MPEG-2 and MPEG-2.5
// layer_index: 0 = Layer I, 1 = Layer II, 2 = Layer III
// Index 0 is a free format stream, 15 is invalid
pub(crate) const BITRATES: [[[u32; 16]; 3]; 2] = [
	[
		[0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
		[0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
	],
	[
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
	],
];

// [version][sample_rate_index], in Hz
pub(crate) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

// [layer_index][version_index]
pub(crate) const SAMPLES_PER_FRAME: [[u16; 2]; 3] = [[384, 384], [1152, 1152], [1152, 576]];

// [layer_index]
pub(crate) const PADDING_SIZES: [u8; 3] = [4, 1, 1];
