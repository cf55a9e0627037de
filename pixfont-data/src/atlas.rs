use std::fmt::Debug;

use crate::AtlasDecodeError;

/// An uncompressed RGBA8 atlas image as stored in a `.atlas` container.
///
/// The container is a 13-byte header followed by the zlib-compressed pixels:
///
/// | Offset | Size | Content                         |
/// |--------|------|---------------------------------|
/// | 0      | 4    | magic `PXFA`                    |
/// | 4      | 1    | format version (currently 1)    |
/// | 5      | 4    | width, little-endian `u32`      |
/// | 9      | 4    | height, little-endian `u32`     |
/// | 13     | ..   | zlib stream of `width*height*4` |
#[derive(Clone, PartialEq, Eq)]
pub struct RawAtlas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 pixel data
    pub rgba: Vec<u8>,
}

impl Debug for RawAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAtlas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba_kb", &(self.rgba.len() / 1024))
            .finish()
    }
}

impl RawAtlas {
    const MAGIC: &'static [u8; 4] = b"PXFA";
    const VERSION: u8 = 1;
    const HEADER_LEN: usize = 13;

    /// Deserializes an atlas container.
    ///
    /// # Errors
    /// Returns [`AtlasDecodeError::Malformed`] for a bad header, an unsupported
    /// version, a corrupt zlib stream or a pixel count that does not match the
    /// declared dimensions.
    pub fn from_binary(serialized: &[u8]) -> Result<Self, AtlasDecodeError> {
        let malformed = |msg: String| AtlasDecodeError::Malformed(msg);

        if serialized.len() < Self::HEADER_LEN || &serialized[..4] != Self::MAGIC {
            return Err(malformed("missing PXFA header".to_string()));
        }

        let version = serialized[4];
        if version != Self::VERSION {
            return Err(malformed(format!("unsupported container version {version}")));
        }

        let read_u32 = |at: usize| {
            u32::from_le_bytes([
                serialized[at],
                serialized[at + 1],
                serialized[at + 2],
                serialized[at + 3],
            ])
        };
        let (width, height) = (read_u32(5), read_u32(9));

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| malformed(format!("{width}x{height} atlas is too large")))?;

        // the header is untrusted; never inflate past what it declares
        let rgba = miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(
            &serialized[Self::HEADER_LEN..],
            expected,
        )
        .map_err(|e| malformed(format!("failed to inflate pixel data: {e:?}")))?;

        if rgba.len() != expected {
            return Err(malformed(format!(
                "{width}x{height} atlas needs {expected} bytes, got {}",
                rgba.len()
            )));
        }

        Ok(Self { width, height, rgba })
    }

    /// Serializes the atlas into the compressed container format.
    #[must_use]
    pub fn to_binary(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_LEN + self.rgba.len() / 4);
        out.extend_from_slice(Self::MAGIC);
        out.push(Self::VERSION);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&miniz_oxide::deflate::compress_to_vec_zlib(&self.rgba, 9));
        out
    }

    /// The built-in 8x16 stock atlas: 224 cells laid out for codepage 1252.
    ///
    /// # Errors
    /// Only fails if the embedded asset is corrupt.
    pub fn stock() -> Result<Self, AtlasDecodeError> {
        Self::from_binary(include_bytes!("../atlas/stock_font.atlas"))
    }
}
