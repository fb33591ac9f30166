//! VRF (Vassago Random Forest) file format

use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::{ModelError, Result};
use crate::model::ForestModel;

/// Magic bytes opening every VRF file.
pub const VRF_MAGIC: [u8; 4] = *b"VRF\0";

/// Format version this build writes and understands.
pub const VRF_VERSION: u16 = 1;

/// Largest payload length a header may declare, 256 MiB.
pub const VRF_MAX_PAYLOAD: u64 = 256 * 1024 * 1024;

/// VRF file header.
///
/// # Binary Layout
///
/// ```text
/// Offset  Size   Field
/// ──────  ────   ─────
/// 0       4      magic ("VRF\0")
/// 4       2      version (u16)
/// 6       4      tree_count (u32)
/// 10      8      payload_len (u64)
/// ──────────────────────────────
/// Total: 18 bytes
/// ```
///
/// All fields little-endian. The payload that follows is a bincode
/// encoding of the whole [`ForestModel`]; `tree_count` duplicates the
/// payload's tree count so a reader can reject a mismatched pair without
/// trusting either side alone. A `payload_len` above [`VRF_MAX_PAYLOAD`]
/// is rejected at parse time, before any payload buffer is sized.
#[derive(Debug, Clone, PartialEq)]
pub struct VrfHeader {
    /// Magic bytes
    pub magic: [u8; 4],
    /// Format version
    pub version: u16,
    /// Number of trees in the payload
    pub tree_count: u32,
    /// Payload length in bytes
    pub payload_len: u64,
}

impl VrfHeader {
    /// Header size in bytes
    pub const SIZE: usize = 18;

    /// Create a header for a payload.
    pub fn new(tree_count: u32, payload_len: u64) -> Self {
        Self {
            magic: VRF_MAGIC,
            version: VRF_VERSION,
            tree_count,
            payload_len,
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        bytes.extend_from_slice(&self.magic);
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.tree_count.to_le_bytes());
        bytes.extend_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(ModelError::invalid("header too short"));
        }

        let magic: [u8; 4] = bytes[0..4].try_into().unwrap();
        if magic != VRF_MAGIC {
            return Err(ModelError::invalid("invalid magic bytes"));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VRF_VERSION {
            return Err(ModelError::UnsupportedVersion { found: version });
        }

        let payload_len = u64::from_le_bytes(bytes[10..18].try_into().unwrap());
        if payload_len > VRF_MAX_PAYLOAD {
            return Err(ModelError::invalid(format!(
                "declared payload of {payload_len} bytes exceeds the {VRF_MAX_PAYLOAD} byte cap"
            )));
        }

        Ok(Self {
            magic,
            version,
            tree_count: u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]),
            payload_len,
        })
    }
}

impl ForestModel {
    /// Write as VRF to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload =
            bincode::serialize(self).map_err(|e| ModelError::invalid(e.to_string()))?;
        let header = VrfHeader::new(self.tree_count() as u32, payload.len() as u64);

        writer.write_all(&header.to_bytes())?;
        writer.write_all(&payload)?;
        Ok(())
    }

    /// Read a VRF stream, validating the model before returning it.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut header_bytes = [0u8; VrfHeader::SIZE];
        reader.read_exact(&mut header_bytes)?;
        let header = VrfHeader::from_bytes(&header_bytes)?;

        let mut payload = vec![0u8; header.payload_len as usize];
        reader.read_exact(&mut payload)?;
        let model: ForestModel =
            bincode::deserialize(&payload).map_err(|e| ModelError::invalid(e.to_string()))?;

        if model.tree_count() as u32 != header.tree_count {
            return Err(ModelError::invalid(format!(
                "header declares {} trees, payload has {}",
                header.tree_count,
                model.tree_count()
            )));
        }
        model.validate()?;

        Ok(model)
    }

    /// Write to a file path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        self.write_to(&mut file)?;
        info!(path = %path.display(), trees = self.tree_count(), "saved forest model");
        Ok(())
    }

    /// Read from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let model = Self::read_from(&mut file)?;
        info!(
            path = %path.display(),
            model_id = %model.metadata().model_id,
            trees = model.tree_count(),
            "loaded forest model"
        );
        Ok(model)
    }
}
