use serde::{Deserialize, Serialize};

use crate::info_hash::InfoHash;
use crate::NumberOfBytes;

/// Metadata the tracker returns after creating a torrent from an uploaded file.
///
/// The dashboard treats it as opaque: hashing and piece splitting happen on
/// the tracker.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadedTorrent {
    pub name: String,
    pub info_hash: InfoHash,
    pub file_size: NumberOfBytes,
    pub num_pieces: u64,
}

#[cfg(test)]
mod tests {
    use super::UploadedTorrent;

    #[test]
    fn it_should_ignore_extra_fields_in_the_upload_response() {
        let json = r#"{
            "name": "file.bin",
            "info_hash": "abc",
            "file_size": 1048576,
            "num_pieces": 4,
            "piece_length": 262144,
            "message": "created"
        }"#;

        let uploaded: UploadedTorrent = serde_json::from_str(json).unwrap();

        assert_eq!(uploaded.file_size, 1_048_576);
        assert_eq!(uploaded.num_pieces, 4);
    }
}
