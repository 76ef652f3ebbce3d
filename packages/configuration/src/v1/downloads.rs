use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Downloads {
    /// Directory where downloaded `.torrent` files are saved.
    #[serde(default = "Downloads::default_output_dir")]
    pub output_dir: Utf8PathBuf,
}

impl Default for Downloads {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
        }
    }
}

impl Downloads {
    fn default_output_dir() -> Utf8PathBuf {
        Utf8PathBuf::from("./storage/dashboard/downloads")
    }
}
