use serde::{Deserialize, Serialize};

/// Archive formats the analysis server is able to unpack.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    Tar,
    GzTar,
    BzTar,
    XzTar,
    Gz,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 6] = [
        ArchiveFormat::Zip,
        ArchiveFormat::Tar,
        ArchiveFormat::GzTar,
        ArchiveFormat::BzTar,
        ArchiveFormat::XzTar,
        ArchiveFormat::Gz,
    ];

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ArchiveFormat::Zip => &[".zip"],
            ArchiveFormat::Tar => &[".tar"],
            ArchiveFormat::GzTar => &[".tar.gz", ".tgz"],
            ArchiveFormat::BzTar => &[".tar.bz2", ".tbz2"],
            ArchiveFormat::XzTar => &[".tar.xz", ".txz"],
            ArchiveFormat::Gz => &[".gz"],
        }
    }

    /// Matches the longest extension first, so `fw.tar.gz` is a gztar and not a plain gz.
    pub fn from_file_name(file_name: impl AsRef<str>) -> Option<Self> {
        let name = file_name.as_ref().to_ascii_lowercase();
        Self::ALL
            .iter()
            .flat_map(|format| format.extensions().iter().map(move |ext| (*format, *ext)))
            .filter(|(_, ext)| name.ends_with(ext))
            .max_by_key(|(_, ext)| ext.len())
            .map(|(format, _)| format)
    }

    pub fn supported_extensions() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .flat_map(|format| format.extensions().iter().copied())
            .collect()
    }
}
