//! Artifact naming and URL derivation.
//!
//! Pure functions of a [`VersionTriple`] and a [`Platform`]; nothing here
//! touches the network or the filesystem.

use bvm_schema::{PRODUCT, Platform, VersionTriple};

/// Everything needed to fetch and verify one release archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// `blender-{version}-{platform}-{suffix}`
    pub filename: String,
    /// `{release line url}/{filename}`
    pub download_url: String,
    /// `{release line url}/blender-{version}.md5`
    pub checksum_url: String,
}

impl ArtifactDescriptor {
    /// Derive the archive name and URLs for `version` on `platform`.
    ///
    /// ```
    /// use bvm_core::artifact::ArtifactDescriptor;
    /// use bvm_schema::{Platform, VersionTriple};
    ///
    /// let a = ArtifactDescriptor::locate(
    ///     "https://download.blender.org/release",
    ///     VersionTriple::new(4, 2, 2),
    ///     Platform::Linux,
    /// );
    /// assert_eq!(a.filename, "blender-4.2.2-linux-x64.tar.xz");
    /// assert_eq!(
    ///     a.checksum_url,
    ///     "https://download.blender.org/release/Blender4.2/blender-4.2.2.md5"
    /// );
    /// ```
    pub fn locate(release_url: &str, version: VersionTriple, platform: Platform) -> Self {
        let base = release_line_url(release_url, version.major, version.minor);
        let filename = format!(
            "{PRODUCT}-{version}-{platform}-{}",
            platform.archive_suffix()
        );

        Self {
            download_url: format!("{base}/{filename}"),
            checksum_url: format!("{base}/{PRODUCT}-{version}.md5"),
            filename,
        }
    }
}

/// `{release_url}/Blender{major}.{minor}`
pub fn release_line_url(release_url: &str, major: u32, minor: u32) -> String {
    format!("{}/Blender{major}.{minor}", release_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://download.blender.org/release";

    #[test]
    fn names_follow_platform_convention() {
        let v = VersionTriple::new(4, 1, 3);
        let cases = [
            (Platform::Linux, "blender-4.1.3-linux-x64.tar.xz"),
            (Platform::Macos, "blender-4.1.3-macos-arm64.dmg"),
            (Platform::Windows, "blender-4.1.3-windows-x64.zip"),
        ];

        for (platform, expected) in cases {
            let a = ArtifactDescriptor::locate(ROOT, v, platform);
            assert_eq!(a.filename, expected);
            assert_eq!(a.download_url, format!("{ROOT}/Blender4.1/{expected}"));
            assert_eq!(a.checksum_url, format!("{ROOT}/Blender4.1/blender-4.1.3.md5"));
        }
    }

    #[test]
    fn locate_is_deterministic() {
        let v = VersionTriple::new(3, 6, 12);
        assert_eq!(
            ArtifactDescriptor::locate(ROOT, v, Platform::Windows),
            ArtifactDescriptor::locate(ROOT, v, Platform::Windows)
        );
    }

    #[test]
    fn trailing_slash_on_root_is_ignored() {
        assert_eq!(
            release_line_url("https://mirror.example.com/release/", 2, 93),
            "https://mirror.example.com/release/Blender2.93"
        );
    }
}
