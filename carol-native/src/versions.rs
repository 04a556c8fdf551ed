//! OpenGL version reporting

use glow::{Context, HasContext};

/// OpenGL version of the loaded context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_es: bool,
}

impl GlVersion {
    /// Version the window opener requests
    pub const REQUESTED: GlVersion = GlVersion {
        major: 4,
        minor: 5,
        is_es: false,
    };

    /// Read the version from the current context
    pub fn read(gl: &Context) -> Self {
        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        Self::parse(&version_string)
    }

    /// Parse a `GL_VERSION` string
    ///
    /// Examples: `"4.6.0 NVIDIA 460.89"`, `"4.5 (Core Profile) Mesa 23.1.2"`,
    /// `"OpenGL ES 3.2 Mesa 23.1.2"`. Unparseable strings yield `0.0`.
    pub fn parse(version_string: &str) -> Self {
        let is_es = version_string.contains("OpenGL ES");
        let (major, minor) = version_string
            .split_whitespace()
            .find_map(parse_major_minor)
            .unwrap_or((0, 0));
        Self {
            major,
            minor,
            is_es,
        }
    }

    /// Whether this context offers everything the builders use
    /// (immutable buffer storage, vertex attribute bindings, debug output)
    pub fn supports_core_45(self) -> bool {
        !self.is_es && (self.major, self.minor) >= (4, 5)
    }
}

impl std::fmt::Display for GlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_es {
            write!(f, "OpenGL ES {}.{}", self.major, self.minor)
        } else {
            write!(f, "OpenGL {}.{}", self.major, self.minor)
        }
    }
}

fn parse_major_minor(word: &str) -> Option<(u32, u32)> {
    let (major, rest) = word.split_once('.')?;
    let minor = rest.split('.').next()?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_vendor_strings() {
        assert_eq!(
            GlVersion::parse("4.6.0 NVIDIA 460.89"),
            GlVersion {
                major: 4,
                minor: 6,
                is_es: false
            }
        );
        assert_eq!(
            GlVersion::parse("4.5 (Core Profile) Mesa 23.1.2"),
            GlVersion::REQUESTED
        );
        let es = GlVersion::parse("OpenGL ES 3.2 Mesa 23.1.2");
        assert!(es.is_es);
        assert_eq!((es.major, es.minor), (3, 2));
    }

    #[test]
    fn core_45_gate() {
        assert!(GlVersion::parse("4.6.0 NVIDIA").supports_core_45());
        assert!(!GlVersion::parse("3.3.0 Mesa").supports_core_45());
        assert!(!GlVersion::parse("OpenGL ES 3.2").supports_core_45());
        assert!(!GlVersion::parse("garbage").supports_core_45());
    }
}
