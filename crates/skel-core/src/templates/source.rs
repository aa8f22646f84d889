//! Classification of template targets into local paths and remote URLs

use std::path::PathBuf;
use url::Url;

/// Template source - either remote URL or local descriptor path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Classify a catalog target.
    ///
    /// Anything that parses as a URL with a real scheme is remote, except
    /// `file://` URLs which map back to a local path. Single-letter schemes
    /// are Windows drive prefixes (`C:\templates`), not URLs.
    pub fn parse(target: &str) -> Self {
        match Url::parse(target) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Local(path),
                Err(()) => Self::Remote(url),
            },
            Ok(url) if url.scheme().len() > 1 => Self::Remote(url),
            _ => Self::Local(PathBuf::from(target)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_is_local() {
        assert_eq!(
            TemplateSource::parse("./templates/lib/template.yaml"),
            TemplateSource::Local(PathBuf::from("./templates/lib/template.yaml"))
        );
        assert_eq!(
            TemplateSource::parse("templates/lib/template.yaml"),
            TemplateSource::Local(PathBuf::from("templates/lib/template.yaml"))
        );
    }

    #[test]
    fn test_absolute_path_is_local() {
        assert!(!TemplateSource::parse("/opt/templates/lib/template.yaml").is_remote());
    }

    #[test]
    fn test_network_schemes_are_remote() {
        assert!(TemplateSource::parse("https://example.com/templates/lib.yaml").is_remote());
        assert!(TemplateSource::parse("http://example.com/lib.yaml").is_remote());
        assert!(TemplateSource::parse("git+ssh://git@example.com/templates.git").is_remote());
    }

    #[test]
    fn test_drive_letter_is_local() {
        assert!(!TemplateSource::parse("C:\\templates\\lib\\template.yaml").is_remote());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_is_local() {
        assert_eq!(
            TemplateSource::parse("file:///opt/templates/template.yaml"),
            TemplateSource::Local(PathBuf::from("/opt/templates/template.yaml"))
        );
    }
}
