use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};
use std::{fmt, ops::Range};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("argument '{0}' not found")]
    NotFound(String),
    #[error("argument '{0}' is defined more than once in the table")]
    DuplicateName(String),
    #[error("argument '{0}' is declared by both sides of the merge")]
    Conflict(String),
    #[error("unsupported {key_space} transform '{value}'")]
    MisconfiguredTransform { key_space: String, value: String },
}

/// Error raised while reading a declaration config.
///
/// `span` is the byte range in the config source the parser blamed, if any.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub message: String,
    pub span: Option<Range<usize>>,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError {
            message: err.message().trim().to_string(),
            span: err.span(),
        }
    }
}

impl From<ArgsError> for ConfigError {
    fn from(err: ArgsError) -> Self {
        ConfigError {
            message: err.to_string(),
            span: None,
        }
    }
}

impl ConfigError {
    pub fn pretty_print(&self, source: &str, filename: &str) -> String {
        // Spans from toml are byte offsets, annotations are counted in chars
        let char_len = source.chars().count();
        let (start, end) = match &self.span {
            Some(span) => (char_offset(source, span.start), char_offset(source, span.end)),
            None => (char_len, char_len),
        };
        let end = end.min(char_len);
        let start = start.min(end);
        let (start_marker, end_marker) = match (start, end) {
            (s, e) if s < e => (s, e),
            (s, _) if s < char_len => (s, s + 1),
            // Nothing to point at, mark the tail of the file
            _ => (char_len.saturating_sub(1), char_len),
        };
        let marker = SourceAnnotation {
            label: &self.message,
            annotation_type: AnnotationType::Error,
            range: (start_marker, end_marker),
        };
        let title = Annotation {
            label: Some("Invalid declaration config"),
            id: None,
            annotation_type: AnnotationType::Error,
        };
        let snippet = Snippet {
            title: Some(title),
            footer: vec![],
            slices: vec![Slice {
                source,
                line_start: 1,
                origin: Some(filename),
                fold: true,
                annotations: vec![marker],
            }],
            opt: FormatOptions {
                color: true,
                ..Default::default()
            },
        };
        let list = DisplayList::from(snippet);
        list.to_string()
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source.char_indices().take_while(|(i, _)| *i < byte).count()
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(
                f,
                "Invalid declaration config at bytes {}..{}. Reason: {}",
                span.start, span.end, self.message
            ),
            None => write!(f, "Invalid declaration config. Reason: {}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError {
            message: "bad value".to_string(),
            span: Some(3..7),
        };
        assert_eq!(
            err.to_string(),
            "Invalid declaration config at bytes 3..7. Reason: bad value"
        );
        let err: ConfigError = ArgsError::NotFound("bindir".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid declaration config. Reason: argument 'bindir' not found"
        );
    }

    #[test]
    fn test_pretty_print_mentions_file() {
        let source = "metavar = 1\n";
        let err = ConfigError {
            message: "invalid type".to_string(),
            span: Some(10..11),
        };
        let out = err.pretty_print(source, "decls.toml");
        assert!(out.contains("decls.toml"));
        assert!(out.contains("invalid type"));
    }

    #[test]
    fn test_char_offset() {
        let source = "a = \"ü\"\nb";
        assert_eq!(char_offset(source, 0), 0);
        assert_eq!(char_offset(source, 5), 5);
        // past the two bytes of `ü`
        assert_eq!(char_offset(source, 7), 6);
        assert_eq!(char_offset(source, source.len()), source.chars().count());
        assert_eq!(char_offset(source, 100), source.chars().count());
    }

    #[test]
    fn test_pretty_print_multibyte_span_at_eof() {
        let source = "[env_key]\ntransform = \"ü\"";
        let err = ConfigError {
            message: "unsupported env_key transform 'ü'".to_string(),
            span: Some(22..26),
        };
        let out = err.pretty_print(source, "decls.toml");
        assert!(out.contains("unsupported env_key transform"));
    }

    #[test]
    fn test_pretty_print_span_past_source() {
        let err = ConfigError {
            message: "out of range".to_string(),
            span: Some(40..90),
        };
        assert!(err.pretty_print("é = 1\n", "x.toml").contains("out of range"));
    }

    #[test]
    fn test_pretty_print_without_span() {
        let err = ConfigError {
            message: "something odd".to_string(),
            span: None,
        };
        assert!(err.pretty_print("a = 1\n", "x.toml").contains("something odd"));
    }
}
