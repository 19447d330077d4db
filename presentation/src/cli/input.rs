//! Turning CLI input flags into an [`ArticleInput`].

use super::commands::InputArgs;
use sage_domain::ArticleInput;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read standard input: {0}")]
    Stdin(#[source] io::Error),
}

fn read_file<T>(path: &Path, read: impl FnOnce(&Path) -> io::Result<T>) -> Result<T, InputError> {
    read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify a bare argument: links start with `http`, anything else is text.
fn classify(raw: String) -> ArticleInput {
    if raw.trim_start().starts_with("http") {
        ArticleInput::Url(raw)
    } else {
        ArticleInput::Text(raw)
    }
}

/// Resolve the input flags. `stdin` is only called when the text has to
/// come from standard input.
pub fn resolve_input(
    args: &InputArgs,
    stdin: impl FnOnce() -> io::Result<String>,
) -> Result<ArticleInput, InputError> {
    if let Some(url) = &args.url {
        return Ok(ArticleInput::Url(url.clone()));
    }
    if let Some(text) = &args.text {
        return Ok(ArticleInput::Text(text.clone()));
    }
    if let Some(path) = &args.text_file {
        return Ok(ArticleInput::Text(read_file(path, |p| std::fs::read_to_string(p))?));
    }
    if let Some(path) = &args.pdf {
        let bytes = read_file(path, |p| std::fs::read(p))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok(ArticleInput::Pdf { file_name, bytes });
    }

    match &args.input {
        Some(raw) if raw != "-" => Ok(classify(raw.clone())),
        _ => stdin().map(ArticleInput::Text).map_err(InputError::Stdin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_stdin() -> io::Result<String> {
        panic!("stdin should not be read")
    }

    #[test]
    fn test_positional_url_and_text() {
        let args = InputArgs {
            input: Some("https://news.example/a".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, no_stdin).unwrap(),
            ArticleInput::Url("https://news.example/a".into())
        );

        let args = InputArgs {
            input: Some("The council met on Tuesday.".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, no_stdin).unwrap(),
            ArticleInput::Text("The council met on Tuesday.".into())
        );
    }

    #[test]
    fn test_url_flag_is_not_validated_here() {
        let args = InputArgs {
            url: Some("news.example".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, no_stdin).unwrap(),
            ArticleInput::Url("news.example".into())
        );
    }

    #[test]
    fn test_stdin_when_no_input_or_dash() {
        let from_stdin = || Ok("piped article".to_string());
        assert_eq!(
            resolve_input(&InputArgs::default(), from_stdin).unwrap(),
            ArticleInput::Text("piped article".into())
        );

        let args = InputArgs {
            input: Some("-".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, || Ok("dash".to_string())).unwrap(),
            ArticleInput::Text("dash".into())
        );
    }

    #[test]
    fn test_stdin_error() {
        let err = resolve_input(&InputArgs::default(), || {
            Err(io::Error::new(io::ErrorKind::Other, "closed"))
        })
        .unwrap_err();
        assert!(matches!(err, InputError::Stdin(_)));
    }

    #[test]
    fn test_text_file_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("article.txt");
        std::fs::File::create(&text_path)
            .unwrap()
            .write_all(b"Article body")
            .unwrap();
        let pdf_path = dir.path().join("story.pdf");
        std::fs::write(&pdf_path, b"%PDF-1.4").unwrap();

        let args = InputArgs {
            text_file: Some(text_path),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, no_stdin).unwrap(),
            ArticleInput::Text("Article body".into())
        );

        let args = InputArgs {
            pdf: Some(pdf_path),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, no_stdin).unwrap(),
            ArticleInput::Pdf {
                file_name: "story.pdf".into(),
                bytes: b"%PDF-1.4".to_vec()
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let args = InputArgs {
            pdf: Some(PathBuf::from("/nonexistent/story.pdf")),
            ..Default::default()
        };
        let err = resolve_input(&args, no_stdin).unwrap_err();
        assert!(err.to_string().starts_with("Could not read /nonexistent/story.pdf"));
    }
}
