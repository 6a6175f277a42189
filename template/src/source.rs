use std::{fmt, fs, path::PathBuf};

use log::{debug, trace};

use crate::TemplateError;

/// Where a manifest template is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Fetched with an HTTP GET.
    Url(String),

    /// Read from the local filesystem.
    Path(PathBuf),
}

impl TemplateSource {
    /// Loads the raw template contents.
    ///
    /// # Errors
    /// Errors if the request fails, the server doesn't answer
    /// with a success status, or the file can't be read.
    pub fn fetch(&self) -> Result<String, TemplateError> {
        trace!("TemplateSource::fetch({self})");

        match self {
            Self::Url(url) => {
                debug!("Fetching template from {url}");
                let response =
                    reqwest::blocking::get(url).map_err(|source| TemplateError::Fetch {
                        url: url.clone(),
                        source,
                    })?;
                check_status(url, response.status())?;

                response.text().map_err(|source| TemplateError::Fetch {
                    url: url.clone(),
                    source,
                })
            }
            Self::Path(path) => {
                debug!("Reading template from {}", path.display());
                fs::read_to_string(path).map_err(|source| TemplateError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

fn is_http_url(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), TemplateError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(TemplateError::Status {
            url: url.to_string(),
            status,
        })
    }
}

impl From<&str> for TemplateSource {
    fn from(uri: &str) -> Self {
        if is_http_url(uri) {
            Self::Url(uri.to_string())
        } else {
            Self::Path(PathBuf::from(uri))
        }
    }
}

impl From<String> for TemplateSource {
    fn from(uri: String) -> Self {
        Self::from(uri.as_str())
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        path::PathBuf,
        thread,
    };

    use reqwest::StatusCode;
    use rstest::rstest;

    use crate::TemplateError;

    use super::{check_status, TemplateSource};

    #[rstest]
    #[case::https("https://example.com/okteto.yml", TemplateSource::Url("https://example.com/okteto.yml".into()))]
    #[case::http("http://example.com/okteto.yml", TemplateSource::Url("http://example.com/okteto.yml".into()))]
    #[case::relative("templates/okteto.yml", TemplateSource::Path(PathBuf::from("templates/okteto.yml")))]
    #[case::absolute("/tmp/okteto.yml", TemplateSource::Path(PathBuf::from("/tmp/okteto.yml")))]
    #[case::other_scheme("ftp://example.com/okteto.yml", TemplateSource::Path(PathBuf::from("ftp://example.com/okteto.yml")))]
    fn from_uri(#[case] uri: &str, #[case] expected: TemplateSource) {
        assert_eq!(TemplateSource::from(uri), expected);
        assert_eq!(TemplateSource::from(uri).to_string(), uri);
    }

    #[rstest]
    #[case::ok(StatusCode::OK, true)]
    #[case::no_content(StatusCode::NO_CONTENT, true)]
    #[case::not_found(StatusCode::NOT_FOUND, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn check_status_code(#[case] status: StatusCode, #[case] ok: bool) {
        let result = check_status("https://example.com/okteto.yml", status);

        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert!(matches!(err, TemplateError::Status { .. }));
            assert!(err.to_string().contains(&status.as_u16().to_string()));
        }
    }

    #[test]
    fn fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name: {{{{ name }}}}").unwrap();

        let contents = TemplateSource::Path(file.path().to_path_buf())
            .fetch()
            .unwrap();

        assert_eq!(contents, "name: {{ name }}");
    }

    #[test]
    fn fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yml");

        let err = TemplateSource::Path(path.clone()).fetch().unwrap_err();

        assert!(matches!(err, TemplateError::Read { path: p, .. } if p == path));
    }

    /// Serves a single HTTP response on a local port and
    /// returns the URL to request it from.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/okteto.yml", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0; 1024];
            let _ = stream.read(&mut buf).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        });

        (url, handle)
    }

    #[test]
    fn fetch_url() {
        let (url, handle) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 16\r\nConnection: close\r\n\r\nname: {{ name }}",
        );

        let contents = TemplateSource::from(url).fetch().unwrap();
        handle.join().unwrap();

        assert_eq!(contents, "name: {{ name }}");
    }

    #[test]
    fn fetch_url_not_found() {
        let (url, handle) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        );

        let err = TemplateSource::from(url.as_str()).fetch().unwrap_err();
        handle.join().unwrap();

        assert!(matches!(
            err,
            TemplateError::Status { url: u, status } if u == url && status == StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn fetch_url_unreachable() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/okteto.yml");

        let err = TemplateSource::from(url.as_str()).fetch().unwrap_err();

        assert!(matches!(err, TemplateError::Fetch { url: u, .. } if u == url));
    }
}
