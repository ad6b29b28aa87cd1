use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a weatherbot run can hit. None of them are recoverable: the
/// binary logs the error and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing setting `{name}`.\nHint: set {env} or run `weatherbot configure`.")]
    MissingSetting { name: &'static str, env: &'static str },

    #[error("unknown city '{0}'. Known cities: {known}.", known = crate::city::City::known_names())]
    UnknownCity(String),

    #[error("failed to send {endpoint} request")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {endpoint} response at `{path}`")]
    Decode {
        endpoint: &'static str,
        /// Dotted path of the field that failed, `.` for the document itself.
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn transport(endpoint: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::Transport {
            endpoint,
            source: source.without_url(),
        }
    }
}

/// Limits an upstream body to something that fits in one diagnostic line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
