use std::fmt;

/// Which sections a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Current,
    Forecast,
    Both,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Current => "W",
            Mode::Forecast => "F",
            Mode::Both => "WF",
        }
    }

    /// Parses the `request` option. Unrecognized values give `None`, which the
    /// caller treats as "nothing to report" rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "w" | "current" => Some(Mode::Current),
            "f" | "forecast" => Some(Mode::Forecast),
            "wf" | "both" => Some(Mode::Both),
            _ => None,
        }
    }

    pub fn wants_current(&self) -> bool {
        matches!(self, Mode::Current | Mode::Both)
    }

    pub fn wants_forecast(&self) -> bool {
        matches!(self, Mode::Forecast | Mode::Both)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
