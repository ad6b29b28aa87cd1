//! One run: fetch, format, notify.

use chrono::{DateTime, TimeZone};
use std::num::NonZeroUsize;
use tracing::{info, warn};

use crate::{
    city::CityId,
    error::Result,
    format,
    mode::Mode,
    notifier::Notifier,
    provider::WeatherSource,
};

/// How many forecast slots a message carries unless told otherwise.
pub const DEFAULT_FORECAST_ENTRIES: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct Request {
    pub city: CityId,
    /// `None` when the mode option was not recognized.
    pub mode: Option<Mode>,
    pub forecast_entries: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was handed to the notifier.
    Sent(String),
    /// Unrecognized mode; nothing fetched, nothing sent.
    Skipped,
}

/// Fetches what `mode` asks for and renders the message.
pub async fn compose<S, Tz>(
    source: &S,
    city: &CityId,
    mode: Mode,
    forecast_entries: NonZeroUsize,
    now: &DateTime<Tz>,
) -> Result<String>
where
    S: WeatherSource + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let fetch_current = async {
        if mode.wants_current() {
            source.current(city).await.map(Some)
        } else {
            Ok(None)
        }
    };
    let fetch_forecast = async {
        if mode.wants_forecast() {
            source.forecast(city).await.map(Some)
        } else {
            Ok(None)
        }
    };
    let (current, mut forecast) = tokio::try_join!(fetch_current, fetch_forecast)?;

    if let Some(f) = forecast.as_mut() {
        f.truncate(forecast_entries.get());
    }

    Ok(format::message(now, current.as_ref(), forecast.as_ref()))
}

/// Runs the whole pipeline. Any failure stops it before the notifier is called.
pub async fn run<S, N, Tz>(
    source: &S,
    notifier: &N,
    request: &Request,
    now: &DateTime<Tz>,
) -> Result<Outcome>
where
    S: WeatherSource + ?Sized,
    N: Notifier + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(mode) = request.mode else {
        warn!("unrecognized request mode, nothing to send");
        return Ok(Outcome::Skipped);
    };

    info!(city = %request.city, %mode, "building weather report");
    let text = compose(source, &request.city, mode, request.forecast_entries, now).await?;

    notifier.send(&text).await?;
    info!("report delivered");

    Ok(Outcome::Sent(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        model::{Condition, CurrentWeather, Forecast, ForecastEntry, Readings, Sys},
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeSource {
        fail_forecast: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn current(&self, _city: &CityId) -> Result<CurrentWeather> {
            self.calls.lock().unwrap().push("weather");
            Ok(CurrentWeather {
                name: "Madrid".into(),
                sys: Sys { country: "ES".into() },
                weather: vec![Condition { description: "few clouds".into() }],
                main: Readings {
                    temp: 293.15,
                    ..Default::default()
                },
            })
        }

        async fn forecast(&self, _city: &CityId) -> Result<Forecast> {
            self.calls.lock().unwrap().push("forecast");
            if self.fail_forecast {
                let source = serde_json::from_str::<Forecast>("").unwrap_err();
                return Err(Error::Decode {
                    endpoint: "forecast",
                    path: ".".into(),
                    source,
                });
            }
            Ok(Forecast {
                list: (0..8)
                    .map(|i| ForecastEntry {
                        dt: i,
                        dt_txt: format!("slot-{i}"),
                        ..Default::default()
                    })
                    .collect(),
            })
        }
    }

    #[derive(Debug, Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn request(mode: Option<Mode>) -> Request {
        Request {
            city: CityId::resolve("Madrid").unwrap(),
            mode,
            forecast_entries: DEFAULT_FORECAST_ENTRIES,
        }
    }

    #[tokio::test]
    async fn forecast_is_truncated_in_order() {
        let source = FakeSource::default();
        let notifier = RecordingNotifier::default();

        let outcome = run(&source, &notifier, &request(Some(Mode::Forecast)), &Utc::now())
            .await
            .unwrap();

        let Outcome::Sent(text) = outcome else {
            panic!("expected a sent report");
        };
        assert_eq!(text.matches('⌚').count(), 3);
        let a = text.find("slot-0").unwrap();
        let b = text.find("slot-1").unwrap();
        let c = text.find("slot-2").unwrap();
        assert!(a < b && b < c);
        assert!(!text.contains("slot-3"));
        assert_eq!(*source.calls.lock().unwrap(), vec!["forecast"]);
    }

    #[tokio::test]
    async fn current_only_skips_forecast_call() {
        let source = FakeSource::default();
        let notifier = RecordingNotifier::default();

        run(&source, &notifier, &request(Some(Mode::Current)), &Utc::now())
            .await
            .unwrap();

        assert_eq!(*source.calls.lock().unwrap(), vec!["weather"]);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Madrid (ES) few clouds"));
        assert!(!sent[0].contains('⌚'));
    }

    #[tokio::test]
    async fn unrecognized_mode_is_a_silent_no_op() {
        let source = FakeSource::default();
        let notifier = RecordingNotifier::default();

        let outcome = run(&source, &notifier, &request(None), &Utc::now())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(source.calls.lock().unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_stops_before_notify() {
        let source = FakeSource {
            fail_forecast: true,
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let err = run(&source, &notifier, &request(Some(Mode::Both)), &Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { endpoint: "forecast", .. }));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn custom_entry_count_is_honoured() {
        let source = FakeSource::default();
        let mut req = request(Some(Mode::Forecast));
        req.forecast_entries = NonZeroUsize::new(5).unwrap();

        let text = compose(&source, &req.city, Mode::Forecast, req.forecast_entries, &Utc::now())
            .await
            .unwrap();
        assert_eq!(text.matches('⌚').count(), 5);
    }
}
