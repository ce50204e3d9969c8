//! Submission of saved point sequences to the analytics backend
//!
//! Submissions are fire-and-forget: the editor hands over a snapshot and
//! moves on. Failures are logged here and never flow back into editor state;
//! the operator retries by saving again.

use crate::core::errors::PersistenceError;
use anyhow::Context;
use bevy::log::{debug, info, warn};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Request timeout for a single submission
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend resource a point sequence is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitTarget {
    /// Region-of-interest mask polygon
    Roi,
    /// Perspective calibration quadrilateral
    Calibration,
}

impl SubmitTarget {
    pub fn path(self) -> &'static str {
        match self {
            SubmitTarget::Roi => "/roi",
            SubmitTarget::Calibration => "/calibration",
        }
    }

    /// Full endpoint URL below `base_url`
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Wire format: `{"points": [{"x": .., "y": ..}, ...]}` on the 0–100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPoints {
    pub points: Vec<Point>,
}

impl From<&[Point]> for SavedPoints {
    fn from(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }
}

/// Receives the final point sequence when the operator saves
pub trait PointSubmitter: Send + Sync {
    fn submit(&self, target: SubmitTarget, points: &[Point]);
}

/// Posts point sequences to the backend over HTTP
pub struct HttpSubmitter {
    base_url: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpSubmitter {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SUBMIT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("zona-submit")
            .enable_all()
            .build()
            .context("Failed to start submission runtime")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PointSubmitter for HttpSubmitter {
    fn submit(&self, target: SubmitTarget, points: &[Point]) {
        let url = target.url(&self.base_url);
        let body = SavedPoints::from(points);
        let client = self.client.clone();
        debug!("Submitting {} points to {}", body.points.len(), url);

        // Detached: the editor never waits for the response
        self.runtime.spawn(async move {
            let count = body.points.len();
            match post_points(&client, &url, &body).await {
                Ok(()) => info!("Saved {} points to {}", count, url),
                Err(e) => warn!("Failed to save points: {}", e),
            }
        });
    }
}

async fn post_points(client: &reqwest::Client, url: &str, body: &SavedPoints) -> Result<(), PersistenceError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|source| PersistenceError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PersistenceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Keeps submissions in memory instead of sending them
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    submissions: Mutex<Vec<(SubmitTarget, Vec<Point>)>>,
}

impl RecordingSubmitter {
    pub fn submissions(&self) -> Vec<(SubmitTarget, Vec<Point>)> {
        match self.submissions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PointSubmitter for RecordingSubmitter {
    fn submit(&self, target: SubmitTarget, points: &[Point]) {
        match self.submissions.lock() {
            Ok(mut guard) => guard.push((target, points.to_vec())),
            Err(poisoned) => poisoned.into_inner().push((target, points.to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_cleanly() {
        assert_eq!(SubmitTarget::Roi.url("http://localhost:8000"), "http://localhost:8000/roi");
        assert_eq!(
            SubmitTarget::Calibration.url("http://localhost:8000/"),
            "http://localhost:8000/calibration"
        );
    }

    #[test]
    fn payload_uses_xy_objects() {
        let points = [Point::new(10.0, 20.5), Point::new(90.0, 80.0)];
        let json = serde_json::to_string(&SavedPoints::from(&points[..])).unwrap();
        assert_eq!(json, r#"{"points":[{"x":10.0,"y":20.5},{"x":90.0,"y":80.0}]}"#);
    }

    #[test]
    fn recording_submitter_keeps_order() {
        let recorder = RecordingSubmitter::default();
        recorder.submit(SubmitTarget::Roi, &[Point::new(1.0, 2.0)]);
        recorder.submit(SubmitTarget::Calibration, &[]);
        let submissions = recorder.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].0, SubmitTarget::Roi);
        assert!(submissions[1].1.is_empty());
    }

    #[test]
    fn unreachable_backend_does_not_block_or_panic() {
        // Port 9 (discard) on localhost is normally closed
        let submitter = HttpSubmitter::new("http://127.0.0.1:9").unwrap();
        submitter.submit(SubmitTarget::Roi, &[Point::new(5.0, 5.0)]);
        assert_eq!(submitter.base_url(), "http://127.0.0.1:9");
    }
}
