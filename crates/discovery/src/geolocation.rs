//! Single-shot "where am I" lookups.
//!
//! [`GeolocationService`] wraps a provider call with logging; it is re-entrant
//! and never retries. Preventing overlapping requests is the caller's job,
//! done with the [`LocateControl`] loading flag.

use std::future::Future;

use foundation::LatLng;
use tracing::{debug, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    Unsupported,
    Unavailable,
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "location permission denied"),
            GeolocationError::Unsupported => write!(f, "geolocation not supported"),
            GeolocationError::Unavailable => write!(f, "position unavailable"),
        }
    }
}

impl std::error::Error for GeolocationError {}

pub trait GeolocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send;
}

#[derive(Debug, Clone)]
pub struct GeolocationService<P> {
    provider: P,
}

impl<P: GeolocationProvider> GeolocationService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn request_current_position(&self) -> Result<LatLng, GeolocationError> {
        debug!("requesting current position");
        let result = self.provider.current_position().await;
        match &result {
            Ok(position) if !position.is_valid() => {
                warn!(%position, "provider returned an invalid position");
                return Err(GeolocationError::Unavailable);
            }
            Ok(position) => debug!(%position, "current position resolved"),
            Err(err) => warn!("geolocation failed: {err}"),
        }
        result
    }
}

/// Provider that always answers with the same outcome.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedGeolocation {
    outcome: Result<LatLng, GeolocationError>,
}

impl FixedGeolocation {
    pub fn at(position: LatLng) -> Self {
        Self {
            outcome: Ok(position),
        }
    }

    pub fn failing(err: GeolocationError) -> Self {
        Self { outcome: Err(err) }
    }
}

impl GeolocationProvider for FixedGeolocation {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send {
        let outcome = self.outcome;
        async move { outcome }
    }
}

/// Identifies one request issued through a [`LocateControl`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LocateTicket(u64);

/// Caller-owned loading flag for the "locate me" control.
#[derive(Debug, Default)]
pub struct LocateControl {
    next: u64,
    pending: Option<LocateTicket>,
}

impl LocateControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a request, or returns `None` while one is still pending.
    pub fn begin(&mut self) -> Option<LocateTicket> {
        if self.pending.is_some() {
            return None;
        }
        let ticket = LocateTicket(self.next);
        self.next += 1;
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Clears the loading flag if `ticket` is the pending request.
    ///
    /// Returns `false` for tickets that are not (or no longer) pending.
    pub fn finish(&mut self, ticket: LocateTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedGeolocation, GeolocationError, GeolocationService, LocateControl};
    use foundation::LatLng;

    #[tokio::test]
    async fn service_passes_through_success() {
        let svc = GeolocationService::new(FixedGeolocation::at(LatLng::new(23.3, 85.3)));
        assert_eq!(svc.request_current_position().await, Ok(LatLng::new(23.3, 85.3)));
    }

    #[tokio::test]
    async fn service_reports_denial_without_retry() {
        let svc = GeolocationService::new(FixedGeolocation::failing(
            GeolocationError::PermissionDenied,
        ));
        assert_eq!(
            svc.request_current_position().await,
            Err(GeolocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn invalid_positions_are_unavailable() {
        let svc = GeolocationService::new(FixedGeolocation::at(LatLng::new(f64::NAN, 0.0)));
        assert_eq!(
            svc.request_current_position().await,
            Err(GeolocationError::Unavailable)
        );
    }

    #[tokio::test]
    async fn service_is_reentrant() {
        let svc = GeolocationService::new(FixedGeolocation::at(LatLng::new(1.0, 2.0)));
        let (a, b) = tokio::join!(svc.request_current_position(), svc.request_current_position());
        assert_eq!(a, b);
    }

    #[test]
    fn control_blocks_reentry_until_finished() {
        let mut c = LocateControl::new();
        let t = c.begin().expect("first");
        assert!(c.is_loading());
        assert_eq!(c.begin(), None);
        assert!(c.finish(t));
        assert!(!c.finish(t));
        assert!(!c.is_loading());
        let t2 = c.begin().expect("second");
        assert_ne!(t, t2);
    }
}
