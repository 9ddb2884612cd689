//! Time source pinned to the Sao Paulo time zone.

use chrono::{DateTime, Utc};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;

pub trait Clock: Send + Sync {
    /// Current instant expressed in America/Sao_Paulo.
    fn now_brt(&self) -> DateTime<Tz>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_brt(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&Sao_Paulo)
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_brt(&self) -> DateTime<Tz> {
        self.0.with_timezone(&Sao_Paulo)
    }
}
