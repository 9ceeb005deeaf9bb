//! Positional cross-link between the roster's quota row and the session list.
//!
//! Entry `i` of the quota vector is taken to be the quota of the `i`-th session
//! in (date, slot) order. Nothing checks that both workbooks actually describe
//! the same sequence.

use crate::session::Session;
use tracing::{debug, warn};

/// What an alignment pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Applied { sessions: usize },
    Skipped { sessions: usize, quotas: usize },
}

/// Overwrites every session quota with the entry at the same position, or
/// touches nothing when the vector is shorter than the session list.
pub fn align_quotas(sessions: &mut [Session], quotas: &[u32]) -> Alignment {
    if quotas.len() < sessions.len() {
        warn!(
            sessions = sessions.len(),
            quotas = quotas.len(),
            "quota vector shorter than session list, keeping default quotas"
        );
        return Alignment::Skipped {
            sessions: sessions.len(),
            quotas: quotas.len(),
        };
    }

    for (session, quota) in sessions.iter_mut().zip(quotas) {
        session.quota = *quota;
    }
    debug!(sessions = sessions.len(), "applied quota vector");
    Alignment::Applied {
        sessions: sessions.len(),
    }
}

/// Puts every session back on `quota`.
pub fn reset_quotas(sessions: &mut [Session], quota: u32) {
    for session in sessions.iter_mut() {
        session.quota = quota;
    }
}
