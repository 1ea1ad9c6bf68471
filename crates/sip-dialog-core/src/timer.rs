//! RFC 3261 §17 timer constants, handed to the core at construction time
//! and turned into the concrete Timer A-K durations each FSM needs.
//!
//! Grounded in the reference crate's split between a settings struct and a
//! factory of derived values; here both collapse onto `TimerProfile`
//! itself since every derived timer is a pure function of `t1`/`t2`/`t4`
//! and the transport's reliability.

use std::time::Duration;

/// `T1`/`T2`/`T4` from RFC 3261 §17.1.1.1, the basis every other transaction
/// timer derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerProfile {
    pub t1: Duration,
    pub t2: Duration,
    pub t4: Duration,
}

impl Default for TimerProfile {
    fn default() -> Self {
        TimerProfile { t1: Duration::from_millis(500), t2: Duration::from_millis(4000), t4: Duration::from_millis(5000) }
    }
}

impl TimerProfile {
    pub fn new(t1: Duration, t2: Duration, t4: Duration) -> Self {
        TimerProfile { t1, t2, t4 }
    }

    /// Timer A / E initial retransmit interval.
    pub fn retransmit_initial(&self) -> Duration {
        self.t1
    }

    /// Doubles `current`, capped at T2 (RFC 3261 §17.1.1.2 / §17.1.2.2).
    pub fn retransmit_next(&self, current: Duration) -> Duration {
        std::cmp::min(current * 2, self.t2)
    }

    /// Timer B: INVITE client transaction timeout.
    pub fn timer_b(&self) -> Duration {
        self.t1 * 64
    }

    /// Timer D: wait time after an INVITE client transaction goes `completed`.
    pub fn timer_d(&self, datagram: bool) -> Duration {
        if datagram { Duration::from_secs(32) } else { Duration::ZERO }
    }

    /// Timer F: non-INVITE client transaction timeout.
    pub fn timer_f(&self) -> Duration {
        self.t1 * 64
    }

    /// Timer K: wait time after a non-INVITE client transaction goes `completed`.
    pub fn timer_k(&self, datagram: bool) -> Duration {
        if datagram { self.t4 } else { Duration::ZERO }
    }

    /// Timer G initial interval: INVITE server response retransmit.
    pub fn timer_g_initial(&self) -> Duration {
        self.t1
    }

    /// Timer H: INVITE server wait-for-ACK timeout.
    pub fn timer_h(&self) -> Duration {
        self.t1 * 64
    }

    /// Timer I: wait time after an INVITE server transaction goes `confirmed`.
    pub fn timer_i(&self, datagram: bool) -> Duration {
        if datagram { self.t4 } else { Duration::ZERO }
    }

    /// Timer J: wait time after a non-INVITE server transaction goes `completed`.
    pub fn timer_j(&self, datagram: bool) -> Duration {
        if datagram { self.t1 * 64 } else { Duration::ZERO }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retransmit_doubles_then_caps_at_t2() {
        let profile = TimerProfile::default();
        let mut interval = profile.retransmit_initial();
        let mut intervals = vec![interval];
        for _ in 0..6 {
            interval = profile.retransmit_next(interval);
            intervals.push(interval);
        }
        assert_eq!(
            intervals,
            vec![500, 1000, 2000, 4000, 4000, 4000, 4000].into_iter().map(Duration::from_millis).collect::<Vec<_>>()
        );
    }

    #[test]
    fn timer_b_is_64_t1() {
        assert_eq!(TimerProfile::default().timer_b(), Duration::from_millis(32_000));
    }

    #[test]
    fn timer_d_is_zero_on_reliable_transport() {
        assert_eq!(TimerProfile::default().timer_d(false), Duration::ZERO);
        assert_eq!(TimerProfile::default().timer_d(true), Duration::from_secs(32));
    }
}
