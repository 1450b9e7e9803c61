//! Trading-session classification and per-session transaction costs.
//!
//! Sessions are labeled from the UTC time-of-day alone (date-independent)
//! via a first-match scan of inclusive, overlapping ranges. The overlaps are
//! intentional and the precedence is load-bearing: Tokyo wins 07:00–09:00
//! over London, and London wins 12:00–16:00 over New York.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A labeled trading session with an associated cost profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Tokyo,
    London,
    NewYork,
    Off,
}

/// Modeled transaction costs for one session, in price units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionCosts {
    pub spread: f64,
    pub slippage: f64,
}

impl Session {
    /// (spread, slippage) cost pair for this session.
    pub fn costs(&self) -> SessionCosts {
        match self {
            Session::London => SessionCosts {
                spread: 0.00010,
                slippage: 0.00005,
            },
            Session::NewYork => SessionCosts {
                spread: 0.00012,
                slippage: 0.00006,
            },
            Session::Tokyo => SessionCosts {
                spread: 0.00016,
                slippage: 0.00008,
            },
            Session::Off => SessionCosts {
                spread: 0.00020,
                slippage: 0.00010,
            },
        }
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Map a UTC timestamp to its session label.
///
/// First-match-wins over inclusive ranges:
/// [00:00, 09:00] Tokyo, [07:00, 16:00] London, [12:00, 21:00] New York,
/// otherwise Off. Boundaries are inclusive to the second: 09:00:00 is still
/// Tokyo, 09:00:01 falls through to London.
pub fn session_label(ts: DateTime<Utc>) -> Session {
    let t = ts.time();
    if t >= hm(0, 0) && t <= hm(9, 0) {
        Session::Tokyo
    } else if t >= hm(7, 0) && t <= hm(16, 0) {
        Session::London
    } else if t >= hm(12, 0) && t <= hm(21, 0) {
        Session::NewYork
    } else {
        Session::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, hour, min, sec).unwrap()
    }

    #[test]
    fn tokyo_range_is_inclusive() {
        assert_eq!(session_label(at(0, 0, 0)), Session::Tokyo);
        assert_eq!(session_label(at(4, 30, 0)), Session::Tokyo);
        assert_eq!(session_label(at(9, 0, 0)), Session::Tokyo);
    }

    #[test]
    fn tokyo_wins_the_london_overlap() {
        // 07:00–09:00 matches both ranges; Tokyo is checked first.
        assert_eq!(session_label(at(7, 0, 0)), Session::Tokyo);
        assert_eq!(session_label(at(8, 0, 0)), Session::Tokyo);
    }

    #[test]
    fn london_starts_one_second_after_tokyo_closes() {
        assert_eq!(session_label(at(9, 0, 1)), Session::London);
        assert_eq!(session_label(at(10, 0, 0)), Session::London);
        assert_eq!(session_label(at(16, 0, 0)), Session::London);
    }

    #[test]
    fn london_wins_the_newyork_overlap() {
        assert_eq!(session_label(at(12, 0, 0)), Session::London);
        assert_eq!(session_label(at(16, 0, 0)), Session::London);
    }

    #[test]
    fn newyork_after_london_close() {
        assert_eq!(session_label(at(16, 0, 1)), Session::NewYork);
        assert_eq!(session_label(at(18, 0, 0)), Session::NewYork);
        assert_eq!(session_label(at(21, 0, 0)), Session::NewYork);
    }

    #[test]
    fn off_hours() {
        assert_eq!(session_label(at(21, 0, 1)), Session::Off);
        assert_eq!(session_label(at(23, 30, 0)), Session::Off);
        assert_eq!(session_label(at(23, 59, 59)), Session::Off);
    }

    #[test]
    fn cost_table_values() {
        let london = Session::London.costs();
        assert_eq!((london.spread, london.slippage), (0.00010, 0.00005));
        let newyork = Session::NewYork.costs();
        assert_eq!((newyork.spread, newyork.slippage), (0.00012, 0.00006));
        let tokyo = Session::Tokyo.costs();
        assert_eq!((tokyo.spread, tokyo.slippage), (0.00016, 0.00008));
        let off = Session::Off.costs();
        assert_eq!((off.spread, off.slippage), (0.00020, 0.00010));
    }

    #[test]
    fn off_session_is_the_most_expensive() {
        let sessions = [Session::London, Session::NewYork, Session::Tokyo];
        let off = Session::Off.costs();
        for s in sessions {
            let c = s.costs();
            assert!(off.spread > c.spread);
            assert!(off.slippage > c.slippage);
        }
    }

    #[test]
    fn session_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Session::NewYork).unwrap(), "\"newyork\"");
        assert_eq!(serde_json::to_string(&Session::Tokyo).unwrap(), "\"tokyo\"");
    }
}
