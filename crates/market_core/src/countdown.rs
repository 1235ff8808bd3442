use std::fmt;

/// Time left on an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Running {
        days: u64,
        hours: u8,
        minutes: u8,
        seconds: u8,
    },
    Ended,
}

impl Countdown {
    pub fn from_remaining(seconds: i64) -> Self {
        if seconds <= 0 {
            return Countdown::Ended;
        }
        let total = seconds as u64;
        Countdown::Running {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u8,
            minutes: ((total % 3_600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn until(ends_at: i64, now: i64) -> Self {
        Self::from_remaining(ends_at.saturating_sub(now))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Ended => write!(f, "auction ended"),
            Countdown::Running {
                days: 0,
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
            Countdown::Running {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{days}d {hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}
