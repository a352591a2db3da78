//! Time sources for `Greeting` and `DateTime` blocks.
//!
//! The renderer never reads the wall clock itself. It asks a [`Clock`],
//! so a render with a [`FixedClock`] is a pure function of its inputs.

use chrono::{Local, NaiveDateTime, Timelike};

/// Provider of the current local time.
///
/// Implementations must be safe to read from several renders at once.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// The machine's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
///
/// ```rust
/// use chrono::NaiveDate;
/// use replykit_render::{Clock, FixedClock};
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// assert_eq!(FixedClock::new(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The greeting phrase for an hour of the day (0-23).
///
/// Morning is `[5, 12)`, day `[12, 18)`, evening `[18, 23)`, night the rest.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Доброе утро!",
        12..=17 => "Добрый день!",
        18..=22 => "Добрый вечер!",
        _ => "Доброй ночи!",
    }
}

/// The greeting phrase for the clock's current hour.
pub fn greeting(clock: &dyn Clock) -> &'static str {
    greeting_for_hour(clock.now().hour())
}
