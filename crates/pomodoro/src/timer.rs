use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Minutes(u32);

impl Minutes {
    pub const fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    #[strum(to_string = "focus", serialize = "pomodoro")]
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "FOCUS",
            Self::ShortBreak => "SHORT BREAK",
            Self::LongBreak => "LONG BREAK",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Focus => "Pomodoro Duration",
            Self::ShortBreak => "Short Break Duration",
            Self::LongBreak => "Long Break Duration",
        }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            Self::Focus => 1..=300,
            Self::ShortBreak => 1..=60,
            Self::LongBreak => 1..=120,
        }
    }

    pub fn default_minutes(&self) -> Minutes {
        match self {
            Self::Focus => Minutes(25),
            Self::ShortBreak => Minutes(5),
            Self::LongBreak => Minutes(15),
        }
    }

    pub fn clamp(&self, minutes: Minutes) -> Minutes {
        let range = self.range();
        Minutes(minutes.0.clamp(*range.start(), *range.end()))
    }

    /// Dial bound for this mode's picker; the dial starts at zero, so 1..=300 becomes 0..=299.
    pub fn dial_max(&self) -> u32 {
        self.range().end() - self.range().start()
    }

    pub fn to_dial(&self, minutes: Minutes) -> u32 {
        self.clamp(minutes).0 - self.range().start()
    }

    pub fn from_dial(&self, value: u32) -> Minutes {
        self.clamp(Minutes(value.saturating_add(*self.range().start())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub focus: Minutes,
    pub short_break: Minutes,
    pub long_break: Minutes,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: TimerMode::Focus.default_minutes(),
            short_break: TimerMode::ShortBreak.default_minutes(),
            long_break: TimerMode::LongBreak.default_minutes(),
        }
    }
}

impl Durations {
    pub fn get(&self, mode: TimerMode) -> Minutes {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }

    pub fn set(&mut self, mode: TimerMode, minutes: Minutes) {
        let minutes = mode.clamp(minutes);
        match mode {
            TimerMode::Focus => self.focus = minutes,
            TimerMode::ShortBreak => self.short_break = minutes,
            TimerMode::LongBreak => self.long_break = minutes,
        }
    }

    pub fn clamped(mut self) -> Self {
        for mode in TimerMode::iter() {
            self.set(mode, self.get(mode));
        }
        self
    }
}

/// Dial edit of one duration; it only lands in [`Durations`] once confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationDraft {
    mode: TimerMode,
    pending: Option<Minutes>,
}

impl DurationDraft {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            pending: None,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn pending(&self) -> Option<Minutes> {
        self.pending
    }

    pub fn shown(&self, durations: &Durations) -> Minutes {
        self.pending.unwrap_or_else(|| durations.get(self.mode))
    }

    pub fn select(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.pending = None;
    }

    pub fn update(&mut self, dial_value: u32) -> Minutes {
        let minutes = self.mode.from_dial(dial_value);
        self.pending = Some(minutes);
        minutes
    }

    /// Writes the pending value into `durations` and returns it, if there was one.
    pub fn confirm(&mut self, durations: &mut Durations) -> Option<Minutes> {
        let minutes = self.pending.take()?;
        durations.set(self.mode, minutes);
        Some(durations.get(self.mode))
    }

    /// Drops the pending value; returns the dial position of the committed duration.
    pub fn cancel(&mut self, durations: &Durations) -> u32 {
        self.pending = None;
        self.mode.to_dial(durations.get(self.mode))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub finished: TimerMode,
    pub next: TimerMode,
    pub completed_focus: u32,
}

/// Focus/break countdown. Time is always supplied by the caller, so the cycle can be
/// driven by any tick source.
#[derive(Debug, Clone)]
pub struct Session {
    durations: Durations,
    mode: TimerMode,
    completed_focus: u32,
    long_break_interval: u32,
    auto_start: bool,
    banked: Duration,
    running_since: Option<Instant>,
}

impl Session {
    pub fn new(durations: Durations, long_break_interval: u32, auto_start: bool) -> Self {
        Self {
            durations: durations.clamped(),
            mode: TimerMode::Focus,
            completed_focus: 0,
            long_break_interval: long_break_interval.max(1),
            auto_start,
            banked: Duration::ZERO,
            running_since: None,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn set_cycle(&mut self, long_break_interval: u32, auto_start: bool) {
        self.long_break_interval = long_break_interval.max(1);
        self.auto_start = auto_start;
    }

    pub fn total(&self) -> Duration {
        self.durations.get(self.mode).as_duration()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        (self.banked + running).min(self.total())
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.total().saturating_sub(self.elapsed(now))
    }

    pub fn elapsed_ratio(&self, now: Instant) -> f64 {
        let total = self.total();
        if total.is_zero() {
            return 0.0;
        }
        self.elapsed(now).as_secs_f64() / total.as_secs_f64()
    }

    /// Remaining time as `MM:SS`; minutes are not wrapped into hours.
    pub fn format_remaining(&self, now: Instant) -> String {
        let secs = self.remaining(now).as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.running_since.is_some() {
            self.banked = self.elapsed(now);
            self.running_since = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = None;
    }

    pub fn restart(&mut self, now: Instant) {
        self.reset();
        self.start(now);
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_durations(&mut self, durations: Durations) {
        self.durations = durations.clamped();
        self.reset();
    }

    pub fn tick(&mut self, now: Instant) -> Option<PhaseChange> {
        if !self.is_running() || !self.remaining(now).is_zero() {
            return None;
        }
        let change = self.advance();
        if self.auto_start {
            self.start(now);
        }
        Some(change)
    }

    /// Ends the current phase early; it counts as completed. The next phase runs only if
    /// this one was running.
    pub fn skip(&mut self, now: Instant) -> PhaseChange {
        let was_running = self.is_running();
        let change = self.advance();
        if was_running {
            self.start(now);
        }
        change
    }

    fn advance(&mut self) -> PhaseChange {
        let finished = self.mode;
        let next = match finished {
            TimerMode::Focus => {
                self.completed_focus += 1;
                if self.completed_focus % self.long_break_interval == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        };

        self.set_mode(next);

        PhaseChange {
            finished,
            next,
            completed_focus: self.completed_focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    fn session() -> Session {
        Session::new(Durations::default(), DEFAULT_LONG_BREAK_INTERVAL, true)
    }

    #[test]
    fn test_countdown_and_ratio() {
        let t0 = Instant::now();
        let mut s = session();
        assert_eq!(s.format_remaining(t0), "25:00");

        s.start(t0);
        let later = t0 + mins(5) + Duration::from_millis(400);
        assert_eq!(s.format_remaining(later), "19:59");
        assert!((s.elapsed_ratio(t0 + mins(5)) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_pause_banks_elapsed_time() {
        let t0 = Instant::now();
        let mut s = session();
        s.start(t0);
        s.pause(t0 + mins(10));
        assert!(!s.is_running());

        // time passing while paused does not count
        assert_eq!(s.remaining(t0 + mins(60)), mins(15));

        s.toggle(t0 + mins(60));
        assert_eq!(s.remaining(t0 + mins(65)), mins(10));
    }

    #[test]
    fn test_reset_restores_full_duration() {
        let t0 = Instant::now();
        let mut s = session();
        s.start(t0);
        s.reset();
        assert!(!s.is_running());
        assert_eq!(s.remaining(t0 + mins(3)), mins(25));
    }

    #[test]
    fn test_restart_counts_down_from_full_duration() {
        let t0 = Instant::now();
        let mut s = session();
        s.start(t0);
        s.restart(t0 + mins(10));
        assert!(s.is_running());
        assert_eq!(s.remaining(t0 + mins(10)), mins(25));
        assert_eq!(s.format_remaining(t0 + mins(12)), "23:00");
    }

    #[test]
    fn test_tick_cycles_with_long_break_every_fourth_focus() {
        let mut now = Instant::now();
        let mut s = session();
        s.start(now);

        let mut sequence = Vec::new();
        for _ in 0..8 {
            now += s.remaining(now);
            let change = s.tick(now).expect("phase should end");
            sequence.push(change.next);
        }

        use TimerMode::*;
        assert_eq!(
            sequence,
            vec![ShortBreak, Focus, ShortBreak, Focus, ShortBreak, Focus, LongBreak, Focus]
        );
        assert_eq!(s.completed_focus(), 4);
        assert!(s.is_running());
    }

    #[test]
    fn test_tick_before_expiry_does_nothing() {
        let t0 = Instant::now();
        let mut s = session();
        assert_eq!(s.tick(t0 + mins(30)), None);

        s.start(t0);
        assert_eq!(s.tick(t0 + mins(24)), None);
        assert_eq!(s.mode(), TimerMode::Focus);
    }

    #[test]
    fn test_without_auto_start_next_phase_waits() {
        let t0 = Instant::now();
        let mut s = Session::new(Durations::default(), 4, false);
        s.start(t0);
        let change = s.tick(t0 + mins(25)).unwrap();
        assert_eq!(change.next, TimerMode::ShortBreak);
        assert!(!s.is_running());
        assert_eq!(s.remaining(t0 + mins(40)), mins(5));
    }

    #[test]
    fn test_skip_keeps_running_state() {
        let t0 = Instant::now();
        let mut s = Session::new(Durations::default(), 4, false);

        let change = s.skip(t0);
        assert_eq!(change.next, TimerMode::ShortBreak);
        assert!(!s.is_running());

        s.start(t0);
        let change = s.skip(t0 + mins(1));
        assert_eq!(change.next, TimerMode::Focus);
        assert!(s.is_running());
    }

    #[test]
    fn test_skip_while_paused_stays_paused_with_auto_start() {
        let t0 = Instant::now();
        let mut s = session();
        s.start(t0);
        s.pause(t0 + mins(1));

        let change = s.skip(t0 + mins(1) + Duration::from_secs(1));
        assert_eq!(change.next, TimerMode::ShortBreak);
        assert_eq!(s.completed_focus(), 1);
        assert!(!s.is_running());
        assert_eq!(s.remaining(t0 + mins(30)), mins(5));
    }

    #[test]
    fn test_long_durations_format_past_an_hour() {
        let durations = Durations {
            focus: Minutes::new(300),
            ..Durations::default()
        };
        let s = Session::new(durations, 4, true);
        assert_eq!(s.format_remaining(Instant::now()), "300:00");
    }

    #[test]
    fn test_durations_are_clamped_to_mode_range() {
        let mut d = Durations::default();
        d.set(TimerMode::ShortBreak, Minutes::new(90));
        d.set(TimerMode::Focus, Minutes::new(0));
        assert_eq!(d.short_break, Minutes::new(60));
        assert_eq!(d.focus, Minutes::new(1));
    }

    #[test]
    fn test_dial_offset_mapping() {
        let mode = TimerMode::LongBreak;
        assert_eq!(mode.dial_max(), 119);
        assert_eq!(mode.to_dial(Minutes::new(15)), 14);
        assert_eq!(mode.from_dial(0), Minutes::new(1));
        assert_eq!(mode.from_dial(119), Minutes::new(120));
        assert_eq!(mode.from_dial(500), Minutes::new(120));
    }

    #[test]
    fn test_draft_commits_only_on_confirm() {
        let mut durations = Durations::default();
        let mut draft = DurationDraft::new(TimerMode::Focus);
        assert_eq!(draft.shown(&durations), Minutes::new(25));

        assert_eq!(draft.update(44), Minutes::new(45));
        assert_eq!(draft.shown(&durations), Minutes::new(45));
        assert_eq!(durations.focus, Minutes::new(25));

        assert_eq!(draft.confirm(&mut durations), Some(Minutes::new(45)));
        assert_eq!(durations.focus, Minutes::new(45));
        assert_eq!(draft.pending(), None);
        assert_eq!(draft.confirm(&mut durations), None);
    }

    #[test]
    fn test_draft_cancel_restores_committed_value() {
        let durations = Durations::default();
        let mut draft = DurationDraft::new(TimerMode::ShortBreak);
        draft.update(30);

        assert_eq!(draft.cancel(&durations), 4);
        assert_eq!(draft.pending(), None);
        assert_eq!(draft.shown(&durations), Minutes::new(5));
        assert_eq!(durations.short_break, Minutes::new(5));
    }

    #[test]
    fn test_draft_select_drops_pending_edit() {
        let durations = Durations::default();
        let mut draft = DurationDraft::new(TimerMode::Focus);
        draft.update(100);

        draft.select(TimerMode::LongBreak);
        assert_eq!(draft.mode(), TimerMode::LongBreak);
        assert_eq!(draft.shown(&durations), Minutes::new(15));
    }

    #[test]
    fn test_mode_parsing() {
        let cases = vec![
            ("focus", TimerMode::Focus),
            ("Pomodoro", TimerMode::Focus),
            ("short_break", TimerMode::ShortBreak),
            ("LONG_BREAK", TimerMode::LongBreak),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<TimerMode>().unwrap(), expected);
        }
        assert_eq!(TimerMode::ShortBreak.to_string(), "short_break");
    }

    #[test]
    fn test_durations_deserialize_with_defaults() {
        let d: Durations = serde_json::from_str(r#"{ "focus": 50 }"#).unwrap();
        assert_eq!(d.focus, Minutes::new(50));
        assert_eq!(d.short_break, Minutes::new(5));
    }
}
