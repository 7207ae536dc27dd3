//! Boss spawn reminders.
//!
//! The dispatcher runs once per minute. Each tick recomputes the next occurrence of every
//! event kind and, for every configured guild, decides whether a reminder is due. A
//! per-(guild, kind) state machine guarantees one reminder per occurrence:
//!
//! - `Idle -> Notified { occurrence }` when the occurrence is within the reminder window
//! - `Notified -> Idle` when the next occurrence differs from the notified one
//!
//! The state lives in process memory only. A restart inside a window can therefore repeat
//! that window's reminder once.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serenity::{
    all::{ChannelId, CreateAllowedMentions, CreateMessage},
    async_trait,
    http::Http,
};
use std::{collections::HashMap, sync::Arc};

use crate::{
    error::AppError,
    model::{
        cycle::CycleState,
        group_settings::GroupSettings,
        schedule::{EventKind, EventSchedule, Occurrence},
    },
    service::schedule::next_occurrence,
};

/// Delivers reminder text to a guild channel.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, channel_id: u64, content: String) -> Result<(), AppError>;
}

#[async_trait]
impl Announcer for Http {
    async fn announce(&self, channel_id: u64, content: String) -> Result<(), AppError> {
        if channel_id == 0 {
            return Err(AppError::NotFound("Reminder channel id is 0".to_string()));
        }

        let message = CreateMessage::new()
            .content(content)
            .allowed_mentions(CreateAllowedMentions::new().all_roles(true));

        ChannelId::new(channel_id)
            .send_message(self, message)
            .await?;

        Ok(())
    }
}

/// Reminder progress for one (guild, event kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderState {
    #[default]
    Idle,
    Notified { occurrence: DateTime<Utc> },
}

/// In-memory reminder state for every guild.
#[derive(Debug, Default)]
pub struct ReminderTracker {
    states: HashMap<(u64, EventKind), ReminderState>,
}

impl ReminderTracker {
    pub fn state(&self, guild_id: u64, kind: EventKind) -> ReminderState {
        self.states
            .get(&(guild_id, kind))
            .copied()
            .unwrap_or_default()
    }

    /// Advances the state machine and reports whether a reminder is due now.
    ///
    /// A reminder is due when `0 <= occurrence - now <= window` and this occurrence has not
    /// been notified. A due reminder is marked notified before it is sent, so a failed send
    /// is not retried.
    pub fn evaluate(
        &mut self,
        guild_id: u64,
        kind: EventKind,
        occurrence: DateTime<Utc>,
        now: DateTime<Utc>,
        window: TimeDelta,
    ) -> bool {
        let state = self.states.entry((guild_id, kind)).or_default();

        if let ReminderState::Notified { occurrence: notified } = *state {
            if notified == occurrence {
                return false;
            }
            *state = ReminderState::Idle;
        }

        let lead = occurrence - now;
        if lead < TimeDelta::zero() || lead > window {
            return false;
        }

        *state = ReminderState::Notified { occurrence };
        true
    }

    /// Drops state for guilds that no longer have reminders configured.
    pub fn retain_guilds(&mut self, groups: &[GroupSettings]) {
        self.states
            .retain(|(guild_id, _), _| groups.iter().any(|g| g.guild_id == *guild_id));
    }
}

/// Outcome of one dispatcher tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct ReminderDispatcher {
    schedule: Arc<EventSchedule>,
    tracker: ReminderTracker,
}

impl ReminderDispatcher {
    pub fn new(schedule: Arc<EventSchedule>) -> Self {
        Self {
            schedule,
            tracker: ReminderTracker::default(),
        }
    }

    pub fn tracker(&self) -> &ReminderTracker {
        &self.tracker
    }

    /// Evaluates every guild for every event kind and sends the reminders that are due.
    ///
    /// Guilds are independent: a failed send is logged and counted, and the remaining
    /// guilds are still processed.
    ///
    /// # Arguments
    /// - `now` - Current time in the schedule's time zone
    /// - `cycle` - Archboss cycle state, `None` skips archboss reminders this tick
    /// - `groups` - Every guild with reminders configured
    /// - `announcer` - Message delivery
    pub async fn tick<A>(
        &mut self,
        now: DateTime<Tz>,
        cycle: Option<CycleState>,
        groups: &[GroupSettings],
        announcer: &A,
    ) -> TickReport
    where
        A: Announcer + ?Sized,
    {
        let schedule = self.schedule.clone();
        let now_utc = now.with_timezone(&Utc);
        let mut report = TickReport::default();

        self.tracker.retain_guilds(groups);

        let upcoming: Vec<(EventKind, Occurrence)> = [EventKind::Boss, EventKind::Archboss]
            .into_iter()
            .filter_map(|kind| next_occurrence(&schedule, kind, now, cycle).map(|o| (kind, o)))
            .collect();

        for group in groups {
            for (kind, occurrence) in &upcoming {
                let occurrence_utc = occurrence.at.with_timezone(&Utc);
                if !self.tracker.evaluate(
                    group.guild_id,
                    *kind,
                    occurrence_utc,
                    now_utc,
                    schedule.window(*kind),
                ) {
                    continue;
                }

                let content =
                    reminder_message(*kind, group.role_id, occurrence, occurrence_utc - now_utc, cycle);

                match announcer.announce(group.channel_id, content).await {
                    Ok(()) => {
                        report.sent += 1;
                        tracing::info!(
                            guild_id = group.guild_id,
                            "Sent {:?} reminder for {}",
                            kind,
                            occurrence.at
                        );
                    }
                    Err(e) => {
                        report.failed += 1;
                        tracing::error!(
                            guild_id = group.guild_id,
                            channel_id = group.channel_id,
                            "Failed to send {:?} reminder: {}",
                            kind,
                            e
                        );
                    }
                }
            }
        }

        report
    }
}

/// Reminder text for an occurrence `lead` away.
///
/// Minutes round up so a tick that lands a few seconds late still announces the window size.
pub fn reminder_message(
    kind: EventKind,
    role_id: u64,
    occurrence: &Occurrence,
    lead: TimeDelta,
    cycle: Option<CycleState>,
) -> String {
    let minutes = minutes_text(lead);

    match kind {
        EventKind::Boss => format!(
            "⏰ <@&{}> Reminder: The next boss spawn is in {}!\n**Boss**: {}",
            role_id, minutes, occurrence.label
        ),
        EventKind::Archboss => format!(
            "⚔️🔥 <@&{}> **Archboss Reminder**: The Archboss will spawn in {}! {}\n**Boss**: {} (This is a high-priority event!)",
            role_id,
            minutes,
            cycle.unwrap_or_default().emoji(),
            occurrence.label
        ),
    }
}

/// Message sent by `/boss_test`.
pub fn test_reminder_message(role_id: u64) -> String {
    format!(
        "🛠️ <@&{}> This is a test reminder for the Boss Spawn feature.",
        role_id
    )
}

fn minutes_text(lead: TimeDelta) -> String {
    let seconds = lead.num_seconds().max(0);
    let minutes = (seconds + 59) / 60;
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingAnnouncer {
        sent: Mutex<Vec<(u64, String)>>,
        failing_channels: Vec<u64>,
    }

    impl RecordingAnnouncer {
        fn failing(channels: &[u64]) -> Self {
            Self {
                failing_channels: channels.to_vec(),
                ..Default::default()
            }
        }

        fn messages(&self) -> Vec<(u64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Announcer for RecordingAnnouncer {
        async fn announce(&self, channel_id: u64, content: String) -> Result<(), AppError> {
            self.sent.lock().unwrap().push((channel_id, content));
            if self.failing_channels.contains(&channel_id) {
                return Err(AppError::NotFound("channel".to_string()));
            }
            Ok(())
        }
    }

    fn berlin(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(2026, 1, d, h, m, 0).unwrap()
    }

    fn group(guild_id: u64, channel_id: u64) -> GroupSettings {
        GroupSettings {
            guild_id,
            channel_id,
            role_id: 900 + guild_id,
        }
    }

    async fn run_minutes(
        dispatcher: &mut ReminderDispatcher,
        from: DateTime<Tz>,
        minutes: i64,
        cycle: Option<CycleState>,
        groups: &[GroupSettings],
        announcer: &RecordingAnnouncer,
    ) -> TickReport {
        let mut total = TickReport::default();
        for minute in 0..minutes {
            let now = from + TimeDelta::minutes(minute);
            let report = dispatcher.tick(now, cycle, groups, announcer).await;
            total.sent += report.sent;
            total.failed += report.failed;
        }
        total
    }

    #[test]
    fn evaluate_fires_once_per_occurrence() {
        let mut tracker = ReminderTracker::default();
        let occurrence = Utc.with_ymd_and_hms(2026, 1, 6, 11, 0, 0).unwrap();
        let window = TimeDelta::minutes(10);

        let fired = (0..20)
            .filter(|m| {
                let now = occurrence - TimeDelta::minutes(15) + TimeDelta::minutes(*m);
                tracker.evaluate(1, EventKind::Boss, occurrence, now, window)
            })
            .count();

        assert_eq!(fired, 1);
        assert_eq!(
            tracker.state(1, EventKind::Boss),
            ReminderState::Notified { occurrence }
        );
    }

    #[test]
    fn evaluate_window_bounds_are_inclusive() {
        let occurrence = Utc.with_ymd_and_hms(2026, 1, 6, 11, 0, 0).unwrap();
        let window = TimeDelta::minutes(10);

        let mut tracker = ReminderTracker::default();
        assert!(tracker.evaluate(1, EventKind::Boss, occurrence, occurrence - window, window));

        let mut tracker = ReminderTracker::default();
        assert!(tracker.evaluate(1, EventKind::Boss, occurrence, occurrence, window));

        let mut tracker = ReminderTracker::default();
        let too_early = occurrence - window - TimeDelta::seconds(1);
        assert!(!tracker.evaluate(1, EventKind::Boss, occurrence, too_early, window));
        assert_eq!(tracker.state(1, EventKind::Boss), ReminderState::Idle);
    }

    #[test]
    fn new_occurrence_resets_to_idle() {
        let mut tracker = ReminderTracker::default();
        let first = Utc.with_ymd_and_hms(2026, 1, 6, 11, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 1, 6, 14, 0, 0).unwrap();
        let window = TimeDelta::minutes(10);

        assert!(tracker.evaluate(1, EventKind::Boss, first, first, window));
        assert!(!tracker.evaluate(1, EventKind::Boss, second, first, window));
        assert_eq!(tracker.state(1, EventKind::Boss), ReminderState::Idle);
    }

    #[test]
    fn kinds_and_guilds_are_tracked_separately() {
        let mut tracker = ReminderTracker::default();
        let occurrence = Utc.with_ymd_and_hms(2026, 1, 7, 18, 0, 0).unwrap();
        let window = TimeDelta::minutes(15);

        assert!(tracker.evaluate(1, EventKind::Boss, occurrence, occurrence, window));
        assert!(tracker.evaluate(1, EventKind::Archboss, occurrence, occurrence, window));
        assert!(tracker.evaluate(2, EventKind::Boss, occurrence, occurrence, window));
    }

    /// Twenty ticks spanning the 12:00 spawn's window send a single reminder.
    #[tokio::test]
    async fn tick_sends_one_reminder_per_window() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();
        let groups = [group(1, 10)];

        // 2026-01-06 is a Tuesday, so no archboss is near.
        let report = run_minutes(
            &mut dispatcher,
            berlin(6, 11, 49),
            20,
            Some(CycleState::Peace),
            &groups,
            &announcer,
        )
        .await;

        assert_eq!(report, TickReport { sent: 1, failed: 0 });
        let messages = announcer.messages();
        assert_eq!(messages[0].0, 10);
        assert_eq!(
            messages[0].1,
            "⏰ <@&901> Reminder: The next boss spawn is in 10 minutes!\n**Boss**: 2 Peace Boss, 1 Conflict Boss"
        );
    }

    #[tokio::test]
    async fn tick_sends_one_reminder_per_occurrence_crossed() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();
        let groups = [group(1, 10)];

        // Covers the 12:00 and 15:00 spawns.
        let report = run_minutes(
            &mut dispatcher,
            berlin(6, 11, 45),
            200,
            Some(CycleState::Peace),
            &groups,
            &announcer,
        )
        .await;

        assert_eq!(report.sent, 2);
    }

    #[tokio::test]
    async fn archboss_reminder_uses_its_own_window() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();
        let groups = [group(1, 10)];

        // Wednesday 19:00 has both an archboss and a regular spawn.
        let report = run_minutes(
            &mut dispatcher,
            berlin(7, 18, 40),
            21,
            Some(CycleState::Conflict),
            &groups,
            &announcer,
        )
        .await;

        assert_eq!(report.sent, 2);
        let messages = announcer.messages();
        assert!(messages[0].1.starts_with("⚔️🔥 <@&901> **Archboss Reminder**"));
        assert!(messages[0].1.contains("in 15 minutes! 🔴"));
        assert!(messages[0].1.contains("Archboss (Conflict Boss)"));
        assert!(messages[1].1.contains("in 10 minutes!"));
    }

    #[tokio::test]
    async fn missing_cycle_skips_archboss_only() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();
        let groups = [group(1, 10)];

        let report =
            run_minutes(&mut dispatcher, berlin(7, 18, 40), 21, None, &groups, &announcer).await;

        assert_eq!(report.sent, 1);
        assert!(announcer.messages()[0].1.starts_with("⏰"));
    }

    /// A failed send keeps the occurrence marked and is not retried.
    #[tokio::test]
    async fn failed_send_is_not_retried() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::failing(&[10]);
        let groups = [group(1, 10)];

        let report = run_minutes(
            &mut dispatcher,
            berlin(6, 11, 49),
            20,
            Some(CycleState::Peace),
            &groups,
            &announcer,
        )
        .await;

        assert_eq!(report, TickReport { sent: 0, failed: 1 });
        assert_eq!(announcer.messages().len(), 1);
    }

    #[tokio::test]
    async fn one_failing_guild_does_not_block_others() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::failing(&[10]);
        let groups = [group(1, 10), group(2, 20)];

        let report = dispatcher
            .tick(
                berlin(6, 11, 50),
                Some(CycleState::Peace),
                &groups,
                &announcer,
            )
            .await;

        assert_eq!(report, TickReport { sent: 1, failed: 1 });
        assert_eq!(announcer.messages()[1].0, 20);
    }

    #[tokio::test]
    async fn late_tick_rounds_minutes_up() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();
        let groups = [group(1, 10)];

        let now = berlin(6, 11, 50) + TimeDelta::seconds(30);
        dispatcher
            .tick(now, Some(CycleState::Peace), &groups, &announcer)
            .await;

        assert!(announcer.messages()[0].1.contains("in 10 minutes!"));
    }

    #[tokio::test]
    async fn removed_guild_state_is_dropped() {
        let mut dispatcher = ReminderDispatcher::new(Arc::new(EventSchedule::default()));
        let announcer = RecordingAnnouncer::default();

        dispatcher
            .tick(
                berlin(6, 11, 55),
                Some(CycleState::Peace),
                &[group(1, 10)],
                &announcer,
            )
            .await;
        dispatcher
            .tick(berlin(6, 11, 56), Some(CycleState::Peace), &[], &announcer)
            .await;

        assert_eq!(
            dispatcher.tracker().state(1, EventKind::Boss),
            ReminderState::Idle
        );
    }

    #[test]
    fn singular_minute() {
        assert_eq!(minutes_text(TimeDelta::seconds(45)), "1 minute");
        assert_eq!(minutes_text(TimeDelta::seconds(0)), "0 minutes");
    }
}
