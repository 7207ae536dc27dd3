use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    data::group_settings::GroupSettingsRepository,
    error::AppError,
    model::schedule::EventSchedule,
    service::{cycle::CycleService, reminder::ReminderDispatcher},
};

/// Starts the boss reminder scheduler
///
/// This scheduler runs every minute and, for every guild with a reminder channel configured:
/// - Sends a boss reminder when the next daily spawn is inside its reminder window
/// - Sends an archboss reminder when the next weekly spawn is inside its reminder window
///
/// Each tick also brings the archboss Conflict/Peace cycle up to date.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for sending reminders
/// - `schedule`: Spawn timetable and reminder windows
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    schedule: Arc<EventSchedule>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let dispatcher = Arc::new(Mutex::new(ReminderDispatcher::new(schedule.clone())));

    // Schedule job to run every minute
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();
        let schedule = schedule.clone();
        let dispatcher = dispatcher.clone();

        Box::pin(async move {
            if let Err(e) = process_reminders(&db, &http, &schedule, &dispatcher).await {
                tracing::error!("Error processing boss reminders: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Boss reminder scheduler started");

    Ok(())
}

/// Runs one reminder tick.
async fn process_reminders(
    db: &DatabaseConnection,
    discord_http: &Http,
    schedule: &EventSchedule,
    dispatcher: &Mutex<ReminderDispatcher>,
) -> Result<(), AppError> {
    let now = Utc::now().with_timezone(&schedule.timezone);

    // Boss reminders still go out when the cycle cannot be read
    let cycle = match CycleService::new(db, &schedule.weekly).sync(now).await {
        Ok(cycle) => Some(cycle),
        Err(e) => {
            tracing::error!("Failed to sync archboss cycle, skipping archboss reminders: {}", e);
            None
        }
    };

    let groups = GroupSettingsRepository::new(db).get_all().await?;

    let mut dispatcher = dispatcher.lock().await;
    let report = dispatcher.tick(now, cycle, &groups, discord_http).await;

    if report.sent > 0 || report.failed > 0 {
        tracing::debug!(
            sent = report.sent,
            failed = report.failed,
            "Boss reminder tick finished"
        );
    }

    Ok(())
}
