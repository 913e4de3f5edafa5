use notify_rust::Notification;

use crate::storage::Settings;

/// Deliver the countdown-finished alert, honoring the notifications toggle.
/// Fire and forget: delivery failures are logged, never fatal.
pub fn fire_countdown_finished(settings: &Settings) {
    if !settings.enable_notifications {
        return;
    }
    // The stored lead-time preference is not consulted; the alert fires
    // exactly when the clock lands on zero
    let result = Notification::new()
        .summary("Tempo")
        .body("Time is up!")
        .appname("tempo")
        .icon("alarm-clock")
        .show();
    if let Err(e) = result {
        log::warn!("Failed to deliver notification: {:?}", e);
    }
}
