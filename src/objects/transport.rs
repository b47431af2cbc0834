//! Arithmetic behind the transport controls.

fn known(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Played share of the track in percent; `0` while the duration is unknown.
pub fn progress_percent(position: f64, duration: f64) -> f64 {
    match known(duration) && position.is_finite() {
        true => (position / duration * 100.0).clamp(0.0, 100.0),
        false => 0.0,
    }
}

/// Horizontal click position on the seek bar as a fraction of its width.
pub fn seek_fraction(offset: f64, width: f64) -> f64 {
    match width > 0.0 && offset.is_finite() {
        true => (offset / width).clamp(0.0, 1.0),
        false => 0.0,
    }
}

/// Target position for a click at `fraction`; `None` while the duration is unknown.
pub fn seek_position(fraction: f64, duration: f64) -> Option<f64> {
    match known(duration) {
        true => Some(fraction.clamp(0.0, 1.0) * duration),
        false => None,
    }
}

pub fn clamp_volume(volume: f64) -> f64 {
    match volume.is_finite() {
        true => volume.clamp(0.0, 1.0),
        false => 1.0,
    }
}

/// `m:ss`
pub fn format_time(seconds: f64) -> String {
    match seconds.is_finite() && seconds >= 0.0 {
        true => format!("{}:{:02}", (seconds / 60.0) as u64, (seconds % 60.0) as u64),
        false => String::from("0:00"),
    }
}
