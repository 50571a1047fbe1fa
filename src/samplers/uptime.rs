use crate::collectors::ProcfsSource;
use crate::model::UptimeInfo;

/// Sample uptime and load average. Cosmetic data — any failure yields the
/// "N/A" sentinel rather than an error.
pub fn sample(src: &ProcfsSource) -> UptimeInfo {
    match read(src) {
        Some(info) => info,
        None => {
            tracing::debug!("uptime counters unreadable, reporting N/A");
            UptimeInfo::unavailable()
        }
    }
}

fn read(src: &ProcfsSource) -> Option<UptimeInfo> {
    let uptime = src.uptime().ok()?;
    let seconds: f64 = uptime.split_whitespace().next()?.parse().ok()?;

    let loadavg = src.loadavg().ok()?;
    let loads: Vec<&str> = loadavg.split_whitespace().take(3).collect();
    if loads.len() < 3 {
        return None;
    }

    Some(UptimeInfo {
        uptime: format_uptime(seconds as u64),
        load_avg: loads.join(", "),
    })
}

/// "Nd Nh Nm" once a full day has passed, "Nh Nm" before that.
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}
