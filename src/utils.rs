use chrono::{Duration, NaiveDateTime};

/// 将相对记录起点的秒数格式化为 HH:MM:SS.mmm
pub fn format_offset(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return format!("Invalid offset: {}", seconds);
    }

    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let secs = total_ms / 1000;
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    let secs = secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

/// 相对时间换算回绝对时间（记录带有日期时间戳时）
pub fn absolute_time(start: Option<NaiveDateTime>, seconds: f64) -> Option<String> {
    let start = start?;
    let offset = Duration::microseconds((seconds * 1e6).round() as i64);
    Some((start + offset).format("%Y-%m-%d %H:%M:%S%.3f").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0.0), "00:00:00.000");
        assert_eq!(format_offset(3723.0451), "01:02:03.045");
        assert!(format_offset(-1.0).starts_with("Invalid"));
    }

    #[test]
    fn test_absolute_time() {
        let start = NaiveDateTime::parse_from_str("2024-03-25 10:15:02.000", "%Y-%m-%d %H:%M:%S%.f").ok();
        assert_eq!(
            absolute_time(start, 61.5).as_deref(),
            Some("2024-03-25 10:16:03.500")
        );
        assert_eq!(absolute_time(None, 1.0), None);
    }
}
