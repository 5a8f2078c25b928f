use chrono::{DateTime, Utc};

/// When the menu table was last populated, and with how many rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRecord {
    pub item_count: i64,
    pub ingested_at: DateTime<Utc>,
}

impl IngestionRecord {
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.ingested_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn aged(minutes: i64) -> IngestionRecord {
        IngestionRecord {
            item_count: 3,
            ingested_at: Utc::now() - Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_age_display() {
        assert_eq!(aged(0).age_display(), "just now");
        assert_eq!(aged(-5).age_display(), "just now");
        assert_eq!(aged(5).age_display(), "5m ago");
        assert_eq!(aged(90).age_display(), "2h ago");
        assert_eq!(aged(70).age_display(), "1h ago");
        assert_eq!(aged(1440 * 3).age_display(), "3d ago");
    }
}
