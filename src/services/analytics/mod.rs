//! 统计聚合服务
//!
//! 所有指标都从答题记录在内存中推导，不维护物化的统计表。
//! 聚合逻辑是纯函数，按记录列表计算，方便单测。

pub mod assessment;
pub mod participant;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attempts::entities::Attempt;
use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnalyticsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn get_assessment_analytics(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        assessment::get_assessment_analytics(self, request, assessment_id).await
    }

    pub async fn get_participant_history(
        &self,
        request: &HttpRequest,
        participant_id: i64,
    ) -> ActixResult<HttpResponse> {
        participant::get_participant_history(self, request, participant_id).await
    }
}

/// 保留两位小数
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 秒数格式化为 HH:MM:SS
pub(crate) fn format_time_spent(total_seconds: i64) -> String {
    let seconds = total_seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// 一组答题记录的整体指标
pub(crate) struct OverallStats {
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    pub average_percentage: f64,
    pub pass_rate: f64,
    pub average_time_spent: String,
}

/// 整体指标：平均百分比与通过率只看已提交的记录，无提交时为 0
pub(crate) fn overall_stats(attempts: &[Attempt]) -> OverallStats {
    let submitted: Vec<&Attempt> = attempts
        .iter()
        .filter(|a| a.status.is_submitted())
        .collect();

    let submitted_count = submitted.len() as i64;
    let average_percentage = if submitted.is_empty() {
        0.0
    } else {
        round2(
            submitted
                .iter()
                .map(|a| a.percentage.unwrap_or(0.0))
                .sum::<f64>()
                / submitted.len() as f64,
        )
    };
    let passed_count = submitted.iter().filter(|a| a.passed == Some(true)).count() as i64;
    let pass_rate = if submitted_count > 0 {
        round2(passed_count as f64 / submitted_count as f64 * 100.0)
    } else {
        0.0
    };

    let times: Vec<i64> = submitted.iter().filter_map(|a| a.time_spent).collect();
    let average_time_spent = if times.is_empty() {
        format_time_spent(0)
    } else {
        format_time_spent(times.iter().sum::<i64>() / times.len() as i64)
    };

    OverallStats {
        total_attempts: attempts.len() as i64,
        submitted_attempts: submitted_count,
        average_percentage,
        pass_rate,
        average_time_spent,
    }
}

/// 分组汇总结果
pub(crate) struct GroupStats {
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    pub best_score: Option<f64>,
    pub best_percentage: Option<f64>,
    pub average_score: f64,
    pub passed_count: i64,
    pub last_submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 汇总一个分组（某参与者或某测评）内的记录
pub(crate) fn summarize_group(attempts: &[&Attempt]) -> GroupStats {
    let submitted: Vec<&&Attempt> = attempts
        .iter()
        .filter(|a| a.status.is_submitted())
        .collect();

    let scores: Vec<f64> = submitted.iter().filter_map(|a| a.score).collect();
    let best_score = scores.iter().cloned().fold(None, |acc: Option<f64>, s| {
        Some(acc.map_or(s, |m| m.max(s)))
    });
    let best_percentage = submitted
        .iter()
        .filter_map(|a| a.percentage)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |m| m.max(p))));
    let average_score = if scores.is_empty() {
        0.0
    } else {
        round2(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    GroupStats {
        total_attempts: attempts.len() as i64,
        submitted_attempts: submitted.len() as i64,
        best_score,
        best_percentage,
        average_score,
        passed_count: submitted.iter().filter(|a| a.passed == Some(true)).count() as i64,
        last_submitted_at: submitted.iter().filter_map(|a| a.submitted_at).max(),
    }
}

/// 按 key 分组并保持首次出现的顺序
///
/// 记录已按提交时间倒序排列，因此分组顺序就是「最近提交在前」。
pub(crate) fn group_preserving_order<F>(attempts: &[Attempt], key: F) -> Vec<(i64, Vec<&Attempt>)>
where
    F: Fn(&Attempt) -> i64,
{
    let mut groups: Vec<(i64, Vec<&Attempt>)> = Vec::new();
    for attempt in attempts {
        let k = key(attempt);
        match groups.iter_mut().find(|(gk, _)| *gk == k) {
            Some((_, members)) => members.push(attempt),
            None => groups.push((k, vec![attempt])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempts::entities::AttemptStatus;
    use chrono::{DateTime, Utc};

    fn attempt(
        participant_id: i64,
        status: AttemptStatus,
        score: Option<f64>,
        percentage: Option<f64>,
        passed: Option<bool>,
        submitted_ts: Option<i64>,
        time_spent: Option<i64>,
    ) -> Attempt {
        Attempt {
            id: 0,
            assessment_id: 1,
            participant_id,
            attempt_number: 1,
            status,
            score,
            percentage,
            passed,
            started_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            submitted_at: submitted_ts.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            time_spent,
        }
    }

    #[test]
    fn test_format_time_spent() {
        assert_eq!(format_time_spent(0), "00:00:00");
        assert_eq!(format_time_spent(61), "00:01:01");
        assert_eq!(format_time_spent(3661), "01:01:01");
        assert_eq!(format_time_spent(-5), "00:00:00");
    }

    #[test]
    fn test_overall_stats_empty() {
        let stats = overall_stats(&[]);
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.pass_rate, 0.0);
        assert_eq!(stats.average_time_spent, "00:00:00");
    }

    #[test]
    fn test_overall_stats_ignores_in_progress() {
        let attempts = vec![
            attempt(
                1,
                AttemptStatus::Graded,
                Some(8.0),
                Some(80.0),
                Some(true),
                Some(100),
                Some(600),
            ),
            attempt(
                2,
                AttemptStatus::Submitted,
                Some(4.0),
                Some(40.0),
                Some(false),
                Some(200),
                Some(1200),
            ),
            attempt(3, AttemptStatus::InProgress, None, None, None, None, None),
        ];

        let stats = overall_stats(&attempts);
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.submitted_attempts, 2);
        assert_eq!(stats.average_percentage, 60.0);
        assert_eq!(stats.pass_rate, 50.0);
        assert_eq!(stats.average_time_spent, "00:15:00");
    }

    #[test]
    fn test_summarize_group() {
        let a1 = attempt(
            1,
            AttemptStatus::Graded,
            Some(6.0),
            Some(60.0),
            Some(true),
            Some(300),
            None,
        );
        let a2 = attempt(
            1,
            AttemptStatus::Submitted,
            Some(9.0),
            Some(90.0),
            Some(true),
            Some(100),
            None,
        );
        let a3 = attempt(1, AttemptStatus::Abandoned, None, None, None, None, None);

        let stats = summarize_group(&[&a1, &a2, &a3]);
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.submitted_attempts, 2);
        assert_eq!(stats.best_score, Some(9.0));
        assert_eq!(stats.best_percentage, Some(90.0));
        assert_eq!(stats.average_score, 7.5);
        assert_eq!(stats.passed_count, 2);
        assert_eq!(stats.last_submitted_at.unwrap().timestamp(), 300);
    }

    #[test]
    fn test_group_preserving_order() {
        let attempts = vec![
            attempt(
                2,
                AttemptStatus::Submitted,
                None,
                None,
                None,
                Some(300),
                None,
            ),
            attempt(
                1,
                AttemptStatus::Submitted,
                None,
                None,
                None,
                Some(200),
                None,
            ),
            attempt(
                2,
                AttemptStatus::Submitted,
                None,
                None,
                None,
                Some(100),
                None,
            ),
        ];

        let groups = group_preserving_order(&attempts, |a| a.participant_id);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 2);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, 1);
    }
}
