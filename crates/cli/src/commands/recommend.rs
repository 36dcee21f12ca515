use chrono::{NaiveDate, Utc};
use clap::Args;
use nestling_core::config::{AppConfig, LoadOptions};
use nestling_core::recommend::{
    activity_details, ActivityDetails, ActivityRecord, ChildProfile, Milestone, MilestoneStatus,
    Ranker, Recommendation, RecommendationRequest,
};
use serde::Serialize;

use super::{CommandResult, EXIT_CONFIG};

#[derive(Debug, Clone, Default, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Date of birth (YYYY-MM-DD); omit to skip age filtering")]
    pub dob: Option<NaiveDate>,
    #[arg(long, help = "Enrolled program, e.g. literacy")]
    pub program: Option<String>,
    #[arg(long = "interest", help = "Stated interest tag (repeatable)")]
    pub interests: Vec<String>,
    #[arg(long = "activity-tag", help = "Tag from a recent activity (repeatable)")]
    pub activity_tags: Vec<String>,
    #[arg(long = "gap", help = "Developmental area with an open milestone (repeatable)")]
    pub gaps: Vec<String>,
    #[arg(long, help = "Evaluate age as of this date instead of today (YYYY-MM-DD)")]
    pub today: Option<NaiveDate>,
    #[arg(long, help = "Maximum number of activities (defaults to recommendations.max_results)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RankedActivity {
    #[serde(flatten)]
    recommendation: Recommendation<'static>,
    details: ActivityDetails,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    age: Option<u32>,
    recommendations: Vec<RankedActivity>,
}

impl From<&RecommendArgs> for RecommendationRequest {
    fn from(args: &RecommendArgs) -> Self {
        Self {
            profile: ChildProfile {
                date_of_birth: args.dob,
                program: args.program.clone(),
                interests: args.interests.clone(),
            },
            activities: vec![ActivityRecord { tags: args.activity_tags.clone() }],
            milestones: args
                .gaps
                .iter()
                .map(|area| Milestone {
                    area: Some(area.clone()),
                    status: MilestoneStatus::Pending,
                })
                .collect(),
        }
    }
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let limit = match args.limit {
        Some(limit) => limit,
        None => match AppConfig::load(LoadOptions::default()) {
            Ok(config) => config.recommendations.max_results,
            Err(error) => {
                return CommandResult::failure(
                    "recommend",
                    "config_validation",
                    error.to_string(),
                    EXIT_CONFIG,
                );
            }
        },
    };

    let request = RecommendationRequest::from(&args);
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let ranked = Ranker::default().with_limit(limit).rank(&request, today);

    let age = ranked.age();
    let recommendations: Vec<RankedActivity> = ranked
        .map(|recommendation| RankedActivity {
            details: activity_details(recommendation.item.key),
            recommendation,
        })
        .collect();

    let message = match age {
        Some(age) => format!("{} activities for age {age}", recommendations.len()),
        None => format!("{} activities (age unknown)", recommendations.len()),
    };
    CommandResult::success_with("recommend", message, RecommendOutput { age, recommendations })
}
