//! Section edits over a goal.
//!
//! Every operation borrows the current goal and returns a new whole goal;
//! nothing is patched in place. Addressing an id that isn't in the list is a
//! no-op, not an error.

use crate::entity::{next_id, ChecklistItem, GoalRecord, Review, Weekday};
use crate::error::GoalplanError;

/// One of the checklist sub-lists of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistPath {
    VisionReasons,
    DailyRoutines,
    BehaviorRules,
    Obstacles,
    Essentials,
    Rewards,
    IntermediateMilestones,
    FinalMilestones,
}

impl ChecklistPath {
    pub const ALL: [ChecklistPath; 8] = [
        ChecklistPath::VisionReasons,
        ChecklistPath::DailyRoutines,
        ChecklistPath::BehaviorRules,
        ChecklistPath::Obstacles,
        ChecklistPath::Essentials,
        ChecklistPath::Rewards,
        ChecklistPath::IntermediateMilestones,
        ChecklistPath::FinalMilestones,
    ];

    /// Reasons are plain text rows; their `checked` flag is never used.
    pub fn is_checkable(self) -> bool {
        self != ChecklistPath::VisionReasons
    }

    /// The top-level section this list lives in.
    pub fn section(self) -> &'static str {
        match self {
            ChecklistPath::VisionReasons => "vision",
            ChecklistPath::DailyRoutines | ChecklistPath::BehaviorRules => "system",
            ChecklistPath::Obstacles | ChecklistPath::Essentials => "environment",
            ChecklistPath::Rewards => "motivation",
            ChecklistPath::IntermediateMilestones | ChecklistPath::FinalMilestones => "milestones",
        }
    }

    pub fn items(self, goal: &GoalRecord) -> &Vec<ChecklistItem> {
        match self {
            ChecklistPath::VisionReasons => &goal.vision.reasons,
            ChecklistPath::DailyRoutines => &goal.system.daily_routines,
            ChecklistPath::BehaviorRules => &goal.system.behavior_rules,
            ChecklistPath::Obstacles => &goal.environment.obstacles,
            ChecklistPath::Essentials => &goal.environment.essentials,
            ChecklistPath::Rewards => &goal.motivation.rewards,
            ChecklistPath::IntermediateMilestones => &goal.milestones.intermediate,
            ChecklistPath::FinalMilestones => &goal.milestones.r#final,
        }
    }

    fn items_mut(self, goal: &mut GoalRecord) -> &mut Vec<ChecklistItem> {
        match self {
            ChecklistPath::VisionReasons => &mut goal.vision.reasons,
            ChecklistPath::DailyRoutines => &mut goal.system.daily_routines,
            ChecklistPath::BehaviorRules => &mut goal.system.behavior_rules,
            ChecklistPath::Obstacles => &mut goal.environment.obstacles,
            ChecklistPath::Essentials => &mut goal.environment.essentials,
            ChecklistPath::Rewards => &mut goal.motivation.rewards,
            ChecklistPath::IntermediateMilestones => &mut goal.milestones.intermediate,
            ChecklistPath::FinalMilestones => &mut goal.milestones.r#final,
        }
    }
}

impl std::fmt::Display for ChecklistPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistPath::VisionReasons => write!(f, "vision.reasons"),
            ChecklistPath::DailyRoutines => write!(f, "system.dailyRoutines"),
            ChecklistPath::BehaviorRules => write!(f, "system.behaviorRules"),
            ChecklistPath::Obstacles => write!(f, "environment.obstacles"),
            ChecklistPath::Essentials => write!(f, "environment.essentials"),
            ChecklistPath::Rewards => write!(f, "motivation.rewards"),
            ChecklistPath::IntermediateMilestones => write!(f, "milestones.intermediate"),
            ChecklistPath::FinalMilestones => write!(f, "milestones.final"),
        }
    }
}

/// Lowercase and drop `_`/`-` so `dailyRoutines`, `daily_routines` and
/// `daily-routines` all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::str::FromStr for ChecklistPath {
    type Err = GoalplanError;

    /// Accepts `section.subSection` or the bare sub-section name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let (section, sub) = match key.split_once('.') {
            Some((section, sub)) => (Some(section), sub),
            None => (None, key.as_str()),
        };

        let path = match sub {
            "reasons" => ChecklistPath::VisionReasons,
            "dailyroutines" => ChecklistPath::DailyRoutines,
            "behaviorrules" => ChecklistPath::BehaviorRules,
            "obstacles" => ChecklistPath::Obstacles,
            "essentials" => ChecklistPath::Essentials,
            "rewards" => ChecklistPath::Rewards,
            "intermediate" => ChecklistPath::IntermediateMilestones,
            "final" => ChecklistPath::FinalMilestones,
            _ => return Err(GoalplanError::UnknownList(s.to_string())),
        };

        match section {
            Some(section) if section != path.section() => {
                Err(GoalplanError::UnknownList(s.to_string()))
            }
            _ => Ok(path),
        }
    }
}

/// One of the two review lists in the feedback section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPath {
    Weekly,
    Monthly,
}

impl ReviewPath {
    pub fn reviews(self, goal: &GoalRecord) -> &Vec<Review> {
        match self {
            ReviewPath::Weekly => &goal.feedback.weekly_reviews,
            ReviewPath::Monthly => &goal.feedback.monthly_reviews,
        }
    }

    fn reviews_mut(self, goal: &mut GoalRecord) -> &mut Vec<Review> {
        match self {
            ReviewPath::Weekly => &mut goal.feedback.weekly_reviews,
            ReviewPath::Monthly => &mut goal.feedback.monthly_reviews,
        }
    }
}

impl std::fmt::Display for ReviewPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewPath::Weekly => write!(f, "feedback.weeklyReviews"),
            ReviewPath::Monthly => write!(f, "feedback.monthlyReviews"),
        }
    }
}

impl std::str::FromStr for ReviewPath {
    type Err = GoalplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "weekly" | "weeklyreviews" | "feedback.weeklyreviews" => Ok(ReviewPath::Weekly),
            "monthly" | "monthlyreviews" | "feedback.monthlyreviews" => Ok(ReviewPath::Monthly),
            _ => Err(GoalplanError::UnknownList(s.to_string())),
        }
    }
}

/// The editable fields of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Date,
    Comment,
}

impl std::str::FromStr for ReviewField {
    type Err = GoalplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(ReviewField::Date),
            "comment" => Ok(ReviewField::Comment),
            _ => Err(GoalplanError::UnknownReviewField(s.to_string())),
        }
    }
}

/// A single user edit to a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    AddItem(ChecklistPath),
    RemoveItem(ChecklistPath, u64),
    UpdateItem(ChecklistPath, u64, String),
    ToggleItem(ChecklistPath, u64),
    AddReview(ReviewPath),
    RemoveReview(ReviewPath, u64),
    UpdateReview(ReviewPath, u64, ReviewField, String),
    SetDream(String),
    SetPreferredTime(String),
    ToggleDay(Weekday),
}

impl Edit {
    /// Apply this edit, producing the edited copy of `goal`.
    pub fn apply(&self, goal: &GoalRecord) -> GoalRecord {
        match self {
            Edit::AddItem(path) => add_item(goal, *path),
            Edit::RemoveItem(path, id) => remove_item(goal, *path, *id),
            Edit::UpdateItem(path, id, text) => update_item(goal, *path, *id, text),
            Edit::ToggleItem(path, id) => toggle_item(goal, *path, *id),
            Edit::AddReview(path) => add_review(goal, *path),
            Edit::RemoveReview(path, id) => remove_review(goal, *path, *id),
            Edit::UpdateReview(path, id, field, value) => {
                update_review(goal, *path, *id, *field, value)
            }
            Edit::SetDream(text) => set_dream(goal, text),
            Edit::SetPreferredTime(text) => set_preferred_time(goal, text),
            Edit::ToggleDay(day) => toggle_day(goal, *day),
        }
    }
}

pub fn add_item(goal: &GoalRecord, path: ChecklistPath) -> GoalRecord {
    let mut edited = goal.clone();
    let items = path.items_mut(&mut edited);
    let id = next_id(items);
    items.push(ChecklistItem::new(id));
    edited
}

pub fn remove_item(goal: &GoalRecord, path: ChecklistPath, id: u64) -> GoalRecord {
    let mut edited = goal.clone();
    path.items_mut(&mut edited).retain(|item| item.id != id);
    edited
}

pub fn update_item(goal: &GoalRecord, path: ChecklistPath, id: u64, text: &str) -> GoalRecord {
    let mut edited = goal.clone();
    if let Some(item) = path.items_mut(&mut edited).iter_mut().find(|i| i.id == id) {
        item.text = text.to_string();
    }
    edited
}

pub fn toggle_item(goal: &GoalRecord, path: ChecklistPath, id: u64) -> GoalRecord {
    let mut edited = goal.clone();
    if !path.is_checkable() {
        tracing::debug!(list = %path, "list has no checkboxes, ignoring toggle");
        return edited;
    }
    if let Some(item) = path.items_mut(&mut edited).iter_mut().find(|i| i.id == id) {
        item.checked = !item.checked;
    }
    edited
}

pub fn add_review(goal: &GoalRecord, path: ReviewPath) -> GoalRecord {
    let mut edited = goal.clone();
    let reviews = path.reviews_mut(&mut edited);
    let id = next_id(reviews);
    reviews.push(Review::new(id));
    edited
}

pub fn remove_review(goal: &GoalRecord, path: ReviewPath, id: u64) -> GoalRecord {
    let mut edited = goal.clone();
    path.reviews_mut(&mut edited).retain(|review| review.id != id);
    edited
}

pub fn update_review(
    goal: &GoalRecord,
    path: ReviewPath,
    id: u64,
    field: ReviewField,
    value: &str,
) -> GoalRecord {
    let mut edited = goal.clone();
    if let Some(review) = path.reviews_mut(&mut edited).iter_mut().find(|r| r.id == id) {
        match field {
            ReviewField::Date => review.date = value.to_string(),
            ReviewField::Comment => review.comment = value.to_string(),
        }
    }
    edited
}

pub fn set_dream(goal: &GoalRecord, text: &str) -> GoalRecord {
    let mut edited = goal.clone();
    edited.vision.dream = text.to_string();
    edited
}

pub fn set_preferred_time(goal: &GoalRecord, text: &str) -> GoalRecord {
    let mut edited = goal.clone();
    edited.environment.preferred_time = text.to_string();
    edited
}

/// Select `day` if it isn't selected, otherwise deselect it.
pub fn toggle_day(goal: &GoalRecord, day: Weekday) -> GoalRecord {
    let mut edited = goal.clone();
    let days = &mut edited.environment.selected_days;
    if !days.remove(&day) {
        days.insert(day);
    }
    edited
}
