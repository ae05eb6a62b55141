use std::io;
use std::path::PathBuf;

use crate::config::PlannerConfig;
use crate::editor::{ChecklistPath, Edit, ReviewPath};
use crate::entity::{ChecklistItem, GoalRecord, Review, Weekday};
use crate::error::{GoalplanError, Result};
use crate::planner::{DeleteStatus, Planner};
use crate::storage::{FileSlot, GoalStore};
use crate::transfer;

fn open_planner(store: Option<PathBuf>) -> (PlannerConfig, Planner<FileSlot>) {
    let config = PlannerConfig::from_env(store);
    tracing::debug!(store = %config.store_path.display(), "opening goal store");
    let planner = Planner::new(GoalStore::new(FileSlot::new(&config.store_path)));
    (config, planner)
}

fn short_id(goal: &GoalRecord) -> String {
    goal.id.to_string()[..7].to_string()
}

fn or_empty(text: &str) -> &str {
    if text.is_empty() {
        "(empty)"
    } else {
        text
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_checklist(label: &str, items: &[ChecklistItem], checkable: bool) {
    println!("  {}:", label);
    if items.is_empty() {
        println!("    (none)");
    }
    for item in items {
        if checkable {
            let mark = if item.checked { "x" } else { " " };
            println!("    [{}] {:>3}  {}", mark, item.id, or_empty(&item.text));
        } else {
            println!("    {:>3}  {}", item.id, or_empty(&item.text));
        }
    }
}

fn print_reviews(label: &str, reviews: &[Review]) {
    println!("  {}:", label);
    if reviews.is_empty() {
        println!("    (none)");
    }
    for review in reviews {
        let date = if review.date.is_empty() {
            "----------"
        } else {
            review.date.as_str()
        };
        println!("    {:>3}  {}  {}", review.id, date, or_empty(&review.comment));
    }
}

fn print_goal(goal: &GoalRecord) {
    println!("{} ({})", goal.title, goal.id);
    println!("Created:  {}", goal.created_at.format("%Y-%m-%d %H:%M"));
    println!("Modified: {}", goal.last_modified.format("%Y-%m-%d %H:%M"));

    println!("\nVision");
    println!("  Dream: {}", or_empty(&goal.vision.dream));
    print_checklist("Reasons", &goal.vision.reasons, false);

    println!("\nSystem");
    print_checklist("Daily routines", &goal.system.daily_routines, true);
    print_checklist("Behavior rules", &goal.system.behavior_rules, true);

    println!("\nEnvironment");
    let days: Vec<String> = Weekday::ALL
        .iter()
        .map(|day| {
            if goal.environment.selected_days.contains(day) {
                day.to_string().to_uppercase()
            } else {
                day.to_string()
            }
        })
        .collect();
    println!("  Days: {}", days.join(" "));
    println!(
        "  Preferred time: {}",
        or_empty(&goal.environment.preferred_time)
    );
    print_checklist("Obstacles", &goal.environment.obstacles, true);
    print_checklist("Essentials", &goal.environment.essentials, true);

    println!("\nFeedback");
    print_reviews("Weekly reviews", &goal.feedback.weekly_reviews);
    print_reviews("Monthly reviews", &goal.feedback.monthly_reviews);

    println!("\nMotivation");
    print_checklist("Rewards", &goal.motivation.rewards, true);

    println!("\nMilestones");
    print_checklist("Intermediate", &goal.milestones.intermediate, true);
    print_checklist("Final", &goal.milestones.r#final, true);
}

pub fn handle_list(store: Option<PathBuf>, json: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    let goals = planner.load()?;

    if json {
        return print_json(&goals);
    }

    println!("Goals:\n");
    for goal in &goals {
        let marker = if goal.is_protected() { "*" } else { " " };
        let dream = if goal.vision.dream.is_empty() {
            String::new()
        } else {
            format!("  {}", goal.vision.dream)
        };
        println!("  {} {} ({}){}", marker, goal.title, short_id(goal), dream);
    }

    Ok(())
}

pub fn handle_show(store: Option<PathBuf>, goal: String, json: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    let goal = planner.resolve(&goal)?;

    if json {
        print_json(&goal)
    } else {
        print_goal(&goal);
        Ok(())
    }
}

pub fn handle_add(store: Option<PathBuf>, json: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    let goal = planner.add_new()?;

    if json {
        print_json(&goal)
    } else {
        println!("Created {} ({})", goal.title, short_id(&goal));
        Ok(())
    }
}

pub fn handle_delete(store: Option<PathBuf>, goal: String, force: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    let target = planner.resolve(&goal)?;

    if target.is_protected() {
        println!("{} can't be deleted.", target.title);
        return Ok(());
    }

    if !force {
        eprintln!("Delete {} ({})? [y/N] ", target.title, short_id(&target));

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(GoalplanError::ConfirmationRequired);
        }
    }

    let outcome = planner.delete(&target.id)?;
    match outcome.status {
        DeleteStatus::Removed => {
            println!("Deleted {} ({})", target.title, short_id(&target));
            for goal in &outcome.goals {
                println!("  {} ({})", goal.title, short_id(goal));
            }
        }
        DeleteStatus::Protected => println!("{} can't be deleted.", target.title),
        DeleteStatus::Missing => return Err(GoalplanError::GoalNotFound(goal)),
    }

    Ok(())
}

pub fn handle_export(
    store: Option<PathBuf>,
    goal: String,
    out: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let (config, planner) = open_planner(store);
    let goal = planner.resolve(&goal)?;

    if stdout {
        println!("{}", transfer::export_to_string(&goal)?);
        return Ok(());
    }

    let dir = out.unwrap_or(config.export_dir);
    let path = transfer::export_to_dir(&goal, &dir)?;
    println!("Exported {} to {}", goal.title, path.display());

    Ok(())
}

pub fn handle_import(store: Option<PathBuf>, file: PathBuf, json: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    // Make sure "Goal 1" exists before the imported goal is appended.
    planner.load()?;
    let goal = planner.import(&file)?;

    if json {
        print_json(&goal)
    } else {
        println!("Imported {} ({})", goal.title, short_id(&goal));
        Ok(())
    }
}

/// Append a row to `list`, optionally filling in its text right away.
pub fn handle_item_add(
    store: Option<PathBuf>,
    goal: String,
    list: ChecklistPath,
    text: Option<String>,
    json: bool,
) -> Result<()> {
    let (_, planner) = open_planner(store);
    let current = planner.resolve(&goal)?;

    let add = Edit::AddItem(list);
    let mut saved = planner.edit(&current.id, &add)?;
    if let Some(text) = text {
        let id = list.items(&saved).last().map(|item| item.id).unwrap_or(1);
        saved = planner.edit(&saved.id, &Edit::UpdateItem(list, id, text))?;
    }

    if json {
        print_json(&saved)
    } else {
        report_edit(&add, &current, &saved);
        Ok(())
    }
}

/// Apply a single edit to the goal named by `goal` and report it.
pub fn handle_edit(store: Option<PathBuf>, goal: String, edit: Edit, json: bool) -> Result<()> {
    let (_, planner) = open_planner(store);
    let current = planner.resolve(&goal)?;
    let saved = planner.edit(&current.id, &edit)?;

    if json {
        print_json(&saved)
    } else {
        report_edit(&edit, &current, &saved);
        Ok(())
    }
}

fn report_edit(edit: &Edit, before: &GoalRecord, saved: &GoalRecord) {
    let has_item = |list: &ChecklistPath, id: u64| list.items(before).iter().any(|i| i.id == id);
    let has_review = |list: &ReviewPath, id: u64| list.reviews(before).iter().any(|r| r.id == id);

    match edit {
        Edit::AddItem(list) => {
            let id = list.items(saved).last().map(|i| i.id).unwrap_or(1);
            println!("Added {} item {} to {}", list, id, saved.title);
        }
        Edit::RemoveItem(list, id) if has_item(list, *id) => {
            println!("Removed {} item {} from {}", list, id, saved.title)
        }
        Edit::UpdateItem(list, id, _) if has_item(list, *id) => {
            println!("Updated {} item {} in {}", list, id, saved.title)
        }
        Edit::RemoveItem(list, id) | Edit::UpdateItem(list, id, _) => {
            println!("No item {} in {}", id, list)
        }
        Edit::ToggleItem(list, id) => match list.items(saved).iter().find(|i| i.id == *id) {
            Some(item) if list.is_checkable() => {
                let state = if item.checked { "checked" } else { "unchecked" };
                println!("{} item {} is now {}", list, id, state);
            }
            Some(_) => println!("{} items have no checkbox", list),
            None => println!("No item {} in {}", id, list),
        },
        Edit::AddReview(list) => {
            let id = list.reviews(saved).last().map(|r| r.id).unwrap_or(1);
            println!("Added {} review {} to {}", review_label(*list), id, saved.title);
        }
        Edit::RemoveReview(list, id) if has_review(list, *id) => {
            println!("Removed {} review {} from {}", review_label(*list), id, saved.title)
        }
        Edit::UpdateReview(list, id, _, _) if has_review(list, *id) => {
            println!("Updated {} review {} in {}", review_label(*list), id, saved.title)
        }
        Edit::RemoveReview(list, id) | Edit::UpdateReview(list, id, _, _) => {
            println!("No {} review {}", review_label(*list), id)
        }
        Edit::SetDream(_) => println!("Updated the dream of {}", saved.title),
        Edit::SetPreferredTime(_) => println!("Updated the preferred time of {}", saved.title),
        Edit::ToggleDay(day) => {
            let state = if saved.environment.selected_days.contains(day) {
                "selected"
            } else {
                "deselected"
            };
            println!("{} {} for {}", day, state, saved.title);
        }
    }
}

fn review_label(list: ReviewPath) -> &'static str {
    match list {
        ReviewPath::Weekly => "weekly",
        ReviewPath::Monthly => "monthly",
    }
}
