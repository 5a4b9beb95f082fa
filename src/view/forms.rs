//! Form serialization
//!
//! Reads input fields off a [`Surface`] into request payloads and writes
//! values back. Validation failures come back as the message to show.

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::render::fmt_number;
use super::surface::{ids, Surface};
use crate::api::{FoodEntry, Goals, MealType, WatchSyncRecord};

/// Workout types offered by the demo fill
pub const DEMO_WORKOUTS: [&str; 6] = [
    "Running",
    "Walking",
    "Cycling",
    "Swimming",
    "Strength training",
    "Yoga",
];

/// Inputs cleared after a food entry is added; date and meal stay
const FOOD_DETAIL_FIELDS: [&str; 7] = [
    ids::FOOD_NAME,
    ids::FOOD_AMOUNT,
    ids::FOOD_CALORIES,
    ids::FOOD_PROTEIN,
    ids::FOOD_CARBS,
    ids::FOOD_FAT,
    ids::FOOD_FIBER,
];

/// Leading integer of a field, ignoring anything after it ("7.5" -> 7)
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let digits_end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..digits_end].parse().ok()
}

/// Float value of a field; empty or malformed is `None`
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Optional reading: empty, malformed and zero all mean "not measured"
fn reading(raw: &str) -> Option<f64> {
    parse_float(raw).filter(|v| *v != 0.0)
}

/// Value for a `datetime-local` input
pub fn datetime_input(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M").to_string()
}

/// Value for a `date` input
pub fn date_input(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Days shown on the dashboard; anything unusable falls back to `default`
pub fn read_days<S: Surface>(surface: &S, default: u32) -> u32 {
    parse_int(&surface.input(ids::DASH_DAYS))
        .and_then(|d| u32::try_from(d).ok())
        .filter(|d| *d > 0)
        .unwrap_or(default)
}

/// Pre-fill the sync form timestamp
pub fn init_watch_form<S: Surface>(surface: &mut S, now: DateTime<Utc>) {
    if surface.input(ids::SW_DATETIME).is_empty() {
        surface.set_input(ids::SW_DATETIME, &datetime_input(now));
    }
}

/// Fill the sync form with plausible readings
pub fn fill_demo_watch_form<S: Surface, R: Rng>(surface: &mut S, rng: &mut R, now: DateTime<Utc>) {
    surface.set_input(ids::SW_DATETIME, &datetime_input(now));
    surface.set_input(ids::SW_STEPS, &rng.gen_range(6000..12000).to_string());
    surface.set_input(ids::SW_HEART_RATE, &rng.gen_range(60..90).to_string());
    surface.set_input(ids::SW_CALORIES, &rng.gen_range(300..700).to_string());
    surface.set_input(ids::SW_ACTIVE, &rng.gen_range(20..80).to_string());
    surface.set_input(ids::SW_SLEEP, &format!("{:.1}", rng.gen_range(6.0..9.0)));
    surface.set_input(ids::SW_SPO2, &format!("{:.1}", rng.gen_range(96.0..99.0)));
    let workout = DEMO_WORKOUTS.choose(rng).copied().unwrap_or(DEMO_WORKOUTS[0]);
    surface.set_input(ids::SW_WORKOUT, workout);
    surface.set_input(ids::SW_WORKOUT_DURATION, &rng.gen_range(20..80).to_string());
}

/// Serialize the sync form
pub fn read_watch_form<S: Surface>(surface: &S) -> Result<WatchSyncRecord, String> {
    let recorded_at = surface.input(ids::SW_DATETIME).trim().to_string();
    if recorded_at.is_empty() {
        return Err("Please choose when the data was recorded".to_string());
    }

    let workout_type = surface.input(ids::SW_WORKOUT).trim().to_string();

    Ok(WatchSyncRecord {
        id: None,
        recorded_at,
        steps: parse_int(&surface.input(ids::SW_STEPS)).unwrap_or(0),
        heart_rate: reading(&surface.input(ids::SW_HEART_RATE)),
        calories_burned: parse_int(&surface.input(ids::SW_CALORIES)).unwrap_or(0),
        active_minutes: parse_int(&surface.input(ids::SW_ACTIVE)).unwrap_or(0),
        sleep_hours: reading(&surface.input(ids::SW_SLEEP)),
        blood_oxygen: reading(&surface.input(ids::SW_SPO2)),
        workout_type: (!workout_type.is_empty()).then_some(workout_type),
        workout_duration: parse_int(&surface.input(ids::SW_WORKOUT_DURATION)).unwrap_or(0),
        source: None,
    })
}

/// Make sure the food date picker holds a day and return it
pub fn ensure_food_date<S: Surface>(surface: &mut S, today: NaiveDate) -> String {
    let current = surface.input(ids::FOOD_DATE).trim().to_string();
    if current.is_empty() {
        let today = date_input(today);
        surface.set_input(ids::FOOD_DATE, &today);
        today
    } else {
        current
    }
}

/// Serialize the food form
pub fn read_food_form<S: Surface>(surface: &S, today: NaiveDate) -> Result<FoodEntry, String> {
    let food_name = surface.input(ids::FOOD_NAME).trim().to_string();
    if food_name.is_empty() {
        return Err("Please enter a food name".to_string());
    }

    let meal_raw = surface.input(ids::FOOD_MEAL);
    let meal_type = if meal_raw.trim().is_empty() {
        MealType::Breakfast
    } else {
        meal_raw.parse::<MealType>()?
    };

    let date = surface.input(ids::FOOD_DATE).trim().to_string();
    let date = if date.is_empty() { date_input(today) } else { date };

    let amount = |id: &str, default: f64| reading(&surface.input(id)).unwrap_or(default);

    Ok(FoodEntry {
        id: None,
        logged_at: Some(format!("{}T12:00:00", date)),
        meal_type,
        food_name,
        amount_g: amount(ids::FOOD_AMOUNT, 100.0),
        calories: amount(ids::FOOD_CALORIES, 0.0),
        protein_g: amount(ids::FOOD_PROTEIN, 0.0),
        carbs_g: amount(ids::FOOD_CARBS, 0.0),
        fat_g: amount(ids::FOOD_FAT, 0.0),
        fiber_g: amount(ids::FOOD_FIBER, 0.0),
    })
}

pub fn clear_food_form<S: Surface>(surface: &mut S) {
    for id in FOOD_DETAIL_FIELDS {
        surface.set_input(id, "");
    }
}

pub fn write_goals_form<S: Surface>(surface: &mut S, goals: &Goals) {
    surface.set_input(ids::GOAL_STEPS, &goals.daily_steps.to_string());
    surface.set_input(ids::GOAL_CALORIES_IN, &goals.daily_calories_intake.to_string());
    surface.set_input(ids::GOAL_CALORIES_BURN, &goals.daily_calories_burn.to_string());
    surface.set_input(ids::GOAL_SLEEP, &fmt_number(goals.sleep_hours));
    surface.set_input(ids::GOAL_ACTIVE, &goals.active_minutes.to_string());
}

/// Serialize the goals form; every field must be a number
pub fn read_goals_form<S: Surface>(surface: &S) -> Result<Goals, String> {
    let int = |id: &str, label: &str| {
        parse_int(&surface.input(id)).ok_or_else(|| format!("{} must be a number", label))
    };

    Ok(Goals {
        daily_steps: int(ids::GOAL_STEPS, "Daily steps")?,
        daily_calories_intake: int(ids::GOAL_CALORIES_IN, "Calorie intake")?,
        daily_calories_burn: int(ids::GOAL_CALORIES_BURN, "Calorie burn")?,
        sleep_hours: parse_float(&surface.input(ids::GOAL_SLEEP))
            .ok_or_else(|| "Sleep hours must be a number".to_string())?,
        active_minutes: int(ids::GOAL_ACTIVE, "Active minutes")?,
    })
}
