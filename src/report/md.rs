use crate::planner::CurrentScore;
use crate::types::report::{RunReport, DATE_FORMAT, TIME_FORMAT};

pub fn to_markdown(report: &RunReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Best times to run in {} in the next {} days:\n",
        report.city,
        report.days.len()
    ));
    for day in &report.days {
        output.push_str(&format!(
            "{}: {}, score: {:.2}",
            day.date, day.time, day.score
        ));
        if day.excluded {
            output.push_str(" (no slot outside weekday daytime)");
        }
        output.push('\n');
    }
    if report.skipped > 0 {
        output.push_str(&format!(
            "\n{} forecast entries skipped\n",
            report.skipped
        ));
    }
    output
}

pub fn current_to_markdown(city: &str, current: &CurrentScore) -> String {
    let timestamp = current.observation.timestamp();
    let card = &current.breakdown;
    let sky = current.observation.sky();
    let mut output = String::new();
    output.push_str(&format!(
        "Running conditions in {} at {} {}: score {:.2}\n\n",
        city,
        timestamp.format(DATE_FORMAT),
        timestamp.format(TIME_FORMAT),
        card.total
    ));
    output.push_str(&format!(
        "- temperature: {:.2} ({:.1}F)\n- humidity: {:.2} ({:.0}%)\n- wind: {:.2} ({:.1} mph)\n- sky: {:.2} ({}, {})\n- time of day: {:.2}\n",
        card.temperature,
        current.observation.temperature(),
        card.humidity,
        current.observation.humidity(),
        card.wind,
        current.observation.wind_speed(),
        card.sky,
        sky.parent_category.as_str(),
        sky.sub_category,
        card.time_of_day
    ));
    output
}
