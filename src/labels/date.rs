use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use super::LabelRules;

lazy_static! {
    static ref FULL_DATE: Regex = Regex::new(r"([0-9]{4})[-\s.]([0-9]{2})[-\s.]([0-9]{2})")
        .expect("full date regex should compile");
    // Year tokens are delimited by anything that is not a letter or a digit, so that
    // `Vacances_2018` still yields a year.
    static ref YEAR_TOKEN: Regex =
        Regex::new(r"(?:^|[^\p{L}\p{N}])((?:19|20)[0-9]{2})(?:$|[^\p{L}\p{N}])")
            .expect("year regex should compile");
}

/// `"<Month> <Year>"`, e.g. `"Juillet 2018"`.
pub fn month_year_label<D: Datelike>(date: &D, rules: &LabelRules) -> String {
    match rules.month_name(date.month()) {
        Some(month) => format!("{} {}", month, date.year()),
        None => String::new(),
    }
}

/// `"<day> <Month> <Year>"`, e.g. `"3 Juillet 2018"`.
pub fn full_date_label<D: Datelike>(date: &D, rules: &LabelRules) -> String {
    match rules.month_name(date.month()) {
        Some(month) => format!("{} {} {}", date.day(), month, date.year()),
        None => String::new(),
    }
}

/// The folder name that describes `file_path`: its parent directory, or the grandparent when
/// the parent name contains one of the generic folder words. Only one level is ever skipped.
pub fn informative_folder_name(file_path: &Path, rules: &LabelRules) -> String {
    let parent = match file_path.parent() {
        Some(parent) => parent,
        None => return String::new(),
    };
    let folder = dir_name(parent);

    let lowered = folder.to_lowercase();
    if rules
        .generic_folder_words
        .iter()
        .any(|word| lowered.contains(word.as_str()))
    {
        return parent.parent().map(dir_name).unwrap_or_default();
    }
    folder
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Month/year label guessed from the folder holding `file_path`. Empty when nothing matches.
pub fn date_from_path(file_path: &Path, rules: &LabelRules) -> String {
    date_from_folder_name(&informative_folder_name(file_path, rules), rules)
}

pub fn date_from_folder_name(folder: &str, rules: &LabelRules) -> String {
    if let Some((year, month, _)) = full_date_parts(folder) {
        if let Some(name) = rules.month_name(month) {
            return format!("{} {}", name, year);
        }
    }

    YEAR_TOKEN
        .captures(folder)
        .and_then(|caps| caps.get(1))
        .map(|year| year.as_str().to_string())
        .unwrap_or_default()
}

/// Day-precise label when the folder carries a real calendar date.
pub fn full_date_from_path(file_path: &Path, rules: &LabelRules) -> String {
    let folder = informative_folder_name(file_path, rules);
    full_date_parts(&folder)
        .and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| full_date_label(&date, rules))
        .unwrap_or_default()
}

fn full_date_parts(folder: &str) -> Option<(i32, u32, u32)> {
    let caps = FULL_DATE.captures(folder)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    Some((year, month, day))
}
