/// Join a location and a date into the caption shown under a photo.
///
/// The location goes through `capitalize`; the date is used as is since month names are
/// already proper-cased.
pub fn assemble_caption<F>(location: &str, date: &str, capitalize: F) -> String
where
    F: Fn(&str) -> String,
{
    match (location.is_empty(), date.is_empty()) {
        (false, false) => format!("{} - {}", capitalize(location), date),
        (false, true) => capitalize(location),
        (true, false) => date.to_string(),
        (true, true) => String::new(),
    }
}
