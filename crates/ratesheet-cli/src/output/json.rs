use ratesheet_core::error::RateError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), RateError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
