use std::fmt;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use liquid_core::{Runtime, ValueView, Value, Result as LiquidResult, Error as LiquidError};
use liquid_core::{Expression, FilterReflection};
use liquid_core::parser::{FilterArguments, ParseFilter, ParameterReflection};

const FORMAT_PARAMETERS: &[ParameterReflection] = &[ParameterReflection {
    name: "pattern",
    description: "strftime pattern, defaults to the site date format",
    is_optional: true,
}];

/// Date formatting filter: `{{ page.date | format: "%Y" }}`
#[derive(Debug)]
pub struct FormatFilter {
    pattern: Option<Expression>,
    default_pattern: String,
}

impl liquid_core::Filter for FormatFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        if input.is_nil() {
            return Ok(Value::Nil);
        }

        let pattern = match &self.pattern {
            Some(expr) => {
                let value = expr.evaluate(runtime)?;
                if value.is_nil() {
                    self.default_pattern.clone()
                } else {
                    value.to_kstr().to_string()
                }
            }
            None => self.default_pattern.clone(),
        };

        let date_str = input.to_kstr().to_string();
        match format_date(&date_str, &pattern)? {
            Some(formatted) => Ok(Value::scalar(formatted)),
            // Not a date we understand, pass it through
            None => Ok(Value::scalar(date_str)),
        }
    }
}

impl fmt::Display for FormatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "format")
    }
}

/// Format a date string with a strftime pattern.
///
/// Dates carrying an offset are formatted in that offset. `None` means the
/// input was not recognised as a date.
pub fn format_date(date_str: &str, pattern: &str) -> LiquidResult<Option<String>> {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(LiquidError::with_msg(format!("invalid date format `{}`", pattern)));
    }

    let trimmed = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.format_with_items(items.iter()).to_string()));
    }

    for naive_format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, naive_format) {
            return Ok(Some(dt.format_with_items(items.iter()).to_string()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(dt.format_with_items(items.iter()).to_string()));
        }
    }

    Ok(None)
}

/// Parse filter factory for format
#[derive(Debug, Clone)]
pub struct FormatFilterParser {
    pub default_pattern: String,
}

impl FilterReflection for FormatFilterParser {
    fn name(&self) -> &str {
        "format"
    }

    fn description(&self) -> &str {
        "Formats a date according to a strftime pattern"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        FORMAT_PARAMETERS
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for FormatFilterParser {
    fn parse(&self, mut args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        let pattern = args.positional.next();
        if args.positional.next().is_some() {
            return Err(LiquidError::with_msg("format takes at most one argument"));
        }
        if args.keyword.next().is_some() {
            return Err(LiquidError::with_msg("format takes no keyword arguments"));
        }

        Ok(Box::new(FormatFilter {
            pattern,
            default_pattern: self.default_pattern.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_keeps_source_offset() {
        let formatted = format_date("2020-01-02T00:00:00-07:00", "%Y-%m-%d %H:%M %:z")
            .unwrap()
            .unwrap();
        assert_eq!(formatted, "2020-01-02 00:00 -07:00");
    }

    #[test]
    fn test_format_date_only() {
        let formatted = format_date("2021-03-04", "%-d %B %Y").unwrap().unwrap();
        assert_eq!(formatted, "4 March 2021");
    }

    #[test]
    fn test_format_unknown_input() {
        assert_eq!(format_date("last tuesday", "%Y").unwrap(), None);
    }

    #[test]
    fn test_format_invalid_pattern() {
        assert!(format_date("2021-03-04", "%Q%").is_err());
    }
}
