use std::fmt;
use liquid_core::{Runtime, ValueView, Value, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParseFilter, ParameterReflection};
use liquid_core::FilterReflection;

/// AbsoluteUrl filter implementation
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilter {
    base_url: String,
}

impl liquid_core::Filter for AbsoluteUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let path = input.to_kstr().to_string();

        // Already absolute
        if path.contains("://") {
            return Ok(Value::scalar(path));
        }

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        Ok(Value::scalar(url))
    }
}

impl fmt::Display for AbsoluteUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absolute_url")
    }
}

/// Parse filter factory for absolute_url
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilterParser {
    pub base_url: String,
}

impl FilterReflection for AbsoluteUrlFilterParser {
    fn name(&self) -> &str {
        "absolute_url"
    }

    fn description(&self) -> &str {
        "Creates an absolute URL by prepending the site base URL to the input"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for AbsoluteUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(AbsoluteUrlFilter {
            base_url: self.base_url.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
