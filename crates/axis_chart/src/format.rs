//! Label text formatters
//!
//! Value and category labels get their text from pluggable formatters. A
//! formatter is a tagged variant that is resolved into a single function once
//! per layout pass.

use crate::error::{ChartError, ChartResult};
use crate::model::Series;
use crate::options::LayoutOptions;
use crate::scale::Scale;
use num_format::{Locale, ToFormattedString};
use std::fmt;
use std::sync::Arc;

/// What a formatter callback can see besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    /// The full series being laid out
    pub series: &'a Series,
    /// Options of the current pass
    pub options: &'a LayoutOptions,
    /// Position of the label in its axis (tick index or category index)
    pub index: usize,
}

pub type ValueFormatFn = Arc<dyn Fn(f64, &FormatContext<'_>) -> String + Send + Sync + 'static>;
pub type NameFormatFn = Arc<dyn Fn(&str, &FormatContext<'_>) -> String + Send + Sync + 'static>;

/// A resolved formatter, ready to be applied to every label of an axis
pub type ResolvedValueFormat<'f> = Box<dyn Fn(f64, &FormatContext<'_>) -> String + 'f>;
pub type ResolvedNameFormat<'f> = Box<dyn Fn(&str, &FormatContext<'_>) -> String + 'f>;

/// Formatter for value-axis labels
#[derive(Clone)]
pub enum ValueFormatter {
    /// Shortest round-trip representation (`Display`)
    Plain,
    /// Locale-aware grouping and decimal separator
    Locale(LocaleFormat),
    /// Arbitrary callback
    Callback(ValueFormatFn),
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter::Locale(LocaleFormat::default())
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFormatter::Plain => f.write_str("Plain"),
            ValueFormatter::Locale(locale) => f.debug_tuple("Locale").field(locale).finish(),
            ValueFormatter::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl ValueFormatter {
    /// Wrap a closure as a callback formatter
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(f64, &FormatContext<'_>) -> String + Send + Sync + 'static,
    {
        ValueFormatter::Callback(Arc::new(f))
    }

    /// Turn the variant into one function for the whole pass.
    ///
    /// Locale formatting keeps enough fraction digits to tell the ticks of
    /// `scale` apart.
    pub fn resolve(&self, scale: &Scale) -> ResolvedValueFormat<'_> {
        match self {
            ValueFormatter::Plain => {
                Box::new(|value: f64, _: &FormatContext<'_>| value.to_string())
            }
            ValueFormatter::Locale(locale) => {
                let locale = locale.for_step(scale.tick_spacing);
                Box::new(move |value: f64, _: &FormatContext<'_>| locale.format(value))
            }
            ValueFormatter::Callback(callback) => {
                Box::new(move |value: f64, ctx: &FormatContext<'_>| callback(value, ctx))
            }
        }
    }
}

/// Formatter for category-axis labels
#[derive(Clone, Default)]
pub enum NameFormatter {
    /// The category name as-is
    #[default]
    Raw,
    /// Arbitrary callback
    Callback(NameFormatFn),
}

impl fmt::Debug for NameFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFormatter::Raw => f.write_str("Raw"),
            NameFormatter::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl NameFormatter {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&str, &FormatContext<'_>) -> String + Send + Sync + 'static,
    {
        NameFormatter::Callback(Arc::new(f))
    }

    pub fn resolve(&self) -> ResolvedNameFormat<'_> {
        match self {
            NameFormatter::Raw => Box::new(|name: &str, _: &FormatContext<'_>| name.to_string()),
            NameFormatter::Callback(callback) => {
                Box::new(move |name: &str, ctx: &FormatContext<'_>| callback(name, ctx))
            }
        }
    }
}

/// Formatters for both axes
#[derive(Debug, Clone, Default)]
pub struct Formatters {
    pub value: ValueFormatter,
    pub name: NameFormatter,
}

const MAX_FRACTION_DIGITS: usize = 15;

/// Locale-aware number formatting
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormat {
    pub locale: Locale,
    /// Maximum number of fraction digits; trailing zeros are trimmed
    pub fraction_digits: usize,
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self {
            locale: Locale::en,
            fraction_digits: 2,
        }
    }
}

impl LocaleFormat {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Look up a locale by its name (e.g. "de", "en", "fr")
    pub fn from_name(name: &str) -> ChartResult<Self> {
        let locale = Locale::from_name(name)
            .map_err(|e| ChartError::InvalidConfig(format!("unknown locale '{}': {}", name, e)))?;
        Ok(Self::new(locale))
    }

    pub fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Widen `fraction_digits` so multiples of `step` stay distinct
    pub fn for_step(&self, step: f64) -> Self {
        if !step.is_finite() || step <= 0.0 {
            return *self;
        }
        let needed = (-step.log10() - 1e-9).ceil().clamp(0.0, MAX_FRACTION_DIGITS as f64) as usize;
        self.with_fraction_digits(self.fraction_digits.max(needed))
    }

    /// Format a value with grouped integer digits
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let digits = self.fraction_digits.min(MAX_FRACTION_DIGITS);
        let factor = 10_f64.powi(digits as i32);
        let rounded = (value * factor).round() / factor;
        let magnitude = rounded.abs();
        if magnitude >= u64::MAX as f64 {
            return rounded.to_string();
        }

        let integer = magnitude.trunc();
        let mut text = String::new();
        if rounded < 0.0 {
            text.push_str(self.locale.minus_sign());
        }
        text.push_str(&(integer as u64).to_formatted_string(&self.locale));

        if digits > 0 {
            let fraction = ((magnitude - integer) * factor).round() as u64;
            let fraction = format!("{:0width$}", fraction, width = digits);
            let fraction = fraction.trim_end_matches('0');
            if !fraction.is_empty() {
                text.push_str(self.locale.decimal());
                text.push_str(fraction);
            }
        }

        text
    }
}
