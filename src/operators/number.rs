use super::OperatorHandler;
use crate::Result;
use crate::config::NumberFormat;
use crate::field::FieldContext;
use crate::session::ValidationState;

/// `number` / `number:integer`: empty, or a number spelled the way
/// [`NumberFormat`] allows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberOperator {
    format: NumberFormat,
}

impl NumberOperator {
    pub(crate) fn new(format: NumberFormat) -> Self {
        Self { format }
    }
}

impl OperatorHandler for NumberOperator {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        args: &[String],
    ) -> Result<()> {
        let value = field.value();
        if value.is_empty() {
            return Ok(());
        }
        let integer = args.first().is_some_and(|variant| variant == "integer");
        state.require(is_number_text(&value, self.format, integer));
        Ok(())
    }
}

/// Decimal: `[-+]?\d+([.,]\d+)?` then, with exponents allowed, `([eE][-+]?\d+)?`.
/// Integer: `[-+]?\d+` then, with exponents allowed, `([eE]\+?\d+)?`.
pub(crate) fn is_number_text(src: &str, format: NumberFormat, integer: bool) -> bool {
    let unsigned = src.strip_prefix(['-', '+']).unwrap_or(src);
    let Some(mut rest) = skip_digits(unsigned) else {
        return false;
    };

    if !integer {
        if let Some(fraction) = rest.strip_prefix(['.', ',']) {
            let Some(after) = skip_digits(fraction) else {
                return false;
            };
            rest = after;
        }
    }

    if format == NumberFormat::AllowExponent {
        if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
            let exponent = if integer {
                exponent.strip_prefix('+').unwrap_or(exponent)
            } else {
                exponent.strip_prefix(['-', '+']).unwrap_or(exponent)
            };
            let Some(after) = skip_digits(exponent) else {
                return false;
            };
            rest = after;
        }
    }

    rest.is_empty()
}

/// Strips one or more leading ASCII digits.
fn skip_digits(src: &str) -> Option<&str> {
    let end = src
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(src.len());
    if end == 0 { None } else { Some(&src[end..]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_spellings() {
        for src in ["-1234", "1234", "-12.34", "12.34", "12,34", "+7", "-12e34", "12e34", "1.5E-3"] {
            assert!(
                is_number_text(src, NumberFormat::AllowExponent, false),
                "{src} should be a number"
            );
        }
        for src in ["NotANumber", "12.", ".5", "1.2.3", "12e", "e12", "--1", "1 2"] {
            assert!(
                !is_number_text(src, NumberFormat::AllowExponent, false),
                "{src} should not be a number"
            );
        }
    }

    #[test]
    fn integer_spellings() {
        assert!(is_number_text("1234", NumberFormat::AllowExponent, true));
        assert!(is_number_text("-12e34", NumberFormat::AllowExponent, true));
        assert!(is_number_text("12e+34", NumberFormat::AllowExponent, true));
        assert!(!is_number_text("-12.34", NumberFormat::AllowExponent, true));
        assert!(!is_number_text("12e-3", NumberFormat::AllowExponent, true));
    }

    #[test]
    fn plain_format_rejects_exponents() {
        assert!(is_number_text("-12.34", NumberFormat::Plain, false));
        assert!(!is_number_text("12e34", NumberFormat::Plain, false));
        assert!(!is_number_text("12e34", NumberFormat::Plain, true));
        assert!(is_number_text("-1234", NumberFormat::Plain, true));
    }
}
