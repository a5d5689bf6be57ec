use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

impl Operator {
    pub fn apply(self, first: f64, second: f64) -> f64 {
        match self {
            Operator::Add => first + second,
            Operator::Subtract => first - second,
            Operator::Multiply => first * second,
            Operator::Divide => first / second,
        }
    }
}

/// A key on the calculator pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    Backspace,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown calculator key `{0}`")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let button = match s {
            "+" => Button::Operator(Operator::Add),
            "-" => Button::Operator(Operator::Subtract),
            "*" | "x" => Button::Operator(Operator::Multiply),
            "/" => Button::Operator(Operator::Divide),
            "." => Button::Decimal,
            "=" => Button::Equals,
            "c" | "C" => Button::Clear,
            "<" | "bs" => Button::Backspace,
            d if d.len() == 1 && d.as_bytes()[0].is_ascii_digit() => {
                Button::Digit(d.as_bytes()[0] - b'0')
            }
            other => return Err(UnknownButton(other.to_string())),
        };
        Ok(button)
    }
}

/// Splits input such as `12+3.5=` or `1 2 + 3 =` into buttons.
pub fn parse_keys(input: &str) -> Result<Vec<Button>, UnknownButton> {
    let mut buttons = Vec::new();
    for token in input.split_whitespace() {
        match token {
            "bs" => buttons.push(Button::Backspace),
            _ => {
                for c in token.chars() {
                    buttons.push(c.to_string().parse()?);
                }
            }
        }
    }
    Ok(buttons)
}

/// Four-function accumulator driven one button press at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    current_input: String,
    first_operand: Option<f64>,
    operator: Option<Operator>,
    wait_for_second_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            current_input: "0".to_string(),
            first_operand: None,
            operator: None,
            wait_for_second_operand: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.current_input
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Clear => *self = Self::default(),
            Button::Backspace => {
                self.current_input.pop();
                if self.current_input.is_empty() {
                    self.current_input.push('0');
                }
            }
            Button::Equals => {
                if let (Some(op), Some(first)) = (self.operator, self.first_operand) {
                    let result = op.apply(first, self.input_value());
                    self.current_input = format_number(result);
                    self.first_operand = Some(result);
                    self.operator = None;
                    self.wait_for_second_operand = true;
                }
            }
            Button::Operator(next) => {
                match (self.first_operand, self.operator) {
                    (None, _) => self.first_operand = Some(self.input_value()),
                    (Some(first), Some(op)) => {
                        let result = op.apply(first, self.input_value());
                        self.first_operand = Some(result);
                        self.current_input = format_number(result);
                    }
                    (Some(_), None) => {}
                }
                self.operator = Some(next);
                self.wait_for_second_operand = true;
            }
            Button::Decimal => {
                if !self.current_input.contains('.') {
                    self.current_input.push('.');
                }
            }
            Button::Digit(d) => {
                let digit = char::from(b'0' + d.min(9));
                if self.wait_for_second_operand {
                    self.current_input = digit.to_string();
                    self.wait_for_second_operand = false;
                } else if self.current_input == "0" {
                    self.current_input = digit.to_string();
                } else {
                    self.current_input.push(digit);
                }
            }
        }
    }

    pub fn press_all<I: IntoIterator<Item = Button>>(&mut self, buttons: I) -> &str {
        for b in buttons {
            self.press(b);
        }
        self.display()
    }

    fn input_value(&self) -> f64 {
        self.current_input.parse().unwrap_or(f64::NAN)
    }
}

/// Renders a result the way a browser prints numbers.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // covers -0.0 as well
        "0".to_string()
    } else {
        // `{:e}` yields the shortest round-trip digits, e.g. `3.3333333333333335e-10`
        let scientific = format!("{value:e}");
        match scientific.split_once('e') {
            Some((mantissa, exp)) => match exp.parse::<i32>() {
                Ok(exp) if exp >= 21 => format!("{mantissa}e+{exp}"),
                Ok(exp) if exp < -6 => format!("{mantissa}e{exp}"),
                _ => format!("{value}"),
            },
            None => format!("{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &str) -> String {
        let mut calc = Calculator::new();
        calc.press_all(parse_keys(keys).unwrap()).to_string()
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Calculator::new().display(), "0");
    }

    #[test]
    fn test_digits_replace_leading_zero() {
        assert_eq!(run("0 0 7"), "7");
        assert_eq!(run("123"), "123");
    }

    #[test]
    fn test_simple_operations() {
        assert_eq!(run("12+3="), "15");
        assert_eq!(run("9-12="), "-3");
        assert_eq!(run("6*7="), "42");
        assert_eq!(run("7/2="), "3.5");
    }

    #[test]
    fn test_chained_operators_evaluate_left_to_right() {
        assert_eq!(run("2+3*4="), "20");
    }

    #[test]
    fn test_operator_shows_intermediate_result() {
        assert_eq!(run("2+3*"), "5");
    }

    #[test]
    fn test_equals_result_feeds_next_operation() {
        assert_eq!(run("2+3=*2="), "10");
    }

    #[test]
    fn test_digit_after_equals_starts_fresh_input() {
        assert_eq!(run("2+3=9"), "9");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        assert_eq!(run("42="), "42");
    }

    #[test]
    fn test_decimal_only_once() {
        assert_eq!(run("1..5"), "1.5");
        assert_eq!(run("0.1+0.2="), "0.30000000000000004");
    }

    #[test]
    fn test_backspace_falls_back_to_zero() {
        assert_eq!(run("12 bs"), "1");
        assert_eq!(run("5 bs bs"), "0");
    }

    #[test]
    fn test_clear_resets_everything() {
        assert_eq!(run("5+5c2="), "2");
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        assert_eq!(run("0-3=*0="), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_small_results_use_exponent() {
        assert_eq!(run("1/3000000000="), "3.3333333333333335e-10");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.0000001), "1e-7");
    }

    #[test]
    fn test_large_results_use_exponent() {
        assert_eq!(run("99999999999*99999999999="), "9.9999999998e+21");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1e21), "-1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(run("1/0="), "Infinity");
        assert_eq!(run("0/0="), "NaN");
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(parse_keys("1 % 2"), Err(UnknownButton("%".into())));
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::Multiply.to_string(), "*");
    }
}
