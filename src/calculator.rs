//! Calculator state machine
//!
//! Finite-state arithmetic input handler: a pending operand/operator pair
//! plus the number being typed. Numeric edge cases surface as the "Error"
//! display sentinel, never as propagated errors.

/// Maximum typed digits (sign excluded)
pub const MAX_LEN: usize = 16;

/// Pending binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }
}

/// Calculator state: `previous` and `op` hold the pending operation while
/// `current` is the number on screen. `overwrite` means the next digit
/// replaces the display instead of appending.
#[derive(Debug, Clone)]
pub struct Calculator {
    previous: Option<String>,
    op: Option<Op>,
    current: String,
    overwrite: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            previous: None,
            op: None,
            current: "0".to_string(),
            overwrite: true,
        }
    }

    /// Type a digit or the decimal point
    pub fn input_digit(&mut self, d: char) {
        if self.overwrite {
            self.current = if d == '.' {
                "0.".to_string()
            } else {
                d.to_string()
            };
            self.overwrite = false;
        } else {
            if d == '.' && self.current.contains('.') {
                return; // one decimal point only
            }
            if self.current.replace('-', "").len() >= MAX_LEN {
                return;
            }
            self.current.push(d);
        }
    }

    /// Select an operator. If the user was typing, the pending operation is
    /// consolidated first, so `5 + 3 +` leaves 8 pending.
    pub fn set_operator(&mut self, op: Op) {
        if !self.overwrite {
            match (&self.previous, self.op) {
                (None, _) => self.previous = Some(self.current.clone()),
                (Some(prev), Some(pending)) => {
                    self.previous = Some(compute(prev, pending, &self.current));
                }
                (Some(_), None) => {}
            }
        }
        self.op = Some(op);
        self.overwrite = true;
    }

    /// Apply the pending operation; a no-op without one
    pub fn equals(&mut self) {
        if let (Some(prev), Some(op)) = (self.previous.as_deref(), self.op) {
            self.current = compute(prev, op, &self.current);
            self.previous = None;
            self.op = None;
            self.overwrite = true;
        }
    }

    pub fn clear(&mut self) {
        self.previous = None;
        self.op = None;
        self.current = "0".to_string();
        self.overwrite = true;
    }

    /// Delete the last typed character; inert right after a result
    pub fn backspace(&mut self) {
        if self.overwrite {
            return;
        }
        let negative_single = self.current.len() == 2 && self.current.starts_with('-');
        if self.current.len() <= 1 || negative_single {
            self.current = "0".to_string();
            self.overwrite = true;
        } else {
            self.current.pop();
        }
    }

    /// Toggle the sign; "0" stays "0"
    pub fn negate(&mut self) {
        if self.current == "0" {
            return;
        }
        if let Some(stripped) = self.current.strip_prefix('-') {
            self.current = stripped.to_string();
        } else {
            self.current = format!("-{}", self.current);
        }
    }

    /// iOS-style percent: with a pending operation, `previous * current/100`;
    /// otherwise `current/100`.
    pub fn percent(&mut self) {
        let val = parse_num(&self.current);
        let val = match (&self.previous, self.op) {
            (Some(prev), Some(_)) => parse_num(prev) * (val / 100.0),
            _ => val / 100.0,
        };
        self.current = num_to_string(val);
    }

    /// The result line: "Error" for non-numeric values, exponential notation
    /// for results too long for the display.
    pub fn display(&self) -> String {
        if self.current.is_empty() {
            return "0".to_string();
        }
        let n = parse_num(&self.current);
        if !n.is_finite() {
            return "Error".to_string();
        }
        if self.current.len() > 20 {
            return format!("{:.8e}", n);
        }
        self.current.clone()
    }

    /// The pending-operation line above the result
    pub fn history(&self) -> String {
        match (&self.previous, self.op) {
            (Some(p), Some(op)) => format!("{} {}", p, op.symbol()),
            (Some(p), None) => p.clone(),
            (None, Some(op)) => op.symbol().to_string(),
            (None, None) => String::new(),
        }
    }
}

fn parse_num(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a value the way the display stores numbers. Non-finite values
/// become "NaN" so `display` maps them to the Error sentinel.
fn num_to_string(n: f64) -> String {
    if n.is_finite() {
        format!("{}", n)
    } else {
        "NaN".to_string()
    }
}

/// Binary arithmetic over display strings, with a soft rounding pass to wash
/// out binary representation error (0.1 + 0.2 shows 0.3).
fn compute(a: &str, op: Op, b: &str) -> String {
    let a = parse_num(a);
    let b = parse_num(b);
    let res = match op {
        Op::Add => a + b,
        Op::Sub => a - b,
        Op::Mul => a * b,
        Op::Div => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
    };
    let res = ((res + f64::EPSILON) * 1e12).round() / 1e12;
    num_to_string(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn type_str(calc: &mut Calculator, s: &str) {
        for c in s.chars() {
            calc.input_digit(c);
        }
    }

    #[test]
    fn test_chained_operations_consolidate() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "5");
        calc.set_operator(Op::Add);
        type_str(&mut calc, "3");
        calc.set_operator(Op::Add);
        // The chain consolidated 5 + 3 before accepting the new operator
        assert_eq!(calc.history(), "8 +");
        type_str(&mut calc, "2");
        calc.equals();
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.history(), "");
    }

    #[test]
    fn test_divide_by_zero_shows_error() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "4");
        calc.set_operator(Op::Div);
        type_str(&mut calc, "0");
        calc.equals();
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn test_binary_error_washing() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "0.1");
        calc.set_operator(Op::Add);
        type_str(&mut calc, "0.2");
        calc.equals();
        assert_eq!(calc.display(), "0.3");
    }

    #[test]
    fn test_overwrite_after_result() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "5");
        calc.set_operator(Op::Mul);
        type_str(&mut calc, "6");
        calc.equals();
        assert_eq!(calc.display(), "30");
        // The next digit replaces the result
        calc.input_digit('7');
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_decimal_point_rules() {
        let mut calc = Calculator::new();
        calc.input_digit('.');
        assert_eq!(calc.display(), "0.");
        calc.input_digit('5');
        calc.input_digit('.');
        assert_eq!(calc.display(), "0.5"); // second point rejected
    }

    #[test]
    fn test_digit_limit() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "123456789012345678901234");
        assert_eq!(calc.display().len(), MAX_LEN);
        // The sign does not count against the limit
        calc.negate();
        assert_eq!(calc.display().len(), MAX_LEN + 1);
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        // Inert while overwrite is set
        calc.backspace();
        assert_eq!(calc.display(), "0");

        type_str(&mut calc, "123");
        calc.backspace();
        assert_eq!(calc.display(), "12");
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.display(), "0");

        // "-5" collapses straight to 0
        type_str(&mut calc, "5");
        calc.negate();
        calc.backspace();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_negate() {
        let mut calc = Calculator::new();
        calc.negate();
        assert_eq!(calc.display(), "0"); // no negative zero
        type_str(&mut calc, "42");
        calc.negate();
        assert_eq!(calc.display(), "-42");
        calc.negate();
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_percent_standalone() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "50");
        calc.percent();
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_percent_with_pending_operation() {
        // 200 + 10% = 200 + (200 * 0.10) = 220
        let mut calc = Calculator::new();
        type_str(&mut calc, "200");
        calc.set_operator(Op::Add);
        type_str(&mut calc, "10");
        calc.percent();
        assert_eq!(calc.display(), "20");
        calc.equals();
        assert_eq!(calc.display(), "220");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "12");
        calc.set_operator(Op::Sub);
        type_str(&mut calc, "3");
        calc.clear();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.history(), "");
        calc.equals(); // nothing pending
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_error_state_recovers_on_clear() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "4");
        calc.set_operator(Op::Div);
        type_str(&mut calc, "0");
        calc.equals();
        assert_eq!(calc.display(), "Error");
        calc.clear();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_long_result_uses_exponential() {
        let mut calc = Calculator::new();
        type_str(&mut calc, "9999999999999999");
        calc.set_operator(Op::Mul);
        type_str(&mut calc, "9999999999999999");
        calc.equals();
        let shown = calc.display();
        assert!(shown.contains('e'), "expected exponential, got {shown}");
    }

    proptest! {
        #[test]
        fn prop_typed_digits_never_exceed_limit(digits in "[0-9]{1,40}") {
            let mut calc = Calculator::new();
            type_str(&mut calc, &digits);
            prop_assert!(calc.display().len() <= MAX_LEN);
        }

        #[test]
        fn prop_display_never_panics_mid_expression(
            a in "[0-9]{1,8}",
            b in "[0-9]{1,8}",
            op in prop::sample::select(vec![Op::Add, Op::Sub, Op::Mul, Op::Div]),
        ) {
            let mut calc = Calculator::new();
            type_str(&mut calc, &a);
            calc.set_operator(op);
            type_str(&mut calc, &b);
            calc.equals();
            let _ = calc.display();
            let _ = calc.history();
        }
    }
}
