/// Yen amount with thousands separators: `¥340,000`, `¥-5,000`.
pub fn yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("¥{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yen() {
        assert_eq!(yen(0), "¥0");
        assert_eq!(yen(999), "¥999");
        assert_eq!(yen(1_000), "¥1,000");
        assert_eq!(yen(340_000), "¥340,000");
        assert_eq!(yen(1_234_567), "¥1,234,567");
        assert_eq!(yen(-5_000), "¥-5,000");
        assert_eq!(yen(i64::MIN), "¥-9,223,372,036,854,775,808");
    }
}
