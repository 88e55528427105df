/// Groups digits in threes, e.g. 10000 -> "10,000". Prices are stored as
/// whole IQD so there is no fractional part to worry about.
pub fn price(value: &i64) -> askama::Result<String> {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut seen = 0;
    for ch in digits.chars().rev() {
        if seen > 0 && seen % 3 == 0 && ch.is_ascii_digit() {
            out.push(',');
        }
        out.push(ch);
        seen += 1;
    }
    Ok(out.chars().rev().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(price(&0).unwrap(), "0");
        assert_eq!(price(&500).unwrap(), "500");
        assert_eq!(price(&5000).unwrap(), "5,000");
        assert_eq!(price(&13000).unwrap(), "13,000");
        assert_eq!(price(&1250000).unwrap(), "1,250,000");
    }
}
