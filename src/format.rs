//! Display formatting for front ends.

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

/// Format `n` with `,` thousands separators: `1089536` → `"1,089,536"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
        assert_eq!(group_thousands(1_089_536), "1,089,536");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }
}
