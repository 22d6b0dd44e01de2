use crate::coverage::Probe;

pub const ADD: Probe = Probe::new("add", file!(), line!() + 6);

/// Sum of `a` and `b`.
///
/// Overflow wraps (two's complement), which keeps the sum commutative and
/// associative over all of `i64`.
pub fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(2, 3), 5);
        assert_eq!(add(-7, 7), 0);
    }

    #[test]
    fn test_add_commutative() {
        let samples = [0, 1, -1, 2, 3, 1_000_000, i64::MIN, i64::MAX];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(add(a, b), add(b, a), "add({a}, {b})");
            }
        }
    }

    #[test]
    fn test_add_associative_across_overflow() {
        let (a, b, c) = (i64::MAX, 1, -5);
        assert_eq!(add(add(a, b), c), add(a, add(b, c)));
        assert_eq!(add(i64::MAX, 1), i64::MIN);
    }

    #[test]
    fn test_probe_points_at_add() {
        assert_eq!(ADD.name, "add");
        assert!(ADD.file.ends_with("arith.rs"));

        let line = include_str!("arith.rs")
            .lines()
            .nth(ADD.line as usize - 1)
            .unwrap();
        assert!(line.starts_with("pub fn add("), "line {}: {line:?}", ADD.line);
    }
}
