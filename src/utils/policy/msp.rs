use std::fmt::{Display, Formatter, Result as FormatResult};
use crate::error::SchemeError;

const ZERO: i8 = 0;
const PLUS: i8 = 1;
const MINUS: i8 = -1;

/// A monotone span program for a conjunctive policy.
///
/// Row `i` of `m` is labelled with attribute `pi[i]`. The rows are produced by
/// the Lewko-Waters conversion, so the sum of all rows is `(1, 0, ..., 0)` and
/// every reconstruction coefficient equals one.
pub struct AbePolicy {
    pub m: Vec<Vec<i8>>,
    pub pi: Vec<String>,
    pub c: usize,
}

impl AbePolicy {
    /// Returns the span program for the conjunction of all `attributes`.
    ///
    /// # Arguments
    ///
    /// * `attributes` - The attribute tokens of the policy, in order
    pub fn from_conjunction(attributes: &[String]) -> Result<AbePolicy, SchemeError> {
        let n = attributes.len();
        if n == 0 {
            return Err(SchemeError::new("lewko waters algorithm failed: empty conjunction"));
        }
        let mut m: Vec<Vec<i8>> = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = vec![ZERO; n];
            if i == 0 {
                row[0] = PLUS;
            } else {
                row[i] = MINUS;
            }
            if i + 1 < n {
                row[i + 1] = PLUS;
            }
            m.push(row);
        }
        Ok(AbePolicy {
            m,
            pi: attributes.to_vec(),
            c: n,
        })
    }
}

impl Display for AbePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        let pi: Vec<String> = self.pi.iter().map(|a| format!("\"{}\"", a)).collect();
        let m: Vec<String> = self.m
            .iter()
            .map(|row| {
                let cols: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                format!("({})", cols.join(","))
            })
            .collect();
        write!(f, "{{m: [{}], pi: [{}], c: {}}}", m.join(","), pi.join(","), self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(names: &[&str]) -> Vec<String> {
        names.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_msp_from_and() {
        let msp = AbePolicy::from_conjunction(&attrs(&["A", "B", "C"])).unwrap();
        assert_eq!(msp.to_string(), "{m: [(1,1,0),(0,-1,1),(0,0,-1)], pi: [\"A\",\"B\",\"C\"], c: 3}");
    }

    #[test]
    fn test_rows_reconstruct_target_vector() {
        for n in 1..8 {
            let names: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
            let msp = AbePolicy::from_conjunction(&names).unwrap();
            let mut sum = vec![0i32; msp.c];
            for row in &msp.m {
                for (j, v) in row.iter().enumerate() {
                    sum[j] += *v as i32;
                }
            }
            let mut target = vec![0i32; msp.c];
            target[0] = 1;
            assert_eq!(sum, target);
        }
    }

    #[test]
    fn test_empty_conjunction() {
        assert!(AbePolicy::from_conjunction(&[]).is_err());
    }
}
