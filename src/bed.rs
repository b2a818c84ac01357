use super::error::MeanError;
use itertools::Itertools;
use std::fmt;

/// Number of leading coordinate columns passed through unchanged.
pub const N_COORD: usize = 3;

/// One tab separated line of a bed-like file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record<'a> {
    pub fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Splits a line on tabs after trimming surrounding whitespace
    /// (including the line ending).
    /// # Example
    /// ```
    /// let rec = avgtracks::bed::Record::parse("chr1\t0\t100\t2.0\t4.0\n");
    /// assert_eq!(rec.coords(), Some(["chr1", "0", "100"]));
    /// assert_eq!(rec.values(), &["2.0", "4.0"]);
    /// ```
    pub fn parse(line: &'a str) -> Self {
        Record {
            fields: line.trim().split('\t').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// chrom, start and end, if the line has them.
    pub fn coords(&self) -> Option<[&'a str; N_COORD]> {
        match self.fields[..] {
            [chrom, st, en, ..] => Some([chrom, st, en]),
            _ => None,
        }
    }

    /// Everything after the coordinates.
    pub fn values(&self) -> &[&'a str] {
        self.fields.get(N_COORD..).unwrap_or(&[])
    }

    pub fn average(&self) -> Result<AveragedRecord<'a>, MeanError> {
        let coords = self.coords().ok_or(MeanError::Empty)?;
        let mean = compute_mean(self.values())?;
        Ok(AveragedRecord { coords, mean })
    }
}

/// The coordinates of a [`Record`] with the mean of its values.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedRecord<'a> {
    pub coords: [&'a str; N_COORD],
    pub mean: f64,
}

impl fmt::Display for AveragedRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}",
            self.coords.iter().join("\t"),
            format_mean(self.mean)
        )
    }
}

/// Arithmetic mean of numeric strings.
/// # Example
/// ```
/// use avgtracks::bed::compute_mean;
/// assert_eq!(compute_mean(&["2.0", "4.0"]), Ok(3.0));
/// assert_eq!(compute_mean(&["7"]), Ok(7.0));
/// assert!(compute_mean(&["1", "x"]).is_err());
/// assert!(compute_mean::<&str>(&[]).is_err());
/// ```
pub fn compute_mean<S: AsRef<str>>(values: &[S]) -> Result<f64, MeanError> {
    if values.is_empty() {
        return Err(MeanError::Empty);
    }
    let mut total = 0.0;
    for (index, value) in values.iter().enumerate() {
        let value = value.as_ref();
        total += value
            .trim()
            .parse::<f64>()
            .map_err(|source| MeanError::Parse {
                index,
                value: value.to_string(),
                source,
            })?;
    }
    Ok(total / values.len() as f64)
}

/// Shortest representation that reads back as the same float, always with a
/// decimal point or exponent. Exponents carry a sign and at least two digits
/// and NaN is written as `nan`, so tracks match the usual `1e-05` notation.
/// # Example
/// ```
/// use avgtracks::bed::format_mean;
/// assert_eq!(format_mean(3.0), "3.0");
/// assert_eq!(format_mean(0.1), "0.1");
/// assert_eq!(format_mean(-2.5), "-2.5");
/// assert_eq!(format_mean(0.00001), "1e-05");
/// ```
pub fn format_mean(mean: f64) -> String {
    if mean.is_nan() {
        return "nan".to_string();
    }
    // Debug switches to exponent form below 1e-4 and from 1e16
    let text = format!("{:?}", mean);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_keeps_coords() {
        let rec = Record::parse("chr1\t100\t200\t1.0\t1.0");
        let avg = rec.average().unwrap();
        assert_eq!(avg.coords, ["chr1", "100", "200"]);
        assert_eq!(avg.to_string(), "chr1\t100\t200\t1.0");
    }

    #[test]
    fn test_single_value_is_exact() {
        for v in ["0.1", "1e-7", "123456.789", "-0.3333333333333333"] {
            let line = format!("chr2\t5\t10\t{}", v);
            let avg = Record::parse(&line).average().unwrap();
            assert_eq!(avg.mean, v.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let rec = Record::parse("chrX\t1\t2\t1\t2\t3\r\n");
        assert_eq!(rec.len(), 6);
        assert_eq!(rec.average().unwrap().to_string(), "chrX\t1\t2\t2.0");
    }

    #[test]
    fn test_short_lines() {
        let rec = Record::parse("chr1\t0\t100");
        assert_eq!(rec.coords(), Some(["chr1", "0", "100"]));
        assert!(rec.values().is_empty());
        assert_eq!(rec.average(), Err(MeanError::Empty));

        let rec = Record::parse("chr1\t0");
        assert_eq!(rec.coords(), None);
        assert!(rec.values().is_empty());
    }

    #[test]
    fn test_parse_error_reports_index() {
        let err = compute_mean(&["1.0", "2.0", "NA"]).unwrap_err();
        match err {
            MeanError::Parse { index, value, .. } => {
                assert_eq!(index, 2);
                assert_eq!(value, "NA");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_format_mean() {
        assert_eq!(format_mean(1.0), "1.0");
        assert_eq!(format_mean(2.0 / 3.0), "0.6666666666666666");
        assert_eq!(format_mean(1e20), "1e+20");
    }

    #[test]
    fn test_format_mean_exponents() {
        assert_eq!(format_mean(0.0001), "0.0001");
        assert_eq!(format_mean(0.00001), "1e-05");
        assert_eq!(format_mean(2.5e-7), "2.5e-07");
        assert_eq!(format_mean(1e-20), "1e-20");
        assert_eq!(format_mean(1e15), "1000000000000000.0");
        assert_eq!(format_mean(1e16), "1e+16");
        assert_eq!(format_mean(-1.5e300), "-1.5e+300");
        assert_eq!(format_mean(f64::NAN), "nan");
        assert_eq!(format_mean(f64::INFINITY), "inf");
        assert_eq!(format_mean(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_small_means_in_records() {
        let avg = Record::parse("c\t0\t1\t0.00002\t0").average().unwrap();
        assert_eq!(avg.to_string(), "c\t0\t1\t1e-05");
        let avg = Record::parse("c\t1\t2\t1e16").average().unwrap();
        assert_eq!(avg.to_string(), "c\t1\t2\t1e+16");
        let avg = Record::parse("c\t2\t3\t1e-20").average().unwrap();
        assert_eq!(avg.to_string(), "c\t2\t3\t1e-20");
    }
}
